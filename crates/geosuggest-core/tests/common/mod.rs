#![allow(dead_code)]

use async_trait::async_trait;
use geosuggest_core::model::{QueryDescriptor, RawPlace};
use geosuggest_core::traits::PlaceSource;
use geosuggest_core::{SuggestConfig, SuggestError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// What the fake upstream does for one (query, priority) pair.
#[derive(Clone)]
pub enum Reply {
    Records { records: Vec<Value>, delay: Duration },
    Fail { delay: Duration },
    /// The source itself blows up mid-request.
    Panic { delay: Duration },
}

impl Reply {
    pub fn ok(records: Vec<Value>) -> Self {
        Reply::Records {
            records,
            delay: Duration::from_millis(20),
        }
    }

    pub fn delayed(records: Vec<Value>, delay_ms: u64) -> Self {
        Reply::Records {
            records,
            delay: Duration::from_millis(delay_ms),
        }
    }

    pub fn fail() -> Self {
        Reply::Fail {
            delay: Duration::from_millis(5),
        }
    }

    pub fn panic() -> Self {
        Reply::Panic {
            delay: Duration::from_millis(5),
        }
    }
}

/// In-memory upstream. Unknown queries answer with an empty list.
/// Every call is recorded, including ones whose result is later discarded.
#[derive(Default)]
pub struct FakeSource {
    replies: HashMap<(String, u8), Reply>,
    calls: Mutex<Vec<QueryDescriptor>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, query: &str, priority: u8, reply: Reply) -> Self {
        self.replies.insert((query.to_string(), priority), reply);
        self
    }

    pub fn calls(&self) -> Vec<QueryDescriptor> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queried_texts(&self) -> Vec<String> {
        let mut texts: Vec<String> = self.calls().into_iter().map(|d| d.query).collect();
        texts.dedup();
        texts
    }
}

#[async_trait]
impl PlaceSource for FakeSource {
    async fn fetch(&self, descriptor: &QueryDescriptor) -> geosuggest_core::Result<Vec<RawPlace>> {
        self.calls.lock().unwrap().push(descriptor.clone());
        let reply = self
            .replies
            .get(&(descriptor.query.clone(), descriptor.source_priority))
            .cloned();
        match reply {
            Some(Reply::Records { records, delay }) => {
                tokio::time::sleep(delay).await;
                Ok(serde_json::from_value(Value::Array(records))?)
            }
            Some(Reply::Fail { delay }) => {
                tokio::time::sleep(delay).await;
                Err(SuggestError::Json(
                    serde_json::from_str::<Value>("<html>502</html>").unwrap_err(),
                ))
            }
            Some(Reply::Panic { delay }) => {
                tokio::time::sleep(delay).await;
                panic!("fake upstream crashed for {:?}", descriptor.query);
            }
            None => Ok(Vec::new()),
        }
    }
}

pub fn test_config() -> SuggestConfig {
    SuggestConfig {
        endpoint: "https://geocoder.test/search".to_string(),
        request_timeout_ms: None,
        ..SuggestConfig::default()
    }
}

/// A city record in central Kerala, shaped like the upstream's JSON.
pub fn city(place_id: u64, name: &str, county: &str, importance: f64) -> Value {
    json!({
        "place_id": place_id,
        "osm_id": place_id * 10,
        "lat": "9.9312",
        "lon": "76.2673",
        "name": name,
        "display_name": format!("{name}, {county}, Kerala, India"),
        "class": "place",
        "type": "city",
        "importance": importance,
        "address": {
            "city": name,
            "county": county,
            "state": "Kerala",
            "country": "India",
            "country_code": "in"
        }
    })
}

/// An administrative boundary record for a district.
pub fn district(place_id: u64, name: &str, importance: f64) -> Value {
    json!({
        "place_id": place_id,
        "lat": "10.0",
        "lon": "76.3",
        "name": name,
        "display_name": format!("{name}, Kerala, India"),
        "class": "boundary",
        "type": "administrative",
        "importance": importance,
        "address": {
            "state_district": name,
            "state": "Kerala",
            "country": "India",
            "country_code": "in"
        }
    })
}

pub fn raw(value: Value) -> RawPlace {
    serde_json::from_value(value).unwrap()
}
