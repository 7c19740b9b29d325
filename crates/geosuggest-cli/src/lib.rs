//! geosuggest-cli
//! ==============
//!
//! Command-line interface for the `geosuggest-core` place autocomplete
//! coordinator.
//!
//! This crate primarily provides a binary (`geosuggest`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install geosuggest-cli
//! ```
//!
//! Basic usage:
//!
//! ```text
//! geosuggest --help
//! geosuggest search Koch
//! geosuggest type Kottayam --interval-ms 50
//! geosuggest queries Koch
//! geosuggest --config geosuggest.toml config
//! ```
//!
//! For programmatic access, use the `geosuggest-core` crate directly.
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

// This library target intentionally exposes no API; the binary is the primary
// deliverable. The presence of this file enables a rendered page on docs.rs.
