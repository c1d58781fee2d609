//! XML-to-tree normalizer for wcstat.
//!
//! Turns raw XML text into a nested [`Node`] tree (a `serde_json::Value`)
//! the way generic XML-to-object libraries do: element and attribute names
//! can be camel-cased, attributes can be merged into their element's fields,
//! and a tag that occurs once under a parent stays a single object while a
//! repeated tag becomes an array.
//!
//! # Key Types
//!
//! - [`ParseOptions`] -- Normalizer configuration ([`ParseOptions::status_report`] preset)
//! - [`Node`] -- The normalized tree
//! - [`XmlError`] -- Well-formedness failures

pub mod error;
pub mod names;
pub mod options;
pub mod tree;

pub use error::{XmlError, XmlResult};
pub use names::camel_case;
pub use options::ParseOptions;
pub use tree::{parse_str, Node, ATTR_KEY, TEXT_KEY};
