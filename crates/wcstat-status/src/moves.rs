//! Consistency check for move pairs.
//!
//! A move is reported as two entries: the deleted source with `movedTo` and
//! the added destination with `movedFrom`. Flattening treats each side on its
//! own; this check only reports sides whose partner is missing.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::model::{StatusDocument, StatusEntry};
use crate::record::{ITEM_ADDED, ITEM_DELETED};

/// A move whose other half is not in the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoveMismatch {
    /// The source says it moved to `to`, but no added entry there points back.
    MissingDestination { from: String, to: String },
    /// The destination says it came from `from`, but no deleted entry there
    /// points forward.
    MissingSource { from: String, to: String },
}

impl fmt::Display for MoveMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDestination { from, to } => {
                write!(f, "{from} moved to {to}, but {to} is not reported as added")
            }
            Self::MissingSource { from, to } => {
                write!(f, "{to} moved from {from}, but {from} is not reported as deleted")
            }
        }
    }
}

/// Find move sources and destinations without a matching partner.
///
/// Paths are compared exactly as reported. Results follow document order.
pub fn check_moves(document: &StatusDocument) -> Vec<MoveMismatch> {
    let by_path: HashMap<&str, &StatusEntry> = document
        .entries()
        .map(|entry| (entry.path.as_str(), entry))
        .collect();
    let partner = |path: &str, item: &str| {
        by_path
            .get(path)
            .map(|entry| &entry.wc_status)
            .filter(|wc| wc.item == item)
    };

    let mut mismatches = Vec::new();
    for entry in document.entries() {
        let wc = &entry.wc_status;
        if wc.item == ITEM_DELETED {
            if let Some(to) = wc.moved_to() {
                let paired = partner(to, ITEM_ADDED)
                    .is_some_and(|other| other.moved_from() == Some(entry.path.as_str()));
                if !paired {
                    mismatches.push(MoveMismatch::MissingDestination {
                        from: entry.path.clone(),
                        to: to.to_string(),
                    });
                }
            }
        } else if wc.item == ITEM_ADDED {
            if let Some(from) = wc.moved_from() {
                let paired = partner(from, ITEM_DELETED)
                    .is_some_and(|other| other.moved_to() == Some(entry.path.as_str()));
                if !paired {
                    mismatches.push(MoveMismatch::MissingSource {
                        from: from.to_string(),
                        to: entry.path.clone(),
                    });
                }
            }
        }
    }
    mismatches
}
