//! Working-copy status report normalization.
//!
//! Takes the XML status report of a version-control checkout and produces a
//! flat, ordered list of per-file [`FileStatus`] records: unfiled entries
//! first, then every changelist's entries. The source side of a move is
//! dropped, the destination side carries the source path as its rename.
//!
//! # Key Types
//!
//! - [`StatusDocument`] -- The decoded report (targets, changelists, entries)
//! - [`OneOrMany`] -- A field that holds one element or a sequence of them
//! - [`FileStatus`] -- One normalized per-file record
//! - [`MoveMismatch`] -- A move whose other half is missing from the report

pub mod error;
pub mod flatten;
pub mod model;
pub mod moves;
pub mod parser;
pub mod record;

pub use error::{StatusError, StatusResult};
pub use flatten::{assemble, flatten, flatten_entry};
pub use model::{Changelist, OneOrMany, StatusDocument, StatusEntry, Target, WcStatus};
pub use moves::{check_moves, MoveMismatch};
pub use parser::{parse_document, parse_status, parse_status_with, parse_status_xml};
pub use record::{
    flag_is_true, group_by_changelist, CommitInfo, FileStatus, WcFlags, ITEM_ADDED, ITEM_DELETED,
};
