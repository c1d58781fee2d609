//! Reduction of decoded entries into flat [`FileStatus`] records.

use tracing::{debug, trace};

use crate::model::{OneOrMany, StatusDocument, StatusEntry};
use crate::record::{FileStatus, WcFlags, ITEM_ADDED, ITEM_DELETED};

/// Flatten one entry or a sequence of entries, in order.
///
/// Every produced record is tagged with `changelist`. The source side of a
/// move yields nothing, so the result can be shorter than the input.
pub fn flatten(entries: &OneOrMany<StatusEntry>, changelist: Option<&str>) -> Vec<FileStatus> {
    match entries {
        OneOrMany::One(entry) => flatten_entry(entry, changelist).into_iter().collect(),
        OneOrMany::Many(entries) => entries
            .iter()
            .filter_map(|entry| flatten_entry(entry, changelist))
            .collect(),
    }
}

/// Normalize a single entry, or drop it if it is the source of a move.
pub fn flatten_entry(entry: &StatusEntry, changelist: Option<&str>) -> Option<FileStatus> {
    let wc = &entry.wc_status;
    let mut record = FileStatus {
        path: entry.path.clone(),
        status: wc.item.clone(),
        props: wc.props.clone(),
        wc_status: WcFlags::from_report(wc.wc_locked.as_deref(), wc.switched.as_deref()),
        changelist: changelist.map(str::to_string),
        rename: None,
        commit: None,
    };

    if let Some(to) = wc.moved_to() {
        if record.status == ITEM_DELETED {
            trace!(path = %entry.path, moved_to = to, "dropping move source");
            return None;
        }
    }
    if let Some(from) = wc.moved_from() {
        if record.status == ITEM_ADDED {
            record.rename = Some(from.to_string());
        }
    }
    record.commit = wc.commit.clone();

    Some(record)
}

/// Build the full record list for a report: target entries first, then each
/// changelist's entries tagged with its name.
pub fn assemble(document: &StatusDocument) -> Vec<FileStatus> {
    let mut records = Vec::new();

    for target in document.targets() {
        if let Some(entries) = &target.entry {
            records.extend(flatten(entries, None));
        }
    }
    let unfiled = records.len();

    for changelist in document.changelists() {
        if let Some(entries) = &changelist.entry {
            records.extend(flatten(entries, changelist.name.as_deref()));
        }
    }

    debug!(
        unfiled,
        filed = records.len() - unfiled,
        changelists = document.changelists().len(),
        "assembled status records"
    );
    records
}
