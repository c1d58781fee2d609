//! Normalized per-file status records.

use serde::{Deserialize, Serialize};

/// Status keyword of an entry scheduled for addition.
pub const ITEM_ADDED: &str = "added";
/// Status keyword of an entry scheduled for deletion.
pub const ITEM_DELETED: &str = "deleted";

/// One file's normalized status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStatus {
    /// Path exactly as reported.
    pub path: String,
    /// Working-copy status keyword (`added`, `modified`, `normal`, ...).
    pub status: String,
    /// Property status keyword.
    pub props: String,
    pub wc_status: WcFlags,
    /// Name of the changelist the file belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelist: Option<String>,
    /// Source path of a move, on the added side of the move.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
    /// Last-changed commit of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitInfo>,
}

impl FileStatus {
    /// Returns `true` if this record is the destination of a move.
    pub fn is_rename(&self) -> bool {
        self.rename.is_some()
    }

    /// Returns `true` if this record came from a changelist.
    pub fn is_in_changelist(&self) -> bool {
        self.changelist.is_some()
    }
}

/// Lock and switch state of a working-copy file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WcFlags {
    pub locked: bool,
    pub switched: bool,
}

impl WcFlags {
    /// Build from the report's string flags.
    pub fn from_report(wc_locked: Option<&str>, switched: Option<&str>) -> Self {
        Self {
            locked: flag_is_true(wc_locked),
            switched: flag_is_true(switched),
        }
    }
}

/// A report flag is set only when it is literally `"true"`.
pub fn flag_is_true(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Revision, author and date of a file's last change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    #[serde(default)]
    pub revision: String,
    #[serde(default, deserialize_with = "crate::model::text")]
    pub author: String,
    #[serde(default, deserialize_with = "crate::model::text")]
    pub date: String,
}

/// Group records by changelist, keeping the order in which each changelist
/// first appears. Unfiled records are grouped under `None`.
pub fn group_by_changelist(records: &[FileStatus]) -> Vec<(Option<&str>, Vec<&FileStatus>)> {
    let mut groups: Vec<(Option<&str>, Vec<&FileStatus>)> = Vec::new();
    for record in records {
        let key = record.changelist.as_deref();
        match groups.iter_mut().find(|(name, _)| *name == key) {
            Some((_, members)) => members.push(record),
            None => groups.push((key, vec![record])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(path: &str, changelist: Option<&str>) -> FileStatus {
        FileStatus {
            path: path.into(),
            status: "modified".into(),
            props: "none".into(),
            changelist: changelist.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn flag_law() {
        assert!(flag_is_true(Some("true")));
        assert!(!flag_is_true(Some("false")));
        assert!(!flag_is_true(Some("TRUE")));
        assert!(!flag_is_true(Some("")));
        assert!(!flag_is_true(None));
        assert_eq!(
            WcFlags::from_report(Some("true"), None),
            WcFlags { locked: true, switched: false }
        );
    }

    #[test]
    fn optional_fields_omitted_from_json() {
        let json = serde_json::to_value(record("a.txt", None)).unwrap();
        assert_eq!(
            json,
            json!({
                "path": "a.txt",
                "status": "modified",
                "props": "none",
                "wcStatus": { "locked": false, "switched": false }
            })
        );
    }

    #[test]
    fn full_record_json() {
        let full = FileStatus {
            rename: Some("old.txt".into()),
            commit: Some(CommitInfo {
                revision: "4".into(),
                author: "alice".into(),
                date: "2024-01-01".into(),
            }),
            ..record("new.txt", Some("feature"))
        };
        let json = serde_json::to_value(&full).unwrap();
        assert_eq!(json["changelist"], "feature");
        assert_eq!(json["rename"], "old.txt");
        assert_eq!(json["commit"]["author"], "alice");
        let back: FileStatus = serde_json::from_value(json).unwrap();
        assert_eq!(back, full);
        assert!(back.is_rename());
        assert!(back.is_in_changelist());
    }

    #[test]
    fn grouping_keeps_first_appearance_order() {
        let records = vec![
            record("a", None),
            record("b", Some("fix")),
            record("c", Some("feature")),
            record("d", Some("fix")),
        ];
        let groups = group_by_changelist(&records);
        let summary: Vec<_> = groups
            .iter()
            .map(|(name, members)| (*name, members.iter().map(|r| r.path.as_str()).collect::<Vec<_>>()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (None, vec!["a"]),
                (Some("fix"), vec!["b", "d"]),
                (Some("feature"), vec!["c"]),
            ]
        );
    }

    #[test]
    fn grouping_empty() {
        assert!(group_by_changelist(&[]).is_empty());
    }
}
