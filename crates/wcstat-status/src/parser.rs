//! Entry points from raw report text to status records.

use tracing::{debug, warn};
use wcstat_xml::ParseOptions;

use crate::error::{StatusError, StatusResult};
use crate::flatten::assemble;
use crate::model::StatusDocument;
use crate::moves::check_moves;
use crate::record::FileStatus;

/// Normalize and decode a status report without flattening it.
pub fn parse_document(text: &str) -> StatusResult<StatusDocument> {
    decode(text, &ParseOptions::status_report())
}

/// Parse a status report into its ordered file status records.
pub fn parse_status(text: &str) -> StatusResult<Vec<FileStatus>> {
    parse_status_with(text, &ParseOptions::status_report())
}

/// Like [`parse_status`], with a caller-supplied normalizer configuration.
pub fn parse_status_with(text: &str, options: &ParseOptions) -> StatusResult<Vec<FileStatus>> {
    let document = decode(text, options)?;
    for mismatch in check_moves(&document) {
        warn!(%mismatch, "unpaired move in status report");
    }
    Ok(assemble(&document))
}

/// Parse a status report off the async executor.
///
/// Resolves exactly once, with every record or with the failure. Under a
/// tokio runtime the parse runs on the blocking pool; under any other
/// executor it runs inline when the future is polled.
pub async fn parse_status_xml(text: impl Into<String>) -> StatusResult<Vec<FileStatus>> {
    let text = text.into();
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle
            .spawn_blocking(move || parse_status(&text))
            .await
            .map_err(|e| StatusError::Join(e.to_string()))?,
        Err(_) => parse_status(&text),
    }
}

fn decode(text: &str, options: &ParseOptions) -> StatusResult<StatusDocument> {
    let node = wcstat_xml::parse_str(text, options)?;
    let document = StatusDocument::from_node(node)?;
    debug!(
        targets = document.targets().len(),
        changelists = document.changelists().len(),
        "decoded status report"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<status>
<target path=".">
<entry path="a.txt">
<wc-status item="normal" revision="5" props="none">
</wc-status>
</entry>
</target>
</status>"#;

    #[test]
    fn single_normal_entry() {
        let records = parse_status(NORMAL).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.path, "a.txt");
        assert_eq!(record.status, "normal");
        assert_eq!(record.props, "none");
        assert!(!record.wc_status.locked);
        assert!(!record.wc_status.switched);
        assert_eq!(record.rename, None);
        assert_eq!(record.commit, None);
        assert_eq!(record.changelist, None);
    }

    #[test]
    fn move_source_dropped() {
        let xml = r#"<status><target path="."><entry path="a.txt"><wc-status item="deleted" props="none" revision="2" moved-to="b.txt"/></entry></target></status>"#;
        assert!(parse_status(xml).unwrap().is_empty());
    }

    #[test]
    fn move_destination_renamed() {
        let xml = r#"<status><target path="."><entry path="b.txt"><wc-status item="added" props="none" revision="-1" moved-from="a.txt"/></entry></target></status>"#;
        let records = parse_status(xml).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rename.as_deref(), Some("a.txt"));
    }

    #[test]
    fn changelists_in_document_order() {
        let xml = r#"<status>
<target path="."/>
<changelist name="bugfix">
<entry path="fix.c"><wc-status item="modified" props="none" revision="3"/></entry>
</changelist>
<changelist name="feature">
<entry path="one.c"><wc-status item="added" props="none" revision="-1"/></entry>
<entry path="two.c"><wc-status item="modified" props="modified" revision="3"/></entry>
</changelist>
</status>"#;
        let records = parse_status(xml).unwrap();
        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.path.as_str(), r.changelist.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("fix.c", Some("bugfix")),
                ("one.c", Some("feature")),
                ("two.c", Some("feature")),
            ]
        );
    }

    #[test]
    fn malformed_xml_is_parse_failure() {
        let err = parse_status("<status><target path=\".\">").unwrap_err();
        assert!(err.is_parse_failure());
        assert!(matches!(err, StatusError::ParseFailure(_)));
    }

    #[test]
    fn commit_block_copied_verbatim() {
        let xml = r#"<status><target path=".">
<entry path="src/lib.rs">
<wc-status item="modified" revision="40" props="none" wc-locked="true" switched="true">
<commit revision="38">
<author>j.doe</author>
<date>2023-11-14T09:30:00.123456Z</date>
</commit>
</wc-status>
</entry>
</target></status>"#;
        let records = parse_status(xml).unwrap();
        let record = &records[0];
        assert!(record.wc_status.locked);
        assert!(record.wc_status.switched);
        let commit = record.commit.as_ref().unwrap();
        assert_eq!(commit.revision, "38");
        assert_eq!(commit.author, "j.doe");
        assert_eq!(commit.date, "2023-11-14T09:30:00.123456Z");
    }

    #[test]
    fn commit_text_kept_byte_for_byte() {
        let xml = r#"<status><target path=".">
<entry path="a.txt">
<wc-status item="modified" revision="2" props="none">
<commit revision="1">
<author> bob </author>
<date>2024-02-03T04:05:06.000000Z </date>
</commit>
</wc-status>
</entry>
</target></status>"#;
        let records = parse_status(xml).unwrap();
        let commit = records[0].commit.as_ref().unwrap();
        assert_eq!(commit.revision, "1");
        assert_eq!(commit.author, " bob ");
        assert_eq!(commit.date, "2024-02-03T04:05:06.000000Z ");
    }

    #[test]
    fn empty_commit_block_emits_no_commit() {
        let self_closing = r#"<status><target path="."><entry path="a"><wc-status item="normal" props="none"><commit/></wc-status></entry></target></status>"#;
        let blank = "<status><target path=\".\"><entry path=\"b\"><wc-status item=\"normal\" props=\"none\"><commit>\n</commit></wc-status></entry></target></status>";
        for xml in [self_closing, blank] {
            let records = parse_status(xml).unwrap();
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].commit, None);
        }
    }

    #[test]
    fn async_entry_point_runs_without_tokio_runtime() {
        let records = futures::executor::block_on(parse_status_xml(NORMAL)).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_report_has_no_records() {
        assert!(parse_status("<status/>").unwrap().is_empty());
        assert!(parse_status(r#"<status><target path="."></target></status>"#).unwrap().is_empty());
    }

    #[test]
    fn document_exposes_targets() {
        let doc = parse_document(NORMAL).unwrap();
        assert_eq!(doc.targets()[0].path.as_deref(), Some("."));
        assert_eq!(doc.entries().count(), 1);
    }

    #[test]
    fn multiple_targets_all_flattened() {
        let xml = r#"<status>
<target path="a"><entry path="a/x"><wc-status item="modified" props="none"/></entry></target>
<target path="b"><entry path="b/y"><wc-status item="added" props="none"/></entry></target>
</status>"#;
        let paths: Vec<_> = parse_status(xml).unwrap().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["a/x", "b/y"]);
    }

    #[test]
    fn wrong_shape_is_parse_failure() {
        let xml = r#"<status><target><entry path="a"><path>b</path></entry></target></status>"#;
        let err = parse_status(xml).unwrap_err();
        assert!(matches!(err, StatusError::Shape(_)));
        assert!(err.is_parse_failure());
    }

    #[tokio::test]
    async fn async_entry_point_resolves() {
        let records = parse_status_xml(NORMAL).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn async_entry_point_fails_on_malformed() {
        let err = parse_status_xml("<status><unclosed></status>").await.unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[tokio::test]
    async fn concurrent_parses_do_not_interfere() {
        let a = parse_status_xml(NORMAL);
        let b = parse_status_xml("<status/>");
        let (a, b) = tokio::join!(a, b);
        assert_eq!(a.unwrap().len(), 1);
        assert!(b.unwrap().is_empty());
    }
}
