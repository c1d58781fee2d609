use serde::{Deserialize, Serialize};

/// Configuration for [`parse_str`](crate::parse_str).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Merge attributes into the element's own fields instead of keeping
    /// them under a separate [`ATTR_KEY`](crate::ATTR_KEY) object.
    pub merge_attrs: bool,
    /// Wrap the result in an object keyed by the root element's name.
    pub explicit_root: bool,
    /// Always collect child elements into arrays, even when a tag occurs once.
    pub explicit_array: bool,
    /// Camel-case tag and attribute names (see [`camel_case`](crate::camel_case)).
    pub normalize_names: bool,
    /// Strip leading and trailing whitespace from text content.
    pub trim: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            merge_attrs: false,
            explicit_root: true,
            explicit_array: true,
            normalize_names: false,
            trim: false,
        }
    }
}

impl ParseOptions {
    /// The configuration used for version-control status reports.
    ///
    /// Attributes are merged, the root element is returned directly, single
    /// children stay single objects and every name is camel-cased, so
    /// `<wc-status wc-locked="true"/>` reads back as `wcStatus.wcLocked`.
    /// Text is kept verbatim; whitespace-only text between elements is
    /// dropped regardless.
    pub fn status_report() -> Self {
        Self {
            merge_attrs: true,
            explicit_root: false,
            explicit_array: false,
            normalize_names: true,
            trim: false,
        }
    }

    pub(crate) fn name(&self, raw: &str) -> String {
        if self.normalize_names {
            crate::camel_case(raw)
        } else {
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_report_preset() {
        let opts = ParseOptions::status_report();
        assert!(opts.merge_attrs);
        assert!(!opts.explicit_root);
        assert!(!opts.explicit_array);
        assert!(opts.normalize_names);
        assert!(!opts.trim);
        assert_ne!(opts, ParseOptions::default());
    }

    #[test]
    fn name_processing() {
        assert_eq!(ParseOptions::status_report().name("moved-to"), "movedTo");
        assert_eq!(ParseOptions::default().name("moved-to"), "moved-to");
    }

    #[test]
    fn options_deserialize_from_json() {
        let opts: ParseOptions = serde_json::from_str(
            r#"{"merge_attrs":true,"explicit_root":false,"explicit_array":false,"normalize_names":true,"trim":false}"#,
        )
        .unwrap();
        assert_eq!(opts, ParseOptions::status_report());
    }
}
