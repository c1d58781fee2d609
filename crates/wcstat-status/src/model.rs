//! Decoded form of a normalized status report.
//!
//! The normalizer collapses a tag that occurs once into a single object and
//! a repeated tag into an array, so every place the report allows repetition
//! is typed as [`OneOrMany`]. An element with no attributes or children
//! arrives as an empty string and decodes as its type's default.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use wcstat_xml::{Node, TEXT_KEY};

use crate::error::{StatusError, StatusResult};
use crate::record::CommitInfo;

/// One element or an ordered sequence of elements under the same key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// View the contents as a slice, in document order.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(item) => std::slice::from_ref(item),
            Self::Many(items) => items,
        }
    }

    /// Iterate over the elements in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Take the elements as a vector, in document order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Many(items)
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'de, T> Deserialize<'de> for OneOrMany<T>
where
    T: DeserializeOwned + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .map(decode_element)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Many)
                .map_err(de::Error::custom),
            single => decode_element(single)
                .map(Self::One)
                .map_err(de::Error::custom),
        }
    }
}

/// The root of a status report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct StatusDocument {
    /// Unfiled entries, grouped by the path the report was run against.
    #[serde(default)]
    pub target: Option<OneOrMany<Target>>,
    /// Named changelists and their entries.
    #[serde(default)]
    pub changelist: Option<OneOrMany<Changelist>>,
}

impl StatusDocument {
    /// Decode a normalized tree.
    pub fn from_node(node: Node) -> StatusResult<Self> {
        decode_element(node).map_err(|e| StatusError::Shape(e.to_string()))
    }

    pub fn targets(&self) -> &[Target] {
        self.target
            .as_ref()
            .map(OneOrMany::as_slice)
            .unwrap_or_default()
    }

    pub fn changelists(&self) -> &[Changelist] {
        self.changelist
            .as_ref()
            .map(OneOrMany::as_slice)
            .unwrap_or_default()
    }

    /// Every entry in the report: target entries first, then changelist
    /// entries, each in document order.
    pub fn entries(&self) -> impl Iterator<Item = &StatusEntry> + '_ {
        let unfiled = self
            .targets()
            .iter()
            .filter_map(|target| target.entry.as_ref())
            .flat_map(|entries| entries.iter());
        let filed = self
            .changelists()
            .iter()
            .filter_map(|changelist| changelist.entry.as_ref())
            .flat_map(|entries| entries.iter());
        unfiled.chain(filed)
    }
}

/// Entries reported for one target path, outside any changelist.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub entry: Option<OneOrMany<StatusEntry>>,
}

/// A named grouping of entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Changelist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub entry: Option<OneOrMany<StatusEntry>>,
}

/// One file as reported by the version-control tool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    #[serde(default)]
    pub path: String,
    #[serde(default, deserialize_with = "element")]
    pub wc_status: WcStatus,
}

/// Working-copy state of an entry. Flags are kept as the strings the
/// report carries ("true"/"false").
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WcStatus {
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(default)]
    pub props: String,
    #[serde(default)]
    pub moved_to: Option<String>,
    #[serde(default)]
    pub moved_from: Option<String>,
    #[serde(default)]
    pub wc_locked: Option<String>,
    #[serde(default)]
    pub switched: Option<String>,
    #[serde(default, deserialize_with = "optional_element")]
    pub commit: Option<CommitInfo>,
}

impl WcStatus {
    /// Destination of a move, when this entry is its source.
    pub fn moved_to(&self) -> Option<&str> {
        non_empty(self.moved_to.as_deref())
    }

    /// Source of a move, when this entry is its destination.
    pub fn moved_from(&self) -> Option<&str> {
        non_empty(self.moved_from.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn decode_element<T>(node: Value) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    match node {
        Value::String(_) | Value::Null => Ok(T::default()),
        other => serde_json::from_value(other),
    }
}

fn element<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let node = Value::deserialize(deserializer)?;
    decode_element(node).map_err(de::Error::custom)
}

/// An optional block that is absent when the element is empty.
fn optional_element<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::String(_) | Value::Null => Ok(None),
        other => serde_json::from_value(other).map(Some).map_err(de::Error::custom),
    }
}

/// Text content of a leaf element, also when it carries attributes.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Object(fields) => Ok(fields
            .get(TEXT_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()),
        other => Err(de::Error::custom(format!("expected text, found {other}"))),
    }
}
