//! Event-driven construction of the normalized [`Node`] tree.
//!
//! An element with no attributes and no children becomes its text (an empty
//! string when it has none). Anything else becomes an object whose fields are
//! its children, its attributes (merged or under [`ATTR_KEY`]) and its
//! non-blank text under [`TEXT_KEY`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{XmlError, XmlResult};
use crate::options::ParseOptions;

/// A normalized XML element: a string, an object, or an array of either.
pub type Node = Value;

/// Field holding an element's attributes when they are not merged.
pub const ATTR_KEY: &str = "$";

/// Field holding an element's text when it also has attributes or children.
pub const TEXT_KEY: &str = "_";

/// An element that has been opened but not yet closed.
struct Frame {
    raw_name: String,
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>, options: &ParseOptions, position: u64) -> XmlResult<Self> {
        let raw_name = utf8(start.name().as_ref())?.to_string();
        let mut fields = Map::new();
        let mut bucket = Map::new();

        for attr in start.attributes() {
            let attr = attr.map_err(|e| XmlError::Syntax {
                position,
                message: e.to_string(),
            })?;
            let key = options.name(utf8(attr.key.as_ref())?);
            let value = attr
                .unescape_value()
                .map_err(|e| XmlError::Encoding(e.to_string()))?;
            let value = Value::String(value.into_owned());
            if options.merge_attrs {
                insert_child(&mut fields, key, value, options.explicit_array);
            } else {
                bucket.insert(key, value);
            }
        }
        if !bucket.is_empty() {
            fields.insert(ATTR_KEY.to_string(), Value::Object(bucket));
        }

        Ok(Self {
            name: options.name(&raw_name),
            raw_name,
            fields,
            text: String::new(),
        })
    }

    fn finish(mut self, options: &ParseOptions) -> (String, Value) {
        let text = if self.text.trim().is_empty() {
            String::new()
        } else if options.trim {
            self.text.trim().to_string()
        } else {
            self.text
        };

        if self.fields.is_empty() {
            return (self.name, Value::String(text));
        }
        if !text.is_empty() {
            self.fields.insert(TEXT_KEY.to_string(), Value::String(text));
        }
        (self.name, Value::Object(self.fields))
    }
}

/// Parse XML text into a normalized tree.
///
/// The document must be well formed: exactly one root element, every element
/// closed by a matching end tag, no text outside the root. The XML
/// declaration, comments, processing instructions and DOCTYPE are skipped.
pub fn parse_str(text: &str, options: &ParseOptions) -> XmlResult<Node> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader.read_event().map_err(|e| XmlError::Syntax {
            position: reader.error_position() as u64,
            message: e.to_string(),
        })?;
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(start) => {
                ensure_single_root(&stack, &root, &start)?;
                stack.push(Frame::open(&start, options, position)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&stack, &root, &start)?;
                let frame = Frame::open(&start, options, position)?;
                close(frame, &mut stack, &mut root, options);
            }
            Event::End(end) => {
                let found = utf8(end.name().as_ref())?.to_string();
                let frame = stack.pop().ok_or_else(|| XmlError::Syntax {
                    position,
                    message: format!("unexpected end tag </{found}>"),
                })?;
                if frame.raw_name != found {
                    return Err(XmlError::MismatchedTag {
                        expected: frame.raw_name,
                        found,
                    });
                }
                close(frame, &mut stack, &mut root, options);
            }
            Event::Text(content) => {
                let content = content
                    .unescape()
                    .map_err(|e| XmlError::Encoding(e.to_string()))?;
                push_text(&mut stack, &content)?;
            }
            Event::CData(content) => {
                push_text(&mut stack, utf8(&content)?)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnexpectedEof(open.raw_name));
    }
    let (name, value) = root.ok_or(XmlError::NoRoot)?;
    debug!(root = %name, "normalized XML document");

    if options.explicit_root {
        let mut wrapper = Map::new();
        wrapper.insert(name, value);
        Ok(Value::Object(wrapper))
    } else {
        Ok(value)
    }
}

fn ensure_single_root(
    stack: &[Frame],
    root: &Option<(String, Value)>,
    start: &BytesStart<'_>,
) -> XmlResult<()> {
    if stack.is_empty() && root.is_some() {
        let name = utf8(start.name().as_ref())?.to_string();
        return Err(XmlError::MultipleRoots(name));
    }
    Ok(())
}

fn close(
    frame: Frame,
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
    options: &ParseOptions,
) {
    let (name, value) = frame.finish(options);
    match stack.last_mut() {
        Some(parent) => insert_child(&mut parent.fields, name, value, options.explicit_array),
        None => *root = Some((name, value)),
    }
}

fn push_text(stack: &mut [Frame], content: &str) -> XmlResult<()> {
    match stack.last_mut() {
        Some(frame) => frame.text.push_str(content),
        None if !content.trim().is_empty() => {
            return Err(XmlError::StrayText(content.trim().to_string()));
        }
        None => {}
    }
    Ok(())
}

/// Add `value` under `key`, turning a repeated key into an array.
fn insert_child(fields: &mut Map<String, Value>, key: String, value: Value, explicit_array: bool) {
    match fields.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            let value = if explicit_array {
                Value::Array(vec![value])
            } else {
                value
            };
            fields.insert(key, value);
        }
    }
}

fn utf8(bytes: &[u8]) -> XmlResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| XmlError::Encoding(e.to_string()))
}
