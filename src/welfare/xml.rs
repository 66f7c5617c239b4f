//! XML documents as generic JSON trees.
//!
//! The upstream API answers in XML whose element cardinality varies between
//! responses. Documents are turned into `serde_json::Value` trees with these rules:
//!
//! - an element's attributes become `@_name` keys
//! - a child tag seen more than once becomes an array, otherwise a single value
//! - an element with only text becomes a string; with attributes and text,
//!   the text sits under `#text`
//! - an empty element becomes `""`
//! - text with an entity XML does not define is kept as written
//!
//! Callers must not assume array-ness from a sample payload; see
//! [`crate::welfare::normalize::normalize_array`].

use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};
use serde_json::{Map, Value};

use super::error::{WelfareError, WelfareResult};

const ATTRIBUTE_PREFIX: &str = "@_";
const TEXT_KEY: &str = "#text";

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(name: String, start: &BytesStart<'_>) -> WelfareResult<Self> {
        Ok(Self {
            name,
            children: attributes(start)?,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let Frame {
            name,
            mut children,
            text,
        } = self;
        if children.is_empty() {
            return (name, Value::String(text));
        }
        if !text.is_empty() {
            children.insert(TEXT_KEY.to_string(), Value::String(text));
        }
        (name, Value::Object(children))
    }
}

/// Parse an XML document into a JSON object keyed by its root element name.
pub fn parse(xml: &str) -> WelfareResult<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document = Map::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(start) => {
                let name = element_name(&start);
                stack.push(Frame::open(name, &start)?);
            }
            Event::Empty(start) => {
                let name = element_name(&start);
                let children = attributes(&start)?;
                let value = if children.is_empty() {
                    Value::String(String::new())
                } else {
                    Value::Object(children)
                };
                insert_child(parent_map(&mut stack, &mut document), name, value);
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&unescape_lenient(&text));
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                let Some(frame) = stack.pop() else {
                    return Err(WelfareError::Xml {
                        message: "unexpected closing tag".to_string(),
                    });
                };
                let (name, value) = frame.close();
                insert_child(parent_map(&mut stack, &mut document), name, value);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(frame) = stack.last() {
        return Err(WelfareError::Xml {
            message: format!("unclosed element <{}>", frame.name),
        });
    }

    Ok(Value::Object(document))
}

/// Unescape text, keeping it verbatim when it holds an entity XML does not
/// define (e.g. `&nbsp;`).
fn unescape_lenient(text: &BytesText<'_>) -> String {
    match text.unescape() {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    }
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn attributes(start: &BytesStart<'_>) -> WelfareResult<Map<String, Value>> {
    let mut map = Map::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref());
        let value = match attribute.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attribute.value).into_owned(),
        };
        map.insert(format!("{ATTRIBUTE_PREFIX}{key}"), Value::String(value));
    }
    Ok(map)
}

fn parent_map<'a>(
    stack: &'a mut [Frame],
    document: &'a mut Map<String, Value>,
) -> &'a mut Map<String, Value> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => document,
    }
}

/// Insert `value` under `key`, promoting to an array when the tag repeats.
fn insert_child(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

fn xml_error(err: impl std::fmt::Display) -> WelfareError {
    WelfareError::Xml {
        message: err.to_string(),
    }
}
