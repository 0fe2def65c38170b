//! Values carried by construction requests.
//!
//! The front-end resolves its own syntax into these before calling the
//! builder: a node's positional value, its attribute map, and the deferred
//! computations handed to `eval`.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::element::Element;
use crate::layout::Border;
use crate::style::Color;

/// Output of a deferred computation.
#[derive(Debug)]
pub enum Content {
    Text(String),
    Element(Element),
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Element> for Content {
    fn from(element: Element) -> Self {
        Content::Element(element)
    }
}

type DeferredFn = dyn Fn() -> anyhow::Result<Content>;

/// A zero-argument callback evaluated at render time.
#[derive(Clone)]
pub struct Deferred(Rc<DeferredFn>);

impl Deferred {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<Content> + 'static,
    {
        Self(Rc::new(f))
    }

    pub fn call(&self) -> anyhow::Result<Content> {
        (self.0)()
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(..)")
    }
}

/// Positional value of a node request.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Int(i64),
    Bool(bool),
    Deferred(Deferred),
}

impl Value {
    /// Scalar rendering of the value, `None` for deferred computations.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Int(i) => Some(i.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Deferred(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{i}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Deferred(_) => f.write_str("<deferred>"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Deferred> for Value {
    fn from(d: Deferred) -> Self {
        Value::Deferred(d)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    List(Vec<i64>),
    Text(String),
    Color(Color),
    Border(Border),
}

impl AttrValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::List(_) => "list",
            AttrValue::Text(_) => "text",
            AttrValue::Color(_) => "color",
            AttrValue::Border(_) => "border",
        }
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(list: Vec<i64>) -> Self {
        AttrValue::List(list)
    }
}

impl<const N: usize> From<[i64; N]> for AttrValue {
    fn from(list: [i64; N]) -> Self {
        AttrValue::List(list.to_vec())
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<Color> for AttrValue {
    fn from(c: Color) -> Self {
        AttrValue::Color(c)
    }
}

impl From<Border> for AttrValue {
    fn from(b: Border) -> Self {
        AttrValue::Border(b)
    }
}

/// Attribute map of a node request, keyed by attribute name.
pub type Attributes = BTreeMap<String, AttrValue>;
