use std::fmt;
use std::str::FromStr;

use crate::error::{BuildError, BuildResult};
use crate::layout::{Border, ColumnLayout};
use crate::style::Style;
use crate::value::{Deferred, Value};

/// Tag names accepted by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Label,
    Node,
    Table,
    Row,
    Header,
    Eval,
}

impl Tag {
    pub const ALL: [Self; 6] = [
        Self::Label,
        Self::Node,
        Self::Table,
        Self::Row,
        Self::Header,
        Self::Eval,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tag::Label => "label",
            Tag::Node => "node",
            Tag::Table => "table",
            Tag::Row => "row",
            Tag::Header => "header",
            Tag::Eval => "eval",
        }
    }

    /// Resolve a tag name, reporting the offending value on failure.
    pub fn parse(name: &str, value: Option<&Value>) -> BuildResult<Tag> {
        name.parse().map_err(|_| BuildError::UnsupportedElementKind {
            tag: name.to_string(),
            value: value.map(Value::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown element tag '{0}'")]
pub struct ParseTagError(pub String);

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ParseTagError(s.to_string()))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Label,
    Tree,
    Table,
    Row,
    Header,
    Eval,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ElementKind::Label => "label",
            ElementKind::Tree => "tree",
            ElementKind::Table => "table",
            ElementKind::Row => "row",
            ElementKind::Header => "header",
            ElementKind::Eval => "eval",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelElement {
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Default)]
pub struct TreeElement {
    pub root: Option<LabelElement>,
    pub children: Vec<Element>,
    pub style: Style,
}

#[derive(Debug, Default)]
pub struct TableElement {
    pub rows: Vec<RowElement>,
    /// Line budget for consumers that clip or page the table.
    pub height: Option<usize>,
    pub layout: ColumnLayout,
    pub border: Option<Border>,
    pub style: Style,
}

impl TableElement {
    /// Number of columns: the widest row decides.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct RowElement {
    pub cells: Vec<Element>,
    pub header: bool,
    pub style: Style,
}

#[derive(Debug, Default)]
pub struct EvalElement {
    pub computation: Option<Deferred>,
    pub style: Style,
}

/// A node of the display tree.
#[derive(Debug)]
pub enum Element {
    Label(LabelElement),
    Tree(TreeElement),
    Table(TableElement),
    Row(RowElement),
    Eval(EvalElement),
}

impl Element {
    /// Construct the bare element for `tag`; style and table attributes are
    /// resolved by the builder afterwards.
    pub fn create(tag: Tag, value: Option<&Value>) -> Element {
        let text = value.and_then(Value::as_text);
        match tag {
            Tag::Label => Element::Label(LabelElement {
                text: text.unwrap_or_default(),
                style: Style::default(),
            }),
            Tag::Node => Element::Tree(TreeElement {
                root: text.map(|text| LabelElement {
                    text,
                    style: Style::default(),
                }),
                ..TreeElement::default()
            }),
            Tag::Table => Element::Table(TableElement::default()),
            Tag::Row => Element::Row(RowElement::default()),
            Tag::Header => Element::Row(RowElement {
                header: true,
                ..RowElement::default()
            }),
            Tag::Eval => Element::Eval(EvalElement::default()),
        }
    }

    pub fn label(text: impl Into<String>) -> Element {
        Element::Label(LabelElement {
            text: text.into(),
            style: Style::default(),
        })
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Label(_) => ElementKind::Label,
            Element::Tree(_) => ElementKind::Tree,
            Element::Table(_) => ElementKind::Table,
            Element::Row(row) if row.header => ElementKind::Header,
            Element::Row(_) => ElementKind::Row,
            Element::Eval(_) => ElementKind::Eval,
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Element::Label(e) => e.style,
            Element::Tree(e) => e.style,
            Element::Table(e) => e.style,
            Element::Row(e) => e.style,
            Element::Eval(e) => e.style,
        }
    }

    pub fn set_style(&mut self, style: Style) {
        match self {
            Element::Label(e) => e.style = style,
            Element::Tree(e) => e.style = style,
            Element::Table(e) => e.style = style,
            Element::Row(e) => e.style = style,
            Element::Eval(e) => e.style = style,
        }
    }

    pub fn child_count(&self) -> usize {
        match self {
            Element::Tree(e) => e.children.len(),
            Element::Table(e) => e.rows.len(),
            Element::Row(e) => e.cells.len(),
            Element::Label(_) | Element::Eval(_) => 0,
        }
    }

    /// Move `child` under this element.
    ///
    /// Tables only take rows, rows take anything but trees, trees take
    /// anything, and labels and evals take nothing. On error the child is
    /// dropped and `self` is unchanged.
    pub fn attach_child(&mut self, child: Element) -> BuildResult<()> {
        let parent = self.kind();
        match self {
            Element::Tree(tree) => {
                tree.children.push(child);
                Ok(())
            }
            Element::Table(table) => match child {
                Element::Row(row) => {
                    table.rows.push(row);
                    Ok(())
                }
                other => Err(BuildError::InvalidChildKind {
                    parent,
                    child: other.kind(),
                }),
            },
            Element::Row(row) => match child {
                Element::Tree(_) => Err(BuildError::InvalidChildKind {
                    parent,
                    child: ElementKind::Tree,
                }),
                other => {
                    row.cells.push(other);
                    Ok(())
                }
            },
            Element::Label(_) | Element::Eval(_) => {
                Err(BuildError::LeafCannotHaveChildren { parent })
            }
        }
    }
}
