//! Element tree assembly
//!
//! Construction requests arrive as `(name, attributes, arguments)` triples
//! with nested children. [`UiBuilder`] keeps the elements still open on an
//! explicit stack: `open` creates and styles an element, `close` hands it to
//! the element below it, or to the root list when nothing is below.
//! [`UiBuilder::build`] drives both for a whole [`NodeRequest`] tree.

use tracing::{debug, trace, warn};

use crate::config::UiConfig;
use crate::element::{Element, Tag};
use crate::error::{BuildError, BuildResult};
use crate::layout::{Border, ColumnLayout};
use crate::style::{Color, Style};
use crate::value::{AttrValue, Attributes, Deferred, Value};

/// One node to build, with its children.
#[derive(Debug, Clone)]
pub struct NodeRequest {
    pub name: String,
    pub attributes: Attributes,
    pub args: Vec<Value>,
    pub children: Vec<NodeRequest>,
}

impl NodeRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            args: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: NodeRequest) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeRequest>) -> Self {
        self.children.extend(children);
        self
    }
}

pub fn label(value: impl Into<Value>) -> NodeRequest {
    NodeRequest::new("label").arg(value)
}

pub fn node(value: impl Into<Value>) -> NodeRequest {
    NodeRequest::new("node").arg(value)
}

pub fn table() -> NodeRequest {
    NodeRequest::new("table")
}

pub fn row() -> NodeRequest {
    NodeRequest::new("row")
}

pub fn header() -> NodeRequest {
    NodeRequest::new("header")
}

pub fn eval<F, C>(f: F) -> NodeRequest
where
    F: Fn() -> anyhow::Result<C> + 'static,
    C: Into<crate::value::Content>,
{
    NodeRequest::new("eval").arg(Deferred::new(move || f().map(Into::into)))
}

/// Collects completed root elements in completion order.
#[derive(Debug, Default)]
pub struct UiBuilder {
    config: UiConfig,
    open: Vec<Element>,
    elements: Vec<Element>,
}

impl UiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// True when no element is waiting for its `close`.
    pub fn is_idle(&self) -> bool {
        self.open.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Build a request tree and everything under it.
    ///
    /// On error every element opened by this call is discarded; roots
    /// completed earlier stay in place.
    pub fn build(&mut self, request: NodeRequest) -> BuildResult<()> {
        let depth = self.open.len();
        let result = self.build_nested(request);
        if result.is_err() {
            self.open.truncate(depth);
        }
        result
    }

    fn build_nested(&mut self, request: NodeRequest) -> BuildResult<()> {
        let NodeRequest {
            name,
            attributes,
            args,
            children,
        } = request;

        self.open(&name, &attributes, args)?;
        for child in children {
            self.build_nested(child)?;
        }
        self.close()
    }

    pub fn open(&mut self, name: &str, attributes: &Attributes, args: Vec<Value>) -> BuildResult<()> {
        let element = self.complete_node(name, attributes, args)?;
        self.open.push(element);
        Ok(())
    }

    /// Finish the innermost open element.
    pub fn close(&mut self) -> BuildResult<()> {
        let element = self.open.pop().ok_or(BuildError::NoOpenElement)?;
        match self.open.last_mut() {
            Some(parent) => {
                trace!(parent = %parent.kind(), child = %element.kind(), "attaching child");
                parent.attach_child(element)
            }
            None => {
                debug!(
                    kind = %element.kind(),
                    index = self.elements.len(),
                    "root element completed"
                );
                self.elements.push(element);
                Ok(())
            }
        }
    }

    /// Create the element for a request and resolve its attributes.
    pub fn complete_node(
        &self,
        name: &str,
        attributes: &Attributes,
        args: Vec<Value>,
    ) -> BuildResult<Element> {
        let tag = Tag::parse(name, args.first())?;

        let mut element = Element::create(tag, args.first());
        if tag == Tag::Header && self.config.header_bold {
            element.set_style(Style::new().bold());
        }
        if tag == Tag::Eval {
            self.attach_computation(&mut element, args)?;
        }

        let style = element.style().patch(resolve_style(attributes)?);
        element.set_style(style);

        if let Element::Table(table) = &mut element {
            if let Some(layout) = resolve_weights(attributes)? {
                table.layout = layout;
            }
            table.border = resolve_border(attributes, self.config.default_border)?;
            table.height = resolve_height(attributes)?;
        }

        Ok(element)
    }

    /// Build a request tree bottom-up into one element, leaving the open
    /// stack and the root list untouched.
    pub fn assemble(&self, request: NodeRequest) -> BuildResult<Element> {
        let NodeRequest {
            name,
            attributes,
            args,
            children,
        } = request;

        let mut element = self.complete_node(&name, &attributes, args)?;
        for child in children {
            let child = self.assemble(child)?;
            trace!(parent = %element.kind(), child = %child.kind(), "attaching child");
            element.attach_child(child)?;
        }
        Ok(element)
    }

    fn attach_computation(&self, element: &mut Element, mut args: Vec<Value>) -> BuildResult<()> {
        let Element::Eval(eval) = element else {
            return Ok(());
        };

        if let [Value::Deferred(_)] = args.as_slice() {
            if let Some(Value::Deferred(computation)) = args.pop() {
                eval.computation = Some(computation);
            }
            return Ok(());
        }

        let found = describe_eval_args(&args);
        if self.config.strict_eval {
            return Err(BuildError::InvalidEvalArgument { found });
        }
        warn!(%found, "eval without a single deferred computation, building an empty eval");
        Ok(())
    }
}

/// Build a single detached element, for example inside a deferred
/// computation that returns a sub-tree.
pub fn build_element(request: NodeRequest) -> BuildResult<Element> {
    UiBuilder::new().assemble(request)
}

fn describe_eval_args(args: &[Value]) -> String {
    match args {
        [] => "no arguments".to_string(),
        [single] => format!("the value '{single}'"),
        many => format!("{} arguments", many.len()),
    }
}

fn invalid(key: &str, expected: &'static str, found: &AttrValue) -> BuildError {
    BuildError::InvalidAttribute {
        key: key.to_string(),
        expected,
        found: match found {
            AttrValue::Text(s) => format!("'{s}'"),
            other => other.type_name().to_string(),
        },
    }
}

fn color_attr(attributes: &Attributes, key: &str) -> BuildResult<Option<Color>> {
    match attributes.get(key) {
        None => Ok(None),
        Some(AttrValue::Color(color)) => Ok(Some(*color)),
        Some(value @ AttrValue::Text(name)) => name
            .parse()
            .map(Some)
            .map_err(|_| invalid(key, "a color", value)),
        Some(other) => Err(invalid(key, "a color", other)),
    }
}

fn bool_attr(attributes: &Attributes, key: &str) -> BuildResult<Option<bool>> {
    match attributes.get(key) {
        None => Ok(None),
        Some(AttrValue::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(invalid(key, "a boolean", other)),
    }
}

/// Style carried by the attribute map. Later aliases win: `foreground`
/// over `fg`, `background` over `bg`.
fn resolve_style(attributes: &Attributes) -> BuildResult<Style> {
    let mut style = Style::new();
    for key in ["fg", "foreground"] {
        if let Some(color) = color_attr(attributes, key)? {
            style.fg = Some(color);
        }
    }
    for key in ["bg", "background"] {
        if let Some(color) = color_attr(attributes, key)? {
            style.bg = Some(color);
        }
    }
    style.bold = bool_attr(attributes, "bold")?;
    style.underline = bool_attr(attributes, "underline")?;
    style.blink = bool_attr(attributes, "blink")?;
    Ok(style)
}

fn resolve_weights(attributes: &Attributes) -> BuildResult<Option<ColumnLayout>> {
    const EXPECTED: &str = "a non-empty list of positive integers";

    let value = match attributes.get("weights") {
        None => return Ok(None),
        Some(value) => value,
    };
    let AttrValue::List(list) = value else {
        return Err(invalid("weights", EXPECTED, value));
    };
    if list.is_empty() {
        return Err(invalid("weights", EXPECTED, value));
    }

    let weights = list
        .iter()
        .map(|&w| u32::try_from(w).ok().filter(|&w| w > 0))
        .collect::<Option<Vec<u32>>>()
        .ok_or_else(|| invalid("weights", EXPECTED, value))?;
    Ok(Some(ColumnLayout::Weighted(weights)))
}

fn resolve_border(attributes: &Attributes, default: Border) -> BuildResult<Option<Border>> {
    match attributes.get("border") {
        None | Some(AttrValue::Bool(false)) => Ok(None),
        Some(AttrValue::Bool(true)) => Ok(Some(default)),
        Some(AttrValue::Border(border)) => Ok(Some(*border)),
        Some(value @ AttrValue::Text(name)) => name
            .parse()
            .map(Some)
            .map_err(|_| invalid("border", "a boolean or border name", value)),
        Some(other) => Err(invalid("border", "a boolean or border name", other)),
    }
}

fn resolve_height(attributes: &Attributes) -> BuildResult<Option<usize>> {
    match attributes.get("height") {
        None => Ok(None),
        Some(value @ AttrValue::Int(h)) => usize::try_from(*h)
            .map(Some)
            .map_err(|_| invalid("height", "a non-negative integer", value)),
        Some(other) => Err(invalid("height", "a non-negative integer", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;
    use std::cell::Cell;
    use std::rc::Rc;

    fn kinds(builder: &UiBuilder) -> Vec<ElementKind> {
        builder.elements().iter().map(Element::kind).collect()
    }

    #[test]
    fn roots_keep_completion_order() {
        let mut builder = UiBuilder::new();
        builder.build(label("a")).unwrap();
        builder.build(table().arg("b")).unwrap();

        assert_eq!(kinds(&builder), vec![ElementKind::Label, ElementKind::Table]);
        assert!(builder.is_idle());
    }

    #[test]
    fn nested_elements_are_not_roots() {
        let mut builder = UiBuilder::new();
        builder
            .build(node("root").child(node("child1")).child(node("child2")))
            .unwrap();

        assert_eq!(builder.elements().len(), 1);
        assert_eq!(builder.elements()[0].child_count(), 2);
    }

    #[test]
    fn open_close_threads_parent_explicitly() {
        let mut builder = UiBuilder::new();
        let none = Attributes::new();
        builder.open("table", &none, vec![]).unwrap();
        builder.open("row", &none, vec![]).unwrap();
        builder.open("label", &none, vec!["cell".into()]).unwrap();
        assert_eq!(builder.depth(), 3);
        builder.close().unwrap();
        builder.close().unwrap();
        assert!(builder.elements().is_empty());
        builder.close().unwrap();

        assert_eq!(kinds(&builder), vec![ElementKind::Table]);
        assert_eq!(builder.close(), Err(BuildError::NoOpenElement));
    }

    #[test]
    fn unknown_tag_fails_without_touching_siblings() {
        let mut builder = UiBuilder::new();
        builder.build(label("kept")).unwrap();

        let err = builder
            .build(node("outer").child(NodeRequest::new("panel").arg("x")))
            .unwrap_err();

        assert!(matches!(err, BuildError::UnsupportedElementKind { ref tag, .. } if tag == "panel"));
        assert_eq!(kinds(&builder), vec![ElementKind::Label]);
        assert!(builder.is_idle());
    }

    #[test]
    fn tree_inside_row_is_rejected() {
        let mut builder = UiBuilder::new();
        let err = builder
            .build(table().child(row().child(node("nested"))))
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidChildKind {
                parent: ElementKind::Row,
                child: ElementKind::Tree,
            }
        );
        assert!(builder.elements().is_empty());
    }

    #[test]
    fn label_inside_table_is_rejected() {
        let mut builder = UiBuilder::new();
        let err = builder.build(table().child(label("loose"))).unwrap_err();
        assert!(matches!(err, BuildError::InvalidChildKind { parent: ElementKind::Table, .. }));
    }

    #[test]
    fn children_under_label_are_rejected() {
        let mut builder = UiBuilder::new();
        let err = builder.build(label("a").child(label("b"))).unwrap_err();
        assert_eq!(
            err,
            BuildError::LeafCannotHaveChildren {
                parent: ElementKind::Label
            }
        );
    }

    #[test]
    fn style_attributes_resolve_with_later_alias_winning() {
        let builder = UiBuilder::new();
        let attributes = label("x")
            .attr("fg", Color::Red)
            .attr("foreground", "green")
            .attr("bg", "blue")
            .attr("background", "yellow")
            .attr("bold", true)
            .attr("underline", false)
            .attr("blink", true)
            .attributes;

        let element = builder.complete_node("label", &attributes, vec![]).unwrap();
        let style = element.style();
        assert_eq!(style.fg, Some(Color::Green));
        assert_eq!(style.bg, Some(Color::Yellow));
        assert_eq!(style.bold, Some(true));
        assert_eq!(style.underline, Some(false));
        assert_eq!(style.blink, Some(true));
    }

    #[test]
    fn short_color_keys_apply_alone() {
        let builder = UiBuilder::new();
        let attributes = label("x").attr("bg", "blue").attributes;
        let element = builder.complete_node("label", &attributes, vec![]).unwrap();
        assert_eq!(element.style().bg, Some(Color::Blue));
        assert_eq!(element.style().blink, None);
    }

    #[test]
    fn bad_color_is_an_attribute_error() {
        let builder = UiBuilder::new();
        let attributes = label("x").attr("fg", "chartreuse").attributes;
        let err = builder.complete_node("label", &attributes, vec![]).unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidAttribute {
                key: "fg".to_string(),
                expected: "a color",
                found: "'chartreuse'".to_string(),
            }
        );
    }

    #[test]
    fn header_starts_bold_and_attributes_can_override() {
        let builder = UiBuilder::new();
        let header = builder
            .complete_node("header", &Attributes::new(), vec![])
            .unwrap();
        assert_eq!(header.style().bold, Some(true));

        let attributes = header_attrs_not_bold();
        let plain = builder.complete_node("header", &attributes, vec![]).unwrap();
        assert_eq!(plain.style().bold, Some(false));

        let relaxed = UiBuilder::with_config(UiConfig {
            header_bold: false,
            ..UiConfig::default()
        });
        let header = relaxed
            .complete_node("header", &Attributes::new(), vec![])
            .unwrap();
        assert_eq!(header.style().bold, None);
    }

    fn header_attrs_not_bold() -> Attributes {
        header().attr("bold", false).attributes
    }

    #[test]
    fn table_attributes_resolve_layout_border_and_height() {
        let builder = UiBuilder::new();
        let attributes = table()
            .attr("weights", [1i64, 2, 1])
            .attr("border", true)
            .attr("height", 12i64)
            .attributes;

        let Element::Table(table) = builder.complete_node("table", &attributes, vec![]).unwrap()
        else {
            panic!("expected table");
        };
        assert_eq!(table.layout, ColumnLayout::Weighted(vec![1, 2, 1]));
        assert_eq!(table.border, Some(Border::Dashed));
        assert_eq!(table.height, Some(12));
    }

    #[test]
    fn border_selection() {
        let builder = UiBuilder::with_config(UiConfig {
            default_border: Border::Single,
            ..UiConfig::default()
        });
        let border_of = |value: AttrValue| {
            let attributes = table().attr("border", value).attributes;
            match builder.complete_node("table", &attributes, vec![]).unwrap() {
                Element::Table(table) => table.border,
                _ => unreachable!(),
            }
        };

        assert_eq!(border_of(AttrValue::Bool(true)), Some(Border::Single));
        assert_eq!(border_of(AttrValue::Bool(false)), None);
        assert_eq!(border_of(AttrValue::Border(Border::Star)), Some(Border::Star));
        assert_eq!(border_of("double".into()), Some(Border::Double));

        let Element::Table(bare) = builder
            .complete_node("table", &Attributes::new(), vec![])
            .unwrap()
        else {
            panic!("expected table");
        };
        assert_eq!(bare.border, None);
        assert_eq!(bare.layout, ColumnLayout::Equal);
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let builder = UiBuilder::new();
        for weights in [vec![], vec![1i64, 0], vec![-1, 2]] {
            let attributes = table().attr("weights", weights).attributes;
            let err = builder.complete_node("table", &attributes, vec![]).unwrap_err();
            assert!(matches!(err, BuildError::InvalidAttribute { ref key, .. } if key == "weights"));
        }
    }

    #[test]
    fn table_attributes_ignored_on_other_elements() {
        let builder = UiBuilder::new();
        let attributes = label("x").attr("weights", "nonsense").attributes;
        assert!(builder.complete_node("label", &attributes, vec![]).is_ok());
    }

    #[test]
    fn eval_keeps_single_deferred_argument() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut builder = UiBuilder::new();
        builder
            .build(eval(move || {
                counter.set(counter.get() + 1);
                Ok("computed")
            }))
            .unwrap();

        let Element::Eval(element) = &builder.elements()[0] else {
            panic!("expected eval");
        };
        assert!(element.computation.is_some());
        assert_eq!(calls.get(), 0, "computation must not run at build time");
    }

    #[test]
    fn malformed_eval_falls_back_to_empty_eval() {
        let mut builder = UiBuilder::new();
        builder.build(NodeRequest::new("eval")).unwrap();
        builder.build(NodeRequest::new("eval").arg("text")).unwrap();

        for element in builder.elements() {
            let Element::Eval(eval) = element else {
                panic!("expected eval");
            };
            assert!(eval.computation.is_none());
        }
    }

    #[test]
    fn strict_eval_rejects_malformed_eval() {
        let mut builder = UiBuilder::with_config(UiConfig::strict());
        let err = builder
            .build(NodeRequest::new("eval").arg("a").arg("b"))
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidEvalArgument {
                found: "2 arguments".to_string()
            }
        );
        assert!(builder.elements().is_empty());
    }

    #[test]
    fn build_element_returns_detached_root() {
        let element = build_element(node("sub").child(label("leaf"))).unwrap();
        assert_eq!(element.kind(), ElementKind::Tree);
        assert_eq!(element.child_count(), 1);
    }

    #[test]
    fn build_element_reports_the_failing_child() {
        let err = build_element(table().child(row().child(node("nested")))).unwrap_err();
        assert_eq!(
            err,
            BuildError::InvalidChildKind {
                parent: ElementKind::Row,
                child: ElementKind::Tree,
            }
        );

        let err = build_element(node("sub").child(NodeRequest::new("panel"))).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedElementKind { ref tag, .. } if tag == "panel"));
    }

    #[test]
    fn assemble_leaves_builder_state_alone() {
        let mut builder = UiBuilder::new();
        builder.build(label("root")).unwrap();

        let element = builder
            .assemble(table().child(row().child(label("a")).child(label("b"))))
            .unwrap();

        assert_eq!(element.child_count(), 1);
        assert_eq!(kinds(&builder), vec![ElementKind::Label]);
        assert!(builder.is_idle());
    }
}
