use std::slice::Iter;

use textwrap::{wrap, Options, WordSplitter};
use tracing::debug;

use crate::builder::UiBuilder;
use crate::element::{Element, EvalElement, RowElement, TableElement, TreeElement};
use crate::error::RenderError;
use crate::layout::{Border, BorderGlyphs, ColumnLayout};
use crate::span::{Line, Span};
use crate::style::Style;
use crate::value::Content;

const BRANCH: &str = "+-";
const CONTINUE: &str = "| ";
const BLANK: &str = "  ";

/// Renders one completed root element.
///
/// A renderer only borrows the tree, so it can be invoked any number of
/// times. Each call re-walks the tree and re-runs every deferred computation
/// it reaches exactly once.
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    element: &'a Element,
}

impl<'a> Renderer<'a> {
    pub fn new(element: &'a Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn render(&self, width: usize) -> Result<Vec<Line>, RenderError> {
        let mut lines = Vec::new();
        render_element(self.element, Style::default(), width, &mut lines)?;
        Ok(lines)
    }

    pub fn render_to_string(&self, width: usize) -> Result<String, RenderError> {
        Ok(join_plain(&self.render(width)?))
    }
}

/// Lazy sequence of renderers over a builder's completed roots.
#[derive(Debug, Clone)]
pub struct Producers<'a> {
    elements: Iter<'a, Element>,
}

impl<'a> Iterator for Producers<'a> {
    type Item = Renderer<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.elements.next().map(Renderer::new)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl ExactSizeIterator for Producers<'_> {}

impl UiBuilder {
    /// One renderer per completed root, in completion order.
    pub fn producers(&self) -> Producers<'_> {
        Producers {
            elements: self.elements().iter(),
        }
    }

    /// Render every root and join the plain text with newlines.
    pub fn render_to_string(&self, width: usize) -> Result<String, RenderError> {
        let mut lines = Vec::new();
        for renderer in self.producers() {
            lines.extend(renderer.render(width)?);
        }
        Ok(join_plain(&lines))
    }
}

impl<'a> IntoIterator for &'a UiBuilder {
    type Item = Renderer<'a>;
    type IntoIter = Producers<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.producers()
    }
}

fn join_plain(lines: &[Line]) -> String {
    lines
        .iter()
        .map(Line::to_plain)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_element(
    element: &Element,
    inherited: Style,
    width: usize,
    out: &mut Vec<Line>,
) -> Result<(), RenderError> {
    match element {
        Element::Label(label) => {
            render_text(&label.text, inherited.patch(label.style), width, out);
            Ok(())
        }
        Element::Tree(tree) => render_tree(tree, inherited, width, out),
        Element::Table(table) => render_table(table, inherited, width, out),
        Element::Row(row) => render_rows(&[row], &ColumnLayout::Equal, None, inherited, width, out),
        Element::Eval(eval) => render_eval(eval, inherited, width, out),
    }
}

fn render_text(text: &str, style: Style, width: usize, out: &mut Vec<Line>) {
    if width == 0 {
        out.extend(text.split('\n').map(|_| Line::styled("", style)));
        return;
    }

    let options = Options::new(width).word_splitter(WordSplitter::NoHyphenation);
    for line in wrap(text, options) {
        out.push(Line::styled(line.into_owned(), style).truncate_to_width(width));
    }
}

fn render_tree(
    tree: &TreeElement,
    inherited: Style,
    width: usize,
    out: &mut Vec<Line>,
) -> Result<(), RenderError> {
    let style = inherited.patch(tree.style);
    if let Some(root) = &tree.root {
        render_text(&root.text, style.patch(root.style), width, out);
    }

    let child_width = width.saturating_sub(BRANCH.len());
    let last = tree.children.len().saturating_sub(1);
    for (index, child) in tree.children.iter().enumerate() {
        let mut lines = Vec::new();
        render_element(child, style, child_width, &mut lines)?;

        for (line_index, mut line) in lines.into_iter().enumerate() {
            let prefix = match (line_index, index == last) {
                (0, _) => BRANCH,
                (_, false) => CONTINUE,
                (_, true) => BLANK,
            };
            line.prepend(Span::new(prefix, style));
            out.push(line.truncate_to_width(width));
        }
    }
    Ok(())
}

fn render_table(
    table: &TableElement,
    inherited: Style,
    width: usize,
    out: &mut Vec<Line>,
) -> Result<(), RenderError> {
    let rows: Vec<&RowElement> = table.rows.iter().collect();
    let style = inherited.patch(table.style);
    render_rows(&rows, &table.layout, table.border, style, width, out)
}

fn render_rows(
    rows: &[&RowElement],
    layout: &ColumnLayout,
    border: Option<Border>,
    style: Style,
    width: usize,
    out: &mut Vec<Line>,
) -> Result<(), RenderError> {
    let columns = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    if columns == 0 {
        return Ok(());
    }

    let overhead = if border.is_some() { columns + 1 } else { 0 };
    let widths = layout.widths(columns, width.saturating_sub(overhead));
    debug!(columns, ?widths, ?border, "table layout");

    let glyphs = border.map(Border::glyphs);
    let mut lines = Vec::new();

    if let Some(g) = glyphs {
        lines.push(rule(g, &widths, style, g.top_left, g.top_tee, g.top_right));
    }

    for (index, row) in rows.iter().enumerate() {
        render_row(row, &widths, glyphs, style, &mut lines)?;

        let next_is_body = rows.get(index + 1).is_some_and(|next| !next.header);
        if let Some(g) = glyphs.filter(|_| row.header && next_is_body) {
            lines.push(rule(g, &widths, style, g.left_tee, g.cross, g.right_tee));
        }
    }

    if let Some(g) = glyphs {
        lines.push(rule(g, &widths, style, g.bottom_left, g.bottom_tee, g.bottom_right));
    }

    out.extend(lines.into_iter().map(|line| line.truncate_to_width(width)));
    Ok(())
}

fn render_row(
    row: &RowElement,
    widths: &[usize],
    glyphs: Option<&BorderGlyphs>,
    table_style: Style,
    out: &mut Vec<Line>,
) -> Result<(), RenderError> {
    let style = table_style.patch(row.style);

    let mut cells: Vec<Vec<Line>> = Vec::with_capacity(widths.len());
    for (column, &column_width) in widths.iter().enumerate() {
        let mut lines = Vec::new();
        if let Some(cell) = row.cells.get(column) {
            render_element(cell, style, column_width, &mut lines)?;
        }
        cells.push(lines);
    }

    let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
    for line_index in 0..height {
        let mut line = Line::empty();
        if let Some(g) = glyphs {
            line.push(Span::new(g.vertical.to_string(), table_style));
        }
        for (column, lines) in cells.iter().enumerate() {
            let cell_line = lines.get(line_index).cloned().unwrap_or_default();
            line.extend(cell_line.fit_to_width(widths[column], style));
            if let Some(g) = glyphs {
                line.push(Span::new(g.vertical.to_string(), table_style));
            }
        }
        out.push(line);
    }
    Ok(())
}

fn rule(
    glyphs: &BorderGlyphs,
    widths: &[usize],
    style: Style,
    left: char,
    middle: char,
    right: char,
) -> Line {
    let mut text = String::new();
    text.push(left);
    for (i, &w) in widths.iter().enumerate() {
        if i > 0 {
            text.push(middle);
        }
        text.extend(std::iter::repeat(glyphs.horizontal).take(w));
    }
    text.push(right);
    Line::styled(text, style)
}

fn render_eval(
    eval: &EvalElement,
    inherited: Style,
    width: usize,
    out: &mut Vec<Line>,
) -> Result<(), RenderError> {
    let Some(computation) = &eval.computation else {
        return Ok(());
    };

    let style = inherited.patch(eval.style);
    match computation.call().map_err(RenderError::Eval)? {
        Content::Text(text) => {
            render_text(&text, style, width, out);
            Ok(())
        }
        Content::Element(element) => render_element(&element, style, width, out),
    }
}
