use crate::style::Style;
use crossterm::style::StyledContent;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.text.width()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn to_ansi(&self) -> String {
        if self.style.is_plain() {
            self.text.clone()
        } else {
            format!("{}", StyledContent::new(self.style.to_crossterm(), &self.text))
        }
    }
}

/// One output line: styled spans laid end to end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn single(span: Span) -> Self {
        Self { spans: vec![span] }
    }

    pub fn empty() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self::single(Span::new(text, style))
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(Span::is_empty)
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    pub fn prepend(&mut self, span: Span) {
        self.spans.insert(0, span);
    }

    pub fn extend(&mut self, other: Line) {
        self.spans.extend(other.spans);
    }

    pub fn to_plain(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn to_ansi(&self) -> String {
        self.spans.iter().map(Span::to_ansi).collect()
    }

    pub fn pad_to_width(&mut self, target_width: usize, pad_style: Style) {
        let current_width = self.width();
        if current_width >= target_width {
            return;
        }
        self.spans
            .push(Span::new(" ".repeat(target_width - current_width), pad_style));
    }

    pub fn truncate_to_width(self, max_width: usize) -> Line {
        if self.width() <= max_width {
            return self;
        }

        let mut result = Vec::new();
        let mut remaining = max_width;

        for span in self.spans {
            if remaining == 0 {
                break;
            }

            let span_width = span.width();
            if span_width <= remaining {
                remaining -= span_width;
                result.push(span);
            } else {
                let truncated = truncate_str_to_width(&span.text, remaining);
                if !truncated.is_empty() {
                    result.push(Span::new(truncated, span.style));
                }
                break;
            }
        }

        Line::new(result)
    }

    /// Truncate or pad so the line is exactly `width` columns.
    ///
    /// A wide glyph cut at the boundary leaves a one column gap, which the
    /// padding fills.
    pub fn fit_to_width(self, width: usize, pad_style: Style) -> Line {
        let mut line = self.truncate_to_width(width);
        line.pad_to_width(width, pad_style);
        line
    }
}

impl From<Span> for Line {
    fn from(span: Span) -> Self {
        Line::single(span)
    }
}

fn truncate_str_to_width(s: &str, max_width: usize) -> &str {
    if s.width() <= max_width {
        return s;
    }

    let mut width = 0;
    let mut end_idx = 0;

    for (idx, c) in s.char_indices() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width {
            break;
        }
        width += char_width;
        end_idx = idx + c.len_utf8();
    }

    &s[..end_idx]
}
