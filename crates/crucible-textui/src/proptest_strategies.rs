//! Proptest strategies for element tree property tests
//!
//! Provides reusable generators for styles, column weights and request trees
//! that are valid by construction.

use crate::builder::{header, label, node, row, table, NodeRequest};
use crate::layout::Border;
use crate::span::Line;
use crate::style::{Color, Style};
use proptest::prelude::*;

/// Render width: zero (edge case), narrow (1-20), normal (21-120)
pub fn arb_width() -> impl Strategy<Value = usize> {
    prop_oneof![
        1 => Just(0usize),
        2 => 1usize..=20,
        7 => 21usize..=120,
    ]
}

/// ASCII words with single spaces.
pub fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9]{0,12}", 0..6).prop_map(|words| words.join(" "))
}

pub fn arb_color() -> impl Strategy<Value = Color> {
    prop_oneof![
        4 => prop::sample::select(Color::NAMED.to_vec()),
        1 => any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Color::Rgb(r, g, b)),
    ]
}

/// Style with every field independently set or unset.
pub fn arb_style() -> impl Strategy<Value = Style> {
    (
        prop::option::of(arb_color()),
        prop::option::of(arb_color()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(fg, bg, bold, underline, blink)| Style {
            fg,
            bg,
            bold,
            underline,
            blink,
        })
}

pub fn arb_border() -> impl Strategy<Value = Option<Border>> {
    prop_oneof![
        2 => Just(None),
        1 => prop::sample::select(Border::ALL.to_vec()).prop_map(Some),
    ]
}

/// Positive column weights, 1-8 columns.
pub fn arb_weights() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..10, 1..8)
}

/// Table request with an optional header row and 0-4 body rows.
pub fn arb_table() -> impl Strategy<Value = NodeRequest> {
    (
        prop::collection::vec(arb_text(), 1..5),
        prop::collection::vec(prop::collection::vec(arb_text(), 1..5), 0..4),
        any::<bool>(),
        arb_border(),
    )
        .prop_map(|(head, body, with_header, border)| {
            let mut request = table();
            if let Some(border) = border {
                request = request.attr("border", border);
            }
            if with_header {
                request = request.child(header().children(head.into_iter().map(label)));
            }
            for cells in body {
                request = request.child(row().children(cells.into_iter().map(label)));
            }
            request
        })
}

/// Request tree mixing labels, nested trees and tables.
pub fn arb_request() -> impl Strategy<Value = NodeRequest> {
    let leaf = prop_oneof![
        3 => arb_text().prop_map(label),
        1 => arb_table(),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        (arb_text(), prop::collection::vec(inner, 0..4))
            .prop_map(|(root, children)| node(root).children(children))
    })
}

/// Helper: Assert all rendered lines fit within width
pub fn assert_lines_fit_width(lines: &[Line], width: usize) -> Result<(), TestCaseError> {
    for (i, line) in lines.iter().enumerate() {
        prop_assert!(
            line.width() <= width,
            "Line {} exceeds width {}: got {} (content: {:?})",
            i,
            width,
            line.width(),
            line.to_plain()
        );
    }
    Ok(())
}

/// Helper: Assert all rendered lines have exactly the expected width
pub fn assert_lines_exact_width(lines: &[Line], width: usize) -> Result<(), TestCaseError> {
    for (i, line) in lines.iter().enumerate() {
        prop_assert!(
            line.width() == width,
            "Line {} should be exactly {} wide, got {} (content: {:?})",
            i,
            width,
            line.width(),
            line.to_plain()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::UiBuilder;
    use proptest::strategy::ValueTree;
    use proptest::test_runner::TestRunner;

    #[test]
    fn arb_width_produces_valid_values() {
        let mut runner = TestRunner::default();
        for _ in 0..100 {
            let w = arb_width().new_tree(&mut runner).unwrap().current();
            assert!(w <= 120);
        }
    }

    #[test]
    fn arb_request_always_builds() {
        let mut runner = TestRunner::default();
        for _ in 0..20 {
            let request = arb_request().new_tree(&mut runner).unwrap().current();
            let mut builder = UiBuilder::new();
            assert!(builder.build(request).is_ok());
        }
    }

    #[test]
    fn arb_weights_are_positive() {
        let mut runner = TestRunner::default();
        for _ in 0..50 {
            let weights = arb_weights().new_tree(&mut runner).unwrap().current();
            assert!(!weights.is_empty());
            assert!(weights.iter().all(|&w| w > 0));
        }
    }
}
