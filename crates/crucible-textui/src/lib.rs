//! Declarative element trees for shell output
//!
//! Commands describe their output as a tree of typed elements (labels,
//! trees, tables, rows and deferred `eval` placeholders). The builder
//! validates the tree as it is assembled; renderers turn each completed root
//! into styled text lines for a width chosen at render time.
//!
//! # Architecture
//!
//! ```text
//! NodeRequest -> UiBuilder -> Element tree -> Renderer -> Vec<Line>
//!  (name, attrs,   open/close     (immutable)     |
//!   args, children)  stack                       v
//!                                        ColumnLayout + Border
//! ```
//!
//! # Example
//!
//! ```
//! use crucible_textui::{header, label, row, table, UiBuilder};
//!
//! let mut ui = UiBuilder::new();
//! ui.build(
//!     table()
//!         .attr("border", true)
//!         .child(header().child(label("NAME")).child(label("VALUE")))
//!         .child(row().child(label("foo")).child(label("bar"))),
//! )?;
//!
//! for renderer in &ui {
//!     for line in renderer.render(20)? {
//!         println!("{}", line.to_ansi());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod config;
mod element;
mod error;
mod layout;
mod render;
mod span;
mod style;
mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod proptest_strategies;

pub use builder::*;
pub use config::UiConfig;
pub use element::*;
pub use error::*;
pub use layout::*;
pub use render::{Producers, Renderer};
pub use span::{Line, Span};
pub use style::*;
pub use value::*;
