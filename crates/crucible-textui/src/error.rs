//! Error types for building and rendering element trees.

use thiserror::Error;

use crate::element::ElementKind;

/// Errors raised while assembling an element tree.
///
/// All of these point at a malformed construction sequence from the
/// front-end; none are retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The tag names no known element.
    #[error("Cannot build element with name '{tag}' and value {value:?}")]
    UnsupportedElementKind { tag: String, value: Option<String> },

    /// The parent accepts children, but not this kind.
    #[error("A {parent} element cannot contain a {child} element")]
    InvalidChildKind {
        parent: ElementKind,
        child: ElementKind,
    },

    /// Labels and evals take no children.
    #[error("A {parent} element cannot have children")]
    LeafCannotHaveChildren { parent: ElementKind },

    /// An attribute was given a value of the wrong shape.
    #[error("Attribute '{key}' expects {expected}, got {found}")]
    InvalidAttribute {
        key: String,
        expected: &'static str,
        found: String,
    },

    /// `eval` was not given exactly one deferred computation (strict mode).
    #[error("eval expects exactly one deferred computation, got {found}")]
    InvalidEvalArgument { found: String },

    /// `close` was called with nothing open.
    #[error("No open element to close")]
    NoOpenElement,
}

/// Errors raised while rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A deferred computation failed.
    #[error("Deferred computation failed: {0}")]
    Eval(#[source] anyhow::Error),
}

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type BuildResult<T> = Result<T, BuildError>;
