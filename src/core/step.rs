//! Step domain model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A transformation the server knows how to apply to a frame
///
/// Implementations only describe the work; execution happens remotely.
pub trait Transformer: fmt::Debug + Send + Sync {
    /// Serialize this transformer into the descriptor understood by the
    /// server's assembly endpoint, tagged with `step_name`
    fn to_rest(&self, step_name: &str) -> String;
}

/// A single named step in an assembly
#[derive(Debug)]
pub struct Step {
    /// Step name, unique by convention
    pub name: String,

    /// What the step does
    pub transformer: Box<dyn Transformer>,
}

impl Step {
    pub fn new(name: impl Into<String>, transformer: impl Transformer + 'static) -> Self {
        Self {
            name: name.into(),
            transformer: Box::new(transformer),
        }
    }

    /// Descriptor for this step
    pub fn to_rest(&self) -> String {
        self.transformer.to_rest(&self.name)
    }
}

impl<T: Transformer + 'static> From<(&str, T)> for Step {
    fn from((name, transformer): (&str, T)) -> Self {
        Step::new(name, transformer)
    }
}

/// Marks an operand as a column of the frame being fitted, not a literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub col: String,
}

impl ColumnRef {
    pub fn new(col: impl Into<String>) -> Self {
        Self { col: col.into() }
    }
}

/// Build the `name__class__ast__inplace__newcols` descriptor
pub fn rest_descriptor(
    step_name: &str,
    class_name: &str,
    ast: &str,
    inplace: bool,
    new_col_names: &[String],
) -> String {
    let new_cols = if new_col_names.is_empty() {
        "|".to_string()
    } else {
        new_col_names.join("|")
    };
    let inplace = if inplace { "True" } else { "False" };
    format!(
        "{}__{}__{}__{}__{}",
        step_name, class_name, ast, inplace, new_cols
    )
}
