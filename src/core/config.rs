//! Assembly definitions from YAML

use crate::core::assembly::Assembly;
use crate::core::error::AssemblyError;
use crate::core::frame::ElementwiseOp;
use crate::core::step::Step;
use crate::core::transforms::{BinaryOp, ColOp, ColSelect, Operand, OperandSide};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Top-level assembly definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Assembly name, used as the default POJO class name
    #[serde(default)]
    pub name: Option<String>,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Steps in application order
    pub steps: Vec<StepConfig>,
}

/// Step as defined in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepConfig {
    pub name: String,

    #[serde(flatten)]
    pub kind: StepKind,
}

/// The transformer behind a step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    ColSelect {
        cols: Vec<String>,
    },
    ColOp {
        op: String,
        col: String,
        #[serde(default)]
        args: Vec<Operand>,
        #[serde(default)]
        inplace: bool,
        #[serde(default)]
        new_col_name: Option<NewColNames>,
    },
    BinaryOp {
        op: ElementwiseOp,
        col: String,
        #[serde(default)]
        left: Option<Operand>,
        #[serde(default)]
        right: Option<Operand>,
        #[serde(default)]
        inplace: bool,
        #[serde(default)]
        new_col_name: Option<NewColNames>,
    },
}

/// One or several new column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NewColNames {
    One(String),
    Many(Vec<String>),
}

impl NewColNames {
    fn into_vec(self) -> Vec<String> {
        match self {
            NewColNames::One(name) => vec![name],
            NewColNames::Many(names) => names,
        }
    }
}

impl AssemblyConfig {
    /// Load an assembly definition from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssemblyError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse an assembly definition from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, AssemblyError> {
        let config: AssemblyConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the definition
    pub fn validate(&self) -> Result<(), AssemblyError> {
        let mut seen = HashSet::new();
        for step in &self.steps {
            if step.name.trim().is_empty() {
                return Err(AssemblyError::Config("Step name must not be empty".to_string()));
            }
            if !seen.insert(step.name.as_str()) {
                return Err(AssemblyError::Config(format!(
                    "Duplicate step name: {}",
                    step.name
                )));
            }
            if let StepKind::BinaryOp { left, right, .. } = &step.kind {
                if left.is_some() == right.is_some() {
                    return Err(AssemblyError::Config(format!(
                        "Step '{}' needs exactly one of 'left' or 'right'",
                        step.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the assembly described by this definition
    pub fn to_assembly(&self) -> Result<Assembly, AssemblyError> {
        let steps = self
            .steps
            .iter()
            .map(StepConfig::to_step)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Assembly::new(steps))
    }
}

impl StepConfig {
    pub fn to_step(&self) -> Result<Step, AssemblyError> {
        let step = match self.kind.clone() {
            StepKind::ColSelect { cols } => Step::new(&self.name, ColSelect::new(cols)),
            StepKind::ColOp {
                op,
                col,
                args,
                inplace,
                new_col_name,
            } => {
                let mut col_op = ColOp::new(op, col).inplace(inplace);
                col_op.args = args;
                col_op.new_col_names = new_col_name.map(NewColNames::into_vec).unwrap_or_default();
                Step::new(&self.name, col_op)
            }
            StepKind::BinaryOp {
                op,
                col,
                left,
                right,
                inplace,
                new_col_name,
            } => {
                let operand = match (left, right) {
                    (Some(left), None) => OperandSide::Left(left),
                    (None, Some(right)) => OperandSide::Right(right),
                    _ => {
                        return Err(AssemblyError::Config(format!(
                            "Step '{}' needs exactly one of 'left' or 'right'",
                            self.name
                        )))
                    }
                };
                let mut binary = BinaryOp::new(op, col, operand).inplace(inplace);
                binary.new_col_names = new_col_name.map(NewColNames::into_vec).unwrap_or_default();
                Step::new(&self.name, binary)
            }
        };
        Ok(step)
    }
}
