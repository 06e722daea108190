//! CLI command definitions

use crate::core::{ElementwiseOp, PojoOptions};
use clap::Args;

/// Fit an assembly on a frame
#[derive(Debug, Args, Clone)]
pub struct FitCommand {
    /// Path to assembly YAML file
    #[arg(short, long)]
    pub file: String,

    /// Key of the frame to fit on
    #[arg(long)]
    pub frame: String,

    /// Export the fitted assembly as a POJO into this directory
    #[arg(long)]
    pub pojo_dir: Option<String>,

    /// POJO class name (defaults to the assembly name)
    #[arg(long)]
    pub pojo_name: Option<String>,

    /// Don't download h2o-genmodel.jar next to the POJO
    #[arg(long)]
    pub no_jar: bool,
}

impl FitCommand {
    /// POJO export requested by the flags, if any
    pub fn pojo_options(&self, default_name: Option<&str>) -> Option<PojoOptions> {
        let dir = self.pojo_dir.as_ref()?;
        let mut options = PojoOptions::new().with_path(dir).with_jar(!self.no_jar);
        options.pojo_name = self
            .pojo_name
            .clone()
            .or_else(|| default_name.map(str::to_string));
        Some(options)
    }
}

/// Validate an assembly definition
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to assembly YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Export an already fitted assembly
#[derive(Debug, Args, Clone)]
pub struct PojoCommand {
    /// Server-side key of the fitted assembly
    #[arg(long)]
    pub assembly_id: String,

    /// POJO class name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory to write into; prints the source when omitted
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Don't download h2o-genmodel.jar
    #[arg(long)]
    pub no_jar: bool,
}

impl PojoCommand {
    pub fn pojo_options(&self) -> PojoOptions {
        let mut options = PojoOptions::new().with_jar(!self.no_jar);
        options.pojo_name = self.name.clone();
        options.path = self.dir.as_ref().map(Into::into);
        options
    }
}

/// Apply an elementwise operator to two frames
#[derive(Debug, Args, Clone)]
pub struct OpCommand {
    /// Operator symbol (`+`, `>=`, ...) or name (`plus`, `greater_than_equal`, ...)
    #[arg(value_parser = parse_op)]
    pub op: ElementwiseOp,

    /// Left frame key
    pub left: String,

    /// Right frame key
    pub right: String,
}

/// Parse an elementwise operator
pub fn parse_op(s: &str) -> Result<ElementwiseOp, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_fit_pojo_options() {
        let cmd = FitCommand {
            file: "a.yaml".to_string(),
            frame: "f".to_string(),
            pojo_dir: Some("out".to_string()),
            pojo_name: None,
            no_jar: true,
        };
        let options = cmd.pojo_options(Some("iris_munge")).unwrap();
        assert_eq!(options.pojo_name.as_deref(), Some("iris_munge"));
        assert_eq!(options.path, Some(PathBuf::from("out")));
        assert!(!options.get_jar);

        let no_export = FitCommand { pojo_dir: None, ..cmd };
        assert!(no_export.pojo_options(None).is_none());
    }

    #[test]
    fn test_pojo_command_options() {
        let cmd = PojoCommand {
            assembly_id: "a1".to_string(),
            name: None,
            dir: None,
            no_jar: false,
        };
        let options = cmd.pojo_options();
        assert!(options.pojo_name.is_none());
        assert!(options.path.is_none());
        assert!(options.get_jar);
    }
}
