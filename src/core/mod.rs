//! Core domain models for assemblies
//!
//! This module defines assemblies, their steps, the built-in transformers
//! and the handle to frames living on the server.

pub mod assembly;
pub mod config;
pub mod error;
pub mod expr;
pub mod frame;
pub mod pojo;
pub mod step;
pub mod transforms;

pub use assembly::*;
pub use error::AssemblyError;
pub use frame::{ElementwiseOp, Frame};
pub use pojo::{PojoExport, PojoOptions};
pub use step::*;
pub use transforms::*;
