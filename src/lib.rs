//! h2o-assembly - declare H2O frame munging steps, fit them remotely and
//! export the fitted assembly as a Java POJO

pub mod cli;
pub mod client;
pub mod core;

// Re-export commonly used types
pub use client::{ClientError, ConnectionConfig, H2oConnection, H2oTransport};
pub use self::core::{Assembly, AssemblyError, ColumnRef, ElementwiseOp, Frame, Step, Transformer};
pub use self::core::{BinaryOp, ColOp, ColSelect, PojoExport, PojoOptions};
