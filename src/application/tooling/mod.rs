mod error;
mod registry;
pub mod sysinfo;

pub use error::ToolError;
pub use registry::{Tool, ToolRegistry};
