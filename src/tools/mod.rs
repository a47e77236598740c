pub mod builtin;
pub mod manifest;
pub mod registry;
pub mod tool;

pub use builtin::EchoTool;
pub use manifest::{ToolManifest, ToolManifestBuilder};
pub use registry::ToolRegistry;
pub use tool::Tool;
