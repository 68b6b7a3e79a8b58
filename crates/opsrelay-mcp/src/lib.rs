pub mod protocol;
pub mod server;
pub mod tools;

pub use tools::{ToolDefinition, ToolServer};
