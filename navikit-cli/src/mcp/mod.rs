//! MCP stdio server exposing the five Maps operations as tools.

pub mod inputs;
pub mod protocol;
pub mod server;

pub use server::McpServer;
