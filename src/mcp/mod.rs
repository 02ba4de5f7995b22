//! Model Context Protocol support

mod protocol;
mod tools;

pub use protocol::{
    methods, InitializeResult, McpError, McpRequest, McpResponse, ServerCapabilities, ServerInfo,
    ToolCallResult, ToolContent, ToolDefinition, ToolsCapability,
};
pub use tools::{get_tool_definitions, TOOL_DEFINITIONS};
