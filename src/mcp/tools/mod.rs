// src/mcp/tools/mod.rs
// MCP tool implementations
//
// Tool functions are generic over the API trait so tests exercise them
// against a scripted mock. All return `Result<String, String>`; success
// payloads are pretty-printed JSON.

pub mod plan;
pub mod projects;
pub mod work_packages;

/// Serialize a tool result for the caller
pub(crate) fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to serialize result: {e}"))
}
