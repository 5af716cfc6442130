//! stratus-mcp library
//!
//! This module exports the MCP server components for use in integration tests.

pub mod server;
