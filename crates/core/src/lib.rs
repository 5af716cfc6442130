//! st-core: Core library for the stratus MCP server
//!
//! This crate provides the provider-independent pieces of stratus:
//! - Normalized bucket and object records
//! - Error taxonomy
//! - ObjectStore trait for storage operations
//! - Argument validation
//! - Environment configuration
//!
//! This crate is designed to be independent of any specific storage SDK,
//! allowing the MCP dispatch layer to be tested against a fake store.

pub mod config;
pub mod error;
pub mod records;
pub mod traits;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use records::{BucketRecord, ObjectRecord};
pub use traits::ObjectStore;
