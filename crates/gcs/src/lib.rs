//! st-gcs: Google Cloud Storage adapter for stratus
//!
//! This crate provides the implementation of the ObjectStore trait using the
//! google-cloud-storage crate. It is the only crate that directly depends on
//! the GCS SDK; provider response types never cross its boundary.

pub mod client;

pub use client::GcsStore;
