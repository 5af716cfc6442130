//! Operation argument validation
//!
//! Bucket and object names are checked before any provider call, so obviously
//! malformed requests fail fast with `InvalidArgument` instead of a network
//! round trip.

use crate::error::{Error, Result};

/// Validate a bucket name against provider naming rules
pub fn bucket_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidArgument("bucket name cannot be empty".into()));
    }

    if name.len() < 3 || name.len() > 63 {
        return Err(Error::InvalidArgument(format!(
            "bucket name '{name}' must be between 3 and 63 characters"
        )));
    }

    let valid_char =
        |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.');
    if !name.chars().all(valid_char) {
        return Err(Error::InvalidArgument(format!(
            "bucket name '{name}' may only contain lowercase letters, digits, '-', '_' and '.'"
        )));
    }

    let edge_ok = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !edge_ok(name.chars().next()) || !edge_ok(name.chars().last()) {
        return Err(Error::InvalidArgument(format!(
            "bucket name '{name}' must start and end with a letter or digit"
        )));
    }

    Ok(())
}

/// Validate an object path
pub fn object_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::InvalidArgument("object path cannot be empty".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_name_valid() {
        assert!(bucket_name("my-bucket").is_ok());
        assert!(bucket_name("logs.example.com").is_ok());
        assert!(bucket_name("b_0").is_ok());
        assert!(bucket_name("abc").is_ok());
    }

    #[test]
    fn test_bucket_name_empty() {
        assert!(bucket_name("").is_err());
    }

    #[test]
    fn test_bucket_name_length_bounds() {
        assert!(bucket_name("ab").is_err());
        assert!(bucket_name(&"a".repeat(63)).is_ok());
        assert!(bucket_name(&"a".repeat(64)).is_err());
    }

    #[test]
    fn test_bucket_name_invalid_characters() {
        assert!(bucket_name("My-Bucket").is_err());
        assert!(bucket_name("my bucket").is_err());
        assert!(bucket_name("my/bucket").is_err());
    }

    #[test]
    fn test_bucket_name_edges() {
        assert!(bucket_name("-my-bucket").is_err());
        assert!(bucket_name("my-bucket-").is_err());
        assert!(bucket_name(".dots.").is_err());
    }

    #[test]
    fn test_object_path_valid() {
        assert!(object_path("file.txt").is_ok());
        assert!(object_path("path/to/file.txt").is_ok());
    }

    #[test]
    fn test_object_path_empty() {
        assert!(object_path("").is_err());
    }
}
