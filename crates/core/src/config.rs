//! Environment configuration
//!
//! The project id and an optional emulator endpoint are read from the process
//! environment before the storage client initializes. Credential acquisition
//! itself (service-account files, ambient metadata credentials) stays inside
//! the SDK and is not handled here.

/// Environment variable naming the GCP project
pub const PROJECT_ENV: &str = "GOOGLE_CLOUD_PROJECT";

/// Environment variable pointing at a storage emulator endpoint
pub const EMULATOR_ENV: &str = "STORAGE_EMULATOR_HOST";

/// Runtime configuration for the storage client
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// GCP project id; when unset, the client falls back to the project
    /// carried by the ambient credentials
    pub project_id: Option<String>,

    /// Emulator endpoint override; when set, the client connects anonymously
    pub endpoint: Option<String>,
}

impl Config {
    /// Build a configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let clean = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            project_id: clean(lookup(PROJECT_ENV)),
            endpoint: clean(lookup(EMULATOR_ENV)),
        }
    }

    /// Override the project id (e.g. from a command-line flag)
    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup_reads_both_vars() {
        let config = Config::from_lookup(|key| match key {
            PROJECT_ENV => Some("my-project".to_string()),
            EMULATOR_ENV => Some("http://localhost:4443".to_string()),
            _ => None,
        });
        assert_eq!(config.project_id.as_deref(), Some("my-project"));
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:4443"));
    }

    #[test]
    fn test_from_lookup_missing_vars() {
        let config = Config::from_lookup(|_| None);
        assert!(config.project_id.is_none());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_from_lookup_blank_values_ignored() {
        let config = Config::from_lookup(|key| match key {
            PROJECT_ENV => Some("  ".to_string()),
            _ => None,
        });
        assert!(config.project_id.is_none());
    }

    #[test]
    fn test_with_project_overrides() {
        let config = Config::from_lookup(|key| match key {
            PROJECT_ENV => Some("from-env".to_string()),
            _ => None,
        })
        .with_project("from-flag");
        assert_eq!(config.project_id.as_deref(), Some("from-flag"));
    }
}
