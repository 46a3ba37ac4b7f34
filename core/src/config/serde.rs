use crate::config::block_paths::BlockPathsConfig;
use serde_valid::Validate;
use serde_valid::validation::{Error, Errors};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Failed to open configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] Errors<Error>),
}

#[instrument(skip(reader))]
pub fn read_configuration(reader: impl Read) -> Result<BlockPathsConfig, ReadError> {
    let configuration = serde_yaml::from_reader::<_, BlockPathsConfig>(reader)
        .inspect_err(|e| warn!("Failed to parse configuration: {}", e))?;

    configuration
        .validate()
        .inspect(|_| debug!("Read configuration is valid"))
        .inspect_err(|e| warn!("Invalid read configuration: {}", e))
        .map(|()| configuration)
        .map_err(ReadError::InvalidConfiguration)
}

#[instrument]
pub fn read_configuration_file(path: &Path) -> Result<BlockPathsConfig, ReadError> {
    let file = File::open(path)
        .inspect_err(|e| warn!("Failed to open {}: {}", path.display(), e))?;
    read_configuration(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assertables::assert_ok;
    use std::io::Write;

    #[test]
    fn test_read_configuration() {
        let yaml = r#"
regex:
  - "^/wp(.*)"
  - "^/\\.env$"
silentStartUp: false
allowLocalRequests: false
statusCode: 404
"#
        .as_bytes();

        let config = assert_ok!(read_configuration(yaml));
        assert_eq!(config.regex().len(), 2);
        assert_eq!(config.regex()[1], "^/\\.env$");
        assert!(!config.silent_start_up());
        assert!(!config.allow_local_requests());
        assert_eq!(config.status_code(), 404);
    }

    #[test]
    fn test_read_configuration_with_defaults() {
        let yaml = "regex: [\"^/admin\"]\n".as_bytes();

        let config = assert_ok!(read_configuration(yaml));
        assert!(config.silent_start_up());
        assert!(config.allow_local_requests());
        assert_eq!(config.status_code(), 403);
    }

    #[test]
    fn test_read_configuration_without_patterns_is_invalid() {
        let yaml = "statusCode: 404\n".as_bytes();

        let err = read_configuration(yaml).unwrap_err();
        assert!(matches!(err, ReadError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_read_configuration_with_malformed_yaml() {
        let yaml = "regex: [\"^/admin\"\n".as_bytes();

        let err = read_configuration(yaml).unwrap_err();
        assert!(matches!(err, ReadError::Parse(_)));
    }

    #[test]
    fn test_read_configuration_file() {
        let mut file = assert_ok!(tempfile::NamedTempFile::new());
        assert_ok!(writeln!(file, "regex:\n  - \"^/wp(.*)\"\nstatusCode: 410"));

        let config = assert_ok!(read_configuration_file(file.path()));
        assert_eq!(config.regex(), &vec!["^/wp(.*)".to_string()]);
        assert_eq!(config.status_code(), 410);
    }

    #[test]
    fn test_read_missing_configuration_file() {
        let dir = assert_ok!(tempfile::tempdir());
        let path = dir.path().join("missing.yaml");

        let err = read_configuration_file(&path).unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }
}
