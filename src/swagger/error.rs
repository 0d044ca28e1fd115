use std::fmt;
use std::path::PathBuf;

/// Swagger configuration could not be located, read or accepted.
///
/// Raised when the reader is constructed; the reader never starts without a
/// valid configuration.
#[derive(Debug)]
pub enum SwaggerConfigError {
    /// The environment variable naming the configuration file is not set
    MissingLocation {
        /// Name of the variable that was consulted
        variable: &'static str,
    },
    /// The configured location is empty or not a regular file
    NotAFile {
        path: PathBuf,
    },
    /// The file exists but could not be read
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a valid configuration document
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The document parsed but its values are inconsistent
    Invalid {
        reason: String,
    },
}

impl fmt::Display for SwaggerConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwaggerConfigError::MissingLocation { variable } => write!(
                f,
                "Swagger configuration error: no configuration file given; set {variable}"
            ),
            SwaggerConfigError::NotAFile { path } => write!(
                f,
                "Swagger configuration error: '{}' is not a file",
                path.display()
            ),
            SwaggerConfigError::Read { path, source } => write!(
                f,
                "Swagger configuration error: failed to read '{}': {source}",
                path.display()
            ),
            SwaggerConfigError::Parse { path, source } => write!(
                f,
                "Swagger configuration error: '{}' is not a valid configuration: {source}",
                path.display()
            ),
            SwaggerConfigError::Invalid { reason } => {
                write!(f, "Swagger configuration error: {reason}")
            }
        }
    }
}

impl std::error::Error for SwaggerConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SwaggerConfigError::Read { source, .. } => Some(source),
            SwaggerConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
