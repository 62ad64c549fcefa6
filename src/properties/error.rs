use thiserror::Error;

use crate::resource::ResourceError;

/// Why a property source could not be loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropertiesError {
    #[error("property source not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error("failed to read property source '{name}': {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },

    #[error("malformed \\uXXXX escape on line {line}")]
    MalformedEscape { line: usize },

    #[error("failed to parse TOML property source '{name}': {source}")]
    Toml {
        name: String,
        source: toml::de::Error,
    },

    #[error("invalid store options: {0}")]
    Options(#[source] toml::de::Error),
}

/// Why a single property could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("property '{key}' is not set; using default {target}")]
    Missing { key: String, target: &'static str },

    #[error("property '{key}' = '{raw}' is not a valid {target}: {reason}")]
    Invalid {
        key: String,
        target: &'static str,
        raw: String,
        reason: String,
    },
}
