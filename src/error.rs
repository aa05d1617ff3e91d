//! Error types for traincfg.

/// Result type alias for traincfg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for traincfg.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file as TOML.
    #[error("failed to parse config file: {source}")]
    ConfigParse {
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A required field is absent from the document.
    #[error("missing required field '{path}'")]
    MissingField {
        /// Dotted path of the missing field.
        path: String,
    },

    /// A field holds a value of the wrong TOML type.
    #[error("type mismatch for field '{path}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// Dotted path of the field.
        path: String,
        /// Expected TOML type.
        expected: &'static str,
        /// Actual TOML type found in the document.
        actual: &'static str,
    },

    /// A numeric field is outside its documented domain.
    #[error("value out of range for field '{path}': {value} (allowed: {allowed})")]
    Range {
        /// Dotted path of the field.
        path: String,
        /// The offending value, rendered as text.
        value: String,
        /// Human-readable description of the allowed range.
        allowed: &'static str,
    },

    /// A closed-set field holds an unrecognized value.
    #[error("unknown value '{value}' for field '{path}' (valid: {valid})")]
    UnknownEnumValue {
        /// Dotted path of the field.
        path: String,
        /// The unrecognized value.
        value: String,
        /// Comma-separated list of valid values.
        valid: String,
    },

    /// Strict mode found a key outside the recognized schema.
    #[error("unknown field '{path}' (strict mode rejects unrecognized keys)")]
    UnknownField {
        /// Dotted path of the unrecognized key.
        path: String,
    },

    /// A dotted reference names no registered factory.
    #[error("unknown {kind} key '{key}' (known: {known})")]
    UnknownRegistryKey {
        /// Registry kind (model, dataset, optimizer).
        kind: &'static str,
        /// The unresolved key.
        key: String,
        /// Comma-separated list of registered keys.
        known: String,
    },

    /// A registry key was registered twice.
    #[error("{kind} key '{key}' is already registered")]
    DuplicateRegistryKey {
        /// Registry kind.
        kind: &'static str,
        /// The duplicated key.
        key: String,
    },

    /// A `--set key=value` override expression could not be applied.
    #[error("invalid override '{expr}': {reason}")]
    InvalidOverride {
        /// The override expression as given.
        expr: String,
        /// Why it could not be applied.
        reason: String,
    },

    /// Every candidate run-directory index is taken.
    #[error("run directory indexes exhausted for template '{template}'")]
    RundirExhausted {
        /// The rundir template being resolved.
        template: String,
    },

    /// Failed to create the resolved run directory.
    #[error("failed to create run directory '{path}'")]
    RundirCreate {
        /// Path to the run directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration to TOML.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config as JSON")]
    JsonSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}
