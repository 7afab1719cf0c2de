//! Error types for modsweep.

/// Result type alias for modsweep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for modsweep.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
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

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Input validation failed.
    #[error("invalid argument: {message}")]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Studio export directory does not exist.
    #[error("studio export directory does not exist: {path}")]
    StudioPathNotFound {
        /// Path that was checked.
        path: std::path::PathBuf,
    },

    /// Destination module directory already exists.
    #[error("destination module directory already exists: {path} (use --force to overwrite)")]
    DestinationExists {
        /// Path to the destination module directory.
        path: std::path::PathBuf,
    },

    /// Failed to read a module file.
    #[error("failed to read '{path}'")]
    FileRead {
        /// Path to the file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a module file.
    #[error("failed to write '{path}'")]
    FileWrite {
        /// Path to the file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse an XML data file.
    #[error("failed to parse XML file '{path}'")]
    XmlParse {
        /// Path to the XML file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: quick_xml::Error,
    },

    /// Failed to parse the module manifest.
    #[error("failed to parse manifest '{path}': {message}")]
    ManifestParse {
        /// Path to the manifest file.
        path: std::path::PathBuf,
        /// Description of the parse failure.
        message: String,
    },

    /// HTTP request to the server failed.
    #[error("request to '{url}' failed")]
    Rpc {
        /// URL that was requested.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status.
    #[error("request to '{url}' returned HTTP {status}")]
    RpcStatus {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Session authentication was rejected by the server.
    #[error("login failed for database '{db}' (check --login/--password)")]
    AuthFailed {
        /// Database name used for the login attempt.
        db: String,
    },

    /// Server response did not have the expected JSON-RPC shape.
    #[error("unexpected JSON-RPC response: {message}")]
    RpcShape {
        /// Description of the shape mismatch.
        message: String,
    },

    /// The admin credential reset subprocess failed.
    #[error("psql credential reset failed: {message}")]
    DbReset {
        /// Description of the subprocess failure.
        message: String,
    },
}
