use std::path::PathBuf;

/// Boxed error returned by analyzers and rules.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Metrule error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// File I/O error
    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine dispatched a node the adapter cannot wrap.
    #[error("unsupported node kind `{kind}` for `{name}`")]
    UnsupportedNode { kind: String, name: String },

    /// An analyzer failed while producing metrics for a node.
    #[error("analyzer `{analyzer}` failed on `{node}`: {source}")]
    Analyzer {
        analyzer: String,
        node: String,
        #[source]
        source: BoxError,
    },

    /// A rule failed while evaluating a node.
    #[error("rule `{rule}` in rule set `{rule_set}` failed: {source}")]
    Rule {
        rule_set: String,
        rule: String,
        #[source]
        source: BoxError,
    },

    /// Two analyzers produced the same metric for one node.
    #[error("metric `{metric}` on `{node}` already set before analyzer `{analyzer}`")]
    MetricCollision {
        metric: String,
        node: String,
        analyzer: String,
    },

    /// Failure raised by a collaborator without a structured source.
    #[error("{0}")]
    Collaborator(String),
}

/// Result type using metrule Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
