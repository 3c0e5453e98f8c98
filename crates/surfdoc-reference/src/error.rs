use std::path::PathBuf;

/// Error raised while extracting the reference model.
///
/// Every variant is fatal: a partially extracted model would make the
/// generated documentation silently incomplete.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("failed to load C# grammar: {0}")]
    Grammar(String),

    #[error("{}:{line}:{column}: syntax error in reference source", .path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}
