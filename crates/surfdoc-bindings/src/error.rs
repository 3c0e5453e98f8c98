use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("{}:{line}: expected {expected}", .path.display())]
    MissingDelimiter {
        path: PathBuf,
        line: usize,
        expected: &'static str,
    },

    #[error("{}:{line}: duplicate {registry} entity '{name}'", .path.display())]
    Duplicate {
        path: PathBuf,
        line: usize,
        registry: &'static str,
        name: String,
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
