use thiserror::Error;

/// Error surfaced by a source or store client, post-retry. Carries the
/// upstream detail (including server-provided error bodies) as text.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SourceError {
    message: String,
}

impl SourceError {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}
