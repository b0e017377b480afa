use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdinetError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream auth failure: {0}")]
    UpstreamAuth(String),

    #[error("Upstream request failed: {0}")]
    Transport(String),
}
