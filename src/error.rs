#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response body: {0}")]
    Body(String),
}

pub type BridgeResult<T> = Result<T, BridgeError>;
