use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
	#[error("invalid graph payload: {0}")]
	Json(#[from] serde_json::Error),
	#[error("payload element `#{0}` is empty")]
	EmptyPayload(String),
}
