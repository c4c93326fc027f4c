//! Collection payload codec.
//!
//! Collections are saved as one JSON array per key. Decoding is strict; the
//! caller decides how to recover from a payload it cannot read.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Collection payload could not be encoded or decoded.
#[derive(Debug)]
pub enum CodecError {
    Json(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid collection payload: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes a whole collection.
pub fn encode_collection<T: Serialize>(items: &[T]) -> CodecResult<Vec<u8>> {
    Ok(serde_json::to_vec(items)?)
}

/// Deserializes a whole collection.
pub fn decode_collection<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<Vec<T>> {
    Ok(serde_json::from_slice(bytes)?)
}
