//! Wire protocol shared by every component that speaks to a primary or
//! worker: the request/response schema and its length framing (§6, §9 of
//! the workspace root SPEC_FULL.md).
//!
//! A message is a 4-byte big-endian length prefix followed by a UTF-8 JSON
//! body. Callers must not assume a single `read`/`recv` yields a whole
//! message — `read_message` loops until the declared length is satisfied.

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Generous but bounded: nothing in this protocol legitimately needs more.
const MAX_FRAME_LEN: u32 = 16 * 1024 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum WireError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame of {0} bytes exceeds the {MAX_FRAME_LEN} byte limit")]
    FrameTooLarge(u32),
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type WireResult<T> = std::result::Result<T, WireError>;

/// `{ action, key?, value? }` (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Request {
    pub fn get(key: impl Into<String>) -> Self {
        Self {
            action: "GET".into(),
            key: Some(key.into()),
            value: None,
        }
    }

    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            action: "SET".into(),
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self {
            action: "DELETE".into(),
            key: Some(key.into()),
            value: None,
        }
    }

    pub fn list_keys() -> Self {
        Self {
            action: "LIST_KEYS".into(),
            key: None,
            value: None,
        }
    }

    pub fn key_metadata(key: impl Into<String>) -> Self {
        Self {
            action: "KEY_METADATA".into(),
            key: Some(key.into()),
            value: None,
        }
    }
}

/// The `OK` status's payload; which fields are populated depends on the
/// action, exactly as in the source system's single reply dict (§6).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OkPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_nodes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<Vec<String>>,
}

/// Response, tagged on the wire by its `status` field (§6).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Response {
    #[serde(rename = "OK")]
    Ok(OkPayload),
    #[serde(rename = "STORED")]
    Stored,
    #[serde(rename = "DELETED")]
    Deleted,
    #[serde(rename = "MISS")]
    Miss {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    #[serde(rename = "ERROR")]
    Error { message: String },
}

impl Response {
    pub fn stored() -> Self {
        Response::Stored
    }

    pub fn deleted() -> Self {
        Response::Deleted
    }

    pub fn miss() -> Self {
        Response::Miss { message: None }
    }

    pub fn miss_msg(message: impl Into<String>) -> Self {
        Response::Miss {
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn ok_value(value: Option<String>) -> Self {
        Response::Ok(OkPayload {
            value,
            ..Default::default()
        })
    }

    pub fn ok_keys(keys: Vec<String>) -> Self {
        Response::Ok(OkPayload {
            keys: Some(keys),
            ..Default::default()
        })
    }

    pub fn ok_keys_with_nodes(keys: Vec<String>, active_nodes: Vec<String>) -> Self {
        Response::Ok(OkPayload {
            keys: Some(keys),
            active_nodes: Some(active_nodes),
            ..Default::default()
        })
    }

    pub fn ok_metadata(primary: Option<String>, replicas: Vec<String>, value: String) -> Self {
        Response::Ok(OkPayload {
            primary,
            replicas: Some(replicas),
            value: Some(value),
            ..Default::default()
        })
    }

    /// The `value` field of an `OK` reply, if any — used by the primary's
    /// GET handler to decide whether a replica's reply is a hit (§4.2).
    pub fn value(&self) -> Option<&str> {
        match self {
            Response::Ok(payload) => payload.value.as_deref(),
            _ => None,
        }
    }
}

/// Writes one length-framed JSON message.
pub async fn write_message<W, T>(writer: &mut W, message: &T) -> WireResult<()>
where
    W: AsyncWriteExt + Unpin,
    T: Serialize,
{
    let body = serde_json::to_vec(message)?;
    let len = u32::try_from(body.len()).map_err(|_| WireError::FrameTooLarge(u32::MAX))?;
    if len > MAX_FRAME_LEN {
        return Err(WireError::FrameTooLarge(len));
    }
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads one length-framed JSON message, looping until the declared length
/// is fully read.
pub async fn read_message<R, T>(reader: &mut R) -> WireResult<T>
where
    R: AsyncReadExt + Unpin,
    T: for<'de> Deserialize<'de>,
{
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(WireError::FrameTooLarge(len));
    }
    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body).await?;
    Ok(serde_json::from_slice(&body)?)
}
