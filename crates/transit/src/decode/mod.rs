//! Pure decoding of REST responses into typed models.
//!
//! Responses arrive wrapped in an envelope:
//!
//! ```json
//! {"code": 200, "text": "OK", "version": 2,
//!  "data": {"limitExceeded": false, "list": [...], "references": {...}}}
//! ```
//!
//! Single-object endpoints use `data.entry` instead of `data.list`. The
//! decoder also accepts a bare `data` object.

pub mod error;

pub use error::{DecodeError, EntityKind};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::models::references::References;
use crate::models::traits::RestModel;

/// Models decoded from one response.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelList<M> {
    pub models: Vec<M>,

    /// Present when the response carried a `references` block.
    pub references: Option<References>,

    /// The server truncated the list.
    pub limit_exceeded: bool,
}

impl<M> Default for ModelList<M> {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            references: None,
            limit_exceeded: false,
        }
    }
}

/// Decode each element, stopping at the first failure and reporting its index.
pub(crate) fn decode_elements<T: DeserializeOwned>(
    items: &[Value],
) -> Result<Vec<T>, (usize, serde_json::Error)> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| T::deserialize(item).map_err(|e| (index, e)))
        .collect()
}

/// Decode a parsed response into a list of `M`.
pub fn decode_models<M: RestModel>(payload: &Value) -> Result<ModelList<M>, DecodeError> {
    let envelope = payload.as_object().ok_or(DecodeError::NotAnObject)?;
    check_status(envelope)?;

    let data = match envelope.get("data") {
        Some(Value::Object(data)) => data,
        Some(_) => return Err(DecodeError::Envelope("`data` is not an object".into())),
        None => envelope,
    };

    let models = if let Some(list) = data.get("list") {
        let items = list
            .as_array()
            .ok_or_else(|| DecodeError::Envelope("`list` is not an array".into()))?;
        decode_elements(items).map_err(|(index, source)| DecodeError::Model {
            model: M::NAME,
            index,
            source,
        })?
    } else if let Some(entry) = data.get("entry") {
        let model = M::deserialize(entry).map_err(|source| DecodeError::Model {
            model: M::NAME,
            index: 0,
            source,
        })?;
        vec![model]
    } else {
        return Err(DecodeError::Envelope(
            "response has neither `list` nor `entry`".into(),
        ));
    };

    let references = data
        .get("references")
        .filter(|r| !r.is_null())
        .map(References::decode)
        .transpose()?;

    let limit_exceeded = data
        .get("limitExceeded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(ModelList {
        models,
        references,
        limit_exceeded,
    })
}

/// Parse raw response bytes and decode them.
pub fn decode_models_from_slice<M: RestModel>(bytes: &[u8]) -> Result<ModelList<M>, DecodeError> {
    let payload: Value = serde_json::from_slice(bytes).map_err(DecodeError::Json)?;
    decode_models(&payload)
}

fn check_status(envelope: &serde_json::Map<String, Value>) -> Result<(), DecodeError> {
    let Some(code) = envelope.get("code") else {
        return Ok(());
    };

    let code = u16::deserialize(code)
        .map_err(|_| DecodeError::Envelope(format!("invalid status code {code}")))?;

    if code == 200 {
        return Ok(());
    }

    let text = envelope
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();
    Err(DecodeError::Status { code, text })
}
