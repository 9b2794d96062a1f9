//! Inbound `echo-sign:play` messages.

use crate::gloss::GlossName;
use serde::Deserialize;
use thiserror::Error;

pub const PLAY_MESSAGE_TYPE: &str = "echo-sign:play";

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("play message without a string gloss")]
    MissingGloss,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    gloss: Option<serde_json::Value>,
}

/// Decode one message. Messages of another type yield `Ok(None)`.
pub fn parse_message(text: &str) -> Result<Option<GlossName>, MessageError> {
    let raw: RawMessage = serde_json::from_str(text)?;
    if raw.kind.as_deref() != Some(PLAY_MESSAGE_TYPE) {
        return Ok(None);
    }

    match raw.gloss {
        Some(serde_json::Value::String(gloss)) => Ok(Some(GlossName::new(gloss))),
        _ => Err(MessageError::MissingGloss),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_message_yields_gloss() {
        let gloss = parse_message(r#"{"type":"echo-sign:play","gloss":"hello"}"#).unwrap();
        assert_eq!(gloss, Some(GlossName::from("hello")));
    }

    #[test]
    fn other_types_are_ignored() {
        assert!(parse_message(r#"{"type":"resize","width":10}"#).unwrap().is_none());
        assert!(parse_message(r#"{"gloss":"hello"}"#).unwrap().is_none());
    }

    #[test]
    fn non_string_gloss_is_rejected() {
        let err = parse_message(r#"{"type":"echo-sign:play","gloss":3}"#).unwrap_err();
        assert!(matches!(err, MessageError::MissingGloss));
        let err = parse_message(r#"{"type":"echo-sign:play"}"#).unwrap_err();
        assert!(matches!(err, MessageError::MissingGloss));
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(parse_message("not json"), Err(MessageError::Json(_))));
    }
}
