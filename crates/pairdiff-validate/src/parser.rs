//! Turning raw stored payloads into trees.
//!
//! The orchestrator never decodes anything itself; it hands each side's raw
//! text to a [`PayloadParser`].

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use pairdiff_types::TreeNode;

use crate::error::DecodeError;

/// Parses one side's raw payload into a [`TreeNode`].
pub trait PayloadParser: Send + Sync {
    fn parse(&self, raw: &str) -> Result<TreeNode, DecodeError>;
}

/// Raw payload is JSON text.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonPayloadParser;

impl PayloadParser for JsonPayloadParser {
    fn parse(&self, raw: &str) -> Result<TreeNode, DecodeError> {
        Ok(TreeNode::parse(raw)?)
    }
}

/// Raw payload is standard-alphabet base64 wrapping UTF-8 JSON text.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64JsonParser;

impl Base64JsonParser {
    /// Undo the transport encoding.
    pub fn decode_transport(raw: &str) -> Result<String, DecodeError> {
        let bytes = STANDARD.decode(raw)?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl PayloadParser for Base64JsonParser {
    fn parse(&self, raw: &str) -> Result<TreeNode, DecodeError> {
        let text = Self::decode_transport(raw)?;
        Ok(TreeNode::parse(&text)?)
    }
}

/// How payloads arrive, selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Base64-wrapped JSON.
    #[default]
    Base64,
    /// Bare JSON text.
    Plain,
}

impl PayloadParser for Transport {
    fn parse(&self, raw: &str) -> Result<TreeNode, DecodeError> {
        match self {
            Self::Base64 => Base64JsonParser.parse(raw),
            Self::Plain => JsonPayloadParser.parse(raw),
        }
    }
}
