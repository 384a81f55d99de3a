use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message returned when both payloads of an identifier are equal.
pub const EQUAL_PAYLOADS: &str = "both payloads are equal";

/// JSON body of every API response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl ResponseBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }
}
