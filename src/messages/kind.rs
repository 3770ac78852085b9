//! The five message kinds a check may surface.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "description")]
    Description,
    /// What to do to fix a failure.
    #[serde(rename = "action")]
    Action,
    /// Why a failure matters.
    #[serde(rename = "impact")]
    Impact,
    #[serde(rename = "fail")]
    FailMessage,
    #[serde(rename = "success")]
    SuccessMessage,
}

impl MessageType {
    /// All kinds in display order.
    pub const ALL: [MessageType; 5] = [
        MessageType::Description,
        MessageType::Action,
        MessageType::Impact,
        MessageType::FailMessage,
        MessageType::SuccessMessage,
    ];

    /// Storage/serialization name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Description => "description",
            MessageType::Action => "action",
            MessageType::Impact => "impact",
            MessageType::FailMessage => "fail",
            MessageType::SuccessMessage => "success",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "description" => Ok(MessageType::Description),
            "action" | "actions" => Ok(MessageType::Action),
            "impact" | "impacts" => Ok(MessageType::Impact),
            "fail" | "fail_message" => Ok(MessageType::FailMessage),
            "success" | "success_message" => Ok(MessageType::SuccessMessage),
            _ => Err(AuditError::InvalidMessageType {
                value: s.to_string(),
            }),
        }
    }
}
