/// CloudFormation macro invocation envelope
///
/// Request: `{ requestId, region, accountId, fragment, ... }`
/// Response: `{ requestId, status, fragment }`
use serde::Serialize;
use serde_json::Value;

/// Result status reported back to CloudFormation
///
/// The transform never builds a failure envelope: real failures abort the
/// invocation instead, so only `success` is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroStatus {
    Success,
}

/// Fields of the incoming invocation the transform reads
#[derive(Debug, Clone, PartialEq)]
pub struct MacroRequest {
    pub request_id: String,
    pub region: String,
    pub account_id: String,
    pub fragment: Value,
}

/// Response handed back to CloudFormation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroResponse {
    pub request_id: String,
    pub status: MacroStatus,
    pub fragment: Value,
}

impl MacroResponse {
    pub fn success(request_id: impl Into<String>, fragment: Value) -> Self {
        Self {
            request_id: request_id.into(),
            status: MacroStatus::Success,
            fragment,
        }
    }
}
