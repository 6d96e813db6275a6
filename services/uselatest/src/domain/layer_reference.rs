/// Layer reference classification
///
/// A `Layers` entry in a CloudFormation template is either a plain string
/// (layer name or ARN) or an intrinsic function object evaluated later by
/// CloudFormation.
use serde_json::Value;

/// Number of `:`-separated parts in a fully-qualified layer version ARN
///
/// `arn:aws:lambda:<region>:<account>:layer:<name>:<version>`
pub const VERSIONED_ARN_PARTS: usize = 8;

/// A single entry of a `Layers` list, classified once at ingestion
#[derive(Debug, Clone, PartialEq)]
pub enum LayerReference {
    /// Bare layer name, no `:` at all
    Name(String),

    /// ARN without the version suffix (or any other `:`-bearing string
    /// that is not a fully-qualified version ARN)
    PartialArn(String),

    /// Fully-qualified layer version ARN, left untouched
    FullArn(String),

    /// Non-string value such as `{"Ref": ...}` or `{"Fn::Sub": ...}`,
    /// left untouched
    IntrinsicExpression(Value),
}

impl LayerReference {
    /// Classify a raw JSON `Layers` entry
    pub fn classify(value: &Value) -> Self {
        let Some(reference) = value.as_str() else {
            return LayerReference::IntrinsicExpression(value.clone());
        };

        match reference.split(':').count() {
            VERSIONED_ARN_PARTS => LayerReference::FullArn(reference.to_string()),
            1 => LayerReference::Name(reference.to_string()),
            _ => LayerReference::PartialArn(reference.to_string()),
        }
    }

    /// Layer name to look up in the directory
    ///
    /// Only `Name` and `PartialArn` need resolving. The name is the last
    /// `:`-delimited segment, which for a bare name is the whole string.
    pub fn lookup_name(&self) -> Option<&str> {
        match self {
            LayerReference::Name(name) => Some(name.as_str()),
            LayerReference::PartialArn(arn) => arn.rsplit(':').next(),
            LayerReference::FullArn(_) | LayerReference::IntrinsicExpression(_) => None,
        }
    }

    /// Convert back into the JSON value it was classified from
    pub fn into_value(self) -> Value {
        match self {
            LayerReference::Name(s) | LayerReference::PartialArn(s) | LayerReference::FullArn(s) => {
                Value::String(s)
            }
            LayerReference::IntrinsicExpression(value) => value,
        }
    }
}
