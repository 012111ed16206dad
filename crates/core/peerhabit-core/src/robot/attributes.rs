//! Typed attribute descriptors
//!
//! Every robot attribute is an independent scalar stored under
//! `<prefix>-<attribute>:<robot id>`. An [`AttributeSpec`] pairs the attribute
//! name with one of a small closed set of codecs and an optional default.

use crate::types::ContextCodec;
use crate::{PeerHabitError, Result};
use std::fmt;

/// Day-0 anchor used when a robot never had one written
pub const DEFAULT_ZERO_DAY: i64 = 7120;

/// Codec families an attribute can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    /// Stored as-is
    Text,
    /// Decimal floating point
    Float,
    /// Signed integer
    Integer,
    /// Opaque partner context
    Context,
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodecKind::Text => "text",
            CodecKind::Float => "float",
            CodecKind::Integer => "integer",
            CodecKind::Context => "context",
        };
        f.write_str(name)
    }
}

/// Converts between an attribute's value and its stored string
pub trait AttributeCodec {
    /// Decoded value type
    type Value;

    /// Codec family, reported in decode failures
    fn kind(&self) -> CodecKind;

    /// Serialize a value for storage
    fn encode(&self, value: &Self::Value) -> Result<String>;

    /// Parse a stored value
    fn decode(&self, raw: &str) -> Result<Self::Value>;
}

/// Identity codec
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl AttributeCodec for TextCodec {
    type Value = String;

    fn kind(&self) -> CodecKind {
        CodecKind::Text
    }

    fn encode(&self, value: &String) -> Result<String> {
        Ok(value.clone())
    }

    fn decode(&self, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }
}

/// `f64` codec
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCodec;

impl AttributeCodec for FloatCodec {
    type Value = f64;

    fn kind(&self) -> CodecKind {
        CodecKind::Float
    }

    fn encode(&self, value: &f64) -> Result<String> {
        Ok(value.to_string())
    }

    fn decode(&self, raw: &str) -> Result<f64> {
        raw.trim()
            .parse()
            .map_err(|e| PeerHabitError::validation(format!("{}", e)))
    }
}

/// `i64` codec
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerCodec;

impl AttributeCodec for IntegerCodec {
    type Value = i64;

    fn kind(&self) -> CodecKind {
        CodecKind::Integer
    }

    fn encode(&self, value: &i64) -> Result<String> {
        Ok(value.to_string())
    }

    fn decode(&self, raw: &str) -> Result<i64> {
        raw.trim()
            .parse()
            .map_err(|e| PeerHabitError::validation(format!("{}", e)))
    }
}

/// Adapts an external [`ContextCodec`] to the attribute layer
#[derive(Debug, Clone, Copy)]
pub struct PartnerCodec<'a, C>(pub &'a C);

impl<C: ContextCodec> AttributeCodec for PartnerCodec<'_, C> {
    type Value = C::Context;

    fn kind(&self) -> CodecKind {
        CodecKind::Context
    }

    fn encode(&self, value: &C::Context) -> Result<String> {
        self.0.serialize_context(value)
    }

    fn decode(&self, raw: &str) -> Result<C::Context> {
        self.0.parse_context(raw)
    }
}

/// Name, codec and default of one attribute
pub struct AttributeSpec<C: AttributeCodec> {
    name: String,
    codec: C,
    default: Option<C::Value>,
}

impl<C: AttributeCodec> AttributeSpec<C> {
    /// Attribute without a default
    pub fn new(name: impl Into<String>, codec: C) -> Self {
        Self {
            name: name.into(),
            codec,
            default: None,
        }
    }

    /// Value returned when nothing is stored
    pub fn with_default(mut self, default: C::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Attribute name as given
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Codec
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Default value, if any
    pub fn default_value(&self) -> Option<&C::Value> {
        self.default.as_ref()
    }
}

/// Derive the storage key for an attribute of a robot.
///
/// Underscores in the attribute name become hyphens, so `last_first_try` and
/// `last-first-try` address the same entry. Names containing `:` are rejected
/// because `:` separates the attribute from the robot id.
pub fn storage_key(prefix: &str, attribute: &str, robot_id: &str) -> Result<String> {
    if attribute.is_empty() || attribute.contains(':') {
        return Err(PeerHabitError::validation(format!(
            "Invalid attribute name '{}'",
            attribute
        )));
    }
    Ok(format!(
        "{}-{}:{}",
        prefix,
        attribute.replace('_', "-"),
        robot_id
    ))
}

/// Display nickname
pub fn nickname() -> AttributeSpec<TextCodec> {
    AttributeSpec::new("nick", TextCodec)
}

/// Response probability
pub fn probability() -> AttributeSpec<FloatCodec> {
    AttributeSpec::new("prob", FloatCodec)
}

/// Mean of the simulated normal profile
pub fn mean() -> AttributeSpec<FloatCodec> {
    AttributeSpec::new("mean", FloatCodec)
}

/// Standard deviation of the simulated normal profile
pub fn sigma() -> AttributeSpec<FloatCodec> {
    AttributeSpec::new("sigma", FloatCodec)
}

/// Timestamp of the last first try
pub fn last_first_try() -> AttributeSpec<IntegerCodec> {
    AttributeSpec::new("last_first_try", IntegerCodec).with_default(0)
}

/// Timestamp of the last second try
pub fn last_second_try() -> AttributeSpec<IntegerCodec> {
    AttributeSpec::new("last_second_try", IntegerCodec).with_default(0)
}

/// Timestamp of the last feedback try
pub fn last_feedback_try() -> AttributeSpec<IntegerCodec> {
    AttributeSpec::new("last_feedback_try", IntegerCodec).with_default(0)
}

/// Absolute day that counts as day 0 for the robot
pub fn zero_day() -> AttributeSpec<IntegerCodec> {
    AttributeSpec::new("zero_day", IntegerCodec).with_default(DEFAULT_ZERO_DAY)
}

/// Signed streak counter
pub fn combo() -> AttributeSpec<IntegerCodec> {
    AttributeSpec::new("combo", IntegerCodec).with_default(0)
}

/// Score on an absolute day
pub fn score(absolute_day: i64) -> AttributeSpec<FloatCodec> {
    AttributeSpec::new(format!("score_of_{}", absolute_day), FloatCodec).with_default(0.0)
}

/// Response on an absolute day
pub fn response(absolute_day: i64) -> AttributeSpec<IntegerCodec> {
    AttributeSpec::new(format!("response_of_{}", absolute_day), IntegerCodec)
}

/// Feedback rating on an absolute day
pub fn feedback(absolute_day: i64) -> AttributeSpec<IntegerCodec> {
    AttributeSpec::new(format!("feedback_of_{}", absolute_day), IntegerCodec)
}

/// Partner context, encoded by an external codec
pub fn partner<C: ContextCodec>(codec: &C) -> AttributeSpec<PartnerCodec<'_, C>> {
    AttributeSpec::new("partner", PartnerCodec(codec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_normalizes_separators() {
        let a = storage_key("robot", "last_first_try", "robot:abc").unwrap();
        let b = storage_key("robot", "last-first-try", "robot:abc").unwrap();
        assert_eq!(a, "robot-last-first-try:robot:abc");
        assert_eq!(a, b);
    }

    #[test]
    fn test_storage_key_distinct_per_robot_and_day() {
        let a = storage_key("robot", score(3).name(), "robot:a").unwrap();
        let b = storage_key("robot", score(3).name(), "robot:b").unwrap();
        let c = storage_key("robot", score(4).name(), "robot:a").unwrap();
        let d = storage_key("robot", response(3).name(), "robot:a").unwrap();
        assert_eq!(a, "robot-score-of-3:robot:a");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_storage_key_rejects_colon() {
        assert!(storage_key("robot", "bad:name", "robot:a").is_err());
        assert!(storage_key("robot", "", "robot:a").is_err());
    }

    #[test]
    fn test_codecs() {
        assert_eq!(FloatCodec.decode(" 0.75 ").unwrap(), 0.75);
        assert!(FloatCodec.decode("abc").is_err());
        assert_eq!(IntegerCodec.decode("-3").unwrap(), -3);
        assert!(IntegerCodec.decode("3.5").is_err());
        assert_eq!(TextCodec.decode("Fox").unwrap(), "Fox");
        assert_eq!(IntegerCodec.encode(&42).unwrap(), "42");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(last_first_try().default_value(), Some(&0));
        assert_eq!(zero_day().default_value(), Some(&DEFAULT_ZERO_DAY));
        assert_eq!(combo().default_value(), Some(&0));
        assert_eq!(score(1).default_value(), Some(&0.0));
        assert!(probability().default_value().is_none());
        assert!(response(1).default_value().is_none());
        assert_eq!(CodecKind::Integer.to_string(), "integer");
    }
}
