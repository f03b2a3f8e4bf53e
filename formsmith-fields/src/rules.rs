//! Rule descriptors.
//!
//! On the wire a rule is `{ "type": kind, "params": [...] }`, where the last
//! positional parameter is the user-facing message. In memory every kind the
//! schema builder understands gets its own variant; anything else is kept as
//! [`Rule::Unknown`] and has no effect on validation. That includes elements
//! that are not rule objects at all, so one bad rule never costs the field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// A single declarative validation rule attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRule", into = "RawRule")]
pub enum Rule {
    /// Value must be present.
    Required { message: Option<String> },
    /// Minimum length for string fields, minimum value for number fields.
    Min { limit: f64, message: Option<String> },
    /// Maximum length for string fields, maximum value for number fields.
    Max { limit: f64, message: Option<String> },
    /// Value must look like an email address (string fields only).
    Email { message: Option<String> },
    /// Unrecognised kind, or a known kind with unusable params.
    Unknown { kind: String, params: Vec<Value> },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required {
            message: Some(message.into()),
        }
    }

    pub fn min(limit: f64, message: impl Into<String>) -> Self {
        Rule::Min {
            limit,
            message: Some(message.into()),
        }
    }

    pub fn max(limit: f64, message: impl Into<String>) -> Self {
        Rule::Max {
            limit,
            message: Some(message.into()),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Rule::Email {
            message: Some(message.into()),
        }
    }

    /// The wire tag of this rule.
    pub fn kind(&self) -> &str {
        match self {
            Rule::Required { .. } => "required",
            Rule::Min { .. } => "min",
            Rule::Max { .. } => "max",
            Rule::Email { .. } => "email",
            Rule::Unknown { kind, .. } => kind,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Rule::Required { .. })
    }

    /// The explicit message carried by the rule, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Rule::Required { message }
            | Rule::Min { message, .. }
            | Rule::Max { message, .. }
            | Rule::Email { message } => message.as_deref(),
            Rule::Unknown { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawRule {
    #[serde(rename = "type", alias = "kind")]
    kind: String,
    #[serde(default)]
    params: Vec<Value>,
}

/// Anything that can appear in a `validations` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireRule {
    Rule(RawRule),
    Malformed(Value),
}

impl From<WireRule> for Rule {
    fn from(wire: WireRule) -> Self {
        match wire {
            WireRule::Rule(raw) => raw.into(),
            WireRule::Malformed(value) => {
                warn!(%value, "malformed rule; ignoring it");
                Rule::Unknown {
                    kind: String::new(),
                    params: vec![value],
                }
            }
        }
    }
}

fn string_param(params: &[Value], index: usize) -> Option<String> {
    params.get(index).and_then(Value::as_str).map(str::to_string)
}

fn number_param(params: &[Value], index: usize) -> Option<f64> {
    match params.get(index)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        Value::from(n)
    }
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        let RawRule { kind, params } = raw;
        match kind.as_str() {
            "required" => Rule::Required {
                message: string_param(&params, 0),
            },
            "email" => Rule::Email {
                message: string_param(&params, 0),
            },
            "min" | "max" => match number_param(&params, 0) {
                Some(limit) if kind == "min" => Rule::Min {
                    limit,
                    message: string_param(&params, 1),
                },
                Some(limit) => Rule::Max {
                    limit,
                    message: string_param(&params, 1),
                },
                None => {
                    warn!(kind = %kind, ?params, "rule has no numeric limit; ignoring it");
                    Rule::Unknown { kind, params }
                }
            },
            _ => Rule::Unknown { kind, params },
        }
    }
}

impl From<Rule> for RawRule {
    fn from(rule: Rule) -> Self {
        let kind = rule.kind().to_string();
        let params = match rule {
            Rule::Required { message } | Rule::Email { message } => {
                message.into_iter().map(Value::from).collect()
            }
            Rule::Min { limit, message } | Rule::Max { limit, message } => {
                std::iter::once(number_value(limit))
                    .chain(message.map(Value::from))
                    .collect()
            }
            Rule::Unknown { params, .. } => params,
        };
        RawRule { kind, params }
    }
}
