//! Conditional visibility rule model.
//!
//! # Responsibility
//! - Describe when a field is shown or hidden based on other fields'
//!   current values.
//!
//! # Invariants
//! - A freshly created field carries `ConditionalLogic::default()`:
//!   disabled, `show`, `all`, no conditions.
//! - Unknown operator names survive a decode/encode cycle unchanged.
//! - `Condition::field_id` may dangle; evaluators treat it as absent.

use crate::model::field::FieldId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Visibility rule set for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalLogic {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub action: LogicAction,
    #[serde(default)]
    pub logic_type: LogicType,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Default for ConditionalLogic {
    fn default() -> Self {
        Self {
            enabled: false,
            action: LogicAction::Show,
            logic_type: LogicType::All,
            conditions: Vec::new(),
        }
    }
}

/// What to do with the field when the conditions are met.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicAction {
    #[default]
    Show,
    /// Any action other than `show` hides the field.
    #[serde(other)]
    Hide,
}

/// How individual condition results are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicType {
    #[default]
    All,
    /// Any combinator other than `all` is treated as `any`.
    #[serde(other)]
    Any,
}

/// One comparison against another field's current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub field_id: FieldId,
    #[serde(default)]
    pub operator: ConditionOperator,
    /// Comparison operand as entered in the editor.
    #[serde(default, deserialize_with = "operand_text")]
    pub value: String,
}

impl Condition {
    pub fn new(
        field_id: impl Into<FieldId>,
        operator: ConditionOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Comparison operator of a [`Condition`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ConditionOperator {
    #[default]
    Equals,
    NotEquals,
    Contains,
    NotContains,
    Empty,
    NotEmpty,
    GreaterThan,
    LessThan,
    /// Operator name this engine does not know; always evaluates true.
    Unknown(String),
}

impl ConditionOperator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::Empty => "empty",
            Self::NotEmpty => "not_empty",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::Unknown(name) => name.as_str(),
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "equals" => Self::Equals,
            "not_equals" => Self::NotEquals,
            "contains" => Self::Contains,
            "not_contains" => Self::NotContains,
            "empty" => Self::Empty,
            "not_empty" => Self::NotEmpty,
            "greater_than" => Self::GreaterThan,
            "less_than" => Self::LessThan,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Display for ConditionOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConditionOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConditionOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(raw.as_str()))
    }
}

/// Structured partial update for [`ConditionalLogic`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicPatch {
    pub enabled: Option<bool>,
    pub action: Option<LogicAction>,
    pub logic_type: Option<LogicType>,
    /// Replaces the whole condition list when set.
    pub conditions: Option<Vec<Condition>>,
}

impl LogicPatch {
    /// Shallow-merges this patch into `logic`.
    pub fn apply_to(self, logic: &mut ConditionalLogic) {
        if let Some(enabled) = self.enabled {
            logic.enabled = enabled;
        }
        if let Some(action) = self.action {
            logic.action = action;
        }
        if let Some(logic_type) = self.logic_type {
            logic.logic_type = logic_type;
        }
        if let Some(conditions) = self.conditions {
            logic.conditions = conditions;
        }
    }
}

/// Partial update for one [`Condition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionPatch {
    pub field_id: Option<FieldId>,
    pub operator: Option<ConditionOperator>,
    pub value: Option<String>,
}

impl ConditionPatch {
    pub fn apply_to(self, condition: &mut Condition) {
        if let Some(field_id) = self.field_id {
            condition.field_id = field_id;
        }
        if let Some(operator) = self.operator {
            condition.operator = operator;
        }
        if let Some(value) = self.value {
            condition.value = value;
        }
    }
}

fn operand_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    })
}
