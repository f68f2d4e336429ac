//! Conditional visibility.
//!
//! # Invariants
//! - Fields without enabled logic, or with no conditions, are visible.
//! - Unknown operators evaluate to `true`.
//! - A condition referencing the field itself reads an absent value.
//! - Numeric comparisons against `NaN` are `false`.

use crate::model::field::{Field, FieldId};
use crate::model::logic::{Condition, ConditionOperator, LogicAction, LogicType};
use crate::model::value::{number_or_nan, parse_number, text_or_empty, FieldValue};
use std::collections::BTreeMap;

/// Current runtime values keyed by field id.
pub type FormValues = BTreeMap<FieldId, FieldValue>;

/// Returns whether `field` is shown for the given `values`.
pub fn is_visible(field: &Field, values: &FormValues) -> bool {
    let Some(logic) = field.conditional_logic() else {
        return true;
    };
    if !logic.enabled || logic.conditions.is_empty() {
        return true;
    }

    let mut results = logic.conditions.iter().map(|condition| {
        let value = if condition.field_id == field.id() {
            None
        } else {
            values.get(&condition.field_id)
        };
        condition_holds(condition, value)
    });
    let met = match logic.logic_type {
        LogicType::All => results.all(|holds| holds),
        LogicType::Any => results.any(|holds| holds),
    };

    match logic.action {
        LogicAction::Show => met,
        LogicAction::Hide => !met,
    }
}

/// Evaluates a single condition against the referenced field's value.
pub fn condition_holds(condition: &Condition, value: Option<&FieldValue>) -> bool {
    match &condition.operator {
        ConditionOperator::Equals => text_or_empty(value) == condition.value,
        ConditionOperator::NotEquals => text_or_empty(value) != condition.value,
        ConditionOperator::Contains => contains_folded(value, &condition.value),
        ConditionOperator::NotContains => !contains_folded(value, &condition.value),
        ConditionOperator::Empty => value.map_or(true, FieldValue::is_empty),
        ConditionOperator::NotEmpty => value.map_or(false, |value| !value.is_empty()),
        ConditionOperator::GreaterThan => number_or_nan(value) > parse_number(&condition.value),
        ConditionOperator::LessThan => number_or_nan(value) < parse_number(&condition.value),
        ConditionOperator::Unknown(_) => true,
    }
}

fn contains_folded(value: Option<&FieldValue>, needle: &str) -> bool {
    text_or_empty(value)
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{condition_holds, is_visible, FormValues};
    use crate::model::field::{Control, Field, FieldBody, TextInput};
    use crate::model::logic::{
        Condition, ConditionOperator, ConditionalLogic, LogicAction, LogicType,
    };
    use crate::model::value::FieldValue;

    fn field_with(logic: ConditionalLogic) -> Field {
        Field::new(
            "target",
            FieldBody::Text(TextInput {
                control: Control::new("Target").with_logic(logic),
                placeholder: String::new(),
            }),
        )
    }

    fn values(pairs: &[(&str, FieldValue)]) -> FormValues {
        pairs
            .iter()
            .map(|(id, value)| (id.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn any_with_hide_hides_when_one_condition_holds() {
        let field = field_with(ConditionalLogic {
            enabled: true,
            action: LogicAction::Hide,
            logic_type: LogicType::Any,
            conditions: vec![
                Condition::new("a", ConditionOperator::Equals, "x"),
                Condition::new("b", ConditionOperator::NotEmpty, ""),
            ],
        });
        assert!(!is_visible(&field, &values(&[("b", FieldValue::text("set"))])));
        assert!(is_visible(&field, &values(&[])));
    }

    #[test]
    fn contains_ignores_case() {
        let condition = Condition::new("a", ConditionOperator::Contains, "HELLO");
        assert!(condition_holds(&condition, Some(&FieldValue::text("say hello there"))));
    }

    #[test]
    fn numeric_operators_fail_on_non_numbers() {
        let condition = Condition::new("a", ConditionOperator::GreaterThan, "5");
        assert!(condition_holds(&condition, Some(&FieldValue::Number(6.0))));
        assert!(condition_holds(&condition, Some(&FieldValue::text("7"))));
        assert!(!condition_holds(&condition, Some(&FieldValue::text("seven"))));
        assert!(!condition_holds(&condition, None));
    }

    #[test]
    fn empty_treats_zero_and_false_as_empty() {
        let condition = Condition::new("a", ConditionOperator::Empty, "ignored");
        assert!(condition_holds(&condition, Some(&FieldValue::Number(0.0))));
        assert!(condition_holds(&condition, Some(&FieldValue::Bool(false))));
        assert!(!condition_holds(&condition, Some(&FieldValue::text("x"))));
    }

    #[test]
    fn unknown_operator_holds() {
        let condition = Condition::new("a", ConditionOperator::parse("matches"), "x");
        assert!(condition_holds(&condition, None));
    }
}
