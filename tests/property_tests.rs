//! Property-based tests for the condition builder and value types

use proptest::prelude::*;
use record_mapper::prelude::*;

// ============================================================================
// Condition Builder Properties
// ============================================================================

/// A valid non-IN condition with an arbitrary scalar value
fn scalar_condition() -> impl Strategy<Value = Condition> {
    (
        "[a-z][a-z0-9_]{0,10}",
        prop_oneof![Just("="), Just("!="), Just("<"), Just(">")],
        prop_oneof![
            any::<i64>().prop_map(Value::Integer),
            any::<f64>().prop_filter("finite", |v| v.is_finite()).prop_map(Value::Real),
            "[a-zA-Z0-9 ]{0,20}".prop_map(Value::Text),
        ],
    )
        .prop_map(|(column, operator, value)| Condition::new(column, operator, value))
}

/// An IN condition over a comma-joined element list; returns the condition
/// and its element count
fn in_condition() -> impl Strategy<Value = (Condition, usize)> {
    (
        "[a-z][a-z0-9_]{0,10}",
        prop::collection::vec("[a-zA-Z0-9]{1,8}", 1..6),
    )
        .prop_map(|(column, elements)| {
            let count = elements.len();
            (Condition::new(column, "IN", elements.join(",")), count)
        })
}

proptest! {
    /// Parameter count equals the sum of IN-list lengths plus one per
    /// other condition, and the clause holds exactly that many
    /// placeholders
    #[test]
    fn test_parameter_count_matches_placeholders(
        scalars in prop::collection::vec(scalar_condition(), 0..5),
        ins in prop::collection::vec(in_condition(), 0..3),
    ) {
        let expected: usize =
            scalars.len() + ins.iter().map(|(_, count)| count).sum::<usize>();

        let mut conditions = scalars;
        conditions.extend(ins.into_iter().map(|(c, _)| c));

        let (clause, params) = build_where(&conditions).unwrap();
        prop_assert_eq!(params.len(), expected);
        prop_assert_eq!(clause.matches('?').count(), expected);
    }

    /// Clauses are AND-joined: one separator fewer than conditions
    #[test]
    fn test_and_join_count(conditions in prop::collection::vec(scalar_condition(), 1..6)) {
        let (clause, _) = build_where(&conditions).unwrap();
        prop_assert_eq!(clause.matches(" AND ").count(), conditions.len() - 1);
    }

    /// Condition values never leak into SQL text, only placeholders do
    #[test]
    fn test_values_stay_bound(column in "[a-z]{1,8}", value in "[0-9]{5,10}") {
        let conditions = vec![Condition::new(column, "=", value.as_str())];
        let (clause, params) = build_where(&conditions).unwrap();
        prop_assert!(!clause.contains(&value));
        prop_assert_eq!(params.len(), 1);
    }

    /// Any operator outside the closed set is rejected before the store
    /// is touched
    #[test]
    fn test_unknown_operators_rejected(operator in "[A-Za-z]{2,10}") {
        prop_assume!(!VALID_OPERATORS.contains(&operator.as_str()));
        let conditions = vec![Condition::new("col", operator, "x")];
        let result = build_where(&conditions);
        // prop_assert! stringifies its expression, so keep the match
        // pattern out of it
        let rejected = matches!(result, Err(MapperError::InvalidOperator { .. }));
        prop_assert!(rejected);
    }

    /// IN splits on commas and trims whitespace around every element
    #[test]
    fn test_in_elements_trimmed(elements in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let padded = elements
            .iter()
            .map(|e| format!("  {e} "))
            .collect::<Vec<_>>()
            .join(",");
        let conditions = vec![Condition::new("col", "IN", padded)];

        let (_, params) = build_where(&conditions).unwrap();
        let texts: Vec<String> = params.iter().map(|p| p.as_string()).collect();
        prop_assert_eq!(texts, elements);
    }
}

// ============================================================================
// Empty Input
// ============================================================================

#[test]
fn test_empty_conditions_yield_empty_clause() {
    let (clause, params) = build_where(&[]).unwrap();
    assert_eq!(clause, "");
    assert_eq!(params.len(), 0);
}

// ============================================================================
// Value Properties
// ============================================================================

proptest! {
    /// Integer values roundtrip through accessors
    #[test]
    fn test_integer_roundtrip(value in any::<i64>()) {
        let val = Value::from(value);
        prop_assert_eq!(val.as_integer(), Some(value));
        prop_assert!(!val.is_null());
        prop_assert_eq!(val.type_name(), "integer");
    }

    /// Text values roundtrip through accessors
    #[test]
    fn test_text_roundtrip(value in ".*") {
        let val = Value::from(value.clone());
        prop_assert_eq!(val.as_string(), value);
        prop_assert_eq!(val.type_name(), "text");
    }

    /// Conversions never panic for any scalar
    #[test]
    fn test_conversions_no_panic(value in prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>().prop_filter("finite", |v| v.is_finite()).prop_map(Value::Real),
        ".*".prop_map(Value::Text),
    ]) {
        let _ = value.as_integer();
        let _ = value.as_real();
        let _ = value.as_str();
        let _ = value.as_string();
        let _ = value.type_name();
        let _ = value.is_null();
    }

    /// Serialization never panics
    #[test]
    fn test_json_serialization_no_panic(value in prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        any::<f64>().prop_filter("finite", |v| v.is_finite()).prop_map(Value::Real),
        ".*".prop_map(Value::Text),
    ]) {
        let result = serde_json::to_string(&value);
        prop_assert!(result.is_ok());
    }
}

// ============================================================================
// Coercion Properties
// ============================================================================

proptest! {
    /// Integer coercion accepts exactly what parses as i64
    #[test]
    fn test_integer_coercion_roundtrip(value in any::<i64>()) {
        let coerced = ScalarType::Integer.coerce(&value.to_string()).unwrap();
        prop_assert_eq!(coerced, Value::Integer(value));
    }

    /// Text coercion never fails
    #[test]
    fn test_text_coercion_total(raw in ".*") {
        prop_assert!(ScalarType::Text.coerce(&raw).is_ok());
    }

    /// Non-numeric text is rejected by numeric coercion
    #[test]
    fn test_integer_coercion_rejects_words(raw in "[a-zA-Z]{1,10}") {
        prop_assert!(ScalarType::Integer.coerce(&raw).is_err());
    }
}
