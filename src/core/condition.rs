//! WHERE-clause construction from structured filter predicates
//!
//! Conditions are implicitly AND-joined; there is no OR, grouping, or
//! nesting. Values always travel as bound parameters. Only column names
//! and the operator token, which is validated against a closed set before
//! anything touches the store, are interpolated into SQL text.

use super::error::{MapperError, Result, VALID_OPERATORS};
use super::value::Value;

/// One filter predicate: column, operator, value
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Column name
    pub column: String,
    /// Operator token, one of `=, !=, <, >, IN`
    pub operator: String,
    /// Comparison value. For `IN` this is a single comma-delimited string;
    /// a pre-split list is not accepted.
    pub value: Value,
}

impl Condition {
    /// Create a condition
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Build a parameterized WHERE clause from a condition list.
///
/// Returns the clause text (without the `WHERE` keyword) and the ordered
/// parameter values. An empty input yields an empty clause and no
/// parameters; callers must then omit the keyword entirely.
///
/// `IN` values are rendered to text, split on commas, and trimmed, with
/// one placeholder per element. Elements bind as text; numeric-key
/// columns still match through the store's column affinity, and text
/// keys that merely look numeric stay intact. Every other operator
/// emits `column OP ?` with a single parameter.
///
/// Fails with [`MapperError::InvalidOperator`] before any statement
/// executes when an operator falls outside the valid set.
pub fn build_where(conditions: &[Condition]) -> Result<(String, Vec<Value>)> {
    if conditions.is_empty() {
        return Ok((String::new(), Vec::new()));
    }

    let mut clauses = Vec::with_capacity(conditions.len());
    let mut params = Vec::with_capacity(conditions.len());

    for condition in conditions {
        if !VALID_OPERATORS.contains(&condition.operator.as_str()) {
            return Err(MapperError::invalid_operator(&condition.operator));
        }

        if condition.operator == "IN" {
            let rendered = condition.value.as_string();
            let elements: Vec<Value> = rendered
                .split(',')
                .map(|e| Value::Text(e.trim().to_string()))
                .collect();
            let placeholders = vec!["?"; elements.len()].join(", ");
            clauses.push(format!("{} IN ({})", condition.column, placeholders));
            params.extend(elements);
        } else {
            clauses.push(format!("{} {} ?", condition.column, condition.operator));
            params.push(condition.value.clone());
        }
    }

    Ok((clauses.join(" AND "), params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_conditions() {
        let (clause, params) = build_where(&[]).unwrap();
        assert_eq!(clause, "");
        assert!(params.is_empty());
    }

    #[test]
    fn test_single_condition() {
        let conditions = vec![Condition::new("base", "=", "JFK")];
        let (clause, params) = build_where(&conditions).unwrap();
        assert_eq!(clause, "base = ?");
        assert_eq!(params, vec![Value::Text("JFK".to_string())]);
    }

    #[test]
    fn test_multiple_conditions_and_joined() {
        let conditions = vec![
            Condition::new("airline", "=", "X"),
            Condition::new("pilot_id", ">", 10i64),
            Condition::new("pilot_id", "!=", 12i64),
        ];
        let (clause, params) = build_where(&conditions).unwrap();
        assert_eq!(clause, "airline = ? AND pilot_id > ? AND pilot_id != ?");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_in_splits_and_trims() {
        let conditions = vec![Condition::new("code", "IN", "JFK, LHR ,CDG")];
        let (clause, params) = build_where(&conditions).unwrap();
        assert_eq!(clause, "code IN (?, ?, ?)");
        assert_eq!(
            params,
            vec![
                Value::Text("JFK".to_string()),
                Value::Text("LHR".to_string()),
                Value::Text("CDG".to_string()),
            ]
        );
    }

    #[test]
    fn test_in_elements_stay_text() {
        // Keys that merely look numeric must not be re-typed, or TEXT
        // columns like "007" would never match
        let conditions = vec![Condition::new("code", "IN", "007, 1.50")];
        let (clause, params) = build_where(&conditions).unwrap();
        assert_eq!(clause, "code IN (?, ?)");
        assert_eq!(
            params,
            vec![
                Value::Text("007".to_string()),
                Value::Text("1.50".to_string()),
            ]
        );
    }

    #[test]
    fn test_in_single_element() {
        let conditions = vec![Condition::new("code", "IN", "JFK")];
        let (clause, params) = build_where(&conditions).unwrap();
        assert_eq!(clause, "code IN (?)");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_invalid_operator_rejected() {
        let conditions = vec![Condition::new("name", "LIKE", "J%")];
        let err = build_where(&conditions).unwrap_err();
        assert!(matches!(err, MapperError::InvalidOperator { .. }));
        assert!(err.to_string().contains("LIKE"));
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        let conditions = vec![
            Condition::new("a", "=", 1i64),
            Condition::new("b", "IN", "x,y,z"),
            Condition::new("c", "<", 5i64),
        ];
        let (clause, params) = build_where(&conditions).unwrap();
        assert_eq!(clause.matches('?').count(), params.len());
        assert_eq!(params.len(), 5);
    }
}
