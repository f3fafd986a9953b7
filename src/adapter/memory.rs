//! In-memory row source over JSON documents
//!
//! Rows are JSON objects keyed by engine column. Used by the CLI and by
//! tests that exercise the full pipeline without a database.

use std::cmp::Ordering;

use serde_json::Value;

use super::{RowQuery, RowSource};
use crate::errors::{PaginationError, PaginationResult};
use crate::filter::{Clause, Comparison};
use crate::planner::{FetchWindow, SortDirection};

/// Row source holding its rows in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<Value>,
}

impl MemorySource {
    pub fn new(rows: Vec<Value>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Matching rows in origin order
    fn ordered(&self, query: &RowQuery<'_>) -> PaginationResult<Vec<&Value>> {
        let mut matched = Vec::new();
        for row in &self.rows {
            let keep = match query.clause {
                Some(clause) => matches_clause(row, clause)?,
                None => true,
            };
            if keep {
                matched.push(row);
            }
        }

        // Stable ascending sort; a descending origin is its exact mirror,
        // so ties reverse too
        let column = query.order_column;
        matched.sort_by(|a, b| compare_values(a.get(column), b.get(column)));
        if query.plan.origin_direction() == SortDirection::Desc {
            matched.reverse();
        }

        Ok(matched)
    }
}

impl RowSource for MemorySource {
    type Row = Value;
    type Error = PaginationError;

    fn fetch(&self, query: RowQuery<'_>) -> PaginationResult<Vec<Value>> {
        let ordered = self.ordered(&query)?;
        let take = usize::try_from(query.plan.fetch_limit()).unwrap_or(usize::MAX);

        let rows = match query.plan.window() {
            FetchWindow::Offset { offset } => {
                let skip = usize::try_from(offset).unwrap_or(usize::MAX);
                ordered.into_iter().skip(skip).take(take).cloned().collect()
            }
            FetchWindow::Preceding { position } => {
                let before = usize::try_from(position.saturating_sub(1))
                    .unwrap_or(usize::MAX)
                    .min(ordered.len());
                ordered[..before]
                    .iter()
                    .rev()
                    .take(take)
                    .map(|row| (*row).clone())
                    .collect()
            }
        };

        Ok(rows)
    }
}

fn matches_clause(row: &Value, clause: &Clause) -> PaginationResult<bool> {
    match clause {
        Clause::Comparison(cmp) => matches_comparison(row, cmp),
        Clause::And(children) => {
            for child in children {
                if !matches_clause(row, child)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Clause::Or(children) => {
            for child in children {
                if matches_clause(row, child)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Clause::Not(inner) => Ok(!matches_clause(row, inner)?),
    }
}

fn matches_comparison(row: &Value, cmp: &Comparison) -> PaginationResult<bool> {
    let field = match row.get(&cmp.column).and_then(as_text) {
        Some(text) => text,
        None => {
            // Still reject operators nothing can evaluate
            check_operator(&cmp.operator)?;
            return Ok(false);
        }
    };

    let matched = match cmp.operator.as_str() {
        "=" => compare_text(&field, &cmp.value) == Ordering::Equal,
        "<>" => compare_text(&field, &cmp.value) != Ordering::Equal,
        ">" => compare_text(&field, &cmp.value) == Ordering::Greater,
        ">=" => compare_text(&field, &cmp.value) != Ordering::Less,
        "<" => compare_text(&field, &cmp.value) == Ordering::Less,
        "<=" => compare_text(&field, &cmp.value) != Ordering::Greater,
        op if op.eq_ignore_ascii_case("LIKE") => matches_like_pattern(&field, &cmp.value),
        other => return Err(PaginationError::UnknownOperator(other.to_string())),
    };

    Ok(matched)
}

fn check_operator(operator: &str) -> PaginationResult<()> {
    match operator {
        "=" | "<>" | ">" | ">=" | "<" | "<=" => Ok(()),
        op if op.eq_ignore_ascii_case("LIKE") => Ok(()),
        other => Err(PaginationError::UnknownOperator(other.to_string())),
    }
}

/// Scalar text of a JSON value; null has none
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Numeric if both sides are numbers, boolean if both are booleans,
/// otherwise lexicographic
fn compare_text(a: &str, b: &str) -> Ordering {
    if let (Some(a_n), Some(b_n)) = (finite(a), finite(b)) {
        if let Some(ordering) = a_n.partial_cmp(&b_n) {
            return ordering;
        }
    }
    if let (Ok(a_b), Ok(b_b)) = (a.parse::<bool>(), b.parse::<bool>()) {
        return a_b.cmp(&b_b);
    }
    a.cmp(b)
}

/// Parses a finite number; `NaN` and infinities stay text
fn finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Compare two JSON values for ordering: type first, then value.
/// Missing values sort first.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a_val), Some(b_val)) => {
            let type_order = |v: &Value| -> u8 {
                match v {
                    Value::Null => 0,
                    Value::Bool(_) => 1,
                    Value::Number(_) => 2,
                    Value::String(_) => 3,
                    Value::Array(_) => 4,
                    Value::Object(_) => 5,
                }
            };

            let a_type = type_order(a_val);
            let b_type = type_order(b_val);
            if a_type != b_type {
                return a_type.cmp(&b_type);
            }

            match (a_val, b_val) {
                (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                (Value::Number(a_n), Value::Number(b_n)) => {
                    let a_f = a_n.as_f64().unwrap_or(0.0);
                    let b_f = b_n.as_f64().unwrap_or(0.0);
                    a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                }
                (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
                _ => a_val.to_string().cmp(&b_val.to_string()),
            }
        }
    }
}

/// SQL LIKE: `%` matches any run, `_` exactly one character
fn matches_like_pattern(value: &str, pattern: &str) -> bool {
    let value: Vec<char> = value.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    like(&value, &pattern)
}

fn like(value: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => value.is_empty(),
        Some(('%', rest)) => (0..=value.len()).any(|i| like(&value[i..], rest)),
        Some(('_', rest)) => !value.is_empty() && like(&value[1..], rest),
        Some((c, rest)) => value.first() == Some(c) && like(&value[1..], rest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaginationConfig;
    use crate::cursor::{Base64JsonCodec, CursorCodec, CursorState};
    use crate::filter::FilterTree;
    use crate::planner::{InputArgs, QueryContext, QueryContextCompiler};
    use serde_json::json;

    fn source() -> MemorySource {
        MemorySource::new(vec![
            json!({"id": 3, "name": "carol", "age": 41, "active": true}),
            json!({"id": 1, "name": "alice", "age": 17, "active": false}),
            json!({"id": 5, "name": "eve", "age": 70}),
            json!({"id": 2, "name": "bob", "age": 30, "active": true}),
            json!({"id": 4, "name": "dave", "age": null, "active": false}),
        ])
    }

    fn plan(args: InputArgs) -> QueryContext {
        let config = PaginationConfig::default();
        QueryContextCompiler::new(&config, &Base64JsonCodec)
            .compile(&args)
            .unwrap()
    }

    fn ids(rows: &[Value]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    fn fetch(plan: &QueryContext, clause: Option<&Clause>) -> Vec<Value> {
        source()
            .fetch(RowQuery {
                plan,
                clause,
                order_column: "id",
            })
            .unwrap()
    }

    #[test]
    fn test_offset_window_in_origin_order() {
        let plan = plan(InputArgs::new().with_first(2));
        assert_eq!(ids(&fetch(&plan, None)), vec![1, 2, 3]);
    }

    #[test]
    fn test_tail_window_reads_descending() {
        let plan = plan(InputArgs::new().with_last(2));
        assert_eq!(ids(&fetch(&plan, None)), vec![5, 4, 3]);
    }

    #[test]
    fn test_preceding_window_nearest_first() {
        let token = Base64JsonCodec
            .encode(&CursorState::new(
                SortDirection::Asc,
                "id",
                4,
                FilterTree::default(),
            ))
            .unwrap();
        let plan = plan(InputArgs::new().with_last(2).with_before(token));
        assert_eq!(ids(&fetch(&plan, None)), vec![3, 2, 1]);
    }

    #[test]
    fn test_numeric_comparison() {
        let plan = plan(InputArgs::new());
        let clause = Clause::comparison("age", ">", "18");
        // "70" > "18" numerically; "eve" row included, null age excluded
        assert_eq!(ids(&fetch(&plan, Some(&clause))), vec![2, 3, 5]);
    }

    #[test]
    fn test_boolean_and_missing_fields() {
        let plan = plan(InputArgs::new());
        let clause = Clause::comparison("active", "=", "true");
        assert_eq!(ids(&fetch(&plan, Some(&clause))), vec![2, 3]);

        let negated = Clause::Not(Box::new(clause));
        // Missing `active` never matches, so NOT of it does
        assert_eq!(ids(&fetch(&plan, Some(&negated))), vec![1, 4, 5]);
    }

    #[test]
    fn test_compound_clauses() {
        let plan = plan(InputArgs::new());
        let clause = Clause::Or(vec![
            Clause::comparison("age", "<", "18"),
            Clause::And(vec![
                Clause::comparison("age", ">=", "30"),
                Clause::comparison("age", "<=", "41"),
            ]),
        ]);
        assert_eq!(ids(&fetch(&plan, Some(&clause))), vec![1, 2, 3]);
    }

    #[test]
    fn test_like_pattern() {
        assert!(matches_like_pattern("alice", "a%"));
        assert!(matches_like_pattern("alice", "%ic%"));
        assert!(matches_like_pattern("bob", "b_b"));
        assert!(!matches_like_pattern("bob", "b_"));
        assert!(matches_like_pattern("", "%"));
        assert!(!matches_like_pattern("carol", "a%"));

        let plan = plan(InputArgs::new());
        let clause = Clause::comparison("name", "LIKE", "%e");
        assert_eq!(ids(&fetch(&plan, Some(&clause))), vec![1, 4, 5]);
    }

    #[test]
    fn test_unknown_engine_operator() {
        let plan = plan(InputArgs::new());
        let clause = Clause::comparison("age", "~", "1");
        let err = source()
            .fetch(RowQuery {
                plan: &plan,
                clause: Some(&clause),
                order_column: "id",
            })
            .unwrap_err();
        assert_eq!(err, PaginationError::UnknownOperator("~".into()));
    }

    #[test]
    fn test_nan_is_not_a_number_match() {
        let plan = plan(InputArgs::new());
        let ages = MemorySource::new(vec![
            json!({"id": 1, "age": 10}),
            json!({"id": 2, "age": 20}),
        ]);
        let clause = Clause::comparison("age", "=", "NaN");
        let rows = ages
            .fetch(RowQuery {
                plan: &plan,
                clause: Some(&clause),
                order_column: "id",
            })
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_infinities_compare_as_text() {
        let plan = plan(InputArgs::new());
        let names = MemorySource::new(vec![
            json!({"id": 1, "name": "Infinity"}),
            json!({"id": 2, "name": "bob"}),
        ]);
        let clause = Clause::comparison("name", "=", "inf");
        let rows = names
            .fetch(RowQuery {
                plan: &plan,
                clause: Some(&clause),
                order_column: "id",
            })
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(compare_text("inf", "Infinity"), "inf".cmp("Infinity"));
        assert_eq!(compare_text("2", "10"), Ordering::Less);
    }

    #[test]
    fn test_tail_order_mirrors_head_order_on_ties() {
        let tied = MemorySource::new(vec![
            json!({"id": 1, "k": 1}),
            json!({"id": 2, "k": 1}),
        ]);
        let fetch_tied = |plan: &QueryContext| {
            tied.fetch(RowQuery {
                plan,
                clause: None,
                order_column: "k",
            })
            .unwrap()
        };

        let head = plan(InputArgs::new().with_first(2));
        let tail = plan(InputArgs::new().with_last(2));
        assert_eq!(ids(&fetch_tied(&head)), vec![1, 2]);
        assert_eq!(ids(&fetch_tied(&tail)), vec![2, 1]);
    }

    #[test]
    fn test_compare_values_type_order() {
        assert_eq!(compare_values(None, Some(&json!(1))), Ordering::Less);
        assert_eq!(
            compare_values(Some(&json!(2)), Some(&json!(10))),
            Ordering::Less
        );
        assert_eq!(
            compare_values(Some(&json!(true)), Some(&json!("a"))),
            Ordering::Less
        );
    }
}
