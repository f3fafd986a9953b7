//! # Filter Translator
//!
//! Structural recursion from `FilterTree` to `Clause`.
//!
//! Empty combinators translate to nothing rather than to a constant, so they
//! leave any enclosing `and`/`or` untouched. A tree that constrains nothing
//! translates to `None`.

use super::ast::{CompoundFilter, Filter, FilterTree};
use super::clause::Clause;
use super::maps::{FieldMap, OperatorMap};
use crate::errors::PaginationResult;
use crate::observability::Event;

/// Translate a filter tree with the given maps.
pub fn translate(
    tree: &FilterTree,
    fields: &FieldMap,
    operators: &OperatorMap,
) -> PaginationResult<Option<Clause>> {
    Translation { fields, operators }.tree(tree)
}

/// Owns the maps used to translate filter trees
#[derive(Debug, Clone, Default)]
pub struct FilterTranslator {
    fields: FieldMap,
    operators: OperatorMap,
}

impl FilterTranslator {
    /// Create a translator
    pub fn new(fields: FieldMap, operators: OperatorMap) -> Self {
        Self { fields, operators }
    }

    /// Returns the field map
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Returns the operator map
    pub fn operators(&self) -> &OperatorMap {
        &self.operators
    }

    /// Translate a tree. `None` means the tree constrains nothing.
    pub fn translate(&self, tree: &FilterTree) -> PaginationResult<Option<Clause>> {
        let clause = translate(tree, &self.fields, &self.operators)?;

        tracing::debug!(
            event = %Event::FilterTranslated,
            leaves = tree.leaf_count(),
            comparisons = clause.as_ref().map_or(0, Clause::comparison_count),
            "filter translated"
        );

        Ok(clause)
    }

    /// Resolve the engine column for an order field
    pub fn column(&self, field: &str) -> PaginationResult<String> {
        self.fields.resolve(field).map(str::to_string)
    }
}

struct Translation<'a> {
    fields: &'a FieldMap,
    operators: &'a OperatorMap,
}

impl Translation<'_> {
    fn tree(&self, tree: &FilterTree) -> PaginationResult<Option<Clause>> {
        match tree {
            FilterTree::Leaf(filter) => self.leaf(filter).map(Some),
            FilterTree::Compound(compound) => self.compound(compound),
        }
    }

    fn leaf(&self, filter: &Filter) -> PaginationResult<Clause> {
        let column = self.fields.resolve(&filter.field)?;
        let operator = self.operators.resolve(&filter.operator)?;
        Ok(Clause::comparison(column, operator, filter.value.as_str()))
    }

    fn compound(&self, compound: &CompoundFilter) -> PaginationResult<Option<Clause>> {
        let mut parts = Vec::with_capacity(3);

        if let Some(children) = &compound.and {
            parts.extend(join(self.children(children)?, Clause::And));
        }
        if let Some(children) = &compound.or {
            parts.extend(join(self.children(children)?, Clause::Or));
        }
        if let Some(children) = &compound.not {
            parts.extend(
                join(self.children(children)?, Clause::And)
                    .map(|inner| Clause::Not(Box::new(inner))),
            );
        }

        Ok(join(parts, Clause::And))
    }

    fn children(&self, children: &[FilterTree]) -> PaginationResult<Vec<Clause>> {
        let mut clauses = Vec::with_capacity(children.len());
        for child in children {
            if let Some(clause) = self.tree(child)? {
                clauses.push(clause);
            }
        }
        Ok(clauses)
    }
}

/// Combine clauses with a connective, collapsing zero or one child
fn join(mut clauses: Vec<Clause>, connective: fn(Vec<Clause>) -> Clause) -> Option<Clause> {
    match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(connective(clauses)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PaginationError;

    fn translator() -> FilterTranslator {
        FilterTranslator::new(
            FieldMap::new()
                .with("age", "user_age")
                .with("status", "account_status"),
            OperatorMap::empty()
                .with("gt", ">")
                .with("lt", "<")
                .with("eq", "="),
        )
    }

    #[derive(Clone, Default)]
    struct Capture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_translation_logged_at_debug() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            translator()
                .translate(&FilterTree::leaf("age", "gt", "30"))
                .unwrap();
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("DEBUG"));
        assert!(output.contains("filter translated"));
    }

    #[test]
    fn test_and_of_two_comparisons() {
        let tree = FilterTree::and(vec![
            FilterTree::leaf("age", "gt", "18"),
            FilterTree::leaf("age", "lt", "65"),
        ]);

        let clause = translator().translate(&tree).unwrap();

        assert_eq!(
            clause,
            Some(Clause::And(vec![
                Clause::comparison("user_age", ">", "18"),
                Clause::comparison("user_age", "<", "65"),
            ]))
        );
    }

    #[test]
    fn test_empty_or_is_noop() {
        assert_eq!(translator().translate(&FilterTree::or(vec![])).unwrap(), None);
    }

    #[test]
    fn test_empty_or_under_and_leaves_siblings() {
        let tree = FilterTree::and(vec![
            FilterTree::leaf("age", "gt", "18"),
            FilterTree::or(vec![]),
        ]);

        let clause = translator().translate(&tree).unwrap();
        assert_eq!(clause, Some(Clause::comparison("user_age", ">", "18")));
    }

    #[test]
    fn test_empty_and_under_or_leaves_siblings() {
        let tree = FilterTree::or(vec![
            FilterTree::and(vec![]),
            FilterTree::leaf("status", "eq", "active"),
            FilterTree::leaf("status", "eq", "pending"),
        ]);

        let clause = translator().translate(&tree).unwrap();
        assert_eq!(
            clause,
            Some(Clause::Or(vec![
                Clause::comparison("account_status", "=", "active"),
                Clause::comparison("account_status", "=", "pending"),
            ]))
        );
    }

    #[test]
    fn test_not_negates_conjunction() {
        let tree = FilterTree::not(vec![
            FilterTree::leaf("age", "gt", "18"),
            FilterTree::leaf("status", "eq", "banned"),
        ]);

        let clause = translator().translate(&tree).unwrap();
        assert_eq!(
            clause,
            Some(Clause::Not(Box::new(Clause::And(vec![
                Clause::comparison("user_age", ">", "18"),
                Clause::comparison("account_status", "=", "banned"),
            ]))))
        );
    }

    #[test]
    fn test_empty_not_is_noop() {
        assert_eq!(translator().translate(&FilterTree::not(vec![])).unwrap(), None);
    }

    #[test]
    fn test_multiple_keys_combine_with_and() {
        let tree = FilterTree::Compound(CompoundFilter {
            and: Some(vec![FilterTree::leaf("age", "gt", "18")]),
            or: Some(vec![
                FilterTree::leaf("status", "eq", "a"),
                FilterTree::leaf("status", "eq", "b"),
            ]),
            not: None,
        });

        let clause = translator().translate(&tree).unwrap().unwrap();
        match clause {
            Clause::And(parts) => {
                assert_eq!(parts.len(), 2);
                assert!(matches!(parts[0], Clause::Comparison(_)));
                assert!(matches!(parts[1], Clause::Or(_)));
            }
            other => panic!("expected And, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_fails() {
        let err = translator()
            .translate(&FilterTree::leaf("email", "eq", "x"))
            .unwrap_err();
        assert_eq!(err, PaginationError::UnknownField("email".into()));
    }

    #[test]
    fn test_unknown_operator_fails_deep_in_tree() {
        let tree = FilterTree::and(vec![
            FilterTree::leaf("age", "gt", "18"),
            FilterTree::or(vec![FilterTree::leaf("age", "between", "1,2")]),
        ]);

        let err = translator().translate(&tree).unwrap_err();
        assert_eq!(err, PaginationError::UnknownOperator("between".into()));
    }

    #[test]
    fn test_free_function_matches_translator() {
        let tree = FilterTree::leaf("age", "lt", "65");
        let t = translator();
        assert_eq!(
            translate(&tree, t.fields(), t.operators()).unwrap(),
            t.translate(&tree).unwrap()
        );
    }
}
