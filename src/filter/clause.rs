//! Engine-neutral clause tree produced by the translator.

use serde::Serialize;

/// One engine-native comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Engine column
    pub column: String,
    /// Engine operator
    pub operator: String,
    /// Comparison value, unchanged from the request
    pub value: String,
}

impl Comparison {
    pub fn new(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// Translated filter clause.
///
/// Every `And`/`Or` node holds at least two children; single-child
/// combinators collapse into the child during translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Clause {
    Comparison(Comparison),
    And(Vec<Clause>),
    Or(Vec<Clause>),
    Not(Box<Clause>),
}

impl Clause {
    /// Create a comparison clause
    pub fn comparison(
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Clause::Comparison(Comparison::new(column, operator, value))
    }

    /// Number of comparisons in the clause
    pub fn comparison_count(&self) -> usize {
        match self {
            Clause::Comparison(_) => 1,
            Clause::And(children) | Clause::Or(children) => {
                children.iter().map(Clause::comparison_count).sum()
            }
            Clause::Not(inner) => inner.comparison_count(),
        }
    }

    /// Comparisons in left-to-right order
    pub fn comparisons(&self) -> Vec<&Comparison> {
        let mut out = Vec::new();
        self.collect_comparisons(&mut out);
        out
    }

    fn collect_comparisons<'a>(&'a self, out: &mut Vec<&'a Comparison>) {
        match self {
            Clause::Comparison(c) => out.push(c),
            Clause::And(children) | Clause::Or(children) => {
                for child in children {
                    child.collect_comparisons(out);
                }
            }
            Clause::Not(inner) => inner.collect_comparisons(out),
        }
    }
}
