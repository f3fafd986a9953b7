//! Parameterized SQL rendering
//!
//! Values always travel as `?` parameters. Identifiers are interpolated, so
//! every table and column name is checked first.

use serde::Serialize;

use super::QueryBuilder;
use crate::config::check_identifier;
use crate::errors::PaginationResult;
use crate::filter::{Clause, FilterTranslator};
use crate::planner::{FetchWindow, QueryContext, SortDirection};

/// Rendered statement with its ordered parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlQuery {
    pub sql: String,
    pub params: Vec<String>,
}

/// Builder state for a paginated `SELECT`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStatement {
    table: String,
    clause: Option<Clause>,
    order_column: Option<String>,
    fetch_direction: SortDirection,
    origin_direction: SortDirection,
    window: FetchWindow,
    limit: Option<u64>,
}

impl SelectStatement {
    /// Unbounded `SELECT *` over a table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            clause: None,
            order_column: None,
            fetch_direction: SortDirection::Asc,
            origin_direction: SortDirection::Asc,
            window: FetchWindow::Offset { offset: 0 },
            limit: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn clause(&self) -> Option<&Clause> {
        self.clause.as_ref()
    }

    pub fn window(&self) -> FetchWindow {
        self.window
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Render to SQL with `?` placeholders
    pub fn to_sql(&self) -> PaginationResult<SqlQuery> {
        check_identifier(&self.table)?;
        if let Some(column) = &self.order_column {
            check_identifier(column)?;
        }

        let mut params = Vec::new();
        let mut source = format!("SELECT * FROM {}", self.table);
        if let Some(clause) = &self.clause {
            source.push_str(" WHERE ");
            source.push_str(&render_clause(clause, &mut params)?);
        }

        let mut sql = match (self.window, &self.order_column) {
            (FetchWindow::Preceding { position }, Some(column)) => {
                let numbered = source.replacen(
                    "SELECT *",
                    &format!(
                        "SELECT *, ROW_NUMBER() OVER (ORDER BY {} {}) AS _position",
                        column,
                        self.origin_direction.as_sql()
                    ),
                    1,
                );
                params.push(position.to_string());
                format!(
                    "SELECT * FROM ({}) AS _window WHERE _position < ? ORDER BY _position DESC",
                    numbered
                )
            }
            (FetchWindow::Offset { .. }, Some(column)) => format!(
                "{} ORDER BY {} {}",
                source,
                column,
                self.fetch_direction.as_sql()
            ),
            (_, None) => source,
        };

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let FetchWindow::Offset { offset } = self.window {
            if offset > 0 {
                sql.push_str(&format!(" OFFSET {}", offset));
            }
        }

        Ok(SqlQuery { sql, params })
    }
}

fn render_clause(clause: &Clause, params: &mut Vec<String>) -> PaginationResult<String> {
    match clause {
        Clause::Comparison(cmp) => {
            check_identifier(&cmp.column)?;
            params.push(cmp.value.clone());
            Ok(format!("{} {} ?", cmp.column, cmp.operator))
        }
        Clause::And(children) => render_group(children, " AND ", params),
        Clause::Or(children) => render_group(children, " OR ", params),
        Clause::Not(inner) => Ok(format!("NOT ({})", render_clause(inner, params)?)),
    }
}

fn render_group(
    children: &[Clause],
    separator: &str,
    params: &mut Vec<String>,
) -> PaginationResult<String> {
    let parts = children
        .iter()
        .map(|child| render_clause(child, params))
        .collect::<PaginationResult<Vec<_>>>()?;
    Ok(format!("({})", parts.join(separator)))
}

/// Applies a compiled plan onto a [`SelectStatement`]
pub struct SqlQueryBuilder<'a> {
    plan: &'a QueryContext,
    translator: &'a FilterTranslator,
}

impl<'a> SqlQueryBuilder<'a> {
    pub fn new(plan: &'a QueryContext, translator: &'a FilterTranslator) -> Self {
        Self { plan, translator }
    }
}

impl QueryBuilder<SelectStatement> for SqlQueryBuilder<'_> {
    fn create_query(&self, mut builder: SelectStatement) -> PaginationResult<SelectStatement> {
        builder.clause = self.translator.translate(&self.plan.filters)?;
        builder.order_column = Some(self.translator.column(&self.plan.order_by)?);
        builder.fetch_direction = self.plan.order_direction;
        builder.origin_direction = self.plan.origin_direction();
        builder.window = self.plan.window();
        builder.limit = Some(self.plan.fetch_limit());
        Ok(builder)
    }
}
