//! # Paginator
//!
//! End-to-end pipeline: compile → translate → fetch → assemble.

use crate::adapter::{RowQuery, RowSource};
use crate::assembler::{QueryResult, ResultAssembler};
use crate::config::PaginationConfig;
use crate::cursor::{Base64JsonCodec, CursorCodec};
use crate::errors::PaginationResult;
use crate::filter::FilterTranslator;
use crate::planner::{InputArgs, QueryContext, QueryContextCompiler};

/// Bundles configuration, codec and translator for repeated requests.
///
/// Stateless between calls; share one instance across threads.
#[derive(Debug, Clone)]
pub struct Paginator<C: CursorCodec = Base64JsonCodec> {
    config: PaginationConfig,
    codec: C,
    translator: FilterTranslator,
}

impl Paginator<Base64JsonCodec> {
    /// Paginator using the default cursor codec
    pub fn new(config: PaginationConfig) -> Self {
        Self::with_codec(config, Base64JsonCodec)
    }
}

impl<C: CursorCodec> Paginator<C> {
    /// Paginator using a custom cursor codec
    pub fn with_codec(config: PaginationConfig, codec: C) -> Self {
        let translator = config.translator();
        Self {
            config,
            codec,
            translator,
        }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn translator(&self) -> &FilterTranslator {
        &self.translator
    }

    /// Compile a request without fetching
    pub fn compile(&self, args: &InputArgs) -> PaginationResult<QueryContext> {
        QueryContextCompiler::new(&self.config, &self.codec).compile(args)
    }

    /// Fetch and assemble one page, returning rows as nodes
    pub fn page<S>(&self, source: &S, args: &InputArgs) -> Result<QueryResult<S::Row>, S::Error>
    where
        S: RowSource,
        S::Row: Clone,
    {
        self.page_with(source, args, |row| row)
    }

    /// Fetch and assemble one page, mapping rows through `transform`
    pub fn page_with<S, N, F>(
        &self,
        source: &S,
        args: &InputArgs,
        transform: F,
    ) -> Result<QueryResult<N>, S::Error>
    where
        S: RowSource,
        N: Clone,
        F: FnMut(S::Row) -> N,
    {
        let plan = self.compile(args)?;
        let clause = self.translator.translate(&plan.filters)?;
        let order_column = self.translator.column(&plan.order_by)?;

        let rows = source.fetch(RowQuery {
            plan: &plan,
            clause: clause.as_ref(),
            order_column: &order_column,
        })?;

        let page = ResultAssembler::new(&self.codec).assemble_with(rows, &plan, transform)?;
        Ok(page)
    }
}
