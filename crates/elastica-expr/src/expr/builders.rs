//! Builder functions for constructing expressions.

use crate::expr::core::Expr;

/// Combines expressions into one by concatenating their terms.
///
/// Duplicate variable terms are NOT merged; use `normalized_terms()` on the
/// result if consolidation is needed.
pub fn linear_sum<I>(exprs: I) -> Expr
where
    I: IntoIterator<Item = Expr>,
{
    exprs
        .into_iter()
        .fold(Expr::default(), |acc, expr| acc.add(&expr))
}
