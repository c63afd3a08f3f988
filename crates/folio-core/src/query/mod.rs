//! Query-builder capability decorated by the paginators.
//!
//! The engine never executes queries. It only appends window clauses to a
//! builder owned by the caller, through the [`QueryWindow`] trait. The trait
//! is implemented for `sea_query::SelectStatement`.

mod statement;

pub use statement::count_query;

use crate::SortOrder;

/// Inequality applied to the key column relative to a cursor value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyComparison {
    /// `key > value`
    GreaterThan,
    /// `key < value`
    LessThan,
}

impl KeyComparison {
    /// Returns the comparison that walks away from a cursor in `order`.
    #[inline]
    pub fn after(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Self::GreaterThan,
            SortOrder::Desc => Self::LessThan,
        }
    }
}

/// A query builder that can be narrowed to a pagination window.
///
/// Implementations append clauses; they must not reorder or drop clauses
/// already added by the caller.
pub trait QueryWindow {
    /// Sets the maximum number of rows to return.
    fn set_limit(&mut self, limit: u64);

    /// Sets the number of rows to skip.
    fn set_offset(&mut self, offset: u64);

    /// Adds `column <cmp> value` to the filter.
    fn where_key(&mut self, column: &str, comparison: KeyComparison, value: &str);

    /// Orders rows by `column`.
    fn order_by(&mut self, column: &str, order: SortOrder);
}

impl<Q: QueryWindow + ?Sized> QueryWindow for &mut Q {
    fn set_limit(&mut self, limit: u64) {
        (**self).set_limit(limit);
    }

    fn set_offset(&mut self, offset: u64) {
        (**self).set_offset(offset);
    }

    fn where_key(&mut self, column: &str, comparison: KeyComparison, value: &str) {
        (**self).where_key(column, comparison, value);
    }

    fn order_by(&mut self, column: &str, order: SortOrder) {
        (**self).order_by(column, order);
    }
}
