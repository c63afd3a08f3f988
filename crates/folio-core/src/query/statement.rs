//! [`QueryWindow`] for `sea-query` select statements.

use sea_query::{
    Alias, Asterisk, ConditionalStatement, Expr, Func, Order, OrderedStatement, SelectStatement,
};

use super::{KeyComparison, QueryWindow};
use crate::SortOrder;

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// Column names are quoted by the query builder; values are bound as
/// parameters.
impl QueryWindow for SelectStatement {
    fn set_limit(&mut self, limit: u64) {
        self.limit(limit);
    }

    fn set_offset(&mut self, offset: u64) {
        self.offset(offset);
    }

    fn where_key(&mut self, column: &str, comparison: KeyComparison, value: &str) {
        let key = Expr::col(Alias::new(column));
        self.and_where(match comparison {
            KeyComparison::GreaterThan => key.gt(value),
            KeyComparison::LessThan => key.lt(value),
        });
    }

    fn order_by(&mut self, column: &str, order: SortOrder) {
        OrderedStatement::order_by(self, Alias::new(column), Order::from(order));
    }
}

/// Returns a `COUNT(*)` over the rows `select` filters, ignoring its
/// selected columns, ordering and window.
///
/// ```rust
/// use folio_core::query::count_query;
/// use sea_query::{Alias, Asterisk, Expr, PostgresQueryBuilder, Query};
///
/// let select = Query::select()
///     .column(Asterisk)
///     .from(Alias::new("doctors"))
///     .and_where(Expr::col(Alias::new("specialty_id")).eq("cardiology"))
///     .limit(10)
///     .to_owned();
///
/// let (sql, _values) = count_query(&select).build(PostgresQueryBuilder);
/// assert_eq!(
///     sql,
///     r#"SELECT COUNT(*) FROM "doctors" WHERE "specialty_id" = $1"#
/// );
/// ```
pub fn count_query(select: &SelectStatement) -> SelectStatement {
    let mut count = select.clone();
    count
        .clear_selects()
        .clear_order_by()
        .reset_limit()
        .reset_offset()
        .expr(Func::count(Expr::col(Asterisk)));
    count
}
