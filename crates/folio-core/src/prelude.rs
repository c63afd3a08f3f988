//! Prelude module for folio-core.
//!
//! Re-exports the types and traits needed to bind parameters, window a
//! query and build a result page with a single `use` statement.
//!
//! # Example
//!
//! ```rust
//! use folio_core::prelude::*;
//! use sea_query::{Alias, Asterisk, Query};
//!
//! # fn example() -> PaginationResult<()> {
//! let request = PageRequest::parse("http://example.com/doctors?page=2&limit=5")?;
//! let paginator = <OffsetPaginator<u32> as Paginator<u32>>::bind(&request)?;
//!
//! let mut select = Query::select()
//!     .column(Asterisk)
//!     .from(Alias::new("doctors"))
//!     .to_owned();
//! paginator.window_query(&mut select)?;
//!
//! let page = paginator.build_result(vec![6, 7, 8, 9, 10], 12)?;
//! assert!(page.has_previous());
//! assert!(page.has_next());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// Parameters
pub use crate::params::{
    BindParams, ClientParams, CursorParams, DEFAULT_LIMIT, MAX_LIMIT, OffsetParams, SortOrder,
};
// Paginators and results
pub use crate::paginator::{CursorPaginator, OffsetPaginator, PageEntity, Paginator};
pub use crate::cursor::Cursor;
pub use crate::{Page, PageRequest};
// Query windowing
pub use crate::query::{KeyComparison, QueryWindow, count_query};
// Error types
pub use crate::{PaginationError, PaginationResult};
