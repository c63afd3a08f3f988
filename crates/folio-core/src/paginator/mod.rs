//! Offset and cursor paginators.
//!
//! Both strategies expose the same capability set: bind parameters from a
//! request, narrow a query to the requested window, and turn the fetched rows
//! into a [`Page`] with navigation links. Callers pick the strategy per
//! endpoint; paginators are short-lived values built for a single request.

mod cursor;
mod offset;

use std::borrow::Cow;

pub use cursor::CursorPaginator;
pub use offset::OffsetPaginator;

use crate::{BindParams, Page, PageRequest, PaginationResult, QueryWindow};

/// An item that can be paginated.
///
/// The identifier must be stable and consistent with the order of the key
/// column used for keyset pagination. It is the payload of cursor tokens.
pub trait PageEntity {
    /// Returns the identifier of this item.
    fn page_id(&self) -> Cow<'_, str>;
}

impl<T: PageEntity + ?Sized> PageEntity for &T {
    fn page_id(&self) -> Cow<'_, str> {
        (**self).page_id()
    }
}

/// A pagination strategy bound to one request.
pub trait Paginator<T>: Sized {
    /// Parameters this strategy binds from requests.
    type Params: BindParams;

    /// Creates a paginator from already bound parameters.
    fn from_params(params: Self::Params) -> Self;

    /// Returns the bound parameters.
    fn params(&self) -> &Self::Params;

    /// Binds and validates parameters from the request.
    fn bind(request: &PageRequest) -> PaginationResult<Self> {
        <Self::Params as BindParams>::bind(request).map(Self::from_params)
    }

    /// Narrows `query` to the window this page covers.
    fn window_query<Q>(&self, query: &mut Q) -> PaginationResult<()>
    where
        Q: QueryWindow + ?Sized;

    /// Builds the result envelope from the fetched rows and the total count.
    fn build_result(&self, items: Vec<T>, total_count: u64) -> PaginationResult<Page<T>>;
}
