use std::marker::PhantomData;

use super::Paginator;
use crate::link::{build_link, link_base};
use crate::{
    BindingError, OffsetParams, Page, PaginationResult, QueryWindow, TRACING_TARGET_PAGINATION,
};

/// Page/limit pagination.
///
/// Windows a query with `LIMIT limit OFFSET limit * (page - 1)` and links to
/// the neighbouring page numbers. The total count is supplied by the caller,
/// so no rows are over-fetched.
#[derive(Debug, Clone)]
pub struct OffsetPaginator<T> {
    params: OffsetParams,
    _items: PhantomData<fn() -> T>,
}

impl<T> OffsetPaginator<T> {
    /// Creates a paginator from bound parameters.
    pub fn new(params: OffsetParams) -> Self {
        Self {
            params,
            _items: PhantomData,
        }
    }

    /// Returns the bound parameters.
    #[inline]
    pub fn params(&self) -> &OffsetParams {
        &self.params
    }

    /// Consumes the paginator and returns the bound parameters.
    #[inline]
    pub fn into_params(self) -> OffsetParams {
        self.params
    }

    /// Sets `LIMIT` and `OFFSET` on the query.
    ///
    /// Fails without touching the query when the offset overflows, which
    /// bound parameters never do.
    pub fn window_query<Q>(&self, query: &mut Q) -> PaginationResult<()>
    where
        Q: QueryWindow + ?Sized,
    {
        let offset = self.params.offset().ok_or(BindingError::OutOfRange {
            field: "page".into(),
            message: "is too large for the requested limit".into(),
        })?;

        query.set_limit(u64::from(self.params.limit));
        query.set_offset(offset);
        Ok(())
    }

    /// Builds the result envelope.
    ///
    /// `previous` is present when `page > 1`, `next` when `page` is below the
    /// total number of pages.
    pub fn build_result(&self, items: Vec<T>, total_count: u64) -> PaginationResult<Page<T>> {
        link_base(&self.params.base_url)?;

        let page = self.params.page;
        let total_pages = self.params.total_pages(total_count);

        let mut result = Page::new(items, total_count);

        if page > 1 {
            result.previous = Some(self.link(page - 1)?);
        }

        if page < total_pages {
            result.next = Some(self.link(page + 1)?);
        }

        tracing::trace!(
            target: TRACING_TARGET_PAGINATION,
            page,
            total_pages,
            total_count,
            has_previous = result.has_previous(),
            has_next = result.has_next(),
            "built offset page"
        );

        Ok(result)
    }

    fn link(&self, page: u64) -> PaginationResult<String> {
        build_link(
            &self.params.base_url,
            &[
                ("page", page.to_string()),
                ("limit", self.params.limit.to_string()),
            ],
            &self.params.client_params,
        )
    }
}

impl<T> Default for OffsetPaginator<T> {
    fn default() -> Self {
        Self::new(OffsetParams::default())
    }
}

impl<T> Paginator<T> for OffsetPaginator<T> {
    type Params = OffsetParams;

    fn from_params(params: OffsetParams) -> Self {
        Self::new(params)
    }

    fn params(&self) -> &OffsetParams {
        &self.params
    }

    fn window_query<Q>(&self, query: &mut Q) -> PaginationResult<()>
    where
        Q: QueryWindow + ?Sized,
    {
        OffsetPaginator::window_query(self, query)
    }

    fn build_result(&self, items: Vec<T>, total_count: u64) -> PaginationResult<Page<T>> {
        OffsetPaginator::build_result(self, items, total_count)
    }
}
