use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use folio_core::BindParams;

use super::page_request;
use crate::{Error, PaginationConfig, TRACING_TARGET_EXTRACT};

/// Extractor for bound and validated pagination parameters.
///
/// Works with any [`BindParams`] type, typically [`OffsetParams`] or
/// [`CursorParams`]. Query parameters that are not pagination keys are
/// captured so that navigation links replay them. Invalid parameters are
/// rejected with a `400` [`Error`] before the handler runs.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::Json;
/// use folio_core::{CursorPaginator, CursorParams, Page};
/// use folio_server::{Paginated, Result};
/// use sea_query::{Alias, PostgresQueryBuilder, Query};
///
/// async fn list_doctors(
///     Paginated(params): Paginated<CursorParams>,
/// ) -> Result<Json<Page<String>>> {
///     let paginator = CursorPaginator::<String>::new(params);
///
///     let mut select = Query::select()
///         .column(Alias::new("id"))
///         .from(Alias::new("doctors"))
///         .to_owned();
///     paginator.window_query(&mut select);
///     let (_sql, _values) = select.build(PostgresQueryBuilder);
///     // Run the statement and build the page from its rows.
///     # Ok(Json(Page::empty()))
/// }
/// ```
///
/// [`OffsetParams`]: folio_core::OffsetParams
/// [`CursorParams`]: folio_core::CursorParams
#[must_use]
#[derive(Debug, Clone, Default, Deref, DerefMut, From)]
pub struct Paginated<P>(pub P);

impl<P> Paginated<P> {
    /// Creates a new [`Paginated`] wrapper around bound parameters.
    #[inline]
    pub fn new(inner: P) -> Self {
        Self(inner)
    }

    /// Consumes the wrapper and returns the bound parameters.
    #[inline]
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P, S> FromRequestParts<S> for Paginated<P>
where
    P: BindParams + Send,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<PaginationConfig>()
            .cloned()
            .unwrap_or_default();

        let request = page_request(parts, &config)?;
        let params = P::bind(&request).map_err(|error| {
            tracing::debug!(
                target: TRACING_TARGET_EXTRACT,
                path = %parts.uri.path(),
                error = %error,
                "rejected pagination request"
            );
            Error::from(error)
        })?;

        Ok(Self(params))
    }
}
