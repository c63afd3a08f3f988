use super::{BindParams, ClientParams, DEFAULT_LIMIT, RawWindow, SortOrder};
use crate::cursor::Cursor;
use crate::{PageRequest, PaginationResult, TRACING_TARGET_PAGINATION, validate_base_url};

/// Keyset pagination parameters.
///
/// This is the preferred pagination method for API endpoints: results stay
/// stable when rows are inserted or removed between requests, and the cost
/// of a page does not grow with its depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorParams {
    /// Decoded cursor, `None` for an unbounded first page.
    pub cursor: Option<Cursor>,
    /// Traversal direction.
    pub ordering: SortOrder,
    /// Maximum number of items per page, in `1..=100`.
    pub limit: u32,
    /// Scheme, host and path navigation links are built from.
    pub base_url: String,
    /// Non-pagination query pairs replayed onto navigation links.
    pub client_params: ClientParams,
}

impl CursorParams {
    /// Creates parameters for an unbounded first page.
    pub fn new(ordering: SortOrder, limit: u32, base_url: impl Into<String>) -> Self {
        Self {
            cursor: None,
            ordering,
            limit,
            base_url: base_url.into(),
            client_params: ClientParams::new(),
        }
    }

    /// Starts the page after (or before) the given cursor.
    pub fn with_cursor(mut self, cursor: Cursor) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Replaces the captured client parameters.
    pub fn with_client_params(mut self, client_params: ClientParams) -> Self {
        self.client_params = client_params;
        self
    }

    /// Returns whether the page is bounded by a cursor.
    #[inline]
    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    /// Returns the identifier of the boundary row, if any.
    #[inline]
    pub fn boundary(&self) -> Option<&str> {
        self.cursor.as_ref().map(Cursor::identifier)
    }

    /// Returns the number of rows to fetch: the limit plus one extra row
    /// that reveals whether another page exists.
    #[inline]
    pub fn fetch_limit(&self) -> u64 {
        u64::from(self.limit) + 1
    }
}

impl Default for CursorParams {
    fn default() -> Self {
        Self::new(SortOrder::default(), DEFAULT_LIMIT, String::new())
    }
}

impl BindParams for CursorParams {
    const KEYS: &'static [&'static str] = &["cursor", "ordering", "limit"];

    fn bind(request: &PageRequest) -> PaginationResult<Self> {
        let mut query = request.query_params()?;
        let window = RawWindow::bind(&query, false).inspect_err(|error| {
            tracing::debug!(
                target: TRACING_TARGET_PAGINATION,
                error = %error,
                "rejected cursor pagination parameters"
            );
        })?;

        let ordering = match query.get("ordering").filter(|value| !value.is_empty()) {
            Some(token) => SortOrder::parse(token)?,
            None => SortOrder::default(),
        };

        let cursor = match query.get("cursor").filter(|value| !value.is_empty()) {
            Some(token) => Some(Cursor::decode(token)?),
            None => None,
        };

        for key in Self::KEYS {
            query.remove(key);
        }

        let params = Self {
            cursor,
            ordering,
            limit: window.limit(),
            base_url: request.base_url(),
            client_params: query,
        };

        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> PaginationResult<()> {
        validate_base_url(&self.base_url)?;
        Ok(())
    }
}
