use super::{BindParams, ClientParams, DEFAULT_LIMIT, DEFAULT_PAGE, RawWindow};
use crate::{
    BindingError, PageRequest, PaginationResult, TRACING_TARGET_PAGINATION, validate_base_url,
};

/// Page/limit pagination parameters.
///
/// Use this when clients need to jump to arbitrary pages. For infinite
/// scroll or iteration over large tables, prefer [`CursorParams`].
///
/// [`CursorParams`]: super::CursorParams
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetParams {
    /// Requested page, starting at 1.
    pub page: u64,
    /// Maximum number of items per page, in `1..=100`.
    pub limit: u32,
    /// Scheme, host and path navigation links are built from.
    pub base_url: String,
    /// Non-pagination query pairs replayed onto navigation links.
    pub client_params: ClientParams,
}

impl OffsetParams {
    /// Creates parameters for the given page and limit.
    pub fn new(page: u64, limit: u32, base_url: impl Into<String>) -> Self {
        Self {
            page,
            limit,
            base_url: base_url.into(),
            client_params: ClientParams::new(),
        }
    }

    /// Replaces the captured client parameters.
    pub fn with_client_params(mut self, client_params: ClientParams) -> Self {
        self.client_params = client_params;
        self
    }

    /// Returns the number of rows to skip, or `None` when it does not fit
    /// in 64 bits.
    #[inline]
    pub fn offset(&self) -> Option<u64> {
        u64::from(self.limit).checked_mul(self.page.checked_sub(1)?)
    }

    /// Returns the total number of pages for `total_count` rows.
    #[inline]
    pub fn total_pages(&self, total_count: u64) -> u64 {
        total_count.div_ceil(u64::from(self.limit.max(1)))
    }
}

impl Default for OffsetParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT, String::new())
    }
}

impl BindParams for OffsetParams {
    const KEYS: &'static [&'static str] = &["page", "limit"];

    fn bind(request: &PageRequest) -> PaginationResult<Self> {
        let mut query = request.query_params()?;
        let window = RawWindow::bind(&query, true).inspect_err(|error| {
            tracing::debug!(
                target: TRACING_TARGET_PAGINATION,
                error = %error,
                "rejected offset pagination parameters"
            );
        })?;

        for key in Self::KEYS {
            query.remove(key);
        }

        let params = Self {
            page: window.page(),
            limit: window.limit(),
            base_url: request.base_url(),
            client_params: query,
        };

        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> PaginationResult<()> {
        if self.offset().is_none() {
            return Err(BindingError::OutOfRange {
                field: "page".into(),
                message: "is too large for the requested limit".into(),
            }
            .into());
        }

        validate_base_url(&self.base_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PaginationError, ValidationError};

    fn request(query: &str) -> PageRequest {
        PageRequest::new("http", "example.com", "/api/test").with_query(query)
    }

    #[test]
    fn bind_with_defaults() {
        let params = OffsetParams::bind(&request("")).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.base_url, "http://example.com/api/test");
        assert!(params.client_params.is_empty());
    }

    #[test]
    fn bind_strips_pagination_keys() {
        let params = OffsetParams::bind(&request("page=3&limit=20&filter=test&extra=value")).unwrap();
        assert_eq!(params.page, 3);
        assert_eq!(params.limit, 20);
        assert_eq!(params.client_params.get("page"), None);
        assert_eq!(params.client_params.get("limit"), None);
        assert_eq!(params.client_params.get("filter"), Some("test"));
        assert_eq!(params.client_params.get("extra"), Some("value"));
    }

    #[test]
    fn bind_first_value_wins() {
        let params = OffsetParams::bind(&request("page=2&page=5")).unwrap();
        assert_eq!(params.page, 2);
    }

    #[test]
    fn bind_rejects_zero_limit() {
        let error = OffsetParams::bind(&request("page=2&limit=0")).unwrap_err();
        assert!(matches!(
            error,
            PaginationError::Binding(BindingError::OutOfRange { .. })
        ));
    }

    #[test]
    fn bind_rejects_invalid_page() {
        for query in ["page=0", "page=-4", "page=two"] {
            let error = OffsetParams::bind(&request(query)).unwrap_err();
            assert!(matches!(error, PaginationError::Binding(_)), "{query}");
        }
    }

    #[test]
    fn bind_requires_host() {
        let request = PageRequest::new("http", "", "/api/test");
        assert_eq!(
            OffsetParams::bind(&request).unwrap_err(),
            PaginationError::Validation(ValidationError::BaseUrlRequired)
        );
    }

    #[test]
    fn bind_is_idempotent() {
        let request = request("page=2&limit=5&q=rust");
        assert_eq!(
            OffsetParams::bind(&request).unwrap(),
            OffsetParams::bind(&request).unwrap()
        );
    }

    #[test]
    fn bind_keeps_pages_beyond_u32() {
        let params = OffsetParams::bind(&request("page=5000000000&limit=10")).unwrap();
        assert_eq!(params.page, 5_000_000_000);
        assert_eq!(params.offset(), Some(49_999_999_990));
    }

    #[test]
    fn bind_rejects_offset_overflow() {
        let error = OffsetParams::bind(&request("page=9223372036854775807&limit=100")).unwrap_err();
        assert_eq!(
            error,
            PaginationError::Binding(BindingError::OutOfRange {
                field: "page".into(),
                message: "is too large for the requested limit".into(),
            })
        );
    }

    #[test]
    fn bind_rejects_malformed_query() {
        for query in ["filter=%FF&page=1&limit=1", "page=1&q=%zz"] {
            let error = OffsetParams::bind(&request(query)).unwrap_err();
            assert!(
                matches!(error, PaginationError::Binding(BindingError::MalformedQuery(_))),
                "{query}"
            );
        }
    }

    #[test]
    fn offset_and_total_pages() {
        let params = OffsetParams::new(1, 10, "http://example.com");
        assert_eq!(params.offset(), Some(0));
        assert_eq!(params.total_pages(25), 3);
        assert_eq!(params.total_pages(30), 3);
        assert_eq!(params.total_pages(31), 4);
        assert_eq!(params.total_pages(0), 0);

        let params = OffsetParams::new(3, 20, "http://example.com");
        assert_eq!(params.offset(), Some(40));

        let params = OffsetParams::new(0, 20, "http://example.com");
        assert_eq!(params.offset(), None);
    }
}
