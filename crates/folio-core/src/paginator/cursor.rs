use std::borrow::Cow;
use std::marker::PhantomData;

use super::{PageEntity, Paginator};
use crate::link::{build_link, link_base};
use crate::{
    CursorParams, KeyComparison, Page, PaginationResult, QueryWindow, SortOrder,
    TRACING_TARGET_PAGINATION, cursor,
};

/// Column ordered and filtered on when no other key column is configured.
pub const DEFAULT_KEY_COLUMN: &str = "id";

/// Keyset pagination over a unique, ordered key column.
///
/// The window filters on `key > cursor` (ascending) or `key < cursor`
/// (descending) and fetches one row past the limit to learn whether another
/// page exists. Items in the produced [`Page`] are always in ascending key
/// order, whichever direction was walked.
#[derive(Debug, Clone)]
pub struct CursorPaginator<T> {
    params: CursorParams,
    key_column: Cow<'static, str>,
    _items: PhantomData<fn() -> T>,
}

impl<T> CursorPaginator<T> {
    /// Creates a paginator keyed on [`DEFAULT_KEY_COLUMN`].
    pub fn new(params: CursorParams) -> Self {
        Self {
            params,
            key_column: Cow::Borrowed(DEFAULT_KEY_COLUMN),
            _items: PhantomData,
        }
    }

    /// Keys the window on a different column.
    ///
    /// The column name is written into the query verbatim and must not come
    /// from user input.
    pub fn with_key_column(mut self, column: impl Into<Cow<'static, str>>) -> Self {
        self.key_column = column.into();
        self
    }

    /// Returns the key column.
    #[inline]
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Returns the bound parameters.
    #[inline]
    pub fn params(&self) -> &CursorParams {
        &self.params
    }

    /// Consumes the paginator and returns the bound parameters.
    #[inline]
    pub fn into_params(self) -> CursorParams {
        self.params
    }

    /// Filters, orders and limits the query.
    ///
    /// The cursor was decoded when the parameters were bound, so windowing
    /// cannot fail.
    pub fn window_query<Q>(&self, query: &mut Q)
    where
        Q: QueryWindow + ?Sized,
    {
        let ordering = self.params.ordering;
        let boundary = self.params.boundary();

        if let Some(identifier) = boundary {
            query.where_key(&self.key_column, KeyComparison::after(ordering), identifier);
        }

        query.order_by(&self.key_column, ordering);
        query.set_limit(self.params.fetch_limit());

        tracing::trace!(
            target: TRACING_TARGET_PAGINATION,
            key_column = %self.key_column,
            ordering = %ordering,
            bounded = boundary.is_some(),
            fetch_limit = self.params.fetch_limit(),
            "windowed cursor query"
        );
    }

    fn link(&self, identifier: &str, ordering: SortOrder) -> PaginationResult<String> {
        build_link(
            &self.params.base_url,
            &[
                ("cursor", cursor::encode(identifier)),
                ("ordering", ordering.to_string()),
                ("limit", self.params.limit.to_string()),
            ],
            &self.params.client_params,
        )
    }
}

impl<T: PageEntity> CursorPaginator<T> {
    /// Builds the result envelope from rows fetched through
    /// [`window_query`](Self::window_query).
    ///
    /// Rows beyond the limit are dropped; their presence is what produces the
    /// `next` link. Descending rows are reversed into ascending order. The
    /// `previous` link walks backward from the first item and exists whenever
    /// the request was bounded by a cursor or walked backward; an empty page
    /// has no links.
    pub fn build_result(&self, mut items: Vec<T>, total_count: u64) -> PaginationResult<Page<T>> {
        link_base(&self.params.base_url)?;

        let limit = usize::try_from(self.params.limit).unwrap_or(usize::MAX);
        let has_more = items.len() > limit;
        items.truncate(limit);

        if self.params.ordering.is_desc() {
            items.reverse();
        }

        let mut previous = None;
        let mut next = None;

        if let (Some(first), Some(last)) = (items.first(), items.last()) {
            if self.params.has_cursor() || self.params.ordering.is_desc() {
                previous = Some(self.link(&first.page_id(), SortOrder::Desc)?);
            }

            if has_more {
                next = Some(self.link(&last.page_id(), SortOrder::Asc)?);
            }
        }

        tracing::trace!(
            target: TRACING_TARGET_PAGINATION,
            ordering = %self.params.ordering,
            items = items.len(),
            total_count,
            has_more,
            "built cursor page"
        );

        Ok(Page {
            items,
            total_count,
            previous,
            next,
        })
    }
}

impl<T> Default for CursorPaginator<T> {
    fn default() -> Self {
        Self::new(CursorParams::default())
    }
}

impl<T: PageEntity> Paginator<T> for CursorPaginator<T> {
    type Params = CursorParams;

    fn from_params(params: CursorParams) -> Self {
        Self::new(params)
    }

    fn params(&self) -> &CursorParams {
        &self.params
    }

    fn window_query<Q>(&self, query: &mut Q) -> PaginationResult<()>
    where
        Q: QueryWindow + ?Sized,
    {
        CursorPaginator::window_query(self, query);
        Ok(())
    }

    fn build_result(&self, items: Vec<T>, total_count: u64) -> PaginationResult<Page<T>> {
        CursorPaginator::build_result(self, items, total_count)
    }
}

#[cfg(test)]
mod tests {
    use sea_query::{
        Alias, Asterisk, ConditionalStatement, Expr, PostgresQueryBuilder, Query, SelectStatement,
        Value, Values,
    };
    use url::Url;

    use super::*;
    use crate::cursor::Cursor;
    use crate::{PageRequest, PaginationError, ValidationError};

    const BASE_URL: &str = "http://example.com/api";

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        id: String,
    }

    impl PageEntity for Row {
        fn page_id(&self) -> Cow<'_, str> {
            Cow::Borrowed(&self.id)
        }
    }

    fn rows(ids: impl IntoIterator<Item = u32>) -> Vec<Row> {
        ids.into_iter()
            .map(|id| Row { id: id.to_string() })
            .collect()
    }

    fn ids(page: &Page<Row>) -> Vec<&str> {
        page.items.iter().map(|row| row.id.as_str()).collect()
    }

    fn paginator(ordering: SortOrder, cursor: Option<&str>, limit: u32) -> CursorPaginator<Row> {
        let mut params = CursorParams::new(ordering, limit, BASE_URL);
        if let Some(identifier) = cursor {
            params = params.with_cursor(Cursor::new(identifier));
        }
        CursorPaginator::new(params)
    }

    fn select(table: &str) -> SelectStatement {
        Query::select()
            .column(Asterisk)
            .from(Alias::new(table))
            .to_owned()
    }

    fn link_query(link: &str) -> Vec<(String, String)> {
        Url::parse(link)
            .unwrap()
            .query_pairs()
            .into_owned()
            .collect()
    }

    fn link_cursor(link: &str) -> String {
        let (_, token) = link_query(link)
            .into_iter()
            .find(|(key, _)| key == "cursor")
            .unwrap();
        cursor::decode(&token).unwrap()
    }

    fn link_value(link: &str, key: &str) -> Option<String> {
        link_query(link)
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    #[test]
    fn window_without_cursor() {
        let mut select = select("test");
        paginator(SortOrder::Asc, None, 10).window_query(&mut select);

        let (sql, values) = select.build(PostgresQueryBuilder);
        assert_eq!(sql, r#"SELECT * FROM "test" ORDER BY "id" ASC LIMIT $1"#);
        assert_eq!(values, Values(vec![Value::from(11_u64)]));
    }

    #[test]
    fn window_forward_from_cursor() {
        let mut select = select("test");
        paginator(SortOrder::Asc, Some("123"), 10).window_query(&mut select);

        let (sql, values) = select.build(PostgresQueryBuilder);
        assert_eq!(
            sql,
            r#"SELECT * FROM "test" WHERE "id" > $1 ORDER BY "id" ASC LIMIT $2"#
        );
        assert_eq!(values, Values(vec![Value::from("123"), Value::from(11_u64)]));
    }

    #[test]
    fn window_backward_from_cursor() {
        let mut select = select("test");
        paginator(SortOrder::Desc, Some("123"), 10).window_query(&mut select);

        let (sql, values) = select.build(PostgresQueryBuilder);
        assert_eq!(
            sql,
            r#"SELECT * FROM "test" WHERE "id" < $1 ORDER BY "id" DESC LIMIT $2"#
        );
        assert_eq!(values, Values(vec![Value::from("123"), Value::from(11_u64)]));
    }

    #[test]
    fn window_single_item_limit_fetches_two() {
        let mut select = select("test");
        paginator(SortOrder::Asc, None, 1).window_query(&mut select);

        let (_, values) = select.build(PostgresQueryBuilder);
        assert_eq!(values, Values(vec![Value::from(2_u64)]));
    }

    #[test]
    fn window_keeps_caller_filters() {
        let mut select = select("doctors");
        select.and_where(Expr::col(Alias::new("specialty_id")).eq("cardiology"));

        paginator(SortOrder::Asc, Some("42"), 5)
            .with_key_column("created_at")
            .window_query(&mut select);

        let (sql, values) = select.build(PostgresQueryBuilder);
        assert_eq!(
            sql,
            r#"SELECT * FROM "doctors" WHERE "specialty_id" = $1 AND "created_at" > $2 ORDER BY "created_at" ASC LIMIT $3"#
        );
        assert_eq!(
            values,
            Values(vec![
                Value::from("cardiology"),
                Value::from("42"),
                Value::from(6_u64),
            ])
        );
    }

    #[test]
    fn undecodable_cursor_never_reaches_the_query() {
        let request = PageRequest::parse("http://example.com/api?cursor=!!!").unwrap();
        let error = <CursorPaginator<Row> as Paginator<Row>>::bind(&request).unwrap_err();
        assert!(matches!(error, PaginationError::Decode(_)));
    }

    #[test]
    fn forward_first_page_with_more() {
        let page = paginator(SortOrder::Asc, None, 10)
            .build_result(rows(1..=11), 25)
            .unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_count, 25);
        assert_eq!(ids(&page).first(), Some(&"1"));
        assert_eq!(ids(&page).last(), Some(&"10"));
        assert_eq!(page.previous, None);

        let next = page.next.unwrap();
        assert_eq!(link_cursor(&next), "10");
        assert_eq!(link_value(&next, "ordering").as_deref(), Some("asc"));
        assert_eq!(link_value(&next, "limit").as_deref(), Some("10"));
    }

    #[test]
    fn backward_page_is_reversed() {
        let page = paginator(SortOrder::Desc, Some("20"), 10)
            .build_result(rows((9..=19).rev()), 25)
            .unwrap();

        assert_eq!(
            ids(&page),
            ["10", "11", "12", "13", "14", "15", "16", "17", "18", "19"]
        );

        let previous = page.previous.unwrap();
        assert_eq!(link_cursor(&previous), "10");
        assert_eq!(link_value(&previous, "ordering").as_deref(), Some("desc"));

        let next = page.next.unwrap();
        assert_eq!(link_cursor(&next), "19");
        assert_eq!(link_value(&next, "ordering").as_deref(), Some("asc"));
    }

    #[test]
    fn exact_limit_has_no_next() {
        let page = paginator(SortOrder::Asc, None, 10)
            .build_result(rows(1..=10), 10)
            .unwrap();
        assert_eq!(page.items.len(), 10);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn single_item_page() {
        let page = paginator(SortOrder::Asc, None, 10)
            .build_result(rows([1]), 1)
            .unwrap();
        assert_eq!(ids(&page), ["1"]);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn empty_page_has_no_links() {
        for (ordering, cursor) in [
            (SortOrder::Asc, None),
            (SortOrder::Asc, Some("5")),
            (SortOrder::Desc, Some("5")),
        ] {
            let page = paginator(ordering, cursor, 10)
                .build_result(Vec::new(), 0)
                .unwrap();
            assert!(page.items.is_empty());
            assert_eq!(page.previous, None);
            assert_eq!(page.next, None);
        }
    }

    #[test]
    fn backward_without_cursor_links_back_only() {
        let page = paginator(SortOrder::Desc, None, 10)
            .build_result(rows((1..=5).rev()), 5)
            .unwrap();

        assert_eq!(ids(&page), ["1", "2", "3", "4", "5"]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn forward_from_cursor_links_both_ways() {
        let page = paginator(SortOrder::Asc, Some("5"), 10)
            .build_result(rows(6..=16), 25)
            .unwrap();

        assert_eq!(page.items.len(), 10);
        assert_eq!(link_cursor(page.previous.as_deref().unwrap()), "6");
        assert_eq!(link_cursor(page.next.as_deref().unwrap()), "15");
    }

    #[test]
    fn links_encode_special_identifiers() {
        let identifiers = [
            "id with spaces",
            "id&with&ampersands",
            "id?with?questions",
            "id#with#hashes",
            "id%with%percents",
            "id+with+plus",
            "id/with/slashes",
            "id=with=equals",
        ];

        for identifier in identifiers {
            let paginator: CursorPaginator<Row> =
                CursorPaginator::new(CursorParams::new(SortOrder::Asc, 1, BASE_URL));
            let page = paginator
                .build_result(
                    vec![
                        Row {
                            id: identifier.to_owned(),
                        },
                        Row {
                            id: "zzz".to_owned(),
                        },
                    ],
                    2,
                )
                .unwrap();

            let next = page.next.unwrap();
            assert_eq!(link_cursor(&next), identifier);
            assert_eq!(link_value(&next, "limit").as_deref(), Some("1"));
        }
    }

    #[test]
    fn links_replay_client_params() {
        let token = cursor::encode("3");
        let request = PageRequest::parse(&format!(
            "http://example.com/specialties?filter=a&cursor={token}&limit=2&filter=b&sort=name"
        ))
        .unwrap();

        let paginator = <CursorPaginator<Row> as Paginator<Row>>::bind(&request).unwrap();
        let page = paginator.build_result(rows(4..=6), 9).unwrap();

        let next = page.next.unwrap();
        assert_eq!(
            link_query(&next),
            [
                ("cursor".to_owned(), cursor::encode("5")),
                ("ordering".to_owned(), "asc".to_owned()),
                ("limit".to_owned(), "2".to_owned()),
                ("filter".to_owned(), "a".to_owned()),
                ("filter".to_owned(), "b".to_owned()),
                ("sort".to_owned(), "name".to_owned()),
            ]
        );
        assert!(next.starts_with("http://example.com/specialties?"));
    }

    #[test]
    fn empty_base_url_fails_regardless_of_items() {
        for items in [Vec::new(), rows(1..=3), rows(1..=11)] {
            let paginator: CursorPaginator<Row> =
                CursorPaginator::new(CursorParams::new(SortOrder::Asc, 10, ""));
            let error = paginator.build_result(items, 25).unwrap_err();
            assert_eq!(error, PaginationError::Link(ValidationError::BaseUrlRequired));
            assert!(error.to_string().contains("base url is required"));
        }
    }

    #[test]
    fn walking_forward_visits_every_row_once() {
        let table: Vec<u32> = (100..=123).collect();
        let mut seen = Vec::new();
        let mut request = PageRequest::parse("http://example.com/api?limit=5").unwrap();

        loop {
            let paginator = <CursorPaginator<Row> as Paginator<Row>>::bind(&request).unwrap();
            let boundary = paginator.params().boundary();

            let fetched: Vec<u32> = table
                .iter()
                .copied()
                .filter(|id| boundary.is_none_or(|b| id.to_string().as_str() > b))
                .take(paginator.params().fetch_limit() as usize)
                .collect();

            let page = paginator
                .build_result(rows(fetched), table.len() as u64)
                .unwrap();
            seen.extend(page.items.iter().map(|row| row.id.clone()));

            match page.next {
                Some(next) => request = PageRequest::parse(&next).unwrap(),
                None => break,
            }
        }

        let expected: Vec<String> = table.iter().map(u32::to_string).collect();
        assert_eq!(seen, expected);
    }
}
