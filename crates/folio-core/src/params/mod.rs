//! Pagination parameters bound from inbound request query strings.
//!
//! Both strategies follow the same lifecycle: raw query pairs are bound
//! (defaults applied, numbers parsed and range-checked), the bound struct is
//! validated, and every query key that is not a pagination key is captured
//! into [`ClientParams`] so it can be replayed onto navigation links.

mod client;
mod cursor;
mod offset;

pub use client::ClientParams;
pub use cursor::CursorParams;
pub use offset::OffsetParams;

use std::num::{IntErrorKind, ParseIntError};

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use validator::{Validate, ValidationErrors};

use crate::{BindingError, PageRequest, PaginationResult, ValidationError};

/// Default number of items per page.
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum number of items per page.
pub const MAX_LIMIT: u32 = 100;

/// Default page number for offset pagination.
pub const DEFAULT_PAGE: u64 = 1;

/// Parameters that can be bound from a [`PageRequest`].
///
/// Implementations apply defaults, range-check numeric values and validate
/// the result. Binding is pure: the same request always yields the same
/// parameters.
pub trait BindParams: Sized {
    /// Query keys owned by this strategy. They are never captured into
    /// [`ClientParams`].
    const KEYS: &'static [&'static str];

    /// Binds and validates parameters from the request.
    fn bind(request: &PageRequest) -> PaginationResult<Self>;

    /// Validates already bound parameters.
    fn validate(&self) -> PaginationResult<()>;
}

/// Traversal direction of a keyset page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display, EnumString)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    /// Ascending identifiers, walking forward.
    #[default]
    Asc,
    /// Descending identifiers, walking backward.
    Desc,
}

impl SortOrder {
    /// Parses an ordering token, ignoring ASCII case.
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        token
            .parse()
            .map_err(|_| ValidationError::InvalidOrdering(token.to_owned()))
    }

    /// Returns the opposite direction.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Returns whether the order is ascending.
    #[inline]
    pub fn is_asc(self) -> bool {
        matches!(self, Self::Asc)
    }

    /// Returns whether the order is descending.
    #[inline]
    pub fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }
}

/// Range-checked numeric pagination values, before conversion to the
/// public parameter structs.
#[derive(Debug, Validate)]
pub(crate) struct RawWindow {
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub page: i64,
    #[validate(range(min = 1, max = 100, message = "must be between 1 and 100"))]
    pub limit: i64,
}

impl RawWindow {
    /// Reads `limit` (and optionally `page`) from decoded query pairs and
    /// checks their ranges.
    pub fn bind(query: &ClientParams, with_page: bool) -> Result<Self, BindingError> {
        let page = if with_page {
            parse_number(query, "page", 1)?
        } else {
            1
        };
        let limit = parse_number(query, "limit", i64::from(DEFAULT_LIMIT))?;

        let window = Self { page, limit };
        window.validate().map_err(out_of_range)?;
        Ok(window)
    }

    /// Returns the validated page number.
    #[inline]
    pub fn page(&self) -> u64 {
        self.page.unsigned_abs()
    }

    /// Returns the validated limit.
    #[inline]
    pub fn limit(&self) -> u32 {
        u32::try_from(self.limit).unwrap_or(MAX_LIMIT)
    }
}

/// Parses the first non-empty value of `field`, falling back to `default`.
fn parse_number(
    query: &ClientParams,
    field: &'static str,
    default: i64,
) -> Result<i64, BindingError> {
    let Some(value) = query.get(field).filter(|value| !value.is_empty()) else {
        return Ok(default);
    };

    value.trim().parse().map_err(|error: ParseIntError| match error.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => BindingError::OutOfRange {
            field: field.into(),
            message: "is out of range".into(),
        },
        _ => BindingError::NotANumber {
            field: field.into(),
            value: value.to_owned(),
        },
    })
}

/// Converts validator output into a deterministic [`BindingError`].
fn out_of_range(errors: ValidationErrors) -> BindingError {
    let by_field = errors.field_errors();
    let mut fields: Vec<_> = by_field.iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let Some((field, field_errors)) = fields.into_iter().next() else {
        return BindingError::OutOfRange {
            field: "query".into(),
            message: errors.to_string().into(),
        };
    };

    let message = field_errors
        .first()
        .and_then(|error| error.message.clone())
        .unwrap_or_else(|| "is out of range".into());

    BindingError::OutOfRange {
        field: field.to_string().into(),
        message,
    }
}
