//! Base URL validation and navigation link construction.

use url::Url;

use crate::{ClientParams, PaginationError, PaginationResult, TRACING_TARGET_PAGINATION, ValidationError};

/// Checks that `base_url` is non-empty, parses, and has a host.
///
/// Both strategies run this at bind time so that link construction cannot
/// fail for parameters that passed validation.
pub fn validate_base_url(base_url: &str) -> Result<(), ValidationError> {
    parse_base_url(base_url).map(|_| ())
}

fn parse_base_url(base_url: &str) -> Result<Url, ValidationError> {
    if base_url.is_empty() {
        return Err(ValidationError::BaseUrlRequired);
    }

    let url = Url::parse(base_url).map_err(|_| ValidationError::InvalidBaseUrl)?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(ValidationError::MissingHost);
    }

    Ok(url)
}

/// Parses the base URL links are built from.
///
/// Result construction checks this up front, whether or not a link ends up
/// being built.
pub(crate) fn link_base(base_url: &str) -> PaginationResult<Url> {
    parse_base_url(base_url).map_err(|error| {
        tracing::error!(
            target: TRACING_TARGET_PAGINATION,
            base_url = %base_url,
            error = %error,
            "failed to build pagination link"
        );
        PaginationError::Link(error)
    })
}

/// Builds a navigation link from a base URL.
///
/// Pagination keys are written first, in the order given, followed by the
/// captured client parameters. Query pairs already present on the base URL
/// are kept unless they collide with a pagination key.
pub(crate) fn build_link(
    base_url: &str,
    pagination: &[(&str, String)],
    client_params: &ClientParams,
) -> PaginationResult<String> {
    let mut url = link_base(base_url)?;

    let existing: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(key, _)| !pagination.iter().any(|(name, _)| name == key))
        .collect();

    url.set_query(None);
    {
        let mut query = url.query_pairs_mut();
        query.extend_pairs(existing.iter());
        query.extend_pairs(pagination.iter().map(|(key, value)| (*key, value.as_str())));
        query.extend_pairs(client_params.iter());
    }

    Ok(url.into())
}
