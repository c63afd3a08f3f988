use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::http::uri::Authority;
use axum::http::{HeaderName, HeaderValue};
use folio_core::PageRequest;

use crate::{ErrorKind, PaginationConfig, Result, TRACING_TARGET_EXTRACT};

const X_FORWARDED_HOST: HeaderName = HeaderName::from_static("x-forwarded-host");
const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Builds the [`PageRequest`] pagination binds from.
///
/// The scheme and host are taken, in order of precedence, from the configured
/// public base URL, the `X-Forwarded-*` headers when trusted, the `Host`
/// header, and the request URI. A configured public base URL also prefixes
/// the request path with its own path.
pub fn page_request(parts: &Parts, config: &PaginationConfig) -> Result<PageRequest> {
    let path = parts.uri.path();
    let query = parts.uri.query().unwrap_or_default();

    let request = match config.public_url() {
        Some(public_url) => {
            let public_url = public_url.map_err(|error| {
                ErrorKind::InternalServerError.with_context(error.to_string())
            })?;
            let public = PageRequest::from_url(&public_url);
            let prefix = public_url.path().trim_end_matches('/');

            PageRequest::new(public.scheme(), public.host(), format!("{prefix}{path}"))
        }
        None => {
            let host = resolve_host(parts, config.trust_forwarded_headers)?;
            let scheme = resolve_scheme(parts, config.trust_forwarded_headers);

            PageRequest::new(scheme, host, path)
        }
    };

    tracing::trace!(
        target: TRACING_TARGET_EXTRACT,
        base_url = %request.base_url(),
        "resolved pagination base url"
    );

    Ok(request.with_query(query))
}

fn resolve_host(parts: &Parts, trust_forwarded: bool) -> Result<String> {
    let forwarded = trust_forwarded
        .then(|| first_value(parts.headers.get(X_FORWARDED_HOST)))
        .flatten();

    let host = forwarded
        .or_else(|| first_value(parts.headers.get(HOST)))
        .or_else(|| parts.uri.authority().map(Authority::as_str));

    let Some(host) = host else {
        return Err(ErrorKind::BadRequest
            .with_message("Missing host")
            .with_resource("host")
            .with_context("the request carries no host to address pagination links to"));
    };

    // Only `host[:port]`: no userinfo, path or query may leak into links.
    match host.parse::<Authority>() {
        Ok(authority) if !authority.as_str().contains('@') => Ok(authority.as_str().to_owned()),
        _ => {
            tracing::debug!(
                target: TRACING_TARGET_EXTRACT,
                host = %host,
                "rejected malformed host"
            );
            Err(ErrorKind::BadRequest
                .with_message("Malformed host")
                .with_resource("host")
                .with_context(format!("'{host}' is not a valid host")))
        }
    }
}

fn resolve_scheme(parts: &Parts, trust_forwarded: bool) -> &'static str {
    let forwarded = trust_forwarded
        .then(|| first_value(parts.headers.get(X_FORWARDED_PROTO)))
        .flatten();

    match forwarded.or_else(|| parts.uri.scheme_str()) {
        Some(scheme) if scheme.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    }
}

/// Returns the first element of a comma separated header value.
fn first_value(value: Option<&HeaderValue>) -> Option<&str> {
    let value = value?.to_str().ok()?;
    value
        .split(',')
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
