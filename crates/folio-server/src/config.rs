//! Configuration of how pagination links are addressed.

#[cfg(feature = "config")]
use clap::Args;
use folio_core::{ValidationError, validate_base_url};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::TRACING_TARGET_EXTRACT;

/// Controls the scheme, host and path prefix of generated navigation links.
///
/// By default links are addressed to the `Host` the request was sent to.
/// Behind a reverse proxy, either trust the proxy's `X-Forwarded-Proto` and
/// `X-Forwarded-Host` headers or pin the public address explicitly.
///
/// Install it with an [`Extension`] layer; extractors fall back to
/// [`PaginationConfig::default`] when none is installed.
///
/// [`Extension`]: axum::Extension
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(default)]
#[must_use = "config does nothing unless you use it"]
pub struct PaginationConfig {
    /// Public base URL links are addressed to, e.g. `https://api.example.com/v1`.
    /// Its path is prepended to the request path.
    #[cfg_attr(
        feature = "config",
        arg(long = "pagination-public-url", env = "PAGINATION_PUBLIC_URL")
    )]
    pub public_base_url: Option<String>,

    /// Honor `X-Forwarded-Proto` and `X-Forwarded-Host` request headers.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "pagination-trust-forwarded",
            env = "PAGINATION_TRUST_FORWARDED",
            default_value = "false"
        )
    )]
    pub trust_forwarded_headers: bool,
}

impl PaginationConfig {
    /// Creates a configuration that addresses links to `public_base_url`.
    pub fn with_public_base_url(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: Some(public_base_url.into()),
            trust_forwarded_headers: false,
        }
    }

    /// Enables or disables forwarded header support.
    pub fn with_trust_forwarded_headers(mut self, trust: bool) -> Self {
        self.trust_forwarded_headers = trust;
        self
    }

    /// Checks that the public base URL, if set, is an absolute URL with a host.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let Some(public_base_url) = &self.public_base_url else {
            return Ok(());
        };

        validate_base_url(public_base_url).inspect_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_EXTRACT,
                public_base_url = %public_base_url,
                error = %error,
                "invalid pagination configuration"
            );
        })
    }

    /// Returns the parsed public base URL.
    pub(crate) fn public_url(&self) -> Option<Result<Url, ValidationError>> {
        self.public_base_url.as_deref().map(|public_base_url| {
            self.validate()?;
            Url::parse(public_base_url).map_err(|_| ValidationError::InvalidBaseUrl)
        })
    }
}
