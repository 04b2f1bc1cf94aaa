use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Errors that can occur during URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
    /// The URL points to a private/internal IP address.
    #[error("Private IP address not allowed: {0}")]
    PrivateIp(String),
    /// The URL points to localhost.
    #[error("Localhost not allowed")]
    Localhost,
}

/// Validates a URL string as a request target for the feed client.
///
/// Accepts any absolute `http`/`https` URL with a host. Loopback and private
/// addresses are allowed here because the base URL comes from the user's own
/// configuration (and tests point it at a local mock server).
///
/// # Errors
///
/// - [`UrlValidationError::InvalidUrl`] if the string does not parse
/// - [`UrlValidationError::UnsupportedScheme`] for non-HTTP(S) schemes
/// - [`UrlValidationError::MissingHost`] if there is no host
///
/// # Examples
///
/// ```
/// use artfeed::util::validate_url;
///
/// let url = validate_url("https://content.guardianapis.com/search").unwrap();
/// assert_eq!(url.host_str(), Some("content.guardianapis.com"));
///
/// assert!(validate_url("not a url").is_err());
/// assert!(validate_url("file:///etc/passwd").is_err());
/// ```
pub fn validate_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

/// Validates an article URL before handing it to the system browser.
///
/// Article links come from the remote API, so on top of [`validate_url`]
/// this rejects localhost and private/link-local addresses.
pub fn validate_url_for_open(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = validate_url(url_str)?;

    if let Some(host) = url.host_str() {
        if host.eq_ignore_ascii_case("localhost") {
            return Err(UrlValidationError::Localhost);
        }

        // Strip brackets from IPv6 addresses for parsing
        let host_for_parse = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        if let Ok(ip) = host_for_parse.parse::<IpAddr>() {
            if ip.is_loopback() {
                return Err(UrlValidationError::Localhost);
            }
            if is_private_ip(&ip) {
                return Err(UrlValidationError::PrivateIp(ip.to_string()));
            }
        }
    }

    Ok(url)
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            ipv4.is_private() || ipv4.is_loopback() || ipv4.is_link_local() || ipv4.is_unspecified()
        }
        IpAddr::V6(ipv6) => {
            if ipv6.is_loopback() || ipv6.is_unspecified() {
                return true;
            }
            let segments = ipv6.segments();
            // Unique Local (fc00::/7)
            let is_unique_local = (segments[0] & 0xfe00) == 0xfc00;
            // Link-Local (fe80::/10)
            let is_link_local = (segments[0] & 0xffc0) == 0xfe80;
            is_unique_local || is_link_local
        }
    }
}
