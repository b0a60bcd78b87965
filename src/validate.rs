//! URL validation

use crate::error::{Error, Result};
use url::{Position, Url};

/// Returns whether `input` is an absolute URL with a non-empty host.
pub fn is_valid_url(input: &str) -> bool {
    parse_url(input).is_ok()
}

/// Parse `input` as an absolute URL carrying a host.
///
/// The WHATWG parser repairs a lot of input (drops tabs and newlines, turns
/// `\` into `/`, fills in a missing `//`). Anything it had to repair beyond
/// lowercasing, dropping a default port or adding the root `/` is rejected,
/// so the encoded payload is always the URL that was validated.
pub fn parse_url(input: &str) -> Result<Url> {
    let invalid = || Error::InvalidUrl(input.to_string());

    if input.is_empty()
        || input
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '\\')
    {
        return Err(invalid());
    }

    let url = Url::parse(input).map_err(|e| {
        tracing::debug!(input, error = %e, "URL parse failed");
        invalid()
    })?;

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(invalid()),
    }

    let has_authority = input
        .get(url.scheme().len()..)
        .is_some_and(|rest| rest.starts_with("://"));
    if !has_authority || !matches_serialization(input, &url) {
        tracing::debug!(input, parsed = url.as_str(), "URL needed repair");
        return Err(invalid());
    }

    Ok(url)
}

/// Whether `input` spells `url` up to scheme/host case, an explicit default
/// port and the root path slash.
fn matches_serialization(input: &str, url: &Url) -> bool {
    let origin = &url[..Position::AfterPort];
    let tail = &url[Position::BeforePath..];

    let mut origins = vec![origin.to_string()];
    if url.port().is_none() {
        if let Some(port) = url.port_or_known_default() {
            origins.push(format!("{origin}:{port}"));
        }
    }

    let mut tails = vec![tail];
    if url.path() == "/" {
        tails.push(&tail[1..]);
    }

    origins.iter().any(|origin| {
        tails.iter().any(|tail| {
            input.len() == origin.len() + tail.len()
                && input
                    .get(..origin.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(origin))
                && input.get(origin.len()..) == Some(*tail)
        })
    })
}
