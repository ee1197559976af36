use crate::client::{HEADER_RATE_LIMIT, HEADER_RATE_REMAINING, HEADER_RATE_RESET};

/// Rate limit state reported alongside every API response
///
/// GitHub API docs: https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rate {
    pub limit: usize,
    pub remaining: usize,
    /// UTC epoch seconds at which the current window resets
    pub reset: u64,
}

impl Rate {
    pub(super) fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let mut rate = Self::default();

        if let Some(limit) = headers
            .get(HEADER_RATE_LIMIT)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse().ok())
        {
            rate.limit = limit;
        };

        if let Some(remaining) = headers
            .get(HEADER_RATE_REMAINING)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse().ok())
        {
            rate.remaining = remaining;
        };

        if let Some(reset) = headers
            .get(HEADER_RATE_RESET)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.parse().ok())
        {
            rate.reset = reset;
        };

        rate
    }

    /// True when GitHub sent rate headers and no requests remain in the window
    pub(super) fn is_exhausted(headers: &reqwest::header::HeaderMap) -> bool {
        headers
            .get(HEADER_RATE_REMAINING)
            .and_then(|h| h.to_str().ok())
            .map(|s| s.trim() == "0")
            .unwrap_or(false)
    }
}
