use crate::client::HEADER_LINK;
use serde::Serialize;
use url::Url;

/// Represents `Pagination` information from a Github API request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
    pub first_page: Option<usize>,
    pub last_page: Option<usize>,

    pub next_page_token: Option<String>,
}

impl Pagination {
    pub(super) fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let mut pagination = Self::default();

        let links = if let Some(links) = headers.get(HEADER_LINK).and_then(|h| h.to_str().ok()) {
            links
        } else {
            return pagination;
        };

        for link in links.split(',') {
            let segments: Vec<&str> = link.split(';').map(str::trim).collect();

            // Skip if we don't at least have href and rel
            if segments.len() < 2 {
                continue;
            }

            // Check if href segment is well formed and a valid url format
            let url = if segments[0].starts_with('<') && segments[0].ends_with('>') {
                if let Ok(url) = Url::parse(&segments[0][1..segments[0].len() - 1]) {
                    url
                } else {
                    continue;
                }
            } else {
                continue;
            };

            // and then pull out the page number
            let page = if let Some(page) =
                url.query_pairs()
                    .find_map(|(k, v)| if k == "page" { Some(v) } else { None })
            {
                page
            } else {
                continue;
            };

            for rel in &segments[1..] {
                match rel.trim() {
                    "rel=\"next\"" => {
                        if let Ok(n) = page.parse() {
                            pagination.next_page = Some(n);
                        } else {
                            pagination.next_page_token = Some(page.clone().into_owned());
                        }
                    }
                    "rel=\"prev\"" => {
                        pagination.prev_page = page.parse().ok();
                    }
                    "rel=\"first\"" => {
                        pagination.first_page = page.parse().ok();
                    }
                    "rel=\"last\"" => {
                        pagination.last_page = page.parse().ok();
                    }
                    _ => {}
                }
            }
        }

        pagination
    }
}

/// Page selection for list endpoints, sent as the `page` and `per_page` query parameters.
/// Fields left unset (or zero) are not sent and GitHub applies its defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaginationOptions {
    #[serde(skip_serializing_if = "is_unset")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "is_unset")]
    pub per_page: Option<usize>,
}

impl PaginationOptions {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub fn is_empty(&self) -> bool {
        is_unset(&self.page) && is_unset(&self.per_page)
    }
}

fn is_unset(value: &Option<usize>) -> bool {
    matches!(value, None | Some(0))
}
