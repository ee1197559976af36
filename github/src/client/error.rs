//! Error type for Github Client

use super::Rate;
use reqwest::StatusCode;
use serde::Deserialize;
use std::{borrow::Cow, fmt, time::Duration};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// The request path could not be turned into a URL. Raised before anything is sent.
    #[error("invalid request path {0:?}")]
    InvalidPath(String),

    #[error("url error")]
    Url(#[from] url::ParseError),

    #[error("reqwest error")]
    Reqwest(#[from] reqwest::Error),

    /// A successful response whose body did not match the expected type
    #[error("failed to decode `{status}` response body")]
    Decode {
        status: StatusCode,
        rate: Rate,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{0}`")]
    Message(Cow<'static, str>),

    #[error("`{status}` {error}")]
    GithubClientError {
        status: StatusCode,
        rate: Rate,
        error: GithubClientError,
    },

    #[error("RateLimit: {} requests remaining, resets at {}", .rate.remaining, .rate.reset)]
    RateLimit { status: StatusCode, rate: Rate },

    #[error("AbuseLimit: retry after {retry_after:?}")]
    AbuseLimit {
        status: StatusCode,
        retry_after: Option<Duration>,
    },
}

impl Error {
    /// The HTTP status GitHub answered with, if the request got that far
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::GithubClientError { status, .. }
            | Error::RateLimit { status, .. }
            | Error::AbuseLimit { status, .. }
            | Error::Decode { status, .. } => Some(*status),
            Error::Reqwest(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Reqwest(e) if e.is_timeout())
    }
}

impl From<&'static str> for Error {
    fn from(error: &'static str) -> Self {
        Error::Message(error.into())
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Message(error.into())
    }
}

// Github Error Responses
// https://docs.github.com/rest/overview/resources-in-the-rest-api#client-errors
#[derive(Debug, Default, Deserialize)]
pub struct GithubClientError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<GithubClientErrorType>>,
    #[serde(default)]
    pub documentation_url: Option<String>,
}

impl fmt::Display for GithubClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message.as_deref().unwrap_or("<no message>"))?;

        for error in self.errors.iter().flatten() {
            match error {
                GithubClientErrorType::Message(message) => write!(f, "; {}", message)?,
                GithubClientErrorType::Code {
                    resource,
                    field,
                    code,
                } => write!(f, "; {}.{}: {}", resource, field, code)?,
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GithubClientErrorType {
    Message(String),
    Code {
        #[serde(default)]
        resource: String,
        #[serde(default)]
        field: String,
        code: String,
    },
}
