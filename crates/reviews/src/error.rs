use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamResource {
    Business,
    Reviews,
}

impl fmt::Display for UpstreamResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Business => f.write_str("Business"),
            Self::Reviews => f.write_str("Reviews"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Yelp API key not configured. Please set {var} in your environment variables.")]
    MissingCredential { var: &'static str },
    #[error("invalid upstream base url {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Invalid Yelp API key. Please check your API key.")]
    InvalidCredential,
    #[error("{0} not found. Please check the business ID.")]
    NotFound(UpstreamResource),
    #[error("{resource} API error: {status}")]
    UpstreamStatus {
        resource: UpstreamResource,
        status: u16,
    },
    #[error("{resource} request failed: {source}")]
    Transport {
        resource: UpstreamResource,
        #[source]
        source: reqwest::Error,
    },
    #[error("{resource} response could not be decoded: {source}")]
    Decode {
        resource: UpstreamResource,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not build {resource} url: {source}")]
    Url {
        resource: UpstreamResource,
        #[source]
        source: url::ParseError,
    },
}

impl GatewayError {
    pub fn from_status(resource: UpstreamResource, status: u16) -> Self {
        match status {
            401 => Self::InvalidCredential,
            404 => Self::NotFound(resource),
            status => Self::UpstreamStatus { resource, status },
        }
    }
}
