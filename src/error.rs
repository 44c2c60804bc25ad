//! Error types for the GraphQL client

use crate::messages::format_code;
use std::fmt;
use thiserror::Error;

/// Generic client-side failure built from the message catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    id: u32,
    message: String,
}

/// A required configuration value is missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    id: u32,
    message: String,
}

macro_rules! catalog_error {
    ($ty:ident) => {
        impl $ty {
            pub(crate) fn new(id: u32, message: String) -> Self {
                Self { id, message }
            }

            pub fn id(&self) -> u32 {
                self.id
            }

            pub fn message(&self) -> &str {
                &self.message
            }

            /// Correlation code, e.g. `SRGQLDC035000`
            pub fn code(&self) -> String {
                format_code(self.id)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}: {}", self.code(), self.message)
            }
        }

        impl std::error::Error for $ty {}
    };
}

catalog_error!(ClientError);
catalog_error!(NotFoundError);

/// Errors surfaced by [`crate::client::DynamicGraphQLClient`]
#[derive(Error, Debug)]
pub enum GraphQLClientError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
