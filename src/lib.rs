//! Dynamic GraphQL client with a coded error message catalog
//!
//! Errors the client raises itself come from [`messages`], each carrying a
//! stable id in the 35000-39999 range and the project code `SRGQLDC`.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod messages;
pub mod types;

pub use client::DynamicGraphQLClient;
pub use config::Config;
pub use error::{ClientError, ConfigError, GraphQLClientError, NotFoundError};
pub use types::{GraphQLError, GraphQLRequest, GraphQLResponse};
