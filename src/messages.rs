//! Message catalog for client-side errors
//!
//! Every error the client raises on its own behalf is built from a template in
//! [`CATALOG`]. A template carries a stable numeric id from the range reserved
//! for this module (35000-39999), a format string with positional `{n}`
//! placeholders, and the kind of error value it produces.
//!
//! Ids are part of the public contract: logs and dashboards correlate on them,
//! so an id is never reassigned once published. New templates take the next
//! free number.
//!
//! # Example
//!
//! ```
//! use graphql_client::messages;
//!
//! let err = messages::cannot_parse_response("{bad json");
//! assert_eq!(err.id(), 35000);
//! assert_eq!(err.message(), "Cannot parse response: {bad json");
//! assert_eq!(err.code(), "SRGQLDC035000");
//! ```

use crate::error::{ClientError, NotFoundError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Project code prefixed to every message id
pub const PROJECT_CODE: &str = "SRGQLDC";

/// Ids reserved for this catalog
pub const RESERVED_IDS: RangeInclusive<u32> = 35000..=39999;

pub const CANNOT_PARSE_RESPONSE: u32 = 35000;
pub const URL_NOT_CONFIGURED_FOR_NAMED_CLIENT: u32 = 35001;

/// Which error value a template produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Generic client-side failure
    Client,
    /// A required configuration value is missing
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTemplate {
    pub id: u32,
    pub key: &'static str,
    pub format: &'static str,
    pub kind: ErrorKind,
}

pub static CATALOG: &[MessageTemplate] = &[
    MessageTemplate {
        id: CANNOT_PARSE_RESPONSE,
        key: "cannotParseResponse",
        format: "Cannot parse response: {0}",
        kind: ErrorKind::Client,
    },
    MessageTemplate {
        id: URL_NOT_CONFIGURED_FOR_NAMED_CLIENT,
        key: "urlNotConfiguredForNamedClient",
        format: "URL not configured for client named '{0}'. \
                 Please define the property smallrye.graphql.client.{0}/url",
        kind: ErrorKind::NotFound,
    },
];

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("valid placeholder pattern"));

static BY_ID: Lazy<HashMap<u32, &'static MessageTemplate>> =
    Lazy::new(|| CATALOG.iter().map(|t| (t.id, t)).collect());

impl MessageTemplate {
    /// Substitute positional arguments into the format string.
    ///
    /// `{n}` is replaced by `args[n]` and may appear any number of times.
    /// Placeholders without a matching argument are kept as written, and
    /// argument text is inserted literally.
    pub fn render(&self, args: &[&str]) -> String {
        PLACEHOLDER
            .replace_all(self.format, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| args.get(i))
                    .map(|arg| arg.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Correlation code, e.g. `SRGQLDC035000`
    pub fn code(&self) -> String {
        format_code(self.id)
    }
}

pub(crate) fn format_code(id: u32) -> String {
    format!("{}{:06}", PROJECT_CODE, id)
}

/// Find a template by id
pub fn lookup(id: u32) -> Option<&'static MessageTemplate> {
    BY_ID.get(&id).copied()
}

/// Template a factory builds from; `kind` must match the factory's return type
fn template(id: u32, kind: ErrorKind) -> &'static MessageTemplate {
    // Only called with the id constants above, each of which has a CATALOG row.
    let t = BY_ID[&id];
    debug_assert_eq!(t.kind, kind, "template {} ({}) has the wrong kind", t.code(), t.key);
    t
}

/// The response body (or a description of it) could not be parsed.
pub fn cannot_parse_response(response: &str) -> ClientError {
    let t = template(CANNOT_PARSE_RESPONSE, ErrorKind::Client);
    ClientError::new(t.id, t.render(&[response]))
}

/// No endpoint URL is configured for the client called `name`.
pub fn url_not_configured_for_named_client(name: &str) -> NotFoundError {
    let t = template(URL_NOT_CONFIGURED_FOR_NAMED_CLIENT, ErrorKind::NotFound);
    NotFoundError::new(t.id, t.render(&[name]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_reserved() {
        let mut seen = HashSet::new();
        for t in CATALOG {
            assert!(seen.insert(t.id), "duplicate message id {}", t.id);
            assert!(RESERVED_IDS.contains(&t.id), "id {} outside reserved range", t.id);
        }
        assert_eq!(BY_ID.len(), CATALOG.len());
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = CATALOG.iter().map(|t| t.key).collect();
        assert_eq!(keys.len(), CATALOG.len());
    }

    #[test]
    fn test_cannot_parse_response() {
        let err = cannot_parse_response("{bad json");
        assert_eq!(err.id(), 35000);
        assert_eq!(err.message(), "Cannot parse response: {bad json");
    }

    #[test]
    fn test_url_not_configured_for_named_client() {
        let err = url_not_configured_for_named_client("inventory");
        assert_eq!(err.id(), 35001);
        assert_eq!(
            err.message(),
            "URL not configured for client named 'inventory'. \
             Please define the property smallrye.graphql.client.inventory/url"
        );
    }

    #[test]
    fn test_name_appears_in_both_positions() {
        for name in ["a", "orders-v2", "", "with space", "{0}"] {
            let msg = url_not_configured_for_named_client(name).message().to_string();
            assert!(msg.contains(&format!("client named '{}'", name)));
            assert!(msg.contains(&format!("smallrye.graphql.client.{}/url", name)));
        }
    }

    #[test]
    fn test_response_is_kept_verbatim() {
        for body in ["", "<html>", "{0} {1}", "line\nbreak", "ünïcødé"] {
            let err = cannot_parse_response(body);
            assert_eq!(err.id(), CANNOT_PARSE_RESPONSE);
            assert!(err.message().contains(body));
        }
    }

    #[test]
    fn test_same_input_is_value_equal() {
        assert_eq!(cannot_parse_response("x"), cannot_parse_response("x"));
        assert_eq!(
            url_not_configured_for_named_client("x"),
            url_not_configured_for_named_client("x")
        );
        assert_ne!(cannot_parse_response("x"), cannot_parse_response("y"));
    }

    #[test]
    fn test_render_leaves_unmatched_placeholders() {
        let t = MessageTemplate {
            id: 39999,
            key: "test",
            format: "{0} and {1}",
            kind: ErrorKind::Client,
        };
        assert_eq!(t.render(&["one"]), "one and {1}");
        assert_eq!(t.render(&[]), "{0} and {1}");
    }

    #[test]
    fn test_factory_kinds_match_catalog() {
        assert_eq!(template(CANNOT_PARSE_RESPONSE, ErrorKind::Client).key, "cannotParseResponse");
        assert_eq!(
            template(URL_NOT_CONFIGURED_FOR_NAMED_CLIENT, ErrorKind::NotFound).key,
            "urlNotConfiguredForNamedClient"
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "wrong kind")]
    fn test_template_rejects_mismatched_kind() {
        template(CANNOT_PARSE_RESPONSE, ErrorKind::NotFound);
    }

    #[test]
    fn test_lookup_and_code() {
        let t = lookup(35001).unwrap();
        assert_eq!(t.key, "urlNotConfiguredForNamedClient");
        assert_eq!(t.kind, ErrorKind::NotFound);
        assert_eq!(t.code(), "SRGQLDC035001");
        assert!(lookup(34999).is_none());
    }
}
