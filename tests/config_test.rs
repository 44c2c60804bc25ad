use graphql_client::config::{self, CONFIG_ENV_VAR};
use graphql_client::{messages, Config, ConfigError, DynamicGraphQLClient, GraphQLClientError};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

const URL_VAR: &str = "SMALLRYE_GRAPHQL_CLIENT_WAREHOUSE_URL";

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial]
fn test_load_from_env_path() {
    let file = write_config(
        "clients:\n  warehouse:\n    url: \"http://warehouse.local/graphql\"\nlogging:\n  level: \"debug\"\n",
    );
    std::env::set_var(CONFIG_ENV_VAR, file.path());
    std::env::remove_var(URL_VAR);

    let config = Config::load().unwrap();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.client_url("warehouse").unwrap(), "http://warehouse.local/graphql");
}

#[test]
#[serial]
fn test_missing_env_path_fails_fast() {
    std::env::set_var(CONFIG_ENV_VAR, "/nonexistent/graphql-client.yaml");
    let result = Config::load();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
#[serial]
fn test_env_property_overrides_file() {
    let file = write_config("clients:\n  warehouse:\n    url: \"http://from-file/graphql\"\n");
    let config = Config::from_file(file.path()).unwrap();

    std::env::set_var(URL_VAR, "https://from-env/graphql");
    let url = config.client_url("warehouse");
    std::env::remove_var(URL_VAR);

    assert_eq!(url.unwrap(), "https://from-env/graphql");
    assert_eq!(config::env_var_name(&config::url_property("warehouse")), URL_VAR);
}

#[test]
#[serial]
fn test_env_property_alone_is_enough() {
    std::env::set_var(URL_VAR, "http://only-env/graphql");
    let url = Config::default().client_url("warehouse");
    std::env::remove_var(URL_VAR);

    assert_eq!(url.unwrap(), "http://only-env/graphql");
}

#[test]
#[serial]
fn test_unconfigured_client_is_not_found() {
    std::env::remove_var(URL_VAR);
    let err = Config::default().client_url("warehouse").unwrap_err();

    assert_eq!(err.id(), 35001);
    assert_eq!(err, messages::url_not_configured_for_named_client("warehouse"));
    assert!(err
        .message()
        .ends_with("Please define the property smallrye.graphql.client.warehouse/url"));
}

#[test]
#[serial]
fn test_env_url_with_bad_scheme_is_rejected() {
    std::env::set_var(URL_VAR, "ftp://warehouse.local/graphql");
    let result = DynamicGraphQLClient::from_named("warehouse", &Config::default());
    std::env::remove_var(URL_VAR);

    match result {
        Err(GraphQLClientError::Config(ConfigError::Validation(msg))) => {
            assert!(msg.contains("smallrye.graphql.client.warehouse/url"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("ftp url accepted"),
    }
}
