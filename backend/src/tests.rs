//! Tests for the application bootstrap.

use std::ffi::OsString;

#[cfg(feature = "metrics")]
use super::initialize_metrics;
use super::{AppSettings, build_user_repository, load_settings_from};
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use env_lock::lock_env;
use rstest::rstest;
use users_api::domain::NewUser;
use users_api::domain::ports::UserRepository;

#[cfg(feature = "metrics")]
#[rstest]
fn initialize_metrics_returns_none_on_error() {
    let metrics = initialize_metrics(|| -> Result<_, &str> { Err("boom") });
    assert!(metrics.is_none(), "expected metrics to be absent on error");
}

#[cfg(feature = "metrics")]
#[rstest]
fn initialize_metrics_returns_metrics_on_success() {
    let metrics = initialize_metrics(|| {
        PrometheusMetricsBuilder::new("test")
            .endpoint("/metrics")
            .build()
    });
    assert!(metrics.is_some(), "expected metrics to be present on success");
}

#[rstest]
fn startup_settings_layer_environment_over_defaults() {
    let _guard = lock_env([
        ("USERS_API_HOST", Some("127.0.0.1")),
        ("USERS_API_PORT", Some("9090")),
        ("USERS_API_MONGODB_URI", None),
        ("USERS_API_DATABASE", None),
        ("USERS_API_COLLECTION", None),
        ("USERS_API_IN_MEMORY", Some("true")),
    ]);

    let settings = load_settings_from([OsString::from("users-api")]).expect("settings");
    assert_eq!(
        settings.bind_addr().expect("bind address").to_string(),
        "127.0.0.1:9090"
    );
    assert!(settings.in_memory);
}

fn settings(in_memory: bool, mongodb_uri: Option<&str>) -> AppSettings {
    AppSettings {
        host: None,
        port: None,
        mongodb_uri: mongodb_uri.map(str::to_owned),
        database: None,
        collection: None,
        in_memory,
    }
}

#[rstest]
#[actix_rt::test]
async fn in_memory_setting_selects_process_local_store() {
    let repository = build_user_repository(&settings(true, None))
        .await
        .expect("in-memory store");

    let created = repository
        .insert(NewUser::default())
        .await
        .expect("insert");
    assert_eq!(repository.find_all().await.expect("find all"), vec![created]);
}

#[rstest]
#[actix_rt::test]
async fn unusable_store_target_is_fatal() {
    let result = build_user_repository(&settings(false, Some("not-a-mongodb-uri"))).await;
    assert!(result.is_err(), "startup must fail without a store");
}
