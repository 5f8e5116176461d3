use policy_demo::{ConfigError, ServiceConfig, config::Env};
use serial_test::serial;
use std::{collections::HashMap, env, panic};

// --- Setup/Teardown Utilities ---

const VARS: [&str; 3] = ["SERVICE_NAME", "SERVICE_PORT", "APP_ENV"];

/// Runs `test` and restores the listed environment variables afterward.
fn run_with_env<T, R>(test: T, cleanup_vars: &[&'static str]) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// --- Environment Tests ---

#[test]
#[serial]
fn test_load_defaults_when_unset() {
    let config = run_with_env(
        || {
            unsafe {
                for var in VARS {
                    env::remove_var(var);
                }
            }
            ServiceConfig::load().unwrap()
        },
        &VARS,
    );

    assert_eq!(config, ServiceConfig::default());
    assert_eq!(config.service_name, "go-service");
    assert_eq!(config.service_port, 8080);
    assert_eq!(config.listen_label(), ":8080");
}

#[test]
#[serial]
fn test_load_reads_environment() {
    let config = run_with_env(
        || {
            unsafe {
                env::set_var("SERVICE_NAME", "rust-service");
                env::set_var("SERVICE_PORT", "9090");
                env::set_var("APP_ENV", "production");
            }
            ServiceConfig::load().unwrap()
        },
        &VARS,
    );

    assert_eq!(config.service_name, "rust-service");
    assert_eq!(config.service_port, 9090);
    assert_eq!(config.env, Env::Production);
    assert_eq!(config.bind_addr().to_string(), "0.0.0.0:9090");
}

#[test]
#[serial]
fn test_load_rejects_bad_port() {
    let result = run_with_env(
        || {
            unsafe {
                env::set_var("SERVICE_PORT", "eighty");
            }
            ServiceConfig::load()
        },
        &VARS,
    );

    assert!(matches!(result, Err(ConfigError::InvalidPort(raw)) if raw == "eighty"));
}

// --- Lookup Tests ---

#[test]
fn test_empty_values_fall_back_to_defaults() {
    let config =
        ServiceConfig::from_lookup(lookup(&[("SERVICE_NAME", ""), ("SERVICE_PORT", "")])).unwrap();
    assert_eq!(config.service_name, "go-service");
    assert_eq!(config.service_port, 8080);
}

#[test]
fn test_unknown_app_env_is_local() {
    let config = ServiceConfig::from_lookup(lookup(&[("APP_ENV", "staging")])).unwrap();
    assert_eq!(config.env, Env::Local);
}

#[test]
fn test_out_of_range_port_is_rejected() {
    let result = ServiceConfig::from_lookup(lookup(&[("SERVICE_PORT", "70000")]));
    assert!(result.is_err());
}
