// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;

use super::*;

fn clear_env() {
    for var in [
        "LC_TABLE_NAME",
        "LC_PROGRESS_TOPIC_ARN",
        "LC_ERROR_TOPIC_ARN",
        "LC_REGION",
        "LC_CLOUD_INIT_WAIT_MS",
        "LC_CLOUD_INIT_WAIT_ATTEMPTS",
    ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn from_env_fails_when_a_required_var_is_missing() {
    clear_env();
    std::env::set_var("LC_TABLE_NAME", "nodes");
    let result = Config::from_env();
    assert!(matches!(result, Err(RuntimeError::MissingEnvVar(name)) if name == "LC_PROGRESS_TOPIC_ARN"));
    clear_env();
}

#[test]
#[serial]
fn from_env_reads_required_vars_and_defaults_waiters() {
    clear_env();
    std::env::set_var("LC_TABLE_NAME", "nodes");
    std::env::set_var("LC_PROGRESS_TOPIC_ARN", "arn:progress");
    std::env::set_var("LC_ERROR_TOPIC_ARN", "arn:error");
    std::env::set_var("LC_REGION", "us-east-1");

    let config = Config::from_env().unwrap();
    assert_eq!(config.table_name, "nodes");
    assert_eq!(config.progress_topic_arn, "arn:progress");
    assert_eq!(config.waiters.cloud_init.max_attempts, 60);
    assert_eq!(config.waiters.cloud_init.delay, Duration::from_secs(5));
    clear_env();
}

#[test]
#[serial]
fn from_env_honors_a_waiter_override() {
    clear_env();
    std::env::set_var("LC_TABLE_NAME", "nodes");
    std::env::set_var("LC_PROGRESS_TOPIC_ARN", "arn:progress");
    std::env::set_var("LC_ERROR_TOPIC_ARN", "arn:error");
    std::env::set_var("LC_REGION", "us-east-1");
    std::env::set_var("LC_CLOUD_INIT_WAIT_MS", "10");
    std::env::set_var("LC_CLOUD_INIT_WAIT_ATTEMPTS", "3");

    let config = Config::from_env().unwrap();
    assert_eq!(config.waiters.cloud_init.delay, Duration::from_millis(10));
    assert_eq!(config.waiters.cloud_init.max_attempts, 3);
    clear_env();
}
