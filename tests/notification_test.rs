use std::{collections::HashMap, env, io::Write, time::Duration};

use httpmock::prelude::*;
use tempfile::NamedTempFile;

use common::{error::Error, notifier::Notifier};

fn quiet_logger() -> slog_scope::GlobalLoggerGuard {
    slog_scope::set_global_logger(slog::Logger::root(slog::Discard, slog::o!()))
}

fn payload(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn posts_the_form_encoded_payload_to_the_configured_url() {
    let _guard = quiet_logger();
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("ICINGA_HOSTNAME=web1&ICINGA_STATE=CRITICAL");
        then.status(200);
    });

    let notifier = Notifier::new(Duration::from_secs(5)).unwrap();

    notifier
        .notify(
            &server.url("/hook"),
            &payload(&[("ICINGA_HOSTNAME", "web1"), ("ICINGA_STATE", "CRITICAL")]),
        )
        .unwrap();

    mock.assert();
}

#[test]
fn a_non_success_status_code_is_not_an_error() {
    let _guard = quiet_logger();
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(500);
    });

    let notifier = Notifier::new(Duration::from_secs(5)).unwrap();

    notifier
        .notify(&server.url("/hook"), &payload(&[("ICINGA_STATE", "OK")]))
        .unwrap();

    mock.assert();
}

#[test]
fn an_empty_payload_is_still_sent() {
    let _guard = quiet_logger();
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST).path("/hook").body("");
        then.status(200);
    });

    let notifier = Notifier::new(Duration::from_secs(5)).unwrap();

    notifier.notify(&server.url("/hook"), &payload(&[])).unwrap();

    mock.assert();
}

#[test]
fn an_unreachable_endpoint_is_a_network_error() {
    let _guard = quiet_logger();

    let notifier = Notifier::new(Duration::from_secs(5)).unwrap();

    let result = notifier.notify("http://127.0.0.1:9/hook", &payload(&[]));

    assert!(matches!(result, Err(Error::Network(_))));
}

#[test]
fn a_slow_endpoint_times_out() {
    let _guard = quiet_logger();
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST).path("/hook");
        then.status(200).delay(Duration::from_secs(5));
    });

    let notifier = Notifier::new(Duration::from_millis(300)).unwrap();

    let result = notifier.notify(&server.url("/hook"), &payload(&[]));

    assert!(matches!(result, Err(Error::Timeout)));
}

#[test]
fn run_forwards_the_icinga_environment_to_the_configured_url() {
    let _guard = quiet_logger();
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/hook")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("ICINGA_HOSTNAME=web1");
        then.status(200);
    });

    let config = config_file(&format!("[settings]\nurl = {}\n", server.url("/hook")));

    env::set_var("ICINGA_HOSTNAME", "web1");
    let result = common::run(config.path().to_str().unwrap());
    env::remove_var("ICINGA_HOSTNAME");

    result.unwrap();
    mock.assert();
}

#[test]
fn run_makes_no_request_when_the_config_has_no_url() {
    let _guard = quiet_logger();
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let config = config_file("[settings]\nroom = ops\n");

    let result = common::run(config.path().to_str().unwrap());

    assert!(matches!(result, Err(Error::Config(_))));
    assert_eq!(0, mock.hits());
}
