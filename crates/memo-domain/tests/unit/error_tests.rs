//! Unit tests for domain error types

use memo_domain::Error;
use std::error::Error as _;

#[test]
fn test_backend_unavailable_error() {
    let error = Error::backend_unavailable("connection refused");
    assert!(error.is_backend_unavailable());
    assert_eq!(error.to_string(), "Backend unavailable: connection refused");
    assert!(error.source().is_none());
}

#[test]
fn test_backend_unavailable_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
    let error = Error::backend_unavailable_with_source("GET timed out", io);

    assert!(error.is_backend_unavailable());
    assert!(error.source().is_some());
}

#[test]
fn test_invalid_argument_error() {
    let error = Error::invalid_argument("TTL must be positive");
    match error {
        Error::InvalidArgument { message } => assert_eq!(message, "TTL must be positive"),
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_configuration_error() {
    let error = Error::configuration("missing redis url");
    assert!(!error.is_backend_unavailable());
    assert!(error.to_string().contains("missing redis url"));
}

#[test]
fn test_codec_errors_keep_source() {
    let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
    let error = Error::deserialization("bad entry", json_err);
    assert!(matches!(error, Error::Deserialization { .. }));
    assert!(error.source().is_some());
}

#[test]
fn test_optional_sources_are_chained() {
    let timed_out = || std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
    let errors = [
        Error::backend_unavailable_with_source("GET", timed_out()),
        Error::serialization("encode", timed_out()),
        Error::deserialization("decode", timed_out()),
        Error::configuration_with_source("load", timed_out()),
        Error::infrastructure_with_source("write", timed_out()),
    ];

    for error in errors {
        let source = error.source().expect("source is chained");
        assert_eq!(source.to_string(), "timed out", "{error}");
    }

    assert!(Error::configuration("plain").source().is_none());
    assert!(Error::infrastructure("plain").source().is_none());
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io.into();
    assert!(matches!(error, Error::Io { .. }));
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_err.into();
    assert!(matches!(error, Error::Json { .. }));
}
