//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::IllegalToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.mk".to_string())),
    );

    assert_eq!(error.get_error_name(), "IllegalToken");
    assert_eq!(error.get_position().0, 10);
    assert_eq!(error.get_position().1.as_str(), "test.mk");
}

#[test]
fn test_illegal_token_tip() {
    let error = Error::new(
        ErrorImpl::IllegalToken {
            token: "\0".to_string(),
        },
        Position::null(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Unrecognised character `\\u{0}`"),
        ErrorTip::None => panic!("illegal tokens should carry a tip"),
    }
}

#[test]
fn test_read_failure() {
    let error = Error::new(
        ErrorImpl::ReadFailure {
            path: "missing.mk".to_string(),
            message: "No such file or directory".to_string(),
        },
        Position::null(),
    );

    assert_eq!(error.get_error_name(), "ReadFailure");
    assert_eq!(
        error.get_tip().to_string(),
        "Could not read `missing.mk`: No such file or directory"
    );
}

#[test]
fn test_stream_failures_have_no_tip() {
    let input = Error::new(
        ErrorImpl::InputFailure {
            message: "broken pipe".to_string(),
        },
        Position::null(),
    );
    let output = Error::new(
        ErrorImpl::OutputFailure {
            message: "broken pipe".to_string(),
        },
        Position::null(),
    );

    assert!(matches!(input.get_tip(), ErrorTip::None));
    assert!(matches!(output.get_tip(), ErrorTip::None));
    assert_eq!(output.get_error_name(), "OutputFailure");
}

#[test]
fn test_error_display() {
    let error = Error::new(
        ErrorImpl::IllegalToken {
            token: "#".to_string(),
        },
        Position(3, Rc::new("shell".to_string())),
    );

    assert_eq!(error.to_string(), "illegal token: \"#\" at shell:3");
}

#[test]
fn test_position_from_offset_saturates() {
    let file = Rc::new("big.mk".to_string());

    assert_eq!(Position::from_offset(42, file.clone()).0, 42);
    assert_eq!(Position::from_offset(u32::MAX as usize, file.clone()).0, u32::MAX);
    assert_eq!(Position::from_offset(usize::MAX, file).0, u32::MAX);
}
