//! Unit tests for submission payload validation

use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{Map, Value, json};

use trade_ledger::error::LedgerError;
use trade_ledger::trade::TradeSide;
use trade_ledger::validation::validate_submission;

/// A payload that passes every check
fn valid_payload() -> Map<String, Value> {
    json!({
        "user_id": "u1",
        "ticker": "AAPL",
        "side": "sell",
        "price": 187.5,
        "volume": 10
    })
    .as_object()
    .expect("object payload")
    .clone()
}

#[rstest]
#[case::user_id("user_id")]
#[case::ticker("ticker")]
#[case::side("side")]
#[case::price("price")]
#[case::volume("volume")]
fn test_missing_field_names_exactly_that_field(#[case] field: &'static str) {
    let mut payload = valid_payload();
    payload.remove(field);

    let error = validate_submission(&Value::Object(payload)).unwrap_err();
    match error {
        LedgerError::MissingField { field: reported } => assert_eq!(reported, field),
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn test_missing_fields_reported_in_declaration_order() {
    let error = validate_submission(&json!({})).unwrap_err();
    assert!(matches!(
        error,
        LedgerError::MissingField { field: "user_id" }
    ));

    let error = validate_submission(&json!({ "user_id": "u1" })).unwrap_err();
    assert!(matches!(error, LedgerError::MissingField { field: "ticker" }));
}

#[rstest]
#[case::zero_price("price", json!(0))]
#[case::negative_price("price", json!(-3.5))]
#[case::string_price("price", json!("10"))]
#[case::null_price("price", json!(null))]
#[case::zero_volume("volume", json!(0))]
#[case::negative_volume("volume", json!(-2))]
#[case::fractional_volume("volume", json!(1.5))]
#[case::bool_volume("volume", json!(true))]
fn test_invalid_numeric_names_the_field(#[case] field: &'static str, #[case] value: Value) {
    let mut payload = valid_payload();
    payload.insert(field.to_string(), value);

    let error = validate_submission(&Value::Object(payload)).unwrap_err();
    match error {
        LedgerError::InvalidNumeric { field: reported } => assert_eq!(reported, field),
        other => panic!("expected InvalidNumeric, got {other:?}"),
    }
}

#[rstest]
#[case::uppercase(json!("BUY"))]
#[case::capitalized(json!("Sell"))]
#[case::unknown(json!("hold"))]
#[case::numeric(json!(1))]
fn test_invalid_side_is_rejected(#[case] side: Value) {
    let mut payload = valid_payload();
    payload.insert("side".to_string(), side);

    let error = validate_submission(&Value::Object(payload)).unwrap_err();
    assert!(matches!(
        error,
        LedgerError::InvalidEnum { field: "side", .. }
    ));
}

#[test]
fn test_numeric_errors_win_over_side_errors() {
    let mut payload = valid_payload();
    payload.insert("side".to_string(), json!("hold"));
    payload.insert("volume".to_string(), json!(0));

    let error = validate_submission(&Value::Object(payload)).unwrap_err();
    assert!(matches!(
        error,
        LedgerError::InvalidNumeric { field: "volume" }
    ));
}

#[rstest]
#[case::user_id("user_id")]
#[case::ticker("ticker")]
fn test_non_string_identity_fields_rejected(#[case] field: &'static str) {
    let mut payload = valid_payload();
    payload.insert(field.to_string(), json!(42));

    let error = validate_submission(&Value::Object(payload)).unwrap_err();
    match error {
        LedgerError::InvalidEnum {
            field: reported, ..
        } => assert_eq!(reported, field),
        other => panic!("expected InvalidEnum, got {other:?}"),
    }
}

#[test]
fn test_valid_payload_is_normalized() {
    let submission = validate_submission(&Value::Object(valid_payload())).unwrap();
    assert_eq!(submission.user_id, "u1");
    assert_eq!(submission.ticker, "AAPL");
    assert_eq!(submission.side, TradeSide::Sell);
    assert_eq!(submission.price, 187.5);
    assert_eq!(submission.volume, 10);
}

#[test]
fn test_integer_price_is_accepted() {
    let mut payload = valid_payload();
    payload.insert("price".to_string(), json!(200));

    let submission = validate_submission(&Value::Object(payload)).unwrap();
    assert_eq!(submission.price, 200.0);
}
