//! M-Pesa Express (STK push) integration tests

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{json, Value};

use mpesa::{ExpressClient, FixedClock, MpesaError};

use crate::common::{fixtures, test_config};
use crate::mocks::{DarajaTestData, MockDarajaServer, MOCK_TOKEN};

const PUSH_PATH: &str = "/mpesa/stkpush/v1/processrequest";
const QUERY_PATH: &str = "/mpesa/stkpushquery/v1/query";

fn frozen() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap()
}

/// Decoded password must be shortcode + passkey + the Timestamp field
fn assert_password_matches_timestamp(body: &Value, short_code: &str, pass_key: &str) {
    let timestamp = body["Timestamp"].as_str().unwrap();
    let password = body["Password"].as_str().unwrap();
    let decoded = String::from_utf8(STANDARD.decode(password).unwrap()).unwrap();
    assert_eq!(decoded, format!("{}{}{}", short_code, pass_key, timestamp));
}

#[tokio::test]
async fn test_stk_push_with_frozen_clock() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_success(PUSH_PATH, DarajaTestData::stk_accepted())
        .await;

    let client = ExpressClient::connect(test_config(&mock.uri()))
        .await
        .unwrap()
        .with_clock(FixedClock(frozen()));
    let response = client.stk_push(&fixtures::stk_push()).await.unwrap();

    assert_eq!(response["ResponseCode"], "0");
    assert_eq!(response["CheckoutRequestID"], "ws_CO_191220191020363925");

    let body: Value = mock.requests_to(PUSH_PATH).await[0].body_json().unwrap();
    assert_eq!(body["Timestamp"], json!("20240309235959"));
    assert_eq!(
        body["Password"],
        json!(STANDARD.encode("600789pass_key20240309235959"))
    );
    assert_eq!(body["BusinessShortCode"], json!(600789));
    assert_eq!(body["PartyB"], json!(600789));
    assert_eq!(body["CallBackURL"], json!("https://example.com/callback"));
}

#[tokio::test]
async fn test_stk_push_password_matches_timestamp_with_system_clock() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_success(PUSH_PATH, DarajaTestData::stk_accepted())
        .await;

    let client = ExpressClient::connect(test_config(&mock.uri()))
        .await
        .unwrap();
    for _ in 0..3 {
        client.stk_push(&fixtures::stk_push()).await.unwrap();
    }

    let requests = mock.requests_to(PUSH_PATH).await;
    assert_eq!(requests.len(), 3);
    for request in requests {
        let body: Value = request.body_json().unwrap();
        assert_password_matches_timestamp(&body, "600789", "pass_key");
    }
}

#[tokio::test]
async fn test_stk_query_success() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_success(
        QUERY_PATH,
        json!({
            "ResponseCode": "0",
            "ResponseDescription": "The service request has been accepted successsfully",
            "MerchantRequestID": "22205-34066-1",
            "CheckoutRequestID": "ws_CO_191220191020363925",
            "ResultCode": "1032",
            "ResultDesc": "Request cancelled by user"
        }),
    )
    .await;

    let client = ExpressClient::connect(test_config(&mock.uri()))
        .await
        .unwrap()
        .with_clock(FixedClock(frozen()));
    let response = client.stk_query(&fixtures::stk_query()).await.unwrap();

    assert_eq!(response["ResultCode"], "1032");

    let body: Value = mock.requests_to(QUERY_PATH).await[0].body_json().unwrap();
    assert_eq!(
        body,
        json!({
            "BusinessShortCode": 600789,
            "Password": STANDARD.encode("600789pass_key20240309235959"),
            "Timestamp": "20240309235959",
            "CheckoutRequestID": "ws_CO_191220191020363925"
        })
    );
}

#[tokio::test]
async fn test_stk_push_http_error() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_status(PUSH_PATH, 500).await;

    let client = ExpressClient::connect(test_config(&mock.uri()))
        .await
        .unwrap();
    let err = client.stk_push(&fixtures::stk_push()).await.unwrap_err();

    assert!(matches!(err, MpesaError::HttpStatus { status: 500, .. }));
}
