//! B2C payout integration tests

use serde_json::{json, Value};

use mpesa::{B2cClient, MpesaError, RequestFailure};

use crate::common::{fixtures, test_config};
use crate::mocks::{DarajaTestData, MockDarajaServer, MOCK_TOKEN};

const PATH: &str = "/mpesa/b2c/v3/paymentrequest";

#[tokio::test]
async fn test_payment_request_success() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_success(
        PATH,
        json!({"ResponseCode": "0", "ResponseDescription": "Success"}),
    )
    .await;

    let client = B2cClient::connect(test_config(&mock.uri())).await.unwrap();
    let response = client
        .payment_request(&fixtures::payment_request())
        .await
        .unwrap();

    assert_eq!(response["ResponseCode"], "0");
    assert_eq!(response["ResponseDescription"], "Success");
}

#[tokio::test]
async fn test_payment_request_payload_quirks() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_success(PATH, DarajaTestData::accepted()).await;

    let client = B2cClient::connect(test_config(&mock.uri())).await.unwrap();
    client
        .payment_request(&fixtures::payment_request())
        .await
        .unwrap();

    let requests = mock.requests_to(PATH).await;
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["Amount"], json!("10"));
    assert_eq!(body["PartyA"], json!(600996));
    assert_eq!(body["Occassion"], Value::Null);
    assert!(body.get("Occasion").is_none());
}

#[tokio::test]
async fn test_repeated_calls_are_independent() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_success_expect(PATH, DarajaTestData::accepted(), 2)
        .await;

    let client = B2cClient::connect(test_config(&mock.uri())).await.unwrap();
    let request = fixtures::payment_request();

    let first = client.payment_request(&request).await.unwrap();
    let second = client.payment_request(&request).await.unwrap();

    assert_eq!(first, second);
    // One token call at construction, then one POST per operation call
    assert_eq!(mock.received_requests().await.len(), 3);
}

#[tokio::test]
async fn test_unparsable_body_is_request_error() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_raw(PATH, "<html>Gateway Timeout</html>").await;

    let client = B2cClient::connect(test_config(&mock.uri())).await.unwrap();
    let err = client
        .payment_request(&fixtures::payment_request())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MpesaError::Request {
            source: RequestFailure::Body(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_non_object_body_is_response_format_error() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_raw(PATH, "[1, 2, 3]").await;

    let client = B2cClient::connect(test_config(&mock.uri())).await.unwrap();
    let err = client
        .payment_request(&fixtures::payment_request())
        .await
        .unwrap_err();

    assert!(matches!(err, MpesaError::ResponseFormat { .. }));
}
