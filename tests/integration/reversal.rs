//! Reversal integration tests

use serde_json::{json, Value};

use mpesa::{MpesaError, ReversalClient};

use crate::common::{fixtures, test_config};
use crate::mocks::{DarajaTestData, MockDarajaServer, MOCK_TOKEN};

const PATH: &str = "/mpesa/reversal/v1/request";

#[tokio::test]
async fn test_reversal_success_with_default_identifier_type() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_success(PATH, DarajaTestData::accepted()).await;

    let client = ReversalClient::connect(test_config(&mock.uri())).await.unwrap();
    let response = client
        .reverse(&fixtures::reversal_request())
        .await
        .unwrap();

    assert_eq!(
        response["ResponseDescription"],
        "Accept the service request successfully."
    );

    let body: Value = mock.requests_to(PATH).await[0].body_json().unwrap();
    assert_eq!(body["RecieverIdentifierType"], json!("11"));
    assert_eq!(body["CommandID"], json!("TransactionReversal"));
    assert_eq!(body["ReceiverParty"], json!(600610));
    assert_eq!(body["Amount"], json!("100"));
}

#[tokio::test]
async fn test_reversal_explicit_identifier_type() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_success(PATH, DarajaTestData::accepted()).await;

    let mut request = fixtures::reversal_request();
    request.receiver_identifier_type = Some("4".to_string());
    request.occasion = Some("Refund".to_string());

    let client = ReversalClient::connect(test_config(&mock.uri())).await.unwrap();
    client.reverse(&request).await.unwrap();

    let body: Value = mock.requests_to(PATH).await[0].body_json().unwrap();
    assert_eq!(body["RecieverIdentifierType"], json!("4"));
    assert_eq!(body["Occasion"], json!("Refund"));
}

#[tokio::test]
async fn test_reversal_http_error() {
    let mock = MockDarajaServer::start().await;
    mock.mock_token_success(MOCK_TOKEN).await;
    mock.mock_post_status(PATH, 500).await;

    let client = ReversalClient::connect(test_config(&mock.uri())).await.unwrap();
    let err = client
        .reverse(&fixtures::reversal_request())
        .await
        .unwrap_err();

    assert!(matches!(err, MpesaError::HttpStatus { status: 500, .. }));
}
