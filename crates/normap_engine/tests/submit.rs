use std::time::Duration;

use normap_engine::{
    FailureKind, Prediction, ReqwestSubmitter, SubmitSettings, Submitter, UploadPayload,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn text_payload(text: &str) -> UploadPayload {
    UploadPayload {
        file_name: "input.txt".to_string(),
        media_type: "text/plain".to_string(),
        bytes: text.as_bytes().to_vec(),
    }
}

fn submitter_for(server: &MockServer) -> ReqwestSubmitter {
    ReqwestSubmitter::new(SubmitSettings::with_base_url(server.uri()))
}

#[tokio::test]
async fn upload_posts_single_file_field_and_returns_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process_file"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains(r#"name="file""#))
        .and(body_string_contains(r#"filename="input.txt""#))
        .and(body_string_contains("text/plain"))
        .and(body_string_contains("Kyiv, Khreshchatyk 1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"city": "Київ", "street": "Хрещатик", "build": "1"}],
            "total_processed": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = submitter_for(&server)
        .submit(1, text_payload("Kyiv, Khreshchatyk 1"))
        .await
        .expect("submit ok");

    assert_eq!(
        body,
        json!({
            "results": [{"city": "Київ", "street": "Хрещатик", "build": "1"}],
            "total_processed": 1
        })
    );
}

#[tokio::test]
async fn uploaded_file_keeps_its_name_and_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process_file"))
        .and(body_string_contains(r#"filename="batch.csv""#))
        .and(body_string_contains("text/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = UploadPayload {
        file_name: "batch.csv".to_string(),
        media_type: "text/csv".to_string(),
        bytes: b"id,address\n1,Lviv\n".to_vec(),
    };
    let body = submitter_for(&server).submit(2, payload).await.expect("ok");
    assert_eq!(body, json!({"results": []}));
}

#[tokio::test]
async fn server_error_is_http_status_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process_file"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = submitter_for(&server)
        .submit(3, text_payload("Odesa"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn invalid_json_is_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process_file"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = submitter_for(&server)
        .submit(4, text_payload("Kharkiv"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn unreachable_service_is_network_failure() {
    let submitter = ReqwestSubmitter::new(SubmitSettings::with_base_url("http://127.0.0.1:1"));
    let err = submitter.submit(5, text_payload("Dnipro")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn unparsable_base_url_is_invalid_url() {
    let submitter = ReqwestSubmitter::new(SubmitSettings::with_base_url("not a url"));
    let err = submitter.submit(6, text_payload("Dnipro")).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn configured_deadline_surfaces_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process_file"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let settings = SubmitSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..SubmitSettings::with_base_url(server.uri())
    };
    let err = ReqwestSubmitter::new(settings)
        .submit(7, text_payload("Poltava"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn predict_posts_text_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(header_regex("content-type", "^application/json"))
        .and(body_json(json!({"text": "м. Київ, вул Хрещатик 1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "input": "м. Київ, вул Хрещатик 1",
            "normalized": "<CITY> Київ </CITY> <STREET> Хрещатик </STREET> 1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prediction = submitter_for(&server)
        .predict("м. Київ, вул Хрещатик 1")
        .await
        .expect("predict ok");
    assert_eq!(
        prediction,
        Prediction {
            input: "м. Київ, вул Хрещатик 1".to_string(),
            normalized: "<CITY> Київ </CITY> <STREET> Хрещатик </STREET> 1".to_string(),
        }
    );
}

#[tokio::test]
async fn predict_rejects_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"city": "Київ"})))
        .mount(&server)
        .await;

    let err = submitter_for(&server).predict("Київ").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}
