//! 提交客户端测试，使用 wiremock 模拟后端

use chronologic_client::{CsvFile, Endpoint, SubmissionClient, SubmitError, UploadPayload, WorkerListForm};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_csv() -> CsvFile {
    CsvFile::new(
        "operations.csv",
        "Робітник,Розряд,Обладнання,Затрати часу, хв\n1,4,УМ,1.4\n",
    )
}

#[tokio::test]
async fn test_success_body_is_returned_unchanged() {
    let server = MockServer::start().await;
    let body = r#"{"success":true,"data":{"x":1},"total_sum":120,"max_parallel_time":45}"#;

    Mock::given(method("POST"))
        .and(path("/api/process"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;

    let client = SubmissionClient::with_base_url(&server.uri());
    let result = client
        .process(Some(sample_csv()), &WorkerListForm::new())
        .await
        .unwrap();

    assert_eq!(
        result,
        json!({"success": true, "data": {"x": 1}, "total_sum": 120, "max_parallel_time": 45})
    );
}

#[tokio::test]
async fn test_non_success_status_carries_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/process-fixed"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server exploded"))
        .mount(&server)
        .await;

    let client = SubmissionClient::with_base_url(&server.uri());
    let err = client.process_fixed(Some(sample_csv())).await.unwrap_err();

    match err {
        SubmitError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "server exploded");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_not_swallowed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/process"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = SubmissionClient::with_base_url(&server.uri());
    let err = client
        .process(Some(sample_csv()), &WorkerListForm::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::InvalidJson { ref raw, .. } if raw == "not json"));
}

#[tokio::test]
async fn test_process_sends_file_and_workers_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/process"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"operations.csv\""))
        .and(body_string_contains("name=\"workers\""))
        .and(body_string_contains(
            r#"[{"id":1,"grade":"5","equipment":"оверлок"}]"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = WorkerListForm::new();
    let removed = form.add_worker("4", "УМ");
    form.add_worker("5", "оверлок");
    form.remove_row(removed);

    let client = SubmissionClient::with_base_url(&server.uri());
    client.process(Some(sample_csv()), &form).await.unwrap();
}

#[tokio::test]
async fn test_process_fixed_sends_only_file() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/process-fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = SubmissionClient::with_base_url(&server.uri());
    client
        .submit(Endpoint::ProcessFixed, UploadPayload::file_only(sample_csv()))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(!body.contains("name=\"workers\""));
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "app": "ChronoLogic"})),
        )
        .mount(&server)
        .await;

    let client = SubmissionClient::with_base_url(&server.uri());
    let health = client.health().await.unwrap();
    assert_eq!(health["status"], "ok");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // discard 端口，没有服务监听
    let client = SubmissionClient::with_base_url("http://127.0.0.1:9");
    let err = client.process_fixed(Some(sample_csv())).await.unwrap_err();
    assert!(matches!(err, SubmitError::Transport { .. }));
}
