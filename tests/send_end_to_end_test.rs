use recipeui::RecipeError;
use recipeui::curl::parse_curl;
use recipeui::http::Client;
use recipeui::output::{InMemoryOutputStore, OutputApi, OutputType};
use recipeui::runner::RequestRunner;
use recipeui::template::RecipeTemplate;
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn runner() -> RequestRunner {
    RequestRunner::new(
        Client::new().unwrap(),
        OutputApi::new(Arc::new(InMemoryOutputStore::new())),
    )
}

/// 测试解析 curl 并发送，输出记录到会话
#[tokio::test]
async fn test_send_parsed_curl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(header("x-api-key", "secret"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"name": "Alice"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "u1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let input = format!(
        r#"curl '{}/api/users' \
  -H 'X-Api-Key: secret' \
  --data "{{name: 'Alice'}}""#,
        mock_server.uri()
    );
    let descriptor = parse_curl(&input);
    assert_eq!(descriptor.method, "POST");

    let runner = runner();
    let response = runner.run("demo", &descriptor).await.unwrap();
    assert_eq!(response.status.code(), 201);

    let output = runner.outputs().current_output("demo", None).unwrap();
    assert_eq!(output.output_type, OutputType::Default);
    assert_eq!(output.status, Some(201));
    assert_eq!(output.output, json!({"id": "u1"}));
    assert_eq!(output.request, Some(descriptor));
    assert!(output.created_at.is_some());
}

/// 测试错误状态码记录为 error 输出
#[tokio::test]
async fn test_error_status_recorded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/42"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let descriptor = parse_curl(&format!(
        "curl -X DELETE {}/api/users/42",
        mock_server.uri()
    ));

    let runner = runner();
    let response = runner.run("demo", &descriptor).await.unwrap();
    assert!(response.is_client_error());

    let output = runner.outputs().current_output("demo", None).unwrap();
    assert_eq!(output.output_type, OutputType::Error);
    assert_eq!(output.output, json!("not found"));
}

/// 测试模板应用后发送
#[tokio::test]
async fn test_send_with_template() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/rust-lang/issues"))
        .and(query_param("state", "open"))
        .and(body_json(json!({"title": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let template_file = temp_dir.path().join("recipe.json5");
    fs::write(
        &template_file,
        r#"{
  // 创建 issue
  title: 'Create issue',
  requestBody: {title: 'hello'},
  urlParams: {owner: 'rust-lang'},
  queryParams: {state: 'open'},
}"#,
    )
    .unwrap();

    let mut descriptor = parse_curl(&format!(
        "curl {}/repos/{{owner}}/issues",
        mock_server.uri()
    ));
    RecipeTemplate::load(&template_file)
        .unwrap()
        .apply(&mut descriptor);
    assert_eq!(descriptor.method, "POST");

    let runner = runner();
    let response = runner.run("demo", &descriptor).await.unwrap();
    assert!(response.is_success());
}

/// 测试无法构建的请求仍记录失败输出
#[tokio::test]
async fn test_failure_recorded() {
    let descriptor = parse_curl("curl -H 'Accept: */*'");
    assert!(!descriptor.has_url());

    let runner = runner();
    let err = runner.run("demo", &descriptor).await.unwrap_err();
    assert!(matches!(err, RecipeError::InvalidUrl(_)));

    let outputs = runner.outputs().outputs("demo").unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].output_type, OutputType::Error);
    assert!(outputs[0].status.is_none());
}
