use std::fs;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use compose2zeabur::config::{RunConfig, VendorConfig};
use compose2zeabur::{ConvertClient, Error, TemplateEntry, TemplateStore, Vendor};

const SCHEMA: &str = r#"{"$schema":"https://json-schema.org/draft/2020-12/schema"}"#;

/// Request as seen by the stub vendor
struct Captured
{   head: String
  , body: serde_json::Value
}

impl Captured
{   fn prompt(&self) -> &str
    {   self.body["messages"][0]["content"].as_str().unwrap_or_default()
    }
}

fn content_length(head: &str) -> usize
{   head.lines()
      .filter_map(|line| line.split_once(':'))
      .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
      .and_then(|(_, value)| value.trim().parse().ok())
      .unwrap_or(0)
}

/// Serve exactly one HTTP response, returning the endpoint URL and a
/// handle resolving to the captured request.
async fn serve_once(
  status_line: &'static str
, response_body: String
) -> (String, tokio::task::JoinHandle<Captured>)
{   let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/v1/chat", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await.unwrap();
      let mut buf = Vec::new();
      let mut chunk = [0u8; 4096];
      let (head, body_start) = loop
      {   let n = socket.read(&mut chunk).await.unwrap();
          assert!(n > 0, "client closed before sending headers");
          buf.extend_from_slice(&chunk[..n]);
          if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n")
          {   break (String::from_utf8_lossy(&buf[..pos]).into_owned(), pos + 4);
          }
      };
      let wanted = content_length(&head);
      while buf.len() < body_start + wanted
      {   let n = socket.read(&mut chunk).await.unwrap();
          assert!(n > 0, "client closed mid-body");
          buf.extend_from_slice(&chunk[..n]);
      }
      let body = serde_json::from_slice(&buf[body_start..body_start + wanted])
        .unwrap_or(serde_json::Value::Null);

      let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line, response_body.len(), response_body
      );
      socket.write_all(response.as_bytes()).await.unwrap();
      socket.shutdown().await.unwrap();

      Captured { head, body }
    });

    (url, handle)
}

fn project(compose: &str) -> tempfile::TempDir
{   let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("docker-compose.yaml"), compose).unwrap();
    fs::write(dir.path().join("schema.json"), SCHEMA).unwrap();
    dir
}

fn run_config(dir: &Path) -> RunConfig
{   RunConfig
    {   work_dir: dir.to_path_buf()
      , ..RunConfig::default()
    }
}

fn client_for(vendor: Vendor, url: String) -> ConvertClient
{   // the stub is local; keep any ambient HTTP proxy out of the way
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let config = VendorConfig
    {   api_base: url
      , timeout_secs: Some(10)
      , ..VendorConfig::for_vendor(vendor)
    };
    ConvertClient::new(config).unwrap()
}

fn deepseek_reply(content: &str) -> String
{   serde_json::json!({
      "id": "chatcmpl-1",
      "object": "chat.completion",
      "created": 1,
      "choices": [
        {"message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
      ]
    }).to_string()
}

#[tokio::test]
async fn test_deepseek_conversion_writes_response_verbatim()
{   let dir = project("services:\n  cache:\n    image: Redis:7-alpine\n");
    let (url, stub) = serve_once("200 OK", deepseek_reply("foo: bar")).await;
    let client = client_for(Vendor::DeepSeek, url);

    let written = compose2zeabur::convert::run(
      &client, "test-key", &TemplateStore::bundled(), &run_config(dir.path())
    ).await.unwrap();

    assert_eq!(written, dir.path().join("zeabur-template.yaml"));
    assert_eq!(fs::read_to_string(&written).unwrap(), "foo: bar");

    let captured = stub.await.unwrap();
    let head = captured.head.to_lowercase();
    assert!(head.starts_with("post /v1/chat"));
    assert!(head.contains("authorization: bearer test-key"));
    assert_eq!(captured.body["model"], "deepseek-coder");
    assert_eq!(captured.body["max_tokens"], 4096);
    assert!(captured.body["temperature"].is_number());

    let prompt = captured.prompt();
    assert_eq!(prompt.matches("<service>\n<name>redis</name>").count(), 1);
    assert_eq!(prompt.matches("<services>").count(), 1);
    assert!(!prompt.contains("<name>postgres</name>"));
}

#[tokio::test]
async fn test_anthropic_conversion_uses_api_key_headers()
{   let dir = project("services:\n  web:\n    image: nginx\n");
    let reply = serde_json::json!({
      "id": "msg_1",
      "type": "message",
      "role": "assistant",
      "content": [{"type": "text", "text": "foo: bar"}],
      "stop_reason": "end_turn"
    }).to_string();
    let (url, stub) = serve_once("200 OK", reply).await;
    let client = client_for(Vendor::Anthropic, url);

    let written = compose2zeabur::convert::run(
      &client, "claude-key", &TemplateStore::bundled(), &run_config(dir.path())
    ).await.unwrap();
    assert_eq!(fs::read_to_string(written).unwrap(), "foo: bar");

    let captured = stub.await.unwrap();
    let head = captured.head.to_lowercase();
    assert!(head.contains("x-api-key: claude-key"));
    assert!(head.contains("anthropic-version: 2023-06-01"));
    assert!(!head.contains("authorization:"));
    assert!(captured.body.get("temperature").is_none());
    assert_eq!(captured.body["model"], "claude-3-5-sonnet-20241022");
    assert!(!captured.prompt().contains("<services>"));
}

#[tokio::test]
async fn test_remote_error_aborts_before_writing()
{   let dir = project("services:\n  db:\n    image: postgres:16\n");
    let reply = r#"{"error":{"message":"Authentication Fails (no such user)","type":"authentication_error"}}"#;
    let (url, _stub) = serve_once("401 Unauthorized", reply.to_string()).await;
    let client = client_for(Vendor::DeepSeek, url);

    let result = compose2zeabur::convert::run(
      &client, "bad-key", &TemplateStore::bundled(), &run_config(dir.path())
    ).await;

    assert_eq!(
      result,
      Err(Error::Remote("Authentication Fails (no such user)".to_string()))
    );
    assert!(!dir.path().join("zeabur-template.yaml").exists());
}

#[tokio::test]
async fn test_empty_choices_is_empty_response()
{   let dir = project("services: {}\n");
    let reply = r#"{"id":"chatcmpl-2","object":"chat.completion","created":1,"choices":[]}"#;
    let (url, _stub) = serve_once("200 OK", reply.to_string()).await;
    let client = client_for(Vendor::DeepSeek, url);

    let result = compose2zeabur::convert::run(
      &client, "key", &TemplateStore::bundled(), &run_config(dir.path())
    ).await;
    assert_eq!(result, Err(Error::EmptyResponse));
}

#[tokio::test]
async fn test_missing_inputs_stop_before_any_request()
{   let dir = tempfile::tempdir().unwrap();
    // nothing listens here; reaching the network would be a Transport error
    let client = client_for(Vendor::DeepSeek, "http://127.0.0.1:9/".to_string());

    let result = compose2zeabur::convert::run(
      &client, "key", &TemplateStore::bundled(), &run_config(dir.path())
    ).await;
    assert!(matches!(result, Err(Error::MissingInput(_))));
}

#[test]
fn test_templates_from_directory()
{   let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("zookeeper.md"), "zk").unwrap();
    fs::write(dir.path().join("minio.md"), "minio").unwrap();
    fs::write(dir.path().join("README.txt"), "ignored").unwrap();
    fs::create_dir(dir.path().join("nested.md")).unwrap();

    let store = TemplateStore::from_dir(dir.path()).unwrap();
    assert_eq!(
      store.entries(),
      &[
        TemplateEntry
        {   service_key: "minio".to_string()
          , body: "minio".to_string()
        }
      , TemplateEntry
        {   service_key: "zookeeper".to_string()
          , body: "zk".to_string()
        }
      ]
    );

    let matched = store.matching("image: bitnami/ZooKeeper:3.9");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].service_key, "zookeeper");
}

#[test]
fn test_prompt_for_unknown_services_has_no_services_block()
{   let store = TemplateStore::bundled();
    let compose = "services:\n  app:\n    image: ghcr.io/acme/app:1.0\n";
    let matched = store.matching(compose);
    let prompt = compose2zeabur::prompt::build(compose, SCHEMA, &matched);
    assert!(!prompt.contains("<services>"));
    assert!(prompt.contains(compose));
    assert!(prompt.contains(SCHEMA));
}
