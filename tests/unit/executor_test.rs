//! Tests for the HTTP request executor

use std::sync::Mutex;

use spida_webhook::WebhookError;
use spida_webhook::http::{
    HttpExecutor, HttpMethod, OnError, OnResponse, RequestDescriptor, ServerTarget,
    default_response_handler, project_update_response_handler,
};
use spida_webhook::logging::{Channel, LogLevel};

use crate::common::{RecordingTransport, memory_logger};

fn target() -> ServerTarget {
    ServerTarget {
        protocol: "test".to_string(),
        hostname: "test".to_string(),
        port: 123,
    }
}

// =============================================================================
// REQUEST DISPATCH
// =============================================================================

#[tokio::test]
async fn test_body_written_and_handler_gets_full_body() {
    let transport = RecordingTransport::responding(200, "{}");
    let (logger, _) = memory_logger(LogLevel::Info);
    let executor = HttpExecutor::new(&transport, &logger);
    let seen = Mutex::new(None);

    let descriptor = RequestDescriptor::new(&target(), HttpMethod::Post, "/test")
        .with_form_body("body".to_string())
        .with_on_response(OnResponse::handler(|response, _| {
            *seen.lock().unwrap() = Some((response.status, response.body.clone()));
            Ok(())
        }));
    executor.send_request(descriptor).await.unwrap();

    let request = transport.only_request();
    assert_eq!(request.body.as_deref(), Some("body"));
    assert_eq!(request.url, "test://test:123/test");
    assert_eq!(seen.into_inner().unwrap(), Some((200, "{}".to_string())));
}

#[tokio::test]
async fn test_no_body_when_descriptor_has_none() {
    let transport = RecordingTransport::responding(200, "");
    let (logger, _) = memory_logger(LogLevel::Info);
    let executor = HttpExecutor::new(&transport, &logger);

    executor
        .send_request(RequestDescriptor::new(&target(), HttpMethod::Get, "/test"))
        .await
        .unwrap();

    let request = transport.only_request();
    assert_eq!(request.method, HttpMethod::Get);
    assert!(request.body.is_none());
    assert!(request.headers.is_empty());
}

#[tokio::test]
async fn test_logs_method_and_url_at_info() {
    let transport = RecordingTransport::responding(200, "");
    let (logger, sink) = memory_logger(LogLevel::Info);
    let executor = HttpExecutor::new(&transport, &logger);

    executor
        .send_request(RequestDescriptor::new(&target(), HttpMethod::Get, "/a?b=c"))
        .await
        .unwrap();

    assert!(sink.contains(Channel::Info, "HTTP GET request to test://test:123/a?b=c"));
    assert!(sink.contains(Channel::Info, "Success."));
}

// =============================================================================
// DEFAULT HANDLERS
// =============================================================================

#[tokio::test]
async fn test_default_handler_fails_on_non_200() {
    let transport = RecordingTransport::responding(500, "boom");
    let (logger, sink) = memory_logger(LogLevel::Error);
    let executor = HttpExecutor::new(&transport, &logger);

    let err = executor
        .send_request(RequestDescriptor::new(&target(), HttpMethod::Get, "/"))
        .await
        .unwrap_err();

    assert!(matches!(err, WebhookError::RequestFailed { status: 500 }));
    assert!(sink.contains(Channel::Error, "STATUS: 500"));
    assert!(sink.contains(Channel::Error, "HEADERS: {\"content-type\":\"application/json\"}"));
    assert!(sink.contains(Channel::Error, "RESPONSE BODY: boom"));
}

#[tokio::test]
async fn test_default_error_handler_fails() {
    let transport = RecordingTransport::failing("connection refused");
    let (logger, sink) = memory_logger(LogLevel::Error);
    let executor = HttpExecutor::new(&transport, &logger);

    let err = executor
        .send_request(RequestDescriptor::new(&target(), HttpMethod::Get, "/"))
        .await
        .unwrap_err();

    assert!(matches!(err, WebhookError::Transport(_)));
    assert!(sink.contains(Channel::Error, "connection refused"));
}

#[tokio::test]
async fn test_custom_error_handler_can_recover() {
    let transport = RecordingTransport::failing("dns failure");
    let (logger, _) = memory_logger(LogLevel::None);
    let executor = HttpExecutor::new(&transport, &logger);
    let recovered = Mutex::new(String::new());

    let descriptor = RequestDescriptor::new(&target(), HttpMethod::Get, "/").with_on_error(
        OnError::handler(|error, _| {
            *recovered.lock().unwrap() = error.message().to_string();
            Ok(())
        }),
    );
    executor.send_request(descriptor).await.unwrap();

    assert_eq!(recovered.into_inner().unwrap(), "dns failure");
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_custom_response_handler_replaces_default() {
    let transport = RecordingTransport::responding(404, "missing");
    let (logger, _) = memory_logger(LogLevel::None);
    let executor = HttpExecutor::new(&transport, &logger);

    let descriptor = RequestDescriptor::new(&target(), HttpMethod::Get, "/")
        .with_on_response(OnResponse::handler(|_, _| Ok(())));

    assert!(executor.send_request(descriptor).await.is_ok());
}

mod handler_tests {
    use spida_webhook::WebhookError;
    use spida_webhook::http::HttpResponse;
    use spida_webhook::logging::{Channel, LogLevel};

    use super::{default_response_handler, project_update_response_handler};
    use crate::common::memory_logger;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Default::default(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_update_acknowledged() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        project_update_response_handler(&response(200, r#"{"result":{"id":1}}"#), &logger).unwrap();
        assert!(sink.contains(Channel::Info, "Successfully updated SPIDAmin project."));
    }

    #[test]
    fn test_update_without_acknowledgment_is_not_fatal() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        project_update_response_handler(&response(200, "{}"), &logger).unwrap();
        assert!(sink.contains(Channel::Error, "without an acknowledgment"));
    }

    #[test]
    fn test_update_with_non_json_200_is_fatal() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        let err = project_update_response_handler(&response(200, "<html>oops</html>"), &logger)
            .unwrap_err();
        assert!(matches!(err, WebhookError::MalformedResponse(_)));
        assert!(sink.contains(Channel::Error, "<html>oops</html>"));
    }

    #[test]
    fn test_update_with_zero_id_is_not_acknowledged() {
        let (logger, sink) = memory_logger(LogLevel::Info);
        project_update_response_handler(&response(200, r#"{"result":{"id":0}}"#), &logger).unwrap();
        assert!(sink.contains(Channel::Error, "without an acknowledgment"));
        assert!(!sink.contains(Channel::Info, "Successfully updated"));
    }

    #[test]
    fn test_update_404_is_fatal() {
        let (logger, _) = memory_logger(LogLevel::Info);
        let err = project_update_response_handler(&response(404, r#"{"result":{"id":1}}"#), &logger)
            .unwrap_err();
        assert!(matches!(err, WebhookError::RequestFailed { status: 404 }));
    }

    #[test]
    fn test_default_only_accepts_200() {
        let (logger, _) = memory_logger(LogLevel::None);
        assert!(default_response_handler(&response(200, ""), &logger).is_ok());
        assert!(default_response_handler(&response(201, ""), &logger).is_err());
        assert!(default_response_handler(&response(204, ""), &logger).is_err());
    }
}
