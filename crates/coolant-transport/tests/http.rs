//! Integration tests for the HTTP transport.
//!
//! Each test serves a one-shot `axum::Router` on `127.0.0.1:0` and checks
//! what actually went over the wire.

#[cfg(feature = "http")]
mod http {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Bytes;
    use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
    use axum::http::{HeaderMap, Method as HttpMethod, StatusCode, Uri};
    use coolant_transport::{ApiRequest, HttpTransport, Method, Transport, TransportError};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// A request as seen by the stub server.
    struct Captured {
        method: HttpMethod,
        path: String,
        headers: HeaderMap,
        body: Bytes,
    }

    /// Answers the first request with `status` + `body` and hands back what
    /// the client sent.
    async fn serve_once(
        status: u16,
        response_body: &'static str,
    ) -> (String, oneshot::Receiver<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
        let addr = listener.local_addr().expect("should have addr");
        let status = StatusCode::from_u16(status).expect("valid status");

        let (tx, rx) = oneshot::channel();
        let tx = Arc::new(Mutex::new(Some(tx)));
        let app = Router::new().fallback(
            move |method: HttpMethod, uri: Uri, headers: HeaderMap, body: Bytes| {
                let tx = Arc::clone(&tx);
                async move {
                    if let Some(tx) = tx.lock().unwrap().take() {
                        let _ = tx.send(Captured {
                            method,
                            path: uri.path().to_string(),
                            headers,
                            body,
                        });
                    }
                    (status, [(CONTENT_TYPE, "application/json")], response_body)
                }
            },
        );

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });

        (format!("http://{addr}/api"), rx)
    }

    fn header<'a>(captured: &'a Captured, name: axum::http::HeaderName) -> Option<&'a str> {
        captured.headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[tokio::test]
    async fn test_post_sends_json_body_and_returns_status() {
        let (base, server) = serve_once(200, r#"{"ok":true}"#).await;
        let transport = HttpTransport::new(&base).expect("valid url");

        let response = transport
            .send(ApiRequest::post("/login", br#"{"email":"a@b.c"}"#.to_vec()))
            .await
            .expect("request should succeed");

        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.body, br#"{"ok":true}"#);

        let captured = server.await.expect("server saw the request");
        assert_eq!(captured.method, HttpMethod::POST);
        assert_eq!(captured.path, "/api/login");
        assert_eq!(header(&captured, CONTENT_TYPE), Some("application/json"));
        assert_eq!(header(&captured, AUTHORIZATION), None);
        assert_eq!(&captured.body[..], br#"{"email":"a@b.c"}"#);
    }

    #[tokio::test]
    async fn test_get_attaches_bearer_credential() {
        let (base, server) = serve_once(200, "{}").await;
        let transport = HttpTransport::new(&base).expect("valid url");

        transport
            .send(ApiRequest::get("/profile").with_bearer("tok-123"))
            .await
            .expect("request should succeed");

        let captured = server.await.expect("server saw the request");
        assert_eq!(captured.method, HttpMethod::GET);
        assert_eq!(captured.path, "/api/profile");
        assert_eq!(header(&captured, AUTHORIZATION), Some("Bearer tok-123"));
        assert!(captured.body.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_response_not_an_error() {
        let (base, server) = serve_once(401, r#"{"error":"Token is invalid"}"#).await;
        let transport = HttpTransport::new(&base).expect("valid url");

        let response = transport
            .send(ApiRequest::new(Method::Delete, "/clients/4").with_bearer("t"))
            .await
            .expect("a 401 is still a response");

        assert_eq!(response.status, 401);
        assert!(!response.is_success());

        let captured = server.await.expect("server saw the request");
        assert_eq!(captured.method, HttpMethod::DELETE);
        assert_eq!(captured.path, "/api/clients/4");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_request_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("should bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let transport = HttpTransport::new(&format!("http://{addr}")).expect("valid url");
        let result = transport.send(ApiRequest::get("/profile")).await;

        assert!(matches!(result, Err(TransportError::Request(_))));
    }
}
