#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Serves the full stack on an ephemeral port against `SQLite` and calls it
//! through generated clients.

use std::sync::Arc;
use std::time::Duration;

use envoy_types::pb::envoy::service::auth::v3::attribute_context::{HttpRequest, Request};
use envoy_types::pb::envoy::service::auth::v3::authorization_client::AuthorizationClient;
use envoy_types::pb::envoy::service::auth::v3::check_response::HttpResponse;
use envoy_types::pb::envoy::service::auth::v3::{AttributeContext, CheckRequest};
use ext_authz::AuthConfig;
use greeter::proto::SayHelloRequest;
use greeter::proto::test_service_client::TestServiceClient;
use grpc_server::server::serve;
use secrecy::SecretString;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use users::{DatabaseConfig, SeaOrmUserStore, UserStore};

struct Running {
    endpoint: String,
    stop: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<Result<(), tonic::transport::Error>>,
}

async fn start() -> Running {
    let cfg = DatabaseConfig {
        dsn: SecretString::from("sqlite::memory:"),
        max_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = users::connect(&cfg).await.unwrap();
    users::upgrade_db(&db).await.unwrap();
    let store: Arc<dyn UserStore> = Arc::new(SeaOrmUserStore::new(db, Duration::from_secs(5)));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve(listener, store, AuthConfig::default(), async {
        let _ = stopped.await;
    }));

    Running {
        endpoint,
        stop,
        handle,
    }
}

fn check_request(authorization: &str) -> CheckRequest {
    CheckRequest {
        attributes: Some(AttributeContext {
            request: Some(Request {
                http: Some(HttpRequest {
                    method: "GET".to_owned(),
                    path: "/test".to_owned(),
                    headers: [("authorization".to_owned(), authorization.to_owned())].into(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn say_hello_over_the_wire() {
    let server = start().await;
    let mut client = TestServiceClient::connect(server.endpoint.clone())
        .await
        .unwrap();

    let mut request = tonic::Request::new(SayHelloRequest {
        name: "World".to_owned(),
    });
    request.metadata_mut().insert(
        "traceparent",
        "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"
            .parse()
            .unwrap(),
    );
    let resp = client.say_hello(request).await.unwrap().into_inner();

    assert_eq!(resp.text, "Hello World!");

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn seeded_user_is_allowed_and_wrong_password_denied() {
    let server = start().await;
    let mut client = AuthorizationClient::connect(server.endpoint.clone())
        .await
        .unwrap();

    // test:test
    let allowed = client
        .check(check_request("Basic dGVzdDp0ZXN0"))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(allowed.status.unwrap().code, i32::from(tonic::Code::Ok));
    let Some(HttpResponse::OkResponse(ok)) = allowed.http_response else {
        panic!("expected ok response");
    };
    let header = ok.headers[0].header.as_ref().unwrap();
    assert_eq!((header.key.as_str(), header.value.as_str()), ("x-user-info", "test"));

    // test:nope
    let denied = client
        .check(check_request("Basic dGVzdDpub3Bl"))
        .await
        .unwrap()
        .into_inner();
    let status = denied.status.unwrap();
    assert_eq!(status.code, i32::from(tonic::Code::Unauthenticated));
    assert_eq!(status.message, "invalid password");

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}
