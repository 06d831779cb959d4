//! Demo greeting service.
//!
//! `api.v1.TestService/SayHello` echoes a greeting for the given name. It
//! has no failure modes and exists to exercise the gRPC transport and trace
//! propagation alongside the authorization endpoint.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

#[allow(clippy::pedantic, clippy::must_use_candidate)]
pub mod proto {
    tonic::include_proto!("api.v1");
}

use tonic::{Request, Response, Status};
use tracing::info;

use proto::test_service_server::{TestService, TestServiceServer};
use proto::{SayHelloRequest, SayHelloResponse};

/// Format the greeting for `name`.
#[must_use]
pub fn greeting(name: &str) -> String {
    format!("Hello {name}!")
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Greeter;

impl Greeter {
    #[must_use]
    pub fn into_server(self) -> TestServiceServer<Self> {
        TestServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl TestService for Greeter {
    async fn say_hello(
        &self,
        request: Request<SayHelloRequest>,
    ) -> Result<Response<SayHelloResponse>, Status> {
        info!("SayHello called");
        let name = request.into_inner().name;
        Ok(Response::new(SayHelloResponse {
            text: greeting(&name),
        }))
    }
}
