//! tonic service for `envoy.service.auth.v3.Authorization`.

use std::sync::Arc;

use envoy_types::ext_authz::v3::pb::{
    Authorization, AuthorizationServer, CheckRequest, CheckResponse,
};
use tonic::{Request, Response, Status};

use super::mapper::{request_headers, to_check_response};
use crate::domain::service::Authorizer;

/// Envoy external authorization endpoint.
///
/// Denials are returned in-band as a `CheckResponse`; the RPC itself only
/// fails if the transport does.
#[derive(Clone)]
pub struct ExtAuthzService {
    authorizer: Arc<Authorizer>,
}

impl ExtAuthzService {
    #[must_use]
    pub fn new(authorizer: Arc<Authorizer>) -> Self {
        Self { authorizer }
    }

    /// Wrap into the generated tonic server.
    #[must_use]
    pub fn into_server(self) -> AuthorizationServer<Self> {
        AuthorizationServer::new(self)
    }
}

#[tonic::async_trait]
impl Authorization for ExtAuthzService {
    async fn check(
        &self,
        request: Request<CheckRequest>,
    ) -> Result<Response<CheckResponse>, Status> {
        let headers = request_headers(request.get_ref());
        let decision = self.authorizer.check(&headers).await;
        Ok(Response::new(to_check_response(&decision)))
    }
}
