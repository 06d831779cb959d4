//! tonic server wiring.

use std::future::Future;
use std::sync::Arc;

use ext_authz::{AuthConfig, Authorizer, ExtAuthzService};
use greeter::Greeter;
use tempo_telemetry::{make_span_with_context, record_response};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use users::UserStore;

/// Serve `TestService` and `Authorization` on `listener` until `shutdown`
/// resolves. In-flight calls are drained before returning.
///
/// # Errors
///
/// Returns the transport error that stopped the server.
pub async fn serve<F>(
    listener: TcpListener,
    store: Arc<dyn UserStore>,
    auth: AuthConfig,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()> + Send,
{
    let authorizer = Arc::new(Authorizer::new(store, auth));

    Server::builder()
        .layer(
            TraceLayer::new_for_grpc()
                .make_span_with(make_span_with_context)
                .on_response(record_response),
        )
        .add_service(Greeter.into_server())
        .add_service(ExtAuthzService::new(authorizer).into_server())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}
