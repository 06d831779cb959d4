//! Conversions between Envoy `ext_authz` messages and domain types.

use std::collections::HashMap;

use envoy_types::ext_authz::v3::pb::{CheckRequest, CheckResponse};
use envoy_types::ext_authz::v3::{
    CheckRequestExt, CheckResponseExt, DeniedHttpResponseBuilder, OkHttpResponseBuilder,
};
use envoy_types::pb::envoy::config::core::v3::header_value_option::HeaderAppendAction;
use envoy_types::pb::envoy::r#type::v3::StatusCode as HttpStatusCode;
use tonic::Status;

use crate::domain::decision::{Decision, MergePolicy};

/// Headers of the HTTP request under evaluation.
///
/// A request without HTTP attributes yields an empty map, which the check
/// treats as a missing credential.
#[must_use]
pub fn request_headers(request: &CheckRequest) -> HashMap<String, String> {
    request.get_client_headers().cloned().unwrap_or_default()
}

fn append_action(policy: MergePolicy) -> HeaderAppendAction {
    match policy {
        MergePolicy::AppendIfExistsOrAdd => HeaderAppendAction::AppendIfExistsOrAdd,
        MergePolicy::AddIfAbsent => HeaderAppendAction::AddIfAbsent,
        MergePolicy::OverwriteIfExistsOrAdd => HeaderAppendAction::OverwriteIfExistsOrAdd,
    }
}

fn http_status(status: http::StatusCode) -> HttpStatusCode {
    HttpStatusCode::try_from(i32::from(status.as_u16())).unwrap_or(HttpStatusCode::Unauthorized)
}

/// Build the Envoy response for a decision.
///
/// Allow carries an OK status and the header mutations; Deny carries an
/// `UNAUTHENTICATED` status with the reason and the HTTP status Envoy returns
/// to the caller.
#[must_use]
pub fn to_check_response(decision: &Decision) -> CheckResponse {
    match decision {
        Decision::Allow { headers } => {
            let mut ok = OkHttpResponseBuilder::new();
            for mutation in headers {
                ok.add_header(
                    mutation.name.clone(),
                    mutation.value.clone(),
                    Some(append_action(mutation.policy)),
                    false,
                );
            }

            let mut response = CheckResponse::with_status(Status::ok(""));
            response.set_http_response(ok);
            response
        }
        Decision::Deny { status, reason, .. } => {
            let mut denied = DeniedHttpResponseBuilder::new();
            denied.set_http_status(http_status(*status));

            let mut response = CheckResponse::with_status(Status::unauthenticated(reason.clone()));
            response.set_http_response(denied);
            response
        }
    }
}
