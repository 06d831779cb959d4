//! The authorization check.

use std::collections::HashMap;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::{debug, warn};
use users_sdk::{StoreError, UserStore};

use super::credentials::parse_basic;
use super::decision::{Decision, DenyCause, INTERNAL_ERROR_REASON};
use crate::config::AuthConfig;

/// Header consulted by the check. Proxies forward header names lower-cased.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Decides, per inbound request, whether it may proceed upstream.
///
/// Stateless apart from the shared store handle; concurrent checks do not
/// interact.
pub struct Authorizer {
    store: Arc<dyn UserStore>,
    config: AuthConfig,
}

impl Authorizer {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Run the check against the request's headers.
    ///
    /// The password check and the user lookup run one after the other; the
    /// lookup is only attempted once the password matched. Every failure
    /// becomes a 401 [`Decision::Deny`].
    #[tracing::instrument(skip_all, fields(username, decision, cause))]
    pub async fn check(&self, headers: &HashMap<String, String>) -> Decision {
        let decision = self.evaluate(headers).await;

        let span = tracing::Span::current();
        span.record("decision", decision.as_str());
        if let Decision::Deny { cause, .. } = &decision {
            span.record("cause", cause.as_str());
        }
        debug!("Authorization decision");

        decision
    }

    async fn evaluate(&self, headers: &HashMap<String, String>) -> Decision {
        let cred = match parse_basic(headers.get(AUTHORIZATION_HEADER).map(String::as_str)) {
            Ok(cred) => cred,
            Err(e) => {
                debug!(error = %e, "malformed credential");
                return Decision::malformed();
            }
        };
        tracing::Span::current().record("username", cred.username.as_str());

        if let Err(e) = self
            .store
            .check_user_password(&cred.username, cred.password.expose_secret())
            .await
        {
            return self.deny_for_store_error("check_user_password", &e);
        }

        match self.store.get_user(&cred.username).await {
            Ok(user) => Decision::allow_user(user.username),
            Err(e) => self.deny_for_store_error("get_user", &e),
        }
    }

    fn deny_for_store_error(&self, op: &'static str, e: &StoreError) -> Decision {
        let cause = match e {
            e if e.is_cancellation() => DenyCause::Cancelled,
            StoreError::Internal(_) => DenyCause::Internal,
            _ => DenyCause::InvalidCredential,
        };
        warn!(operation = op, code = ?e.code(), error = %e, "credential check failed");

        let reason = match e {
            StoreError::Internal(_) if !self.config.expose_internal_errors => {
                INTERNAL_ERROR_REASON.to_owned()
            }
            _ => e.to_string(),
        };
        Decision::deny(reason, cause)
    }
}
