//! Configuration for the authorization check.

use serde::Deserialize;

/// Authorization check configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Forward raw backend error text to denied callers.
    ///
    /// Off by default: internal store failures are reported as
    /// "internal error" and the detail is only logged.
    pub expose_internal_errors: bool,
}
