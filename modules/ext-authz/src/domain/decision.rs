//! Allow/deny verdict returned by the authorization check.

use http::StatusCode;

/// Denial reason for any credential that cannot be decoded.
pub const BASIC_AUTH_REQUIRED: &str = "Basic authentication required";

/// Denial reason used in place of internal backend error text.
pub const INTERNAL_ERROR_REASON: &str = "internal error";

/// Header carrying the authenticated username to the upstream.
pub const USER_INFO_HEADER: &str = "x-user-info";

/// How a header mutation merges with an existing header of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Append to an existing header, otherwise add it.
    AppendIfExistsOrAdd,
    /// Add only if the header is not already present.
    AddIfAbsent,
    /// Replace an existing header, otherwise add it.
    OverwriteIfExistsOrAdd,
}

/// One header to attach to the request forwarded upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMutation {
    pub name: String,
    pub value: String,
    pub policy: MergePolicy,
}

/// What made the check deny a request. Not visible to the caller beyond the
/// reason text; all causes share the same status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyCause {
    /// Missing or undecodable Basic credential.
    MalformedCredential,
    /// Unknown username or wrong password.
    InvalidCredential,
    /// The store call was cancelled or ran past its deadline.
    Cancelled,
    /// Any other store failure.
    Internal,
}

impl DenyCause {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedCredential => "malformed_credential",
            Self::InvalidCredential => "invalid_credential",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal",
        }
    }
}

/// Verdict for one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow {
        headers: Vec<HeaderMutation>,
    },
    Deny {
        status: StatusCode,
        reason: String,
        cause: DenyCause,
    },
}

impl Decision {
    /// Allow the request and tell the upstream who made it.
    #[must_use]
    pub fn allow_user(username: impl Into<String>) -> Self {
        Self::Allow {
            headers: vec![HeaderMutation {
                name: USER_INFO_HEADER.to_owned(),
                value: username.into(),
                policy: MergePolicy::AppendIfExistsOrAdd,
            }],
        }
    }

    /// Deny with 401 Unauthorized.
    #[must_use]
    pub fn deny(reason: impl Into<String>, cause: DenyCause) -> Self {
        Self::Deny {
            status: StatusCode::UNAUTHORIZED,
            reason: reason.into(),
            cause,
        }
    }

    #[must_use]
    pub fn malformed() -> Self {
        Self::deny(BASIC_AUTH_REQUIRED, DenyCause::MalformedCredential)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow { .. } => "allow",
            Self::Deny { .. } => "deny",
        }
    }
}
