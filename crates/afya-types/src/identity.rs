//! Owner identity inputs.
//!
//! The identity provider (login, email verification) is an external
//! collaborator: this core only ever sees an opaque owner id and a
//! verified-status flag.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Opaque identifier of the signed-in user, as supplied by the identity
/// provider. Never parsed or validated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        OwnerId(s.to_string())
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        OwnerId(s)
    }
}

/// What the identity provider hands this core about the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub owner_id: OwnerId,
    pub email_verified: bool,
}
