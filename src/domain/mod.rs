//! Domain primitives shared by the persistence, service, and HTTP layers.
//!
//! Roles and gadget statuses are stored as plain strings; these enums are the
//! only place where the set of valid values is defined.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried by every user account and embedded in session tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Agent,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Agent => "agent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "agent" => Ok(Self::Agent),
            other => Err(ParseDomainError::Role(other.to_string())),
        }
    }
}

/// Lifecycle status of a gadget.
///
/// `Destroyed` and `Decommissioned` are terminal: a gadget in either state can
/// no longer be self-destructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GadgetStatus {
    #[default]
    Available,
    Deployed,
    Destroyed,
    Decommissioned,
}

impl GadgetStatus {
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Deployed,
        Self::Destroyed,
        Self::Decommissioned,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Deployed => "Deployed",
            Self::Destroyed => "Destroyed",
            Self::Decommissioned => "Decommissioned",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Destroyed | Self::Decommissioned)
    }
}

impl fmt::Display for GadgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GadgetStatus {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseDomainError::Status(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDomainError {
    #[error("Invalid role: {0}")]
    Role(String),

    #[error("Invalid status value: {0}")]
    Status(String),
}

/// Authenticated caller, resolved from a verified session token.
///
/// The access-control middleware inserts this into request extensions;
/// handlers read it back with `Extension<Identity>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub role: Role,
}
