//! Identity types shared by every layer of the console.
//!
//! These are the records the REST API hands back about "who is logged in".
//! They are only ever replaced wholesale from server data; nothing in the
//! console edits a role or a user record locally.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Server-assigned identifier of a user account.
///
/// Newtype over the numeric id the API returns, serialized as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// One of the six fixed account categories.
///
/// The set is closed: a role string the console does not know fails to
/// decode instead of silently mapping to something with fewer rights.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manufacturer,
    Manager,
    Distributor,
    Employee,
    Client,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Manufacturer,
        Role::Manager,
        Role::Distributor,
        Role::Employee,
        Role::Client,
    ];

    /// The lowercase wire name (`"admin"`, `"client"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manufacturer => "manufacturer",
            Self::Manager => "manager",
            Self::Distributor => "distributor",
            Self::Employee => "employee",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ProtocolError::InvalidMessage(format!("unknown role: {s}")))
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The authenticated user's profile as returned by `/login` and `/profile`.
///
/// Field names are camelCase on the wire. Optional fields are omitted when
/// absent so a stored snapshot round-trips byte-for-byte with what the
/// server sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    /// For client accounts this carries the company's GST number, which is
    /// how client records are matched to their owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl User {
    /// Initials shown in the header avatar, e.g. `"JA"` for `"Jane Ames"`.
    ///
    /// Mirrors the header's "first two characters, uppercased" rule, with
    /// `"U"` when the name is empty.
    pub fn initials(&self) -> String {
        let initials: String = self.full_name.chars().take(2).collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials.to_uppercase()
        }
    }
}
