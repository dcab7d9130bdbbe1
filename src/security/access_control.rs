//! Path tier classification and access decisions.
//!
//! Every request that is not excluded upstream passes through
//! [`Gateway::evaluate`] exactly once. The check order is fixed:
//!
//! ```text
//! public entry?        → Allow
//! no credential?       → RedirectToLogin(path)
//! admin prefix?        → Allow for Admin, else RedirectToHome
//! owner prefix?        → Allow for Owner/Admin, else RedirectToHome
//! anything else        → Allow (authenticated)
//! ```
//!
//! Missing or unrecognized role and credential values are treated as absent.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::schema::AccessConfig;
use crate::routing::matcher::{Matcher, PathMatcher};

/// Roles asserted by the role cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Player,
    Owner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Player => "PLAYER",
            Role::Owner => "OWNER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role string outside the fixed role set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLAYER" => Ok(Role::Player),
            "OWNER" => Ok(Role::Owner),
            "ADMIN" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Minimum trust level required by a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Public,
    Authenticated,
    Owner,
    Admin,
}

/// Outcome of a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    RedirectToLogin { original_path: String },
    RedirectToHome,
}

impl Decision {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::RedirectToLogin { .. } => "redirect_login",
            Decision::RedirectToHome => "redirect_home",
        }
    }
}

/// Compiled path tier table. Built once at startup.
#[derive(Debug, Clone)]
pub struct TierTable {
    public: Vec<PathMatcher>,
    admin: Vec<PathMatcher>,
    owner: Vec<PathMatcher>,
}

impl TierTable {
    pub fn from_config(config: &AccessConfig) -> Self {
        Self {
            public: config.public_paths.iter().map(PathMatcher::from).collect(),
            admin: config
                .admin_paths
                .iter()
                .map(|p| PathMatcher::prefix(p.as_str()))
                .collect(),
            owner: config
                .owner_paths
                .iter()
                .map(|p| PathMatcher::prefix(p.as_str()))
                .collect(),
        }
    }

    /// Classify a path. Public wins over admin, admin over owner.
    pub fn classify(&self, path: &str) -> Tier {
        if self.public.iter().any(|m| m.matches(path)) {
            Tier::Public
        } else if self.admin.iter().any(|m| m.matches(path)) {
            Tier::Admin
        } else if self.owner.iter().any(|m| m.matches(path)) {
            Tier::Owner
        } else {
            Tier::Authenticated
        }
    }
}

/// The access control gateway.
///
/// Holds no mutable state; share it behind an `Arc` and call
/// [`evaluate`](Gateway::evaluate) from any number of tasks.
#[derive(Debug, Clone)]
pub struct Gateway {
    table: TierTable,
}

impl Gateway {
    pub fn new(table: TierTable) -> Self {
        Self { table }
    }

    pub fn from_config(config: &AccessConfig) -> Self {
        Self::new(TierTable::from_config(config))
    }

    pub fn classify(&self, path: &str) -> Tier {
        self.table.classify(path)
    }

    /// Decide whether a request may proceed.
    ///
    /// An empty credential counts as no credential.
    pub fn evaluate(&self, path: &str, credential: Option<&str>, role: Option<Role>) -> Decision {
        self.evaluate_with_tier(path, credential, role).1
    }

    /// Like [`evaluate`](Gateway::evaluate), also returning the tier the path classified as.
    pub fn evaluate_with_tier(
        &self,
        path: &str,
        credential: Option<&str>,
        role: Option<Role>,
    ) -> (Tier, Decision) {
        let tier = self.classify(path);
        (tier, decide(tier, path, credential, role))
    }
}

fn decide(tier: Tier, path: &str, credential: Option<&str>, role: Option<Role>) -> Decision {
    if tier == Tier::Public {
        return Decision::Allow;
    }

    let authenticated = credential.is_some_and(|token| !token.is_empty());
    if !authenticated {
        return Decision::RedirectToLogin {
            original_path: path.to_string(),
        };
    }

    let permitted = match tier {
        Tier::Admin => role == Some(Role::Admin),
        Tier::Owner => matches!(role, Some(Role::Owner | Role::Admin)),
        Tier::Public | Tier::Authenticated => true,
    };

    if permitted {
        Decision::Allow
    } else {
        Decision::RedirectToHome
    }
}
