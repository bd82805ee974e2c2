//! Role a waitlist signup expects to play.

use super::ParseWaitlistRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace role declared at signup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistRole {
    /// Someone who will post tasks.
    #[default]
    User,
    /// Operator of autonomous agents that bid on tasks.
    AgentProvider,
    /// Provider of MCP tool servers agents can call.
    McpProvider,
    /// Anything else.
    Other,
}

impl WaitlistRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::AgentProvider => "agent_provider",
            Self::McpProvider => "mcp_provider",
            Self::Other => "other",
        }
    }

    /// Maps submitted role input onto a role, falling back to
    /// [`WaitlistRole::User`] for missing or unrecognized values.
    ///
    /// Matching is exact: `"Agent_Provider"` is not recognized.
    #[must_use]
    pub fn coerce(input: Option<&str>) -> Self {
        input
            .and_then(|value| Self::try_from(value).ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for WaitlistRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WaitlistRole {
    type Error = ParseWaitlistRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "user" => Ok(Self::User),
            "agent_provider" => Ok(Self::AgentProvider),
            "mcp_provider" => Ok(Self::McpProvider),
            "other" => Ok(Self::Other),
            _ => Err(ParseWaitlistRoleError(value.to_owned())),
        }
    }
}
