//! Navigation routes.
//!
//! The chat view is mounted at `/<username>`; logging out navigates back to
//! `/`. This is the whole identity provider: the username is the route
//! segment, nothing more.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Route parsing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Path does not start with `/`.
    #[error("route must start with '/': {0}")]
    NotAbsolute(String),

    /// Path has more than one segment.
    #[error("unknown route: {0}")]
    Unknown(String),
}

/// Application routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Entry route (`/`).
    Root,
    /// Chat view for a user (`/<username>`).
    Chat {
        /// Current user's display name.
        username: String,
    },
}

impl Route {
    /// Parse a path. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let Some(rest) = path.strip_prefix('/') else {
            return Err(RouteError::NotAbsolute(path.to_string()));
        };
        let segment = rest.trim_end_matches('/');
        if segment.is_empty() {
            return Ok(Self::Root);
        }
        if segment.contains('/') {
            return Err(RouteError::Unknown(path.to_string()));
        }
        Ok(Self::Chat { username: segment.to_string() })
    }

    /// Username carried by the route. `None` for the root.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::Chat { username } => Some(username),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("/"),
            Self::Chat { username } => write!(f, "/{username}"),
        }
    }
}
