//! Declarative access requirements attached to routes.

/// What a route demands of the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePolicy {
    /// Whether a valid identity is needed at all.
    pub requires_login: bool,
    /// Permission codes that must all be granted.
    pub required_permissions: Vec<String>,
}

impl RoutePolicy {
    /// Open to anonymous callers.
    pub fn public() -> Self {
        Self::default()
    }

    /// Any authenticated caller.
    pub fn login() -> Self {
        Self {
            requires_login: true,
            required_permissions: Vec::new(),
        }
    }

    /// Authenticated caller holding every listed permission.
    pub fn permissions<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requires_login: true,
            required_permissions: codes.into_iter().map(Into::into).collect(),
        }
    }
}
