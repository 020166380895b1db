#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallerRole {
    Admin,
    Participant,
}

/// Resolves the opaque bearer token of a request to the role of its caller.
pub trait AuthenticationPort {
    fn resolve_role(&self, token: &str) -> Option<CallerRole>;
}
