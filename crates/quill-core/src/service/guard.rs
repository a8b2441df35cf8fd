use crate::error::DomainError;
use crate::ports::Principal;

/// Entry check for every gated operation.
///
/// Fails with [`DomainError::Unauthenticated`] before any state is read or
/// written when there is no signed-in user.
pub fn require_authenticated(principal: Option<&Principal>) -> Result<&Principal, DomainError> {
    principal.ok_or(DomainError::Unauthenticated)
}
