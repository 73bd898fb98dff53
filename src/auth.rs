use std::fmt;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Wrong password. Try again.")]
    InvalidCredential,
    #[error("Missing or invalid Authorization")]
    MissingOrInvalidCredential,
    #[error("Invalid password")]
    InvalidBearerToken
}

// One secret, two ways to present it: the login form and the Authorization header.
// An empty secret turns authentication off for the whole process.
#[derive(Clone)]
pub struct AuthGate {
    secret: String
}

impl fmt::Debug for AuthGate {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {

        f.debug_struct("AuthGate")
            .field("secret", &if self.is_required() { "<redacted>" } else { "<disabled>" })
            .finish()

    }

}

impl AuthGate {

    pub fn new(secret: impl Into<String>) -> Self {

        AuthGate { secret: secret.into() }

    }

    pub fn is_required(&self) -> bool {

        !self.secret.is_empty()

    }

    fn matches(&self, candidate: &str) -> bool {

        candidate.trim() == self.secret

    }

    pub fn verify_password(&self, candidate: &str) -> Result<(), AuthError> {

        if !self.is_required() || self.matches(candidate) {
            return Ok(());
        }

        Err(AuthError::InvalidCredential)

    }

    pub fn authorize_bearer(&self, header_value: Option<&str>) -> Result<(), AuthError> {

        if !self.is_required() {
            return Ok(());
        }

        let token = header_value
            .and_then(|value| value.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthError::MissingOrInvalidCredential)?;

        if !self.matches(token) {
            return Err(AuthError::InvalidBearerToken);
        }

        Ok(())

    }

}
