//! The identity/session provider boundary.
//!
//! The provider is an external collaborator; this module only fixes the
//! contract the rest of the app depends on. Pending and failure states of
//! provider calls belong to the calling screen (loading flag + error string),
//! never to the composer controllers.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub access_token: String,
}

/// Provider failures are recoverable and user-facing: the provider's
/// human-readable message is surfaced verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Provider(String),
    #[error("identity provider is unreachable: {0}")]
    Transport(String),
}

/// Operations the identity provider exposes.
///
/// Implemented by the HTTP client in the cli crate and by in-memory stubs in
/// tests; consumers stay generic over `P: SessionProvider`.
pub trait SessionProvider {
    fn sign_up(
        &self,
        request: SignUpRequest,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn sign_in(
        &self,
        request: SignInRequest,
    ) -> impl Future<Output = Result<Session, AuthError>> + Send;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>> + Send;

    fn get_user(&self) -> impl Future<Output = Result<Option<User>, AuthError>> + Send;

    fn get_session(&self) -> impl Future<Output = Result<Option<Session>, AuthError>> + Send;
}
