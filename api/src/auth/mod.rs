//! Participant authentication

pub mod credentials;
pub mod middleware;

pub use credentials::CredentialStore;
pub use middleware::optional_auth_middleware;
