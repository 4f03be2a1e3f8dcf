/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: HS256 access token issuance and validation
/// - [`middleware`]: The request guard (`Authorizer`) and its JWT implementation

pub mod jwt;
pub mod middleware;
pub mod password;
