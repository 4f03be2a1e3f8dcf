/// Middleware modules for the API server
///
/// - `security`: Security response headers
///
/// The authentication guard is wired in [`crate::app`], on top of the
/// `Authorizer` trait from the shared crate.

pub mod security;
