/// API route handlers
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `users`: The guarded user collection endpoints

pub mod auth;
pub mod health;
pub mod users;
