/// Database models for UserHub
///
/// # Models
///
/// - `user`: User accounts, the public user view and the writable patch

pub mod user;
