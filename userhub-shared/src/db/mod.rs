/// Database layer for UserHub
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with a startup health check
/// - `migrations`: Schema migrations embedded from `migrations/`
///
/// Queries against the `users` table live in
/// [`crate::repository::postgres`].

pub mod migrations;
pub mod pool;
