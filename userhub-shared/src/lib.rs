//! # UserHub Shared Library
//!
//! Types and persistence used by the UserHub API server.
//!
//! ## Module Organization
//!
//! - `models`: The user row, its public view and the writable patch
//! - `repository`: The `UserRepository` trait with PostgreSQL and in-memory backends
//! - `auth`: Password hashing, JWT and the request guard
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod repository;
