//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer and hosts the
//! process-wide services that sit in front of them.
//!
//! # Modules
//!
//! - [`cache`] - Read-through cache with per-key TTL
//! - [`health`] - Database connection health tracking
//! - [`ai`] - Text generation providers
//! - [`persistence`] - PostgreSQL repository implementations

pub mod ai;
pub mod cache;
pub mod health;
pub mod persistence;
