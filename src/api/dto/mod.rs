//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Entities are converted with `From` impls, so
//! internal fields never leak into responses by accident.

pub mod admin;
pub mod document;
pub mod health;
pub mod idea;
pub mod pagination;
pub mod prompt;
pub mod subscription;
pub mod team;
pub mod workspace;
