//! Shared utilities and common types for the attendance backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT identity token validation
//! - Offset pagination
//! - Query-string parsing helpers
//! - Class join code generation
//! - Common validation logic

pub mod class_code;
pub mod jwt;
pub mod pagination;
pub mod query;
pub mod validation;
