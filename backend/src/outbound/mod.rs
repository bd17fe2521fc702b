//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: a mutex-guarded store used when no database is configured
//! - **code_generator**: random attendance code generation
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod code_generator;
pub mod memory;
pub mod persistence;
