//! Pizzeria Core - Shared domain types.
//!
//! This crate provides the types used across all pizzeria components:
//! - `web` - The customer, employee and manager web application
//! - `cli` - Command-line tools for migrations, staff accounts and the menu
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. Database encoding is available behind the `postgres`
//! feature.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, emails, phone numbers, prices, roles and shift windows

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
