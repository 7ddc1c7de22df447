//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Signup, login and staff account creation (Argon2 password hashing)

pub mod auth;
