//! Domain models for the web application.
//!
//! These are validated domain types, separate from the database row types
//! that live next to each repository.

pub mod menu;
pub mod order;
pub mod session;
pub mod shift;
pub mod user;

pub use menu::{CartLine, Pizza};
pub use order::{Order, OrderSummary};
pub use session::{CurrentUser, Flash, FlashLevel, keys as session_keys};
pub use shift::Shift;
pub use user::{Customer, Employee, Manager, Profiles, User};
