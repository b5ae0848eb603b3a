//! Domain layer for DineDeck.
//!
//! This module contains the wire-level data types and the error type shared by
//! every other layer. Nothing here knows about HTTP, the terminal or storage.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`restaurant`]: Restaurant DTO and the paged listing response
//! - [`user`]: User identity and authentication payloads
//!
//! # Examples
//!
//! ```
//! use dinedeck::domain::{Restaurant, RestaurantPage, Result};
//!
//! fn first_page() -> Result<RestaurantPage> {
//!     Ok(RestaurantPage::new(1, 3, vec![Restaurant::new("r1", "Bistro")]))
//! }
//! assert_eq!(first_page().unwrap().restaurants.len(), 1);
//! ```

pub mod error;
pub mod restaurant;
pub mod user;

pub use error::{DineError, Result};
pub use restaurant::{Restaurant, RestaurantPage};
pub use user::{AuthResponse, LoginData, RegisterData, User};
