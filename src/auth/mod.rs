//! Authentication state.
//!
//! - `session`: persisted token, refresh token, user and password
//! - `gate`: the controller's signed-in / checked / loading flags
//! - `form`: login and registration form with client-side validation

pub mod form;
pub mod gate;
pub mod session;

pub use form::{AuthFormState, FormField, FormMode, Submission};
pub use gate::AuthGate;
pub use session::Session;
