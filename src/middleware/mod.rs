pub mod auth;
pub mod guard;
pub mod origin;

pub use auth::require_admin;
pub use guard::{simulated, WriteGate};
pub use origin::{cors_layer, origin_guard, OriginMatcher, OriginPolicy};
