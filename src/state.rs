use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::middleware::{OriginPolicy, WriteGate};
use crate::store::DocumentStore;

/// Shared request-handling context. Everything here is read-only after
/// startup; the store is the only shared mutable resource and coordinates
/// itself.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub write_gate: WriteGate,
    pub origin_policy: Arc<OriginPolicy>,
}
