use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

use crate::auth::Claims;

/// Mutation guard: decides per write whether the store is really touched.
///
/// The simulation flag is fixed at construction from configuration, never
/// read from ambient process state. When simulation is on, writes from
/// admins without the `superAdmin` claim are redirected into a dry-run
/// response; super admins write through regardless.
#[derive(Debug, Clone, Copy)]
pub struct WriteGate {
    simulation: bool,
}

impl WriteGate {
    pub fn new(simulation: bool) -> Self {
        Self { simulation }
    }

    /// True when the caller's write must be rehearsed instead of applied.
    /// Handlers check this strictly before any store access.
    pub fn rehearses(&self, claims: &Claims) -> bool {
        self.simulation && !claims.super_admin
    }
}

/// Dry-run response: same status code the real operation would return,
/// tagged `simulated: true`, echoing the input payload when there is one.
pub fn simulated(status: StatusCode, message: impl Into<String>, data: Option<Value>) -> Response {
    let mut body = json!({
        "simulated": true,
        "message": message.into(),
    });
    if let Some(data) = data {
        body["data"] = data;
    }
    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(super_admin: bool) -> Claims {
        Claims::new(true, super_admin, 1)
    }

    #[test]
    fn simulation_on_rehearses_plain_admins() {
        assert!(WriteGate::new(true).rehearses(&claims(false)));
    }

    #[test]
    fn simulation_on_lets_super_admins_through() {
        assert!(!WriteGate::new(true).rehearses(&claims(true)));
    }

    #[test]
    fn simulation_off_is_transparent() {
        assert!(!WriteGate::new(false).rehearses(&claims(false)));
        assert!(!WriteGate::new(false).rehearses(&claims(true)));
    }
}
