use std::env;

/// Process configuration, read once at startup and threaded into the parts
/// that need it. The simulation flag in particular is never read from the
/// environment again after this; the mutation guard owns its copy.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub simulation_mode: bool,
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.port = v.parse().unwrap_or(self.port);
        }
        if let Ok(v) = env::var("SIMULATION_MODE") {
            self.simulation_mode = parse_flag(&v);
        }
        if let Ok(v) = env::var("CRISOL_JWT_SECRET") {
            self.jwt_secret = v;
        }
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            simulation_mode: false,
            jwt_secret: String::new(),
        }
    }
}

// Only the literal "true" enables a flag; anything else leaves it off.
fn parse_flag(value: &str) -> bool {
    value == "true"
}
