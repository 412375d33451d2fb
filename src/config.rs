use std::env;

use dotenvy::dotenv;
use strum_macros::EnumString;

/// Which punch source feeds the derivation engine. `Demo` generates a
/// deterministic seeded ledger for demos and tests; `Punch` derives from
/// events recorded via the punch-in/punch-out endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SourceMode {
    Demo,
    Punch,
}

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    pub attendance_source: SourceMode,
    pub demo_seed: u64,

    /// Optional upstream backend; punch events and new leave requests are
    /// forwarded there best-effort.
    pub upstream_url: Option<String>,

    // Rate limiting
    pub rate_punch_per_min: u32,
    pub rate_protected_per_min: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            attendance_source: env::var("ATTENDANCE_SOURCE")
                .unwrap_or_else(|_| "demo".to_string())
                .parse()
                .expect("ATTENDANCE_SOURCE must be 'demo' or 'punch'"),
            demo_seed: env::var("DEMO_SEED")
                .unwrap_or_else(|_| "42".to_string())
                .parse()
                .unwrap(),

            upstream_url: env::var("UPSTREAM_URL").ok(),

            rate_punch_per_min: env::var("RATE_PUNCH_PER_MIN")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap(),
            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),
        }
    }
}
