//! Application state: settings resolved from TOML config plus the grading
//! roster. The generation core is stateless; nothing here is shared mutable
//! state, so concurrent requests with different seeds cannot interfere.

use tracing::{info, instrument};

use crate::config::{load_config_from_env, GeneratorConfig};
use crate::grading::Roster;

#[derive(Clone, Debug)]
pub struct Settings {
    /// Simulated latency window in milliseconds; (0, 0) disables the delay.
    pub latency_ms: (u64, u64),
    pub default_subject: String,
    pub default_count: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            latency_ms: (120, 240),
            default_subject: "Math".into(),
            default_count: 8,
        }
    }
}

impl Settings {
    /// Zero-latency settings for tests and synchronous callers.
    #[allow(dead_code)]
    pub fn immediate() -> Self {
        Self { latency_ms: (0, 0), ..Self::default() }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub roster: Roster,
}

impl AppState {
    /// Build state from env: load optional TOML config and resolve settings.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_config_from_env().unwrap_or_else(|| {
            info!(target: "studyforge_backend", "No config file; using built-in defaults");
            GeneratorConfig::default()
        });
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: GeneratorConfig) -> Self {
        let mut latency = (cfg.latency.min_ms, cfg.latency.max_ms);
        if latency.0 > latency.1 {
            latency = (latency.1, latency.0);
        }

        let mut roster = Roster::default();
        if !cfg.roster.first_names.is_empty() {
            roster.first = cfg.roster.first_names;
        }
        if !cfg.roster.last_names.is_empty() {
            roster.last = cfg.roster.last_names;
        }

        info!(
            target: "studyforge_backend",
            latency_min_ms = latency.0,
            latency_max_ms = latency.1,
            default_subject = %cfg.defaults.subject,
            default_count = cfg.defaults.count,
            "Generator settings resolved"
        );

        Self {
            settings: Settings {
                latency_ms: latency,
                default_subject: cfg.defaults.subject,
                default_count: cfg.defaults.count,
            },
            roster,
        }
    }

    /// Zero-latency state for tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self { settings: Settings::immediate(), roster: Roster::default() }
    }
}
