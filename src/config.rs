//! Loading generator configuration from TOML.
//!
//! All fields are optional; the defaults keep the service fully functional
//! with no config file at all. See `GeneratorConfig` for the expected schema.

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct GeneratorConfig {
  #[serde(default)]
  pub latency: LatencyCfg,
  #[serde(default)]
  pub defaults: DefaultsCfg,
  #[serde(default)]
  pub roster: RosterCfg,
}

/// Simulated network latency window applied before returning a batch, so the
/// UI can show its loading state. A zero window disables the delay.
#[derive(Clone, Debug, Deserialize)]
pub struct LatencyCfg {
  #[serde(default = "default_latency_min")]
  pub min_ms: u64,
  #[serde(default = "default_latency_max")]
  pub max_ms: u64,
}

fn default_latency_min() -> u64 {
  120
}

fn default_latency_max() -> u64 {
  240
}

impl Default for LatencyCfg {
  fn default() -> Self {
    Self { min_ms: default_latency_min(), max_ms: default_latency_max() }
  }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DefaultsCfg {
  #[serde(default = "default_subject")]
  pub subject: String,
  #[serde(default = "default_count")]
  pub count: i64,
}

fn default_subject() -> String {
  "Math".into()
}

fn default_count() -> i64 {
  8
}

impl Default for DefaultsCfg {
  fn default() -> Self {
    Self { subject: default_subject(), count: default_count() }
  }
}

/// Optional override for the synthetic student name pools used by the
/// grading batch synthesizer. Empty lists mean "use the built-in pool".
#[derive(Clone, Debug, Deserialize, Default)]
pub struct RosterCfg {
  #[serde(default)]
  pub first_names: Vec<String>,
  #[serde(default)]
  pub last_names: Vec<String>,
}

/// Attempt to load `GeneratorConfig` from STUDYFORGE_CONFIG_PATH. On any
/// parsing/IO error, returns None and the caller uses defaults.
pub fn load_config_from_env() -> Option<GeneratorConfig> {
  let path = std::env::var("STUDYFORGE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<GeneratorConfig>(&s) {
      Ok(cfg) => {
        info!(target: "studyforge_backend", %path, "Loaded generator config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "studyforge_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "studyforge_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_parses_to_defaults() {
    let cfg: GeneratorConfig = toml::from_str("").unwrap();
    assert_eq!(cfg.latency.min_ms, 120);
    assert_eq!(cfg.latency.max_ms, 240);
    assert_eq!(cfg.defaults.subject, "Math");
    assert_eq!(cfg.defaults.count, 8);
    assert!(cfg.roster.first_names.is_empty());
  }

  #[test]
  fn partial_config_fills_missing_fields() {
    let cfg: GeneratorConfig = toml::from_str(
      r#"
        [latency]
        min_ms = 0
        max_ms = 0

        [roster]
        first_names = ["Asha", "Bo"]
      "#,
    )
    .unwrap();
    assert_eq!(cfg.latency.max_ms, 0);
    assert_eq!(cfg.defaults.count, 8);
    assert_eq!(cfg.roster.first_names, vec!["Asha", "Bo"]);
    assert!(cfg.roster.last_names.is_empty());
  }
}
