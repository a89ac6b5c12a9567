//! Async API boundary shared by HTTP and WebSocket handlers.
//!
//! Wraps the pure generation core with option resolution (defaults, grade
//! canonicalization, count clamping), structured logging, and the simulated
//! network latency the UI uses to show loading states. The delay is plain
//! `tokio::time::sleep`, so abandoning a pending call simply discards the
//! result; there is nothing to clean up.

use std::time::Duration;

use rand::Rng;
use tracing::{info, instrument};

use crate::domain::{GradeLevel, GradingRow, Item, PracticeItem, Subject};
use crate::generator::{clamp_count, generate_items, generate_practice};
use crate::grading::synthesize_batch;
use crate::protocol::{GenerateIn, GradeIn};
use crate::state::AppState;

/// Resolved generation parameters after defaults and canonicalization.
#[derive(Clone, Debug)]
pub struct Resolved {
  pub subject: Subject,
  pub grade: GradeLevel,
  pub seed: String,
  pub count: usize,
}

pub fn resolve_options(state: &AppState, opts: &GenerateIn) -> Resolved {
  let subject = Subject::parse(
    opts.subject.as_deref().unwrap_or(&state.settings.default_subject),
  );
  let grade = match &opts.grade {
    // `as` truncates toward zero and maps NaN to 0; out-of-range values hit
    // the canonical grade fallback either way.
    Some(GradeIn::Number(n)) => GradeLevel::from_number(*n as i64),
    Some(GradeIn::Text(s)) => GradeLevel::parse(s),
    None => GradeLevel::DEFAULT,
  };
  let count = clamp_count(opts.count.unwrap_or(state.settings.default_count));
  Resolved { subject, grade, seed: opts.seed.clone(), count }
}

/// Latency jitter is the one place randomness is not seeded: it models the
/// network, not the content.
async fn simulate_latency(state: &AppState) {
  let (lo, hi) = state.settings.latency_ms;
  if hi == 0 {
    return;
  }
  let ms = if lo == hi { lo } else { rand::thread_rng().gen_range(lo..=hi) };
  tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[instrument(level = "info", skip(state, opts), fields(seed = %opts.seed))]
pub async fn generate_assessment_items(state: &AppState, opts: GenerateIn) -> Vec<Item> {
  let r = resolve_options(state, &opts);
  let items = generate_items(r.subject, r.grade, &r.seed, r.count);
  simulate_latency(state).await;
  info!(
    target: "generator",
    subject = r.subject.as_str(),
    grade = r.grade.as_str(),
    requested = r.count,
    produced = items.len(),
    "assessment items served"
  );
  items
}

#[instrument(level = "info", skip(state, opts), fields(seed = %opts.seed))]
pub async fn generate_practice_items(state: &AppState, opts: GenerateIn) -> Vec<PracticeItem> {
  let r = resolve_options(state, &opts);
  let items = generate_practice(r.subject, r.grade, &r.seed, r.count);
  simulate_latency(state).await;
  info!(
    target: "generator",
    subject = r.subject.as_str(),
    grade = r.grade.as_str(),
    requested = r.count,
    produced = items.len(),
    "practice items served"
  );
  items
}

#[instrument(level = "info", skip(state, opts), fields(seed = %opts.seed))]
pub async fn generate_grading_batch(state: &AppState, opts: GenerateIn) -> Vec<GradingRow> {
  let r = resolve_options(state, &opts);
  let rows = synthesize_batch(&state.roster, r.subject, r.grade, &r.seed, r.count);
  simulate_latency(state).await;
  info!(
    target: "generator",
    subject = r.subject.as_str(),
    grade = r.grade.as_str(),
    rows = rows.len(),
    "grading batch served"
  );
  rows
}

#[cfg(test)]
mod tests {
  use super::*;

  fn opts(seed: &str) -> GenerateIn {
    GenerateIn { subject: None, grade: None, seed: seed.into(), count: None }
  }

  #[test]
  fn defaults_resolve_from_settings() {
    let state = AppState::for_tests();
    let r = resolve_options(&state, &opts("fractions"));
    assert_eq!(r.subject, Subject::Math);
    assert_eq!(r.grade, GradeLevel::DEFAULT);
    assert_eq!(r.count, 8);
  }

  #[test]
  fn explicit_options_override_defaults() {
    let state = AppState::for_tests();
    let r = resolve_options(
      &state,
      &GenerateIn {
        subject: Some("Science".into()),
        grade: Some(GradeIn::Number(10.0)),
        seed: "density".into(),
        count: Some(250),
      },
    );
    assert_eq!(r.subject, Subject::Science);
    assert_eq!(r.grade, GradeLevel::G10);
    assert_eq!(r.count, 100);
  }

  #[test]
  fn fractional_grades_truncate_to_a_canonical_grade() {
    let state = AppState::for_tests();
    let resolve = |n: f64| {
      let mut o = opts("density");
      o.grade = Some(GradeIn::Number(n));
      resolve_options(&state, &o).grade
    };
    assert_eq!(resolve(8.5), GradeLevel::G8);
    assert_eq!(resolve(10.0), GradeLevel::G10);
    assert_eq!(resolve(f64::NAN), GradeLevel::DEFAULT);
  }

  #[tokio::test]
  async fn api_calls_are_deterministic_end_to_end() {
    let state = AppState::for_tests();
    let mk = || GenerateIn {
      subject: Some("Math".into()),
      grade: Some(GradeIn::Text("8".into())),
      seed: "Linear Equations".into(),
      count: Some(5),
    };
    let a = generate_assessment_items(&state, mk()).await;
    let b = generate_assessment_items(&state, mk()).await;
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    assert_eq!(a.len(), 5);
  }

  #[tokio::test]
  async fn degenerate_inputs_still_produce_results() {
    let state = AppState::for_tests();
    // Empty seed, unknown subject, negative count: fall back, never fail.
    let items = generate_assessment_items(
      &state,
      GenerateIn {
        subject: Some("Underwater Basket Weaving".into()),
        grade: Some(GradeIn::Text("kindergarten".into())),
        seed: String::new(),
        count: Some(-10),
      },
    )
    .await;
    assert_eq!(items.len(), 1);
    assert!(!items[0].stem.is_empty());
  }

  #[tokio::test]
  async fn grading_batch_respects_row_contract() {
    let state = AppState::for_tests();
    let rows = generate_grading_batch(
      &state,
      GenerateIn {
        subject: Some("Math".into()),
        grade: Some(GradeIn::Text("8".into())),
        seed: "Unit test — integers".into(),
        count: Some(10),
      },
    )
    .await;
    assert_eq!(rows.len(), 10);
    for r in &rows {
      assert!((20..=99).contains(&r.score));
      assert!((40..=98).contains(&r.confidence));
      assert_eq!(r.flagged, r.score < 50 || r.confidence < 55);
    }
  }

  #[tokio::test]
  async fn practice_items_flatten_item_fields_on_the_wire() {
    let state = AppState::for_tests();
    let items = generate_practice_items(&state, opts("decimals")).await;
    let v = serde_json::to_value(&items).unwrap();
    let first = &v.as_array().unwrap()[0];
    assert!(first.get("stem").is_some());
    assert!(first.get("choices").is_some());
    assert!(first.get("item").is_none());
  }
}
