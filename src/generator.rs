//! Generation orchestrator: composes hashing, topic detection, knobs and
//! builders into a deduplicated batch of items, plus the practice variant
//! that attaches multiple-choice sets.
//!
//! The RNG state is derived from the full `subject:grade:seed:topic`
//! composite, so the stream is unique per combination even when the raw seed
//! text is identical. The state is local to each call; concurrent calls
//! cannot interfere.

use std::collections::HashSet;

use tracing::debug;

use crate::builders::builder_for;
use crate::domain::{GradeLevel, Item, ItemCore, PracticeItem, Subject, TopicId};
use crate::knobs::{knobs_for, GradeKnobs};
use crate::rng::Rng32;
use crate::topics::detect_topic;
use crate::util::normalize_stem;

pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 100;

/// Clamp a caller-supplied count into [1, 100]. Coercion instead of errors,
/// so no input can make generation fail.
pub fn clamp_count(raw: i64) -> usize {
  raw.clamp(MIN_COUNT, MAX_COUNT) as usize
}

fn composite_key(subject: Subject, grade: GradeLevel, seed: &str, topic: TopicId) -> String {
  format!("{}:{}:{}:{}", subject.as_str(), grade.as_str(), seed, topic.as_str())
}

/// Generate an ordered, deduplicated batch of assessment items.
///
/// Over-generates ceil(count * 1.5) candidates, assigns sequential ids before
/// deduplication, dedups by normalized stem preserving first-seen order, then
/// truncates. When a builder's output space is smaller than `count` the
/// shorter list is returned as-is; callers must tolerate `len <= count`.
pub fn generate_items(subject: Subject, grade: GradeLevel, seed: &str, count: usize) -> Vec<Item> {
  let topic = detect_topic(subject, seed);
  let knobs = knobs_for(grade);
  let mut rng = Rng32::from_seed_text(&composite_key(subject, grade, seed, topic));
  let items = generate_with(&mut rng, topic, knobs, count);
  debug!(
    target: "generator",
    subject = subject.as_str(),
    grade = grade.as_str(),
    topic = topic.as_str(),
    requested = count,
    produced = items.len(),
    "assessment batch generated"
  );
  items
}

fn generate_with(rng: &mut Rng32, topic: TopicId, knobs: &GradeKnobs, count: usize) -> Vec<Item> {
  let build = builder_for(topic);
  let overdraw = (count * 3).div_ceil(2); // ceil(count * 1.5)

  let mut seen = HashSet::<String>::new();
  let mut items = Vec::with_capacity(count);
  for id in 1..=overdraw as u32 {
    let core = build(rng, knobs);
    if !seen.insert(normalize_stem(&core.stem)) {
      continue;
    }
    items.push(finish(id, core));
    if items.len() == count {
      break;
    }
  }
  items
}

fn finish(id: u32, core: ItemCore) -> Item {
  Item {
    id,
    stem: core.stem,
    answer: core.answer,
    alt_a: core.alt_a,
    alt_b: core.alt_b,
    rubric: core.rubric,
  }
}

/// Generate practice items: the assessment batch plus a 4-choice set per
/// item, drawn from the same deterministic stream.
pub fn generate_practice(
  subject: Subject,
  grade: GradeLevel,
  seed: &str,
  count: usize,
) -> Vec<PracticeItem> {
  let topic = detect_topic(subject, seed);
  let knobs = knobs_for(grade);
  let mut rng = Rng32::from_seed_text(&composite_key(subject, grade, seed, topic));
  let items = generate_with(&mut rng, topic, knobs, count);
  items
    .into_iter()
    .map(|item| {
      let choices = build_choices(&mut rng, &item.answer, knobs);
      PracticeItem { item, choices }
    })
    .collect()
}

const CHOICE_COUNT: usize = 4;

/// Assemble a shuffled choice set containing the correct answer and three
/// distinct distractors. Numeric answers get gaussian jitter with a
/// difficulty-scaled spread; fraction and percent answers get templated
/// variants.
fn build_choices(rng: &mut Rng32, answer: &str, knobs: &GradeKnobs) -> Vec<String> {
  let mut choices: Vec<String> = vec![answer.to_string()];
  let mut push = |choices: &mut Vec<String>, c: String| {
    if choices.len() < CHOICE_COUNT && !choices.contains(&c) {
      choices.push(c);
    }
  };

  if let Some((n, d)) = parse_fraction(answer) {
    let templated = [(n + 1, d), (n, d + 1), (n + d, d), (n + 1, d + 1)];
    for (tn, td) in templated {
      push(&mut choices, crate::util::frac_str(tn, td));
    }
    let mut k = 2;
    while choices.len() < CHOICE_COUNT {
      push(&mut choices, crate::util::frac_str(n + k, d));
      k += 1;
    }
  } else if let Some(pct) = answer.strip_suffix('%').and_then(|p| p.parse::<i64>().ok()) {
    let mut ladder: Vec<i64> = [0, 25, 50, 75, 100].into_iter().filter(|v| *v != pct).collect();
    rng.shuffle(&mut ladder);
    for v in ladder {
      push(&mut choices, format!("{v}%"));
    }
  } else if let Some(v) = answer.parse::<f64>().ok().filter(|v| v.is_finite()) {
    let decimals = answer.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
    let sd = (v.abs() * 0.2).max(knobs.int_abs as f64 * 0.05).max(1.0);
    let scale = 10f64.powi(decimals as i32);
    let mut attempts = 0;
    while choices.len() < CHOICE_COUNT && attempts < 48 {
      attempts += 1;
      // Round at the display precision first; a raw draw in (-0.5, 0) would
      // otherwise format as "-0".
      let jittered = (rng.gaussian(v, sd) * scale).round() / scale + 0.0;
      push(&mut choices, format!("{jittered:.decimals$}"));
    }
    // Jitter can keep colliding on tight ranges; fall back to fixed offsets.
    let mut step = 1.0;
    while choices.len() < CHOICE_COUNT {
      push(&mut choices, format!("{:.decimals$}", v + step));
      push(&mut choices, format!("{:.decimals$}", v - step));
      step += 1.0;
    }
  } else {
    // Defensive: every builder emits numeric, fraction, or percent answers,
    // so this arm should be unreachable.
    for foil in ["Not enough information", "Cannot be determined", "None of the above"] {
      push(&mut choices, foil.to_string());
    }
  }

  rng.shuffle(&mut choices);
  choices
}

fn parse_fraction(s: &str) -> Option<(i64, i64)> {
  let (n, d) = s.split_once('/')?;
  let n: i64 = n.parse().ok()?;
  let d: i64 = d.parse().ok()?;
  (d > 1).then_some((n, d))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn stems(items: &[Item]) -> Vec<String> {
    items.iter().map(|i| i.stem.clone()).collect()
  }

  #[test]
  fn identical_arguments_produce_identical_batches() {
    for (subject, seed) in [
      (Subject::Math, "Fractions — add, subtract, compare"),
      (Subject::Math, "Linear Equations"),
      (Subject::Science, "Chemistry — density"),
      (Subject::Biology, "Punnett squares — monohybrid"),
    ] {
      let a = generate_items(subject, GradeLevel::G8, seed, 10);
      let b = generate_items(subject, GradeLevel::G8, seed, 10);
      assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }
  }

  #[test]
  fn stream_is_unique_per_subject_grade_combination() {
    let math = generate_items(Subject::Math, GradeLevel::G8, "unit review", 5);
    let g6 = generate_items(Subject::Math, GradeLevel::G6, "unit review", 5);
    // Same raw seed, different composite, different stems.
    assert_ne!(stems(&math), stems(&g6));
  }

  #[test]
  fn count_is_clamped_to_bounds() {
    assert_eq!(clamp_count(200), 100);
    assert_eq!(clamp_count(0), 1);
    assert_eq!(clamp_count(-5), 1);
    assert_eq!(clamp_count(8), 8);

    let items = generate_items(Subject::Math, GradeLevel::G8, "integers", clamp_count(200));
    assert!(items.len() <= 100);
    let one = generate_items(Subject::Math, GradeLevel::G8, "integers", clamp_count(0));
    assert!(!one.is_empty());
  }

  #[test]
  fn no_two_stems_collide_case_insensitively() {
    for seed in ["fractions", "decimals", "geometry review", "algebra", "integers"] {
      let items = generate_items(Subject::Math, GradeLevel::G9, seed, 30);
      let normalized: HashSet<String> =
        items.iter().map(|i| normalize_stem(&i.stem)).collect();
      assert_eq!(normalized.len(), items.len(), "duplicate stems for seed {seed:?}");
    }
  }

  #[test]
  fn small_output_spaces_return_short_lists_instead_of_retrying() {
    // Punnett has 5 crosses × 4 traits = 20 distinct stems at most.
    let items = generate_items(Subject::Biology, GradeLevel::G9, "punnett", 100);
    assert!(items.len() <= 100);
    assert!(!items.is_empty());
  }

  #[test]
  fn ids_are_sequential_in_first_seen_order() {
    let items = generate_items(Subject::Math, GradeLevel::G8, "Linear Equations", 12);
    let mut last = 0;
    for it in &items {
      assert!(it.id > last, "ids must increase: {:?}", items.iter().map(|i| i.id).collect::<Vec<_>>());
      last = it.id;
    }
  }

  #[test]
  fn linear_equation_batch_matches_the_documented_contract() {
    let items = generate_items(Subject::Math, GradeLevel::G8, "Linear Equations", 5);
    assert_eq!(items.len(), 5);
    for it in &items {
      let rest = it.stem.strip_prefix("Solve for x: ").expect("algebra stem");
      let (a, rest) = rest.split_once("x + ").unwrap();
      let (b, rest) = rest.split_once(" = ").unwrap();
      let c = rest.strip_suffix('.').unwrap();
      let (a, b, c): (i64, i64, i64) =
        (a.parse().unwrap(), b.parse().unwrap(), c.parse().unwrap());
      let x: i64 = it.answer.parse().unwrap();
      assert_eq!(a * x + b, c);
    }
  }

  #[test]
  fn practice_choices_are_four_unique_and_contain_the_answer() {
    for (subject, seed) in [
      (Subject::Math, "fractions"),
      (Subject::Math, "decimals"),
      (Subject::Math, "Linear Equations"),
      (Subject::Science, "speed"),
      (Subject::Biology, "punnett"),
    ] {
      let practice = generate_practice(subject, GradeLevel::G8, seed, 8);
      assert!(!practice.is_empty());
      for p in &practice {
        assert_eq!(p.choices.len(), CHOICE_COUNT, "seed {seed:?}");
        let unique: HashSet<&String> = p.choices.iter().collect();
        assert_eq!(unique.len(), CHOICE_COUNT, "duplicate choices for {seed:?}");
        assert!(p.choices.contains(&p.item.answer), "answer missing for {seed:?}");
      }
    }
  }

  #[test]
  fn jitter_around_zero_never_renders_negative_zero() {
    // A zero answer pulls gaussian draws below zero roughly half the time;
    // none of them may surface as the string "-0".
    for s in 0..50 {
      let mut rng = Rng32::from_seed_text(&format!("choices-{s}"));
      let choices = build_choices(&mut rng, "0", knobs_for(GradeLevel::G6));
      for c in &choices {
        let is_zero = c.parse::<f64>().map(|v| v == 0.0).unwrap_or(false);
        assert!(!(is_zero && c.starts_with('-')), "negative zero rendered: {c:?}");
      }
    }
  }

  #[test]
  fn practice_is_deterministic_too() {
    let a = generate_practice(Subject::Science, GradeLevel::G10, "acceleration", 6);
    let b = generate_practice(Subject::Science, GradeLevel::G10, "acceleration", 6);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
  }
}
