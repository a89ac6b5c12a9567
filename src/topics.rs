//! Keyword topic detection: map a free-text seed to a canonical topic per
//! subject.
//!
//! The rule lists are ordered and the first matching rule wins. That order is
//! a load-bearing contract with the UI's preset lists (a seed containing both
//! "chem" and "speed" resolves to chem_density because that rule is checked
//! first), so keep the lists exactly as written.

use crate::domain::{Subject, TopicId};

struct Rule {
  keywords: &'static [&'static str],
  topic: TopicId,
}

const MATH_RULES: &[Rule] = &[
  Rule { keywords: &["fraction"], topic: TopicId::Fractions },
  Rule { keywords: &["decimal"], topic: TopicId::Decimals },
  Rule { keywords: &["integer"], topic: TopicId::Integers },
  Rule { keywords: &["geometry", "area", "perimeter"], topic: TopicId::Geometry },
  Rule { keywords: &["algebra", "equation", "solve"], topic: TopicId::Algebra },
];

const SCIENCE_RULES: &[Rule] = &[
  Rule { keywords: &["density", "chem"], topic: TopicId::ChemDensity },
  Rule { keywords: &["speed", "velocity", "distance", "phys"], topic: TopicId::PhysSpeed },
  Rule { keywords: &["accel"], topic: TopicId::PhysAccel },
  Rule { keywords: &["%", "composition"], topic: TopicId::ChemPercent },
];

const BIOLOGY_RULES: &[Rule] = &[
  Rule { keywords: &["punnett", "genetic"], topic: TopicId::BioPunnett },
];

fn default_topic(subject: Subject) -> TopicId {
  match subject {
    Subject::Math => TopicId::Fractions,
    Subject::Science => TopicId::PhysSpeed,
    Subject::Biology => TopicId::BioPunnett,
  }
}

/// Detect the topic for `seed_text` under `subject`. Never fails: when no
/// rule matches, the per-subject default topic is returned.
pub fn detect_topic(subject: Subject, seed_text: &str) -> TopicId {
  let needle = seed_text.to_lowercase();
  let rules = match subject {
    Subject::Math => MATH_RULES,
    Subject::Science => SCIENCE_RULES,
    Subject::Biology => BIOLOGY_RULES,
  };
  for rule in rules {
    if rule.keywords.iter().any(|k| needle.contains(k)) {
      return rule.topic;
    }
  }
  default_topic(subject)
}
