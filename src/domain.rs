//! Domain models: subjects, grade levels, topics, generated items, and
//! synthetic grading rows. All of these are value objects; the generation
//! layer never mutates a record after returning it.

use serde::{Deserialize, Serialize};

/// Subjects the generator knows about. Unrecognized input canonicalizes to
/// Math rather than failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
  Math,
  Science,
  Biology,
}

impl Subject {
  pub fn parse(s: &str) -> Self {
    match s.trim().to_lowercase().as_str() {
      "science" => Subject::Science,
      "biology" => Subject::Biology,
      _ => Subject::Math,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Subject::Math => "Math",
      Subject::Science => "Science",
      Subject::Biology => "Biology",
    }
  }
}

/// Supported grade levels. The difficulty table has a complete knob record
/// for every variant; anything else falls back to `DEFAULT`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradeLevel {
  G6,
  G7,
  G8,
  G9,
  G10,
}

impl GradeLevel {
  pub const DEFAULT: GradeLevel = GradeLevel::G7;

  /// Canonicalize a free-form grade ("8", " 8 ", "G8"). Unrecognized input
  /// returns the default grade; this is a documented fallback, not an error.
  pub fn parse(s: &str) -> Self {
    let t = s.trim().to_lowercase();
    let t = t.strip_prefix('g').unwrap_or(&t);
    match t {
      "6" => GradeLevel::G6,
      "7" => GradeLevel::G7,
      "8" => GradeLevel::G8,
      "9" => GradeLevel::G9,
      "10" => GradeLevel::G10,
      _ => GradeLevel::DEFAULT,
    }
  }

  pub fn from_number(n: i64) -> Self {
    Self::parse(&n.to_string())
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      GradeLevel::G6 => "6",
      GradeLevel::G7 => "7",
      GradeLevel::G8 => "8",
      GradeLevel::G9 => "9",
      GradeLevel::G10 => "10",
    }
  }

  pub fn as_number(&self) -> i64 {
    match self {
      GradeLevel::G6 => 6,
      GradeLevel::G7 => 7,
      GradeLevel::G8 => 8,
      GradeLevel::G9 => 9,
      GradeLevel::G10 => 10,
    }
  }
}

/// Canonical topic identifiers produced by the detector and dispatched to
/// builders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicId {
  Fractions,
  Decimals,
  Integers,
  Geometry,
  Algebra,
  PhysSpeed,
  PhysAccel,
  ChemDensity,
  ChemPercent,
  BioPunnett,
}

impl TopicId {
  pub fn as_str(&self) -> &'static str {
    match self {
      TopicId::Fractions => "fractions",
      TopicId::Decimals => "decimals",
      TopicId::Integers => "integers",
      TopicId::Geometry => "geometry",
      TopicId::Algebra => "algebra",
      TopicId::PhysSpeed => "phys_speed",
      TopicId::PhysAccel => "phys_accel",
      TopicId::ChemDensity => "chem_density",
      TopicId::ChemPercent => "chem_percent",
      TopicId::BioPunnett => "bio_punnett",
    }
  }
}

/// Builder output before an id is assigned.
#[derive(Clone, Debug)]
pub struct ItemCore {
  pub stem: String,
  pub answer: String,
  pub alt_a: String,
  pub alt_b: String,
  pub rubric: String,
}

/// One generated assessment question. Ids are sequence numbers unique within
/// a batch; `stem` is never empty and never duplicated within a batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Item {
  pub id: u32,
  pub stem: String,
  pub answer: String,
  #[serde(rename = "altA")]
  pub alt_a: String,
  #[serde(rename = "altB")]
  pub alt_b: String,
  pub rubric: String,
}

/// An assessment item plus a deduplicated, shuffled 4-choice set. Exactly one
/// choice equals `item.answer`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PracticeItem {
  #[serde(flatten)]
  pub item: Item,
  pub choices: Vec<String>,
}

/// Review lifecycle of a grading row. Rows are synthesized as `Pending`; the
/// UI layer owns the later transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
  Pending,
  Graded,
  Reviewed,
  Override,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RubricLine {
  pub label: String,
  pub points: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Evidence {
  pub rationale: String,
  pub rubric: Vec<RubricLine>,
  pub excerpts: Vec<String>,
}

/// One synthetic per-student grading record. Scores live in [20, 99],
/// confidence in [40, 98]; `flagged` is true when score < 50 or
/// confidence < 55.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GradingRow {
  pub id: u32,
  pub student: String,
  #[serde(rename = "gradeLevel")]
  pub grade_level: String,
  pub subject: String,
  pub score: i64,
  pub confidence: i64,
  pub status: RowStatus,
  pub flagged: bool,
  pub evidence: Evidence,
}
