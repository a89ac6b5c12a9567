//! Grade difficulty table: numeric ranges that scale generated problems by
//! grade level. Every supported grade has a complete record; `knobs_for`
//! never fails (unrecognized grades resolve to the default grade first).

use crate::domain::GradeLevel;

/// Inclusive integer range for a physical quantity drawn by science builders.
#[derive(Clone, Copy, Debug)]
pub struct QtyRange {
  pub lo: i64,
  pub hi: i64,
}

#[derive(Clone, Copy, Debug)]
pub struct QuantityRanges {
  pub distance_m: QtyRange,
  pub time_s: QtyRange,
  pub mass_g: QtyRange,
  pub volume_cm3: QtyRange,
  pub velocity_delta_ms: QtyRange,
}

#[derive(Clone, Copy, Debug)]
pub struct GradeKnobs {
  pub grade: GradeLevel,
  /// Magnitude bound for integer operands: draws land in [-int_abs, int_abs].
  pub int_abs: i64,
  /// Allowed fraction denominators for this grade.
  pub denominators: &'static [i64],
  /// Two decimal places when set; one otherwise.
  pub two_place_decimals: bool,
  pub quantities: QuantityRanges,
}

const fn qty(lo: i64, hi: i64) -> QtyRange {
  QtyRange { lo, hi }
}

static KNOBS_G6: GradeKnobs = GradeKnobs {
  grade: GradeLevel::G6,
  int_abs: 20,
  denominators: &[2, 3, 4, 5, 6],
  two_place_decimals: false,
  quantities: QuantityRanges {
    distance_m: qty(20, 100),
    time_s: qty(5, 20),
    mass_g: qty(50, 200),
    volume_cm3: qty(10, 50),
    velocity_delta_ms: qty(2, 10),
  },
};

static KNOBS_G7: GradeKnobs = GradeKnobs {
  grade: GradeLevel::G7,
  int_abs: 30,
  denominators: &[2, 3, 4, 5, 6, 8],
  two_place_decimals: false,
  quantities: QuantityRanges {
    distance_m: qty(30, 150),
    time_s: qty(5, 25),
    mass_g: qty(50, 300),
    volume_cm3: qty(10, 60),
    velocity_delta_ms: qty(2, 12),
  },
};

static KNOBS_G8: GradeKnobs = GradeKnobs {
  grade: GradeLevel::G8,
  int_abs: 50,
  denominators: &[3, 4, 5, 6, 8, 10, 12],
  two_place_decimals: true,
  quantities: QuantityRanges {
    distance_m: qty(50, 300),
    time_s: qty(10, 40),
    mass_g: qty(100, 500),
    volume_cm3: qty(20, 100),
    velocity_delta_ms: qty(4, 20),
  },
};

static KNOBS_G9: GradeKnobs = GradeKnobs {
  grade: GradeLevel::G9,
  int_abs: 80,
  denominators: &[4, 5, 6, 8, 10, 12],
  two_place_decimals: true,
  quantities: QuantityRanges {
    distance_m: qty(80, 500),
    time_s: qty(10, 60),
    mass_g: qty(100, 800),
    volume_cm3: qty(20, 150),
    velocity_delta_ms: qty(5, 30),
  },
};

static KNOBS_G10: GradeKnobs = GradeKnobs {
  grade: GradeLevel::G10,
  int_abs: 120,
  denominators: &[5, 6, 8, 10, 12, 15],
  two_place_decimals: true,
  quantities: QuantityRanges {
    distance_m: qty(100, 800),
    time_s: qty(15, 90),
    mass_g: qty(200, 1200),
    volume_cm3: qty(30, 200),
    velocity_delta_ms: qty(6, 40),
  },
};

/// Knobs for a canonical grade. Always returns a complete record.
pub fn knobs_for(grade: GradeLevel) -> &'static GradeKnobs {
  match grade {
    GradeLevel::G6 => &KNOBS_G6,
    GradeLevel::G7 => &KNOBS_G7,
    GradeLevel::G8 => &KNOBS_G8,
    GradeLevel::G9 => &KNOBS_G9,
    GradeLevel::G10 => &KNOBS_G10,
  }
}

/// Knobs for free-form grade input: canonicalize first, then look up.
/// Unrecognized grades get the default grade's record.
#[allow(dead_code)]
pub fn knobs_for_input(grade: &str) -> &'static GradeKnobs {
  knobs_for(GradeLevel::parse(grade))
}
