//! One pure builder per topic. Each builder draws only from the rng it is
//! given (no other entropy source) and returns a fully formed question core;
//! ids are assigned later by the orchestrator.
//!
//! Divisors are always drawn from ranges starting at 1 or above, so no
//! builder can divide by zero or produce a non-finite answer.

use crate::domain::{ItemCore, TopicId};
use crate::knobs::GradeKnobs;
use crate::rng::Rng32;
use crate::util::{frac_str, gcd, round2};

pub type Builder = fn(&mut Rng32, &GradeKnobs) -> ItemCore;

/// Builder for a detected topic. Total over all topics.
pub fn builder_for(topic: TopicId) -> Builder {
  match topic {
    TopicId::Fractions => build_fractions,
    TopicId::Decimals => build_decimals,
    TopicId::Integers => build_integers,
    TopicId::Geometry => build_geometry,
    TopicId::Algebra => build_algebra,
    TopicId::PhysSpeed => build_phys_speed,
    TopicId::PhysAccel => build_phys_accel,
    TopicId::ChemDensity => build_chem_density,
    TopicId::ChemPercent => build_chem_percent,
    TopicId::BioPunnett => build_bio_punnett,
  }
}

fn reduce(n: i64, d: i64) -> (i64, i64) {
  let g = gcd(n, d);
  (n / g, d / g)
}

pub fn build_fractions(rng: &mut Rng32, knobs: &GradeKnobs) -> ItemCore {
  let (n1, d1) = reduce(rng.int_in(1, 9), *rng.pick(knobs.denominators));
  let (n2, d2) = reduce(rng.int_in(1, 9), *rng.pick(knobs.denominators));
  let (sn, sd) = reduce(n1 * d2 + n2 * d1, d1 * d2);
  let f1 = frac_str(n1, d1);
  let f2 = frac_str(n2, d2);
  let answer = frac_str(sn, sd);
  ItemCore {
    stem: format!("What is {f1} + {f2}? Give your answer in simplest form."),
    answer: answer.clone(),
    alt_a: format!("Add the fractions {f1} and {f2} and simplify."),
    alt_b: format!("Find the sum: {f1} + {f2}."),
    rubric: format!("1 pt: common denominator; 1 pt: correct sum; 1 pt: simplest form ({answer})"),
  }
}

fn fmt_scaled(v: i64, two_place: bool) -> String {
  if two_place {
    format!("{}.{:02}", v / 100, v % 100)
  } else {
    format!("{}.{}", v / 10, v % 10)
  }
}

pub fn build_decimals(rng: &mut Rng32, knobs: &GradeKnobs) -> ItemCore {
  // Scaled-integer arithmetic keeps the sum exact at the knob precision.
  let scale = if knobs.two_place_decimals { 100 } else { 10 };
  let a = rng.int_in(1, 20 * scale - 1);
  let b = rng.int_in(1, 20 * scale - 1);
  let sa = fmt_scaled(a, knobs.two_place_decimals);
  let sb = fmt_scaled(b, knobs.two_place_decimals);
  let answer = fmt_scaled(a + b, knobs.two_place_decimals);
  ItemCore {
    stem: format!("What is {sa} + {sb}?"),
    answer: answer.clone(),
    alt_a: format!("Add the decimals {sa} and {sb}."),
    alt_b: format!("Find the sum of {sa} and {sb}."),
    rubric: format!("1 pt: aligned place values; 1 pt: correct sum ({answer})"),
  }
}

/// Operand rendering uses the minus-sign glyph (U+2212), not a hyphen.
fn fmt_operand(n: i64) -> String {
  if n < 0 {
    format!("(−{})", -n)
  } else {
    n.to_string()
  }
}

pub fn build_integers(rng: &mut Rng32, knobs: &GradeKnobs) -> ItemCore {
  let a = rng.int_in(-knobs.int_abs, knobs.int_abs);
  let b = rng.int_in(-knobs.int_abs, knobs.int_abs);
  let subtract = rng.next() < 0.5;
  let (op, result) = if subtract { ("−", a - b) } else { ("+", a + b) };
  let (fa, fb) = (fmt_operand(a), fmt_operand(b));
  let answer = result.to_string();
  ItemCore {
    stem: format!("What is {fa} {op} {fb}?"),
    answer: answer.clone(),
    alt_a: format!("Evaluate {fa} {op} {fb}."),
    alt_b: format!("Work out {fa} {op} {fb} on a number line."),
    rubric: format!("1 pt: sign handling; 1 pt: correct result ({answer})"),
  }
}

pub fn build_geometry(rng: &mut Rng32, _knobs: &GradeKnobs) -> ItemCore {
  let w = rng.int_in(3, 14);
  let h = rng.int_in(3, 14);
  let area = rng.next() < 0.5;
  if area {
    let answer = (w * h).to_string();
    ItemCore {
      stem: format!("A rectangle is {w} units wide and {h} units tall. What is its area?"),
      answer: answer.clone(),
      alt_a: format!("Find the area of a {w} × {h} rectangle."),
      alt_b: format!("How many unit squares cover a {w} by {h} rectangle?"),
      rubric: format!("1 pt: area = width × height; 1 pt: correct product ({answer})"),
    }
  } else {
    let answer = (2 * (w + h)).to_string();
    ItemCore {
      stem: format!("A rectangle is {w} units wide and {h} units tall. What is its perimeter?"),
      answer: answer.clone(),
      alt_a: format!("Find the perimeter of a {w} × {h} rectangle."),
      alt_b: format!("What is the total distance around a {w} by {h} rectangle?"),
      rubric: format!("1 pt: perimeter = 2 × (width + height); 1 pt: correct total ({answer})"),
    }
  }
}

pub fn build_algebra(rng: &mut Rng32, knobs: &GradeKnobs) -> ItemCore {
  // ax + b = c built from a known solution, so the stem recovers exactly x.
  let a = rng.int_in(2, 9);
  let x = rng.int_in(1, 10);
  let b = rng.int_in(0, knobs.int_abs - 1);
  let c = a * x + b;
  ItemCore {
    stem: format!("Solve for x: {a}x + {b} = {c}."),
    answer: x.to_string(),
    alt_a: format!("Find the value of x if {a}x + {b} = {c}."),
    alt_b: format!("Which x satisfies {a}x + {b} = {c}?"),
    rubric: format!("1 pt: subtract {b} from both sides; 1 pt: divide by {a}; 1 pt: x = {x}"),
  }
}

pub fn build_phys_speed(rng: &mut Rng32, knobs: &GradeKnobs) -> ItemCore {
  let q = &knobs.quantities;
  let d = rng.int_in(q.distance_m.lo, q.distance_m.hi);
  let t = rng.int_in(q.time_s.lo, q.time_s.hi);
  let v = round2(d as f64 / t as f64);
  ItemCore {
    stem: format!("A cyclist travels {d} m in {t} s. What is the average speed in m/s?"),
    answer: format!("{v:.2}"),
    alt_a: format!("Covering {d} m takes {t} s. Find the average speed."),
    alt_b: format!("Compute v for d = {d} m and t = {t} s."),
    rubric: format!("1 pt: v = d / t; 1 pt: substitution; 1 pt: {v:.2} m/s"),
  }
}

pub fn build_phys_accel(rng: &mut Rng32, knobs: &GradeKnobs) -> ItemCore {
  let q = &knobs.quantities;
  let dv = rng.int_in(q.velocity_delta_ms.lo, q.velocity_delta_ms.hi);
  let t = rng.int_in(q.time_s.lo, q.time_s.hi);
  let a = round2(dv as f64 / t as f64);
  ItemCore {
    stem: format!(
      "A car speeds up by {dv} m/s over {t} s. What is the average acceleration in m/s²?"
    ),
    answer: format!("{a:.2}"),
    alt_a: format!("Velocity changes by {dv} m/s in {t} s. Find the acceleration."),
    alt_b: format!("Compute a for Δv = {dv} m/s and t = {t} s."),
    rubric: format!("1 pt: a = Δv / t; 1 pt: substitution; 1 pt: {a:.2} m/s²"),
  }
}

pub fn build_chem_density(rng: &mut Rng32, knobs: &GradeKnobs) -> ItemCore {
  let q = &knobs.quantities;
  let m = rng.int_in(q.mass_g.lo, q.mass_g.hi);
  let v = rng.int_in(q.volume_cm3.lo, q.volume_cm3.hi);
  let rho = round2(m as f64 / v as f64);
  ItemCore {
    stem: format!(
      "A sample has a mass of {m} g and a volume of {v} cm³. What is its density in g/cm³?"
    ),
    answer: format!("{rho:.2}"),
    alt_a: format!("Find the density of a {m} g sample occupying {v} cm³."),
    alt_b: format!("Compute ρ for m = {m} g and V = {v} cm³."),
    rubric: format!("1 pt: ρ = m / V; 1 pt: substitution; 1 pt: {rho:.2} g/cm³"),
  }
}

pub fn build_chem_percent(rng: &mut Rng32, knobs: &GradeKnobs) -> ItemCore {
  let q = &knobs.quantities;
  let part = rng.int_in(q.mass_g.lo, q.mass_g.hi);
  // Total is strictly greater than the part, so the percentage stays below 100.
  let total = part + rng.int_in(q.mass_g.lo, q.mass_g.hi);
  let pct = round2(part as f64 * 100.0 / total as f64);
  ItemCore {
    stem: format!(
      "A {total} g compound contains {part} g of one element. What percent of the compound's mass is that element?"
    ),
    answer: format!("{pct:.2}"),
    alt_a: format!("Find the mass percent of a {part} g element in a {total} g compound."),
    alt_b: format!("What fraction of {total} g is {part} g, as a percent?"),
    rubric: format!("1 pt: % = part / whole × 100; 1 pt: substitution; 1 pt: {pct:.2}%"),
  }
}

// Monohybrid crosses with their dominant-phenotype percentages. This is an
// analytic lookup, not a genetics simulation.
const CROSSES: &[(&str, &str, i64)] = &[
  ("AA", "AA", 100),
  ("AA", "Aa", 100),
  ("AA", "aa", 100),
  ("Aa", "Aa", 75),
  ("Aa", "aa", 50),
];

const TRAITS: &[(&str, &str, &str)] = &[
  ("tall stems", "short stems", "pea plants"),
  ("purple flowers", "white flowers", "pea plants"),
  ("round seeds", "wrinkled seeds", "pea plants"),
  ("red eyes", "white eyes", "fruit flies"),
];

pub fn build_bio_punnett(rng: &mut Rng32, _knobs: &GradeKnobs) -> ItemCore {
  let (p1, p2, pct) = *rng.pick(CROSSES);
  let (dominant, recessive, organism) = *rng.pick(TRAITS);
  ItemCore {
    stem: format!(
      "In {organism}, {dominant} (A) are dominant over {recessive} (a). What percentage of offspring from a {p1} × {p2} cross will show the dominant phenotype?"
    ),
    answer: format!("{pct}%"),
    alt_a: format!("Predict the dominant-phenotype share for the cross {p1} × {p2}."),
    alt_b: format!("Draw the Punnett square for {p1} × {p2}. What percent show {dominant}?"),
    rubric: format!("1 pt: 2×2 Punnett square; 1 pt: genotype ratio; 1 pt: {pct}% dominant"),
  }
}
