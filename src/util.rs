//! Small utility helpers used across modules.

/// Normalized form used for stem deduplication: whitespace-trimmed,
/// case-insensitive.
pub fn normalize_stem(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Greatest common divisor on absolute values. `gcd(0, 0)` is 1 so callers
/// can always divide by the result.
pub fn gcd(a: i64, b: i64) -> i64 {
  let (mut a, mut b) = (a.abs(), b.abs());
  while b != 0 {
    let t = b;
    b = a % b;
    a = t;
  }
  if a == 0 { 1 } else { a }
}

/// Round to two decimal places. Science builders quote derived quantities at
/// fixed precision.
pub fn round2(x: f64) -> f64 {
  (x * 100.0).round() / 100.0
}

/// Render `n/d` with the denominator elided when the fraction is whole.
pub fn frac_str(n: i64, d: i64) -> String {
  if d == 1 {
    n.to_string()
  } else {
    format!("{}/{}", n, d)
  }
}
