pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod ray;

pub mod color;
pub mod pattern;
pub mod light;

pub mod shape;
pub mod intersect;
pub mod world;
pub mod camera;

pub mod config;
pub mod parallel;
pub mod canvas;
pub mod scene;

use consts::FEQ_EPSILON;

/// Approximate floating point equality.
///
/// Exactly equal values (including equal infinities) compare equal. `NaN` is
/// only equal to `NaN`, and an infinity is only equal to the same infinity.
/// Otherwise two values are equal if they are within `FEQ_EPSILON` of each
/// other, or if their relative error is at most `FEQ_EPSILON`.
///
/// ```
/// # use whitted_tracer::feq;
/// assert!(feq(0.1 + 0.2, 0.3));
/// assert!(feq(100_000.0, 100_000.5));
/// assert!(feq(f64::NAN, f64::NAN));
/// assert!(!feq(f64::INFINITY, f64::MAX));
/// assert!(!feq(1.0, 1.001));
/// ```
pub fn feq(left: f64, right: f64) -> bool {
    if left == right {
        return true;
    }

    if left.is_nan() || right.is_nan() {
        return left.is_nan() && right.is_nan();
    }

    if left.is_infinite() || right.is_infinite() {
        return false;
    }

    let diff = (left - right).abs();
    if diff < FEQ_EPSILON {
        return true;
    }

    diff / left.abs().max(right.abs()) <= FEQ_EPSILON
}

#[test]
fn feq_tolerates_small_absolute_error() {
    assert!(feq(0.0, 0.00001));
    assert!(feq(std::f64::consts::FRAC_PI_2.cos(), 0.0));
    assert!(!feq(0.0, 0.001));
}

#[test]
fn feq_uses_relative_error_for_large_values() {
    assert!(feq(12345.6, 12345.7));
    assert!(!feq(12345.0, 12350.0));
    assert!(feq(-12345.6, -12345.7));
}

#[test]
fn feq_special_values() {
    assert!(feq(f64::INFINITY, f64::INFINITY));
    assert!(!feq(f64::INFINITY, f64::NEG_INFINITY));
    assert!(!feq(f64::NAN, 0.0));
    assert!(!feq(1.0, f64::NAN));
}
