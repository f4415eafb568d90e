use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;

/// A homogeneous 4D tuple.
///
/// Points carry `w == 1.0` and vectors carry `w == 0.0`, so that translations
/// move points but leave vectors untouched. Equality is approximate; see
/// `feq`.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple4D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64
}

impl PartialEq for Tuple4D {
    fn eq(&self, other: &Tuple4D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z) &&
            feq(self.w, other.w)
    }
}

impl Tuple4D {
    pub fn tuple(x: f64, y: f64, z: f64, w: f64) -> Tuple4D {
        Tuple4D { x, y, z, w }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Tuple4D {
        Tuple4D { x, y, z, w: 1.0 }
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Tuple4D {
        Tuple4D { x, y, z, w: 0.0 }
    }

    /// The point at the origin.
    pub fn origin() -> Tuple4D {
        Tuple4D::point(0.0, 0.0, 0.0)
    }

    pub fn is_point(&self) -> bool {
        self.w == 1.0
    }

    pub fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Scales a tuple to unit length.
    ///
    /// A tuple with a (near) zero magnitude has no direction; it normalizes to
    /// the zero vector instead of a tuple full of `NaN`s.
    pub fn normalize(&self) -> Tuple4D {
        let mag = self.magnitude();
        if feq(mag, 0.0) {
            return Tuple4D::vector(0.0, 0.0, 0.0);
        }

        *self / mag
    }

    pub fn dot(&self, other: &Tuple4D) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
            + self.w * other.w
    }

    pub fn cross(&self, other: &Tuple4D) -> Tuple4D {
        Tuple4D::vector(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Reflects a vector across a normal.
    pub fn reflect(&self, normal: &Tuple4D) -> Tuple4D {
        *self - (*normal * 2.0 * self.dot(normal))
    }
}

/// Component-wise binary operator between two tuples.
macro_rules! componentwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Tuple4D {
            type Output = Tuple4D;

            fn $method(self, other: Tuple4D) -> Tuple4D {
                Tuple4D::tuple(
                    self.x $op other.x,
                    self.y $op other.y,
                    self.z $op other.z,
                    self.w $op other.w,
                )
            }
        }
    };
}

/// Operator between a tuple and a scalar on its right.
macro_rules! scalar {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f64> for Tuple4D {
            type Output = Tuple4D;

            fn $method(self, k: f64) -> Tuple4D {
                Tuple4D::tuple(self.x $op k, self.y $op k, self.z $op k, self.w $op k)
            }
        }
    };
}

componentwise!(Add, add, +);
componentwise!(Sub, sub, -);
scalar!(Mul, mul, *);
scalar!(Div, div, /);

impl Neg for Tuple4D {
    type Output = Tuple4D;

    fn neg(self) -> Tuple4D {
        self * -1.0
    }
}

/// Scalar left-multiplication, so that `k * t == t * k`.
///
/// ```
/// # use whitted_tracer::tuple::Tuple4D;
/// let t = Tuple4D::tuple(1.0, 2.0, 3.0, 4.0);
/// assert_eq!(5.0 * t, t * 5.0);
/// assert_eq!(5.0 * t, Tuple4D::tuple(5.0, 10.0, 15.0, 20.0));
/// ```
impl Mul<Tuple4D> for f64 {
    type Output = Tuple4D;

    fn mul(self, t: Tuple4D) -> Tuple4D {
        t * self
    }
}

#[test]
fn point_and_vector_flags() {
    let p = Tuple4D::tuple(4.3, -4.2, 3.1, 1.0);
    let v = Tuple4D::tuple(4.3, -4.2, 3.1, 0.0);

    assert!(p.is_point() && !p.is_vector());
    assert!(v.is_vector() && !v.is_point());
    assert_eq!(Tuple4D::point(4.3, -4.2, 3.1), p);
    assert_eq!(Tuple4D::vector(4.3, -4.2, 3.1), v);
}

#[test]
fn add_tuples() {
    let a1 = Tuple4D::tuple(3.0, -2.0, 5.0, 1.0);
    let a2 = Tuple4D::tuple(-2.0, 3.0, 1.0, 0.0);

    assert_eq!(a1 + a2, Tuple4D::tuple(1.0, 1.0, 6.0, 1.0));
}

#[test]
fn sub_points() {
    let p1 = Tuple4D::point(3.0, 2.0, 1.0);
    let p2 = Tuple4D::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple4D::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Tuple4D::point(3.0, 2.0, 1.0);
    let v = Tuple4D::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple4D::point(-2.0, -4.0, -6.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(-a, Tuple4D::tuple(-1.0, 2.0, -3.0, 4.0));
}

#[test]
fn mul_and_div_scalar() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 3.5, Tuple4D::tuple(3.5, -7.0, 10.5, -14.0));
    assert_eq!(a * 0.5, Tuple4D::tuple(0.5, -1.0, 1.5, -2.0));
    assert_eq!(a / 2.0, Tuple4D::tuple(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn magnitude() {
    assert_eq!(Tuple4D::vector(1.0, 2.0, 3.0).magnitude(), f64::sqrt(14.0));
    assert_eq!(Tuple4D::vector(-1.0, -2.0, -3.0).magnitude(), f64::sqrt(14.0));
    assert_eq!(Tuple4D::vector(0.0, 1.0, 0.0).magnitude(), 1.0);
}

#[test]
fn normalize_clean() {
    let v = Tuple4D::vector(4.0, 0.0, 0.0);

    assert_eq!(v.normalize(), Tuple4D::vector(1.0, 0.0, 0.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple4D::vector(1.0, 2.0, 3.0);
    let e = Tuple4D::vector(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
    assert!(crate::feq(v.normalize().magnitude(), 1.0));
}

#[test]
fn normalize_zero_vector() {
    let n = Tuple4D::vector(0.0, 0.0, 0.0).normalize();

    assert_eq!(n, Tuple4D::vector(0.0, 0.0, 0.0));
    assert!(!n.x.is_nan());
}

#[test]
fn dot_vectors() {
    let a = Tuple4D::vector(1.0, 2.0, 3.0);
    let b = Tuple4D::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Tuple4D::vector(1.0, 2.0, 3.0);
    let b = Tuple4D::vector(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Tuple4D::vector(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Tuple4D::vector(1.0, -2.0, 1.0));
}

#[test]
fn reflect_45() {
    let v = Tuple4D::vector(1.0, -1.0, 0.0);
    let n = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple4D::vector(1.0, 1.0, 0.0));
}

#[test]
fn reflect_slanted_surface() {
    let v = Tuple4D::vector(0.0, -1.0, 0.0);
    let n = Tuple4D::vector(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple4D::vector(1.0, 0.0, 0.0));
}

#[test]
fn reflect_twice_is_identity() {
    let n = Tuple4D::vector(1.0, 2.0, -0.5).normalize();
    let vectors = [
        Tuple4D::vector(1.0, -1.0, 0.0),
        Tuple4D::vector(0.3, 4.0, -2.0),
        Tuple4D::vector(-7.0, 0.0, 0.25),
    ];

    for v in vectors.iter() {
        assert_eq!(v.reflect(&n).reflect(&n), *v);
    }
}
