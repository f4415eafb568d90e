use std::fmt;
use std::ops::{ Index, IndexMut, Mul };
use std::convert::From;

use crate::feq;
use crate::tuple::Tuple4D;

/// Implements the operations shared by every square matrix size.
///
/// Each matrix type must provide `determinant` and `cofactor`; everything
/// else (indexing, identity, transposition, products and the inverse) only
/// depends on the dimension `$n`.
macro_rules! square_matrix {
    ($name:ident, $n:expr) => {
        impl $name {
            /// Creates a matrix with every element initialized to `0.0`.
            pub fn new() -> $name {
                $name { data: [0.0; $n * $n] }
            }

            /// Instantiates an identity matrix.
            pub fn identity() -> $name {
                let mut m = Self::new();
                for i in 0..$n {
                    m[(i, i)] = 1.0;
                }

                m
            }

            /// Produces the transpose of a matrix, returning a new matrix.
            ///
            /// The transpose swaps rows with columns; element `(r, c)` of the
            /// result is element `(c, r)` of the original.
            pub fn transposition(&self) -> $name {
                let mut buf = Self::new();
                for r in 0..$n {
                    for c in 0..$n {
                        buf[(c, r)] = self[(r, c)];
                    }
                }

                buf
            }

            /// Whether this matrix has an inverse.
            ///
            /// Only an exactly-zero determinant is considered singular.
            pub fn is_invertible(&self) -> bool {
                self.determinant() != 0.0
            }

            /// Calculates the inverse of a matrix, if it exists.
            ///
            /// The inverse is the transposed matrix of cofactors, divided by
            /// the determinant. If the determinant is zero, `None` is
            /// returned.
            pub fn inverse(&self) -> Option<$name> {
                let det = self.determinant();
                if det == 0.0 {
                    return None;
                }

                let mut inv = Self::new();
                for r in 0..$n {
                    for c in 0..$n {
                        inv[(c, r)] = self.cofactor(r, c) / det;
                    }
                }

                Some(inv)
            }
        }

        impl From<[f64; $n * $n]> for $name {
            fn from(data: [f64; $n * $n]) -> $name {
                $name { data }
            }
        }

        impl Index<(usize, usize)> for $name {
            type Output = f64;

            fn index(&self, index: (usize, usize)) -> &f64 {
                &self.data[(index.0 * $n) + index.1]
            }
        }

        impl IndexMut<(usize, usize)> for $name {
            fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
                &mut self.data[(index.0 * $n) + index.1]
            }
        }

        /// Matrices are compared element-wise, approximately.
        impl PartialEq for $name {
            fn eq(&self, other: &$name) -> bool {
                self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
            }
        }

        /// Row-by-column matrix product.
        ///
        /// Matrix multiplication is not commutative; `A * B` is not
        /// necessarily equal to `B * A`.
        impl Mul<$name> for $name {
            type Output = $name;

            fn mul(self, other: $name) -> $name {
                let mut res = Self::new();

                for r in 0..$n {
                    for c in 0..$n {
                        res[(r, c)] = (0..$n)
                            .map(|k| self[(r, k)] * other[(k, c)])
                            .sum();
                    }
                }

                res
            }
        }
    };
}

/// A 2x2 matrix.
#[derive(Copy, Clone, Debug)]
pub struct Matrix2D {
    data: [f64; 4],
}

/// A 3x3 matrix.
#[derive(Copy, Clone, Debug)]
pub struct Matrix3D {
    data: [f64; 9],
}

/// A 4x4 matrix.
///
/// These matrices are used almost universally in the ray tracer logic.
/// Basically, these matrices encode transformations in 3D space, transforming
/// both vectors and points (`w` components of `0.0` and `1.0`, respectively).
///
/// The smaller `Matrix2D` and `Matrix3D` types exist mostly to compute the
/// determinant and inverse of a `Matrix4D` by cofactor expansion.
///
/// # Examples
///
/// Creating an identity matrix:
///
/// ```
/// # use whitted_tracer::matrix::Matrix4D;
/// let mat = Matrix4D::identity();
/// assert_eq!(mat.determinant(), 1.0);
/// ```
///
/// Calculating a view transformation (for cameras, etc.):
///
/// ```
/// # use whitted_tracer::tuple::Tuple4D;
/// # use whitted_tracer::matrix::Matrix4D;
/// let from = Tuple4D::point(0.0, 0.0, 8.0);
/// let to = Tuple4D::point(0.0, 0.0, 0.0);
/// let up = Tuple4D::vector(0.0, 1.0, 0.0);
/// let view = Matrix4D::view_transform(from, to, up);
/// assert_eq!(view, Matrix4D::translation(0.0, 0.0, -8.0));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Matrix4D {
    data: [f64; 16],
}

square_matrix!(Matrix2D, 2);
square_matrix!(Matrix3D, 3);
square_matrix!(Matrix4D, 4);

impl Matrix2D {
    pub fn determinant(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }

    /// The minor of a 2x2 matrix is the single element left over once `row`
    /// and `col` are removed.
    pub fn minor(&self, row: usize, col: usize) -> f64 {
        self[(1 - row, 1 - col)]
    }

    pub fn cofactor(&self, row: usize, col: usize) -> f64 {
        sign(row, col) * self.minor(row, col)
    }
}

/// `1` or `-1`, following a checkerboard starting with `1` at `(0, 0)`.
fn sign(row: usize, col: usize) -> f64 {
    if (row + col) % 2 == 0 { 1.0 } else { -1.0 }
}

/// Cofactor expansion for an `$n`x`$n` matrix whose submatrices are `$sub`.
macro_rules! cofactor_expansion {
    ($name:ident, $n:expr, $sub:ident) => {
        impl $name {
            /// Returns the matrix left once `row` and `col` are removed.
            pub fn submatrix(&self, row: usize, col: usize) -> $sub {
                let mut sub = $sub::new();
                let kept = (0..$n)
                    .filter(|&r| r != row)
                    .flat_map(|r| (0..$n).filter(move |&c| c != col)
                        .map(move |c| (r, c)));

                for (i, (r, c)) in kept.enumerate() {
                    sub.data[i] = self[(r, c)];
                }

                sub
            }

            /// The determinant of the submatrix at `row` and `col`.
            pub fn minor(&self, row: usize, col: usize) -> f64 {
                self.submatrix(row, col).determinant()
            }

            pub fn cofactor(&self, row: usize, col: usize) -> f64 {
                sign(row, col) * self.minor(row, col)
            }

            /// Expands along the first row.
            pub fn determinant(&self) -> f64 {
                (0..$n).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
            }
        }
    };
}

cofactor_expansion!(Matrix3D, 3, Matrix2D);
cofactor_expansion!(Matrix4D, 4, Matrix3D);

impl Matrix4D {
    /// Moves points by `(x, y, z)`. Vectors are unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4D {
        [
            1.0, 0.0, 0.0, x,
            0.0, 1.0, 0.0, y,
            0.0, 0.0, 1.0, z,
            0.0, 0.0, 0.0, 1.0,
        ].into()
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4D {
        [
            x,   0.0, 0.0, 0.0,
            0.0, y,   0.0, 0.0,
            0.0, 0.0, z,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ].into()
    }

    /// Rotates `r` radians about the X axis.
    ///
    /// ```
    /// # use whitted_tracer::tuple::Tuple4D;
    /// # use whitted_tracer::matrix::Matrix4D;
    /// let point = Tuple4D::point(0.0, 1.0, 0.0);
    /// let m = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple4D::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix4D {
        let (sin, cos) = r.sin_cos();
        [
            1.0, 0.0,  0.0, 0.0,
            0.0, cos, -sin, 0.0,
            0.0, sin,  cos, 0.0,
            0.0, 0.0,  0.0, 1.0,
        ].into()
    }

    /// Rotates `r` radians about the Y axis.
    ///
    /// ```
    /// # use whitted_tracer::tuple::Tuple4D;
    /// # use whitted_tracer::matrix::Matrix4D;
    /// let point = Tuple4D::point(1.0, 0.0, 0.0);
    /// let m = Matrix4D::rotation_y(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple4D::point(0.0, 0.0, -1.0));
    /// ```
    pub fn rotation_y(r: f64) -> Matrix4D {
        let (sin, cos) = r.sin_cos();
        [
             cos, 0.0, sin, 0.0,
             0.0, 1.0, 0.0, 0.0,
            -sin, 0.0, cos, 0.0,
             0.0, 0.0, 0.0, 1.0,
        ].into()
    }

    /// Rotates `r` radians about the Z axis.
    pub fn rotation_z(r: f64) -> Matrix4D {
        let (sin, cos) = r.sin_cos();
        [
            cos, -sin, 0.0, 0.0,
            sin,  cos, 0.0, 0.0,
            0.0,  0.0, 1.0, 0.0,
            0.0,  0.0, 0.0, 1.0,
        ].into()
    }

    /// Instantiates a 4x4 shearing matrix.
    ///
    /// Each parameter moves one coordinate in proportion to another; `xy`
    /// moves `x` in proportion to `y`, `zx` moves `z` in proportion to `x`,
    /// and so on.
    ///
    /// ```
    /// # use whitted_tracer::tuple::Tuple4D;
    /// # use whitted_tracer::matrix::Matrix4D;
    /// let point = Tuple4D::point(2.0, 3.0, 4.0);
    /// let m = Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * point, Tuple4D::point(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4D {
        [
            1.0, xy,  xz,  0.0,
            yx,  1.0, yz,  0.0,
            zx,  zy,  1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ].into()
    }

    /// Generates a view transformation.
    ///
    /// The eye sits at `from` and looks toward `to`; `up` only needs to point
    /// roughly upward. The result moves the *world* relative to the eye.
    pub fn view_transform(from: Tuple4D, to: Tuple4D, up: Tuple4D) -> Matrix4D {
        let forward = (to - from).normalize();
        let left = forward.cross(&up.normalize());
        let true_up = left.cross(&forward);

        let orientation: Matrix4D = [
             left.x,     left.y,     left.z,    0.0,
             true_up.x,  true_up.y,  true_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
             0.0,        0.0,        0.0,       1.0,
        ].into();

        orientation * Matrix4D::translation(-from.x, -from.y, -from.z)
    }
}

/// Transforms a point or vector, taken as a column.
///
/// ```
/// # use whitted_tracer::tuple::Tuple4D;
/// # use whitted_tracer::matrix::Matrix4D;
/// let v = Tuple4D::vector(1.0, 4.0, 5.0);
/// let m = Matrix4D::scaling(2.0, 2.0, 2.0);
/// assert_eq!(m * v, Tuple4D::vector(2.0, 8.0, 10.0));
/// ```
impl Mul<Tuple4D> for Matrix4D {
    type Output = Tuple4D;

    fn mul(self, t: Tuple4D) -> Tuple4D {
        let row = |r: usize| self[(r, 0)] * t.x + self[(r, 1)] * t.y
            + self[(r, 2)] * t.z + self[(r, 3)] * t.w;

        Tuple4D::tuple(row(0), row(1), row(2), row(3))
    }
}

impl fmt::Display for Matrix4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.data.chunks(4).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }

            write!(f, "|")?;
            for v in row {
                write!(f, " {} |", v)?;
            }
        }

        Ok(())
    }
}

#[test]
fn identity() {
    let i = Matrix4D::identity();
    let a: Matrix4D = [ 0.0, 1.0,  2.0,  4.0,
                        1.0, 2.0,  4.0,  8.0,
                        2.0, 4.0,  8.0, 16.0,
                        4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
}

#[test]
fn multiply_matrices() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        5.0, 6.0, 7.0, 8.0,
                        9.0, 8.0, 7.0, 6.0,
                        5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix4D = [ -2.0, 1.0, 2.0,  3.0,
                         3.0, 2.0, 1.0, -1.0,
                         4.0, 3.0, 6.0,  5.0,
                         1.0, 2.0, 7.0,  8.0, ].into();

    let p: Matrix4D = [ 20.0, 22.0,  50.0,  48.0,
                        44.0, 54.0, 114.0, 108.0,
                        40.0, 58.0, 110.0, 102.0,
                        16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, p);
}

#[test]
fn multiply_matrix_by_tuple() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        2.0, 4.0, 4.0, 2.0,
                        8.0, 6.0, 4.0, 1.0,
                        0.0, 0.0, 0.0, 1.0, ].into();

    let b = Tuple4D::tuple(1.0, 2.0, 3.0, 1.0);
    assert_eq!(a * b, Tuple4D::tuple(18.0, 24.0, 33.0, 1.0));
}

#[test]
fn transpose() {
    let a: Matrix4D = [ 0.0, 9.0, 3.0, 0.0,
                        9.0, 8.0, 0.0, 8.0,
                        1.0, 8.0, 5.0, 3.0,
                        0.0, 0.0, 5.0, 8.0, ].into();

    let t: Matrix4D = [ 0.0, 9.0, 1.0, 0.0,
                        9.0, 8.0, 8.0, 0.0,
                        3.0, 0.0, 5.0, 5.0,
                        0.0, 8.0, 3.0, 8.0, ].into();

    assert_eq!(t, a.transposition());
    assert_eq!(t.transposition(), a);
    assert_eq!(Matrix4D::identity(), Matrix4D::identity().transposition());
}

#[test]
fn mat2_determinant_and_inverse() {
    let a: Matrix2D = [  1.0, 5.0,
                        -3.0, 2.0, ].into();

    assert_eq!(a.determinant(), 17.0);
    assert_eq!(a * a.inverse().unwrap(), Matrix2D::identity());
    let t: Matrix2D = [ 1.0, -3.0, 5.0, 2.0 ].into();
    assert_eq!(a.transposition(), t);
}

#[test]
fn mat3_submatrix() {
    let a: Matrix3D = [  1.0, 5.0,  0.0,
                        -3.0, 2.0,  7.0,
                         0.0, 6.0, -3.0, ].into();

    let s: Matrix2D = [ -3.0, 2.0,
                         0.0, 6.0  ].into();

    assert_eq!(a.submatrix(0, 2), s);
}

#[test]
fn mat4_submatrix() {
    let a: Matrix4D = [ -6.0, 1.0,  1.0, 6.0,
                        -8.0, 5.0,  8.0, 6.0,
                        -1.0, 0.0,  8.0, 2.0,
                        -7.0, 1.0, -1.0, 1.0, ].into();

    let s: Matrix3D = [ -6.0,  1.0, 6.0,
                        -8.0,  8.0, 6.0,
                        -7.0, -1.0, 1.0, ].into();

    assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_cofactor() {
    let a: Matrix3D = [ 3.0,  5.0,  0.0,
                        2.0, -1.0, -7.0,
                        6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
    let a: Matrix3D = [  1.0, 2.0,  6.0,
                        -5.0, 8.0, -4.0,
                         2.0, 6.0,  4.0, ].into();

    assert_eq!(a.cofactor(0, 0), 56.0);
    assert_eq!(a.cofactor(0, 1), 12.0);
    assert_eq!(a.cofactor(0, 2), -46.0);
    assert_eq!(a.determinant(), -196.0);
    assert_eq!(a * a.inverse().unwrap(), Matrix3D::identity());
}

#[test]
fn mat4_determinant() {
    let a: Matrix4D = [ -2.0, -8.0,  3.0,  5.0,
                        -3.0,  1.0,  7.0,  3.0,
                         1.0,  2.0, -9.0,  6.0,
                        -6.0,  7.0,  7.0, -9.0, ].into();

    assert_eq!(a.cofactor(0, 0), 690.0);
    assert_eq!(a.cofactor(0, 1), 447.0);
    assert_eq!(a.cofactor(0, 2), 210.0);
    assert_eq!(a.cofactor(0, 3), 51.0);
    assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn mat4_singular() {
    let a: Matrix4D = [ -4.0,  2.0, -2.0, -3.0,
                         9.0,  6.0,  2.0,  6.0,
                         0.0, -5.0,  1.0, -5.0,
                         0.0,  0.0,  0.0,  0.0, ].into();

    assert_eq!(a.determinant(), 0.0);
    assert!(!a.is_invertible());
    assert!(a.inverse().is_none());
}

#[test]
fn mat4_inverse() {
    let a: Matrix4D = [  8.0, -5.0,  9.0,  2.0,
                         7.0,  5.0,  6.0,  1.0,
                        -6.0,  0.0,  9.0,  6.0,
                        -3.0,  0.0, -9.0, -4.0, ].into();

    let i: Matrix4D = [ -0.15385, -0.15385, -0.28205, -0.53846,
                        -0.07692,  0.12308,  0.02564,  0.03077,
                         0.35897,  0.35897,  0.43590,  0.92308,
                        -0.69231, -0.69231, -0.76923, -1.92308, ].into();

    assert!(a.is_invertible());
    assert_eq!(a.inverse().unwrap(), i);
    assert_eq!(a.inverse().unwrap().inverse().unwrap(), a);
    assert_eq!(a * a.inverse().unwrap(), Matrix4D::identity());
}

#[test]
fn mat4_inverse_mult() {
    let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                         3.0,  8.0,  2.0, -9.0,
                        -4.0,  4.0,  4.0,  1.0,
                        -6.0,  5.0, -1.0,  1.0, ].into();

    let b: Matrix4D = [ 8.0,  2.0, 2.0, 2.0,
                        3.0, -1.0, 7.0, 0.0,
                        7.0,  0.0, 5.0, 4.0,
                        6.0, -2.0, 0.0, 5.0  ].into();

    let c = a * b;

    assert_eq!(a, c * b.inverse().unwrap());
}

#[test]
fn mat4_translation() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let point = Tuple4D::point(-3.0, 4.0, 5.0);
    let vector = Tuple4D::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(2.0, 1.0, 7.0));
    assert_eq!(transform.inverse().unwrap() * point,
        Tuple4D::point(-8.0, 7.0, 3.0));
    assert_eq!(transform * vector, vector);
}

#[test]
fn mat4_scaling() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0);
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple4D::vector(-8.0, 18.0, 32.0));
    assert_eq!(transform.inverse().unwrap() * vector,
        Tuple4D::vector(-2.0, 2.0, 2.0));
    assert_eq!(Matrix4D::scaling(-1.0, 1.0, 1.0) * Tuple4D::point(2.0, 3.0, 4.0),
        Tuple4D::point(-2.0, 3.0, 4.0));
}

#[test]
fn mat4_rotations() {
    let half = std::f64::consts::PI / 4.0;
    let full = std::f64::consts::PI / 2.0;
    let r2 = 2.0f64.sqrt() / 2.0;

    let px = Tuple4D::point(0.0, 1.0, 0.0);
    assert_eq!(Matrix4D::rotation_x(full) * px, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(Matrix4D::rotation_x(half) * px, Tuple4D::point(0.0, r2, r2));
    assert_eq!(Matrix4D::rotation_x(half).inverse().unwrap() * px,
        Tuple4D::point(0.0, r2, -r2));

    let py = Tuple4D::point(0.0, 0.0, 1.0);
    assert_eq!(Matrix4D::rotation_y(full) * py, Tuple4D::point(1.0, 0.0, 0.0));
    assert_eq!(Matrix4D::rotation_y(half) * py, Tuple4D::point(r2, 0.0, r2));

    let pz = Tuple4D::point(0.0, 1.0, 0.0);
    assert_eq!(Matrix4D::rotation_z(full) * pz, Tuple4D::point(-1.0, 0.0, 0.0));
    assert_eq!(Matrix4D::rotation_z(half) * pz, Tuple4D::point(-r2, r2, 0.0));
}

#[test]
fn mat4_shearing() {
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(Matrix4D::shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0) * point,
        Tuple4D::point(6.0, 3.0, 4.0));
    assert_eq!(Matrix4D::shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0) * point,
        Tuple4D::point(2.0, 5.0, 4.0));
    assert_eq!(Matrix4D::shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0) * point,
        Tuple4D::point(2.0, 7.0, 4.0));
    assert_eq!(Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 1.0, 0.0) * point,
        Tuple4D::point(2.0, 3.0, 6.0));
    assert_eq!(Matrix4D::shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0) * point,
        Tuple4D::point(2.0, 3.0, 7.0));
}

#[test]
fn chained_transforms() {
    let a = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix4D::scaling(5.0, 5.0, 5.0);
    let c = Matrix4D::translation(10.0, 5.0, 7.0);

    let t = c * b * a;
    let p = Tuple4D::point(1.0, 0.0, 1.0);

    assert_eq!(t * p, Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn default_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, -1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::identity(), Matrix4D::view_transform(from, to, up));
}

#[test]
fn positive_z_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, 1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up),
        Matrix4D::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn arbitrary_view() {
    let from = Tuple4D::point(1.0, 3.0, 2.0);
    let to = Tuple4D::point(4.0, -2.0, 8.0);
    let up = Tuple4D::vector(1.0, 1.0, 0.0);

    let a: Matrix4D = [  -0.50709, 0.50709,  0.67612, -2.36643,
                          0.76772, 0.60609,  0.12122, -2.82843,
                         -0.35857, 0.59761, -0.71714,  0.00000,
                          0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix4D::view_transform(from, to, up), a);
}
