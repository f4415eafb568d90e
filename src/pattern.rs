use crate::feq;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::shape::Shape;
use crate::error::{ Error, Result };

/// The coloring rule of a pattern.
///
/// Stripes, rings and checkers select one of their sub-patterns by an integer
/// "distance" (`|floor(d)| mod n`), so any number of sub-patterns can be
/// alternated, and each sub-pattern can itself be any pattern. Recursion ends
/// at `Solid` and gradient leaves.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternType {
    /// A constant color.
    Solid(Color),

    /// Alternates sub-patterns along the X axis.
    Stripe(Vec<Pattern>),

    /// Alternates sub-patterns by distance from the Y axis.
    Ring(Vec<Pattern>),

    /// Alternates sub-patterns in a 3D grid of unit cubes.
    Checker(Vec<Pattern>),

    /// Linear interpolation between two colors along X, repeating every unit.
    Gradient(Color, Color),

    /// Linear interpolation between two colors by distance from the Y axis.
    RadialGradient(Color, Color),

    /// The average of two patterns.
    Blend(Box<Pattern>, Box<Pattern>),
}

/// A procedural texture, with its own transformation.
///
/// A pattern is evaluated in *pattern space*; a world point is first converted
/// to the object space of the shape being colored, then through the inverse of
/// the pattern's transform.
///
/// # Examples
///
/// ```
/// # use whitted_tracer::color::Color;
/// # use whitted_tracer::pattern::Pattern;
/// # use whitted_tracer::tuple::Tuple4D;
/// let p = Pattern::stripe(Color::white(), Color::black());
/// assert_eq!(p.color_at_object(Tuple4D::point(0.5, 0.0, 0.0)), Color::white());
/// assert_eq!(p.color_at_object(Tuple4D::point(1.5, 0.0, 0.0)), Color::black());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub ty: PatternType,
    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Default for Pattern {
    fn default() -> Pattern {
        Pattern::solid(Color::white())
    }
}

impl Pattern {
    /// Creates a pattern of a given type with an identity transform.
    pub fn new(ty: PatternType) -> Pattern {
        Pattern {
            ty,
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    pub fn solid(c: Color) -> Pattern {
        Pattern::new(PatternType::Solid(c))
    }

    /// Two-color stripes; see `Pattern::stripes` for arbitrary sub-patterns.
    pub fn stripe(a: Color, b: Color) -> Pattern {
        Pattern::stripes(vec![Pattern::solid(a), Pattern::solid(b)])
    }

    pub fn stripes(patterns: Vec<Pattern>) -> Pattern {
        Pattern::new(PatternType::Stripe(patterns))
    }

    pub fn ring(a: Color, b: Color) -> Pattern {
        Pattern::rings(vec![Pattern::solid(a), Pattern::solid(b)])
    }

    pub fn rings(patterns: Vec<Pattern>) -> Pattern {
        Pattern::new(PatternType::Ring(patterns))
    }

    pub fn checker(a: Color, b: Color) -> Pattern {
        Pattern::checkers(vec![Pattern::solid(a), Pattern::solid(b)])
    }

    pub fn checkers(patterns: Vec<Pattern>) -> Pattern {
        Pattern::new(PatternType::Checker(patterns))
    }

    pub fn gradient(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternType::Gradient(a, b))
    }

    pub fn radial_gradient(a: Color, b: Color) -> Pattern {
        Pattern::new(PatternType::RadialGradient(a, b))
    }

    pub fn blend(a: Pattern, b: Pattern) -> Pattern {
        Pattern::new(PatternType::Blend(Box::new(a), Box::new(b)))
    }

    /// Returns a reference to the pattern transform.
    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Sets the pattern transform, caching its inverse.
    ///
    /// Fails with `Error::SingularTransform` if `transform` is not invertible;
    /// the pattern is left unchanged in that case.
    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        self.inverse = transform.inverse().ok_or(Error::SingularTransform)?;
        self.transform = transform;
        Ok(())
    }

    /// Builder-style `set_transform`.
    pub fn with_transform(mut self, transform: Matrix4D) -> Result<Pattern> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Colors a point in world space, on the surface of shape `obj`.
    pub fn color_at(&self, obj: &Shape, world_point: Tuple4D) -> Color {
        self.color_at_object(obj.world_to_object(world_point))
    }

    /// Colors a point which is already in the object space of a shape.
    ///
    /// Sub-patterns receive the same object-space point, so each of them is
    /// positioned by its own transform rather than its parent's.
    pub fn color_at_object(&self, object_point: Tuple4D) -> Color {
        let p = self.inverse * object_point;

        match self.ty {
            PatternType::Solid(c) => c,

            PatternType::Stripe(ref patterns)
                => Self::select(patterns, p.x, object_point),

            PatternType::Ring(ref patterns)
                => Self::select(patterns, radius(&p), object_point),

            PatternType::Checker(ref patterns) => {
                let d = p.x.floor() + p.y.floor() + p.z.floor();
                Self::select(patterns, d, object_point)
            },

            PatternType::Gradient(a, b)
                => a + (b - a) * fraction(p.x),

            PatternType::RadialGradient(a, b)
                => a + (b - a) * fraction(radius(&p)),

            PatternType::Blend(ref left, ref right) => Color::average(
                &left.color_at_object(object_point),
                &right.color_at_object(object_point),
            ),
        }
    }

    /// Picks sub-pattern `|floor(distance)| mod n` and evaluates it.
    fn select(patterns: &[Pattern], distance: f64, object_point: Tuple4D)
        -> Color {
        if patterns.is_empty() {
            return Color::black();
        }

        let index = (distance.floor().abs() as usize) % patterns.len();
        patterns[index].color_at_object(object_point)
    }
}

/// Distance of a point from the Y axis.
fn radius(p: &Tuple4D) -> f64 {
    (p.x.powi(2) + p.z.powi(2)).sqrt()
}

/// The fractional part of `d`, except that a value of (almost) exactly one
/// yields `1.0` rather than wrapping back to `0.0`.
fn fraction(d: f64) -> f64 {
    if feq(d, 1.0) {
        1.0
    } else {
        d - d.floor()
    }
}

#[test]
fn stripe_pattern_is_constant_along_y_and_z() {
    let pattern = Pattern::stripe(Color::white(), Color::black());

    for i in 0..3 {
        let f = i as f64;
        assert_eq!(pattern.color_at_object(Tuple4D::point(0.0, f, 0.0)),
            Color::white());
        assert_eq!(pattern.color_at_object(Tuple4D::point(0.0, 0.0, f)),
            Color::white());
    }
}

#[test]
fn stripe_pattern_alternates_along_x() {
    let pattern = Pattern::stripe(Color::white(), Color::black());
    let at = |x| pattern.color_at_object(Tuple4D::point(x, 0.0, 0.0));

    assert_eq!(at( 0.0), Color::white());
    assert_eq!(at( 0.9), Color::white());
    assert_eq!(at( 1.0), Color::black());
    assert_eq!(at(-0.1), Color::black());
    assert_eq!(at(-1.0), Color::black());
    assert_eq!(at(-1.1), Color::white());
}

#[test]
fn stripes_cycle_through_many_sub_patterns() {
    let pattern = Pattern::stripes(vec![
        Pattern::solid(Color::red()),
        Pattern::solid(Color::green()),
        Pattern::solid(Color::blue()),
    ]);
    let at = |x| pattern.color_at_object(Tuple4D::point(x, 0.0, 0.0));

    assert_eq!(at(0.5), Color::red());
    assert_eq!(at(1.5), Color::green());
    assert_eq!(at(2.5), Color::blue());
    assert_eq!(at(3.5), Color::red());
}

#[test]
fn stripes_with_object_transformation() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();
    let pattern = Pattern::stripe(Color::white(), Color::black());

    assert_eq!(pattern.color_at(&s, Tuple4D::point(1.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn stripes_with_pattern_transformation() {
    let s = Shape::sphere();
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();

    assert_eq!(pattern.color_at(&s, Tuple4D::point(1.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn stripes_with_object_and_pattern_transformation() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();
    let pattern = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix4D::translation(0.5, 0.0, 0.0)).unwrap();

    assert_eq!(pattern.color_at(&s, Tuple4D::point(2.5, 0.0, 0.0)),
        Color::white());
}

#[test]
fn gradient_interpolates_between_colors() {
    let pattern = Pattern::gradient(Color::white(), Color::black());
    let at = |x| pattern.color_at_object(Tuple4D::point(x, 0.0, 0.0));

    assert_eq!(at(0.0), Color::white());
    assert_eq!(at(0.25), Color::rgb(0.75, 0.75, 0.75));
    assert_eq!(at(0.5), Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(at(0.75), Color::rgb(0.25, 0.25, 0.25));
    assert_eq!(at(1.0), Color::black());
}

#[test]
fn radial_gradient_uses_distance_from_y_axis() {
    let pattern = Pattern::radial_gradient(Color::white(), Color::black());

    assert_eq!(pattern.color_at_object(Tuple4D::point(0.0, 0.0, 0.5)),
        Color::rgb(0.5, 0.5, 0.5));
    assert_eq!(pattern.color_at_object(Tuple4D::point(0.6, 5.0, 0.8)),
        Color::black());
}

#[test]
fn ring_extends_in_x_and_z() {
    let pattern = Pattern::ring(Color::white(), Color::black());
    let at = |x, z| pattern.color_at_object(Tuple4D::point(x, 0.0, z));

    assert_eq!(at(0.0, 0.0), Color::white());
    assert_eq!(at(1.0, 0.0), Color::black());
    assert_eq!(at(0.0, 1.0), Color::black());
    assert_eq!(at(0.708, 0.708), Color::black());
}

#[test]
fn checkers_repeat_in_every_dimension() {
    let pattern = Pattern::checker(Color::white(), Color::black());
    let at = |x, y, z| pattern.color_at_object(Tuple4D::point(x, y, z));

    assert_eq!(at(0.0, 0.0, 0.0), Color::white());
    assert_eq!(at(0.99, 0.0, 0.0), Color::white());
    assert_eq!(at(1.01, 0.0, 0.0), Color::black());
    assert_eq!(at(0.0, 0.99, 0.0), Color::white());
    assert_eq!(at(0.0, 1.01, 0.0), Color::black());
    assert_eq!(at(0.0, 0.0, 0.99), Color::white());
    assert_eq!(at(0.0, 0.0, 1.01), Color::black());
}

#[test]
fn nested_patterns() {
    let inner = Pattern::checker(Color::red(), Color::blue())
        .with_transform(Matrix4D::scaling(0.5, 0.5, 0.5)).unwrap();
    let pattern = Pattern::stripes(vec![inner, Pattern::solid(Color::green())]);
    let at = |x, z| pattern.color_at_object(Tuple4D::point(x, 0.0, z));

    assert_eq!(at(0.25, 0.25), Color::red());
    assert_eq!(at(0.25, 0.75), Color::blue());
    assert_eq!(at(1.25, 0.25), Color::green());
}

#[test]
fn blend_averages_two_patterns() {
    let pattern = Pattern::blend(
        Pattern::solid(Color::red()),
        Pattern::stripe(Color::blue(), Color::green()),
    );

    assert_eq!(pattern.color_at_object(Tuple4D::point(0.5, 0.0, 0.0)),
        Color::rgb(0.5, 0.0, 0.5));
    assert_eq!(pattern.color_at_object(Tuple4D::point(1.5, 0.0, 0.0)),
        Color::rgb(0.5, 0.5, 0.0));
}

#[test]
fn singular_pattern_transform_is_rejected() {
    let mut pattern = Pattern::default();

    assert!(pattern.set_transform(Matrix4D::scaling(0.0, 1.0, 1.0)).is_err());
    assert_eq!(*pattern.transform(), Matrix4D::identity());
}
