use crate::consts::{ SHADOW_EPSILON, VACUUM_RI };
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::shape::Shape;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin), and `what`
/// is the shape which was hit.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Shape,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if the underlying *pointers* of the
/// intersections are equivalent. Two identical shapes at different addresses
/// are different objects in a scene.
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, what: &'a Shape) -> Intersection<'a> {
        Intersection { t, what }
    }
}

/// A collection of intersections.
///
/// Mostly a wrapper for a vector of `Intersection` objects. See the
/// `Intersection` documentation for more information.
///
/// # Examples
///
/// ```
/// # use whitted_tracer::intersect::{ Intersection, Intersections };
/// # use whitted_tracer::shape::Shape;
/// let s = Shape::sphere();
/// let mut xs = Intersections::from(vec![
///     Intersection::new(5.0, &s),
///     Intersection::new(-3.0, &s),
///     Intersection::new(2.0, &s),
/// ]);
///
/// assert_eq!(xs.hit().map(|i| i.t), Some(2.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Intersections<'a> {
        Intersections { intersections }
    }
}

impl<'a> Intersections<'a> {
    /// Creates a new list of intersections.
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    /// Moves every intersection of `other` into this collection.
    ///
    /// The result is not sorted; call `sort` once everything is aggregated.
    pub fn append(&mut self, mut other: Intersections<'a>) {
        self.intersections.append(&mut other.intersections);
    }

    /// Finds the hit, the intersection with the smallest non-negative `t`.
    ///
    /// If no hit is registered, this function returns `None`.
    ///
    /// As a note, this function sorts the `intersections` field on every call,
    /// and drops intersections at an infinite `t`.
    pub fn hit(&mut self) -> Option<Intersection<'a>> {
        self.intersections.retain(|i| i.t.is_finite());
        self.sort();

        self.intersections.iter().find(|i| i.t >= 0.0).copied()
    }

    /// Sorts the intersections by ascending `t`, ignoring `f64` semantics.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }
}

/// A record for computations associated with an `Intersection`.
///
/// Mostly a superset of an `Intersection`: everything `World::shade_hit`
/// needs about a hit, computed once.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The object being intersected.
    pub obj: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Tuple4D,

    /// A point slightly above the intersected surface. Used to prevent an
    /// object from shadowing itself (this causes "acne").
    pub over_point: Tuple4D,

    /// A point slightly below the intersected surface. Refracted rays start
    /// here.
    pub under_point: Tuple4D,

    /// The eye vector for the intersection.
    pub eyev: Tuple4D,

    /// The normal vector of the object being intersected, facing the eye.
    pub normalv: Tuple4D,

    /// The intersection ray, reflected across the normal.
    pub reflectv: Tuple4D,

    /// Whether the intersection occurs within the object or not.
    pub inside: bool,

    /// The refractive index of the material being exited.
    pub n1: f64,

    /// The refractive index of the material being entered.
    pub n2: f64,
}

impl<'a> IntersectionComputation<'a> {
    /// Creates a new intersection computation, given a ray and intersection.
    ///
    /// The `is` parameter is the sorted collection of every intersection along
    /// the ray. If provided, refraction indices are calculated from it;
    /// otherwise both indices are those of a vacuum.
    pub fn new(r: &Ray4D, hit: &Intersection<'a>,
        is: Option<&Intersections<'a>>) -> IntersectionComputation<'a> {
        let t = hit.t;
        let obj = hit.what;
        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = obj.normal_at(point);

        let inside = normalv.dot(&eyev) < 0.0;
        if inside {
            normalv = -normalv;
        }

        let over_point = point + normalv * SHADOW_EPSILON;
        let under_point = point - normalv * SHADOW_EPSILON;

        let reflectv = r.direction.reflect(&normalv);
        let (n1, n2) = match is {
            Some(xs) => Self::refraction_indices(hit, xs),
            None => (VACUUM_RI, VACUUM_RI),
        };

        IntersectionComputation {
            t, obj,
            point, over_point, under_point,
            eyev, normalv, reflectv,
            inside,
            n1, n2,
        }
    }

    /// Walks the intersections up to `hit`, tracking which shapes the ray is
    /// currently inside of.
    ///
    /// `n1` is the index of the innermost shape containing the ray before the
    /// hit, `n2` after it. Outside of every shape the index is that of a
    /// vacuum.
    fn refraction_indices(hit: &Intersection<'a>, is: &Intersections<'a>)
        -> (f64, f64) {
        let innermost = |containers: &[&Shape]| containers.last()
            .map_or(VACUUM_RI, |s| s.material.refractive_index);

        let mut n1 = VACUUM_RI;
        let mut containers: Vec<&'a Shape> = Vec::new();

        for i in is.intersections.iter() {
            if i == hit {
                n1 = innermost(&containers[..]);
            }

            // Entering a shape pushes it, leaving it removes it
            match containers.iter().position(|&x| std::ptr::eq(x, i.what)) {
                Some(j) => { containers.remove(j); },
                None => containers.push(i.what),
            }

            if i == hit {
                return (n1, innermost(&containers[..]));
            }
        }

        (n1, VACUUM_RI)
    }

    /// Calculates the reflectance of a hit, with Schlick's approximation of
    /// the Fresnel equations.
    ///
    /// The reflectance is a number between 0 and 1, representing what fraction
    /// of the light is reflected for the hit. The rest is refracted.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(&self.normalv);

        // Total internal reflection can only occur if n1 > n2
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1.0 - cos.powi(2));
            if sin2_t > 1.0 {
                return 1.0;
            }

            // Use the cosine of the transmitted angle instead
            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

#[cfg(test)]
use crate::matrix::Matrix4D;
#[cfg(test)]
use crate::light::Material;

#[cfg(test)]
fn glass_sphere() -> Shape {
    Shape::sphere().with_material(Material::glass())
}

#[test]
fn hit_with_all_positive() {
    let s = Shape::sphere();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let mut xs = Intersections::from(vec![i2, i1]);

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_with_some_negative() {
    let s = Shape::sphere();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);
    let mut xs = Intersections::from(vec![i2, i1]);

    assert_eq!(xs.hit(), Some(i2));
}

#[test]
fn hit_with_all_negative() {
    let s = Shape::sphere();
    let mut xs = Intersections::from(vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ]);

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_is_lowest_nonnegative() {
    let s = Shape::sphere();
    let i4 = Intersection::new(2.0, &s);
    let mut xs = Intersections::from(vec![
        Intersection::new(5.0, &s),
        Intersection::new(7.0, &s),
        Intersection::new(-3.0, &s),
        i4,
    ]);

    assert_eq!(xs.hit(), Some(i4));
    assert_eq!(xs.intersections.iter().map(|i| i.t).collect::<Vec<_>>(),
        vec![-3.0, 2.0, 5.0, 7.0]);
}

#[test]
fn intersections_compare_shapes_by_address() {
    let a = Shape::sphere();
    let b = Shape::sphere();

    assert_ne!(Intersection::new(1.0, &a), Intersection::new(1.0, &b));
    assert_eq!(Intersection::new(1.0, &a), Intersection::new(1.0, &a));
}

#[test]
fn precompute_outside_intersection() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let i = Intersection::new(4.0, &s);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(comps.t, 4.0);
    assert!(std::ptr::eq(comps.obj, &s));
    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_intersection() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let i = Intersection::new(1.0, &s);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);

    // The normal is inverted, to face the eye
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn hit_should_offset_point() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0)).unwrap();
    let i = Intersection::new(5.0, &s);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert!(comps.over_point.z < -SHADOW_EPSILON / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}

#[test]
fn under_point_is_below_surface() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0)).unwrap();
    let i = Intersection::new(5.0, &s);
    let xs = Intersections::from(vec![i]);
    let comps = IntersectionComputation::new(&r, &i, Some(&xs));

    assert!(comps.under_point.z > SHADOW_EPSILON / 2.0);
    assert!(comps.point.z < comps.under_point.z);
}

#[test]
fn precompute_reflection_vector() {
    let p = Shape::plane();
    let r2 = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -1.0),
        Tuple4D::vector(0.0, -r2, r2)
    );
    let i = Intersection::new(2.0f64.sqrt(), &p);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(comps.reflectv, Tuple4D::vector(0.0, r2, r2));
}

#[test]
fn finding_n1_and_n2_at_various_intersections() {
    let a = glass_sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0)).unwrap();

    let mut b = glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, -0.25)).unwrap();
    b.material.refractive_index = 2.0;

    let mut c = glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 0.25)).unwrap();
    c.material.refractive_index = 2.5;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -4.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = Intersections::from(vec![
        Intersection::new(2.0, &a),
        Intersection::new(2.75, &b),
        Intersection::new(3.25, &c),
        Intersection::new(4.75, &b),
        Intersection::new(5.25, &c),
        Intersection::new(6.0, &a),
    ]);

    let expected = [
        (1.0, 1.5), (1.5, 2.0), (2.0, 2.5), (2.5, 2.5), (2.5, 1.5), (1.5, 1.0),
    ];

    for (i, &(n1, n2)) in xs.intersections.iter().zip(expected.iter()) {
        let comps = IntersectionComputation::new(&r, i, Some(&xs));
        assert_eq!((comps.n1, comps.n2), (n1, n2));
    }
}

#[test]
fn schlick_under_total_internal_reflection() {
    let s = glass_sphere();
    let r2 = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, r2),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = Intersections::from(vec![
        Intersection::new(-r2, &s),
        Intersection::new(r2, &s),
    ]);
    let comps = IntersectionComputation::new(&r, &xs.intersections[1],
        Some(&xs));

    assert_eq!(comps.schlick(), 1.0);
}

#[test]
fn schlick_with_perpendicular_viewing_angle() {
    let s = glass_sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = Intersections::from(vec![
        Intersection::new(-1.0, &s),
        Intersection::new(1.0, &s),
    ]);
    let comps = IntersectionComputation::new(&r, &xs.intersections[1],
        Some(&xs));

    assert!(crate::feq(comps.schlick(), 0.04));
}

#[test]
fn schlick_with_small_angle_and_n2_greater_than_n1() {
    let s = glass_sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.99, -2.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = Intersections::from(vec![Intersection::new(1.8589, &s)]);
    let comps = IntersectionComputation::new(&r, &xs.intersections[0],
        Some(&xs));

    assert!(crate::feq(comps.schlick(), 0.48873));
}
