use crate::consts::{ DEGENERATE_EPSILON, FEQ_EPSILON };
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::light::Material;
use crate::matrix::Matrix4D;
use crate::intersect::{ Intersection, Intersections };
use crate::error::{ Error, Result };

/// The geometric primitive behind a `Shape`.
///
/// Every primitive is defined in its own *object space*; the owning `Shape`
/// carries the transformation into world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeType {
    /// A unit sphere with its center at the object-space origin.
    Sphere,

    /// The XZ plane, with a normal pointing up along the Y axis.
    Plane,

    /// An axis-aligned cube spanning `[-1, 1]` on each axis.
    Cube,

    /// A cylinder of radius 1 around the Y axis, truncated at `minimum` and
    /// `maximum` (exclusive). Closed cylinders have end caps.
    Cylinder { minimum: f64, maximum: f64, closed: bool },

    /// A double-napped cone around the Y axis, with its apex at the origin.
    /// Bounds and caps behave as they do for cylinders.
    Cone { minimum: f64, maximum: f64, closed: bool },
}

/// A renderable shape: a primitive, a transformation and a material.
///
/// The inverse of the transformation is computed once, when the transform is
/// set, and is used for every intersection and normal calculation. A shape
/// can therefore never hold a singular transform.
///
/// # Examples
///
/// ```
/// # use whitted_tracer::shape::Shape;
/// # use whitted_tracer::matrix::Matrix4D;
/// # use whitted_tracer::ray::Ray4D;
/// # use whitted_tracer::tuple::Tuple4D;
/// let s = Shape::sphere()
///     .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
///     .unwrap();
/// let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -5.0),
///     Tuple4D::vector(0.0, 0.0, 1.0));
///
/// let xs = s.intersect(&r);
/// assert_eq!(xs.intersections[0].t, 3.0);
/// assert_eq!(xs.intersections[1].t, 7.0);
/// ```
#[derive(Clone, Debug)]
pub struct Shape {
    pub ty: ShapeType,
    pub material: Material,

    /// Whether this shape blocks light in shadow tests.
    pub casts_shadow: bool,

    /// Must always be set together with `inverse`.
    pub(crate) transform: Matrix4D,
    pub(crate) inverse: Matrix4D,
}

impl Shape {
    /// Creates a shape with an identity transform and default material.
    pub fn new(ty: ShapeType) -> Shape {
        Shape {
            ty,
            material: Material::default(),
            casts_shadow: true,
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    pub fn sphere() -> Shape {
        Shape::new(ShapeType::Sphere)
    }

    pub fn plane() -> Shape {
        Shape::new(ShapeType::Plane)
    }

    pub fn cube() -> Shape {
        Shape::new(ShapeType::Cube)
    }

    /// Creates an infinitely long cylinder with no end caps.
    pub fn cylinder() -> Shape {
        Shape::new(ShapeType::Cylinder {
            minimum: -std::f64::INFINITY,
            maximum: std::f64::INFINITY,
            closed: false,
        })
    }

    /// Creates a bounded cylinder, optionally with end caps.
    pub fn bounded_cylinder(minimum: f64, maximum: f64, closed: bool) -> Shape {
        Shape::new(ShapeType::Cylinder { minimum, maximum, closed })
    }

    /// Creates an infinite double-napped cone with no end caps.
    pub fn cone() -> Shape {
        Shape::new(ShapeType::Cone {
            minimum: -std::f64::INFINITY,
            maximum: std::f64::INFINITY,
            closed: false,
        })
    }

    pub fn bounded_cone(minimum: f64, maximum: f64, closed: bool) -> Shape {
        Shape::new(ShapeType::Cone { minimum, maximum, closed })
    }

    /// Returns a reference to the Shape transform.
    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Returns the cached inverse of the Shape transform.
    pub fn inverse(&self) -> &Matrix4D {
        &self.inverse
    }

    /// Sets the transform property on a Shape, caching its inverse.
    ///
    /// A singular transform is rejected with `Error::SingularTransform`, and
    /// the shape keeps its previous transform.
    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        self.inverse = transform.inverse().ok_or(Error::SingularTransform)?;
        self.transform = transform;
        Ok(())
    }

    /// Builder-style `set_transform`.
    pub fn with_transform(mut self, transform: Matrix4D) -> Result<Shape> {
        self.set_transform(transform)?;
        Ok(self)
    }

    pub fn with_material(self, material: Material) -> Shape {
        Shape { material, ..self }
    }

    pub fn with_shadow(self, casts_shadow: bool) -> Shape {
        Shape { casts_shadow, ..self }
    }

    /// Changes the Y bounds of a cylinder or cone. Other shapes are unbounded
    /// and ignore this.
    pub fn set_bounds(&mut self, min: f64, max: f64) {
        match self.ty {
            ShapeType::Cylinder { ref mut minimum, ref mut maximum, .. }
            | ShapeType::Cone { ref mut minimum, ref mut maximum, .. } => {
                *minimum = min;
                *maximum = max;
            },
            _ => (),
        }
    }

    /// Opens or closes the end caps of a cylinder or cone.
    pub fn set_closed(&mut self, caps: bool) {
        match self.ty {
            ShapeType::Cylinder { ref mut closed, .. }
            | ShapeType::Cone { ref mut closed, .. } => *closed = caps,
            _ => (),
        }
    }

    /// Converts a point from world to object space.
    pub fn world_to_object(&self, point: Tuple4D) -> Tuple4D {
        self.inverse * point
    }

    /// Converts a normal from object to world space.
    ///
    /// Normals are transformed by the transpose of the inverse transform, so
    /// that they stay perpendicular to the surface under non-uniform scaling.
    /// The translation part of that matrix leaks into `w`, which is reset.
    pub fn normal_to_world(&self, normal: Tuple4D) -> Tuple4D {
        let mut n = self.inverse.transposition() * normal;
        n.w = 0.0;
        n.normalize()
    }

    /// Intersects a world-space ray with this shape.
    ///
    /// The ray is converted to object space and handed to `local_intersect`.
    /// Resulting intersections are not sorted.
    pub fn intersect(&self, ray: &Ray4D) -> Intersections {
        self.local_intersect(&ray.transform(&self.inverse))
    }

    /// The world-space surface normal at a world-space point.
    pub fn normal_at(&self, world_point: Tuple4D) -> Tuple4D {
        let local_point = self.world_to_object(world_point);
        self.normal_to_world(self.local_normal_at(&local_point))
    }

    /// Intersects an object-space ray with the primitive.
    pub fn local_intersect(&self, ray: &Ray4D) -> Intersections {
        match self.ty {
            ShapeType::Sphere => self.intersect_sphere(ray),
            ShapeType::Plane => self.intersect_plane(ray),
            ShapeType::Cube => self.intersect_cube(ray),
            ShapeType::Cylinder { minimum, maximum, closed }
                => self.intersect_cylinder(ray, minimum, maximum, closed),
            ShapeType::Cone { minimum, maximum, closed }
                => self.intersect_cone(ray, minimum, maximum, closed),
        }
    }

    /// The object-space normal at an object-space point. Not normalized.
    pub fn local_normal_at(&self, at: &Tuple4D) -> Tuple4D {
        match self.ty {
            ShapeType::Sphere => Tuple4D { w: 0.0, ..*at },
            ShapeType::Plane => Tuple4D::vector(0.0, 1.0, 0.0),
            ShapeType::Cube => Self::normal_at_cube(at),
            ShapeType::Cylinder { minimum, maximum, .. }
                => Self::normal_at_cylinder(at, minimum, maximum),
            ShapeType::Cone { minimum, maximum, .. }
                => Self::normal_at_cone(at, minimum, maximum),
        }
    }

    /// Solves the ray/unit sphere quadratic.
    ///
    /// Returns either no intersections or two (equal, for a tangent ray).
    fn intersect_sphere(&self, ray: &Ray4D) -> Intersections {
        // Subtracting the origin point removes the `w` part of the ray origin
        let sphere_to_ray = ray.origin - Tuple4D::origin();

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);
        if discriminant < 0.0 {
            return Intersections::new();
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        Intersections {
            intersections: vec![
                Intersection::new(t1, self),
                Intersection::new(t2, self),
            ]
        }
    }

    fn intersect_plane(&self, ray: &Ray4D) -> Intersections {
        // Parallel (or coplanar) rays never register a hit
        if ray.direction.y.abs() < FEQ_EPSILON {
            return Intersections::new();
        }

        let t = -ray.origin.y / ray.direction.y;
        Intersections { intersections: vec![Intersection::new(t, self)] }
    }

    /// Slab test against the three pairs of cube faces.
    fn intersect_cube(&self, ray: &Ray4D) -> Intersections {
        let (xtmin, xtmax)
            = Self::check_cube_axis(ray.origin.x, ray.direction.x);
        let (ytmin, ytmax)
            = Self::check_cube_axis(ray.origin.y, ray.direction.y);
        let (ztmin, ztmax)
            = Self::check_cube_axis(ray.origin.z, ray.direction.z);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        if tmin > tmax {
            return Intersections::new();
        }

        Intersections {
            intersections: vec![
                Intersection::new(tmin, self),
                Intersection::new(tmax, self),
            ]
        }
    }

    /// Picks the face by the component with the largest magnitude.
    fn normal_at_cube(p: &Tuple4D) -> Tuple4D {
        let xa = p.x.abs();
        let ya = p.y.abs();
        let za = p.z.abs();

        let max_component = xa.max(ya).max(za);
        if max_component == xa {
            Tuple4D::vector(p.x, 0.0, 0.0)
        } else if max_component == ya {
            Tuple4D::vector(0.0, p.y, 0.0)
        } else {
            Tuple4D::vector(0.0, 0.0, p.z)
        }
    }

    fn intersect_cylinder(&self, ray: &Ray4D, minimum: f64, maximum: f64,
        closed: bool) -> Intersections {
        let mut is = Intersections::new();
        let a = ray.direction.x.powi(2) + ray.direction.z.powi(2);

        // Parallel to the Y axis; only the caps can be hit
        if a.abs() < DEGENERATE_EPSILON {
            if closed {
                self.intersect_caps(ray, minimum, maximum, &mut is,
                    |_| 1.0);
            }
            return is;
        }

        let b = 2.0 * ray.origin.x * ray.direction.x
              + 2.0 * ray.origin.z * ray.direction.z;
        let c = ray.origin.x.powi(2) + ray.origin.z.powi(2) - 1.0;

        let disc = b.powi(2) - 4.0 * a * c;
        if disc < 0.0 {
            return is;
        }

        let t0 = (-b - disc.sqrt()) / (2.0 * a);
        let t1 = (-b + disc.sqrt()) / (2.0 * a);
        self.push_bounded(ray, minimum, maximum, &mut is, &[t0, t1]);

        if closed {
            self.intersect_caps(ray, minimum, maximum, &mut is, |_| 1.0);
        }

        is
    }

    fn normal_at_cylinder(at: &Tuple4D, minimum: f64, maximum: f64)
        -> Tuple4D {
        // Square of the distance from the Y axis
        let dist = at.x.powi(2) + at.z.powi(2);

        if dist < 1.0 && at.y >= maximum - FEQ_EPSILON {
            Tuple4D::vector(0.0, 1.0, 0.0)
        } else if dist < 1.0 && at.y <= minimum + FEQ_EPSILON {
            Tuple4D::vector(0.0, -1.0, 0.0)
        } else {
            Tuple4D::vector(at.x, 0.0, at.z)
        }
    }

    fn intersect_cone(&self, ray: &Ray4D, minimum: f64, maximum: f64,
        closed: bool) -> Intersections {
        let mut is = Intersections::new();
        let (o, d) = (ray.origin, ray.direction);

        let a = d.x.powi(2) - d.y.powi(2) + d.z.powi(2);
        let b = 2.0 * (o.x * d.x - o.y * d.y + o.z * d.z);
        let c = o.x.powi(2) - o.y.powi(2) + o.z.powi(2);

        if a.abs() < DEGENERATE_EPSILON {
            // Parallel to one nap: the quadratic degenerates to a linear
            // equation, with no solution if `b` vanishes as well
            if b.abs() >= DEGENERATE_EPSILON {
                let t = -c / (2.0 * b);
                self.push_bounded(ray, minimum, maximum, &mut is, &[t]);
            }
        } else {
            let disc = b.powi(2) - 4.0 * a * c;
            if disc < 0.0 {
                return is;
            }

            let t0 = (-b - disc.sqrt()) / (2.0 * a);
            let t1 = (-b + disc.sqrt()) / (2.0 * a);
            self.push_bounded(ray, minimum, maximum, &mut is, &[t0, t1]);
        }

        if closed {
            self.intersect_caps(ray, minimum, maximum, &mut is, f64::abs);
        }

        is
    }

    fn normal_at_cone(at: &Tuple4D, minimum: f64, maximum: f64) -> Tuple4D {
        let dist = at.x.powi(2) + at.z.powi(2);

        // A cap's radius is the height it sits at
        let within_cap = dist < at.y.powi(2);

        if within_cap && at.y >= maximum - FEQ_EPSILON {
            Tuple4D::vector(0.0, 1.0, 0.0)
        } else if within_cap && at.y <= minimum + FEQ_EPSILON {
            Tuple4D::vector(0.0, -1.0, 0.0)
        } else {
            let mut y = dist.sqrt();
            if at.y > 0.0 {
                y = -y;
            }

            Tuple4D::vector(at.x, y, at.z)
        }
    }

    /// Pushes every `t` whose point lies strictly between the Y bounds.
    fn push_bounded<'a>(&'a self, ray: &Ray4D, minimum: f64, maximum: f64,
        is: &mut Intersections<'a>, ts: &[f64]) {
        for &t in ts {
            let y = ray.origin.y + t * ray.direction.y;
            if minimum < y && y < maximum {
                is.intersections.push(Intersection::new(t, self));
            }
        }
    }

    /// Intersects the end caps at `minimum` and `maximum`.
    ///
    /// `radius` gives the cap radius at a given height: always 1 for a
    /// cylinder, and `|y|` for a cone.
    fn intersect_caps<'a, F>(&'a self, ray: &Ray4D, minimum: f64, maximum: f64,
        is: &mut Intersections<'a>, radius: F)
        where F: Fn(f64) -> f64 {
        if ray.direction.y.abs() < FEQ_EPSILON {
            return;
        }

        for &y in &[minimum, maximum] {
            let t = (y - ray.origin.y) / ray.direction.y;
            if Self::check_cap(ray, t, radius(y)) {
                is.intersections.push(Intersection::new(t, self));
            }
        }
    }

    /// Whether the ray, at `t`, is within `radius` of the Y axis.
    ///
    /// Both sides are squared before comparison.
    fn check_cap(ray: &Ray4D, t: f64, radius: f64) -> bool {
        let x = ray.origin.x + t * ray.direction.x;
        let z = ray.origin.z + t * ray.direction.z;

        x.powi(2) + z.powi(2) <= radius.powi(2) + FEQ_EPSILON
    }

    /// Takes the origin and direction of a ray on one axis (e.g. `origin.x`,
    /// `direction.x`) and returns where the ray crosses the two cube faces
    /// perpendicular to that axis.
    ///
    /// The smaller `t` is first in the tuple, the larger `t` is second. A
    /// direction of (almost) zero sends both planes to infinity instead of
    /// dividing by zero.
    fn check_cube_axis(origin: f64, direction: f64) -> (f64, f64) {
        let tmin_numerator = -1.0 - origin;
        let tmax_numerator =  1.0 - origin;

        let (tmin, tmax) = if direction.abs() >= FEQ_EPSILON {
            (tmin_numerator / direction, tmax_numerator / direction)
        } else {
            (tmin_numerator * std::f64::INFINITY,
             tmax_numerator * std::f64::INFINITY)
        };

        if tmin > tmax {
            (tmax, tmin)
        } else {
            (tmin, tmax)
        }
    }
}

#[cfg(test)]
fn ts(xs: &Intersections) -> Vec<f64> {
    xs.intersections.iter().map(|i| i.t).collect()
}

#[cfg(test)]
fn assert_ts(xs: &Intersections, expected: &[f64]) {
    let actual = ts(xs);
    assert_eq!(actual.len(), expected.len(), "got {:?}", actual);
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(crate::feq(*a, *e), "got {:?}, expected {:?}", actual, expected);
    }
}

#[test]
fn ray_intersects_sphere_at_two_points() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert_ts(&Shape::sphere().intersect(&r), &[4.0, 6.0]);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert_ts(&Shape::sphere().intersect(&r), &[5.0, 5.0]);
}

#[test]
fn ray_misses_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 2.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert_ts(&Shape::sphere().intersect(&r), &[]);
}

#[test]
fn ray_is_inside_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert_ts(&Shape::sphere().intersect(&r), &[-1.0, 1.0]);
}

#[test]
fn sphere_is_behind_ray() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert_ts(&Shape::sphere().intersect(&r), &[-6.0, -4.0]);
}

#[test]
fn intersect_records_the_shape() {
    let s = Shape::sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = s.intersect(&r);

    assert!(xs.intersections.iter().all(|i| std::ptr::eq(i.what, &s)));
}

#[test]
fn intersect_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0)).unwrap();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert_ts(&s.intersect(&r), &[]);
}

#[test]
fn singular_shape_transform_is_rejected() {
    let mut s = Shape::sphere();
    let err = s.set_transform(Matrix4D::scaling(1.0, 0.0, 1.0));

    assert!(matches!(err, Err(Error::SingularTransform)));
    assert_eq!(*s.transform(), Matrix4D::identity());
    assert!(Shape::cube().with_transform(Matrix4D::scaling(0.0, 0.0, 0.0))
        .is_err());
}

#[test]
fn normals_on_sphere() {
    let s = Shape::sphere();
    let r3 = 3.0f64.sqrt() / 3.0;

    assert_eq!(s.normal_at(Tuple4D::point(1.0, 0.0, 0.0)),
        Tuple4D::vector(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 1.0, 0.0)),
        Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 0.0, 1.0)),
        Tuple4D::vector(0.0, 0.0, 1.0));
    assert_eq!(s.normal_at(Tuple4D::point(r3, r3, r3)),
        Tuple4D::vector(r3, r3, r3));
}

#[test]
fn sphere_normal_is_radial_and_unit_length() {
    let s = Shape::sphere();
    let points = [
        Tuple4D::vector(0.3, -0.2, 0.9),
        Tuple4D::vector(-1.0, 4.0, 2.0),
        Tuple4D::vector(0.0, -1.0, 0.01),
    ];

    for v in points.iter() {
        let on_surface = Tuple4D::origin() + v.normalize();
        let n = s.normal_at(on_surface);

        assert!(crate::feq(n.magnitude(), 1.0));
        assert_eq!(n, on_surface - Tuple4D::origin());
    }
}

#[test]
fn compute_normal_on_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0)).unwrap();
    let n = s.normal_at(Tuple4D::point(0.0, 1.70711, -0.70711));

    assert_eq!(n, Tuple4D::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn compute_normal_on_transformed_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(1.0, 0.5, 1.0)
            * Matrix4D::rotation_z(std::f64::consts::PI / 5.0))
        .unwrap();
    let r2 = 2.0f64.sqrt() / 2.0;
    let n = s.normal_at(Tuple4D::point(0.0, r2, -r2));

    assert_eq!(n, Tuple4D::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn normal_on_plane_is_constant() {
    let p = Shape::plane();

    for at in [
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::point(10.0, 0.0, -10.0),
        Tuple4D::point(-5.0, 0.0, 150.0),
    ].iter() {
        assert_eq!(p.local_normal_at(at), Tuple4D::vector(0.0, 1.0, 0.0));
    }
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane();
    let parallel = Ray4D::new(
        Tuple4D::point(0.0, 10.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let coplanar = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert_ts(&p.local_intersect(&parallel), &[]);
    assert_ts(&p.local_intersect(&coplanar), &[]);
}

#[test]
fn ray_intersecting_plane_from_above_and_below() {
    let p = Shape::plane();
    let above = Ray4D::new(
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::vector(0.0, -1.0, 0.0)
    );
    let below = Ray4D::new(
        Tuple4D::point(0.0, -1.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );

    assert_ts(&p.local_intersect(&above), &[1.0]);
    assert_ts(&p.local_intersect(&below), &[1.0]);
}

#[test]
fn ray_intersects_cube() {
    let c = Shape::cube();
    let cases = [
        ((5.0, 0.5, 0.0), (-1.0, 0.0, 0.0), 4.0, 6.0),
        ((-5.0, 0.5, 0.0), (1.0, 0.0, 0.0), 4.0, 6.0),
        ((0.5, 5.0, 0.0), (0.0, -1.0, 0.0), 4.0, 6.0),
        ((0.5, -5.0, 0.0), (0.0, 1.0, 0.0), 4.0, 6.0),
        ((0.5, 0.0, 5.0), (0.0, 0.0, -1.0), 4.0, 6.0),
        ((0.5, 0.0, -5.0), (0.0, 0.0, 1.0), 4.0, 6.0),
        ((0.0, 0.5, 0.0), (0.0, 0.0, 1.0), -1.0, 1.0),
    ];

    for &((ox, oy, oz), (dx, dy, dz), t1, t2) in cases.iter() {
        let r = Ray4D::new(Tuple4D::point(ox, oy, oz),
            Tuple4D::vector(dx, dy, dz));
        assert_ts(&c.local_intersect(&r), &[t1, t2]);
    }
}

#[test]
fn ray_misses_cube() {
    let c = Shape::cube();
    let cases = [
        ((-2.0, 0.0, 0.0), (0.2673, 0.5345, 0.8018)),
        ((0.0, -2.0, 0.0), (0.8018, 0.2673, 0.5345)),
        ((0.0, 0.0, -2.0), (0.5345, 0.8018, 0.2673)),
        ((2.0, 0.0, 2.0), (0.0, 0.0, -1.0)),
        ((0.0, 2.0, 2.0), (0.0, -1.0, 0.0)),
        ((2.0, 2.0, 0.0), (-1.0, 0.0, 0.0)),
    ];

    for &((ox, oy, oz), (dx, dy, dz)) in cases.iter() {
        let r = Ray4D::new(Tuple4D::point(ox, oy, oz),
            Tuple4D::vector(dx, dy, dz));
        assert_ts(&c.local_intersect(&r), &[]);
    }
}

#[test]
fn normal_on_cube_surface() {
    let c = Shape::cube();
    let cases = [
        ((1.0, 0.5, -0.8), (1.0, 0.0, 0.0)),
        ((-1.0, -0.2, 0.9), (-1.0, 0.0, 0.0)),
        ((-0.4, 1.0, -0.1), (0.0, 1.0, 0.0)),
        ((0.3, -1.0, -0.7), (0.0, -1.0, 0.0)),
        ((-0.6, 0.3, 1.0), (0.0, 0.0, 1.0)),
        ((0.4, 0.4, -1.0), (0.0, 0.0, -1.0)),
        ((1.0, 1.0, 1.0), (1.0, 0.0, 0.0)),
        ((-1.0, -1.0, -1.0), (-1.0, 0.0, 0.0)),
    ];

    for &((px, py, pz), (nx, ny, nz)) in cases.iter() {
        assert_eq!(c.local_normal_at(&Tuple4D::point(px, py, pz)),
            Tuple4D::vector(nx, ny, nz));
    }
}

#[test]
fn ray_misses_cylinder() {
    let cyl = Shape::cylinder();
    let cases = [
        ((1.0, 0.0, 0.0), (0.0, 1.0, 0.0)),
        ((0.0, 0.0, 0.0), (0.0, 1.0, 0.0)),
        ((0.0, 0.0, -5.0), (1.0, 1.0, 1.0)),
    ];

    for &((ox, oy, oz), (dx, dy, dz)) in cases.iter() {
        let r = Ray4D::new(Tuple4D::point(ox, oy, oz),
            Tuple4D::vector(dx, dy, dz).normalize());
        assert_ts(&cyl.local_intersect(&r), &[]);
    }
}

#[test]
fn ray_strikes_cylinder() {
    let cyl = Shape::cylinder();
    let cases = [
        ((1.0, 0.0, -5.0), (0.0, 0.0, 1.0), 5.0, 5.0),
        ((0.0, 0.0, -5.0), (0.0, 0.0, 1.0), 4.0, 6.0),
        ((0.5, 0.0, -5.0), (0.1, 1.0, 1.0), 6.80798, 7.08872),
    ];

    for &((ox, oy, oz), (dx, dy, dz), t0, t1) in cases.iter() {
        let r = Ray4D::new(Tuple4D::point(ox, oy, oz),
            Tuple4D::vector(dx, dy, dz).normalize());
        assert_ts(&cyl.local_intersect(&r), &[t0, t1]);
    }
}

#[test]
fn nearly_vertical_ray_strikes_both_cylinder_walls() {
    let cyl = Shape::cylinder();
    let r = Ray4D::new(Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.005, 1.0, 0.0).normalize());

    // The walls are 1/0.005 units up and down the ray's slope
    let t = (1.0f64 + 0.005f64.powi(2)).sqrt() / 0.005;
    assert_ts(&cyl.local_intersect(&r), &[-t, t]);
}

#[test]
fn normal_on_cylinder() {
    let cyl = Shape::cylinder();
    let cases = [
        ((1.0, 0.0, 0.0), (1.0, 0.0, 0.0)),
        ((0.0, 5.0, -1.0), (0.0, 0.0, -1.0)),
        ((0.0, -2.0, 1.0), (0.0, 0.0, 1.0)),
        ((-1.0, 1.0, 0.0), (-1.0, 0.0, 0.0)),
    ];

    for &((px, py, pz), (nx, ny, nz)) in cases.iter() {
        assert_eq!(cyl.local_normal_at(&Tuple4D::point(px, py, pz)),
            Tuple4D::vector(nx, ny, nz));
    }
}

#[test]
fn intersecting_a_constrained_cylinder() {
    let cyl = Shape::bounded_cylinder(1.0, 2.0, false);
    let cases = [
        ((0.0, 1.5, 0.0), (0.1, 1.0, 0.0), 0),
        ((0.0, 3.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 0.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 2.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 1.0, -5.0), (0.0, 0.0, 1.0), 0),
        ((0.0, 1.5, -2.0), (0.0, 0.0, 1.0), 2),
    ];

    for &((ox, oy, oz), (dx, dy, dz), count) in cases.iter() {
        let r = Ray4D::new(Tuple4D::point(ox, oy, oz),
            Tuple4D::vector(dx, dy, dz).normalize());
        assert_eq!(cyl.local_intersect(&r).intersections.len(), count);
    }
}

#[test]
fn intersecting_the_caps_of_a_closed_cylinder() {
    let cyl = Shape::bounded_cylinder(1.0, 2.0, true);
    let cases = [
        ((0.0, 3.0, 0.0), (0.0, -1.0, 0.0)),
        ((0.0, 3.0, -2.0), (0.0, -1.0, 2.0)),
        ((0.0, 4.0, -2.0), (0.0, -1.0, 1.0)),
        ((0.0, 0.0, -2.0), (0.0, 1.0, 2.0)),
        ((0.0, -1.0, -2.0), (0.0, 1.0, 1.0)),
    ];

    for &((ox, oy, oz), (dx, dy, dz)) in cases.iter() {
        let r = Ray4D::new(Tuple4D::point(ox, oy, oz),
            Tuple4D::vector(dx, dy, dz).normalize());
        assert_eq!(cyl.local_intersect(&r).intersections.len(), 2);
    }
}

#[test]
fn normal_on_cylinder_caps() {
    let cyl = Shape::bounded_cylinder(1.0, 2.0, true);
    let cases = [
        ((0.0, 1.0, 0.0), (0.0, -1.0, 0.0)),
        ((0.5, 1.0, 0.0), (0.0, -1.0, 0.0)),
        ((0.0, 1.0, 0.5), (0.0, -1.0, 0.0)),
        ((0.0, 2.0, 0.0), (0.0, 1.0, 0.0)),
        ((0.5, 2.0, 0.0), (0.0, 1.0, 0.0)),
        ((0.0, 2.0, 0.5), (0.0, 1.0, 0.0)),
    ];

    for &((px, py, pz), (nx, ny, nz)) in cases.iter() {
        assert_eq!(cyl.local_normal_at(&Tuple4D::point(px, py, pz)),
            Tuple4D::vector(nx, ny, nz));
    }
}

#[test]
fn intersecting_a_cone() {
    let cone = Shape::cone();
    let cases = [
        ((0.0, 0.0, -5.0), (0.0, 0.0, 1.0), 5.0, 5.0),
        ((0.0, 0.0, -5.0), (1.0, 1.0, 1.0), 8.66025, 8.66025),
        ((1.0, 1.0, -5.0), (-0.5, -1.0, 1.0), 4.55006, 49.44994),
    ];

    for &((ox, oy, oz), (dx, dy, dz), t0, t1) in cases.iter() {
        let r = Ray4D::new(Tuple4D::point(ox, oy, oz),
            Tuple4D::vector(dx, dy, dz).normalize());
        assert_ts(&cone.local_intersect(&r), &[t0, t1]);
    }
}

#[test]
fn ray_parallel_to_one_cone_half() {
    let cone = Shape::cone();
    let r = Ray4D::new(Tuple4D::point(0.0, 0.0, -1.0),
        Tuple4D::vector(0.0, 1.0, 1.0).normalize());

    assert_ts(&cone.local_intersect(&r), &[0.35355]);
}

#[test]
fn intersecting_the_caps_of_a_closed_cone() {
    let cone = Shape::bounded_cone(-0.5, 0.5, true);
    let cases = [
        ((0.0, 0.0, -5.0), (0.0, 1.0, 0.0), 0),
        ((0.0, 0.0, -0.25), (0.0, 1.0, 1.0), 2),
        ((0.0, 0.0, -0.25), (0.0, 1.0, 0.0), 4),
    ];

    for &((ox, oy, oz), (dx, dy, dz), count) in cases.iter() {
        let r = Ray4D::new(Tuple4D::point(ox, oy, oz),
            Tuple4D::vector(dx, dy, dz).normalize());
        assert_eq!(cone.local_intersect(&r).intersections.len(), count);
    }
}

#[test]
fn normal_on_cone() {
    let cone = Shape::cone();
    let cases = [
        ((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)),
        ((1.0, 1.0, 1.0), (1.0, -(2.0f64.sqrt()), 1.0)),
        ((-1.0, -1.0, 0.0), (-1.0, 1.0, 0.0)),
    ];

    for &((px, py, pz), (nx, ny, nz)) in cases.iter() {
        assert_eq!(cone.local_normal_at(&Tuple4D::point(px, py, pz)),
            Tuple4D::vector(nx, ny, nz));
    }
}

#[test]
fn normal_on_cone_caps() {
    let cone = Shape::bounded_cone(-1.0, 2.0, true);

    // The top cap has radius 2, wider than a cylinder's
    assert_eq!(cone.local_normal_at(&Tuple4D::point(1.5, 2.0, 0.0)),
        Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(cone.local_normal_at(&Tuple4D::point(0.0, -1.0, 0.5)),
        Tuple4D::vector(0.0, -1.0, 0.0));
}

#[test]
fn bounds_and_caps_can_be_changed() {
    let mut cyl = Shape::cylinder();
    cyl.set_bounds(1.0, 2.0);
    cyl.set_closed(true);

    assert_eq!(cyl.ty,
        ShapeType::Cylinder { minimum: 1.0, maximum: 2.0, closed: true });

    let mut s = Shape::sphere();
    s.set_bounds(1.0, 2.0);
    s.set_closed(true);

    assert_eq!(s.ty, ShapeType::Sphere);
}
