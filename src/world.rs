use crate::feq;
use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::shape::Shape;
use crate::light::{ PointLight, Material, lighting };
use crate::intersect::{ Intersections, IntersectionComputation };

/// A world with objects and lights.
///
/// Worlds collect all objects as well as lights for rendering. Most of the
/// light transport logic (shadows, reflection and refraction) lives here.
///
/// A world is read-only while it is being rendered, so it can be shared
/// between rendering threads without locking.
#[derive(Clone, Debug)]
pub struct World {
    pub objects: Vec<Shape>,
    pub lights: Vec<PointLight>,
}

/// A small world with two concentric spheres and a single light. Mostly
/// useful for tests.
impl Default for World {
    fn default() -> World {
        let light = PointLight::new(
            Color::white(),
            Tuple4D::point(-10.0, 10.0, -10.0)
        );

        let outer = Shape::sphere().with_material(
            Material::default()
                .with_color(Color::rgb(0.8, 1.0, 0.6))
                .with_diffuse(0.7)
                .with_specular(0.2)
        );

        let inner = Shape {
            transform: Matrix4D::scaling(0.5, 0.5, 0.5),
            inverse: Matrix4D::scaling(2.0, 2.0, 2.0),
            ..Shape::sphere()
        };

        World {
            objects: vec![outer, inner],
            lights: vec![light],
        }
    }
}

impl World {
    /// Creates an empty world with no objects and no lights.
    pub fn empty() -> World {
        World { objects: Vec::new(), lights: Vec::new() }
    }

    /// Intersects a ray against all objects in a world.
    ///
    /// The returned intersections are sorted by ascending `t`.
    pub fn intersect(&self, r: &Ray4D) -> Intersections {
        let mut intersections = Intersections::new();
        for obj in self.objects.iter() {
            intersections.append(obj.intersect(r));
        }

        intersections.sort();
        intersections
    }

    /// Determines whether a point is shadowed from a light.
    ///
    /// Only shapes which cast shadows are considered, and only hits strictly
    /// between the point and the light count.
    pub fn is_shadowed(&self, p: Tuple4D, light: &PointLight) -> bool {
        let v = light.position - p;
        let distance = v.magnitude();
        let r = Ray4D::new(p, v.normalize());

        let mut intersections = Intersections::new();
        for obj in self.objects.iter().filter(|o| o.casts_shadow) {
            intersections.append(obj.intersect(&r));
        }

        match intersections.hit() {
            Some(i) => i.t < distance,
            None => false,
        }
    }

    /// Calculates the color for a hit, based on shadows, light, reflection and
    /// refraction.
    ///
    /// `remaining` is the number of bounces still allowed for reflected and
    /// refracted rays. Contributions from every light are summed.
    pub fn shade_hit(&self, comps: &IntersectionComputation, remaining: usize)
        -> Color {
        let m = &comps.obj.material;

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        // Transparent and reflective surfaces share the light by reflectance
        let transport = if m.reflective > 0.0 && m.transparency > 0.0 {
            let reflectance = comps.schlick();
            reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            reflected + refracted
        };

        self.lights.iter().fold(Color::black(), |acc, light| {
            let surface = lighting(m, comps.obj, light,
                comps.over_point, comps.eyev, comps.normalv,
                self.is_shadowed(comps.over_point, light));

            acc + surface + transport
        })
    }

    /// Determines the color seen along a ray.
    ///
    /// If nothing is hit, the color is black.
    pub fn color_at(&self, r: &Ray4D, remaining: usize) -> Color {
        let mut xs = self.intersect(r);

        match xs.hit() {
            None => Color::black(),
            Some(hit) => {
                let comps = IntersectionComputation::new(r, &hit, Some(&xs));
                self.shade_hit(&comps, remaining)
            },
        }
    }

    /// The color contributed by a reflection off of a hit.
    ///
    /// Black if the surface isn't reflective or no bounces are left.
    pub fn reflected_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Color {
        let reflective = comps.obj.material.reflective;
        if remaining < 1 || feq(reflective, 0.0) {
            return Color::black();
        }

        let r = Ray4D::new(comps.over_point, comps.reflectv);
        self.color_at(&r, remaining - 1) * reflective
    }

    /// The color contributed by light refracted through a hit.
    ///
    /// Black if the surface is opaque, no bounces are left, or the angle of
    /// the ray causes total internal reflection.
    pub fn refracted_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Color {
        let transparency = comps.obj.material.transparency;
        if remaining < 1 || feq(transparency, 0.0) {
            return Color::black();
        }

        // Snell's law
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(&comps.normalv);
        let sin2_t = n_ratio.powi(2) * (1.0 - cos_i.powi(2));
        if sin2_t > 1.0 {
            return Color::black();
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t)
            - comps.eyev * n_ratio;

        let r = Ray4D::new(comps.under_point, direction);
        self.color_at(&r, remaining - 1) * transparency
    }
}

#[cfg(test)]
use crate::intersect::Intersection;

#[cfg(test)]
use crate::consts::DEFAULT_RECURSION_DEPTH;

#[cfg(test)]
fn floor(material: Material) -> Shape {
    Shape::plane()
        .with_material(material)
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0))
        .unwrap()
}

#[cfg(test)]
fn ray_toward_floor() -> Ray4D {
    let r2 = 2.0f64.sqrt() / 2.0;
    Ray4D::new(Tuple4D::point(0.0, 0.0, -3.0), Tuple4D::vector(0.0, -r2, r2))
}

#[test]
fn default_world_spheres() {
    let w = World::default();
    let inner = &w.objects[1];

    assert_eq!(w.objects.len(), 2);
    assert_eq!(w.objects[0].material.pattern, crate::pattern::Pattern::solid(Color::rgb(0.8, 1.0, 0.6)));
    assert_eq!(inner.transform(), &Matrix4D::scaling(0.5, 0.5, 0.5));
    assert_eq!(Some(*inner.inverse()), inner.transform().inverse());
}

#[test]
fn intersect_default_world_with_ray() {
    let w = World::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let is = w.intersect(&r);
    let ts: Vec<f64> = is.intersections.iter().map(|i| i.t).collect();

    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shade_intersection_from_outside() {
    let w = World::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    let i = Intersection::new(4.0, &w.objects[0]);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(w.shade_hit(&comps, DEFAULT_RECURSION_DEPTH),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    let mut w = World::default();
    w.lights = vec![PointLight::new(
        Color::white(),
        Tuple4D::point(0.0, 0.25, 0.0),
    )];

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let i = Intersection::new(0.5, &w.objects[1]);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(w.shade_hit(&comps, DEFAULT_RECURSION_DEPTH),
        Color::rgb(0.90466, 0.90466, 0.90466));
}

#[test]
fn shade_intersection_in_shadow() {
    let mut w = World::empty();
    w.lights.push(PointLight::new(
        Color::white(),
        Tuple4D::point(0.0, 0.0, -10.0),
    ));

    w.objects.push(Shape::sphere());
    w.objects.push(Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 10.0)).unwrap());

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let i = Intersection::new(4.0, &w.objects[1]);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(w.shade_hit(&comps, DEFAULT_RECURSION_DEPTH),
        Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn shade_hit_sums_every_light() {
    let mut w = World::default();
    let light = w.lights[0];
    w.lights.push(light);

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert_eq!(w.color_at(&r, DEFAULT_RECURSION_DEPTH),
        Color::rgb(0.38066, 0.47583, 0.2855) * 2.0);
}

#[test]
fn world_without_lights_is_black() {
    let mut w = World::default();
    w.lights.clear();

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert_eq!(w.color_at(&r, DEFAULT_RECURSION_DEPTH), Color::black());
}

#[test]
fn color_ray_miss() {
    let w = World::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );

    assert_eq!(w.color_at(&r, DEFAULT_RECURSION_DEPTH), Color::black());
}

#[test]
fn color_ray_hit() {
    let w = World::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    assert_eq!(w.color_at(&r, DEFAULT_RECURSION_DEPTH),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_behind_ray() {
    let mut w = World::default();
    w.objects[0].material.ambient = 1.0;
    w.objects[1].material.ambient = 1.0;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.75),
        Tuple4D::vector(0.0, 0.0, -1.0)
    );

    assert_eq!(w.color_at(&r, DEFAULT_RECURSION_DEPTH), Color::white());
}

#[test]
fn shadow_collinear_point_and_light() {
    let w = World::default();
    let p = Tuple4D::point(0.0, 10.0, 0.0);

    assert!(!w.is_shadowed(p, &w.lights[0]));
}

#[test]
fn shadow_object_between_point_and_light() {
    let w = World::default();
    let p = Tuple4D::point(10.0, -10.0, 10.0);

    assert!(w.is_shadowed(p, &w.lights[0]));
}

#[test]
fn shadow_object_behind_light() {
    let w = World::default();
    let p = Tuple4D::point(-20.0, 20.0, -20.0);

    assert!(!w.is_shadowed(p, &w.lights[0]));
}

#[test]
fn shadow_object_behind_point() {
    let w = World::default();
    let p = Tuple4D::point(-2.0, 2.0, -2.0);

    assert!(!w.is_shadowed(p, &w.lights[0]));
}

#[test]
fn shapes_can_opt_out_of_shadows() {
    let mut w = World::default();
    for obj in w.objects.iter_mut() {
        obj.casts_shadow = false;
    }

    let p = Tuple4D::point(10.0, -10.0, 10.0);

    assert!(!w.is_shadowed(p, &w.lights[0]));
}

#[test]
fn reflected_color_for_nonreflective_material() {
    let mut w = World::default();
    w.objects[1].material.ambient = 1.0;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let i = Intersection::new(1.0, &w.objects[1]);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(w.reflected_color(&comps, DEFAULT_RECURSION_DEPTH),
        Color::black());
}

#[test]
fn reflected_color_for_reflective_material() {
    let mut w = World::default();
    w.objects.push(floor(Material::default().with_reflective(0.5)));

    let r = ray_toward_floor();
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(w.reflected_color(&comps, 1),
        Color::rgb(0.19049, 0.23811, 0.14287));
}

#[test]
fn shade_hit_with_reflective_material() {
    let mut w = World::default();
    w.objects.push(floor(Material::default().with_reflective(0.5)));

    let r = ray_toward_floor();
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(w.shade_hit(&comps, DEFAULT_RECURSION_DEPTH),
        Color::rgb(0.87689, 0.92451, 0.82926));
}

#[test]
fn reflected_color_at_maximum_recursive_depth() {
    let mut w = World::default();
    w.objects.push(floor(Material::default().with_reflective(0.5)));

    let r = ray_toward_floor();
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let comps = IntersectionComputation::new(&r, &i, None);

    assert_eq!(w.reflected_color(&comps, 0), Color::black());
}

#[test]
fn mutually_reflective_surfaces_terminate() {
    let mut w = World::empty();
    w.lights.push(PointLight::new(Color::white(), Tuple4D::origin()));

    let mirror = Material::default().with_reflective(1.0);
    w.objects.push(Shape::plane()
        .with_material(mirror.clone())
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0)).unwrap());
    w.objects.push(Shape::plane()
        .with_material(mirror)
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0)).unwrap());

    let r = Ray4D::new(Tuple4D::origin(), Tuple4D::vector(0.0, 1.0, 0.0));

    for depth in 0..10 {
        let c = w.color_at(&r, depth);
        assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
    }
}

#[test]
fn refracted_color_with_opaque_surface() {
    let w = World::default();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let xs = Intersections::from(vec![
        Intersection::new(4.0, &w.objects[0]),
        Intersection::new(6.0, &w.objects[0]),
    ]);
    let comps = IntersectionComputation::new(&r, &xs.intersections[0],
        Some(&xs));

    assert_eq!(w.refracted_color(&comps, 5), Color::black());
}

#[test]
fn refracted_color_at_maximum_recursive_depth() {
    let mut w = World::default();
    w.objects[0].material = Material::glass();

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );
    let xs = Intersections::from(vec![
        Intersection::new(4.0, &w.objects[0]),
        Intersection::new(6.0, &w.objects[0]),
    ]);
    let comps = IntersectionComputation::new(&r, &xs.intersections[0],
        Some(&xs));

    assert_eq!(w.refracted_color(&comps, 0), Color::black());
}

#[test]
fn refracted_color_under_total_internal_reflection() {
    let mut w = World::default();
    w.objects[0].material = Material::glass();

    let r2 = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, r2),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );
    let xs = Intersections::from(vec![
        Intersection::new(-r2, &w.objects[0]),
        Intersection::new(r2, &w.objects[0]),
    ]);

    // The ray is inside the sphere, so the second intersection is the hit
    let comps = IntersectionComputation::new(&r, &xs.intersections[1],
        Some(&xs));

    assert_eq!(w.refracted_color(&comps, 5), Color::black());
}

#[test]
fn shade_hit_with_transparent_material() {
    let mut w = World::default();
    w.objects.push(floor(Material::default()
        .with_transparency(0.5)
        .with_refractive_index(1.5)));
    w.objects.push(Shape::sphere()
        .with_material(Material::default()
            .with_color(Color::red())
            .with_ambient(0.5))
        .with_transform(Matrix4D::translation(0.0, -3.5, -0.5)).unwrap());

    let r = ray_toward_floor();
    let xs = Intersections::from(vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2]),
    ]);
    let comps = IntersectionComputation::new(&r, &xs.intersections[0],
        Some(&xs));

    assert_eq!(w.shade_hit(&comps, 5), Color::rgb(0.93639, 0.68639, 0.68639));
}

#[test]
fn shade_hit_with_reflective_transparent_material() {
    let mut w = World::default();
    w.objects.push(floor(Material::default()
        .with_reflective(0.5)
        .with_transparency(0.5)
        .with_refractive_index(1.5)));
    w.objects.push(Shape::sphere()
        .with_material(Material::default()
            .with_color(Color::red())
            .with_ambient(0.5))
        .with_transform(Matrix4D::translation(0.0, -3.5, -0.5)).unwrap());

    let r = ray_toward_floor();
    let xs = Intersections::from(vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2]),
    ]);
    let comps = IntersectionComputation::new(&r, &xs.intersections[0],
        Some(&xs));

    assert_eq!(w.shade_hit(&comps, 5), Color::rgb(0.93389, 0.69641, 0.69241));
}
