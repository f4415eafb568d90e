use crate::consts::{ GLASS_RI, VACUUM_RI };
use crate::color::Color;
use crate::pattern::Pattern;
use crate::tuple::Tuple4D;
use crate::shape::Shape;

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from. There is no notion of area; shadows are always hard.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple4D,
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(intensity: Color, mut position: Tuple4D) -> PointLight {
        position.w = 1.0;

        PointLight { intensity, position }
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model (ambient, diffuse,
/// specular and shininess), plus the reflective and refractive properties used
/// by the recursive part of the tracer.
///
/// Fields are public so a shape's material can be tweaked in place. The
/// `with_*` builders clamp values into their valid ranges; direct field writes
/// are not checked.
///
/// ```
/// # use whitted_tracer::light::Material;
/// let m = Material::default().with_ambient(1.5).with_reflective(-0.5);
/// assert_eq!(m.ambient, 1.0);
/// assert_eq!(m.reflective, 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub pattern: Pattern,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,

    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            pattern: Pattern::default(),

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,

            reflective: 0.0,
            transparency: 0.0,
            refractive_index: VACUUM_RI,
        }
    }
}

impl Material {
    /// A fully transparent glass material.
    pub fn glass() -> Material {
        Material {
            transparency: 1.0,
            refractive_index: GLASS_RI,
            ..Default::default()
        }
    }

    pub fn with_pattern(self, pattern: Pattern) -> Material {
        Material { pattern, ..self }
    }

    /// Shorthand for a solid color pattern.
    pub fn with_color(self, color: Color) -> Material {
        self.with_pattern(Pattern::solid(color))
    }

    pub fn with_ambient(self, ambient: f64) -> Material {
        Material { ambient: unit(ambient), ..self }
    }

    pub fn with_diffuse(self, diffuse: f64) -> Material {
        Material { diffuse: unit(diffuse), ..self }
    }

    pub fn with_specular(self, specular: f64) -> Material {
        Material { specular: unit(specular), ..self }
    }

    pub fn with_shininess(self, shininess: f64) -> Material {
        Material { shininess, ..self }
    }

    pub fn with_reflective(self, reflective: f64) -> Material {
        Material { reflective: unit(reflective), ..self }
    }

    pub fn with_transparency(self, transparency: f64) -> Material {
        Material { transparency: unit(transparency), ..self }
    }

    pub fn with_refractive_index(self, refractive_index: f64) -> Material {
        Material { refractive_index: refractive_index.max(0.0), ..self }
    }
}

fn unit(v: f64) -> f64 {
    v.max(0.0).min(1.0)
}

/// Calculate the lighting of a point on a surface, from a single light.
///
/// Effectively, this function takes a material, a single light, a point, the
/// eye vector and the normal vector, and calculates how the light looks from
/// the eye (Phong reflection). The surface color comes from the material's
/// pattern, evaluated on `obj` at `point`.
///
/// If this point is in a shadow (parameter `in_shadow`), only ambient light is
/// used.
pub fn lighting(m: &Material, obj: &Shape, light: &PointLight,
    point: Tuple4D, eyev: Tuple4D, normalv: Tuple4D, in_shadow: bool) -> Color {
    // Combine surface color with light's color
    let effective_color = m.pattern.color_at(obj, point) * light.intensity;

    let ambient = effective_color * m.ambient;
    if in_shadow {
        return ambient;
    }

    // A negative dot product means the light is on the other side of the
    // surface
    let lightv = (light.position - point).normalize();
    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal < 0.0 {
        return ambient;
    }

    let diffuse = effective_color * m.diffuse * light_dot_normal;

    let reflectv = (-lightv).reflect(&normalv);
    let reflect_dot_eye = reflectv.dot(&eyev);
    let specular = if reflect_dot_eye <= 0.0 {
        Color::black()
    } else {
        light.intensity * m.specular * reflect_dot_eye.powf(m.shininess)
    };

    ambient + diffuse + specular
}

#[cfg(test)]
fn lighting_fixture(eyev: Tuple4D, light_at: Tuple4D, in_shadow: bool) -> Color {
    let s = Shape::sphere();
    let light = PointLight::new(Color::white(), light_at);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    lighting(&s.material, &s, &light, Tuple4D::origin(), eyev, normalv,
        in_shadow)
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.pattern, Pattern::solid(Color::white()));
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(m.reflective, 0.0);
    assert_eq!(m.transparency, 0.0);
    assert_eq!(m.refractive_index, 1.0);
}

#[test]
fn builders_clamp_values() {
    let m = Material::glass()
        .with_diffuse(2.0)
        .with_specular(-1.0)
        .with_transparency(3.0)
        .with_refractive_index(-2.0)
        .with_shininess(1000.0);

    assert_eq!(m.diffuse, 1.0);
    assert_eq!(m.specular, 0.0);
    assert_eq!(m.transparency, 1.0);
    assert_eq!(m.refractive_index, 0.0);
    assert_eq!(m.shininess, 1000.0);
}

#[test]
fn eye_between_light_and_surface() {
    let res = lighting_fixture(
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::point(0.0, 0.0, -10.0),
        false,
    );

    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let res = lighting_fixture(
        Tuple4D::vector(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt()) / 2.0),
        Tuple4D::point(0.0, 0.0, -10.0),
        false,
    );

    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_offset_45() {
    let res = lighting_fixture(
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::point(0.0, 10.0, -10.0),
        false,
    );

    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let res = lighting_fixture(
        Tuple4D::vector(0.0, -(2.0f64.sqrt()) / 2.0, -(2.0f64.sqrt()) / 2.0),
        Tuple4D::point(0.0, 10.0, -10.0),
        false,
    );

    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let res = lighting_fixture(
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::point(0.0, 0.0, 10.0),
        false,
    );

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow() {
    let res = lighting_fixture(
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::point(0.0, 0.0, -10.0),
        true,
    );

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_with_stripe_pattern() {
    // Only ambient light is used, so the result is the raw pattern color
    let m = Material::default()
        .with_pattern(Pattern::stripe(Color::white(), Color::black()))
        .with_ambient(1.0)
        .with_diffuse(0.0)
        .with_specular(0.0);

    let s = Shape::sphere();
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(Color::white(), Tuple4D::point(0.0, 0.0, -10.0));

    assert_eq!(
        lighting(&m, &s, &light, Tuple4D::point(0.9, 0.0, 0.0),
            eyev, normalv, false),
        Color::white()
    );

    assert_eq!(
        lighting(&m, &s, &light, Tuple4D::point(1.1, 0.0, 0.0),
            eyev, normalv, false),
        Color::black()
    );
}
