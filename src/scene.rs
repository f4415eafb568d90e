use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{ debug, warn };
use serde::Deserialize;

use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::pattern::Pattern;
use crate::light::{ PointLight, Material };
use crate::shape::Shape;
use crate::world::World;
use crate::camera::Camera;
use crate::error::{ Error, Result };

/// A world together with the camera it should be viewed through.
#[derive(Clone, Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Loads a scene from a JSON file.
    pub fn load(path: &Path) -> Result<Scene> {
        debug!("loading scene from {}", path.display());
        fs::read_to_string(path)?.parse()
    }
}

/// Parses a JSON scene description.
///
/// ```
/// # use whitted_tracer::scene::Scene;
/// let scene: Scene = r#"{
///     "camera": { "width": 4, "height": 2, "field_of_view": 1.0,
///                 "from": [0, 0, -5], "to": [0, 0, 0] },
///     "lights": [ { "at": [-10, 10, -10], "intensity": [1, 1, 1] } ],
///     "shapes": [ { "type": "sphere" } ]
/// }"#.parse().unwrap();
///
/// assert_eq!(scene.camera.hsize, 4);
/// assert_eq!(scene.world.objects.len(), 1);
/// ```
impl FromStr for Scene {
    type Err = Error;

    fn from_str(s: &str) -> Result<Scene> {
        let json: SceneJson = serde_json::from_str(s)?;
        json.build()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneJson {
    camera: Option<CameraJson>,

    #[serde(default)]
    lights: Vec<LightJson>,

    #[serde(default)]
    materials: BTreeMap<String, MaterialJson>,

    #[serde(default)]
    transforms: BTreeMap<String, Vec<StepJson>>,

    #[serde(default)]
    shapes: Vec<ShapeJson>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraJson {
    width: usize,
    height: usize,

    /// In radians.
    field_of_view: f64,

    from: [f64; 3],
    to: [f64; 3],

    #[serde(default = "default_up")]
    up: [f64; 3],
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LightJson {
    at: [f64; 3],
    intensity: [f64; 3],
}

/// One step of a transform: either an elementary transformation or the name
/// of a defined transform.
#[derive(Deserialize)]
#[serde(untagged)]
enum StepJson {
    Named(String),
    Op(OpJson),
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
enum OpJson {
    Translate([f64; 3]),
    Scale([f64; 3]),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Shear([f64; 6]),
}

impl OpJson {
    fn matrix(&self) -> Matrix4D {
        match *self {
            OpJson::Translate([x, y, z]) => Matrix4D::translation(x, y, z),
            OpJson::Scale([x, y, z]) => Matrix4D::scaling(x, y, z),
            OpJson::RotateX(r) => Matrix4D::rotation_x(r),
            OpJson::RotateY(r) => Matrix4D::rotation_y(r),
            OpJson::RotateZ(r) => Matrix4D::rotation_z(r),
            OpJson::Shear([xy, xz, yx, yz, zx, zy])
                => Matrix4D::shearing(xy, xz, yx, yz, zx, zy),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaterialRef {
    Named(String),
    Inline(MaterialJson),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MaterialJson {
    /// A defined material whose values are used for every unset field.
    extend: Option<String>,

    color: Option<[f64; 3]>,
    pattern: Option<PatternJson>,

    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,

    reflective: Option<f64>,
    transparency: Option<f64>,
    refractive_index: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum PatternKind {
    Solid,
    #[serde(alias = "stripe")]
    Stripes,
    #[serde(alias = "ring")]
    Rings,
    #[serde(alias = "checker")]
    Checkers,
    Gradient,
    RadialGradient,
    Blend,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternJson {
    #[serde(rename = "type")]
    kind: PatternKind,

    #[serde(default)]
    colors: Vec<[f64; 3]>,

    #[serde(default)]
    patterns: Vec<PatternJson>,

    #[serde(default)]
    transform: Vec<StepJson>,
}

#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ShapeKind {
    Sphere,
    Plane,
    Cube,
    Cylinder,
    Cone,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ShapeJson {
    #[serde(rename = "type")]
    kind: ShapeKind,

    #[serde(default)]
    transform: Vec<StepJson>,

    material: Option<MaterialRef>,

    #[serde(default = "default_shadow")]
    shadow: bool,

    minimum: Option<f64>,
    maximum: Option<f64>,

    #[serde(default)]
    closed: bool,
}

fn default_shadow() -> bool {
    true
}

impl SceneJson {
    fn build(self) -> Result<Scene> {
        debug!("scene defines {} material(s) and {} transform(s)",
            self.materials.len(), self.transforms.len());

        let mut defs = Definitions {
            materials: &self.materials,
            transforms: &self.transforms,
            pending: Vec::new(),
        };

        let camera = match self.camera {
            Some(ref c) => c.build()?,
            None => return Err(Error::InvalidScene("no camera".to_string())),
        };

        let mut world = World::empty();
        world.lights = self.lights.iter()
            .map(|l| PointLight::new(
                l.intensity.into(),
                Tuple4D::point(l.at[0], l.at[1], l.at[2])
            ))
            .collect();

        world.objects = self.shapes.iter()
            .map(|s| defs.shape(s))
            .collect::<Result<Vec<Shape>>>()?;

        debug!("scene has {} light(s) and {} shape(s)",
            world.lights.len(), world.objects.len());
        if world.lights.is_empty() {
            warn!("scene has no lights, every pixel will be black");
        }

        Ok(Scene { world, camera })
    }
}

impl CameraJson {
    fn build(&self) -> Result<Camera> {
        let [fx, fy, fz] = self.from;
        let [tx, ty, tz] = self.to;
        let [ux, uy, uz] = self.up;

        let view = Matrix4D::view_transform(
            Tuple4D::point(fx, fy, fz),
            Tuple4D::point(tx, ty, tz),
            Tuple4D::vector(ux, uy, uz),
        );

        Camera::new(self.width, self.height, self.field_of_view, view)
    }
}

/// Named materials and transforms, resolved on demand.
///
/// Definitions may refer to each other in any order; `pending` holds the
/// names currently being resolved so that a cycle is reported instead of
/// recursing forever.
struct Definitions<'a> {
    materials: &'a BTreeMap<String, MaterialJson>,
    transforms: &'a BTreeMap<String, Vec<StepJson>>,
    pending: Vec<(&'static str, String)>,
}

impl<'a> Definitions<'a> {
    fn enter(&mut self, kind: &'static str, name: &str) -> Result<()> {
        if self.pending.iter().any(|(k, n)| *k == kind && n == name) {
            return Err(Error::InvalidScene(
                format!("{} `{}` is defined in terms of itself", kind, name)
            ));
        }

        self.pending.push((kind, name.to_string()));
        Ok(())
    }

    /// Combines transform steps; the first step listed is applied first.
    fn transform(&mut self, steps: &[StepJson]) -> Result<Matrix4D> {
        let mut m = Matrix4D::identity();

        for step in steps {
            let s = match step {
                StepJson::Named(name) => self.named_transform(name)?,
                StepJson::Op(op) => op.matrix(),
            };
            m = s * m;
        }

        Ok(m)
    }

    fn named_transform(&mut self, name: &str) -> Result<Matrix4D> {
        let transforms = self.transforms;
        let steps = transforms.get(name).ok_or_else(|| Error::UndefinedName {
            kind: "transform",
            name: name.to_string(),
        })?;

        self.enter("transform", name)?;
        let m = self.transform(steps);
        self.pending.pop();
        m
    }

    fn material_ref(&mut self, r: &MaterialRef) -> Result<Material> {
        match r {
            MaterialRef::Named(name) => self.named_material(name),
            MaterialRef::Inline(m) => self.material(m),
        }
    }

    fn named_material(&mut self, name: &str) -> Result<Material> {
        let materials = self.materials;
        let m = materials.get(name).ok_or_else(|| Error::UndefinedName {
            kind: "material",
            name: name.to_string(),
        })?;

        self.enter("material", name)?;
        let material = self.material(m);
        self.pending.pop();
        material
    }

    fn material(&mut self, m: &MaterialJson) -> Result<Material> {
        let mut material = match m.extend {
            Some(ref base) => self.named_material(base)?,
            None => Material::default(),
        };

        if let Some(c) = m.color {
            material = material.with_color(c.into());
        }
        if let Some(ref p) = m.pattern {
            material = material.with_pattern(self.pattern(p)?);
        }
        if let Some(v) = m.ambient {
            material = material.with_ambient(v);
        }
        if let Some(v) = m.diffuse {
            material = material.with_diffuse(v);
        }
        if let Some(v) = m.specular {
            material = material.with_specular(v);
        }
        if let Some(v) = m.shininess {
            material = material.with_shininess(v);
        }
        if let Some(v) = m.reflective {
            material = material.with_reflective(v);
        }
        if let Some(v) = m.transparency {
            material = material.with_transparency(v);
        }
        if let Some(v) = m.refractive_index {
            material = material.with_refractive_index(v);
        }

        Ok(material)
    }

    fn pattern(&mut self, p: &PatternJson) -> Result<Pattern> {
        let invalid = |what: &str| Error::InvalidScene(
            format!("{:?} pattern {}", p.kind, what)
        );

        // Sub-patterns for the alternating kinds; plain colors become solid
        // patterns, and nothing at all means white and black.
        let mut subs: Vec<Pattern> = p.colors.iter()
            .map(|&c| Pattern::solid(c.into()))
            .collect();
        for sub in &p.patterns {
            subs.push(self.pattern(sub)?);
        }
        if subs.is_empty() {
            subs = vec![Pattern::solid(Color::white()), Pattern::solid(Color::black())];
        }

        let pattern = match p.kind {
            PatternKind::Solid => match p.colors.as_slice() {
                [c] if p.patterns.is_empty() => Pattern::solid((*c).into()),
                _ => return Err(invalid("needs exactly one color")),
            },
            PatternKind::Stripes => Pattern::stripes(subs),
            PatternKind::Rings => Pattern::rings(subs),
            PatternKind::Checkers => Pattern::checkers(subs),
            PatternKind::Gradient | PatternKind::RadialGradient => {
                let (a, b) = match p.colors.as_slice() {
                    [] if p.patterns.is_empty() => (Color::white(), Color::black()),
                    [a, b] if p.patterns.is_empty() => ((*a).into(), (*b).into()),
                    _ => return Err(invalid("needs exactly two colors")),
                };

                if let PatternKind::Gradient = p.kind {
                    Pattern::gradient(a, b)
                } else {
                    Pattern::radial_gradient(a, b)
                }
            },
            PatternKind::Blend => {
                let mut subs = subs.into_iter();
                match (subs.next(), subs.next(), subs.next()) {
                    (Some(a), Some(b), None) => Pattern::blend(a, b),
                    _ => return Err(invalid("needs exactly two patterns")),
                }
            },
        };

        pattern.with_transform(self.transform(&p.transform)?)
    }

    fn shape(&mut self, s: &ShapeJson) -> Result<Shape> {
        let mut shape = match s.kind {
            ShapeKind::Sphere => Shape::sphere(),
            ShapeKind::Plane => Shape::plane(),
            ShapeKind::Cube => Shape::cube(),
            ShapeKind::Cylinder => Shape::cylinder(),
            ShapeKind::Cone => Shape::cone(),
        };

        match s.kind {
            ShapeKind::Cylinder | ShapeKind::Cone => {
                shape.set_bounds(
                    s.minimum.unwrap_or(-std::f64::INFINITY),
                    s.maximum.unwrap_or(std::f64::INFINITY),
                );
                shape.set_closed(s.closed);
            },
            _ if s.minimum.is_some() || s.maximum.is_some() || s.closed => {
                return Err(Error::InvalidScene(
                    format!("{:?} cannot be bounded or closed", s.kind)
                ));
            },
            _ => (),
        }

        if let Some(ref m) = s.material {
            shape.material = self.material_ref(m)?;
        }
        shape.casts_shadow = s.shadow;
        shape.set_transform(self.transform(&s.transform)?)?;

        Ok(shape)
    }
}

#[cfg(test)]
use crate::shape::ShapeType;

#[cfg(test)]
const CAMERA: &str = r#""camera": {
    "width": 11, "height": 11, "field_of_view": 1.5707963267948966,
    "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0]
}"#;

#[cfg(test)]
fn scene_with(rest: &str) -> Result<Scene> {
    format!("{{ {}, {} }}", CAMERA, rest).parse()
}

#[test]
fn load_default_world() {
    let scene = scene_with(r#"
        "lights": [ { "at": [-10, 10, -10], "intensity": [1, 1, 1] } ],
        "shapes": [
            { "type": "sphere",
              "material": { "color": [0.8, 1.0, 0.6], "diffuse": 0.7, "specular": 0.2 } },
            { "type": "sphere", "transform": [ { "scale": [0.5, 0.5, 0.5] } ] }
        ]
    "#).unwrap();

    let expected = World::default();
    assert_eq!(scene.world.lights, expected.lights);
    assert_eq!(scene.world.objects[0].material, expected.objects[0].material);
    assert_eq!(scene.world.objects[1].transform(), expected.objects[1].transform());

    let config = crate::config::RenderConfig { parallel: false, ..Default::default() };
    let image = scene.camera.render(&scene.world, &config);
    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn transform_steps_apply_in_order() {
    let scene = scene_with(r#"
        "shapes": [ { "type": "cube", "transform": [
            { "rotate-x": 1.5707963267948966 },
            { "scale": [5, 5, 5] },
            { "translate": [10, 5, 7] }
        ] } ]
    "#).unwrap();

    let expected = Matrix4D::translation(10.0, 5.0, 7.0)
        * Matrix4D::scaling(5.0, 5.0, 5.0)
        * Matrix4D::rotation_x(std::f64::consts::FRAC_PI_2);
    assert_eq!(*scene.world.objects[0].transform(), expected);

    let p = *scene.world.objects[0].transform() * Tuple4D::point(1.0, 0.0, 1.0);
    assert_eq!(p, Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn named_transforms_can_be_nested() {
    let scene = scene_with(r#"
        "transforms": {
            "standard": [ { "translate": [1, -1, 1] }, { "scale": [0.5, 0.5, 0.5] } ],
            "large": [ "standard", { "scale": [3.5, 3.5, 3.5] } ]
        },
        "shapes": [ { "type": "sphere", "transform": [
            "large", { "shear": [1, 0, 0, 0, 0, 0] }
        ] } ]
    "#).unwrap();

    let expected = Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0)
        * Matrix4D::scaling(3.5, 3.5, 3.5)
        * Matrix4D::scaling(0.5, 0.5, 0.5)
        * Matrix4D::translation(1.0, -1.0, 1.0);
    assert_eq!(*scene.world.objects[0].transform(), expected);
}

#[test]
fn materials_extend_defined_materials() {
    let scene = scene_with(r#"
        "materials": {
            "white": { "color": [1, 1, 1], "diffuse": 0.7, "ambient": 0.1,
                       "specular": 0.0, "reflective": 0.1 },
            "blue": { "extend": "white", "color": [0.537, 0.831, 0.914] }
        },
        "shapes": [
            { "type": "plane", "material": "blue" },
            { "type": "sphere", "material": { "extend": "blue", "transparency": 2.0 } }
        ]
    "#).unwrap();

    let blue = &scene.world.objects[0].material;
    assert_eq!(*blue, Material::default()
        .with_color(Color::rgb(0.537, 0.831, 0.914))
        .with_diffuse(0.7)
        .with_ambient(0.1)
        .with_specular(0.0)
        .with_reflective(0.1));

    // Builders clamp out-of-range values
    let glassy = &scene.world.objects[1].material;
    assert_eq!(glassy.transparency, 1.0);
    assert_eq!(glassy.reflective, 0.1);
}

#[test]
fn undefined_names_are_reported() {
    let missing_material = scene_with(r#"
        "shapes": [ { "type": "sphere", "material": "chrome" } ]
    "#);
    assert!(matches!(missing_material,
        Err(Error::UndefinedName { kind: "material", ref name }) if name == "chrome"));

    let missing_transform = scene_with(r#"
        "shapes": [ { "type": "sphere", "transform": [ "huge" ] } ]
    "#);
    assert!(matches!(missing_transform,
        Err(Error::UndefinedName { kind: "transform", ref name }) if name == "huge"));
}

#[test]
fn cyclic_definitions_are_rejected() {
    let scene = scene_with(r#"
        "materials": {
            "a": { "extend": "b" },
            "b": { "extend": "a" }
        },
        "shapes": [ { "type": "sphere", "material": "a" } ]
    "#);
    assert!(matches!(scene, Err(Error::InvalidScene(_))));

    let scene = scene_with(r#"
        "transforms": { "t": [ "t" ] },
        "shapes": [ { "type": "sphere", "transform": [ "t" ] } ]
    "#);
    assert!(matches!(scene, Err(Error::InvalidScene(_))));
}

#[test]
fn patterns_are_built_with_transforms() {
    let scene = scene_with(r#"
        "shapes": [
            { "type": "plane", "material": { "pattern": {
                "type": "checkers", "colors": [[0.35, 0.35, 0.35], [0.65, 0.65, 0.65]],
                "transform": [ { "scale": [0.25, 0.25, 0.25] } ]
            } } },
            { "type": "plane", "material": { "pattern": {
                "type": "blend", "patterns": [
                    { "type": "stripe" },
                    { "type": "stripes", "transform": [ { "rotate-y": 1.5707963267948966 } ] }
                ]
            } } },
            { "type": "sphere", "material": { "pattern": {
                "type": "radial-gradient", "colors": [[1, 0, 0], [0, 0, 1]]
            } } }
        ]
    "#).unwrap();

    let checkers = &scene.world.objects[0].material.pattern;
    assert_eq!(*checkers.transform(), Matrix4D::scaling(0.25, 0.25, 0.25));
    assert_eq!(checkers.color_at_object(Tuple4D::point(0.3, 0.0, 0.0)),
        Color::rgb(0.65, 0.65, 0.65));

    let blend = &scene.world.objects[1].material.pattern;
    assert_eq!(blend.color_at_object(Tuple4D::point(0.5, 0.0, -0.5)),
        Color::rgb(1.0, 1.0, 1.0));
    assert_eq!(blend.color_at_object(Tuple4D::point(1.5, 0.0, -0.5)),
        Color::rgb(0.5, 0.5, 0.5));

    assert_eq!(scene.world.objects[2].material.pattern,
        Pattern::radial_gradient(Color::red(), Color::blue()));
}

#[test]
fn malformed_patterns_are_rejected() {
    let solid = scene_with(r#"
        "shapes": [ { "type": "plane", "material": { "pattern": {
            "type": "solid", "colors": [[1, 0, 0], [0, 1, 0]]
        } } } ]
    "#);
    assert!(matches!(solid, Err(Error::InvalidScene(_))));

    let blend = scene_with(r#"
        "shapes": [ { "type": "plane", "material": { "pattern": {
            "type": "blend", "patterns": [ { "type": "rings" } ]
        } } } ]
    "#);
    assert!(matches!(blend, Err(Error::InvalidScene(_))));
}

#[test]
fn cylinders_and_cones_take_bounds() {
    let scene = scene_with(r#"
        "shapes": [
            { "type": "cylinder", "minimum": 0, "maximum": 0.75, "closed": true },
            { "type": "cone", "maximum": 0 },
            { "type": "cylinder" }
        ]
    "#).unwrap();

    assert_eq!(scene.world.objects[0].ty,
        ShapeType::Cylinder { minimum: 0.0, maximum: 0.75, closed: true });
    assert_eq!(scene.world.objects[1].ty, ShapeType::Cone {
        minimum: -std::f64::INFINITY,
        maximum: 0.0,
        closed: false,
    });
    assert_eq!(scene.world.objects[2].ty, Shape::cylinder().ty);

    let bounded_sphere = scene_with(r#"
        "shapes": [ { "type": "sphere", "closed": true } ]
    "#);
    assert!(matches!(bounded_sphere, Err(Error::InvalidScene(_))));
}

#[test]
fn shapes_can_opt_out_of_shadows() {
    let scene = scene_with(r#"
        "shapes": [ { "type": "sphere", "shadow": false }, { "type": "plane" } ]
    "#).unwrap();

    assert!(!scene.world.objects[0].casts_shadow);
    assert!(scene.world.objects[1].casts_shadow);
}

#[test]
fn invalid_scenes_are_rejected() {
    let no_camera: Result<Scene> = r#"{ "shapes": [] }"#.parse();
    assert!(matches!(no_camera, Err(Error::InvalidScene(_))));

    let singular = scene_with(r#"
        "shapes": [ { "type": "sphere", "transform": [ { "scale": [0, 1, 1] } ] } ]
    "#);
    assert!(matches!(singular, Err(Error::SingularTransform)));

    let unknown_shape = scene_with(r#""shapes": [ { "type": "teapot" } ]"#);
    assert!(matches!(unknown_shape, Err(Error::Json(_))));

    let not_json: Result<Scene> = "camera: { width: 10 }".parse();
    assert!(matches!(not_json, Err(Error::Json(_))));
}

#[test]
fn missing_scene_file_is_an_io_error() {
    let scene = Scene::load(Path::new("/nonexistent/scene.json"));
    assert!(matches!(scene, Err(Error::Io(_))));
}
