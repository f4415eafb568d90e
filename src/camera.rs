use std::time::Instant;

use log::{ info, trace };

use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::world::World;
use crate::canvas::Canvas;
use crate::config::{ pixel_rng, RenderConfig };
use crate::parallel;
use crate::error::{ Error, Result };

/// A camera record for generating a canvas.
///
/// This record gives a "frame" of the world. Based on camera parameters,
/// different perspectives can be produced.
///
/// The canvas sits one unit in front of the camera, and `field_of_view`
/// controls how much of it is visible. The inverse of the view transform is
/// cached, so a camera can never hold a singular transform.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    /// The angle describing "how much" the camera can see.
    pub field_of_view: f64,

    pub half_width: f64,
    pub half_height: f64,
    pub pixel_size: f64,

    /// A matrix describing how the world should be oriented relative to the
    /// camera (typically a view transformation).
    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Camera {
    /// Creates a camera.
    ///
    /// Fails if either dimension is zero, or if `transform` is singular.
    ///
    /// ```
    /// # use whitted_tracer::camera::Camera;
    /// # use whitted_tracer::matrix::Matrix4D;
    /// let c = Camera::new(200, 125, std::f64::consts::PI / 2.0,
    ///     Matrix4D::identity()).unwrap();
    /// assert!((c.pixel_size - 0.01).abs() < 1e-9);
    /// ```
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64,
        transform: Matrix4D) -> Result<Camera> {
        let inverse = transform.inverse().ok_or(Error::SingularTransform)?;

        let mut camera = Camera {
            hsize: 0,
            vsize: 0,
            field_of_view,
            half_width: 0.0,
            half_height: 0.0,
            pixel_size: 0.0,
            transform,
            inverse,
        };

        camera.resize(hsize, vsize)?;
        Ok(camera)
    }

    /// Changes the canvas size, keeping the field of view.
    pub fn resize(&mut self, hsize: usize, vsize: usize) -> Result<()> {
        if hsize == 0 || vsize == 0 {
            return Err(Error::InvalidScene(
                format!("image size must be non-zero (got {}x{})", hsize, vsize)
            ));
        }

        let half_view = (self.field_of_view / 2.0).tan();
        let aspect = (hsize as f64) / (vsize as f64);

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        self.hsize = hsize;
        self.vsize = vsize;
        self.half_width = half_width;
        self.half_height = half_height;
        self.pixel_size = half_width * 2.0 / (hsize as f64);
        Ok(())
    }

    /// Returns a reference to the view transform.
    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        self.inverse = transform.inverse().ok_or(Error::SingularTransform)?;
        self.transform = transform;
        Ok(())
    }

    /// A ray from the camera through the center of pixel `(px, py)`.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray4D {
        self.ray_for_pixel_offset(px, py, 0.5, 0.5)
    }

    /// A ray from the camera through pixel `(px, py)`.
    ///
    /// The offsets, in `[0, 1)`, locate the ray within the pixel; `(0.5, 0.5)`
    /// is the center.
    pub fn ray_for_pixel_offset(&self, px: usize, py: usize,
        x_offset: f64, y_offset: f64) -> Ray4D {
        // Offsets from the edge of the canvas to the sample
        let xoffset = (px as f64 + x_offset) * self.pixel_size;
        let yoffset = (py as f64 + y_offset) * self.pixel_size;

        // The untransformed coordinates of the sample; the camera looks
        // toward -z, so +x is to the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * Tuple4D::point(world_x, world_y, -1.0);
        let origin = self.inverse * Tuple4D::origin();
        let direction = (pixel - origin).normalize();

        Ray4D::new(origin, direction)
    }

    /// The color of a single pixel, averaged over every sample.
    ///
    /// Sample positions are seeded by the pixel coordinates, so the same
    /// pixel always renders to the same color.
    pub fn pixel_color(&self, world: &World, px: usize, py: usize,
        config: &RenderConfig) -> Color {
        let offsets = config.sampling.offsets(&mut pixel_rng(px, py));
        let sum = offsets.iter().fold(Color::black(), |acc, &(dx, dy)| {
            let ray = self.ray_for_pixel_offset(px, py, dx, dy);
            acc + world.color_at(&ray, config.depth)
        });

        sum / offsets.len() as f64
    }

    /// Renders row `py` of the image into `row`.
    pub fn render_row(&self, world: &World, py: usize, row: &mut [Color],
        config: &RenderConfig) {
        trace!("rendering row {}/{}", py + 1, self.vsize);

        for (px, pixel) in row.iter_mut().enumerate() {
            *pixel = self.pixel_color(world, px, py, config);
        }
    }

    /// Renders a world to a canvas.
    ///
    /// Rows are rendered concurrently when `config.parallel` is set; the
    /// resulting image is the same either way.
    pub fn render(&self, world: &World, config: &RenderConfig) -> Canvas {
        info!("rendering {}x{} image, depth {}, {}{}",
            self.hsize, self.vsize, config.depth, config.sampling,
            if config.parallel { "" } else { ", single threaded" });

        let start = Instant::now();
        let image = if config.parallel {
            parallel::render(self, world, config)
        } else {
            self.render_sequential(world, config)
        };

        info!("rendered in {:.2?}", start.elapsed());
        image
    }

    fn render_sequential(&self, world: &World, config: &RenderConfig)
        -> Canvas {
        let mut image = Canvas::new(self.hsize, self.vsize);

        for (py, row) in image.rows_mut().enumerate() {
            self.render_row(world, py, row, config);
        }

        image
    }
}

#[cfg(test)]
use crate::config::Sampling;

#[cfg(test)]
fn default_world_camera(hsize: usize, vsize: usize) -> Camera {
    let from = Tuple4D::point(0.0, 0.0, -5.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    Camera::new(hsize, vsize, std::f64::consts::PI / 2.0,
        Matrix4D::view_transform(from, to, up)).unwrap()
}

#[test]
fn pixel_size_for_horizontal_and_vertical_canvas() {
    let h = Camera::new(200, 125, std::f64::consts::PI / 2.0,
        Matrix4D::identity()).unwrap();
    let v = Camera::new(125, 200, std::f64::consts::PI / 2.0,
        Matrix4D::identity()).unwrap();

    assert!(crate::feq(h.pixel_size, 0.01));
    assert!(crate::feq(v.pixel_size, 0.01));
}

#[test]
fn camera_rejects_bad_construction() {
    let fov = std::f64::consts::PI / 2.0;

    assert!(matches!(Camera::new(0, 10, fov, Matrix4D::identity()),
        Err(Error::InvalidScene(_))));
    assert!(matches!(Camera::new(10, 10, fov, Matrix4D::scaling(0.0, 1.0, 1.0)),
        Err(Error::SingularTransform)));
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0,
        Matrix4D::identity()).unwrap();
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0,
        Matrix4D::identity()).unwrap();
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0,
        Matrix4D::rotation_y(std::f64::consts::PI / 4.0)
            * Matrix4D::translation(0.0, -2.0, 5.0)).unwrap();
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple4D::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction,
        Tuple4D::vector(2.0f64.sqrt() / 2.0, 0.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn offset_rays_stay_within_the_pixel() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0,
        Matrix4D::identity()).unwrap();
    let center = c.ray_for_pixel(100, 50);
    let corner = c.ray_for_pixel_offset(100, 50, 0.0, 0.0);

    assert_eq!(center, c.ray_for_pixel_offset(100, 50, 0.5, 0.5));

    // The top-left corner of the pixel is up and to the left of its center
    assert!(corner.direction.x > center.direction.x);
    assert!(corner.direction.y > center.direction.y);
}

#[test]
fn resize_keeps_field_of_view() {
    let mut c = Camera::new(200, 125, std::f64::consts::PI / 2.0,
        Matrix4D::identity()).unwrap();
    c.resize(400, 250).unwrap();

    assert_eq!((c.hsize, c.vsize), (400, 250));
    assert!(crate::feq(c.pixel_size, 0.005));
}

#[test]
fn render_world_with_camera() {
    let w = World::default();
    let c = default_world_camera(11, 11);
    let config = RenderConfig { parallel: false, ..Default::default() };

    let image = c.render(&w, &config);
    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn parallel_and_sequential_renders_match() {
    let w = World::default();
    let c = default_world_camera(16, 9);

    for &sampling in &[Sampling::Single, Sampling::Sixteen] {
        let sequential = c.render(&w,
            &RenderConfig { parallel: false, sampling, ..Default::default() });
        let parallel = c.render(&w,
            &RenderConfig { parallel: true, sampling, ..Default::default() });

        assert_eq!(sequential, parallel);
    }
}

#[test]
fn jittered_renders_are_repeatable() {
    let w = World::default();
    let c = default_world_camera(11, 11);
    let config = RenderConfig {
        sampling: Sampling::Sixteen,
        ..Default::default()
    };

    assert_eq!(c.pixel_color(&w, 5, 5, &config),
        c.pixel_color(&w, 5, 5, &config));
    assert_eq!(c.render(&w, &config), c.render(&w, &config));
}

#[test]
fn supersampling_averages_samples() {
    let w = World::default();
    let c = default_world_camera(11, 11);
    let config = RenderConfig {
        sampling: Sampling::Four,
        parallel: false,
        ..Default::default()
    };

    let manual = Sampling::Four.offsets(&mut pixel_rng(3, 4)).iter()
        .map(|&(dx, dy)| w.color_at(&c.ray_for_pixel_offset(3, 4, dx, dy), 5))
        .fold(Color::black(), |acc, c| acc + c) / 4.0;

    assert_eq!(c.pixel_color(&w, 3, 4, &config), manual);
}
