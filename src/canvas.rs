use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::color::Color;
use crate::error::Result;

/// Maximum length of a line in a PPM file.
const PPM_LINE_WIDTH: usize = 70;

/// Maximum color value in a PPM file.
const PPM_MAX_VALUE: f64 = 255.0;

/// A canvas for drawing pixels.
///
/// This structure mostly stores the results of the ray tracer. Once the user
/// specifies the desired image width and height, the `Camera` generates rays
/// which are cast onto a `World`'s objects.
///
/// Colors are stored as they are computed, without clamping. Clamping happens
/// when the canvas is written out as a (plain text) PPM image.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened, row-major vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Every pixel, row by row.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Iterates over mutable rows of pixels, top to bottom.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, Color> {
        self.pixels.chunks_mut(self.width.max(1))
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. `y` is the row of the pixel and `x`
    /// is the column; both are zero-indexed.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use whitted_tracer::color::Color;
    /// # use whitted_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Serializes the canvas as a plain PPM (`P3`) image.
    ///
    /// Each channel is clamped to `[0, 1]` and scaled to `0..=255`. No line is
    /// longer than 70 characters; values which would overflow a line start a
    /// new one. The output ends with a newline.
    pub fn to_ppm(&self) -> String {
        let mut out = String::new();

        // Writing to a `String` never fails
        let _ = writeln!(out, "P3");
        let _ = writeln!(out, "{} {}", self.width, self.height);
        let _ = writeln!(out, "{}", PPM_MAX_VALUE);

        for row in self.pixels.chunks(self.width.max(1)) {
            let mut line = String::new();
            let values = row.iter().flat_map(|c| vec![c.r, c.g, c.b]);

            for v in values {
                let value = scale(v).to_string();

                if !line.is_empty()
                    && line.len() + 1 + value.len() > PPM_LINE_WIDTH {
                    out.push_str(&line);
                    out.push('\n');
                    line.clear();
                }

                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&value);
            }

            out.push_str(&line);
            out.push('\n');
        }

        out
    }

    /// Saves a canvas to a PPM file.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_ppm())?;
        Ok(())
    }
}

/// Maps a channel to an integer PPM value, `round(clamp(v, 0, 1) * 255)`.
fn scale(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * PPM_MAX_VALUE).round() as u8
}

#[test]
fn creating_a_canvas() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    assert!(c.pixels.iter().all(|p| *p == Color::black()));
}

#[test]
fn out_of_bounds_pixels() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, &Color::red());

    assert_eq!(c.read_pixel(2, 0), None);
    assert_eq!(c.read_pixel(0, 2), None);
    assert!(c.pixels.iter().all(|p| *p == Color::black()));
}

#[test]
fn ppm_header() {
    let c = Canvas::new(5, 3);
    let ppm = c.to_ppm();
    let header: Vec<&str> = ppm.lines().take(3).collect();

    assert_eq!(header, vec!["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data_is_clamped() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, &Color::rgb(-0.5, 0.0, 1.0));

    let ppm = c.to_ppm();
    let body: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(body, vec![
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_long_lines_are_split() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let ppm = c.to_ppm();
    let body: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(body, vec![
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
    ]);
    assert!(ppm.lines().all(|l| l.len() <= 70));
}

#[test]
fn ppm_ends_with_newline() {
    assert!(Canvas::new(5, 3).to_ppm().ends_with('\n'));
}
