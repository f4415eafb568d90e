use std::convert::TryFrom;
use std::fmt;

use rand::{ Rng, SeedableRng, XorShiftRng };

use crate::consts::DEFAULT_RECURSION_DEPTH;
use crate::error::Error;

/// How many rays are traced through each pixel.
///
/// Supersampling splits each pixel into an `n`-by-`n` grid, traces one ray
/// through a random point of every grid cell, and averages their colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sampling {
    /// One ray, through the center of the pixel.
    Single,

    /// A 2x2 grid.
    Four,

    /// A 4x4 grid.
    Sixteen,
}

impl Default for Sampling {
    fn default() -> Sampling {
        Sampling::Single
    }
}

impl Sampling {
    pub fn rays_per_pixel(&self) -> usize {
        self.grid_size().pow(2)
    }

    /// The number of grid cells along each side of a pixel.
    pub fn grid_size(&self) -> usize {
        match self {
            Sampling::Single => 1,
            Sampling::Four => 2,
            Sampling::Sixteen => 4,
        }
    }

    /// Sub-pixel offsets of every ray, each in `[0, 1)`, in row-major order.
    ///
    /// Each offset is jittered within its own grid cell. A single ray always
    /// goes through the pixel center.
    ///
    /// ```
    /// # use whitted_tracer::config::{ pixel_rng, Sampling };
    /// let mut rng = pixel_rng(0, 0);
    /// assert_eq!(Sampling::Single.offsets(&mut rng), vec![(0.5, 0.5)]);
    /// assert_eq!(Sampling::Four.offsets(&mut rng).len(), 4);
    /// ```
    pub fn offsets<R: Rng>(&self, rng: &mut R) -> Vec<(f64, f64)> {
        if *self == Sampling::Single {
            return vec![(0.5, 0.5)];
        }

        let n = self.grid_size();
        let step = 1.0 / n as f64;

        let mut offsets = Vec::with_capacity(n * n);
        for j in 0..n {
            for i in 0..n {
                let dx: f64 = rng.gen();
                let dy: f64 = rng.gen();
                offsets.push(((i as f64 + dx) * step, (j as f64 + dy) * step));
            }
        }

        offsets
    }
}

/// The sample generator for pixel `(px, py)`.
///
/// The generator depends only on the pixel, so a pixel gets the same samples
/// however the image is split between threads.
pub fn pixel_rng(px: usize, py: usize) -> XorShiftRng {
    let a = splitmix(((px as u64) << 32) | (py as u64 & 0xffff_ffff));
    let b = splitmix(a);

    // XorShiftRng rejects an all-zero seed
    XorShiftRng::from_seed([
        a as u32 | 1,
        (a >> 32) as u32,
        b as u32,
        (b >> 32) as u32,
    ])
}

fn splitmix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

/// Only 1, 4 and 16 rays per pixel are supported.
impl TryFrom<usize> for Sampling {
    type Error = Error;

    fn try_from(rays: usize) -> Result<Sampling, Error> {
        match rays {
            1 => Ok(Sampling::Single),
            4 => Ok(Sampling::Four),
            16 => Ok(Sampling::Sixteen),
            n => Err(Error::InvalidSampling(n)),
        }
    }
}

impl fmt::Display for Sampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rays/pixel", self.rays_per_pixel())
    }
}

/// Settings for a single render.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Bounce budget for reflected and refracted rays.
    pub depth: usize,

    pub sampling: Sampling,

    /// Render rows concurrently.
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            depth: DEFAULT_RECURSION_DEPTH,
            sampling: Sampling::default(),
            parallel: true,
        }
    }
}

#[test]
fn sampling_accepts_only_square_grids() {
    assert_eq!(Sampling::try_from(1).unwrap(), Sampling::Single);
    assert_eq!(Sampling::try_from(4).unwrap(), Sampling::Four);
    assert_eq!(Sampling::try_from(16).unwrap(), Sampling::Sixteen);

    for &n in &[0, 2, 3, 9, 17] {
        assert!(matches!(Sampling::try_from(n), Err(Error::InvalidSampling(m))
            if m == n));
    }
}

#[test]
fn single_sample_is_the_pixel_center() {
    let mut rng = pixel_rng(7, 3);

    for _ in 0..4 {
        assert_eq!(Sampling::Single.offsets(&mut rng), vec![(0.5, 0.5)]);
    }
}

#[test]
fn jittered_samples_stay_in_their_cells() {
    for &sampling in &[Sampling::Four, Sampling::Sixteen] {
        let n = sampling.grid_size();
        let step = 1.0 / n as f64;

        for &(px, py) in &[(0, 0), (3, 4), (639, 479)] {
            let offsets = sampling.offsets(&mut pixel_rng(px, py));
            assert_eq!(offsets.len(), sampling.rays_per_pixel());

            for (k, &(x, y)) in offsets.iter().enumerate() {
                let (i, j) = ((k % n) as f64, (k / n) as f64);
                assert!(x >= i * step && x < (i + 1.0) * step);
                assert!(y >= j * step && y < (j + 1.0) * step);
            }
        }
    }
}

#[test]
fn jitter_depends_only_on_the_pixel() {
    let first = Sampling::Sixteen.offsets(&mut pixel_rng(12, 34));
    let again = Sampling::Sixteen.offsets(&mut pixel_rng(12, 34));
    let neighbour = Sampling::Sixteen.offsets(&mut pixel_rng(13, 34));

    assert_eq!(first, again);
    assert_ne!(first, neighbour);

    // Not stuck at the cell centres
    let centres: Vec<(f64, f64)> = (0..4)
        .flat_map(|j| (0..4).map(move |i|
            ((i as f64 + 0.5) / 4.0, (j as f64 + 0.5) / 4.0)))
        .collect();
    assert_ne!(first, centres);
}

#[test]
fn default_render_config() {
    let config = RenderConfig::default();

    assert_eq!(config.depth, 5);
    assert_eq!(config.sampling, Sampling::Single);
    assert!(config.parallel);
}
