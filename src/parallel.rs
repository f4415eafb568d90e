use rayon::prelude::*;

use crate::world::World;
use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::config::RenderConfig;

/// Renders a world with one rayon task per image row.
///
/// The world and camera are only ever read, and each task writes a disjoint
/// row of the canvas, so no locking is needed. The result is identical to a
/// sequential render.
pub fn render(camera: &Camera, world: &World, config: &RenderConfig) -> Canvas {
    let mut image = Canvas::new(camera.hsize, camera.vsize);
    let width = image.width.max(1);

    image.pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(py, row)| camera.render_row(world, py, row, config));

    image
}
