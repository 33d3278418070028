//! Render-facing views of the world.
//!
//! These are plain copies of simulation state for a drawing front end. Nothing
//! here draws; `Camera` only maps world coordinates to screen coordinates.

use crate::color::Color;
use crate::config::RenderConfig;
use crate::ecology::Bounds;
use crate::World;

/// Zoom factor applied per zoom step
pub const ZOOM_STEP: f64 = 1.1;

/// Lightweight view of a biome
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeView {
    pub name: String,
    pub bounds: Bounds,
    pub color: Color,
}

/// Lightweight view of a resource source
#[derive(Clone, Debug, PartialEq)]
pub struct SourceView {
    pub x: i32,
    pub y: i32,
    pub radius: f64,
}

/// Lightweight view of an individual
#[derive(Clone, Debug, PartialEq)]
pub struct IndividualView {
    pub id: u64,
    pub x: i32,
    pub y: i32,
    pub color: Color,
    pub radius: f64,
}

/// Everything needed to draw one frame
#[derive(Clone, Debug)]
pub struct FrameView {
    pub time: u64,
    pub width: i32,
    pub height: i32,
    pub biomes: Vec<BiomeView>,
    pub sources: Vec<SourceView>,
    pub individuals: Vec<IndividualView>,
}

impl FrameView {
    /// Create a frame from the current world state
    pub fn from_world(world: &World) -> Self {
        let env = &world.environment;

        let biomes = env
            .biomes
            .iter()
            .map(|b| BiomeView {
                name: b.name.clone(),
                bounds: b.bounds,
                color: b.color,
            })
            .collect();

        let sources = env
            .biomes
            .iter()
            .flat_map(|b| b.sources.iter())
            .map(|s| SourceView {
                x: s.x,
                y: s.y,
                radius: s.radius,
            })
            .collect();

        let radius = world.config.render.display_radius;
        let individuals = world
            .population
            .iter()
            .map(|ind| IndividualView {
                id: ind.id,
                x: ind.x(),
                y: ind.y(),
                color: ind.color(),
                radius,
            })
            .collect();

        Self {
            time: world.time,
            width: env.width,
            height: env.height,
            biomes,
            sources,
            individuals,
        }
    }
}

/// World-to-screen transform with zoom and pan state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    /// World coordinate shown at the screen origin
    pub offset: (f64, f64),
}

impl Camera {
    pub fn new(zoom: f64) -> Self {
        Self {
            zoom,
            offset: (0.0, 0.0),
        }
    }

    /// Zoom so the whole world fits on screen
    pub fn fit(render: &RenderConfig, width: i32, height: i32) -> Self {
        let zx = render.screen_width as f64 / width.max(1) as f64;
        let zy = render.screen_height as f64 / height.max(1) as f64;
        Self::new(zx.min(zy))
    }

    #[inline]
    pub fn world_to_screen(&self, x: f64, y: f64) -> (i32, i32) {
        (
            ((x - self.offset.0) * self.zoom) as i32,
            ((y - self.offset.1) * self.zoom) as i32,
        )
    }

    /// Screen radius, never below one pixel
    #[inline]
    pub fn radius_to_screen(&self, radius: f64) -> i32 {
        ((radius * self.zoom) as i32).max(1)
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.zoom /= ZOOM_STEP;
    }

    /// Pan by a drag of `(dx, dy)` screen pixels; the world follows the cursor.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if self.zoom <= 0.0 {
            return;
        }
        self.offset.0 -= dx / self.zoom;
        self.offset.1 -= dy / self.zoom;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}
