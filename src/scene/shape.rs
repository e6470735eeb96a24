use rand::Rng;
use rand::seq::SliceRandom;

use super::surface::Surface;
use crate::shared::{FADE_PER_FRAME, MAX_SHAPE_SIZE, MIN_SHAPE_SIZE, PALETTE, Rgb};

pub const OPAQUE: f32 = 255.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];
}

/// One glyph on screen, fading out a little every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub x: i32,
    pub y: i32,
    pub color: Rgb,
    pub kind: ShapeKind,
    pub size: i32,
    pub alpha: f32,
    pub fade_rate: f32,
}

impl Shape {
    pub fn new(x: i32, y: i32, color: Rgb, kind: ShapeKind, size: i32) -> Self {
        Self {
            x,
            y,
            color,
            kind,
            size,
            alpha: OPAQUE,
            fade_rate: FADE_PER_FRAME,
        }
    }

    // random position anywhere on screen (edges included), colour, kind and size
    pub fn random<R: Rng + ?Sized>(rng: &mut R, screen_width: u32, screen_height: u32) -> Self {
        let x = rng.gen_range(0..=screen_width as i32);
        let y = rng.gen_range(0..=screen_height as i32);
        let color = *PALETTE.choose(rng).unwrap_or(&PALETTE[0]);
        let kind = *ShapeKind::ALL.choose(rng).unwrap_or(&ShapeKind::Circle);
        let size = rng.gen_range(MIN_SHAPE_SIZE..=MAX_SHAPE_SIZE);
        Self::new(x, y, color, kind, size)
    }

    /// Fade one frame. Returns whether the shape is still visible.
    pub fn update(&mut self) -> bool {
        self.alpha = (self.alpha - self.fade_rate).max(0.0);
        self.is_visible()
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0
    }

    pub fn draw(&self, surface: &mut Surface) {
        let (x, y, size) = (self.x as f32, self.y as f32, self.size as f32);
        let half = (self.size / 2) as f32;
        match self.kind {
            ShapeKind::Circle => surface.fill_circle(x, y, size, self.color, self.alpha),
            ShapeKind::Square => surface.fill_rect(x - half, y - half, size, size, self.color, self.alpha),
            ShapeKind::Triangle => {
                let points = [(x, y - half), (x - half, y + half), (x + half, y + half)];
                surface.fill_polygon(&points, self.color, self.alpha);
            }
        }
    }
}
