use crate::shared::Rgb;

/// A small software raster the shapes paint into.
///
/// Drawing calls take logical pixel coordinates. Each raster sample covers a
/// `px_per_sample` square of logical pixels and is hit-tested at its centre,
/// so the same scene can be drawn onto terminals of any size.
#[derive(Clone, Debug)]
pub struct Surface {
    width: usize,
    height: usize,
    px_per_sample: f32,
    pixels: Vec<Rgb>,
}

impl Surface {
    pub fn new(width: usize, height: usize, px_per_sample: f32, background: Rgb) -> Self {
        Self {
            width,
            height,
            px_per_sample,
            pixels: vec![background; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        let r2 = radius * radius;
        self.fill_where(
            (cx - radius, cy - radius, cx + radius, cy + radius),
            |x, y| {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= r2
            },
            color,
            alpha,
        );
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb, alpha: f32) {
        self.fill_where(
            (x, y, x + w, y + h),
            |px, py| px >= x && px < x + w && py >= y && py < y + h,
            color,
            alpha,
        );
    }

    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgb, alpha: f32) {
        if points.len() < 3 {
            return;
        }
        let (mut x0, mut y0) = (f32::MAX, f32::MAX);
        let (mut x1, mut y1) = (f32::MIN, f32::MIN);
        for &(x, y) in points {
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
        self.fill_where((x0, y0, x1, y1), |x, y| contains(points, x, y), color, alpha);
    }

    // blend `color` into every sample whose centre passes `inside`, scanning only the bounding box
    fn fill_where(
        &mut self,
        (x0, y0, x1, y1): (f32, f32, f32, f32),
        inside: impl Fn(f32, f32) -> bool,
        color: Rgb,
        alpha: f32,
    ) {
        let a = (alpha / 255.0).clamp(0.0, 1.0);
        if a <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let (sx0, sx1) = self.sample_span(x0, x1, self.width);
        let (sy0, sy1) = self.sample_span(y0, y1, self.height);
        for sy in sy0..sy1 {
            let py = (sy as f32 + 0.5) * self.px_per_sample;
            for sx in sx0..sx1 {
                let px = (sx as f32 + 0.5) * self.px_per_sample;
                if inside(px, py) {
                    let i = sy * self.width + sx;
                    self.pixels[i] = blend(self.pixels[i], color, a);
                }
            }
        }
    }

    // samples whose centres may fall in [lo, hi], clipped to the raster
    fn sample_span(&self, lo: f32, hi: f32, limit: usize) -> (usize, usize) {
        let start = (lo / self.px_per_sample - 0.5).floor().max(0.0) as usize;
        let end = ((hi / self.px_per_sample - 0.5).ceil() + 1.0).max(0.0) as usize;
        (start.min(limit), end.min(limit))
    }
}

// source-over compositing of one colour channel set
pub fn blend(dst: Rgb, src: Rgb, a: f32) -> Rgb {
    let mix = |d: u8, s: u8| (s as f32 * a + d as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8;
    Rgb::new(mix(dst.r, src.r), mix(dst.g, src.g), mix(dst.b, src.b))
}

// even-odd rule
fn contains(points: &[(f32, f32)], x: f32, y: f32) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
