use std::collections::VecDeque;

use rand::Rng;

use super::shape::Shape;
use super::surface::Surface;

/// Live shapes in creation order, capped with oldest-first eviction.
#[derive(Clone, Debug)]
pub struct ShapeRegistry {
    shapes: VecDeque<Shape>,
    capacity: usize,
}

impl ShapeRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            shapes: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a shape; if that overflows the cap the oldest one goes, however bright it still is.
    pub fn push(&mut self, shape: Shape) -> Option<Shape> {
        self.shapes.push_back(shape);
        if self.shapes.len() > self.capacity {
            self.shapes.pop_front()
        } else {
            None
        }
    }

    pub fn register_trigger<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        screen_width: u32,
        screen_height: u32,
    ) -> Option<Shape> {
        self.push(Shape::random(rng, screen_width, screen_height))
    }

    // fade everything, then drop whatever went fully transparent this frame
    pub fn update(&mut self) {
        self.shapes.retain_mut(|shape| shape.update());
    }

    pub fn draw(&self, surface: &mut Surface) {
        for shape in &self.shapes {
            shape.draw(surface);
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::shape::ShapeKind;
    use crate::shared::{MAX_SHAPES, PALETTE};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // x doubles as a creation index
    fn numbered(i: i32) -> Shape {
        Shape::new(i, 0, PALETTE[0], ShapeKind::Square, 50)
    }

    #[test]
    fn test_never_exceeds_cap() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut registry = ShapeRegistry::new(MAX_SHAPES);
        for i in 0..500 {
            registry.register_trigger(&mut rng, 800, 600);
            assert!(registry.len() <= 50);
            assert_eq!(registry.len(), (i + 1).min(50));
        }
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut registry = ShapeRegistry::new(MAX_SHAPES);
        let mut evicted = Vec::new();
        for i in 0..55 {
            if let Some(old) = registry.push(numbered(i)) {
                evicted.push(old.x);
            }
        }
        assert_eq!(evicted, vec![0, 1, 2, 3, 4]);
        let order: Vec<i32> = registry.iter().map(|s| s.x).collect();
        assert_eq!(order, (5..55).collect::<Vec<_>>());
    }

    #[test]
    fn test_eviction_ignores_alpha() {
        let mut registry = ShapeRegistry::new(2);
        let mut bright = numbered(0);
        bright.alpha = 255.0;
        registry.push(bright);
        let mut dim = numbered(1);
        dim.alpha = 1.0;
        registry.push(dim);
        let evicted = registry.push(numbered(2));
        assert_eq!(evicted.map(|s| s.x), Some(0));
    }

    #[test]
    fn test_update_prunes_invisible_shapes() {
        let mut registry = ShapeRegistry::new(MAX_SHAPES);
        let mut almost_gone = numbered(0);
        almost_gone.alpha = 0.5;
        registry.push(almost_gone);
        registry.push(numbered(1));
        registry.update();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().next().map(|s| s.alpha), Some(254.5));
    }

    #[test]
    fn test_shapes_vanish_after_510_frames() {
        let mut registry = ShapeRegistry::new(MAX_SHAPES);
        registry.push(numbered(0));
        for _ in 0..509 {
            registry.update();
        }
        assert_eq!(registry.len(), 1);
        registry.update();
        assert!(registry.is_empty());
    }
}
