//! Pixel collision masks
//!
//! Hazard contact is tested per pixel rather than per bounding box, so a
//! player brushing the empty corner beside a spike's slope survives.
//! Each mask is a solid/empty bitmap sampled at pixel centers.

use glam::Vec2;

use super::rect::Rect;

/// Silhouette a mask is rasterized from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskShape {
    /// Every pixel solid
    Full,
    /// Upward-pointing triangle, apex at top center
    Spike,
    /// Ellipse inscribed in the rect
    Round,
}

/// A solid/empty bitmap
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMask {
    shape: MaskShape,
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl CollisionMask {
    /// Rasterize `shape` at the given pixel size
    pub fn new(shape: MaskShape, size: Vec2) -> Self {
        let (width, height) = pixel_size(size);
        let mut bits = Vec::with_capacity((width * height) as usize);

        for py in 0..height {
            for px in 0..width {
                // Normalized pixel center in [0, 1]
                let u = (px as f32 + 0.5) / width as f32;
                let v = (py as f32 + 0.5) / height as f32;
                let solid = match shape {
                    MaskShape::Full => true,
                    MaskShape::Spike => (u - 0.5).abs() * 2.0 <= v,
                    MaskShape::Round => {
                        let dx = (u - 0.5) * 2.0;
                        let dy = (v - 0.5) * 2.0;
                        dx * dx + dy * dy <= 1.0
                    }
                };
                bits.push(solid);
            }
        }

        Self {
            shape,
            width,
            height,
            bits,
        }
    }

    /// Whether this mask was rasterized from `shape` at `size`
    pub fn fits(&self, shape: MaskShape, size: Vec2) -> bool {
        self.shape == shape && (self.width, self.height) == pixel_size(size)
    }

    /// Whether the local pixel (x, y) is solid; out of bounds is empty
    pub fn is_solid(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.bits[(y as u64 * self.width as u64 + x as u64) as usize]
    }

    /// Solid pixel under a world-space point for a mask placed at `rect`
    fn solid_at(&self, rect: &Rect, world: Vec2) -> bool {
        let local = world - rect.pos;
        self.is_solid(local.x.floor() as i64, local.y.floor() as i64)
    }
}

/// Whole-pixel dimensions covering `size`, at least one pixel each way
fn pixel_size(size: Vec2) -> (u32, u32) {
    (size.x.ceil().max(1.0) as u32, size.y.ceil().max(1.0) as u32)
}

/// Pixel-precise overlap of two masks placed at their rects
///
/// Bounding boxes are checked first; only the shared region is scanned.
pub fn masks_overlap(a_rect: &Rect, a: &CollisionMask, b_rect: &Rect, b: &CollisionMask) -> bool {
    let Some(region) = a_rect.intersection(b_rect) else {
        return false;
    };

    let x0 = region.left().floor() as i64;
    let x1 = region.right().ceil() as i64;
    let y0 = region.top().floor() as i64;
    let y1 = region.bottom().ceil() as i64;

    for wy in y0..y1 {
        for wx in x0..x1 {
            let sample = Vec2::new(wx as f32 + 0.5, wy as f32 + 0.5);
            if a.solid_at(a_rect, sample) && b.solid_at(b_rect, sample) {
                return true;
            }
        }
    }
    false
}
