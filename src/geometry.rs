use serde::{Deserialize, Serialize};

/// Immutable geometry of a tapered rectangular guide, derived once from the
/// entrance/exit cross sections and the length.
///
/// The guide is centered on the z axis with the entrance at z = 0 and the
/// exit at z = `length`. Each side wall moves outward (or inward, for a
/// converging guide) linearly with z; `half_taper_x` is half the difference
/// between exit and entrance width, i.e. how far one vertical wall has moved
/// by the time it reaches the exit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideGeometry {
    pub half_taper_x: f64,
    pub half_taper_y: f64,
    pub half_entrance_width: f64,
    pub half_entrance_height: f64,
    pub length: f64,
}

impl GuideGeometry {
    /// Derive the geometry from entrance width/height `w1`/`h1`, exit
    /// width/height `w2`/`h2` and guide length `l` (all in meters).
    pub fn new(w1: f64, h1: f64, w2: f64, h2: f64, l: f64) -> Result<Self, String> {
        for (name, value) in [("w1", w1), ("h1", h1), ("w2", w2), ("h2", h2), ("l", l)] {
            if !value.is_finite() {
                return Err(format!("Guide dimension {} must be finite, got {}", name, value));
            }
        }
        if l <= 0.0 {
            return Err(format!("Guide length must be positive, got {}", l));
        }
        if w1 <= 0.0 || h1 <= 0.0 {
            return Err(format!(
                "Guide entrance must have positive width and height, got w1={}, h1={}",
                w1, h1
            ));
        }
        if w2 < 0.0 || h2 < 0.0 {
            return Err(format!(
                "Guide exit dimensions must be non-negative, got w2={}, h2={}",
                w2, h2
            ));
        }
        Ok(Self {
            half_taper_x: 0.5 * (w2 - w1),
            half_taper_y: 0.5 * (h2 - h1),
            half_entrance_width: 0.5 * w1,
            half_entrance_height: 0.5 * h1,
            length: l,
        })
    }

    /// Half width of the guide opening at depth `z`.
    pub fn half_width_at(&self, z: f64) -> f64 {
        self.half_entrance_width + self.half_taper_x * z / self.length
    }

    /// Half height of the guide opening at depth `z`.
    pub fn half_height_at(&self, z: f64) -> f64 {
        self.half_entrance_height + self.half_taper_y * z / self.length
    }

    /// Whether `(x, y)` lies strictly inside the entrance rectangle.
    /// The boundary itself counts as outside.
    pub fn inside_entrance(&self, x: f64, y: f64) -> bool {
        x > -self.half_entrance_width
            && x < self.half_entrance_width
            && y > -self.half_entrance_height
            && y < self.half_entrance_height
    }
}
