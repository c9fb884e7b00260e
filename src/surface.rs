use crate::geometry::GuideGeometry;
use crate::physics::V2K;
use nalgebra::Vector3;

/// The five surfaces a particle inside the guide can reach next: the exit
/// plane and the four tapered mirror walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Exit,
    LeftVertical,
    RightVertical,
    LowerHorizontal,
    UpperHorizontal,
}

impl Surface {
    /// Candidate scan order. Ties on intersection time go to the earliest
    /// listed surface, with the exit plane checked first.
    pub const ALL: [Surface; 5] = [
        Surface::Exit,
        Surface::LeftVertical,
        Surface::RightVertical,
        Surface::LowerHorizontal,
        Surface::UpperHorizontal,
    ];

    pub fn is_mirror(&self) -> bool {
        !matches!(self, Surface::Exit)
    }

    /// Unnormalized inward normal of a mirror wall, `None` for the exit
    /// plane. The z component carries the taper: a wall moving outward by
    /// `half_taper` over the guide length tilts its normal accordingly.
    pub fn inward_normal(&self, geometry: &GuideGeometry) -> Option<Vector3<f64>> {
        let l = geometry.length;
        match self {
            Surface::Exit => None,
            Surface::LeftVertical => Some(Vector3::new(l, 0.0, geometry.half_taper_x)),
            Surface::RightVertical => Some(Vector3::new(-l, 0.0, geometry.half_taper_x)),
            Surface::LowerHorizontal => Some(Vector3::new(0.0, l, geometry.half_taper_y)),
            Surface::UpperHorizontal => Some(Vector3::new(0.0, -l, geometry.half_taper_y)),
        }
    }

    /// A fixed point on the plane, taken at the entrance cross section.
    fn anchor(&self, geometry: &GuideGeometry) -> Vector3<f64> {
        match self {
            Surface::Exit => Vector3::new(0.0, 0.0, geometry.length),
            Surface::LeftVertical => Vector3::new(-geometry.half_entrance_width, 0.0, 0.0),
            Surface::RightVertical => Vector3::new(geometry.half_entrance_width, 0.0, 0.0),
            Surface::LowerHorizontal => Vector3::new(0.0, -geometry.half_entrance_height, 0.0),
            Surface::UpperHorizontal => Vector3::new(0.0, geometry.half_entrance_height, 0.0),
        }
    }

    /// Candidate flight time to this surface.
    ///
    /// Returns `None` when the particle is not moving toward the surface or
    /// when the directional denominator is exactly zero, which counts as "no
    /// intersection" rather than a division fault. The exit plane is always
    /// directionally eligible (only a vanishing `vz` disqualifies it).
    /// Candidate times are not required to be positive; selection semantics
    /// are the caller's concern.
    pub fn intersection_time(
        &self,
        geometry: &GuideGeometry,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
    ) -> Option<f64> {
        match self.inward_normal(geometry) {
            None => {
                if velocity.z == 0.0 {
                    None
                } else {
                    Some((geometry.length - position.z) / velocity.z)
                }
            }
            Some(normal) => {
                let vdotn = velocity.dot(&normal);
                if vdotn >= 0.0 {
                    return None;
                }
                Some((self.anchor(geometry) - position).dot(&normal) / vdotn)
            }
        }
    }

    /// Specular reflection off this mirror wall: negate the velocity
    /// component along the inward normal and return the momentum transfer
    /// magnitude `q = 2 V2K |v·n| / |n|` in 1/angstrom.
    ///
    /// Returns `None` for the exit plane, which does not reflect.
    pub fn reflect(&self, geometry: &GuideGeometry, velocity: &mut Vector3<f64>) -> Option<f64> {
        let normal = self.inward_normal(geometry)?;
        let vdotn = velocity.dot(&normal);
        let norm_squared = normal.norm_squared();
        *velocity -= (2.0 * vdotn / norm_squared) * normal;
        Some(-2.0 * V2K * vdotn / norm_squared.sqrt())
    }
}
