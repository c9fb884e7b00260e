// Supermirror reflectivity physics for guide transport

use serde::{Deserialize, Serialize};

/// Conversion from neutron velocity (m/s) to wavevector magnitude (1/angstrom).
/// Reciprocal of K2V = 629.622368 m/s per 1/angstrom.
pub const V2K: f64 = 1.58825361e-3;

/// Supermirror coating parameters for an angle-dependent reflectivity model.
///
/// The defaults are the standard m=2 supermirror values used by guide
/// components: `R0=0.99, Qc=0.0219, alpha=6.07, m=2, W=0.003` with Qc and W
/// in 1/angstrom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MirrorCoating {
    /// Low-angle (baseline) reflectivity.
    pub r0: f64,
    /// Critical scattering vector, 1/angstrom.
    pub qc: f64,
    /// Slope of the reflectivity falloff above the critical edge.
    pub alpha: f64,
    /// m-value of the coating; 0 means complete absorption above Qc.
    pub m: f64,
    /// Width of the supermirror cutoff, 1/angstrom.
    pub w: f64,
}

impl Default for MirrorCoating {
    fn default() -> Self {
        Self {
            r0: 0.99,
            qc: 0.0219,
            alpha: 6.07,
            m: 2.0,
            w: 0.003,
        }
    }
}

impl MirrorCoating {
    pub fn new(r0: f64, qc: f64, alpha: f64, m: f64, w: f64) -> Self {
        Self { r0, qc, alpha, m, w }
    }

    /// Check the coating parameters are physically usable.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.r0.is_finite() && self.qc.is_finite() && self.alpha.is_finite())
            || !(self.m.is_finite() && self.w.is_finite())
        {
            return Err("Mirror coating parameters must be finite".to_string());
        }
        if !(0.0..=1.0).contains(&self.r0) {
            return Err(format!("R0 must be in [0, 1], got {}", self.r0));
        }
        if self.qc < 0.0 {
            return Err(format!("Qc must be non-negative, got {}", self.qc));
        }
        if self.m < 0.0 {
            return Err(format!("m must be non-negative, got {}", self.m));
        }
        if self.w <= 0.0 {
            return Err(format!("W must be positive, got {}", self.w));
        }
        Ok(())
    }

    /// Reflectivity for a reflection with momentum transfer magnitude `q`
    /// (1/angstrom, non-negative).
    ///
    /// Below the critical edge the full baseline reflectivity applies; above
    /// it the tanh cutoff and the linear slope take over. The formula is not
    /// clamped to [0, 1]: for extreme `alpha` or `q` the product can go
    /// negative, which drives the particle weight straight past zero and ends
    /// its history on the next absorption check.
    pub fn reflectivity(&self, q: f64) -> f64 {
        let mut r = self.r0;
        if q > self.qc {
            r *= (1.0 - ((q - self.m * self.qc) / self.w).tanh())
                * (1.0 - self.alpha * (q - self.qc))
                / 2.0;
        }
        r
    }
}
