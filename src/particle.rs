/// A neutron being transported through a guide.
///
/// `weight` is the statistical probability weight of the ensemble fraction
/// this particle represents. Reflection losses multiply it down; it never
/// increases. Once it drops to zero or below the particle counts as
/// absorbed (or escaped) and its position/velocity are no longer meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub time: f64,
    pub weight: f64,
}

impl Particle {
    /// Number of doubles in the flat interchange record:
    /// `x, y, z, vx, vy, vz, time, weight`.
    pub const RECORD_LEN: usize = 8;

    pub fn new(position: [f64; 3], velocity: [f64; 3], time: f64, weight: f64) -> Self {
        Self {
            position,
            velocity,
            time,
            weight,
        }
    }

    /// Straight-line flight for a time interval `dt`.
    pub fn advance(&mut self, dt: f64) {
        self.position[0] += self.velocity[0] * dt;
        self.position[1] += self.velocity[1] * dt;
        self.position[2] += self.velocity[2] * dt;
        self.time += dt;
    }

    /// Whether this particle still carries statistical weight.
    pub fn is_alive(&self) -> bool {
        self.weight > 0.0
    }

    /// Decode one particle from an 8-double record.
    pub fn from_record(record: &[f64]) -> Self {
        debug_assert_eq!(record.len(), Self::RECORD_LEN);
        Self {
            position: [record[0], record[1], record[2]],
            velocity: [record[3], record[4], record[5]],
            time: record[6],
            weight: record[7],
        }
    }

    /// Encode this particle into an 8-double record.
    pub fn to_record(&self) -> [f64; Self::RECORD_LEN] {
        [
            self.position[0],
            self.position[1],
            self.position[2],
            self.velocity[0],
            self.velocity[1],
            self.velocity[2],
            self.time,
            self.weight,
        ]
    }

    /// Encode this particle into a caller-provided 8-double record slot.
    pub fn write_record(&self, record: &mut [f64]) {
        debug_assert_eq!(record.len(), Self::RECORD_LEN);
        record.copy_from_slice(&self.to_record());
    }
}
