// Collaborator-side particle container
//
// Bridges the flat numeric interchange buffer (8 doubles per particle) and
// the typed particles the transport kernel works on, and owns the survivor
// compaction the kernel itself never performs.

use crate::particle::Particle;

/// Growable batch of particles with record conversion and compaction.
pub struct ParticleBuffer {
    particles: Vec<Particle>,
}

impl ParticleBuffer {
    pub fn new() -> Self {
        ParticleBuffer {
            particles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ParticleBuffer {
            particles: Vec::with_capacity(capacity),
        }
    }

    /// Decode a flat record buffer (length must be a multiple of
    /// [`Particle::RECORD_LEN`]).
    pub fn from_records(records: &[f64]) -> Result<Self, String> {
        if records.len() % Particle::RECORD_LEN != 0 {
            return Err(format!(
                "Record buffer length {} is not a multiple of {} doubles per particle",
                records.len(),
                Particle::RECORD_LEN
            ));
        }
        Ok(ParticleBuffer {
            particles: records
                .chunks(Particle::RECORD_LEN)
                .map(Particle::from_record)
                .collect(),
        })
    }

    /// Encode the whole batch into a flat record buffer.
    pub fn to_records(&self) -> Vec<f64> {
        self.particles
            .iter()
            .flat_map(|p| p.to_record())
            .collect()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Drop every particle whose weight has been driven to zero or below,
    /// keeping survivor order. Returns the number of survivors.
    pub fn retain_alive(&mut self) -> usize {
        self.particles.retain(Particle::is_alive);
        self.particles.len()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Default for ParticleBuffer {
    fn default() -> Self {
        Self::new()
    }
}
