// Batch execution backends for particle transport
//
// Transport is embarrassingly parallel: every particle history is independent
// and the geometry/coating are read-only, so a batch can be partitioned at any
// grain without changing any outcome.

use crate::geometry::GuideGeometry;
use crate::particle::Particle;
use crate::physics::MirrorCoating;
use crate::transport::{propagate, Outcome};
use rayon::prelude::*;

/// Per-outcome counts for one processed batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub exited: usize,
    pub escaped: usize,
    pub absorbed: usize,
    pub truncated: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Exited => self.exited += 1,
            Outcome::Escaped => self.escaped += 1,
            Outcome::Absorbed => self.absorbed += 1,
            Outcome::Truncated => self.truncated += 1,
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.exited += other.exited;
        self.escaped += other.escaped;
        self.absorbed += other.absorbed;
        self.truncated += other.truncated;
        self
    }

    pub fn total(&self) -> usize {
        self.exited + self.escaped + self.absorbed + self.truncated
    }
}

/// A batch execution backend. Implementations must process every particle
/// exactly once and return only after the whole batch is done, so the caller
/// can immediately read back final states.
pub trait Dispatcher {
    fn transport_batch(
        &self,
        geometry: &GuideGeometry,
        coating: &MirrorCoating,
        max_bounces: usize,
        particles: &mut [Particle],
    ) -> BatchSummary;
}

/// Plain sequential loop. Reference backend; also the right choice for small
/// batches where pool overhead dominates.
pub struct SerialDispatcher;

impl Dispatcher for SerialDispatcher {
    fn transport_batch(
        &self,
        geometry: &GuideGeometry,
        coating: &MirrorCoating,
        max_bounces: usize,
        particles: &mut [Particle],
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();
        for particle in particles.iter_mut() {
            summary.record(propagate(geometry, coating, max_bounces, particle));
        }
        summary
    }
}

/// Data-parallel backend on the rayon pool, one particle per work item.
/// The `for_each`-style traversal joins before returning, which is the
/// synchronization barrier the caller relies on.
pub struct RayonDispatcher;

impl Dispatcher for RayonDispatcher {
    fn transport_batch(
        &self,
        geometry: &GuideGeometry,
        coating: &MirrorCoating,
        max_bounces: usize,
        particles: &mut [Particle],
    ) -> BatchSummary {
        particles
            .par_iter_mut()
            .map(|particle| propagate(geometry, coating, max_bounces, particle))
            .fold(BatchSummary::default, |mut summary, outcome| {
                summary.record(outcome);
                summary
            })
            .reduce(BatchSummary::default, BatchSummary::merge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::DEFAULT_MAX_BOUNCES;

    fn expanding_guide() -> GuideGeometry {
        GuideGeometry::new(0.02, 0.02, 0.03, 0.03, 1.0).unwrap()
    }

    fn mixed_batch() -> Vec<Particle> {
        vec![
            // On-axis, exits untouched.
            Particle::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], 0.0, 1.0),
            // Misses the opening.
            Particle::new([0.05, 0.0, -1.0], [0.0, 0.0, 1.0], 0.0, 1.0),
            // One shallow bounce, exits with weight R0.
            Particle::new([0.0, 0.0, 0.0], [0.03, 0.0, 1.0], 0.0, 1.0),
            // Steep bounce far above the cutoff, absorbed.
            Particle::new([0.0, 0.0, 0.0], [50.0, 0.0, 200.0], 0.0, 1.0),
        ]
    }

    #[test]
    fn test_empty_batch_is_a_noop() {
        let g = expanding_guide();
        let coating = MirrorCoating::default();
        let mut particles: Vec<Particle> = Vec::new();
        let summary =
            RayonDispatcher.transport_batch(&g, &coating, DEFAULT_MAX_BOUNCES, &mut particles);
        assert_eq!(summary, BatchSummary::default());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_summary_counts_every_particle() {
        let g = expanding_guide();
        let coating = MirrorCoating::default();
        let mut particles = mixed_batch();
        let summary =
            SerialDispatcher.transport_batch(&g, &coating, DEFAULT_MAX_BOUNCES, &mut particles);
        assert_eq!(summary.total(), particles.len());
        assert_eq!(summary.exited, 2);
        assert_eq!(summary.escaped, 1);
        assert_eq!(summary.absorbed, 1);
        assert_eq!(summary.truncated, 0);
    }

    #[test]
    fn test_serial_and_rayon_backends_agree() {
        let g = expanding_guide();
        let coating = MirrorCoating::default();
        let mut serial = mixed_batch();
        let mut parallel = mixed_batch();
        let s1 = SerialDispatcher.transport_batch(&g, &coating, DEFAULT_MAX_BOUNCES, &mut serial);
        let s2 = RayonDispatcher.transport_batch(&g, &coating, DEFAULT_MAX_BOUNCES, &mut parallel);
        assert_eq!(s1, s2);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_summary_merge() {
        let a = BatchSummary {
            exited: 1,
            escaped: 2,
            absorbed: 3,
            truncated: 4,
        };
        let b = BatchSummary {
            exited: 10,
            escaped: 20,
            absorbed: 30,
            truncated: 40,
        };
        let merged = a.merge(b);
        assert_eq!(merged.exited, 11);
        assert_eq!(merged.escaped, 22);
        assert_eq!(merged.absorbed, 33);
        assert_eq!(merged.truncated, 44);
        assert_eq!(merged.total(), 110);
    }
}
