use crate::config::Config;
use crate::dispatch::{BatchSummary, Dispatcher, RayonDispatcher, SerialDispatcher};
use crate::geometry::GuideGeometry;
use crate::particle::Particle;
use crate::physics::MirrorCoating;
use crate::settings::TransportSettings;
use crate::transport::propagate;
use rayon::prelude::*;

/// A straight tapered rectangular guide with supermirror walls.
///
/// The guide is centered on the z axis with its entrance at z = 0. Geometry
/// and coating are fixed at construction; batches of particles are then
/// pushed through with [`Guide::process`] or, for flat interchange buffers,
/// [`Guide::process_records`].
#[derive(Debug, Clone)]
pub struct Guide {
    pub name: Option<String>,
    geometry: GuideGeometry,
    coating: MirrorCoating,
    settings: TransportSettings,
}

impl Guide {
    /// Build a guide from entrance width/height `w1`/`h1`, exit width/height
    /// `w2`/`h2`, length `l` (meters) and a wall coating.
    pub fn new(
        w1: f64,
        h1: f64,
        w2: f64,
        h2: f64,
        l: f64,
        coating: MirrorCoating,
    ) -> Result<Self, String> {
        let geometry = GuideGeometry::new(w1, h1, w2, h2, l)?;
        coating.validate()?;
        Ok(Self {
            name: None,
            geometry,
            coating,
            settings: TransportSettings::default(),
        })
    }

    /// Build a guide using a named coating preset from the global [`Config`].
    pub fn from_preset(
        w1: f64,
        h1: f64,
        w2: f64,
        h2: f64,
        l: f64,
        preset: &str,
    ) -> Result<Self, String> {
        let coating = Config::global()
            .get_coating(preset)
            .ok_or_else(|| format!("Unknown coating preset '{}'", preset))?;
        Self::new(w1, h1, w2, h2, l, coating)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_settings(mut self, settings: TransportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn geometry(&self) -> &GuideGeometry {
        &self.geometry
    }

    pub fn coating(&self) -> &MirrorCoating {
        &self.coating
    }

    pub fn settings(&self) -> &TransportSettings {
        &self.settings
    }

    /// Transport a batch of particles through the guide, mutating each one in
    /// place to its terminal state. Returns per-outcome counts. The caller is
    /// responsible for filtering out particles whose final weight is <= 0
    /// before passing the batch downstream (see
    /// [`ParticleBuffer::retain_alive`](crate::buffer::ParticleBuffer::retain_alive)).
    pub fn process(&self, particles: &mut [Particle]) -> BatchSummary {
        log::debug!(
            "guide {}: transporting {} particles",
            self.name.as_deref().unwrap_or("<unnamed>"),
            particles.len()
        );
        let summary = if self.settings.parallel {
            self.process_with(&RayonDispatcher, particles)
        } else {
            self.process_with(&SerialDispatcher, particles)
        };
        log::debug!(
            "guide {}: {} exited, {} escaped, {} absorbed, {} truncated",
            self.name.as_deref().unwrap_or("<unnamed>"),
            summary.exited,
            summary.escaped,
            summary.absorbed,
            summary.truncated
        );
        summary
    }

    /// Transport a batch through a caller-chosen execution backend.
    pub fn process_with<D: Dispatcher>(
        &self,
        dispatcher: &D,
        particles: &mut [Particle],
    ) -> BatchSummary {
        dispatcher.transport_batch(
            &self.geometry,
            &self.coating,
            self.settings.max_bounces,
            particles,
        )
    }

    /// Transport a flat buffer of 8-double particle records
    /// (`x, y, z, vx, vy, vz, time, weight` per particle), mutated in place.
    /// The buffer length must be a multiple of [`Particle::RECORD_LEN`].
    pub fn process_records(&self, records: &mut [f64]) -> Result<BatchSummary, String> {
        if records.len() % Particle::RECORD_LEN != 0 {
            return Err(format!(
                "Record buffer length {} is not a multiple of {} doubles per particle",
                records.len(),
                Particle::RECORD_LEN
            ));
        }
        let transport_one = |chunk: &mut [f64]| {
            let mut particle = Particle::from_record(chunk);
            let outcome = propagate(
                &self.geometry,
                &self.coating,
                self.settings.max_bounces,
                &mut particle,
            );
            particle.write_record(chunk);
            outcome
        };
        let summary = if self.settings.parallel {
            records
                .par_chunks_mut(Particle::RECORD_LEN)
                .map(transport_one)
                .fold(BatchSummary::default, |mut summary, outcome| {
                    summary.record(outcome);
                    summary
                })
                .reduce(BatchSummary::default, BatchSummary::merge)
        } else {
            let mut summary = BatchSummary::default();
            for chunk in records.chunks_mut(Particle::RECORD_LEN) {
                summary.record(transport_one(chunk));
            }
            summary
        };
        Ok(summary)
    }
}
