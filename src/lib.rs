//! Neutron transport through tapered rectangular guides with supermirror
//! walls.
//!
//! A [`Guide`] is built once from its entrance/exit cross sections, length
//! and wall [`MirrorCoating`]; batches of [`Particle`]s are then pushed
//! through it in parallel, each history bouncing specularly off the four
//! tapered walls while its probability weight accumulates the
//! angle-dependent reflectivity of every bounce.

pub mod buffer;
pub mod config;
pub mod dispatch;
pub mod geometry;
pub mod guide;
pub mod particle;
pub mod physics;
pub mod settings;
pub mod surface;
pub mod transport;

pub use buffer::ParticleBuffer;
pub use config::Config;
pub use dispatch::{BatchSummary, Dispatcher, RayonDispatcher, SerialDispatcher};
pub use geometry::GuideGeometry;
pub use guide::Guide;
pub use particle::Particle;
pub use physics::{MirrorCoating, V2K};
pub use settings::{TransportSettings, DEFAULT_MAX_BOUNCES};
pub use surface::Surface;
pub use transport::{propagate, Outcome};
