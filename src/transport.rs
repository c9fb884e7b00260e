// Single-particle transport through a tapered guide

use crate::geometry::GuideGeometry;
use crate::particle::Particle;
use crate::physics::MirrorCoating;
use crate::surface::Surface;
use nalgebra::Vector3;

/// Terminal state of one particle history.
///
/// `Truncated` marks a history stopped by the bounce cap (or a particle with
/// nowhere left to go); the particle keeps its last computed state and its
/// accumulated weight. It is reported distinctly so downstream logic never
/// mistakes it for a normal exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Left through the exit plane at z = length.
    Exited,
    /// Missed the entrance opening (or could never reach it); weight zeroed.
    Escaped,
    /// Probability weight driven to zero or below by reflection losses.
    Absorbed,
    /// Bounce cap exhausted mid-guide.
    Truncated,
}

/// Transport one particle through the guide, mutating it in place to its
/// terminal state.
///
/// The particle first flies in a straight line to the entrance plane z = 0.
/// Inside, each iteration finds the earliest reachable surface among the exit
/// plane and the four mirror walls (ties go to the earliest surface in
/// [`Surface::ALL`] order), advances there, and either leaves the guide or
/// reflects specularly while multiplying the weight by the coating
/// reflectivity at the event's momentum transfer.
pub fn propagate(
    geometry: &GuideGeometry,
    coating: &MirrorCoating,
    max_bounces: usize,
    particle: &mut Particle,
) -> Outcome {
    // Entry projection. A particle with no axial velocity never reaches the
    // entrance plane; treat the zero denominator as an escape, not a fault.
    let vz = particle.velocity[2];
    if vz == 0.0 {
        particle.weight = 0.0;
        return Outcome::Escaped;
    }
    let dt = -particle.position[2] / vz;
    particle.advance(dt);
    particle.position[2] = 0.0;
    if !geometry.inside_entrance(particle.position[0], particle.position[1]) {
        particle.weight = 0.0;
        return Outcome::Escaped;
    }

    let mut position = Vector3::from(particle.position);
    let mut velocity = Vector3::from(particle.velocity);
    let mut time = particle.time;
    let mut weight = particle.weight;

    let mut outcome = Outcome::Truncated;
    for _ in 0..max_bounces {
        let mut chosen: Option<(Surface, f64)> = None;
        for surface in Surface::ALL {
            if let Some(t) = surface.intersection_time(geometry, &position, &velocity) {
                match chosen {
                    Some((_, best)) if t >= best => {}
                    _ => chosen = Some((surface, t)),
                }
            }
        }
        // Only a particle with vanishing velocity has no reachable surface.
        let Some((surface, t)) = chosen else {
            break;
        };

        position += velocity * t;
        time += t;

        if let Some(q) = surface.reflect(geometry, &mut velocity) {
            weight *= coating.reflectivity(q);
            if weight <= 0.0 {
                outcome = Outcome::Absorbed;
                break;
            }
        } else {
            outcome = Outcome::Exited;
            break;
        }
    }

    particle.position = [position.x, position.y, position.z];
    particle.velocity = [velocity.x, velocity.y, velocity.z];
    particle.time = time;
    particle.weight = weight;
    outcome
}
