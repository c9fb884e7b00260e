// Push a fan of neutrons through an expanding m=2 guide and report what
// makes it out the far end.
//
// Run with: cargo run --example guide_demo
// Set RUST_LOG=debug for per-batch dispatch logging.

use neutron_guide::{Guide, Particle, ParticleBuffer};

fn main() -> Result<(), String> {
    env_logger::init();

    let guide = Guide::from_preset(0.02, 0.02, 0.03, 0.03, 1.0, "m2")?.with_name("demo_guide");

    // A fan of monochromatic neutrons entering just upstream of the guide
    // with a spread of transverse velocities.
    let mut buffer = ParticleBuffer::with_capacity(10_000);
    let n = 10_000;
    for i in 0..n {
        let f = (i as f64 / (n - 1) as f64) * 2.0 - 1.0; // -1 ..= 1
        buffer.push(Particle::new(
            [0.008 * f, -0.008 * f, -0.1],
            [30.0 * f, 15.0 * f, 600.0],
            0.0,
            1.0,
        ));
    }

    let summary = guide.process(buffer.as_mut_slice());
    println!(
        "{} particles: {} exited, {} escaped, {} absorbed, {} truncated",
        summary.total(),
        summary.exited,
        summary.escaped,
        summary.absorbed,
        summary.truncated
    );

    let survivors = buffer.retain_alive();
    let transmitted: f64 = buffer.as_slice().iter().map(|p| p.weight).sum();
    println!(
        "{} survivors, transmitted weight {:.1} ({:.1}% of incident)",
        survivors,
        transmitted,
        100.0 * transmitted / n as f64
    );

    if let Some(p) = buffer.as_slice().first() {
        println!(
            "first survivor: x={:+.5} y={:+.5} z={:.3} t={:.6}s weight={:.4}",
            p.position[0], p.position[1], p.position[2], p.time, p.weight
        );
    }
    Ok(())
}
