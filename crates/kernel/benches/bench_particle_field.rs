use std::hint::black_box;
use std::time::Instant;

use reactor_kernel::{
    CoreAnimator, EnergyState, ParticleConfig, ParticleField, Reactor, ReactorConfig, SceneGraph,
};

fn bench_particle_tick(count: usize, iterations: usize) {
    let config = ParticleConfig {
        count,
        ..ParticleConfig::default()
    };
    let mut field = ParticleField::with_seed(&config, 42).expect("bench config is valid");

    let start = Instant::now();
    for _ in 0..iterations {
        field.tick(black_box(1.0 / 60.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  particle tick ({count} particles, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_animate(iterations: usize) {
    let animator = CoreAnimator::default();
    let mut scene = SceneGraph::assembled();

    let start = Instant::now();
    for i in 0..iterations {
        let t = i as f32 / 60.0;
        let _ = black_box(animator.animate(&mut scene, black_box(65.0), t, 1.0 / 60.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  core animate ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_reactor_update(iterations: usize) {
    let energy = EnergyState::default();
    let mut reactor = Reactor::with_seed(&ReactorConfig::default(), energy.clone(), 7)
        .expect("default config is valid");

    let start = Instant::now();
    for i in 0..iterations {
        // Simulate the slider being dragged every few frames
        if i % 8 == 0 {
            energy.set((i % 101) as f32);
        }
        let t = i as f32 / 60.0;
        let _ = black_box(reactor.update(t, 1.0 / 60.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  reactor update ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Reactor Frame Benchmarks ===\n");

    println!("Particle field tick:");
    bench_particle_tick(2_000, 10_000);
    bench_particle_tick(20_000, 1_000);
    bench_particle_tick(200_000, 100);

    println!("\nCore animator:");
    bench_animate(100_000);

    println!("\nFull reactor update (default config):");
    bench_reactor_update(10_000);

    println!("\n=== Done ===");
}
