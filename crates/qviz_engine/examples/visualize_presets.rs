//! QVIZ Preset Walkthrough
//!
//! Presents every reference state to a coordinator, runs the frame loop for a
//! second each, and prints the summary plus a few animation readings.
//!
//! Run with `RUST_LOG=debug` to see session rebuilds and connection changes.

use anyhow::Result;
use qviz_core::PresetState;
use qviz_engine::prelude::*;

const FPS: f64 = 60.0;

fn main() -> Result<()> {
    env_logger::init();

    let config = VisualizerConfig::deterministic(42);
    println!("{}\n", config);

    let mut viz = VisualizationCoordinator::new(config)?;

    for preset in PresetState::ALL {
        println!("═══════════════════════════════════════════════════════════════");
        println!("  {}", preset);
        println!("═══════════════════════════════════════════════════════════════");

        let report = viz.present(preset.to_result()?)?;
        println!(
            "rebuilt={} connections +{} -{}",
            report.rebuilt, report.connections.created, report.connections.removed
        );

        for _ in 0..FPS as usize {
            viz.tick(1.0 / FPS);
        }

        println!("{}", viz.visualization_summary());
        for actor in viz.qubits() {
            let v = actor.visual();
            println!(
                "  q{} {:<13} dot=({:+.2}, {:+.2}, {:+.2}) scale={:.3} particles={}",
                actor.index(),
                actor.mode().to_string(),
                v.dot_offset.x,
                v.dot_offset.y,
                v.dot_offset.z,
                v.scale,
                actor.emitter().live_count()
            );
        }
        if let Some(camera) = viz.camera() {
            println!("  camera distance {:.2}", camera.distance());
        }
        println!("  live tasks: {}\n", viz.active_task_count());
    }

    // A failed backend response leaves the last visualization on screen
    let failed = r#"{"success": false, "error": "Simulation error: unknown gate"}"#;
    if let Err(err) = viz.present_json(failed) {
        println!("rejected: {}", err);
    }
    println!("still showing {} qubits", viz.qubit_count());

    viz.clear();
    println!("{}", viz.visualization_summary());
    Ok(())
}
