//! Run a polarized beam through a three-unit stacked detector and
//! write the diagnostic store to `stacked_run.mott`.
//!
//! Exit code 0 on success; 1 on configuration or store failure.

use mott_engine::{RunCommand, RunConfig, TransportRun};
use mott_geometry::{GeometryConfig, GeometryVariant};
use mott_record::Histogram;
use mott_transport::{FoilScatterTransport, PencilBeam};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig {
        geometry: GeometryConfig {
            variant: GeometryVariant::StackedDetector,
            unit_count: 3,
            radiator_thickness: 3.2,
            ..GeometryConfig::default()
        },
        seed: 42,
        events: 100,
        energy_histogram: Some(Histogram::new(100, 0.0, 1000.0)?),
        ..RunConfig::default()
    };

    let transport = FoilScatterTransport::builder()
        .seed(config.seed)
        .analyzing_power(0.1)
        .build()?;
    let beam = PencilBeam::new(855.0, -90.0)?;

    let mut run = TransportRun::open(
        config,
        Box::new(transport),
        Box::new(beam),
        "stacked_run.mott",
    )?;
    run.apply_command(RunCommand::SetControlBits {
        modify_trajectory: true,
        reduce_2d: false,
    })?;

    let report = run.run()?;
    println!(
        "events={} tracks={} steps={} records={}",
        report.metrics.events_processed,
        report.metrics.tracks_processed,
        report.metrics.steps_processed,
        report.metrics.records_written,
    );
    println!(
        "final products: plus={:.6} minus={:.6}",
        report.final_state.asym_plus(),
        report.final_state.asym_minus(),
    );
    for (material, steps) in &report.metrics.steps_by_material {
        println!("  {material}: {steps} steps");
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("stacked_run failed: {e}");
        std::process::exit(1);
    }
}
