//! End-to-end scenarios: asymmetry accumulation, control bits across
//! events, watched-material recording, and store readback.

use mott_core::{EventId, TrackId, Vec3};
use mott_engine::{RunCommand, RunConfig, TransportRun};
use mott_geometry::{GeometryConfig, GeometryVariant};
use mott_record::StoreReader;
use mott_test_utils::{FixedBeam, ScriptedStep, ScriptedTransport};
use mott_transport::{FoilScatterTransport, PencilBeam, StraightLineTransport};

/// One event, two steps: A1 = 0.5 in watched `radiatorMat`, A2 = -0.2
/// in the unwatched world filler. The products fold both asymmetries;
/// the store holds exactly one row, for the watched-material step.
#[test]
fn two_step_event_products_and_single_row() {
    // MinimalDetector with a 2 mm radiator: the radiator spans
    // z in [-9.75, -7.75], the detector starts at z = -2.75. A beam
    // starting at z = -9.0 with 5 mm steps does step 1 in the radiator
    // and step 2 in the vacuum between the elements.
    let config = RunConfig {
        geometry: GeometryConfig {
            variant: GeometryVariant::MinimalDetector,
            radiator_thickness: 2.0,
            ..GeometryConfig::default()
        },
        watched_materials: vec!["radiatorMat".to_string(), "detectorMat".to_string()],
        step_hint: 5.0,
        events: 1,
        ..RunConfig::default()
    };

    let mut buf = Vec::new();
    let report = {
        let mut run = TransportRun::new(
            config,
            Box::new(ScriptedTransport::new(vec![
                ScriptedStep::scatter(0.5),
                ScriptedStep::last_scatter(-0.2),
            ])),
            Box::new(FixedBeam::new(Vec3::new(0.0, 0.0, -9.0), 855.0)),
            &mut buf,
        )
        .unwrap();
        run.run().unwrap()
    };

    assert!((report.final_state.asym_plus() - 1.2).abs() < 1e-12);
    assert!((report.final_state.asym_minus() - 0.6).abs() < 1e-12);
    assert_eq!(report.metrics.steps_processed, 2);
    assert_eq!(report.metrics.records_written, 1);

    let rows = StoreReader::open(buf.as_slice()).unwrap().records().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].material, "radiatorMat");
    assert_eq!(rows[0].event, EventId(0));
    assert_eq!(rows[0].track, TrackId::PRIMARY);
    assert_eq!(rows[0].parent, TrackId::NONE);
    assert_eq!(rows[0].pre_total_energy, 855.0);
}

/// Control bits written between runs hold for every event of the run,
/// and the products still reset to identity each event.
#[test]
fn control_bits_persist_across_all_events() {
    let config = RunConfig {
        events: 3,
        ..RunConfig::default()
    };

    let mut buf = Vec::new();
    let mut run = TransportRun::new(
        config,
        Box::new(ScriptedTransport::new(vec![ScriptedStep::last_scatter(0.1); 3])),
        Box::new(FixedBeam::new(Vec3::new(0.0, 0.0, -40.0), 855.0)),
        &mut buf,
    )
    .unwrap();

    run.apply_command(RunCommand::SetControlBits {
        modify_trajectory: true,
        reduce_2d: false,
    })
    .unwrap();

    for _ in 0..3 {
        run.simulate_event().unwrap();
        // Observed at the event boundary: bits survive the reset...
        assert_eq!(run.state().control().as_raw(), 1);
        assert_eq!(run.state().to_slots()[3], 1.0);
    }
    let report = run.finish().unwrap();
    assert_eq!(report.metrics.events_processed, 3);
    // ...and the last event's product reflects only its own step.
    assert!((report.final_state.asym_plus() - 1.1).abs() < 1e-12);
}

/// A straight-line traversal of the stacked layout records rows for
/// watched materials only, and the store round-trips them.
#[test]
fn stacked_traversal_records_watched_materials_only() {
    let config = RunConfig {
        geometry: GeometryConfig {
            variant: GeometryVariant::StackedDetector,
            unit_count: 2,
            ..GeometryConfig::default()
        },
        seed: 99,
        events: 1,
        ..RunConfig::default()
    };

    let mut buf = Vec::new();
    let report = {
        let mut run = TransportRun::new(
            config,
            Box::new(StraightLineTransport::new()),
            Box::new(PencilBeam::new(855.0, -70.0).unwrap()),
            &mut buf,
        )
        .unwrap();
        run.run().unwrap()
    };

    let reader = StoreReader::open(buf.as_slice()).unwrap();
    assert_eq!(reader.header().seed, 99);
    let rows = reader.records().unwrap();

    assert!(!rows.is_empty(), "the beam crosses watched material");
    assert_eq!(rows.len() as u64, report.metrics.records_written);
    for row in &rows {
        assert!(
            row.material == "radiatorMat" || row.material == "detectorMat",
            "unwatched material '{}' was recorded",
            row.material
        );
    }
    // The beam also stepped through unwatched vacuum.
    assert!(report.metrics.steps_in("Vacuum") > 0);
    assert!((report.metrics.steps_processed as usize) > rows.len());
}

/// Identical seeds produce identical stores and final state.
#[test]
fn seeded_runs_are_deterministic() {
    let run_once = || {
        let config = RunConfig {
            geometry: GeometryConfig {
                variant: GeometryVariant::StackedDetector,
                unit_count: 2,
                ..GeometryConfig::default()
            },
            seed: 42,
            events: 2,
            ..RunConfig::default()
        };
        let mut buf = Vec::new();
        let report = {
            let mut run = TransportRun::new(
                config,
                Box::new(
                    FoilScatterTransport::builder()
                        .seed(42)
                        .analyzing_power(0.1)
                        .build()
                        .unwrap(),
                ),
                Box::new(PencilBeam::new(855.0, -70.0).unwrap()),
                &mut buf,
            )
            .unwrap();
            run.run().unwrap()
        };
        let rows = StoreReader::open(buf.as_slice()).unwrap().records().unwrap();
        (rows, report.final_state.to_slots())
    };

    let (rows_a, slots_a) = run_once();
    let (rows_b, slots_b) = run_once();
    assert_eq!(rows_a, rows_b);
    assert_eq!(slots_a, slots_b);
}
