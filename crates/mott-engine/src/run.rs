//! The synchronous run driver.
//!
//! [`TransportRun`] owns the geometry model, the shared physics state,
//! the boxed transport engine and primary generator, and the step
//! recorder. It executes one event at a time, one track at a time, one
//! step at a time; within a step, the transport engine mutates the
//! shared state before the recorder observes the step, matching the
//! ordering guarantee the recording contract relies on.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mott_core::{
    ControlBits, EventId, EventPhysicsState, MaterialRegistry, Step, TrackId, TransportError,
};
use mott_geometry::GeometryModel;
use mott_record::{StepRecorder, StoreError, StoreHeader, StoreWriter};
use mott_transport::{
    PrimaryGenerator, StepContext, TrackSeed, TrackStatus, TransportEngine,
};

use crate::command::RunCommand;
use crate::config::{ConfigError, RunConfig};
use crate::lifecycle::{RunState, RunStateError};
use crate::metrics::RunMetrics;

/// Errors raised while a run is executing.
///
/// Per-step and per-event processing has no recoverable error path: any
/// of these is fatal for the run. The store is still released on the
/// way out (the recorder flushes on drop).
#[derive(Debug)]
pub enum RunError {
    /// The transport engine failed.
    Transport(TransportError),
    /// The diagnostic store failed.
    Store(StoreError),
    /// The lifecycle was driven through an illegal transition.
    State(RunStateError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::State(e) => write!(f, "lifecycle: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::State(e) => Some(e),
        }
    }
}

impl From<TransportError> for RunError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<StoreError> for RunError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<RunStateError> for RunError {
    fn from(e: RunStateError) -> Self {
        Self::State(e)
    }
}

/// What a completed run hands back.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Counters accumulated over the run.
    pub metrics: RunMetrics,
    /// The shared physics state as the last event left it.
    pub final_state: EventPhysicsState,
}

/// Synchronous simulation run.
///
/// Created from a [`RunConfig`] via [`new()`](TransportRun::new) (any
/// `Write` sink) or [`open()`](TransportRun::open) (file-backed store).
/// Construction validates the configuration, builds the geometry, and
/// creates the store — failing fast on any of the three, before any
/// event is processed.
///
/// # Example
///
/// ```ignore
/// let mut run = TransportRun::open(config, transport, generator, "run.mott")?;
/// run.apply_command(RunCommand::SetControlBits { modify_trajectory: true, reduce_2d: false })?;
/// let report = run.run()?;
/// println!("{} records", report.metrics.records_written);
/// ```
pub struct TransportRun<W: Write> {
    config: RunConfig,
    geometry: GeometryModel,
    state: EventPhysicsState,
    transport: Box<dyn TransportEngine>,
    generator: Box<dyn PrimaryGenerator>,
    recorder: StepRecorder<W>,
    lifecycle: RunState,
    metrics: RunMetrics,
    next_event: u64,
}

impl<W: Write> TransportRun<W> {
    /// Validate `config`, build the geometry, and create the store on
    /// `sink`.
    pub fn new(
        config: RunConfig,
        transport: Box<dyn TransportEngine>,
        generator: Box<dyn PrimaryGenerator>,
        sink: W,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let geometry = GeometryModel::new(config.geometry, MaterialRegistry::reference())?;

        let header = StoreHeader {
            seed: config.seed,
            watched: config.watched_materials.clone(),
        };
        let writer = StoreWriter::create(sink, &header)?;
        let mut recorder =
            StepRecorder::new(writer, config.watched_materials.iter().cloned());
        if let Some(histogram) = config.energy_histogram.clone() {
            recorder = recorder.with_energy_histogram(histogram);
        }

        Ok(Self {
            config,
            geometry,
            state: EventPhysicsState::new(),
            transport,
            generator,
            recorder,
            // Construction IS the Uninitialized -> GeometryReady edge.
            lifecycle: RunState::GeometryReady,
            metrics: RunMetrics::default(),
            next_event: 0,
        })
    }

    /// Apply a reconfiguration command. Legal only between runs or at
    /// event boundaries, never mid-step.
    pub fn apply_command(&mut self, command: RunCommand) -> Result<(), ConfigError> {
        if self.lifecycle == RunState::EventInProgress {
            return Err(ConfigError::CommandDuringEvent);
        }
        match command {
            RunCommand::SetUnitCount(unit_count) => {
                self.geometry.set_unit_count(unit_count)?;
                self.config.geometry = *self.geometry.config();
                self.metrics.geometry_rebuilds += 1;
            }
            RunCommand::SetRadiatorThickness(thickness) => {
                self.geometry.set_radiator_thickness(thickness)?;
                self.config.geometry = *self.geometry.config();
                self.metrics.geometry_rebuilds += 1;
            }
            RunCommand::SetStepHint(hint) => {
                if !hint.is_finite() || hint <= 0.0 {
                    return Err(ConfigError::InvalidStepHint { value: hint });
                }
                self.config.step_hint = hint;
            }
            RunCommand::SetControlBits {
                modify_trajectory,
                reduce_2d,
            } => {
                self.state
                    .set_control(ControlBits::from_flags(modify_trajectory, reduce_2d));
            }
        }
        Ok(())
    }

    /// Simulate one event: reset the shared state, generate the
    /// primary, and step every track (primary plus secondaries) until
    /// it stops or leaves the world.
    pub fn simulate_event(&mut self) -> Result<EventId, RunError> {
        self.lifecycle = self.lifecycle.advance(RunState::EventInProgress)?;
        let event = EventId(self.next_event);
        self.next_event += 1;

        // Reset-on-event-start: products to identity, control bits kept.
        self.state.begin_event();

        let primary = self.generator.generate(event);
        let mut stack: Vec<(TrackId, TrackId, TrackSeed)> =
            vec![(TrackId::PRIMARY, TrackId::NONE, primary)];
        let mut next_track = TrackId::PRIMARY.0 + 1;

        while let Some((track, parent, seed)) = stack.pop() {
            self.metrics.tracks_processed += 1;
            let mut point = seed.point;

            for _ in 0..self.config.max_steps_per_track {
                let Some(material_name) = self.geometry.root().material_at(point.position)
                else {
                    // Track left the world volume.
                    break;
                };
                let material = self
                    .geometry
                    .materials()
                    .get(material_name)
                    .ok_or_else(|| TransportError::ExecutionFailed {
                        reason: format!("material '{material_name}' missing from registry"),
                    })?;

                let ctx = StepContext::new(
                    material,
                    point,
                    self.config.step_hint,
                    event,
                    track,
                );
                // Transport mutates the shared state first; only then
                // does the recorder observe the step.
                let outcome = self.transport.transport(&ctx, &mut self.state)?;

                let step = Step {
                    pre: point,
                    post: outcome.post,
                };
                self.metrics.steps_processed += 1;
                self.metrics.count_material_step(material_name);
                self.recorder
                    .record_step(event, track, parent, material_name, &step, seed.pdg);

                for secondary in outcome.secondaries {
                    stack.push((TrackId(next_track), track, secondary));
                    next_track += 1;
                }

                point = outcome.post;
                match outcome.status {
                    TrackStatus::Alive => {}
                    TrackStatus::Stopped | TrackStatus::Escaped => break,
                }
            }
        }

        self.recorder.end_event()?;
        self.metrics.events_processed += 1;
        self.lifecycle = self.lifecycle.advance(RunState::EventComplete)?;
        Ok(event)
    }

    /// Simulate the configured number of events, then flush and close
    /// the store.
    pub fn run(&mut self) -> Result<RunReport, RunError> {
        for _ in 0..self.config.events {
            self.simulate_event()?;
        }
        self.finish()
    }

    /// Flush the store exactly once and close out the run.
    pub fn finish(&mut self) -> Result<RunReport, RunError> {
        self.lifecycle = self.lifecycle.advance(RunState::RunComplete)?;
        self.metrics.records_written = self.recorder.finish()?;
        Ok(RunReport {
            metrics: self.metrics.clone(),
            final_state: self.state.clone(),
        })
    }

    /// The shared physics state. Read it only at event boundaries; the
    /// products are running values mid-event.
    pub fn state(&self) -> &EventPhysicsState {
        &self.state
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> RunState {
        self.lifecycle
    }

    /// The geometry model the run is tracking through.
    pub fn geometry(&self) -> &GeometryModel {
        &self.geometry
    }

    /// The active configuration (kept in sync with applied commands).
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Counters accumulated so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

impl TransportRun<BufWriter<File>> {
    /// Create a run with a file-backed store at `path`.
    ///
    /// Store-creation failure is fatal and names the path; the
    /// simulation must not proceed silently without output.
    pub fn open(
        config: RunConfig,
        transport: Box<dyn TransportEngine>,
        generator: Box<dyn PrimaryGenerator>,
        path: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        // Validate before touching the filesystem, so a bad config
        // never leaves an empty store file behind.
        config.validate()?;
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| {
            ConfigError::Store(StoreError::Create {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::new(config, transport, generator, BufWriter::new(file))
    }
}

impl<W: Write> fmt::Debug for TransportRun<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRun")
            .field("lifecycle", &self.lifecycle)
            .field("next_event", &self.next_event)
            .field("events_processed", &self.metrics.events_processed)
            .field("records_buffered", &self.recorder.records_buffered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mott_core::Vec3;
    use mott_geometry::{GeometryConfig, GeometryVariant};
    use mott_test_utils::{FixedBeam, ScriptedStep, ScriptedTransport};

    fn stacked_config(unit_count: u32) -> RunConfig {
        RunConfig {
            geometry: GeometryConfig {
                variant: GeometryVariant::StackedDetector,
                unit_count,
                ..GeometryConfig::default()
            },
            ..RunConfig::default()
        }
    }

    fn scripted_run(
        config: RunConfig,
        script: Vec<ScriptedStep>,
        sink: &mut Vec<u8>,
    ) -> TransportRun<&mut Vec<u8>> {
        TransportRun::new(
            config,
            Box::new(ScriptedTransport::new(script)),
            Box::new(FixedBeam::new(Vec3::new(0.0, 0.0, -40.0), 855.0)),
            sink,
        )
        .unwrap()
    }

    // ── Construction and validation ──────────────────────────

    #[test]
    fn invalid_config_fails_before_any_state_is_built() {
        let config = RunConfig {
            step_hint: -1.0,
            ..RunConfig::default()
        };
        let result = TransportRun::new(
            config,
            Box::new(ScriptedTransport::new(vec![])),
            Box::new(FixedBeam::new(Vec3::ZERO, 855.0)),
            Vec::new(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidStepHint { .. })));
    }

    #[test]
    fn open_names_the_path_when_store_creation_fails() {
        let result = TransportRun::open(
            RunConfig::default(),
            Box::new(ScriptedTransport::new(vec![])),
            Box::new(FixedBeam::new(Vec3::ZERO, 855.0)),
            "/definitely/not/a/dir/run.mott",
        );
        match result {
            Err(ConfigError::Store(StoreError::Create { path, .. })) => {
                assert!(path.to_string_lossy().contains("run.mott"));
            }
            other => panic!("expected Store(Create), got {other:?}"),
        }
    }

    #[test]
    fn new_run_is_geometry_ready() {
        let mut buf = Vec::new();
        let run = scripted_run(stacked_config(1), vec![], &mut buf);
        assert_eq!(run.lifecycle(), RunState::GeometryReady);
        assert_eq!(run.metrics().events_processed, 0);
    }

    // ── Command surface ──────────────────────────────────────

    #[test]
    fn set_unit_count_rebuilds_geometry() {
        let mut buf = Vec::new();
        let mut run = scripted_run(stacked_config(1), vec![], &mut buf);
        assert_eq!(run.geometry().root().node_count(), 3);

        run.apply_command(RunCommand::SetUnitCount(3)).unwrap();
        assert_eq!(run.geometry().root().node_count(), 7);
        assert_eq!(run.config().geometry.unit_count, 3);
        assert_eq!(run.metrics().geometry_rebuilds, 1);
    }

    #[test]
    fn set_radiator_thickness_rebuilds_geometry() {
        let mut buf = Vec::new();
        let mut run = scripted_run(stacked_config(2), vec![], &mut buf);
        run.apply_command(RunCommand::SetRadiatorThickness(7.0))
            .unwrap();
        assert_eq!(
            run.geometry().root().find("radiator0").unwrap().thickness(),
            7.0
        );
    }

    #[test]
    fn invalid_command_values_are_rejected() {
        let mut buf = Vec::new();
        let mut run = scripted_run(stacked_config(1), vec![], &mut buf);
        assert!(run.apply_command(RunCommand::SetUnitCount(0)).is_err());
        assert!(run
            .apply_command(RunCommand::SetRadiatorThickness(-2.0))
            .is_err());
        assert!(run.apply_command(RunCommand::SetStepHint(0.0)).is_err());
        // The run is still usable after rejected commands.
        assert_eq!(run.geometry().root().node_count(), 3);
    }

    #[test]
    fn control_bits_reach_the_shared_state() {
        let mut buf = Vec::new();
        let mut run = scripted_run(stacked_config(1), vec![], &mut buf);
        run.apply_command(RunCommand::SetControlBits {
            modify_trajectory: true,
            reduce_2d: false,
        })
        .unwrap();
        assert_eq!(run.state().control().as_raw(), 1);
    }

    // ── Lifecycle ────────────────────────────────────────────

    #[test]
    fn run_processes_configured_events_and_completes() {
        let mut buf = Vec::new();
        let config = RunConfig {
            events: 3,
            ..stacked_config(1)
        };
        // One drifting step per event, then the track stops.
        let script = vec![ScriptedStep::stop(); 3];
        let mut run = scripted_run(config, script, &mut buf);
        let report = run.run().unwrap();
        assert_eq!(report.metrics.events_processed, 3);
        assert_eq!(run.lifecycle(), RunState::RunComplete);
    }

    #[test]
    fn finish_twice_is_an_invalid_transition() {
        let mut buf = Vec::new();
        let mut run = scripted_run(stacked_config(1), vec![ScriptedStep::stop()], &mut buf);
        run.run().unwrap();
        assert!(matches!(run.finish(), Err(RunError::State(_))));
    }

    #[test]
    fn event_after_finish_is_rejected() {
        let mut buf = Vec::new();
        let mut run = scripted_run(stacked_config(1), vec![ScriptedStep::stop()], &mut buf);
        run.run().unwrap();
        assert!(matches!(run.simulate_event(), Err(RunError::State(_))));
    }

    #[test]
    fn max_steps_bounds_a_track_that_never_stops() {
        let mut buf = Vec::new();
        let config = RunConfig {
            max_steps_per_track: 5,
            ..stacked_config(1)
        };
        // Script far longer than the bound, every step alive.
        let script = vec![ScriptedStep::drift(); 100];
        let mut run = scripted_run(config, script, &mut buf);
        run.simulate_event().unwrap();
        assert_eq!(run.metrics().steps_processed, 5);
    }

    #[test]
    fn debug_impl_doesnt_panic() {
        let mut buf = Vec::new();
        let run = scripted_run(stacked_config(1), vec![], &mut buf);
        let debug = format!("{run:?}");
        assert!(debug.contains("TransportRun"));
        assert!(debug.contains("lifecycle"));
    }
}
