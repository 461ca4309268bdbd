//! The per-step recorder invoked by the run driver.

use std::io::Write;

use indexmap::IndexSet;
use mott_core::{EventId, PdgCode, Step, TrackId};

use crate::error::StoreError;
use crate::store::StoreWriter;
use crate::types::{DiagnosticRecord, Histogram};

/// Records diagnostic rows for steps in watched materials and owns the
/// persisted store's lifecycle exclusively.
///
/// Called once per simulated step. A step whose material matches a
/// watched name (typically the sensitive-detector and radiator
/// materials) is synthesized into a [`DiagnosticRecord`] and appended
/// to the per-event buffer; any other material is a no-op, not an
/// error. [`end_event`](Self::end_event) drains the event buffer into
/// the run store, so no state leaks between events, and
/// [`finish`](Self::finish) flushes the store exactly once.
///
/// # Examples
///
/// ```
/// use mott_core::{EventId, PdgCode, Step, StepPoint, TrackId, Vec3};
/// use mott_record::{StepRecorder, StoreHeader, StoreWriter};
///
/// let header = StoreHeader { seed: 0, watched: vec!["radiatorMat".into()] };
/// let writer = StoreWriter::create(Vec::new(), &header).unwrap();
/// let mut recorder = StepRecorder::new(writer, ["radiatorMat".to_string()]);
///
/// let point = StepPoint {
///     position: Vec3::ZERO,
///     momentum: Vec3::new(0.0, 0.0, 855.0),
///     total_energy: 855.0,
/// };
/// let step = Step { pre: point, post: point };
///
/// let recorded = recorder.record_step(
///     EventId(0),
///     TrackId::PRIMARY,
///     TrackId::NONE,
///     "radiatorMat",
///     &step,
///     PdgCode::ELECTRON,
/// );
/// assert!(recorded);
/// assert!(!recorder.record_step(
///     EventId(0),
///     TrackId::PRIMARY,
///     TrackId::NONE,
///     "Air",
///     &step,
///     PdgCode::ELECTRON,
/// ));
/// ```
pub struct StepRecorder<W: Write> {
    watched: IndexSet<String>,
    event_buffer: Vec<DiagnosticRecord>,
    energy_histogram: Option<Histogram>,
    writer: StoreWriter<W>,
}

impl<W: Write> StepRecorder<W> {
    /// Create a recorder over an open store, watching the given
    /// material names.
    pub fn new(writer: StoreWriter<W>, watched: impl IntoIterator<Item = String>) -> Self {
        Self {
            watched: watched.into_iter().collect(),
            event_buffer: Vec::new(),
            energy_histogram: None,
            writer,
        }
    }

    /// Attach an entry-energy histogram filled from every recorded
    /// step; it becomes the store's optional run summary.
    pub fn with_energy_histogram(mut self, histogram: Histogram) -> Self {
        self.energy_histogram = Some(histogram);
        self
    }

    /// Whether `material` is on the watched list.
    pub fn is_watched(&self, material: &str) -> bool {
        self.watched.contains(material)
    }

    /// The watched material names, in configuration order.
    pub fn watched(&self) -> impl Iterator<Item = &str> {
        self.watched.iter().map(String::as_str)
    }

    /// Inspect one step; buffer a diagnostic row iff its material is
    /// watched. Returns whether a row was recorded.
    pub fn record_step(
        &mut self,
        event: EventId,
        track: TrackId,
        parent: TrackId,
        material: &str,
        step: &Step,
        pdg: PdgCode,
    ) -> bool {
        if !self.watched.contains(material) {
            return false;
        }
        if let Some(h) = self.energy_histogram.as_mut() {
            h.fill(step.pre.total_energy);
        }
        self.event_buffer.push(DiagnosticRecord::from_step(
            event, track, parent, material, step, pdg,
        ));
        true
    }

    /// Close out the current event: drain its buffer into the run
    /// store. Returns how many rows the event contributed.
    pub fn end_event(&mut self) -> Result<usize, StoreError> {
        let drained = self.event_buffer.len();
        for record in self.event_buffer.drain(..) {
            self.writer.append(record)?;
        }
        Ok(drained)
    }

    /// Rows buffered for the run so far (flushed at shutdown), plus any
    /// still in the open event.
    pub fn records_buffered(&self) -> usize {
        self.writer.records_buffered() + self.event_buffer.len()
    }

    /// Flush every buffered row into the store and release it.
    ///
    /// Must be called exactly once, at end of run. A second call fails
    /// with [`StoreError::AlreadyClosed`] and never corrupts previously
    /// written rows.
    pub fn finish(&mut self) -> Result<u64, StoreError> {
        self.end_event()?;
        if let Some(h) = self.energy_histogram.take() {
            self.writer.set_histogram(h);
        }
        self.writer.flush()
    }
}

impl<W: Write> Drop for StepRecorder<W> {
    fn drop(&mut self) {
        // Scoped-resource discipline: drain whatever is buffered so the
        // store writer's own Drop can flush it on early termination.
        if !self.writer.is_closed() {
            let _ = self.finish();
        }
    }
}
