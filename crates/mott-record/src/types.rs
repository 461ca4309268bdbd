//! Data types persisted in the diagnostic store.

use mott_core::{EventId, PdgCode, Step, TrackId};

/// Run-level metadata stored in the store header.
///
/// # Examples
///
/// ```
/// use mott_record::StoreHeader;
///
/// let header = StoreHeader {
///     seed: 42,
///     watched: vec!["detectorMat".into(), "radiatorMat".into()],
/// };
/// assert_eq!(header.watched.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreHeader {
    /// RNG seed of the run that produced the store.
    pub seed: u64,
    /// The watched material names, in configuration order.
    pub watched: Vec<String>,
}

/// One persisted diagnostic row.
///
/// Field order is the column order of the store: event, track, parent,
/// entry position x, entry momentum x, exit position y, exit momentum z,
/// entry total energy, particle code, source-material tag.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosticRecord {
    /// Event the step belonged to.
    pub event: EventId,
    /// Track the step belonged to.
    pub track: TrackId,
    /// Parent of that track (`TrackId::NONE` for primaries).
    pub parent: TrackId,
    /// x position at step entry (mm).
    pub pre_position_x: f64,
    /// x momentum at step entry (MeV/c).
    pub pre_momentum_x: f64,
    /// y position at step exit (mm).
    pub post_position_y: f64,
    /// z momentum at step exit (MeV/c).
    pub post_momentum_z: f64,
    /// Total energy at step entry (MeV).
    pub pre_total_energy: f64,
    /// PDG particle code.
    pub pdg: PdgCode,
    /// Name of the material the step occurred in.
    pub material: String,
}

impl DiagnosticRecord {
    /// Synthesize a record from a step in `material`.
    pub fn from_step(
        event: EventId,
        track: TrackId,
        parent: TrackId,
        material: &str,
        step: &Step,
        pdg: PdgCode,
    ) -> Self {
        Self {
            event,
            track,
            parent,
            pre_position_x: step.pre.position.x,
            pre_momentum_x: step.pre.momentum.x,
            post_position_y: step.post.position.y,
            post_momentum_z: step.post.momentum.z,
            pre_total_energy: step.pre.total_energy,
            pdg,
            material: material.to_string(),
        }
    }
}

/// A fixed-bin 1-D histogram, the optional run-summary object of the
/// store.
///
/// # Examples
///
/// ```
/// use mott_record::Histogram;
///
/// let mut h = Histogram::new(10, 0.0, 100.0).unwrap();
/// h.fill(5.0);
/// h.fill(5.0);
/// h.fill(-1.0);
/// assert_eq!(h.counts()[0], 2);
/// assert_eq!(h.underflow(), 1);
/// assert_eq!(h.total(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    lower: f64,
    upper: f64,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
}

impl Histogram {
    /// Create a histogram with `bins` equal-width bins over
    /// `[lower, upper)`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `bins` is zero or the range is not a finite,
    /// non-empty interval.
    pub fn new(bins: usize, lower: f64, upper: f64) -> Result<Self, String> {
        if bins == 0 {
            return Err("histogram needs at least one bin".to_string());
        }
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(format!(
                "histogram range [{lower}, {upper}) is not a finite non-empty interval"
            ));
        }
        Ok(Self {
            lower,
            upper,
            counts: vec![0; bins],
            underflow: 0,
            overflow: 0,
        })
    }

    /// Add one entry.
    pub fn fill(&mut self, value: f64) {
        if value < self.lower {
            self.underflow += 1;
        } else if value >= self.upper {
            self.overflow += 1;
        } else {
            let width = (self.upper - self.lower) / self.counts.len() as f64;
            let bin = ((value - self.lower) / width) as usize;
            // Floating rounding at the top edge maps into the last bin.
            let bin = bin.min(self.counts.len() - 1);
            self.counts[bin] += 1;
        }
    }

    /// Lower edge of the first bin.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper edge of the last bin.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Per-bin entry counts.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Entries below the range.
    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    /// Entries at or above the upper edge.
    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Total number of entries, including under/overflow.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum::<u64>() + self.underflow + self.overflow
    }

    pub(crate) fn from_parts(
        lower: f64,
        upper: f64,
        counts: Vec<u64>,
        underflow: u64,
        overflow: u64,
    ) -> Self {
        Self {
            lower,
            upper,
            counts,
            underflow,
            overflow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mott_core::{StepPoint, Vec3};

    #[test]
    fn record_from_step_picks_the_store_columns() {
        let step = Step {
            pre: StepPoint {
                position: Vec3::new(1.0, 2.0, 3.0),
                momentum: Vec3::new(4.0, 5.0, 6.0),
                total_energy: 7.0,
            },
            post: StepPoint {
                position: Vec3::new(8.0, 9.0, 10.0),
                momentum: Vec3::new(11.0, 12.0, 13.0),
                total_energy: 14.0,
            },
        };
        let rec = DiagnosticRecord::from_step(
            EventId(3),
            TrackId(2),
            TrackId::NONE,
            "detectorMat",
            &step,
            PdgCode::ELECTRON,
        );
        assert_eq!(rec.pre_position_x, 1.0);
        assert_eq!(rec.pre_momentum_x, 4.0);
        assert_eq!(rec.post_position_y, 9.0);
        assert_eq!(rec.post_momentum_z, 13.0);
        assert_eq!(rec.pre_total_energy, 7.0);
        assert_eq!(rec.material, "detectorMat");
    }

    #[test]
    fn histogram_rejects_bad_ranges() {
        assert!(Histogram::new(0, 0.0, 1.0).is_err());
        assert!(Histogram::new(10, 1.0, 1.0).is_err());
        assert!(Histogram::new(10, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn histogram_bins_and_edges() {
        let mut h = Histogram::new(4, 0.0, 4.0).unwrap();
        h.fill(0.0);
        h.fill(0.5);
        h.fill(3.999);
        h.fill(4.0); // upper edge -> overflow
        h.fill(-0.001); // -> underflow
        assert_eq!(h.counts(), &[2, 0, 0, 1]);
        assert_eq!(h.overflow(), 1);
        assert_eq!(h.underflow(), 1);
        assert_eq!(h.total(), 5);
    }
}
