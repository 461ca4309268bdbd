//! Run-level counters for telemetry and tests.

/// Counters accumulated over a run.
///
/// The driver populates these as it steps; consumers read them from the
/// [`RunReport`](crate::RunReport) or mid-run via
/// [`TransportRun::metrics`](crate::TransportRun::metrics).
#[derive(Clone, Debug, Default)]
pub struct RunMetrics {
    /// Events fully processed.
    pub events_processed: u64,
    /// Tracks (primaries plus secondaries) fully processed.
    pub tracks_processed: u64,
    /// Transport steps executed.
    pub steps_processed: u64,
    /// Diagnostic rows written by the final flush.
    pub records_written: u64,
    /// Geometry rebuilds triggered by reconfiguration commands.
    pub geometry_rebuilds: u64,
    /// Per-material step counts: `(material name, steps)`.
    pub steps_by_material: Vec<(String, u64)>,
}

impl RunMetrics {
    /// Count one step in `material`.
    pub fn count_material_step(&mut self, material: &str) {
        if let Some(entry) = self
            .steps_by_material
            .iter_mut()
            .find(|(name, _)| name == material)
        {
            entry.1 += 1;
        } else {
            self.steps_by_material.push((material.to_string(), 1));
        }
    }

    /// Steps counted for `material`.
    pub fn steps_in(&self, material: &str) -> u64 {
        self.steps_by_material
            .iter()
            .find(|(name, _)| name == material)
            .map_or(0, |(_, count)| *count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.events_processed, 0);
        assert_eq!(m.tracks_processed, 0);
        assert_eq!(m.steps_processed, 0);
        assert_eq!(m.records_written, 0);
        assert_eq!(m.geometry_rebuilds, 0);
        assert!(m.steps_by_material.is_empty());
    }

    #[test]
    fn material_step_counting() {
        let mut m = RunMetrics::default();
        m.count_material_step("PBA");
        m.count_material_step("PBA");
        m.count_material_step("Air");
        assert_eq!(m.steps_in("PBA"), 2);
        assert_eq!(m.steps_in("Air"), 1);
        assert_eq!(m.steps_in("Vacuum"), 0);
    }
}
