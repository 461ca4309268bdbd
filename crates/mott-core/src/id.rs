//! Strongly-typed identifiers for events, tracks, and particle species.

use std::fmt;

/// Identifies one event within a run.
///
/// An event is the full simulation of one primary particle and all of
/// its secondaries. Event IDs are assigned sequentially by the run
/// driver, starting at 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EventId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Identifies one track within an event.
///
/// The primary track of an event is `TrackId(1)`; secondaries receive
/// sequential IDs as they are pushed onto the tracking stack. The parent
/// of a primary is the reserved `TrackId::NONE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(pub u32);

impl TrackId {
    /// Parent ID carried by primary tracks (no parent).
    pub const NONE: TrackId = TrackId(0);

    /// The primary track of every event.
    pub const PRIMARY: TrackId = TrackId(1);
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TrackId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// PDG Monte-Carlo particle numbering code.
///
/// Stored as-is in diagnostic records; the core never interprets the
/// code beyond equality.
///
/// # Examples
///
/// ```
/// use mott_core::PdgCode;
///
/// assert_eq!(PdgCode::ELECTRON, PdgCode(11));
/// assert_eq!(PdgCode::ELECTRON.to_string(), "11");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PdgCode(pub i32);

impl PdgCode {
    /// Electron (e⁻).
    pub const ELECTRON: PdgCode = PdgCode(11);
    /// Positron (e⁺).
    pub const POSITRON: PdgCode = PdgCode(-11);
    /// Photon.
    pub const GAMMA: PdgCode = PdgCode(22);
}

impl fmt::Display for PdgCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for PdgCode {
    fn from(v: i32) -> Self {
        Self(v)
    }
}
