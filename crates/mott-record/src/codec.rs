//! Binary encode/decode for the store format.
//!
//! All integers are little-endian. Strings are length-prefixed with a
//! `u32` length. The format is intentionally simple — no compression,
//! no alignment padding, no self-describing schema.

use std::io::{Read, Write};

use mott_core::{EventId, PdgCode, TrackId};

use crate::error::StoreError;
use crate::types::{DiagnosticRecord, Histogram, StoreHeader};
use crate::{FORMAT_VERSION, MAGIC};

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), StoreError> {
    w.write_all(&[v])?;
    Ok(())
}

/// Write a little-endian u32.
pub fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), StoreError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian u64.
pub fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), StoreError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian i32.
pub fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<(), StoreError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a little-endian f64.
pub fn write_f64_le(w: &mut dyn Write, v: f64) -> Result<(), StoreError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed UTF-8 string (u32 length + bytes).
pub fn write_length_prefixed_str(w: &mut dyn Write, s: &str) -> Result<(), StoreError> {
    write_u32_le(w, s.len() as u32)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

/// Read a single byte.
pub fn read_u8(r: &mut dyn Read) -> Result<u8, StoreError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read a little-endian u32.
pub fn read_u32_le(r: &mut dyn Read) -> Result<u32, StoreError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read a little-endian u64.
pub fn read_u64_le(r: &mut dyn Read) -> Result<u64, StoreError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Read a little-endian i32.
pub fn read_i32_le(r: &mut dyn Read) -> Result<i32, StoreError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

/// Read a little-endian f64.
pub fn read_f64_le(r: &mut dyn Read) -> Result<f64, StoreError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(f64::from_le_bytes(buf))
}

/// Read a length-prefixed UTF-8 string.
pub fn read_length_prefixed_str(r: &mut dyn Read) -> Result<String, StoreError> {
    let len = read_u32_le(r)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|e| StoreError::MalformedStore {
        detail: format!("invalid UTF-8 string: {e}"),
    })
}

// ── Header encode/decode ────────────────────────────────────────

/// Encode the store header (magic, version, seed, watched materials).
pub fn encode_header(w: &mut dyn Write, header: &StoreHeader) -> Result<(), StoreError> {
    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_u64_le(w, header.seed)?;
    write_u32_le(w, header.watched.len() as u32)?;
    for name in &header.watched {
        write_length_prefixed_str(w, name)?;
    }
    Ok(())
}

/// Decode and validate the store header.
pub fn decode_header(r: &mut dyn Read) -> Result<StoreHeader, StoreError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(StoreError::InvalidMagic);
    }

    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(StoreError::UnsupportedVersion { found: version });
    }

    let seed = read_u64_le(r)?;
    let watched_count = read_u32_le(r)? as usize;
    let mut watched = Vec::with_capacity(watched_count);
    for _ in 0..watched_count {
        watched.push(read_length_prefixed_str(r)?);
    }
    Ok(StoreHeader { seed, watched })
}

// ── Summary (histogram) encode/decode ───────────────────────────

/// Encode the optional run-summary histogram (presence flag + payload).
pub fn encode_summary(
    w: &mut dyn Write,
    histogram: Option<&Histogram>,
) -> Result<(), StoreError> {
    match histogram {
        None => write_u8(w, 0),
        Some(h) => {
            write_u8(w, 1)?;
            write_f64_le(w, h.lower())?;
            write_f64_le(w, h.upper())?;
            write_u64_le(w, h.underflow())?;
            write_u64_le(w, h.overflow())?;
            write_u32_le(w, h.counts().len() as u32)?;
            for &count in h.counts() {
                write_u64_le(w, count)?;
            }
            Ok(())
        }
    }
}

/// Decode the optional run-summary histogram.
pub fn decode_summary(r: &mut dyn Read) -> Result<Option<Histogram>, StoreError> {
    match read_u8(r)? {
        0 => Ok(None),
        1 => {
            let lower = read_f64_le(r)?;
            let upper = read_f64_le(r)?;
            let underflow = read_u64_le(r)?;
            let overflow = read_u64_le(r)?;
            let bins = read_u32_le(r)? as usize;
            let mut counts = Vec::with_capacity(bins);
            for _ in 0..bins {
                counts.push(read_u64_le(r)?);
            }
            Ok(Some(Histogram::from_parts(
                lower, upper, counts, underflow, overflow,
            )))
        }
        flag => Err(StoreError::MalformedStore {
            detail: format!("histogram presence flag must be 0 or 1, got {flag}"),
        }),
    }
}

// ── Record encode/decode ────────────────────────────────────────

/// Encode one diagnostic row in store column order.
pub fn encode_record(w: &mut dyn Write, record: &DiagnosticRecord) -> Result<(), StoreError> {
    write_u64_le(w, record.event.0)?;
    write_u32_le(w, record.track.0)?;
    write_u32_le(w, record.parent.0)?;
    write_f64_le(w, record.pre_position_x)?;
    write_f64_le(w, record.pre_momentum_x)?;
    write_f64_le(w, record.post_position_y)?;
    write_f64_le(w, record.post_momentum_z)?;
    write_f64_le(w, record.pre_total_energy)?;
    write_i32_le(w, record.pdg.0)?;
    write_length_prefixed_str(w, &record.material)?;
    Ok(())
}

/// Decode one diagnostic row.
pub fn decode_record(r: &mut dyn Read) -> Result<DiagnosticRecord, StoreError> {
    Ok(DiagnosticRecord {
        event: EventId(read_u64_le(r)?),
        track: TrackId(read_u32_le(r)?),
        parent: TrackId(read_u32_le(r)?),
        pre_position_x: read_f64_le(r)?,
        pre_momentum_x: read_f64_le(r)?,
        post_position_y: read_f64_le(r)?,
        post_momentum_z: read_f64_le(r)?,
        pre_total_energy: read_f64_le(r)?,
        pdg: PdgCode(read_i32_le(r)?),
        material: read_length_prefixed_str(r)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DiagnosticRecord {
        DiagnosticRecord {
            event: EventId(9),
            track: TrackId(2),
            parent: TrackId(1),
            pre_position_x: -1.5,
            pre_momentum_x: 0.25,
            post_position_y: 3.75,
            post_momentum_z: 850.0,
            pre_total_energy: 855.0,
            pdg: PdgCode::ELECTRON,
            material: "radiatorMat".to_string(),
        }
    }

    #[test]
    fn record_roundtrip() {
        let mut buf = Vec::new();
        encode_record(&mut buf, &record()).unwrap();
        let decoded = decode_record(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, record());
    }

    #[test]
    fn header_roundtrip() {
        let header = StoreHeader {
            seed: 7,
            watched: vec!["detectorMat".to_string(), "PBA".to_string()],
        };
        let mut buf = Vec::new();
        encode_header(&mut buf, &header).unwrap();
        let decoded = decode_header(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn summary_roundtrip_with_and_without_histogram() {
        let mut buf = Vec::new();
        encode_summary(&mut buf, None).unwrap();
        assert_eq!(decode_summary(&mut buf.as_slice()).unwrap(), None);

        let mut h = Histogram::new(3, 0.0, 3.0).unwrap();
        h.fill(1.5);
        h.fill(10.0);
        let mut buf = Vec::new();
        encode_summary(&mut buf, Some(&h)).unwrap();
        assert_eq!(decode_summary(&mut buf.as_slice()).unwrap(), Some(h));
    }

    #[test]
    fn bad_magic_detected() {
        let mut buf = Vec::new();
        encode_header(
            &mut buf,
            &StoreHeader {
                seed: 0,
                watched: vec![],
            },
        )
        .unwrap();
        buf[0] = b'X';
        assert!(matches!(
            decode_header(&mut buf.as_slice()),
            Err(StoreError::InvalidMagic)
        ));
    }

    #[test]
    fn future_version_rejected() {
        let mut buf = Vec::new();
        encode_header(
            &mut buf,
            &StoreHeader {
                seed: 0,
                watched: vec![],
            },
        )
        .unwrap();
        buf[4] = FORMAT_VERSION + 1;
        assert!(matches!(
            decode_header(&mut buf.as_slice()),
            Err(StoreError::UnsupportedVersion { .. })
        ));
    }
}
