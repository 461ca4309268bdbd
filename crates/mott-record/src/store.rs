//! The buffered store writer and its paired reader.
//!
//! [`StoreWriter`] writes the header immediately on construction (so an
//! unwritable sink fails fast, before any event is processed), buffers
//! rows in memory for the whole run, and writes them out on the single
//! [`flush`](StoreWriter::flush) call at shutdown. A second flush fails
//! with [`StoreError::AlreadyClosed`] and leaves the written data
//! intact.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::codec::{
    decode_header, decode_record, decode_summary, encode_header, encode_record, encode_summary,
    read_u64_le, write_u64_le,
};
use crate::error::StoreError;
use crate::types::{DiagnosticRecord, Histogram, StoreHeader};

/// Writes the diagnostic store to a byte sink.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`.
///
/// Dropping an unflushed writer flushes best-effort, so the sink is
/// released on every exit path — including early termination of a run.
///
/// # Examples
///
/// ```
/// use mott_record::{StoreHeader, StoreReader, StoreWriter};
///
/// let header = StoreHeader { seed: 1, watched: vec!["detectorMat".into()] };
/// let mut buf = Vec::new();
/// let mut writer = StoreWriter::create(&mut buf, &header).unwrap();
/// assert_eq!(writer.flush().unwrap(), 0);
/// assert!(writer.flush().is_err()); // AlreadyClosed
/// drop(writer); // release the &mut buf borrow before reading back
///
/// let reader = StoreReader::open(buf.as_slice()).unwrap();
/// assert_eq!(reader.header(), &header);
/// ```
#[derive(Debug)]
pub struct StoreWriter<W: Write> {
    sink: Option<W>,
    records: Vec<DiagnosticRecord>,
    histogram: Option<Histogram>,
}

impl<W: Write> StoreWriter<W> {
    /// Create a store on `sink`, immediately writing the header.
    ///
    /// Failing here is fatal for the caller: the run must not proceed
    /// silently without output.
    pub fn create(mut sink: W, header: &StoreHeader) -> Result<Self, StoreError> {
        encode_header(&mut sink, header)?;
        Ok(Self {
            sink: Some(sink),
            records: Vec::new(),
            histogram: None,
        })
    }

    /// Buffer one row for the flush at shutdown.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyClosed`] if the store was already flushed.
    pub fn append(&mut self, record: DiagnosticRecord) -> Result<(), StoreError> {
        if self.sink.is_none() {
            return Err(StoreError::AlreadyClosed);
        }
        self.records.push(record);
        Ok(())
    }

    /// Attach the optional run-summary histogram, replacing any
    /// previous one.
    pub fn set_histogram(&mut self, histogram: Histogram) {
        self.histogram = Some(histogram);
    }

    /// Number of rows currently buffered.
    pub fn records_buffered(&self) -> usize {
        self.records.len()
    }

    /// Whether the store has been flushed and closed.
    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    /// Write the summary and all buffered rows, flush the sink, and
    /// close the store. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// [`StoreError::AlreadyClosed`] on a second call;
    /// [`StoreError::Io`] if the sink fails mid-flush.
    pub fn flush(&mut self) -> Result<u64, StoreError> {
        let mut sink = self.sink.take().ok_or(StoreError::AlreadyClosed)?;
        encode_summary(&mut sink, self.histogram.as_ref())?;
        write_u64_le(&mut sink, self.records.len() as u64)?;
        for record in &self.records {
            encode_record(&mut sink, record)?;
        }
        sink.flush()?;
        Ok(self.records.len() as u64)
    }
}

impl StoreWriter<BufWriter<File>> {
    /// Create a file-backed store, naming the path in the error if
    /// creation fails.
    pub fn create_file(
        path: impl AsRef<Path>,
        header: &StoreHeader,
    ) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| StoreError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Self::create(BufWriter::new(file), header)
    }
}

impl<W: Write> Drop for StoreWriter<W> {
    fn drop(&mut self) {
        if self.sink.is_some() {
            // Best-effort release on early termination; errors have
            // nowhere to go from a destructor.
            let _ = self.flush();
        }
    }
}

/// Reads a diagnostic store from a byte source.
///
/// The header and summary are validated and decoded on
/// [`open`](StoreReader::open); rows stream via
/// [`next_record`](StoreReader::next_record) or collect via
/// [`records`](StoreReader::records).
pub struct StoreReader<R: Read> {
    reader: R,
    header: StoreHeader,
    histogram: Option<Histogram>,
    remaining: u64,
}

impl<R: Read> StoreReader<R> {
    /// Open a store, reading and validating the header and summary.
    pub fn open(mut reader: R) -> Result<Self, StoreError> {
        let header = decode_header(&mut reader)?;
        let histogram = decode_summary(&mut reader)?;
        let remaining = read_u64_le(&mut reader)?;
        Ok(Self {
            reader,
            header,
            histogram,
            remaining,
        })
    }

    /// The store header.
    pub fn header(&self) -> &StoreHeader {
        &self.header
    }

    /// The run-summary histogram, if one was written.
    pub fn histogram(&self) -> Option<&Histogram> {
        self.histogram.as_ref()
    }

    /// Rows not yet read.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Read the next row, or `None` once the declared count is
    /// exhausted. Truncated data surfaces as
    /// [`StoreError::MalformedStore`].
    pub fn next_record(&mut self) -> Result<Option<DiagnosticRecord>, StoreError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        match decode_record(&mut self.reader) {
            Ok(record) => {
                self.remaining -= 1;
                Ok(Some(record))
            }
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                Err(StoreError::MalformedStore {
                    detail: format!("store truncated with {} rows outstanding", self.remaining),
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Collect every remaining row.
    pub fn records(mut self) -> Result<Vec<DiagnosticRecord>, StoreError> {
        let mut rows = Vec::with_capacity(self.remaining as usize);
        while let Some(record) = self.next_record()? {
            rows.push(record);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mott_core::{EventId, PdgCode, TrackId};

    fn header() -> StoreHeader {
        StoreHeader {
            seed: 42,
            watched: vec!["detectorMat".to_string(), "PBA".to_string()],
        }
    }

    fn row(event: u64) -> DiagnosticRecord {
        DiagnosticRecord {
            event: EventId(event),
            track: TrackId::PRIMARY,
            parent: TrackId::NONE,
            pre_position_x: 0.0,
            pre_momentum_x: 0.0,
            post_position_y: 0.0,
            post_momentum_z: 855.0,
            pre_total_energy: 855.0,
            pdg: PdgCode::ELECTRON,
            material: "detectorMat".to_string(),
        }
    }

    #[test]
    fn roundtrip_write_read_rows() {
        let mut buf = Vec::new();
        {
            let mut writer = StoreWriter::create(&mut buf, &header()).unwrap();
            for event in 0..5u64 {
                writer.append(row(event)).unwrap();
            }
            assert_eq!(writer.records_buffered(), 5);
            assert_eq!(writer.flush().unwrap(), 5);
        }

        let reader = StoreReader::open(buf.as_slice()).unwrap();
        assert_eq!(reader.header(), &header());
        assert_eq!(reader.remaining(), 5);
        let rows = reader.records().unwrap();
        assert_eq!(rows.len(), 5);
        for (i, r) in rows.iter().enumerate() {
            assert_eq!(r.event, EventId(i as u64));
        }
    }

    #[test]
    fn double_flush_is_already_closed_and_data_survives() {
        let mut buf = Vec::new();
        {
            let mut writer = StoreWriter::create(&mut buf, &header()).unwrap();
            writer.append(row(0)).unwrap();
            assert_eq!(writer.flush().unwrap(), 1);

            // Second flush refuses; so does appending to a closed store.
            assert!(matches!(writer.flush(), Err(StoreError::AlreadyClosed)));
            assert!(matches!(
                writer.append(row(1)),
                Err(StoreError::AlreadyClosed)
            ));
        }
        // The rows written by the first flush are intact.
        let rows = StoreReader::open(buf.as_slice()).unwrap().records().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event, EventId(0));
    }

    #[test]
    fn drop_flushes_unflushed_writer() {
        let mut buf = Vec::new();
        {
            let mut writer = StoreWriter::create(&mut buf, &header()).unwrap();
            writer.append(row(7)).unwrap();
            // No explicit flush; Drop must release the sink.
        }
        let rows = StoreReader::open(buf.as_slice()).unwrap().records().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event, EventId(7));
    }

    #[test]
    fn histogram_travels_through_the_store() {
        let mut h = Histogram::new(10, 0.0, 1000.0).unwrap();
        h.fill(855.0);

        let mut buf = Vec::new();
        {
            let mut writer = StoreWriter::create(&mut buf, &header()).unwrap();
            writer.set_histogram(h.clone());
            writer.flush().unwrap();
        }
        let reader = StoreReader::open(buf.as_slice()).unwrap();
        assert_eq!(reader.histogram(), Some(&h));
    }

    #[test]
    fn truncated_store_is_malformed_not_a_panic() {
        let mut buf = Vec::new();
        {
            let mut writer = StoreWriter::create(&mut buf, &header()).unwrap();
            writer.append(row(0)).unwrap();
            writer.append(row(1)).unwrap();
            writer.flush().unwrap();
        }
        buf.truncate(buf.len() - 6);

        let mut reader = StoreReader::open(buf.as_slice()).unwrap();
        assert!(reader.next_record().unwrap().is_some());
        assert!(matches!(
            reader.next_record(),
            Err(StoreError::MalformedStore { .. })
        ));
    }

    #[test]
    fn create_file_names_path_on_failure() {
        let err =
            StoreWriter::create_file("/definitely/not/a/dir/out.mott", &header()).unwrap_err();
        match err {
            StoreError::Create { path, .. } => {
                assert!(path.to_string_lossy().contains("out.mott"));
            }
            other => panic!("expected Create error, got {other:?}"),
        }
    }
}
