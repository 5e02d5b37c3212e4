use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use junction_graph::RawJunction;
use located_error::prelude::*;

use crate::error::IoError;

/// Each record is a fixed-width `(chr_id: u32, position: u64, vertex_id: i64)` triple — 20 bytes
/// — streamed off the upstream junction-graph construction tool (§6.1).
const RECORD_SIZE: u64 = 4 + 8 + 8;

/// Read every `(chr_id, position, vertex_id)` record out of the upstream binary junctions stream
/// (§6.1), in file order. Callers are expected to have already checked the file is sorted by
/// `(chr_id, position)` or to rely on [`junction_graph::JunctionStorage::build`]'s own check.
///
/// # Errors
/// Returns [`IoError::OpenInfile`] if the file cannot be opened, or
/// [`IoError::TruncatedRecord`] if the stream ends mid-record.
pub fn read_junctions(path: impl AsRef<Path>) -> Result<Vec<RawJunction>> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|_| IoError::OpenInfile(path.display().to_string()))
        .loc("While opening the junctions binary stream")?;

    let len = file.metadata().map(|m| m.len()).unwrap_or(0);
    let mut reader = BufReader::new(file);
    let mut records = Vec::with_capacity((len / RECORD_SIZE) as usize);

    let mut offset = 0u64;
    loop {
        let mut probe = [0u8; 1];
        match reader.read(&mut probe) {
            Ok(0) => break, // clean EOF between records.
            Ok(_) => {
                let chr = read_u32_after(&mut reader, probe[0])?;
                let position = reader
                    .read_u64::<LittleEndian>()
                    .map_err(|_| IoError::TruncatedRecord { path: path.display().to_string(), index: records.len(), offset, remaining: len.saturating_sub(offset) })
                    .loc("While reading a junction record's position field")?;
                let vertex_id = reader
                    .read_i64::<LittleEndian>()
                    .map_err(|_| IoError::TruncatedRecord { path: path.display().to_string(), index: records.len(), offset, remaining: len.saturating_sub(offset) })
                    .loc("While reading a junction record's vertex_id field")?;

                records.push(RawJunction { chr, position, vertex_id });
                offset += RECORD_SIZE;
            }
            Err(e) => return Err(anyhow!(e)).loc("While reading the junctions binary stream"),
        }
    }

    Ok(records)
}

/// Reassemble a little-endian `u32` from one byte already consumed by the EOF probe plus three
/// more read off `reader`.
fn read_u32_after(reader: &mut impl Read, first_byte: u8) -> Result<u32> {
    let mut rest = [0u8; 3];
    reader.read_exact(&mut rest).loc("While reading a junction record's chr_id field")?;
    Ok(u32::from_le_bytes([first_byte, rest[0], rest[1], rest[2]]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Write;

    fn write_record(buf: &mut Vec<u8>, chr: u32, pos: u64, vid: i64) {
        buf.write_u32::<LittleEndian>(chr).unwrap();
        buf.write_u64::<LittleEndian>(pos).unwrap();
        buf.write_i64::<LittleEndian>(vid).unwrap();
    }

    #[test]
    fn roundtrips_records() {
        let mut buf = Vec::new();
        write_record(&mut buf, 0, 0, 1);
        write_record(&mut buf, 0, 4, 2);
        write_record(&mut buf, 1, 0, -3);

        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().write_all(&buf).unwrap();

        let records = read_junctions(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].vertex_id, -3);
        assert_eq!(records[2].chr, 1);
    }

    #[test]
    fn rejects_truncated_stream() {
        let mut buf = Vec::new();
        write_record(&mut buf, 0, 0, 1);
        buf.truncate(buf.len() - 3); // cut mid vertex_id field.

        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file().write_all(&buf).unwrap();

        assert!(read_junctions(file.path()).is_err());
    }
}
