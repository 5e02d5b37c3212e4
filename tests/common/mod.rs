use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;
use std::path::Path;

/// A `(chr_id, position, vertex_id)` record as it would come off the upstream de Bruijn junction
/// graph construction tool (§6.1), for building synthetic `--infile` fixtures in tests.
pub struct Junction {
    pub chr: u32,
    pub position: u64,
    pub vertex_id: i64,
}

pub fn junction(chr: u32, position: u64, vertex_id: i64) -> Junction {
    Junction { chr, position, vertex_id }
}

/// Serialize `records` into the §6.1 binary junctions format at `path`.
pub fn write_infile(path: &Path, records: &[Junction]) {
    let mut file = std::fs::File::create(path).expect("create synthetic infile");
    for r in records {
        file.write_u32::<LittleEndian>(r.chr).unwrap();
        file.write_u64::<LittleEndian>(r.position).unwrap();
        file.write_i64::<LittleEndian>(r.vertex_id).unwrap();
    }
}

/// Write a companion FASTA with one record per `(description, sequence)` pair.
pub fn write_gfile(path: &Path, chromosomes: &[(&str, &str)]) {
    let mut file = std::fs::File::create(path).expect("create synthetic gfile");
    for (desc, seq) in chromosomes {
        writeln!(file, ">{desc}\n{seq}").unwrap();
    }
}

pub fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}
