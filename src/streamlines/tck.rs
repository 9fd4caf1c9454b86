//! MRtrix `.tck` tracks.
//!
//! A text header (`mrtrix tracks`, `key: value` lines, `END`) is followed at
//! the `file: . <offset>` position by xyz triplets in RAS+ mm. A NaN triplet
//! closes a streamline and an Inf triplet closes the file.

use super::{open, LoadError, StreamlineLoader, Tractogram};
use crate::geometry::Point3D;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, warn};

const MAGIC: &str = "mrtrix tracks";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataType {
    Float32LE,
    Float32BE,
    Float64LE,
    Float64BE,
}

impl DataType {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "Float32LE" => Some(Self::Float32LE),
            "Float32BE" => Some(Self::Float32BE),
            "Float64LE" => Some(Self::Float64LE),
            "Float64BE" => Some(Self::Float64BE),
            _ => None,
        }
    }

    fn width(self) -> usize {
        match self {
            Self::Float32LE | Self::Float32BE => 4,
            Self::Float64LE | Self::Float64BE => 8,
        }
    }

    #[inline]
    fn read(self, buf: &[u8]) -> f64 {
        match self {
            Self::Float32LE => LittleEndian::read_f32(buf) as f64,
            Self::Float32BE => BigEndian::read_f32(buf) as f64,
            Self::Float64LE => LittleEndian::read_f64(buf),
            Self::Float64BE => BigEndian::read_f64(buf),
        }
    }
}

/// Loader for MRtrix `.tck` files
#[derive(Debug, Clone, Copy, Default)]
pub struct TckLoader;

impl StreamlineLoader for TckLoader {
    fn load(&self, path: &Path) -> Result<Tractogram, LoadError> {
        let mut reader = BufReader::new(open(path)?);
        let fields = read_header(&mut reader, path)?;

        let datatype = fields
            .get("datatype")
            .ok_or_else(|| LoadError::header(path, "missing datatype"))?;
        let datatype = DataType::parse(datatype)
            .ok_or_else(|| LoadError::header(path, format!("unsupported datatype {datatype}")))?;
        let offset = data_offset(&fields, path)?;

        reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| LoadError::io(path, e))?;
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .map_err(|e| LoadError::io(path, e))?;

        let tractogram = decode_body(&body, datatype, path)?;

        if let Some(count) = fields.get("count").and_then(|c| c.parse::<usize>().ok()) {
            if count != tractogram.streamline_count() {
                warn!(
                    path = %path.display(),
                    header_count = count,
                    found = tractogram.streamline_count(),
                    "tck header count does not match streamlines read"
                );
            }
        }

        debug!(
            path = %path.display(),
            streamlines = tractogram.streamline_count(),
            points = tractogram.total_nb_rows(),
            "loaded tck"
        );
        Ok(tractogram)
    }
}

fn read_header(reader: &mut impl BufRead, path: &Path) -> Result<HashMap<String, String>, LoadError> {
    let mut line = Vec::new();
    let mut first = true;
    let mut fields = HashMap::new();

    loop {
        line.clear();
        let n = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| LoadError::io(path, e))?;
        if n == 0 {
            return Err(LoadError::header(path, "missing END line"));
        }

        let text = String::from_utf8_lossy(&line);
        let text = text.trim();

        if first {
            if text != MAGIC {
                return Err(LoadError::header(path, "not an mrtrix tracks file"));
            }
            first = false;
            continue;
        }
        if text == "END" {
            return Ok(fields);
        }
        if let Some((key, value)) = text.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
}

/// Byte offset of the track data from `file: . <offset>`
fn data_offset(fields: &HashMap<String, String>, path: &Path) -> Result<u64, LoadError> {
    let file = fields
        .get("file")
        .ok_or_else(|| LoadError::header(path, "missing file field"))?;
    let mut parts = file.split_whitespace();
    if parts.next() != Some(".") {
        return Err(LoadError::header(path, "track data must be in the same file"));
    }
    parts
        .next()
        .and_then(|o| o.parse::<u64>().ok())
        .ok_or_else(|| LoadError::header(path, format!("bad data offset in '{file}'")))
}

fn decode_body(body: &[u8], datatype: DataType, path: &Path) -> Result<Tractogram, LoadError> {
    let width = datatype.width();
    let stride = 3 * width;

    let mut tractogram = Tractogram::new();
    let mut current: Vec<Point3D> = Vec::new();
    let mut terminated = false;

    for triplet in body.chunks_exact(stride) {
        let x = datatype.read(&triplet[..width]);
        let y = datatype.read(&triplet[width..2 * width]);
        let z = datatype.read(&triplet[2 * width..]);

        if x.is_infinite() || y.is_infinite() || z.is_infinite() {
            terminated = true;
            break;
        }
        if x.is_nan() || y.is_nan() || z.is_nan() {
            tractogram.push_streamline(&current);
            current.clear();
            continue;
        }
        current.push(Point3D::new(x, y, z));
    }

    if !terminated && body.len() % stride != 0 {
        return Err(LoadError::truncated(
            path,
            format!("{} trailing bytes", body.len() % stride),
        ));
    }
    tractogram.push_streamline(&current);

    Ok(tractogram)
}
