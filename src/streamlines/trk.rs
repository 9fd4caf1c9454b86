//! TrackVis `.trk` tracks.
//!
//! Points are stored in "voxmm" (millimeters from the corner of the first
//! voxel) and are mapped to RAS+ mm through the header's `vox_to_ras`.

use super::{open, LoadError, StreamlineLoader, Tractogram};
use crate::geometry::Point3D;
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub(crate) const HEADER_SIZE: usize = 1000;

const OFFSET_VOXEL_SIZE: usize = 12;
const OFFSET_N_SCALARS: usize = 36;
const OFFSET_N_PROPERTIES: usize = 238;
const OFFSET_VOX_TO_RAS: usize = 440;
const OFFSET_VOXEL_ORDER: usize = 948;
const OFFSET_N_COUNT: usize = 988;
const OFFSET_HDR_SIZE: usize = 996;

type Affine = [[f64; 4]; 4];

#[derive(Debug, Clone)]
struct TrkHeader {
    voxel_size: [f64; 3],
    n_scalars: usize,
    n_properties: usize,
    vox_to_ras: Affine,
    /// Upper-cased axis codes, empty when unset
    voxel_order: String,
    n_count: usize,
}

impl TrkHeader {
    fn parse<B: ByteOrder>(buf: &[u8], path: &Path) -> Result<Self, LoadError> {
        let mut voxel_size = [0.0; 3];
        for (axis, size) in voxel_size.iter_mut().enumerate() {
            let at = OFFSET_VOXEL_SIZE + 4 * axis;
            *size = B::read_f32(&buf[at..at + 4]) as f64;
        }

        let n_scalars = B::read_i16(&buf[OFFSET_N_SCALARS..OFFSET_N_SCALARS + 2]);
        let n_properties = B::read_i16(&buf[OFFSET_N_PROPERTIES..OFFSET_N_PROPERTIES + 2]);
        if n_scalars < 0 || n_properties < 0 {
            return Err(LoadError::header(path, "negative scalar or property count"));
        }

        let mut vox_to_ras = [[0.0; 4]; 4];
        for (r, row) in vox_to_ras.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                let at = OFFSET_VOX_TO_RAS + 4 * (4 * r + c);
                *value = B::read_f32(&buf[at..at + 4]) as f64;
            }
        }

        let voxel_order: String = buf[OFFSET_VOXEL_ORDER..OFFSET_VOXEL_ORDER + 4]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| (b as char).to_ascii_uppercase())
            .collect();

        let n_count = B::read_i32(&buf[OFFSET_N_COUNT..OFFSET_N_COUNT + 4]);

        Ok(Self {
            voxel_size,
            n_scalars: n_scalars as usize,
            n_properties: n_properties as usize,
            vox_to_ras,
            voxel_order: voxel_order.trim().to_string(),
            n_count: n_count.max(0) as usize,
        })
    }

    /// voxmm -> RAS+ mm: `vox_to_ras * translate(-0.5) * scale(1 / voxel_size)`
    fn voxmm_to_rasmm(&self, path: &Path) -> Result<Affine, LoadError> {
        if self.voxel_size.iter().any(|&s| !s.is_finite() || s <= 0.0) {
            return Err(LoadError::header(
                path,
                format!("voxel sizes must be positive, got {:?}", self.voxel_size),
            ));
        }

        let mut vox_to_ras = self.vox_to_ras;
        if vox_to_ras[3][3] == 0.0 {
            warn!(path = %path.display(), "trk vox_to_ras not recorded, using identity");
            vox_to_ras = identity();
        } else if !self.voxel_order.is_empty() {
            let affine_order = axis_codes(&vox_to_ras);
            // no axis flip/permutation is applied between the two
            if self.voxel_order != affine_order {
                warn!(
                    path = %path.display(),
                    voxel_order = %self.voxel_order,
                    affine_order = %affine_order,
                    "trk voxel_order disagrees with vox_to_ras, points are not reoriented"
                );
            }
        }

        let mut to_voxel = identity();
        for axis in 0..3 {
            to_voxel[axis][axis] = 1.0 / self.voxel_size[axis];
            to_voxel[axis][3] = -0.5;
        }

        Ok(matmul(&vox_to_ras, &to_voxel))
    }
}

/// Orientation codes (e.g. `RAS`, `LPS`) of the voxel axes of an affine
pub(crate) fn axis_codes(affine: &Affine) -> String {
    const POSITIVE: [char; 3] = ['R', 'A', 'S'];
    const NEGATIVE: [char; 3] = ['L', 'P', 'I'];

    (0..3)
        .map(|c| {
            let (row, value) = (0..3)
                .map(|r| (r, affine[r][c]))
                .fold((0, 0.0f64), |best, cur| if cur.1.abs() > best.1.abs() { cur } else { best });
            if value < 0.0 {
                NEGATIVE[row]
            } else {
                POSITIVE[row]
            }
        })
        .collect()
}

fn identity() -> Affine {
    let mut m = [[0.0; 4]; 4];
    for (i, row) in m.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    m
}

fn matmul(a: &Affine, b: &Affine) -> Affine {
    let mut out = [[0.0; 4]; 4];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, value) in row.iter_mut().enumerate() {
            *value = (0..4).map(|k| a[r][k] * b[k][c]).sum();
        }
    }
    out
}

#[inline]
fn apply(m: &Affine, x: f64, y: f64, z: f64) -> Point3D {
    Point3D::new(
        m[0][0] * x + m[0][1] * y + m[0][2] * z + m[0][3],
        m[1][0] * x + m[1][1] * y + m[1][2] * z + m[1][3],
        m[2][0] * x + m[2][1] * y + m[2][2] * z + m[2][3],
    )
}

/// Loader for TrackVis `.trk` files
#[derive(Debug, Clone, Copy, Default)]
pub struct TrkLoader;

impl StreamlineLoader for TrkLoader {
    fn load(&self, path: &Path) -> Result<Tractogram, LoadError> {
        let mut file = open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| LoadError::io(path, e))?;

        if bytes.len() < HEADER_SIZE {
            return Err(LoadError::header(path, "file shorter than the 1000-byte header"));
        }
        if &bytes[..5] != b"TRACK" {
            return Err(LoadError::header(path, "missing TRACK magic"));
        }

        let (header, body) = bytes.split_at(HEADER_SIZE);
        let tractogram = if LittleEndian::read_i32(&header[OFFSET_HDR_SIZE..]) == HEADER_SIZE as i32 {
            decode::<LittleEndian>(header, body, path)?
        } else if BigEndian::read_i32(&header[OFFSET_HDR_SIZE..]) == HEADER_SIZE as i32 {
            decode::<BigEndian>(header, body, path)?
        } else {
            return Err(LoadError::header(path, "hdr_size is not 1000 in either byte order"));
        };

        debug!(
            path = %path.display(),
            streamlines = tractogram.streamline_count(),
            points = tractogram.total_nb_rows(),
            "loaded trk"
        );
        Ok(tractogram)
    }
}

fn decode<B: ByteOrder>(header: &[u8], body: &[u8], path: &Path) -> Result<Tractogram, LoadError> {
    let header = TrkHeader::parse::<B>(header, path)?;
    let affine = header.voxmm_to_rasmm(path)?;

    let values_per_point = 3 + header.n_scalars;
    let mut tractogram = Tractogram::new();
    let mut current = Vec::new();
    let mut cursor = 0usize;
    let mut read = 0usize;

    while cursor < body.len() {
        if header.n_count > 0 && read == header.n_count {
            break;
        }
        if body.len() - cursor < 4 {
            return Err(LoadError::truncated(path, "partial point count"));
        }
        let n_points = B::read_i32(&body[cursor..cursor + 4]);
        cursor += 4;
        if n_points < 0 {
            return Err(LoadError::truncated(path, "negative point count"));
        }

        let n_points = n_points as usize;
        let needed = 4 * (n_points * values_per_point + header.n_properties);
        if body.len() - cursor < needed {
            return Err(LoadError::truncated(
                path,
                format!("streamline {read} needs {needed} bytes"),
            ));
        }

        current.clear();
        for point in body[cursor..cursor + 4 * n_points * values_per_point].chunks_exact(4 * values_per_point) {
            let x = B::read_f32(&point[0..4]) as f64;
            let y = B::read_f32(&point[4..8]) as f64;
            let z = B::read_f32(&point[8..12]) as f64;
            current.push(apply(&affine, x, y, z));
        }
        cursor += needed;
        read += 1;

        tractogram.push_streamline(&current);
    }

    if header.n_count > 0 && read < header.n_count {
        warn!(
            path = %path.display(),
            header_count = header.n_count,
            found = read,
            "trk ended before n_count streamlines"
        );
    }

    Ok(tractogram)
}
