/// Leading bytes of every `.npy` file
pub const NPY_MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Data start alignment used by numpy for the v1.0 header
const HEADER_ALIGN: usize = 64;

/// A scalar type with a numpy dtype descriptor
pub trait NpyElement: Copy {
    /// Numpy `descr`, e.g. `<f8`
    const DESCR: &'static str;

    fn write_le(&self, out: &mut Vec<u8>);
}

impl NpyElement for i64 {
    const DESCR: &'static str = "<i8";

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl NpyElement for u32 {
    const DESCR: &'static str = "<u4";

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl NpyElement for f32 {
    const DESCR: &'static str = "<f4";

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl NpyElement for f64 {
    const DESCR: &'static str = "<f8";

    fn write_le(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

/// Encode a 1-D array as an NPY v1.0 file
pub fn encode_npy<T: NpyElement>(values: &[T]) -> Vec<u8> {
    let mut header = format!(
        "{{'descr': '{}', 'fortran_order': False, 'shape': ({},), }}",
        T::DESCR,
        values.len()
    );

    // magic(6) + version(2) + header_len(2) + header, ending in '\n'
    let preamble = NPY_MAGIC.len() + 2 + 2;
    let unpadded = preamble + header.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    header.push_str(&" ".repeat(padding));
    header.push('\n');

    let mut out = Vec::with_capacity(preamble + header.len() + values.len() * std::mem::size_of::<T>());
    out.extend_from_slice(NPY_MAGIC);
    out.extend_from_slice(&[1, 0]);
    out.extend_from_slice(&(header.len() as u16).to_le_bytes());
    out.extend_from_slice(header.as_bytes());
    for v in values {
        v.write_le(&mut out);
    }
    out
}
