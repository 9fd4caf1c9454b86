use crate::geometry::Point3D;

/// Fill `matrix` with the row-major `chunk.len() x centroid.len()` squared
/// distances. The buffer is reused across chunks.
fn fill_squared_distances(chunk: &[Point3D], centroid: &[Point3D], matrix: &mut Vec<f64>) {
    matrix.clear();
    for p in chunk {
        matrix.extend(centroid.iter().map(|c| p.squared_distance(c)));
    }
}

/// Index and value of the first strict minimum of a non-empty row
#[inline]
pub(crate) fn argmin_first(row: &[f64]) -> (usize, f64) {
    let mut best_idx = 0usize;
    let mut best = row[0];

    for (j, &d) in row.iter().enumerate().skip(1) {
        if d < best {
            best = d;
            best_idx = j;
        }
    }

    (best_idx, best)
}

/// Assign one chunk of bundle points. `centroid` must be non-empty and the
/// output slices must have `chunk.len()` entries.
pub(crate) fn assign_chunk(
    chunk: &[Point3D],
    centroid: &[Point3D],
    matrix: &mut Vec<f64>,
    labels: &mut [u32],
    distances: &mut [f64],
) {
    debug_assert!(!centroid.is_empty());
    debug_assert_eq!(chunk.len(), labels.len());
    debug_assert_eq!(chunk.len(), distances.len());

    fill_squared_distances(chunk, centroid, matrix);

    for ((row, label), distance) in matrix
        .chunks_exact(centroid.len())
        .zip(labels.iter_mut())
        .zip(distances.iter_mut())
    {
        let (j, squared) = argmin_first(row);
        // 0 stays free for "unassigned" downstream
        *label = (j + 1) as u32;
        *distance = squared.sqrt();
    }
}
