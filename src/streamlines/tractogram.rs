use crate::geometry::{Point3D, PointSet};

/// All streamlines of a file, flattened
///
/// `points` holds every point streamline-major; `offsets[i]..offsets[i + 1]`
/// is the span of streamline `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tractogram {
    points: PointSet,
    offsets: Vec<usize>,
}

impl Tractogram {
    pub fn new() -> Self {
        Self {
            points: PointSet::new(),
            offsets: vec![0],
        }
    }

    pub fn from_streamlines<I, S>(streamlines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[Point3D]>,
    {
        let mut tractogram = Self::new();
        for streamline in streamlines {
            tractogram.push_streamline(streamline.as_ref());
        }
        tractogram
    }

    /// Append one streamline. Empty streamlines are ignored.
    pub fn push_streamline(&mut self, points: &[Point3D]) {
        if points.is_empty() {
            return;
        }
        self.points.extend_from_slice(points);
        self.offsets.push(self.points.len());
    }

    /// Total number of points over all streamlines
    pub fn total_nb_rows(&self) -> usize {
        self.points.len()
    }

    pub fn streamline_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn streamline(&self, index: usize) -> Option<&[Point3D]> {
        let start = *self.offsets.get(index)?;
        let end = *self.offsets.get(index + 1)?;
        Some(&self.points.as_slice()[start..end])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Point3D]> {
        self.offsets
            .windows(2)
            .map(|w| &self.points.as_slice()[w[0]..w[1]])
    }

    /// Number of points in each streamline
    pub fn lengths(&self) -> Vec<usize> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn into_points(self) -> PointSet {
        self.points
    }
}

impl Default for Tractogram {
    fn default() -> Self {
        Self::new()
    }
}
