/// A position in 3-space, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance, used for comparisons
    #[inline]
    pub fn squared_distance(&self, other: &Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    #[inline]
    pub fn distance(&self, other: &Point3D) -> f64 {
        self.squared_distance(other).sqrt()
    }
}

impl From<[f64; 3]> for Point3D {
    fn from(xyz: [f64; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

/// Ordered sequence of points, insertion order preserved
///
/// For a bundle the order is streamline-major, then point-within-streamline.
/// For a centroid the order is the position along the path and doubles as
/// the label space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point3D>,
}

impl PointSet {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Build from an interleaved `[x0, y0, z0, x1, ...]` buffer.
    ///
    /// Returns `None` when the length is not a multiple of three.
    pub fn from_flat(coords: &[f64]) -> Option<Self> {
        if coords.len() % 3 != 0 {
            return None;
        }
        Some(Self {
            points: coords
                .chunks_exact(3)
                .map(|c| Point3D::new(c[0], c[1], c[2]))
                .collect(),
        })
    }

    pub fn push(&mut self, point: Point3D) {
        self.points.push(point);
    }

    pub fn extend_from_slice(&mut self, points: &[Point3D]) {
        self.points.extend_from_slice(points);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point3D> {
        self.points.get(index)
    }

    pub fn as_slice(&self) -> &[Point3D] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3D> {
        self.points.iter()
    }

    pub fn into_inner(self) -> Vec<Point3D> {
        self.points
    }
}

impl From<Vec<Point3D>> for PointSet {
    fn from(points: Vec<Point3D>) -> Self {
        Self { points }
    }
}

impl FromIterator<Point3D> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point3D>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point3D;
    type IntoIter = std::slice::Iter<'a, Point3D>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
