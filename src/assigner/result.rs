/// Per-point nearest centroid labels (1-based) and distances in mm
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentResult {
    labels: Vec<u32>,
    distances: Vec<f64>,
}

/// Distance statistics over an assignment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl AssignmentResult {
    pub(crate) fn new(labels: Vec<u32>, distances: Vec<f64>) -> Self {
        debug_assert_eq!(labels.len(), distances.len());
        Self { labels, distances }
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label and distance of bundle point `index`
    pub fn get(&self, index: usize) -> Option<(u32, f64)> {
        Some((*self.labels.get(index)?, *self.distances.get(index)?))
    }

    /// Number of bundle points per label; entry `j` counts label `j + 1`
    pub fn label_counts(&self, num_labels: usize) -> Vec<usize> {
        let mut counts = vec![0usize; num_labels];
        for &label in &self.labels {
            if let Some(slot) = (label as usize)
                .checked_sub(1)
                .and_then(|j| counts.get_mut(j))
            {
                *slot += 1;
            }
        }
        counts
    }

    pub fn distance_summary(&self) -> Option<DistanceSummary> {
        if self.distances.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &d in &self.distances {
            min = min.min(d);
            max = max.max(d);
            sum += d;
        }

        Some(DistanceSummary {
            min,
            max,
            mean: sum / self.distances.len() as f64,
        })
    }

    pub fn into_parts(self) -> (Vec<u32>, Vec<f64>) {
        (self.labels, self.distances)
    }
}
