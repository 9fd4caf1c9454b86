use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::assigner::{AssignerConfig, AssignmentResult, NearestCentroidAssigner};
use crate::npz::{npz_path, NpzWriter};
use crate::paths::PathGuard;
use crate::streamlines::LoaderRegistry;

/// One bundle/centroid pair and where to put its label and distance maps
#[derive(Debug, Clone)]
pub struct LabelMapJob {
    pub bundle: PathBuf,
    pub centroid: PathBuf,
    pub output_label: PathBuf,
    pub output_distance: PathBuf,
    pub overwrite: bool,
    pub config: AssignerConfig,
}

/// What a job did
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// An input had no points; nothing was written
    Skipped { reason: String },
    Written {
        label_path: PathBuf,
        distance_path: PathBuf,
        points: usize,
        centroid_points: usize,
    },
}

impl LabelMapJob {
    pub fn new(
        bundle: impl Into<PathBuf>,
        centroid: impl Into<PathBuf>,
        output_label: impl Into<PathBuf>,
        output_distance: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bundle: bundle.into(),
            centroid: centroid.into(),
            output_label: output_label.into(),
            output_distance: output_distance.into(),
            overwrite: false,
            config: AssignerConfig::default(),
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn config(mut self, config: AssignerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load both tractograms, assign every bundle point to the centroid and
    /// write the two maps.
    pub fn run(&self, registry: &LoaderRegistry) -> Result<JobOutcome> {
        PathGuard::assert_inputs_exist(&[self.bundle.as_path(), self.centroid.as_path()])
            .context("Input check failed")?;

        let label_path = npz_path(&self.output_label);
        let distance_path = npz_path(&self.output_distance);
        PathGuard::assert_outputs_writable(
            &[label_path.as_path(), distance_path.as_path()],
            self.overwrite,
        )
        .context("Output check failed")?;

        let bundle = registry
            .load(&self.bundle)
            .with_context(|| format!("Failed to load bundle {}", self.bundle.display()))?;
        let centroid = registry
            .load(&self.centroid)
            .with_context(|| format!("Failed to load centroid {}", self.centroid.display()))?;

        if bundle.total_nb_rows() == 0 {
            return Ok(skip(format!("Empty bundle file {}. Skipping", self.bundle.display())));
        }
        if centroid.total_nb_rows() == 0 {
            return Ok(skip(format!(
                "Empty centroid streamline file {}. Skipping",
                self.centroid.display()
            )));
        }
        if centroid.streamline_count() > 1 {
            warn!(
                path = %self.centroid.display(),
                streamlines = centroid.streamline_count(),
                "centroid file holds several streamlines, using all their points in order"
            );
        }

        info!(
            streamlines = bundle.streamline_count(),
            points = bundle.total_nb_rows(),
            centroid_points = centroid.total_nb_rows(),
            "computing assignment map"
        );

        let result = NearestCentroidAssigner::with_config(self.config)
            .compute(bundle.points(), centroid.points())
            .context("Nearest centroid assignment failed")?;

        self.write(&result, &label_path, &distance_path)?;
        log_summary(&result, centroid.total_nb_rows());

        Ok(JobOutcome::Written {
            label_path,
            distance_path,
            points: result.len(),
            centroid_points: centroid.total_nb_rows(),
        })
    }

    fn write(&self, result: &AssignmentResult, label_path: &Path, distance_path: &Path) -> Result<()> {
        let writer = NpzWriter::new().overwrite(self.overwrite);

        // int64 labels, as numpy's argmin produces
        let labels: Vec<i64> = result.labels().iter().map(|&l| l as i64).collect();
        writer
            .save_compressed(label_path, &labels)
            .context("Failed to write label map")?;
        if let Err(e) = writer.save_compressed(distance_path, result.distances()) {
            // the label map is already on disk at this point
            warn!(
                label_map = %label_path.display(),
                "distance map failed, label map left without its distance map"
            );
            return Err(e).context("Failed to write distance map");
        }
        Ok(())
    }
}

fn skip(reason: String) -> JobOutcome {
    warn!("{}", reason);
    JobOutcome::Skipped { reason }
}

fn log_summary(result: &AssignmentResult, centroid_points: usize) {
    let populated = result
        .label_counts(centroid_points)
        .iter()
        .filter(|&&c| c > 0)
        .count();

    if let Some(summary) = result.distance_summary() {
        info!(
            points = result.len(),
            populated_labels = populated,
            labels = centroid_points,
            min_distance = summary.min,
            mean_distance = summary.mean,
            max_distance = summary.max,
            "assignment map written"
        );
    }
}
