//! # DBSCAN
//!
//! Density-based clustering; points that belong to no cluster are noise and
//! are reported as anomalies.
//!
//! ## Algorithm
//!
//! 1. Find every point's `eps`-neighborhood (itself included) through a
//!    [`NeighborGrid`]
//! 2. A point is core when its neighborhood holds at least `min_samples`
//!    points
//! 3. Visiting points in index order, each unlabeled core point seeds a new
//!    cluster that grows through the neighborhoods of its core members
//! 4. Points reached by no cluster are noise
//!
//! Border points reachable from several clusters join the first one to
//! reach them, so labels depend only on input order.

use config::constants::{DEFAULT_EPS, DEFAULT_MIN_SAMPLES};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnomalyError, AnomalyResult};
use crate::grid::NeighborGrid;

/// Cluster assignment of a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterLabel {
    /// Member of the cluster with this id; ids count up from 0.
    Cluster(usize),
    /// Reached by no cluster.
    Noise,
}

impl ClusterLabel {
    /// Returns true for [`ClusterLabel::Noise`].
    #[inline]
    pub fn is_noise(&self) -> bool {
        matches!(self, Self::Noise)
    }

    /// Cluster id, `None` for noise.
    #[inline]
    pub fn cluster(&self) -> Option<usize> {
        match self {
            Self::Cluster(id) => Some(*id),
            Self::Noise => None,
        }
    }
}

/// DBSCAN parameters.
///
/// # Example
///
/// ```rust
/// use cloud_anomaly::Dbscan;
/// use glam::DVec3;
///
/// let points = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(0.5, 0.0, 0.0),
///     DVec3::new(9.0, 9.0, 9.0),
/// ];
/// let dbscan = Dbscan::new(1.0, 2).unwrap();
/// assert_eq!(dbscan.noise_indices(&points), vec![2]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dbscan {
    eps: f64,
    min_samples: usize,
}

impl Default for Dbscan {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl Dbscan {
    /// Creates a detector with neighborhood radius `eps` and core threshold
    /// `min_samples`.
    ///
    /// # Errors
    ///
    /// [`AnomalyError::InvalidParameter`] if `eps` is not a positive finite
    /// number or `min_samples` is zero.
    pub fn new(eps: f64, min_samples: usize) -> AnomalyResult<Self> {
        if !eps.is_finite() || eps <= 0.0 {
            return Err(AnomalyError::invalid_parameter(
                "eps",
                format!("must be a positive finite number, got {eps}"),
            ));
        }
        if min_samples < 1 {
            return Err(AnomalyError::invalid_parameter(
                "min_samples",
                "must be at least 1",
            ));
        }
        Ok(Self { eps, min_samples })
    }

    /// Neighborhood radius.
    #[inline]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Minimum neighborhood size (itself included) of a core point.
    #[inline]
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Labels every point, in input order.
    pub fn labels(&self, points: &[DVec3]) -> Vec<ClusterLabel> {
        let grid = NeighborGrid::new(points, self.eps);
        let neighborhoods: Vec<Vec<usize>> = (0..points.len()).map(|i| grid.neighbors(i)).collect();
        let core: Vec<bool> = neighborhoods
            .iter()
            .map(|n| n.len() >= self.min_samples)
            .collect();

        let mut labels = vec![ClusterLabel::Noise; points.len()];
        let mut clusters = 0;
        let mut stack = Vec::new();

        for seed in 0..points.len() {
            if !core[seed] || !labels[seed].is_noise() {
                continue;
            }
            let label = ClusterLabel::Cluster(clusters);
            clusters += 1;
            labels[seed] = label;
            stack.push(seed);

            while let Some(i) = stack.pop() {
                for &j in &neighborhoods[i] {
                    if labels[j].is_noise() {
                        labels[j] = label;
                        if core[j] {
                            stack.push(j);
                        }
                    }
                }
            }
        }

        debug!(
            points = points.len(),
            cells = grid.cell_count(),
            clusters,
            noise = labels.iter().filter(|l| l.is_noise()).count(),
            "DBSCAN complete"
        );

        labels
    }

    /// Indices of noise points, ascending.
    pub fn noise_indices(&self, points: &[DVec3]) -> Vec<usize> {
        self.labels(points)
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.is_noise().then_some(i))
            .collect()
    }

    /// Noise points in input order.
    pub fn anomalies(&self, points: &[DVec3]) -> Vec<DVec3> {
        self.noise_indices(points)
            .into_iter()
            .map(|i| points[i])
            .collect()
    }
}

/// Runs DBSCAN with the given parameters and returns the noise points.
///
/// # Errors
///
/// [`AnomalyError::InvalidParameter`] for a bad `eps` or `min_samples`.
pub fn detect_anomalies(
    points: &[DVec3],
    eps: f64,
    min_samples: usize,
) -> AnomalyResult<Vec<DVec3>> {
    Ok(Dbscan::new(eps, min_samples)?.anomalies(points))
}
