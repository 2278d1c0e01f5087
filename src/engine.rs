//! The clustering engine: centroid initialization, nearest-centroid
//! assignment, centroid update and reporting over a borrowed flat point
//! buffer.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use log::debug;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use num_traits::Zero;
use rand::prelude::*;

use crate::error::{Error, Result};
use crate::scalar::Coordinate;

/// Pivot rows copied into the centroid buffer when no explicit
/// initialization strategy is configured.
pub const DEFAULT_PIVOT_INDICES: [usize; 8] = [0, 70, 149, 35, 105, 17, 50, 85];

/// Enum representing the distance metric to be used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    // Other metrics can be added as needed.
}

impl DistanceMetric {
    /// Distance between two coordinate vectors, computed in the widened
    /// accumulator type. `Euclidean` is the squared Euclidean distance; the
    /// absolute difference is taken per dimension before squaring so that
    /// unsigned coordinate types cannot underflow.
    pub fn distance<T: Coordinate>(
        self,
        x: &ArrayView1<'_, T>,
        y: &ArrayView1<'_, T>,
    ) -> T::Accum {
        match self {
            DistanceMetric::Euclidean => {
                let mut dist = T::Accum::zero();
                for (&a, &b) in x.iter().zip(y.iter()) {
                    let diff = a.abs_diff(b).widen();
                    dist += diff * diff;
                }
                dist
            }
        }
    }
}

/// How initial centroids are drawn from the point set.
///
/// Both strategies are deterministic: repeated runs over the same point
/// buffer seed the same centroids. No time-based entropy is used anywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitStrategy {
    /// Copy the points at the given indices, one per cluster in order. The
    /// list may be longer than the cluster count; the first `clusters`
    /// entries are used. Duplicate indices are permitted and produce
    /// coincident centroids.
    FixedIndices(Vec<usize>),
    /// Sample `clusters` distinct point indices uniformly, without
    /// replacement, from a generator seeded with the given value. The
    /// generator is scoped to a single initialization call.
    SeededRandom(u64),
}

impl Default for InitStrategy {
    /// The documented pivot list [`DEFAULT_PIVOT_INDICES`].
    fn default() -> Self {
        InitStrategy::FixedIndices(DEFAULT_PIVOT_INDICES.to_vec())
    }
}

impl InitStrategy {
    fn validate(&self, size: usize, clusters: usize) -> Result<()> {
        match self {
            InitStrategy::FixedIndices(indices) => {
                if indices.len() < clusters {
                    return Err(Error::invalid_configuration(format!(
                        "initialization list holds {} indices but {} clusters were requested",
                        indices.len(),
                        clusters
                    )));
                }
                if let Some(&idx) = indices[..clusters].iter().find(|&&idx| idx >= size) {
                    return Err(Error::invalid_configuration(format!(
                        "initialization index {idx} is out of range for {size} points"
                    )));
                }
                Ok(())
            }
            InitStrategy::SeededRandom(_) => Ok(()),
        }
    }
}

/// Lloyd's k-means over a borrowed flat point buffer.
///
/// The engine holds a non-owning view of the caller's row-major
/// `size * dimensions` coordinate buffer, which must outlive the engine and
/// must not be mutated while a run is in progress. Centroids, per-cluster
/// sums and per-cluster counts are owned by the engine and released with it.
#[derive(Debug)]
pub struct KMeans<'a, T: Coordinate> {
    points: ArrayView2<'a, T>,
    centroids: Array2<T>,
    accum: Array2<T::Accum>,
    assigned: Vec<usize>,
    metric: DistanceMetric,
    init: InitStrategy,
    elapsed: Duration,
}

impl<'a, T: Coordinate> KMeans<'a, T> {
    /// Creates an engine bound to `points` with the default initialization
    /// strategy.
    pub fn new(points: &'a [T], size: usize, dimensions: usize, clusters: usize) -> Result<Self> {
        Self::with_init(points, size, dimensions, clusters, InitStrategy::default())
    }

    /// Creates an engine with an explicit initialization strategy.
    ///
    /// All configuration is checked here; [`run`](Self::run) itself cannot
    /// fail.
    pub fn with_init(
        points: &'a [T],
        size: usize,
        dimensions: usize,
        clusters: usize,
        init: InitStrategy,
    ) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::invalid_configuration("dimensions must be at least 1"));
        }
        if size == 0 || points.is_empty() {
            return Err(Error::invalid_configuration("point buffer is empty"));
        }
        if clusters == 0 {
            return Err(Error::invalid_configuration(
                "cluster count must be at least 1",
            ));
        }
        if clusters > size {
            return Err(Error::invalid_configuration(format!(
                "cluster count {clusters} exceeds point count {size}"
            )));
        }
        if points.len() != size * dimensions {
            return Err(Error::invalid_configuration(format!(
                "point buffer holds {} values, expected size * dimensions = {} * {} = {}",
                points.len(),
                size,
                dimensions,
                size * dimensions
            )));
        }
        init.validate(size, clusters)?;

        let points = ArrayView2::from_shape((size, dimensions), points)
            .map_err(|e| Error::invalid_configuration(e.to_string()))?;

        Ok(KMeans {
            points,
            centroids: Array2::zeros((clusters, dimensions)),
            accum: Array2::zeros((clusters, dimensions)),
            assigned: vec![0; clusters],
            metric: DistanceMetric::Euclidean,
            init,
            elapsed: Duration::ZERO,
        })
    }

    /// Runs initialization once, then exactly `iterations` full
    /// assignment-then-update passes. There is no convergence check;
    /// `run(0)` seeds centroids and performs no refinement.
    ///
    /// Re-invocation re-initializes centroids and reruns, overwriting prior
    /// state. The duration of the iteration loop (initialization excluded)
    /// is captured and readable via [`runtime`](Self::runtime).
    pub fn run(&mut self, iterations: usize) {
        self.init_centroids();
        let start = Instant::now();
        for _ in 0..iterations {
            self.accum.fill(T::Accum::zero());
            self.assigned.fill(0);
            self.assignment();
            self.update();
        }
        self.elapsed = start.elapsed();
        debug!(
            "{} iterations over {} points into {} clusters in {} us",
            iterations,
            self.points.nrows(),
            self.centroids.nrows(),
            self.elapsed.as_micros()
        );
    }

    /// Sum of squared distances from every point to its nearest current
    /// centroid. Recomputed on every call; does not touch engine state.
    pub fn sse(&self) -> T::Accum {
        let clusters = self.centroids.nrows();
        let mut sse = T::Accum::zero();
        for point in self.points.axis_iter(Axis(0)) {
            let mut best = self.metric.distance(&point, &self.centroids.row(0));
            for c in 1..clusters {
                let dist = self.metric.distance(&point, &self.centroids.row(c));
                if dist < best {
                    best = dist;
                }
            }
            sse += best;
        }
        sse
    }

    /// Read-only view of the current centroid buffer, `clusters` rows of
    /// `dimensions` coordinates each.
    pub fn centroids(&self) -> ArrayView2<'_, T> {
        self.centroids.view()
    }

    /// How many points each cluster received in the last iteration.
    pub fn assignment_counts(&self) -> &[usize] {
        &self.assigned
    }

    /// Wall-clock duration of the last run's iteration loop.
    pub fn runtime(&self) -> Duration {
        self.elapsed
    }

    /// Same as [`runtime`](Self::runtime), in whole microseconds.
    pub fn runtime_us(&self) -> u128 {
        self.elapsed.as_micros()
    }

    /// Textual listing of the current centroids, one line per cluster in
    /// cluster order, coordinates in dimension order.
    pub fn dump_centroids(&self) -> String {
        let mut out = String::from("Centroids:\n");
        for (c, centroid) in self.centroids.axis_iter(Axis(0)).enumerate() {
            let _ = write!(out, "centroid[{c}]:");
            for value in centroid.iter() {
                let _ = write!(out, " {value}");
            }
            out.push('\n');
        }
        out
    }

    fn init_centroids(&mut self) {
        let clusters = self.centroids.nrows();
        match &self.init {
            InitStrategy::FixedIndices(indices) => {
                for (c, &idx) in indices.iter().take(clusters).enumerate() {
                    self.centroids.row_mut(c).assign(&self.points.row(idx));
                }
                debug!("seeded {clusters} centroids from fixed pivot rows");
            }
            InitStrategy::SeededRandom(seed) => {
                let mut rng = StdRng::seed_from_u64(*seed);
                let picked = (0..self.points.nrows()).choose_multiple(&mut rng, clusters);
                for (c, &idx) in picked.iter().enumerate() {
                    self.centroids.row_mut(c).assign(&self.points.row(idx));
                }
                debug!("seeded {clusters} centroids from rng seed {seed}");
            }
        }
    }

    /// Labels every point with its nearest centroid, accumulating the
    /// point's coordinates into that cluster's running sum. Ties go to the
    /// lowest cluster index: the running best is seeded from cluster 0 and
    /// only replaced on strict improvement.
    fn assignment(&mut self) {
        let points = self.points;
        let clusters = self.centroids.nrows();
        for point in points.axis_iter(Axis(0)) {
            let mut best = self.metric.distance(&point, &self.centroids.row(0));
            let mut nearest = 0;
            for c in 1..clusters {
                let dist = self.metric.distance(&point, &self.centroids.row(c));
                if dist < best {
                    best = dist;
                    nearest = c;
                }
            }
            self.accum
                .row_mut(nearest)
                .zip_mut_with(&point, |sum, &x| *sum += x.widen());
            self.assigned[nearest] += 1;
        }
    }

    /// Moves every non-empty cluster's centroid to the mean of its members.
    /// A cluster that received no points keeps its previous centroid.
    fn update(&mut self) {
        for c in 0..self.centroids.nrows() {
            let count = self.assigned[c];
            if count == 0 {
                continue;
            }
            let sums = self.accum.row(c);
            self.centroids
                .row_mut(c)
                .zip_mut_with(&sums, |centroid, &sum| *centroid = T::mean(sum, count));
        }
    }
}
