//! Lloyd's k-means clustering over caller-owned flat point buffers.
//!
//! The engine borrows a row-major `size * dimensions` coordinate buffer,
//! owns its centroid and accumulator state, and refines centroids for a
//! fixed number of iterations: assign every point to its nearest centroid,
//! then recompute each centroid as the mean of its members. Clustering
//! quality is reported as the sum of squared errors, and the wall-clock
//! cost of the iteration loop is captured alongside the result.
//!
//! ```
//! use lkmeans::{InitStrategy, KMeans};
//!
//! let points = vec![1.0f32, 1.1, 4.0, 4.2, 1.05, 4.1];
//! let mut engine =
//!     KMeans::with_init(&points, 6, 1, 2, InitStrategy::FixedIndices(vec![0, 2]))?;
//! engine.run(10);
//! println!("{}", engine.dump_centroids());
//! println!("SSE: {}", engine.sse());
//! # Ok::<(), lkmeans::Error>(())
//! ```

pub mod engine;
pub mod error;
pub mod scalar;

pub use engine::{DistanceMetric, InitStrategy, KMeans, DEFAULT_PIVOT_INDICES};
pub use error::{Error, Result};
pub use scalar::{Accumulator, Coordinate};
