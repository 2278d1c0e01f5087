use lkmeans::{InitStrategy, KMeans};
use ndarray::{Array2, Axis};
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::prelude::*;
use rand_distr::Normal;

/// Generates `n_samples` points scattered around `n_blobs` Gaussian blob
/// centers, flattened row-major.
fn generate_blobs(n_samples: usize, n_features: usize, n_blobs: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);

    let centers = Array2::random_using(
        (n_blobs, n_features),
        Normal::new(50.0f32, 10.0).unwrap(),
        &mut rng,
    );
    let noise = Array2::random_using(
        (n_samples, n_features),
        Normal::new(0.0f32, 5.0).unwrap(),
        &mut rng,
    );
    let blob_pick = Uniform::new(0, n_blobs);

    let mut data = Vec::with_capacity(n_samples * n_features);
    for sample in noise.axis_iter(Axis(0)) {
        let center = centers.row(blob_pick.sample(&mut rng));
        for (d, &offset) in sample.iter().enumerate() {
            data.push(center[d] + offset);
        }
    }
    data
}

fn main() {
    env_logger::init();

    // Parameters for data generation
    let n_samples = 10_000;
    let n_features = 8;
    let n_clusters = 16;
    let n_iters = 25;

    println!("Generating random dataset...");
    println!(
        "Number of Samples: {}, Number of Features: {}, Number of Clusters: {}",
        n_samples, n_features, n_clusters
    );

    let data = generate_blobs(n_samples, n_features, n_clusters, 42);

    println!("Dataset generated.");

    let mut engine = KMeans::with_init(
        &data,
        n_samples,
        n_features,
        n_clusters,
        InitStrategy::SeededRandom(42),
    )
    .expect("engine configuration");

    println!("Starting K-Means clustering...");
    engine.run(n_iters);
    println!("Clustering completed in {} us.", engine.runtime_us());

    print!("{}", engine.dump_centroids());
    println!("SSE: {}", engine.sse());
    println!("Cluster Assignment Counts:");
    for (cluster_id, count) in engine.assignment_counts().iter().enumerate() {
        println!("Cluster {}: {} points", cluster_id, count);
    }
}
