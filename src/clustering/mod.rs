//! Spatial clustering of orders.
//!
//! - [`ClusterAssigner`] — Seeded k-means++ / Lloyd partitioning
//! - [`Clusters`] — Cluster id → ascending member indices

mod kmeans;

pub use kmeans::{ClusterAssigner, Clusters};
