//! A bucket kd-tree.
//!
//! Like the point kd-tree this partitions space one dimension at a time, but
//! points are collected in leaf buckets of up to [`BUCKET_MAX`] entries, and
//! the cutting plane is chosen adaptively from a full bucket's point
//! distribution rather than from a single point: the cutting dimension is the
//! one with the widest value range, the cutting value its arithmetic mean.
//!
//! Leaves that overflow split in two; when removals drop an internal node's
//! subtree below [`MERGE_THRESHOLD`] points, its children collapse back into
//! a single leaf.

mod index;
mod strategies;

pub use index::{BucketKDTree, BUCKET_MAX, MERGE_THRESHOLD};
