//! Contains the implementation of the [disjoint-sets/union-find] forest the percolation
//! model is built on.
//!
//! [disjoint-sets/union-find]: https://en.wikipedia.org/wiki/Disjoint-set_data_structure

mod metadata;
pub mod forest;
