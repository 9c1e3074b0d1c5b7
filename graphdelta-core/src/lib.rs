//! Graphdelta core library.
//!
//! Provides a dynamic directed graph whose per-vertex adjacency is an
//! arena-backed AVL map, a breadth-first traversal, and a generator that
//! samples edge insertion/deletion workloads under uniform and
//! preferential-attachment models.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod delta;
mod edge_map;
mod error;
mod graph;
mod traversal;

#[cfg(test)]
mod test_utils;

pub use crate::{
    delta::{
        ApplyReport, DeltaConfig, DeltaGenerator, GenerationReport, GraphDelta,
        PreferentialParams, preferential_probabilities,
    },
    edge_map::{Iter, Keys, OrderedEdgeMap, Values},
    error::{DeltaError, DeltaErrorCode, EdgeMapError, EdgeMapErrorCode, Result},
    graph::{DiGraph, OutNeighbours, VertexId},
    traversal::{BreadthFirst, breadth_first_search},
};
