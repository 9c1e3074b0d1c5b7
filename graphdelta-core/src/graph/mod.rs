//! Dynamic directed graph with tombstoned vertices.
//!
//! Vertices are addressed by dense ids assigned in creation order. Removing a
//! vertex leaves an invalid placeholder behind so that ids are never reused.
//! Each vertex owns an [`OrderedEdgeMap`] from target id to edge payload.

mod render;

use tracing::trace;

use crate::edge_map::{Keys, OrderedEdgeMap};

/// Dense vertex identifier; the vertex's index in the graph's slot arrays.
pub type VertexId = usize;

/// Simple directed graph with scalar vertex and edge payloads.
///
/// `order` and `size` are maintained counters, as are per-vertex in-degrees,
/// so all three are reported in constant time.
///
/// # Examples
/// ```
/// use graphdelta_core::DiGraph;
///
/// let mut graph: DiGraph<&str, u32> = DiGraph::new();
/// let a = graph.add_vertex("a");
/// let b = graph.add_vertex("b");
/// assert!(graph.add_edge(a, b, 5));
/// assert_eq!(graph.edge_data(a, b), Some(&5));
/// graph.remove_vertex(b);
/// assert_eq!(graph.order(), 1);
/// assert_eq!(graph.size(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct DiGraph<V, E> {
    valid: Vec<bool>,
    vertex_data: Vec<V>,
    edges: Vec<OrderedEdgeMap<E>>,
    in_degree: Vec<usize>,
    order: usize,
    size: usize,
}

impl<V, E> Default for DiGraph<V, E> {
    fn default() -> Self {
        Self {
            valid: Vec::new(),
            vertex_data: Vec::new(),
            edges: Vec::new(),
            in_degree: Vec::new(),
            order: 0,
            size: 0,
        }
    }
}

impl<V, E> DiGraph<V, E> {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `vertices` vertex slots.
    #[must_use]
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            valid: Vec::with_capacity(vertices),
            vertex_data: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(vertices),
            in_degree: Vec::with_capacity(vertices),
            order: 0,
            size: 0,
        }
    }

    /// Number of currently valid vertices.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of live edges.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of vertex slots ever allocated, including tombstones.
    ///
    /// Every id below this bound is addressable even when it no longer names
    /// a valid vertex.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.valid.len()
    }

    /// Returns `true` when `u` names a valid vertex.
    #[must_use]
    pub fn has_vertex(&self, u: VertexId) -> bool {
        self.valid.get(u).copied().unwrap_or(false)
    }

    /// Returns `true` when the edge `(u, v)` exists.
    #[must_use]
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.edges.get(u).is_some_and(|map| map.contains_key(v))
    }

    /// Appends a new valid vertex and returns its id.
    pub fn add_vertex(&mut self, payload: V) -> VertexId {
        let id = self.valid.len();
        self.valid.push(true);
        self.vertex_data.push(payload);
        self.edges.push(OrderedEdgeMap::new());
        self.in_degree.push(0);
        self.order += 1;
        id
    }

    /// Inserts the edge `(u, v)` carrying `payload`.
    ///
    /// Does nothing unless both endpoints are valid. An existing edge has
    /// its payload overwritten without changing `size`. Returns `true` when
    /// a new edge was created.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, payload: E) -> bool {
        if !self.has_vertex(u) || !self.has_vertex(v) {
            return false;
        }
        if self.edges[u].insert(v, payload).is_some() {
            return false;
        }
        self.size += 1;
        self.in_degree[v] += 1;
        true
    }

    /// Inserts the edge `(u, v)` only when it does not exist yet.
    ///
    /// Unlike [`DiGraph::add_edge`], an existing payload is left untouched.
    pub fn add_edge_checked(&mut self, u: VertexId, v: VertexId, payload: E) -> bool {
        if self.has_edge(u, v) {
            return false;
        }
        self.add_edge(u, v, payload)
    }

    /// Removes the edge `(u, v)` and returns its payload, or `None` when the
    /// edge does not exist.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Option<E> {
        if !self.has_vertex(u) || !self.has_vertex(v) {
            return None;
        }
        let payload = self.edges[u].remove(v)?;
        self.size -= 1;
        self.in_degree[v] -= 1;
        Some(payload)
    }

    /// In-degree of `u`; zero for invalid vertices.
    #[must_use]
    pub fn in_degree(&self, u: VertexId) -> usize {
        if !self.has_vertex(u) {
            return 0;
        }
        self.in_degree[u]
    }

    /// Out-degree of `u`; zero for invalid vertices.
    #[must_use]
    pub fn out_degree(&self, u: VertexId) -> usize {
        self.edges.get(u).map_or(0, OrderedEdgeMap::len)
    }

    /// Targets of the edges leaving `u`, in ascending order.
    #[must_use]
    pub fn out_edges(&self, u: VertexId) -> Vec<VertexId> {
        self.out_neighbours(u).collect()
    }

    /// Lazily iterates over the targets of the edges leaving `u`.
    #[must_use]
    pub fn out_neighbours(&self, u: VertexId) -> OutNeighbours<'_, E> {
        OutNeighbours {
            inner: self
                .edges
                .get(u)
                .filter(|_| self.has_vertex(u))
                .map(OrderedEdgeMap::keys),
        }
    }

    /// Sources of the edges entering `u`, in ascending order.
    ///
    /// Scans every vertex slot, so the cost is linear in the slot count.
    #[must_use]
    pub fn in_edges(&self, u: VertexId) -> Vec<VertexId> {
        if !self.has_vertex(u) {
            return Vec::new();
        }
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, map)| map.contains_key(u))
            .map(|(source, _)| source)
            .collect()
    }

    /// Returns the edge map owned by `u`, if `u` is valid.
    #[must_use]
    pub fn edge_map(&self, u: VertexId) -> Option<&OrderedEdgeMap<E>> {
        self.edges.get(u).filter(|_| self.has_vertex(u))
    }

    /// Payload of vertex `u`, or `None` when `u` is not valid.
    #[must_use]
    pub fn vertex_data(&self, u: VertexId) -> Option<&V> {
        if !self.has_vertex(u) {
            return None;
        }
        self.vertex_data.get(u)
    }

    /// Replaces the payload of vertex `u`. Returns `false` when `u` is not
    /// valid.
    pub fn set_vertex_data(&mut self, u: VertexId, payload: V) -> bool {
        if !self.has_vertex(u) {
            return false;
        }
        self.vertex_data[u] = payload;
        true
    }

    /// Payload of the edge `(u, v)`, or `None` when the edge does not exist.
    #[must_use]
    pub fn edge_data(&self, u: VertexId, v: VertexId) -> Option<&E> {
        self.edge_map(u)?.get(v)
    }

    /// Replaces the payload of the edge `(u, v)`. Returns `false` when the
    /// edge does not exist.
    pub fn set_edge_data(&mut self, u: VertexId, v: VertexId, payload: E) -> bool {
        if !self.has_vertex(u) {
            return false;
        }
        self.edges[u].set(v, payload).is_ok()
    }

    /// Ids of the valid vertices in ascending order.
    #[must_use]
    pub fn valid_vertices(&self) -> Vec<VertexId> {
        self.vertices_where(true)
    }

    /// Ids of the tombstoned vertices in ascending order.
    #[must_use]
    pub fn invalid_vertices(&self) -> Vec<VertexId> {
        self.vertices_where(false)
    }

    fn vertices_where(&self, validity: bool) -> Vec<VertexId> {
        self.valid
            .iter()
            .enumerate()
            .filter(|&(_, &valid)| valid == validity)
            .map(|(id, _)| id)
            .collect()
    }

    /// Every live edge as `(source, target)`, source-major and ascending.
    #[must_use]
    pub fn all_edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut edges = Vec::with_capacity(self.size);
        for u in self.valid_vertices() {
            edges.extend(self.out_neighbours(u).map(|v| (u, v)));
        }
        edges
    }

    /// Resets to the empty graph.
    pub fn clear(&mut self) {
        self.valid.clear();
        self.vertex_data.clear();
        self.edges.clear();
        self.in_degree.clear();
        self.order = 0;
        self.size = 0;
    }
}

impl<V, E> DiGraph<V, E> {
    /// Removes every edge whose target is `u`, including a self-loop, and
    /// returns how many were removed. Does nothing for an invalid `u`.
    pub fn remove_incoming_edges(&mut self, u: VertexId) -> usize {
        if !self.has_vertex(u) {
            return 0;
        }
        let removed = self
            .edges
            .iter_mut()
            .filter_map(|map| map.remove(u))
            .count();
        self.size -= removed;
        self.in_degree[u] -= removed;
        removed
    }

    /// Removes every edge whose source is `u` and returns how many were
    /// removed. Does nothing for an invalid `u`.
    pub fn remove_outgoing_edges(&mut self, u: VertexId) -> usize {
        if !self.has_vertex(u) {
            return 0;
        }
        let outgoing = &mut self.edges[u];
        for target in outgoing.keys() {
            self.in_degree[target] -= 1;
        }
        let removed = outgoing.len();
        outgoing.clear();
        self.size -= removed;
        removed
    }
}

impl<V: Default, E> DiGraph<V, E> {
    /// Tombstones vertex `u` and removes every edge touching it.
    ///
    /// The payload is reset to `V::default()` and the id is never reused.
    /// Returns `false` when `u` was already invalid.
    pub fn remove_vertex(&mut self, u: VertexId) -> bool {
        if !self.has_vertex(u) {
            return false;
        }

        let removed_incoming = self.remove_incoming_edges(u);
        let removed_outgoing = self.remove_outgoing_edges(u);

        self.valid[u] = false;
        self.vertex_data[u] = V::default();
        self.order -= 1;
        trace!(
            vertex = u,
            removed_incoming, removed_outgoing, "vertex tombstoned"
        );
        true
    }
}

/// Iterator over the out-neighbours of a vertex, see
/// [`DiGraph::out_neighbours`].
#[derive(Clone, Debug)]
pub struct OutNeighbours<'a, E> {
    inner: Option<Keys<'a, E>>,
}

impl<E> Iterator for OutNeighbours<'_, E> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner
            .as_ref()
            .map_or((0, Some(0)), Iterator::size_hint)
    }
}
