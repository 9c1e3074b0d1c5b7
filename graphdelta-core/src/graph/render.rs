//! Human-readable rendering of a [`DiGraph`] for debugging.

use std::fmt;

use super::DiGraph;

impl<V: fmt::Display, E: fmt::Display> fmt::Display for DiGraph<V, E> {
    /// Lists each valid vertex with its payload, outgoing edges and incoming
    /// edges as `(source, target, payload)` tuples.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for u in self.valid_vertices() {
            let Some(payload) = self.vertex_data(u) else {
                continue;
            };
            writeln!(f, "Vertex {u}: {payload}")?;

            write!(f, "  Outgoing edges:")?;
            if let Some(map) = self.edge_map(u) {
                for (v, edge) in map {
                    write!(f, " ({u}, {v}, {edge})")?;
                }
            }
            writeln!(f)?;

            write!(f, "  Incoming edges:")?;
            for v in self.in_edges(u) {
                if let Some(edge) = self.edge_data(v, u) {
                    write!(f, " ({v}, {u}, {edge})")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
