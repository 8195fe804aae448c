//! Customer graph with dense directed adjacency.

use std::collections::HashMap;

use crate::error::GraphError;
use crate::models::Customer;

/// Weight reported by [`Graph::weight`] for a pair without an edge.
///
/// Large enough that no route using it can beat a route without it, small
/// enough that summing a route's worth of them cannot overflow.
pub const UNREACHABLE: i64 = i64::MAX >> 20;

/// All customers of an instance plus a directed travel cost between them.
///
/// Customers live in an arena: each one gets a dense vertex index on
/// insertion, and every lookup is by index. Vertex 0 (the first inserted) is
/// the depot. Edge weights are stored in a dense row-major table of
/// `Option<i64>`, so asymmetric costs are allowed and missing edges are
/// distinguishable from zero-weight ones.
///
/// The table is sized for a vertex capacity rather than the vertex count.
/// It grows geometrically when the capacity runs out, so building an
/// `n`-vertex graph one insertion at a time costs O(n²) overall. Use
/// [`Graph::with_capacity`] when the vertex count is known up front.
///
/// # Examples
///
/// ```
/// use u_cvrp::graph::Graph;
/// use u_cvrp::models::Customer;
///
/// let mut g = Graph::new();
/// let d = g.insert_vertex(Customer::depot("D", 0, 0));
/// let a = g.insert_vertex(Customer::new("A", 3, 4, 10, 0));
/// g.insert_edge(d, a, 5);
/// g.insert_edge(a, d, 7);
///
/// assert_eq!(g.cost(d, a), Ok(5));
/// assert_eq!(g.cost(a, d), Ok(7));
/// assert!(g.cost(a, a).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    customers: Vec<Customer>,
    by_name: HashMap<String, usize>,
    weights: Vec<Option<i64>>,
    /// Row length of `weights`, at least `customers.len()`.
    stride: usize,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            customers: Vec::with_capacity(vertices),
            by_name: HashMap::with_capacity(vertices),
            weights: vec![None; vertices * vertices],
            stride: vertices,
        }
    }

    /// Builds a complete graph with rounded Euclidean weights.
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        let mut g = Self::with_capacity(customers.len());
        for c in customers {
            g.insert_vertex(c);
        }
        let n = g.len();
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let w = g.customers[i].distance_to(&g.customers[j]);
                    g.insert_edge(i, j, w);
                }
            }
        }
        g
    }

    /// Adds a customer with no edges and returns its vertex index.
    ///
    /// A customer whose name is already present is not inserted again; the
    /// existing index is returned.
    pub fn insert_vertex(&mut self, customer: Customer) -> usize {
        if let Some(&idx) = self.by_name.get(customer.name()) {
            return idx;
        }
        let idx = self.customers.len();
        if idx == self.stride {
            self.grow((2 * self.stride).max(4));
        }
        self.by_name.insert(customer.name().to_string(), idx);
        self.customers.push(customer);
        idx
    }

    /// Re-lays the table out with row length `stride`.
    fn grow(&mut self, stride: usize) {
        let n = self.customers.len();
        let mut weights = vec![None; stride * stride];
        for i in 0..n {
            weights[i * stride..i * stride + n]
                .copy_from_slice(&self.weights[i * self.stride..i * self.stride + n]);
        }
        self.weights = weights;
        self.stride = stride;
    }

    /// Adds or overwrites the directed edge `from -> to`.
    ///
    /// Self-edges and edges touching unknown vertices are ignored.
    pub fn insert_edge(&mut self, from: usize, to: usize, weight: i64) {
        let n = self.len();
        if from == to || from >= n || to >= n {
            return;
        }
        self.weights[from * self.stride + to] = Some(weight);
    }

    /// Removes the directed edge `from -> to` if present.
    pub fn remove_edge(&mut self, from: usize, to: usize) {
        let n = self.len();
        if from < n && to < n {
            self.weights[from * self.stride + to] = None;
        }
    }

    /// Vertices ordered by ascending cost from the depot.
    ///
    /// The depot itself comes first with cost 0. Vertices the depot has no
    /// edge to are left out. Equal weights keep insertion order.
    pub fn sort_from_depot(&self) -> Vec<(usize, i64)> {
        if self.customers.is_empty() {
            return Vec::new();
        }
        let mut out = vec![(0, 0)];
        out.extend(self.outgoing(0));
        out[1..].sort_by_key(|&(_, w)| w);
        out
    }

    /// Customers reachable from `vertex`, ascending by edge weight.
    ///
    /// The depot is never part of a neighborhood. Equal weights keep
    /// insertion order.
    pub fn neighborhood(&self, vertex: usize) -> Result<Vec<(usize, i64)>, GraphError> {
        if vertex >= self.len() {
            return Err(GraphError::VertexNotFound(vertex));
        }
        let mut out: Vec<(usize, i64)> = self.outgoing(vertex).filter(|&(v, _)| v != 0).collect();
        out.sort_by_key(|&(_, w)| w);
        Ok(out)
    }

    /// Weight of the directed edge `from -> to`.
    pub fn cost(&self, from: usize, to: usize) -> Result<i64, GraphError> {
        let n = self.len();
        if from >= n {
            return Err(GraphError::VertexNotFound(from));
        }
        if to >= n {
            return Err(GraphError::VertexNotFound(to));
        }
        self.weights[from * self.stride + to].ok_or(GraphError::EdgeNotFound { from, to })
    }

    /// Weight lookup for hot loops.
    ///
    /// Returns 0 for `from == to` and [`UNREACHABLE`] for a missing edge.
    ///
    /// # Panics
    ///
    /// Indices must be below [`len`](Self::len). Other indices either
    /// panic or read as [`UNREACHABLE`].
    #[inline]
    pub fn weight(&self, from: usize, to: usize) -> i64 {
        if from == to {
            return 0;
        }
        self.weights[from * self.stride + to].unwrap_or(UNREACHABLE)
    }

    /// First ordered pair of distinct vertices without an edge, if any.
    pub fn missing_edge(&self) -> Option<(usize, usize)> {
        let n = self.len();
        (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .find(|&(i, j)| i != j && self.weights[i * self.stride + j].is_none())
    }

    /// Customer at vertex `index`.
    pub fn customer(&self, index: usize) -> &Customer {
        &self.customers[index]
    }

    /// All vertices, depot first.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Vertex index of the customer with this name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Number of vertices including the depot.
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if not even the depot has been inserted.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Number of customers excluding the depot.
    pub fn num_customers(&self) -> usize {
        self.len().saturating_sub(1)
    }

    fn outgoing(&self, from: usize) -> impl Iterator<Item = (usize, i64)> + '_ {
        let row = from * self.stride;
        self.weights[row..row + self.len()]
            .iter()
            .enumerate()
            .filter_map(|(to, w)| w.map(|w| (to, w)))
    }
}
