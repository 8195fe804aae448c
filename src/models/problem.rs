//! Problem instance and the provider/sink traits around the solver.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Customer, Fleet, RoutingPlan};
use crate::error::{InstanceError, SolveError};
use crate::graph::Graph;

/// One directed travel cost between two vertices of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEntry {
    /// Source vertex index.
    pub from: usize,
    /// Destination vertex index.
    pub to: usize,
    /// Travel cost (and travel time).
    #[serde(alias = "value")]
    pub weight: i64,
}

impl CostEntry {
    /// Creates a cost entry.
    pub fn new(from: usize, to: usize, weight: i64) -> Self {
        Self { from, to, weight }
    }
}

/// A CVRP instance as handed over by an input provider.
///
/// Vertex 0 is the depot. `costs` must cover every ordered pair of distinct
/// vertices; [`Instance::build_graph`] checks this together with the other
/// structural rules before any optimization starts.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{CostEntry, Customer, Fleet, Instance};
///
/// let instance = Instance {
///     customers: vec![Customer::depot("D", 0, 0), Customer::new("A", 1, 0, 5, 2)],
///     costs: vec![CostEntry::new(0, 1, 4), CostEntry::new(1, 0, 4)],
///     fleet: Fleet::new(1, 10, 100),
/// };
/// let graph = instance.build_graph().unwrap();
/// assert_eq!(graph.num_customers(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// All vertices, depot first.
    #[serde(alias = "vertices")]
    pub customers: Vec<Customer>,
    /// Directed travel costs, given either as one list or as one row of
    /// entries per source vertex.
    #[serde(deserialize_with = "flat_or_rows")]
    pub costs: Vec<CostEntry>,
    /// Fleet parameters.
    #[serde(flatten)]
    pub fleet: Fleet,
}

impl Instance {
    /// Validates the instance and builds its graph.
    pub fn build_graph(&self) -> Result<Graph, InstanceError> {
        validate_fleet(&self.fleet)?;
        let depot = self.customers.first().ok_or(InstanceError::NoDepot)?;
        if depot.demand() != 0 || depot.service_time() != 0 {
            return Err(InstanceError::DepotHasDemand(depot.name().to_string()));
        }

        let mut names = HashSet::new();
        let mut graph = Graph::with_capacity(self.customers.len());
        for c in &self.customers {
            if !names.insert(c.name()) {
                return Err(InstanceError::DuplicateCustomer(c.name().to_string()));
            }
            if c.demand() < 0 || c.service_time() < 0 {
                return Err(InstanceError::NegativeDemand(c.name().to_string()));
            }
            graph.insert_vertex(c.clone());
        }

        let n = graph.len();
        for e in &self.costs {
            if e.from >= n {
                return Err(InstanceError::UnknownCustomer(e.from));
            }
            if e.to >= n {
                return Err(InstanceError::UnknownCustomer(e.to));
            }
            if e.weight < 0 {
                return Err(InstanceError::NegativeWeight {
                    from: e.from,
                    to: e.to,
                    weight: e.weight,
                });
            }
            graph.insert_edge(e.from, e.to, e.weight);
        }

        check_complete(&graph)?;
        Ok(graph)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CostTable {
    Flat(Vec<CostEntry>),
    Rows(Vec<Vec<CostEntry>>),
}

fn flat_or_rows<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<CostEntry>, D::Error> {
    Ok(match CostTable::deserialize(deserializer)? {
        CostTable::Flat(entries) => entries,
        CostTable::Rows(rows) => rows.into_iter().flatten().collect(),
    })
}

pub(crate) fn validate_fleet(fleet: &Fleet) -> Result<(), InstanceError> {
    if fleet.vehicles() == 0 {
        return Err(InstanceError::InvalidFleet("no vehicles".into()));
    }
    if fleet.capacity() <= 0 {
        return Err(InstanceError::InvalidFleet(format!(
            "capacity {} is not positive",
            fleet.capacity()
        )));
    }
    if fleet.max_work_time() <= 0 {
        return Err(InstanceError::InvalidFleet(format!(
            "max work time {} is not positive",
            fleet.max_work_time()
        )));
    }
    Ok(())
}

pub(crate) fn check_complete(graph: &Graph) -> Result<(), InstanceError> {
    if graph.is_empty() {
        return Err(InstanceError::NoDepot);
    }
    match graph.missing_edge() {
        Some((from, to)) => Err(InstanceError::MissingEdge { from, to }),
        None => Ok(()),
    }
}

/// Source of a validated problem instance (file reader, API payload, ...).
pub trait InstanceProvider {
    /// Produces the instance, or a descriptive error.
    fn provide(&self) -> Result<Instance, SolveError>;
}

impl InstanceProvider for Instance {
    fn provide(&self) -> Result<Instance, SolveError> {
        Ok(self.clone())
    }
}

/// Receiver of the final routing plan.
pub trait OutputSink {
    /// Accepts the optimized routes.
    fn accept(&mut self, plan: &RoutingPlan);
}

impl OutputSink for Vec<RoutingPlan> {
    fn accept(&mut self, plan: &RoutingPlan) {
        self.push(plan.clone());
    }
}
