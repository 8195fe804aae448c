//! Solution and violation types.

use super::{Fleet, Route, RouteMetrics};

/// A type of constraint violation in a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Load that exceeded capacity.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Route duration exceeds the vehicle's maximum work time.
    MaxWorkTimeExceeded {
        /// Route index.
        route_index: usize,
        /// Actual duration.
        duration: i64,
        /// Maximum allowed duration.
        max_work_time: i64,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }

    /// Index of the offending route.
    pub fn route_index(&self) -> usize {
        match self.kind {
            ViolationType::CapacityExceeded { route_index, .. }
            | ViolationType::MaxWorkTimeExceeded { route_index, .. } => route_index,
        }
    }
}

/// A complete assignment of customers to the vehicles of a fleet.
///
/// There is exactly one route per vehicle; unused vehicles keep an empty
/// route. The total cost is cached and updated whenever a route is replaced
/// through [`Solution::replace_route`].
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Fleet, RouteMetrics, Solution};
///
/// let mut sol = Solution::new(Fleet::new(2, 100, 1000));
/// assert_eq!(sol.num_routes(), 2);
///
/// sol.replace_route(0, vec![1, 2], RouteMetrics { load: 20, duration: 30, cost: 30 });
/// assert_eq!(sol.total_cost(), 30);
/// assert_eq!(sol.num_served(), 2);
/// assert_eq!(sol.num_empty_routes(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Route>,
    fleet: Fleet,
    total_cost: i64,
}

impl Solution {
    /// Creates a solution with one empty route per vehicle.
    pub fn new(fleet: Fleet) -> Self {
        Self {
            routes: (0..fleet.vehicles()).map(Route::new).collect(),
            fleet,
            total_cost: 0,
        }
    }

    /// The fleet this solution is built for.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Returns the routes, one per vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the route served by vehicle `index`.
    pub fn route(&self, index: usize) -> &Route {
        &self.routes[index]
    }

    /// Replaces the sequence of route `index` and refreshes the cached total.
    pub fn replace_route(&mut self, index: usize, customers: Vec<usize>, metrics: RouteMetrics) {
        let old = self.routes[index].cost();
        self.routes[index].replace(customers, metrics);
        self.total_cost += metrics.cost - old;
    }

    /// Number of routes (equals the number of vehicles).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of vehicles that serve nobody.
    pub fn num_empty_routes(&self) -> usize {
        self.routes.iter().filter(|r| r.is_empty()).count()
    }

    /// Total number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Cached total travel cost.
    pub fn total_cost(&self) -> i64 {
        self.total_cost
    }

    /// Recomputes the total from the route aggregates.
    pub fn recompute_total_cost(&self) -> i64 {
        self.routes.iter().map(|r| r.cost()).sum()
    }

    /// Capacity and work-time violations of every route.
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        for (idx, route) in self.routes.iter().enumerate() {
            if route.load() > self.fleet.capacity() {
                out.push(Violation::new(ViolationType::CapacityExceeded {
                    route_index: idx,
                    load: route.load(),
                    capacity: self.fleet.capacity(),
                }));
            }
            if route.duration() > self.fleet.max_work_time() {
                out.push(Violation::new(ViolationType::MaxWorkTimeExceeded {
                    route_index: idx,
                    duration: route.duration(),
                    max_work_time: self.fleet.max_work_time(),
                }));
            }
        }
        out
    }

    /// Returns `true` if every route respects capacity and work time.
    pub fn is_feasible(&self) -> bool {
        self.routes
            .iter()
            .all(|r| self.fleet.admits(r.load(), r.duration()))
    }

    /// Returns `true` if every customer `1..num_vertices` appears in exactly
    /// one route and nothing else (depot, unknown indices) appears at all.
    pub fn is_partition(&self, num_vertices: usize) -> bool {
        let mut seen = vec![false; num_vertices];
        for &c in self.routes.iter().flat_map(|r| r.customers()) {
            if c == 0 || c >= num_vertices || seen[c] {
                return false;
            }
            seen[c] = true;
        }
        seen.iter().skip(1).all(|&s| s)
    }
}
