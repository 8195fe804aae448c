//! Route type.

/// Aggregates of a customer sequence: total demand, duration, and travel cost.
///
/// `duration` is travel cost plus service time, so
/// `duration - cost` is the sum of service times on the route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMetrics {
    /// Total demand served.
    pub load: i32,
    /// Travel plus service time, depot to depot.
    pub duration: i64,
    /// Travel cost, depot to depot.
    pub cost: i64,
}

impl RouteMetrics {
    /// Sum of service times on the route.
    pub fn service_time(&self) -> i64 {
        self.duration - self.cost
    }
}

/// An ordered sequence of customers assigned to a single vehicle.
///
/// A route starts and ends at the depot (vertex 0), which is not stored in
/// the sequence. Load, duration, and cost are derived from the sequence and
/// are replaced together with it, so they always describe the current
/// contents.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Route, RouteMetrics};
///
/// let mut route = Route::new(0);
/// assert!(route.is_empty());
///
/// route.replace(vec![3, 1], RouteMetrics { load: 15, duration: 40, cost: 30 });
/// assert_eq!(route.customers(), &[3, 1]);
/// assert_eq!(route.load(), 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle_id: usize,
    customers: Vec<usize>,
    metrics: RouteMetrics,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            customers: Vec::new(),
            metrics: RouteMetrics::default(),
        }
    }

    /// Swaps in a new customer sequence together with its aggregates.
    ///
    /// The caller is responsible for `metrics` matching `customers`; the
    /// [`RouteEvaluator`](crate::evaluation::RouteEvaluator) computes both.
    pub fn replace(&mut self, customers: Vec<usize>, metrics: RouteMetrics) {
        self.customers = customers;
        self.metrics = metrics;
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Customer vertex indices in visiting order.
    pub fn customers(&self) -> &[usize] {
        &self.customers
    }

    /// Number of customers (excluding depot).
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if this vehicle serves nobody.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// All aggregates of the route.
    pub fn metrics(&self) -> RouteMetrics {
        self.metrics
    }

    /// Total demand served.
    pub fn load(&self) -> i32 {
        self.metrics.load
    }

    /// Travel plus service time.
    pub fn duration(&self) -> i64 {
        self.metrics.duration
    }

    /// Travel cost of the depot-to-depot tour.
    pub fn cost(&self) -> i64 {
        self.metrics.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(2);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 2);
        assert_eq!(r.cost(), 0);
        assert_eq!(r.load(), 0);
    }

    #[test]
    fn test_route_replace() {
        let mut r = Route::new(0);
        let m = RouteMetrics {
            load: 20,
            duration: 55,
            cost: 45,
        };
        r.replace(vec![5, 3], m);
        assert_eq!(r.len(), 2);
        assert_eq!(r.customers(), &[5, 3]);
        assert_eq!(r.metrics(), m);
        assert_eq!(r.metrics().service_time(), 10);
    }
}
