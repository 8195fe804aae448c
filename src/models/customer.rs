//! Customer type.

use serde::{Deserialize, Serialize};

/// A customer (or depot) in a routing problem.
///
/// Vertex 0 of an instance is conventionally the depot. Customers have a
/// unique name, integer coordinates, a demand, and a service time. Values are
/// immutable after construction; the graph refers to customers by their dense
/// vertex index, not by name.
///
/// Field names also accept the short forms used by exported instance files
/// (`request` for demand, `time` for service time).
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Customer;
///
/// let depot = Customer::depot("D", 35, 35);
/// assert_eq!(depot.demand(), 0);
/// assert_eq!(depot.service_time(), 0);
///
/// let c = Customer::new("C1", 41, 49, 10, 5);
/// assert_eq!(c.name(), "C1");
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    name: String,
    x: i32,
    y: i32,
    #[serde(default, alias = "request")]
    demand: i32,
    #[serde(default, alias = "time")]
    service_time: i64,
}

impl Customer {
    /// Creates a new customer.
    pub fn new(name: impl Into<String>, x: i32, y: i32, demand: i32, service_time: i64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            demand,
            service_time,
        }
    }

    /// Creates a depot at the given coordinates (no demand, no service time).
    pub fn depot(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self::new(name, x, y, 0, 0)
    }

    /// Unique customer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// X-coordinate.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Demand at this customer.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Time spent serving this customer.
    pub fn service_time(&self) -> i64 {
        self.service_time
    }

    /// Euclidean distance to another customer, rounded to the nearest integer.
    pub fn distance_to(&self, other: &Customer) -> i64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt().round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_new() {
        let c = Customer::new("A", 10, 20, 5, 3);
        assert_eq!(c.name(), "A");
        assert_eq!(c.x(), 10);
        assert_eq!(c.y(), 20);
        assert_eq!(c.demand(), 5);
        assert_eq!(c.service_time(), 3);
    }

    #[test]
    fn test_customer_depot() {
        let d = Customer::depot("D", 35, 35);
        assert_eq!(d.demand(), 0);
        assert_eq!(d.service_time(), 0);
    }

    #[test]
    fn test_customer_distance() {
        let a = Customer::depot("D", 0, 0);
        let b = Customer::new("B", 3, 4, 0, 0);
        assert_eq!(a.distance_to(&b), 5);
        assert_eq!(b.distance_to(&a), 5);
    }

    #[test]
    fn test_equality_by_value() {
        let a = Customer::new("A", 1, 2, 3, 4);
        assert_eq!(a, a.clone());
        assert_ne!(a, Customer::new("B", 1, 2, 3, 4));
    }
}
