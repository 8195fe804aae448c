//! Homogeneous fleet parameters.

use serde::{Deserialize, Serialize};

/// The vehicles available to serve an instance.
///
/// All vehicles share the same capacity and maximum work time; a route's
/// load may not exceed `capacity` and its duration (travel plus service)
/// may not exceed `max_work_time`.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Fleet;
///
/// let fleet = Fleet::new(3, 100, 480);
/// assert_eq!(fleet.vehicles(), 3);
/// assert!(fleet.admits(100, 480));
/// assert!(!fleet.admits(101, 10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    vehicles: usize,
    capacity: i32,
    #[serde(alias = "worktime")]
    max_work_time: i64,
}

impl Fleet {
    /// Creates a fleet of `vehicles` vehicles.
    pub fn new(vehicles: usize, capacity: i32, max_work_time: i64) -> Self {
        Self {
            vehicles,
            capacity,
            max_work_time,
        }
    }

    /// Sets the number of vehicles.
    pub fn with_vehicles(mut self, vehicles: usize) -> Self {
        self.vehicles = vehicles;
        self
    }

    /// Sets the per-vehicle capacity.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the per-vehicle maximum work time.
    pub fn with_max_work_time(mut self, max_work_time: i64) -> Self {
        self.max_work_time = max_work_time;
        self
    }

    /// Number of vehicles.
    pub fn vehicles(&self) -> usize {
        self.vehicles
    }

    /// Maximum load per vehicle.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Maximum route duration per vehicle.
    pub fn max_work_time(&self) -> i64 {
        self.max_work_time
    }

    /// Returns `true` if a route with this load and duration is feasible.
    pub fn admits(&self, load: i32, duration: i64) -> bool {
        load <= self.capacity && duration <= self.max_work_time
    }
}
