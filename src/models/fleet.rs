//! Homogeneous fleet definition.

/// A homogeneous fleet: a number of vehicles sharing one capacity.
///
/// The capacity bounds the delivered load and the collected load of a
/// route separately, since pickups only start once every delivery is done.
///
/// # Examples
///
/// ```
/// use u_backhaul::models::Fleet;
///
/// let fleet = Fleet::new(3, 100);
/// assert_eq!(fleet.vehicles(), 3);
/// assert_eq!(fleet.capacity(), 100);
/// assert!(fleet.fits(60, 40));
/// assert!(!fleet.fits(60, 41));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fleet {
    vehicles: usize,
    capacity: i32,
}

impl Fleet {
    pub fn new(vehicles: usize, capacity: i32) -> Self {
        Self { vehicles, capacity }
    }

    /// Number of vehicles (and therefore routes in every solution).
    pub fn vehicles(&self) -> usize {
        self.vehicles
    }

    /// Per-vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Returns `true` if `load + extra` stays within capacity.
    ///
    /// Loads are summed in `i64`, so any route load and demand compare
    /// exactly.
    pub fn fits(&self, load: i64, extra: i32) -> bool {
        load + i64::from(extra) <= i64::from(self.capacity)
    }
}
