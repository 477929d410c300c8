//! Trip management service
//!
//! Every mutating operation loads the stored collection, applies the domain
//! operation to a copy of the trip and saves exactly once on success. A
//! rejected operation saves nothing.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{
    self, Expense, Group, MemberExpenses, NewExpense, Settlement, Trip, TripSummary,
};
use crate::infrastructure::traits::TripStore;

/// Service for creating trips and running grouping and ledger operations on them.
pub struct TripService {
    store: Arc<dyn TripStore>,
    rng: Mutex<StdRng>,
}

impl TripService {
    /// Create a service drawing randomness from OS entropy.
    pub fn new(store: Arc<dyn TripStore>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Create a service with reproducible draws.
    pub fn with_seed(store: Arc<dyn TripStore>, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(store: Arc<dyn TripStore>, rng: StdRng) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }

    /// Create and persist a new trip.
    pub fn create_trip(&self, destination: &str, companions: &[String]) -> ApplicationResult<Trip> {
        debug!(
            "create_trip: destination={}, companions={}",
            destination,
            companions.len()
        );
        let trip = Trip::create(destination, companions)?;

        let mut trips = self.store.load();
        trips.push(trip.clone());
        self.save(&trips)?;

        info!("created trip {} to {}", trip.id, trip.destination);
        Ok(trip)
    }

    /// All stored trips in creation order.
    pub fn list_trips(&self) -> Vec<Trip> {
        self.store.load()
    }

    pub fn list_summaries(&self) -> Vec<TripSummary> {
        self.store.load().iter().map(Trip::summary).collect()
    }

    pub fn get_trip(&self, id: &str) -> ApplicationResult<Trip> {
        self.store
            .load()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ApplicationError::TripNotFound(id.to_string()))
    }

    /// Delete a trip and return it.
    pub fn delete_trip(&self, id: &str) -> ApplicationResult<Trip> {
        debug!("delete_trip: id={}", id);
        let mut trips = self.store.load();
        let pos = Self::position(&trips, id)?;
        let removed = trips.remove(pos);
        self.save(&trips)?;

        info!("deleted trip {} ({})", removed.id, removed.destination);
        Ok(removed)
    }

    /// Re-draw seat pairs for all companions, replacing previous pairs.
    pub fn randomize_seats(&self, id: &str) -> ApplicationResult<Vec<Group>> {
        debug!("randomize_seats: id={}", id);
        self.update(id, |trip| {
            let pairs = {
                let mut rng = self.rng();
                domain::assign_seat_pairs(&trip.companions, &mut *rng)
            };
            trip.seat_assignments = pairs.clone();
            Ok(pairs)
        })
    }

    /// Re-draw room groups, replacing previous rooms.
    ///
    /// On a capacity or validation error the stored rooms stay as they were.
    pub fn randomize_rooms(
        &self,
        id: &str,
        num_rooms: usize,
        max_per_room: usize,
    ) -> ApplicationResult<Vec<Group>> {
        debug!(
            "randomize_rooms: id={}, rooms={}, max_per_room={}",
            id, num_rooms, max_per_room
        );
        self.update(id, |trip| {
            let rooms = {
                let mut rng = self.rng();
                domain::assign_rooms(&trip.companions, num_rooms, max_per_room, &mut *rng)?
            };
            trip.room_assignments = rooms.clone();
            Ok(rooms)
        })
    }

    /// Log an expense; undated expenses are recorded on today's local date.
    pub fn add_expense(&self, id: &str, draft: NewExpense) -> ApplicationResult<Expense> {
        debug!("add_expense: id={}, draft={:?}", id, draft);
        let today = Self::today();
        self.update(id, |trip| Ok(domain::add_expense(trip, draft, today)?))
    }

    pub fn remove_expense(&self, id: &str, index: usize) -> ApplicationResult<Expense> {
        debug!("remove_expense: id={}, index={}", id, index);
        self.update(id, |trip| Ok(domain::remove_expense(trip, index)?))
    }

    pub fn settlement(&self, id: &str) -> ApplicationResult<Settlement> {
        let trip = self.get_trip(id)?;
        Ok(domain::compute_totals(&trip)?)
    }

    pub fn expenses_by_member(&self, id: &str) -> ApplicationResult<Vec<MemberExpenses>> {
        let trip = self.get_trip(id)?;
        Ok(domain::expenses_by_member(&trip))
    }

    /// Apply `op` to a copy of the trip; commit and save only if it succeeds.
    fn update<T>(
        &self,
        id: &str,
        op: impl FnOnce(&mut Trip) -> ApplicationResult<T>,
    ) -> ApplicationResult<T> {
        let mut trips = self.store.load();
        let pos = Self::position(&trips, id)?;

        let mut trip = trips[pos].clone();
        let out = op(&mut trip)?;
        trips[pos] = trip;
        self.save(&trips)?;
        Ok(out)
    }

    fn position(trips: &[Trip], id: &str) -> ApplicationResult<usize> {
        trips
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| ApplicationError::TripNotFound(id.to_string()))
    }

    fn save(&self, trips: &[Trip]) -> ApplicationResult<()> {
        self.store.save(trips).with_context("save trips")
    }

    fn rng(&self) -> std::sync::MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}
