//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (TripStore)
//! but are themselves concrete structs, not traits.

mod trip;

pub use trip::TripService;
