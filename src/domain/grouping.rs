//! Randomized grouping of companions into seat pairs and rooms
//!
//! Both policies start from a uniform shuffle driven by the caller's RNG,
//! so a seeded RNG gives reproducible assignments.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::{DomainError, DomainResult, Group};

/// Return a uniformly shuffled copy of `names` (Fisher-Yates).
pub fn shuffled<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> Vec<String> {
    let mut out = names.to_vec();
    out.shuffle(rng);
    out
}

/// Pair up names at random.
///
/// The shuffled list is cut into consecutive pairs; with an odd count the
/// last group holds a single name. An empty input yields no groups.
pub fn assign_seat_pairs<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> Vec<Group> {
    let groups: Vec<Group> = shuffled(names, rng)
        .chunks(2)
        .map(|pair| pair.to_vec())
        .collect();
    debug!("assign_seat_pairs: {} names -> {} groups", names.len(), groups.len());
    groups
}

/// Minimum number of rooms of size `max_per_room` needed for `people`.
pub fn required_rooms(people: usize, max_per_room: usize) -> usize {
    if max_per_room == 0 {
        return 0;
    }
    people.div_ceil(max_per_room)
}

/// Distribute names at random over `num_rooms` rooms of at most
/// `max_per_room` people each.
///
/// Person `i` of the shuffle goes to room `i % num_rooms`; if that room is
/// full the following rooms are probed round-robin until one has space.
/// Rooms left empty are dropped from the result.
///
/// # Errors
/// - `Validation` if `num_rooms` or `max_per_room` is zero
/// - `Capacity` if `num_rooms * max_per_room < names.len()`
pub fn assign_rooms<R: Rng + ?Sized>(
    names: &[String],
    num_rooms: usize,
    max_per_room: usize,
    rng: &mut R,
) -> DomainResult<Vec<Group>> {
    if num_rooms == 0 {
        return Err(DomainError::validation(
            "rooms",
            "number of rooms must be at least 1",
        ));
    }
    if max_per_room == 0 {
        return Err(DomainError::validation(
            "max_per_room",
            "max people per room must be at least 1",
        ));
    }

    let capacity = num_rooms.saturating_mul(max_per_room);
    if capacity < names.len() {
        return Err(DomainError::Capacity {
            people: names.len(),
            num_rooms,
            max_per_room,
            required_rooms: required_rooms(names.len(), max_per_room),
        });
    }

    // Never more buckets than people: the extra ones would stay empty anyway.
    let buckets = num_rooms.min(names.len());
    let mut rooms: Vec<Group> = vec![Vec::new(); buckets];

    for (idx, person) in shuffled(names, rng).into_iter().enumerate() {
        let start = idx % buckets;
        let slot = (0..buckets)
            .map(|step| (start + step) % buckets)
            .find(|&b| rooms[b].len() < max_per_room)
            .ok_or_else(|| {
                DomainError::InvariantViolation(format!("no room with space left for {person}"))
            })?;
        rooms[slot].push(person);
    }

    rooms.retain(|room| !room.is_empty());
    debug!(
        "assign_rooms: {} names -> {} rooms (requested {}, max {})",
        names.len(),
        rooms.len(),
        num_rooms,
        max_per_room
    );
    Ok(rooms)
}
