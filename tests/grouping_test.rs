//! Property tests for seat pairing and room assignment

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tripmate::domain::{assign_rooms, assign_seat_pairs, DomainError, Group};

fn people(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("friend-{i}")).collect()
}

/// Every name appears exactly once across all groups.
fn assert_partition(names: &[String], groups: &[Group]) {
    let flat: Vec<&String> = groups.iter().flatten().collect();
    assert_eq!(flat.len(), names.len());
    let unique: HashSet<&String> = flat.iter().copied().collect();
    assert_eq!(unique.len(), names.len());
    assert!(names.iter().all(|n| unique.contains(n)));
}

proptest! {
    #[test]
    fn seat_pairs_cover_everyone_once(n in 2usize..=40, seed in any::<u64>()) {
        let names = people(n);
        let groups = assign_seat_pairs(&names, &mut StdRng::seed_from_u64(seed));

        assert_partition(&names, &groups);
        prop_assert!(groups.iter().all(|g| g.len() == 1 || g.len() == 2));
        let singles = groups.iter().filter(|g| g.len() == 1).count();
        prop_assert_eq!(singles, n % 2);
        if singles == 1 {
            prop_assert_eq!(groups.last().map(Vec::len), Some(1));
        }
    }

    #[test]
    fn rooms_respect_capacity_and_place_everyone(
        n in 0usize..=30,
        num_rooms in 1usize..=12,
        max_per_room in 1usize..=8,
        seed in any::<u64>(),
    ) {
        prop_assume!(num_rooms * max_per_room >= n);
        let names = people(n);

        let rooms = assign_rooms(&names, num_rooms, max_per_room, &mut StdRng::seed_from_u64(seed))
            .unwrap();

        assert_partition(&names, &rooms);
        prop_assert!(rooms.len() <= num_rooms);
        prop_assert!(rooms.iter().all(|r| !r.is_empty() && r.len() <= max_per_room));
    }

    #[test]
    fn rooms_without_capacity_fail(
        num_rooms in 1usize..=6,
        max_per_room in 1usize..=6,
        extra in 1usize..=5,
        seed in any::<u64>(),
    ) {
        let n = num_rooms * max_per_room + extra;
        let err = assign_rooms(&people(n), num_rooms, max_per_room, &mut StdRng::seed_from_u64(seed))
            .unwrap_err();

        match err {
            DomainError::Capacity { people, required_rooms, .. } => {
                prop_assert_eq!(people, n);
                prop_assert_eq!(required_rooms, n.div_ceil(max_per_room));
                prop_assert!(required_rooms > num_rooms);
            }
            other => prop_assert!(false, "unexpected error: {other}"),
        }
    }
}

#[test]
fn given_enough_people_when_assigning_rooms_then_sizes_differ_by_at_most_one() {
    let names = people(11);
    for seed in 0..100 {
        let rooms = assign_rooms(&names, 4, 3, &mut StdRng::seed_from_u64(seed)).unwrap();
        assert_partition(&names, &rooms);
        let max = rooms.iter().map(Vec::len).max().unwrap();
        let min = rooms.iter().map(Vec::len).min().unwrap();
        assert!(max - min <= 1, "unbalanced rooms: {rooms:?}");
    }
}

#[test]
fn given_different_seeds_when_pairing_then_draws_vary() {
    let names = people(8);
    let draws: HashSet<Vec<Group>> = (0..20)
        .map(|seed| assign_seat_pairs(&names, &mut StdRng::seed_from_u64(seed)))
        .collect();
    assert!(draws.len() > 1);
}
