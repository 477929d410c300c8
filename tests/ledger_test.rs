//! Tests for expense logging and equal-split settlement

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::{fixture, rstest};

use tripmate::domain::{
    add_expense, compute_totals, parse_amount, remove_expense, DomainError, NewExpense, Standing,
    Trip,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 24).unwrap()
}

#[fixture]
fn pair_trip() -> Trip {
    Trip::new("trip-1".into(), "Kuakata", &["A".to_string(), "B".to_string()]).unwrap()
}

#[rstest]
fn given_single_payer_when_settling_then_other_owes_half(mut pair_trip: Trip) {
    // Arrange
    add_expense(&mut pair_trip, NewExpense::new("hotel", "A", 100.0), today()).unwrap();

    // Act
    let s = compute_totals(&pair_trip).unwrap();

    // Assert
    assert_eq!(s.paid_by("A"), Some(100.0));
    assert_eq!(s.paid_by("B"), Some(0.0));
    assert_eq!(s.average_per_person, 50.0);
    assert_eq!(s.entry("A").unwrap().balance, 50.0);
    assert_eq!(s.entry("B").unwrap().balance, -50.0);
    assert_eq!(s.entry("A").unwrap().standing(), Standing::Receive(50.0));
    assert_eq!(s.entry("B").unwrap().standing(), Standing::Pay(50.0));
}

#[rstest]
fn given_no_expenses_when_settling_then_all_settled(pair_trip: Trip) {
    let s = compute_totals(&pair_trip).unwrap();

    assert_eq!(s.total_expenses, 0.0);
    assert_eq!(s.average_per_person, 0.0);
    for entry in &s.entries {
        assert_eq!(entry.paid, 0.0);
        assert_eq!(entry.standing(), Standing::Settled);
    }
}

#[rstest]
fn given_removed_expense_when_settling_then_it_is_excluded(mut pair_trip: Trip) {
    // Arrange
    add_expense(&mut pair_trip, NewExpense::new("bus", "A", 30.0), today()).unwrap();
    add_expense(&mut pair_trip, NewExpense::new("fish", "B", 70.0), today()).unwrap();
    add_expense(&mut pair_trip, NewExpense::new("tea", "A", 5.0), today()).unwrap();

    // Act
    let removed = remove_expense(&mut pair_trip, 1).unwrap();
    let s = compute_totals(&pair_trip).unwrap();

    // Assert
    assert_eq!(removed.amount, 70.0);
    let amounts: Vec<f64> = pair_trip.expenses.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![30.0, 5.0]);
    assert_eq!(s.total_expenses, 35.0);
    assert_eq!(s.paid_by("B"), Some(0.0));
}

#[rstest]
fn given_unchanged_trip_when_settling_twice_then_identical(mut pair_trip: Trip) {
    add_expense(&mut pair_trip, NewExpense::new("fuel", "B", 33.3), today()).unwrap();

    assert_eq!(
        compute_totals(&pair_trip).unwrap(),
        compute_totals(&pair_trip).unwrap()
    );
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
#[case(f64::NAN)]
fn given_invalid_amount_when_adding_then_validation_error_and_not_appended(
    mut pair_trip: Trip,
    #[case] amount: f64,
) {
    let err = add_expense(&mut pair_trip, NewExpense::new("food", "A", amount), today())
        .unwrap_err();

    assert!(matches!(err, DomainError::Validation { field: "amount", .. }));
    assert!(pair_trip.expenses.is_empty());
}

#[test]
fn given_non_numeric_text_when_parsing_amount_then_validation_error() {
    let err = parse_amount("twelve").unwrap_err();
    assert_eq!(err.to_string(), "invalid amount: not a number: twelve");
}

#[rstest]
fn given_three_way_split_when_settling_then_keeps_full_precision() {
    let names: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
    let mut trip = Trip::new("t".into(), "Rangamati", &names).unwrap();
    add_expense(&mut trip, NewExpense::new("boat", "A", 100.0), today()).unwrap();

    let s = compute_totals(&trip).unwrap();

    assert_eq!(s.average_per_person, 100.0 / 3.0);
    assert_eq!(s.entry("B").unwrap().balance, -(100.0 / 3.0));
}

proptest! {
    #[test]
    fn balances_sum_to_zero(
        amounts in prop::collection::vec((1u32..=100_000, 0usize..4), 0..40),
    ) {
        let names: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let mut trip = Trip::new("t".into(), "Sundarbans", &names).unwrap();
        for (cents, who) in &amounts {
            let draft = NewExpense::new("x", names[*who].clone(), f64::from(*cents) / 100.0);
            add_expense(&mut trip, draft, today()).unwrap();
        }

        let s = compute_totals(&trip).unwrap();

        let sum: f64 = s.entries.iter().map(|e| e.balance).sum();
        prop_assert!(sum.abs() < 1e-6, "balances sum to {}", sum);
        let paid: f64 = s.entries.iter().map(|e| e.paid).sum();
        prop_assert!((paid - s.total_expenses).abs() < 1e-6);
    }
}
