//! Expense ledger and equal-split settlement
//!
//! Amounts are plain `f64` and never rounded here; rounding for display is
//! left to the presentation layer.

use std::cmp::Reverse;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{DomainError, DomainResult, Expense, NewExpense, Trip, DEFAULT_TAG};

/// Parse a raw amount as typed by the user.
///
/// Accepts anything `f64` parses after trimming, then applies the same
/// checks as [`add_expense`]: finite and strictly positive.
pub fn parse_amount(raw: &str) -> DomainResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::validation("amount", "amount is required"));
    }
    let amount: f64 = raw
        .parse()
        .map_err(|_| DomainError::validation("amount", format!("not a number: {raw}")))?;
    validate_amount(amount)?;
    Ok(amount)
}

fn validate_amount(amount: f64) -> DomainResult<()> {
    if !amount.is_finite() {
        return Err(DomainError::validation("amount", "amount must be a number"));
    }
    if amount <= 0.0 {
        return Err(DomainError::validation(
            "amount",
            format!("amount must be greater than 0, got {amount}"),
        ));
    }
    Ok(())
}

/// Append a validated expense to the trip.
///
/// An expense without a date is recorded on `today`. Nothing is appended
/// when validation fails.
pub fn add_expense(trip: &mut Trip, draft: NewExpense, today: NaiveDate) -> DomainResult<Expense> {
    let amount = draft
        .amount
        .ok_or_else(|| DomainError::validation("amount", "amount is required"))?;
    validate_amount(amount)?;

    let member = draft.member.trim();
    if !trip.has_companion(member) {
        return Err(DomainError::validation(
            "member",
            format!("{member} is not a companion on this trip"),
        ));
    }

    let tag = match draft.tag.trim() {
        "" => DEFAULT_TAG.to_string(),
        t => t.to_string(),
    };

    let expense = Expense {
        tag,
        member: member.to_string(),
        amount,
        date: Some(draft.date.unwrap_or(today)),
    };
    trip.expenses.push(expense.clone());
    debug!(
        "add_expense: trip={} member={} amount={}",
        trip.id, expense.member, expense.amount
    );
    Ok(expense)
}

/// Remove and return the expense at `index`; later records shift down.
pub fn remove_expense(trip: &mut Trip, index: usize) -> DomainResult<Expense> {
    if index >= trip.expenses.len() {
        return Err(DomainError::validation(
            "index",
            format!(
                "no expense at index {index} (trip has {})",
                trip.expenses.len()
            ),
        ));
    }
    let removed = trip.expenses.remove(index);
    debug!("remove_expense: trip={} index={}", trip.id, index);
    Ok(removed)
}

/// Where a companion stands after an equal split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Standing {
    /// Paid more than the share; should get this much back
    Receive(f64),
    /// Paid less than the share; owes this much
    Pay(f64),
    Settled,
}

impl Standing {
    pub fn from_balance(balance: f64) -> Self {
        if balance > 0.0 {
            Standing::Receive(balance)
        } else if balance < 0.0 {
            Standing::Pay(-balance)
        } else {
            Standing::Settled
        }
    }
}

/// Per-companion line of a settlement.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementEntry {
    pub name: String,
    /// Sum of this companion's expenses
    pub paid: f64,
    /// `paid - average_per_person`
    pub balance: f64,
}

impl SettlementEntry {
    pub fn standing(&self) -> Standing {
        Standing::from_balance(self.balance)
    }
}

/// Totals and balances for a trip, in companion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub total_expenses: f64,
    pub average_per_person: f64,
    pub entries: Vec<SettlementEntry>,
}

impl Settlement {
    /// Paid total for `name`, if they are a companion.
    pub fn paid_by(&self, name: &str) -> Option<f64> {
        self.entry(name).map(|e| e.paid)
    }

    pub fn entry(&self, name: &str) -> Option<&SettlementEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Compute per-companion totals and the equal-split settlement.
///
/// Pure function of the trip's companions and expenses.
pub fn compute_totals(trip: &Trip) -> DomainResult<Settlement> {
    if trip.companions.is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "trip {} has no companions to split expenses between",
            trip.id
        )));
    }

    let total_expenses: f64 = trip.expenses.iter().map(|e| e.amount).sum();
    let average_per_person = total_expenses / trip.companions.len() as f64;

    let entries = trip
        .companions
        .iter()
        .map(|name| {
            let paid: f64 = trip
                .expenses
                .iter()
                .filter(|e| &e.member == name)
                .map(|e| e.amount)
                .sum();
            SettlementEntry {
                name: name.clone(),
                paid,
                balance: paid - average_per_person,
            }
        })
        .collect();

    Ok(Settlement {
        total_expenses,
        average_per_person,
        entries,
    })
}

/// An expense together with its position in `Trip::expenses`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedExpense {
    pub index: usize,
    pub expense: Expense,
}

/// All expenses of one companion, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpenses {
    pub name: String,
    pub expenses: Vec<IndexedExpense>,
    pub total: f64,
}

/// Group expenses by companion for display.
///
/// Companions keep trip order. Within a companion, expenses are sorted by
/// date descending; undated records come last and ties keep insertion order.
pub fn expenses_by_member(trip: &Trip) -> Vec<MemberExpenses> {
    trip.companions
        .iter()
        .map(|name| {
            let mut expenses: Vec<IndexedExpense> = trip
                .expenses
                .iter()
                .enumerate()
                .filter(|(_, e)| &e.member == name)
                .map(|(index, e)| IndexedExpense {
                    index,
                    expense: e.clone(),
                })
                .collect();
            // Stable sort; None < Some, so Reverse puts undated last.
            expenses.sort_by_key(|ie| Reverse(ie.expense.date));
            let total = expenses.iter().map(|ie| ie.expense.amount).sum();
            MemberExpenses {
                name: name.clone(),
                expenses,
                total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn trip(companions: &[&str]) -> Trip {
        let names: Vec<String> = companions.iter().map(|s| s.to_string()).collect();
        Trip::new("t".into(), "Sajek", &names).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn given_valid_draft_when_adding_then_appends_with_today() {
        let mut t = trip(&["A", "B"]);
        let added = add_expense(&mut t, NewExpense::new("fuel", "A", 40.0), day(3)).unwrap();

        assert_eq!(added.date, Some(day(3)));
        assert_eq!(t.expenses, vec![added]);
    }

    #[test]
    fn given_explicit_date_when_adding_then_keeps_it() {
        let mut t = trip(&["A", "B"]);
        let added =
            add_expense(&mut t, NewExpense::new("fuel", "A", 40.0).on(day(1)), day(3)).unwrap();
        assert_eq!(added.date, Some(day(1)));
    }

    #[test]
    fn given_blank_tag_when_adding_then_uses_default_tag() {
        let mut t = trip(&["A", "B"]);
        let added = add_expense(&mut t, NewExpense::new("  ", "B", 5.0), day(1)).unwrap();
        assert_eq!(added.tag, DEFAULT_TAG);
    }

    #[rstest]
    #[case(Some(0.0))]
    #[case(Some(-5.0))]
    #[case(Some(f64::NAN))]
    #[case(Some(f64::INFINITY))]
    #[case(None)]
    fn given_invalid_amount_when_adding_then_rejects_without_appending(
        #[case] amount: Option<f64>,
    ) {
        let mut t = trip(&["A", "B"]);
        let draft = NewExpense {
            tag: "food".into(),
            member: "A".into(),
            amount,
            date: None,
        };

        let err = add_expense(&mut t, draft, day(1)).unwrap_err();

        assert!(matches!(err, DomainError::Validation { field: "amount", .. }));
        assert!(t.expenses.is_empty());
    }

    #[test]
    fn given_unknown_member_when_adding_then_rejects() {
        let mut t = trip(&["A", "B"]);
        let err = add_expense(&mut t, NewExpense::new("food", "Z", 10.0), day(1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation { field: "member", .. }));
        assert!(t.expenses.is_empty());
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("0")]
    #[case("-5")]
    #[case("NaN")]
    fn given_bad_raw_amount_when_parsing_then_validation_error(#[case] raw: &str) {
        assert!(matches!(
            parse_amount(raw),
            Err(DomainError::Validation { field: "amount", .. })
        ));
    }

    #[test]
    fn given_good_raw_amount_when_parsing_then_returns_value() {
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
    }

    #[test]
    fn given_out_of_range_index_when_removing_then_sequence_unchanged() {
        let mut t = trip(&["A", "B"]);
        add_expense(&mut t, NewExpense::new("food", "A", 10.0), day(1)).unwrap();

        let err = remove_expense(&mut t, 1).unwrap_err();

        assert!(err.to_string().contains("no expense at index 1"));
        assert_eq!(t.expenses.len(), 1);
    }

    #[test]
    fn given_one_payer_when_computing_totals_then_splits_evenly() {
        let mut t = trip(&["A", "B"]);
        add_expense(&mut t, NewExpense::new("hotel", "A", 100.0), day(1)).unwrap();

        let s = compute_totals(&t).unwrap();

        assert_eq!(s.total_expenses, 100.0);
        assert_eq!(s.average_per_person, 50.0);
        assert_eq!(s.paid_by("A"), Some(100.0));
        assert_eq!(s.paid_by("B"), Some(0.0));
        assert_eq!(s.entry("A").unwrap().standing(), Standing::Receive(50.0));
        assert_eq!(s.entry("B").unwrap().standing(), Standing::Pay(50.0));
    }

    #[test]
    fn given_no_expenses_when_computing_totals_then_everyone_settled() {
        let s = compute_totals(&trip(&["A", "B", "C"])).unwrap();
        assert_eq!(s.total_expenses, 0.0);
        assert_eq!(s.average_per_person, 0.0);
        assert!(s.entries.iter().all(|e| e.standing() == Standing::Settled));
    }

    #[test]
    fn given_no_companions_when_computing_totals_then_invariant_violation() {
        let mut t = trip(&["A", "B"]);
        t.companions.clear();
        assert!(matches!(
            compute_totals(&t),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn given_dated_expenses_when_grouping_by_member_then_newest_first_with_indices() {
        let mut t = trip(&["A", "B"]);
        add_expense(&mut t, NewExpense::new("bus", "A", 10.0).on(day(1)), day(9)).unwrap();
        add_expense(&mut t, NewExpense::new("tea", "B", 2.0).on(day(2)), day(9)).unwrap();
        add_expense(&mut t, NewExpense::new("food", "A", 30.0).on(day(5)), day(9)).unwrap();
        t.expenses.push(Expense {
            tag: "misc".into(),
            member: "A".into(),
            amount: 1.0,
            date: None,
        });

        let grouped = expenses_by_member(&t);

        assert_eq!(grouped[0].name, "A");
        let order: Vec<usize> = grouped[0].expenses.iter().map(|ie| ie.index).collect();
        assert_eq!(order, vec![2, 0, 3]);
        assert_eq!(grouped[0].total, 41.0);
        assert_eq!(grouped[1].expenses.len(), 1);
        assert_eq!(grouped[1].expenses[0].index, 1);
    }
}
