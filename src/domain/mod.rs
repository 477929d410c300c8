//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod grouping;
pub mod ledger;

pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use grouping::{assign_rooms, assign_seat_pairs, required_rooms};
pub use ledger::{
    add_expense, compute_totals, expenses_by_member, parse_amount, remove_expense,
    IndexedExpense, MemberExpenses, Settlement, SettlementEntry, Standing,
};
