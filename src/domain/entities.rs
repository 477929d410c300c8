//! Domain entities: core data structures

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Minimum number of companions a trip is created with.
pub const MIN_COMPANIONS: usize = 2;

/// Tag used when an expense is logged without one.
pub const DEFAULT_TAG: &str = "other";

/// A seat pair or room: names of companions grouped together.
pub type Group = Vec<String>;

/// A planned group outing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Opaque unique identifier
    pub id: String,
    pub destination: String,
    /// Fixed at creation, unique, in entry order
    pub companions: Vec<String>,
    #[serde(default)]
    pub seat_assignments: Vec<Group>,
    #[serde(default)]
    pub room_assignments: Vec<Group>,
    /// Insertion ordered
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Trip {
    /// Create a trip with a fresh random identifier.
    pub fn create(destination: &str, companions: &[String]) -> DomainResult<Self> {
        Self::new(uuid::Uuid::new_v4().to_string(), destination, companions)
    }

    /// Create a trip with a caller-supplied identifier.
    ///
    /// Destination and names are trimmed. Fails if the destination is empty,
    /// fewer than [`MIN_COMPANIONS`] names are given, or a name is empty or
    /// repeated.
    pub fn new(id: String, destination: &str, companions: &[String]) -> DomainResult<Self> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(DomainError::validation(
                "destination",
                "destination must not be empty",
            ));
        }
        if companions.len() < MIN_COMPANIONS {
            return Err(DomainError::validation(
                "companions",
                format!(
                    "at least {} people are required, got {}",
                    MIN_COMPANIONS,
                    companions.len()
                ),
            ));
        }

        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(companions.len());
        for (idx, raw) in companions.iter().enumerate() {
            let name = raw.trim();
            if name.is_empty() {
                return Err(DomainError::validation(
                    "companions",
                    format!("name for companion {} is empty", idx + 1),
                ));
            }
            if !seen.insert(name) {
                return Err(DomainError::validation(
                    "companions",
                    format!("duplicate companion name: {name}"),
                ));
            }
            names.push(name.to_string());
        }

        Ok(Self {
            id,
            destination: destination.to_string(),
            companions: names,
            seat_assignments: Vec::new(),
            room_assignments: Vec::new(),
            expenses: Vec::new(),
        })
    }

    pub fn has_companion(&self, name: &str) -> bool {
        self.companions.iter().any(|c| c == name)
    }

    pub fn summary(&self) -> TripSummary {
        TripSummary {
            id: self.id.clone(),
            destination: self.destination.clone(),
            companion_count: self.companions.len(),
            expense_count: self.expenses.len(),
        }
    }
}

/// A single amount paid by one companion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Free-text category, e.g. "food"
    pub tag: String,
    /// Companion who paid
    pub member: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Candidate expense as collected from the user, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub tag: String,
    pub member: String,
    /// `None` when the user supplied no amount at all
    pub amount: Option<f64>,
    /// `None` defaults to the day the expense is logged
    pub date: Option<NaiveDate>,
}

impl NewExpense {
    pub fn new(tag: impl Into<String>, member: impl Into<String>, amount: f64) -> Self {
        Self {
            tag: tag.into(),
            member: member.into(),
            amount: Some(amount),
            date: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// One line of the trip list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripSummary {
    pub id: String,
    pub destination: String,
    pub companion_count: usize,
    pub expense_count: usize,
}
