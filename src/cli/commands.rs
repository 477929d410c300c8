//! Command dispatch and rendering

use std::io::{self, BufRead};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::IoResultExt;
use crate::cli::args::{
    Cli, Commands, ConfigCommands, ExpenseCommands, RoomCommands, SeatCommands, TripCommands,
};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{self, Group, NewExpense, Standing, Trip};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Execute the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `tripmate --help`".into(),
        ));
    };

    // Completions need neither settings nor a store.
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let mut settings = Settings::load()?;
    if let Some(dir) = &cli.data_dir {
        settings = settings.with_data_dir(dir);
    }
    debug!("store: {}", settings.store_path().display());
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Trip { command } => trip_cmd(&container, command),
        Commands::Seats { command } => seat_cmd(&container, command),
        Commands::Rooms { command } => room_cmd(&container, command),
        Commands::Expense { command } => expense_cmd(&container, command),
        Commands::Settle { trip } => settle(&container, trip),
        Commands::Config { command } => config_cmd(&container, command),
        Commands::Completion { .. } => Ok(()),
    }
}

// ============================================================
// trip
// ============================================================

#[instrument(skip(c))]
fn trip_cmd(c: &ServiceContainer, command: &TripCommands) -> CliResult<()> {
    match command {
        TripCommands::New {
            destination,
            companions,
        } => {
            let trip = c.trips.create_trip(destination, companions)?;
            output::success(&format!("created trip to {}", trip.destination));
            output::detail(&format!("id: {}", trip.id));
            Ok(())
        }
        TripCommands::List => {
            let summaries = c.trips.list_summaries();
            if summaries.is_empty() {
                output::hint("No trips yet! Create one with `tripmate trip new`.");
                return Ok(());
            }
            for s in summaries {
                output::info(&format!(
                    "{}  {}  ({} friends, {} expenses)",
                    s.id, s.destination, s.companion_count, s.expense_count
                ));
            }
            Ok(())
        }
        TripCommands::Show { trip } => {
            let trip = c.trips.get_trip(trip)?;
            render_trip(&trip);
            Ok(())
        }
        TripCommands::Delete { trip, yes } => {
            let current = c.trips.get_trip(trip)?;
            if !yes && !confirm(&format!(
                "Delete trip to {}? This cannot be undone! [y/N]",
                current.destination
            ))? {
                output::info("Aborted.");
                return Ok(());
            }
            let removed = c.trips.delete_trip(&current.id)?;
            output::action("Deleted", &removed.destination);
            Ok(())
        }
    }
}

fn render_trip(trip: &Trip) {
    output::header(&trip.destination);
    output::detail(&format!("id: {}", trip.id));
    output::detail(&format!("companions: {}", trip.companions.join(", ")));
    output::detail(&format!("expenses: {}", trip.expenses.len()));
    output::header("Seats");
    render_pairs(&trip.seat_assignments);
    output::header("Rooms");
    render_rooms(trip);
}

// ============================================================
// seats / rooms
// ============================================================

#[instrument(skip(c))]
fn seat_cmd(c: &ServiceContainer, command: &SeatCommands) -> CliResult<()> {
    let pairs = match command {
        SeatCommands::Shuffle { trip } => c.trips.randomize_seats(trip)?,
        SeatCommands::Show { trip } => c.trips.get_trip(trip)?.seat_assignments,
    };
    render_pairs(&pairs);
    Ok(())
}

fn render_pairs(pairs: &[Group]) {
    if pairs.is_empty() {
        output::hint("No seat pairs yet, run `tripmate seats shuffle`.");
        return;
    }
    for (idx, pair) in pairs.iter().enumerate() {
        output::info(&format!("Pair {}: {}", idx + 1, pair.join(" & ")));
    }
}

#[instrument(skip(c))]
fn room_cmd(c: &ServiceContainer, command: &RoomCommands) -> CliResult<()> {
    let trip = match command {
        RoomCommands::Assign {
            trip,
            rooms,
            max_per_room,
        } => {
            c.trips.randomize_rooms(trip, *rooms, *max_per_room)?;
            c.trips.get_trip(trip)?
        }
        RoomCommands::Show { trip } => c.trips.get_trip(trip)?,
    };
    render_rooms(&trip);
    Ok(())
}

fn render_rooms(trip: &Trip) {
    if trip.room_assignments.is_empty() {
        output::hint("No rooms yet, run `tripmate rooms assign`.");
        return;
    }
    for (idx, room) in trip.room_assignments.iter().enumerate() {
        output::info(&format!(
            "Room {} ({} people): {}",
            idx + 1,
            room.len(),
            room.join(", ")
        ));
    }
    let assigned: usize = trip.room_assignments.iter().map(Vec::len).sum();
    if assigned < trip.companions.len() {
        output::warning(&format!(
            "{} people not assigned! Increase room capacity.",
            trip.companions.len() - assigned
        ));
    }
}

// ============================================================
// expenses / settlement
// ============================================================

#[instrument(skip(c))]
fn expense_cmd(c: &ServiceContainer, command: &ExpenseCommands) -> CliResult<()> {
    let s = &c.settings;
    match command {
        ExpenseCommands::Add {
            trip,
            member,
            amount,
            tag,
            date,
        } => {
            let draft = NewExpense {
                tag: tag.clone(),
                member: member.clone(),
                amount: Some(domain::parse_amount(amount)?),
                date: *date,
            };
            let expense = c.trips.add_expense(trip, draft)?;
            output::success(&format!(
                "{} paid {} for {}",
                expense.member,
                output::money(expense.amount, s.display_decimals, &s.currency),
                expense.tag
            ));
            Ok(())
        }
        ExpenseCommands::Remove { trip, index } => {
            let removed = c.trips.remove_expense(trip, *index)?;
            output::action(
                "Removed",
                &format!(
                    "{} {} ({})",
                    removed.member,
                    output::money(removed.amount, s.display_decimals, &s.currency),
                    removed.tag
                ),
            );
            Ok(())
        }
        ExpenseCommands::List { trip } => {
            let groups = c.trips.expenses_by_member(trip)?;
            if groups.iter().all(|g| g.expenses.is_empty()) {
                output::hint("No expenses added yet!");
                return Ok(());
            }
            for group in groups {
                output::header(&group.name);
                if group.expenses.is_empty() {
                    output::detail("No expenses yet");
                    continue;
                }
                for ie in &group.expenses {
                    let date = ie
                        .expense
                        .date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "----------".into());
                    output::detail(&format!(
                        "[{}] {}  {:<12} {}",
                        ie.index,
                        date,
                        ie.expense.tag,
                        output::money(ie.expense.amount, s.display_decimals, &s.currency)
                    ));
                }
                output::detail(&format!(
                    "Total: {}",
                    output::money(group.total, s.display_decimals, &s.currency)
                ));
            }
            Ok(())
        }
    }
}

#[instrument(skip(c))]
fn settle(c: &ServiceContainer, trip: &str) -> CliResult<()> {
    let s = &c.settings;
    let money = |v: f64| output::money(v, s.display_decimals, &s.currency);
    let settlement = c.trips.settlement(trip)?;

    output::header("Settlement");
    output::info(&format!("Total expenses:     {}", money(settlement.total_expenses)));
    output::info(&format!(
        "Average per person: {}",
        money(settlement.average_per_person)
    ));
    for entry in &settlement.entries {
        output::info(&format!("{} paid {}", entry.name, money(entry.paid)));
        match shown_standing(entry.standing(), s.display_decimals) {
            Standing::Receive(v) => output::receives(&format!("should receive {}", money(v))),
            Standing::Pay(v) => output::owes(&format!("should pay {}", money(v))),
            Standing::Settled => output::detail("settled"),
        }
    }
    Ok(())
}

/// Standing as displayed: an amount that rounds to zero at `decimals` is settled.
fn shown_standing(standing: Standing, decimals: usize) -> Standing {
    match standing {
        Standing::Receive(v) | Standing::Pay(v) if output::rounds_to_zero(v, decimals) => {
            Standing::Settled
        }
        other => other,
    }
}

// ============================================================
// config
// ============================================================

#[instrument(skip(c))]
fn config_cmd(c: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&c.settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(p) => output::action("config", &p.display()),
                None => output::warning("cannot determine config directory"),
            }
            output::action("store", &c.settings.store_path().display());
            Ok(())
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path().ok_or_else(|| {
                CliError::Usage("cannot determine config directory".into())
            })?;
            if c.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "{} already exists, use --force to overwrite",
                    path.display()
                )));
            }
            c.fs
                .ensure_parent(&path)
                .with_path_context("create config dir", &path)?;
            c.fs
                .write(&path, &Settings::template())
                .with_path_context("write config", &path)?;
            output::success(&format!("wrote {}", path.display()));
            Ok(())
        }
    }
}

fn confirm(question: &str) -> CliResult<bool> {
    output::prompt(question);
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| InfraError::io("read confirmation", e))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
