// ABOUTME: Persistence layer for gradebook, handling the CSV roster file and the in-memory store.
// ABOUTME: Provides the stateless CSV adapter and the Roster that owns all student records.

pub mod csv_file;
pub mod roster;

pub use csv_file::{CsvError, HEADER, initialize, load, save};
pub use roster::{Roster, RosterError, SearchQuery};
