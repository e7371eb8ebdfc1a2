//! Word-stream parsing.

mod machine;
mod stream;

pub use machine::{save_incident, IncidentMachine, State, IGNORE_WORDS};
pub use stream::{parse_words, SectionBounds, END_MARKER, START_MARKER};
