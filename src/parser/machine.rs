//! Actor/description state machine.
//!
//! The report template renders an actor name as a bold run followed by a
//! non-bold description. Section headers are bold words from a closed
//! vocabulary. The machine walks the tokens left to right and emits an
//! incident whenever a pending actor/description pair is closed.

use crate::cleanup::normalize_description;
use crate::model::{Category, Incident, WordToken};

/// Bold words that are never actor names.
pub const IGNORE_WORDS: &[&str] = &[
    "THREAT", "DETAIL", "ACTIVITY", "ALERTS", "RELAY", "SOURCE", "PAGE", "VERSION", "PUBLISH",
];

/// Bare glyphs that never become description words.
const BULLET_GLYPHS: &[&str] = &["•", "–"];

/// Parser state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Before the section start; tokens are ignored.
    SeekingStart,

    /// Inside the section, collecting the pending incident.
    InCategory {
        category: Category,
        actor: Vec<String>,
        description: Vec<String>,
    },
}

/// How a single token is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Header(Category),
    Actor,
    Text,
}

fn classify(token: &WordToken) -> TokenKind {
    if !token.is_bold() {
        return TokenKind::Text;
    }
    let upper = token.upper();
    if let Some(category) = Category::from_header(&upper) {
        return TokenKind::Header(category);
    }
    if IGNORE_WORDS.contains(&upper.as_str()) || is_numeric(&token.text) {
        return TokenKind::Text;
    }
    TokenKind::Actor
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Explicit state machine over one document's section tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentMachine {
    state: State,
}

impl IncidentMachine {
    /// Create a machine waiting for the section start.
    pub fn new() -> Self {
        Self {
            state: State::SeekingStart,
        }
    }

    /// Current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Enter the section with the default category and empty buffers.
    pub fn enter(&mut self) {
        self.state = State::InCategory {
            category: Category::default(),
            actor: Vec::new(),
            description: Vec::new(),
        };
    }

    /// Consume one token, returning an incident if this token closed one.
    ///
    /// Tokens fed before [`enter`](Self::enter) are ignored.
    pub fn feed(&mut self, token: &WordToken) -> Option<(Category, Incident)> {
        let State::InCategory {
            category,
            actor,
            description,
        } = &mut self.state
        else {
            return None;
        };

        match classify(token) {
            TokenKind::Header(next) => {
                let emitted = take_incident(*category, actor, description);
                *category = next;
                emitted
            }
            TokenKind::Actor => {
                let emitted = if description.is_empty() {
                    None
                } else {
                    take_incident(*category, actor, description)
                };
                actor.push(token.text.clone());
                emitted
            }
            TokenKind::Text => {
                if !actor.is_empty() && !BULLET_GLYPHS.contains(&token.text.as_str()) {
                    description.push(token.text.clone());
                }
                None
            }
        }
    }

    /// Close the pending incident at the end of the section.
    pub fn finish(self) -> Option<(Category, Incident)> {
        match self.state {
            State::SeekingStart => None,
            State::InCategory {
                category,
                actor,
                description,
            } => save_incident(&actor, &description).map(|incident| (category, incident)),
        }
    }
}

impl Default for IncidentMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain both buffers into an incident of `category`.
fn take_incident(
    category: Category,
    actor: &mut Vec<String>,
    description: &mut Vec<String>,
) -> Option<(Category, Incident)> {
    let emitted = save_incident(actor, description).map(|incident| (category, incident));
    actor.clear();
    description.clear();
    emitted
}

/// Build an incident from raw actor and description words.
///
/// Returns `None` when the actor is empty or the description is empty
/// after cleanup.
pub fn save_incident<S: AsRef<str>>(actor_words: &[S], description_words: &[S]) -> Option<Incident> {
    if actor_words.is_empty() {
        return None;
    }
    let actor = actor_words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();
    let description = normalize_description(description_words);

    if actor.is_empty() || description.is_empty() {
        return None;
    }
    Some(Incident::new(actor, description))
}
