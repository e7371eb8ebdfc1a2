//! Cross-document incident store.

use std::collections::HashMap;

use crate::model::{Category, ParseResult};

/// Descriptions of one actor within one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorGroup {
    pub actor: String,
    pub descriptions: Vec<String>,
}

/// Actor groups of one category, in first-seen order.
#[derive(Debug, Clone, Default)]
struct CategoryGroups {
    groups: Vec<ActorGroup>,
    index: HashMap<String, usize>,
}

impl CategoryGroups {
    fn add(&mut self, actor: &str, description: &str) {
        let idx = match self.index.get(actor) {
            Some(&idx) => idx,
            None => {
                self.groups.push(ActorGroup {
                    actor: actor.to_string(),
                    descriptions: Vec::new(),
                });
                self.index.insert(actor.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[idx].descriptions.push(description.to_string());
    }
}

/// Accumulates per-document results.
///
/// Documents must be folded in a fixed order: actor order and the
/// description order inside each group follow the fold order.
#[derive(Debug, Clone, Default)]
pub struct AggregateStore {
    categories: [CategoryGroups; 4],
    flat: Vec<(Category, String)>,
    documents: usize,
}

impl AggregateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document's incidents into the store.
    pub fn fold(&mut self, result: &ParseResult) {
        for (category, incidents) in result.iter() {
            let groups = &mut self.categories[category.index()];
            for incident in incidents {
                groups.add(&incident.actor, &incident.description);
                self.flat.push((category, incident.description.clone()));
            }
        }
        self.documents += 1;
    }

    /// Actor groups of a category in first-seen order.
    pub fn groups(&self, category: Category) -> &[ActorGroup] {
        &self.categories[category.index()].groups
    }

    /// Every description folded so far, tagged with its category.
    pub fn descriptions(&self) -> &[(Category, String)] {
        &self.flat
    }

    /// Descriptions of one category in fold order.
    pub fn descriptions_in(&self, category: Category) -> impl Iterator<Item = &str> {
        self.flat
            .iter()
            .filter(move |(c, _)| *c == category)
            .map(|(_, d)| d.as_str())
    }

    /// Number of documents folded.
    pub fn document_count(&self) -> usize {
        self.documents
    }
}

impl<'a> FromIterator<&'a ParseResult> for AggregateStore {
    fn from_iter<I: IntoIterator<Item = &'a ParseResult>>(iter: I) -> Self {
        let mut store = AggregateStore::new();
        for result in iter {
            store.fold(result);
        }
        store
    }
}
