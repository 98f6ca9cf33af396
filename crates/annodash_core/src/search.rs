use annodash_logging::dash_debug;

use crate::Generation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractMatch {
    pub row_uid: String,
    pub external_id: String,
}

/// Answer to one abstract lookup; `NotFound` corresponds to an empty mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(AbstractMatch),
    NotFound,
}

/// One row of the abstract catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractEntry {
    pub row_data: String,
    pub uid: String,
    pub external_id: String,
}

/// Which result panel is visible. At most one of found/not-found shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPanel {
    #[default]
    Hidden,
    Found(AbstractMatch),
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SearchState {
    query: String,
    generation: Generation,
    panel: SearchPanel,
    catalog: Option<Vec<AbstractEntry>>,
}

impl SearchState {
    pub(crate) fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    /// Starts a lookup for the current query; `None` for blank input.
    pub(crate) fn begin_lookup(&mut self) -> Option<(Generation, String)> {
        if self.query.trim().is_empty() {
            return None;
        }
        self.generation += 1;
        Some((self.generation, self.query.clone()))
    }

    pub(crate) fn is_current(&self, generation: Generation) -> bool {
        generation == self.generation
    }

    pub(crate) fn apply_outcome(&mut self, generation: Generation, outcome: LookupOutcome) -> bool {
        if !self.is_current(generation) {
            dash_debug!("Discarding stale lookup result for generation {}", generation);
            return false;
        }
        self.panel = match outcome {
            LookupOutcome::Found(found) => SearchPanel::Found(found),
            LookupOutcome::NotFound => SearchPanel::NotFound,
        };
        true
    }

    pub(crate) fn panel(&self) -> &SearchPanel {
        &self.panel
    }

    pub(crate) fn set_catalog(&mut self, entries: Vec<AbstractEntry>) {
        self.catalog = Some(entries);
    }

    pub(crate) fn catalog(&self) -> Option<&[AbstractEntry]> {
        self.catalog.as_deref()
    }
}
