use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// One completed game: player name and completion time in seconds.
/// Serializes as `{"name": …, "time": …}`, the shape of the persisted
/// ranking document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    pub time: u32,
}

/// Top-10 fastest completion times, ascending. Serializes transparently as a
/// JSON array, so display order equals array order. Names are not
/// deduplicated; one player can hold several slots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
}

impl Ranking {
    pub const MAX_ENTRIES: usize = 10;

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends, re-sorts ascending by time, and keeps the best
    /// [`Self::MAX_ENTRIES`]. The sort is stable, so earlier results win
    /// ties against the newcomer.
    pub fn record(&mut self, entry: RankingEntry) {
        self.entries.push(entry);
        self.entries.sort_by_key(|entry| entry.time);
        self.entries.truncate(Self::MAX_ENTRIES);
    }
}

/// Persistence seam for the ranking. The core never talks to a concrete
/// storage backend; the presentation layer injects one.
///
/// Loading is best-effort: an absent or unparsable document is the empty
/// ranking, never an error.
pub trait RankingStore {
    fn load(&self) -> Ranking;
    fn save(&self, ranking: &Ranking);
}
