use buscaminas_core::{Ranking, RankingStore};
use gloo::storage::{LocalStorage, Storage};

/// Ranking persistence against browser localStorage.
///
/// Load is best-effort: a missing key or a document that fails to parse
/// yields the empty ranking instead of an error.
pub(crate) struct LocalRankingStore;

impl LocalRankingStore {
    pub(crate) const KEY: &'static str = "ranking";
}

impl RankingStore for LocalRankingStore {
    fn load(&self) -> Ranking {
        LocalStorage::get(Self::KEY).unwrap_or_default()
    }

    fn save(&self, ranking: &Ranking) {
        if let Err(err) = LocalStorage::set(Self::KEY, ranking) {
            log::warn!("failed to persist ranking: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_lives_under_the_legacy_key() {
        assert_eq!(LocalRankingStore::KEY, "ranking");
    }
}
