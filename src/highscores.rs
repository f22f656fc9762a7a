//! Best-score persistence
//!
//! A single integer per device. On the web it lives in LocalStorage as a
//! plain decimal string; everywhere else it is kept in memory.

/// Where the best score is kept between runs
pub trait ScoreStore {
    /// Stored best, 0 when absent or unreadable
    fn get(&self) -> u64;
    /// Overwrite the stored best
    fn set(&mut self, score: u64);
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: u64,
}

impl MemoryScoreStore {
    pub fn with_best(best: u64) -> Self {
        Self { best }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self) -> u64 {
        self.best
    }

    fn set(&mut self, score: u64) {
        self.best = score;
    }
}

/// Parse a stored value. Anything that is not a non-negative integer reads as 0.
pub fn parse_stored(raw: Option<&str>) -> u64 {
    match raw {
        None => 0,
        Some(text) => text.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unreadable stored best score {:?}", text);
            0
        }),
    }
}

/// LocalStorage-backed store
#[derive(Debug, Clone, Default)]
pub struct LocalScoreStore;

impl LocalScoreStore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dinoHighScore";
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalScoreStore {
    fn get(&self) -> u64 {
        let raw = crate::platform::storage::get_item(Self::STORAGE_KEY);
        parse_stored(raw.as_deref())
    }

    fn set(&mut self, score: u64) {
        if crate::platform::storage::set_item(Self::STORAGE_KEY, &score.to_string()) {
            log::info!("Best score saved ({})", score);
        }
    }
}

/// Native stub
#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for LocalScoreStore {
    fn get(&self) -> u64 {
        0
    }

    fn set(&mut self, _score: u64) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryScoreStore::default();
        assert_eq!(store.get(), 0);
        store.set(321);
        assert_eq!(store.get(), 321);
        assert_eq!(MemoryScoreStore::with_best(9).get(), 9);
    }

    #[test]
    fn test_parse_stored() {
        assert_eq!(parse_stored(None), 0);
        assert_eq!(parse_stored(Some("1234")), 1234);
        assert_eq!(parse_stored(Some(" 77\n")), 77);
        assert_eq!(parse_stored(Some("abc")), 0);
        assert_eq!(parse_stored(Some("-5")), 0);
        assert_eq!(parse_stored(Some("")), 0);
    }

    #[test]
    fn test_store_as_trait_object() {
        let mut store = MemoryScoreStore::default();
        let dyn_store: &mut dyn ScoreStore = &mut store;
        dyn_store.set(5);
        assert_eq!(dyn_store.get(), 5);
    }
}
