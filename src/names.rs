//! Fresh scratch identifiers for emitted fragments.
//!
//! Fragments are spliced into one shared Go scope, so every temporary an emitter
//! introduces comes from here. The counter never goes backwards and is shared
//! across every fragment of a pass.
use std::sync::atomic::{AtomicU64, Ordering};

const DEFAULT_PREFIX: &str = "v";

#[derive(Debug, Default)]
pub struct NameAllocator {
    next: AtomicU64,
}

impl NameAllocator {
    pub fn new() -> Self { Self::default() }

    /// Start numbering at `n`; handy when tests want to pin exact identifiers.
    pub fn starting_at(n: u64) -> Self {
        Self { next: AtomicU64::new(n) }
    }

    /// `prefix_N`, or `v_N` for an empty prefix.
    pub fn fresh(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        let prefix = if prefix.is_empty() { DEFAULT_PREFIX } else { prefix };
        format!("{prefix}_{n}")
    }

    /// How many identifiers have been handed out.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn numbering_is_monotonic() {
        let names = NameAllocator::starting_at(7);
        assert_eq!(names.fresh("member"), "member_7");
        assert_eq!(names.fresh(""), "v_8");
        assert_eq!(names.fresh("member"), "member_9");
        assert_eq!(names.issued(), 10);
    }

    #[test]
    fn concurrent_allocation_never_repeats() {
        let names = NameAllocator::new();
        let all: Vec<String> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| (0..250).map(|_| names.fresh("t")).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(all.len(), 1000);
        assert_eq!(unique.len(), 1000);
    }
}
