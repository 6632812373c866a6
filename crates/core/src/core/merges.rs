//! Merge rule management for BPE.
//!
//! Merge rules are keyed by token IDs for fast comparison. Besides the lookup
//! map the rules keep their learning order, which is their rank and the order
//! they are persisted in.

use ahash::AHashMap;

/// A pair of token IDs that can be merged.
pub type Pair = (u32, u32);

/// Merge rule mapping: pair -> (rank, new_token_id).
///
/// The rank indicates the priority of this merge rule (lower rank = higher priority).
/// The new_token_id is the ID of the token created by merging this pair.
pub type MergeMap = AHashMap<Pair, (u32, u32)>;

/// A single learned merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRule {
    /// Left and right token IDs
    pub pair: Pair,
    /// Position in the learning sequence, 0 = learned first
    pub rank: u32,
    /// ID of the concatenated token
    pub new_token_id: u32,
}

/// Collection of BPE merge rules with efficient lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRules {
    /// Rules in rank order
    rules: Vec<MergeRule>,
    /// Merge rules: pair -> (rank, new_token_id)
    merges: MergeMap,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            merges: MergeMap::with_capacity(capacity),
        }
    }

    /// Append a merge rule. Its rank is the number of rules already present.
    ///
    /// Returns the assigned rank. Re-adding a known pair keeps the original
    /// rank and returns it.
    pub fn push(&mut self, pair: Pair, new_token_id: u32) -> u32 {
        if let Some(&(rank, _)) = self.merges.get(&pair) {
            return rank;
        }

        let rank = self.rules.len() as u32;
        self.rules.push(MergeRule {
            pair,
            rank,
            new_token_id,
        });
        self.merges.insert(pair, (rank, new_token_id));
        rank
    }

    /// Get the merge rule for a pair.
    ///
    /// Returns Some((rank, new_token_id)) if this pair should be merged,
    /// None otherwise.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<(u32, u32)> {
        self.merges.get(&pair).copied()
    }

    /// Whether `pair` is a learned merge, regardless of rank.
    #[inline]
    pub fn contains(&self, pair: Pair) -> bool {
        self.merges.contains_key(&pair)
    }

    /// Rules in rank order.
    #[inline]
    pub fn rules(&self) -> &[MergeRule] {
        &self.rules
    }

    /// Iterate over the rules in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &MergeRule> {
        self.rules.iter()
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
