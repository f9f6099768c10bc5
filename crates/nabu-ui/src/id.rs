//! Stable hierarchical identifiers.
//!
//! An [`Id`] is a 64-bit FNV-1a hash. Builders derive a node's id by mixing
//! the hash of their seed (label, index, kind) into the top of the
//! [`IdStack`], so the same call site under the same parent chain yields the
//! same id every frame.

use bytemuck::{Pod, Zeroable};

pub const FNV_OFFSET: u64 = 14_695_981_039_346_656_037;
pub const FNV_PRIME: u64 = 1_099_511_628_211;

/// FNV-1a over raw bytes.
pub const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Element identifier. `Id::NONE` (0) means "no element".
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct Id(pub u64);

impl Id {
    pub const NONE: Id = Id(0);
    /// Seed of every identifier stack.
    pub const ROOT: Id = Id(fnv1a(b"nabu.root"));

    #[inline]
    pub const fn from_label(s: &str) -> Id {
        Id(fnv1a(s.as_bytes()))
    }

    #[inline]
    pub const fn from_index(i: u64) -> Id {
        Id(fnv1a(&i.to_le_bytes()))
    }

    /// Path-dependent child id: `(self ⊕ seed) × FNV_PRIME`.
    #[inline]
    pub const fn mix(self, seed: u64) -> Id {
        Id((self.0 ^ seed).wrapping_mul(FNV_PRIME))
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

/// Anything a builder can be disambiguated by.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IdSeed<'a> {
    Str(&'a str),
    Index(u64),
    /// A precomputed hash, used as-is.
    Hash(u64),
}

impl IdSeed<'_> {
    #[inline]
    pub fn hash(self) -> u64 {
        match self {
            IdSeed::Str(s) => fnv1a(s.as_bytes()),
            IdSeed::Index(i) => Id::from_index(i).0,
            IdSeed::Hash(h) => h,
        }
    }
}

impl<'a> From<&'a str> for IdSeed<'a> {
    fn from(s: &'a str) -> Self {
        IdSeed::Str(s)
    }
}

impl<'a> From<&'a String> for IdSeed<'a> {
    fn from(s: &'a String) -> Self {
        IdSeed::Str(s.as_str())
    }
}

impl From<usize> for IdSeed<'_> {
    fn from(i: usize) -> Self {
        IdSeed::Index(i as u64)
    }
}

impl From<u32> for IdSeed<'_> {
    fn from(i: u32) -> Self {
        IdSeed::Index(i as u64)
    }
}

impl From<i32> for IdSeed<'_> {
    fn from(i: i32) -> Self {
        IdSeed::Index(i as u64)
    }
}

impl From<u64> for IdSeed<'_> {
    fn from(i: u64) -> Self {
        IdSeed::Index(i)
    }
}

impl From<Id> for IdSeed<'_> {
    fn from(id: Id) -> Self {
        IdSeed::Hash(id.0)
    }
}

/// Strictly nested stack of id scopes. Never empty: the bottom is [`Id::ROOT`].
#[derive(Debug, Clone)]
pub struct IdStack {
    stack: Vec<Id>,
}

impl IdStack {
    pub fn new() -> Self {
        let mut stack = Vec::with_capacity(32);
        stack.push(Id::ROOT);
        Self { stack }
    }

    /// Reseeds with the root only.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(Id::ROOT);
    }

    #[inline]
    pub fn top(&self) -> Id {
        self.stack.last().copied().unwrap_or(Id::ROOT)
    }

    /// The id a builder with `seed` gets at the current level, without pushing.
    #[inline]
    pub fn derive<'a>(&self, seed: impl Into<IdSeed<'a>>) -> Id {
        self.top().mix(seed.into().hash())
    }

    pub fn push<'a>(&mut self, seed: impl Into<IdSeed<'a>>) -> Id {
        let id = self.derive(seed);
        self.stack.push(id);
        id
    }

    /// Pushes an already-derived id as the new scope.
    pub fn push_raw(&mut self, id: Id) {
        self.stack.push(id);
    }

    /// Rewinds one level. Returns false (and leaves the root) on underflow.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Number of levels including the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for IdStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ── hashing ───────────────────────────────────────────────────────────

    #[test]
    fn fnv1a_reference_values() {
        assert_eq!(fnv1a(b""), FNV_OFFSET);
        assert_eq!(fnv1a(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn mix_matches_push_rule() {
        let parent = Id(0x1234);
        let seed = fnv1a(b"Ok");
        assert_eq!(parent.mix(seed).0, (0x1234 ^ seed).wrapping_mul(FNV_PRIME));
    }

    // ── stack ─────────────────────────────────────────────────────────────

    #[test]
    fn stack_starts_at_root() {
        let s = IdStack::new();
        assert_eq!(s.depth(), 1);
        assert_eq!(s.top(), Id::ROOT);
    }

    #[test]
    fn same_path_same_id() {
        let mut a = IdStack::new();
        let mut b = IdStack::new();
        a.push("panel");
        b.push("panel");
        assert_eq!(a.derive("Ok"), b.derive("Ok"));
    }

    #[test]
    fn different_parent_different_id() {
        let mut a = IdStack::new();
        a.push("left");
        let left = a.derive("Ok");
        a.pop();
        a.push("right");
        assert_ne!(left, a.derive("Ok"));
    }

    #[test]
    fn index_seeds_disambiguate_duplicates() {
        let mut s = IdStack::new();
        s.push(0);
        let first = s.derive("X");
        s.pop();
        s.push(1);
        let second = s.derive("X");
        assert_ne!(first, second);
    }

    #[test]
    fn pop_never_removes_root() {
        let mut s = IdStack::new();
        assert!(!s.pop());
        assert_eq!(s.depth(), 1);
    }

    proptest! {
        #[test]
        fn identical_call_sequences_produce_identical_ids(
            ops in prop::collection::vec((any::<bool>(), "[a-z]{0,6}"), 0..40)
        ) {
            let run = |ops: &[(bool, String)]| {
                let mut s = IdStack::new();
                let mut out = Vec::new();
                for (push, seed) in ops {
                    if *push {
                        out.push(s.push(seed.as_str()));
                    } else {
                        out.push(s.derive(seed.as_str()));
                        s.pop();
                    }
                }
                out
            };
            prop_assert_eq!(run(&ops), run(&ops));
        }
    }
}
