//! Per-frame bump allocation.
//!
//! [`FrameArena`] owns two pools that share one byte budget:
//!
//! - a node pool of `N: Copy` records addressed by [`NodeId`], and
//! - a data pool of `Pod` values (strings, sample arrays, points) addressed
//!   by generation-tagged [`ArenaSlice`] / [`ArenaStr`] handles.
//!
//! `reset()` rewinds both pools. Nothing is ever dropped: `N: Copy` and
//! `T: Pod` guarantee every stored value is trivially destructible.

use std::marker::PhantomData;
use std::mem::{align_of, size_of};

use bytemuck::Pod;
use thiserror::Error;

/// Default byte budget: 1 MiB.
pub const DEFAULT_ARENA_CAPACITY: usize = 1 << 20;

/// Allocation failure; the frame that hit it should be treated as broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("frame arena exhausted: requested {requested} bytes with {used}/{capacity} in use")]
    Exhausted { requested: usize, used: usize, capacity: usize },
}

/// Index of a record in the node pool.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel for "no node": end of a sibling chain, or a failed allocation.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}

/// Handle to `len` contiguous `T`s in the data pool.
///
/// Valid only for the frame (arena generation) that produced it.
pub struct ArenaSlice<T> {
    offset: u32,
    len: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ArenaSlice<T> {
    /// A zero-length slice that resolves in every generation.
    pub const EMPTY: ArenaSlice<T> = ArenaSlice { offset: 0, len: 0, generation: u32::MAX, _marker: PhantomData };

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Clone for ArenaSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaSlice<T> {}

impl<T> Default for ArenaSlice<T> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<T> PartialEq for ArenaSlice<T> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.len == other.len && self.generation == other.generation
    }
}

impl<T> std::fmt::Debug for ArenaSlice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArenaSlice")
            .field("offset", &self.offset)
            .field("len", &self.len)
            .field("generation", &self.generation)
            .finish()
    }
}

/// UTF-8 string copied into the data pool, stored with a trailing NUL.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ArenaStr(ArenaSlice<u8>);

impl ArenaStr {
    pub const EMPTY: ArenaStr = ArenaStr(ArenaSlice::EMPTY);

    /// Length in bytes, excluding the terminator.
    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed-capacity frame allocator.
#[derive(Debug)]
pub struct FrameArena<N: Copy> {
    nodes: Vec<N>,
    /// Backing store of the data pool; `u64` words keep every offset 8-aligned.
    words: Vec<u64>,
    data_used: usize,
    capacity: usize,
    used: usize,
    peak: usize,
    generation: u32,
}

impl<N: Copy> FrameArena<N> {
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::new(),
            words: vec![0; capacity.div_ceil(8)],
            data_used: 0,
            capacity,
            used: 0,
            peak: 0,
            generation: 0,
        }
    }

    /// Rewinds both pools. Handles from earlier generations stop resolving.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.data_used = 0;
        self.used = 0;
        self.generation = self.generation.wrapping_add(1) % u32::MAX;
    }

    /// Bytes charged against the budget this frame.
    #[inline]
    pub fn used(&self) -> usize {
        self.used
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// High-water mark across all frames.
    #[inline]
    pub fn peak(&self) -> usize {
        self.peak
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    fn charge(&mut self, bytes: usize) -> Result<(), ArenaError> {
        if self.used + bytes > self.capacity {
            return Err(ArenaError::Exhausted { requested: bytes, used: self.used, capacity: self.capacity });
        }
        self.used += bytes;
        self.peak = self.peak.max(self.used);
        Ok(())
    }

    // ── node pool ─────────────────────────────────────────────────────────

    pub fn alloc_node(&mut self, node: N) -> Result<NodeId, ArenaError> {
        self.charge(size_of::<N>())?;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        Ok(id)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(id.index())
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes allocated this frame, in allocation order.
    #[inline]
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    // ── data pool ─────────────────────────────────────────────────────────

    /// Allocates one zero-initialized `T`.
    pub fn alloc<T: Pod>(&mut self) -> Result<ArenaSlice<T>, ArenaError> {
        self.alloc_array(1)
    }

    /// Allocates `n` contiguous zero-initialized `T`s.
    pub fn alloc_array<T: Pod>(&mut self, n: usize) -> Result<ArenaSlice<T>, ArenaError> {
        const { assert!(align_of::<T>() <= 8, "arena data is at most 8-byte aligned") };

        let align = align_of::<T>().max(1);
        let start = self.data_used.next_multiple_of(align);
        let bytes = size_of::<T>() * n;
        let end = start + bytes;
        let charged = end - self.data_used;
        if end > self.words.len() * 8 {
            return Err(ArenaError::Exhausted { requested: charged, used: self.used, capacity: self.capacity });
        }
        self.charge(charged)?;
        self.data_used = end;

        let region = &mut bytemuck::cast_slice_mut::<u64, u8>(&mut self.words)[start..end];
        region.fill(0);

        Ok(ArenaSlice { offset: start as u32, len: n as u32, generation: self.generation, _marker: PhantomData })
    }

    /// Copies `values` into the data pool.
    pub fn alloc_slice<T: Pod>(&mut self, values: &[T]) -> Result<ArenaSlice<T>, ArenaError> {
        let slice = self.alloc_array::<T>(values.len())?;
        if let Some(dst) = self.try_get_mut(slice) {
            dst.copy_from_slice(values);
        }
        Ok(slice)
    }

    /// Copies `s` plus a NUL terminator.
    pub fn alloc_str(&mut self, s: &str) -> Result<ArenaStr, ArenaError> {
        let slice = self.alloc_array::<u8>(s.len() + 1)?;
        if let Some(dst) = self.try_get_mut(slice) {
            dst[..s.len()].copy_from_slice(s.as_bytes());
        }
        Ok(ArenaStr(slice))
    }

    fn resolves<T>(&self, slice: ArenaSlice<T>) -> bool {
        slice.len == 0 || slice.generation == self.generation
    }

    /// Resolves a handle, or `None` if it belongs to an earlier frame.
    pub fn try_get<T: Pod>(&self, slice: ArenaSlice<T>) -> Option<&[T]> {
        if !self.resolves(slice) {
            return None;
        }
        if slice.len == 0 {
            return Some(&[]);
        }
        let start = slice.offset as usize;
        let end = start + size_of::<T>() * slice.len as usize;
        let bytes = bytemuck::cast_slice::<u64, u8>(&self.words).get(start..end)?;
        bytemuck::try_cast_slice(bytes).ok()
    }

    pub fn try_get_mut<T: Pod>(&mut self, slice: ArenaSlice<T>) -> Option<&mut [T]> {
        if !self.resolves(slice) {
            return None;
        }
        if slice.len == 0 {
            return Some(&mut []);
        }
        let start = slice.offset as usize;
        let end = start + size_of::<T>() * slice.len as usize;
        let bytes = bytemuck::cast_slice_mut::<u64, u8>(&mut self.words).get_mut(start..end)?;
        bytemuck::try_cast_slice_mut(bytes).ok()
    }

    /// Resolves a handle. A stale handle is a programmer bug: debug builds
    /// panic, release builds get an empty slice.
    pub fn get<T: Pod>(&self, slice: ArenaSlice<T>) -> &[T] {
        let resolved = self.try_get(slice);
        debug_assert!(resolved.is_some(), "arena handle used across frames: {slice:?}");
        resolved.unwrap_or(&[])
    }

    /// Resolves a string handle; stale or malformed handles yield `""`.
    pub fn str(&self, s: ArenaStr) -> &str {
        let bytes = self.get(s.0);
        let body = bytes.split_last().map(|(_, body)| body).unwrap_or(&[]);
        std::str::from_utf8(body).unwrap_or("")
    }

    /// The stored bytes including the trailing NUL.
    pub fn c_str(&self, s: ArenaStr) -> &[u8] {
        self.get(s.0)
    }
}

impl<N: Copy> Default for FrameArena<N> {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabu_engine::coords::Vec2;
    use proptest::prelude::*;

    #[derive(Debug, Copy, Clone, PartialEq)]
    struct Rec {
        a: u64,
        b: f32,
    }

    fn arena(capacity: usize) -> FrameArena<Rec> {
        FrameArena::new(capacity)
    }

    // ── nodes ─────────────────────────────────────────────────────────────

    #[test]
    fn nodes_are_addressed_by_index() {
        let mut a = arena(1024);
        let x = a.alloc_node(Rec { a: 1, b: 0.5 }).unwrap();
        let y = a.alloc_node(Rec { a: 2, b: 1.5 }).unwrap();
        assert_eq!(a.node(x).unwrap().a, 1);
        assert_eq!(a.node(y).unwrap().b, 1.5);
        assert_eq!(a.used(), 2 * size_of::<Rec>());
    }

    #[test]
    fn node_allocation_fails_when_budget_is_spent() {
        let mut a = arena(size_of::<Rec>());
        assert!(a.alloc_node(Rec { a: 0, b: 0.0 }).is_ok());
        assert!(matches!(a.alloc_node(Rec { a: 0, b: 0.0 }), Err(ArenaError::Exhausted { .. })));
    }

    #[test]
    fn none_sentinel_never_resolves() {
        let a = arena(64);
        assert!(a.node(NodeId::NONE).is_none());
        assert!(NodeId::NONE.is_none());
    }

    // ── data ──────────────────────────────────────────────────────────────

    #[test]
    fn alloc_is_zeroed_even_after_reuse() {
        let mut a = arena(256);
        let s = a.alloc_slice(&[7u32, 8, 9]).unwrap();
        assert_eq!(a.get(s), &[7, 8, 9]);
        a.reset();
        let z = a.alloc_array::<u32>(3).unwrap();
        assert_eq!(a.get(z), &[0, 0, 0]);
    }

    #[test]
    fn alloc_respects_alignment() {
        let mut a = arena(256);
        let _byte = a.alloc_str("x").unwrap();
        let v = a.alloc_slice(&[Vec2::new(1.0, 2.0)]).unwrap();
        assert_eq!(a.get(v)[0], Vec2::new(1.0, 2.0));
        // 2 bytes of string, 2 of padding, 8 of Vec2.
        assert_eq!(a.used(), 12);
    }

    #[test]
    fn strings_carry_a_terminator() {
        let mut a = arena(64);
        let s = a.alloc_str("Ok").unwrap();
        assert_eq!(a.str(s), "Ok");
        assert_eq!(a.c_str(s), b"Ok\0");
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn data_exhaustion_is_reported() {
        let mut a = arena(8);
        assert!(a.alloc_str("1234567").is_ok());
        assert!(matches!(a.alloc_str("x"), Err(ArenaError::Exhausted { .. })));
    }

    #[test]
    fn stale_handles_do_not_resolve() {
        let mut a = arena(64);
        let s = a.alloc_slice(&[1u8, 2]).unwrap();
        a.reset();
        assert!(a.try_get(s).is_none());
        assert_eq!(a.try_get(ArenaSlice::<u8>::EMPTY), Some(&[][..]));
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_reclaims_everything_but_keeps_peak() {
        let mut a = arena(1024);
        a.alloc_node(Rec { a: 0, b: 0.0 }).unwrap();
        a.alloc_str("hello").unwrap();
        let used = a.used();
        a.reset();
        assert_eq!(a.used(), 0);
        assert_eq!(a.node_count(), 0);
        assert_eq!(a.peak(), used);
    }

    proptest! {
        #[test]
        fn every_frame_reclaims_its_bytes(frames in prop::collection::vec(prop::collection::vec(0usize..64, 0..20), 1..8)) {
            let mut a = arena(4096);
            for sizes in frames {
                a.reset();
                prop_assert_eq!(a.used(), 0);
                let mut handles = Vec::new();
                for n in sizes {
                    if let Ok(h) = a.alloc_array::<u16>(n) {
                        handles.push(h);
                    }
                }
                let gen_before = a.generation();
                a.reset();
                prop_assert_eq!(a.used(), 0);
                prop_assert_ne!(a.generation(), gen_before);
                for h in handles.into_iter().filter(|h| !h.is_empty()) {
                    prop_assert!(a.try_get(h).is_none());
                }
            }
        }
    }
}
