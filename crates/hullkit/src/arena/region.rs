//! Bump region over a fixed byte buffer.
//!
//! Invariants
//! - `0 <= cursor <= capacity` at rest.
//! - Every allocation is stamped with the arena `generation`; `clear` and a
//!   cycling wrap bump the generation, so views through older allocations fail
//!   with `ArenaError::Stale` instead of reading overwritten bytes.
//! - Interior mutability (`Cell`/`RefCell`) makes `Arena: !Sync`. One arena can
//!   be borrowed by several sequences on one thread, never shared across threads.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;

use bytemuck::Pod;

use crate::error::ArenaError;

/// Alignment of the backing buffer; element types must not require more.
pub const BASE_ALIGN: usize = std::mem::align_of::<u64>();

/// Default arena size in bytes (16 KiB).
pub const DEFAULT_ARENA_BYTES: usize = 16 * 1024;

/// What an allocation does when it does not fit behind the cursor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Return `ArenaError::Overflow`.
    #[default]
    Error,
    /// Reset the cursor to 0 and overwrite earlier allocations.
    Cycle,
}

/// Arena construction parameters.
#[derive(Clone, Copy, Debug)]
pub struct ArenaCfg {
    pub capacity: usize,
    pub policy: OverflowPolicy,
    /// Sequences built on this arena panic on capacity/index violations
    /// instead of returning `Err`.
    pub fail_fast: bool,
}

impl Default for ArenaCfg {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_ARENA_BYTES,
            policy: OverflowPolicy::Error,
            fail_fast: false,
        }
    }
}

/// A byte range handed out by an [`Arena`], valid for one generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub offset: usize,
    pub bytes: usize,
    pub generation: u64,
}

/// Region allocator with single ownership of its backing buffer.
///
/// Not `Clone`: two owners of one buffer is exactly what this type rules out.
pub struct Arena {
    words: RefCell<Vec<u64>>,
    capacity: usize,
    cursor: Cell<usize>,
    generation: Cell<u64>,
    policy: OverflowPolicy,
    fail_fast: bool,
}

impl Arena {
    /// Arena with the `Error` overflow policy.
    pub fn new(capacity: usize) -> Self {
        Self::with_cfg(ArenaCfg {
            capacity,
            ..ArenaCfg::default()
        })
    }

    /// Scratch arena that wraps to offset 0 when full.
    ///
    /// Any allocation made before a wrap is overwritten by later ones. Sequences
    /// notice this (`ArenaError::Stale`), raw `Allocation` holders must check
    /// [`Arena::check`] themselves. Only use this for data that is dead before
    /// the next allocation that could wrap.
    pub fn unsafe_cycling(capacity: usize) -> Self {
        Self::with_cfg(ArenaCfg {
            capacity,
            policy: OverflowPolicy::Cycle,
            fail_fast: false,
        })
    }

    pub fn with_cfg(cfg: ArenaCfg) -> Self {
        let words = cfg.capacity.div_ceil(BASE_ALIGN);
        Self {
            words: RefCell::new(vec![0u64; words]),
            capacity: cfg.capacity,
            cursor: Cell::new(0),
            generation: Cell::new(0),
            policy: cfg.policy,
            fail_fast: cfg.fail_fast,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor.get()
    }
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor.get()
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
    #[inline]
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }
    #[inline]
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Bump-allocate `bytes` aligned to `align`.
    ///
    /// Overflows when the aligned end would pass `capacity`. Under `Cycle` the
    /// cursor resets, the generation advances, and the allocation lands at 0;
    /// a request larger than the whole arena fails under either policy.
    pub fn allocate(&self, bytes: usize, align: usize) -> Result<Allocation, ArenaError> {
        if align > BASE_ALIGN || !align.is_power_of_two() {
            return Err(ArenaError::Unaligned { align });
        }
        let cursor = self.cursor.get();
        let overflow = ArenaError::Overflow {
            requested: bytes,
            cursor,
            capacity: self.capacity,
        };
        let start = align_up(cursor, align);
        let fits = start
            .checked_add(bytes)
            .is_some_and(|end| end <= self.capacity);
        let start = if fits {
            start
        } else {
            match self.policy {
                OverflowPolicy::Error => return Err(overflow),
                OverflowPolicy::Cycle => {
                    if bytes > self.capacity {
                        return Err(overflow);
                    }
                    self.wrap();
                    0
                }
            }
        };
        self.cursor.set(start + bytes);
        Ok(Allocation {
            offset: start,
            bytes,
            generation: self.generation.get(),
        })
    }

    /// Allocate room for `count` values of `T`.
    pub fn allocate_for<T: Pod>(&self, count: usize) -> Result<Allocation, ArenaError> {
        let bytes = std::mem::size_of::<T>()
            .checked_mul(count)
            .ok_or(ArenaError::Overflow {
                requested: usize::MAX,
                cursor: self.cursor.get(),
                capacity: self.capacity,
            })?;
        self.allocate(bytes, std::mem::align_of::<T>())
    }

    /// Reset the cursor; every outstanding allocation becomes stale.
    pub fn clear(&self) {
        self.cursor.set(0);
        self.generation.set(self.generation.get() + 1);
    }

    /// Drop the arena and its buffer. Borrowing sequences must be gone first,
    /// which the borrow checker enforces.
    pub fn release(self) {
        tracing::trace!(capacity = self.capacity, "arena released");
    }

    /// Ok iff `alloc` belongs to the current generation.
    #[inline]
    pub fn check(&self, alloc: &Allocation) -> Result<(), ArenaError> {
        let current = self.generation.get();
        if alloc.generation == current {
            Ok(())
        } else {
            Err(ArenaError::Stale {
                handle_generation: alloc.generation,
                arena_generation: current,
            })
        }
    }

    /// Typed view of the first `len` elements of `alloc`.
    ///
    /// Holds a shared borrow of the whole buffer until dropped; a concurrent
    /// write through the same arena panics (`RefCell` rules).
    pub fn view<T: Pod>(&self, alloc: &Allocation, len: usize) -> Result<Ref<'_, [T]>, ArenaError> {
        self.check(alloc)?;
        let range = typed_range::<T>(alloc, len);
        Ok(Ref::map(self.words.borrow(), |w| {
            bytemuck::cast_slice(&bytemuck::cast_slice::<u64, u8>(w)[range])
        }))
    }

    /// Mutable typed view of the first `len` elements of `alloc`.
    pub fn view_mut<T: Pod>(
        &self,
        alloc: &Allocation,
        len: usize,
    ) -> Result<RefMut<'_, [T]>, ArenaError> {
        self.check(alloc)?;
        let range = typed_range::<T>(alloc, len);
        Ok(RefMut::map(self.words.borrow_mut(), |w| {
            bytemuck::cast_slice_mut(&mut bytemuck::cast_slice_mut::<u64, u8>(w)[range])
        }))
    }

    /// Read element `index` of `alloc` by value.
    #[inline]
    pub fn read<T: Pod>(&self, alloc: &Allocation, index: usize) -> Result<T, ArenaError> {
        Ok(self.view::<T>(alloc, index + 1)?[index])
    }

    /// Write element `index` of `alloc`.
    #[inline]
    pub fn write<T: Pod>(&self, alloc: &Allocation, index: usize, value: T) -> Result<(), ArenaError> {
        self.view_mut::<T>(alloc, index + 1)?[index] = value;
        Ok(())
    }

    fn wrap(&self) {
        let generation = self.generation.get() + 1;
        tracing::warn!(
            capacity = self.capacity,
            generation,
            "cycling arena wrapped; earlier allocations are invalidated"
        );
        self.cursor.set(0);
        self.generation.set(generation);
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity)
            .field("cursor", &self.cursor.get())
            .field("generation", &self.generation.get())
            .field("policy", &self.policy)
            .finish()
    }
}

#[inline]
fn align_up(offset: usize, align: usize) -> usize {
    (offset + align - 1) & !(align - 1)
}

#[inline]
fn typed_range<T>(alloc: &Allocation, len: usize) -> std::ops::Range<usize> {
    let bytes = std::mem::size_of::<T>() * len;
    debug_assert!(bytes <= alloc.bytes, "view past the end of its allocation");
    alloc.offset..alloc.offset + bytes
}
