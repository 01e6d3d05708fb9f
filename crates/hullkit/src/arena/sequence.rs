//! Fixed-capacity, arena-backed sequence with stack and grid addressing.

use std::cell::{Ref, RefMut};
use std::fmt;
use std::marker::PhantomData;

use bytemuck::Pod;

use super::region::{Allocation, Arena};
use crate::error::SequenceError;

/// Where a sequence's buffer lives.
enum Backing<'a> {
    /// Borrowed from a caller-owned arena; the caller keeps ownership.
    Shared(&'a Arena),
    /// A private arena sized to fit, owned for the sequence's lifetime.
    Private(Arena),
}

impl Backing<'_> {
    #[inline]
    fn arena(&self) -> &Arena {
        match self {
            Backing::Shared(a) => a,
            Backing::Private(a) => a,
        }
    }
}

/// Bounded sequence of `T` stored in an [`Arena`].
///
/// Invariants:
/// - `count <= size`; the buffer holds `size` elements.
/// - `stride >= 1`; `(column, row)` maps to `column + row * stride`.
/// - Validity of the buffer follows the arena generation it was allocated in.
pub struct Sequence<'a, T> {
    backing: Backing<'a>,
    alloc: Allocation,
    size: usize,
    count: usize,
    stride: usize,
    fail_fast: bool,
    _marker: PhantomData<T>,
}

impl<'a, T: Pod> Sequence<'a, T> {
    /// Empty sequence of capacity `size` in a shared arena.
    pub fn new(size: usize, arena: &'a Arena) -> Result<Self, SequenceError> {
        let alloc = arena.allocate_for::<T>(size)?;
        Ok(Self::from_parts(Backing::Shared(arena), alloc, size))
    }

    /// `size` copies of `value` (count = size).
    pub fn filled(size: usize, value: T, arena: &'a Arena) -> Result<Self, SequenceError> {
        let mut seq = Self::new(size, arena)?;
        seq.fill(value)?;
        Ok(seq)
    }

    /// Sequence holding exactly `values`.
    pub fn from_slice(values: &[T], arena: &'a Arena) -> Result<Self, SequenceError> {
        let mut seq = Self::new(values.len(), arena)?;
        seq.extend_from_slice(values)?;
        Ok(seq)
    }

    fn from_parts(backing: Backing<'a>, alloc: Allocation, size: usize) -> Self {
        let fail_fast = backing.arena().fail_fast();
        Self {
            backing,
            alloc,
            size,
            count: 0,
            stride: 1,
            fail_fast,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.size
    }
    #[inline]
    pub fn capacity(&self) -> usize {
        self.size
    }
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }
    /// Set the row width for `get2`/`set2`. Zero is treated as 1.
    #[inline]
    pub fn set_stride(&mut self, stride: usize) {
        self.stride = stride.max(1);
    }
    /// Panic on capacity/index violations instead of returning `Err`.
    #[inline]
    pub fn set_fail_fast(&mut self, on: bool) {
        self.fail_fast = on;
    }
    #[inline]
    pub fn arena(&self) -> &Arena {
        self.backing.arena()
    }
    /// True if this sequence allocated from `arena` (shared backing).
    #[inline]
    pub fn shares(&self, arena: &Arena) -> bool {
        std::ptr::eq(self.arena(), arena)
    }

    pub fn push(&mut self, value: T) -> Result<(), SequenceError> {
        if self.count == self.size {
            return Err(self.violation(SequenceError::CapacityExceeded {
                capacity: self.size,
            }));
        }
        self.arena().write(&self.alloc, self.count, value)?;
        self.count += 1;
        Ok(())
    }

    /// Remove and return the last element.
    pub fn pop(&mut self) -> Result<T, SequenceError> {
        if self.count == 0 {
            return Err(self.violation(SequenceError::Empty));
        }
        let value = self.arena().read(&self.alloc, self.count - 1)?;
        self.count -= 1;
        Ok(value)
    }

    pub fn last(&self) -> Result<T, SequenceError> {
        match self.count {
            0 => Err(self.violation(SequenceError::Empty)),
            n => self.get(n - 1),
        }
    }

    pub fn get(&self, index: usize) -> Result<T, SequenceError> {
        self.bounds(index)?;
        Ok(self.arena().read(&self.alloc, index)?)
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<(), SequenceError> {
        self.bounds(index)?;
        Ok(self.arena().write(&self.alloc, index, value)?)
    }

    /// Element at `(column, row)`; only the linear index is bounds-checked.
    #[inline]
    pub fn get2(&self, column: usize, row: usize) -> Result<T, SequenceError> {
        self.get(self.grid_index(column, row)?)
    }

    #[inline]
    pub fn set2(&mut self, column: usize, row: usize, value: T) -> Result<(), SequenceError> {
        self.set(self.grid_index(column, row)?, value)
    }

    /// Forget all elements; capacity and buffer are kept.
    #[inline]
    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Set every slot to `value` (count = capacity).
    pub fn fill(&mut self, value: T) -> Result<(), SequenceError> {
        self.arena()
            .view_mut::<T>(&self.alloc, self.size)?
            .fill(value);
        self.count = self.size;
        Ok(())
    }

    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), SequenceError> {
        if values.len() > self.size - self.count {
            return Err(self.violation(SequenceError::CapacityExceeded {
                capacity: self.size,
            }));
        }
        let end = self.count + values.len();
        self.arena().view_mut::<T>(&self.alloc, end)?[self.count..].copy_from_slice(values);
        self.count = end;
        Ok(())
    }

    /// Borrow the live elements. Blocks writes to the same arena while held.
    pub fn as_slice(&self) -> Result<Ref<'_, [T]>, SequenceError> {
        Ok(self.arena().view(&self.alloc, self.count)?)
    }

    /// Mutably borrow the live elements (e.g. for in-place sorting).
    pub fn as_mut_slice(&mut self) -> Result<RefMut<'_, [T]>, SequenceError> {
        Ok(self.arena().view_mut(&self.alloc, self.count)?)
    }

    pub fn to_vec(&self) -> Result<Vec<T>, SequenceError> {
        Ok(self.as_slice()?.to_vec())
    }

    #[inline]
    fn bounds(&self, index: usize) -> Result<(), SequenceError> {
        if index < self.count {
            Ok(())
        } else {
            Err(self.violation(SequenceError::IndexOutOfBounds {
                index,
                count: self.count,
            }))
        }
    }

    /// `column + row * stride`; an index past `usize::MAX` is out of bounds.
    fn grid_index(&self, column: usize, row: usize) -> Result<usize, SequenceError> {
        match row
            .checked_mul(self.stride)
            .and_then(|r| r.checked_add(column))
        {
            Some(index) => Ok(index),
            None => Err(self.violation(SequenceError::IndexOutOfBounds {
                index: usize::MAX,
                count: self.count,
            })),
        }
    }

    fn violation(&self, err: SequenceError) -> SequenceError {
        if self.fail_fast {
            panic!("{err}");
        }
        err
    }
}

impl<T: Pod> Sequence<'static, T> {
    /// Empty sequence with a private arena sized to fit `size` elements.
    pub fn private(size: usize) -> Result<Self, SequenceError> {
        let bytes = std::mem::size_of::<T>().saturating_mul(size);
        let arena = Arena::new(bytes);
        let alloc = arena.allocate_for::<T>(size)?;
        Ok(Self::from_parts(Backing::Private(arena), alloc, size))
    }

    pub fn private_from_slice(values: &[T]) -> Result<Self, SequenceError> {
        let mut seq = Self::private(values.len())?;
        seq.extend_from_slice(values)?;
        Ok(seq)
    }
}

impl<T: Pod + PartialOrd> Sequence<'_, T> {
    /// Largest element (linear scan).
    pub fn max(&self) -> Result<T, SequenceError> {
        self.extreme(|candidate, best| candidate > best)
    }

    /// Smallest element (linear scan).
    pub fn min(&self) -> Result<T, SequenceError> {
        self.extreme(|candidate, best| candidate < best)
    }

    fn extreme(&self, better: impl Fn(&T, &T) -> bool) -> Result<T, SequenceError> {
        let items = self.as_slice()?;
        let (first, rest) = match items.split_first() {
            Some(split) => split,
            None => return Err(self.violation(SequenceError::Empty)),
        };
        let mut best = *first;
        for v in rest {
            if better(v, &best) {
                best = *v;
            }
        }
        Ok(best)
    }
}

impl<T: Pod + fmt::Debug> fmt::Debug for Sequence<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Sequence");
        d.field("count", &self.count)
            .field("size", &self.size)
            .field("stride", &self.stride);
        match self.as_slice() {
            Ok(items) => d.field("items", &&*items),
            Err(e) => d.field("items", &e),
        };
        d.finish()
    }
}
