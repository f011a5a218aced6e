//! A [`DynArray`] is a growable array backed by a single contiguous
//! allocation, in the spirit of `ArrayList`: append at the end, indexed
//! access, and shift-left removal. Its API surface is deliberately small;
//! for slice-shaped work it derefs to `[T]`.

use std::alloc::Layout;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::OutOfBounds;

/// Initial capacity used by [`DynArray::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// A growable array with amortized O(1) append.
///
/// The backing buffer starts at [`DEFAULT_CAPACITY`] (or a caller-supplied
/// capacity) and doubles whenever an append would overflow it. It never
/// shrinks. Slots at `[len, capacity)` are uninitialized spare room; removal
/// moves ownership of the hit slot out and shifts the tail left, so nothing
/// stale is ever retained.
///
/// DynArray is optimized for ZSTs and will not allocate memory for ZSTs.
///
/// # Examples
/// ```
/// use catena::DynArray;
/// let mut arr = DynArray::new();
/// arr.push(1);
/// arr.push(2);
/// arr.push(3);
/// assert_eq!(arr.get(1), Ok(&2));
/// assert_eq!(arr.remove(0), Ok(1));
/// assert_eq!(&*arr, &[2, 3]);
/// ```
pub struct DynArray<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
}

unsafe impl<T: Send> Send for DynArray<T> {}
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T> DynArray<T> {
    /// Creates an empty `DynArray` with the default capacity of 16.
    ///
    /// # Examples
    /// ```
    /// # use catena::DynArray;
    /// let arr: DynArray<i32> = DynArray::new();
    /// assert!(arr.is_empty());
    /// assert_eq!(arr.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty `DynArray` able to hold at least `cap` elements
    /// before its first reallocation. If `T` is a zero-sized type, the
    /// capacity is set to `usize::MAX` and nothing is allocated.
    ///
    /// # Panics
    /// Panics if the allocation size exceeds `isize::MAX`.
    /// Other failure happens if an allocation error occurs.
    ///
    /// # Examples
    /// ```
    /// # use catena::DynArray;
    /// let arr: DynArray<i32> = DynArray::with_capacity(4);
    /// assert_eq!(arr.capacity(), 4);
    /// ```
    pub fn with_capacity(cap: usize) -> Self {
        let (cap, ptr) = if std::mem::size_of::<T>() == 0 {
            (usize::MAX, NonNull::dangling())
        } else if cap == 0 {
            (0, NonNull::dangling())
        } else {
            let layout = Layout::array::<T>(cap).unwrap();
            let ptr = unsafe { std::alloc::alloc(layout) };
            let ptr = match NonNull::new(ptr as *mut T) {
                Some(p) => p,
                None => std::alloc::handle_alloc_error(layout),
            };
            (cap, ptr)
        };
        DynArray { ptr, cap, len: 0 }
    }

    // Doubles the capacity, or moves to the default capacity from an empty
    // allocation. Called only when an append finds the buffer full.
    fn grow(&mut self) {
        // getting here with a ZST means len has wrapped past usize::MAX
        assert!(std::mem::size_of::<T>() != 0, "capacity overflow");

        let new_cap = if self.cap == 0 {
            DEFAULT_CAPACITY
        } else {
            // can't overflow, self.cap <= isize::MAX
            2 * self.cap
        };
        let new_layout = Layout::array::<T>(new_cap).unwrap();
        assert!(
            new_layout.size() <= isize::MAX as usize,
            "allocation too large"
        );

        let new_ptr = if self.cap == 0 {
            unsafe { std::alloc::alloc(new_layout) }
        } else {
            let old_layout = Layout::array::<T>(self.cap).unwrap();
            let old_ptr = self.ptr.as_ptr() as *mut u8;
            unsafe { std::alloc::realloc(old_ptr, old_layout, new_layout.size()) }
        };

        self.ptr = match NonNull::new(new_ptr as *mut T) {
            Some(p) => p,
            None => std::alloc::handle_alloc_error(new_layout),
        };
        self.cap = new_cap;
    }

    /// Appends an element to the end of the array.
    ///
    /// Amortized O(1): a full buffer reallocates at double the capacity
    /// before the write.
    ///
    /// # Examples
    /// ```
    /// # use catena::DynArray;
    /// let mut arr = DynArray::new();
    /// arr.push("a");
    /// arr.push("b");
    /// assert_eq!(arr.len(), 2);
    /// ```
    pub fn push(&mut self, item: T) {
        if std::mem::size_of::<T>() == 0 {
            self.len += 1;
            return;
        }
        if self.len == self.cap {
            self.grow();
        }
        unsafe {
            std::ptr::write(self.ptr.as_ptr().add(self.len), item);
        }
        self.len += 1;
    }

    /// Returns a reference to the element at `index`, or an [`OutOfBounds`]
    /// error when `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use catena::{DynArray, OutOfBounds};
    /// let mut arr = DynArray::new();
    /// arr.push(10);
    /// assert_eq!(arr.get(0), Ok(&10));
    /// assert_eq!(arr.get(1), Err(OutOfBounds { index: 1, len: 1 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, OutOfBounds> {
        OutOfBounds::check(index, self.len)?;
        Ok(unsafe { &*self.ptr.as_ptr().add(index) })
    }

    /// Returns the index of the first element equal to `item`, or `None` if
    /// the array does not contain it. Linear scan from index 0.
    ///
    /// # Examples
    /// ```
    /// # use catena::DynArray;
    /// let arr = DynArray::from(vec![5, 6, 5]);
    /// assert_eq!(arr.index_of(&5), Some(0));
    /// assert_eq!(arr.index_of(&7), None);
    /// ```
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|slot| slot == item)
    }

    /// Removes and returns the element at `index`, shifting every element
    /// after it one position to the left. Returns an [`OutOfBounds`] error,
    /// leaving the array untouched, when `index >= len`. O(len).
    ///
    /// # Examples
    /// ```
    /// # use catena::DynArray;
    /// let mut arr = DynArray::from(vec![1, 2, 3]);
    /// assert_eq!(arr.remove(1), Ok(2));
    /// assert_eq!(&*arr, &[1, 3]);
    /// assert!(arr.remove(2).is_err());
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, OutOfBounds> {
        OutOfBounds::check(index, self.len)?;
        unsafe {
            let slot = self.ptr.as_ptr().add(index);
            let item = std::ptr::read(slot);
            std::ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            Ok(item)
        }
    }

    /// Returns the number of elements in the array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the array contains no elements.
    ///
    /// # Examples
    /// ```
    /// # use catena::DynArray;
    /// let mut arr = DynArray::new();
    /// assert!(arr.is_empty());
    /// arr.push(1);
    /// assert!(!arr.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the allocated capacity.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Extracts a slice containing the entire array.
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Extracts a mutable slice containing the entire array.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Returns a borrowing iterator over the elements in order.
    ///
    /// The iterator borrows the array, so mutating while iterating is a
    /// compile error rather than a runtime hazard.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: fmt::Display> fmt::Display for DynArray<T> {
    /// Renders as `[e0, e1, e2]`; an empty array renders as `[]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            item.fmt(f)?;
        }
        f.write_str("]")
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        unsafe {
            std::ptr::drop_in_place(self.as_mut_slice() as *mut [T]);
        }
        if std::mem::size_of::<T>() != 0 && self.cap != 0 {
            let layout = Layout::array::<T>(self.cap).unwrap();
            unsafe {
                std::alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout);
            }
        }
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        let mut new = DynArray::with_capacity(self.cap);
        new.extend(self.iter().cloned());
        new
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];
    fn deref(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T, R> std::ops::Index<R> for DynArray<T>
where
    R: std::slice::SliceIndex<[T]>,
{
    type Output = <[T] as std::ops::Index<R>>::Output;
    fn index(&self, index: R) -> &Self::Output {
        self.as_slice().index(index)
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> From<Vec<T>> for DynArray<T> {
    /// Takes over the vec's buffer without copying the elements.
    fn from(vec: Vec<T>) -> Self {
        let mut vec = std::mem::ManuallyDrop::new(vec);
        let (ptr, len, cap) = (vec.as_mut_ptr(), vec.len(), vec.capacity());
        DynArray {
            // a Vec's pointer is never null
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            cap,
            len,
        }
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(items: [T; N]) -> Self {
        let mut arr = DynArray::with_capacity(N.max(DEFAULT_CAPACITY));
        arr.extend(items);
        arr
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = DynArray::new();
        arr.extend(iter);
        arr
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq> PartialEq<[T]> for DynArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: std::hash::Hash> std::hash::Hash for DynArray<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

/// Owning iterator over a [`DynArray`], front to back.
pub struct IntoIter<T> {
    ptr: NonNull<T>,
    cap: usize,
    start: usize,
    end: usize,
}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let this = std::mem::ManuallyDrop::new(self);
        IntoIter {
            ptr: this.ptr,
            cap: this.cap,
            start: 0,
            end: this.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            let item = unsafe { std::ptr::read(self.ptr.as_ptr().add(self.start)) };
            self.start += 1;
            Some(item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            Some(unsafe { std::ptr::read(self.ptr.as_ptr().add(self.end)) })
        }
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // drop whatever the caller didn't consume, then the buffer
        for _ in self.by_ref() {}
        if std::mem::size_of::<T>() != 0 && self.cap != 0 {
            let layout = Layout::array::<T>(self.cap).unwrap();
            unsafe {
                std::alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout);
            }
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for DynArray<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'src, T: serde::Deserialize<'src>> serde::Deserialize<'src> for DynArray<T> {
    fn deserialize<D: serde::Deserializer<'src>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(DynArray::from(Vec::<T>::deserialize(deserializer)?))
    }
}
