//! A [`DoublyList`] is a bidirectional linked list: heap nodes carrying both
//! forward and backward links, fenced by dummy head and tail sentinels.
//! The sentinels never carry caller data; with both ends fenced, insertion
//! and removal need no boundary special cases at all.

use std::fmt;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::OutOfBounds;

struct Node<T> {
    item: MaybeUninit<T>,
    next: *mut Node<T>,
    prev: *mut Node<T>,
}

impl<T> Node<T> {
    fn alloc(item: MaybeUninit<T>) -> *mut Node<T> {
        Box::into_raw(Box::new(Node {
            item,
            next: std::ptr::null_mut(),
            prev: std::ptr::null_mut(),
        }))
    }
}

/// A doubly linked list with dummy head and tail sentinels.
///
/// Invariants: the chain strictly between `dhead` and `dtail` holds exactly
/// `len` real nodes; for every real node, `node.prev.next == node` and
/// `node.next.prev == node`; the sentinels' item slots are never initialized.
/// An empty list has `dhead.next == dtail` and `dtail.prev == dhead`.
///
/// # Examples
/// ```
/// use catena::DoublyList;
/// let mut list = DoublyList::new();
/// list.push(1);
/// list.push(2);
/// list.push(3);
/// assert_eq!(list.get(1), Ok(&2));
/// assert_eq!(list.remove(1), Ok(2));
/// assert_eq!(list.to_string(), "[1 <-> 3]");
/// ```
pub struct DoublyList<T> {
    dhead: NonNull<Node<T>>,
    dtail: NonNull<Node<T>>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

unsafe impl<T: Send> Send for DoublyList<T> {}
unsafe impl<T: Sync> Sync for DoublyList<T> {}

impl<T> DoublyList<T> {
    /// Creates an empty list. Allocates both sentinels and links them to
    /// each other.
    pub fn new() -> Self {
        let dhead = Node::alloc(MaybeUninit::uninit());
        let dtail = Node::alloc(MaybeUninit::uninit());
        unsafe {
            (*dhead).next = dtail;
            (*dtail).prev = dhead;
            DoublyList {
                dhead: NonNull::new_unchecked(dhead),
                dtail: NonNull::new_unchecked(dtail),
                len: 0,
                marker: PhantomData,
            }
        }
    }

    /// Appends an element to the end of the list, splicing a node between
    /// the current last node and the tail sentinel. O(1).
    ///
    /// # Examples
    /// ```
    /// # use catena::DoublyList;
    /// let mut list = DoublyList::new();
    /// list.push("a");
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn push(&mut self, item: T) {
        let node = Node::alloc(MaybeUninit::new(item));
        unsafe {
            let last = (*self.dtail.as_ptr()).prev;
            (*node).prev = last;
            (*node).next = self.dtail.as_ptr();
            (*last).next = node;
            (*self.dtail.as_ptr()).prev = node;
        }
        self.len += 1;
    }

    /// Returns a reference to the element at `index`, or an [`OutOfBounds`]
    /// error when `index >= len`.
    ///
    /// The last position is answered through the tail sentinel's back link
    /// in O(1); any other position walks forward from the head sentinel.
    ///
    /// # Examples
    /// ```
    /// # use catena::DoublyList;
    /// let list: DoublyList<i32> = (1..=3).collect();
    /// assert_eq!(list.get(2), Ok(&3));
    /// assert!(list.get(3).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, OutOfBounds> {
        OutOfBounds::check(index, self.len)?;
        unsafe {
            if index == self.len - 1 {
                let last = (*self.dtail.as_ptr()).prev;
                return Ok((*last).item.assume_init_ref());
            }
            let mut curr = (*self.dhead.as_ptr()).next;
            for _ in 0..index {
                curr = (*curr).next;
            }
            Ok((*curr).item.assume_init_ref())
        }
    }

    /// Returns the index of the first element equal to `item`, or `None` if
    /// the list does not contain it. Forward walk; O(len).
    ///
    /// # Examples
    /// ```
    /// # use catena::DoublyList;
    /// let list: DoublyList<i32> = (1..=3).collect();
    /// assert_eq!(list.index_of(&2), Some(1));
    /// assert_eq!(list.index_of(&9), None);
    /// ```
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|slot| slot == item)
    }

    /// Removes and returns the element at `index`. Returns an
    /// [`OutOfBounds`] error, leaving the list untouched, when
    /// `index >= len`.
    ///
    /// Walks forward to the target and splices it out in both directions;
    /// the sentinels guarantee the target always has live neighbors. The
    /// detached node is freed immediately, so nothing keeps a path back into
    /// the live chain.
    ///
    /// # Examples
    /// ```
    /// # use catena::DoublyList;
    /// let mut list: DoublyList<i32> = (1..=3).collect();
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.to_string(), "[1 <-> 3]");
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, OutOfBounds> {
        OutOfBounds::check(index, self.len)?;
        unsafe {
            let mut target = (*self.dhead.as_ptr()).next;
            for _ in 0..index {
                target = (*target).next;
            }
            Ok(self.unlink(target))
        }
    }

    // Splices a real node out of the chain, frees it, and returns its item.
    // Caller must pass a node strictly between the sentinels.
    unsafe fn unlink(&mut self, target: *mut Node<T>) -> T {
        (*(*target).prev).next = (*target).next;
        (*(*target).next).prev = (*target).prev;
        self.len -= 1;
        let Node { item, .. } = *Box::from_raw(target);
        item.assume_init()
    }

    // Detaches and returns the first element. Backs Drop and IntoIter.
    fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        unsafe {
            let first = (*self.dhead.as_ptr()).next;
            Some(self.unlink(first))
        }
    }

    // Detaches and returns the last element. Backs IntoIter's back end.
    fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        unsafe {
            let last = (*self.dtail.as_ptr()).prev;
            Some(self.unlink(last))
        }
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a borrowing iterator over the elements in order.
    ///
    /// The iterator borrows the list, so mutating while iterating is a
    /// compile error rather than a runtime hazard. It walks forward from the
    /// head sentinel's successor and stops at the tail sentinel; the back
    /// links make it double-ended for free.
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe {
            Iter {
                head: (*self.dhead.as_ptr()).next,
                tail: (*self.dtail.as_ptr()).prev,
                remaining: self.len,
                marker: PhantomData,
            }
        }
    }
}

impl<T> Default for DoublyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DoublyList<T> {
    fn drop(&mut self) {
        while self.pop_front().is_some() {}
        // the sentinels' item slots were never initialized
        unsafe {
            drop(Box::from_raw(self.dhead.as_ptr()));
            drop(Box::from_raw(self.dtail.as_ptr()));
        }
    }
}

impl<T: Clone> Clone for DoublyList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for DoublyList<T> {
    /// Renders as `[e0 <-> e1 <-> e2]`; an empty list renders as `[]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" <-> ")?;
            }
            item.fmt(f)?;
        }
        f.write_str("]")
    }
}

impl<T> FromIterator<T> for DoublyList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = DoublyList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for DoublyList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: PartialEq> PartialEq for DoublyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<[T]> for DoublyList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DoublyList<T> {}

/// Borrowing iterator over a [`DoublyList`]. Double-ended: the back links
/// allow walking from the tail as cheaply as from the head.
pub struct Iter<'a, T> {
    head: *mut Node<T>,
    tail: *mut Node<T>,
    remaining: usize,
    marker: PhantomData<&'a Node<T>>,
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        unsafe {
            let item = (*self.head).item.assume_init_ref();
            self.head = (*self.head).next;
            self.remaining -= 1;
            Some(item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        unsafe {
            let item = (*self.tail).item.assume_init_ref();
            self.tail = (*self.tail).prev;
            self.remaining -= 1;
            Some(item)
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Owning iterator over a [`DoublyList`], front to back (and back to front
/// through [`DoubleEndedIterator`]).
pub struct IntoIter<T> {
    list: DoublyList<T>,
}

impl<T> IntoIterator for DoublyList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a DoublyList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for DoublyList<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'src, T: serde::Deserialize<'src>> serde::Deserialize<'src> for DoublyList<T> {
    fn deserialize<D: serde::Deserializer<'src>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<T>::deserialize(deserializer)?.into_iter().collect())
    }
}
