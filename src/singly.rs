//! A [`SinglyList`] is a forward-only linked list: an owned chain of heap
//! nodes headed by a dummy sentinel, plus a tail pointer for O(1) append.
//! The sentinel never carries caller data; it exists so that inserting or
//! removing at the logical front needs no special case.

use std::fmt;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::OutOfBounds;

struct Node<T> {
    item: MaybeUninit<T>,
    next: *mut Node<T>,
}

impl<T> Node<T> {
    fn alloc(item: MaybeUninit<T>) -> *mut Node<T> {
        Box::into_raw(Box::new(Node {
            item,
            next: std::ptr::null_mut(),
        }))
    }
}

/// A singly linked list with a dummy head sentinel and a tail pointer.
///
/// Invariants: `dhead` is never null and its item slot is never initialized;
/// following `next` from `dhead` exactly `len` steps reaches `tail`;
/// `tail.next` is null. An empty list has `tail == dhead`.
///
/// # Examples
/// ```
/// use catena::SinglyList;
/// let mut list = SinglyList::new();
/// list.push(1);
/// list.push(2);
/// list.push(3);
/// assert_eq!(list.get(1), Ok(&2));
/// assert_eq!(list.remove(0), Ok(1));
/// assert_eq!(list.to_string(), "[2 -> 3]");
/// ```
pub struct SinglyList<T> {
    dhead: NonNull<Node<T>>,
    tail: NonNull<Node<T>>,
    len: usize,
    marker: PhantomData<Box<Node<T>>>,
}

unsafe impl<T: Send> Send for SinglyList<T> {}
unsafe impl<T: Sync> Sync for SinglyList<T> {}

impl<T> SinglyList<T> {
    /// Creates an empty list. Allocates the head sentinel.
    pub fn new() -> Self {
        let dhead = Node::alloc(MaybeUninit::uninit());
        let dhead = unsafe { NonNull::new_unchecked(dhead) };
        SinglyList {
            dhead,
            tail: dhead,
            len: 0,
            marker: PhantomData,
        }
    }

    /// Appends an element to the end of the list. O(1) via the tail pointer.
    ///
    /// # Examples
    /// ```
    /// # use catena::SinglyList;
    /// let mut list = SinglyList::new();
    /// list.push("a");
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn push(&mut self, item: T) {
        let node = Node::alloc(MaybeUninit::new(item));
        unsafe {
            (*self.tail.as_ptr()).next = node;
            self.tail = NonNull::new_unchecked(node);
        }
        self.len += 1;
    }

    /// Returns a reference to the element at `index`, or an [`OutOfBounds`]
    /// error when `index >= len`.
    ///
    /// The last position is answered from the tail pointer in O(1); any other
    /// position walks the chain from the sentinel's successor.
    ///
    /// # Examples
    /// ```
    /// # use catena::SinglyList;
    /// let list: SinglyList<i32> = (1..=3).collect();
    /// assert_eq!(list.get(2), Ok(&3));
    /// assert!(list.get(3).is_err());
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, OutOfBounds> {
        OutOfBounds::check(index, self.len)?;
        if index == self.len - 1 {
            return Ok(unsafe { (*self.tail.as_ptr()).item.assume_init_ref() });
        }
        unsafe {
            let mut curr = (*self.dhead.as_ptr()).next;
            for _ in 0..index {
                curr = (*curr).next;
            }
            Ok((*curr).item.assume_init_ref())
        }
    }

    /// Returns the index of the first element equal to `item`, or `None` if
    /// the list does not contain it. Walks the full chain; O(len).
    ///
    /// # Examples
    /// ```
    /// # use catena::SinglyList;
    /// let list: SinglyList<i32> = (1..=3).collect();
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
    /// Walks to the node before the target (the sentinel occupies conceptual
    /// position -1, so no special case for the front), splices the target
    /// out, and moves the tail pointer back when the tail was removed.
    ///
    /// # Examples
    /// ```
    /// # use catena::SinglyList;
    /// let mut list: SinglyList<i32> = (1..=3).collect();
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.to_string(), "[1 -> 3]");
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T, OutOfBounds> {
        OutOfBounds::check(index, self.len)?;
        unsafe {
            let mut prev = self.dhead.as_ptr();
            for _ in 0..index {
                prev = (*prev).next;
            }
            let target = (*prev).next;
            (*prev).next = (*target).next;
            if self.tail.as_ptr() == target {
                self.tail = NonNull::new_unchecked(prev);
            }
            self.len -= 1;
            let Node { item, .. } = *Box::from_raw(target);
            Ok(item.assume_init())
        }
    }

    // Detaches and returns the first element. Backs Drop and IntoIter.
    fn pop_front(&mut self) -> Option<T> {
        let first = unsafe { (*self.dhead.as_ptr()).next };
        if first.is_null() {
            return None;
        }
        unsafe {
            (*self.dhead.as_ptr()).next = (*first).next;
            if self.tail.as_ptr() == first {
                self.tail = self.dhead;
            }
            self.len -= 1;
            let Node { item, .. } = *Box::from_raw(first);
            Some(item.assume_init())
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
    /// compile error rather than a runtime hazard.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            curr: unsafe { (*self.dhead.as_ptr()).next },
            remaining: self.len,
            marker: PhantomData,
        }
    }
}

impl<T> Default for SinglyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for SinglyList<T> {
    fn drop(&mut self) {
        while self.pop_front().is_some() {}
        // the sentinel's item slot was never initialized
        unsafe {
            drop(Box::from_raw(self.dhead.as_ptr()));
        }
    }
}

impl<T: Clone> Clone for SinglyList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for SinglyList<T> {
    /// Renders as `[e0 -> e1 -> e2]`; an empty list renders as `[]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            item.fmt(f)?;
        }
        f.write_str("]")
    }
}

impl<T> FromIterator<T> for SinglyList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SinglyList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for SinglyList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: PartialEq> PartialEq for SinglyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq> PartialEq<[T]> for SinglyList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SinglyList<T> {}

/// Borrowing iterator over a [`SinglyList`]. Terminates at the null link
/// after the tail.
pub struct Iter<'a, T> {
    curr: *mut Node<T>,
    remaining: usize,
    marker: PhantomData<&'a Node<T>>,
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}
unsafe impl<T: Sync> Sync for Iter<'_, T> {}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.curr.is_null() {
            return None;
        }
        unsafe {
            let item = (*self.curr).item.assume_init_ref();
            self.curr = (*self.curr).next;
            self.remaining -= 1;
            Some(item)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Owning iterator over a [`SinglyList`], front to back.
pub struct IntoIter<T> {
    list: SinglyList<T>,
}

impl<T> IntoIterator for SinglyList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a SinglyList<T> {
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

impl<T> ExactSizeIterator for IntoIter<T> {}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for SinglyList<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'src, T: serde::Deserialize<'src>> serde::Deserialize<'src> for SinglyList<T> {
    fn deserialize<D: serde::Deserializer<'src>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<T>::deserialize(deserializer)?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Nullable;

    #[test]
    fn push_then_get_in_order() {
        let mut list = SinglyList::new();
        for i in 0..5 {
            list.push(i * 10);
        }
        for i in 0..5 {
            assert_eq!(list.get(i), Ok(&(i * 10)));
        }
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn get_last_through_tail() {
        let list: SinglyList<i32> = (0..100).collect();
        assert_eq!(list.get(99), Ok(&99));
    }

    #[test]
    fn remove_front_middle_back() {
        let mut list: SinglyList<i32> = (1..=4).collect();
        assert_eq!(list.remove(0), Ok(1));
        assert_eq!(list.remove(2), Ok(4));
        assert_eq!(list.remove(1), Ok(3));
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0), Ok(&2));
    }

    #[test]
    fn remove_only_element_empties() {
        let mut list = SinglyList::new();
        list.push("only");
        assert_eq!(list.remove(0), Ok("only"));
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "[]");
    }

    #[test]
    fn tail_reattaches_after_removing_last() {
        let mut list: SinglyList<i32> = (1..=3).collect();
        assert_eq!(list.remove(2), Ok(3));
        list.push(9);
        assert_eq!(list.get(2), Ok(&9));
        assert_eq!(list.to_string(), "[1 -> 2 -> 9]");

        // down to empty, then reattach at the sentinel
        let mut list = SinglyList::new();
        list.push(1);
        assert_eq!(list.remove(0), Ok(1));
        list.push(2);
        assert_eq!(list.get(0), Ok(&2));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn bounds_violations_leave_list_unchanged() {
        let mut list: SinglyList<i32> = (1..=3).collect();
        assert_eq!(list.get(3), Err(OutOfBounds { index: 3, len: 3 }));
        assert_eq!(list.remove(3), Err(OutOfBounds { index: 3, len: 3 }));
        assert_eq!(list.len(), 3);
        let items: Vec<_> = list.iter().copied().collect();
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn index_of_first_match() {
        let list: SinglyList<i32> = [1, 2, 2, 3].into_iter().collect();
        assert_eq!(list.index_of(&2), Some(1));
        assert_eq!(list.index_of(&9), None);
        assert_eq!(SinglyList::<i32>::new().index_of(&1), None);
    }

    #[test]
    fn nullable_slots_round_trip() {
        let mut list = SinglyList::new();
        list.push(Nullable::of(1));
        list.push(Nullable::null());
        list.push(Nullable::of(3));
        assert_eq!(list.get(1), Ok(&Nullable::null()));
        assert_eq!(list.index_of(&Nullable::null()), Some(1));
        assert_eq!(list.to_string(), "[1 -> null -> 3]");
    }

    #[test]
    fn display_rendering() {
        let mut list = SinglyList::new();
        assert_eq!(list.to_string(), "[]");
        list.push(1);
        assert_eq!(list.to_string(), "[1]");
        list.push(2);
        assert_eq!(list.to_string(), "[1 -> 2]");
    }

    #[test]
    fn iteration_is_restartable_and_exhausts_to_none() {
        let list: SinglyList<i32> = (1..=2).collect();
        assert_eq!(list.iter().count(), 2);
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn into_iter_consumes_in_order() {
        let list: SinglyList<String> = ["a", "b"].into_iter().map(String::from).collect();
        let items: Vec<_> = list.into_iter().collect();
        assert_eq!(items, ["a", "b"]);
    }

    #[test]
    fn drop_frees_owned_elements() {
        let list: SinglyList<String> = (0..50).map(|i| i.to_string()).collect();
        drop(list);

        let list: SinglyList<String> = (0..5).map(|i| i.to_string()).collect();
        let mut iter = list.into_iter();
        iter.next();
        drop(iter);
    }

    #[test]
    fn clone_is_deep() {
        let list: SinglyList<i32> = (1..=3).collect();
        let mut copy = list.clone();
        copy.push(4);
        assert_eq!(list.len(), 3);
        assert_eq!(copy.len(), 4);
        assert_ne!(list, copy);
    }
}
