//! `catena` is a small library of fundamental linear containers: a growable
//! array ([`DynArray`]), a singly linked list ([`SinglyList`]), and a doubly
//! linked list ([`DoublyList`]).
//!
//! The three containers are independent of one another but share a contract:
//! ordered sequence semantics with 0-based indexing, append at the end,
//! bounds-checked indexed access and removal, linear search by equality,
//! forward iteration, and a bracketed [`std::fmt::Display`] rendering. The
//! linked lists are built on dummy sentinel nodes so that operations at the
//! ends need no special cases. Absent ("null") values are supported through
//! the [`Nullable`] element wrapper.
//!
//! # Examples
//! ```
//! use catena::{DoublyList, DynArray, SinglyList};
//!
//! let mut arr = DynArray::new();
//! let mut singly = SinglyList::new();
//! let mut doubly = DoublyList::new();
//! for i in 1..=3 {
//!     arr.push(i);
//!     singly.push(i);
//!     doubly.push(i);
//! }
//! assert_eq!(arr.to_string(), "[1, 2, 3]");
//! assert_eq!(singly.to_string(), "[1 -> 2 -> 3]");
//! assert_eq!(doubly.to_string(), "[1 <-> 2 <-> 3]");
//! ```
//!
//! # Errors
//! Indexed access past the end returns [`OutOfBounds`] and leaves the
//! container unchanged. Iterators signal exhaustion through the standard
//! [`Iterator`] contract: `None`, on that pull and on every pull after it.
//!
//! # Concurrency
//! None of the containers is internally synchronized. Borrowed iterators tie
//! their lifetime to the container, so mutation during iteration is rejected
//! at compile time rather than detected at runtime.

pub mod doubly;
pub mod dyn_array;
mod error;
mod nullable;
pub mod singly;

pub use doubly::DoublyList;
pub use dyn_array::DynArray;
pub use error::OutOfBounds;
pub use nullable::Nullable;
pub use singly::SinglyList;


/// Creates a [`DynArray`] with the vec-literal syntax.
///
/// # Examples
/// ```
/// use catena::dynarray;
/// let arr = dynarray![1, 2, 3];
/// assert_eq!(arr.to_string(), "[1, 2, 3]");
/// ```
#[macro_export]
macro_rules! dynarray {
    () => {
        $crate::DynArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynArray::from(vec![$elem; $n])
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynArray::from(vec![$($x),+])
    };
}

// The shared-contract scenario, run against each container in turn. The
// per-container unit tests live at the bottom of their own modules.
#[cfg(test)]
mod contract_tests {
    use super::*;

    // start empty; push 1, null, 3; probe; remove the null; probe bounds
    macro_rules! shared_scenario {
        ($list:expr) => {{
            let mut list = $list;
            assert!(list.is_empty());

            list.push(Nullable::of(1));
            list.push(Nullable::null());
            list.push(Nullable::of(3));
            assert_eq!(list.len(), 3);
            assert_eq!(list.get(0), Ok(&Nullable::of(1)));
            assert_eq!(list.get(1), Ok(&Nullable::null()));
            assert_eq!(list.get(2), Ok(&Nullable::of(3)));
            assert_eq!(list.index_of(&Nullable::null()), Some(1));

            assert_eq!(list.remove(1), Ok(Nullable::null()));
            assert_eq!(list.len(), 2);
            assert_eq!(list.get(0), Ok(&Nullable::of(1)));
            assert_eq!(list.get(1), Ok(&Nullable::of(3)));

            assert_eq!(list.remove(2), Err(OutOfBounds { index: 2, len: 2 }));
            assert_eq!(
                list.remove(usize::MAX),
                Err(OutOfBounds {
                    index: usize::MAX,
                    len: 2
                })
            );
            assert_eq!(list.len(), 2);
            assert!(!list.is_empty());
        }};
    }

    #[test]
    fn dyn_array_shared_scenario() {
        shared_scenario!(DynArray::new());
    }

    #[test]
    fn singly_list_shared_scenario() {
        shared_scenario!(SinglyList::new());
    }

    #[test]
    fn doubly_list_shared_scenario() {
        shared_scenario!(DoublyList::new());
    }

    #[test]
    fn len_tracks_pushes_and_removes() {
        let mut arr = DynArray::new();
        let mut singly = SinglyList::new();
        let mut doubly = DoublyList::new();
        for i in 0..10 {
            arr.push(i);
            singly.push(i);
            doubly.push(i);
        }
        for _ in 0..4 {
            arr.remove(0).unwrap();
            singly.remove(0).unwrap();
            doubly.remove(0).unwrap();
        }
        assert_eq!(arr.len(), 6);
        assert_eq!(singly.len(), 6);
        assert_eq!(doubly.len(), 6);
    }

    #[test]
    fn index_of_round_trip_per_container() {
        let arr: DynArray<&str> = ["a", "b", "c"].into_iter().collect();
        let singly: SinglyList<&str> = ["a", "b", "c"].into_iter().collect();
        let doubly: DoublyList<&str> = ["a", "b", "c"].into_iter().collect();
        for (i, probe) in ["a", "b", "c"].iter().enumerate() {
            assert_eq!(arr.index_of(probe), Some(i));
            assert_eq!(singly.index_of(probe), Some(i));
            assert_eq!(doubly.index_of(probe), Some(i));
        }
        assert_eq!(arr.index_of(&"z"), None);
        assert_eq!(singly.index_of(&"z"), None);
        assert_eq!(doubly.index_of(&"z"), None);
    }

    #[test]
    fn dynarray_macro_forms() {
        let empty: DynArray<i32> = dynarray![];
        assert!(empty.is_empty());
        let repeated = dynarray![7; 3];
        assert_eq!(&*repeated, &[7, 7, 7]);
        let listed = dynarray![1, 2, 3];
        assert_eq!(&*listed, &[1, 2, 3]);
    }
}
