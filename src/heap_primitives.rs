// Heap intrinsic operations implemented externally.
//
// A heap is a tree-like structure where every subtree's root has a better score
// than all the other nodes in the subtree.
//
// This is often implemented with an array that's traversed in a non-linear way.
// These are the indices we assign to each node of a binary heap.
//
// ```text
//                           0
//              1                         2
//       3            4            5             6
//   7      8      9     10    11     12     13     14
// 15 16  17 18  19 20  21 22 23 24  25
// ```
//
// The last level will often be incomplete
//
// With arity `A` you can go up, to the first, and to the last children with,
//   - Up:          `(i-1)//A`
//   - First child: `(A*i) + 1`
//   - Last child:  `A*(i+1)`

/// The parent node
///
/// ```
/// use graph_search::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(3), 1);
/// assert_eq!(index_parent::<2>(25), 12);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / A
}

/// The first children
///
/// ```
/// use graph_search::heap_primitives::index_first_children;
/// assert_eq!(index_first_children::<2usize>(0), 1);
/// assert_eq!(index_first_children::<2usize>(1), 3);
/// assert_eq!(index_first_children::<2usize>(11), 23);
/// assert_eq!(index_first_children::<4usize>(1), 5);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_children<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The last children
///
/// ```
/// use graph_search::heap_primitives::index_last_children;
/// assert_eq!(index_last_children::<2usize>(0), 2);
/// assert_eq!(index_last_children::<2usize>(6), 14);
/// assert_eq!(index_last_children::<4usize>(1), 8);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_children<const A: usize>(i: usize) -> usize {
    A * (i + 1)
}

/// Index of the smallest element of a non-empty slice.
///
/// Ties go to the leftmost element.
///
/// ```
/// use graph_search::heap_primitives::min_index;
/// assert_eq!(min_index(&[3, 1, 2, 1]), 1);
/// assert_eq!(min_index(&[7]), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn min_index<T: PartialOrd>(xs: &[T]) -> usize {
    debug_assert!(!xs.is_empty());

    let mut min_i = 0;
    for (i, x) in xs.iter().enumerate().skip(1) {
        if *x < xs[min_i] {
            min_i = i;
        }
    }
    min_i
}
