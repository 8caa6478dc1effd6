/// Edge weights, accumulated path costs and heuristic values.
///
/// Unsigned on purpose: Dijkstra's label-setting invariant needs
/// non-negative weights, so negative inputs are rejected while loading.
pub type Cost = u32;

/// Stands in for the `g` of vertices that haven't been reached yet.
pub const UNREACHED: Cost = Cost::MAX;

/// Whether a cost is an actual distance rather than [`UNREACHED`].
#[inline(always)]
#[must_use]
pub fn valid(c: Cost) -> bool {
    c != UNREACHED
}

/// The budget left after spending `g` out of `budget`.
///
/// Signed, as overspending leaves a negative balance.
///
/// ```
/// use graph_search::cost::remaining;
/// assert_eq!(remaining(10, 3), 7);
/// assert_eq!(remaining(3, 10), -7);
/// ```
#[inline(always)]
#[must_use]
pub fn remaining(budget: Cost, g: Cost) -> i64 {
    i64::from(budget) - i64::from(g)
}
