//! Per-dimension sorted views of the surviving point set.
//!
//! The search never re-sorts. It builds one sorted view of all points per
//! feature dimension up front, then keeps every view current while points
//! migrate between the left and right side of a candidate split. All views
//! of a [`SortedSets`] bundle always hold the same samples; they differ
//! only in sort order.
//!
//! Storage is a contiguous `Vec` per dimension kept in sorted order
//! (insertion and removal shift elements, like a flat set), which iterates
//! much faster than a node-based ordered map during the sweeps that
//! dominate the search.

use std::cmp::Ordering;

use crate::data::DataView;

use super::point::Point;

/// Total order of two points along one feature dimension.
///
/// Points compare by their coordinate on `dim`, with the sample index as a
/// tie-breaker so the order is total and deterministic. `total_cmp` keeps
/// the comparator well behaved on every `f64` bit pattern.
#[inline]
pub(crate) fn cmp_along(a: Point, b: Point, dim: usize, data: &DataView<'_>) -> Ordering {
    a.value(data, dim)
        .total_cmp(&b.value(data, dim))
        .then_with(|| a.0.cmp(&b.0))
}

/// One ordered view: the current point set sorted along a single dimension.
#[derive(Debug, Clone)]
pub(crate) struct SortedSet {
    dim: usize,
    points: Vec<Point>,
}

impl SortedSet {
    fn full(dim: usize, data: &DataView<'_>) -> Self {
        let mut points: Vec<Point> = (0..data.n_samples() as u32).map(Point).collect();
        points.sort_unstable_by(|&a, &b| cmp_along(a, b, dim, data));
        Self { dim, points }
    }

    fn empty(dim: usize, capacity: usize) -> Self {
        Self {
            dim,
            points: Vec::with_capacity(capacity),
        }
    }

    /// Number of points currently in the view.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.points.len()
    }

    /// The point with the smallest coordinate along this dimension.
    #[inline]
    pub(crate) fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Point at a sorted position.
    #[inline]
    pub(crate) fn get(&self, idx: usize) -> Point {
        self.points[idx]
    }

    /// Iterate points in sorted order.
    #[inline]
    pub(crate) fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    /// Insert a point at its sorted position.
    pub(crate) fn insert(&mut self, point: Point, data: &DataView<'_>) {
        let idx = self
            .points
            .binary_search_by(|&probe| cmp_along(probe, point, self.dim, data))
            .unwrap_or_else(|idx| idx);
        debug_assert!(
            self.points.get(idx).copied() != Some(point),
            "sample {} inserted twice into dimension {}",
            point.sample(),
            self.dim
        );
        self.points.insert(idx, point);
    }

    /// Remove a point; returns `false` if it was not present.
    pub(crate) fn remove(&mut self, point: Point, data: &DataView<'_>) -> bool {
        match self
            .points
            .binary_search_by(|&probe| cmp_along(probe, point, self.dim, data))
        {
            Ok(idx) => {
                self.points.remove(idx);
                true
            }
            Err(_) => false,
        }
    }
}

/// The bundle of per-dimension sorted views carried through the recursion.
///
/// One [`SortedSet`] per feature, all holding the same samples. Cloning is
/// a deep copy; each recursion frame owns its own left/right bundles and
/// destroys them on return.
#[derive(Debug, Clone)]
pub(crate) struct SortedSets {
    sets: Vec<SortedSet>,
}

impl SortedSets {
    /// Views over all `n_samples` points, one per feature dimension.
    pub(crate) fn full(data: &DataView<'_>) -> Self {
        Self {
            sets: (0..data.n_features())
                .map(|dim| SortedSet::full(dim, data))
                .collect(),
        }
    }

    /// Empty views with the same dimensions, ready to receive migrated
    /// points in sorted order.
    pub(crate) fn empty(data: &DataView<'_>) -> Self {
        Self {
            sets: (0..data.n_features())
                .map(|dim| SortedSet::empty(dim, data.n_samples()))
                .collect(),
        }
    }

    /// Number of points in the logical set (all views agree).
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.sets[0].len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The view sorted along `dim`.
    #[inline]
    pub(crate) fn set(&self, dim: usize) -> &SortedSet {
        &self.sets[dim]
    }

    /// Move one point from this bundle into `to`, across every dimension.
    ///
    /// Returns `false` if the point was missing from any view here. The
    /// bundles stay internally consistent either way, but a `false`
    /// return means the caller's bookkeeping is broken.
    pub(crate) fn migrate(&mut self, to: &mut SortedSets, point: Point, data: &DataView<'_>) -> bool {
        let mut present_everywhere = true;
        for (from_set, to_set) in self.sets.iter_mut().zip(to.sets.iter_mut()) {
            let removed = from_set.remove(point, data);
            debug_assert!(
                removed,
                "sample {} missing from dimension {} during migration",
                point.sample(),
                from_set.dim
            );
            present_everywhere &= removed;
            to_set.insert(point, data);
        }
        debug_assert!(self.is_coherent() && to.is_coherent());
        present_everywhere
    }

    /// All views hold the same number of points.
    pub(crate) fn is_coherent(&self) -> bool {
        self.sets.iter().all(|s| s.len() == self.sets[0].len())
    }
}
