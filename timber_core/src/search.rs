//! # Grid Search
//!
//! Both sizing searches share one shape: enumerate trial points in a fixed
//! order, evaluate each into a candidate, classify it and let a selection
//! policy decide what to keep and whether to stop.
//!
//! - [`Grid`] - arithmetic sequence `start, start + step, ...` below `stop`
//! - [`SelectionPolicy`] - keeps candidates and may stop the scan
//! - [`CappedCollection`] - first acceptable candidate, then fill to a cap
//! - [`BestBy`] - single acceptable candidate with the largest key
//!
//! ## Example
//!
//! ```rust
//! use timber_core::search::{grid_search, BestBy, Candidate, Grid};
//!
//! struct Trial(f64);
//!
//! impl Candidate for Trial {
//!     fn is_acceptable(&self) -> bool {
//!         self.0 < 0.5
//!     }
//! }
//!
//! let grid = Grid::new(0.0, 1.0, 0.1);
//! let best = grid_search(grid.iter(), Trial, BestBy::new(0.0, |t: &Trial| t.0));
//! assert!((best.unwrap().0 - 0.4).abs() < 1e-12);
//! ```

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

/// Classified search candidate
pub trait Candidate {
    /// Whether the candidate passes every check
    fn is_acceptable(&self) -> bool;
}

/// Arithmetic sequence of trial values with an exclusive upper bound.
///
/// Value `i` is `start + i × step`; the length is
/// `ceil((stop − start) / step)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Grid {
    pub const fn new(start: f64, stop: f64, step: f64) -> Self {
        Grid { start, stop, step }
    }

    /// Number of values in the grid
    pub fn len(&self) -> usize {
        if self.step <= 0.0 || self.stop <= self.start {
            return 0;
        }
        ((self.stop - self.start) / self.step).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th value
    pub fn value(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    /// Values in ascending order
    pub fn iter(&self) -> impl Iterator<Item = f64> {
        let grid = *self;
        (0..grid.len()).map(move |i| grid.value(i))
    }
}

/// Decides which evaluated candidates to keep.
pub trait SelectionPolicy<C> {
    type Output;

    /// Offer the next candidate; `Break` ends the scan.
    fn offer(&mut self, candidate: C) -> ControlFlow<()>;

    /// Selected result once the scan has ended
    fn finish(self) -> Self::Output;
}

/// Evaluate `points` in order until `policy` breaks, then return its
/// selection.
pub fn grid_search<P, C, E, S>(
    points: impl IntoIterator<Item = P>,
    mut evaluate: E,
    mut policy: S,
) -> S::Output
where
    E: FnMut(P) -> C,
    S: SelectionPolicy<C>,
{
    for point in points {
        if policy.offer(evaluate(point)).is_break() {
            break;
        }
    }
    policy.finish()
}

/// Keeps the first acceptable candidate as seed, then every following
/// candidate regardless of its classification, until `cap` are kept.
///
/// Rejected candidates are only skipped while nothing has been kept yet.
#[derive(Debug, Clone)]
pub struct CappedCollection<C> {
    cap: usize,
    kept: Vec<C>,
}

impl<C> CappedCollection<C> {
    pub fn new(cap: usize) -> Self {
        CappedCollection {
            cap,
            kept: Vec::with_capacity(cap),
        }
    }
}

impl<C: Candidate> SelectionPolicy<C> for CappedCollection<C> {
    type Output = Vec<C>;

    fn offer(&mut self, candidate: C) -> ControlFlow<()> {
        if self.kept.len() >= self.cap {
            return ControlFlow::Break(());
        }
        if self.kept.is_empty() && !candidate.is_acceptable() {
            return ControlFlow::Continue(());
        }
        self.kept.push(candidate);
        if self.kept.len() >= self.cap {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn finish(self) -> Vec<C> {
        self.kept
    }
}

/// Keeps the acceptable candidate with the largest key.
///
/// A candidate replaces the current best only when its key is strictly
/// greater, so ties keep the earlier one. Keys at or below the floor are
/// never selected. The scan always runs to the end.
pub struct BestBy<C, F> {
    key: F,
    best_key: f64,
    best: Option<C>,
}

impl<C, F> BestBy<C, F>
where
    F: Fn(&C) -> f64,
{
    pub fn new(floor: f64, key: F) -> Self {
        BestBy {
            key,
            best_key: floor,
            best: None,
        }
    }
}

impl<C, F> SelectionPolicy<C> for BestBy<C, F>
where
    C: Candidate,
    F: Fn(&C) -> f64,
{
    type Output = Option<C>;

    fn offer(&mut self, candidate: C) -> ControlFlow<()> {
        if candidate.is_acceptable() {
            let key = (self.key)(&candidate);
            if key > self.best_key {
                self.best_key = key;
                self.best = Some(candidate);
            }
        }
        ControlFlow::Continue(())
    }

    fn finish(self) -> Option<C> {
        self.best
    }
}
