//! # Inspection order
//!
//! Pricing all columns in every iteration is expensive. When a pivot rule stops at the first
//! improving column, the order in which columns are inspected determines both how much work an
//! iteration takes and which column enters. An inspection order schedules the columns of each pass
//! and learns from what the pivot rule reports back.
use fifo_set::FIFOSet;
use rand::Rng;
use rand::seq::SliceRandom;

/// Scheduler of candidate column indices.
///
/// Within a pass, each index is handed out at most once. Feedback through `liked` and `disliked`
/// only affects the order of later passes.
pub trait InspectionOrder {
    /// Start a new pass over all indices.
    fn start_pass(&mut self);

    /// Whether there are indices left in the current pass.
    fn has_next(&self) -> bool;

    /// Next index of the current pass.
    ///
    /// Should only be called when `has_next` returns `true`.
    fn take(&mut self) -> usize;

    /// Randomly permute the indices of the current pass that have not yet been handed out.
    fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R);

    /// The index was a good candidate.
    fn liked(&mut self, j: usize);

    /// The index was not a good candidate.
    fn disliked(&mut self, j: usize);
}

/// Inspection order that promotes liked indices and demotes disliked ones.
///
/// At the start of a pass, the indices liked during the previous pass are moved to the front, in
/// the order in which they were liked. Disliked indices are moved to the back. The remaining
/// indices keep their relative order. A shuffle leaves the promoted indices in place.
pub struct TrackingOrder {
    order: Vec<usize>,
    /// Position of the next index to hand out.
    cursor: usize,
    /// Length of the prefix of `order` that was promoted at the start of this pass.
    nr_promoted: usize,
    liked: FIFOSet<usize>,
    disliked: Vec<usize>,
}

impl TrackingOrder {
    /// Create a new instance for the indices `0..len`.
    pub fn new(len: usize) -> Self {
        Self {
            order: (0..len).collect(),
            cursor: len,
            nr_promoted: 0,
            liked: std::iter::empty().collect(),
            disliked: Vec::new(),
        }
    }

    /// Total number of indices.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no indices at all.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The order of the current pass.
    pub fn current_order(&self) -> &[usize] {
        &self.order
    }
}

impl InspectionOrder for TrackingOrder {
    fn start_pass(&mut self) {
        let mut moved = vec![false; self.order.len()];

        let mut promoted = Vec::with_capacity(self.liked.len());
        while let Some(j) = self.liked.pop() {
            if !moved[j] {
                moved[j] = true;
                promoted.push(j);
            }
        }
        let demoted = self.disliked.drain(..)
            .filter(|&j| !std::mem::replace(&mut moved[j], true))
            .collect::<Vec<_>>();

        let middle = self.order.iter().copied().filter(|&j| !moved[j]);
        let new_order = promoted.iter().copied()
            .chain(middle)
            .chain(demoted)
            .collect::<Vec<_>>();
        debug_assert_eq!(new_order.len(), self.order.len());

        self.nr_promoted = promoted.len();
        self.order = new_order;
        self.cursor = 0;
    }

    fn has_next(&self) -> bool {
        self.cursor < self.order.len()
    }

    fn take(&mut self) -> usize {
        debug_assert!(self.has_next());

        let j = self.order[self.cursor];
        self.cursor += 1;
        j
    }

    fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let start = self.cursor.max(self.nr_promoted).min(self.order.len());
        self.order[start..].shuffle(rng);
    }

    fn liked(&mut self, j: usize) {
        debug_assert!(j < self.order.len());

        self.liked.push(j);
    }

    fn disliked(&mut self, j: usize) {
        debug_assert!(j < self.order.len());

        self.disliked.push(j);
    }
}
