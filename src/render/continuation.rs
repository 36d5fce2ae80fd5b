//! Resume state carried between render calls.

use std::sync::Arc;

use crate::geom::ScreenPoint;

use super::Strategy;

/// Resume state for one in-flight render job.
///
/// A continuation is returned by value from every call that did not finish
/// and must be passed back, unchanged, together with the same job.
#[derive(Debug, Clone, PartialEq)]
pub enum Continuation {
    /// Average or min/max column walk.
    Columns(ColumnContinuation),
    /// Gradual scatter passes.
    Gradual(GradualContinuation),
    /// Logarithmic point accumulation.
    Logarithmic(LogarithmicContinuation),
}

impl Continuation {
    /// Whether the caller should present the surface after every call.
    ///
    /// Gradual passes are meant to be seen as they fade in; column walks
    /// only need presenting when the frame is committed anyway.
    pub fn commit_always(&self) -> bool {
        matches!(self, Self::Gradual(_))
    }

    /// Strategy that produced this continuation.
    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Columns(columns) => columns.strategy,
            Self::Gradual(_) => Strategy::Gradual,
            Self::Logarithmic(_) => Strategy::Logarithmic,
        }
    }

    /// Label anchor tracked so far.
    pub fn label_anchor(&self) -> Option<ScreenPoint> {
        match self {
            Self::Columns(columns) => columns.label_anchor,
            Self::Gradual(gradual) => gradual.label_anchor,
            Self::Logarithmic(log) => log.label_anchor,
        }
    }

    pub(super) fn set_label_anchor(&mut self, anchor: Option<ScreenPoint>) {
        match self {
            Self::Columns(columns) => columns.label_anchor = anchor,
            Self::Gradual(gradual) => gradual.label_anchor = anchor,
            Self::Logarithmic(log) => log.label_anchor = anchor,
        }
    }

    pub(super) fn into_columns(self) -> Option<ColumnContinuation> {
        match self {
            Self::Columns(columns) => Some(columns),
            _ => None,
        }
    }

    pub(super) fn into_gradual(self) -> Option<GradualContinuation> {
        match self {
            Self::Gradual(gradual) => Some(gradual),
            _ => None,
        }
    }

    pub(super) fn into_logarithmic(self) -> Option<LogarithmicContinuation> {
        match self {
            Self::Logarithmic(log) => Some(log),
            _ => None,
        }
    }
}

/// Column walk state for the average and min/max strategies.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnContinuation {
    pub(super) strategy: Strategy,
    pub(super) offsets: Arc<[usize]>,
    pub(super) offset: usize,
    pub(super) label_anchor: Option<ScreenPoint>,
}

impl ColumnContinuation {
    /// Visiting order of the visible columns.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Index of the next column to visit in [`offsets`](Self::offsets).
    pub fn offset(&self) -> usize {
        self.offset
    }
}

/// Pass state for the gradual strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct GradualContinuation {
    pub(super) a: usize,
    pub(super) b: usize,
    pub(super) k: usize,
    pub(super) offsets: Arc<[usize]>,
    pub(super) offset: usize,
    pub(super) label_anchor: Option<ScreenPoint>,
}

impl GradualContinuation {
    /// Sample window as `(start, end)`, end exclusive.
    pub fn window(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// Stride between samples drawn in one pass, which is also the pass count.
    pub fn stride(&self) -> usize {
        self.k
    }

    /// Number of passes already drawn.
    pub fn passes_drawn(&self) -> usize {
        self.offset
    }

    /// Pass order.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

/// Accumulation state for the logarithmic strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct LogarithmicContinuation {
    pub(super) i: usize,
    pub(super) b: usize,
    pub(super) k: usize,
    pub(super) points: Vec<ScreenPoint>,
    /// Indices into `points` that carry an isolated marker and can no longer change.
    pub(super) markers: Vec<usize>,
    /// Number of leading points whose marker state is final.
    pub(super) settled: usize,
    pub(super) is_done: bool,
    pub(super) label_anchor: Option<ScreenPoint>,
}

impl LogarithmicContinuation {
    /// Next sample index to consume.
    pub fn cursor(&self) -> usize {
        self.i
    }

    /// End of the sample window (exclusive).
    pub fn end(&self) -> usize {
        self.b
    }

    /// Samples consumed per call.
    pub fn batch(&self) -> usize {
        self.k
    }

    /// Polyline accumulated so far, one point per pixel column.
    pub fn points(&self) -> &[ScreenPoint] {
        &self.points
    }

    /// Whether every sample of the window has been consumed.
    pub fn is_done(&self) -> bool {
        self.is_done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(strategy: Strategy) -> Continuation {
        Continuation::Columns(ColumnContinuation {
            strategy,
            offsets: Arc::from(vec![2, 0, 1]),
            offset: 1,
            label_anchor: None,
        })
    }

    #[test]
    fn reports_owning_strategy() {
        assert_eq!(columns(Strategy::MinMax).strategy(), Strategy::MinMax);
        assert_eq!(columns(Strategy::Average).strategy(), Strategy::Average);
        let gradual = Continuation::Gradual(GradualContinuation {
            a: 0,
            b: 10,
            k: 2,
            offsets: Arc::from(vec![1, 0]),
            offset: 0,
            label_anchor: None,
        });
        assert_eq!(gradual.strategy(), Strategy::Gradual);
        assert!(gradual.commit_always());
        assert!(!columns(Strategy::Average).commit_always());
    }

    #[test]
    fn clones_share_offsets() {
        let original = columns(Strategy::Average);
        let copy = original.clone();
        match (&original, &copy) {
            (Continuation::Columns(a), Continuation::Columns(b)) => {
                assert!(Arc::ptr_eq(&a.offsets, &b.offsets));
            }
            _ => panic!("expected column continuations"),
        }
    }

    #[test]
    fn label_anchor_round_trips() {
        let mut continuation = columns(Strategy::Average);
        continuation.set_label_anchor(Some(ScreenPoint::new(3.0, 4.0)));
        assert_eq!(
            continuation.label_anchor(),
            Some(ScreenPoint::new(3.0, 4.0))
        );
    }
}
