//! Time window algebra service
//!
//! Pure interval operations over [`TimeWindow`]s: normalization of local
//! clock times onto the canonical reference week, boundary-order
//! classification, intersection, union, multi-way merge and total duration.
//! Every other scheduling component is driven by this service.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::trace;
use uuid::Uuid;

use crate::models::time_window::{MeetingDay, TimeWindow};
use crate::utils::errors::{CohortMatchError, Result};

/// Anchor for the reference week: 2021-01-01 is a Friday, so day offsets
/// 0/1/2 land on Friday/Saturday/Sunday of that week. The anchor is
/// arbitrary but must stay fixed for the lifetime of a comparison set.
const REFERENCE_FRIDAY: NaiveDate = match NaiveDate::from_ymd_opt(2021, 1, 1) {
    Some(date) => date,
    None => panic!("invalid reference date"),
};

/// Clock-time format accepted by [`TimeWindowService::normalize_instant`].
const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Relative ordering of two windows' four boundary instants.
///
/// With `start < end` holding for both windows there are exactly six
/// non-degenerate permutations. Boundaries are classified with starts
/// ordered before ends at equal instants, so touching windows (one ends
/// exactly when the other starts) classify as overlapping; the zero-width
/// check in [`TimeWindowService::intersect`] then keeps their intersection
/// empty while [`TimeWindowService::union`] merges them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOrdering {
    /// `A.start, A.end, B.start, B.end`: disjoint, A strictly before B.
    Precedes,
    /// `A.start, B.start, A.end, B.end`: partial overlap, A leads.
    OverlapsLeading,
    /// `A.start, B.start, B.end, A.end`: B nested inside A.
    Contains,
    /// `B.start, A.start, A.end, B.end`: A nested inside B.
    ContainedBy,
    /// `B.start, A.start, B.end, A.end`: partial overlap, B leads.
    OverlapsTrailing,
    /// `B.start, B.end, A.start, A.end`: disjoint, B strictly before A.
    Follows,
}

impl BoundaryOrdering {
    /// Whether the two windows share at least one boundary-to-boundary span.
    pub fn overlaps(&self) -> bool {
        !matches!(self, BoundaryOrdering::Precedes | BoundaryOrdering::Follows)
    }
}

/// Result of unioning two windows.
#[derive(Debug, Clone)]
pub enum WindowUnion {
    /// The inputs coalesced into one window.
    Merged(TimeWindow),
    /// The inputs are disjoint and are returned unchanged, in input order.
    Disjoint(TimeWindow, TimeWindow),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    AStart,
    AEnd,
    BStart,
    BEnd,
}

impl Boundary {
    // Starts sort before ends at equal instants; see BoundaryOrdering docs.
    fn tie_rank(self) -> u8 {
        match self {
            Boundary::AStart | Boundary::BStart => 0,
            Boundary::AEnd | Boundary::BEnd => 1,
        }
    }
}

/// Stateless interval-algebra service.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeWindowService;

impl TimeWindowService {
    /// Create a new TimeWindowService instance
    pub fn new() -> Self {
        Self
    }

    /// Map a day offset and an `HH:MM:SS` local clock time to an absolute
    /// instant on the reference week, shifted by the participant's UTC
    /// offset so that instants from different timezones compare directly.
    pub fn normalize_instant(
        &self,
        day_offset: i64,
        clock_time: &str,
        utc_offset_hours: f64,
    ) -> Result<DateTime<Utc>> {
        let day = MeetingDay::from_offset(day_offset)?;
        let time = self.parse_clock_time(clock_time)?;
        Ok(self.project_local_time(day, time, utc_offset_hours))
    }

    /// Project a local wall-clock time on a meeting day into an absolute
    /// reference-week instant.
    pub fn project_local_time(
        &self,
        day: MeetingDay,
        time: NaiveTime,
        utc_offset_hours: f64,
    ) -> DateTime<Utc> {
        let local = (REFERENCE_FRIDAY + Duration::days(day.offset())).and_time(time);
        // Local wall-clock minus the offset gives UTC; minute resolution
        // covers half-hour timezones.
        Utc.from_utc_datetime(&local) - Duration::minutes((utc_offset_hours * 60.0).round() as i64)
    }

    /// Parse an `HH:MM:SS` clock time.
    pub fn parse_clock_time(&self, clock_time: &str) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(clock_time, CLOCK_FORMAT)
            .map_err(|_| CohortMatchError::InvalidClockTime(clock_time.to_string()))
    }

    /// Build a normalized window from a day and local start/end clock times.
    pub fn build_window(
        &self,
        day: MeetingDay,
        start_time: NaiveTime,
        end_time: NaiveTime,
        utc_offset_hours: f64,
        participant_id: Option<Uuid>,
    ) -> Result<TimeWindow> {
        let start = self.project_local_time(day, start_time, utc_offset_hours);
        let end = self.project_local_time(day, end_time, utc_offset_hours);
        let mut window = TimeWindow::new(day, start, end)?.with_local_times(start_time, end_time);
        if let Some(participant_id) = participant_id {
            window = window.with_participant(participant_id);
        }
        Ok(window)
    }

    /// Shift a window's absolute instants back into a participant's local
    /// wall-clock for display.
    pub fn localize(
        &self,
        window: &TimeWindow,
        utc_offset_hours: f64,
    ) -> (chrono::NaiveDateTime, chrono::NaiveDateTime) {
        let shift = Duration::minutes((utc_offset_hours * 60.0).round() as i64);
        ((window.start + shift).naive_utc(), (window.end + shift).naive_utc())
    }

    /// Classify the ordering of two windows' four boundary instants.
    ///
    /// This tag is the single source of truth for whether and how the
    /// windows overlap. An unrecognized permutation means a window with
    /// `start >= end` reached the algebra. It indicates upstream data
    /// corruption and is raised
    /// as a fatal [`CohortMatchError::UnrecognizedBoundaryOrdering`].
    pub fn classify_boundaries(
        &self,
        a: &TimeWindow,
        b: &TimeWindow,
    ) -> Result<BoundaryOrdering> {
        let mut boundaries = [
            (a.start, Boundary::AStart),
            (a.end, Boundary::AEnd),
            (b.start, Boundary::BStart),
            (b.end, Boundary::BEnd),
        ];
        boundaries.sort_by(|x, y| x.0.cmp(&y.0).then(x.1.tie_rank().cmp(&y.1.tie_rank())));
        let permutation = [
            boundaries[0].1,
            boundaries[1].1,
            boundaries[2].1,
            boundaries[3].1,
        ];

        use Boundary::{AEnd, AStart, BEnd, BStart};
        let ordering = match permutation {
            [AStart, AEnd, BStart, BEnd] => BoundaryOrdering::Precedes,
            [AStart, BStart, AEnd, BEnd] => BoundaryOrdering::OverlapsLeading,
            [BStart, AStart, AEnd, BEnd] => BoundaryOrdering::ContainedBy,
            [AStart, BStart, BEnd, AEnd] => BoundaryOrdering::Contains,
            [BStart, AStart, BEnd, AEnd] => BoundaryOrdering::OverlapsTrailing,
            [BStart, BEnd, AStart, AEnd] => BoundaryOrdering::Follows,
            _ => {
                return Err(CohortMatchError::UnrecognizedBoundaryOrdering {
                    window_a: a.id,
                    window_b: b.id,
                })
            }
        };
        trace!(ordering = ?ordering, "Classified window boundary ordering");
        Ok(ordering)
    }

    /// Intersect two windows.
    ///
    /// Returns `None` when the windows are disjoint or when the computed
    /// intersection span is zero-width (touching endpoints count as
    /// non-overlapping). The zero-width check is applied uniformly to the
    /// computed span for every overlapping ordering.
    pub fn intersect(&self, a: &TimeWindow, b: &TimeWindow) -> Result<Option<TimeWindow>> {
        let ordering = self.classify_boundaries(a, b)?;
        if !ordering.overlaps() {
            return Ok(None);
        }
        let start = a.start.max(b.start);
        let end = a.end.min(b.end);
        if start >= end {
            // Degenerate span: the windows merely touch.
            return Ok(None);
        }
        let day = if a.start <= b.start { a.day } else { b.day };
        Ok(Some(TimeWindow::new(day, start, end)?))
    }

    /// Union two windows.
    ///
    /// Disjoint, non-touching windows come back unchanged as a pair;
    /// overlapping, nested or touching windows coalesce into one window
    /// spanning `min(starts)..max(ends)`.
    pub fn union(&self, a: &TimeWindow, b: &TimeWindow) -> Result<WindowUnion> {
        let ordering = self.classify_boundaries(a, b)?;
        if !ordering.overlaps() {
            return Ok(WindowUnion::Disjoint(a.clone(), b.clone()));
        }
        let start = a.start.min(b.start);
        let end = a.end.max(b.end);
        let day = if a.start <= b.start { a.day } else { b.day };
        Ok(WindowUnion::Merged(TimeWindow::new(day, start, end)?))
    }

    /// Reduce a window list to a minimal set of non-overlapping,
    /// non-touching windows.
    ///
    /// The scan restarts from the merge point whenever two elements
    /// coalesce, so merges cascade (three back-to-back windows collapse to
    /// one). Empty or single-element input is returned as a copy.
    pub fn merge_all(&self, windows: &[TimeWindow]) -> Result<Vec<TimeWindow>> {
        let mut merged: Vec<TimeWindow> = windows.to_vec();
        if merged.len() <= 1 {
            return Ok(merged);
        }
        let mut i = 0;
        'scan: while i < merged.len() {
            let mut j = i + 1;
            while j < merged.len() {
                match self.union(&merged[i], &merged[j])? {
                    WindowUnion::Merged(window) => {
                        merged[i] = window;
                        merged.remove(j);
                        // Restart at the merge point so coalescing cascades.
                        continue 'scan;
                    }
                    WindowUnion::Disjoint(_, _) => j += 1,
                }
            }
            i += 1;
        }
        Ok(merged)
    }

    /// Full pairwise intersection across two window sets, discarding empty
    /// results. O(|A|·|B|); per-participant window sets are a handful of
    /// recurring slots, so the quadratic cost is irrelevant.
    pub fn intersect_all_pairs(
        &self,
        set_a: &[TimeWindow],
        set_b: &[TimeWindow],
    ) -> Result<Vec<TimeWindow>> {
        let mut intersections = Vec::new();
        for a in set_a {
            for b in set_b {
                if let Some(window) = self.intersect(a, b)? {
                    intersections.push(window);
                }
            }
        }
        Ok(intersections)
    }

    /// Total duration in hours over a window set.
    pub fn total_duration_hours(&self, windows: &[TimeWindow]) -> f64 {
        windows.iter().map(TimeWindow::duration_hours).sum()
    }
}
