//! Merging of overlapping and adjacent timed events.
//!
//! Merged events adopt every property of the earliest composing event
//! except the end time. All-day events are never merged; they are appended
//! after the merged timed events in their original relative order.

use crate::model::Event;

/// Collapse overlapping or touching timed events into single spans.
///
/// Runs are formed by sorting timed events by start (then end, then input
/// order) and sweeping: an event joins the current run when it starts at or
/// before the run's furthest end so far.
///
/// The output holds no two timed events that overlap or touch, so merging
/// is idempotent: `merge_events(&merge_events(e)) == merge_events(e)`.
pub fn merge_events(events: &[Event]) -> Vec<Event> {
    let (all_day, mut timed): (Vec<&Event>, Vec<&Event>) =
        events.iter().partition(|event| event.is_all_day());

    // Stable sort keeps input order for identical (start, end) pairs.
    timed.sort_by_key(|event| (event.start(), event.end()));

    let mut merged = Vec::with_capacity(timed.len() + all_day.len());
    let mut timed = timed.into_iter();

    if let Some(first) = timed.next() {
        let mut run_head = first;
        let mut run_end = first.end();

        for event in timed {
            if event.start() <= run_end {
                run_end = run_end.max(event.end());
            } else {
                merged.push(run_head.with_end(run_end));
                run_head = event;
                run_end = event.end();
            }
        }

        merged.push(run_head.with_end(run_end));
    }

    merged.extend(all_day.into_iter().cloned());
    merged
}
