//! Display precedence for a polled state slot.
//!
//! Both presenters resolve a [`PollState`] through [`SlotView::of`] so they
//! agree on what is shown while a refresh is in flight or after a failure.

use crate::source::PollState;

/// What a presenter should show for one state slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotView<'a, T> {
    /// First fetch still in flight, nothing to show yet.
    Loading,
    /// The latest cycle failed; its message replaces any cached data.
    Error(&'a str),
    /// No fetch has produced data and none is in flight.
    NoData,
    /// Data to render. `refreshing` marks a cycle in flight.
    Ready { data: &'a T, refreshing: bool },
}

impl<'a, T> SlotView<'a, T> {
    /// Resolve a slot into its display state.
    pub fn of(state: &'a PollState<T>) -> Self {
        if let Some(ref message) = state.error {
            return SlotView::Error(message);
        }
        match (&state.data, state.loading) {
            (Some(data), refreshing) => SlotView::Ready { data, refreshing },
            (None, true) => SlotView::Loading,
            (None, false) => SlotView::NoData,
        }
    }
}
