//! Request sequencing.
//!
//! Each view numbers its requests; only the response to the latest one may
//! render or clear the loading indicator.

use std::cell::Cell;

use crate::view::{DashboardView, ViewKind};

/// Identifies one request within a [`Sequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonically increasing request counter.
#[derive(Debug, Default)]
pub struct Sequence(Cell<u64>);

impl Sequence {
    pub fn next(&self) -> Ticket {
        let id = self.0.get() + 1;
        self.0.set(id);
        Ticket(id)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.0.get() == ticket.0
    }
}

/// One sequence per data view.
#[derive(Debug, Default)]
pub struct RequestTokens {
    rain_forecast: Sequence,
    planting_scenario: Sequence,
    crop_calendar: Sequence,
    yield_reduction: Sequence,
}

impl RequestTokens {
    pub fn sequence(&self, view: ViewKind) -> &Sequence {
        match view {
            ViewKind::RainForecast => &self.rain_forecast,
            ViewKind::PlantingScenario => &self.planting_scenario,
            ViewKind::CropCalendar => &self.crop_calendar,
            ViewKind::YieldReduction => &self.yield_reduction,
        }
    }
}

/// Turns a view's loading indicator on for the lifetime of one request.
///
/// Dropping the guard turns it off again, unless a newer request for the
/// same view has started since.
pub struct LoadingGuard<'a, V: DashboardView> {
    view: &'a V,
    kind: ViewKind,
    sequence: &'a Sequence,
    ticket: Ticket,
}

impl<'a, V: DashboardView> LoadingGuard<'a, V> {
    pub fn begin(view: &'a V, kind: ViewKind, tokens: &'a RequestTokens) -> Self {
        let sequence = tokens.sequence(kind);
        let ticket = sequence.next();
        view.set_loading(kind, true);
        LoadingGuard {
            view,
            kind,
            sequence,
            ticket,
        }
    }

    pub fn is_current(&self) -> bool {
        self.sequence.is_latest(self.ticket)
    }
}

impl<V: DashboardView> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        if self.is_current() {
            self.view.set_loading(self.kind, false);
        }
    }
}
