//! Session logic for the rice water-balance dashboard.
//!
//! [`DashboardController`] turns user selections into backend requests and
//! [`ViewRefreshOrchestrator`] runs the four data views, each behind its own
//! loading indicator and request sequence. Everything renders through the
//! [`DashboardView`] trait, so the logic runs (and is tested) without a
//! browser.

pub mod controller;
pub mod refresh;
pub mod tokens;
pub mod view;

#[cfg(test)]
mod testing;

pub use controller::{DashboardController, SelectionEvent};
pub use refresh::ViewRefreshOrchestrator;
pub use view::{DashboardView, ViewKind};
