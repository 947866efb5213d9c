//! # Duty Tracker Frontend
//!
//! Screen state for the duty tracker, independent of any rendering toolkit.
//! Each screen has a ViewModel that turns intents into use-case calls on the
//! backend services and publishes its UI state through a watch channel.
//! Navigation goes out as [`navigation::NavigationEvent`]s and styling comes
//! from an explicit [`theme::Theme`].

pub mod navigation;
pub mod state;
pub mod theme;
pub mod viewmodels;

#[cfg(test)]
mod test_support;

pub use navigation::{NavigationEvent, Navigator, Route};
pub use state::{execute_use_case, StateStore, TaskScope};
pub use theme::{StatusBadge, Theme};
