//! Local persistence: favorites database and preference file
//!
//! Both stores are constructed explicitly and injected into the session;
//! there are no process-wide singletons.

pub mod favorites;
pub mod prefs;

pub use favorites::{sort_by_hue, FavoriteColor, FavoriteStore};
pub use prefs::{DisplayToggles, PreferenceStore, Preferences};
