//! # Application State
//!
//! Core business state for the radar screen. This module contains domain
//! logic only - no TUI-specific types. Presentation state lives in the
//! `tui` module.
//!
//! ```text
//! App
//! ├── directory: Arc<dyn DirectoryProvider>  // directory service
//! ├── viewport: Option<Viewport>    // visible map region
//! ├── techs: String                 // free-text filter
//! ├── devs: Vec<Dev>                // latest search results
//! ├── is_searching: bool            // a search is in flight
//! └── status_message: String        // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::directory::{Dev, DirectoryProvider, Viewport};

pub struct App {
    pub directory: Arc<dyn DirectoryProvider>,
    /// `None` until bootstrap succeeds. While unset, nothing but the
    /// waiting screen renders.
    pub viewport: Option<Viewport>,
    /// Free-text technology filter, updated on every edit, no debounce.
    pub techs: String,
    /// Replaced wholesale on every successful search. Empty before the
    /// first one.
    pub devs: Vec<Dev>,
    /// A search is in flight. Nothing fences overlapping searches; the
    /// last response to arrive wins.
    pub is_searching: bool,
    pub status_message: String,
}

impl App {
    pub fn new(directory: Arc<dyn DirectoryProvider>) -> Self {
        Self {
            directory,
            viewport: None,
            techs: String::new(),
            devs: Vec::new(),
            is_searching: false,
            status_message: String::from("Acquiring location..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.viewport, None);
        assert!(app.techs.is_empty());
        assert!(app.devs.is_empty());
        assert!(!app.is_searching);
        assert_eq!(app.status_message, "Acquiring location...");
    }
}
