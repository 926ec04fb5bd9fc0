//! # Actions
//!
//! Everything that can happen on the radar screen becomes an `Action`.
//! Position read lands? That's `Action::Bootstrapped(viewport)`.
//! User pans the map? That's `Action::RegionSettled(viewport)`.
//!
//! The `update()` function takes the current state and an action,
//! then returns the new state plus the side effect the adapter must run.
//! I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: `assert_eq!(update(state, action), expected)`.
//! And debuggable: log every action, replay the exact session.

use log::{info, warn};

use crate::core::state::App;
use crate::directory::{Dev, Viewport};

/// Everything that can happen in the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Bootstrap finished: permission was granted and one position read
    /// succeeded. Carries the derived initial viewport.
    Bootstrapped(Viewport),
    /// The map view settled on a new region after a pan/zoom.
    RegionSettled(Viewport),
    /// The techs filter changed. One edit, no debounce, no validation.
    TechsChanged(String),
    /// User pressed the search control.
    SearchSubmitted,
    /// A search response arrived.
    SearchCompleted(Vec<Dev>),
    /// A search failed. The error was already logged where it occurred.
    SearchFailed,
    /// User activated a marker; carries the dev's github_username.
    MarkerActivated(String),
    Quit,
}

/// Side effects the adapter must perform after a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Dispatch a directory search with the current viewport center and
    /// techs filter.
    SpawnSearch,
    /// Open the profile destination for the given github_username.
    OpenProfile(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Bootstrapped(viewport) => {
            // Bootstrap runs once. A viewport already settled by the map
            // view must not be clobbered by a slow position read.
            if app.viewport.is_none() {
                info!(
                    "Viewport bootstrapped at ({}, {})",
                    viewport.latitude, viewport.longitude
                );
                app.viewport = Some(viewport);
                app.status_message = String::from("Search devs by techs");
            }
            Effect::None
        }
        Action::RegionSettled(viewport) => {
            // Wholesale replacement. No validation, no clamping.
            app.viewport = Some(viewport);
            Effect::None
        }
        Action::TechsChanged(techs) => {
            app.techs = techs;
            Effect::None
        }
        Action::SearchSubmitted => {
            // Render-gating means the search bar doesn't exist without a
            // viewport; this guard covers actions arriving out of band.
            if app.viewport.is_none() {
                warn!("Search submitted without a viewport, ignoring");
                return Effect::None;
            }
            app.is_searching = true;
            app.status_message = String::from("Searching...");
            Effect::SpawnSearch
        }
        Action::SearchCompleted(devs) => {
            app.is_searching = false;
            app.status_message = format!("{} dev(s) found", devs.len());
            app.devs = devs;
            Effect::None
        }
        Action::SearchFailed => {
            // Results keep their pre-call value. Nothing is surfaced
            // beyond the diagnostic log.
            app.is_searching = false;
            app.status_message = String::from("Search devs by techs");
            Effect::None
        }
        Action::MarkerActivated(github_username) => Effect::OpenProfile(github_username),
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{DevRecord, Position};
    use crate::test_support::{sample_dev, test_app};

    fn settled(latitude: f64, longitude: f64) -> Viewport {
        Viewport {
            latitude,
            longitude,
            latitude_span: 0.1,
            longitude_span: 0.2,
        }
    }

    #[test]
    fn test_bootstrapped_sets_viewport_with_fixed_spans() {
        let mut app = test_app();
        let viewport = Viewport::centered_on(Position {
            latitude: 10.0,
            longitude: 20.0,
        });

        let effect = update(&mut app, Action::Bootstrapped(viewport));

        assert_eq!(effect, Effect::None);
        assert_eq!(
            app.viewport,
            Some(Viewport {
                latitude: 10.0,
                longitude: 20.0,
                latitude_span: 0.04,
                longitude_span: 0.04,
            })
        );
    }

    #[test]
    fn test_bootstrapped_does_not_clobber_settled_viewport() {
        let mut app = test_app();
        update(&mut app, Action::RegionSettled(settled(1.0, 2.0)));

        let late_fix = Viewport::centered_on(Position {
            latitude: 50.0,
            longitude: 60.0,
        });
        update(&mut app, Action::Bootstrapped(late_fix));

        assert_eq!(app.viewport, Some(settled(1.0, 2.0)));
    }

    #[test]
    fn test_region_settled_replaces_wholesale() {
        let mut app = test_app();
        update(&mut app, Action::RegionSettled(settled(1.0, 2.0)));
        update(&mut app, Action::RegionSettled(settled(3.0, 4.0)));
        assert_eq!(app.viewport, Some(settled(3.0, 4.0)));
    }

    #[test]
    fn test_region_settled_is_idempotent() {
        let mut app = test_app();
        update(&mut app, Action::RegionSettled(settled(1.0, 2.0)));
        let once = app.viewport;
        update(&mut app, Action::RegionSettled(settled(1.0, 2.0)));
        assert_eq!(app.viewport, once);
    }

    #[test]
    fn test_techs_changed_replaces_filter() {
        let mut app = test_app();
        update(&mut app, Action::TechsChanged("ruby".to_string()));
        update(&mut app, Action::TechsChanged("ruby,go".to_string()));
        assert_eq!(app.techs, "ruby,go");
    }

    #[test]
    fn test_search_refused_without_viewport() {
        let mut app = test_app();
        let effect = update(&mut app, Action::SearchSubmitted);
        assert_eq!(effect, Effect::None);
        assert!(!app.is_searching);
    }

    #[test]
    fn test_search_dispatches_with_viewport() {
        let mut app = test_app();
        update(&mut app, Action::RegionSettled(settled(10.0, 20.0)));

        let effect = update(&mut app, Action::SearchSubmitted);

        assert_eq!(effect, Effect::SpawnSearch);
        assert!(app.is_searching);
    }

    #[test]
    fn test_search_completed_replaces_results_atomically() {
        let mut app = test_app();
        app.devs = vec![sample_dev("old", 0.0, 0.0)];

        update(
            &mut app,
            Action::SearchCompleted(vec![
                sample_dev("a", 1.0, 2.0),
                sample_dev("b", 3.0, 4.0),
            ]),
        );

        assert_eq!(app.devs.len(), 2);
        assert_eq!(app.devs[0].id, "a");
        assert!(!app.is_searching);
    }

    #[test]
    fn test_search_completed_empty_discards_previous_results() {
        let mut app = test_app();
        app.devs = vec![sample_dev("old", 0.0, 0.0)];

        update(&mut app, Action::SearchCompleted(Vec::new()));

        assert!(app.devs.is_empty());
    }

    #[test]
    fn test_search_failed_leaves_results_unchanged() {
        let mut app = test_app();
        app.devs = vec![sample_dev("kept", 5.0, 6.0)];
        app.is_searching = true;

        let before = app.devs.clone();
        update(&mut app, Action::SearchFailed);

        assert_eq!(app.devs, before);
        assert!(!app.is_searching);
    }

    #[test]
    fn test_marker_activated_requests_profile() {
        let mut app = test_app();
        let effect = update(&mut app, Action::MarkerActivated("deva".to_string()));
        assert_eq!(effect, Effect::OpenProfile("deva".to_string()));
    }

    /// The full screen flow: bootstrap, type a filter, search, get one
    /// wire record back, end with one dev at the converted coordinates.
    #[test]
    fn test_end_to_end_flow() {
        let mut app = test_app();

        update(
            &mut app,
            Action::Bootstrapped(Viewport::centered_on(Position {
                latitude: -23.5,
                longitude: -46.6,
            })),
        );
        assert_eq!(
            app.viewport,
            Some(Viewport {
                latitude: -23.5,
                longitude: -46.6,
                latitude_span: 0.04,
                longitude_span: 0.04,
            })
        );

        update(&mut app, Action::TechsChanged("node".to_string()));
        let effect = update(&mut app, Action::SearchSubmitted);
        assert_eq!(effect, Effect::SpawnSearch);

        let record: DevRecord = serde_json::from_str(
            r#"{"_id":"a1","name":"Dev A","bio":null,"techs":["node"],
                "avatar_url":"u","github_username":"deva",
                "location":{"coordinates":[-46.6,-23.5]}}"#,
        )
        .unwrap();
        update(&mut app, Action::SearchCompleted(vec![record.into()]));

        assert_eq!(app.devs.len(), 1);
        assert_eq!(app.devs[0].id, "a1");
        assert_eq!(app.devs[0].latitude, -23.5);
        assert_eq!(app.devs[0].longitude, -46.6);
    }
}
