//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The intention is to swap this out for a different adapter (mobile,
//! web, etc.) in the future if needed.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (waiting screen, search in flight): draws every ~80ms
//!   for a smooth spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal
//!   resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor
//! because ratatui's `set_cursor_position` resets the terminal's blink
//! timer on every `draw()` call, making blinking cursors appear erratic
//! during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::directory::{DirectoryProvider, HttpDirectoryProvider, SearchQuery, Viewport};
use crate::location::{FixedLocationProvider, GeoIpLocationProvider, LocationProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::map_view::{hit_test_marker, pan, zoom_in, zoom_out};
use crate::tui::components::{ProfileEvent, ProfileState, SearchBar, SearchBarEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Pan/zoom the map and select markers. Typing auto-switches to Search.
    Map,
    /// Text editing in the search bar. Esc switches to Map.
    Search,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_bar: SearchBar,
    pub input_mode: InputMode,
    /// Index into the dev list of the highlighted marker.
    pub selected_marker: Option<usize>,
    /// Profile overlay (None = hidden)
    pub profile: Option<ProfileState>,
}

impl TuiState {
    pub fn new(initial_techs: String) -> Self {
        Self {
            search_bar: SearchBar::new(initial_techs),
            input_mode: InputMode::Search, // User expects to type immediately
            selected_marker: None,
            profile: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the directory provider from the resolved config.
pub fn build_directory_provider(config: &ResolvedConfig) -> Arc<dyn DirectoryProvider> {
    Arc::new(HttpDirectoryProvider::new(config.directory_base_url.clone()))
}

/// Build the location provider from the resolved config's provider name.
pub fn build_location_provider(config: &ResolvedConfig) -> Arc<dyn LocationProvider> {
    match config.location_provider.as_str() {
        "geoip" => Arc::new(GeoIpLocationProvider::new(
            config.geoip_base_url.clone(),
            config.allow_ip_lookup,
        )),
        _ => {
            // Default to the config-backed fixed position
            Arc::new(FixedLocationProvider::new(config.latitude, config.longitude))
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let directory = build_directory_provider(&config);
    let location = build_location_provider(&config);

    let mut app = App::new(directory);
    app.techs = config.default_techs.clone();
    let mut tui = TuiState::new(config.default_techs);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Location Bootstrap: one permission request, one position read, once
    spawn_bootstrap(location, tx.clone());

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        // Sync SearchBar props with TUI state
        tui.search_bar.dimmed = matches!(tui.input_mode, InputMode::Map);

        // Spinner runs on the waiting screen and while a search is in flight
        let animating = app.viewport.is_none() || app.is_searching;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of mode
            if matches!(event, TuiEvent::Quit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // When the profile overlay is open, route all events to it
            if let Some(ref mut profile) = tui.profile {
                if let Some(ProfileEvent::Dismiss) = profile.handle_event(&event) {
                    tui.profile = None;
                }
                continue;
            }

            // Render gate: until bootstrap lands there is nothing to drive
            let Some(viewport) = app.viewport else {
                continue;
            };

            // Mouse click → marker selection, active in both modes
            if let TuiEvent::MouseClick(col, row) = event {
                let frame_area = terminal.get_frame().area();
                tui.selected_marker =
                    hit_test_marker(col, row, ui::map_area(frame_area), viewport, &app.devs);
                continue;
            }

            // Modal event dispatch
            match tui.input_mode {
                InputMode::Search => {
                    // Esc → hand focus back to the map
                    if matches!(event, TuiEvent::Escape) {
                        tui.input_mode = InputMode::Map;
                        continue;
                    }

                    if let Some(search_event) = tui.search_bar.handle_event(&event) {
                        match search_event {
                            SearchBarEvent::Changed(techs) => {
                                update(&mut app, Action::TechsChanged(techs));
                            }
                            SearchBarEvent::Submitted => {
                                // No in-flight guard: overlapping searches
                                // race and the last response wins.
                                if update(&mut app, Action::SearchSubmitted)
                                    == Effect::SpawnSearch
                                {
                                    spawn_search(&app, tx.clone());
                                }
                            }
                        }
                    }
                }
                InputMode::Map => match event {
                    TuiEvent::Escape | TuiEvent::InputChar('q') => {
                        if update(&mut app, Action::Quit) == Effect::Quit {
                            should_quit = true;
                        }
                    }
                    TuiEvent::InputChar('/') => {
                        tui.input_mode = InputMode::Search;
                    }
                    TuiEvent::CursorUp => {
                        update(&mut app, Action::RegionSettled(pan(viewport, 0.0, 1.0)));
                    }
                    TuiEvent::CursorDown => {
                        update(&mut app, Action::RegionSettled(pan(viewport, 0.0, -1.0)));
                    }
                    TuiEvent::CursorLeft => {
                        update(&mut app, Action::RegionSettled(pan(viewport, -1.0, 0.0)));
                    }
                    TuiEvent::CursorRight => {
                        update(&mut app, Action::RegionSettled(pan(viewport, 1.0, 0.0)));
                    }
                    TuiEvent::InputChar('+') | TuiEvent::InputChar('=') => {
                        update(&mut app, Action::RegionSettled(zoom_in(viewport)));
                    }
                    TuiEvent::InputChar('-') => {
                        update(&mut app, Action::RegionSettled(zoom_out(viewport)));
                    }
                    TuiEvent::NextMarker => {
                        tui.selected_marker = cycle_marker(tui.selected_marker, app.devs.len(), 1);
                    }
                    TuiEvent::PrevMarker => {
                        tui.selected_marker = cycle_marker(tui.selected_marker, app.devs.len(), -1);
                    }
                    TuiEvent::Submit => {
                        // Marker tap-through: navigate to the profile
                        if let Some(dev) =
                            tui.selected_marker.and_then(|index| app.devs.get(index))
                        {
                            let action = Action::MarkerActivated(dev.github_username.clone());
                            if let Effect::OpenProfile(username) = update(&mut app, action) {
                                open_profile(&mut tui, &app, username);
                            }
                        }
                    }
                    // Typing auto-switches to Search mode and forwards the event
                    TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                        tui.input_mode = InputMode::Search;
                        if let Some(SearchBarEvent::Changed(techs)) =
                            tui.search_bar.handle_event(&event)
                        {
                            update(&mut app, Action::TechsChanged(techs));
                        }
                    }
                    _ => {}
                },
            }
        }

        // Handle background task actions (bootstrap and search completions)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if matches!(action, Action::SearchCompleted(_)) {
                // Selection indexes into a list that is about to be replaced
                tui.selected_marker = None;
            }
            match update(&mut app, action) {
                Effect::Quit => {
                    should_quit = true;
                }
                Effect::SpawnSearch => spawn_search(&app, tx.clone()),
                Effect::OpenProfile(username) => open_profile(&mut tui, &app, username),
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Step the marker selection through `len` markers, wrapping at both ends.
fn cycle_marker(current: Option<usize>, len: usize, step: isize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match current {
        None => {
            if step >= 0 {
                0
            } else {
                len - 1
            }
        }
        Some(index) => (index as isize + step).rem_euclid(len as isize) as usize,
    };
    Some(next)
}

/// Snapshot the dev behind a navigation request and open the overlay.
fn open_profile(tui: &mut TuiState, app: &App, github_username: String) {
    info!("Opening profile for {}", github_username);
    let dev = app
        .devs
        .iter()
        .find(|dev| dev.github_username == github_username)
        .cloned();
    tui.profile = Some(ProfileState::new(github_username, dev));
}

fn spawn_bootstrap(location: Arc<dyn LocationProvider>, tx: mpsc::Sender<Action>) {
    info!("Spawning location bootstrap");
    tokio::spawn(async move { bootstrap(location, tx).await });
}

/// One permission request, then at most one high-accuracy position read.
/// Denied permission or a failed read sends nothing: the viewport stays
/// unset and the waiting screen stays up. No retry, no timeout.
async fn bootstrap(location: Arc<dyn LocationProvider>, tx: mpsc::Sender<Action>) {
    if !location.request_permission().await {
        warn!("Location permission denied by provider '{}'", location.name());
        return;
    }
    match location.current_position(true).await {
        Ok(position) => {
            info!(
                "Initial position: ({}, {})",
                position.latitude, position.longitude
            );
            if tx
                .send(Action::Bootstrapped(Viewport::centered_on(position)))
                .is_err()
            {
                warn!("Failed to send bootstrap action: receiver dropped");
            }
        }
        Err(e) => warn!("Position read failed: {}", e),
    }
}

/// Fire one directory search with the current viewport center and techs.
/// Nothing cancels or fences an earlier in-flight search.
fn spawn_search(app: &App, tx: mpsc::Sender<Action>) {
    let Some(viewport) = app.viewport else {
        warn!("Search spawn without a viewport, ignoring");
        return;
    };
    let directory = app.directory.clone();
    let latitude = viewport.latitude;
    let longitude = viewport.longitude;
    let techs = app.techs.clone();

    info!("Spawning directory search: lat={latitude}, lon={longitude}, techs={techs:?}");
    tokio::spawn(async move { search_task(directory, latitude, longitude, techs, tx).await });
}

/// The suspended half of a search: one query, one completion action.
/// Failures are logged here, where the error detail still exists; the
/// reducer only ever learns that the search failed.
async fn search_task(
    directory: Arc<dyn DirectoryProvider>,
    latitude: f64,
    longitude: f64,
    techs: String,
    tx: mpsc::Sender<Action>,
) {
    let query = SearchQuery {
        latitude,
        longitude,
        techs: &techs,
    };
    match directory.search(query).await {
        Ok(devs) => {
            if tx.send(Action::SearchCompleted(devs)).is_err() {
                warn!("Failed to send search results: receiver dropped");
            }
        }
        Err(e) => {
            warn!("Directory search failed: {}", e);
            if tx.send(Action::SearchFailed).is_err() {
                warn!("Failed to send search failure: receiver dropped");
            }
        }
    }
}
