use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Callout, MapView, Profile, WaitingScreen};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Span;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    // Render gate: no viewport, no map. A denied permission keeps this
    // screen up for the rest of the session.
    let Some(viewport) = app.viewport else {
        WaitingScreen::new(spinner_frame).render(frame, frame.area());
        return;
    };

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, map_area, search_area] = layout.areas(frame.area());

    // Title bar
    let title_text = format!(
        "Devradar ({:.4}, {:.4}) | {}",
        viewport.latitude, viewport.longitude, app.status_message
    );
    frame.render_widget(Span::raw(title_text), title_area);

    // Map with markers
    let mut map = MapView {
        viewport,
        devs: &app.devs,
        selected: tui.selected_marker,
    };
    map.render(frame, map_area);

    // Callout for the selected marker, anchored bottom-left inside the map
    if let Some(dev) = tui.selected_marker.and_then(|index| app.devs.get(index)) {
        let mut callout = Callout { dev };
        let area = callout_rect(&callout, map_area);
        callout.render(frame, area);
    }

    // Search bar
    tui.search_bar.render(frame, search_area);

    // Profile overlay on top of everything
    if let Some(profile_state) = &tui.profile {
        Profile::new(profile_state).render(frame, frame.area());
    }
}

/// The map's screen area for the given frame area. Mouse hit testing
/// recomputes the layout with this instead of caching rects.
pub fn map_area(frame_area: Rect) -> Rect {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [_title_area, map_area, _search_area] = layout.areas(frame_area);
    map_area
}

fn callout_rect(callout: &Callout, map_area: Rect) -> Rect {
    let width = 42.min(map_area.width.saturating_sub(2));
    let height = callout
        .required_height(width)
        .min(map_area.height.saturating_sub(2));
    Rect {
        x: map_area.x + 1,
        y: (map_area.y + map_area.height).saturating_sub(height + 1),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::directory::{Position, Viewport};
    use crate::test_support::{sample_dev, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_no_viewport_renders_waiting_screen_only() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();

        let app = test_app();
        let mut tui = TuiState::new(String::new());
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, 0))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Acquiring location..."));
        assert!(!text.contains("Radar"));
        assert!(!text.contains("Techs"));
    }

    #[test]
    fn test_bootstrapped_app_renders_map_and_search_bar() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut app = test_app();
        update(
            &mut app,
            Action::Bootstrapped(Viewport::centered_on(Position {
                latitude: -23.5,
                longitude: -46.6,
            })),
        );
        app.devs = vec![sample_dev("a", -23.5, -46.6)];

        let mut tui = TuiState::new(String::new());
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, 0))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Devradar (-23.5000, -46.6000)"));
        assert!(text.contains("Radar"));
        assert!(text.contains("Techs"));
    }

    #[test]
    fn test_selected_marker_renders_callout() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        let mut app = test_app();
        update(
            &mut app,
            Action::RegionSettled(Viewport {
                latitude: 0.0,
                longitude: 0.0,
                latitude_span: 4.0,
                longitude_span: 4.0,
            }),
        );
        let mut dev = sample_dev("a", 0.0, 0.0);
        dev.bio = Some("Hello".to_string());
        app.devs = vec![dev];

        let mut tui = TuiState::new(String::new());
        tui.selected_marker = Some(0);
        terminal
            .draw(|f| draw_ui(f, &app, &mut tui, 0))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|c| c.symbol()).collect::<String>();
        assert!(text.contains("Dev a"));
        assert!(text.contains("Hello"));
    }
}
