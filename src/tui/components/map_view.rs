//! # MapView Component
//!
//! The map rendering surface: a braille canvas bounded to the current
//! viewport, a world-map backdrop, one marker per dev, and a highlight on
//! the selected marker.
//!
//! Pan and zoom are pure viewport math here; the settled values flow back
//! to the core as `Action::RegionSettled` and are stored verbatim.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::Block;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};

use crate::directory::{Dev, Viewport};
use crate::tui::component::Component;

/// Fraction of the visible span one pan step moves the center by.
pub const PAN_STEP: f64 = 0.25;
/// Factor applied to both spans per zoom step.
pub const ZOOM_STEP: f64 = 2.0;

/// Shift the center by whole pan steps. `east`/`north` are step counts,
/// usually -1, 0 or 1.
pub fn pan(viewport: Viewport, east: f64, north: f64) -> Viewport {
    Viewport {
        latitude: viewport.latitude + north * viewport.latitude_span * PAN_STEP,
        longitude: viewport.longitude + east * viewport.longitude_span * PAN_STEP,
        ..viewport
    }
}

pub fn zoom_in(viewport: Viewport) -> Viewport {
    Viewport {
        latitude_span: viewport.latitude_span / ZOOM_STEP,
        longitude_span: viewport.longitude_span / ZOOM_STEP,
        ..viewport
    }
}

pub fn zoom_out(viewport: Viewport) -> Viewport {
    Viewport {
        latitude_span: viewport.latitude_span * ZOOM_STEP,
        longitude_span: viewport.longitude_span * ZOOM_STEP,
        ..viewport
    }
}

const HELP: &str = " ←↑↓→ Pan  +/- Zoom  Tab Marker  Enter Profile  / Search  q Quit ";

/// Map surface with dev markers.
///
/// # Props
///
/// - `viewport`: the region to render
/// - `devs`: markers, one per dev
/// - `selected`: index into `devs` of the highlighted marker
pub struct MapView<'a> {
    pub viewport: Viewport,
    pub devs: &'a [Dev],
    pub selected: Option<usize>,
}

impl MapView<'_> {
    fn x_bounds(&self) -> [f64; 2] {
        let half = self.viewport.longitude_span / 2.0;
        [self.viewport.longitude - half, self.viewport.longitude + half]
    }

    fn y_bounds(&self) -> [f64; 2] {
        let half = self.viewport.latitude_span / 2.0;
        [self.viewport.latitude - half, self.viewport.latitude + half]
    }
}

impl Component for MapView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [x_min, x_max] = self.x_bounds();
        let [y_min, y_max] = self.y_bounds();

        let canvas = Canvas::default()
            .block(
                Block::bordered()
                    .title(" Radar ")
                    .title_bottom(Line::from(HELP).centered()),
            )
            .marker(symbols::Marker::Braille)
            .x_bounds([x_min, x_max])
            .y_bounds([y_min, y_max])
            .paint(|ctx| {
                ctx.draw(&Map {
                    resolution: MapResolution::High,
                    color: Color::DarkGray,
                });
                ctx.layer();

                // Center crosshair, a pan/zoom reference point
                ctx.print(
                    self.viewport.longitude,
                    self.viewport.latitude,
                    Span::styled("+", Style::default().fg(Color::DarkGray)),
                );

                for (index, dev) in self.devs.iter().enumerate() {
                    if dev.longitude < x_min
                        || dev.longitude > x_max
                        || dev.latitude < y_min
                        || dev.latitude > y_max
                    {
                        continue;
                    }
                    let line = if self.selected == Some(index) {
                        Line::from(vec![
                            Span::styled(
                                "◉",
                                Style::default()
                                    .fg(Color::Yellow)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            Span::styled(
                                format!(" {}", dev.name),
                                Style::default().fg(Color::Yellow),
                            ),
                        ])
                    } else {
                        Line::from(Span::styled("◉", Style::default().fg(Color::Magenta)))
                    };
                    ctx.print(dev.longitude, dev.latitude, line);
                }
            });

        frame.render_widget(canvas, area);
    }
}

/// Hit test: given a screen cell, find the marker (if any) at that position.
/// The threshold is in cells, so precision follows the zoom level.
pub fn hit_test_marker(
    col: u16,
    row: u16,
    map_area: Rect,
    viewport: Viewport,
    devs: &[Dev],
) -> Option<usize> {
    // Inner drawing area, borders excluded
    let inner = Rect {
        x: map_area.x + 1,
        y: map_area.y + 1,
        width: map_area.width.saturating_sub(2),
        height: map_area.height.saturating_sub(2),
    };
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    if col < inner.x || col >= inner.x + inner.width || row < inner.y || row >= inner.y + inner.height
    {
        return None;
    }

    // Geographic coordinate at the center of the clicked cell
    let rel_col = (col - inner.x) as f64 + 0.5;
    let rel_row = (row - inner.y) as f64 + 0.5;
    let longitude =
        viewport.longitude - viewport.longitude_span / 2.0
            + rel_col / inner.width as f64 * viewport.longitude_span;
    let latitude = viewport.latitude + viewport.latitude_span / 2.0
        - rel_row / inner.height as f64 * viewport.latitude_span;

    const THRESHOLD_CELLS: f64 = 1.5;
    let mut best: Option<(usize, f64)> = None;
    for (index, dev) in devs.iter().enumerate() {
        let dx = (dev.longitude - longitude) / viewport.longitude_span * inner.width as f64;
        let dy = (dev.latitude - latitude) / viewport.latitude_span * inner.height as f64;
        let distance_sq = dx * dx + dy * dy;
        if distance_sq <= THRESHOLD_CELLS * THRESHOLD_CELLS
            && best.is_none_or(|(_, d)| distance_sq < d)
        {
            best = Some((index, distance_sq));
        }
    }
    best.map(|(index, _)| index)
}
