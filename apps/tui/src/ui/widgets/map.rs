use crate::ui::panel_block;
use forensic_dash::i18n::Language;
use forensic_dash::map::{
    dash_segments, Layer, MapModel, MapScene, MarkerKind, PathColor, PathLayer, Viewport,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Dash lengths are in fortieths of the visible map width.
const DASH_UNITS: f64 = 40.0;

const fn path_color(color: PathColor) -> Color {
    match color {
        PathColor::Gold => Color::Rgb(255, 215, 0),
        PathColor::Red => Color::Red,
        PathColor::Orange => Color::Rgb(255, 165, 0),
        PathColor::Yellow => Color::Yellow,
    }
}

const fn marker_symbol(kind: MarkerKind) -> (&'static str, Color) {
    match kind {
        MarkerKind::Incident => ("◉", Color::Red),
        MarkerKind::Camera => ("▣", Color::Cyan),
        MarkerKind::Intercept => ("✕", Color::Rgb(255, 165, 0)),
        MarkerKind::PoliceStation => ("⛨", Color::Blue),
    }
}

fn draw_path(ctx: &mut Context<'_>, path: &PathLayer, viewport: &Viewport, anim_seconds: f64) {
    let unit = viewport.width() / DASH_UNITS;
    let dash = path.style.dash * unit;
    let gap = path.style.gap * unit;
    let phase = anim_seconds * path.style.speed * (dash + gap);
    let points: Vec<(f64, f64)> = path.points.iter().map(|p| (p.lng, p.lat)).collect();
    let color = path_color(path.style.color);

    for [(x1, y1), (x2, y2)] in dash_segments(&points, dash, gap, phase) {
        ctx.draw(&CanvasLine { x1, y1, x2, y2, color });
    }
}

pub fn render_map(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    model: Option<&MapModel>,
    scene: &MapScene,
    anim_seconds: f64,
    lang: Language,
) {
    let mut block = panel_block(title, Color::Blue);

    let Some(model) = model else {
        f.render_widget(
            Paragraph::new(lang.pick("لا يوجد موقع", "No location available"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    };

    let routes = model.overlay.routes.len();
    if routes > 0 {
        block = block.title_bottom(Line::from(vec![
            Span::styled(" ━ ", Style::default().fg(Color::Red)),
            Span::raw(lang.pick("مسار مرجح", "likely")),
            Span::styled(" ━ ", Style::default().fg(Color::Rgb(255, 165, 0))),
            Span::raw(lang.pick("محتمل", "possible")),
            Span::styled(" ━ ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{} ", lang.pick("ضعيف", "unlikely"))),
        ]));
    }

    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width < 2 || inner.height < 2 {
        return;
    }

    let viewport = Viewport::for_focus(model.focus, inner.width, inner.height);

    // Heavier paths are drawn later so they stay on top.
    let mut paths: Vec<&PathLayer> = scene
        .layers()
        .iter()
        .filter_map(|layer| match layer {
            Layer::Path(path) => Some(path),
            Layer::Marker(_) => None,
        })
        .collect();
    paths.sort_by_key(|path| path.style.weight);

    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                for path in &paths {
                    draw_path(ctx, path, &viewport, anim_seconds);
                }
                ctx.layer();

                for layer in scene.layers() {
                    let Layer::Marker(marker) = layer else {
                        continue;
                    };
                    if !viewport.contains(marker.position) {
                        continue;
                    }
                    let (symbol, color) = marker_symbol(marker.kind);
                    ctx.print(
                        marker.position.lng,
                        marker.position.lat,
                        Span::styled(symbol, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    );
                }
            })
            .x_bounds(viewport.lng)
            .y_bounds(viewport.lat),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_marker_kind_has_a_symbol() {
        for kind in [
            MarkerKind::Incident,
            MarkerKind::Camera,
            MarkerKind::Intercept,
            MarkerKind::PoliceStation,
        ] {
            assert!(!marker_symbol(kind).0.is_empty());
        }
    }
}
