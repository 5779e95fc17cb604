use crate::ui::{panel_block, ACCENT};
use forensic_dash::adapter::GpsView;
use forensic_dash::i18n::Language;
use forensic_dash::layout::Panel;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;
use std::f64::consts::PI;

/// Largest square that fits in `area`, centered. Cells are about twice as
/// tall as wide, so the square is twice as many columns as rows.
fn square_in(area: Rect) -> Rect {
    let rows = area.height.min(area.width / 2);
    let cols = rows * 2;
    Rect {
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        width: cols,
        height: rows,
    }
}

/// Rings, crosshair and the rotating beam with its trailing ghost line, in a
/// 0..100 square.
fn draw_scope(ctx: &mut Context<'_>, angle: f64, color: Color) {
    let (cx, cy, radius) = (50.0, 50.0, 45.0);

    for ring in 1..=3 {
        ctx.draw(&Circle {
            x: cx,
            y: cy,
            radius: radius * f64::from(ring) / 3.0,
            color: Color::DarkGray,
        });
    }
    ctx.draw(&CanvasLine {
        x1: cx,
        y1: cy - radius,
        x2: cx,
        y2: cy + radius,
        color: Color::DarkGray,
    });
    ctx.draw(&CanvasLine {
        x1: cx - radius,
        y1: cy,
        x2: cx + radius,
        y2: cy,
        color: Color::DarkGray,
    });

    let ghost = angle - PI / 18.0;
    ctx.draw(&CanvasLine {
        x1: cx,
        y1: cy,
        x2: ghost.cos().mul_add(radius * 0.92, cx),
        y2: ghost.sin().mul_add(radius * 0.92, cy),
        color: Color::DarkGray,
    });
    ctx.draw(&CanvasLine {
        x1: cx,
        y1: cy,
        x2: angle.cos().mul_add(radius, cx),
        y2: angle.sin().mul_add(radius, cy),
        color,
    });
}

/// Bare sweeping scope, used while the analysis runs.
pub fn render_sweep(f: &mut Frame<'_>, area: Rect, angle: f64) {
    if area.width < 4 || area.height < 2 {
        return;
    }
    let square = square_in(area);
    f.render_widget(
        Canvas::default()
            .paint(|ctx| {
                draw_scope(ctx, angle, Color::Cyan);
                ctx.draw(&Circle {
                    x: 50.0,
                    y: 50.0,
                    radius: 3.0,
                    color: Color::Cyan,
                });
            })
            .x_bounds([0.0, 100.0])
            .y_bounds([0.0, 100.0]),
        square,
    );
}

pub fn render_gps_radar(
    f: &mut Frame<'_>,
    area: Rect,
    gps: Option<&GpsView>,
    sweep_angle: f64,
    anim_seconds: f64,
    lang: Language,
) {
    let block = panel_block(Panel::GpsRadar.title(lang), ACCENT);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(gps) = gps else {
        f.render_widget(
            Paragraph::new(lang.pick("لا توجد بيانات موقع", "No GPS fix"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    };

    let rows = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    // Target blip pulses once a second, slightly off center.
    let pulse = (anim_seconds * 2.0 * PI).sin().mul_add(1.5, 4.0);
    let square = square_in(rows[0]);
    if square.width >= 4 {
        f.render_widget(
            Canvas::default()
                .paint(|ctx| {
                    draw_scope(ctx, sweep_angle, ACCENT);
                    ctx.draw(&Circle {
                        x: 58.0,
                        y: 56.0,
                        radius: pulse,
                        color: Color::Red,
                    });
                    ctx.print(57.0, 56.0, Span::styled("◉", Style::default().fg(Color::Red)));
                })
                .x_bounds([0.0, 100.0])
                .y_bounds([0.0, 100.0]),
            square,
        );
    }

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}: ", lang.pick("إحداثيات GPS", "GPS Coordinates")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                gps.coordinates(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center),
        rows[1],
    );

    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
            .percent(u16::try_from(gps.accuracy.min(100)).unwrap_or(100))
            .label(format!("{} {}%", lang.pick("الدقة", "Accuracy"), gps.accuracy)),
        rows[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_keeps_the_cell_aspect() {
        let square = square_in(Rect::new(0, 0, 40, 10));
        assert_eq!((square.width, square.height), (20, 10));
        assert_eq!(square.x, 10);

        let narrow = square_in(Rect::new(0, 0, 10, 30));
        assert_eq!((narrow.width, narrow.height), (10, 5));
        assert_eq!(narrow.y, 12);
    }
}
