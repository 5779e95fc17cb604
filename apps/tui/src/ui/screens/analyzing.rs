use crate::app::App;
use crate::ui::widgets::radar::render_sweep;
use crate::ui::{panel_block, ACCENT};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

pub fn render_analyzing(app: &App, step: usize, f: &mut Frame<'_>, area: Rect) {
    let lang = app.language;
    let panel = Layout::horizontal([Constraint::Max(80)])
        .flex(Flex::Center)
        .split(area)[0];
    let block = panel_block(lang.pick("جاري التحليل", "Analyzing"), ACCENT);
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let columns =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(inner);
    render_sweep(f, columns[0], app.sweep_angle);

    let labels = app.step_labels();
    let rows = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(labels.len() as u16 + 1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .split(columns[1]);

    let current = labels.get(step).copied().unwrap_or_default();
    let headline = Line::from(vec![
        Throbber::default()
            .throbber_style(Style::default().fg(ACCENT))
            .to_symbol_span(&app.throbber),
        Span::raw(" "),
        Span::styled(
            current,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(headline), rows[0]);

    let steps: Vec<Line<'_>> = labels
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let (mark, style) = if index < step {
                ("✓", Style::default().fg(ACCENT))
            } else if index == step {
                ("›", Style::default().fg(Color::White))
            } else {
                ("·", Style::default().fg(Color::DarkGray))
            };
            Line::from(Span::styled(format!("{mark} {label}"), style))
        })
        .collect();
    f.render_widget(Paragraph::new(steps), rows[1]);

    let ratio = if labels.is_empty() {
        0.0
    } else {
        (step + 1) as f64 / labels.len() as f64
    };
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(""),
        rows[2],
    );
}
