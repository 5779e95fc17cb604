use crate::ui::{panel_block, text_alignment};
use forensic_dash::adapter::{TimelineEvent, TimelineKind};
use forensic_dash::i18n::Language;
use forensic_dash::layout::Panel;
use forensic_dash::sequence::Cadence;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use std::time::Duration;

const fn kind_color(kind: TimelineKind) -> Color {
    match kind {
        TimelineKind::Threat => Color::Red,
        TimelineKind::Detection => Color::Yellow,
        TimelineKind::Location => Color::Green,
        TimelineKind::Cctv => Color::Blue,
    }
}

pub fn render_timeline(
    f: &mut Frame<'_>,
    area: Rect,
    events: &[TimelineEvent],
    elapsed: Duration,
    lang: Language,
) {
    let visible = Cadence::TIMELINE.visible(events.len(), elapsed);
    let mut lines = Vec::new();

    for event in events.iter().take(visible) {
        let color = kind_color(event.kind);
        lines.push(Line::from(vec![
            Span::styled("◆ ", Style::default().fg(color)),
            Span::styled(event.time.as_str(), Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", event.label),
                Style::default().fg(Color::Black).bg(color),
            ),
            Span::raw("  "),
            Span::styled(
                event.title.as_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", event.description),
            Style::default().fg(Color::Gray),
        )));
        if let Some(location) = &event.location {
            lines.push(Line::from(Span::styled(
                format!("  ⌖ {location}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
    }

    if visible < events.len() {
        lines.push(Line::from(Span::styled(
            "…",
            Style::default().fg(Color::DarkGray),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(panel_block(Panel::Timeline.title(lang), Color::Magenta))
            .alignment(text_alignment(lang))
            .wrap(Wrap { trim: false }),
        area,
    );
}
