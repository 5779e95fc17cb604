use crate::ui::ACCENT;
use forensic_dash::adapter::Kpis;
use forensic_dash::i18n::Language;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_kpis(f: &mut Frame<'_>, area: Rect, kpis: &Kpis, lang: Language) {
    let mut cards = vec![
        (
            lang.pick("مستوى الأولوية", "Priority Level"),
            kpis.priority.clone(),
            Color::Red,
        ),
        (
            lang.pick("تطابقات بيومترية", "Face Matches"),
            kpis.matches.to_string(),
            Color::Cyan,
        ),
        (
            lang.pick("دقة GPS", "GPS Accuracy"),
            format!("{}%", kpis.gps_accuracy),
            ACCENT,
        ),
        (
            lang.pick("تطابق الوجه", "Face Confidence"),
            format!("{}%", kpis.face_confidence),
            Color::Yellow,
        ),
    ];
    if lang.is_rtl() {
        cards.reverse();
    }

    let cells = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);
    for ((label, value, color), cell) in cards.into_iter().zip(cells.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
        ]);
        f.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            *cell,
        );
    }
}
