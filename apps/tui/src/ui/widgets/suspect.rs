use crate::ui::{panel_block, text_alignment, ACCENT};
use forensic_dash::adapter::SuspectView;
use forensic_dash::i18n::Language;
use forensic_dash::layout::Panel;
use forensic_dash::sequence::{details_visible, scan_progress};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph, Wrap};
use ratatui::Frame;
use std::time::Duration;

pub fn render_suspect(
    f: &mut Frame<'_>,
    area: Rect,
    suspect: Option<&SuspectView>,
    elapsed: Duration,
    lang: Language,
) {
    let mut block = panel_block(Panel::SuspectProfile.title(lang), Color::Red);

    let Some(suspect) = suspect else {
        f.render_widget(
            Paragraph::new(lang.pick("لا يوجد تطابق بيومتري", "No biometric match"))
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    };

    if suspect.is_wanted {
        block = block.title_top(
            Line::from(Span::styled(
                format!(" {} ", lang.pick("مطلوب", "WANTED")),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        );
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(inner);

    let progress = scan_progress(elapsed);
    let status = if progress < 100 {
        Line::from(Span::styled(
            format!("{} {progress}%", lang.pick("جاري المسح", "SCANNING")),
            Style::default().fg(Color::Cyan),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                lang.pick("تطابق بيومتري", "Biometric Match Confirmed"),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" · {}%", suspect.confidence)),
        ])
    };
    f.render_widget(
        Paragraph::new(status).alignment(text_alignment(lang)),
        rows[0],
    );

    let gauge_color = if progress < 100 { Color::Cyan } else { ACCENT };
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(gauge_color).bg(Color::Black))
            .percent(u16::try_from(progress).unwrap_or(100))
            .label(""),
        rows[1],
    );

    if !details_visible(elapsed) {
        return;
    }

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let mut lines = Vec::new();
    for (name, text) in [
        (lang.pick("الاسم الكامل", "Full Name"), &suspect.name),
        (lang.pick("رقم الهوية", "ID Number"), &suspect.id_number),
        (lang.pick("رقم الهاتف", "Phone Number"), &suspect.phone_number),
        (lang.pick("الموقع المسجل", "Registered Location"), &suspect.location),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("{name}: "), label),
            Span::styled(text.as_str(), value.add_modifier(Modifier::BOLD)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("{}: {}", lang.pick("ملاحظات", "Notes"), suspect.description),
        value,
    )));
    lines.push(Line::from(Span::styled(suspect.identity.as_str(), label)));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(text_alignment(lang))
            .wrap(Wrap { trim: true }),
        rows[2],
    );
}
