use crate::ui::{panel_block, text_alignment, ACCENT};
use forensic_dash::adapter::ReportView;
use forensic_dash::i18n::Language;
use forensic_dash::layout::Panel;
use forensic_dash::sequence::Typewriter;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use std::time::Duration;

fn badge(text: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {text} "),
        Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD),
    )
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

pub fn render_report(
    f: &mut Frame<'_>,
    area: Rect,
    report: Option<&ReportView>,
    ocr_markers: &[String],
    elapsed: Duration,
    lang: Language,
) {
    let block = panel_block(Panel::Report.title(lang), ACCENT);

    let Some(report) = report else {
        f.render_widget(
            Paragraph::new(lang.pick("لا يوجد تقرير", "No report available"))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    };

    let block = block.title_bottom(
        Line::from(format!(
            " {} ",
            lang.pick("تحليل تفصيلي للحادث", "Detailed Incident Analysis")
        ))
        .right_aligned(),
    );

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", report.incident_id),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            badge(&report.priority, Color::Red),
            Span::raw(" "),
            badge(&report.domain, Color::Cyan),
            Span::raw(" "),
            badge(&report.kind, Color::Yellow),
        ]),
        Line::from(Span::styled(
            report.summary.as_str(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ];

    let typewriter = Typewriter::default();
    let mut narrative = typewriter.reveal(&report.narrative, elapsed).to_string();
    if !typewriter.is_done(&report.narrative, elapsed) {
        narrative.push('▌');
    }
    lines.push(Line::from(Span::styled(
        narrative,
        Style::default().fg(Color::White),
    )));
    lines.push(Line::from(""));

    if !report.evidence.is_empty() {
        lines.push(heading(lang.pick("الأدلة", "Evidence")));
        lines.extend(
            report
                .evidence
                .iter()
                .map(|item| Line::from(format!("• {item}"))),
        );
        lines.push(Line::from(""));
    }

    lines.push(heading(lang.pick("خطة العمل", "Action Plan")));
    lines.push(Line::from(format!(
        "• {}: {}",
        lang.pick("الوحدة الموصى بها", "Recommended Unit"),
        report.unit
    )));
    if let Some(camera) = &report.nearest_cctv {
        lines.push(Line::from(format!(
            "• {}: {camera}",
            lang.pick("أقرب كاميرا", "Nearest CCTV")
        )));
    }
    if let Some(notes) = &report.notes {
        lines.push(Line::from(format!("• {}: {notes}", lang.pick("ملاحظات", "Notes"))));
    }

    if !ocr_markers.is_empty() {
        lines.push(Line::from(""));
        lines.push(heading(lang.pick("النصوص المستخرجة", "Extracted Text")));
        lines.push(Line::from(Span::styled(
            ocr_markers.join(" · "),
            Style::default().fg(Color::Yellow),
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(text_alignment(lang))
            .wrap(Wrap { trim: true }),
        area,
    );
}
