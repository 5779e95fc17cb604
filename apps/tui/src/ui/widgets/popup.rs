use forensic_dash::i18n::Language;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

fn hint_area(popup: Rect) -> Rect {
    Rect {
        x: popup.x,
        y: popup.y + popup.height.saturating_sub(2),
        width: popup.width,
        height: 1,
    }
}

/// Modal error box. Any of Enter or Esc dismisses it.
pub fn render_alert(lang: Language, message: &str, f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(60, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", lang.pick("خطأ", "Error")))
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    f.render_widget(
        Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        popup,
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            lang.pick("اضغط Enter للمتابعة", "Press Enter to continue"),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
        hint_area(popup),
    );
}

fn key_line(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - {text}")),
    ])
}

fn help_lines(lang: Language) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            lang.pick("منصة التحليل الأمني الموحدة", "Unified Security Analysis Platform"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(lang.pick("اختصارات لوحة المفاتيح:", "Keyboard Shortcuts:"), bold)),
        key_line("F1 / ?", lang.pick("إظهار أو إخفاء المساعدة", "Toggle this help popup")),
        key_line("F2 / l", lang.pick("تبديل اللغة", "Switch language")),
        key_line("Tab / ←→", lang.pick("التنقل بين الصفحات", "Move between pages")),
        key_line("1-9", lang.pick("الانتقال إلى صفحة", "Jump to a page")),
        key_line("Space", lang.pick("إيقاف الحركة أو استئنافها", "Pause/resume animations")),
        key_line("p", lang.pick("تحميل التقرير (PDF)", "Download PDF report")),
        key_line("r", lang.pick("تحليل صورة جديدة", "Analyze a new image")),
        key_line("Esc", lang.pick("رجوع", "Go back")),
        key_line("q", lang.pick("خروج", "Quit application")),
        Line::from(""),
        Line::from(lang.pick(
            "أفلت ملف صورة على النافذة أو الصق مساره لبدء التحليل.",
            "Drop an image file on the window or paste its path to start an analysis.",
        )),
        Line::from(""),
        Line::from(Span::styled(lang.pick("خيارات سطر الأوامر:", "CLI Options:"), bold)),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(Line::from(line.to_string()));
    }

    lines
}

pub fn render_help(lang: Language, f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(80, 80, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", lang.pick("المساعدة", "Help & Keyboard Shortcuts")))
        .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    f.render_widget(
        Paragraph::new(Text::from(help_lines(lang)))
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            lang.pick("اضغط ? أو Esc للإغلاق", "Press ? or Esc to close"),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
        hint_area(popup),
    );
}
