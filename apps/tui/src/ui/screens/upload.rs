use crate::app::App;
use crate::ui::{panel_block, ACCENT};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

pub fn render_upload(app: &App, f: &mut Frame<'_>, area: Rect) {
    let lang = app.language;
    let panel = Layout::vertical([Constraint::Length(12)])
        .flex(Flex::Center)
        .split(area)[0];
    let panel = Layout::horizontal([Constraint::Max(90)])
        .flex(Flex::Center)
        .split(panel)[0];

    // Blinking cursor, about twice a second.
    let cursor = if (app.anim_seconds * 2.0) as u64 % 2 == 0 {
        "█"
    } else {
        " "
    };

    let body = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            lang.pick("تحميل لقطات المراقبة", "Upload Surveillance Footage"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            lang.pick(
                "اكتب مسار الصورة أو قم بسحبها وإفلاتها في الطرفية. يدعم جميع تنسيقات الصور الرئيسية للتحليل الجنائي.",
                "Type an image path or drag and drop it onto the terminal. Supports all major image formats for forensic analysis.",
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT)),
            Span::raw(app.path_input.as_str()),
            Span::styled(cursor, Style::default().fg(ACCENT)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Enter · {} ", lang.pick("بدء التحقيق", "Initiate Investigation")),
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
    ]);

    let mut block = panel_block(lang.pick("رفع الصورة", "Upload"), ACCENT);
    if let Some(name) = &app.upload_name {
        block = block.title_bottom(Line::from(format!(
            " {}: {name} ",
            lang.pick("آخر ملف", "Last file")
        )));
    }

    f.render_widget(
        Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        panel,
    );
}
