use crate::app::App;
use crate::ui::{panel_block, ACCENT};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

pub fn render_auth_select(app: &App, f: &mut Frame<'_>, area: Rect) {
    let lang = app.language;
    let rows = Layout::vertical([Constraint::Length(5), Constraint::Length(9)])
        .flex(Flex::Center)
        .split(area);

    let intro = Text::from(vec![
        Line::from(Span::styled(
            lang.pick("منصة التحليل الأمني الموحدة", "Unified Security Analysis Platform"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            lang.pick("خدمة تحليل الصور", "Image Analysis Service - Public Security"),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            lang.pick(
                "الرجاء اختيار نوع الحساب للمتابعة إلى النظام",
                "Please select your account type to proceed to the system",
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    f.render_widget(Paragraph::new(intro).alignment(Alignment::Center), rows[0]);

    let cards = Layout::horizontal([Constraint::Max(52), Constraint::Max(52)])
        .flex(Flex::Center)
        .spacing(2)
        .split(rows[1]);

    let options = [
        (
            "1",
            lang.pick("أفراد / مقيمين", "Individuals / Residents"),
            lang.pick(
                "الدخول عبر النفاذ الوطني الموحد (نفاذ) للوصول إلى الخدمات الشخصية",
                "Login via National Single Sign-On (Nafath) to access personal services",
            ),
        ),
        (
            "2",
            lang.pick("جهات حكومية", "Government Entities"),
            lang.pick(
                "بوابة الدخول الموحدة للموظفين والمشغلين المصرح لهم",
                "Unified access portal for authorized personnel and operators",
            ),
        ),
    ];

    for (index, (key, title, description)) in options.into_iter().enumerate() {
        let selected = app.auth_selection == index;
        let color = if selected { ACCENT } else { Color::DarkGray };
        let button = if selected {
            Style::default().fg(Color::Black).bg(ACCENT)
        } else {
            Style::default().fg(Color::White)
        };
        let body = Text::from(vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(description, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(Span::styled(
                format!(" [{key}] {} ", lang.pick("دخول", "Login")),
                button,
            )),
        ]);
        f.render_widget(
            Paragraph::new(body)
                .block(panel_block("", color))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            cards[index],
        );
    }
}
