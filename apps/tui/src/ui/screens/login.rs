use crate::app::state::LoginField;
use crate::app::App;
use crate::ui::{panel_block, text_alignment, ACCENT};
use forensic_dash::flow::AuthView;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

const NAFATH: Color = Color::Rgb(91, 91, 175);

pub fn render_login(app: &App, method: AuthView, f: &mut Frame<'_>, area: Rect) {
    let lang = app.language;
    let column = Layout::horizontal([Constraint::Max(64)])
        .flex(Flex::Center)
        .split(area)[0];
    let rows = Layout::vertical([
        Constraint::Length(6),
        Constraint::Min(6),
        Constraint::Length(3),
    ])
    .split(column);

    let (title, subtitle, brand) = match method {
        AuthView::Gov => (
            lang.pick("دخول الجهات الحكومية", "Government Login"),
            lang.pick(
                "بوابة الدخول للموظفين المصرح لهم",
                "Portal for authorized personnel",
            ),
            "Official Portal",
        ),
        _ => (
            lang.pick("تسجيل الدخول", "Log in"),
            lang.pick(
                "للمواطن السعودي أو المقيم الذي يحمل إقامة سعودية",
                "For Saudi citizens or residents with a Saudi Iqama",
            ),
            "نفاذ  Nafath",
        ),
    };

    let heading = Text::from(vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            brand,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
    ]);
    f.render_widget(
        Paragraph::new(heading)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[0],
    );

    let mut fields = Vec::new();
    match method {
        AuthView::Gov => {
            fields.push(field_lines(
                lang.pick("المعرف الوظيفي", "Employee ID"),
                &app.login.employee_id,
                app.login.focus == LoginField::EmployeeId,
            ));
            fields.push(field_lines(
                lang.pick("كلمة المرور", "Password"),
                &"•".repeat(app.login.password.chars().count()),
                app.login.focus == LoginField::Password,
            ));
        }
        _ => fields.push(field_lines(
            lang.pick("رقم بطاقة الأحوال/الاقامة", "National/Iqama ID"),
            &app.login.national_id,
            true,
        )),
    }
    let form = Text::from(fields.into_iter().flatten().collect::<Vec<_>>());
    f.render_widget(
        Paragraph::new(form)
            .block(panel_block("", Color::DarkGray))
            .alignment(text_alignment(lang)),
        rows[1],
    );

    let button_color = if method == AuthView::Nafath { NAFATH } else { ACCENT };
    let button = if app.login_deadline.is_some() {
        let throbber = Throbber::default().to_symbol_span(&app.throbber);
        Line::from(vec![
            throbber,
            Span::raw(" "),
            Span::raw(lang.pick("جاري التحقق...", "Verifying...")),
        ])
    } else if app.login.can_submit(method) {
        Line::from(Span::styled(
            format!(" {} ", lang.pick("تسجيل الدخول", "Log in")),
            Style::default()
                .fg(Color::White)
                .bg(button_color)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {} ", lang.pick("تسجيل الدخول", "Log in")),
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(
        Paragraph::new(button)
            .alignment(Alignment::Center)
            .block(panel_block("", button_color)),
        rows[2],
    );
}

fn field_lines(label: &str, value: &str, focused: bool) -> Vec<Line<'static>> {
    let style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if focused { "▏" } else { "" };
    vec![
        Line::from(Span::styled(label.to_string(), style)),
        Line::from(Span::styled(
            format!("> {value}{cursor}"),
            Style::default().fg(if focused { ACCENT } else { Color::DarkGray }),
        )),
        Line::from(""),
    ]
}
