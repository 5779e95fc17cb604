// Terminal rendering: one screen per view, widgets per dashboard panel

pub mod screens;
pub mod widgets;

use crate::app::App;
use forensic_dash::flow::{AuthView, Phase, View};
use forensic_dash::i18n::Language;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Brand green used for accents and active elements.
pub const ACCENT: Color = Color::Rgb(96, 153, 102);

pub const fn text_alignment(language: Language) -> Alignment {
    if language.is_rtl() {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

/// Bordered block; an empty `title` draws no title.
pub fn panel_block(title: &str, color: Color) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    if title.is_empty() {
        return block;
    }
    block
        .title(format!(" {title} "))
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let area = f.area();
    let layout = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(area);

    render_header(app, f, layout[0]);

    match app.view() {
        View::Auth(AuthView::Select) => screens::auth::render_auth_select(app, f, layout[1]),
        View::Auth(method) => screens::login::render_login(app, method, f, layout[1]),
        View::Dashboard(Phase::Upload) => screens::upload::render_upload(app, f, layout[1]),
        View::Dashboard(Phase::Analyzing { step }) => {
            screens::analyzing::render_analyzing(app, step, f, layout[1]);
        }
        View::Dashboard(Phase::Result) => screens::dashboard::render_dashboard(app, f, layout[1]),
    }

    render_footer(app, f, layout[2]);

    if app.show_help {
        widgets::popup::render_help(app.language, f, area);
    }
    if let Some(message) = &app.alert {
        widgets::popup::render_alert(app.language, message, f, area);
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let lang = app.language;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::horizontal([Constraint::Min(20), Constraint::Length(44)]).split(inner);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            lang.pick("منصة التحليل الأمني الموحدة", "Unified Security Analysis Platform"),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            lang.pick("  ·  خدمة تحليل الصور", "  ·  Image Analysis Service"),
            Style::default().fg(Color::Gray),
        ),
    ]));
    f.render_widget(title, columns[0]);

    let mut actions = Vec::new();
    if app.phase() == Some(Phase::Result) {
        actions.push(Span::styled("[p] ", Style::default().fg(Color::Yellow)));
        actions.push(Span::raw(
            lang.pick("تحميل التقرير (PDF)", "Download PDF Report"),
        ));
        actions.push(Span::raw("  "));
    }
    actions.push(Span::styled("[F2] ", Style::default().fg(Color::Yellow)));
    actions.push(Span::styled(
        lang.toggle_label(),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(
        Paragraph::new(Line::from(actions)).alignment(Alignment::Right),
        columns[1],
    );
}

fn render_footer(app: &App, f: &mut Frame<'_>, area: Rect) {
    let lang = app.language;
    let line = if app.status_message.is_empty() {
        Line::from(Span::styled(
            shortcuts(app),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(Color::Yellow),
        ))
    };
    f.render_widget(
        Paragraph::new(line).alignment(text_alignment(lang)),
        area,
    );
}

fn shortcuts(app: &App) -> &'static str {
    let lang = app.language;
    match app.view() {
        View::Auth(AuthView::Select) => lang.pick(
            "←/→ اختيار · Enter دخول · F1 مساعدة · q خروج",
            "←/→ choose · Enter login · F1 help · q quit",
        ),
        View::Auth(_) => lang.pick(
            "Tab الحقل التالي · Enter تسجيل الدخول · Esc رجوع",
            "Tab next field · Enter log in · Esc back",
        ),
        View::Dashboard(Phase::Upload) => lang.pick(
            "اكتب أو أفلت مسار الصورة · Enter بدء التحقيق · F1 مساعدة",
            "Type or drop an image path · Enter investigate · F1 help",
        ),
        View::Dashboard(Phase::Analyzing { .. }) => lang.pick(
            "جاري التحليل · Space إيقاف الحركة · q خروج",
            "Analyzing · Space pause animation · q quit",
        ),
        View::Dashboard(Phase::Result) => lang.pick(
            "Tab الصفحة التالية · l اللغة · p تقرير · r تحليل جديد · q خروج",
            "Tab next page · l language · p report · r new analysis · q quit",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forensic_dash::config::AppConfig;
    use forensic_dash::domain::AnalysisPayload;
    use forensic_dash::fixture;
    use forensic_dash::flow::ViewState;
    use forensic_dash::routing::StraightLines;
    use forensic_dash::source::FixtureSource;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    fn app() -> App {
        App::new(
            AppConfig::default(),
            Arc::new(FixtureSource),
            Arc::new(StraightLines),
        )
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        terminal.draw(|f| ui(app, f)).expect("draw");
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn auth_screen_offers_both_logins() {
        let mut app = app();
        app.language = Language::En;
        let screen = draw(&app);
        assert!(screen.contains("Individuals / Residents"));
        assert!(screen.contains("Government Entities"));
    }

    #[test]
    fn result_screen_renders_every_preset_page() {
        let mut app = app();
        app.language = Language::En;
        app.flow = ViewState::new(View::Dashboard(Phase::Result));
        let payload = AnalysisPayload::Full(Box::new(fixture::analysis_result(
            "scene.jpg",
            chrono::Utc::now(),
        )));
        app.view = Some(forensic_dash::adapter::DashboardView::build(
            &payload,
            Language::En,
            None,
        ));
        app.payload = Some(payload);

        for index in 0..app.pages.len() {
            app.page_index = index;
            let screen = draw(&app);
            assert!(screen.contains("Download PDF Report"));
        }
    }

    #[test]
    fn alert_is_drawn_over_the_upload_screen() {
        let mut app = app();
        app.flow = ViewState::new(View::Dashboard(Phase::Upload));
        app.language = Language::En;
        app.alert = Some("HTTP 500".into());
        let screen = draw(&app);
        assert!(screen.contains("HTTP 500"));
    }
}
