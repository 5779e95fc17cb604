use crate::app::App;
use crate::ui::widgets::{cctv, kpi, map, radar, report, suspect, threat, timeline};
use crate::ui::ACCENT;
use forensic_dash::adapter::DashboardView;
use forensic_dash::layout::{Page, Panel};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Tabs;
use ratatui::Frame;
use tachyonfx::EffectRenderer;

const KPI_ROW_HEIGHT: u16 = 5;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(view) = app.view.as_ref() else {
        return;
    };
    let lang = app.language;
    let layout = Layout::vertical([Constraint::Length(1), Constraint::Min(4)]).split(area);

    let titles = app
        .pages
        .iter()
        .enumerate()
        .map(|(index, page)| format!(" {} {} ", index + 1, page.title(lang)));
    let tabs = Tabs::new(titles)
        .select(app.page_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .divider("│");
    f.render_widget(tabs, layout[0]);

    if let Some(page) = app.pages.get(app.page_index) {
        render_page(app, view, page, f, layout[1]);
    }

    if let Ok(mut effect) = app.reveal_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            let buffer = f.buffer_mut();
            buffer.render_effect(effect, layout[1], app.last_tick);
        }
    }
}

fn render_page(app: &App, view: &DashboardView, page: &Page, f: &mut Frame<'_>, area: Rect) {
    let constraints = page.rows.iter().map(|row| {
        if row.as_slice() == [Panel::Kpis] {
            Constraint::Length(KPI_ROW_HEIGHT)
        } else {
            Constraint::Min(8)
        }
    });
    let rows = Layout::vertical(constraints).split(area);

    for (row, row_area) in page.rows.iter().zip(rows.iter()) {
        // Right-to-left pages start from the right edge.
        let mut panels = row.clone();
        if app.language.is_rtl() {
            panels.reverse();
        }
        let count = u32::try_from(panels.len()).unwrap_or(1).max(1);
        let cells =
            Layout::horizontal(panels.iter().map(|_| Constraint::Ratio(1, count))).split(*row_area);
        for (panel, cell) in panels.iter().zip(cells.iter()) {
            render_panel(app, view, *panel, f, *cell);
        }
    }
}

fn render_panel(app: &App, view: &DashboardView, panel: Panel, f: &mut Frame<'_>, area: Rect) {
    let lang = app.language;
    let elapsed = app.result_elapsed();

    match panel {
        Panel::Kpis => kpi::render_kpis(f, area, &view.kpis, lang),
        Panel::SuspectProfile => {
            suspect::render_suspect(f, area, view.suspect.as_ref(), elapsed, lang);
        }
        Panel::IncidentMap => map::render_map(
            f,
            area,
            panel.title(lang),
            view.incident_map.as_ref(),
            &app.incident_scene,
            app.anim_seconds,
            lang,
        ),
        Panel::CctvNetwork => cctv::render_cctv(
            f,
            area,
            &view.cameras,
            &view.search_radius,
            elapsed,
            lang,
        ),
        Panel::CameraMap => map::render_map(
            f,
            area,
            panel.title(lang),
            view.camera_map.as_ref(),
            &app.camera_scene,
            app.anim_seconds,
            lang,
        ),
        Panel::GpsRadar => radar::render_gps_radar(
            f,
            area,
            view.gps.as_ref(),
            app.sweep_angle,
            app.anim_seconds,
            lang,
        ),
        Panel::ThreatDetection => threat::render_threat(f, area, &view.threat, &view.image, lang),
        Panel::Timeline => timeline::render_timeline(f, area, &view.timeline, elapsed, lang),
        Panel::Report => report::render_report(
            f,
            area,
            view.report.as_ref(),
            &view.ocr_markers,
            elapsed,
            lang,
        ),
    }
}
