use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use forensic_dash::adapter::DashboardView;
use forensic_dash::flow::{Phase, View, ViewState};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::app::input::handle_paste;
use crate::app::{handle_input, App};
use crate::ui;

/// Analyze one image without a UI and print the localized result.
pub async fn run_headless(app: &mut App, image: Option<&str>, json: bool) -> Result<()> {
    let Some(image) = image else {
        return Err(eyre!("--image PATH is required in headless mode"));
    };

    app.flow = ViewState::new(View::Dashboard(Phase::Upload));
    app.start_analysis(PathBuf::from(image)).await;

    while app.flow.is_analyzing() {
        match app.job_rx.recv().await {
            Some(event) => {
                app.handle_job_event(event);
            }
            None => break,
        }
    }

    if let Some(message) = app.alert.take() {
        return Err(eyre!("analysis failed: {message}"));
    }
    let Some(view) = app.view.as_ref() else {
        return Err(eyre!("analysis produced no result"));
    };
    info!("headless analysis complete");

    if json {
        let report = HeadlessReport {
            file: app.upload_name.as_deref(),
            source: app.config.source.as_str(),
            language: view.language.as_str(),
            view,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_headless_text(app.upload_name.as_deref(), view);
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct HeadlessReport<'a> {
    file: Option<&'a str>,
    source: &'a str,
    language: &'a str,
    view: &'a DashboardView,
}

fn render_headless_text(file: Option<&str>, view: &DashboardView) {
    let lang = view.language;
    let title = lang.pick("التحليل الجنائي", "Forensic Analysis");

    println!("\n{title}");
    println!("{}", "=".repeat(title.chars().count()));
    if let Some(file) = file {
        println!("{}: {file}", lang.pick("الملف", "File"));
    }

    let kpis = &view.kpis;
    println!(
        "{}: {} | {}: {} | {}: {}% | {}: {}%",
        lang.pick("مستوى الأولوية", "Priority Level"),
        kpis.priority,
        lang.pick("تطابقات بيومترية", "Face Matches"),
        kpis.matches,
        lang.pick("دقة GPS", "GPS Accuracy"),
        kpis.gps_accuracy,
        lang.pick("تطابق الوجه", "Face Confidence"),
        kpis.face_confidence
    );

    if let Some(suspect) = &view.suspect {
        let wanted = if suspect.is_wanted {
            format!(" [{}]", lang.pick("مطلوب", "WANTED"))
        } else {
            String::new()
        };
        println!(
            "\n{}: {} ({}) {}%{wanted}",
            lang.pick("المشتبه به", "Suspect"),
            suspect.name,
            suspect.identity,
            suspect.confidence
        );
        println!("- {}", suspect.description);
        println!("- {}: {}", lang.pick("رقم الهوية", "ID Number"), suspect.id_number);
        println!("- {}: {}", lang.pick("الموقع المسجل", "Registered Location"), suspect.location);
    }

    if let Some(gps) = &view.gps {
        println!(
            "\n{}: {} ({}: {}%)",
            lang.pick("إحداثيات GPS", "GPS Coordinates"),
            gps.coordinates(),
            lang.pick("الدقة", "Accuracy"),
            gps.accuracy
        );
    }

    if !view.cameras.is_empty() {
        println!("\n{}:", lang.pick("شبكة المراقبة النشطة", "Active Surveillance Network"));
        for camera in &view.cameras {
            println!("- #{} {} | {}", camera.rank, camera.name, camera.distance);
        }
    }

    let threat = &view.threat;
    println!(
        "\n{}: {} ({}: {}, {}: {}, {}: {})",
        lang.pick("تقييم التهديد", "Threat Assessment"),
        threat.level,
        lang.pick("المجموع", "Total"),
        threat.total(),
        lang.pick("تهديدات", "Threats"),
        threat.threat_count(),
        lang.pick("عادي", "Normal"),
        threat.normal_count()
    );
    for detection in threat.threats.iter().chain(&threat.normal) {
        let marker = if detection.threat { "!" } else { "-" };
        println!("{marker} {} {}%", detection.label, detection.confidence);
    }

    if !view.timeline.is_empty() {
        println!("\n{}:", lang.pick("الجدول الزمني", "Timeline"));
        for event in &view.timeline {
            println!("- {} | {} | {}", event.time, event.label, event.title);
        }
    }

    if let Some(report) = &view.report {
        println!(
            "\n{} {}",
            lang.pick("تقرير الاستخبارات", "Intelligence Report"),
            report.incident_id
        );
        println!("{} / {} / {}", report.priority, report.domain, report.kind);
        println!("{}", report.summary);
        println!("{}: {}", lang.pick("الوحدة الموصى بها", "Recommended Unit"), report.unit);
    }
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    loop {
        app.update();
        app.drain_jobs();
        app.drain_routes();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code).await;
                }
                Ok(Event::Paste(text)) => {
                    handle_paste(app, &text).await;
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {}
            }
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
