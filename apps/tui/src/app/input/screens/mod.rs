use crate::app::state::App;
use crossterm::event::KeyCode;
use forensic_dash::flow::{AuthView, Phase, View};

mod auth;
mod dashboard;
mod help;
mod login;
pub mod upload;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    if app.alert.is_some() {
        if matches!(key, KeyCode::Enter | KeyCode::Esc) {
            app.alert = None;
        }
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    if key == KeyCode::F(2) {
        app.toggle_language();
        return;
    }

    match app.view() {
        View::Auth(AuthView::Select) => auth::handle_auth_select_input(app, key),
        View::Auth(method) => login::handle_login_input(app, method, key),
        View::Dashboard(Phase::Upload) => upload::handle_upload_input(app, key).await,
        View::Dashboard(Phase::Analyzing { .. }) => handle_analyzing_input(app, key),
        View::Dashboard(Phase::Result) => dashboard::handle_dashboard_input(app, key),
    }
}

fn handle_analyzing_input(app: &mut App, key: KeyCode) {
    if help::handle_animation_toggle(app, key) {
        return;
    }
    if key == KeyCode::Char('q') {
        app.running = false;
    }
}
