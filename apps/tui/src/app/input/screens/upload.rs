use crate::app::input::helpers::push_char;
use crate::app::state::App;
use crossterm::event::KeyCode;
use forensic_dash::flow::{AuthView, Phase, View};
use forensic_dash::source::dropped_path;

const PATH_LIMIT: usize = 1024;

pub async fn handle_upload_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => {
            let text = app.path_input.clone();
            match dropped_path(&text) {
                Some(path) => app.start_analysis(path).await,
                None => {
                    app.status_message = app
                        .language
                        .pick("أدخل مسار الصورة أولاً", "Enter an image path first")
                        .to_string();
                }
            }
        }
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Esc => app.path_input.clear(),
        KeyCode::Char(ch) => push_char(&mut app.path_input, ch, PATH_LIMIT),
        _ => {}
    }
}

pub async fn handle_paste(app: &mut App, text: &str) {
    match app.view() {
        View::Auth(AuthView::Nafath | AuthView::Gov) => {
            for ch in text.chars() {
                push_char(app.login.focused_mut(), ch, PATH_LIMIT);
            }
        }
        View::Dashboard(Phase::Upload | Phase::Result | Phase::Analyzing { .. }) => {
            // While analyzing the drop is refused by the flow and only logged.
            if let Some(path) = dropped_path(text) {
                app.start_analysis(path).await;
            }
        }
        View::Auth(AuthView::Select) => {}
    }
}
