use crate::app::input::helpers::{wrap_decrement, wrap_increment};
use crate::app::state::App;
use crossterm::event::KeyCode;
use forensic_dash::flow::AuthView;

const METHODS: [AuthView; 2] = [AuthView::Nafath, AuthView::Gov];

pub fn handle_auth_select_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Left => {
            app.auth_selection = wrap_decrement(app.auth_selection, METHODS.len());
        }
        KeyCode::Down | KeyCode::Right | KeyCode::Tab => {
            app.auth_selection = wrap_increment(app.auth_selection, METHODS.len());
        }
        KeyCode::Enter => {
            if let Some(method) = METHODS.get(app.auth_selection) {
                app.choose_login(*method);
            }
        }
        KeyCode::Char('1') => app.choose_login(AuthView::Nafath),
        KeyCode::Char('2') => app.choose_login(AuthView::Gov),
        KeyCode::Char('l') => app.toggle_language(),
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        _ => {}
    }
}
