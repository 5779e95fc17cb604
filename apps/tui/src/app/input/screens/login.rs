use crate::app::input::helpers::push_char;
use crate::app::state::{App, LoginField};
use crossterm::event::KeyCode;
use forensic_dash::flow::AuthView;

const FIELD_LIMIT: usize = 64;

pub fn handle_login_input(app: &mut App, method: AuthView, key: KeyCode) {
    // Fields are frozen while the mock verification runs.
    if app.login_deadline.is_some() {
        if key == KeyCode::Esc {
            app.back_to_selection();
        }
        return;
    }

    match key {
        KeyCode::Esc => app.back_to_selection(),
        KeyCode::Enter => {
            if app.login.can_submit(method) {
                app.submit_login();
            } else if method == AuthView::Gov && app.login.focus == LoginField::EmployeeId {
                app.login.toggle_gov_focus();
            }
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            if method == AuthView::Gov {
                app.login.toggle_gov_focus();
            }
        }
        KeyCode::Backspace => {
            app.login.focused_mut().pop();
        }
        KeyCode::Char(ch) => push_char(app.login.focused_mut(), ch, FIELD_LIMIT),
        _ => {}
    }
}
