use crate::app::input::screens::help::handle_animation_toggle;
use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    if handle_animation_toggle(app, key) {
        return;
    }

    match key {
        KeyCode::Tab | KeyCode::Right => app.next_page(),
        KeyCode::BackTab | KeyCode::Left => app.previous_page(),
        KeyCode::Char(digit @ '1'..='9') => {
            if let Some(index) = digit.to_digit(10) {
                app.select_page(index as usize - 1);
            }
        }
        KeyCode::Char('l') => app.toggle_language(),
        KeyCode::Char('p') => app.export_pdf(),
        KeyCode::Char('r') | KeyCode::Esc => app.reset(),
        KeyCode::Char('q') => app.running = false,
        _ => {}
    }
}
