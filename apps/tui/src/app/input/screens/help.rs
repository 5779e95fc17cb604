use crate::app::state::App;
use crossterm::event::KeyCode;
use forensic_dash::flow::{AuthView, Phase, View};

/// Screens where printable keys go into a text field.
const fn takes_text(view: View) -> bool {
    matches!(
        view,
        View::Auth(AuthView::Nafath | AuthView::Gov) | View::Dashboard(Phase::Upload)
    )
}

/// F1 toggles help anywhere; `?` opens it where it is not typed text. While
/// help is open it takes every key: Esc, `?` or F1 close it and `q` quits.
pub fn handle_help_toggle(app: &mut App, key: KeyCode) -> bool {
    if app.show_help {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') => app.show_help = false,
            KeyCode::Char('q') => app.running = false,
            _ => {}
        }
        return true;
    }

    let opens = match key {
        KeyCode::F(1) => true,
        KeyCode::Char('?') => !takes_text(app.view()),
        _ => false,
    };
    app.show_help = opens;
    opens
}

/// Space pauses or resumes the sweep, throbber and staggered reveals.
pub fn handle_animation_toggle(app: &mut App, key: KeyCode) -> bool {
    let pause = key == KeyCode::Char(' ');
    if pause {
        app.toggle_animation_pause();
    }
    pause
}

#[cfg(test)]
mod tests {
    use super::*;
    use forensic_dash::config::AppConfig;
    use forensic_dash::flow::ViewState;
    use forensic_dash::routing::StraightLines;
    use forensic_dash::sequence::AnimationMode;
    use forensic_dash::source::FixtureSource;
    use std::sync::Arc;

    fn app(view: View) -> App {
        let mut app = App::new(
            AppConfig::default(),
            Arc::new(FixtureSource),
            Arc::new(StraightLines),
        );
        app.flow = ViewState::new(view);
        app
    }

    #[test]
    fn question_mark_is_typed_into_text_screens() {
        let mut upload = app(View::Dashboard(Phase::Upload));
        assert!(!handle_help_toggle(&mut upload, KeyCode::Char('?')));
        assert!(!upload.show_help);

        let mut result = app(View::Dashboard(Phase::Result));
        assert!(handle_help_toggle(&mut result, KeyCode::Char('?')));
        assert!(result.show_help);
    }

    #[test]
    fn open_help_swallows_keys_until_closed() {
        let mut app = app(View::Auth(AuthView::Nafath));
        assert!(handle_help_toggle(&mut app, KeyCode::F(1)));
        assert!(handle_help_toggle(&mut app, KeyCode::Char('1')));
        assert!(app.show_help && app.running);

        assert!(handle_help_toggle(&mut app, KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn space_toggles_the_animation() {
        let mut app = app(View::Dashboard(Phase::Result));
        assert!(handle_animation_toggle(&mut app, KeyCode::Char(' ')));
        assert_eq!(app.animation_mode, AnimationMode::Paused);
        assert!(!handle_animation_toggle(&mut app, KeyCode::Char('x')));
    }
}
