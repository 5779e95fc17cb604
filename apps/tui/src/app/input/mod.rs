mod helpers;
pub mod screens;

use crate::app::state::App;
use crossterm::event::KeyCode;

pub use helpers::{wrap_decrement, wrap_increment};

pub async fn handle_input(app: &mut App, key: KeyCode) {
    screens::dispatch_input(app, key).await;
}

/// Pasted text is treated as a dropped file when it names one.
pub async fn handle_paste(app: &mut App, text: &str) {
    screens::upload::handle_paste(app, text).await;
}
