mod format;
mod input;
mod render;
mod terminal;
mod text;
mod theme;

pub(crate) use input::handle_key_event;
pub(crate) use render::draw_ui;
pub(crate) use terminal::{restore_terminal, setup_terminal};
