pub mod header;
pub mod help;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    {
        let history = app.cpu_history.borrow();
        header::render(frame, chunks[0], &app.store, &app.theme, &history);
    }

    process_table::render(frame, chunks[1], &app.store, app.selected_row, &app.theme);

    statusbar::render(frame, chunks[2], app.status_message.as_ref(), &app.theme);

    if app.show_help {
        let entries = app.keybinds.help_entries();
        help::render(frame, frame.area(), &entries, &app.theme);
    }
}
