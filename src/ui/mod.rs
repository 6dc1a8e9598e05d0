pub mod game_common;
pub mod snake_scene;

use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Smallest terminal that fits the board and the info panel.
const MIN_WIDTH: u16 = 50;
const MIN_HEIGHT: u16 = 14;

/// Main UI drawing function.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let size = frame.size();

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let msg = Paragraph::new(format!(
            "Terminal too small ({}x{}), need {}x{}",
            size.width, size.height, MIN_WIDTH, MIN_HEIGHT
        ))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
        frame.render_widget(msg, Rect { height: 1, ..size });
        return;
    }

    snake_scene::render_snake_scene(frame, size, app);
}
