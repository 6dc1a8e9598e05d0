//! Snake game UI: replays the engine's drawing commands on a ratatui canvas.
//!
//! The canvas uses half-block markers, so every terminal row holds two
//! vertical pixels. Canvas y grows upward while the drawing commands grow
//! downward, so every y coordinate is flipped against the surface size.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_status_bar, square_surface,
};
use crate::app::App;
use crate::snake::{DrawCommand, Heading, KeyAliases, Rgb};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points, Rectangle},
    widgets::Paragraph,
    Frame,
};

/// Render the Snake game scene.
pub fn render_snake_scene(frame: &mut Frame, area: Rect, app: &App) {
    let layout = create_game_layout(frame, area, " Serpent ", Color::LightGreen, 10, 24);

    render_play_field(frame, layout.content, app);
    render_status_bar_content(frame, layout.status_bar, app);
    render_info_panel(frame, layout.info_panel, app);
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn render_play_field(frame: &mut Frame, area: Rect, app: &App) {
    let surface = square_surface(area);
    if surface.height < 4 || surface.width < 8 {
        return;
    }

    let commands = app.engine().render();
    let size = app.engine().geometry().canvas_size() as f64;
    // Pixel height of one half-block on screen, in surface units.
    let step = size / (surface.height as f64 * 2.0);

    let background = commands
        .iter()
        .find_map(|cmd| match cmd {
            DrawCommand::Clear { color } => Some(to_color(*color)),
            _ => None,
        })
        .unwrap_or(Color::Reset);

    let canvas = Canvas::default()
        .marker(Marker::HalfBlock)
        .background_color(background)
        .x_bounds([0.0, size])
        .y_bounds([0.0, size])
        .paint(|ctx| {
            for cmd in &commands {
                paint_command(ctx, cmd, size, step);
            }
        });

    frame.render_widget(canvas, surface);
}

fn paint_command(ctx: &mut Context, cmd: &DrawCommand, size: f64, step: f64) {
    match cmd {
        // Painted as the canvas background.
        DrawCommand::Clear { .. } => {}
        DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        } => {
            let color = to_color(*color);
            let mut row = *y + step / 2.0;
            while row < y + height {
                ctx.draw(&CanvasLine {
                    x1: *x,
                    y1: size - row,
                    x2: x + width - step / 2.0,
                    y2: size - row,
                    color,
                });
                row += step;
            }
        }
        DrawCommand::StrokeRect {
            x,
            y,
            width,
            height,
            color,
            ..
        } => {
            ctx.draw(&Rectangle {
                x: *x,
                y: size - y - height,
                width: *width,
                height: *height,
                color: to_color(*color),
            });
        }
        DrawCommand::FillCircle {
            x,
            y,
            radius,
            color,
        } => {
            let color = to_color(*color);
            let cy = size - y;
            let mut r = *radius;
            while r >= step {
                ctx.draw(&Circle {
                    x: *x,
                    y: cy,
                    radius: r,
                    color,
                });
                r -= step;
            }
            ctx.draw(&Points {
                coords: &[(*x, cy)],
                color,
            });
        }
        DrawCommand::Text {
            x,
            y,
            bold,
            text,
            color,
            ..
        } => {
            let mut style = Style::default().fg(to_color(*color));
            if *bold {
                style = style.add_modifier(Modifier::BOLD);
            }
            ctx.print(*x, size - y, Line::from(Span::styled(text.clone(), style)));
        }
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, app: &App) {
    if app.scoreboard().game_over {
        render_status_bar(
            frame,
            area,
            "Game Over",
            Color::Red,
            &[("[R]", "Play Again"), ("[Q]", "Quit")],
        );
        return;
    }

    render_status_bar(
        frame,
        area,
        "Slither!",
        Color::Green,
        &[("[Arrows/WASD]", "Move"), ("[Q]", "Quit")],
    );
}

/// Keyboard legend line for one heading, e.g. `↑ / W  Up`.
fn control_line(aliases: &KeyAliases, heading: Heading, arrow: &'static str) -> Line<'static> {
    let letter = aliases
        .keys_for(heading)
        .into_iter()
        .find(|k| k.len() == 1 && k.chars().all(|c| c.is_ascii_uppercase()))
        .unwrap_or("")
        .to_string();
    let keys = if letter.is_empty() {
        format!(" {arrow}     ")
    } else {
        format!(" {arrow} / {letter} ")
    };
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::White)),
        Span::styled(format!("{heading:?}"), Style::default().fg(Color::DarkGray)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, app: &App) {
    let inner = render_info_panel_frame(frame, area);
    let engine = app.engine();
    let geometry = engine.geometry();
    let scoreboard = app.scoreboard();

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                scoreboard.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                engine.state().snake.len().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Grid: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}x{}", geometry.grid_size(), geometry.grid_size()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}ms", engine.tick_interval_ms()),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Controls:",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        control_line(engine.aliases(), Heading::Up, "\u{2191}"),
        control_line(engine.aliases(), Heading::Left, "\u{2190}"),
        control_line(engine.aliases(), Heading::Down, "\u{2193}"),
        control_line(engine.aliases(), Heading::Right, "\u{2192}"),
    ];

    if scoreboard.game_over {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[R] Play Again",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
