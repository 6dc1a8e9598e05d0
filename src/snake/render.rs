//! Stateless projection of a game onto a square pixel surface.
//!
//! The output is a list of canvas-style drawing commands in pixel units with
//! the origin at the top-left corner. Hosts replay them onto whatever surface
//! they have; the terminal host does so in `ui::snake_scene`.

use super::types::{Cell, GameState, GameStatus, Geometry};
use crate::constants::{
    BODY_RADIUS_RATIO, BORDER_WIDTH, EYE_RADIUS_RATIO, HEAD_RADIUS_RATIO, PUPIL_RADIUS_RATIO,
    TAIL_RADIUS_RATIO,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(0x22, 0x22, 0x22);
pub const BORDER: Rgb = Rgb(255, 255, 255);
pub const FOOD: Rgb = Rgb(255, 0, 0);
pub const HEAD: Rgb = Rgb(0, 100, 0);
pub const BODY: Rgb = Rgb(50, 205, 50);
pub const EYE: Rgb = Rgb(255, 255, 255);
pub const PUPIL: Rgb = Rgb(0, 0, 0);
pub const OVERLAY_TEXT: Rgb = Rgb(255, 255, 255);

pub const GAME_OVER_TEXT: &str = "Game Over";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Paint the whole surface.
    Clear { color: Rgb },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        line_width: f64,
        color: Rgb,
    },
    FillCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgb,
    },
    /// Text with its baseline starting at (x, y).
    Text {
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        text: String,
        color: Rgb,
    },
}

/// Draw the board, food, snake, and the game-over banner if the game has ended.
pub fn render(game: &GameState, geometry: &Geometry) -> Vec<DrawCommand> {
    let canvas = geometry.canvas_size() as f64;
    let tile = geometry.tile_size() as f64;
    let mut commands = Vec::with_capacity(game.snake.len() + 8);

    commands.push(DrawCommand::Clear { color: BACKGROUND });
    commands.push(DrawCommand::StrokeRect {
        x: 0.0,
        y: 0.0,
        width: canvas,
        height: canvas,
        line_width: BORDER_WIDTH,
        color: BORDER,
    });

    commands.push(DrawCommand::FillRect {
        x: game.food.x as f64 * tile,
        y: game.food.y as f64 * tile,
        width: tile,
        height: tile,
        color: FOOD,
    });

    // Tail first so the head ends up on top.
    let last = game.snake.len().saturating_sub(1);
    for (i, seg) in game.snake.iter().enumerate().rev() {
        let (x, y) = tile_center(*seg, tile);
        if i == 0 {
            push_head(&mut commands, x, y, tile);
        } else {
            let ratio = if i == last {
                TAIL_RADIUS_RATIO
            } else {
                BODY_RADIUS_RATIO
            };
            commands.push(DrawCommand::FillCircle {
                x,
                y,
                radius: tile * ratio,
                color: BODY,
            });
        }
    }

    if game.status == GameStatus::Over {
        commands.push(DrawCommand::Text {
            x: canvas / 4.0,
            y: canvas / 2.0,
            size: canvas / 10.0,
            bold: true,
            text: GAME_OVER_TEXT.to_string(),
            color: OVERLAY_TEXT,
        });
    }

    commands
}

fn tile_center(cell: Cell, tile: f64) -> (f64, f64) {
    (
        cell.x as f64 * tile + tile / 2.0,
        cell.y as f64 * tile + tile / 2.0,
    )
}

fn push_head(commands: &mut Vec<DrawCommand>, x: f64, y: f64, tile: f64) {
    commands.push(DrawCommand::FillCircle {
        x,
        y,
        radius: tile * HEAD_RADIUS_RATIO,
        color: HEAD,
    });
    let eye_y = y + tile * 0.1;
    for eye_x in [x + tile * 0.2, x + tile * 0.5] {
        commands.push(DrawCommand::FillCircle {
            x: eye_x,
            y: eye_y,
            radius: tile * EYE_RADIUS_RATIO,
            color: EYE,
        });
    }
    for eye_x in [x + tile * 0.2, x + tile * 0.5] {
        commands.push(DrawCommand::FillCircle {
            x: eye_x,
            y: eye_y,
            radius: tile * PUPIL_RADIUS_RATIO,
            color: PUPIL,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CANVAS_SIZE, GRID_SIZE, TILE_SIZE};

    fn geometry() -> Geometry {
        Geometry::new(GRID_SIZE, TILE_SIZE, CANVAS_SIZE).unwrap()
    }

    fn circles(commands: &[DrawCommand]) -> Vec<(f64, f64, f64, Rgb)> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillCircle {
                    x,
                    y,
                    radius,
                    color,
                } => Some((*x, *y, *radius, *color)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_background_and_border_first() {
        let commands = render(&GameState::new(GRID_SIZE), &geometry());
        assert_eq!(commands[0], DrawCommand::Clear { color: BACKGROUND });
        assert!(matches!(
            &commands[1],
            DrawCommand::StrokeRect { width, line_width, .. } if *width == 400.0 && *line_width == 4.0
        ));
    }

    #[test]
    fn test_food_fills_its_tile() {
        let commands = render(&GameState::new(GRID_SIZE), &geometry());
        assert!(commands.contains(&DrawCommand::FillRect {
            x: 300.0,
            y: 300.0,
            width: 20.0,
            height: 20.0,
            color: FOOD,
        }));
    }

    #[test]
    fn test_head_tail_and_body_distinguished() {
        let commands = render(&GameState::new(GRID_SIZE), &geometry());
        let circles = circles(&commands);
        // tail, body, head, two eyes, two pupils
        assert_eq!(circles.len(), 7);

        let tail = circles[0];
        let body = circles[1];
        let head = circles[2];
        assert_eq!((tail.0, tail.1), (170.0, 210.0));
        assert_eq!((body.0, body.1), (190.0, 210.0));
        assert_eq!((head.0, head.1), (210.0, 210.0));
        assert!(tail.2 < body.2 && body.2 < head.2);
        assert_eq!(head.3, HEAD);
        assert_eq!(tail.3, BODY);

        assert!(circles[3..5].iter().all(|c| c.3 == EYE));
        assert!(circles[5..].iter().all(|c| c.3 == PUPIL && c.2 < circles[3].2));
    }

    #[test]
    fn test_no_overlay_while_running() {
        let commands = render(&GameState::new(GRID_SIZE), &geometry());
        assert!(!commands
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { .. })));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut game = GameState::new(GRID_SIZE);
        game.status = GameStatus::Over;
        let commands = render(&game, &geometry());
        match commands.last() {
            Some(DrawCommand::Text {
                x, y, text, bold, ..
            }) => {
                assert_eq!(text, GAME_OVER_TEXT);
                assert_eq!((*x, *y), (100.0, 200.0));
                assert!(*bold);
            }
            other => panic!("expected overlay text, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_snake_draws_board_only() {
        let mut game = GameState::new(GRID_SIZE);
        game.snake.clear();
        let commands = render(&game, &geometry());
        assert_eq!(commands.len(), 3);
        assert!(circles(&commands).is_empty());
    }

    #[test]
    fn test_render_is_repeatable() {
        let game = GameState::new(GRID_SIZE);
        let before = game.clone();
        let first = render(&game, &geometry());
        let second = render(&game, &geometry());
        assert_eq!(first, second);
        assert_eq!(game, before);
    }
}
