//! Snake game logic: heading input, the movement step, collision detection, food.

use super::types::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a new food cell is chosen after the snake eats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodPolicy {
    /// Uniform over the whole board. Food may land under the snake's body.
    #[default]
    Anywhere,
    /// Uniform over the cells the snake does not occupy.
    AvoidSnake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    SelfCollision,
}

/// What a single movement step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Moved,
    Ate { score: u32 },
    Died(DeathCause),
}

/// Queue `requested` for the next step unless it reverses into the neck.
///
/// Returns true if the pending heading was updated.
pub fn submit_heading(game: &mut GameState, requested: Heading) -> bool {
    if game.is_over() || requested == game.heading.opposite() {
        return false;
    }
    game.pending_heading = requested;
    true
}

/// Single movement step.
///
/// Does nothing and returns `None` once the game is over.
pub fn step_snake<R: Rng>(game: &mut GameState, policy: FoodPolicy, rng: &mut R) -> Option<StepEvent> {
    if game.is_over() {
        return None;
    }
    game.tick_count += 1;

    let heading = if game.pending_heading == game.heading.opposite() {
        game.heading
    } else {
        game.pending_heading
    };
    let new_head = game.head().step(heading);

    // Wall collision, no wrap-around
    let n = game.grid_size;
    if new_head.x < 0 || new_head.x >= n || new_head.y < 0 || new_head.y >= n {
        game.status = GameStatus::Over;
        return Some(StepEvent::Died(DeathCause::Wall));
    }

    // The tail vacates this step unless we eat, so it only counts when eating.
    let eating = new_head == game.food;
    let collision_range = if eating {
        game.snake.len()
    } else {
        game.snake.len() - 1
    };
    if game
        .snake
        .iter()
        .take(collision_range)
        .any(|&seg| seg == new_head)
    {
        game.status = GameStatus::Over;
        return Some(StepEvent::Died(DeathCause::SelfCollision));
    }

    game.heading = heading;
    game.pending_heading = heading;
    game.snake.push_front(new_head);

    if eating {
        game.score += 1;
        game.food = spawn_food(game, policy, rng);
        Some(StepEvent::Ate { score: game.score })
    } else {
        game.snake.pop_back();
        Some(StepEvent::Moved)
    }
}

/// Pick a food cell according to `policy`.
///
/// `AvoidSnake` falls back to the whole board when the snake covers every cell.
pub fn spawn_food<R: Rng>(game: &GameState, policy: FoodPolicy, rng: &mut R) -> Cell {
    let n = game.grid_size;
    if policy == FoodPolicy::AvoidSnake {
        let free: Vec<Cell> = (0..n)
            .flat_map(|y| (0..n).map(move |x| Cell::new(x, y)))
            .filter(|cell| !game.snake.contains(cell))
            .collect();
        if !free.is_empty() {
            return free[rng.gen_range(0..free.len())];
        }
    }
    Cell::new(rng.gen_range(0..n), rng.gen_range(0..n))
}
