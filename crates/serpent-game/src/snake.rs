use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Grid cell coordinate, `(column, row)` with the origin at the top left.
pub type Cell = (i32, i32);

/// Result of advancing the snake one tick.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StepOutcome {
    pub ate: bool,
    pub died: bool,
    pub won: bool,
}

/// Grid-based snake state machine.
///
/// Direction changes are queued and applied at the next step; a reversal into
/// the snake's own neck is ignored. Hitting a wall or the body ends the game;
/// filling the entire grid wins it.
pub struct Snake {
    width: i32,
    height: i32,
    /// Head first.
    segments: VecDeque<Cell>,
    direction: (i32, i32),
    pending_dir: (i32, i32),
    pub apple: Cell,
    rng: SmallRng,
}

impl Snake {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_rng(width, height, SmallRng::from_entropy())
    }

    /// Deterministic constructor for tests and the menu preview.
    pub fn with_seed(width: u32, height: u32, seed: u64) -> Self {
        Self::with_rng(width, height, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(width: u32, height: u32, rng: SmallRng) -> Self {
        let mut snake = Self {
            width: width as i32,
            height: height as i32,
            segments: VecDeque::new(),
            direction: (1, 0),
            pending_dir: (1, 0),
            apple: (0, 0),
            rng,
        };
        snake.reset();
        snake
    }

    /// Restores the initial state: one segment in the grid center, heading
    /// right, with a fresh apple.
    pub fn reset(&mut self) {
        self.segments.clear();
        self.segments.push_back((self.width / 2, self.height / 2));
        self.direction = (1, 0);
        self.pending_dir = (1, 0);
        self.place_apple();
    }

    /// Body cells, head first.
    pub fn positions(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    pub fn head(&self) -> Cell {
        // The deque always holds at least one segment.
        self.segments.front().copied().unwrap_or((0, 0))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Current score: segments beyond the initial one.
    pub fn score(&self) -> u32 {
        (self.segments.len().saturating_sub(1)) as u32
    }

    pub fn direction(&self) -> (i32, i32) {
        self.direction
    }

    /// Queues a direction change for the next step.
    ///
    /// A reversal of the current travel direction is ignored, as is a zero
    /// vector. Only the last queued change before a step takes effect.
    pub fn change_dir(&mut self, dir: (i32, i32)) {
        if dir == (0, 0) {
            return;
        }
        if dir.0 == -self.direction.0 && dir.1 == -self.direction.1 && self.segments.len() > 1 {
            return;
        }
        self.pending_dir = dir;
    }

    /// Advances one tick.
    pub fn step(&mut self) -> StepOutcome {
        self.direction = self.pending_dir;

        let head = self.head();
        let next = (head.0 + self.direction.0, head.1 + self.direction.1);

        if next.0 < 0 || next.0 >= self.width || next.1 < 0 || next.1 >= self.height {
            return StepOutcome { died: true, ..Default::default() };
        }

        let ate = next == self.apple;

        // The tail cell vacates this tick unless the snake grows, so moving
        // into it is legal.
        let tail = self.segments.back().copied();
        let hits_body = self
            .segments
            .iter()
            .copied()
            .any(|c| c == next && (ate || Some(c) != tail));
        if hits_body {
            return StepOutcome { died: true, ..Default::default() };
        }

        self.segments.push_front(next);
        if !ate {
            self.segments.pop_back();
        }

        if self.segments.len() as i32 >= self.width * self.height {
            return StepOutcome { ate, won: true, ..Default::default() };
        }

        if ate {
            self.place_apple();
        }

        StepOutcome { ate, ..Default::default() }
    }

    /// Moves the apple to a uniformly random free cell.
    fn place_apple(&mut self) {
        let occupied: Vec<Cell> = self.segments.iter().copied().collect();
        loop {
            let cell = (
                self.rng.gen_range(0..self.width),
                self.rng.gen_range(0..self.height),
            );
            if !occupied.contains(&cell) {
                self.apple = cell;
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake() -> Snake {
        Snake::with_seed(8, 8, 7)
    }

    #[test]
    fn starts_in_center_heading_right() {
        let s = snake();
        assert_eq!(s.head(), (4, 4));
        assert_eq!(s.len(), 1);
        assert_eq!(s.direction(), (1, 0));
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn step_moves_one_cell() {
        let mut s = snake();
        let out = s.step();
        assert_eq!(out, StepOutcome::default());
        assert_eq!(s.head(), (5, 4));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn eating_the_apple_grows_and_scores() {
        let mut s = snake();
        s.apple = (5, 4);
        let out = s.step();
        assert!(out.ate);
        assert!(!out.died);
        assert_eq!(s.len(), 2);
        assert_eq!(s.score(), 1);
        // A new apple appears on a free cell.
        assert_ne!(s.apple, (5, 4));
    }

    #[test]
    fn wall_collision_kills() {
        let mut s = snake();
        for _ in 0..3 {
            assert!(!s.step().died);
        }
        // Head is at (7, 4), the rightmost column; one more step leaves the grid.
        assert!(s.step().died);
    }

    #[test]
    fn reversal_is_ignored_with_a_body() {
        let mut s = snake();
        s.apple = (5, 4);
        s.step(); // grow to length 2, heading right
        s.change_dir((-1, 0));
        let out = s.step();
        assert!(!out.died);
        assert_eq!(s.head(), (6, 4));
    }

    #[test]
    fn only_last_queued_direction_applies() {
        let mut s = snake();
        s.change_dir((0, 1));
        s.change_dir((0, -1));
        s.step();
        assert_eq!(s.head(), (4, 3));
    }

    #[test]
    fn self_collision_kills() {
        let mut s = snake();
        // Grow to length 5 by feeding apples along the path.
        for target in [(5, 4), (6, 4), (7, 4)] {
            s.apple = target;
            assert!(s.step().ate);
        }
        s.apple = (7, 5);
        s.change_dir((0, 1));
        assert!(s.step().ate); // length 5, head (7,5)
        s.apple = (0, 0);
        s.change_dir((-1, 0));
        assert!(!s.step().died); // head (6,5)
        s.change_dir((0, -1));
        assert!(s.step().died); // (6,4) is occupied by the body
    }

    #[test]
    fn moving_into_the_vacating_tail_is_legal() {
        let mut s = snake();
        // Build a 2x2 loop of length 4.
        for target in [(5, 4), (5, 5), (4, 5)] {
            s.apple = target;
            match target {
                (5, 5) => s.change_dir((0, 1)),
                (4, 5) => s.change_dir((-1, 0)),
                _ => {}
            }
            assert!(s.step().ate);
        }
        s.apple = (0, 0);
        s.change_dir((0, -1));
        // Head moves to (4,4), the tail cell, which vacates this tick.
        assert!(!s.step().died);
    }

    #[test]
    fn filling_the_grid_wins() {
        let mut s = Snake::with_seed(2, 1, 3);
        // 2x1 grid: head at (1,0), apple forced to (0,0).
        assert_eq!(s.head(), (1, 0));
        s.apple = (0, 0);
        s.change_dir((-1, 0));
        let out = s.step();
        assert!(out.won);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut s = snake();
        s.apple = (5, 4);
        s.step();
        s.reset();
        assert_eq!(s.head(), (4, 4));
        assert_eq!(s.len(), 1);
        assert_eq!(s.direction(), (1, 0));
    }
}
