//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, RNG, and scoring.
//! It owns the phase machine (playing, paused, leveling up, game over, won),
//! advances gravity one frame at a time and applies player actions.

use arrayvec::ArrayVec;

use crate::board::{Board, Placement};
use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::scoring::{calculate_lock_score, fall_interval, next_level_threshold};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Events kept between drains; the oldest is dropped beyond this
pub const EVENT_CAPACITY: usize = 16;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    piece_queue: PieceQueue,
    active: Tetromino,
    next: Tetromino,
    phase: Phase,
    score: u32,
    lines: u32,
    level: u32,
    level_threshold: u32,
    /// Frames the active piece waits between row drops
    fall_interval: u32,
    /// Frames since the last row drop
    frame_count: u32,
    level_cap: u32,
    /// Set once the player keeps going after a win; disables further level-ups
    continuing_past_win: bool,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// Create a new game with the given RNG seed, ready to play
    pub fn new(seed: u32) -> Self {
        let mut piece_queue = PieceQueue::new(seed);
        let active = Tetromino::spawn(piece_queue.next());
        let next = Tetromino::spawn(piece_queue.next());

        Self {
            board: Board::new(),
            piece_queue,
            active,
            next,
            phase: Phase::Playing,
            score: 0,
            lines: 0,
            level: INITIAL_LEVEL,
            level_threshold: INITIAL_LEVEL_THRESHOLD,
            fall_interval: fall_interval(INITIAL_LEVEL),
            frame_count: 0,
            level_cap: DEFAULT_LEVEL_CAP,
            continuing_past_win: false,
            events: ArrayVec::new(),
        }
    }

    /// Use a different highest regular level
    pub fn with_level_cap(mut self, level_cap: u32) -> Self {
        self.level_cap = level_cap;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn level_threshold(&self) -> u32 {
        self.level_threshold
    }

    pub fn fall_interval(&self) -> u32 {
        self.fall_interval
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn level_cap(&self) -> u32 {
        self.level_cap
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn next(&self) -> Tetromino {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current RNG state of the piece sequence
    pub fn seed(&self) -> u32 {
        self.piece_queue.seed()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = Some(self.active.into());
        out.next = Some(self.next.into());
        out.phase = self.phase;
        out.choices = self.phase.choices();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.level_threshold = self.level_threshold;
        out.fall_interval = self.fall_interval;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take all events recorded since the last call.
    pub fn take_events(&mut self) -> ArrayVec<GameEvent, EVENT_CAPACITY> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    fn set_phase(&mut self, to: Phase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!(
            "phase {} -> {} (score {}, level {})",
            from.as_str(),
            to.as_str(),
            self.score,
            self.level
        );
        self.phase = to;
        self.push_event(GameEvent::PhaseChanged { from, to });
    }

    /// Try to move the active piece by (dx columns, dy rows)
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.phase.is_playing() {
            return false;
        }

        let moved = self.active.offset(dy, dx);
        if !self.board.fits(&moved) {
            return false;
        }

        self.active = moved;
        true
    }

    /// Try to rotate the active piece clockwise in place
    pub(crate) fn try_rotate(&mut self) -> bool {
        if !self.phase.is_playing() {
            return false;
        }

        let rotated = self.active.rotated();
        if !self.board.fits(&rotated) {
            return false;
        }

        self.active = rotated;
        true
    }

    /// Move down one row, locking the piece where it is if it cannot
    fn step_down(&mut self) {
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
    }

    /// Lock the active piece onto the board and handle line clears
    pub(crate) fn lock_piece(&mut self) {
        if self.board.place(&self.active) == Placement::OffScreen {
            self.set_phase(Phase::GameOver);
            return;
        }

        let lines_cleared = self.board.clear_full_rows();
        let points = calculate_lock_score(lines_cleared);
        self.lines += lines_cleared;
        self.score = self.score.saturating_add(points);

        log::debug!(
            "locked {} at ({}, {}): {} lines, +{}",
            self.active.kind.as_str(),
            self.active.row,
            self.active.col,
            lines_cleared,
            points
        );
        self.push_event(GameEvent::Locked {
            lines_cleared,
            points,
        });

        if self.phase.is_playing()
            && self.score >= self.level_threshold
            && !self.continuing_past_win
        {
            self.set_phase(Phase::LevelingUp);
        }

        self.active = self.next;
        self.next = Tetromino::spawn(self.piece_queue.next());
    }

    /// Advance one frame.
    ///
    /// Nothing happens outside the playing phase, so the frame counter resumes
    /// from where it stopped. Returns true when the active piece dropped or locked.
    pub fn tick(&mut self) -> bool {
        if !self.phase.is_playing() {
            return false;
        }

        if self.level > self.level_cap && !self.continuing_past_win {
            self.set_phase(Phase::Won);
            return false;
        }

        self.frame_count += 1;
        if self.frame_count <= self.fall_interval {
            return false;
        }

        self.frame_count = 0;
        self.step_down();
        true
    }

    fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => self.set_phase(Phase::Paused),
            Phase::Paused => self.set_phase(Phase::Playing),
            _ => return false,
        }
        true
    }

    /// Empty the board and line count for the next stretch of play
    fn start_round(&mut self) {
        self.board.reset();
        self.lines = 0;
        self.fall_interval = fall_interval(self.level);
    }

    fn continue_game(&mut self) -> bool {
        match self.phase {
            Phase::LevelingUp => {
                self.level += 1;
                self.level_threshold = next_level_threshold(self.level_threshold, self.level);
            }
            Phase::Won => {
                self.continuing_past_win = true;
            }
            _ => return false,
        }

        self.start_round();
        self.set_phase(Phase::Playing);
        true
    }

    fn restart(&mut self) -> bool {
        if !matches!(self.phase, Phase::GameOver | Phase::Won) {
            return false;
        }

        self.score = 0;
        self.level = INITIAL_LEVEL;
        self.level_threshold = INITIAL_LEVEL_THRESHOLD;
        self.frame_count = 0;
        self.continuing_past_win = false;
        self.start_round();
        log::info!("restarting, piece queue state {}", self.seed());
        self.active = Tetromino::spawn(self.piece_queue.next());
        self.next = Tetromino::spawn(self.piece_queue.next());
        self.push_event(GameEvent::Restarted);
        self.set_phase(Phase::Playing);
        true
    }

    /// Apply a game action
    ///
    /// Returns false when the action was rejected: a blocked move or rotation,
    /// or an action that does not apply to the current phase. Rejected actions
    /// leave the state untouched.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::Rotate => self.try_rotate(),
            GameAction::SoftDrop => {
                if !self.phase.is_playing() {
                    return false;
                }
                self.step_down();
                true
            }
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.restart(),
            GameAction::Continue => self.continue_game(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Shape;

    fn fill_row_except(board: &mut Board, row: i8, gap: Option<i8>) {
        for col in 0..BOARD_WIDTH as i8 {
            if Some(col) != gap {
                board.set(row, col, Some(PieceKind::J));
            }
        }
    }

    /// O piece sitting on the floor in the bottom-left corner
    fn resting_o() -> Tetromino {
        Tetromino {
            row: 18,
            col: 0,
            ..Tetromino::spawn(PieceKind::O)
        }
    }

    fn phase_changes(events: &[GameEvent]) -> Vec<(Phase, Phase)> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::PhaseChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level_threshold, 1000);
        assert_eq!(state.fall_interval, 31);
        assert!(state.board.is_empty());
        assert_eq!(state.active, Tetromino::spawn(state.active.kind));
        assert_eq!(state.next, Tetromino::spawn(state.next.kind));
        assert_ne!(state.active.kind, state.next.kind);
    }

    #[test]
    fn test_gravity_drops_after_fall_interval() {
        let mut state = GameState::new(12345);
        let start_row = state.active.row;

        for _ in 0..state.fall_interval {
            assert!(!state.tick());
        }
        assert_eq!(state.active.row, start_row);

        assert!(state.tick());
        assert_eq!(state.active.row, start_row + 1);
        assert_eq!(state.frame_count, 0);
    }

    #[test]
    fn test_move_stops_at_walls() {
        let mut state = GameState::new(12345);
        state.active = Tetromino {
            row: 5,
            ..Tetromino::spawn(PieceKind::O)
        };

        let mut moves = 0;
        while state.apply_action(GameAction::MoveLeft) {
            moves += 1;
        }
        assert_eq!(moves, 4);
        assert_eq!(state.active.col, 0);

        let before = state.active;
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_rotation_blocked_by_filled_cell() {
        let mut state = GameState::new(12345);
        state.active = Tetromino {
            row: 10,
            ..Tetromino::spawn(PieceKind::T)
        };
        // Clockwise T needs (row+2, col+1), which is empty in the spawn orientation.
        state.board.set(12, 4, Some(PieceKind::Z));

        let before = state.active;
        assert!(!state.apply_action(GameAction::Rotate));
        assert_eq!(state.active, before);

        state.board.set(12, 4, None);
        assert!(state.apply_action(GameAction::Rotate));
        assert_eq!(state.active.shape, Shape::canonical(PieceKind::T).rotated());
    }

    #[test]
    fn test_soft_drop_locks_when_blocked() {
        let mut state = GameState::new(12345);
        state.active = resting_o();
        let upcoming = state.next;

        assert!(state.apply_action(GameAction::SoftDrop));

        assert_eq!(state.board.get(19, 0), Some(Some(PieceKind::O)));
        assert_eq!(state.board.get(18, 1), Some(Some(PieceKind::O)));
        assert_eq!(state.score, 10);
        assert_eq!(state.active, upcoming);
        assert_eq!(
            state.take_events().as_slice(),
            &[GameEvent::Locked {
                lines_cleared: 0,
                points: 10
            }]
        );
    }

    #[test]
    fn test_single_line_clear_scores_110() {
        let mut state = GameState::new(12345);
        fill_row_except(&mut state.board, 19, Some(9));
        state.board.set(18, 0, Some(PieceKind::L));

        // Vertical I covering rows 16..=19 of column 9.
        state.active = Tetromino {
            row: 16,
            col: 7,
            ..Tetromino::spawn(PieceKind::I).rotated()
        };

        assert!(state.apply_action(GameAction::SoftDrop));

        assert_eq!(state.score, 110);
        assert_eq!(state.lines, 1);
        assert_eq!(state.board.get(19, 0), Some(Some(PieceKind::L)));
        assert_eq!(state.board.get(19, 9), Some(Some(PieceKind::I)));
        assert_eq!(state.board.get(17, 9), Some(Some(PieceKind::I)));
        assert_eq!(state.board.get(16, 9), Some(None));
        assert!(!state.board.is_row_full(19));
    }

    #[test]
    fn test_multi_line_clear_scores_per_line() {
        let mut state = GameState::new(12345);
        for row in 16..20 {
            fill_row_except(&mut state.board, row, Some(9));
        }
        state.active = Tetromino {
            row: 16,
            col: 7,
            ..Tetromino::spawn(PieceKind::I).rotated()
        };

        state.lock_piece();

        assert_eq!(state.score, 410);
        assert_eq!(state.lines, 4);
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_offscreen_lock_is_game_over() {
        let mut state = GameState::new(12345);
        state.active = Tetromino::spawn(PieceKind::T);
        for row in 0..20 {
            state.board.set(row, 4, Some(PieceKind::S));
        }
        let board_before = state.board.clone();
        let piece = state.active;

        // T at row -2 covers (-1, 4); it cannot move down onto row 0.
        assert!(state.apply_action(GameAction::SoftDrop));

        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.board, board_before);
        assert_eq!(state.score, 0);
        assert_eq!(state.active, piece);
        assert_eq!(
            phase_changes(&state.take_events()),
            vec![(Phase::Playing, Phase::GameOver)]
        );

        // Nothing moves any more.
        assert!(!state.tick());
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::Pause));
        assert!(!state.apply_action(GameAction::Continue));
    }

    #[test]
    fn test_level_up_triggers_once_and_continue_advances() {
        let mut state = GameState::new(12345);
        state.score = 990;
        state.lines = 7;
        state.board.set(10, 3, Some(PieceKind::Z));
        state.active = resting_o();

        state.lock_piece();
        assert_eq!(state.score, 1000);
        assert_eq!(state.phase, Phase::LevelingUp);

        // Nothing re-triggers while waiting on the overlay.
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert!(!state.tick());
        let changes = phase_changes(&state.take_events());
        assert_eq!(changes, vec![(Phase::Playing, Phase::LevelingUp)]);

        assert!(state.apply_action(GameAction::Continue));
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.level, 2);
        assert_eq!(state.level_threshold, 3000);
        assert_eq!(state.fall_interval, 27);
        assert_eq!(state.lines, 0);
        assert_eq!(state.score, 1000);
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_passing_level_cap_wins() {
        let mut state = GameState::new(12345);
        state.level = 3;
        state.level_threshold = 5500;
        state.score = 5500;
        state.phase = Phase::LevelingUp;

        assert!(state.apply_action(GameAction::Continue));
        assert_eq!(state.level, 4);
        assert_eq!(state.phase, Phase::Playing);

        assert!(!state.tick());
        assert_eq!(state.phase, Phase::Won);
        assert_eq!(Phase::Won.choices().len(), 2);
    }

    #[test]
    fn test_continue_past_win_keeps_level_and_disables_level_ups() {
        let mut state = GameState::new(12345);
        state.level = 4;
        state.score = 9000;
        state.level_threshold = 8500;
        state.board.set(19, 0, Some(PieceKind::T));
        assert!(!state.tick());
        assert_eq!(state.phase, Phase::Won);

        assert!(state.apply_action(GameAction::Continue));
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.level, 4);
        assert_eq!(state.level_threshold, 8500);
        assert!(state.continuing_past_win);
        assert!(state.board.is_empty());

        // Neither the win check nor the threshold fire again.
        state.tick();
        assert_eq!(state.phase, Phase::Playing);
        state.active = resting_o();
        state.lock_piece();
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_restart_after_game_over_resets_everything() {
        let mut state = GameState::new(12345);
        state.score = 2500;
        state.lines = 12;
        state.level = 2;
        state.level_threshold = 3000;
        state.fall_interval = 27;
        state.continuing_past_win = true;
        state.board.set(15, 5, Some(PieceKind::L));
        state.phase = Phase::GameOver;

        assert!(state.apply_action(GameAction::Restart));

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.level_threshold, 1000);
        assert_eq!(state.fall_interval, 31);
        assert!(!state.continuing_past_win);
        assert!(state.board.is_empty());
        assert_eq!(state.active, Tetromino::spawn(state.active.kind));
    }

    #[test]
    fn test_restart_only_from_end_screens() {
        let mut state = GameState::new(12345);
        state.score = 40;
        assert!(!state.apply_action(GameAction::Restart));
        assert_eq!(state.score, 40);

        state.phase = Phase::Won;
        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_restart_announces_new_game() {
        let mut state = GameState::new(12345);
        state.phase = Phase::GameOver;

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(
            state.take_events().as_slice(),
            &[
                GameEvent::Restarted,
                GameEvent::PhaseChanged {
                    from: Phase::GameOver,
                    to: Phase::Playing
                }
            ]
        );
    }

    #[test]
    fn test_seed_follows_piece_queue() {
        let state = GameState::new(777);
        assert_eq!(state.seed(), GameState::new(777).seed());

        let mut replay = PieceQueue::new(777);
        assert_eq!(state.active.kind, replay.next());
        assert_eq!(state.next.kind, replay.next());
        assert_eq!(state.seed(), replay.seed());
    }

    #[test]
    fn test_pause_resume_preserves_state() {
        let mut state = GameState::new(12345);
        for _ in 0..10 {
            state.tick();
        }
        let piece = state.active;
        let frames = state.frame_count;
        let score = state.score;

        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.phase, Phase::Paused);
        for _ in 0..100 {
            assert!(!state.tick());
        }
        assert!(!state.apply_action(GameAction::MoveRight));
        assert!(!state.apply_action(GameAction::SoftDrop));

        assert!(state.apply_action(GameAction::Pause));
        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.active, piece);
        assert_eq!(state.frame_count, frames);
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_event_buffer_drops_oldest() {
        let mut state = GameState::new(12345);
        for points in 0..EVENT_CAPACITY as u32 + 3 {
            state.push_event(GameEvent::Locked {
                lines_cleared: 0,
                points,
            });
        }
        let events = state.take_events();
        assert_eq!(events.len(), EVENT_CAPACITY);
        assert_eq!(
            events.first(),
            Some(&GameEvent::Locked {
                lines_cleared: 0,
                points: 3
            })
        );
        assert_eq!(
            events.last(),
            Some(&GameEvent::Locked {
                lines_cleared: 0,
                points: EVENT_CAPACITY as u32 + 2
            })
        );
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(12345);
        state.board.set(19, 2, Some(PieceKind::S));
        state.phase = Phase::GameOver;

        let snap = state.snapshot();
        assert_eq!(snap.board[19][2], PieceKind::S.code());
        assert_eq!(snap.phase, Phase::GameOver);
        assert_eq!(snap.choices, Phase::GameOver.choices());
        assert_eq!(snap.active.unwrap().kind, state.active.kind);
        assert_eq!(snap.next.unwrap().kind, state.next.kind);
        assert_eq!(snap.level_threshold, 1000);
    }
}
