use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - New -> Playing (first reveal that changes the board)
/// - New -> Won / Lost (that first reveal already ends the game)
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    New,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_new(self) -> bool {
        matches!(self, Self::New)
    }

    /// No reveal or flag is accepted anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One-shot timer bookkeeping; cancelling bumps the id so in-flight ticks are dropped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Timer {
    current: TickId,
    running: bool,
}

impl Timer {
    fn start(&mut self) -> Command {
        self.running = true;
        Command::ScheduleTick(self.current)
    }

    fn cancel(&mut self) {
        self.running = false;
        self.current = self.current.next();
    }

    fn accepts(&self, id: TickId) -> bool {
        self.running && id == self.current
    }
}

/// Read-only view handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub board: &'a Board,
    pub cursor: Position,
    pub status: GameStatus,
    pub mines_left: i32,
    pub elapsed_secs: u32,
    pub terminal_size: (u16, u16),
}

/// Owns the board and everything around it, and turns [`Input`]s into state changes.
#[derive(Clone, Debug)]
pub struct Game<G = RandomBoardGenerator> {
    config: GameConfig,
    generator: G,
    board: Board,
    cursor: Position,
    status: GameStatus,
    mines_left: i32,
    elapsed_secs: u32,
    timer: Timer,
    terminal_size: (u16, u16),
    layout: Option<GridLayout>,
}

impl<G: BoardGenerator> Game<G> {
    pub fn new(config: GameConfig, mut generator: G) -> Result<Self> {
        let board = generator.generate(&config)?;
        log::debug!("new game: {:?}", config);
        Ok(Self {
            cursor: center(board.size()),
            mines_left: i32::from(board.mine_count()),
            config,
            generator,
            board,
            status: GameStatus::New,
            elapsed_secs: 0,
            timer: Timer::default(),
            terminal_size: (0, 0),
            layout: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// Mines minus flags; negative once more cells are flagged than there are mines.
    pub fn mines_left(&self) -> i32 {
        self.mines_left
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn layout(&self) -> Option<GridLayout> {
        self.layout
    }

    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = Some(layout);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            board: &self.board,
            cursor: self.cursor,
            status: self.status,
            mines_left: self.mines_left,
            elapsed_secs: self.elapsed_secs,
            terminal_size: self.terminal_size,
        }
    }

    pub fn handle(&mut self, input: Input) -> Command {
        log::trace!("input: {:?}", input);

        match input {
            Input::MoveCursor(direction) => {
                self.move_cursor(direction);
                Command::None
            }
            Input::RevealActive => self.reveal_active(),
            Input::ToggleFlagActive => {
                self.toggle_flag_active();
                Command::None
            }
            Input::ChordNeighbors => self.chord_active(),
            Input::PointerClick { x, y, button } => self.click(x, y, button),
            Input::Tick(id) => self.tick(id),
            Input::Resize { width, height } => {
                self.resize(width, height);
                Command::None
            }
            Input::Restart => {
                if let Err(err) = self.restart() {
                    log::error!("failed to restart: {}", err);
                }
                Command::None
            }
            Input::Quit => {
                log::info!("quit requested");
                Command::Quit
            }
        }
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor = direction.step(self.cursor, self.board.size());
    }

    /// Opens the active cell, or chords around it when it is already open.
    pub fn reveal_active(&mut self) -> Command {
        if self.status.is_finished() {
            return Command::None;
        }

        let cursor = self.cursor;
        let opened_before = self.board.opened_safe_count();
        let outcome = match self.board[cursor].state {
            CellState::Unopened => reveal(&mut self.board, cursor),
            CellState::Opened => chord(&mut self.board, cursor, self.config.chord),
            CellState::Flagged => return Command::None,
        };
        self.settle(outcome, opened_before)
    }

    pub fn chord_active(&mut self) -> Command {
        if self.status.is_finished() || self.board[self.cursor].state != CellState::Opened {
            return Command::None;
        }

        let opened_before = self.board.opened_safe_count();
        let outcome = chord(&mut self.board, self.cursor, self.config.chord);
        self.settle(outcome, opened_before)
    }

    pub fn toggle_flag_active(&mut self) -> FlagOutcome {
        if self.status.is_finished() {
            return FlagOutcome::NoChange;
        }

        let outcome = self.board.toggle_flag(self.cursor);
        self.mines_left += outcome.counter_delta();
        if outcome.has_update() {
            log::debug!("{:?} {:?}, {} mines left", outcome, self.cursor, self.mines_left);
        }
        outcome
    }

    pub fn tick(&mut self, id: TickId) -> Command {
        if self.status != GameStatus::Playing || !self.timer.accepts(id) {
            log::trace!("dropping stale tick {:?}", id);
            return Command::None;
        }

        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        Command::ScheduleTick(id)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        log::debug!("terminal resized to {}x{}", width, height);
        self.terminal_size = (width, height);
    }

    /// Throws the current board away and starts over with a fresh one.
    pub fn restart(&mut self) -> Result<()> {
        let board = self.generator.generate(&self.config)?;

        self.cursor = center(board.size());
        self.mines_left = i32::from(board.mine_count());
        self.board = board;
        self.status = GameStatus::New;
        self.elapsed_secs = 0;
        self.timer.cancel();

        log::debug!("game restarted");
        Ok(())
    }

    pub fn click(&mut self, x: u16, y: u16, button: PointerButton) -> Command {
        let Some(position) = self
            .layout
            .and_then(|layout| layout.cell_at(x, y))
            .filter(|&position| self.board.contains(position))
        else {
            log::trace!("click at ({}, {}) missed the board", x, y);
            return Command::None;
        };

        self.cursor = position;
        match button {
            PointerButton::Left => self.reveal_active(),
            PointerButton::Right => {
                self.toggle_flag_active();
                Command::None
            }
        }
    }

    fn settle(&mut self, outcome: RevealOutcome, opened_before: CellCount) -> Command {
        let changed =
            outcome == RevealOutcome::HitMine || self.board.opened_safe_count() != opened_before;
        if !changed {
            return Command::None;
        }

        if self.status.is_new() {
            self.status = GameStatus::Playing;
            log::debug!("game started");
        }

        if outcome == RevealOutcome::HitMine {
            self.end_game(false);
        } else if self.board.all_safe_opened() {
            self.end_game(true);
        }

        if self.status == GameStatus::Playing && !self.timer.running {
            self.timer.start()
        } else {
            Command::None
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.timer.cancel();
        if won {
            self.status = GameStatus::Won;
        } else {
            self.status = GameStatus::Lost;
            self.board.open_all_mines();
        }
        log::info!(
            "game {} after {}s",
            if won { "won" } else { "lost" },
            self.elapsed_secs
        );
    }
}

fn center((rows, cols): Position) -> Position {
    (rows / 2, cols / 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Position, mines: &[Position]) -> Game<FixedBoardGenerator> {
        let config = GameConfig::new(size, mines.len() as CellCount);
        Game::new(config, FixedBoardGenerator::new(mines)).unwrap()
    }

    fn layout(grid: Position) -> GridLayout {
        GridLayout {
            origin: (2, 1),
            cell_width: 5,
            cell_height: 3,
            grid,
        }
    }

    #[test]
    fn new_game_starts_centered() {
        let game = game((10, 13), &[(0, 0)]);

        assert_eq!(game.cursor(), (5, 6));
        assert_eq!(game.status(), GameStatus::New);
        assert_eq!(game.mines_left(), 1);
        assert_eq!(game.elapsed_secs(), 0);
    }

    #[test]
    fn counter_starts_at_the_configured_mine_count() {
        let mut game = Game::new(GameConfig::default(), RandomBoardGenerator::new(5)).unwrap();
        assert_eq!(game.mines_left(), 32);

        game.handle(Input::ToggleFlagActive);
        assert_eq!(game.snapshot().mines_left, 31);

        game.handle(Input::Restart);
        assert_eq!(game.mines_left(), i32::from(GameConfig::MINES));
    }

    #[test]
    fn cursor_stays_inside_grid() {
        let mut game = game((3, 3), &[]);

        for _ in 0..5 {
            game.handle(Input::MoveCursor(Direction::Up));
        }
        assert_eq!(game.cursor(), (0, 1));
        for _ in 0..5 {
            game.handle(Input::MoveCursor(Direction::Right));
        }
        assert_eq!(game.cursor(), (0, 2));
        for _ in 0..5 {
            game.handle(Input::MoveCursor(Direction::Down));
            game.handle(Input::MoveCursor(Direction::Left));
        }
        assert_eq!(game.cursor(), (2, 0));
    }

    #[test]
    fn first_reveal_starts_the_timer_once() {
        let mut game = game((3, 3), &[(0, 0), (2, 2)]);

        let command = game.handle(Input::RevealActive);
        let Command::ScheduleTick(id) = command else {
            panic!("expected a tick to be scheduled, got {:?}", command);
        };
        assert_eq!(game.status(), GameStatus::Playing);

        game.handle(Input::MoveCursor(Direction::Up));
        assert_eq!(game.handle(Input::RevealActive), Command::None);

        assert_eq!(game.handle(Input::Tick(id)), Command::ScheduleTick(id));
        assert_eq!(game.handle(Input::Tick(id)), Command::ScheduleTick(id));
        assert_eq!(game.elapsed_secs(), 2);
    }

    #[test]
    fn revealing_a_flag_does_not_start_the_game() {
        let mut game = game((3, 3), &[(0, 0)]);

        game.handle(Input::ToggleFlagActive);
        assert_eq!(game.handle(Input::RevealActive), Command::None);
        assert_eq!(game.status(), GameStatus::New);
        assert_eq!(game.board()[(1, 1)].state, CellState::Flagged);
    }

    #[test]
    fn hitting_a_mine_opens_every_mine() {
        let mut game = game((3, 3), &[(0, 0), (1, 1), (2, 2)]);

        game.handle(Input::MoveCursor(Direction::Up));
        game.handle(Input::MoveCursor(Direction::Left));
        game.handle(Input::ToggleFlagActive);
        game.handle(Input::MoveCursor(Direction::Down));
        game.handle(Input::MoveCursor(Direction::Right));

        assert_eq!(game.handle(Input::RevealActive), Command::None);
        assert_eq!(game.status(), GameStatus::Lost);
        for &mine in game.board().mines() {
            assert_eq!(game.board()[mine].state, CellState::Opened);
        }
        assert_eq!(game.board().opened_safe_count(), 0);
    }

    #[test]
    fn lost_game_ignores_reveal_and_flag() {
        let mut game = game((3, 3), &[(1, 1)]);
        let Command::None = game.handle(Input::RevealActive) else {
            panic!("losing on the first move must not start the timer");
        };
        assert_eq!(game.status(), GameStatus::Lost);

        let board = game.board().clone();
        game.handle(Input::MoveCursor(Direction::Up));
        assert_eq!(game.handle(Input::RevealActive), Command::None);
        assert_eq!(game.toggle_flag_active(), FlagOutcome::NoChange);
        assert_eq!(game.handle(Input::ChordNeighbors), Command::None);
        assert_eq!(game.board(), &board);
        assert_eq!(game.mines_left(), 1);
    }

    #[test]
    fn single_safe_cell_wins_immediately() {
        let mut game = game((1, 1), &[]);

        assert_eq!(game.handle(Input::RevealActive), Command::None);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.board()[(0, 0)].state, CellState::Opened);
        assert_eq!(game.toggle_flag_active(), FlagOutcome::NoChange);
    }

    #[test]
    fn winning_stops_the_timer() {
        let mut game = game((1, 3), &[(0, 1)]);
        game.handle(Input::MoveCursor(Direction::Right));

        let Command::ScheduleTick(id) = game.handle(Input::RevealActive) else {
            panic!("expected the timer to start");
        };
        game.handle(Input::Tick(id));
        game.handle(Input::MoveCursor(Direction::Left));
        game.handle(Input::MoveCursor(Direction::Left));
        assert_eq!(game.handle(Input::RevealActive), Command::None);

        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.handle(Input::Tick(id)), Command::None);
        assert_eq!(game.elapsed_secs(), 1);
    }

    #[test]
    fn flags_adjust_counter_and_can_go_negative() {
        let mut game = game((2, 2), &[(0, 0)]);

        assert_eq!(game.toggle_flag_active(), FlagOutcome::Flagged);
        assert_eq!(game.mines_left(), 0);
        game.handle(Input::MoveCursor(Direction::Left));
        game.handle(Input::ToggleFlagActive);
        assert_eq!(game.mines_left(), -1);

        game.handle(Input::ToggleFlagActive);
        game.handle(Input::MoveCursor(Direction::Right));
        assert_eq!(game.toggle_flag_active(), FlagOutcome::Unflagged);
        assert_eq!(game.mines_left(), 1);
        assert!(game.board().iter().all(|cell| cell.state == CellState::Unopened));
    }

    #[test]
    fn restart_resets_everything() {
        let mut game = game((3, 3), &[(0, 0)]);
        game.handle(Input::ToggleFlagActive);
        game.handle(Input::MoveCursor(Direction::Down));
        let Command::ScheduleTick(old_tick) = game.handle(Input::RevealActive) else {
            panic!("expected the timer to start");
        };
        game.handle(Input::Tick(old_tick));

        game.handle(Input::Restart);

        assert_eq!(game.status(), GameStatus::New);
        assert_eq!(game.mines_left(), 1);
        assert_eq!(game.elapsed_secs(), 0);
        assert_eq!(game.cursor(), (1, 1));
        assert!(game.board().iter().all(|cell| cell.state == CellState::Unopened));

        // the tick armed before the restart must not leak into the new game
        let Command::ScheduleTick(new_tick) = game.handle(Input::RevealActive) else {
            panic!("expected the timer to start again");
        };
        assert_ne!(old_tick, new_tick);
        assert_eq!(game.handle(Input::Tick(old_tick)), Command::None);
        assert_eq!(game.handle(Input::Tick(new_tick)), Command::ScheduleTick(new_tick));
        assert_eq!(game.elapsed_secs(), 1);
    }

    #[test]
    fn ticks_are_ignored_before_the_first_reveal() {
        let mut game = game((3, 3), &[(0, 0)]);
        assert_eq!(game.handle(Input::Tick(TickId::default())), Command::None);
        assert_eq!(game.elapsed_secs(), 0);
    }

    #[test]
    fn chord_action_opens_neighbors() {
        let mut game = game((3, 3), &[(0, 1), (2, 1)]);
        game.handle(Input::RevealActive);
        assert_eq!(game.board()[(1, 1)].value, CellValue::Number(2));

        game.handle(Input::ChordNeighbors);

        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.board()[(1, 0)].state, CellState::Opened);
    }

    #[test]
    fn strict_chord_after_flagging_wins() {
        let mines: [Position; 2] = [(0, 1), (2, 1)];
        let config = GameConfig::new((3, 3), 2).with_chord(ChordPolicy::FlagsMatch);
        let mut game = Game::new(config, FixedBoardGenerator::new(mines)).unwrap();

        game.handle(Input::RevealActive);
        game.handle(Input::ChordNeighbors);
        assert_eq!(game.board().opened_safe_count(), 1);

        game.handle(Input::MoveCursor(Direction::Up));
        game.handle(Input::ToggleFlagActive);
        game.handle(Input::MoveCursor(Direction::Down));
        game.handle(Input::MoveCursor(Direction::Down));
        game.handle(Input::ToggleFlagActive);
        game.handle(Input::MoveCursor(Direction::Up));
        game.handle(Input::RevealActive);

        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn clicks_resolve_through_layout() {
        let mut game = game((3, 3), &[(2, 2)]);

        // no layout published yet
        let command = game.handle(Input::PointerClick {
            x: 3,
            y: 2,
            button: PointerButton::Left,
        });
        assert_eq!(command, Command::None);
        assert_eq!(game.cursor(), (1, 1));

        game.set_layout(layout((3, 3)));
        game.handle(Input::PointerClick {
            x: 13,
            y: 7,
            button: PointerButton::Right,
        });
        assert_eq!(game.cursor(), (2, 2));
        assert_eq!(game.board()[(2, 2)].state, CellState::Flagged);
        assert_eq!(game.mines_left(), 0);

        // (0, 0) is blank, so one click floods every safe cell
        game.handle(Input::PointerClick {
            x: 2,
            y: 1,
            button: PointerButton::Left,
        });
        assert_eq!(game.cursor(), (0, 0));
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn clicks_outside_cells_change_nothing() {
        let mut game = game((3, 3), &[]);
        game.set_layout(layout((3, 3)));

        for (x, y) in [(0, 0), (1, 5), (17, 2), (5, 10)] {
            game.handle(Input::PointerClick {
                x,
                y,
                button: PointerButton::Left,
            });
        }

        assert_eq!(game.cursor(), (1, 1));
        assert_eq!(game.status(), GameStatus::New);
    }

    #[test]
    fn resize_and_quit() {
        let mut game = game((3, 3), &[]);

        assert_eq!(game.handle(Input::Resize { width: 120, height: 40 }), Command::None);
        assert_eq!(game.snapshot().terminal_size, (120, 40));
        assert_eq!(game.handle(Input::Quit), Command::Quit);
        assert_eq!(game.status(), GameStatus::New);
    }
}
