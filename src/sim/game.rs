//! The flip/match state machine
//!
//! `MemoryGame` owns every piece of per-game and per-process state and mutates
//! it only through `start`, `select_card`, `request_hint` and `advance`. Each
//! change is pushed to the `Presenter` as it happens.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::board::Board;
use super::events::{GameEvent, Presenter};
use super::hint::find_hint_pair;
use super::state::{GamePhase, LossReason, SessionState};
use super::timers::{Scheduled, Scheduler, Task};
use crate::consts::*;
use crate::difficulty::{Difficulty, DifficultyCatalog, DifficultyProfile};
use crate::progress::PlayerProgress;

/// Result of `select_card`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Selection not allowed right now
    Ignored,
    /// First card of a pair turned up
    Flipped,
    Matched,
    /// Pair differs; the board is locked until it is concealed
    Mismatched,
    Won,
    Lost(LossReason),
}

/// Result of `request_hint`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    /// No game in progress
    Inactive,
    /// No charges left; a notice was emitted
    NoCharges,
    /// No face-down pair to reveal; the charge is kept
    NotFound,
    Revealed(usize, usize),
}

/// A memory game session plus the player's progress across games
pub struct MemoryGame<P: Presenter> {
    catalog: DifficultyCatalog,
    difficulty: Difficulty,
    phase: GamePhase,
    board: Board,
    session: SessionState,
    progress: PlayerProgress,
    scheduler: Scheduler,
    /// Bumped on every start; tasks from older games are dropped
    generation: u64,
    rng: Pcg32,
    presenter: P,
}

impl<P: Presenter> MemoryGame<P> {
    /// Create an idle game with the built-in difficulty table
    pub fn new(seed: u64, presenter: P) -> Self {
        Self::with_catalog(DifficultyCatalog::builtin(), seed, presenter)
    }

    pub fn with_catalog(catalog: DifficultyCatalog, seed: u64, presenter: P) -> Self {
        Self {
            catalog,
            difficulty: Difficulty::default(),
            phase: GamePhase::Idle,
            board: Board::default(),
            session: SessionState::default(),
            progress: PlayerProgress::new(),
            scheduler: Scheduler::new(),
            generation: 0,
            rng: Pcg32::seed_from_u64(seed),
            presenter,
        }
    }

    /// Deal a new board and start the countdown
    pub fn start(&mut self, difficulty: Difficulty) {
        let profile = self.catalog.profile(difficulty);
        self.start_with_profile(difficulty, profile);
    }

    fn start_with_profile(&mut self, difficulty: Difficulty, profile: DifficultyProfile) {
        self.generation += 1;
        self.scheduler
            .cancel_where(|t| matches!(t, Task::CountdownTick));

        self.difficulty = difficulty;
        self.session = SessionState::from_profile(&profile);
        self.board = Board::generate(profile.rows, profile.cols, &mut self.rng);
        self.phase = GamePhase::Playing;

        log::info!(
            "Game {} started: {} ({}x{}, {} moves, {}s, {} hints)",
            self.generation,
            difficulty.as_str(),
            profile.rows,
            profile.cols,
            profile.move_budget,
            profile.time_budget_secs,
            profile.hint_budget
        );

        self.presenter.present(GameEvent::ResetScreens);
        self.presenter.present(GameEvent::BoardDealt {
            cols: self.board.cols,
            cards: self.board.cards().to_vec(),
        });
        self.emit_status();
        self.emit_progress();

        self.scheduler
            .schedule(COUNTDOWN_PERIOD_MS, self.generation, Task::CountdownTick);
    }

    /// Try to turn up the card at `index`
    pub fn select_card(&mut self, index: usize) -> SelectOutcome {
        if self.phase != GamePhase::Playing
            || self.session.is_locked
            || self.session.seconds_left == 0
            || self.session.moves_left == 0
        {
            return SelectOutcome::Ignored;
        }
        match self.board.card_mut(index) {
            Some(card) if card.is_hidden() => card.is_flipped = true,
            _ => return SelectOutcome::Ignored,
        }
        self.session.flipped.push(index);
        self.emit_card(index);

        if self.session.flipped.len() < 2 {
            return SelectOutcome::Flipped;
        }

        self.session.moves_left -= 1;
        self.emit_status();

        let (first, second) = (self.session.flipped[0], self.session.flipped[1]);
        let outcome = if self.board.cards()[first].key == self.board.cards()[second].key {
            self.resolve_match(first, second)
        } else {
            log::debug!("Mismatch at {} and {}", first, second);
            self.session.is_locked = true;
            self.scheduler.schedule(
                MISMATCH_DELAY_MS,
                self.generation,
                Task::ConcealMismatch { first, second },
            );
            SelectOutcome::Mismatched
        };

        // Win is decided first, so a last-move clear still counts
        if outcome != SelectOutcome::Won
            && self.session.moves_left == 0
            && self.session.matched_pairs < self.board.pair_count()
        {
            self.lose(LossReason::OutOfMoves);
            return SelectOutcome::Lost(LossReason::OutOfMoves);
        }

        outcome
    }

    fn resolve_match(&mut self, first: usize, second: usize) -> SelectOutcome {
        for index in [first, second] {
            if let Some(card) = self.board.card_mut(index) {
                card.is_matched = true;
            }
            self.emit_card(index);
        }
        self.session.matched_pairs += 1;
        self.session.flipped.clear();
        self.progress.record_match();
        self.emit_progress();

        log::debug!(
            "Matched {} and {} ({}/{})",
            first,
            second,
            self.session.matched_pairs,
            self.board.pair_count()
        );

        if self.session.matched_pairs == self.board.pair_count() {
            self.win();
            SelectOutcome::Won
        } else {
            SelectOutcome::Matched
        }
    }

    /// Briefly reveal one face-down pair
    pub fn request_hint(&mut self) -> HintOutcome {
        if self.phase != GamePhase::Playing {
            return HintOutcome::Inactive;
        }
        if self.session.hints_left == 0 {
            self.presenter
                .present(GameEvent::Notice(NO_HINTS_NOTICE.to_string()));
            return HintOutcome::NoCharges;
        }
        let Some((first, second)) = find_hint_pair(&self.board) else {
            return HintOutcome::NotFound;
        };

        for index in [first, second] {
            if let Some(card) = self.board.card_mut(index) {
                card.is_flipped = true;
            }
            self.emit_card(index);
        }
        self.session.hints_left -= 1;
        self.scheduler.schedule(
            HINT_REVEAL_MS,
            self.generation,
            Task::ConcealHint { first, second },
        );

        log::debug!(
            "Hint revealed {} and {} ({} left)",
            first,
            second,
            self.session.hints_left
        );
        HintOutcome::Revealed(first, second)
    }

    /// Advance virtual time, running every task that falls due
    pub fn advance(&mut self, dt_ms: u64) {
        let until = self.scheduler.now_ms() + dt_ms;
        while let Some(scheduled) = self.scheduler.pop_due(until) {
            self.run_task(scheduled);
        }
        self.scheduler.settle(until);
    }

    fn run_task(&mut self, scheduled: Scheduled) {
        if scheduled.generation != self.generation {
            log::debug!(
                "Dropping {:?} from game {} (current {})",
                scheduled.task,
                scheduled.generation,
                self.generation
            );
            return;
        }

        match scheduled.task {
            Task::ConcealMismatch { first, second } => {
                self.conceal(first, second);
                self.session.flipped.clear();
                if self.phase == GamePhase::Playing {
                    self.session.is_locked = false;
                }
            }
            Task::ConcealHint { first, second } => self.conceal(first, second),
            Task::CountdownTick => self.countdown_tick(),
        }
    }

    fn conceal(&mut self, first: usize, second: usize) {
        for index in [first, second] {
            match self.board.card_mut(index) {
                Some(card) if !card.is_matched => card.is_flipped = false,
                _ => continue,
            }
            self.emit_card(index);
        }
    }

    fn countdown_tick(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.session.seconds_left = self.session.seconds_left.saturating_sub(1);
        self.emit_status();

        if self.session.seconds_left == 0 && self.session.matched_pairs < self.board.pair_count() {
            self.lose(LossReason::OutOfTime);
        } else {
            self.scheduler
                .schedule(COUNTDOWN_PERIOD_MS, self.generation, Task::CountdownTick);
        }
    }

    fn win(&mut self) {
        self.phase = GamePhase::Won;
        self.session.is_locked = true;
        self.stop_countdown();
        if self.progress.record_win() {
            log::info!("New high score: {}", self.progress.high_score);
        }
        log::info!(
            "Game {} won with {} moves and {}s left",
            self.generation,
            self.session.moves_left,
            self.session.seconds_left
        );

        self.emit_progress();
        self.presenter.present(GameEvent::Won);
        self.presenter.present(GameEvent::Celebrate);
    }

    fn lose(&mut self, reason: LossReason) {
        self.phase = GamePhase::Lost(reason);
        self.session.is_locked = true;
        self.stop_countdown();
        self.progress.record_loss();
        log::info!("Game {} lost: {}", self.generation, reason);

        self.emit_progress();
        self.presenter.present(GameEvent::Lost(reason));
    }

    fn stop_countdown(&mut self) {
        self.scheduler
            .cancel_where(|t| matches!(t, Task::CountdownTick));
    }

    fn emit_card(&mut self, index: usize) {
        if let Some(card) = self.board.card(index) {
            self.presenter
                .present(GameEvent::CardChanged { index, card: *card });
        }
    }

    fn emit_status(&mut self) {
        self.presenter.present(GameEvent::Status {
            moves_left: self.session.moves_left,
            seconds_left: self.session.seconds_left,
        });
    }

    fn emit_progress(&mut self) {
        self.presenter.present(GameEvent::Progress {
            streak: self.progress.current_streak,
            high_score: self.progress.high_score,
        });
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn catalog(&self) -> &DifficultyCatalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn progress(&self) -> PlayerProgress {
        self.progress
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Virtual milliseconds elapsed since creation
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}
