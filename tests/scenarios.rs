// Native scenario tests for full games driven through the public API.

use std::collections::HashMap;

use cat_match::consts::{MISMATCH_DELAY_MS, NO_HINTS_NOTICE};
use cat_match::sim::{GameEvent, GamePhase, HintOutcome, LossReason, MemoryGame, SelectOutcome};
use cat_match::{Difficulty, DifficultyCatalog};

type Game = MemoryGame<Vec<GameEvent>>;

fn partner_of(game: &Game, index: usize) -> usize {
    let cards = game.board().cards();
    (0..cards.len())
        .find(|&i| i != index && cards[i].key == cards[index].key)
        .expect("every card has a partner")
}

fn first_hidden(game: &Game) -> usize {
    game.board()
        .cards()
        .iter()
        .position(|c| c.is_hidden())
        .expect("a face-down card")
}

fn play_mismatch(game: &mut Game) -> SelectOutcome {
    let cards = game.board().cards();
    let a = first_hidden(game);
    let b = (0..cards.len())
        .find(|&i| cards[i].is_hidden() && cards[i].key != cards[a].key)
        .expect("a face-down card with another key");
    game.select_card(a);
    let outcome = game.select_card(b);
    game.advance(MISMATCH_DELAY_MS);
    outcome
}

fn play_match(game: &mut Game) -> SelectOutcome {
    let a = first_hidden(game);
    let b = partner_of(game, a);
    game.select_card(a);
    game.select_card(b)
}

#[test]
fn easy_board_has_four_pairs_and_can_be_won() {
    let mut game = Game::new(2024, Vec::new());
    game.start(Difficulty::Easy);

    assert_eq!(game.board().len(), 8);
    let mut counts = HashMap::new();
    for card in game.board().cards() {
        *counts.entry(card.key).or_insert(0) += 1;
    }
    assert_eq!(counts.len(), 4);
    assert!(counts.values().all(|&n| n == 2));

    let mut outcomes = Vec::new();
    for _ in 0..4 {
        outcomes.push(play_match(&mut game));
    }
    assert_eq!(outcomes.last(), Some(&SelectOutcome::Won));
    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.session().moves_left, 8);
    assert_eq!(game.progress().current_streak, 4);
    assert_eq!(game.progress().high_score, 4);

    let events = game.presenter();
    let won_at = events.iter().position(|e| *e == GameEvent::Won).unwrap();
    assert_eq!(events[won_at + 1], GameEvent::Celebrate);

    // Board stays locked until the next start
    assert_eq!(game.select_card(0), SelectOutcome::Ignored);
    assert_eq!(game.request_hint(), HintOutcome::Inactive);
}

#[test]
fn medium_runs_out_of_moves() {
    let mut game = Game::new(7, Vec::new());
    game.start(Difficulty::Medium);

    // One match builds a streak that the loss must wipe
    assert_eq!(play_match(&mut game), SelectOutcome::Matched);
    assert_eq!(game.progress().current_streak, 1);

    let mut last = SelectOutcome::Ignored;
    for _ in 0..23 {
        last = play_mismatch(&mut game);
    }
    assert_eq!(last, SelectOutcome::Lost(LossReason::OutOfMoves));
    assert_eq!(game.phase(), GamePhase::Lost(LossReason::OutOfMoves));
    assert_eq!(game.session().moves_left, 0);
    assert_eq!(game.progress().current_streak, 0);
    assert_eq!(game.progress().high_score, 0);
    assert!(game.session().is_locked);
    assert!(
        game.presenter()
            .contains(&GameEvent::Lost(LossReason::OutOfMoves))
    );

    // Countdown is stopped
    let seconds = game.session().seconds_left;
    game.advance(5_000);
    assert_eq!(game.session().seconds_left, seconds);
}

#[test]
fn hard_runs_out_of_time() {
    let mut game = Game::new(99, Vec::new());
    game.start(Difficulty::Hard);
    play_match(&mut game);

    game.advance(59_999);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.session().seconds_left, 1);

    game.advance(1);
    assert_eq!(game.phase(), GamePhase::Lost(LossReason::OutOfTime));
    assert_eq!(game.session().seconds_left, 0);
    assert_eq!(game.progress().current_streak, 0);

    let before = game.session().clone();
    assert_eq!(game.select_card(first_hidden(&game)), SelectOutcome::Ignored);
    assert_eq!(game.session(), &before);
}

#[test]
fn hint_with_no_charges_surfaces_notice() {
    let mut game = Game::new(5, Vec::new());
    game.start(Difficulty::Easy);

    assert!(matches!(game.request_hint(), HintOutcome::Revealed(_, _)));
    game.advance(1000);

    let before = game.session().clone();
    let board_before = game.board().clone();
    game.presenter_mut().clear();

    assert_eq!(game.request_hint(), HintOutcome::NoCharges);
    assert_eq!(game.session(), &before);
    assert_eq!(game.board(), &board_before);
    assert_eq!(
        game.presenter().as_slice(),
        &[GameEvent::Notice(NO_HINTS_NOTICE.to_string())]
    );
}

#[test]
fn high_score_survives_a_later_loss() {
    let mut game = Game::new(11, Vec::new());
    game.start(Difficulty::Easy);
    for _ in 0..4 {
        play_match(&mut game);
    }
    assert_eq!(game.progress().high_score, 4);

    game.start(Difficulty::Easy);
    assert_eq!(game.session().moves_left, 12);
    assert_eq!(game.session().matched_pairs, 0);
    play_match(&mut game);
    assert_eq!(game.progress().current_streak, 5);

    game.advance(30_000);
    assert_eq!(game.phase(), GamePhase::Lost(LossReason::OutOfTime));
    assert_eq!(game.progress().current_streak, 0);
    assert_eq!(game.progress().high_score, 4);
}

#[test]
fn moves_drop_by_one_per_pair_attempt() {
    let mut game = Game::new(3, Vec::new());
    game.start(Difficulty::Hard);
    let mut expected = 40;
    for round in 0..10 {
        if round % 3 == 0 {
            play_match(&mut game);
        } else {
            play_mismatch(&mut game);
        }
        expected -= 1;
        assert_eq!(game.session().moves_left, expected);
    }
}

#[test]
fn custom_catalog_drives_board_size() {
    let json = r#"{"easy": {"rows": 1, "cols": 2, "moves": 1, "time": 5, "hints": 0}}"#;
    let catalog = DifficultyCatalog::from_json(json).unwrap();
    let mut game = MemoryGame::with_catalog(catalog, 1, Vec::new());
    game.start(Difficulty::Easy);
    assert_eq!(game.board().len(), 2);

    // The only move clears the board: win beats running out of moves
    assert_eq!(play_match(&mut game), SelectOutcome::Won);
    assert_eq!(game.session().moves_left, 0);
}
