//! Hint search

use super::board::Board;

/// First face-down card in board order plus its face-down partner
///
/// Returns `None` when the first candidate has no face-down partner, e.g. the
/// partner is currently turned up as the first card of a pair attempt.
pub fn find_hint_pair(board: &Board) -> Option<(usize, usize)> {
    let cards = board.cards();
    let first = cards.iter().position(|c| c.is_hidden())?;
    let key = cards[first].key;
    let partner = cards
        .iter()
        .enumerate()
        .skip(first + 1)
        .find(|(_, c)| c.is_hidden() && c.key == key)
        .map(|(i, _)| i)?;
    Some((first, partner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_finds_partner_of_first_hidden() {
        let board = Board::generate(2, 4, &mut Pcg32::seed_from_u64(3));
        let (a, b) = find_hint_pair(&board).unwrap();
        assert_eq!(a, 0);
        assert_ne!(a, b);
        assert_eq!(board.cards()[a].key, board.cards()[b].key);
    }

    #[test]
    fn test_skips_flipped_and_matched() {
        let mut board = Board::generate(2, 4, &mut Pcg32::seed_from_u64(11));
        let key0 = board.cards()[0].key;
        let partner0 = (1..board.len())
            .find(|&i| board.cards()[i].key == key0)
            .unwrap();
        for i in [0, partner0] {
            board.card_mut(i).unwrap().is_matched = true;
        }

        let (a, b) = find_hint_pair(&board).unwrap();
        assert!(a != 0 && a != partner0);
        assert_eq!(board.cards()[a].key, board.cards()[b].key);
        assert!(board.cards()[..a].iter().all(|c| !c.is_hidden()));
    }

    #[test]
    fn test_none_when_partner_is_face_up() {
        let mut board = Board::generate(1, 2, &mut Pcg32::seed_from_u64(1));
        board.card_mut(1).unwrap().is_flipped = true;
        assert_eq!(find_hint_pair(&board), None);
    }

    #[test]
    fn test_none_on_cleared_board() {
        let mut board = Board::generate(1, 2, &mut Pcg32::seed_from_u64(1));
        for i in 0..2 {
            board.card_mut(i).unwrap().is_matched = true;
        }
        assert_eq!(find_hint_pair(&board), None);
    }
}
