//! The transition engine: `(state or none, action) -> new state`.
//!
//! Everything here is pure. Loading and saving rooms is the caller's
//! job; the engine only needs a random source for draws, passed in so
//! tests can seed it.

use rand::Rng;
use tombola_protocol::Params;

use crate::{Action, RoomError, RoomState, Winner};

/// The result of a single draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// The number that was drawn.
    pub number: u32,
    /// The cell's fill count after the draw.
    pub filled: u32,
    /// Set when this draw completed the cell.
    pub winner: Option<Winner>,
}

/// Parses and applies a request in one step.
///
/// # Errors
/// Returns [`RoomError::UnsupportedAction`] for an unknown label. The
/// given state is not consumed in that case, so the caller still holds
/// the authoritative copy.
pub fn apply_request<R: Rng>(
    state: Option<&RoomState>,
    label: Option<&str>,
    params: &Params,
    rng: &mut R,
) -> Result<RoomState, RoomError> {
    let action = Action::parse(label, params)?;
    Ok(apply(state.cloned(), &action, rng))
}

/// Applies an action to a room.
///
/// An absent room is materialized with [`RoomState::default`] first,
/// except for `generate`, which replaces the room outright. A present
/// room is normalized before the action runs, so the result always
/// satisfies the [`RoomState`] invariants.
pub fn apply<R: Rng>(state: Option<RoomState>, action: &Action, rng: &mut R) -> RoomState {
    match *action {
        Action::Generate {
            num_cells,
            num_shapes,
            shape_kind,
            interval_ms,
        } => {
            let mut fresh = RoomState::create(num_cells, num_shapes, shape_kind);
            fresh.interval_ms = interval_ms;
            fresh
        }
        Action::Reset => {
            let mut old = current(state);
            let mut fresh = RoomState::create(
                i64::from(old.num_cells),
                i64::from(old.num_shapes),
                old.shape_kind,
            );
            fresh.prizes = std::mem::take(&mut old.prizes);
            fresh
        }
        _ => {
            let mut state = current(state);
            update(&mut state, action, rng);
            state
        }
    }
}

fn current(state: Option<RoomState>) -> RoomState {
    state.map(RoomState::normalize).unwrap_or_default()
}

/// In-place transitions. `generate` and `reset` replace the whole room
/// and never reach here.
fn update<R: Rng>(state: &mut RoomState, action: &Action, rng: &mut R) {
    match action {
        Action::Generate { .. } | Action::Reset => {}
        Action::Start => state.running = true,
        Action::Stop => state.running = false,
        Action::Next => {
            draw(state, rng);
        }
        Action::AddPrize(prize) => {
            let prize = prize.trim();
            if !prize.is_empty() {
                state.prizes.push(prize.to_string());
            }
        }
        Action::SetPrizes(prizes) => state.prizes.clone_from(prizes),
        Action::RemovePrize(index) => {
            if let Some(i) = index.filter(|&i| i < state.prizes.len()) {
                state.prizes.remove(i);
            }
        }
        Action::SetNames(names) => {
            for (slot, name) in state.names.iter_mut().zip(names) {
                slot.clone_from(name);
            }
        }
    }
}

/// Draws one number from the pool.
///
/// The draw picks a uniformly random *position* in `available_numbers`,
/// so every remaining number is equally likely regardless of how far its
/// cell is filled. A completed number is removed from the pool by value.
///
/// Returns `None` (and leaves the state alone) when the pool is empty.
/// A pool entry with no matching cell is removed without drawing, and
/// `None` is returned.
pub fn draw<R: Rng>(state: &mut RoomState, rng: &mut R) -> Option<DrawOutcome> {
    if state.available_numbers.is_empty() {
        return None;
    }

    let position = rng.random_range(0..state.available_numbers.len());
    let number = state.available_numbers[position];
    let threshold = state.num_shapes;

    let Some(slot) = number
        .checked_sub(1)
        .and_then(|i| state.filled_counts.get_mut(i as usize))
    else {
        state.available_numbers.remove(position);
        tracing::warn!(number, "dropped number with no cell from the pool");
        return None;
    };
    *slot = (*slot + 1).min(threshold);
    let filled = *slot;

    tracing::debug!(number, filled, threshold, "number drawn");

    if filled < threshold {
        return Some(DrawOutcome {
            number,
            filled,
            winner: None,
        });
    }

    let winner = Winner {
        name: state.name_of(number),
        prize: state.next_prize().to_string(),
        number,
    };
    state.winners.push(winner.clone());
    state.available_numbers.retain(|&n| n != number);

    tracing::info!(
        number,
        name = %winner.name,
        prize = %winner.prize,
        remaining = state.available_numbers.len(),
        "winner drawn"
    );

    Some(DrawOutcome {
        number,
        filled,
        winner: Some(winner),
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::ShapeKind;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_absent_room_is_materialized() {
        let state = apply(None, &Action::Start, &mut rng());
        assert!(state.running);
        assert_eq!(state.num_cells, 20);
        assert_eq!(state.num_shapes, 2);
    }

    #[test]
    fn test_generate_replaces_everything() {
        let mut old = RoomState::create(5, 1, ShapeKind::Star);
        old.prizes.push("A".into());
        old.running = true;

        let action = Action::Generate {
            num_cells: 3,
            num_shapes: 4,
            shape_kind: ShapeKind::Diamond,
            interval_ms: 2000,
        };
        let state = apply(Some(old), &action, &mut rng());
        assert_eq!(state.num_cells, 3);
        assert_eq!(state.num_shapes, 4);
        assert_eq!(state.shape_kind, ShapeKind::Diamond);
        assert_eq!(state.interval_ms, 2000);
        assert!(state.prizes.is_empty());
        assert!(!state.running);
    }

    #[test]
    fn test_draw_on_empty_pool_is_noop() {
        let mut state = RoomState::create(1, 1, ShapeKind::Star);
        assert!(draw(&mut state, &mut rng()).is_some());
        let before = state.clone();
        assert_eq!(draw(&mut state, &mut rng()), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_draw_drops_numbers_without_a_cell() {
        let mut state = RoomState::create(2, 1, ShapeKind::Star);
        state.available_numbers = vec![0];
        assert_eq!(draw(&mut state, &mut rng()), None);
        assert!(state.available_numbers.is_empty());

        state.available_numbers = vec![7];
        assert_eq!(draw(&mut state, &mut rng()), None);
        assert!(state.available_numbers.is_empty());
        assert_eq!(state.filled_counts, vec![0, 0]);
        assert!(state.winners.is_empty());
    }

    #[test]
    fn test_incomplete_cell_stays_in_pool() {
        let mut state = RoomState::create(1, 3, ShapeKind::Star);
        let outcome = draw(&mut state, &mut rng()).unwrap();
        assert_eq!(outcome.number, 1);
        assert_eq!(outcome.filled, 1);
        assert!(outcome.winner.is_none());
        assert_eq!(state.available_numbers, vec![1]);
    }

    #[test]
    fn test_completed_cell_becomes_winner() {
        let mut state = RoomState::create(1, 2, ShapeKind::Star);
        state.names[0] = "Alice".into();
        state.prizes.push("Mug".into());

        draw(&mut state, &mut rng());
        let outcome = draw(&mut state, &mut rng()).unwrap();
        let winner = outcome.winner.unwrap();
        assert_eq!(winner.name, "Alice");
        assert_eq!(winner.prize, "Mug");
        assert_eq!(winner.number, 1);
        assert!(state.available_numbers.is_empty());
        assert_eq!(state.filled_counts, vec![2]);
    }

    #[test]
    fn test_remove_prize_out_of_range_is_noop() {
        let mut state = RoomState::default();
        state.prizes = vec!["A".into(), "B".into()];
        let after = apply(Some(state.clone()), &Action::RemovePrize(Some(2)), &mut rng());
        assert_eq!(after, state);
        let after = apply(Some(state.clone()), &Action::RemovePrize(None), &mut rng());
        assert_eq!(after, state);
    }

    #[test]
    fn test_add_prize_ignores_blank() {
        let state = apply(None, &Action::AddPrize("   ".into()), &mut rng());
        assert!(state.prizes.is_empty());
    }

    #[test]
    fn test_set_names_longer_than_board_is_truncated() {
        let state = RoomState::create(2, 1, ShapeKind::Star);
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let state = apply(Some(state), &Action::SetNames(names), &mut rng());
        assert_eq!(state.names, vec!["A", "B"]);
    }
}
