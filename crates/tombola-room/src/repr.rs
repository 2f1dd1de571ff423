//! Wire representation of [`RoomState`].
//!
//! The model keeps one canonical shape field. Older clients read and write
//! `shape`, newer ones `shapeType`, so the document carries both:
//!
//! - on write, both names are emitted with the same value;
//! - on read, `shapeType` wins when both are present, otherwise whichever
//!   one exists is used, and an unrecognized value becomes `star`.
//!
//! Reads are tolerant: any missing field takes its default and the result
//! goes through [`RoomState::normalize`].

use serde::{Deserialize, Serialize};

use crate::model::{DEFAULT_CELLS, DEFAULT_INTERVAL_MS, DEFAULT_SHAPES};
use crate::{RoomState, ShapeKind, Winner};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomStateRepr {
    #[serde(default)]
    running: bool,
    #[serde(default)]
    num_cells: Option<i64>,
    #[serde(default)]
    num_shapes: Option<i64>,
    #[serde(default)]
    shape_type: Option<String>,
    #[serde(default)]
    shape: Option<String>,
    #[serde(default)]
    interval_ms: Option<i64>,
    #[serde(default)]
    available_numbers: Option<Vec<u32>>,
    #[serde(default)]
    names: Option<Vec<String>>,
    #[serde(default)]
    filled_counts: Option<Vec<u32>>,
    #[serde(default)]
    prizes: Vec<String>,
    #[serde(default)]
    winners: Vec<Winner>,
}

impl From<RoomState> for RoomStateRepr {
    fn from(state: RoomState) -> Self {
        let shape = state.shape_kind.as_str().to_string();
        Self {
            running: state.running,
            num_cells: Some(i64::from(state.num_cells)),
            num_shapes: Some(i64::from(state.num_shapes)),
            shape_type: Some(shape.clone()),
            shape: Some(shape),
            interval_ms: Some(i64::try_from(state.interval_ms).unwrap_or(i64::MAX)),
            available_numbers: Some(state.available_numbers),
            names: Some(state.names),
            filled_counts: Some(state.filled_counts),
            prizes: state.prizes,
            winners: state.winners,
        }
    }
}

impl From<RoomStateRepr> for RoomState {
    fn from(repr: RoomStateRepr) -> Self {
        let shape_kind = ShapeKind::from_input(repr.shape_type.as_deref().or(repr.shape.as_deref()));
        let num_cells = repr.num_cells.unwrap_or(i64::from(DEFAULT_CELLS));
        let num_shapes = repr.num_shapes.unwrap_or(i64::from(DEFAULT_SHAPES));

        let mut state = RoomState::create(num_cells, num_shapes, shape_kind);
        state.running = repr.running;
        state.interval_ms = repr
            .interval_ms
            .map_or(DEFAULT_INTERVAL_MS, |ms| u64::try_from(ms).unwrap_or(0));
        if let Some(pool) = repr.available_numbers {
            state.available_numbers = pool;
        }
        if let Some(names) = repr.names {
            state.names = names;
        }
        if let Some(counts) = repr.filled_counts {
            state.filled_counts = counts;
        }
        state.prizes = repr.prizes;
        state.winners = repr.winners;

        state.normalize()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_writes_both_shape_fields() {
        let state = RoomState::create(2, 1, ShapeKind::Diamond);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["shapeType"], "diamond");
        assert_eq!(json["shape"], "diamond");
    }

    #[test]
    fn test_wire_document_has_exactly_the_state_fields() {
        let json = serde_json::to_value(RoomState::create(2, 1, ShapeKind::Star)).unwrap();
        assert_eq!(
            json,
            json!({
                "running": false,
                "numCells": 2,
                "numShapes": 1,
                "shapeType": "star",
                "shape": "star",
                "intervalMs": 5000,
                "availableNumbers": [1, 2],
                "names": ["#1", "#2"],
                "filledCounts": [0, 0],
                "prizes": [],
                "winners": [],
            })
        );
    }

    #[test]
    fn test_canonical_shape_wins_on_conflict() {
        let state: RoomState =
            serde_json::from_value(json!({ "shapeType": "circle", "shape": "diamond" })).unwrap();
        assert_eq!(state.shape_kind, ShapeKind::Circle);
    }

    #[test]
    fn test_legacy_shape_used_when_canonical_missing() {
        let state: RoomState = serde_json::from_value(json!({ "shape": "diamond" })).unwrap();
        assert_eq!(state.shape_kind, ShapeKind::Diamond);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["shapeType"], "diamond");
    }

    #[test]
    fn test_invalid_shape_falls_back_to_star() {
        let state: RoomState = serde_json::from_value(json!({ "shapeType": "hexagon" })).unwrap();
        assert_eq!(state.shape_kind, ShapeKind::Star);
    }

    #[test]
    fn test_empty_document_reads_as_default_room() {
        let state: RoomState = serde_json::from_value(json!({})).unwrap();
        assert_eq!(state, RoomState::default());
    }

    #[test]
    fn test_partial_document_is_repaired() {
        let state: RoomState = serde_json::from_value(json!({
            "numCells": 3,
            "numShapes": 1,
            "filledCounts": [1],
            "names": ["Alice"],
            "winners": [{ "name": "Alice", "prize": "A", "number": 1 }],
        }))
        .unwrap();
        assert_eq!(state.names, vec!["Alice", "#2", "#3"]);
        assert_eq!(state.filled_counts, vec![1, 0, 0]);
        assert_eq!(state.available_numbers, vec![2, 3]);
    }

    #[test]
    fn test_winner_without_number_is_dropped() {
        let state: RoomState = serde_json::from_value(json!({
            "numCells": 2,
            "numShapes": 1,
            "winners": [{ "name": "x", "prize": "y" }],
        }))
        .unwrap();
        assert!(state.winners.is_empty());
        assert_eq!(state.available_numbers, vec![1, 2]);
    }

    #[test]
    fn test_state_survives_a_write_read_cycle() {
        let mut state = RoomState::create(4, 2, ShapeKind::Circle);
        state.running = true;
        state.interval_ms = 2500;
        state.prizes = vec!["A".into(), "B".into()];
        state.names[2] = "Carol".into();
        state.filled_counts[1] = 1;

        let bytes = serde_json::to_vec(&state).unwrap();
        let back: RoomState = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, state);
    }
}
