//! Actions a client can request on a room.

use std::fmt;

use tombola_protocol::Params;

use crate::model::{DEFAULT_CELLS, DEFAULT_INTERVAL_MS, DEFAULT_SHAPES, MIN_INTERVAL_MS};
use crate::{RoomError, ShapeKind};

/// A parsed, fully-defaulted action.
///
/// Parsing never fails on parameter values, only on an unknown label.
/// Every field below already holds the value the engine will use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the room with a fresh board.
    Generate {
        num_cells: i64,
        num_shapes: i64,
        shape_kind: ShapeKind,
        interval_ms: u64,
    },
    /// Clear draw progress and winners, keeping dimensions and prizes.
    Reset,
    Start,
    Stop,
    /// Draw one number.
    Next,
    /// Append a prize. Carries the trimmed input; empty means no-op.
    AddPrize(String),
    SetPrizes(Vec<String>),
    /// Remove the prize at an index. `None` (not an exact non-negative
    /// integer) is a no-op, as is an index past the end.
    RemovePrize(Option<usize>),
    /// Overwrite leading cell names.
    SetNames(Vec<String>),
}

impl Action {
    /// Builds an action from its wire label and the request fields.
    ///
    /// # Errors
    /// Returns [`RoomError::UnsupportedAction`] for a missing or
    /// unrecognized label.
    pub fn parse(label: Option<&str>, params: &Params) -> Result<Self, RoomError> {
        let label = label.ok_or_else(|| RoomError::UnsupportedAction("<none>".into()))?;

        let action = match label {
            "generate" => Self::Generate {
                num_cells: params.int("n").unwrap_or(i64::from(DEFAULT_CELLS)),
                num_shapes: params.int("k").unwrap_or(i64::from(DEFAULT_SHAPES)),
                shape_kind: ShapeKind::from_input(
                    params.str("shapeType").or_else(|| params.str("shape")),
                ),
                interval_ms: requested_interval(params),
            },
            "reset" => Self::Reset,
            "start" => Self::Start,
            "stop" => Self::Stop,
            "next" => Self::Next,
            "addPrize" => Self::AddPrize(
                params
                    .string("prize")
                    .map(|p| p.trim().to_string())
                    .unwrap_or_default(),
            ),
            "setPrizes" => Self::SetPrizes(params.strings("prizes").unwrap_or_default()),
            "removePrize" => Self::RemovePrize(params.index("index")),
            "setNames" => Self::SetNames(params.strings("names").unwrap_or_default()),
            other => return Err(RoomError::UnsupportedAction(other.to_string())),
        };
        Ok(action)
    }

    /// The wire label of this action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Generate { .. } => "generate",
            Self::Reset => "reset",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Next => "next",
            Self::AddPrize(_) => "addPrize",
            Self::SetPrizes(_) => "setPrizes",
            Self::RemovePrize(_) => "removePrize",
            Self::SetNames(_) => "setNames",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `intervalMs` from the request: zero or absent means the default, and
/// the result is never below [`MIN_INTERVAL_MS`].
fn requested_interval(params: &Params) -> u64 {
    let requested = match params.int("intervalMs") {
        None | Some(0) => DEFAULT_INTERVAL_MS,
        Some(ms) => u64::try_from(ms).unwrap_or(0),
    };
    requested.max(MIN_INTERVAL_MS)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(label: &str, body: serde_json::Value) -> Result<Action, RoomError> {
        Action::parse(Some(label), &Params::from_value(body))
    }

    #[test]
    fn test_generate_defaults() {
        let action = parse("generate", json!({})).unwrap();
        assert_eq!(
            action,
            Action::Generate {
                num_cells: 20,
                num_shapes: 2,
                shape_kind: ShapeKind::Star,
                interval_ms: 5000,
            }
        );
    }

    #[test]
    fn test_generate_coerces_inputs() {
        let action = parse(
            "generate",
            json!({ "n": "12.7", "k": 3, "shape": "circle", "intervalMs": 250 }),
        )
        .unwrap();
        assert_eq!(
            action,
            Action::Generate {
                num_cells: 12,
                num_shapes: 3,
                shape_kind: ShapeKind::Circle,
                interval_ms: 1000,
            }
        );
    }

    #[test]
    fn test_generate_non_numeric_dimensions_default() {
        let action = parse("generate", json!({ "n": "lots", "k": [2], "shape": 5 })).unwrap();
        assert!(matches!(
            action,
            Action::Generate {
                num_cells: 20,
                num_shapes: 2,
                shape_kind: ShapeKind::Star,
                ..
            }
        ));
    }

    #[test]
    fn test_generate_interval_zero_means_default() {
        let action = parse("generate", json!({ "intervalMs": 0 })).unwrap();
        assert!(matches!(action, Action::Generate { interval_ms: 5000, .. }));

        let action = parse("generate", json!({ "intervalMs": -20 })).unwrap();
        assert!(matches!(action, Action::Generate { interval_ms: 1000, .. }));
    }

    #[test]
    fn test_add_prize_is_trimmed() {
        assert_eq!(
            parse("addPrize", json!({ "prize": "  Mug  " })).unwrap(),
            Action::AddPrize("Mug".into())
        );
        assert_eq!(
            parse("addPrize", json!({})).unwrap(),
            Action::AddPrize(String::new())
        );
    }

    #[test]
    fn test_list_actions_default_to_empty() {
        assert_eq!(
            parse("setPrizes", json!({ "prizes": "A" })).unwrap(),
            Action::SetPrizes(vec![])
        );
        assert_eq!(
            parse("setNames", json!({ "names": ["Alice", 2] })).unwrap(),
            Action::SetNames(vec!["Alice".into(), "2".into()])
        );
    }

    #[test]
    fn test_remove_prize_index() {
        assert_eq!(
            parse("removePrize", json!({ "index": 1 })).unwrap(),
            Action::RemovePrize(Some(1))
        );
        assert_eq!(
            parse("removePrize", json!({ "index": 0.5 })).unwrap(),
            Action::RemovePrize(None)
        );
    }

    #[test]
    fn test_unknown_and_missing_labels_are_rejected() {
        assert_eq!(
            parse("frobnicate", json!({})),
            Err(RoomError::UnsupportedAction("frobnicate".into()))
        );
        assert!(Action::parse(None, &Params::new()).is_err());
    }

    #[test]
    fn test_name_matches_wire_label() {
        for label in [
            "generate",
            "reset",
            "start",
            "stop",
            "next",
            "addPrize",
            "setPrizes",
            "removePrize",
            "setNames",
        ] {
            let action = parse(label, json!({})).unwrap();
            assert_eq!(action.name(), label);
            assert_eq!(action.to_string(), label);
        }
    }
}
