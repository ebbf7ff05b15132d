// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Encoder for the mode-aware firmware generation.
//!
//! Start, pause and stop pick their command family from the polled `mode`:
//!
//! | Operation | point mode with cached point | edge mode | otherwise |
//! |---|---|---|---|
//! | start | `set_pointclean [1, x, y]` | `set_mode [3, 1]` | `set_mode_withroom [am, 1, 0]` |
//! | pause | `set_pointclean [3, x, y]` | `set_mode [3, 3]` | `set_mode_withroom [am, 3, 0]` |
//!
//! Stop sends `set_pointclean [0, 0, 0]` in point mode (and forgets the
//! cached point), `set_mode [3, 0]` in edge mode and `set_mode [0]`
//! otherwise. `am` is the action mode from [`room_action_mode`].

use crate::command::{
    CleanAction, CommandSequence, ModeCommand, PointCleanCommand, RoomCleanCommand,
    UploadMapCommand, ZoneCommand,
};
use crate::encoder::{
    CommandEncoder, EncodeContext, Encoded, Operation, PointUpdate, ProtocolVersion, encode_shared,
};
use crate::error::{DeviceError, Error};
use crate::state::PropertySnapshot;
use crate::types::Point;

/// Cleaning mode reported in the `mode` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleaningMode {
    /// Whole room cleaning (any code not listed below).
    Room(i64),
    /// Spot or zone cleaning (code 2).
    Spot,
    /// Edge or manual cleaning (code 3).
    Edge,
    /// Single point cleaning (code 4).
    Point,
}

impl CleaningMode {
    /// Classifies a `mode` code.
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            2 => Self::Spot,
            3 => Self::Edge,
            4 => Self::Point,
            other => Self::Room(other),
        }
    }
}

/// Encoder for firmware that reports `mode` and supports targeted cleaning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeAwareEncoder;

/// Derives the first `set_mode_withroom` parameter.
///
/// Spot cleaning forces 2. Otherwise the mop selector is passed through,
/// except that selector 2 maps to 3.
#[must_use]
pub fn room_action_mode(snapshot: &PropertySnapshot) -> i64 {
    if CleaningMode::from_code(snapshot.mode()) == CleaningMode::Spot {
        2
    } else if snapshot.is_mop() == 2 {
        3
    } else {
        snapshot.is_mop()
    }
}

fn require_snapshot<'a>(
    context: &EncodeContext<'a>,
    operation: &Operation,
) -> Result<&'a PropertySnapshot, DeviceError> {
    context.snapshot.ok_or(DeviceError::NoSnapshot {
        operation: operation.name(),
    })
}

/// Start and pause share their branching and differ only in action code.
fn encode_run(
    failure_message: &'static str,
    action: CleanAction,
    snapshot: &PropertySnapshot,
    last_clean_point: Option<Point>,
) -> CommandSequence {
    match (CleaningMode::from_code(snapshot.mode()), last_clean_point) {
        (CleaningMode::Point, Some(point)) => {
            CommandSequence::single(failure_message, &PointCleanCommand::new(action, point))
        }
        (CleaningMode::Edge, _) => CommandSequence::single(failure_message, &ModeCommand::Edge(action)),
        _ => CommandSequence::single(
            failure_message,
            &RoomCleanCommand::new(room_action_mode(snapshot), action),
        ),
    }
}

impl CommandEncoder for ModeAwareEncoder {
    fn version(&self) -> ProtocolVersion {
        ProtocolVersion::ModeAware
    }

    fn encode(&self, operation: &Operation, context: &EncodeContext<'_>) -> Result<Encoded, Error> {
        let encoded = match operation {
            Operation::Start => {
                let snapshot = require_snapshot(context, operation)?;
                Encoded::keep(encode_run(
                    "Unable to start the vacuum",
                    CleanAction::Start,
                    snapshot,
                    context.last_clean_point,
                ))
            }
            Operation::Pause => {
                let snapshot = require_snapshot(context, operation)?;
                Encoded::keep(encode_run(
                    "Unable to set pause",
                    CleanAction::Pause,
                    snapshot,
                    context.last_clean_point,
                ))
            }
            Operation::Stop => {
                let snapshot = require_snapshot(context, operation)?;
                match CleaningMode::from_code(snapshot.mode()) {
                    CleaningMode::Edge => Encoded::keep(CommandSequence::single(
                        "Unable to stop",
                        &ModeCommand::Edge(CleanAction::Stop),
                    )),
                    CleaningMode::Point => Encoded {
                        sequence: CommandSequence::single("Unable to stop", &PointCleanCommand::stop()),
                        point_update: PointUpdate::Clear,
                    },
                    CleaningMode::Spot | CleaningMode::Room(_) => {
                        Encoded::keep(CommandSequence::single("Unable to stop", &ModeCommand::Stop))
                    }
                }
            }
            Operation::CleanZone { zones, repeats } => Encoded::keep(
                CommandSequence::new("Unable to clean zone")
                    .then(&UploadMapCommand::Enable)
                    .then(&ZoneCommand::new(zones, *repeats))
                    .then(&ModeCommand::Edge(CleanAction::Start)),
            ),
            Operation::CleanPoint(point) => Encoded {
                sequence: CommandSequence::new("Unable to clean point")
                    .then(&UploadMapCommand::Disable)
                    .then(&PointCleanCommand::new(CleanAction::Start, *point)),
                point_update: PointUpdate::Set(*point),
            },
            shared => return encode_shared(shared),
        };
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, RawCommand};
    use crate::types::{Repeats, Zone};
    use serde_json::json;

    fn snapshot(mode: i64, is_mop: i64) -> PropertySnapshot {
        PropertySnapshot::new([3, mode, 0, 90, 1, 0, 0, 0, 1, 1, 1, 1, is_mop, 0])
    }

    fn encode(op: &Operation, snap: &PropertySnapshot, point: Option<Point>) -> Encoded {
        ModeAwareEncoder
            .encode(op, &EncodeContext::new(Some(snap), point))
            .unwrap()
    }

    fn only_step(encoded: &Encoded) -> RawCommand {
        assert_eq!(encoded.sequence.len(), 1);
        encoded.sequence.steps()[0].clone()
    }

    fn raw(method: &str, params: &[i64]) -> RawCommand {
        RawCommand::new(method, params.iter().map(|p| json!(p)).collect())
    }

    #[test]
    fn mode_classification() {
        assert_eq!(CleaningMode::from_code(0), CleaningMode::Room(0));
        assert_eq!(CleaningMode::from_code(2), CleaningMode::Spot);
        assert_eq!(CleaningMode::from_code(3), CleaningMode::Edge);
        assert_eq!(CleaningMode::from_code(4), CleaningMode::Point);
        assert_eq!(CleaningMode::from_code(9), CleaningMode::Room(9));
    }

    #[test]
    fn action_mode_derivation() {
        assert_eq!(room_action_mode(&snapshot(2, 0)), 2);
        assert_eq!(room_action_mode(&snapshot(2, 2)), 2);
        assert_eq!(room_action_mode(&snapshot(0, 2)), 3);
        assert_eq!(room_action_mode(&snapshot(0, 1)), 1);
        assert_eq!(room_action_mode(&snapshot(0, 0)), 0);
        assert_eq!(room_action_mode(&snapshot(4, 2)), 3);
    }

    #[test]
    fn start_in_point_mode_with_cached_point() {
        let encoded = encode(&Operation::Start, &snapshot(4, 0), Some(Point::new(150, 200)));
        assert_eq!(only_step(&encoded), raw("set_pointclean", &[1, 150, 200]));
        assert_eq!(encoded.point_update, PointUpdate::Keep);
    }

    #[test]
    fn pause_in_point_mode_with_cached_point() {
        let encoded = encode(&Operation::Pause, &snapshot(4, 0), Some(Point::new(150, 200)));
        assert_eq!(only_step(&encoded), raw("set_pointclean", &[3, 150, 200]));
    }

    #[test]
    fn start_in_point_mode_without_point_falls_back_to_room() {
        let encoded = encode(&Operation::Start, &snapshot(4, 1), None);
        assert_eq!(only_step(&encoded), raw("set_mode_withroom", &[1, 1, 0]));
    }

    #[test]
    fn edge_mode_commands() {
        let snap = snapshot(3, 2);
        assert_eq!(
            only_step(&encode(&Operation::Start, &snap, None)),
            raw("set_mode", &[3, 1])
        );
        assert_eq!(
            only_step(&encode(&Operation::Pause, &snap, None)),
            raw("set_mode", &[3, 3])
        );
        assert_eq!(
            only_step(&encode(&Operation::Stop, &snap, None)),
            raw("set_mode", &[3, 0])
        );
    }

    #[test]
    fn edge_mode_ignores_cached_point() {
        let encoded = encode(&Operation::Start, &snapshot(3, 0), Some(Point::new(5, 5)));
        assert_eq!(only_step(&encoded), raw("set_mode", &[3, 1]));
    }

    #[test]
    fn room_start_with_mop_selector_two() {
        let encoded = encode(&Operation::Start, &snapshot(0, 2), None);
        assert_eq!(only_step(&encoded), raw("set_mode_withroom", &[3, 1, 0]));
    }

    #[test]
    fn spot_mode_pause_uses_action_mode_two() {
        let encoded = encode(&Operation::Pause, &snapshot(2, 1), None);
        assert_eq!(only_step(&encoded), raw("set_mode_withroom", &[2, 3, 0]));
    }

    #[test]
    fn stop_in_point_mode_clears_point() {
        let encoded = encode(&Operation::Stop, &snapshot(4, 0), Some(Point::new(150, 200)));
        assert_eq!(only_step(&encoded), raw("set_pointclean", &[0, 0, 0]));
        assert_eq!(encoded.point_update, PointUpdate::Clear);
    }

    #[test]
    fn stop_in_room_and_spot_mode() {
        for mode in [0, 1, 2, 5] {
            let encoded = encode(&Operation::Stop, &snapshot(mode, 1), Some(Point::new(1, 1)));
            assert_eq!(only_step(&encoded), raw("set_mode", &[0]));
            assert_eq!(encoded.point_update, PointUpdate::Keep);
        }
    }

    #[test]
    fn mode_dependent_operations_need_a_snapshot() {
        for op in [Operation::Start, Operation::Pause, Operation::Stop] {
            let err = ModeAwareEncoder
                .encode(&op, &EncodeContext::new(None, Some(Point::new(1, 1))))
                .unwrap_err();
            assert!(matches!(
                err,
                Error::Device(DeviceError::NoSnapshot { operation }) if operation == op.name()
            ));
        }
    }

    #[test]
    fn mode_independent_operations_work_without_snapshot() {
        let ctx = EncodeContext::default();
        for op in [
            Operation::ReturnToBase,
            Operation::Locate,
            Operation::SetFanSpeed(1),
            Operation::CleanPoint(Point::new(1, 2)),
            Operation::CleanZone {
                zones: vec![Zone::new(0, 0, 1, 1)],
                repeats: Repeats::ONCE,
            },
        ] {
            assert!(ModeAwareEncoder.encode(&op, &ctx).is_ok(), "{}", op.name());
        }
    }

    #[test]
    fn clean_zone_sequence() {
        let op = Operation::CleanZone {
            zones: vec![Zone::new(0, 0, 100, 100)],
            repeats: Repeats::clamped(2),
        };
        let encoded = ModeAwareEncoder
            .encode(&op, &EncodeContext::default())
            .unwrap();

        assert_eq!(encoded.sequence.failure_message(), "Unable to clean zone");
        assert_eq!(
            encoded.sequence.steps(),
            [
                raw("set_uploadmap", &[1]),
                RawCommand::new(
                    "set_zone",
                    vec![
                        json!(2),
                        json!("0_0_0_0_0_100_100_100_100_0"),
                        json!("1_0_0_0_0_100_100_100_100_0"),
                    ]
                ),
                raw("set_mode", &[3, 1]),
            ]
        );
        assert_eq!(encoded.point_update, PointUpdate::Keep);
    }

    #[test]
    fn clean_point_sequence_sets_point() {
        let point = Point::new(150, 200);
        let encoded = ModeAwareEncoder
            .encode(&Operation::CleanPoint(point), &EncodeContext::default())
            .unwrap();

        assert_eq!(
            encoded.sequence.steps(),
            [
                raw("set_uploadmap", &[0]),
                raw("set_pointclean", &[1, 150, 200]),
            ]
        );
        assert_eq!(encoded.point_update, PointUpdate::Set(point));
        assert_eq!(encoded.sequence.steps()[1].method(), "set_pointclean");
    }
}
