// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property snapshot built from a positional `get_prop` response.

use serde_json::{Map, Value};

use crate::error::ParseError;

/// Property names queried by `get_prop`, in wire order.
///
/// The response is matched by position, so this order is part of the
/// protocol. `battary_life` is spelled the way the firmware spells it.
pub const ALL_PROPS: [&str; 14] = [
    "run_state",
    "mode",
    "err_state",
    "battary_life",
    "box_type",
    "mop_type",
    "s_time",
    "s_area",
    "suction_grade",
    "water_grade",
    "remember_map",
    "has_map",
    "is_mop",
    "has_newmap",
];

/// One property of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Run state code.
    RunState,
    /// Cleaning mode.
    Mode,
    /// Error code.
    ErrState,
    /// Battery percentage.
    BatteryLife,
    /// Dust box / water tank type.
    BoxType,
    /// Mop type.
    MopType,
    /// Duration of the current or last job.
    CleanTime,
    /// Area of the current or last job.
    CleanArea,
    /// Suction level.
    SuctionGrade,
    /// Water level.
    WaterGrade,
    /// Map memory enabled.
    RememberMap,
    /// A map exists.
    HasMap,
    /// Mop selector.
    IsMop,
    /// A new map is pending.
    HasNewMap,
}

impl Prop {
    /// Every property, in wire order.
    pub const ALL: [Self; 14] = [
        Self::RunState,
        Self::Mode,
        Self::ErrState,
        Self::BatteryLife,
        Self::BoxType,
        Self::MopType,
        Self::CleanTime,
        Self::CleanArea,
        Self::SuctionGrade,
        Self::WaterGrade,
        Self::RememberMap,
        Self::HasMap,
        Self::IsMop,
        Self::HasNewMap,
    ];

    /// Returns the position of this property in the `get_prop` response.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        ALL_PROPS[self.index()]
    }
}

/// One atomic read of every device property.
///
/// Snapshots are immutable; a poll replaces the cached one wholesale.
/// Values are kept as the device sent them. Only the properties commands
/// and state decoding depend on must be integers.
///
/// # Examples
///
/// ```
/// use mirobo_lib::state::{Prop, PropertySnapshot};
/// use serde_json::json;
///
/// let mut values: Vec<_> = [5, 0, 0, 97, 1, 0, 0, 0, 2, 1, 1, 1, 0, 0]
///     .iter()
///     .map(|v| json!(v))
///     .collect();
/// values[7] = json!(12.5);
/// let snapshot = PropertySnapshot::from_values(&values).unwrap();
///
/// assert_eq!(snapshot.run_state(), 5);
/// assert_eq!(snapshot.battery_life(), 97);
/// assert_eq!(snapshot.get(Prop::CleanArea), &json!(12.5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySnapshot {
    run_state: i64,
    mode: i64,
    battery_life: i64,
    suction_grade: i64,
    is_mop: i64,
    values: [Value; ALL_PROPS.len()],
}

impl PropertySnapshot {
    /// Properties that must hold an integer for a snapshot to be built.
    pub const REQUIRED: [Prop; 5] = [
        Prop::RunState,
        Prop::Mode,
        Prop::BatteryLife,
        Prop::SuctionGrade,
        Prop::IsMop,
    ];

    /// Creates a snapshot from integer values in wire order.
    #[must_use]
    pub fn new(values: [i64; ALL_PROPS.len()]) -> Self {
        Self {
            run_state: values[Prop::RunState.index()],
            mode: values[Prop::Mode.index()],
            battery_life: values[Prop::BatteryLife.index()],
            suction_grade: values[Prop::SuctionGrade.index()],
            is_mop: values[Prop::IsMop.index()],
            values: values.map(Value::from),
        }
    }

    /// Builds a snapshot positionally: value *i* belongs to `ALL_PROPS[i]`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::WrongArity` if the count does not match
    /// `ALL_PROPS`, or `ParseError::InvalidValue` if one of
    /// [`Self::REQUIRED`] is not an integer.
    pub fn from_values(values: &[Value]) -> Result<Self, ParseError> {
        let values: [Value; ALL_PROPS.len()] =
            values
                .to_vec()
                .try_into()
                .map_err(|values: Vec<Value>| ParseError::WrongArity {
                    expected: ALL_PROPS.len(),
                    actual: values.len(),
                })?;

        let integer = |prop: Prop| parse_integer(prop.name(), &values[prop.index()]);
        Ok(Self {
            run_state: integer(Prop::RunState)?,
            mode: integer(Prop::Mode)?,
            battery_life: integer(Prop::BatteryLife)?,
            suction_grade: integer(Prop::SuctionGrade)?,
            is_mop: integer(Prop::IsMop)?,
            values,
        })
    }

    /// Returns one property as reported.
    #[must_use]
    pub fn get(&self, prop: Prop) -> &Value {
        &self.values[prop.index()]
    }

    /// Returns one property as an integer, if it holds one.
    #[must_use]
    pub fn integer(&self, prop: Prop) -> Option<i64> {
        parse_integer(prop.name(), self.get(prop)).ok()
    }

    /// Returns the run state code.
    #[must_use]
    pub const fn run_state(&self) -> i64 {
        self.run_state
    }

    /// Returns the cleaning mode.
    #[must_use]
    pub const fn mode(&self) -> i64 {
        self.mode
    }

    /// Returns the mop selector.
    #[must_use]
    pub const fn is_mop(&self) -> i64 {
        self.is_mop
    }

    /// Returns the battery percentage.
    #[must_use]
    pub const fn battery_life(&self) -> i64 {
        self.battery_life
    }

    /// Returns the suction level.
    #[must_use]
    pub const fn suction_grade(&self) -> i64 {
        self.suction_grade
    }

    /// Iterates `(wire name, value)` pairs in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        ALL_PROPS.iter().copied().zip(self.values.iter())
    }

    /// Returns the properties as a JSON object keyed by wire name.
    #[must_use]
    pub fn to_json_map(&self) -> Map<String, Value> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }
}

fn parse_integer(field: &str, value: &Value) -> Result<i64, ParseError> {
    let invalid = |message: String| ParseError::InvalidValue {
        field: field.to_string(),
        message,
    };

    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            match number.as_f64() {
                // Integral floats only; the conversion below is exact for them.
                #[allow(clippy::cast_possible_truncation)]
                Some(float) if float.fract() == 0.0 && float.abs() < 9.0e15 => Ok(float as i64),
                _ => Err(invalid(format!("{number} is not an integer"))),
            }
        }
        Value::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid(format!("{text:?}: {e}"))),
        other => Err(invalid(format!("unexpected value {other}"))),
    }
}
