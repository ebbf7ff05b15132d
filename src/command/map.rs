// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Map commands used by zone and point cleaning.

use serde_json::{Value, json};

use crate::command::Command;
use crate::types::{Repeats, Zone};

/// `set_uploadmap` command.
///
/// Zone cleaning enables map upload first; point cleaning disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMapCommand {
    /// `set_uploadmap [1]`.
    Enable,
    /// `set_uploadmap [0]`.
    Disable,
}

impl Command for UploadMapCommand {
    fn method(&self) -> &str {
        "set_uploadmap"
    }

    fn params(&self) -> Vec<Value> {
        match self {
            Self::Enable => vec![json!(1)],
            Self::Disable => vec![json!(0)],
        }
    }
}

/// `set_zone` command describing a rectangle cleaning job.
///
/// Each zone is emitted once per repeat. Every entry is
/// `<index>_0_<x1>_<y1>_<x1>_<y2>_<x2>_<y2>_<x2>_<y1>`, where the index runs
/// from zero across all entries. The entry count leads the parameter list.
///
/// # Examples
///
/// ```
/// use mirobo_lib::command::{Command, ZoneCommand};
/// use mirobo_lib::types::{Repeats, Zone};
/// use serde_json::json;
///
/// let cmd = ZoneCommand::new(&[Zone::new(0, 0, 100, 100)], Repeats::clamped(2));
/// assert_eq!(
///     cmd.params(),
///     vec![
///         json!(2),
///         json!("0_0_0_0_0_100_100_100_100_0"),
///         json!("1_0_0_0_0_100_100_100_100_0"),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneCommand {
    entries: Vec<String>,
}

impl ZoneCommand {
    /// Encodes zones, each repeated `repeats` times.
    #[must_use]
    pub fn new(zones: &[Zone], repeats: Repeats) -> Self {
        let entries = zones
            .iter()
            .flat_map(|zone| std::iter::repeat_n(zone, usize::from(repeats.value())))
            .enumerate()
            .map(|(index, zone)| encode_entry(index, zone))
            .collect();
        Self { entries }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the encoded entries.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

fn encode_entry(index: usize, zone: &Zone) -> String {
    let mut fields = vec![index.to_string(), "0".to_string()];
    fields.extend(zone.corners().iter().map(ToString::to_string));
    fields.join("_")
}

impl Command for ZoneCommand {
    fn method(&self) -> &str {
        "set_zone"
    }

    fn params(&self) -> Vec<Value> {
        std::iter::once(json!(self.count()))
            .chain(self.entries.iter().map(|entry| json!(entry)))
            .collect()
    }
}
