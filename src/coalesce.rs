// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Coalescing of hue and saturation writes into one color write.
//!
//! A color pick in the UI arrives as two separate writes, hue then
//! saturation (or the reverse). The device only takes a full RGB color, so
//! the first write of a pair is parked in a [`ColorCache`] and the second
//! flushes both as one color.
//!
//! # Transitions
//!
//! | State   | Event                    | Next    | Effect                                   |
//! |---------|--------------------------|---------|------------------------------------------|
//! | `Idle`  | hue or saturation write  | `Armed` | cache field updated, no remote write     |
//! | `Armed` | hue or saturation write  | `Idle`  | cache field updated, flush cached color  |
//! | any     | remote color report      | `Idle`  | whole cache overwritten                  |
//! | any     | failed flush             | same    | flushing field restored if not rewritten |
//!
//! Each cache field carries a write generation. A failed flush only restores
//! its field while the generation still matches, so a newer write of the
//! same value is never undone.
//!
//! From `Armed` any color write flushes, whichever field armed the machine.
//! The flushed color always carries a value component of 100; brightness
//! is a separate characteristic.

use std::fmt;

use crate::types::{HsvColor, Hue, Percent};

/// One of the two color fields written independently by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorField {
    /// Hue.
    Hue,
    /// Saturation.
    Saturation,
}

impl fmt::Display for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hue => f.write_str("hue"),
            Self::Saturation => f.write_str("saturation"),
        }
    }
}

/// A single UI color write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorUpdate {
    /// New hue.
    Hue(Hue),
    /// New saturation.
    Saturation(Percent),
}

impl ColorUpdate {
    /// Returns the field this update writes.
    #[must_use]
    pub const fn field(&self) -> ColorField {
        match self {
            Self::Hue(_) => ColorField::Hue,
            Self::Saturation(_) => ColorField::Saturation,
        }
    }
}

/// State of the coalescing machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoalesceState {
    /// No half-written color is pending.
    #[default]
    Idle,
    /// One half of a color pick has been cached and the next write flushes.
    Armed {
        /// The field whose write armed the machine.
        by: ColorField,
    },
}

/// Last known color components.
///
/// `brightness` is the value component decoded from the last remote color
/// report; it is informational and not used when flushing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorCache {
    /// Last known hue.
    pub hue: Hue,
    /// Last known saturation.
    pub saturation: Percent,
    /// Value component of the last remote color report.
    pub brightness: Percent,
}

/// Handle for undoing the cache change of one flushing write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertTicket {
    restore: ColorUpdate,
    generation: u64,
}

impl RevertTicket {
    /// Returns the field the flushing write changed.
    #[must_use]
    pub const fn field(&self) -> ColorField {
        self.restore.field()
    }

    /// Returns the value the field goes back to on revert.
    #[must_use]
    pub const fn restore(&self) -> ColorUpdate {
        self.restore
    }
}

/// What the caller must do after recording a color write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoalesceOutcome {
    /// Nothing to send; acknowledge the write immediately.
    Deferred,
    /// Send `color` to the device and acknowledge once it settles.
    Flush {
        /// The combined color to write.
        color: HsvColor,
        /// Pass to [`ColorCoalescer::revert`] if the write fails.
        ticket: RevertTicket,
    },
}

/// The cache plus the state machine driving it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorCoalescer {
    cache: ColorCache,
    state: CoalesceState,
    hue_generation: u64,
    saturation_generation: u64,
}

impl ColorCoalescer {
    /// Creates an idle coalescer with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached color components.
    #[must_use]
    pub const fn cache(&self) -> ColorCache {
        self.cache
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> CoalesceState {
        self.state
    }

    /// Records a UI color write and advances the machine.
    pub fn record(&mut self, update: ColorUpdate) -> CoalesceOutcome {
        let ticket = match update {
            ColorUpdate::Hue(hue) => {
                let restore = ColorUpdate::Hue(self.cache.hue);
                self.cache.hue = hue;
                self.hue_generation = self.hue_generation.wrapping_add(1);
                RevertTicket {
                    restore,
                    generation: self.hue_generation,
                }
            }
            ColorUpdate::Saturation(saturation) => {
                let restore = ColorUpdate::Saturation(self.cache.saturation);
                self.cache.saturation = saturation;
                self.saturation_generation = self.saturation_generation.wrapping_add(1);
                RevertTicket {
                    restore,
                    generation: self.saturation_generation,
                }
            }
        };

        match self.state {
            CoalesceState::Idle => {
                self.state = CoalesceState::Armed {
                    by: update.field(),
                };
                tracing::debug!(field = %update.field(), "Color write armed");
                CoalesceOutcome::Deferred
            }
            CoalesceState::Armed { by } => {
                self.state = CoalesceState::Idle;
                let color = HsvColor::new(self.cache.hue, self.cache.saturation, Percent::MAX);
                tracing::debug!(armed_by = %by, field = %update.field(), %color, "Color write flushing");
                CoalesceOutcome::Flush { color, ticket }
            }
        }
    }

    /// Overwrites the cache from a device color report and disarms.
    ///
    /// A half-written color pick is dropped so it can never be combined
    /// with components the device reported afterwards.
    pub fn apply_remote(&mut self, color: HsvColor) {
        if let CoalesceState::Armed { by } = self.state {
            tracing::debug!(armed_by = %by, "Remote color report disarmed pending write");
        }
        self.cache = ColorCache {
            hue: color.hue(),
            saturation: color.saturation(),
            brightness: color.value(),
        };
        self.hue_generation = self.hue_generation.wrapping_add(1);
        self.saturation_generation = self.saturation_generation.wrapping_add(1);
        self.state = CoalesceState::Idle;
    }

    /// Undoes the cache change of a failed flush.
    ///
    /// The written field goes back to its value before the flushing write,
    /// unless a later write or remote report touched it since. The state is
    /// left as is. Returns `true` if the field was restored.
    pub fn revert(&mut self, ticket: RevertTicket) -> bool {
        match ticket.restore {
            ColorUpdate::Hue(hue) if self.hue_generation == ticket.generation => {
                self.cache.hue = hue;
            }
            ColorUpdate::Saturation(saturation)
                if self.saturation_generation == ticket.generation =>
            {
                self.cache.saturation = saturation;
            }
            _ => {
                tracing::debug!(field = %ticket.field(), "Field rewritten since flush, keeping it");
                return false;
            }
        }
        tracing::debug!(field = %ticket.field(), "Failed flush reverted");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue(value: u16) -> ColorUpdate {
        ColorUpdate::Hue(Hue::new(value).unwrap())
    }

    fn saturation(value: u8) -> ColorUpdate {
        ColorUpdate::Saturation(Percent::new(value).unwrap())
    }

    #[test]
    fn starts_idle_and_empty() {
        let coalescer = ColorCoalescer::new();
        assert_eq!(coalescer.state(), CoalesceState::Idle);
        assert_eq!(coalescer.cache(), ColorCache::default());
    }

    #[test]
    fn first_write_arms_without_flushing() {
        let mut coalescer = ColorCoalescer::new();
        assert_eq!(coalescer.record(hue(120)), CoalesceOutcome::Deferred);
        assert_eq!(
            coalescer.state(),
            CoalesceState::Armed {
                by: ColorField::Hue
            }
        );
        assert_eq!(coalescer.cache().hue.value(), 120);
    }

    #[test]
    fn second_write_flushes_combined_color() {
        let mut coalescer = ColorCoalescer::new();
        coalescer.record(hue(120));

        let CoalesceOutcome::Flush { color, .. } = coalescer.record(saturation(50)) else {
            panic!("second write should flush");
        };
        assert_eq!(color, HsvColor::from_components(120, 50, 100).unwrap());
        assert_eq!(coalescer.state(), CoalesceState::Idle);
    }

    #[test]
    fn saturation_first_also_pairs() {
        let mut coalescer = ColorCoalescer::new();
        assert_eq!(coalescer.record(saturation(30)), CoalesceOutcome::Deferred);
        let outcome = coalescer.record(hue(240));
        assert!(matches!(
            outcome,
            CoalesceOutcome::Flush { color, .. } if color == HsvColor::from_components(240, 30, 100).unwrap()
        ));
    }

    #[test]
    fn same_field_twice_still_flushes() {
        let mut coalescer = ColorCoalescer::new();
        coalescer.record(saturation(80));
        coalescer.record(hue(10));

        coalescer.record(hue(20));
        let outcome = coalescer.record(hue(30));
        assert!(matches!(
            outcome,
            CoalesceOutcome::Flush { color, .. } if color == HsvColor::from_components(30, 80, 100).unwrap()
        ));
    }

    #[test]
    fn third_write_starts_a_new_pair() {
        let mut coalescer = ColorCoalescer::new();
        coalescer.record(hue(1));
        coalescer.record(saturation(2));
        assert_eq!(coalescer.record(hue(3)), CoalesceOutcome::Deferred);
    }

    #[test]
    fn remote_report_overwrites_and_disarms() {
        let mut coalescer = ColorCoalescer::new();
        coalescer.record(hue(120));

        coalescer.apply_remote(HsvColor::from_components(0, 100, 60).unwrap());

        assert_eq!(coalescer.state(), CoalesceState::Idle);
        assert_eq!(
            coalescer.cache(),
            ColorCache {
                hue: Hue::new(0).unwrap(),
                saturation: Percent::new(100).unwrap(),
                brightness: Percent::new(60).unwrap(),
            }
        );
        // The next write arms afresh instead of flushing the dropped hue.
        assert_eq!(coalescer.record(saturation(40)), CoalesceOutcome::Deferred);
    }

    #[test]
    fn flush_ticket_restores_prior_value() {
        let mut coalescer = ColorCoalescer::new();
        coalescer.record(hue(90));
        let before = coalescer.cache();

        let CoalesceOutcome::Flush { ticket, .. } = coalescer.record(saturation(70)) else {
            panic!("expected flush");
        };
        assert_eq!(ticket.field(), ColorField::Saturation);
        assert_eq!(ticket.restore(), ColorUpdate::Saturation(before.saturation));
    }

    #[test]
    fn revert_restores_flushing_field() {
        let mut coalescer = ColorCoalescer::new();
        coalescer.record(saturation(10));
        coalescer.record(hue(5));
        coalescer.record(hue(90));

        let CoalesceOutcome::Flush { ticket, .. } = coalescer.record(saturation(70)) else {
            panic!("expected flush");
        };
        assert!(coalescer.revert(ticket));

        assert_eq!(coalescer.cache().saturation.value(), 10);
        assert_eq!(coalescer.cache().hue.value(), 90);
        assert_eq!(coalescer.state(), CoalesceState::Idle);
    }

    #[test]
    fn revert_keeps_newer_value() {
        let mut coalescer = ColorCoalescer::new();
        coalescer.record(hue(90));
        let CoalesceOutcome::Flush { ticket, .. } = coalescer.record(saturation(70)) else {
            panic!("expected flush");
        };

        // A newer write landed while the flush was in flight.
        coalescer.record(saturation(20));
        assert!(!coalescer.revert(ticket));

        assert_eq!(coalescer.cache().saturation.value(), 20);
    }

    #[test]
    fn revert_keeps_newer_write_of_same_value() {
        let mut coalescer = ColorCoalescer::new();
        coalescer.record(hue(90));
        let CoalesceOutcome::Flush { ticket, .. } = coalescer.record(saturation(70)) else {
            panic!("expected flush");
        };

        // The same saturation is sent again before the flush fails.
        assert_eq!(coalescer.record(saturation(70)), CoalesceOutcome::Deferred);
        assert!(!coalescer.revert(ticket));
        assert_eq!(coalescer.cache().saturation.value(), 70);

        let outcome = coalescer.record(hue(200));
        assert!(matches!(
            outcome,
            CoalesceOutcome::Flush { color, .. } if color == HsvColor::from_components(200, 70, 100).unwrap()
        ));
    }

    #[test]
    fn revert_after_remote_report_keeps_reported_color() {
        let mut coalescer = ColorCoalescer::new();
        coalescer.record(hue(90));
        let CoalesceOutcome::Flush { ticket, .. } = coalescer.record(saturation(70)) else {
            panic!("expected flush");
        };

        coalescer.apply_remote(HsvColor::from_components(0, 70, 100).unwrap());
        assert!(!coalescer.revert(ticket));
        assert_eq!(coalescer.cache().saturation.value(), 70);
    }
}
