// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic value storage and change notification.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::{Characteristic, CharacteristicValue};
use crate::types::{Hue, Percent, UiColorTemperature};

/// Unique identifier for a subscription.
///
/// Returned when registering a callback and used to unsubscribe later.
/// IDs are unique within a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type ValueCallback = Arc<dyn Fn(CharacteristicValue) + Send + Sync>;

/// Last known value of every characteristic. `None` until first set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacteristicValues {
    /// Power on/off.
    pub on: Option<bool>,
    /// Brightness level.
    pub brightness: Option<Percent>,
    /// Color temperature.
    pub color_temperature: Option<UiColorTemperature>,
    /// Hue angle.
    pub hue: Option<Hue>,
    /// Saturation level.
    pub saturation: Option<Percent>,
}

impl CharacteristicValues {
    /// Returns the current value of a characteristic, if known.
    #[must_use]
    pub fn get(&self, characteristic: Characteristic) -> Option<CharacteristicValue> {
        match characteristic {
            Characteristic::On => self.on.map(CharacteristicValue::On),
            Characteristic::Brightness => self.brightness.map(CharacteristicValue::Brightness),
            Characteristic::ColorTemperature => self
                .color_temperature
                .map(CharacteristicValue::ColorTemperature),
            Characteristic::Hue => self.hue.map(CharacteristicValue::Hue),
            Characteristic::Saturation => self.saturation.map(CharacteristicValue::Saturation),
        }
    }

    /// Stores a value. Returns `true` if it differs from the previous one.
    pub fn set(&mut self, value: CharacteristicValue) -> bool {
        fn replace<T: PartialEq>(slot: &mut Option<T>, value: T) -> bool {
            let changed = slot.as_ref() != Some(&value);
            *slot = Some(value);
            changed
        }

        match value {
            CharacteristicValue::On(on) => replace(&mut self.on, on),
            CharacteristicValue::Brightness(level) => replace(&mut self.brightness, level),
            CharacteristicValue::ColorTemperature(ct) => replace(&mut self.color_temperature, ct),
            CharacteristicValue::Hue(hue) => replace(&mut self.hue, hue),
            CharacteristicValue::Saturation(level) => replace(&mut self.saturation, level),
        }
    }
}

/// The accessory's characteristic bus.
///
/// Holds the current value of every characteristic and notifies subscribers
/// when the device side pushes a new value through
/// [`update_value`](Self::update_value). Values acknowledged from a UI write
/// are recorded with [`commit`](Self::commit), which does not notify since
/// the UI already knows the value it wrote.
///
/// # Thread Safety
///
/// Interior mutability via `parking_lot::RwLock`. Callbacks are invoked
/// synchronously with the callback map read-locked, so a callback must not
/// subscribe or unsubscribe on the same store.
pub struct CharacteristicStore {
    next_id: AtomicU64,
    values: RwLock<CharacteristicValues>,
    callbacks: RwLock<HashMap<SubscriptionId, ValueCallback>>,
}

impl CharacteristicStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            values: RwLock::new(CharacteristicValues::default()),
            callbacks: RwLock::new(HashMap::new()),
        }
    }

    /// Returns a snapshot of all current values.
    #[must_use]
    pub fn values(&self) -> CharacteristicValues {
        *self.values.read()
    }

    /// Returns the current value of one characteristic, if known.
    #[must_use]
    pub fn get(&self, characteristic: Characteristic) -> Option<CharacteristicValue> {
        self.values.read().get(characteristic)
    }

    /// Pushes a device-originated value to the UI.
    ///
    /// Subscribers are notified only when the value actually changed.
    /// Returns `true` if it changed.
    pub fn update_value(&self, value: CharacteristicValue) -> bool {
        let changed = self.values.write().set(value);
        if changed {
            tracing::trace!(%value, "Characteristic updated");
            let callbacks = self.callbacks.read();
            for callback in callbacks.values() {
                callback(value);
            }
        }
        changed
    }

    /// Records a UI-originated value after the device accepted it.
    pub fn commit(&self, value: CharacteristicValue) {
        self.values.write().set(value);
    }

    /// Registers a callback for device-originated value changes.
    pub fn on_value_changed<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(CharacteristicValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.write().insert(id, Arc::new(callback));
        id
    }

    /// Unregisters a callback by its subscription ID.
    ///
    /// Returns `true` if a callback was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.write().remove(&id).is_some()
    }

    /// Returns the number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.callbacks.read().len()
    }
}

impl Default for CharacteristicStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CharacteristicStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacteristicStore")
            .field("values", &self.values())
            .field("callback_count", &self.callback_count())
            .finish()
    }
}
