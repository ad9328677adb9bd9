//! Registry mit fester Anzahl Slots
//!
//! Alle LEDs liegen in einem Array, Mitgliedschaft über das
//! `registered`-Flag. Kein Heap nötig.

use crate::led::StatusLed;
use crate::registry::{LedRegistry, same_config};
use crate::traits::{StatusLedError, StatusLedResult};
use crate::types::{LedHandle, PinConfig};

/// Registry mit `N` vorab angelegten LEDs
pub struct FixedRegistry<'a, IO, const N: usize> {
    slots: [StatusLed<'a, IO>; N],
}

impl<'a, IO, const N: usize> FixedRegistry<'a, IO, N> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| StatusLed::new()),
        }
    }
}

impl<IO, const N: usize> Default for FixedRegistry<'_, IO, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, IO, const N: usize> LedRegistry<'a, IO> for FixedRegistry<'a, IO, N> {
    fn allocate(&mut self) -> StatusLedResult<LedHandle> {
        self.slots
            .iter()
            .position(|led| !led.is_registered())
            .map(LedHandle::new)
            .ok_or(StatusLedError::NoSpace)
    }

    fn attach(&mut self, handle: LedHandle, config: &'a PinConfig<IO>) -> StatusLedResult<()> {
        let led = self
            .slots
            .get_mut(handle.index())
            .ok_or(StatusLedError::NullEntry)?;
        led.bind(config);
        Ok(())
    }

    fn detach(&mut self, handle: LedHandle) -> StatusLedResult<&'a PinConfig<IO>> {
        match self.slots.get_mut(handle.index()) {
            Some(led) if led.is_registered() => led.unbind().ok_or(StatusLedError::NotFound),
            _ => Err(StatusLedError::NotFound),
        }
    }

    fn find(&self, config: &PinConfig<IO>) -> Option<LedHandle> {
        self.slots
            .iter()
            .position(|led| led.is_registered() && same_config(led.config(), config))
            .map(LedHandle::new)
    }

    fn get(&self, handle: LedHandle) -> Option<&StatusLed<'a, IO>> {
        self.slots.get(handle.index())
    }

    fn get_mut(&mut self, handle: LedHandle) -> Option<&mut StatusLed<'a, IO>> {
        self.slots.get_mut(handle.index())
    }

    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut StatusLed<'a, IO>),
    {
        self.slots
            .iter_mut()
            .filter(|led| led.is_registered())
            .for_each(|led| f(led));
    }

    fn len(&self) -> usize {
        self.slots.iter().filter(|led| led.is_registered()).count()
    }

    fn capacity(&self) -> Option<usize> {
        Some(N)
    }
}
