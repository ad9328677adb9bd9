//! Registry als verkettete Liste (unbegrenzte Anzahl LEDs)
//!
//! Die Knoten liegen in einem `Vec`, jeder registrierte Knoten zeigt auf den
//! zuvor registrierten. Der Kopf ist immer die zuletzt hinzugefügte LED,
//! `for_each_mut` läuft also von neu nach alt.

use alloc::vec::Vec;

use crate::led::StatusLed;
use crate::registry::{LedRegistry, same_config};
use crate::traits::{StatusLedError, StatusLedResult};
use crate::types::{LedHandle, PinConfig};

struct Node<'a, IO> {
    led: StatusLed<'a, IO>,
    previous: Option<usize>,
    linked: bool,
    /// Handle ist ausgegeben, aber noch nicht per `attach()` registriert
    reserved: bool,
}

/// Registry ohne feste Obergrenze
pub struct LinkedRegistry<'a, IO> {
    nodes: Vec<Node<'a, IO>>,
    head: Option<usize>,
}

impl<'a, IO> LinkedRegistry<'a, IO> {
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
        }
    }

    /// Übernimmt eine vorbereitete LED (z.B. mit Callback oder Polarität)
    ///
    /// Die LED ist danach noch nicht registriert, dafür `attach()` aufrufen.
    /// Bis dahin ist der Knoten reserviert und wird von `allocate()` nicht
    /// vergeben.
    pub fn insert(&mut self, mut led: StatusLed<'a, IO>) -> LedHandle {
        led.unbind();
        self.nodes.push(Node {
            led,
            previous: None,
            linked: false,
            reserved: true,
        });
        LedHandle::new(self.nodes.len() - 1)
    }

    /// Indizes der Kette, vom Kopf aus
    fn chain(&self) -> impl Iterator<Item = usize> + '_ {
        core::iter::successors(self.head, |&index| {
            self.nodes.get(index).and_then(|node| node.previous)
        })
    }

    fn unlink(&mut self, index: usize) -> bool {
        let Some(node) = self.nodes.get(index) else {
            return false;
        };
        if !node.linked {
            return false;
        }
        let previous = node.previous;

        if self.head == Some(index) {
            self.head = previous;
        } else {
            let Some(newer) = self
                .chain()
                .find(|&i| self.nodes[i].previous == Some(index))
            else {
                return false;
            };
            self.nodes[newer].previous = previous;
        }

        let node = &mut self.nodes[index];
        node.previous = None;
        node.linked = false;
        true
    }
}

impl<IO> Default for LinkedRegistry<'_, IO> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, IO> LedRegistry<'a, IO> for LinkedRegistry<'a, IO> {
    fn allocate(&mut self) -> StatusLedResult<LedHandle> {
        let free = self
            .nodes
            .iter()
            .position(|node| !node.linked && !node.reserved);
        Ok(match free {
            Some(index) => {
                self.nodes[index].reserved = true;
                LedHandle::new(index)
            }
            None => self.insert(StatusLed::new()),
        })
    }

    fn attach(&mut self, handle: LedHandle, config: &'a PinConfig<IO>) -> StatusLedResult<()> {
        let index = handle.index();
        if index >= self.nodes.len() {
            return Err(StatusLedError::NullEntry);
        }
        // Erneutes Registrieren: erst aus der Kette lösen, sonst entsteht ein Zyklus
        self.unlink(index);

        let head = self.head;
        let node = &mut self.nodes[index];
        node.led.bind(config);
        node.previous = head;
        node.linked = true;
        node.reserved = false;
        self.head = Some(index);
        Ok(())
    }

    fn detach(&mut self, handle: LedHandle) -> StatusLedResult<&'a PinConfig<IO>> {
        let index = handle.index();
        if !self.unlink(index) {
            return Err(StatusLedError::NotFound);
        }
        self.nodes[index]
            .led
            .unbind()
            .ok_or(StatusLedError::NotFound)
    }

    fn find(&self, config: &PinConfig<IO>) -> Option<LedHandle> {
        self.chain()
            .find(|&index| same_config(self.nodes[index].led.config(), config))
            .map(LedHandle::new)
    }

    fn get(&self, handle: LedHandle) -> Option<&StatusLed<'a, IO>> {
        self.nodes.get(handle.index()).map(|node| &node.led)
    }

    fn get_mut(&mut self, handle: LedHandle) -> Option<&mut StatusLed<'a, IO>> {
        self.nodes.get_mut(handle.index()).map(|node| &mut node.led)
    }

    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut StatusLed<'a, IO>),
    {
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let Some(node) = self.nodes.get_mut(index) else {
                break;
            };
            cursor = node.previous;
            f(&mut node.led);
        }
    }

    fn len(&self) -> usize {
        self.chain().count()
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}
