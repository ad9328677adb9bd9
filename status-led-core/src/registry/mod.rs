//! Registry: Speicher für alle registrierten LEDs
//!
//! Zwei austauschbare Strategien hinter einem Trait:
//! - [`FixedRegistry`]: festes Array mit `N` Slots, kein Heap
//! - [`LinkedRegistry`]: verkettete Liste, unbegrenzte Anzahl (feature `alloc`)
//!
//! Die Registry kümmert sich nur um Mitgliedschaft. Pin-Init/-Deinit über
//! den Driver erledigt die Engine.

use crate::led::StatusLed;
use crate::traits::StatusLedResult;
use crate::types::{LedHandle, PinConfig};

pub mod fixed;
#[cfg(feature = "alloc")]
pub mod linked;

pub use fixed::FixedRegistry;
#[cfg(feature = "alloc")]
pub use linked::LinkedRegistry;

/// Gemeinsame Schnittstelle beider Speicher-Strategien
pub trait LedRegistry<'a, IO> {
    /// Liefert einen freien (unregistrierten) Slot
    ///
    /// # Fehlerbehandlung
    /// `StatusLedError::NoSpace` wenn alle Slots belegt sind
    fn allocate(&mut self) -> StatusLedResult<LedHandle>;

    /// Registriert die LED hinter `handle` und bindet die Pin-Konfiguration
    ///
    /// Doppelte Pin-Konfigurationen werden nicht geprüft.
    ///
    /// # Fehlerbehandlung
    /// `StatusLedError::NullEntry` wenn das Handle auf keinen Slot zeigt
    fn attach(&mut self, handle: LedHandle, config: &'a PinConfig<IO>) -> StatusLedResult<()>;

    /// Meldet die LED ab und gibt ihre Pin-Konfiguration zurück
    ///
    /// # Fehlerbehandlung
    /// `StatusLedError::NotFound` wenn die LED nicht registriert ist
    fn detach(&mut self, handle: LedHandle) -> StatusLedResult<&'a PinConfig<IO>>;

    /// Sucht die erste registrierte LED mit genau dieser Pin-Konfiguration
    ///
    /// Verglichen wird die Referenz, nicht der Inhalt.
    fn find(&self, config: &PinConfig<IO>) -> Option<LedHandle>;

    fn get(&self, handle: LedHandle) -> Option<&StatusLed<'a, IO>>;

    fn get_mut(&mut self, handle: LedHandle) -> Option<&mut StatusLed<'a, IO>>;

    /// Besucht alle registrierten LEDs in Registry-Reihenfolge
    fn for_each_mut<F>(&mut self, f: F)
    where
        F: FnMut(&mut StatusLed<'a, IO>);

    /// Anzahl registrierter LEDs
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximale Anzahl LEDs, `None` für unbegrenzt
    fn capacity(&self) -> Option<usize>;
}

/// Identitätsvergleich zweier Pin-Konfigurationen
pub(crate) fn same_config<IO>(bound: Option<&PinConfig<IO>>, query: &PinConfig<IO>) -> bool {
    bound.is_some_and(|config| core::ptr::eq(config, query))
}
