//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use core::fmt;

use crate::types::{PinConfig, PinLevel, Timestamp};

/// Fehler-Typ für Registry-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusLedError {
    /// Kein freier Slot mehr in der Registry
    NoSpace,
    /// Ungültiges bzw. leeres LED-Handle
    NullEntry,
    /// LED ist nicht registriert
    NotFound,
}

impl fmt::Display for StatusLedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLedError::NoSpace => f.write_str("no free led slot"),
            StatusLedError::NullEntry => f.write_str("invalid led handle"),
            StatusLedError::NotFound => f.write_str("led not registered"),
        }
    }
}

pub type StatusLedResult<T> = Result<T, StatusLedError>;

/// Trait für Zeitbasis und Pin-Zugriff
///
/// # Implementierungen
/// - **Production:** GpioLedDriver (ESP32 GPIO + embassy-time)
/// - **Testing:** MockDriver (in-memory Mock)
///
/// `init_pin` und `deinit_pin` sind optional; die Default-Implementierung
/// macht nichts.
pub trait LedDriver {
    /// Port-/Peripherie-Typ aus der [`PinConfig`]
    type Io;

    /// Aktuelle Systemzeit in Millisekunden, darf nie rückwärts laufen
    fn timestamp(&mut self) -> Timestamp;

    /// Setzt den Pegel am Pin
    ///
    /// Kein Rückgabewert: Schreibfehler behandelt der Driver selbst.
    fn write_pin(&mut self, config: &PinConfig<Self::Io>, level: PinLevel);

    /// Pin als Ausgang konfigurieren, wird bei `add()` aufgerufen
    fn init_pin(&mut self, _config: &PinConfig<Self::Io>) {}

    /// Pin zurücksetzen, wird bei `remove()` aufgerufen
    fn deinit_pin(&mut self, _config: &PinConfig<Self::Io>) {}
}

impl<D: LedDriver + ?Sized> LedDriver for &mut D {
    type Io = D::Io;

    fn timestamp(&mut self) -> Timestamp {
        (**self).timestamp()
    }

    fn write_pin(&mut self, config: &PinConfig<Self::Io>, level: PinLevel) {
        (**self).write_pin(config, level)
    }

    fn init_pin(&mut self, config: &PinConfig<Self::Io>) {
        (**self).init_pin(config)
    }

    fn deinit_pin(&mut self, config: &PinConfig<Self::Io>) {
        (**self).deinit_pin(config)
    }
}
