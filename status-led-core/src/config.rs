//! Engine-Konfiguration
//!
//! Die Kapazität wird über die Wahl der Registry festgelegt
//! (`FixedRegistry<_, _, N>` oder `LinkedRegistry`), hier steht nur,
//! was die Engine selbst braucht.

use crate::types::Timestamp;

/// Rückgabewert von `poll()` wenn keine LED geschaltet werden muss (ms)
pub const DEFAULT_IDLE_TIME: Timestamp = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Maximale Wartezeit bis zum nächsten `poll()` im Leerlauf
    pub idle_time: Timestamp,
}

impl EngineConfig {
    pub const fn new() -> Self {
        Self {
            idle_time: DEFAULT_IDLE_TIME,
        }
    }

    pub const fn with_idle_time(mut self, idle_time: Timestamp) -> Self {
        self.idle_time = idle_time;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
