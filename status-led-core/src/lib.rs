//! Status LED Core - Blink-Patterns ohne Timer-Interrupts
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Zeitbasis und Pin-Zugriff kommen über den [`LedDriver`] Trait,
//! die Hauptschleife ruft regelmäßig [`StatusLeds::poll`] auf.

#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod config;
pub mod engine;
pub mod led;
pub mod patterns;
pub mod registry;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use config::{DEFAULT_IDLE_TIME, EngineConfig};
pub use engine::StatusLeds;
pub use led::{CompletionFn, StatusLed};
#[cfg(feature = "alloc")]
pub use registry::LinkedRegistry;
pub use registry::{FixedRegistry, LedRegistry};
pub use traits::{LedDriver, StatusLedError, StatusLedResult};
pub use types::{
    ActiveLevel, Cycle, CycleTime, LedHandle, LedState, Pattern, PinConfig, PinLevel, RepeatMode,
    Timestamp,
};
