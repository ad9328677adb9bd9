// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von status-led-core
pub use status_led_core::{
    ActiveLevel, Cycle, FixedRegistry, LedDriver, LedHandle, Pattern, RepeatMode, StatusLeds,
    patterns,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

// ============================================================================
// System-Status und LED-Kommandos
// ============================================================================

/// Systemzustand, der über die Status-LED angezeigt wird
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum SystemStatus {
    Booting,
    Running,
    Busy,
    Fault,
}

impl SystemStatus {
    /// Blink-Pattern für diesen Zustand
    pub fn pattern(self) -> &'static Pattern {
        match self {
            SystemStatus::Booting => &patterns::BLINK_FAST,
            SystemStatus::Running => &patterns::HEARTBEAT,
            SystemStatus::Busy => &patterns::BLINK_SLOW,
            SystemStatus::Fault => &patterns::SOS,
        }
    }

    /// Nächster Zustand beim Durchschalten per Button
    pub fn next(self) -> Self {
        match self {
            SystemStatus::Booting => SystemStatus::Running,
            SystemStatus::Running => SystemStatus::Busy,
            SystemStatus::Busy => SystemStatus::Fault,
            SystemStatus::Fault => SystemStatus::Running,
        }
    }
}

/// Kommando an den Status-LED Task
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LedCommand {
    /// Status-LED auf das Pattern des Zustands setzen
    SetStatus(SystemStatus),
    /// Activity-LED einmalig blitzen lassen
    Identify,
}

static IDENTIFY_CYCLES: [Cycle; 4] = [
    Cycle::new(100, 150),
    Cycle::new(100, 150),
    Cycle::new(100, 150),
    // Letzte An-Phase wird nie gezeigt: der Task gibt den Pin beim Ende frei
    Cycle::new(100, 0),
];

/// Drei kurze Blitze auf der Activity-LED
pub static IDENTIFY: Pattern = Pattern::new(&IDENTIFY_CYCLES);

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================

/// Channel für LED-Kommandos (Button/Main → Status-LED Task)
/// - 4: Nachrichten-Kapazität
pub type LedCommandChannel = Channel<NoopRawMutex, LedCommand, 4>;

/// Sender für LED-Kommandos
pub type LedCommandSender = Sender<'static, NoopRawMutex, LedCommand, 4>;

/// Receiver für LED-Kommandos (Status-LED Task empfängt)
pub type LedCommandReceiver = Receiver<'static, NoopRawMutex, LedCommand, 4>;
