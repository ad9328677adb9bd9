// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen

use status_led_core::{PinConfig, Timestamp};

// ============================================================================
// Status-LED Konfiguration
// ============================================================================

/// Anzahl der Status-LEDs (Größe der FixedRegistry)
pub const LED_COUNT: usize = 2;

/// GPIO für die Status-LED (Push-Pull, leuchtet bei HIGH)
pub const STATUS_LED_GPIO: u8 = 4;

/// GPIO für die Activity-LED (Open-Drain, leuchtet bei LOW)
pub const ACTIVITY_LED_GPIO: u8 = 5;

/// Pin-Konfiguration der Status-LED
/// `pin` ist der Index in das Output-Array des GpioLedDriver
pub static STATUS_LED_PIN: PinConfig<()> = PinConfig::new((), 0);

/// Pin-Konfiguration der Activity-LED
pub static ACTIVITY_LED_PIN: PinConfig<()> = PinConfig::new((), 1);

// IDLE_TIME_MS und BUTTON_DEBOUNCE_MS generiert build.rs
// Überschreibbar in .env über STATUS_LED_IDLE_MS / STATUS_LED_BUTTON_DEBOUNCE_MS
include!(concat!(env!("OUT_DIR"), "/led_timing.rs"));

// ============================================================================
// Boot-Button Konfiguration
// ============================================================================

/// GPIO des BOOT-Buttons auf dem ESP32-C6 DevKit
pub const BUTTON_GPIO: u8 = 9;
