//! Core Types für die Status-LED Engine
//!
//! Datenstrukturen ohne Hardware-Dependencies: Pin-Konfiguration,
//! Zustände, Pegel und die unveränderlichen Blink-Patterns.

/// Systemzeit in Millisekunden (gleiche Zeitbasis wie der Driver)
///
/// 64 Bit wie `embassy_time::Instant`, läuft in der Praxis nie über.
pub type Timestamp = u64;

/// Dauer eines einzelnen An- oder Aus-Abschnitts in Millisekunden
pub type CycleTime = u16;

/// Pin-Konfiguration einer LED
///
/// Wird vom Aufrufer besessen und von der LED nur referenziert.
/// `io` ist das Port-/Peripherie-Handle, `pin` die Pin-Nummer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinConfig<IO> {
    pub io: IO,
    pub pin: u16,
}

impl<IO> PinConfig<IO> {
    pub const fn new(io: IO, pin: u16) -> Self {
        Self { io, pin }
    }
}

/// Logischer Zustand einer LED (unabhängig von der Verdrahtung)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedState {
    Active,
    Inactive,
}

impl LedState {
    /// Liefert den jeweils anderen Zustand
    pub const fn toggled(self) -> Self {
        match self {
            LedState::Active => LedState::Inactive,
            LedState::Inactive => LedState::Active,
        }
    }

    pub const fn is_active(self) -> bool {
        matches!(self, LedState::Active)
    }
}

/// Elektrischer Pegel am Pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinLevel {
    Low,
    High,
}

impl PinLevel {
    pub const fn from_bool(high: bool) -> Self {
        if high { PinLevel::High } else { PinLevel::Low }
    }

    pub const fn is_high(self) -> bool {
        matches!(self, PinLevel::High)
    }
}

impl core::ops::Not for PinLevel {
    type Output = PinLevel;

    fn not(self) -> Self::Output {
        match self {
            PinLevel::Low => PinLevel::High,
            PinLevel::High => PinLevel::Low,
        }
    }
}

/// Verdrahtung der LED
///
/// - **Low:** Open-Drain LEDs, leuchten bei LOW
/// - **High:** Push-Pull LEDs, leuchten bei HIGH
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActiveLevel {
    Low,
    #[default]
    High,
}

impl ActiveLevel {
    /// Übersetzt den logischen Zustand in den Pin-Pegel
    ///
    /// Die Invertierung passiert nur hier, an der Grenze zur Hardware.
    pub const fn level_for(self, state: LedState) -> PinLevel {
        let active_high = matches!(self, ActiveLevel::High);
        PinLevel::from_bool(state.is_active() == active_high)
    }
}

/// Verhalten am Ende eines Patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RepeatMode {
    /// Einmal abspielen, danach bleibt die LED stehen bis `reset()`
    Off,
    /// Pattern läuft endlos
    #[default]
    On,
}

/// Ein einzelner Aus/An-Schritt eines Patterns
///
/// `off` ist die Haltezeit nach dem Wechsel nach [`LedState::Inactive`],
/// `on` die Haltezeit nach dem Wechsel nach [`LedState::Active`].
///
/// # Beispiele
///
/// ```
/// # use status_led_core::{Cycle, LedState};
/// let cycle = Cycle::new(200, 100);
/// assert_eq!(cycle.hold_time(LedState::Inactive), 200);
/// assert_eq!(cycle.hold_time(LedState::Active), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cycle {
    pub off: CycleTime,
    pub on: CycleTime,
}

impl Cycle {
    pub const fn new(off: CycleTime, on: CycleTime) -> Self {
        Self { off, on }
    }

    /// Wie lange der gerade betretene Zustand gehalten wird
    pub const fn hold_time(&self, entered: LedState) -> CycleTime {
        match entered {
            LedState::Active => self.on,
            LedState::Inactive => self.off,
        }
    }

    /// Gesamtdauer des Schritts (aus + an)
    pub const fn period(&self) -> u32 {
        self.off as u32 + self.on as u32
    }
}

/// Unveränderliches Blink-Pattern
///
/// Wird als `static` definiert und von beliebig vielen LEDs geteilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pattern {
    pub cycles: &'static [Cycle],
}

impl Pattern {
    pub const fn new(cycles: &'static [Cycle]) -> Self {
        Self { cycles }
    }

    pub const fn len(&self) -> usize {
        self.cycles.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn cycle(&self, index: usize) -> Option<&Cycle> {
        self.cycles.get(index)
    }

    /// Dauer eines kompletten Durchlaufs
    pub fn period(&self) -> u32 {
        self.cycles.iter().map(Cycle::period).sum()
    }
}

/// Handle auf einen Registry-Slot
///
/// [`LedHandle::NULL`] entspricht der "keine LED" Markierung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedHandle(usize);

impl LedHandle {
    pub const NULL: LedHandle = LedHandle(usize::MAX);

    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == usize::MAX
    }
}
