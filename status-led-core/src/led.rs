//! Einzelne Status-LED und ihre Blink-Zustandsmaschine
//!
//! Eine [`StatusLed`] hält Zustand, nächste Schaltzeit und Position im
//! Pattern. Die Registry besitzt die LEDs, die Engine ruft `advance()` auf.

use core::fmt;

use crate::traits::LedDriver;
use crate::types::{ActiveLevel, LedState, Pattern, PinConfig, RepeatMode, Timestamp};

/// Callback am Ende eines kompletten Pattern-Durchlaufs
pub type CompletionFn<'a, IO> = fn(&mut StatusLed<'a, IO>);

/// Eine LED mit Pattern, Position und Flags
pub struct StatusLed<'a, IO> {
    config: Option<&'a PinConfig<IO>>,
    pattern: Option<&'a Pattern>,
    cursor: usize,
    deadline: Timestamp,
    state: LedState,
    active_level: ActiveLevel,
    repeat: RepeatMode,
    enabled: bool,
    registered: bool,
    user_data: usize,
    on_complete: Option<CompletionFn<'a, IO>>,
}

impl<'a, IO> StatusLed<'a, IO> {
    /// Unregistrierte LED ohne Pin und Pattern
    pub const fn new() -> Self {
        Self {
            config: None,
            pattern: None,
            cursor: 0,
            deadline: 0,
            state: LedState::Active,
            active_level: ActiveLevel::High,
            repeat: RepeatMode::On,
            enabled: false,
            registered: false,
            user_data: 0,
            on_complete: None,
        }
    }

    /// Startet das aktuelle Pattern von vorne
    ///
    /// Die nächste `poll()` schaltet die LED sofort.
    pub fn reset(&mut self) {
        self.state = LedState::Active;
        self.deadline = 0;
        self.cursor = 0;
    }

    /// Setzt ein neues Pattern und startet es von vorne
    pub fn set_pattern(&mut self, pattern: &'a Pattern) {
        self.pattern = Some(pattern);
        self.reset();
    }

    /// Entfernt das Pattern, die LED wird danach nicht mehr geschaltet
    pub fn clear_pattern(&mut self) {
        self.pattern = None;
        self.reset();
    }

    pub fn pattern(&self) -> Option<&'a Pattern> {
        self.pattern
    }

    pub fn set_config(&mut self, config: &'a PinConfig<IO>) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&'a PinConfig<IO>> {
        self.config
    }

    pub fn set_on_complete(&mut self, callback: Option<CompletionFn<'a, IO>>) {
        self.on_complete = callback;
    }

    pub fn on_complete(&self) -> Option<CompletionFn<'a, IO>> {
        self.on_complete
    }

    pub fn set_active_level(&mut self, level: ActiveLevel) {
        self.active_level = level;
    }

    pub fn active_level(&self) -> ActiveLevel {
        self.active_level
    }

    /// Deaktivierte LEDs werden von `poll()` komplett übersprungen
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Freies Benutzer-Token, wird von der Engine nie ausgewertet
    pub fn set_user_data(&mut self, data: usize) {
        self.user_data = data;
    }

    pub fn user_data(&self) -> usize {
        self.user_data
    }

    pub fn set_repeat(&mut self, repeat: RepeatMode) {
        self.repeat = repeat;
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn state(&self) -> LedState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn deadline(&self) -> Timestamp {
        self.deadline
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// `true` wenn ein einmaliges Pattern abgelaufen ist
    pub fn is_finished(&self) -> bool {
        self.pattern.is_some_and(|p| self.cursor >= p.len())
    }

    /// Zustand beim Registrieren: Pin binden, Pattern löschen, aktivieren
    ///
    /// Polarität, Repeat-Mode, Callback und User-Data bleiben erhalten.
    pub(crate) fn bind(&mut self, config: &'a PinConfig<IO>) {
        self.pattern = None;
        self.reset();
        self.config = Some(config);
        self.registered = true;
        self.enabled = true;
    }

    pub(crate) fn unbind(&mut self) -> Option<&'a PinConfig<IO>> {
        self.registered = false;
        self.enabled = false;
        self.config
    }

    /// Nächste Schaltzeit, falls die LED noch geschaltet werden muss
    pub(crate) fn pending_deadline(&self) -> Option<Timestamp> {
        let pattern = self.pattern?;
        if !self.registered || !self.enabled || self.config.is_none() {
            return None;
        }
        (self.cursor < pattern.len()).then_some(self.deadline)
    }

    /// Schaltet die LED, falls sie fällig ist
    ///
    /// Gibt die nächste Schaltzeit zurück oder `None`, wenn die LED
    /// nichts mehr zu tun hat (deaktiviert, kein Pattern, abgelaufen).
    pub(crate) fn advance<D>(&mut self, now: Timestamp, driver: &mut D) -> Option<Timestamp>
    where
        D: LedDriver<Io = IO>,
    {
        let deadline = self.pending_deadline()?;
        if now < deadline {
            return Some(deadline);
        }
        let (Some(pattern), Some(config)) = (self.pattern, self.config) else {
            return None;
        };
        let cycle = *pattern.cycle(self.cursor)?;

        let entered = self.state.toggled();
        self.deadline = now.saturating_add(Timestamp::from(cycle.hold_time(entered)));
        self.state = entered;
        driver.write_pin(config, self.active_level.level_for(entered));
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "status led pin {}: {} until {}",
            config.pin,
            entered,
            self.deadline
        );

        // Ein Aus/An-Paar ist erst mit dem Wechsel nach Active komplett
        if entered.is_active() {
            self.cursor += 1;
            if self.cursor >= pattern.len() {
                #[cfg(feature = "defmt")]
                defmt::debug!("status led pin {}: pattern complete", config.pin);
                if let Some(callback) = self.on_complete {
                    callback(self);
                }
                if self.repeat == RepeatMode::On && self.is_finished() {
                    self.cursor = 0;
                }
                if self.is_finished() {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("status led pin {}: one-shot finished", config.pin);
                }
            }
        }

        self.pending_deadline()
    }
}

impl<IO> Default for StatusLed<'_, IO> {
    fn default() -> Self {
        Self::new()
    }
}

impl<IO: fmt::Debug> fmt::Debug for StatusLed<'_, IO> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusLed")
            .field("config", &self.config)
            .field("pattern", &self.pattern)
            .field("cursor", &self.cursor)
            .field("deadline", &self.deadline)
            .field("state", &self.state)
            .field("active_level", &self.active_level)
            .field("repeat", &self.repeat)
            .field("enabled", &self.enabled)
            .field("registered", &self.registered)
            .field("user_data", &self.user_data)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}
