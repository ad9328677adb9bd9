//! Scheduler: schaltet alle fälligen LEDs ohne Timer-Interrupts
//!
//! Der Aufrufer besitzt die Hauptschleife und ruft [`StatusLeds::poll`]
//! regelmäßig auf. Der Rückgabewert sagt, wie lange er höchstens warten
//! darf. Früher aufrufen ist immer erlaubt, später verzögert nur das Blinken.

use core::marker::PhantomData;

use crate::config::EngineConfig;
use crate::led::StatusLed;
use crate::registry::LedRegistry;
use crate::traits::{LedDriver, StatusLedError, StatusLedResult};
use crate::types::{LedHandle, PinConfig, Timestamp};

/// Status-LED Engine: Driver + Registry
///
/// Der Driver wird explizit über [`StatusLeds::init`] übergeben. Ohne
/// Driver ist `poll()` ein No-Op und liefert die Leerlaufzeit.
///
/// # Beispiele
///
/// ```
/// # use status_led_core::{Cycle, FixedRegistry, LedDriver, Pattern, PinConfig, PinLevel, StatusLeds, Timestamp};
/// struct Clock(Timestamp);
///
/// impl LedDriver for Clock {
///     type Io = ();
///     fn timestamp(&mut self) -> Timestamp { self.0 }
///     fn write_pin(&mut self, _config: &PinConfig<()>, _level: PinLevel) {}
/// }
///
/// static CYCLES: [Cycle; 1] = [Cycle::new(300, 100)];
/// static BLINK: Pattern = Pattern::new(&CYCLES);
/// static LED_PIN: PinConfig<()> = PinConfig::new((), 4);
///
/// let mut leds = StatusLeds::new(FixedRegistry::<(), 2>::new());
/// leds.init(Clock(0));
/// let handle = leds.allocate().unwrap();
/// leds.add(handle, &LED_PIN).unwrap();
/// leds.led_mut(handle).unwrap().set_pattern(&BLINK);
///
/// assert_eq!(leds.poll(), 300);
/// ```
pub struct StatusLeds<'a, D, R> {
    driver: Option<D>,
    registry: R,
    config: EngineConfig,
    _pins: PhantomData<&'a ()>,
}

impl<'a, D, R> StatusLeds<'a, D, R>
where
    D: LedDriver,
    D::Io: 'a,
    R: LedRegistry<'a, D::Io>,
{
    pub fn new(registry: R) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    pub fn with_config(registry: R, config: EngineConfig) -> Self {
        Self {
            driver: None,
            registry,
            config,
            _pins: PhantomData,
        }
    }

    /// Installiert den Driver (ersetzt einen vorherigen)
    ///
    /// Schon registrierte LEDs werden dabei über `init_pin` am neuen Driver
    /// initialisiert, `add()` vor `init()` ist also erlaubt.
    pub fn init(&mut self, mut driver: D) {
        self.registry.for_each_mut(|led| {
            if let Some(config) = led.config() {
                driver.init_pin(config);
            }
        });
        self.driver = Some(driver);
    }

    pub fn driver(&self) -> Option<&D> {
        self.driver.as_ref()
    }

    pub fn driver_mut(&mut self) -> Option<&mut D> {
        self.driver.as_mut()
    }

    pub fn take_driver(&mut self) -> Option<D> {
        self.driver.take()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Schaltet alle fälligen LEDs und liefert die Wartezeit bis zum
    /// nächsten Aufruf in Millisekunden
    ///
    /// Die Zeit wird genau einmal pro Aufruf gelesen. Berücksichtigt werden
    /// die neuen Schaltzeiten der geschalteten LEDs und die noch offenen
    /// der übrigen. Gibt es nichts zu tun, kommt `idle_time` zurück.
    pub fn poll(&mut self) -> Timestamp {
        let Some(driver) = self.driver.as_mut() else {
            return self.config.idle_time;
        };
        let now = driver.timestamp();

        let mut next: Option<Timestamp> = None;
        self.registry.for_each_mut(|led| {
            if let Some(deadline) = led.advance(now, &mut *driver) {
                next = Some(next.map_or(deadline, |current| current.min(deadline)));
            }
        });

        next.map_or(self.config.idle_time, |deadline| deadline.saturating_sub(now))
    }

    /// Freien Slot aus der Registry holen
    pub fn allocate(&mut self) -> StatusLedResult<LedHandle> {
        self.registry.allocate()
    }

    /// LED registrieren, Pin binden und über den Driver initialisieren
    ///
    /// Das Pattern wird dabei gelöscht. Ein erneutes `add()` auf eine schon
    /// registrierte LED bindet sie neu (Pin-Init läuft dann erneut). Ohne
    /// Driver holt [`StatusLeds::init`] die Pin-Init nach.
    ///
    /// # Fehlerbehandlung
    /// `StatusLedError::NullEntry` für [`LedHandle::NULL`] oder fremde Handles
    pub fn add(&mut self, handle: LedHandle, config: &'a PinConfig<D::Io>) -> StatusLedResult<()> {
        if handle.is_null() {
            return Err(StatusLedError::NullEntry);
        }
        self.registry.attach(handle, config)?;
        if let Some(driver) = self.driver.as_mut() {
            driver.init_pin(config);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("status led {} added on pin {}", handle.index(), config.pin);
        Ok(())
    }

    /// LED abmelden und Pin über den Driver zurücksetzen
    ///
    /// # Fehlerbehandlung
    /// `StatusLedError::NotFound` wenn die LED nicht registriert ist
    pub fn remove(&mut self, handle: LedHandle) -> StatusLedResult<()> {
        let config = self.registry.detach(handle)?;
        if let Some(driver) = self.driver.as_mut() {
            driver.deinit_pin(config);
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("status led {} removed from pin {}", handle.index(), config.pin);
        Ok(())
    }

    /// Sucht die LED, die an genau diese Pin-Konfiguration gebunden ist
    pub fn find(&self, config: &PinConfig<D::Io>) -> Option<LedHandle> {
        self.registry.find(config)
    }

    pub fn led(&self, handle: LedHandle) -> Option<&StatusLed<'a, D::Io>> {
        self.registry.get(handle)
    }

    pub fn led_mut(&mut self, handle: LedHandle) -> Option<&mut StatusLed<'a, D::Io>> {
        self.registry.get_mut(handle)
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut R {
        &mut self.registry
    }

    /// Anzahl registrierter LEDs
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
