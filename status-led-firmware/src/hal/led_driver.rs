// GPIO LED Driver: verbindet status-led-core mit den ESP32-C6 GPIOs
//
// Zeitbasis ist embassy-time, die Pins sind fertig konfigurierte Outputs.

use defmt::warn;
use esp_hal::gpio::{Level, Output};
use status_led_core::{LedDriver, PinConfig, PinLevel, Timestamp};

/// LED Driver für `N` GPIO-Ausgänge
///
/// `PinConfig::pin` ist der Index in das Output-Array. Der Pegel, mit dem
/// ein Output erzeugt wurde, gilt als Ruhepegel (LED aus) und wird bei
/// `init_pin` / `deinit_pin` wiederhergestellt.
pub struct GpioLedDriver<'d, const N: usize> {
    outputs: [Output<'d>; N],
    idle_levels: [Level; N],
}

impl<'d, const N: usize> GpioLedDriver<'d, N> {
    pub fn new(outputs: [Output<'d>; N]) -> Self {
        let idle_levels = outputs.each_ref().map(|output| output.output_level());
        Self {
            outputs,
            idle_levels,
        }
    }

    fn set_level(&mut self, config: &PinConfig<()>, level: Level) {
        match self.outputs.get_mut(usize::from(config.pin)) {
            Some(output) => output.set_level(level),
            None => warn!("Kein Output für LED-Pin {}", config.pin),
        }
    }

    fn release(&mut self, config: &PinConfig<()>) {
        if let Some(&idle) = self.idle_levels.get(usize::from(config.pin)) {
            self.set_level(config, idle);
        }
    }
}

fn to_level(level: PinLevel) -> Level {
    match level {
        PinLevel::Low => Level::Low,
        PinLevel::High => Level::High,
    }
}

impl<const N: usize> LedDriver for GpioLedDriver<'_, N> {
    type Io = ();

    fn timestamp(&mut self) -> Timestamp {
        // Millisekunden seit Boot
        embassy_time::Instant::now().as_millis()
    }

    fn write_pin(&mut self, config: &PinConfig<()>, level: PinLevel) {
        self.set_level(config, to_level(level));
    }

    fn init_pin(&mut self, config: &PinConfig<()>) {
        // Outputs sind schon konfiguriert, nur definierter Startpegel
        self.release(config);
    }

    fn deinit_pin(&mut self, config: &PinConfig<()>) {
        self.release(config);
    }
}
