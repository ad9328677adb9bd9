// Status-LED Task - pollt die Engine und setzt Patterns auf Kommando
use defmt::{error, info};
use embassy_futures::select::{Either, select};
use embassy_time::Timer;
use esp_hal::gpio::Output;
use status_led_core::{EngineConfig, StatusLed, StatusLedResult};

use crate::config::{ACTIVITY_LED_PIN, IDLE_TIME_MS, LED_COUNT, STATUS_LED_PIN};
use crate::hal::GpioLedDriver;
use crate::{
    ActiveLevel, FixedRegistry, IDENTIFY, LedCommand, LedCommandReceiver, LedDriver, LedHandle,
    RepeatMode, StatusLeds, SystemStatus,
};

type Leds<D> = StatusLeds<'static, D, FixedRegistry<'static, (), LED_COUNT>>;

/// Callback am Ende des Identify-Patterns
fn identify_done(led: &mut StatusLed<'_, ()>) {
    info!("Identify beendet (cursor {})", led.cursor());
}

/// Registriert Status- und Activity-LED
fn register_leds<D: LedDriver<Io = ()>>(leds: &mut Leds<D>) -> StatusLedResult<(LedHandle, LedHandle)> {
    let status = leds.allocate()?;
    leds.add(status, &STATUS_LED_PIN)?;

    let activity = leds.allocate()?;
    leds.add(activity, &ACTIVITY_LED_PIN)?;
    if let Some(led) = leds.led_mut(activity) {
        // Open-Drain: leuchtet bei LOW
        led.set_active_level(ActiveLevel::Low);
        led.set_repeat(RepeatMode::Off);
        led.set_on_complete(Some(identify_done));
    }
    Ok((status, activity))
}

fn set_status<D: LedDriver<Io = ()>>(leds: &mut Leds<D>, handle: LedHandle, status: SystemStatus) {
    if let Some(led) = leds.led_mut(handle) {
        led.set_pattern(status.pattern());
    }
}

/// Identify: Activity-LED wieder registrieren (falls abgemeldet) und starten
fn identify<D: LedDriver<Io = ()>>(leds: &mut Leds<D>, handle: LedHandle) -> StatusLedResult<()> {
    let registered = leds.led(handle).is_some_and(|led| led.is_registered());
    if !registered {
        leds.add(handle, &ACTIVITY_LED_PIN)?;
    }
    if let Some(led) = leds.led_mut(handle) {
        led.set_pattern(&IDENTIFY);
    }
    Ok(())
}

/// Status-LED Logic - Testbare Logik ohne Hardware-Abhängigkeit
///
/// - Pollt die Engine und schläft genau so lange wie sie erlaubt
/// - Wacht früher auf, wenn ein Kommando kommt
/// - Gibt die Activity-LED nach dem Identify-Pattern wieder frei
///
/// # Trait-basierte Abstraktion
/// Der generische Parameter `D: LedDriver` ermöglicht:
/// - Real Hardware (GpioLedDriver) im Production-Code
/// - Mock Implementation in Host-Tests
pub async fn status_led_logic<D: LedDriver<Io = ()>>(driver: D, command_receiver: LedCommandReceiver) {
    let mut leds: Leds<D> = StatusLeds::with_config(
        FixedRegistry::new(),
        EngineConfig::new().with_idle_time(IDLE_TIME_MS),
    );
    leds.init(driver);

    let (status, activity) = match register_leds(&mut leds) {
        Ok(handles) => handles,
        Err(e) => {
            error!("LEDs konnten nicht registriert werden: {}", e);
            return;
        }
    };
    set_status(&mut leds, status, SystemStatus::Booting);
    info!("Status-LEDs bereit ({} registriert)", leds.len());

    loop {
        let wait_ms = leds.poll();

        // Abgelaufenes Identify: Pin freigeben, damit die LED aus ist
        let finished = leds
            .led(activity)
            .is_some_and(|led| led.is_registered() && led.is_finished());
        if finished && let Err(e) = leds.remove(activity) {
            error!("Activity-LED konnte nicht entfernt werden: {}", e);
        }

        match select(
            Timer::after_millis(wait_ms),
            command_receiver.receive(),
        )
        .await
        {
            Either::First(()) => {}
            Either::Second(LedCommand::SetStatus(new_status)) => {
                info!("Command received: SetStatus {}", new_status);
                set_status(&mut leds, status, new_status);
            }
            Either::Second(LedCommand::Identify) => {
                info!("Command received: Identify");
                if let Err(e) = identify(&mut leds, activity) {
                    error!("Identify fehlgeschlagen: {}", e);
                }
            }
        }
    }
}

/// Status-LED Task - Embassy Task für parallele Ausführung
///
/// Übernimmt die fertig konfigurierten Outputs und ruft dann die
/// testbare `status_led_logic()` Funktion auf.
#[embassy_executor::task]
pub async fn status_led_task(
    outputs: [Output<'static>; LED_COUNT],
    command_receiver: LedCommandReceiver,
) {
    let driver = GpioLedDriver::new(outputs);
    status_led_logic(driver, command_receiver).await;
}
