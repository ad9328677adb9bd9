// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{DriveMode, Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use defmt::info;
use status_led_firmware::config::{ACTIVITY_LED_GPIO, BUTTON_GPIO, STATUS_LED_GPIO};
use status_led_firmware::tasks::{button_task, status_led_task};
use status_led_firmware::{LedCommand, LedCommandChannel, SystemStatus};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, startet Embassy Runtime und spawnt Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    info!(
        "Status-LEDs auf GPIO{} und GPIO{}, Button auf GPIO{}",
        STATUS_LED_GPIO, ACTIVITY_LED_GPIO, BUTTON_GPIO
    );

    // LED-Ausgänge: der Startpegel ist gleichzeitig der Ruhepegel (LED aus)
    // Status-LED: Push-Pull, leuchtet bei HIGH
    let status_led = Output::new(peripherals.GPIO4, Level::Low, OutputConfig::default());
    // Activity-LED: Open-Drain gegen 3V3, leuchtet bei LOW
    let activity_led = Output::new(
        peripherals.GPIO5,
        Level::High,
        OutputConfig::default().with_drive_mode(DriveMode::OpenDrain),
    );

    // BOOT-Button mit Pull-Up (gedrückt = LOW)
    let button = Input::new(
        peripherals.GPIO9,
        InputConfig::default().with_pull(Pull::Up),
    );

    // LED Command-Channel erstellen (Button/Main → Status-LED Task)
    static COMMAND_CHANNEL: static_cell::StaticCell<LedCommandChannel> =
        static_cell::StaticCell::new();
    let command_channel = &*COMMAND_CHANNEL.init(LedCommandChannel::new());
    let command_sender = command_channel.sender();

    // Spawn Status-LED Task (besitzt die Outputs und die Engine)
    spawner
        .spawn(status_led_task(
            [status_led, activity_led],
            command_channel.receiver(),
        ))
        .unwrap();

    // Spawn Button Task
    spawner.spawn(button_task(button, command_sender)).unwrap();

    // Boot abgeschlossen: von "Booting" auf "Running" wechseln
    Timer::after(Duration::from_secs(2)).await;
    command_sender
        .send(LedCommand::SetStatus(SystemStatus::Running))
        .await;

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
