// Button Task - BOOT-Button schaltet den angezeigten Systemzustand weiter
use defmt::info;
use embassy_time::Timer;
use esp_hal::gpio::Input;

use crate::config::BUTTON_DEBOUNCE_MS;
use crate::{LedCommand, LedCommandSender, SystemStatus};

/// Wartet auf Tastendruck, entprellt und schickt Kommandos an den LED-Task
///
/// Jeder Druck: nächster Systemzustand + Identify-Blitz auf der Activity-LED.
#[embassy_executor::task]
pub async fn button_task(mut button: Input<'static>, command_sender: LedCommandSender) {
    let mut status = SystemStatus::Running;

    loop {
        button.wait_for_falling_edge().await;
        Timer::after_millis(BUTTON_DEBOUNCE_MS).await;
        if button.is_high() {
            // Prellen, kein echter Tastendruck
            continue;
        }

        status = status.next();
        info!("Button: wechsle zu {}", status);
        command_sender.send(LedCommand::SetStatus(status)).await;
        command_sender.send(LedCommand::Identify).await;

        button.wait_for_rising_edge().await;
    }
}
