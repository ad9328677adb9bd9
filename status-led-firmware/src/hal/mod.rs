// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul implementiert den LedDriver Trait aus status-led-core
// für die GPIOs des ESP32-C6.

pub mod led_driver;

pub use led_driver::GpioLedDriver;
