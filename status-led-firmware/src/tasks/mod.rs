// Task-Modul: Enthält alle Embassy Tasks
//
// Der Status-LED Task besitzt die Engine und pollt sie, der Button-Task
// schickt Kommandos über einen Embassy Channel.

pub mod button;
pub mod status_led;

// Re-export Tasks für einfachen Import
pub use button::button_task;
pub use status_led::status_led_task;
