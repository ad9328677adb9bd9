//! Fertige Blink-Patterns für typische Status-Anzeigen
//!
//! Alle Zeiten in Millisekunden, jeder [`Cycle`] ist `(aus, an)`.

use crate::types::{Cycle, Pattern};

static SLOW: [Cycle; 1] = [Cycle::new(500, 500)];
static FAST: [Cycle; 1] = [Cycle::new(125, 125)];
static BEAT: [Cycle; 1] = [Cycle::new(1950, 50)];
static DOUBLE: [Cycle; 2] = [Cycle::new(800, 100), Cycle::new(100, 100)];
static MORSE_SOS: [Cycle; 9] = [
    Cycle::new(1400, 150),
    Cycle::new(150, 150),
    Cycle::new(150, 150),
    Cycle::new(450, 450),
    Cycle::new(150, 450),
    Cycle::new(150, 450),
    Cycle::new(450, 150),
    Cycle::new(150, 150),
    Cycle::new(150, 150),
];

/// 1 Hz, gleichmäßig (z.B. "läuft")
pub static BLINK_SLOW: Pattern = Pattern::new(&SLOW);

/// 4 Hz, gleichmäßig (z.B. "beschäftigt")
pub static BLINK_FAST: Pattern = Pattern::new(&FAST);

/// Kurzer Blitz alle 2 Sekunden
pub static HEARTBEAT: Pattern = Pattern::new(&BEAT);

/// Zwei kurze Blitze, dann Pause
pub static DOUBLE_FLASH: Pattern = Pattern::new(&DOUBLE);

/// ··· ––– ··· mit Pause am Ende
pub static SOS: Pattern = Pattern::new(&MORSE_SOS);
