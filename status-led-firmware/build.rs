// Build-Script: Wird vor dem Kompilieren ausgeführt
// Konfiguriert den Linker für ESP32-C6 Embedded Rust

fn main() {
    // Lade .env file für Build-Zeit-Konfiguration
    // Fehler ignorieren wenn .env nicht existiert (dann gelten die Defaults aus config.rs)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
        eprintln!("   Nutze Default-Werte aus config.rs");
    }

    // Status-LED Zeiten prüfen und als Konstanten generieren
    // Die Werte werden zur Compile-Zeit in den Code eingebacken (config.rs)
    let idle_ms = millis_setting("STATUS_LED_IDLE_MS", 1000);
    let debounce_ms = millis_setting("STATUS_LED_BUTTON_DEBOUNCE_MS", 50);
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let generated = format!(
        "/// Maximale Wartezeit zwischen zwei poll()-Aufrufen im Leerlauf (ms)\n\
         pub const IDLE_TIME_MS: Timestamp = {idle_ms};\n\
         /// Entprell-Zeit für den Button (ms)\n\
         pub const BUTTON_DEBOUNCE_MS: u64 = {debounce_ms};\n"
    );
    std::fs::write(std::path::Path::new(&out_dir).join("led_timing.rs"), generated).unwrap();
    println!("cargo:rerun-if-changed=.env");

    // Registriere hilfsbereiten Error-Handler für Linker-Fehler
    linker_be_nice();

    // Füge Linker-Skripte hinzu:

    // 1. defmt.x - defmt Logging-Support
    //    Definiert Symbole für defmt's binäres Log-Format
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // 2. linkall.x - ESP32 Memory-Layout
    //    WICHTIG: Muss als LETZTES kommen (sonst Probleme mit flip-link)
    //    Definiert Flash/RAM-Layout und Startup-Code
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Liest eine Millisekunden-Angabe aus der Umgebung (.env oder ENV var)
// Ungültige Werte brechen den Build ab, statt still den Default zu nehmen
fn millis_setting(key: &str, default: u64) -> u64 {
    println!("cargo:rerun-if-env-changed={}", key);
    match std::env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or_else(|e| {
            panic!("{}={:?} ist keine gültige Zeit in Millisekunden: {}", key, value, e)
        }),
        Err(_) => default,
    }
}

// Error-Handler: Zeigt hilfreiche Tipps bei Linker-Fehlern
// Wird vom Linker als "--error-handling-script" aufgerufen
fn linker_be_nice() {
    let args: Vec<String> = std::env::args().collect();

    // Wenn vom Linker aufgerufen (mit Error-Typ und Symbol-Name)
    if args.len() > 1 {
        let kind = &args[1]; // Fehler-Typ (z.B. "undefined-symbol")
        let what = &args[2]; // Symbol-Name (z.B. "_defmt_...")

        match kind.as_str() {
            // Undefiniertes Symbol gefunden
            "undefined-symbol" => match what.as_str() {
                what if what.starts_with("_defmt_") => {
                    eprintln!();
                    eprintln!(
                        "💡 `defmt` not found - make sure `defmt.x` is added as a linker script and you have included `use defmt_rtt as _;`"
                    );
                    eprintln!();
                }
                "_stack_start" => {
                    eprintln!();
                    eprintln!("💡 Is the linker script `linkall.x` missing?");
                    eprintln!();
                }
                "embedded_test_linker_file_not_added_to_rustflags" => {
                    eprintln!();
                    eprintln!(
                        "💡 `embedded-test` not found - make sure `embedded-test.x` is added as a linker script for tests"
                    );
                    eprintln!();
                }
                _ => (),
            },
            // we don't have anything helpful for "missing-lib" yet
            _ => {
                std::process::exit(1);
            }
        }

        std::process::exit(0);
    }

    println!(
        "cargo:rustc-link-arg=--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
