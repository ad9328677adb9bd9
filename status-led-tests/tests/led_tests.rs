//! Integration Tests für die Status-LED Engine
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockDriver

use status_led_core::patterns::BLINK_SLOW;
use status_led_core::{
    ActiveLevel, Cycle, FixedRegistry, LedDriver, LedHandle, LedRegistry, LedState,
    LinkedRegistry, Pattern, PinConfig, PinLevel, RepeatMode, StatusLed, StatusLedError,
    StatusLeds, Timestamp, DEFAULT_IDLE_TIME,
};

// ============================================================================
// Mock Driver
// ============================================================================

#[derive(Default)]
pub struct MockDriver {
    pub now: Timestamp,
    pub writes: Vec<(u16, PinLevel)>,
    pub inits: Vec<u16>,
    pub deinits: Vec<u16>,
    pub timestamp_reads: usize,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn writes_for(&self, pin: u16) -> Vec<PinLevel> {
        self.writes
            .iter()
            .filter(|(p, _)| *p == pin)
            .map(|(_, level)| *level)
            .collect()
    }
}

impl LedDriver for MockDriver {
    type Io = ();

    fn timestamp(&mut self) -> Timestamp {
        self.timestamp_reads += 1;
        self.now
    }

    fn write_pin(&mut self, config: &PinConfig<()>, level: PinLevel) {
        self.writes.push((config.pin, level));
    }

    fn init_pin(&mut self, config: &PinConfig<()>) {
        self.inits.push(config.pin);
    }

    fn deinit_pin(&mut self, config: &PinConfig<()>) {
        self.deinits.push(config.pin);
    }
}

/// Driver ohne optionale Pin-Init/-Deinit
struct MinimalDriver {
    now: Timestamp,
    writes: usize,
}

impl LedDriver for MinimalDriver {
    type Io = ();

    fn timestamp(&mut self) -> Timestamp {
        self.now
    }

    fn write_pin(&mut self, _config: &PinConfig<()>, _level: PinLevel) {
        self.writes += 1;
    }
}

// ============================================================================
// Test-Daten
// ============================================================================

static SCENARIO_CYCLES: [Cycle; 2] = [Cycle::new(200, 100), Cycle::new(50, 50)];
static SCENARIO: Pattern = Pattern::new(&SCENARIO_CYCLES);

static TRIPLE_CYCLES: [Cycle; 3] = [Cycle::new(10, 10), Cycle::new(20, 20), Cycle::new(30, 30)];
static TRIPLE: Pattern = Pattern::new(&TRIPLE_CYCLES);

static EMPTY: Pattern = Pattern::new(&[]);

static PIN_A: PinConfig<()> = PinConfig::new((), 4);
static PIN_B: PinConfig<()> = PinConfig::new((), 5);

type FixedLeds = StatusLeds<'static, MockDriver, FixedRegistry<'static, (), 4>>;
type LinkedLeds = StatusLeds<'static, MockDriver, LinkedRegistry<'static, ()>>;

fn fixed_leds() -> FixedLeds {
    let mut leds = StatusLeds::new(FixedRegistry::new());
    leds.init(MockDriver::new());
    leds
}

fn linked_leds() -> LinkedLeds {
    let mut leds = StatusLeds::new(LinkedRegistry::new());
    leds.init(MockDriver::new());
    leds
}

fn add_with_pattern<R>(
    leds: &mut StatusLeds<'static, MockDriver, R>,
    pin: &'static PinConfig<()>,
    pattern: &'static Pattern,
) -> LedHandle
where
    R: LedRegistry<'static, ()>,
{
    let handle = leds.allocate().unwrap();
    leds.add(handle, pin).unwrap();
    leds.led_mut(handle).unwrap().set_pattern(pattern);
    handle
}

fn poll_at<R>(leds: &mut StatusLeds<'static, MockDriver, R>, now: Timestamp) -> Timestamp
where
    R: LedRegistry<'static, ()>,
{
    leds.driver_mut().unwrap().now = now;
    leds.poll()
}

fn driver<'b, R>(leds: &'b StatusLeds<'static, MockDriver, R>) -> &'b MockDriver
where
    R: LedRegistry<'static, ()>,
{
    leds.driver().unwrap()
}

/// Zählt abgeschlossene Durchläufe im User-Data Feld
fn count_completion(led: &mut StatusLed<'_, ()>) {
    led.set_user_data(led.user_data() + 1);
}

/// Schaltet die LED nach dem ersten Durchlauf ab
fn disable_on_complete(led: &mut StatusLed<'_, ()>) {
    led.set_enabled(false);
}

// ============================================================================
// Tests: Scheduler-Szenario
// ============================================================================

#[test]
fn test_scenario_first_toggle() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);

    assert_eq!(poll_at(&mut leds, 0), 200);

    let led = leds.led(handle).unwrap();
    assert_eq!(led.state(), LedState::Inactive);
    assert_eq!(led.deadline(), 200);
    assert_eq!(led.cursor(), 0);
    assert_eq!(driver(&leds).writes, vec![(4, PinLevel::Low)]);
}

#[test]
fn test_scenario_second_toggle_advances_cursor() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);

    poll_at(&mut leds, 0);
    assert_eq!(poll_at(&mut leds, 200), 100);

    let led = leds.led(handle).unwrap();
    assert_eq!(led.state(), LedState::Active);
    assert_eq!(led.deadline(), 300);
    assert_eq!(led.cursor(), 1);
}

#[test]
fn test_scenario_full_period() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);

    assert_eq!(poll_at(&mut leds, 0), 200);
    assert_eq!(poll_at(&mut leds, 200), 100);
    assert_eq!(poll_at(&mut leds, 300), 50);
    assert_eq!(poll_at(&mut leds, 350), 50);
    assert_eq!(leds.led(handle).unwrap().cursor(), 0);

    // Zweiter Durchlauf beginnt genau nach 400 ms
    assert_eq!(poll_at(&mut leds, 400), 200);
    assert_eq!(leds.led(handle).unwrap().deadline(), 600);
    assert_eq!(SCENARIO.period(), 400);
}

#[test]
fn test_timestamp_read_once_per_poll() {
    let mut leds = fixed_leds();
    add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    add_with_pattern(&mut leds, &PIN_B, &TRIPLE);

    leds.poll();
    leds.poll();
    assert_eq!(driver(&leds).timestamp_reads, 2);
}

// ============================================================================
// Tests: Idle Safety / Idle Return
// ============================================================================

#[test]
fn test_not_due_never_writes() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    poll_at(&mut leds, 0);

    for now in [1, 50, 150, 199] {
        assert_eq!(poll_at(&mut leds, now), 200 - now);
    }
    assert_eq!(driver(&leds).writes.len(), 1);
    assert_eq!(leds.led(handle).unwrap().state(), LedState::Inactive);
}

#[test]
fn test_empty_registry_returns_idle_time() {
    let mut fixed = fixed_leds();
    let mut linked = linked_leds();

    for now in [0, 10, 100_000] {
        assert_eq!(poll_at(&mut fixed, now), DEFAULT_IDLE_TIME);
        assert_eq!(poll_at(&mut linked, now), DEFAULT_IDLE_TIME);
    }
}

#[test]
fn test_led_without_pattern_is_idle() {
    let mut leds = fixed_leds();
    let handle = leds.allocate().unwrap();
    leds.add(handle, &PIN_A).unwrap();

    assert_eq!(poll_at(&mut leds, 0), DEFAULT_IDLE_TIME);
    assert!(driver(&leds).writes.is_empty());
}

#[test]
fn test_empty_pattern_is_idle() {
    let mut leds = fixed_leds();
    add_with_pattern(&mut leds, &PIN_A, &EMPTY);

    assert_eq!(poll_at(&mut leds, 0), DEFAULT_IDLE_TIME);
    assert!(driver(&leds).writes.is_empty());
}

#[test]
fn test_late_poll_schedules_from_now() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    poll_at(&mut leds, 0);

    // 50 ms zu spät: Haltezeit zählt ab dem tatsächlichen Aufruf
    assert_eq!(poll_at(&mut leds, 250), 100);
    assert_eq!(leds.led(handle).unwrap().deadline(), 350);
}

// ============================================================================
// Tests: Repeat / One-Shot
// ============================================================================

#[test]
fn test_one_shot_completes_exactly_once() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &TRIPLE);
    {
        let led = leds.led_mut(handle).unwrap();
        led.set_repeat(RepeatMode::Off);
        led.set_on_complete(Some(count_completion));
    }

    let mut now = 0;
    for _ in 0..20 {
        let wait = poll_at(&mut leds, now);
        now += wait;
    }

    let led = leds.led(handle).unwrap();
    assert_eq!(led.user_data(), 1);
    assert_eq!(led.cursor(), TRIPLE.len());
    assert!(led.is_finished());
    assert_eq!(driver(&leds).writes.len(), 2 * TRIPLE.len());
}

#[test]
fn test_one_shot_goes_idle_after_completion() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    leds.led_mut(handle).unwrap().set_repeat(RepeatMode::Off);

    for now in [0, 200, 300, 350] {
        poll_at(&mut leds, now);
    }
    assert_eq!(poll_at(&mut leds, 10_000), DEFAULT_IDLE_TIME);
    assert_eq!(driver(&leds).writes.len(), 4);
}

#[test]
fn test_reset_restarts_one_shot() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    leds.led_mut(handle).unwrap().set_repeat(RepeatMode::Off);
    for now in [0, 200, 300, 350] {
        poll_at(&mut leds, now);
    }

    leds.led_mut(handle).unwrap().reset();
    assert_eq!(poll_at(&mut leds, 1_000), 200);
    assert_eq!(driver(&leds).writes.len(), 5);
}

#[test]
fn test_repeat_cycles_cursor_and_levels() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &TRIPLE);
    leds.led_mut(handle)
        .unwrap()
        .set_on_complete(Some(count_completion));

    let mut now = 0;
    let mut cursors = Vec::new();
    for _ in 0..(2 * TRIPLE.len() * 3) {
        now += poll_at(&mut leds, now);
        let cursor = leds.led(handle).unwrap().cursor();
        assert!(cursor < TRIPLE.len());
        cursors.push(cursor);
    }

    let levels = driver(&leds).writes_for(4);
    let period = 2 * TRIPLE.len();
    assert_eq!(levels[..period], levels[period..2 * period]);
    assert_eq!(levels[..period], levels[2 * period..]);
    assert_eq!(cursors[..period], cursors[period..2 * period]);
    assert_eq!(leds.led(handle).unwrap().user_data(), 3);
}

#[test]
fn test_callback_can_stop_led() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    leds.led_mut(handle)
        .unwrap()
        .set_on_complete(Some(disable_on_complete));

    for now in [0, 200, 300, 350] {
        poll_at(&mut leds, now);
    }
    let led = leds.led(handle).unwrap();
    assert!(!led.is_enabled());
    assert_eq!(led.cursor(), 0);
    assert_eq!(poll_at(&mut leds, 5_000), DEFAULT_IDLE_TIME);
}

// ============================================================================
// Tests: Enable / Polarity
// ============================================================================

#[test]
fn test_disabled_led_is_inert() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    poll_at(&mut leds, 0);
    leds.led_mut(handle).unwrap().set_enabled(false);

    for now in [200, 1_000, 50_000] {
        assert_eq!(poll_at(&mut leds, now), DEFAULT_IDLE_TIME);
    }
    let led = leds.led(handle).unwrap();
    assert_eq!(led.deadline(), 200);
    assert_eq!(led.state(), LedState::Inactive);
    assert_eq!(driver(&leds).writes.len(), 1);
}

#[test]
fn test_reenabled_led_resumes() {
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    poll_at(&mut leds, 0);
    leds.led_mut(handle).unwrap().set_enabled(false);
    poll_at(&mut leds, 1_000);

    leds.led_mut(handle).unwrap().set_enabled(true);
    assert_eq!(poll_at(&mut leds, 1_000), 100);
    assert_eq!(leds.led(handle).unwrap().state(), LedState::Active);
}

#[test]
fn test_active_low_inverts_only_written_level() {
    let mut leds = fixed_leds();
    let high = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    let low = add_with_pattern(&mut leds, &PIN_B, &SCENARIO);
    leds.led_mut(low)
        .unwrap()
        .set_active_level(ActiveLevel::Low);

    poll_at(&mut leds, 0);
    poll_at(&mut leds, 200);

    assert_eq!(driver(&leds).writes_for(4), vec![PinLevel::Low, PinLevel::High]);
    assert_eq!(driver(&leds).writes_for(5), vec![PinLevel::High, PinLevel::Low]);
    assert_eq!(
        leds.led(high).unwrap().state(),
        leds.led(low).unwrap().state()
    );
}

// ============================================================================
// Tests: Registry über die Engine
// ============================================================================

#[test]
fn test_add_calls_init_once() {
    let mut leds = fixed_leds();
    let handle = leds.allocate().unwrap();
    leds.add(handle, &PIN_A).unwrap();

    let led = leds.led(handle).unwrap();
    assert!(led.is_registered());
    assert!(led.is_enabled());
    assert_eq!(led.state(), LedState::Active);
    assert!(led.pattern().is_none());
    assert_eq!(driver(&leds).inits, vec![4]);
}

#[test]
fn test_remove_deinit_once_and_find_fails() {
    for linked in [false, true] {
        let (inits, deinits, found, second) = if linked {
            let mut leds = linked_leds();
            let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
            leds.remove(handle).unwrap();
            let second = leds.remove(handle);
            (
                driver(&leds).inits.clone(),
                driver(&leds).deinits.clone(),
                leds.find(&PIN_A),
                second,
            )
        } else {
            let mut leds = fixed_leds();
            let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
            leds.remove(handle).unwrap();
            let second = leds.remove(handle);
            (
                driver(&leds).inits.clone(),
                driver(&leds).deinits.clone(),
                leds.find(&PIN_A),
                second,
            )
        };
        assert_eq!(inits, vec![4]);
        assert_eq!(deinits, vec![4]);
        assert_eq!(found, None);
        assert_eq!(second, Err(StatusLedError::NotFound));
    }
}

#[test]
fn test_removed_led_is_not_scheduled() {
    let mut leds = linked_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    poll_at(&mut leds, 0);
    leds.remove(handle).unwrap();

    assert_eq!(poll_at(&mut leds, 200), DEFAULT_IDLE_TIME);
    assert_eq!(driver(&leds).writes.len(), 1);
}

#[test]
fn test_fixed_registry_no_space() {
    let mut leds: StatusLeds<'static, MockDriver, FixedRegistry<'static, (), 1>> =
        StatusLeds::new(FixedRegistry::new());
    leds.init(MockDriver::new());

    let handle = leds.allocate().unwrap();
    leds.add(handle, &PIN_A).unwrap();
    assert_eq!(leds.allocate(), Err(StatusLedError::NoSpace));
}

#[test]
fn test_add_null_entry() {
    let mut leds = linked_leds();
    assert_eq!(leds.add(LedHandle::NULL, &PIN_A), Err(StatusLedError::NullEntry));
    assert!(driver(&leds).inits.is_empty());
}

#[test]
fn test_duplicate_pin_is_allowed() {
    let mut leds = linked_leds();
    let first = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    let second = add_with_pattern(&mut leds, &PIN_A, &TRIPLE);

    assert_ne!(first, second);
    assert_eq!(leds.len(), 2);
    // Linked: neueste LED zuerst
    assert_eq!(leds.find(&PIN_A), Some(second));
}

#[test]
fn test_readd_rebinds_without_duplicate() {
    let mut leds = linked_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    poll_at(&mut leds, 0);

    leds.add(handle, &PIN_B).unwrap();
    assert_eq!(leds.len(), 1);
    assert_eq!(leds.find(&PIN_A), None);
    assert_eq!(leds.find(&PIN_B), Some(handle));
    assert!(leds.led(handle).unwrap().pattern().is_none());
    assert_eq!(driver(&leds).inits, vec![4, 5]);
}

#[test]
fn test_fixed_and_linked_agree() {
    let mut fixed = fixed_leds();
    let mut linked = linked_leds();
    add_with_pattern(&mut fixed, &PIN_A, &SCENARIO);
    add_with_pattern(&mut fixed, &PIN_B, &BLINK_SLOW);
    add_with_pattern(&mut linked, &PIN_A, &SCENARIO);
    add_with_pattern(&mut linked, &PIN_B, &BLINK_SLOW);

    let mut now = 0;
    for _ in 0..12 {
        let wait_fixed = poll_at(&mut fixed, now);
        let wait_linked = poll_at(&mut linked, now);
        assert_eq!(wait_fixed, wait_linked);
        now += wait_fixed;
    }
    for pin in [4, 5] {
        assert_eq!(driver(&fixed).writes_for(pin), driver(&linked).writes_for(pin));
    }
}

// ============================================================================
// Tests: Driver-Varianten
// ============================================================================

#[test]
fn test_driver_without_optional_pin_hooks() {
    let mut leds: StatusLeds<'static, MinimalDriver, FixedRegistry<'static, (), 2>> =
        StatusLeds::new(FixedRegistry::new());
    leds.init(MinimalDriver { now: 0, writes: 0 });

    let handle = leds.allocate().unwrap();
    leds.add(handle, &PIN_A).unwrap();
    leds.led_mut(handle).unwrap().set_pattern(&SCENARIO);

    assert_eq!(leds.poll(), 200);
    assert_eq!(leds.remove(handle), Ok(()));
    assert_eq!(leds.driver().map(|d| d.writes), Some(1));
}

#[test]
fn test_borrowed_driver() {
    let mut mock = MockDriver::new();
    {
        let mut leds: StatusLeds<'static, &mut MockDriver, FixedRegistry<'static, (), 2>> =
            StatusLeds::new(FixedRegistry::new());
        leds.init(&mut mock);
        let handle = leds.allocate().unwrap();
        leds.add(handle, &PIN_A).unwrap();
        leds.led_mut(handle).unwrap().set_pattern(&SCENARIO);
        assert_eq!(leds.poll(), 200);
    }
    assert_eq!(mock.writes, vec![(4, PinLevel::Low)]);
    assert_eq!(mock.inits, vec![4]);
}

#[test]
fn test_add_before_driver_install() {
    let mut leds: FixedLeds = StatusLeds::new(FixedRegistry::new());
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    assert_eq!(leds.poll(), DEFAULT_IDLE_TIME);

    leds.init(MockDriver::new());
    assert_eq!(driver(&leds).inits, vec![4]);
    assert_eq!(leds.poll(), 200);
    assert!(leds.led(handle).unwrap().is_registered());
}

#[test]
fn test_driver_install_skips_removed_leds() {
    let mut leds: LinkedLeds = StatusLeds::new(LinkedRegistry::new());
    add_with_pattern(&mut leds, &PIN_A, &SCENARIO);
    let removed = add_with_pattern(&mut leds, &PIN_B, &SCENARIO);
    leds.remove(removed).unwrap();

    leds.init(MockDriver::new());
    assert_eq!(driver(&leds).inits, vec![4]);
    assert!(driver(&leds).deinits.is_empty());
}

// ============================================================================
// Tests: Lange Laufzeit
// ============================================================================

#[test]
fn test_blinks_past_32_bit_millis() {
    let start = Timestamp::from(u32::MAX) - 50;
    let mut leds = fixed_leds();
    let handle = add_with_pattern(&mut leds, &PIN_A, &SCENARIO);

    assert_eq!(poll_at(&mut leds, start), 200);
    assert_eq!(leds.led(handle).unwrap().deadline(), start + 200);

    // Nach ~49.7 Tagen: die Zeit läuft einfach weiter
    assert_eq!(poll_at(&mut leds, start + 60), 140);
    assert_eq!(poll_at(&mut leds, start + 200), 100);
    assert_eq!(poll_at(&mut leds, start + 300), 50);
    assert_eq!(
        driver(&leds).writes_for(4),
        vec![PinLevel::Low, PinLevel::High, PinLevel::Low]
    );
}

#[test]
fn test_long_uptime_keeps_period() {
    let mut leds = linked_leds();
    add_with_pattern(&mut leds, &PIN_A, &BLINK_SLOW);

    let mut now = Timestamp::from(u32::MAX) - 1_000;
    for _ in 0..8 {
        let wait = poll_at(&mut leds, now);
        assert!(wait <= 500);
        now += wait;
    }
    assert_eq!(driver(&leds).writes.len(), 8);
}
