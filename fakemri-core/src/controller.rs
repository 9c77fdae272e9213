//! Per-iteration control loop
//!
//! [`Controller`] owns every piece of loop state and runs one iteration
//! per [`Controller::tick`], always in this order:
//!
//! 1. pulse schedule check (and trigger keystroke)
//! 2. key matrix poll
//! 3. key output
//! 4. encoder direction
//! 5. menu button
//! 6. menu step (may re-anchor the schedule or switch layout)
//!
//! Menu actions therefore take effect before the next pulse check.

use fakemri_hal::{ActiveLow, InputPin, PositionCounter};

use crate::config::{Configuration, Tuning, KEY_COUNT};
use crate::input::{ButtonEdges, KeyMatrix, MenuButton, QuadratureDecoder, Transitions};
use crate::menu::{Menu, MenuAction, MenuCursor, MenuInput};
use crate::output::KeyEmitter;
use crate::presentation::Snapshot;
use crate::scheduler::PulseSchedule;
use crate::traits::{KeyboardOutput, OutputError, PresentationSink};

/// Raw hardware levels sampled at the start of an iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawInputs {
    /// true while the key at each logical slot is closed
    pub keys: [bool; KEY_COUNT],
    /// true while the encoder button is pressed
    pub button: bool,
    /// Absolute (wrapping) encoder position
    pub encoder_position: i32,
}

impl RawInputs {
    /// Sample every switch and the encoder once
    pub fn sample<P: InputPin, E: PositionCounter>(
        keys: &mut [ActiveLow<P>; KEY_COUNT],
        button: &mut ActiveLow<P>,
        encoder: &E,
    ) -> Self {
        let mut levels = [false; KEY_COUNT];
        for (level, pin) in levels.iter_mut().zip(keys.iter_mut()) {
            *level = pin.is_active();
        }
        Self {
            keys: levels,
            button: button.is_active(),
            encoder_position: encoder.position(),
        }
    }
}

/// What happened during one iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Offset from the scan origin of the pulse fired this iteration
    pub pulse_offset_ns: Option<u64>,
    pub transitions: Transitions,
    pub button: ButtonEdges,
    pub direction: i8,
    pub menu_action: Option<MenuAction>,
    /// First keyboard error; the rest of the iteration still ran
    pub output_error: Option<OutputError>,
}

impl TickReport {
    pub fn pulse_fired(&self) -> bool {
        self.pulse_offset_ns.is_some()
    }

    fn record(&mut self, result: Result<(), OutputError>) {
        if let Err(err) = result {
            self.output_error.get_or_insert(err);
        }
    }
}

/// The macropad control loop
pub struct Controller {
    config: Configuration,
    keys: KeyMatrix,
    button: MenuButton,
    decoder: QuadratureDecoder,
    schedule: PulseSchedule,
    emitter: KeyEmitter,
    menu: Menu,
}

impl Controller {
    pub fn new(tuning: Tuning) -> Self {
        let config = Configuration::default();
        let mut keys = KeyMatrix::new(tuning.key_debounce_samples);
        keys.assign_layout(config.active_layout());

        Self {
            config,
            keys,
            button: MenuButton::new(tuning.button_debounce_samples),
            decoder: QuadratureDecoder::new(),
            schedule: PulseSchedule::new(tuning.latency_budget_ns),
            emitter: KeyEmitter::new(),
            menu: Menu::new(),
        }
    }

    /// Run one loop iteration at `now_ns` (monotonic nanoseconds)
    pub fn tick<K: KeyboardOutput>(
        &mut self,
        now_ns: u64,
        inputs: &RawInputs,
        keyboard: &mut K,
    ) -> TickReport {
        let mut report = TickReport::default();

        if self.schedule.should_fire(now_ns, &self.config) {
            let trigger = self.config.active_layout().trigger();
            report.record(self.emitter.pulse(trigger, keyboard));
            report.pulse_offset_ns = Some(self.schedule.next_due_ns(&self.config));
            self.schedule.advance(&self.config);
        }

        let transitions = self.keys.poll(&inputs.keys);
        let hold = self.config.auto_repeat_suppressed;
        report.record(self.emitter.flush(keyboard));
        for transition in &transitions {
            let result = if transition.is_press() {
                let key = self.keys.slot(transition.slot).keycode;
                self.emitter.on_key_down(transition.slot, key, hold, keyboard)
            } else {
                self.emitter.on_key_up(transition.slot, keyboard)
            };
            report.record(result);
        }
        report.transitions = transitions;

        report.direction = self.decoder.step(inputs.encoder_position);
        report.button = self.button.update(inputs.button);

        let input = MenuInput {
            pressed: report.button.just_pressed,
            direction: report.direction,
        };
        report.menu_action = self.menu.handle(input, &mut self.config);
        match report.menu_action {
            Some(MenuAction::ScanToggled { .. }) => self.schedule.restart(now_ns),
            Some(MenuAction::ModeChanged(_)) | Some(MenuAction::Reset) => {
                self.keys.assign_layout(self.config.active_layout())
            }
            Some(MenuAction::IntervalChanged(_)) | None => {}
        }

        report
    }

    /// State for the display and key LEDs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.config, self.menu.cursor(), self.keys.slots())
    }

    /// Hand the current snapshot to a sink
    pub fn publish<P: PresentationSink>(&self, sink: &mut P) {
        sink.present(&self.snapshot());
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn cursor(&self) -> MenuCursor {
        self.menu.cursor()
    }

    pub fn schedule(&self) -> &PulseSchedule {
        &self.schedule
    }

    pub fn keys(&self) -> &KeyMatrix {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KeyCode, Mode};
    use crate::input::Edge;
    use crate::menu::MenuItem;
    use crate::presentation::{CursorMarker, ON_COLOR};
    use crate::testing::{RecordingKeyboard, Sent};

    const MS: u64 = 1_000_000;

    /// Controller with single-sample debounce and a recording keyboard
    struct Rig {
        ctl: Controller,
        kbd: RecordingKeyboard,
        inputs: RawInputs,
    }

    impl Rig {
        fn new() -> Self {
            let tuning = Tuning {
                key_debounce_samples: 1,
                button_debounce_samples: 1,
                ..Tuning::default()
            };
            let mut rig = Self {
                ctl: Controller::new(tuning),
                kbd: RecordingKeyboard::default(),
                inputs: RawInputs::default(),
            };
            // encoder baseline
            rig.tick(0);
            rig
        }

        fn tick(&mut self, now_ns: u64) -> TickReport {
            self.ctl.tick(now_ns, &self.inputs, &mut self.kbd)
        }

        /// Button down for one iteration, then up
        fn click(&mut self, now_ns: u64) -> Option<MenuAction> {
            self.inputs.button = true;
            let action = self.tick(now_ns).menu_action;
            self.inputs.button = false;
            self.tick(now_ns);
            action
        }

        /// Positive steps move the cursor down (the counter falls)
        fn turn(&mut self, now_ns: u64, steps: i32) {
            for _ in 0..steps.abs() {
                self.inputs.encoder_position -= steps.signum();
                self.tick(now_ns);
            }
        }

        fn set_key(&mut self, slot: usize, down: bool) {
            self.inputs.keys[slot] = down;
        }
    }

    struct Level(bool);

    impl embedded_hal::digital::ErrorType for Level {
        type Error = core::convert::Infallible;
    }

    impl embedded_hal::digital::InputPin for Level {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    struct Fixed(i32);

    impl PositionCounter for Fixed {
        fn position(&self) -> i32 {
            self.0
        }
    }

    #[test]
    fn test_sample_inverts_active_low_pins() {
        let mut keys = [true, false, true, true].map(|high| ActiveLow::new(Level(high)));
        let mut button = ActiveLow::new(Level(false));

        let inputs = RawInputs::sample(&mut keys, &mut button, &Fixed(-7));
        assert_eq!(inputs.keys, [false, true, false, false]);
        assert!(inputs.button);
        assert_eq!(inputs.encoder_position, -7);
    }

    #[test]
    fn test_momentary_key() {
        let mut rig = Rig::new();

        rig.set_key(0, true);
        let report = rig.tick(0);
        assert_eq!(report.transitions[0].edge, Edge::Pressed);
        assert_eq!(
            rig.kbd.take().as_slice(),
            &[Sent::Press(KeyCode::B), Sent::Release(KeyCode::B)]
        );
        assert_eq!(rig.ctl.snapshot().indicators[0].color, ON_COLOR);

        rig.set_key(0, false);
        rig.tick(MS);
        assert!(rig.kbd.sent.is_empty());
    }

    #[test]
    fn test_held_key_in_nar_mode() {
        let mut rig = Rig::new();

        rig.turn(0, 2);
        assert_eq!(rig.ctl.cursor().item, MenuItem::ModeEdit);
        rig.click(0);
        rig.turn(0, 2);
        assert_eq!(rig.ctl.config().mode(), Mode::NarLetters);

        rig.set_key(3, true);
        rig.tick(0);
        assert_eq!(rig.kbd.take().as_slice(), &[Sent::Press(KeyCode::G)]);
        rig.tick(MS);
        assert!(rig.kbd.sent.is_empty());

        rig.set_key(3, false);
        rig.tick(2 * MS);
        assert_eq!(rig.kbd.take().as_slice(), &[Sent::Release(KeyCode::G)]);
    }

    #[test]
    fn test_numeric_layout_applies_to_keys() {
        let mut rig = Rig::new();

        rig.turn(0, 2);
        rig.click(0);
        rig.turn(0, 1);
        assert_eq!(rig.ctl.config().mode(), Mode::Numbers);
        assert_eq!(rig.ctl.keys().slot(2).keycode, KeyCode::FOUR);

        rig.set_key(2, true);
        rig.tick(0);
        assert_eq!(
            rig.kbd.take().as_slice(),
            &[Sent::Press(KeyCode::FOUR), Sent::Release(KeyCode::FOUR)]
        );
        assert_eq!(rig.ctl.snapshot().mode_label.as_str(), "M: 12345");
    }

    #[test]
    fn test_scan_pulses_on_grid() {
        let mut rig = Rig::new();
        let start = 10 * MS;

        assert_eq!(
            rig.click(start),
            Some(MenuAction::ScanToggled { scanning: true })
        );
        assert!(rig.ctl.schedule().has_origin());

        assert!(!rig.tick(start + 1_999_874_999).pulse_fired());
        // 40 ms late
        let report = rig.tick(start + 2_039_875_000);
        assert_eq!(report.pulse_offset_ns, Some(1_999_875_000));
        assert_eq!(
            rig.kbd.take().as_slice(),
            &[Sent::Press(KeyCode::T), Sent::Release(KeyCode::T)]
        );

        // no catch-up, and the grid did not move
        assert!(!rig.tick(start + 2_040_000_000).pulse_fired());
        assert!(rig.tick(start + 3_999_750_000).pulse_fired());
    }

    #[test]
    fn test_stopping_scan_silences_trigger() {
        let mut rig = Rig::new();

        rig.click(0);
        assert!(rig.ctl.config().is_scanning);
        assert_eq!(
            rig.click(MS),
            Some(MenuAction::ScanToggled { scanning: false })
        );
        assert!(!rig.tick(10_000 * MS).pulse_fired());
        assert!(rig.kbd.sent.is_empty());
    }

    #[test]
    fn test_scroll_ignored_while_scanning() {
        let mut rig = Rig::new();
        rig.click(0);
        rig.turn(MS, 3);

        let snapshot = rig.ctl.snapshot();
        assert_eq!(rig.ctl.cursor().item, MenuItem::ScanToggle);
        assert_eq!(snapshot.scan_label, "Stop scan");
        assert!(!snapshot.title_animated);
    }

    #[test]
    fn test_reset_restores_letters() {
        let mut rig = Rig::new();

        rig.turn(0, 2);
        rig.click(0);
        rig.turn(0, 3);
        assert_eq!(rig.ctl.snapshot().cursor, CursorMarker::Submenu);
        rig.click(0);
        assert_eq!(rig.ctl.keys().slot(0).keycode, KeyCode::ONE);

        rig.turn(0, 1);
        assert_eq!(rig.click(0), Some(MenuAction::Reset));
        assert_eq!(*rig.ctl.config(), Configuration::default());
        assert_eq!(rig.ctl.keys().slot(0).keycode, KeyCode::B);
        assert_eq!(rig.ctl.cursor(), MenuCursor::default());
        assert_eq!(rig.ctl.snapshot().cursor, CursorMarker::TopLevel);
    }

    #[test]
    fn test_output_error_does_not_abort_iteration() {
        let mut rig = Rig::new();
        rig.kbd.fail_with = Some(OutputError::QueueFull);
        rig.set_key(0, true);
        rig.set_key(1, true);
        rig.inputs.button = true;

        let report = rig.tick(0);
        assert_eq!(report.output_error, Some(OutputError::QueueFull));
        assert_eq!(report.transitions.len(), 2);
        assert!(report.button.just_pressed);
        assert_eq!(
            report.menu_action,
            Some(MenuAction::ScanToggled { scanning: true })
        );
    }

    #[test]
    fn test_refused_release_retried_next_iteration() {
        let mut rig = Rig::new();
        rig.kbd.refuse_releases = true;

        rig.set_key(1, true);
        let report = rig.tick(0);
        assert_eq!(report.output_error, Some(OutputError::QueueFull));
        assert_eq!(rig.kbd.take().as_slice(), &[Sent::Press(KeyCode::Y)]);

        rig.kbd.refuse_releases = false;
        let report = rig.tick(MS);
        assert_eq!(report.output_error, None);
        assert_eq!(rig.kbd.take().as_slice(), &[Sent::Release(KeyCode::Y)]);
    }

    #[test]
    fn test_press_closing_submenu_scrolls_same_iteration() {
        let mut rig = Rig::new();
        rig.turn(0, 1);
        rig.click(0);
        assert!(rig.ctl.cursor().in_submenu());
        assert_eq!(rig.ctl.cursor().item, MenuItem::IntervalEdit);

        rig.inputs.button = true;
        rig.inputs.encoder_position -= 1;
        let report = rig.tick(0);

        assert_eq!(report.direction, 1);
        assert_eq!(report.menu_action, None);
        assert!(!rig.ctl.cursor().in_submenu());
        assert_eq!(rig.ctl.cursor().item, MenuItem::ModeEdit);
        assert_eq!(rig.ctl.config().tr_interval.as_tenths(), 20);
    }

    #[test]
    fn test_publish_hands_snapshot_to_sink() {
        struct Capture(Option<Snapshot>);

        impl PresentationSink for Capture {
            fn present(&mut self, snapshot: &Snapshot) {
                self.0 = Some(snapshot.clone());
            }
        }

        let ctl = Controller::new(Tuning::default());
        let mut sink = Capture(None);
        ctl.publish(&mut sink);
        assert_eq!(sink.0, Some(ctl.snapshot()));
    }
}
