use std::fmt;

use tumble_engine::input::{InputEvent, Key, KeyState};

/// Key that requests loop termination.
pub const EXIT_KEY: Key = Key::Escape;

/// What the demo draws each frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    #[default]
    Triangle,
    RectangleStatic,
    RectangleRotating,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Triangle, Mode::RectangleStatic, Mode::RectangleRotating];

    /// Operator-facing mode number.
    pub const fn number(self) -> u8 {
        match self {
            Mode::Triangle => 1,
            Mode::RectangleStatic => 2,
            Mode::RectangleRotating => 3,
        }
    }

    /// Key that selects this mode.
    pub const fn key(self) -> Key {
        match self {
            Mode::Triangle => Key::Q,
            Mode::RectangleStatic => Key::W,
            Mode::RectangleRotating => Key::E,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Mode::Triangle => "Triangle only",
            Mode::RectangleStatic => "Rectangle only (no rotation)",
            Mode::RectangleRotating => "Rectangle with rotation (Bonus)",
        }
    }

    pub fn from_key(key: Key) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.key() == key)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mode {} [{}]: {}", self.number(), self.key(), self.label())
    }
}

/// Outcome of feeding one input event to [`DemoState::dispatch`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dispatch {
    ModeChanged(Mode),
    Exit,
    Ignored,
}

/// Mutable demo state owned by the main loop.
///
/// Written only by input dispatch and read by the frame composer, both on the
/// loop thread, dispatch first.
#[derive(Debug, Default)]
pub struct DemoState {
    mode: Mode,
    should_close: bool,
}

impl DemoState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn should_close(&self) -> bool {
        self.should_close
    }

    /// Applies one input event.
    ///
    /// Only fresh key presses count: releases and OS repeats are ignored. A
    /// mode key always selects its mode, even when it is already active. The
    /// exit key sets the close flag and leaves the mode alone.
    pub fn dispatch(&mut self, event: &InputEvent) -> Dispatch {
        let InputEvent::Key {
            key,
            state: KeyState::Pressed,
            repeat: false,
            ..
        } = *event
        else {
            return Dispatch::Ignored;
        };

        if key == EXIT_KEY {
            log::debug!("exit requested from {}", self.mode);
            self.should_close = true;
            return Dispatch::Exit;
        }

        match Mode::from_key(key) {
            Some(mode) => {
                self.mode = mode;
                log::info!(">> {mode}");
                Dispatch::ModeChanged(mode)
            }
            None => Dispatch::Ignored,
        }
    }
}

const RULE: &str = "========================================";

/// The keyboard controls banner followed by the starting mode line.
pub fn controls_banner() -> Vec<String> {
    let mut lines = vec![RULE.to_owned(), "  CG Assignment - Keyboard Controls:".to_owned()];
    lines.extend(Mode::ALL.iter().map(|m| format!("  [{}] {}", m.key(), m.label())));
    lines.push("  [ESC] Exit".to_owned());
    lines.push(RULE.to_owned());
    lines.push(format!(">> {}", Mode::default()));
    lines
}

/// Logs [`controls_banner`] at info level.
pub fn log_controls() {
    for line in controls_banner() {
        log::info!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tumble_engine::input::Modifiers;

    fn press(key: Key) -> InputEvent {
        InputEvent::key_pressed(key)
    }

    fn state_in(mode: Mode) -> DemoState {
        let mut state = DemoState::new();
        state.dispatch(&press(mode.key()));
        assert_eq!(state.mode(), mode);
        state
    }

    #[test]
    fn starts_in_triangle_mode() {
        let state = DemoState::new();
        assert_eq!(state.mode(), Mode::Triangle);
        assert!(!state.should_close());
    }

    #[test]
    fn every_mode_key_reaches_its_mode_from_every_state() {
        for from in Mode::ALL {
            for to in Mode::ALL {
                let mut state = state_in(from);
                assert_eq!(state.dispatch(&press(to.key())), Dispatch::ModeChanged(to));
                assert_eq!(state.mode(), to, "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let mut state = state_in(Mode::RectangleStatic);
        for key in [Key::A, Key::R, Key::Space, Key::Digit1, Key::Unknown(7)] {
            assert_eq!(state.dispatch(&press(key)), Dispatch::Ignored);
        }
        assert_eq!(state.mode(), Mode::RectangleStatic);
    }

    #[test]
    fn releases_and_repeats_are_ignored() {
        let mut state = DemoState::new();
        assert_eq!(
            state.dispatch(&InputEvent::key_released(Key::E)),
            Dispatch::Ignored
        );

        let repeat = InputEvent::Key {
            key: Key::W,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: true,
        };
        assert_eq!(state.dispatch(&repeat), Dispatch::Ignored);
        assert_eq!(state.mode(), Mode::Triangle);
    }

    #[test]
    fn modifiers_do_not_block_mode_keys() {
        let mut state = DemoState::new();
        let shifted = InputEvent::Key {
            key: Key::E,
            state: KeyState::Pressed,
            modifiers: Modifiers {
                shift: true,
                ..Modifiers::default()
            },
            repeat: false,
        };
        assert_eq!(state.dispatch(&shifted), Dispatch::ModeChanged(Mode::RectangleRotating));
    }

    #[test]
    fn exit_key_sets_close_flag_without_changing_mode() {
        for mode in Mode::ALL {
            let mut state = state_in(mode);
            assert_eq!(state.dispatch(&press(EXIT_KEY)), Dispatch::Exit);
            assert!(state.should_close());
            assert_eq!(state.mode(), mode);
        }
    }

    #[test]
    fn mode_display_matches_operator_text() {
        assert_eq!(Mode::Triangle.to_string(), "Mode 1 [Q]: Triangle only");
        assert_eq!(
            Mode::RectangleStatic.to_string(),
            "Mode 2 [W]: Rectangle only (no rotation)"
        );
        assert_eq!(
            Mode::RectangleRotating.to_string(),
            "Mode 3 [E]: Rectangle with rotation (Bonus)"
        );
    }

    #[test]
    fn controls_banner_lists_every_key() {
        let banner = controls_banner();
        assert_eq!(
            banner,
            [
                "========================================",
                "  CG Assignment - Keyboard Controls:",
                "  [Q] Triangle only",
                "  [W] Rectangle only (no rotation)",
                "  [E] Rectangle with rotation (Bonus)",
                "  [ESC] Exit",
                "========================================",
                ">> Mode 1 [Q]: Triangle only",
            ]
        );
    }

    #[test]
    fn key_lookup_round_trips() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_key(mode.key()), Some(mode));
        }
        assert_eq!(Mode::from_key(EXIT_KEY), None);
    }
}
