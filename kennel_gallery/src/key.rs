// Copyright 2025 the Kennel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard input.

use kennel_responder::trap::Direction;

/// A logical key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Page Down.
    PageDown,
    /// A printable character other than space.
    Character(char),
}

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0001;
        /// Control.
        const CONTROL = 0b0010;
        /// Alt / Option.
        const ALT     = 0b0100;
        /// Meta / Command.
        const META    = 0b1000;
    }
}

/// A key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A press of `key` with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// The same press with Shift held.
    pub fn with_shift(mut self) -> Self {
        self.modifiers |= Modifiers::SHIFT;
        self
    }

    /// Whether this press activates buttons (Enter or Space).
    pub fn is_activation(&self) -> bool {
        matches!(self.key, Key::Enter | Key::Space)
    }

    /// Direction of sequential navigation, for Tab presses.
    pub fn tab_direction(&self) -> Option<Direction> {
        (self.key == Key::Tab).then(|| {
            if self.modifiers.contains(Modifiers::SHIFT) {
                Direction::Backward
            } else {
                Direction::Forward
            }
        })
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}
