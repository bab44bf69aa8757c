//! Keystroke rules for the card inputs.
//!
//! Pure functions over the current field value; the widget applies the
//! results to the document.

use crate::domain::card::CardBrand;

/// Which keyboard event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
    Press,
}

/// A keyboard event as delivered by the substrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub phase: KeyPhase,

    /// Character code of the key; 0 for keys without a printable character.
    pub which: u32,

    pub shift: bool,
    pub meta: bool,
}

impl KeyEvent {
    pub fn new(phase: KeyPhase, which: u32) -> Self {
        Self {
            phase,
            which,
            shift: false,
            meta: false,
        }
    }

    /// Event for typing `c`.
    pub fn typed(phase: KeyPhase, c: char) -> Self {
        Self::new(phase, c as u32)
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Printable character carried by the event, if any.
    pub fn character(&self) -> Option<char> {
        if self.which == 0 {
            return None;
        }
        char::from_u32(self.which)
    }

    pub fn is_digit(&self) -> bool {
        self.character().is_some_and(|c| c.is_ascii_digit())
    }
}

/// Does `value` end exactly at a grouping boundary for `brand`?
///
/// Amex groups 4-6-5, so boundaries sit after `dddd` and `dddd dddddd`.
/// Every other brand groups by four.
pub fn is_group_boundary(value: &str, brand: CardBrand) -> bool {
    let chars: Vec<char> = value.chars().collect();
    let all_digits = |s: &[char]| s.iter().all(|c| c.is_ascii_digit());

    if brand.is_amex() {
        return match chars.len() {
            4 => all_digits(&chars),
            11 => all_digits(&chars[..4]) && chars[4].is_whitespace() && all_digits(&chars[5..]),
            _ => false,
        };
    }

    if chars.len() < 4 {
        return false;
    }
    let split = chars.len() - 4;
    all_digits(&chars[split..]) && (split == 0 || chars[split - 1].is_whitespace())
}

/// New number value after a keystroke, or `None` when unchanged.
///
/// Only digit keys trigger grouping; one separating space is appended
/// when the current value sits on a boundary.
pub fn format_number(value: &str, brand: CardBrand, key: &KeyEvent) -> Option<String> {
    if !key.is_digit() {
        return None;
    }
    if is_group_boundary(value, brand) {
        Some(format!("{} ", value))
    } else {
        None
    }
}

/// Whether a keystroke into a numeric-only field is allowed.
///
/// Modifier chords and non-printable keys always pass; otherwise
/// alphabetic characters are blocked.
pub fn allows_keystroke(key: &KeyEvent) -> bool {
    if key.shift || key.meta {
        return true;
    }
    match key.character() {
        None => true,
        Some(c) => !c.is_ascii_alphabetic(),
    }
}
