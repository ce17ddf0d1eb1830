//! Trigger shortcut parsing and matching utilities.

use crate::{Error, Result};
use switcher_types::{Direction, Keysym, ModifierMask, TriggerBinding};

/// Parse a shortcut string (e.g., "Super+space", "Alt+Shift+Tab") into its
/// key symbol and modifier mask.
///
/// # Errors
///
/// Returns [`Error::InvalidShortcut`] if the string has no key part, more
/// than one key part, or names an unknown key.
pub fn parse_shortcut(shortcut: &str) -> Result<(Keysym, ModifierMask)> {
    let mut modifiers = ModifierMask::EMPTY;
    let mut key_part: Option<&str> = None;

    for part in shortcut.split('+').map(str::trim) {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= ModifierMask::CONTROL,
            "shift" => modifiers |= ModifierMask::SHIFT,
            "alt" | "mod1" => modifiers |= ModifierMask::MOD1,
            "super" | "mod4" => modifiers |= ModifierMask::SUPER,
            "hyper" => modifiers |= ModifierMask::HYPER,
            "meta" => modifiers |= ModifierMask::META,
            "" => return Err(Error::InvalidShortcut(shortcut.to_string())),
            _ if key_part.is_some() => return Err(Error::InvalidShortcut(shortcut.to_string())),
            _ => key_part = Some(part),
        }
    }

    let keysym = key_part
        .and_then(Keysym::from_name)
        .ok_or_else(|| Error::InvalidShortcut(shortcut.to_string()))?;

    Ok((keysym, modifiers))
}

/// Build a trigger binding from a shortcut string.
///
/// # Errors
///
/// Propagates parse failures from [`parse_shortcut`].
pub fn binding_from_shortcut(shortcut: &str, reverse: bool) -> Result<TriggerBinding> {
    let (keysym, modifiers) = parse_shortcut(shortcut)?;
    Ok(TriggerBinding::new(keysym, modifiers, reverse))
}

/// Reduce a raw event state to the bits trigger bindings are compared on.
#[must_use]
pub fn effective_state(state: ModifierMask, ignored: ModifierMask) -> ModifierMask {
    state & ModifierMask::MODIFIER_MASK & !ignored
}

/// Find the first binding whose key and exact modifier set match.
#[must_use]
pub fn match_trigger(
    bindings: &[TriggerBinding],
    keysym: Keysym,
    state: ModifierMask,
) -> Option<Direction> {
    bindings
        .iter()
        .find(|b| b.keysym == keysym && b.modifiers == state)
        .map(TriggerBinding::direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let (sym, mods) = parse_shortcut("space").unwrap();
        assert_eq!(sym, Keysym::SPACE);
        assert!(mods.is_empty());
    }

    #[test]
    fn test_parse_with_modifiers() {
        let (sym, mods) = parse_shortcut("Super+Shift+space").unwrap();
        assert_eq!(sym, Keysym::SPACE);
        assert_eq!(mods, ModifierMask::SUPER | ModifierMask::SHIFT);
    }

    #[test]
    fn test_parse_alt_tab() {
        let (sym, mods) = parse_shortcut("Alt+Tab").unwrap();
        assert_eq!(sym, Keysym::TAB);
        assert_eq!(mods, ModifierMask::MOD1);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            parse_shortcut("CTRL+A").unwrap(),
            parse_shortcut("control+a").unwrap()
        );
    }

    #[test]
    fn test_parse_with_spaces() {
        let (sym, mods) = parse_shortcut("Ctrl + Shift + b").unwrap();
        assert_eq!(sym, Keysym(u32::from(b'b')));
        assert_eq!(mods, ModifierMask::CONTROL | ModifierMask::SHIFT);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_shortcut("").is_err());
    }

    #[test]
    fn test_parse_missing_key() {
        assert!(parse_shortcut("Ctrl+Shift").is_err());
        assert!(parse_shortcut("Ctrl+").is_err());
    }

    #[test]
    fn test_parse_two_keys() {
        assert!(parse_shortcut("a+b").is_err());
    }

    #[test]
    fn test_parse_unknown_key() {
        assert!(matches!(
            parse_shortcut("Ctrl+?"),
            Err(Error::InvalidShortcut(s)) if s == "Ctrl+?"
        ));
    }

    #[test]
    fn test_effective_state_drops_ignored_and_foreign_bits() {
        let raw = ModifierMask::SUPER | ModifierMask::LOCK | ModifierMask(1 << 20);
        let ignored = ModifierMask::LOCK | ModifierMask::MOD2;
        assert_eq!(effective_state(raw, ignored), ModifierMask::SUPER);
    }

    #[test]
    fn test_match_trigger_direction() {
        let bindings = [
            binding_from_shortcut("Super+space", false).unwrap(),
            binding_from_shortcut("Super+Shift+space", true).unwrap(),
        ];
        assert_eq!(
            match_trigger(&bindings, Keysym::SPACE, ModifierMask::SUPER),
            Some(Direction::Forward)
        );
        assert_eq!(
            match_trigger(
                &bindings,
                Keysym::SPACE,
                ModifierMask::SUPER | ModifierMask::SHIFT
            ),
            Some(Direction::Backward)
        );
    }

    #[test]
    fn test_match_trigger_requires_exact_modifiers() {
        let bindings = [binding_from_shortcut("Super+space", false).unwrap()];
        assert_eq!(
            match_trigger(
                &bindings,
                Keysym::SPACE,
                ModifierMask::SUPER | ModifierMask::CONTROL
            ),
            None
        );
        assert_eq!(
            match_trigger(&bindings, Keysym::TAB, ModifierMask::SUPER),
            None
        );
    }
}
