//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for form shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
///
/// Ctrl is accepted everywhere; this adds Cmd on macOS.
#[cfg(target_os = "macos")]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const ACTION_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

#[cfg(target_os = "macos")]
const MODIFIER_LABEL: &str = "Cmd";

#[cfg(not(target_os = "macos"))]
const MODIFIER_LABEL: &str = "Ctrl";

/// Display text for a form shortcut, e.g. `Ctrl+S`
pub fn shortcut(key: char) -> String {
    format!("{MODIFIER_LABEL}+{}", key.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_label() {
        let label = shortcut('s');
        assert!(label.ends_with("+S"));
        assert!(label.starts_with(MODIFIER_LABEL));
    }
}
