//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the reset shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const RESET_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const RESET_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Next/submit shortcut display for the status bar
/// Ctrl+S works on all platforms
pub const NEXT_SHORTCUT: &str = "^S:next";

/// Reset shortcut display
/// - macOS: "Cmd+R"
/// - Linux/Windows: "^R"
#[cfg(target_os = "macos")]
pub const RESET_SHORTCUT: &str = "Cmd+R:reset";

#[cfg(not(target_os = "macos"))]
pub const RESET_SHORTCUT: &str = "^R:reset";
