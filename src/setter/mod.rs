//! Per-platform wallpaper application.
//!
//! One backend per desktop, selected at runtime. Platforms without a
//! backend report a typed error instead of panicking.

use std::path::Path;

use crate::errors::WallpaperError;
use crate::logger::RunLog;

#[cfg(unix)]
mod gnome;
#[cfg(unix)]
mod hyprland;
#[cfg(unix)]
mod kde;
#[cfg(unix)]
mod sway;
#[cfg(target_os = "windows")]
mod windows;
#[cfg(unix)]
mod x11;

/// Verify the file exists, then hand it to the platform backend, asking for
/// a persistent change that refreshes the running session immediately.
pub fn set_wallpaper(path: &Path, log: &mut RunLog) -> Result<(), WallpaperError> {
    if !path.exists() {
        return Err(WallpaperError::FileNotFound(path.to_path_buf()));
    }
    apply(path, log)
}

#[cfg(target_os = "windows")]
fn apply(path: &Path, log: &mut RunLog) -> Result<(), WallpaperError> {
    log.info("Applying wallpaper via the Windows desktop API");
    windows::apply_wallpaper(path)
}

#[cfg(unix)]
fn apply(path: &Path, log: &mut RunLog) -> Result<(), WallpaperError> {
    let desktop = Desktop::detect();
    log.info(&format!("Detected desktop environment: {}", desktop.name()));

    match desktop {
        Desktop::Gnome => gnome::apply_wallpaper(path),
        Desktop::Kde => kde::apply_wallpaper(path),
        Desktop::Sway => sway::apply_wallpaper(path),
        Desktop::Hyprland => hyprland::apply_wallpaper(path),
        Desktop::X11 => x11::apply_wallpaper(path),
        Desktop::Unknown(name) => Err(WallpaperError::UnsupportedPlatform(name)),
    }
}

#[cfg(not(any(unix, target_os = "windows")))]
fn apply(_path: &Path, _log: &mut RunLog) -> Result<(), WallpaperError> {
    Err(WallpaperError::UnsupportedPlatform(
        std::env::consts::OS.to_string(),
    ))
}

/// Desktop environments with a wallpaper backend
#[cfg(unix)]
#[derive(Debug, Clone, PartialEq)]
pub enum Desktop {
    Gnome,
    Kde,
    Sway,
    Hyprland,
    /// Generic X11 session, handled through feh
    X11,
    Unknown(String),
}

#[cfg(unix)]
impl Desktop {
    /// Detect the current desktop environment
    pub fn detect() -> Self {
        // Check session environment variables first
        for var in ["XDG_CURRENT_DESKTOP", "XDG_SESSION_DESKTOP", "DESKTOP_SESSION"] {
            if let Ok(session) = std::env::var(var) {
                if let Some(desktop) = Self::from_session_name(&session) {
                    return desktop;
                }
            }
        }

        // Check for Wayland display server
        if std::env::var("WAYLAND_DISPLAY").is_ok() {
            if Self::is_process_running("sway") {
                return Desktop::Sway;
            }
            if Self::is_process_running("Hyprland") {
                return Desktop::Hyprland;
            }
        }

        // Check for X11 display server
        if std::env::var("DISPLAY").is_ok() {
            return Desktop::X11;
        }

        Desktop::Unknown(std::env::consts::OS.to_string())
    }

    fn from_session_name(session: &str) -> Option<Self> {
        let session = session.to_lowercase();
        if session.contains("gnome") {
            Some(Desktop::Gnome)
        } else if session.contains("kde") || session.contains("plasma") {
            Some(Desktop::Kde)
        } else if session.contains("sway") {
            Some(Desktop::Sway)
        } else if session.contains("hyprland") {
            Some(Desktop::Hyprland)
        } else {
            None
        }
    }

    /// Check if a process with the given name is running
    fn is_process_running(process_name: &str) -> bool {
        std::process::Command::new("pgrep")
            .arg(process_name)
            .output()
            .map(|output| !output.stdout.is_empty())
            .unwrap_or(false)
    }

    /// Get a human-readable name for the desktop
    pub fn name(&self) -> &str {
        match self {
            Desktop::Gnome => "GNOME",
            Desktop::Kde => "KDE Plasma",
            Desktop::Sway => "Sway",
            Desktop::Hyprland => "Hyprland",
            Desktop::X11 => "X11",
            Desktop::Unknown(name) => name,
        }
    }
}
