use std::path::Path;
use std::process::Command;

use crate::errors::WallpaperError;

pub fn apply_wallpaper(path: &Path) -> Result<(), WallpaperError> {
    let path_str = path.to_string_lossy();

    // Try plasma-apply-wallpaperimage first
    if Command::new("plasma-apply-wallpaperimage")
        .arg(&*path_str)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
    {
        return Ok(());
    }

    // Fallback to the plasmashell scripting interface
    let script = format!(
        r#"
        desktops().forEach(d => {{
            d.currentConfigGroup = Array("Wallpaper", "org.kde.image", "General");
            d.writeConfig("Image", "file://{}");
            d.reloadConfig();
        }});
        "#,
        path_str.replace('\\', "\\\\").replace('"', "\\\"")
    );

    for qdbus in ["qdbus6", "qdbus", "qdbus-qt5"] {
        if run_qdbus_script(qdbus, &script).is_ok() {
            return Ok(());
        }
    }

    Err(WallpaperError::OsApi(
        "neither plasma-apply-wallpaperimage nor qdbus could set the wallpaper".to_string(),
    ))
}

fn run_qdbus_script(cmd: &str, script: &str) -> Result<(), WallpaperError> {
    let output = Command::new(cmd)
        .args([
            "org.kde.plasmashell",
            "/PlasmaShell",
            "org.kde.PlasmaShell.evaluateScript",
            script,
        ])
        .output()
        .map_err(|e| WallpaperError::OsApi(format!("failed to run {cmd}: {e}")))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(WallpaperError::OsApi(format!("{cmd} returned an error")))
    }
}
