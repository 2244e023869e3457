use std::path::Path;
use std::process::Command;

use crate::errors::WallpaperError;

pub fn apply_wallpaper(path: &Path) -> Result<(), WallpaperError> {
    let uri = format!("'file://{}'", path.display());

    dconf_write("/org/gnome/desktop/background/picture-uri", &uri)?;
    dconf_write("/org/gnome/desktop/background/picture-uri-dark", &uri)?;
    dconf_write("/org/gnome/desktop/background/picture-options", "'zoom'")?;

    Ok(())
}

fn dconf_write(key: &str, value: &str) -> Result<(), WallpaperError> {
    let output = Command::new("dconf")
        .args(["write", key, value])
        .output()
        .map_err(|e| WallpaperError::OsApi(format!("failed to run dconf: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(WallpaperError::OsApi(format!(
            "dconf write {key} failed: {}",
            stderr.trim()
        )));
    }
    Ok(())
}
