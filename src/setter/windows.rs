use std::path::Path;
use windows::Win32::UI::WindowsAndMessaging::{
    SPI_SETDESKWALLPAPER, SPIF_SENDCHANGE, SPIF_UPDATEINIFILE, SystemParametersInfoW,
};

use crate::errors::WallpaperError;

/// Set the desktop wallpaper, persisting it to the user profile and
/// broadcasting the change to the running session.
pub fn apply_wallpaper(path: &Path) -> Result<(), WallpaperError> {
    let path_str = path
        .to_str()
        .ok_or_else(|| WallpaperError::OsApi("wallpaper path is not valid Unicode".to_string()))?;
    let path_wide = to_wide_string(path_str);

    let result = unsafe {
        SystemParametersInfoW(
            SPI_SETDESKWALLPAPER,
            0,
            Some(path_wide.as_ptr() as *mut _),
            SPIF_UPDATEINIFILE | SPIF_SENDCHANGE,
        )
    };

    result.map_err(|e| WallpaperError::OsApi(format!("SystemParametersInfoW failed: {e}")))
}

fn to_wide_string(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
