//! The fetch-save-set run: directories → download → save → wallpaper.
//!
//! Strictly sequential; only the downloader retries internally. The first
//! failure aborts the run.

use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;

use crate::config::{Config, Naming};
use crate::errors::WallpaperError;
use crate::fetch;
use crate::logger::RunLog;
use crate::setter;
use crate::store;

pub async fn run(config: &Config, log: &mut RunLog) -> Result<PathBuf> {
    let images_dir = config.images_dir()?;

    store::prepare_dir(&images_dir)?;
    log.info(&format!("Images directory ready: {}", images_dir.display()));

    let now = Local::now();

    // Bail out before any network traffic if today's file is already there.
    // The write below re-checks with create_new, covering a file that
    // appears in between.
    if config.naming == Naming::Daily && !config.overwrite {
        let todays = store::todays_file(&images_dir, &now);
        if todays.exists() {
            return Err(WallpaperError::AlreadyExists(todays).into());
        }
    }

    if !config.verify_certificates {
        log.warn("TLS certificate verification is disabled");
    }

    let client = fetch::build_client(config)?;
    log.step(&format!("Downloading {}", config.url));
    let payload = fetch::download(&client, &config.url, config.max_retries, log).await?;
    log.info(&format!(
        "Downloaded {} bytes ({})",
        payload.bytes.len(),
        payload.content_type
    ));

    let saved = store::save_image(
        &images_dir,
        config.naming,
        config.overwrite,
        &now,
        &payload.bytes,
    )?;
    log.info(&format!("Saved wallpaper: {}", saved.display()));

    if config.set_wallpaper {
        setter::set_wallpaper(&saved, log)?;
        log.success("Desktop wallpaper updated");
    } else {
        log.info("Leaving the desktop wallpaper unchanged");
    }

    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const JPEG_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0fake-jpeg-bytes";

    fn test_config(url: String, data_dir: &Path) -> Config {
        Config {
            url,
            data_dir: Some(data_dir.to_path_buf()),
            log_to_file: false,
            set_wallpaper: false,
            ..Config::default()
        }
    }

    fn image_mock(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET).path("/uhd.php");
            then.status(200)
                .header("content-type", "image/jpeg")
                .body(JPEG_BYTES);
        })
    }

    #[tokio::test]
    async fn a_completed_run_saves_exactly_one_file() {
        let server = MockServer::start_async().await;
        let mock = image_mock(&server);
        let dir = tempdir().unwrap();
        let config = test_config(server.url("/uhd.php"), dir.path());
        let mut log = RunLog::console_only();

        let saved = run(&config, &mut log).await.unwrap();

        mock.assert();
        assert!(saved.is_absolute());
        assert_eq!(fs::read(&saved).unwrap(), JPEG_BYTES);

        let images_dir = dir.path().join("images");
        assert_eq!(fs::read_dir(&images_dir).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn a_second_run_on_the_same_day_is_refused_before_downloading() {
        let server = MockServer::start_async().await;
        let mock = image_mock(&server);
        let dir = tempdir().unwrap();
        let config = test_config(server.url("/uhd.php"), dir.path());
        let mut log = RunLog::console_only();

        let saved = run(&config, &mut log).await.unwrap();
        let err = run(&config, &mut log).await.unwrap_err();

        // only the first run reached the server
        mock.assert();
        assert!(matches!(
            err.downcast_ref::<WallpaperError>(),
            Some(WallpaperError::AlreadyExists(_))
        ));
        assert_eq!(fs::read(&saved).unwrap(), JPEG_BYTES);
    }

    #[tokio::test]
    async fn overwrite_replaces_the_same_day_file() {
        let server = MockServer::start_async().await;
        let mock = image_mock(&server);
        let dir = tempdir().unwrap();
        let mut config = test_config(server.url("/uhd.php"), dir.path());
        let mut log = RunLog::console_only();

        run(&config, &mut log).await.unwrap();
        config.overwrite = true;
        run(&config, &mut log).await.unwrap();

        mock.assert_hits(2);
        assert_eq!(
            fs::read_dir(dir.path().join("images")).unwrap().count(),
            1
        );
    }

    #[tokio::test]
    async fn unique_naming_saves_one_file_per_run() {
        let server = MockServer::start_async().await;
        image_mock(&server);
        let dir = tempdir().unwrap();
        let mut config = test_config(server.url("/uhd.php"), dir.path());
        config.naming = Naming::Unique;
        let mut log = RunLog::console_only();

        let first = run(&config, &mut log).await.unwrap();
        let second = run(&config, &mut log).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(
            fs::read_dir(dir.path().join("images")).unwrap().count(),
            2
        );
    }

    #[tokio::test]
    async fn non_image_responses_leave_no_file_behind() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/uhd.php");
            then.status(200)
                .header("content-type", "text/html")
                .body("<html>front page</html>");
        });
        let dir = tempdir().unwrap();
        let config = test_config(server.url("/uhd.php"), dir.path());
        let mut log = RunLog::console_only();

        let err = run(&config, &mut log).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<WallpaperError>(),
            Some(WallpaperError::InvalidContentType(_))
        ));
        assert_eq!(
            fs::read_dir(dir.path().join("images")).unwrap().count(),
            0
        );
    }
}
