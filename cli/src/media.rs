use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use vocab_deck_backend::logger::{error, info};
use vocab_deck_backend::types::AssetRef;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    /// Already on disk, including repeated references within this run.
    pub skipped: usize,
    pub failed: usize,
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let mut response = ureq::get(url)
        .call()
        .with_context(|| format!("HTTP request failed: {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP request failed with status {}: {}", response.status(), url);
    }

    let buffer = response
        .body_mut()
        .read_to_vec()
        .with_context(|| format!("Failed to read response body: {}", url))?;
    Ok(buffer)
}

/// Fetch every asset into `media_dir` under its local name.
///
/// A failed download is logged and counted. It never stops the others.
pub fn download_assets(assets: &[AssetRef], media_dir: &Path) -> Result<DownloadReport> {
    fs::create_dir_all(media_dir)
        .with_context(|| format!("Failed to create media directory: {}", media_dir.display()))?;

    let mut report = DownloadReport::default();

    for asset in assets {
        let save_path = media_dir.join(&asset.local_name);
        if save_path.exists() {
            report.skipped += 1;
            continue;
        }

        let saved = fetch(&asset.url).and_then(|buffer| {
            fs::write(&save_path, buffer)
                .with_context(|| format!("Failed to write {}", save_path.display()))
        });

        match saved {
            Ok(()) => {
                info(&format!("Downloaded {} -> {}", asset.url, save_path.display()));
                report.downloaded += 1;
            }
            Err(e) => {
                error(&format!("{:#}", e));
                report.failed += 1;
            }
        }
    }

    info(&format!(
        "Media: {} downloaded, {} already present, {} failed",
        report.downloaded, report.skipped, report.failed
    ));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_files_are_skipped() {
        let dir = std::env::temp_dir().join(format!("vocab-deck-media-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("x.mp3"), b"audio").unwrap();

        let asset = AssetRef {
            url: "https://example.com/media/x.mp3".to_string(),
            local_name: "x.mp3".to_string(),
        };
        let report = download_assets(&[asset.clone(), asset], &dir).unwrap();
        assert_eq!(report, DownloadReport { downloaded: 0, skipped: 2, failed: 0 });

        fs::remove_dir_all(&dir).unwrap();
    }
}
