//! Observable downloads
//!
//! Fetches a resource into a destination directory while reporting
//! byte-level progress. The body is streamed to disk in fixed-size
//! chunks and never materialized in memory, so server jars of any size
//! go through the same path as small plugin files.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use url::Url;

use crate::error::{ExecError, Result};

/// Bytes copied per read/write cycle
const CHUNK_SIZE: usize = 1024;

/// Download `url` into `destination_dir`.
///
/// The destination file name is `file_name` when given, otherwise the
/// final path segment of the URL. The destination directory must already
/// exist; the file is created or overwritten. Returns the path of the
/// written file.
///
/// A HEAD probe supplies the total for the progress bar; when the probe
/// fails or the server omits a content length the bar degrades to an
/// indeterminate spinner and the transfer proceeds.
pub fn fetch(url: &str, destination_dir: &Path, file_name: Option<&str>) -> Result<PathBuf> {
    tracing::info!("Downloading {url}");
    let client = Client::new();

    let name = match file_name {
        Some(name) => {
            tracing::debug!("Destination file renamed to {name}");
            name.to_string()
        }
        None => {
            let name = file_name_from_url(url)?;
            tracing::debug!("No file name given, using {name} from the URL");
            name
        }
    };

    let bar = match probe_length(&client, url) {
        Some(total) => {
            tracing::debug!("Content length: {total}");
            let style = ProgressStyle::with_template(
                "{bytes}/{total_bytes} [{wide_bar}] {bytes_per_sec} {eta}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            ProgressBar::new(total).with_style(style)
        }
        None => {
            tracing::warn!("No content length for {url}, progress is indeterminate");
            ProgressBar::new_spinner()
        }
    };

    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(ExecError::DownloadFailed {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let destination = destination_dir.join(&name);
    let mut file = File::create(&destination)?;
    copy_chunked(response, &mut file, &bar)?;
    bar.finish_and_clear();

    tracing::info!("Download complete: {}", destination.display());
    Ok(destination)
}

/// HEAD probe for the expected byte count. Any failure is advisory.
fn probe_length(client: &Client, url: &str) -> Option<u64> {
    tracing::debug!("Sending HEAD request to {url}");
    let response = client.head(url).send().ok()?;
    response
        .headers()
        .get(reqwest::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Derive a destination file name from the final URL path segment
fn file_name_from_url(url: &str) -> Result<String> {
    let no_name = || ExecError::NoFileName {
        url: url.to_string(),
    };
    let parsed = Url::parse(url).map_err(|_| no_name())?;
    let name = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or("");
    if name.is_empty() {
        return Err(no_name());
    }
    Ok(name.to_string())
}

/// Copy `reader` to `writer` in fixed-size chunks, advancing the bar by
/// the length of each chunk written. Returns the total byte count.
fn copy_chunked(mut reader: impl Read, writer: &mut impl Write, bar: &ProgressBar) -> Result<u64> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut written = 0u64;
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        writer.write_all(&buf[..n])?;
        bar.inc(n as u64);
        written += n as u64;
    }
    writer.flush()?;
    Ok(written)
}
