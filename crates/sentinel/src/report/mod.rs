//! Data profiling reports.
//!
//! Tabular data (CSV uploads or typed column sets) is profiled and rendered
//! to an HTML file under the report directory, addressed afterwards by a
//! sanitized name.

pub mod frame;
pub mod profile;
pub mod render;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::info;

pub use frame::{Column, ColumnValues, DataFrame};
pub use profile::{ColumnProfile, FrameProfile};

use crate::error::ReportError;

/// Make a caller-supplied name safe to embed in a file name.
///
/// Every character outside `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();

    if sanitized.is_empty() { "upload".to_string() } else { sanitized }
}

/// Generates and serves report files from one directory
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing the report called `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("report_{}.html", sanitize_name(name)))
    }

    /// Profile a CSV upload; returns the report name.
    ///
    /// Uploading the same file name again replaces the earlier report.
    pub async fn generate_from_csv(&self, filename: &str, bytes: &[u8]) -> Result<String, ReportError> {
        let frame = DataFrame::from_csv(bytes)?;
        let name = sanitize_name(filename);
        let html = render_report(&format!("Data profile: {filename}"), &frame);

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(&name);
        tokio::fs::write(&path, html).await?;

        info!("Report written to {}", path.display());
        Ok(name)
    }

    /// Profile a submitted data frame; the report is named by the current
    /// Unix timestamp, with a `_<n>` suffix when that name is already taken.
    pub async fn generate_from_frame(&self, frame: &DataFrame) -> Result<String, ReportError> {
        frame.validate()?;
        let html = render_report("Data profile", frame);
        self.write_unique(&Utc::now().timestamp().to_string(), &html).await
    }

    /// Read a previously generated report.
    pub async fn load(&self, name: &str) -> Result<Vec<u8>, ReportError> {
        let path = self.path_for(name);
        match tokio::fs::read(&path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ReportError::NotFound(sanitize_name(name))),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to the first free name among `base`, `base_1`, `base_2`, ...
    async fn write_unique(&self, base: &str, html: &str) -> Result<String, ReportError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 { base.to_string() } else { format!("{base}_{attempt}") };
            let path = self.path_for(&name);

            match OpenOptions::new().write(true).create_new(true).open(&path).await {
                Ok(mut file) => {
                    file.write_all(html.as_bytes()).await?;
                    file.flush().await?;
                    info!("Report written to {}", path.display());
                    return Ok(name);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn render_report(title: &str, frame: &DataFrame) -> String {
    render::render_html(title, &FrameProfile::of(frame), Utc::now())
}
