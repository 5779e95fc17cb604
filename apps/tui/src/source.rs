//! Where analysis results come from.
//!
//! The dashboard talks to one `AnalysisSource`, chosen by configuration: the
//! built-in fixture, the full `/analyze` pipeline, or the location-only
//! `/recognize` endpoint.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::domain::{AnalysisPayload, AnalysisResult, RecognizeResult};
use crate::error::AnalysisError;
use crate::fixture;

/// Image selected for analysis, read fully into memory.
#[derive(Debug, Clone)]
pub struct Upload {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
    /// Pixel size, when the bytes decode as a supported image format.
    pub dimensions: Option<(u32, u32)>,
}

impl Upload {
    pub async fn read(path: impl Into<PathBuf>) -> Result<Self, AnalysisError> {
        let path = path.into();
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| AnalysisError::Upload {
                path: path.clone(),
                source,
            })?;
        Ok(Self::from_bytes(path, bytes))
    }

    pub fn from_bytes(path: PathBuf, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned());
        let mime = guess_mime(&path);
        let dimensions = image::ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());

        Self {
            path,
            file_name,
            mime,
            bytes,
            dimensions,
        }
    }

    fn multipart(&self) -> Result<Form, AnalysisError> {
        let part = Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(self.mime)?;
        Ok(Form::new().part("file", part))
    }
}

pub fn guess_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Turns text pasted or dropped onto the terminal into a file path.
///
/// Terminals deliver drops as the path itself, sometimes quoted, sometimes as
/// a `file://` URL, with shell escapes for spaces.
pub fn dropped_path(text: &str) -> Option<PathBuf> {
    let line = text.lines().map(str::trim).find(|line| !line.is_empty())?;
    let unquoted = line
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .or_else(|| line.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')))
        .unwrap_or(line);
    let path = unquoted.strip_prefix("file://").unwrap_or(unquoted);
    let path = path.replace("\\ ", " ").replace("%20", " ");
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

#[async_trait]
pub trait AnalysisSource: Send + Sync {
    async fn analyze(&self, upload: &Upload) -> Result<AnalysisPayload, AnalysisError>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Mock,
    Analyze,
    Recognize,
}

impl SourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Analyze => "analyze",
            Self::Recognize => "recognize",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mock" | "fixture" => Some(Self::Mock),
            "analyze" => Some(Self::Analyze),
            "recognize" => Some(Self::Recognize),
            _ => None,
        }
    }
}

pub fn build_source(config: &AppConfig, client: reqwest::Client) -> Arc<dyn AnalysisSource> {
    match config.source {
        SourceKind::Mock => Arc::new(FixtureSource),
        SourceKind::Analyze => Arc::new(AnalyzeEndpoint::new(client, &config.api_url)),
        SourceKind::Recognize => Arc::new(RecognizeEndpoint::new(client, &config.api_url)),
    }
}

/// Built-in sample result, stamped with the current time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

#[async_trait]
impl AnalysisSource for FixtureSource {
    async fn analyze(&self, upload: &Upload) -> Result<AnalysisPayload, AnalysisError> {
        debug!("serving fixture result for {}", upload.file_name);
        let result = fixture::analysis_result(&upload.file_name, Utc::now());
        Ok(AnalysisPayload::Full(Box::new(result)))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

async fn post_upload(
    client: &reqwest::Client,
    url: &str,
    upload: &Upload,
) -> Result<String, AnalysisError> {
    info!("POST {url} ({} bytes, {})", upload.bytes.len(), upload.mime);
    let response = client.post(url).multipart(upload.multipart()?).send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(AnalysisError::status(status.as_u16(), &body));
    }
    Ok(body)
}

/// `POST {api}/analyze`: the full multi-module pipeline.
pub struct AnalyzeEndpoint {
    client: reqwest::Client,
    url: String,
}

impl AnalyzeEndpoint {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/analyze", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl AnalysisSource for AnalyzeEndpoint {
    async fn analyze(&self, upload: &Upload) -> Result<AnalysisPayload, AnalysisError> {
        let body = post_upload(&self.client, &self.url, upload).await?;
        let result: AnalysisResult = serde_json::from_str(&body)?;
        Ok(AnalysisPayload::Full(Box::new(result)))
    }

    fn name(&self) -> &'static str {
        "analyze"
    }
}

/// `POST {api}/recognize`: location only.
pub struct RecognizeEndpoint {
    client: reqwest::Client,
    url: String,
}

impl RecognizeEndpoint {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            url: format!("{}/recognize", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl AnalysisSource for RecognizeEndpoint {
    async fn analyze(&self, upload: &Upload) -> Result<AnalysisPayload, AnalysisError> {
        let body = post_upload(&self.client, &self.url, upload).await?;
        let result: RecognizeResult = serde_json::from_str(&body)?;
        Ok(AnalysisPayload::Location(result))
    }

    fn name(&self) -> &'static str {
        "recognize"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(guess_mime(Path::new("scene.JPG")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("scene.webp")), "image/webp");
        assert_eq!(guess_mime(Path::new("scene")), "application/octet-stream");
    }

    #[test]
    fn dropped_paths_are_unwrapped() {
        assert_eq!(
            dropped_path("'/tmp/cam shot.png'\n"),
            Some(PathBuf::from("/tmp/cam shot.png"))
        );
        assert_eq!(
            dropped_path("file:///tmp/cam%20shot.png"),
            Some(PathBuf::from("/tmp/cam shot.png"))
        );
        assert_eq!(
            dropped_path("/tmp/cam\\ shot.png"),
            Some(PathBuf::from("/tmp/cam shot.png"))
        );
        assert_eq!(dropped_path("  \n "), None);
    }

    #[test]
    fn endpoints_join_base_url() {
        let client = reqwest::Client::new();
        let analyze = AnalyzeEndpoint::new(client.clone(), "http://localhost:8000/");
        let recognize = RecognizeEndpoint::new(client, "http://localhost:8000");
        assert_eq!(analyze.url, "http://localhost:8000/analyze");
        assert_eq!(recognize.url, "http://localhost:8000/recognize");
    }

    #[tokio::test]
    async fn unreadable_upload_is_reported() {
        let missing = PathBuf::from("/definitely/not/here.png");
        let error = Upload::read(missing.clone()).await;
        assert!(matches!(error, Err(AnalysisError::Upload { path, .. }) if path == missing));
    }

    #[tokio::test]
    async fn fixture_source_names_the_upload() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile()?;
        file.write_all(b"not really a jpeg")?;
        let upload = Upload::read(file.path()).await?;
        assert_eq!(upload.mime, "image/jpeg");
        assert_eq!(upload.dimensions, None);

        let payload = FixtureSource.analyze(&upload).await?;
        let AnalysisPayload::Full(result) = payload else {
            panic!("fixture must produce a full result");
        };
        let gps = result.modules.gps.as_ref().map(|gps| gps.filename.clone());
        assert_eq!(gps, Some(upload.file_name));
        Ok(())
    }
}
