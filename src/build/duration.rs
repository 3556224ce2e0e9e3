use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::process::Command;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{MediaError, Result};

/// Measures the playing time of a media file
pub trait DurationProbe: Send + Sync {
    fn probe(&self, path: &Path) -> impl Future<Output = Result<f64>> + Send;
}

/// Asks `ffprobe` for the container duration
#[derive(Debug, Clone)]
pub struct FfprobeDuration {
    program: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

impl FfprobeDuration {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }
}

impl Default for FfprobeDuration {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

/// Duration in seconds from `ffprobe -print_format json -show_format` output
fn parse_duration(stdout: &[u8]) -> Option<f64> {
    let parsed: ProbeOutput = serde_json::from_slice(stdout).ok()?;
    parsed
        .format?
        .duration?
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
}

impl DurationProbe for FfprobeDuration {
    async fn probe(&self, path: &Path) -> Result<f64> {
        let failed = |reason: String| MediaError::ProbeFailed {
            path: path.display().to_string(),
            reason,
        };

        let out = Command::new(&self.program)
            .args(["-v", "error", "-print_format", "json", "-show_format"])
            .arg(path)
            .output()
            .await
            .map_err(|e| failed(format!("failed to run {}: {}", self.program.display(), e)))?;
        if !out.status.success() {
            return Err(failed(String::from_utf8_lossy(&out.stderr).trim().to_string()).into());
        }

        let duration = parse_duration(&out.stdout)
            .ok_or_else(|| failed("no duration in ffprobe output".to_string()))?;
        debug!("Probed {}: {}s", path.display(), duration);
        Ok(duration)
    }
}

/// Memoized durations shared by overlapping builds
///
/// Two lookups of the same uncached path may both run the probe; the second
/// insert overwrites the first with the same value.
pub struct DurationCache<P> {
    probe: P,
    durations: RwLock<HashMap<PathBuf, f64>>,
}

impl<P: DurationProbe> DurationCache<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            durations: RwLock::new(HashMap::new()),
        }
    }

    pub async fn duration(&self, path: &Path) -> Result<f64> {
        let cached = self.durations.read().await.get(path).copied();
        if let Some(duration) = cached {
            return Ok(duration);
        }

        let duration = self.probe.probe(path).await?;
        self.durations.write().await.insert(path.to_path_buf(), duration);
        Ok(duration)
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Cached value only, without probing
    pub async fn cached(&self, path: &Path) -> Option<f64> {
        self.durations.read().await.get(path).copied()
    }

    pub async fn len(&self) -> usize {
        self.durations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.durations.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.durations.write().await.clear();
    }
}
