//! Map screenshot generator
//!
//! Renders the public bubble map for a token with a headless Chromium
//! process and returns the path of the written PNG.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::analysis::map_url;
use crate::error::Result;
use crate::models::Chain;

const VIEWPORT: &str = "--window-size=1280,720";

/// Flags passed on every run, after any configured launcher arguments.
const BROWSER_FLAGS: &[&str] = &[
    "--headless=new",
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-gpu",
    "--hide-scrollbars",
    "--virtual-time-budget=15000",
    VIEWPORT,
];

/// Headless browser wrapper producing map screenshots.
#[derive(Debug, Clone)]
pub struct ScreenshotGenerator {
    program: String,
    launcher_args: Vec<String>,
    timeout: Duration,
    output_dir: PathBuf,
}

impl ScreenshotGenerator {
    /// Creates a generator writing into the system temp directory.
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            launcher_args: Vec::new(),
            timeout,
            output_dir: std::env::temp_dir(),
        }
    }

    /// Arguments inserted before the browser flags, e.g. a wrapper script.
    pub fn with_launcher_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.launcher_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Final location for a token's map; one file per `(chain, address)`.
    pub fn output_path(&self, chain: Chain, address: &str) -> PathBuf {
        let address: String = address.chars().filter(char::is_ascii_alphanumeric).collect();
        self.output_dir.join(format!("map_{}_{}.png", chain, address))
    }

    /// Unique scratch file the browser writes into before the rename.
    fn scratch_path(&self, chain: Chain) -> PathBuf {
        let tag = uuid::Uuid::new_v4().simple().to_string();
        self.output_dir
            .join(format!(".render_{}_{}.png", chain, &tag[..6]))
    }

    /// Renders the map for `(chain, address)`.
    ///
    /// The browser writes into a scratch file that replaces the token's map
    /// only on success, so each token keeps at most one file on disk.
    ///
    /// Every failure mode (missing binary, timeout, non-zero exit, no file
    /// written) is logged and reported as `Ok(None)`.
    pub async fn generate(&self, chain: Chain, address: &str) -> Result<Option<PathBuf>> {
        let scratch = self.scratch_path(chain);
        let rendered = self.render(chain, address, &scratch).await;

        if !rendered {
            discard(&scratch).await;
            return Ok(None);
        }

        let path = self.output_path(chain, address);
        if let Err(err) = tokio::fs::rename(&scratch, &path).await {
            warn!(path = %path.display(), error = %err, "Failed to move screenshot into place");
            discard(&scratch).await;
            return Ok(None);
        }

        Ok(Some(path))
    }

    async fn render(&self, chain: Chain, address: &str, path: &Path) -> bool {
        let url = map_url(chain, address);
        debug!(%url, path = %path.display(), "Rendering map screenshot");

        let mut command = Command::new(&self.program);
        command
            .args(&self.launcher_args)
            .args(BROWSER_FLAGS)
            .arg(format!("--screenshot={}", path.display()))
            .arg(&url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                warn!(program = %self.program, error = %err, "Failed to launch browser");
                return false;
            }
            Err(_) => {
                warn!(%url, timeout_secs = self.timeout.as_secs(), "Screenshot timed out");
                return false;
            }
        };

        if !output.status.success() {
            warn!(
                %url,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "Browser exited with failure"
            );
            return false;
        }

        if !file_written(path).await {
            warn!(%url, "Browser exited without writing a screenshot");
            return false;
        }

        true
    }
}

async fn discard(path: &Path) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            debug!(path = %path.display(), error = %err, "Failed to remove scratch screenshot");
        }
    }
}

async fn file_written(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|meta| meta.len() > 0)
        .unwrap_or(false)
}
