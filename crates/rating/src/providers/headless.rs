//! Headless Chromium provider.
//!
//! Runs `--dump-dom` against the crime page with a throw-away profile.
//! The page gets a virtual time budget to settle before the DOM is
//! serialized to stdout, which we redirect into a file in the profile's
//! temp directory.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use salemap_config::CrimeSettings;
use tempfile::TempDir;

use super::{crime_page_url, EvidenceProvider};
use crate::error::FetchError;

/// Executable names searched on `PATH`, in order.
const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
    "microsoft-edge",
];

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct HeadlessBrowser {
    binary: PathBuf,
    base_url: String,
    user_agent: String,
    timeout: Duration,
    settle: Duration,
}

impl HeadlessBrowser {
    /// Provider for the configured or discovered browser, or `None` when
    /// no browser is installed.
    pub fn probe(settings: &CrimeSettings) -> Option<Self> {
        let binary = Self::locate(settings.browser_path.as_deref())?;
        log::debug!("headless browser: {}", binary.display());
        Some(Self::with_binary(settings, binary, &settings.base_url))
    }

    pub fn with_binary(settings: &CrimeSettings, binary: PathBuf, base_url: &str) -> Self {
        Self {
            binary,
            base_url: base_url.to_string(),
            user_agent: settings.user_agent.clone(),
            timeout: settings.headless_timeout(),
            settle: settings.settle(),
        }
    }

    /// An explicit path must exist; otherwise search `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Some(path.to_path_buf());
            }
            log::warn!("configured browser not found: {}", path.display());
            return None;
        }
        BROWSER_CANDIDATES
            .iter()
            .find_map(|name| which::which(name).ok())
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    pub fn try_fetch(&self, zip: &str) -> Result<String, FetchError> {
        let url = crime_page_url(&self.base_url, zip);
        let scratch = TempDir::new()?;
        let profile = scratch.path().join("profile");
        let dom_path = scratch.path().join("dom.html");
        let dom_file = File::create(&dom_path)?;

        let mut command = Command::new(&self.binary);
        command
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg(format!("--user-agent={}", self.user_agent))
            .arg(format!("--virtual-time-budget={}", self.settle.as_millis()))
            .arg(format!("--user-data-dir={}", profile.display()))
            .arg("--dump-dom")
            .arg(&url)
            .stdin(Stdio::null())
            .stdout(Stdio::from(dom_file))
            .stderr(Stdio::null());

        // Own process group, so renderer and zygote children die with it
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let child = command
            .spawn()
            .map_err(|e| FetchError::Browser(format!("spawn {}: {}", self.binary.display(), e)))?;

        // Dropped before `scratch`, so the process is gone before its
        // profile directory is removed.
        let mut session = BrowserSession { child };
        let status = session.wait_until(Instant::now() + self.timeout, self.timeout)?;

        if !status.success() {
            return Err(FetchError::Browser(format!("exited with {status}")));
        }

        let dom = fs::read_to_string(&dom_path)?;
        if dom.trim().is_empty() {
            return Err(FetchError::Browser("empty DOM".to_string()));
        }
        Ok(dom)
    }
}

impl EvidenceProvider for HeadlessBrowser {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn fetch(&self, zip: &str) -> Option<String> {
        match self.try_fetch(zip) {
            Ok(dom) => Some(dom),
            Err(e) => {
                log::debug!("headless fetch {} failed: {}", zip, e);
                None
            }
        }
    }
}

/// Owns the browser process; kills its process group and reaps it on drop.
struct BrowserSession {
    child: Child,
}

impl BrowserSession {
    fn wait_until(
        &mut self,
        deadline: Instant,
        budget: Duration,
    ) -> Result<std::process::ExitStatus, FetchError> {
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                return Err(FetchError::Timeout(budget));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Leader still running, so its pgid cannot have been reused
        if let Ok(None) = self.child.try_wait() {
            #[cfg(unix)]
            if let Ok(pgid) = i32::try_from(self.child.id()) {
                unsafe {
                    libc::kill(-pgid, libc::SIGKILL);
                }
            }
            let _ = self.child.kill();
        }
        let _ = self.child.wait();
    }
}
