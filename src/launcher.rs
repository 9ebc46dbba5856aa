//! Opening the finished tile in the system's default viewer.
//!
//! [`FileLauncher`] is the seam: the binary uses [`SystemLauncher`], tests
//! substitute a recorder. The platform is resolved once, when the launcher
//! is built.
//!
//! | Platform | Command |
//! |---|---|
//! | Windows | `cmd /C start "" <file>` |
//! | macOS | `open <file>` |
//! | Linux | `xdg-open <file>` |
//!
//! Any other platform yields [`LaunchError::UnsupportedPlatform`].

use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Opening files is not implemented for platform '{0}'")]
    UnsupportedPlatform(String),
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can show a file to the user.
pub trait FileLauncher {
    fn open(&self, path: &Path) -> Result<(), LaunchError>;
}

/// Host platforms with a known "open with default application" command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Unsupported(String),
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            other => Platform::Unsupported(other.to_string()),
        }
    }

    /// Build, without running, the command that opens `path`.
    pub fn open_command(&self, path: &Path) -> Result<Command, LaunchError> {
        let command = match self {
            Platform::Windows => {
                let mut cmd = Command::new("cmd");
                // The empty argument is the window title `start` expects
                // before a quoted path.
                cmd.args(["/C", "start", ""]).arg(path);
                cmd
            }
            Platform::MacOs => {
                let mut cmd = Command::new("open");
                cmd.arg(path);
                cmd
            }
            Platform::Linux => {
                let mut cmd = Command::new("xdg-open");
                cmd.arg(path);
                cmd
            }
            Platform::Unsupported(os) => return Err(LaunchError::UnsupportedPlatform(os.clone())),
        };
        Ok(command)
    }
}

/// Launches the platform's default application, detached.
#[derive(Debug, Clone)]
pub struct SystemLauncher {
    platform: Platform,
}

impl SystemLauncher {
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLauncher for SystemLauncher {
    fn open(&self, path: &Path) -> Result<(), LaunchError> {
        let mut command = self.platform.open_command(path)?;
        let program = command.get_program().to_string_lossy().into_owned();
        debug!(%program, path = %path.display(), "opening in default viewer");
        // Not waited on: the viewer outlives this process.
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn { program, source })?;
        Ok(())
    }
}
