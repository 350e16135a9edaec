//! Invocation of the external package installer
//!
//! The core never talks to pip directly; it goes through the
//! [`PackageInstaller`] trait so tests can substitute a recording fake.

use crate::errors::InstallError;
use crate::logger;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Capability interface for "install packages from this requirements file"
pub trait PackageInstaller {
    fn install_from(&self, requirements: &Path) -> Result<(), InstallError>;
}

/// Shells out to pip, streaming its output straight to the terminal
pub struct PipInstaller {
    pip_path: String,
    wheelhouse: Option<PathBuf>,
}

impl PipInstaller {
    pub fn new(pip_path: String, wheelhouse: Option<PathBuf>) -> Self {
        Self {
            pip_path,
            wheelhouse,
        }
    }
}

impl PackageInstaller for PipInstaller {
    fn install_from(&self, requirements: &Path) -> Result<(), InstallError> {
        let mut install_args: Vec<OsString> = vec![
            OsString::from("install"),
            OsString::from("-r"),
            requirements.as_os_str().to_os_string(),
        ];

        if let Some(ref wheelhouse) = self.wheelhouse {
            install_args.push(OsString::from("--find-links"));
            install_args.push(wheelhouse.as_os_str().to_os_string());
        }

        let args_display = install_args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        logger::debug(&format!("Running: {} {}", self.pip_path, args_display));

        // Use inherited stdio so pip's own progress and errors reach the user
        let status = Command::new(&self.pip_path)
            .args(&install_args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| InstallError::InstallerSpawn {
                file: requirements.display().to_string(),
                source: e,
            })?;

        if !status.success() {
            return Err(InstallError::InstallerFailed {
                file: requirements.display().to_string(),
                code: status.code().unwrap_or(-1),
            });
        }

        Ok(())
    }
}
