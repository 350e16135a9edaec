//! The install command: resolve plugin directories and feed their
//! requirements files to the package installer.

use crate::errors::InstallError;
use crate::installer::PackageInstaller;
use crate::logger;
use crate::plugins::{resolve_plugin_paths, RequirementKind, RequirementSelection};
use colored::Colorize;
use std::path::Path;

/// Install the requirements of the selected plugins
///
/// A plugin name that doesn't match a directory is reported and skipped.
/// A plugin directory without the requested requirements files installs
/// nothing. Installer failures are logged per file and don't stop the run.
pub fn install_requirements(
    ext_path: &Path,
    plugin_names: &[String],
    selection: RequirementSelection,
    installer: &dyn PackageInstaller,
) -> Result<(), InstallError> {
    let total_start = std::time::Instant::now();

    logger::debug(&format!("Extensions root: {}", ext_path.display()));
    let paths = resolve_plugin_paths(ext_path, plugin_names)?;

    let mut installed = 0usize;
    let mut failed = 0usize;

    for path in &paths {
        if !path.is_dir() {
            println!(
                "Plugin with name \"{}\" not found. Skipping...",
                plugin_display_name(path)
            );
            continue;
        }

        for kind in RequirementKind::ALL {
            if !selection.includes(kind) {
                continue;
            }

            let requirements = path.join(kind.file_name());
            if !requirements.is_file() {
                continue;
            }

            logger::info(&format!("Installing: {}", requirements.display()));
            match installer.install_from(&requirements) {
                Ok(()) => {
                    println!(" {} {}", "+".bold().green(), requirements.display());
                    installed += 1;
                }
                Err(e) => {
                    // Keep going; the remaining plugins are independent
                    logger::error(&e.to_string());
                    failed += 1;
                }
            }
        }
    }

    let elapsed_ms = total_start.elapsed().as_millis();
    let summary = if failed > 0 {
        format!(
            "Installed {} requirements file(s), {} failed in {}ms",
            installed, failed, elapsed_ms
        )
    } else {
        format!(
            "Installed {} requirements file(s) in {}ms",
            installed, elapsed_ms
        )
    };
    println!("{}", summary.bold().dimmed());

    Ok(())
}

/// User-facing plugin name for the "not found" message
fn plugin_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Records requested files instead of invoking pip
    struct RecordingInstaller {
        calls: RefCell<Vec<PathBuf>>,
        fail: bool,
    }

    impl RecordingInstaller {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail: true,
            }
        }

        fn calls(&self) -> Vec<PathBuf> {
            self.calls.borrow().clone()
        }
    }

    impl PackageInstaller for RecordingInstaller {
        fn install_from(&self, requirements: &Path) -> Result<(), InstallError> {
            self.calls.borrow_mut().push(requirements.to_path_buf());
            if self.fail {
                return Err(InstallError::InstallerFailed {
                    file: requirements.display().to_string(),
                    code: 1,
                });
            }
            Ok(())
        }
    }

    fn make_plugin(ext: &Path, name: &str, kinds: &[RequirementKind]) -> PathBuf {
        let dir = ext.join(name);
        fs::create_dir(&dir).expect("mkdir plugin");
        for kind in kinds {
            fs::write(dir.join(kind.file_name()), "somepackage==1.0\n").expect("write reqs");
        }
        dir
    }

    #[test]
    fn test_plugin_without_requirements_installs_nothing() {
        let ext = TempDir::new().expect("tempdir");
        make_plugin(ext.path(), "empty", &[]);

        let installer = RecordingInstaller::new();
        install_requirements(
            ext.path(),
            &["empty".to_string()],
            RequirementSelection::All,
            &installer,
        )
        .expect("install");

        assert!(installer.calls().is_empty());
    }

    #[test]
    fn test_export_only_skips_render_file() {
        let ext = TempDir::new().expect("tempdir");
        make_plugin(ext.path(), "pdf", &[RequirementKind::Render]);

        let installer = RecordingInstaller::new();
        install_requirements(
            ext.path(),
            &["pdf".to_string()],
            RequirementSelection::ExportOnly,
            &installer,
        )
        .expect("install");
        assert!(installer.calls().is_empty());

        let installer = RecordingInstaller::new();
        install_requirements(
            ext.path(),
            &["pdf".to_string()],
            RequirementSelection::All,
            &installer,
        )
        .expect("install");
        assert_eq!(
            installer.calls(),
            vec![ext.path().join("pdf").join("render-requirements.txt")]
        );
    }

    #[test]
    fn test_render_only_selects_render_file() {
        let ext = TempDir::new().expect("tempdir");
        make_plugin(
            ext.path(),
            "tabular",
            &[RequirementKind::Render, RequirementKind::Export],
        );

        let installer = RecordingInstaller::new();
        install_requirements(
            ext.path(),
            &["tabular".to_string()],
            RequirementSelection::RenderOnly,
            &installer,
        )
        .expect("install");

        assert_eq!(
            installer.calls(),
            vec![ext.path().join("tabular").join("render-requirements.txt")]
        );
    }

    #[test]
    fn test_missing_plugin_is_skipped_not_fatal() {
        let ext = TempDir::new().expect("tempdir");
        make_plugin(ext.path(), "audio", &[RequirementKind::Export]);

        let installer = RecordingInstaller::new();
        install_requirements(
            ext.path(),
            &["missing".to_string(), "audio".to_string()],
            RequirementSelection::All,
            &installer,
        )
        .expect("install");

        // Processing continued past the missing plugin
        assert_eq!(
            installer.calls(),
            vec![ext.path().join("audio").join("export-requirements.txt")]
        );
    }

    #[test]
    fn test_all_installs_every_plugin_with_requirements() {
        let ext = TempDir::new().expect("tempdir");
        make_plugin(ext.path(), "a", &[RequirementKind::Render]);
        make_plugin(ext.path(), "b", &[]);

        let installer = RecordingInstaller::new();
        install_requirements(
            ext.path(),
            &["all".to_string()],
            RequirementSelection::All,
            &installer,
        )
        .expect("install");

        assert_eq!(
            installer.calls(),
            vec![ext.path().join("a").join("render-requirements.txt")]
        );
    }

    #[test]
    fn test_installer_failure_does_not_abort_run() {
        let ext = TempDir::new().expect("tempdir");
        make_plugin(ext.path(), "a", &[RequirementKind::Render]);
        make_plugin(ext.path(), "b", &[RequirementKind::Render]);

        let installer = RecordingInstaller::failing();
        install_requirements(
            ext.path(),
            &["all".to_string()],
            RequirementSelection::All,
            &installer,
        )
        .expect("install");

        // Both plugins were still attempted
        assert_eq!(installer.calls().len(), 2);
    }
}
