//! Candidate layouts for each discovery strategy.

use std::path::{Path, PathBuf};

use super::descriptor::{InstallationDescriptor, descriptor_path};
use super::env::EnvProvider;
use super::fs::FsProvider;
use super::types::{
    Attempt, AttemptOutcome, HierarchyVariant, InstallationSource, ResolvedInstallation,
};
use crate::diagnostics::DiagnosticSink;
use crate::paths::absolutize;
use crate::platform::Platform;

/// Proposes and validates installation candidates for one platform.
pub struct InstallationSearcher<'a> {
    platform: Platform,
    env: &'a dyn EnvProvider,
    fs: &'a dyn FsProvider,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> InstallationSearcher<'a> {
    pub fn new(
        platform: Platform,
        env: &'a dyn EnvProvider,
        fs: &'a dyn FsProvider,
        diagnostics: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            platform,
            env,
            fs,
            diagnostics,
        }
    }

    /// Full check: both directories exist and the library file is present.
    pub fn check(&self, candidate: &ResolvedInstallation) -> AttemptOutcome {
        if !self.fs.exists(&candidate.binary_path) {
            return AttemptOutcome::MissingBinaryDir;
        }
        if !self.fs.exists(&candidate.library_path) {
            return AttemptOutcome::MissingLibraryDir;
        }
        if !self.fs.is_file(&self.library_file(&candidate.library_path)) {
            return AttemptOutcome::MissingLibraryFile;
        }
        AttemptOutcome::Ok
    }

    /// Re-check a previously accepted installation with the guarantee its source gave.
    pub fn revalidate(&self, source: InstallationSource, installation: &ResolvedInstallation) -> bool {
        if source.verifies_binary_path() {
            self.check(installation) == AttemptOutcome::Ok
        } else {
            self.fs.exists(&self.library_file(&installation.library_path))
        }
    }

    /// Path of the platform library inside a library directory.
    pub fn library_file(&self, library_path: &Path) -> PathBuf {
        library_path.join(self.platform.library_file_name())
    }

    /// Strategy 1: paths configured in `<anchor>/data/IbInstallation.json`.
    pub fn search_descriptor(&self, anchor: &Path) -> Vec<Attempt> {
        let path = descriptor_path(anchor);
        let descriptor = match InstallationDescriptor::load(self.fs, &path) {
            Ok(Some(descriptor)) => descriptor,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Invalid installation descriptor");
                self.diagnostics.error(&e.to_string());
                return Vec::new();
            }
        };

        let Some((binary, library)) = descriptor.paths() else {
            tracing::debug!(path = %path.display(), "Installation descriptor lacks binary or library path");
            return Vec::new();
        };

        let candidate = ResolvedInstallation::new(
            absolutize(Path::new(binary)),
            absolutize(Path::new(library)),
        );
        vec![self.attempt(InstallationSource::Descriptor, candidate)]
    }

    /// Strategy 2: binaries in the anchor itself, libraries in `../lib`.
    pub fn search_local_layout(&self, anchor: &Path) -> Vec<Attempt> {
        let candidate = ResolvedInstallation::new(
            absolutize(anchor),
            absolutize(&anchor.join("..").join("lib")),
        );
        vec![self.attempt(InstallationSource::LocalLayout, candidate)]
    }

    /// Strategy 3: the deployment hierarchy the launcher was installed into.
    ///
    /// Posix: `<anchor>/../../../../{bin,lib}`, i.e. the prefix the launcher
    /// was installed into below `share/doc/IntegrationBus-Launcher/iblauncher`.
    /// Windows: `<anchor>/../../Release/{bin,lib}`, then `<anchor>/../../Debug/{bin,lib}`.
    pub fn search_deployment_hierarchy(&self, anchor: &Path) -> Vec<Attempt> {
        let variants: &[HierarchyVariant] = match self.platform {
            Platform::Posix => &[HierarchyVariant::Posix],
            Platform::Windows => &[HierarchyVariant::Release, HierarchyVariant::Debug],
        };

        let mut attempts = Vec::new();
        for &variant in variants {
            let root = match variant {
                HierarchyVariant::Posix => anchor.join("..").join("..").join("..").join(".."),
                HierarchyVariant::Release => anchor.join("..").join("..").join("Release"),
                HierarchyVariant::Debug => anchor.join("..").join("..").join("Debug"),
            };
            let candidate = ResolvedInstallation::new(
                absolutize(&root.join("bin")),
                absolutize(&root.join("lib")),
            );
            let attempt = self.attempt(InstallationSource::DeploymentHierarchy(variant), candidate);
            let found = attempt.outcome.is_success();
            attempts.push(attempt);
            if found {
                return attempts;
            }
        }
        attempts
    }

    /// Strategy 4: the library on the `PATH` environment (Windows only).
    ///
    /// The first directory containing the library becomes the library path and
    /// its sibling `bin` the binary path. No further checks are made: whoever
    /// changed `PATH` is trusted to have a matching `bin` folder, or not to use
    /// the binary path at all.
    pub fn search_in_path(&self) -> Vec<Attempt> {
        if !self.platform.scans_search_path() {
            return Vec::new();
        }

        let matches = self.find_library_on_search_path();
        let Some(first) = matches.first() else {
            return Vec::new();
        };
        if matches.len() > 1 {
            tracing::debug!(
                count = matches.len(),
                chosen = %first.display(),
                "Library found in several PATH entries, taking first"
            );
        }

        let candidate = ResolvedInstallation::new(
            absolutize(&first.join("..").join("bin")),
            absolutize(first),
        );
        tracing::debug!(
            binary_path = %candidate.binary_path.display(),
            library_path = %candidate.library_path.display(),
            "Accepting installation from PATH"
        );
        vec![Attempt {
            source: InstallationSource::SearchPath,
            candidate,
            outcome: AttemptOutcome::Accepted,
        }]
    }

    /// Every `PATH` entry that directly contains the library, de-duplicated in order.
    pub fn find_library_on_search_path(&self) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = Vec::new();

        let Some(path_var) = self.env.get("PATH") else {
            return found;
        };
        let path_str = path_var.to_string_lossy();

        for dir in path_str.split(self.platform.search_path_separator()) {
            if dir.is_empty() {
                continue;
            }
            let dir = PathBuf::from(dir);
            if self.fs.exists(&self.library_file(&dir)) && !found.contains(&dir) {
                found.push(dir);
            }
        }
        found
    }

    fn attempt(&self, source: InstallationSource, candidate: ResolvedInstallation) -> Attempt {
        let outcome = self.check(&candidate);
        tracing::debug!(
            %source,
            binary_path = %candidate.binary_path.display(),
            library_path = %candidate.library_path.display(),
            %outcome,
            "Checked installation candidate"
        );
        Attempt {
            source,
            candidate,
            outcome,
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticLevel, NoopSink, RecordingSink};
    use crate::installation::env::MockEnv;
    use crate::installation::fs::MockFs;

    #[test]
    fn test_check_reports_first_missing_piece() {
        let env = MockEnv::new();
        let fs = MockFs::new()
            .with_dir("/ib/bin")
            .with_dir("/ib/lib")
            .with_dir("/only-bin/bin");
        let searcher = InstallationSearcher::new(Platform::Posix, &env, &fs, &NoopSink);

        assert_eq!(
            searcher.check(&ResolvedInstallation::new("/nope/bin", "/ib/lib")),
            AttemptOutcome::MissingBinaryDir
        );
        assert_eq!(
            searcher.check(&ResolvedInstallation::new("/only-bin/bin", "/only-bin/lib")),
            AttemptOutcome::MissingLibraryDir
        );
        assert_eq!(
            searcher.check(&ResolvedInstallation::new("/ib/bin", "/ib/lib")),
            AttemptOutcome::MissingLibraryFile
        );
    }

    #[test]
    fn test_library_file_must_be_a_file() {
        let env = MockEnv::new();
        let fs = MockFs::new()
            .with_dir("/ib/bin")
            .with_dir("/ib/lib/libIntegrationBus.so");
        let searcher = InstallationSearcher::new(Platform::Posix, &env, &fs, &NoopSink);

        assert_eq!(
            searcher.check(&ResolvedInstallation::new("/ib/bin", "/ib/lib")),
            AttemptOutcome::MissingLibraryFile
        );
    }

    #[test]
    fn test_descriptor_parse_failure_emits_error() {
        let env = MockEnv::new();
        let fs = MockFs::new().with_file("/launcher/data/IbInstallation.json", "{ broken");
        let sink = RecordingSink::new();
        let searcher = InstallationSearcher::new(Platform::Posix, &env, &fs, &sink);

        let attempts = searcher.search_descriptor(Path::new("/launcher"));

        assert!(attempts.is_empty());
        assert_eq!(sink.count(DiagnosticLevel::Error), 1);
        assert!(sink.contains(DiagnosticLevel::Error, "IbInstallation.json"));
    }

    #[test]
    fn test_posix_hierarchy_is_four_levels_up() {
        let env = MockEnv::new();
        let fs = MockFs::new()
            .with_dir("/usr/bin")
            .with_file("/usr/lib/libIntegrationBus.so", "");
        let searcher = InstallationSearcher::new(Platform::Posix, &env, &fs, &NoopSink);

        let attempts =
            searcher.search_deployment_hierarchy(Path::new("/usr/share/doc/IntegrationBus-Launcher/iblauncher"));

        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].outcome, AttemptOutcome::Ok);
        assert_eq!(attempts[0].candidate, ResolvedInstallation::new("/usr/bin", "/usr/lib"));
    }

    #[test]
    fn test_windows_hierarchy_falls_back_to_debug() {
        let env = MockEnv::new();
        let fs = MockFs::new()
            .with_dir("/ib/Debug/bin")
            .with_file("/ib/Debug/lib/IntegrationBus.dll", "");
        let searcher = InstallationSearcher::new(Platform::Windows, &env, &fs, &NoopSink);

        let attempts = searcher.search_deployment_hierarchy(Path::new("/ib/Launcher/iblauncher"));

        assert_eq!(attempts.len(), 2);
        assert_eq!(
            attempts[0].source,
            InstallationSource::DeploymentHierarchy(HierarchyVariant::Release)
        );
        assert!(!attempts[0].outcome.is_success());
        assert_eq!(attempts[1].outcome, AttemptOutcome::Ok);
        assert_eq!(
            attempts[1].candidate,
            ResolvedInstallation::new("/ib/Debug/bin", "/ib/Debug/lib")
        );
    }

    #[test]
    fn test_windows_hierarchy_stops_at_release() {
        let env = MockEnv::new();
        let fs = MockFs::new()
            .with_dir("/ib/Release/bin")
            .with_file("/ib/Release/lib/IntegrationBus.dll", "")
            .with_dir("/ib/Debug/bin")
            .with_file("/ib/Debug/lib/IntegrationBus.dll", "");
        let searcher = InstallationSearcher::new(Platform::Windows, &env, &fs, &NoopSink);

        let attempts = searcher.search_deployment_hierarchy(Path::new("/ib/Launcher/iblauncher"));

        assert_eq!(attempts.len(), 1);
        assert_eq!(
            attempts[0].candidate,
            ResolvedInstallation::new("/ib/Release/bin", "/ib/Release/lib")
        );
    }

    #[test]
    fn test_search_path_dedups_in_first_seen_order() {
        let env = MockEnv::new().with_var("PATH", "/a;/sys;/b;;/a;/c");
        let fs = MockFs::new()
            .with_file("/a/IntegrationBus.dll", "")
            .with_file("/b/IntegrationBus.dll", "");
        let searcher = InstallationSearcher::new(Platform::Windows, &env, &fs, &NoopSink);

        assert_eq!(
            searcher.find_library_on_search_path(),
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn test_search_path_skipped_on_posix() {
        let env = MockEnv::new().with_var("PATH", "/a");
        let fs = MockFs::new().with_file("/a/libIntegrationBus.so", "");
        let searcher = InstallationSearcher::new(Platform::Posix, &env, &fs, &NoopSink);

        assert!(searcher.search_in_path().is_empty());
    }
}
