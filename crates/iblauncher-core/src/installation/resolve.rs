//! Installation resolver: strategy orchestration and caching.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::descriptor::{DESCRIPTOR_DIR, DESCRIPTOR_FILE_NAME, descriptor_path};
use super::env::{EnvProvider, SystemEnv};
use super::fs::{FsProvider, SystemFs};
use super::search::InstallationSearcher;
use super::types::{Attempt, InstallationSource, Resolution, ResolvedInstallation};
use crate::config::ResolverConfig;
use crate::diagnostics::{DiagnosticSink, StdoutSink};
use crate::error::InstallationError;

/// Locates the IntegrationBus binary and library directories.
///
/// Discovery runs lazily on the first query and its result is cached for the
/// lifetime of the resolver. Search order:
/// 1. Paths configured in `<anchor>/data/IbInstallation.json`
/// 2. Local layout: `<anchor>` and `<anchor>/../lib`
/// 3. Deployment hierarchy (platform-specific)
/// 4. `PATH` scan for the library (Windows only)
///
/// A cached installation is never searched for again. Queries re-check that
/// its artifacts still exist and report the outcome, but keep the cached
/// paths; call [`invalidate`](Self::invalidate) to force a fresh search.
pub struct InstallationResolver {
    config: ResolverConfig,
    env: Box<dyn EnvProvider>,
    fs: Box<dyn FsProvider>,
    diagnostics: Box<dyn DiagnosticSink>,
    cache: Mutex<Option<Resolution>>,
}

impl InstallationResolver {
    /// Resolver over the real process environment and filesystem, printing to stdout.
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_deps(
            config,
            Box::new(SystemEnv),
            Box::new(SystemFs),
            Box::new(StdoutSink),
        )
    }

    /// Resolver with injected dependencies (for testing and embedding).
    pub fn with_deps(
        config: ResolverConfig,
        env: Box<dyn EnvProvider>,
        fs: Box<dyn FsProvider>,
        diagnostics: Box<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            config,
            env,
            fs,
            diagnostics,
            cache: Mutex::new(None),
        }
    }

    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub(crate) fn env(&self) -> &dyn EnvProvider {
        self.env.as_ref()
    }

    /// Whether an installation can be found (or is cached and still present).
    pub fn is_installed(&self, verbose: bool) -> bool {
        let mut cache = self.lock_cache();
        self.determine(&mut cache, verbose)
    }

    /// Directory containing the IntegrationBus binaries, resolving on first use.
    pub fn binary_path(&self) -> Option<PathBuf> {
        self.installation().map(|i| i.binary_path)
    }

    /// Directory containing the IntegrationBus library, resolving on first use.
    pub fn library_path(&self) -> Option<PathBuf> {
        self.installation().map(|i| i.library_path)
    }

    /// The discovered installation, resolving on first use.
    pub fn installation(&self) -> Option<ResolvedInstallation> {
        let mut cache = self.lock_cache();
        self.determine(&mut cache, self.config.verbose);
        cache.as_ref().map(|r| r.installation.clone())
    }

    /// Typed access to the full discovery outcome.
    ///
    /// Unlike [`is_installed`](Self::is_installed), a cached resolution is
    /// returned as-is even if its artifacts have since disappeared.
    pub fn resolution(&self) -> Result<Resolution, InstallationError> {
        let mut cache = self.lock_cache();
        self.determine(&mut cache, self.config.verbose);
        cache.clone().ok_or_else(|| InstallationError::NotFound {
            descriptor_path: self.descriptor_path(),
        })
    }

    /// Drop the cached installation so the next query searches again.
    pub fn invalidate(&self) {
        *self.lock_cache() = None;
    }

    /// Where the installation descriptor is expected.
    pub fn descriptor_path(&self) -> PathBuf {
        self.config.resolve_anchor_dir().map_or_else(
            || Path::new(DESCRIPTOR_DIR).join(DESCRIPTOR_FILE_NAME),
            |anchor| descriptor_path(&anchor),
        )
    }

    /// Path of the platform library inside the resolved library directory.
    pub fn library_file(&self) -> Option<PathBuf> {
        self.library_path()
            .map(|dir| dir.join(self.config.platform.library_file_name()))
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<Resolution>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn searcher(&self) -> InstallationSearcher<'_> {
        InstallationSearcher::new(
            self.config.platform,
            self.env.as_ref(),
            self.fs.as_ref(),
            self.diagnostics.as_ref(),
        )
    }

    /// Fill the cache if empty; report whether the installation is usable.
    fn determine(&self, cache: &mut Option<Resolution>, verbose: bool) -> bool {
        if let Some(resolution) = cache.as_ref() {
            let valid = self
                .searcher()
                .revalidate(resolution.source, &resolution.installation);
            if !valid {
                tracing::warn!(
                    binary_path = %resolution.installation.binary_path.display(),
                    library_path = %resolution.installation.library_path.display(),
                    "Cached IntegrationBus installation no longer present"
                );
            }
            return valid;
        }

        match self.search() {
            Some(resolution) => {
                tracing::info!(
                    source = %resolution.source,
                    binary_path = %resolution.installation.binary_path.display(),
                    library_path = %resolution.installation.library_path.display(),
                    "Found IntegrationBus installation"
                );
                if verbose {
                    self.report_success(&resolution);
                }
                *cache = Some(resolution);
                true
            }
            None => {
                let error = InstallationError::NotFound {
                    descriptor_path: self.descriptor_path(),
                };
                tracing::error!("{error}");
                self.diagnostics.error(&error.to_string());
                false
            }
        }
    }

    /// Run the strategies in order, stopping at the first success.
    fn search(&self) -> Option<Resolution> {
        let searcher = self.searcher();
        let mut all_attempts = Vec::new();

        match self.config.resolve_anchor_dir() {
            Some(anchor) => {
                // Step 1: installation descriptor
                let attempts = searcher.search_descriptor(&anchor);
                if let Some(resolution) = finish(attempts, &mut all_attempts) {
                    return Some(resolution);
                }

                // Step 2: local layout
                let attempts = searcher.search_local_layout(&anchor);
                if let Some(resolution) = finish(attempts, &mut all_attempts) {
                    return Some(resolution);
                }

                // Step 3: deployment hierarchy
                let attempts = searcher.search_deployment_hierarchy(&anchor);
                if let Some(resolution) = finish(attempts, &mut all_attempts) {
                    return Some(resolution);
                }
            }
            None => {
                tracing::warn!("No anchor directory; skipping descriptor and relative layouts");
            }
        }

        // Step 4: PATH scan
        finish(searcher.search_in_path(), &mut all_attempts)
    }

    fn report_success(&self, resolution: &Resolution) {
        let message = match resolution.source {
            InstallationSource::Descriptor => format!(
                "Found IntegrationBus installation at paths configured in '{}'",
                self.descriptor_path().display()
            ),
            InstallationSource::LocalLayout => {
                "Found IntegrationBus installation at local paths".to_string()
            }
            InstallationSource::DeploymentHierarchy(_) => {
                "Found IntegrationBus installation that was installed with this Launcher"
                    .to_string()
            }
            InstallationSource::SearchPath => {
                "Found IntegrationBus installation on the Windows PATH environment".to_string()
            }
        };
        self.diagnostics.info(&message);
        self.diagnostics.info(&format!(
            "  Location for IntegrationBus binaries: '{}'",
            resolution.installation.binary_path.display()
        ));
        self.diagnostics.info(&format!(
            "  Location for IntegrationBus libraries: '{}'",
            resolution.installation.library_path.display()
        ));
    }
}

impl std::fmt::Debug for InstallationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallationResolver")
            .field("config", &self.config)
            .field("cache", &*self.lock_cache())
            .finish_non_exhaustive()
    }
}

/// Record a strategy's attempts and build a resolution if one succeeded.
fn finish(attempts: Vec<Attempt>, all_attempts: &mut Vec<Attempt>) -> Option<Resolution> {
    let success = attempts
        .iter()
        .find(|a| a.outcome.is_success())
        .map(|a| (a.source, a.candidate.clone()));
    all_attempts.extend(attempts);

    success.map(|(source, installation)| Resolution {
        installation,
        source,
        attempts: std::mem::take(all_attempts),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticLevel, RecordingSink};
    use crate::installation::env::MockEnv;
    use crate::installation::fs::MockFs;
    use crate::installation::types::HierarchyVariant;
    use crate::platform::Platform;
    use std::sync::Arc;

    const ANCHOR: &str = "/opt/ib/share/doc/IntegrationBus-Launcher/iblauncher";

    fn resolver(
        platform: Platform,
        env: MockEnv,
        fs: MockFs,
    ) -> (InstallationResolver, Arc<MockFs>, Arc<RecordingSink>) {
        let fs = Arc::new(fs);
        let sink = Arc::new(RecordingSink::new());
        let config = ResolverConfig::default()
            .with_anchor_dir(ANCHOR)
            .with_platform(platform)
            .with_verbose(false);
        let resolver = InstallationResolver::with_deps(
            config,
            Box::new(env),
            Box::new(Arc::clone(&fs)),
            Box::new(Arc::clone(&sink)),
        );
        (resolver, fs, sink)
    }

    fn descriptor_fs() -> MockFs {
        MockFs::new()
            .with_file(
                format!("{ANCHOR}/data/IbInstallation.json"),
                r#"{"INTEGRATIONBUS_BINPATH": "/custom/bin", "INTEGRATIONBUS_LIBPATH": "/custom/lib"}"#,
            )
            .with_dir("/custom/bin")
            .with_file("/custom/lib/libIntegrationBus.so", "")
    }

    fn local_layout(fs: MockFs) -> MockFs {
        fs.with_dir(ANCHOR).with_file(
            "/opt/ib/share/doc/IntegrationBus-Launcher/lib/libIntegrationBus.so",
            "",
        )
    }

    #[test]
    fn test_descriptor_wins_over_local_layout() {
        let (resolver, _, _) = resolver(Platform::Posix, MockEnv::new(), local_layout(descriptor_fs()));

        let resolution = resolver.resolution().unwrap();
        assert_eq!(resolution.source, InstallationSource::Descriptor);
        assert_eq!(
            resolution.installation,
            ResolvedInstallation::new("/custom/bin", "/custom/lib")
        );
    }

    #[test]
    fn test_local_layout_when_descriptor_missing() {
        let (resolver, _, sink) = resolver(Platform::Posix, MockEnv::new(), local_layout(MockFs::new()));

        assert!(resolver.is_installed(false));
        assert_eq!(resolver.binary_path(), Some(PathBuf::from(ANCHOR)));
        assert_eq!(
            resolver.library_path(),
            Some(PathBuf::from("/opt/ib/share/doc/IntegrationBus-Launcher/lib"))
        );
        assert_eq!(sink.count(DiagnosticLevel::Error), 0);
    }

    #[test]
    fn test_invalid_descriptor_reports_error_and_falls_through() {
        let fs = local_layout(MockFs::new().with_file(format!("{ANCHOR}/data/IbInstallation.json"), "{oops"));
        let (resolver, _, sink) = resolver(Platform::Posix, MockEnv::new(), fs);

        let resolution = resolver.resolution().unwrap();
        assert_eq!(resolution.source, InstallationSource::LocalLayout);
        assert_eq!(sink.count(DiagnosticLevel::Error), 1);
    }

    #[test]
    fn test_descriptor_pointing_nowhere_falls_through() {
        let fs = local_layout(MockFs::new().with_file(
            format!("{ANCHOR}/data/IbInstallation.json"),
            r#"{"INTEGRATIONBUS_BINPATH": "/gone/bin", "INTEGRATIONBUS_LIBPATH": "/gone/lib"}"#,
        ));
        let (resolver, _, _) = resolver(Platform::Posix, MockEnv::new(), fs);

        let resolution = resolver.resolution().unwrap();
        assert_eq!(resolution.source, InstallationSource::LocalLayout);
        assert_eq!(resolution.attempts.len(), 2);
        assert!(!resolution.attempts[0].outcome.is_success());
    }

    #[test]
    fn test_posix_deployment_hierarchy() {
        let fs = MockFs::new()
            .with_dir("/opt/ib/bin")
            .with_file("/opt/ib/lib/libIntegrationBus.so", "");
        let (resolver, _, _) = resolver(Platform::Posix, MockEnv::new(), fs);

        let resolution = resolver.resolution().unwrap();
        assert_eq!(
            resolution.source,
            InstallationSource::DeploymentHierarchy(HierarchyVariant::Posix)
        );
        assert_eq!(
            resolution.installation,
            ResolvedInstallation::new("/opt/ib/bin", "/opt/ib/lib")
        );
    }

    #[test]
    fn test_windows_release_layout_wins_over_debug() {
        let fs = MockFs::new()
            .with_dir("/opt/ib/share/doc/Release/bin")
            .with_file("/opt/ib/share/doc/Release/lib/IntegrationBus.dll", "")
            .with_dir("/opt/ib/share/doc/Debug/bin")
            .with_file("/opt/ib/share/doc/Debug/lib/IntegrationBus.dll", "");
        let (resolver, _, _) = resolver(Platform::Windows, MockEnv::new(), fs);

        let resolution = resolver.resolution().unwrap();
        assert_eq!(
            resolution.source,
            InstallationSource::DeploymentHierarchy(HierarchyVariant::Release)
        );
        assert_eq!(
            resolution.installation,
            ResolvedInstallation::new("/opt/ib/share/doc/Release/bin", "/opt/ib/share/doc/Release/lib")
        );
        // Local layout, then Release; Debug is never checked
        assert_eq!(resolution.attempts.len(), 2);
    }

    #[test]
    fn test_windows_search_path_accepted_without_bin_dir() {
        let env = MockEnv::new().with_var("PATH", "/sys;/sdk/lib;/other/lib");
        let fs = MockFs::new()
            .with_file("/sdk/lib/IntegrationBus.dll", "")
            .with_file("/other/lib/IntegrationBus.dll", "");
        let (resolver, _, _) = resolver(Platform::Windows, env, fs);

        let resolution = resolver.resolution().unwrap();
        assert_eq!(resolution.source, InstallationSource::SearchPath);
        assert_eq!(
            resolution.installation,
            ResolvedInstallation::new("/sdk/bin", "/sdk/lib")
        );
        assert!(resolver.is_installed(false));
    }

    #[test]
    fn test_posix_never_scans_search_path() {
        let env = MockEnv::new().with_var("PATH", "/sdk/lib");
        let fs = MockFs::new().with_file("/sdk/lib/libIntegrationBus.so", "");
        let (resolver, _, sink) = resolver(Platform::Posix, env, fs);

        assert!(!resolver.is_installed(false));
        assert!(sink.contains(DiagnosticLevel::Error, "No IntegrationBus installation found"));
        assert!(sink.contains(DiagnosticLevel::Error, "data/IbInstallation.json"));
    }

    #[test]
    fn test_failure_caches_nothing() {
        let (resolver, _, _) = resolver(Platform::Posix, MockEnv::new(), MockFs::new());

        assert!(matches!(
            resolver.resolution(),
            Err(InstallationError::NotFound { .. })
        ));
        assert_eq!(resolver.binary_path(), None);
        assert_eq!(resolver.library_path(), None);
    }

    #[test]
    fn test_cached_paths_survive_removal_but_report_missing() {
        let (resolver, fs, _) = resolver(Platform::Posix, MockEnv::new(), descriptor_fs());
        let first = resolver.resolution().unwrap();

        fs.remove("/custom");

        assert!(!resolver.is_installed(false));
        assert_eq!(resolver.resolution().unwrap(), first);
        assert_eq!(resolver.binary_path(), Some(PathBuf::from("/custom/bin")));
    }

    #[test]
    fn test_cache_is_not_re_searched_until_invalidated() {
        let (resolver, fs, _) =
            resolver(Platform::Posix, MockEnv::new(), local_layout(MockFs::new()));
        assert_eq!(
            resolver.resolution().unwrap().source,
            InstallationSource::LocalLayout
        );

        // A descriptor installed later does not change the cached answer
        fs.add_file(
            format!("{ANCHOR}/data/IbInstallation.json"),
            r#"{"INTEGRATIONBUS_BINPATH": "/custom/bin", "INTEGRATIONBUS_LIBPATH": "/custom/lib"}"#,
        );
        fs.add_dir("/custom/bin");
        fs.add_file("/custom/lib/libIntegrationBus.so", "");
        assert_eq!(
            resolver.resolution().unwrap().source,
            InstallationSource::LocalLayout
        );

        resolver.invalidate();
        assert_eq!(
            resolver.resolution().unwrap().source,
            InstallationSource::Descriptor
        );
    }

    #[test]
    fn test_concurrent_first_query_searches_once() {
        let (resolver, _, sink) = resolver(Platform::Posix, MockEnv::new(), local_layout(MockFs::new()));
        let resolver = Arc::new(resolver);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                std::thread::spawn(move || resolver.is_installed(true))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
        // One search, one success report
        assert_eq!(sink.count(DiagnosticLevel::Info), 3);
        assert_eq!(sink.lines().len(), 3);
    }

    #[test]
    fn test_verbose_reports_strategy_and_paths() {
        let (resolver, _, sink) = resolver(Platform::Posix, MockEnv::new(), local_layout(MockFs::new()));

        assert!(resolver.is_installed(true));
        let lines = sink.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].1.contains("at local paths"));
        assert!(lines[1].1.contains("binaries"));
        assert!(lines[2].1.contains("libraries"));

        // Cached queries stay quiet
        assert!(resolver.is_installed(true));
        assert_eq!(sink.lines().len(), 3);
    }
}
