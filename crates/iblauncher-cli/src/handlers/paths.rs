//! Paths command handler.
//!
//! Displays the resolved installation for diagnostics and debugging.

use anyhow::Result;
use std::fmt;

use iblauncher_core::{InstallationResolver, Platform, Resolution};

/// Resolved installation in `key = value` form.
struct PathsReport<'a> {
    platform: Platform,
    resolution: &'a Resolution,
    library_file: String,
    show_attempts: bool,
}

impl fmt::Display for PathsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let installation = &self.resolution.installation;
        writeln!(f, "platform = {}", self.platform)?;
        writeln!(f, "source = {}", self.resolution.source)?;
        writeln!(f, "binary_path = {}", installation.binary_path.display())?;
        writeln!(f, "library_path = {}", installation.library_path.display())?;
        write!(f, "library_file = {}", self.library_file)?;

        if self.show_attempts {
            for attempt in &self.resolution.attempts {
                write!(
                    f,
                    "\nattempt = {}: {} | {} ({})",
                    attempt.source,
                    attempt.candidate.binary_path.display(),
                    attempt.candidate.library_path.display(),
                    attempt.outcome
                )?;
            }
        }
        Ok(())
    }
}

/// Execute the paths command.
///
/// With `verbose`, every candidate checked along the way is listed too.
pub fn execute(resolver: &InstallationResolver, verbose: bool) -> Result<bool> {
    let Ok(resolution) = resolver.resolution() else {
        return Ok(false);
    };

    let library_file = resolver
        .library_file()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    let report = PathsReport {
        platform: resolver.config().platform,
        resolution: &resolution,
        library_file,
        show_attempts: verbose,
    };
    println!("{report}");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use iblauncher_core::{Attempt, AttemptOutcome, InstallationSource, ResolvedInstallation};

    fn resolution() -> Resolution {
        let installation = ResolvedInstallation::new("/ib/bin", "/ib/lib");
        Resolution {
            installation: installation.clone(),
            source: InstallationSource::LocalLayout,
            attempts: vec![Attempt {
                source: InstallationSource::LocalLayout,
                candidate: installation,
                outcome: AttemptOutcome::Ok,
            }],
        }
    }

    #[test]
    fn test_report_key_value_lines() {
        let resolution = resolution();
        let report = PathsReport {
            platform: Platform::Posix,
            resolution: &resolution,
            library_file: "/ib/lib/libIntegrationBus.so".to_string(),
            show_attempts: false,
        };
        let output = report.to_string();

        assert!(output.contains("platform = posix"), "missing platform");
        assert!(output.contains("source = "), "missing source");
        assert!(output.contains("binary_path = "), "missing binary_path");
        assert!(output.contains("library_path = "), "missing library_path");
        assert!(output.contains("library_file = /ib/lib/libIntegrationBus.so"));
        assert!(!output.contains("attempt = "));
    }

    #[test]
    fn test_report_lists_attempts_when_verbose() {
        let resolution = resolution();
        let report = PathsReport {
            platform: Platform::Posix,
            resolution: &resolution,
            library_file: String::new(),
            show_attempts: true,
        };

        assert_eq!(report.to_string().matches("attempt = ").count(), 1);
    }
}
