//! Variable resolution for launch configuration text.
//!
//! Five IntegrationBus placeholders are substituted literally, each in the
//! notations `%NAME%`, `${NAME}` and `$NAME`. Remaining environment
//! references and a leading `~` are expanded afterwards.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::path::{MAIN_SEPARATOR, Path};
use std::sync::LazyLock;

use crate::environment::{
    BINPATH_VAR, CONFIGFILE_VAR, DOMAINID_VAR, LIBPATH_VAR, PARTICIPANTNAME_VAR,
    ParticipantContext,
};
use crate::installation::{EnvProvider, InstallationResolver};
use crate::paths::with_trailing_separator;
use crate::platform::Platform;

/// `$NAME` and `${NAME}`.
static POSIX_ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{(?P<braced>[^}]*)\}|(?P<bare>\w+))").expect("valid env reference pattern")
});

/// `%NAME%`, `${NAME}` and `$NAME`.
static WINDOWS_ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?P<percent>[^%]+)%|\$(?:\{(?P<braced>[^}]*)\}|(?P<bare>[\w-]+))")
        .expect("valid env reference pattern")
});

impl InstallationResolver {
    /// Substitute IntegrationBus placeholders, then environment references and `~`.
    ///
    /// Resolves the installation on first use. If none is found the binary and
    /// library placeholders become empty text.
    pub fn resolve_variables(&self, text: &str, context: &ParticipantContext<'_>) -> String {
        let binary_path = self.binary_path();
        let library_path = self.library_path();

        let mut text = text.to_string();
        text = substitute_variable(&text, BINPATH_VAR, &directory_value(binary_path.as_deref()));
        text = substitute_variable(&text, LIBPATH_VAR, &directory_value(library_path.as_deref()));
        text = substitute_variable(&text, CONFIGFILE_VAR, &context.config_file_text());
        text = substitute_variable(&text, PARTICIPANTNAME_VAR, context.participant_name);
        text = substitute_variable(&text, DOMAINID_VAR, &context.domain_id.to_string());

        let text = expand_env_vars(&text, self.config().platform, self.env());
        expand_user(&text, self.env()).into_owned()
    }
}

fn directory_value(path: Option<&Path>) -> String {
    path.map(with_trailing_separator).unwrap_or_default()
}

/// Replace `%name%`, `${name}` and `$name` with `value`, in that order.
///
/// The order matters: replacing `$name` first would leave a dangling `}` of
/// `${name}` behind.
pub fn substitute_variable(text: &str, name: &str, value: &str) -> String {
    text.replace(&format!("%{name}%"), value)
        .replace(&format!("${{{name}}}"), value)
        .replace(&format!("${name}"), value)
}

/// Expand environment references; unknown variables are left unchanged.
pub fn expand_env_vars(text: &str, platform: Platform, env: &dyn EnvProvider) -> String {
    let pattern: &Regex = match platform {
        Platform::Posix => &*POSIX_ENV_REF,
        Platform::Windows => &*WINDOWS_ENV_REF,
    };

    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            let name = caps
                .name("percent")
                .or_else(|| caps.name("braced"))
                .or_else(|| caps.name("bare"))
                .map_or("", |m| m.as_str());
            match env.get(name).filter(|_| !name.is_empty()) {
                Some(value) => value.to_string_lossy().into_owned(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Replace a leading `~` (alone or followed by a separator) with the home directory.
///
/// `~user` forms are left unchanged, as is everything when no home directory
/// is known.
pub fn expand_user<'a>(text: &'a str, env: &dyn EnvProvider) -> Cow<'a, str> {
    let Some(rest) = text.strip_prefix('~') else {
        return Cow::Borrowed(text);
    };
    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with(MAIN_SEPARATOR)) {
        return Cow::Borrowed(text);
    }
    match env.home_dir() {
        Some(home) => {
            let home = home.to_string_lossy();
            let home = if rest.is_empty() {
                &*home
            } else {
                home.trim_end_matches(['/', MAIN_SEPARATOR])
            };
            Cow::Owned(format!("{home}{rest}"))
        }
        None => Cow::Borrowed(text),
    }
}
