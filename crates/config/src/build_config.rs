//! Build configurations
//!
//! Every binary is built under one named profile. Code that must behave the
//! same across profiles is checked by running it under each of them with
//! `BuildConfiguration::test`.

use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrefsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildConfiguration {
    /// Built locally by a developer
    LocalDeveloper,
    /// Internal build from a branch
    A8cBranchTest,
    /// Internal pre-release testing build
    A8cPrereleaseTesting,
    /// Public store release
    AppStore,
}

thread_local! {
    static OVERRIDE: Cell<Option<BuildConfiguration>> = const { Cell::new(None) };
}

impl BuildConfiguration {
    pub const ALL: [BuildConfiguration; 4] = [
        BuildConfiguration::LocalDeveloper,
        BuildConfiguration::A8cBranchTest,
        BuildConfiguration::A8cPrereleaseTesting,
        BuildConfiguration::AppStore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildConfiguration::LocalDeveloper => "local-developer",
            BuildConfiguration::A8cBranchTest => "a8c-branch-test",
            BuildConfiguration::A8cPrereleaseTesting => "a8c-prerelease-testing",
            BuildConfiguration::AppStore => "app-store",
        }
    }

    /// The profile this code is running under.
    ///
    /// Resolution order: an override installed by `test`, then the
    /// `EDITOR_PREFS_BUILD` variable at compile time, then the build mode.
    pub fn current() -> Self {
        if let Some(overridden) = OVERRIDE.with(Cell::get) {
            return overridden;
        }
        Self::compiled()
    }

    fn compiled() -> Self {
        if let Some(name) = option_env!("EDITOR_PREFS_BUILD") {
            match name.parse() {
                Ok(config) => return config,
                Err(e) => log::warn!("{e}, falling back to build mode"),
            }
        }
        if cfg!(debug_assertions) {
            BuildConfiguration::LocalDeveloper
        } else {
            BuildConfiguration::AppStore
        }
    }

    pub fn is(&self) -> bool {
        Self::current() == *self
    }

    pub fn is_any(configs: &[BuildConfiguration]) -> bool {
        configs.contains(&Self::current())
    }

    /// Run `f` with `current()` reporting this profile.
    ///
    /// The previous profile is restored afterwards, also when `f` panics. The
    /// override is per thread.
    pub fn test<R>(self, f: impl FnOnce() -> R) -> R {
        struct Restore(Option<BuildConfiguration>);

        impl Drop for Restore {
            fn drop(&mut self) {
                OVERRIDE.with(|cell| cell.set(self.0));
            }
        }

        let _restore = Restore(OVERRIDE.with(|cell| cell.replace(Some(self))));
        f()
    }
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildConfiguration {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildConfiguration::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| PrefsError::UnknownBuildConfiguration(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_scoped() {
        let before = BuildConfiguration::current();

        let seen = BuildConfiguration::AppStore.test(|| {
            let inner = BuildConfiguration::A8cBranchTest.test(BuildConfiguration::current);
            assert_eq!(inner, BuildConfiguration::A8cBranchTest);
            BuildConfiguration::current()
        });

        assert_eq!(seen, BuildConfiguration::AppStore);
        assert_eq!(BuildConfiguration::current(), before);
    }

    #[test]
    fn test_override_restored_after_panic() {
        let before = BuildConfiguration::current();

        let result = std::panic::catch_unwind(|| {
            BuildConfiguration::A8cPrereleaseTesting.test(|| panic!("boom"))
        });

        assert!(result.is_err());
        assert_eq!(BuildConfiguration::current(), before);
    }

    #[test]
    fn test_predicates() {
        BuildConfiguration::A8cPrereleaseTesting.test(|| {
            assert!(BuildConfiguration::A8cPrereleaseTesting.is());
            assert!(!BuildConfiguration::AppStore.is());
            assert!(BuildConfiguration::is_any(&[
                BuildConfiguration::A8cBranchTest,
                BuildConfiguration::A8cPrereleaseTesting,
            ]));
            assert!(!BuildConfiguration::is_any(&[]));
        });
    }

    #[test]
    fn test_names_roundtrip() {
        for config in BuildConfiguration::ALL {
            assert_eq!(config.as_str().parse::<BuildConfiguration>().unwrap(), config);
            assert_eq!(
                serde_json::to_string(&config).unwrap(),
                format!("\"{}\"", config.as_str())
            );
        }
        assert!("testflight".parse::<BuildConfiguration>().is_err());
    }
}
