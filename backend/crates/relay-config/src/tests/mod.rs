
use std::env;
use std::path::Path;

use tempfile::TempDir;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Temp config directory pointed to by RELAY_CONFIG_DIR, with the ambient
/// PORT variable masked so host settings can't leak into assertions.
pub(crate) struct TestConfigDir {
    temp: TempDir,
    _guards: Vec<EnvGuard>,
}

impl TestConfigDir {
    pub(crate) fn path(&self) -> &Path {
        self.temp.path()
    }

    pub(crate) fn write_toml(&self, contents: &str) {
        std::fs::write(self.temp.path().join("config.toml"), contents).unwrap();
    }
}

pub(crate) fn setup_config_dir() -> TestConfigDir {
    let temp = TempDir::new().unwrap();
    let guards = vec![
        EnvGuard::set("RELAY_CONFIG_DIR", temp.path().to_str().unwrap()),
        EnvGuard::remove("PORT"),
        EnvGuard::remove("RELAY_SERVER_PORT"),
    ];
    TestConfigDir {
        temp,
        _guards: guards,
    }
}
