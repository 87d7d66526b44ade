use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_STORE_FILE: &str = "tasks.json";
pub const STORE_FILE_ENV: &str = "TASKPAD_FILE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskpadConfig {
    /// Task file location; a relative path resolves against the working
    /// directory the command runs in.
    pub file: Option<String>,
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(".taskpad.toml")
}

pub fn load_config(dir: &Path) -> Option<TaskpadConfig> {
    let path = config_path(dir);
    if !path.is_file() {
        return None;
    }
    let text = fs::read_to_string(&path).ok()?;
    toml::from_str::<TaskpadConfig>(&text).ok()
}

fn env_store_file() -> Option<PathBuf> {
    if let Ok(value) = std::env::var(STORE_FILE_ENV) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    None
}

/// Resolve the task file for this invocation: explicit CLI override, then
/// the `TASKPAD_FILE` environment variable, then a `file` entry in
/// `.taskpad.toml` in the working directory, then `tasks.json` in the
/// working directory.
pub fn resolve_store_path(cli_override: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(path) = cli_override {
        return path.to_path_buf();
    }
    if let Some(path) = env_store_file() {
        return path;
    }
    if let Some(file) = load_config(cwd).and_then(|config| config.file) {
        let trimmed = file.trim();
        if !trimmed.is_empty() {
            return cwd.join(trimmed);
        }
    }
    cwd.join(DEFAULT_STORE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use tempfile::TempDir;

    // Tests below mutate TASKPAD_FILE; serialize them so parallel test
    // threads never observe each other's environment.
    fn env_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    struct EnvGuard {
        previous: Option<OsString>,
    }

    impl EnvGuard {
        fn set(value: Option<&str>) -> Self {
            let previous = std::env::var_os(STORE_FILE_ENV);
            match value {
                Some(value) => std::env::set_var(STORE_FILE_ENV, value),
                None => std::env::remove_var(STORE_FILE_ENV),
            }
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match self.previous.take() {
                Some(value) => std::env::set_var(STORE_FILE_ENV, value),
                None => std::env::remove_var(STORE_FILE_ENV),
            }
        }
    }

    #[test]
    fn cli_override_wins_over_everything() {
        let _lock = env_lock();
        let _env = EnvGuard::set(Some("/elsewhere/env.json"));
        let cwd = TempDir::new().expect("tempdir");
        let explicit = Path::new("/explicit/tasks.json");
        let resolved = resolve_store_path(Some(explicit), cwd.path());
        assert_eq!(resolved, explicit);
    }

    #[test]
    fn env_var_wins_over_config_file() {
        let _lock = env_lock();
        let _env = EnvGuard::set(Some("/from-env/tasks.json"));
        let cwd = TempDir::new().expect("tempdir");
        fs::write(config_path(cwd.path()), "file = \"from-config.json\"\n").expect("config");
        let resolved = resolve_store_path(None, cwd.path());
        assert_eq!(resolved, PathBuf::from("/from-env/tasks.json"));
    }

    #[test]
    fn config_file_entry_resolves_against_cwd() {
        let _lock = env_lock();
        let _env = EnvGuard::set(None);
        let cwd = TempDir::new().expect("tempdir");
        fs::write(config_path(cwd.path()), "file = \"my-tasks.json\"\n").expect("config");
        let resolved = resolve_store_path(None, cwd.path());
        assert_eq!(resolved, cwd.path().join("my-tasks.json"));
    }

    #[test]
    fn falls_back_to_tasks_json_in_cwd() {
        let _lock = env_lock();
        let _env = EnvGuard::set(None);
        let cwd = TempDir::new().expect("tempdir");
        let resolved = resolve_store_path(None, cwd.path());
        assert_eq!(resolved, cwd.path().join(DEFAULT_STORE_FILE));
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let _lock = env_lock();
        let _env = EnvGuard::set(Some("   "));
        let cwd = TempDir::new().expect("tempdir");
        let resolved = resolve_store_path(None, cwd.path());
        assert_eq!(resolved, cwd.path().join(DEFAULT_STORE_FILE));
    }

    #[test]
    fn unparseable_config_is_ignored() {
        let _lock = env_lock();
        let _env = EnvGuard::set(None);
        let cwd = TempDir::new().expect("tempdir");
        fs::write(config_path(cwd.path()), "file = [not toml\n").expect("config");
        let resolved = resolve_store_path(None, cwd.path());
        assert_eq!(resolved, cwd.path().join(DEFAULT_STORE_FILE));
    }
}
