// Settings service
// Loads and saves widget settings as TOML in the user's config directory

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::CalendarSettings;

const SETTINGS_FILE: &str = "settings.toml";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service backed by the platform config directory, falling back to the
    /// working directory when no home directory can be resolved.
    pub fn with_default_path() -> Self {
        Self::new(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("com", "WeeklyCalendar", "WeeklyCalendar") {
            dirs.config_dir().join(SETTINGS_FILE)
        } else {
            log::warn!("Unable to resolve project directory; using current dir for settings");
            PathBuf::from(SETTINGS_FILE)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings. A missing file yields the defaults.
    pub fn load(&self) -> Result<CalendarSettings> {
        if !self.path.exists() {
            log::info!(
                "No settings file at {}, using defaults",
                self.path.display()
            );
            return Ok(CalendarSettings::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;

        log::info!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    /// Load, logging and falling back to defaults on any failure.
    pub fn load_or_default(&self) -> CalendarSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to load settings: {:#}, using defaults", e);
                CalendarSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &CalendarSettings) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }

        let contents =
            toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;

        log::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::layout::StackingRule;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn service_in(dir: &TempDir) -> SettingsService {
        SettingsService::new(dir.path().join("nested").join(SETTINGS_FILE))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);
        assert_eq!(service.load().unwrap(), CalendarSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let service = service_in(&dir);

        let settings = CalendarSettings {
            usa_calendar: true,
            weekends: true,
            stacking: StackingRule::SideBySide,
            ..Default::default()
        };
        service.save(&settings).unwrap();

        assert!(service.path().exists());
        assert_eq!(service.load().unwrap(), settings);
    }

    #[test]
    fn test_corrupt_file_is_an_error_with_context() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "weekends = \"sometimes\"").unwrap();

        let service = SettingsService::new(&path);
        let err = service.load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings"));
        assert_eq!(service.load_or_default(), CalendarSettings::default());
    }
}
