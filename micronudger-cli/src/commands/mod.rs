pub mod chat;
pub mod config;
pub mod gate;
pub mod generate;
pub mod habits;
pub mod remove;
pub mod settings;
pub mod wipe;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use micronudger_core::config::NudgerConfig;

/// Resolve `filename` inside the output directory, creating the directory.
///
/// The name must be a single path component so nothing lands outside it.
pub fn calendar_path(config: &NudgerConfig, filename: &str) -> Result<PathBuf> {
    if Path::new(filename).file_name().and_then(|n| n.to_str()) != Some(filename) {
        anyhow::bail!("Invalid calendar file name: \"{}\"", filename);
    }

    let dir = config.output_path();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create output directory {}", dir.display()))?;
    Ok(dir.join(filename))
}

pub fn write_calendar(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Could not write {}", path.display()))
}


#[cfg(test)]
mod tests {
    use super::test_support::temp_config;
    use super::*;
    use micronudger_core::utils::{create_filename, removal_filename};

    #[test]
    fn sanitized_names_stay_inside_output_dir() {
        let (_tmp, config) = temp_config();

        let path = calendar_path(&config, &create_filename("Work/Life")).unwrap();
        assert_eq!(path.parent(), Some(config.output_path().as_path()));
        assert_eq!(path.file_name().unwrap(), "Work_Life.ics");

        write_calendar(&path, "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n"
        );

        let removal = calendar_path(&config, &removal_filename("Work/Life")).unwrap();
        assert_eq!(removal.file_name().unwrap(), "Work_Life_REMOVE.ics");
        assert_eq!(removal.parent(), path.parent());
    }

    #[test]
    fn multi_component_names_are_refused() {
        let (_tmp, config) = temp_config();
        assert!(calendar_path(&config, "nested/cal.ics").is_err());
        assert!(calendar_path(&config, "../cal.ics").is_err());
        assert!(calendar_path(&config, "..").is_err());
        assert!(!config.output_path().exists());
    }

    #[test]
    fn output_dir_that_is_a_file_is_reported() {
        let (tmp, mut config) = temp_config();
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        config.output_dir = blocker;

        let err = calendar_path(&config, "cal.ics").unwrap_err();
        assert!(
            err.to_string().starts_with("Could not create output directory"),
            "error: {}",
            err
        );
    }
}
