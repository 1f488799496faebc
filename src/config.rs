use std::path::PathBuf;

pub const DATA_PATH_ENV: &str = "NFHS_DATA_PATH";
pub const DEFAULT_DATA_FILE: &str = "India_Change.csv";

/// Startup settings for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
}

impl DashboardConfig {
    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Self {
        let arg = std::env::args().nth(1);
        let env = std::env::var(DATA_PATH_ENV).ok();
        Self::resolve(arg.as_deref(), env.as_deref())
    }

    /// Precedence: explicit argument, then environment, then the default
    /// file in the working directory. Blank values are skipped.
    pub fn resolve(arg: Option<&str>, env: Option<&str>) -> Self {
        let data_path = [arg, env]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(DEFAULT_DATA_FILE);
        Self {
            data_path: PathBuf::from(data_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_beats_environment() {
        let cfg = DashboardConfig::resolve(Some("cli.csv"), Some("env.csv"));
        assert_eq!(cfg.data_path, PathBuf::from("cli.csv"));
    }

    #[test]
    fn environment_used_without_argument() {
        let cfg = DashboardConfig::resolve(None, Some(" /data/nfhs.parquet "));
        assert_eq!(cfg.data_path, PathBuf::from("/data/nfhs.parquet"));
    }

    #[test]
    fn blank_values_fall_back_to_default() {
        let cfg = DashboardConfig::resolve(Some("  "), Some(""));
        assert_eq!(cfg.data_path, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(
            DashboardConfig::resolve(None, None).data_path,
            PathBuf::from("India_Change.csv")
        );
    }
}
