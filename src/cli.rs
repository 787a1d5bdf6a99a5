//! Command-line interface definition using clap.
//!
//! [`Args`] holds the raw flags; [`Args::settings`] merges them over an
//! optional settings file into the library's configuration types.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{Settings, SystemNoticeLocale};
use crate::core::filter::DateFilter;
use crate::error::{Result, WeekpackError};
use crate::format::OutputFormat;

/// Group WhatsApp chat exports into ISO weeks and extract the conversations
/// around one participant, ready for weekly analysis.
#[derive(Parser, Debug, Clone)]
#[command(name = "weekpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    weekpack _chat.txt --user \"mai ly\"
    weekpack old_chat.txt _chat.txt -u Alice -o weeks.csv
    weekpack _chat.txt -u Alice --after 2024-01-01 --context 3 -f jsonl
    weekpack _chat.txt --config weekpack.toml -vv")]
pub struct Args {
    /// Transcript files; several are merged in time order
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,

    /// Participant whose messages anchor the conversation windows
    #[arg(short, long, value_name = "NAME")]
    pub user: Option<String>,

    /// Messages of context on each side of a target message [default: 5]
    #[arg(short, long, value_name = "N")]
    pub context: Option<usize>,

    /// Output format [default: from the output extension, else json]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep system notices (encryption banner, omitted media, ...)
    #[arg(long)]
    pub keep_system: bool,

    /// Also treat English system notices as noise
    #[arg(long)]
    pub english: bool,

    /// Settings file (TOML); flags take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the run settings: the settings file if given, then flags.
    ///
    /// # Errors
    ///
    /// Fails if the settings file cannot be loaded, or if no target user is
    /// given by either source.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => load_settings(path)?,
            None => {
                let user = self.user.clone().ok_or_else(|| {
                    WeekpackError::invalid_config("a target user is required (--user NAME)")
                })?;
                Settings::new(user)
            }
        };

        if let Some(user) = &self.user {
            settings.window.target_user = user.clone();
        }
        if let Some(k) = self.context {
            settings.window.context_size = k;
        }
        if self.keep_system {
            settings.transcript.skip_system_messages = false;
        }
        if self.english {
            let filter = std::mem::take(&mut settings.transcript.system_filter);
            settings.transcript.system_filter = filter.with_locale(SystemNoticeLocale::English);
        }

        settings.window.validate()?;
        Ok(settings)
    }

    /// Builds the date filter from `--after` and `--before`.
    pub fn date_filter(&self) -> Result<DateFilter> {
        let mut filter = DateFilter::new();
        if let Some(after) = &self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(before) = &self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }

    /// The explicit format, else the one implied by `--output`, else JSON.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| {
                self.output
                    .as_ref()
                    .and_then(|p| OutputFormat::from_path(p).ok())
            })
            .unwrap_or_default()
    }

    /// Default log filter for the verbosity level, used when `RUST_LOG` is
    /// not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(feature = "config-file")]
fn load_settings(path: &std::path::Path) -> Result<Settings> {
    Settings::load(path)
}

#[cfg(not(feature = "config-file"))]
fn load_settings(_path: &std::path::Path) -> Result<Settings> {
    Err(WeekpackError::invalid_config(
        "--config requires the 'config-file' feature to be enabled",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("weekpack").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_minimal_args() {
        let a = args(&["_chat.txt", "--user", "mai ly"]);
        assert_eq!(a.inputs, [PathBuf::from("_chat.txt")]);

        let settings = a.settings().unwrap();
        assert_eq!(settings.window.target_user, "mai ly");
        assert_eq!(settings.window.context_size, 5);
        assert!(settings.transcript.skip_system_messages);
        assert_eq!(a.output_format(), OutputFormat::Json);
        assert_eq!(a.log_filter(), "warn");
    }

    #[test]
    fn test_input_is_required() {
        assert!(Args::try_parse_from(["weekpack", "--user", "x"]).is_err());
    }

    #[test]
    fn test_user_is_required_without_config() {
        let err = args(&["_chat.txt"]).settings().unwrap_err();
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_flags_override_defaults() {
        let a = args(&[
            "a.txt", "b.txt", "-u", "Bob", "-c", "2", "--keep-system", "--english", "-vv",
        ]);
        let settings = a.settings().unwrap();
        assert_eq!(a.inputs.len(), 2);
        assert_eq!(settings.window.context_size, 2);
        assert!(!settings.transcript.skip_system_messages);
        assert!(
            settings
                .transcript
                .system_filter
                .phrases
                .iter()
                .any(|p| p == "This message was deleted")
        );
        assert_eq!(a.log_filter(), "debug");
    }

    #[test]
    fn test_output_format_resolution() {
        assert_eq!(args(&["a.txt", "-u", "x", "-o", "w.csv"]).output_format(), OutputFormat::Csv);
        assert_eq!(
            args(&["a.txt", "-u", "x", "-o", "w.csv", "-f", "jsonl"]).output_format(),
            OutputFormat::Jsonl
        );
        assert_eq!(args(&["a.txt", "-u", "x", "-o", "w.out"]).output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_date_filter_from_args() {
        let filter = args(&["a.txt", "-u", "x", "--after", "2024-01-01"]).date_filter().unwrap();
        assert!(filter.after.is_some());
        assert!(filter.before.is_none());

        let err = args(&["a.txt", "-u", "x", "--before", "yesterday"]).date_filter().unwrap_err();
        assert!(err.is_invalid_date());
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_config_file_then_flags() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_user = \"from file\"\ncontext_size = 3").unwrap();
        let path = file.path().to_str().unwrap();

        let settings = args(&["a.txt", "--config", path]).settings().unwrap();
        assert_eq!(settings.window.target_user, "from file");
        assert_eq!(settings.window.context_size, 3);

        let settings = args(&["a.txt", "--config", path, "-u", "flag"]).settings().unwrap();
        assert_eq!(settings.window.target_user, "flag");
        assert_eq!(settings.window.context_size, 3);
    }
}
