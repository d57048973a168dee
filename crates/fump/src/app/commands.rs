use clap::ArgGroup;
use clap::CommandFactory;
use clap::FromArgMatches;
use clap::Parser;
use clap::ValueHint;
use clap::builder::OsStringValueParser;
use clap::builder::TypedValueParser;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

/// Shown as the program description when the crate carries none.
pub const MISSING_DOC: &str = "<???>";

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("FUMP_GIT_SHA"), ")");

const AFTER_HELP: &str = "\
EXIT CODES:
    0    success
    2    invalid command line
    3    aborted by an unhandled failure
    N    any other code returned by the work itself";

#[derive(Debug, Parser)]
#[command(name = "fump")]
#[command(version, long_version = LONG_VERSION)]
#[command(after_help = AFTER_HELP)]
#[command(group(ArgGroup::new("logging").args(["debug", "log_cfg"]).multiple(false)))]
pub struct Cli {
    /// FIX_ARG is for, well: please say it
    #[arg(value_name = "FIX_ARG")]
    pub fix_arg: String,

    /// Enable debug log level
    #[arg(long, help_heading = "Logging Options")]
    pub debug: bool,

    /// Optional logging cfg in ini format
    #[arg(
        long = "log_cfg",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        value_parser = OsStringValueParser::new().map(PathBuf::from),
        help_heading = "Logging Options"
    )]
    pub log_cfg: Option<PathBuf>,
}

/// How logging gets set up for the run. `--debug` and `--log_cfg` are exclusive,
/// so at most one of the non-default variants can be selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogMode {
    /// INFO level, bare message lines.
    #[default]
    Default,
    /// DEBUG level, `LEVEL - message` lines.
    Verbose,
    /// Everything comes from a log configuration file.
    File(PathBuf),
}

impl LogMode {
    pub fn debug(&self) -> bool {
        matches!(self, LogMode::Verbose)
    }

    pub fn log_cfg(&self) -> Option<&Path> {
        match self {
            LogMode::File(path) => Some(path),
            _ => None,
        }
    }
}

/// Immutable result of parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    fix_arg: String,
    log_mode: LogMode,
}

impl RunConfig {
    pub fn new(fix_arg: impl Into<String>, log_mode: LogMode) -> Self {
        Self {
            fix_arg: fix_arg.into(),
            log_mode,
        }
    }

    /// Parses the process arguments. On a malformed command line clap prints
    /// usage to stderr and exits with its usage code; `--help` and `--version`
    /// print and exit successfully.
    pub fn parse_or_exit() -> Self {
        Self::try_parse_from(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let mut command = Cli::command().about(program_doc(option_env!("CARGO_PKG_DESCRIPTION")));
        if let Some(argv0) = args.first() {
            command = command.bin_name(program_name(&argv0.to_string_lossy()));
        }

        let matches = command.try_get_matches_from(args)?;
        let cli = Cli::from_arg_matches(&matches)?;
        Ok(cli.into())
    }

    pub fn fix_arg(&self) -> &str {
        &self.fix_arg
    }

    pub fn log_mode(&self) -> &LogMode {
        &self.log_mode
    }

    pub fn debug(&self) -> bool {
        self.log_mode.debug()
    }

    pub fn log_cfg(&self) -> Option<&Path> {
        self.log_mode.log_cfg()
    }
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let log_mode = match cli.log_cfg {
            Some(path) if !path.as_os_str().is_empty() => LogMode::File(path),
            _ if cli.debug => LogMode::Verbose,
            _ => LogMode::Default,
        };
        Self::new(cli.fix_arg, log_mode)
    }
}

/// Program description for `--help`, falling back to [`MISSING_DOC`].
pub fn program_doc(description: Option<&'static str>) -> &'static str {
    description
        .map(str::trim)
        .filter(|doc| !doc.is_empty())
        .unwrap_or(MISSING_DOC)
}

/// Name shown in usage output. A program started as `./name.ext` is shown as
/// `name`; anything else is shown as invoked.
pub fn program_name(argv0: &str) -> String {
    match argv0.strip_prefix("./") {
        Some(relative) if !relative.is_empty() => {
            Path::new(relative).with_extension("").display().to_string()
        }
        _ => argv0.to_string(),
    }
}
