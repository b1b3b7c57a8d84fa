use lexopt::{Arg, Parser};
#[cfg(test)]
use std::ffi::OsString;
use std::path::PathBuf;

/// What the command line asked for
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    /// Configuration file given with `--config`.  When this is set, the file
    /// must exist.
    pub(crate) config: Option<PathBuf>,

    /// File to write log messages to
    pub(crate) log_file: Option<PathBuf>,
}

impl Invocation {
    pub(crate) fn from_env() -> Result<Invocation, lexopt::Error> {
        Invocation::from_parser(Parser::from_env())
    }

    #[cfg(test)]
    fn from_args<I>(args: I) -> Result<Invocation, lexopt::Error>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        Invocation::from_parser(Parser::from_args(args))
    }

    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(parser.value().map(PathBuf::from)?);
                }
                Arg::Long("log-file") => {
                    args.log_file = Some(parser.value().map(PathBuf::from)?);
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run(args))
    }
}

pub(crate) const USAGE: &str = "\
Usage: gridsnake [options]

Play Snake in the terminal.

Keys:
  ← ↓ ↑ → / h j k l / a s w d   Steer
  Enter                         Start
  Space / p / Esc               Pause & resume
  r                             Restart (when not playing)
  q / Ctrl-C                    Quit

Options:
  -c, --config <PATH>    Read configuration from the given file
      --log-file <PATH>  Write log messages to the given file
  -h, --help             Show this help message and exit
  -V, --version          Show the program version and exit
";
