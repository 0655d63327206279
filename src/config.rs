use crate::discovery::DEFAULT_PATTERN;
use crate::env::Environment;
use crate::lexer::Separators;
use anyhow::Result;
use argh::FromArgs;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Run every script matching a glob pattern, gating indented commands on exit codes.
pub struct Args {
    #[argh(positional, default = "DEFAULT_PATTERN.to_string()")]
    /// glob pattern selecting the scripts to run; defaults to scripts/*.f.
    pub pattern: String,

    #[argh(option, short = 'C')]
    /// directory to discover scripts in and run commands from; defaults to the current directory.
    pub directory: Option<PathBuf>,

    #[argh(switch)]
    /// treat runs of unquoted spaces as a single separator instead of producing empty arguments.
    pub collapse_spaces: bool,
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub pattern: String,
    pub separators: Separators,
    /// Set by `--directory`; discovery is relative to it instead of the current directory.
    pub directory: Option<PathBuf>,
    pub env: Environment,
}

impl RunConfig {
    pub fn from_args(args: Args) -> Result<Self> {
        let env = match &args.directory {
            Some(dir) => Environment::in_dir(dir)?,
            None => Environment::new(),
        };
        let separators = if args.collapse_spaces {
            Separators::Collapse
        } else {
            Separators::Strict
        };
        Ok(Self {
            pattern: args.pattern,
            separators,
            directory: args.directory.map(|_| env.current_dir.clone()),
            env,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["ok"], args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = RunConfig::from_args(parse(&[])).unwrap();
        assert_eq!(config.pattern, "scripts/*.f");
        assert_eq!(config.separators, Separators::Strict);
        assert!(config.directory.is_none());
        assert_eq!(config.env.current_dir, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_all_options() {
        let dir = tempfile::tempdir().unwrap();
        let dir_arg = dir.path().to_string_lossy().into_owned();
        let args = parse(&["ci/*.ok", "-C", &dir_arg, "--collapse-spaces"]);

        let config = RunConfig::from_args(args).unwrap();

        assert_eq!(config.pattern, "ci/*.ok");
        assert_eq!(config.separators, Separators::Collapse);
        let canonical = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(config.env.current_dir, canonical);
        assert_eq!(config.directory, Some(canonical));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone").to_string_lossy().into_owned();
        assert!(RunConfig::from_args(parse(&["--directory", &missing])).is_err());
    }
}
