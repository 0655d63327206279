//! Finding scripts with a glob pattern and running them one after another.

use crate::command::CommandRunner;
use crate::interpreter::{Interpreter, ScriptReport};
use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Pattern used when none is given: every `.f` file in `scripts/`.
pub const DEFAULT_PATTERN: &str = "scripts/*.f";

/// Totals over every script of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub scripts: usize,
    pub totals: ScriptReport,
}

/// Expand `pattern` into matching paths, sorted byte-wise on the whole path the way a C
/// library `glob` orders them (`a-b/x.f` before `a/x.f`).
///
/// A relative pattern is resolved against `base_dir` when one is given, else against the
/// current directory. No match is an empty list; an invalid pattern is an error. Entries
/// that cannot be read are skipped with a warning.
pub fn discover(pattern: &str, base_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    let full = match base_dir {
        Some(base) if !Path::new(pattern).is_absolute() => {
            let base = glob::Pattern::escape(&base.to_string_lossy());
            format!("{}/{}", base.trim_end_matches('/'), pattern)
        }
        _ => pattern.to_string(),
    };
    debug!(pattern = %full, "expanding");

    let entries = glob(&full).with_context(|| format!("invalid script pattern '{pattern}'"))?;
    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => {
                warn!(path = %e.path().display(), err = %e.error(), "skipping unreadable entry");
            }
        }
    }
    // The glob crate sorts per directory level; `Path` ordering compares components.
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    Ok(paths)
}

/// Discover scripts and interpret each in turn with a fresh gate.
///
/// Prints `> <path>` before each script. Stops at the first script that cannot be opened or
/// read; command failures never stop the run.
pub fn run_scripts<R: CommandRunner>(
    pattern: &str,
    base_dir: Option<&Path>,
    interpreter: &mut Interpreter<R>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let paths = discover(pattern, base_dir)?;
    if paths.is_empty() {
        info!(pattern, "no scripts matched");
    }
    for path in paths {
        println!("> {}", path.display());
        summary.totals += interpreter.run_file(&path)?;
        summary.scripts += 1;
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ExitCode;
    use std::ffi::OsString;
    use std::fs;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl CommandRunner for Recorder {
        fn run(&mut self, words: &[OsString]) -> ExitCode {
            let words: Vec<_> = words.iter().map(|w| w.to_string_lossy()).collect();
            self.calls.push(words.join(" "));
            if words[0] == "false" { 1 } else { 0 }
        }
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let scripts = dir.path().join("scripts");
        fs::create_dir(&scripts).unwrap();
        for name in ["b.f", "a.f", "c.txt", "10.f"] {
            fs::write(scripts.join(name), "").unwrap();
        }

        let paths = discover(DEFAULT_PATTERN, Some(dir.path())).unwrap();

        assert_eq!(names(&paths), vec!["10.f", "a.f", "b.f"]);
    }

    #[test]
    fn test_discover_sorts_whole_paths_bytewise() {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["a", "a-b", "b"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("x.f"), "").unwrap();
        }

        let paths = discover("*/x.f", Some(dir.path())).unwrap();

        let relative: Vec<_> = paths
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from("a-b/x.f"),
                PathBuf::from("a/x.f"),
                PathBuf::from("b/x.f"),
            ]
        );
    }

    #[test]
    fn test_discover_no_match_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(DEFAULT_PATTERN, Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn test_discover_absolute_pattern_ignores_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.f"), "").unwrap();
        let pattern = format!("{}/*.f", dir.path().display());

        let paths = discover(&pattern, Some(Path::new("/nonexistent"))).unwrap();

        assert_eq!(names(&paths), vec!["x.f"]);
    }

    #[test]
    fn test_discover_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover("scripts/[*.f", Some(dir.path())).unwrap_err();
        assert!(err.to_string().contains("invalid script pattern"));
    }

    #[test]
    fn test_gate_does_not_carry_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let scripts = dir.path().join("scripts");
        fs::create_dir(&scripts).unwrap();
        fs::write(scripts.join("1.f"), "?true\n").unwrap();
        fs::write(scripts.join("2.f"), "\techo leaked\n?false\n").unwrap();

        let mut interp = Interpreter::new(Recorder::default());
        let summary = run_scripts(DEFAULT_PATTERN, Some(dir.path()), &mut interp).unwrap();

        assert_eq!(interp.runner().calls, vec!["true", "false"]);
        assert_eq!(summary.scripts, 2);
        assert_eq!(summary.totals.skipped, 1);
        assert_eq!(summary.totals.failed, 1);
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_script_stops_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let scripts = dir.path().join("scripts");
        fs::create_dir(&scripts).unwrap();
        // A directory matching the pattern opens but cannot be read as a script.
        fs::create_dir(scripts.join("1.f")).unwrap();
        fs::write(scripts.join("2.f"), "?true\n").unwrap();

        let mut interp = Interpreter::new(Recorder::default());
        let result = run_scripts(DEFAULT_PATTERN, Some(dir.path()), &mut interp);

        assert!(result.is_err());
        assert!(interp.runner().calls.is_empty());
    }
}
