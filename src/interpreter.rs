use crate::command::{CommandRunner, EXIT_NOT_STARTED, ExitCode};
use crate::directive::Directive;
use crate::lexer::{self, Separators};
use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::AddAssign;
use std::path::Path;
use tracing::{debug, instrument};

/// Whether guarded lines currently run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gate {
    Open,
    #[default]
    Closed,
}

impl Gate {
    fn from_condition(cond: bool) -> Self {
        if cond { Gate::Open } else { Gate::Closed }
    }
}

/// What a single line did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// A gate or guarded command ran (or could not be started) and exited with this code.
    Ran(ExitCode),
    /// A guarded line met a closed gate.
    Skipped,
    /// Comment or blank line.
    Ignored,
    Unrecognized,
}

/// Per-file tally of what the interpreter did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptReport {
    pub lines: usize,
    pub executed: usize,
    pub skipped: usize,
    /// Commands that exited non-zero, including those that never started.
    pub failed: usize,
    pub unrecognized: usize,
}

impl ScriptReport {
    fn record(&mut self, outcome: LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::Ran(code) => {
                self.executed += 1;
                if code != 0 {
                    self.failed += 1;
                }
            }
            LineOutcome::Skipped => self.skipped += 1,
            LineOutcome::Ignored => {}
            LineOutcome::Unrecognized => self.unrecognized += 1,
        }
    }
}

impl AddAssign for ScriptReport {
    fn add_assign(&mut self, rhs: Self) {
        self.lines += rhs.lines;
        self.executed += rhs.executed;
        self.skipped += rhs.skipped;
        self.failed += rhs.failed;
        self.unrecognized += rhs.unrecognized;
    }
}

/// Interprets directive scripts line by line, running commands through a [`CommandRunner`].
///
/// The gate is not stored here: every file starts from [`Gate::Closed`] and the current
/// gate is threaded through [`Interpreter::step`], so nothing leaks from one file into the
/// next.
///
/// Example
/// ```
/// use ok_runner::command::{CommandRunner, ExitCode};
/// use ok_runner::interpreter::{Gate, Interpreter};
/// use std::ffi::OsString;
///
/// struct Always(ExitCode);
/// impl CommandRunner for Always {
///     fn run(&mut self, _words: &[OsString]) -> ExitCode {
///         self.0
///     }
/// }
///
/// let mut interp = Interpreter::new(Always(0));
/// let (gate, _) = interp.step(Gate::Closed, b"?make");
/// assert_eq!(gate, Gate::Open);
/// ```
pub struct Interpreter<R> {
    runner: R,
    separators: Separators,
}

impl<R: CommandRunner> Interpreter<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            separators: Separators::default(),
        }
    }

    /// Choose how runs of unquoted spaces split words.
    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Process one raw line (without its newline) and return the gate for the next line.
    pub fn step(&mut self, gate: Gate, line: &[u8]) -> (Gate, LineOutcome) {
        match Directive::parse(line) {
            Directive::OnSuccess(cmd) => {
                let code = self.execute(cmd);
                let next = Gate::from_condition(code == 0);
                debug!(
                    cmd = %String::from_utf8_lossy(cmd),
                    code,
                    gate = ?next,
                    "gate on success"
                );
                (next, LineOutcome::Ran(code))
            }
            Directive::OnFailure(cmd) => {
                let code = self.execute(cmd);
                let next = Gate::from_condition(code != 0);
                debug!(
                    cmd = %String::from_utf8_lossy(cmd),
                    code,
                    gate = ?next,
                    "gate on failure"
                );
                (next, LineOutcome::Ran(code))
            }
            Directive::Guarded(cmd) => match gate {
                Gate::Open => (gate, LineOutcome::Ran(self.execute(cmd))),
                Gate::Closed => {
                    debug!(cmd = %String::from_utf8_lossy(cmd), "gate closed, skipping");
                    (gate, LineOutcome::Skipped)
                }
            },
            Directive::Comment => (gate, LineOutcome::Ignored),
            Directive::Blank => (Gate::Closed, LineOutcome::Ignored),
            Directive::Unrecognized(text) => {
                eprintln!("unrecognized line '{}'", String::from_utf8_lossy(text));
                (gate, LineOutcome::Unrecognized)
            }
        }
    }

    /// Interpret every line of `reader`, starting with a closed gate.
    ///
    /// Only read errors are returned; command failures end up in the report.
    pub fn run_lines<B: BufRead>(&mut self, mut reader: B) -> Result<ScriptReport> {
        let mut report = ScriptReport::default();
        let mut gate = Gate::Closed;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let (next, outcome) = self.step(gate, strip_line_ending(&buf));
            report.record(outcome);
            gate = next;
        }
        Ok(report)
    }

    /// Interpret the script at `path`. Failing to open or read it is an error.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn run_file(&mut self, path: &Path) -> Result<ScriptReport> {
        let file = File::open(path)
            .with_context(|| format!("failed to open script {}", path.display()))?;
        let report = self
            .run_lines(BufReader::new(file))
            .with_context(|| format!("failed to read script {}", path.display()))?;
        debug!(?report, "script finished");
        Ok(report)
    }

    fn execute(&mut self, text: &[u8]) -> ExitCode {
        let words: Vec<OsString> = lexer::tokenize_bytes(text, self.separators);
        if words.first().is_none_or(|program| program.is_empty()) {
            eprintln!("no command to run in '{}'", String::from_utf8_lossy(text));
            return EXIT_NOT_STARTED;
        }
        self.runner.run(&words)
    }
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
