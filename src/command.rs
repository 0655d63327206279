use std::ffi::OsString;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Status reported for a command whose program could not be located or started.
///
/// It is what a child that fails to exec would exit with, so gates treat it exactly like
/// any other failing command.
pub const EXIT_NOT_STARTED: ExitCode = 1;

/// Runs one command to completion and reports its exit status.
///
/// `words[0]` is the program and `words[1..]` its arguments, byte for byte as they appeared
/// in the script. Implementors never fail: a command that cannot be started is reported to
/// the operator and yields [`EXIT_NOT_STARTED`]. Callers never pass an empty slice.
pub trait CommandRunner {
    fn run(&mut self, words: &[OsString]) -> ExitCode;
}
