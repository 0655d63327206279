//! A tiny script runner with exit-code gates.
//!
//! Scripts are plain text files, one directive per line:
//!
//! ```text
//! # build only when the directory is there
//! ?test -d build
//! 	make -C build
//!
//! # otherwise create it
//! !test -d build
//! 	mkdir build
//! ```
//!
//! `?` opens the gate when its command exits 0, `!` when it exits non-zero, and tab-indented
//! lines run only while the gate is open. A blank line closes the gate. Anything else is
//! reported and skipped.
//!
//! The main entry points are [`Interpreter`], which runs one script through a pluggable
//! [`command::CommandRunner`], and [`discovery::run_scripts`], which finds scripts with a
//! glob pattern and runs them in order.

pub mod command;
pub mod config;
pub mod directive;
pub mod discovery;
pub mod env;
mod external;
pub mod interpreter;
pub mod lexer;
pub mod logging;

pub use external::ProcessRunner;
pub use interpreter::Interpreter;
