//! External command execution utilities.
//!
//! Provides a Builder-based API for running external tools with a bounded
//! wait.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::{Cmd, Finished};
//!
//! let outcome = Cmd::new("pdftotext")
//!     .arg(path)
//!     .arg("-")
//!     .timeout(Duration::from_secs(30))
//!     .run()?;
//!
//! if let Finished::Exited(output) = outcome { /* ... */ }
//! ```

use anyhow::{Context, Result};
use std::{
    ffi::{OsStr, OsString},
    io::Read,
    path::PathBuf,
    process::{Child, Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Interval between exit-status polls while waiting on a child.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Command builder for external process execution.
#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    timeout: Option<Duration>,
}

/// Captured process output.
#[derive(Debug)]
pub struct Captured {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Captured {
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// First line of stderr, for one-line failure reports.
    pub fn stderr_line(&self) -> String {
        String::from_utf8_lossy(&self.stderr)
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

/// How a command ended.
#[derive(Debug)]
pub enum Finished {
    Exited(Captured),
    /// Killed after exceeding the configured timeout.
    TimedOut,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Add a single argument.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        let arg = arg.as_ref();
        if !arg.is_empty() {
            self.args.push(arg.to_owned());
        }
        self
    }

    /// Kill the process if it runs longer than `limit`.
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Resolve the program on `PATH`.
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Execute the command, capturing stdout and stderr.
    pub fn run(self) -> Result<Finished> {
        let name = self.program_name();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to spawn `{name}`"))?;

        // Drain pipes on their own threads so a chatty child can't block on a full pipe
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            Some(limit) => wait_with_deadline(&mut child, limit)
                .with_context(|| format!("Failed to wait for `{name}`"))?,
            None => Some(
                child
                    .wait()
                    .with_context(|| format!("Failed to wait for `{name}`"))?,
            ),
        };

        let stdout = join(stdout);
        let stderr = join(stderr);

        Ok(match status {
            Some(status) => Finished::Exited(Captured {
                status,
                stdout,
                stderr,
            }),
            None => Finished::TimedOut,
        })
    }
}

/// Poll until the child exits or `limit` passes. `None` means it was killed.
fn wait_with_deadline(child: &mut Child, limit: Duration) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            child.kill().ok();
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn join(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
