//! Process wrapper around the `unmunch` tool

use crate::{ensure_count_header, ExpansionError};
use lexicon_domain::traits::Expander;
use std::ffi::{OsStr, OsString};
use std::io::{self, Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use wait_timeout::ChildExt;

/// Default tool name, resolved through `PATH`
pub const DEFAULT_COMMAND: &str = "unmunch";

/// Default limit on a single tool run
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Header count used when the seed list has none
pub const DEFAULT_COUNT: usize = 100;

/// Runs `unmunch <word list> <affix file>` and collects the generated forms
///
/// Both inputs are written to temporary files that live only for the
/// duration of a call and are removed on every exit path.
#[derive(Debug, Clone)]
pub struct Unmunch {
    program: OsString,
    args: Vec<OsString>,
    timeout: Duration,
    default_count: usize,
}

impl Unmunch {
    /// Create a wrapper for the given program
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            default_count: DEFAULT_COUNT,
        }
    }

    /// Add a leading argument placed before the two file paths
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the run time limit
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the header count used for seed lists without one
    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }

    /// Configured time limit
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Program to run
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Leading arguments
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    fn command_line(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    /// Run the tool over `seed_words` with `affix_rules`
    pub fn run(&self, seed_words: &str, affix_rules: &str) -> Result<Vec<String>, ExpansionError> {
        let seed = ensure_count_header(seed_words, self.default_count);
        let dic_file = stage("dic", &seed)?;
        let aff_file = stage("aff", affix_rules)?;

        tracing::debug!(
            "Running {} on {} and {}",
            self.command_line(),
            dic_file.path().display(),
            aff_file.path().display()
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(dic_file.path())
            .arg(aff_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExpansionError::Spawn {
                command: self.command_line(),
                source,
            })?;

        let deadline = Instant::now() + self.timeout;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match child.wait_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(Some(status)) => status,
            Ok(None) => {
                reap(&mut child);
                tracing::warn!("{} exceeded {:?}, killed", self.command_line(), self.timeout);
                return Err(ExpansionError::Timeout { after: self.timeout });
            }
            Err(e) => {
                reap(&mut child);
                return Err(e.into());
            }
        };

        // A background process left behind by the tool can hold the pipes
        // open after it exits; the whole call stays within the time limit.
        let stdout = self.collect(stdout, deadline)?;
        let stderr = String::from_utf8_lossy(&self.collect(stderr, deadline)?).into_owned();

        if !status.success() {
            tracing::debug!("unmunch exited with {:?}: {}", status.code(), stderr.trim_end());
            return Err(ExpansionError::Failed {
                code: status.code(),
                stderr: stderr.trim_end().to_string(),
            });
        }

        let stdout = String::from_utf8(stdout)
            .map_err(|e| ExpansionError::InvalidOutput(e.to_string()))?;
        let words: Vec<String> = stdout
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        if words.is_empty() {
            tracing::warn!(
                "unmunch produced no forms from {} seed lines; check the affix rules",
                seed.lines().count().saturating_sub(1)
            );
        } else {
            tracing::debug!("unmunch produced {} forms", words.len());
        }

        Ok(words)
    }
}

impl Unmunch {
    fn collect(&self, handle: Drain, deadline: Instant) -> Result<Vec<u8>, ExpansionError> {
        let Some(rx) = handle else {
            return Ok(Vec::new());
        };

        match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
            Ok(result) => result.map_err(ExpansionError::from),
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    "{} exited but its output stayed open past {:?}",
                    self.command_line(),
                    self.timeout
                );
                Err(ExpansionError::Timeout { after: self.timeout })
            }
            Err(RecvTimeoutError::Disconnected) => {
                Err(io::Error::other("pipe reader stopped without a result").into())
            }
        }
    }
}

impl Default for Unmunch {
    fn default() -> Self {
        Self::new(DEFAULT_COMMAND)
    }
}

impl Expander for Unmunch {
    type Error = ExpansionError;

    fn expand(&self, seed_words: &str, affix_rules: &str) -> Result<Vec<String>, Self::Error> {
        self.run(seed_words, affix_rules)
    }
}

fn stage(extension: &str, contents: &str) -> Result<NamedTempFile, ExpansionError> {
    let mut file = tempfile::Builder::new()
        .prefix("lexicon-")
        .suffix(&format!(".{}", extension))
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

type Drain = Option<Receiver<io::Result<Vec<u8>>>>;

// Pipes are read on their own threads so a chatty child cannot block on a
// full pipe while we wait on it.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Drain {
    pipe.map(|mut pipe| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let result = pipe.read_to_end(&mut buf).map(|_| buf);
            let _ = tx.send(result);
        });
        rx
    })
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
