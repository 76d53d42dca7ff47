//! Scripted executor for deterministic tests.
//!
//! Records every command it is asked to run and answers from a script:
//! one-shot replies first, then exact-match responses and failures, and an
//! empty string for anything else (mutating commands print nothing on
//! success).
//!
//! ```
//! use sshexec::Execute;
//! use sshexec::mock::ScriptedExecutor;
//!
//! let remote = ScriptedExecutor::new();
//! remote.respond("settings allow-keyless", "true");
//! remote.fail("repo info ghost", "repository not found");
//!
//! assert_eq!(remote.execute("settings allow-keyless").unwrap(), "true");
//! assert!(remote.execute("repo info ghost").is_err());
//! assert_eq!(remote.executed(), vec!["settings allow-keyless", "repo info ghost"]);
//! ```

use crate::Execute;
use crate::error::{Error, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
enum Reply {
    Output(String),
    Failure(String),
}

#[derive(Debug, Default)]
struct Script {
    replies: HashMap<String, Reply>,
    once: HashMap<String, VecDeque<Reply>>,
    executed: Vec<String>,
}

/// Executor answering from a script. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedExecutor {
    inner: Arc<Mutex<Script>>,
}

impl ScriptedExecutor {
    /// Empty script: every command succeeds with no output.
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Answer `command` with `stdout`.
    pub fn respond(&self, command: &str, stdout: &str) {
        self.script()
            .replies
            .insert(command.to_string(), Reply::Output(stdout.to_string()));
    }

    /// Make `command` exit with status 1 and `stderr`.
    pub fn fail(&self, command: &str, stderr: &str) {
        self.script()
            .replies
            .insert(command.to_string(), Reply::Failure(stderr.to_string()));
    }

    /// Answer the next run of `command` with `stdout`, then fall back to
    /// the standing script.
    pub fn respond_once(&self, command: &str, stdout: &str) {
        self.queue(command, Reply::Output(stdout.to_string()));
    }

    /// Fail the next run of `command` with `stderr`, then fall back to the
    /// standing script.
    pub fn fail_once(&self, command: &str, stderr: &str) {
        self.queue(command, Reply::Failure(stderr.to_string()));
    }

    fn queue(&self, command: &str, reply: Reply) {
        self.script()
            .once
            .entry(command.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Every command run so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.script().executed.clone()
    }

    /// Commands run so far that start with none of `query_prefixes`.
    pub fn executed_except(&self, query_prefixes: &[&str]) -> Vec<String> {
        self.executed()
            .into_iter()
            .filter(|c| !query_prefixes.iter().any(|p| c.starts_with(p)))
            .collect()
    }

    /// Forget the recorded history, keep the script.
    pub fn clear_history(&self) {
        self.script().executed.clear();
    }
}

impl Execute for ScriptedExecutor {
    fn execute(&self, command: &str) -> Result<String> {
        let mut script = self.script();
        script.executed.push(command.to_string());

        let queued = script.once.get_mut(command).and_then(VecDeque::pop_front);
        let reply = queued.or_else(|| script.replies.get(command).cloned());

        match reply {
            Some(Reply::Output(stdout)) => Ok(stdout),
            Some(Reply::Failure(stderr)) => Err(Error::CommandFailed {
                command: command.to_string(),
                status: Some(1),
                stderr,
            }),
            None => Ok(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_succeeds_empty() {
        let remote = ScriptedExecutor::new();
        assert_eq!(remote.execute("repo delete old").unwrap(), "");
    }

    #[test]
    fn test_clones_share_history() {
        let remote = ScriptedExecutor::new();
        let clone = remote.clone();
        clone.execute("user delete bob").unwrap();
        assert_eq!(remote.executed(), vec!["user delete bob"]);

        remote.clear_history();
        assert!(clone.executed().is_empty());
    }

    #[test]
    fn test_executed_except_filters_queries() {
        let remote = ScriptedExecutor::new();
        remote.execute("repo create proj").unwrap();
        remote.execute("repo info proj").unwrap();
        assert_eq!(remote.executed_except(&["repo info"]), vec!["repo create proj"]);
    }

    #[test]
    fn test_failure_carries_stderr() {
        let remote = ScriptedExecutor::new();
        remote.fail("user info ghost", "user not found");
        let err = remote.execute("user info ghost").unwrap_err();
        assert_eq!(err.remote_stderr(), Some("user not found"));
    }

    #[test]
    fn test_one_shot_replies_come_first() {
        let remote = ScriptedExecutor::new();
        remote.fail_once("repo info proj", "repository not found");
        remote.respond_once("repo info proj", "Repository: proj");
        remote.respond("repo info proj", "Repository: proj\nPrivate: true");

        assert!(remote.execute("repo info proj").is_err());
        assert_eq!(remote.execute("repo info proj").unwrap(), "Repository: proj");
        assert_eq!(
            remote.execute("repo info proj").unwrap(),
            "Repository: proj\nPrivate: true"
        );
        assert_eq!(
            remote.execute("repo info proj").unwrap(),
            "Repository: proj\nPrivate: true"
        );
    }
}
