use anyhow::{Result, bail};
use declarative::quote;
use sshexec::Execute;

use crate::Context;

pub fn run(ctx: &Context, words: &[String]) -> Result<()> {
    let line = command_line(words);
    if line.is_empty() {
        bail!("No command given");
    }

    let client = super::connect(ctx)?;
    let output = client.execute(&line)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Join words into one command line, quoting those the remote splitter
/// would otherwise break apart.
fn command_line(words: &[String]) -> String {
    words
        .iter()
        .map(|word| {
            if word.is_empty() || word.contains(|c: char| c.is_whitespace() || c == '"') {
                quote(word)
            } else {
                word.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
