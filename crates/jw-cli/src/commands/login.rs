//! Login command: captures credentials and verifies them against Jira.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use jw_core::{IssueTracker, Store};
use jw_jira::{Credentials, CredsStore, JiraClient};

pub fn run<W: Write, R: BufRead, S: Store + ?Sized>(
    writer: &mut W,
    input: &mut R,
    store: &S,
    url: &str,
) -> Result<()> {
    write!(writer, "Username: ")?;
    writer.flush()?;
    let mut username = String::new();
    input.read_line(&mut username)?;

    write!(writer, "Password: ")?;
    writer.flush()?;
    let mut password = String::new();
    input.read_line(&mut password)?;

    let creds = Credentials {
        url: url.to_string(),
        username: username.trim().to_string(),
        password: password.trim_end_matches(['\r', '\n']).to_string(),
    };

    let client = JiraClient::new(&creds)?;
    let user = client
        .current_user()
        .context("login verification failed")?;

    CredsStore::new(store).save(&creds)?;

    let shown = if user.display_name.is_empty() {
        &user.name
    } else {
        &user.display_name
    };
    writeln!(writer, "Logged in as {shown}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jw_core::MemoryStore;

    #[test]
    fn login_prompts_for_both_fields() {
        let store = MemoryStore::new();
        let mut input = "alice\nhunter2\n".as_bytes();
        let mut output = Vec::new();

        // An unparseable URL fails before any network call, which is all
        // this test needs: the prompts were written and read.
        let err = run(&mut output, &mut input, &store, "not a url").unwrap_err();
        assert!(err.to_string().contains("invalid jira url"));

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Username: "));
        assert!(output.contains("Password: "));
    }

    #[test]
    fn nothing_is_saved_when_verification_never_ran() {
        let store = MemoryStore::new();
        let mut input = "alice\nhunter2\n".as_bytes();
        let mut output = Vec::new();

        let _ = run(&mut output, &mut input, &store, "not a url");
        assert!(store.document(jw_jira::AUTH_DOC).is_none());
    }
}
