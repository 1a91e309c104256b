//! Start command: begins tracking a session against an issue.

use std::io::{BufRead, Write};

use anyhow::Result;

use jw_core::{ConfigStore, IssueTracker, SessionMachine, StartOptions, Store, TagOptions, tag};

use crate::StartArgs;

pub fn run<W: Write, R: BufRead, S: Store + ?Sized, T: IssueTracker + ?Sized>(
    writer: &mut W,
    input: &mut R,
    store: &S,
    tracker: &T,
    args: &StartArgs,
) -> Result<()> {
    let config = ConfigStore::new(store).load()?;

    let tag_opts = TagOptions {
        tag: args.tag.clone(),
        no_tag: args.no_tag,
    };
    let tag = tag::resolve(&config, &tag_opts, input, writer)?;

    let opts = StartOptions {
        description: args.message.clone(),
        use_prev_description: args.prev_description,
        tag,
    };
    let machine = SessionMachine::new(store, tracker, config);
    let session = machine.start(&args.issue, &opts)?;

    writeln!(
        writer,
        "Started {} {}",
        session.issue.key, session.issue.summary
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{FakeTracker, open_session, seed_store, stored_timeline};
    use jw_core::{Config, Timeline};

    fn args(issue: &str) -> StartArgs {
        StartArgs {
            issue: issue.to_string(),
            message: None,
            prev_description: false,
            tag: None,
            no_tag: false,
        }
    }

    #[test]
    fn start_appends_and_confirms() {
        let store = seed_store(&Config::default(), &Timeline::default());
        let tracker = FakeTracker::new();
        let mut input = "".as_bytes();
        let mut output = Vec::new();

        run(&mut output, &mut input, &store, &tracker, &args("AB-1")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output, "Started AB-1 summary of AB-1\n");
        assert_eq!(stored_timeline(&store).len(), 1);
    }

    #[test]
    fn start_prompts_for_a_tag_when_configured() {
        let config = Config {
            tags: vec!["infra".to_string(), "dev".to_string()],
            ..Config::default()
        };
        let store = seed_store(&config, &Timeline::default());
        let tracker = FakeTracker::new();
        let mut input = "0\n".as_bytes();
        let mut output = Vec::new();

        run(&mut output, &mut input, &store, &tracker, &args("AB-1")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("[0] infra"));
        assert_eq!(
            stored_timeline(&store).list[0].tag.as_deref(),
            Some("infra")
        );
    }

    #[test]
    fn start_refuses_while_a_session_is_open() {
        let mut timeline = Timeline::default();
        timeline.push(open_session("AB-1", "2026-02-03T09:00:00Z"));
        let store = seed_store(&Config::default(), &timeline);
        let tracker = FakeTracker::new();
        let mut input = "".as_bytes();
        let mut output = Vec::new();

        let err = run(&mut output, &mut input, &store, &tracker, &args("AB-2")).unwrap_err();
        assert!(err.to_string().contains("not finished"));
        assert_eq!(stored_timeline(&store).len(), 1);
    }
}
