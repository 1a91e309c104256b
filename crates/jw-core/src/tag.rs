//! Tag resolution for new sessions.
//!
//! Tags are opt-in at the config level: with no configured tags every
//! resolution is a no-op, whatever flags were passed. With tags configured
//! the caller either picks one explicitly, opts out, or is prompted.

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::Error;

/// Tag flags passed to `start`.
#[derive(Debug, Clone, Default)]
pub struct TagOptions {
    /// Explicit tag; an empty string counts as "not given".
    pub tag: Option<String>,
    /// Opt out of tagging for this session.
    pub no_tag: bool,
}

/// Resolves the tag for a session about to be started.
///
/// Interactive selection reads one line from `input`: the index of a
/// configured tag, or `nt` for no tag.
pub fn resolve<R: BufRead, W: Write>(
    config: &Config,
    opts: &TagOptions,
    input: &mut R,
    prompt: &mut W,
) -> Result<Option<String>, Error> {
    if config.tags.is_empty() {
        return Ok(None);
    }

    let explicit = opts.tag.as_deref().filter(|tag| !tag.is_empty());
    if explicit.is_some() && opts.no_tag {
        return Err(Error::ConflictingTagOptions);
    }

    if let Some(tag) = explicit {
        if !config.tags.iter().any(|candidate| candidate == tag) {
            return Err(Error::UnknownTag {
                tag: tag.to_string(),
            });
        }
        return Ok(Some(tag.to_string()));
    }

    if opts.no_tag {
        return Ok(None);
    }

    writeln!(prompt, "Please choose a tag:")?;
    writeln!(prompt, "[nt] no tag")?;
    for (index, tag) in config.tags.iter().enumerate() {
        writeln!(prompt, "[{index}] {tag}")?;
    }

    let mut line = String::new();
    input.read_line(&mut line)?;
    let selection = line.trim();
    if selection == "nt" {
        return Ok(None);
    }

    let index: usize = selection.parse().map_err(|_| Error::TagIndexOutOfRange {
        input: selection.to_string(),
    })?;
    let tag = config.tags.get(index).ok_or_else(|| Error::TagIndexOutOfRange {
        input: selection.to_string(),
    })?;
    Ok(Some(tag.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_tags(tags: &[&str]) -> Config {
        Config {
            tags: tags.iter().map(ToString::to_string).collect(),
            ..Config::default()
        }
    }

    fn resolve_with(config: &Config, opts: &TagOptions, line: &str) -> Result<Option<String>, Error> {
        let mut input = line.as_bytes();
        let mut prompt = Vec::new();
        resolve(config, opts, &mut input, &mut prompt)
    }

    #[test]
    fn no_configured_tags_is_a_no_op() {
        let config = Config::default();
        let opts = TagOptions {
            tag: Some("infra".to_string()),
            no_tag: false,
        };
        assert_eq!(resolve_with(&config, &opts, "").unwrap(), None);
    }

    #[test]
    fn explicit_tag_and_no_tag_conflict() {
        let config = config_with_tags(&["infra"]);
        let opts = TagOptions {
            tag: Some("infra".to_string()),
            no_tag: true,
        };
        assert!(matches!(
            resolve_with(&config, &opts, ""),
            Err(Error::ConflictingTagOptions)
        ));
    }

    #[test]
    fn empty_tag_flag_with_no_tag_resolves_to_none() {
        let config = config_with_tags(&["infra", "dev"]);
        let opts = TagOptions {
            tag: Some(String::new()),
            no_tag: true,
        };
        assert_eq!(resolve_with(&config, &opts, "").unwrap(), None);
    }

    #[test]
    fn unknown_explicit_tag_is_rejected() {
        let config = config_with_tags(&["infra", "dev"]);
        let opts = TagOptions {
            tag: Some("ops".to_string()),
            no_tag: false,
        };
        assert!(matches!(
            resolve_with(&config, &opts, ""),
            Err(Error::UnknownTag { tag }) if tag == "ops"
        ));
    }

    #[test]
    fn known_explicit_tag_is_used() {
        let config = config_with_tags(&["infra", "dev"]);
        let opts = TagOptions {
            tag: Some("dev".to_string()),
            no_tag: false,
        };
        assert_eq!(resolve_with(&config, &opts, "").unwrap(), Some("dev".to_string()));
    }

    #[test]
    fn interactive_selection_by_index() {
        let config = config_with_tags(&["infra", "dev"]);
        let mut input = "1\n".as_bytes();
        let mut prompt = Vec::new();
        let resolved = resolve(&config, &TagOptions::default(), &mut input, &mut prompt).unwrap();
        assert_eq!(resolved, Some("dev".to_string()));

        let prompt = String::from_utf8(prompt).unwrap();
        assert!(prompt.contains("[nt] no tag"));
        assert!(prompt.contains("[0] infra"));
        assert!(prompt.contains("[1] dev"));
    }

    #[test]
    fn interactive_nt_escapes_without_a_tag() {
        let config = config_with_tags(&["infra"]);
        assert_eq!(
            resolve_with(&config, &TagOptions::default(), "nt\n").unwrap(),
            None
        );
    }

    #[test]
    fn interactive_out_of_range_index_fails() {
        let config = config_with_tags(&["infra"]);
        assert!(matches!(
            resolve_with(&config, &TagOptions::default(), "7\n"),
            Err(Error::TagIndexOutOfRange { input }) if input == "7"
        ));
    }

    #[test]
    fn interactive_garbage_input_fails() {
        let config = config_with_tags(&["infra"]);
        assert!(matches!(
            resolve_with(&config, &TagOptions::default(), "infra\n"),
            Err(Error::TagIndexOutOfRange { input }) if input == "infra"
        ));
    }
}
