//! Grouping tokens into command invocations and extracting redirection.
//!
//! There is no tree to build here: a line is a flat sequence of command
//! groups separated by `&`, and the only piece of structure inside a group
//! is an optional trailing `> target`. The grouper and the redirection
//! extractor are kept separate so a malformed redirection can abandon one
//! group while its siblings on the same line still run.

use crate::lexer::Token;
use std::fmt;
use std::path::PathBuf;

/// One command invocation derived from a line.
///
/// `argv[0]` is the command name; the vector is never empty. When `redirect`
/// is present, the command's standard output goes to that file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandGroup {
    pub argv: Vec<String>,
    pub redirect: Option<PathBuf>,
}

/// Errors that can occur while shaping a token group into a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsingError {
    /// `>` appeared somewhere other than second-to-last position, appeared
    /// more than once, or had no command in front of it.
    RedirectSyntax,
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsingError::RedirectSyntax => write!(f, "malformed output redirection"),
        }
    }
}

impl std::error::Error for ParsingError {}

/// Split a line's tokens into raw command groups at the `&` operator.
///
/// A group containing zero word tokens is dropped silently, so a trailing
/// `&` produces no empty group and `& &` produces nothing at all. The
/// surviving groups keep their original token order for redirection
/// validation.
pub fn split_groups(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        if token == Token::ParallelOp {
            close_group(&mut groups, &mut current);
        } else {
            current.push(token);
        }
    }
    close_group(&mut groups, &mut current);
    groups
}

fn close_group(groups: &mut Vec<Vec<Token>>, current: &mut Vec<Token>) {
    if current.iter().any(Token::is_word) {
        groups.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Validate and strip a trailing `> target` from one raw group.
///
/// The `>` operator is legal only as the second-to-last token of the group's
/// original token sequence, with at least one token before it; any other
/// occurrence is a syntax error. On success the operator and the target are
/// removed and the target returned alongside the remaining argv.
pub fn extract_redirect(tokens: Vec<Token>) -> Result<CommandGroup, ParsingError> {
    let n = tokens.len();

    for (i, token) in tokens.iter().enumerate() {
        if *token == Token::RedirectRight && (n < 3 || i != n - 2) {
            return Err(ParsingError::RedirectSyntax);
        }
    }

    let has_redirect = n >= 3 && tokens[n - 2] == Token::RedirectRight;
    let (body, redirect) = if has_redirect {
        let target = match &tokens[n - 1] {
            Token::Word(name) => PathBuf::from(name),
            _ => return Err(ParsingError::RedirectSyntax),
        };
        (&tokens[..n - 2], Some(target))
    } else {
        (&tokens[..], None)
    };

    // `;` is reserved: it groups like an operator but degrades to an
    // ordinary word here, matching the original interpreter.
    let argv: Vec<String> = body
        .iter()
        .map(|token| match token {
            Token::Word(word) => word.clone(),
            Token::SequenceOp => ";".to_string(),
            _ => unreachable!("grouper removes `&`, loop above rejects stray `>`"),
        })
        .collect();

    Ok(CommandGroup { argv, redirect })
}

/// Convenience wrapper: group a line's tokens and extract redirection from
/// each group independently.
pub fn parse_line(tokens: Vec<Token>) -> Vec<Result<CommandGroup, ParsingError>> {
    split_groups(tokens).into_iter().map(extract_redirect).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::split_into_tokens;

    fn group(line: &str) -> Vec<Vec<Token>> {
        split_groups(split_into_tokens(line))
    }

    fn extract(line: &str) -> Result<CommandGroup, ParsingError> {
        let mut groups = group(line);
        assert_eq!(groups.len(), 1, "expected exactly one group in {:?}", line);
        extract_redirect(groups.remove(0))
    }

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_trailing_parallel_op_produces_no_empty_group() {
        let groups = group("cmd1 & cmd2 &");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], split_into_tokens("cmd1"));
        assert_eq!(groups[1], split_into_tokens("cmd2"));
    }

    #[test]
    fn test_wordless_groups_are_dropped() {
        assert!(group("& &").is_empty());
        let groups = group("a & & b");
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_redirect_extracted_from_penultimate_position() {
        let cmd = extract("ls -l > out.txt").unwrap();
        assert_eq!(cmd.argv, argv(&["ls", "-l"]));
        assert_eq!(cmd.redirect, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_redirect_without_whitespace() {
        let cmd = extract("pwd>out").unwrap();
        assert_eq!(cmd.argv, argv(&["pwd"]));
        assert_eq!(cmd.redirect, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_no_redirect_leaves_argv_untouched() {
        let cmd = extract("echo a b c").unwrap();
        assert_eq!(cmd.argv, argv(&["echo", "a", "b", "c"]));
        assert_eq!(cmd.redirect, None);
    }

    #[test]
    fn test_redirect_with_no_command_is_an_error() {
        assert_eq!(extract("> out.txt"), Err(ParsingError::RedirectSyntax));
    }

    #[test]
    fn test_redirect_not_second_to_last_is_an_error() {
        assert_eq!(extract("ls > a b"), Err(ParsingError::RedirectSyntax));
    }

    #[test]
    fn test_redirect_missing_target_is_an_error() {
        assert_eq!(extract("ls >"), Err(ParsingError::RedirectSyntax));
    }

    #[test]
    fn test_duplicate_redirect_is_an_error() {
        assert_eq!(extract("ls > a > b"), Err(ParsingError::RedirectSyntax));
        assert_eq!(extract("ls >> out"), Err(ParsingError::RedirectSyntax));
    }

    #[test]
    fn test_bad_redirect_abandons_only_its_own_group() {
        let results = parse_line(split_into_tokens("ls > a b & echo ok"));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0], Err(ParsingError::RedirectSyntax));
        let ok = results[1].clone().unwrap();
        assert_eq!(ok.argv, argv(&["echo", "ok"]));
    }

    #[test]
    fn test_sequence_op_degrades_to_a_word() {
        let cmd = extract("echo a ; b").unwrap();
        assert_eq!(cmd.argv, argv(&["echo", "a", ";", "b"]));
    }

    #[test]
    fn test_redirect_applies_per_group() {
        let results = parse_line(split_into_tokens("echo hi > one & echo bye"));
        let first = results[0].clone().unwrap();
        let second = results[1].clone().unwrap();
        assert_eq!(first.redirect, Some(PathBuf::from("one")));
        assert_eq!(second.redirect, None);
    }
}
