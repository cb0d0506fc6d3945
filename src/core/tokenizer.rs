//! Whitespace tokenizer for console input.
//!
//! Tokens are separated by runs of spaces and tabs. There is no quoting;
//! every character other than space or tab belongs to some token.

/// Result of tokenizing a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedCommand<'a> {
    /// The command name (first token).
    pub command: &'a str,
    /// The arguments (remaining tokens).
    pub args: Vec<&'a str>,
    /// The input with surrounding whitespace removed.
    pub raw: &'a str,
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split a line into its tokens, discarding empty ones.
pub fn tokenize_string(input: &str) -> Vec<&str> {
    input.split(is_separator).filter(|t| !t.is_empty()).collect()
}

/// Tokenize a command line into command name and arguments.
///
/// Returns `None` if the line holds no tokens.
///
/// # Examples
///
/// ```
/// use bevy_scrollback_console::core::tokenize;
///
/// let result = tokenize("  echo   hello\tworld ").unwrap();
/// assert_eq!(result.command, "echo");
/// assert_eq!(result.args, vec!["hello", "world"]);
///
/// assert!(tokenize(" \t ").is_none());
/// ```
pub fn tokenize(input: &str) -> Option<TokenizedCommand<'_>> {
    let raw = input.trim();
    let mut tokens = tokenize_string(raw).into_iter();
    let command = tokens.next()?;

    Some(TokenizedCommand {
        command,
        args: tokens.collect(),
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let result = tokenize("echo hello world").unwrap();
        assert_eq!(result.command, "echo");
        assert_eq!(result.args, vec!["hello", "world"]);
        assert_eq!(result.raw, "echo hello world");
    }

    #[test]
    fn test_tokenize_no_args() {
        let result = tokenize("quit").unwrap();
        assert_eq!(result.command, "quit");
        assert!(result.args.is_empty());
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_none());
        assert!(tokenize("   ").is_none());
        assert!(tokenize("\t \t").is_none());
    }

    #[test]
    fn test_tokenize_extra_whitespace() {
        let result = tokenize("  echo   hello \t\t world  ").unwrap();
        assert_eq!(result.command, "echo");
        assert_eq!(result.args, vec!["hello", "world"]);
        assert_eq!(result.raw, "echo   hello \t\t world");
    }

    #[test]
    fn test_quotes_are_ordinary_characters() {
        let result = tokenize(r#"say "hello world""#).unwrap();
        assert_eq!(result.args, vec![r#""hello"#, r#"world""#]);
    }

    #[test]
    fn test_tokenize_numbers() {
        let result = tokenize("sv_gravity 800.5").unwrap();
        assert_eq!(result.command, "sv_gravity");
        assert_eq!(result.args, vec!["800.5"]);
    }

    #[test]
    fn test_tokenize_string_whitespace_only() {
        assert!(tokenize_string("").is_empty());
        assert!(tokenize_string("  \t  ").is_empty());
    }
}
