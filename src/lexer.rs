//! Lexical analysis (tokenization) for the interpreter's line-oriented input.
//!
//! The grammar is deliberately small: a line consists of words separated by
//! whitespace, and three single-character operators that delimit themselves
//! regardless of surrounding whitespace. There are no quotes, escapes or
//! multi-character operators, so the scan cannot fail.

/// Represents a token resulting from lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word: command name, argument, or redirection target.
    Word(String),
    /// The parallel-execution operator, `&`.
    ParallelOp,
    /// The sequencing operator, `;`. Recognized but reserved; the grouper
    /// gives it no special meaning.
    SequenceOp,
    /// Output redirection symbol, `>`.
    RedirectRight,
}

impl Token {
    /// Returns true for tokens that contribute text to an argument vector.
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }
}

/// Characters that separate words without producing a token of their own.
const DELIMITERS: [char; 2] = [' ', '\t'];

struct Scanner {
    buffer: String,
    tokens: Vec<Token>,
}

impl Scanner {
    fn new() -> Self {
        Scanner {
            buffer: String::new(),
            tokens: Vec::new(),
        }
    }

    fn scan(mut self, line: &str) -> Vec<Token> {
        for ch in line.chars() {
            match ch {
                c if DELIMITERS.contains(&c) => self.flush_word(),
                '&' => self.push_operator(Token::ParallelOp),
                ';' => self.push_operator(Token::SequenceOp),
                '>' => self.push_operator(Token::RedirectRight),
                c => self.buffer.push(c),
            }
        }
        self.flush_word();
        self.tokens
    }

    /// Close the pending word, if one is open. Words are never empty.
    fn flush_word(&mut self) {
        if !self.buffer.is_empty() {
            self.tokens.push(Token::Word(std::mem::take(&mut self.buffer)));
        }
    }

    /// An operator always terminates the word in progress first, which is
    /// what makes `a>b` tokenize identically to `a > b`.
    fn push_operator(&mut self, op: Token) {
        self.flush_word();
        self.tokens.push(op);
    }
}

/// The main entry point function to perform lexical analysis.
///
/// # Arguments
/// * `line` - One line of raw input, without its terminating newline.
///
/// # Returns
/// The ordered token sequence. A line consisting only of delimiters yields
/// an empty vector.
pub fn split_into_tokens(line: &str) -> Vec<Token> {
    Scanner::new().scan(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(s: &str) -> Token {
        Token::Word(s.to_string())
    }

    #[test]
    fn test_words_split_on_whitespace_runs() {
        let tokens = split_into_tokens("a  b");
        assert_eq!(tokens, vec![word("a"), word("b")]);
    }

    #[test]
    fn test_tabs_and_spaces_are_both_delimiters() {
        let tokens = split_into_tokens("\tls\t -l  ");
        assert_eq!(tokens, vec![word("ls"), word("-l")]);
    }

    #[test]
    fn test_delimiter_only_line_yields_no_tokens() {
        assert!(split_into_tokens("   \t ").is_empty());
        assert!(split_into_tokens("").is_empty());
    }

    #[test]
    fn test_operator_without_surrounding_whitespace() {
        let tight = split_into_tokens("a>b");
        let spaced = split_into_tokens("a > b");
        assert_eq!(tight, spaced);
        assert_eq!(tight, vec![word("a"), Token::RedirectRight, word("b")]);
    }

    #[test]
    fn test_adjacent_operators_stay_separate() {
        // No multi-character operators exist; ">>" is two tokens.
        let tokens = split_into_tokens("ls>>out");
        assert_eq!(
            tokens,
            vec![
                word("ls"),
                Token::RedirectRight,
                Token::RedirectRight,
                word("out")
            ]
        );
    }

    #[test]
    fn test_all_three_operators_recognized() {
        let tokens = split_into_tokens("a&b;c>d");
        assert_eq!(
            tokens,
            vec![
                word("a"),
                Token::ParallelOp,
                word("b"),
                Token::SequenceOp,
                word("c"),
                Token::RedirectRight,
                word("d"),
            ]
        );
    }

    #[test]
    fn test_trailing_word_is_flushed() {
        let tokens = split_into_tokens("echo hi");
        assert_eq!(tokens, vec![word("echo"), word("hi")]);
    }
}
