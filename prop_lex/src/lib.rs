//! # prop_lex
//!
//! A small pull tokenizer over borrowed text. It hands out identifiers,
//! numbers, quoted strings and single-character punctuation, plus a raw
//! capture-until-delimiter escape hatch for markup payloads where token
//! rules do not apply.
//!
//! ```rust
//! use prop_lex::{TokenKind, Tokenizer};
//!
//! let mut t = Tokenizer::new(r#"name = "value""#);
//! assert_eq!(t.next_token(), TokenKind::Identifier);
//! assert!(t.token_is("NAME"));
//! assert_eq!(t.next_token(), TokenKind::Punct);
//! assert_eq!(t.next_token(), TokenKind::QuotedString);
//! assert_eq!(t.token_str(), "value");
//! assert_eq!(t.next_token(), TokenKind::End);
//! ```

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Nothing scanned yet.
    None,
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Identifier,
    /// Optional sign, digits, optional fraction.
    Number,
    /// Double-quoted run; `token_str` is the content without the quotes.
    QuotedString,
    /// Any other single character.
    Punct,
    End,
}

/// Cursor-style tokenizer; each `next_token` consumes one token.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    token: &'a str,
    kind: TokenKind,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Tokenizer {
            src,
            pos: 0,
            token: "",
            kind: TokenKind::None,
        }
    }

    /// The text of the current token. For quoted strings the surrounding
    /// quotes are stripped.
    pub fn token_str(&self) -> &'a str {
        self.token
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Case-insensitive comparison against the current token text.
    pub fn token_is(&self, s: &str) -> bool {
        self.token.eq_ignore_ascii_case(s)
    }

    /// Scans the next token and makes it current.
    pub fn next_token(&mut self) -> TokenKind {
        let rest = self.src[self.pos..].trim_start();
        self.pos = self.src.len() - rest.len();

        let mut chars = rest.char_indices();
        let Some((_, first)) = chars.next() else {
            self.token = "";
            self.kind = TokenKind::End;
            return self.kind;
        };

        let (len, kind) = if first.is_ascii_alphabetic() || first == '_' {
            let end = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            (end, TokenKind::Identifier)
        } else if first.is_ascii_digit()
            || ((first == '-' || first == '+')
                && rest[1..].starts_with(|c: char| c.is_ascii_digit()))
        {
            let digits_from = if first.is_ascii_digit() { 0 } else { 1 };
            let mut end = digits_from
                + rest[digits_from..]
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len() - digits_from);
            if rest[end..].starts_with('.') {
                let frac = &rest[end + 1..];
                let frac_len = frac
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(frac.len());
                if frac_len > 0 {
                    end += 1 + frac_len;
                }
            }
            (end, TokenKind::Number)
        } else if first == '"' {
            match rest[1..].find('"') {
                Some(close) => {
                    self.token = &rest[1..1 + close];
                    self.kind = TokenKind::QuotedString;
                    self.pos += 1 + close + 1;
                    return self.kind;
                }
                // unterminated: the rest of the input is the token
                None => {
                    self.token = &rest[1..];
                    self.kind = TokenKind::QuotedString;
                    self.pos = self.src.len();
                    return self.kind;
                }
            }
        } else {
            (first.len_utf8(), TokenKind::Punct)
        };

        self.token = &rest[..len];
        self.kind = kind;
        self.pos += len;
        self.kind
    }

    /// Captures raw text from the current position up to (not including)
    /// `delim`, consuming the delimiter. Tokenization rules do not apply
    /// to the captured text. Returns `None` when `delim` never occurs;
    /// the cursor then sits at the end of input.
    pub fn read_until(&mut self, delim: char) -> Option<&'a str> {
        let rest = &self.src[self.pos..];
        match rest.find(delim) {
            Some(at) => {
                self.pos += at + delim.len_utf8();
                Some(&rest[..at])
            }
            None => {
                self.pos = self.src.len();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TokenKind, String)> {
        let mut t = Tokenizer::new(src);
        let mut out = Vec::new();
        loop {
            match t.next_token() {
                TokenKind::End => break,
                k => out.push((k, t.token_str().to_owned())),
            }
        }
        out
    }

    #[test]
    fn identifiers_numbers_and_punctuation() {
        let toks = kinds("foo_1 = -12.5 <x>");
        assert_eq!(
            toks,
            vec![
                (TokenKind::Identifier, "foo_1".into()),
                (TokenKind::Punct, "=".into()),
                (TokenKind::Number, "-12.5".into()),
                (TokenKind::Punct, "<".into()),
                (TokenKind::Identifier, "x".into()),
                (TokenKind::Punct, ">".into()),
            ]
        );
    }

    #[test]
    fn quoted_strings_strip_quotes() {
        let mut t = Tokenizer::new(r#""hello world" next"#);
        assert_eq!(t.next_token(), TokenKind::QuotedString);
        assert_eq!(t.token_str(), "hello world");
        assert_eq!(t.next_token(), TokenKind::Identifier);
        assert!(t.token_is("NEXT"));
    }

    #[test]
    fn unterminated_quote_takes_the_rest() {
        let mut t = Tokenizer::new("\"dangling");
        assert_eq!(t.next_token(), TokenKind::QuotedString);
        assert_eq!(t.token_str(), "dangling");
        assert_eq!(t.next_token(), TokenKind::End);
    }

    #[test]
    fn number_shapes() {
        assert_eq!(kinds("42")[0].1, "42");
        assert_eq!(kinds("+7")[0].1, "+7");
        assert_eq!(kinds("3.")[0], (TokenKind::Number, "3".into()));
        // a bare sign is punctuation
        assert_eq!(kinds("- x")[0].0, TokenKind::Punct);
    }

    #[test]
    fn read_until_is_raw() {
        let mut t = Tokenizer::new("<tag attr=\"v\">some > raw < text</tag>");
        t.next_token();
        assert_eq!(t.next_token(), TokenKind::Identifier);
        assert_eq!(t.read_until('>').unwrap(), " attr=\"v\"");
        assert_eq!(t.read_until('<').unwrap(), "some > raw ");
        assert_eq!(t.read_until('@'), None);
        assert_eq!(t.next_token(), TokenKind::End);
    }

    #[test]
    fn empty_and_whitespace_input() {
        let mut t = Tokenizer::new("   \n\t ");
        assert_eq!(t.next_token(), TokenKind::End);
        assert_eq!(t.kind(), TokenKind::End);
        assert_eq!(t.token_str(), "");
    }
}
