//! The lexer seam. The parser never names a concrete tokenizer; anything
//! that can hand out classified tokens and raw capture-until-delimiter
//! slices of the source text can drive it.

use prop_lex::{TokenKind, Tokenizer};

/// Token classification the parser cares about. Anything that is neither
/// an identifier nor a quoted string is `Other` (punctuation, numbers).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XmlTokenKind {
    Identifier,
    QuotedString,
    Other,
    End,
}

/// Pull-lexer capability over a borrowed document.
pub trait XmlTokens<'a>: Sized {
    fn tokenize(text: &'a str) -> Self;

    /// Advances to the next token and returns its classification.
    fn advance(&mut self) -> XmlTokenKind;

    /// Case-insensitive test of the current token text.
    fn token_is(&self, literal: &str) -> bool;

    fn token_text(&self) -> &'a str;

    fn token_kind(&self) -> XmlTokenKind;

    /// Raw capture from the cursor up to `delim`, consuming the delimiter;
    /// `None` when the delimiter never occurs.
    fn read_until(&mut self, delim: char) -> Option<&'a str>;
}

impl<'a> XmlTokens<'a> for Tokenizer<'a> {
    fn tokenize(text: &'a str) -> Self {
        Tokenizer::new(text)
    }

    fn advance(&mut self) -> XmlTokenKind {
        classify(self.next_token())
    }

    fn token_is(&self, literal: &str) -> bool {
        Tokenizer::token_is(self, literal)
    }

    fn token_text(&self) -> &'a str {
        self.token_str()
    }

    fn token_kind(&self) -> XmlTokenKind {
        classify(self.kind())
    }

    fn read_until(&mut self, delim: char) -> Option<&'a str> {
        Tokenizer::read_until(self, delim)
    }
}

fn classify(kind: TokenKind) -> XmlTokenKind {
    match kind {
        TokenKind::Identifier => XmlTokenKind::Identifier,
        TokenKind::QuotedString => XmlTokenKind::QuotedString,
        TokenKind::End => XmlTokenKind::End,
        TokenKind::None | TokenKind::Number | TokenKind::Punct => XmlTokenKind::Other,
    }
}
