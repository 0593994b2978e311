//! Sample documents and a fixture scanner.
//!
//! - [`SAMPLE`] / [`sample_tokens`]: the `{"a":1,"b":[2,3]}` document with
//!   its tokens written out by hand.
//! - [`scan`]: turns small well-formed JSON texts into pre-order tokens so
//!   tests do not have to count offsets.
//! - [`wide_array`] / [`deep_array`]: generated inputs for property tests
//!   and benchmarks.

use flatdoc_core::{Token, TokenKind};

/// Object with a primitive member and an array member.
pub const SAMPLE: &str = r#"{"a":1,"b":[2,3]}"#;

/// A document touching every token kind, nesting and empty containers.
pub const CATALOG: &str = r#"{
  "name": "flatdoc",
  "version": 3,
  "tags": ["arena", "tree", "tokens"],
  "limits": { "depth": 10, "strict": true, "fallback": null },
  "empty": [],
  "nothing": {}
}"#;

/// Hand-encoded tokens for [`SAMPLE`].
pub fn sample_tokens() -> Vec<Token> {
    vec![
        Token::object(0, 17, 6),
        Token::key(2, 3, 0),
        Token::primitive(5, 6),
        Token::key(8, 9, 2),
        Token::array(11, 16, 2),
        Token::primitive(12, 13),
        Token::primitive(14, 15),
    ]
}

/// `[0,1,...,n-1]`
pub fn wide_array(n: usize) -> String {
    let items: Vec<String> = (0..n).map(|i| i.to_string()).collect();
    format!("[{}]", items.join(","))
}

/// `[[[...[0]...]]]` with `depth` arrays.
pub fn deep_array(depth: usize) -> String {
    format!("{}0{}", "[".repeat(depth), "]".repeat(depth))
}

/// Scan a well-formed JSON text into pre-order tokens.
///
/// String spans exclude the quotes. Escapes are skipped, not decoded.
///
/// # Panics
///
/// Panics on malformed input; this is a fixture helper, not a parser.
pub fn scan(input: &str) -> Vec<Token> {
    let mut scanner = Scanner {
        bytes: input.as_bytes(),
        pos: 0,
        tokens: Vec::new(),
    };
    scanner.value();
    scanner.skip_whitespace();
    assert_eq!(scanner.pos, input.len(), "trailing input after root value");
    scanner.tokens
}

struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl Scanner<'_> {
    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Scan one value; returns the number of tokens it produced.
    fn value(&mut self) -> u32 {
        self.skip_whitespace();
        match self.bytes[self.pos] {
            b'{' => self.container(TokenKind::Object, b'}'),
            b'[' => self.container(TokenKind::Array, b']'),
            b'"' => {
                let (start, end) = self.string();
                self.tokens.push(Token::string(start, end));
                1
            }
            _ => {
                let start = self.pos;
                while self.pos < self.bytes.len()
                    && !matches!(self.bytes[self.pos], b',' | b']' | b'}')
                    && !self.bytes[self.pos].is_ascii_whitespace()
                {
                    self.pos += 1;
                }
                assert!(self.pos > start, "expected a value at byte {start}");
                self.tokens.push(Token::primitive(start as u32, self.pos as u32));
                1
            }
        }
    }

    fn container(&mut self, kind: TokenKind, close: u8) -> u32 {
        let index = self.tokens.len();
        self.tokens.push(Token::new(kind, self.pos as u32, 0, 0));
        self.pos += 1;
        let mut descendants = 0;
        loop {
            self.skip_whitespace();
            match self.bytes[self.pos] {
                c if c == close => {
                    self.pos += 1;
                    break;
                }
                b',' => {
                    self.pos += 1;
                }
                _ if kind == TokenKind::Object => {
                    let key = self.tokens.len();
                    let (start, end) = self.string();
                    self.tokens.push(Token::key(start, end, 0));
                    self.skip_whitespace();
                    assert_eq!(self.bytes[self.pos], b':', "expected ':' at byte {}", self.pos);
                    self.pos += 1;
                    let value = self.value();
                    self.tokens[key].size = value;
                    descendants += value + 1;
                }
                _ => descendants += self.value(),
            }
        }
        self.tokens[index].end = self.pos as u32;
        self.tokens[index].size = descendants;
        descendants + 1
    }

    fn string(&mut self) -> (u32, u32) {
        assert_eq!(self.bytes[self.pos], b'"', "expected '\"' at byte {}", self.pos);
        self.pos += 1;
        let start = self.pos;
        while self.bytes[self.pos] != b'"' {
            self.pos += if self.bytes[self.pos] == b'\\' { 2 } else { 1 };
        }
        let end = self.pos;
        self.pos += 1;
        (start as u32, end as u32)
    }
}
