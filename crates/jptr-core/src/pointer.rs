//! RFC 6901 pointer parsing and escaping.
//!
//! A pointer is either the empty string (the whole document) or a sequence of
//! `/`-prefixed reference tokens. Inside a token `~1` stands for `/` and `~0`
//! for `~`. Decoding is a single left-to-right pass, so `~01` decodes to `~1`
//! and not to `/`. A `~` followed by anything else, or at the end of a token,
//! is kept literally.

use crate::error::{PointerError, Result};
use crate::ops;
use crate::value::JsonValue;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A parsed JSON Pointer.
///
/// Holds the source text and the decoded tokens. The first token is always
/// the empty root token, so the pointer `""` has exactly one token and
/// `"/a/"` has three (`""`, `"a"`, `""`).
///
/// Equality and hashing use the source text only: `/a~1b` and a pointer built
/// from a differently escaped spelling of the same tokens are distinct keys.
#[derive(Debug, Clone)]
pub struct Pointer {
    source: String,
    tokens: Vec<String>,
}

impl Pointer {
    /// Parse pointer text.
    ///
    /// # Errors
    ///
    /// [`PointerError::MalformedPointer`] if the text is non-empty and does
    /// not begin with `/`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jptr_core::Pointer;
    ///
    /// let ptr = Pointer::parse("/a~1b/m~0n").unwrap();
    /// assert_eq!(ptr.tokens(), ["a/b", "m~n"]);
    /// assert!(Pointer::parse("a").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Pointer> {
        let mut raw = text.split('/');
        if raw.next() != Some("") {
            return Err(PointerError::MalformedPointer {
                pointer: text.to_string(),
            });
        }
        let mut tokens = vec![String::new()];
        tokens.extend(raw.map(|t| unescape_token(t).into_owned()));
        Ok(Pointer {
            source: text.to_string(),
            tokens,
        })
    }

    /// Build a pointer from raw (unescaped) reference tokens.
    ///
    /// ```
    /// use jptr_core::Pointer;
    ///
    /// let ptr = Pointer::from_tokens(["a/b", "m~n"]);
    /// assert_eq!(ptr.as_str(), "/a~1b/m~0n");
    /// ```
    pub fn from_tokens<I, S>(tokens: I) -> Pointer
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = String::new();
        let mut decoded = vec![String::new()];
        for token in tokens {
            let token = token.as_ref();
            source.push('/');
            source.push_str(&escape_token(token));
            decoded.push(token.to_string());
        }
        Pointer {
            source,
            tokens: decoded,
        }
    }

    /// The whole-document pointer `""`.
    pub fn root() -> Pointer {
        Pointer {
            source: String::new(),
            tokens: vec![String::new()],
        }
    }

    /// Source text exactly as parsed.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Decoded reference tokens, excluding the implicit root token.
    pub fn tokens(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// True for `""`, which addresses the whole document.
    pub fn is_root(&self) -> bool {
        self.tokens.len() == 1
    }

    /// Number of reference tokens (root token excluded).
    pub fn len(&self) -> usize {
        self.tokens.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    pub fn last_token(&self) -> Option<&str> {
        self.tokens().last().map(String::as_str)
    }

    /// Value at this pointer. See [`ops::get`].
    pub fn get(&self, document: &JsonValue) -> Result<JsonValue> {
        ops::get(self, document)
    }

    /// See [`ops::add`].
    pub fn add(&self, document: &JsonValue, value: JsonValue) -> Result<JsonValue> {
        ops::add(self, document, value)
    }

    /// See [`ops::replace`].
    pub fn replace(&self, document: &JsonValue, value: JsonValue) -> Result<JsonValue> {
        ops::replace(self, document, value)
    }

    /// See [`ops::remove`].
    pub fn remove(&self, document: &JsonValue) -> Result<JsonValue> {
        ops::remove(self, document)
    }
}

/// Parse pointer text. Same as [`Pointer::parse`].
pub fn parse_pointer(text: &str) -> Result<Pointer> {
    Pointer::parse(text)
}

/// Decode `~1` → `/` and `~0` → `~` in one pass.
///
/// Borrows when the token holds no `~`.
pub fn unescape_token(token: &str) -> Cow<'_, str> {
    if !token.contains('~') {
        return Cow::Borrowed(token);
    }
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '~' {
            match chars.peek() {
                Some('0') => {
                    chars.next();
                    out.push('~');
                    continue;
                }
                Some('1') => {
                    chars.next();
                    out.push('/');
                    continue;
                }
                _ => {}
            }
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

/// Encode `~` → `~0` and `/` → `~1`.
///
/// Borrows when the token needs no escaping.
pub fn escape_token(token: &str) -> Cow<'_, str> {
    if !token.contains(['~', '/']) {
        return Cow::Borrowed(token);
    }
    let mut out = String::with_capacity(token.len() + 2);
    for ch in token.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

impl FromStr for Pointer {
    type Err = PointerError;

    fn from_str(s: &str) -> Result<Self> {
        Pointer::parse(s)
    }
}

impl TryFrom<&str> for Pointer {
    type Error = PointerError;

    fn try_from(s: &str) -> Result<Self> {
        Pointer::parse(s)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pointer {}

impl Hash for Pointer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl AsRef<str> for Pointer {
    fn as_ref(&self) -> &str {
        &self.source
    }
}
