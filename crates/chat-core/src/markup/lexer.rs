use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;
use std::ops::Range;

use crate::value_objects::Snowflake;

const BACKTICK: u8 = b'`';
const MENTION_OPEN: &str = "<@";

/// Answers whether a mention target names a known user
pub trait MentionLookup {
    fn is_known_user(&self, id: Snowflake) -> bool;
}

impl<S: BuildHasher> MentionLookup for HashSet<Snowflake, S> {
    fn is_known_user(&self, id: Snowflake) -> bool {
        self.contains(&id)
    }
}

impl MentionLookup for BTreeSet<Snowflake> {
    fn is_known_user(&self, id: Snowflake) -> bool {
        self.contains(&id)
    }
}

impl<T: MentionLookup + ?Sized> MentionLookup for &T {
    fn is_known_user(&self, id: Snowflake) -> bool {
        (**self).is_known_user(id)
    }
}

/// What a span of message text turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Text,
    /// `` `code` ``, `code` is the raw text between the backticks
    InlineCode { code: &'a str },
    /// Fenced block; `lang` is everything after the opening fence up to the
    /// first newline
    CodeBlock { lang: &'a str, code: &'a str },
    /// `<@id>` naming a known user
    Mention { user_id: Snowflake },
}

/// A lexed span; `span` is a byte range into the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Range<usize>,
    pub raw: &'a str,
}

/// Lexical mode entered at the cursor, decided by the prefix found there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Plain,
    InlineCode,
    FencedCode { fence_len: usize },
    MentionPending,
}

/// Lazy token stream over one message, see [`tokenize`]
///
/// Adjacent plain characters are merged into a single `Text` token, and the
/// spans of all tokens tile the source text exactly.
#[derive(Debug)]
pub struct Tokens<'a, L> {
    text: &'a str,
    lookup: L,
    pos: usize,
    pending: Option<Token<'a>>,
}

/// Lex `text`, recognising mentions whose target `lookup` knows
pub fn tokenize<L: MentionLookup>(text: &str, lookup: L) -> Tokens<'_, L> {
    Tokens {
        text,
        lookup,
        pos: 0,
        pending: None,
    }
}

/// User IDs mentioned outside code, first occurrence order, no duplicates
pub fn extract_mentions<L: MentionLookup>(text: &str, lookup: L) -> Vec<Snowflake> {
    let mut seen = HashSet::new();
    tokenize(text, lookup)
        .filter_map(|token| match token.kind {
            TokenKind::Mention { user_id } => Some(user_id),
            _ => None,
        })
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Every well-formed `<@id>` target in `text`, code context ignored
///
/// This is a superset of what [`tokenize`] can ever ask its lookup about,
/// so resolving exactly these IDs up front is enough.
pub fn mention_candidates(text: &str) -> Vec<Snowflake> {
    let mut seen = HashSet::new();
    text.match_indices(MENTION_OPEN)
        .filter_map(|(at, _)| {
            let rest = &text[at + MENTION_OPEN.len()..];
            rest.find('>').and_then(|end| parse_target(&rest[..end]))
        })
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Mention targets are plain decimal snowflakes in canonical form
fn parse_target(raw: &str) -> Option<Snowflake> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return None;
    }
    raw.parse().ok()
}

impl<'a, L: MentionLookup> Tokens<'a, L> {
    fn bytes(&self) -> &'a [u8] {
        self.text.as_bytes()
    }

    fn backtick_run(&self, at: usize) -> usize {
        self.bytes()[at..]
            .iter()
            .take_while(|b| **b == BACKTICK)
            .count()
    }

    fn enter(&self, at: usize) -> Mode {
        let bytes = self.bytes();
        match bytes[at] {
            BACKTICK => match self.backtick_run(at) {
                1 => Mode::InlineCode,
                2 => Mode::Plain,
                fence_len => Mode::FencedCode { fence_len },
            },
            b'<' if bytes.get(at + 1) == Some(&b'@') => Mode::MentionPending,
            _ => Mode::Plain,
        }
    }

    /// Try to complete a token in `mode` starting at `at`, returning its end
    fn scan_mode(&self, mode: Mode, at: usize) -> Option<(usize, TokenKind<'a>)> {
        match mode {
            Mode::Plain => None,
            Mode::InlineCode => self.scan_inline_code(at),
            Mode::FencedCode { fence_len } => self.scan_fenced_code(at, fence_len),
            Mode::MentionPending => self.scan_mention(at),
        }
    }

    fn scan_inline_code(&self, at: usize) -> Option<(usize, TokenKind<'a>)> {
        let body = at + 1;
        let mut escaped = false;
        for (offset, byte) in self.bytes()[body..].iter().enumerate() {
            match *byte {
                b'\\' if !escaped => escaped = true,
                BACKTICK if !escaped => {
                    let code = &self.text[body..body + offset];
                    return Some((body + offset + 1, TokenKind::InlineCode { code }));
                }
                _ => escaped = false,
            }
        }
        None
    }

    fn scan_fenced_code(&self, at: usize, fence_len: usize) -> Option<(usize, TokenKind<'a>)> {
        let bytes = self.bytes();
        let after_fence = at + fence_len;
        let newline = self.text[after_fence..].find('\n')?;
        let lang = &self.text[after_fence..after_fence + newline];
        let body = after_fence + newline + 1;

        let mut cursor = body;
        while let Some(offset) = bytes[cursor..].iter().position(|b| *b == BACKTICK) {
            let run_start = cursor + offset;
            let run = self.backtick_run(run_start);
            let run_end = run_start + run;
            if run >= fence_len && matches!(bytes.get(run_end), None | Some(b'\n')) {
                let code = &self.text[body..run_start];
                return Some((run_end, TokenKind::CodeBlock { lang, code }));
            }
            cursor = run_end;
        }
        None
    }

    fn scan_mention(&self, at: usize) -> Option<(usize, TokenKind<'a>)> {
        let target = at + MENTION_OPEN.len();
        let close = self.text[target..].find('>')?;
        let user_id = parse_target(&self.text[target..target + close])?;
        self.lookup
            .is_known_user(user_id)
            .then_some((target + close + 1, TokenKind::Mention { user_id }))
    }

    /// Position of the next possible token start after the char at `at`
    fn skip_plain(&self, at: usize) -> usize {
        let step = self.text[at..].chars().next().map_or(1, char::len_utf8);
        let from = at + step;
        self.text[from..]
            .find(['`', '<'])
            .map_or(self.text.len(), |offset| from + offset)
    }

    fn token(&self, span: Range<usize>, kind: TokenKind<'a>) -> Token<'a> {
        Token {
            raw: &self.text[span.clone()],
            kind,
            span,
        }
    }
}

impl<'a, L: MentionLookup> Iterator for Tokens<'a, L> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        let len = self.text.len();
        let text_start = self.pos;
        while self.pos < len {
            let at = self.pos;
            let mode = self.enter(at);
            match self.scan_mode(mode, at) {
                Some((end, kind)) => {
                    let token = self.token(at..end, kind);
                    self.pos = end;
                    if at == text_start {
                        return Some(token);
                    }
                    self.pending = Some(token);
                    return Some(self.token(text_start..at, TokenKind::Text));
                }
                // A failed opener is just its first character as text
                None => self.pos = self.skip_plain(at),
            }
        }

        (text_start < len).then(|| self.token(text_start..len, TokenKind::Text))
    }
}

impl<L: MentionLookup> std::iter::FusedIterator for Tokens<'_, L> {}
