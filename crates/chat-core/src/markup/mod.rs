//! Message markup lexing
//!
//! Message text is scanned once, left to right, into spans of plain text,
//! inline code, fenced code blocks and user mentions. Mention syntax inside
//! either kind of code is inert.
//!
//! Deciding whether `<@id>` is a mention needs to know whether `id` names a
//! real user. The lexer itself never performs I/O: callers first collect
//! every [`mention_candidates`] in the text, resolve them against their user
//! store in one batch, and then lex with the resolved set as the
//! [`MentionLookup`].

mod lexer;

pub use lexer::{extract_mentions, mention_candidates, tokenize, MentionLookup, Token, TokenKind, Tokens};
