//! Parameter string tokenizer.
//!
//! The forms form an ordered alternation tried at every scan position; the
//! first one that matches wins:
//!
//! 1. `key="value"`
//! 2. `key='value'`
//! 3. `key=value` (value runs to the next whitespace)
//! 4. `"value"`
//! 5. `'value'`
//! 6. any run of non-whitespace
//!
//! Quotes need not balance: an unclosed quote falls through to the bare
//! forms and stays part of the token.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::parsing::blocks::Param;

struct Alternative {
    pattern: Regex,
    build: fn(&Captures<'_>) -> Param,
}

impl Alternative {
    fn new(pattern: &str, build: fn(&Captures<'_>) -> Param) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("Invalid parameter regex"),
            build,
        }
    }

    /// Matches at the very start of `input`, returning the consumed length.
    fn try_match(&self, input: &str) -> Option<(usize, Param)> {
        let caps = self.pattern.captures(input)?;
        let len = caps.get(0)?.end();
        Some((len, (self.build)(&caps)))
    }
}

fn keyed(caps: &Captures<'_>) -> Param {
    Param::keyed(&caps[1], &caps[2])
}

fn positional(caps: &Captures<'_>) -> Param {
    Param::positional(&caps[1])
}

fn alternatives() -> &'static [Alternative] {
    static ALTERNATIVES: OnceLock<Vec<Alternative>> = OnceLock::new();
    ALTERNATIVES.get_or_init(|| {
        vec![
            Alternative::new(r#"^([A-Za-z0-9_-]+)="([^"]*)""#, keyed),
            Alternative::new(r"^([A-Za-z0-9_-]+)='([^']*)'", keyed),
            Alternative::new(r"^([A-Za-z0-9_-]+)=(\S+)", keyed),
            Alternative::new(r#"^"([^"]*)""#, positional),
            Alternative::new(r"^'([^']*)'", positional),
            Alternative::new(r"^(\S+)", positional),
        ]
    })
}

/// Tokenizes a raw parameter string into parameters in source order.
pub fn parse_params(input: &str) -> Vec<Param> {
    let mut params = vec![];
    let mut pos = 0usize;

    loop {
        let rest = &input[pos..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            break;
        }
        pos += rest.len() - trimmed.len();

        let Some((len, param)) = alternatives().iter().find_map(|alt| alt.try_match(trimmed))
        else {
            break;
        };
        params.push(param);
        pos += len;
    }

    params
}
