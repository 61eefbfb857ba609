//! The CSS selector subset the enhancement layer relies on.
//!
//! Supported: type selectors, `#id`, `.class`, `[attr]`, `[attr="v"]`,
//! `[attr^="v"]`, and the descendant combinator. Anything else is rejected at
//! parse time so the headless page and the browser always agree on meaning.

#[cfg(test)]
#[path = "selector_test.rs"]
mod selector_test;

use std::fmt;

use crate::ErrorCode;

/// Errors produced while parsing a selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The selector contained no compound selectors.
    #[error("empty selector")]
    Empty,

    /// The selector uses syntax outside the supported subset.
    #[error("unsupported selector `{selector}`: {reason}")]
    Unsupported { selector: String, reason: String },
}

impl ErrorCode for SelectorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "E_SELECTOR_EMPTY",
            Self::Unsupported { .. } => "E_SELECTOR_UNSUPPORTED",
        }
    }
}

/// Attribute condition inside `[...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

/// One compound selector: `tag#id.class[attr...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, AttrOp)>,
}

/// Read access to an element, enough to evaluate a [`Compound`].
pub trait Matchable {
    fn tag_name(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
}

impl Compound {
    #[must_use]
    pub fn matches<E: Matchable + ?Sized>(&self, el: &E) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = el.attr("class").unwrap_or("");
            let present: Vec<&str> = class_attr.split_whitespace().collect();
            if !self.classes.iter().all(|c| present.contains(&c.as_str())) {
                return false;
            }
        }
        self.attrs.iter().all(|(name, op)| match (el.attr(name), op) {
            (None, _) => false,
            (Some(_), AttrOp::Exists) => true,
            (Some(v), AttrOp::Equals(want)) => v == want,
            (Some(v), AttrOp::Prefix(want)) => v.starts_with(want.as_str()),
        })
    }
}

/// A parsed descendant chain; the last compound is the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] if the selector is empty or uses syntax
    /// outside the supported subset.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut steps = Vec::new();
        for token in split_compounds(input)? {
            steps.push(parse_compound(input, &token)?);
        }
        if steps.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { steps })
    }

    /// Evaluate against `el`, given its ancestors nearest-first.
    ///
    /// The descendant combinator only needs each remaining compound to match
    /// some ancestor further out, so a greedy right-to-left walk is exact.
    pub fn matches<'a, E, I>(&self, el: &E, ancestors: I) -> bool
    where
        E: Matchable + ?Sized + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let Some((subject, rest)) = self.steps.split_last() else {
            return false;
        };
        if !subject.matches(el) {
            return false;
        }
        let mut pending = rest.iter().rev().peekable();
        for ancestor in ancestors {
            match pending.peek() {
                Some(step) if step.matches(ancestor) => {
                    pending.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        pending.peek().is_none()
    }

    /// Render back to CSS for `querySelector`-style browser APIs.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let mut wrote = false;
            if let Some(tag) = &step.tag {
                f.write_str(tag)?;
                wrote = true;
            }
            if let Some(id) = &step.id {
                write!(f, "#{id}")?;
                wrote = true;
            }
            for class in &step.classes {
                write!(f, ".{class}")?;
                wrote = true;
            }
            for (name, op) in &step.attrs {
                match op {
                    AttrOp::Exists => write!(f, "[{name}]")?,
                    AttrOp::Equals(v) => write!(f, "[{name}=\"{v}\"]")?,
                    AttrOp::Prefix(v) => write!(f, "[{name}^=\"{v}\"]")?,
                }
                wrote = true;
            }
            if !wrote {
                f.write_str("*")?;
            }
        }
        Ok(())
    }
}

fn unsupported(selector: &str, reason: impl Into<String>) -> SelectorError {
    SelectorError::Unsupported { selector: selector.to_owned(), reason: reason.into() }
}

/// Split on whitespace outside of `[...]` and quotes.
fn split_compounds(input: &str) -> Result<Vec<String>, SelectorError> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    let mut quote: Option<char> = None;

    for ch in input.chars() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                current.push(c);
            }
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') if in_brackets => {
                quote = Some(ch);
                current.push(ch);
            }
            (None, '[') => {
                in_brackets = true;
                current.push(ch);
            }
            (None, ']') => {
                in_brackets = false;
                current.push(ch);
            }
            (None, c) if c.is_whitespace() && !in_brackets => {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
            }
            (None, '>' | '+' | '~' | ',') if !in_brackets => {
                return Err(unsupported(input, format!("combinator `{ch}`")));
            }
            (None, c) => current.push(c),
        }
    }
    if quote.is_some() || in_brackets {
        return Err(unsupported(input, "unterminated attribute selector"));
    }
    if !current.is_empty() {
        out.push(current);
    }
    Ok(out)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn parse_compound(selector: &str, token: &str) -> Result<Compound, SelectorError> {
    let mut compound = Compound::default();
    let mut chars = token.chars().peekable();

    match chars.peek() {
        Some('*') => {
            chars.next();
        }
        Some(c) if c.is_ascii_alphabetic() => {
            compound.tag = Some(take_ident(&mut chars).to_ascii_lowercase());
        }
        _ => {}
    }

    while let Some(c) = chars.next() {
        match c {
            '#' => {
                let id = take_ident(&mut chars);
                if id.is_empty() {
                    return Err(unsupported(selector, "empty id"));
                }
                compound.id = Some(id);
            }
            '.' => {
                let class = take_ident(&mut chars);
                if class.is_empty() {
                    return Err(unsupported(selector, "empty class"));
                }
                compound.classes.push(class);
            }
            '[' => compound.attrs.push(parse_attr(selector, &mut chars)?),
            other => return Err(unsupported(selector, format!("unexpected `{other}`"))),
        }
    }
    Ok(compound)
}

fn parse_attr(
    selector: &str,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<(String, AttrOp), SelectorError> {
    let name = take_ident(chars);
    if name.is_empty() {
        return Err(unsupported(selector, "empty attribute name"));
    }
    let prefix = match chars.next() {
        Some(']') => return Ok((name, AttrOp::Exists)),
        Some('=') => false,
        Some('^') if chars.next() == Some('=') => true,
        Some(other) => return Err(unsupported(selector, format!("attribute operator near `{other}`"))),
        None => return Err(unsupported(selector, "unterminated attribute selector")),
    };

    let value = match chars.peek().copied() {
        Some(q @ ('"' | '\'')) => {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some(c) if c == q => break,
                    Some(c) => value.push(c),
                    None => return Err(unsupported(selector, "unterminated attribute value")),
                }
            }
            value
        }
        _ => take_ident(chars),
    };
    if chars.next() != Some(']') {
        return Err(unsupported(selector, "expected `]`"));
    }

    let op = if prefix { AttrOp::Prefix(value) } else { AttrOp::Equals(value) };
    Ok((name, op))
}
