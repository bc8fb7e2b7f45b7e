//! Built-in surface patterns.
//!
//! Labels are tokens over `[a-zA-Zа-яА-Я0-9_]`. Only the keywords are
//! case-insensitive; the label class is spelled out so Unicode case folding
//! cannot widen it (e.g. to U+212A KELVIN SIGN or U+017F LONG S).

use super::RelationPattern;
use crate::error::ExtractionError;
use crate::graph::Relationship;
use regex::{Captures, Regex};
use std::sync::LazyLock;

macro_rules! relation_regex {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── "<A> is connected to <B ...>" ─────────────────────────────────────────
relation_regex!(
    RE_CONNECTED_TO,
    r"([a-zA-Zа-яА-Я0-9_]+)\s+(?i-u:is)\s+(?i-u:connected)\s+(?i-u:to)\s+([a-zA-Zа-яА-Я0-9_]+(?:\s+[a-zA-Zа-яА-Я0-9_]+)*)"
);

// ── "связь: <A> -> <B>" ────────────────────────────────────────────────────
relation_regex!(
    RE_MARKED_ARROW,
    r"(?i:связь)\s*:\s*([a-zA-Zа-яА-Я0-9_]+)\s*->\s*([a-zA-Zа-яА-Я0-9_]+)"
);

// ── "<A> -> <B>" ───────────────────────────────────────────────────────────
relation_regex!(
    RE_ARROW,
    r"([a-zA-Zа-яА-Я0-9_]+)\s*->\s*([a-zA-Zа-яА-Я0-9_]+)"
);

/// A regex-backed pattern whose capture groups 1 and 2 hold the endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePattern {
    name: &'static str,
    regex: &'static LazyLock<Option<Regex>>,
}

/// `<A> is connected to <B>`
pub static CONNECTED_TO: SurfacePattern = SurfacePattern {
    name: "connected_to",
    regex: &RE_CONNECTED_TO,
};

/// `связь: <A> -> <B>`
pub static MARKED_ARROW: SurfacePattern = SurfacePattern {
    name: "marked_arrow",
    regex: &RE_MARKED_ARROW,
};

/// `<A> -> <B>`
pub static ARROW: SurfacePattern = SurfacePattern {
    name: "arrow",
    regex: &RE_ARROW,
};

impl RelationPattern for SurfacePattern {
    fn name(&self) -> &'static str {
        self.name
    }

    fn regex(&self) -> Option<&Regex> {
        self.regex.as_ref()
    }

    fn capture(&self, caps: &Captures<'_>) -> Result<Relationship, ExtractionError> {
        let group = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str())
                .ok_or(ExtractionError::MissingCapture {
                    pattern: self.name,
                    group: i,
                })
        };

        Ok(Relationship::new(group(1)?, group(2)?))
    }
}

/// The built-in patterns in priority order.
pub fn builtin() -> Vec<Box<dyn RelationPattern>> {
    vec![
        Box::new(CONNECTED_TO),
        Box::new(MARKED_ARROW),
        Box::new(ARROW),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(pattern: &SurfacePattern, text: &str) -> Vec<(String, String)> {
        let re = pattern.regex().expect("pattern compiles");
        re.captures_iter(text)
            .map(|caps| {
                let r = pattern.capture(&caps).unwrap();
                (r.from, r.to)
            })
            .collect()
    }

    #[test]
    fn test_all_patterns_compile() {
        for p in [CONNECTED_TO, MARKED_ARROW, ARROW] {
            assert!(p.regex().is_some(), "{} failed to compile", p.name());
        }
    }

    #[test]
    fn test_connected_to_takes_multi_token_target() {
        let found = pairs(&CONNECTED_TO, "Server IS Connected TO main database");
        assert_eq!(found, vec![("Server".into(), "main database".into())]);
    }

    #[test]
    fn test_connected_to_cyrillic_labels() {
        let found = pairs(&CONNECTED_TO, "узел is connected to сервер");
        assert_eq!(found, vec![("узел".into(), "сервер".into())]);
    }

    #[test]
    fn test_marked_arrow() {
        let found = pairs(&MARKED_ARROW, "СВЯЗЬ :alpha->beta");
        assert_eq!(found, vec![("alpha".into(), "beta".into())]);
    }

    #[test]
    fn test_arrow_finds_every_match() {
        let found = pairs(&ARROW, "a -> b, c->d and e  ->  f");
        assert_eq!(
            found,
            vec![
                ("a".into(), "b".into()),
                ("c".into(), "d".into()),
                ("e".into(), "f".into()),
            ]
        );
    }

    #[test]
    fn test_arrow_ignores_foreign_punctuation() {
        // '-' is not part of the token alphabet
        let found = pairs(&ARROW, "front-end -> api");
        assert_eq!(found, vec![("end".into(), "api".into())]);
        assert!(pairs(&ARROW, "@ -> #").is_empty());
    }

    #[test]
    fn test_arrow_mixed_case_cyrillic() {
        let found = pairs(&ARROW, "УЗЕЛ -> Сервер");
        assert_eq!(found, vec![("УЗЕЛ".into(), "Сервер".into())]);
    }

    #[test]
    fn test_case_folding_does_not_widen_alphabet() {
        assert!(pairs(&ARROW, "\u{212A} -> \u{017F}").is_empty());
        assert!(pairs(&MARKED_ARROW, "связь: \u{212A} -> b").is_empty());
        // LONG S folds to 's' but must not satisfy the keyword
        assert!(pairs(&CONNECTED_TO, "a i\u{017F} connected to b").is_empty());
    }

    #[test]
    fn test_builtin_priority_order() {
        let names: Vec<_> = builtin().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["connected_to", "marked_arrow", "arrow"]);
    }
}
