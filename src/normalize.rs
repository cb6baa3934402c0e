use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug)]
pub enum Rule {
    /// Replace every occurrence of a fixed string.
    Literal {
        from: &'static str,
        to: &'static str,
    },
    /// Replace every match of a regex; `to` may reference capture groups.
    Pattern { pattern: Regex, to: &'static str },
    /// Uppercase each letter that follows a non-letter, lowercase the rest.
    TitleCase,
}

impl Rule {
    fn literal(from: &'static str, to: &'static str) -> Self {
        Rule::Literal { from, to }
    }

    fn pattern(pattern: &str, to: &'static str) -> Self {
        let pattern = Regex::new(pattern).expect("normalization rule pattern must compile");
        Rule::Pattern { pattern, to }
    }

    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        match self {
            Rule::Literal { from, to } => {
                if input.contains(from) {
                    Cow::Owned(input.replace(from, to))
                } else {
                    Cow::Borrowed(input)
                }
            }
            Rule::Pattern { pattern, to } => pattern.replace_all(input, *to),
            Rule::TitleCase => Cow::Owned(title_case(input)),
        }
    }
}

/// Runs `rules` top to bottom, each one seeing the output of the previous one;
/// the order of a list is part of its meaning.
pub fn apply_rules(rules: &[Rule], input: &str) -> String {
    let mut text = input.to_owned();
    for rule in rules {
        let rewritten = match rule.apply(&text) {
            Cow::Borrowed(_) => None,
            Cow::Owned(rewritten) => Some(rewritten),
        };
        if let Some(rewritten) = rewritten {
            text = rewritten;
        }
    }
    text
}

fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut inside_word = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if inside_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            inside_word = true;
        } else {
            out.push(ch);
            inside_word = false;
        }
    }
    out
}

pub static TITLE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::literal("^4", "$^4$"),
        Rule::literal("\u{2074}", "$^4$"),
    ]
});

pub static AUTHOR_RULES: LazyLock<Vec<Rule>> =
    LazyLock::new(|| vec![Rule::literal("_", "\\_")]);

pub static GENRE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::TitleCase,
        // Words title-casing gets wrong.
        Rule::pattern(r"\bXv\b", "XV"),
        Rule::pattern(r"\bAnd\b", "and"),
        Rule::pattern(r"\bJss\b", "JSS"),
        Rule::pattern(r"\bLits\b", "LITS"),
        // 9X9 -> 9\emph{x}9
        Rule::pattern(r"(\d+)X(\d+)", r"${1}\emph{x}${2}"),
    ]
});

pub static RULES_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::literal("\r\n", "\n"),
        Rule::pattern(r"\A\*\*Rules\*\*[ \t]*\n", ""),
        Rule::literal("\n", "\n\n"),
    ]
});

pub static DESCRIPTION_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::literal("\r\n", "\n"),
        Rule::literal("\n", "\n\n"),
    ]
});

pub static LINKS_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::literal("\r\n", "\n"),
        Rule::pattern(r"(?im)^[ \t]*ctc(?: app)?:[ \t]*", "CTC App: "),
        Rule::pattern(r"(?im)^[ \t]*f-puzzles:[ \t]*", "F-puzzles: "),
        Rule::pattern(r"(?im)^[ \t]*penpa\+?:[ \t]*", "Penpa+: "),
        Rule::pattern(r"(?im)^[ \t]*sudokupad:[ \t]*", "SudokuPad: "),
        Rule::pattern(r"(?im)^[ \t]*puzz\.?link:[ \t]*", "Puzz.link: "),
    ]
});

/// Title with a genre fallback for untitled submissions.
pub fn title(title: &str, genre: &str) -> String {
    let title = if title.is_empty() { genre } else { title };
    apply_rules(&TITLE_RULES, title)
}

pub fn author(author: &str) -> String {
    apply_rules(&AUTHOR_RULES, author)
}

pub fn genre(genre: &str) -> String {
    apply_rules(&GENRE_RULES, genre)
}

pub fn rules(rules: &str) -> String {
    apply_rules(&RULES_RULES, rules)
}

pub fn description(description: &str) -> String {
    apply_rules(&DESCRIPTION_RULES, description)
}

/// Canonicalizes provider names in the links field, ahead of line splitting.
pub fn links(links: &str) -> String {
    apply_rules(&LINKS_RULES, links)
}
