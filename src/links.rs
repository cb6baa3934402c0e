use crate::http::{FetchError, RedirectResolver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    CtcApp,
    FPuzzles,
    Penpa,
    PuzzLink,
    SudokuPad,
}

impl Provider {
    pub fn label(self) -> &'static str {
        match self {
            Provider::CtcApp => "CTC App",
            Provider::FPuzzles => "F-puzzles",
            Provider::Penpa => "Penpa+",
            Provider::PuzzLink => "Puzz.link",
            Provider::SudokuPad => "SudokuPad",
        }
    }
}

/// Domains recognizable in a link without following it.
const LINK_DOMAINS: &[(&str, Provider)] = &[
    ("f-puzzles.com", Provider::FPuzzles),
    ("puzz.link", Provider::PuzzLink),
];

/// Markers looked for in the destination of a shortened link.
const DESTINATION_MARKERS: &[(&str, Provider)] = &[
    ("crackingthecryptic", Provider::CtcApp),
    ("penpa-edit", Provider::Penpa),
    ("puzz.link", Provider::PuzzLink),
    ("sudokupad", Provider::SudokuPad),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    ExplicitLabel,
    LinkDomain,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLink {
    pub label: String,
    pub url: String,
    pub classification: Classification,
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("link {destination:?} has no defined type (from {url})")]
    Unrecognized { url: String, destination: String },
    #[error("resolve link {url}: {source}")]
    Resolve {
        url: String,
        #[source]
        source: FetchError,
    },
}

type Step = fn(&str) -> Option<ClassifiedLink>;

const OFFLINE_STEPS: [Step; 2] = [explicit_label, link_domain];

/// Classifies the lines of a submission's links field.
///
/// A line is tried against an ordered chain: an explicit `Name: URL` label,
/// then well-known domains in the URL itself, then the destination the URL
/// redirects to. The first step that recognizes the line wins; only the last
/// one can fail.
pub struct LinkClassifier<'a> {
    resolver: &'a dyn RedirectResolver,
}

impl<'a> LinkClassifier<'a> {
    pub fn new(resolver: &'a dyn RedirectResolver) -> Self {
        Self { resolver }
    }

    /// Classifies every non-blank line of an already normalized links field.
    pub fn classify_field(&self, links: &str) -> Vec<Result<ClassifiedLink, LinkError>> {
        links
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.classify(line))
            .collect()
    }

    pub fn classify(&self, line: &str) -> Result<ClassifiedLink, LinkError> {
        let line = line.trim();
        if let Some(link) = OFFLINE_STEPS.iter().find_map(|step| step(line)) {
            return Ok(link);
        }
        self.classify_by_destination(line)
    }

    fn classify_by_destination(&self, url: &str) -> Result<ClassifiedLink, LinkError> {
        let destination = self
            .resolver
            .resolve(url)
            .map_err(|source| LinkError::Resolve {
                url: url.to_owned(),
                source,
            })?;

        let provider = DESTINATION_MARKERS
            .iter()
            .find(|(marker, _)| destination.contains(marker))
            .map(|(_, provider)| *provider)
            .ok_or_else(|| LinkError::Unrecognized {
                url: url.to_owned(),
                destination: destination.clone(),
            })?;

        Ok(ClassifiedLink {
            label: provider.label().to_owned(),
            url: url.to_owned(),
            classification: Classification::Destination,
        })
    }
}

fn explicit_label(line: &str) -> Option<ClassifiedLink> {
    let (label, url) = line.split_once(": ")?;
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some(ClassifiedLink {
        label: label.to_owned(),
        url: url.trim().to_owned(),
        classification: Classification::ExplicitLabel,
    })
}

fn link_domain(line: &str) -> Option<ClassifiedLink> {
    let (_, provider) = LINK_DOMAINS
        .iter()
        .find(|(domain, _)| line.contains(domain))?;
    Some(ClassifiedLink {
        label: provider.label().to_owned(),
        url: line.to_owned(),
        classification: Classification::LinkDomain,
    })
}
