use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// One submission as it appears in the input CSV.
///
/// Every column is read as text; numeric and enumerated columns are validated
/// only once the row is known not to be a draft.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Genre/Variant")]
    pub genre: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Rules")]
    pub rules: String,
    #[serde(rename = "Link(s)")]
    pub links: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Width", default)]
    pub width: String,
}

impl Row {
    /// Rows without a timestamp were never submitted.
    pub fn is_draft(&self) -> bool {
        self.timestamp.trim().is_empty()
    }

    /// Title, falling back to the genre for untitled submissions.
    pub fn effective_title(&self) -> &str {
        if self.title.is_empty() {
            &self.genre
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Sudoku,
    Loop,
    Object,
    Region,
    Shading,
    Other,
}

struct CategoryInfo {
    key: &'static str,
    ordinal: u8,
    title: &'static str,
}

impl Category {
    /// All categories in chapter order.
    pub const ALL: [Category; 6] = [
        Category::Sudoku,
        Category::Loop,
        Category::Object,
        Category::Region,
        Category::Shading,
        Category::Other,
    ];

    const fn info(self) -> CategoryInfo {
        match self {
            Category::Sudoku => CategoryInfo {
                key: "sudoku",
                ordinal: 1,
                title: "Sudoku and Latin Square",
            },
            Category::Loop => CategoryInfo {
                key: "loop",
                ordinal: 2,
                title: "Loop and Path",
            },
            Category::Object => CategoryInfo {
                key: "object",
                ordinal: 3,
                title: "Object Placement",
            },
            Category::Region => CategoryInfo {
                key: "region",
                ordinal: 4,
                title: "Region Division",
            },
            Category::Shading => CategoryInfo {
                key: "shading",
                ordinal: 5,
                title: "Shading",
            },
            Category::Other => CategoryInfo {
                key: "other",
                ordinal: 6,
                title: "Others",
            },
        }
    }

    pub fn key(self) -> &'static str {
        self.info().key
    }

    /// Position of the chapter in the book, starting at 1.
    pub fn ordinal(self) -> u8 {
        self.info().ordinal
    }

    pub fn title(self) -> &'static str {
        self.info().title
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.key() == value)
            .ok_or_else(|| anyhow::anyhow!("unknown category: {value:?}"))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Difficulty on the submission form's 0–10 scale; values above 10 are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty(pub u32);

impl Difficulty {
    pub const MAX: u32 = 10;

    /// Half-point display value on a 0–5 scale, e.g. `7` renders as `3.5`.
    pub fn display_value(self) -> String {
        let half = if self.0 % 2 == 0 { 0 } else { 5 };
        format!("{}.{half}", self.0 / 2)
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let parsed = value
            .parse::<u32>()
            .map_err(|err| anyhow::anyhow!("invalid difficulty {value:?}: {err}"))?;
        if parsed > Difficulty::MAX {
            anyhow::bail!("difficulty {parsed} is above {}", Difficulty::MAX);
        }
        Ok(Difficulty(parsed))
    }
}

/// What a chapter needs to know about a rendered entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub title: String,
    pub slug: String,
}
