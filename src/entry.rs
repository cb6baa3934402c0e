use anyhow::Context as _;

use crate::config::IMAGES_DIR;
use crate::formats::{Category, Difficulty, EntrySummary, Row};
use crate::links::ClassifiedLink;
use crate::normalize;
use crate::slug::entry_slug;

/// A submission with every field normalized and validated, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedEntry {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub difficulty: Difficulty,
    pub category: Category,
    pub description: String,
    pub rules: String,
    /// Links field with provider names canonicalized, one link per line.
    pub links: String,
    pub width: String,
}

impl PreparedEntry {
    /// Validates and normalizes a non-draft row.
    ///
    /// The slug is derived from the raw title and author so it stays stable
    /// when normalization rules change.
    pub fn from_row(row: &Row) -> anyhow::Result<Self> {
        if row.title.is_empty() && row.genre.is_empty() {
            anyhow::bail!("row has neither a title nor a genre");
        }
        let category: Category = row.category.parse().context("parse category")?;
        let difficulty: Difficulty = row.difficulty.parse().context("parse difficulty")?;

        Ok(Self {
            slug: entry_slug(&row.timestamp, row.effective_title(), &row.author),
            title: normalize::title(&row.title, &row.genre),
            author: normalize::author(&row.author),
            genre: normalize::genre(&row.genre),
            difficulty,
            category,
            description: normalize::description(&row.description),
            rules: normalize::rules(&row.rules),
            links: normalize::links(&row.links),
            width: row.width.trim().to_owned(),
        })
    }

    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            title: self.title.clone(),
            slug: self.slug.clone(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.tex", self.slug)
    }
}

/// Renders the LaTeX section for one entry. `links` holds only the links that
/// could be classified.
pub fn render_entry(entry: &PreparedEntry, links: &[ClassifiedLink]) -> String {
    let mut tex = String::new();
    tex.push_str(&format!(
        "\\section{{{} | {{\\normalfont {}}}}}\n",
        entry.title, entry.author
    ));
    tex.push_str(&format!("\\label{{sec:{}}}\n", entry.slug));
    tex.push_str(&format!(
        "\\puzzleinfo{{{}}}{{{}}}\n",
        entry.genre,
        entry.difficulty.display_value()
    ));
    tex.push_str(&entry.description);
    tex.push('\n');

    tex.push_str("\\puzzleimage");
    if !entry.width.is_empty() {
        tex.push_str(&format!("[{}]", entry.width));
    }
    tex.push_str(&format!("{{./{IMAGES_DIR}/{}}}\n", entry.slug));

    tex.push_str("\\subsection*{Rules}\n");
    tex.push_str("\\begin{markdown}\n");
    tex.push_str(&entry.rules);
    tex.push('\n');
    tex.push_str("\\end{markdown}\n");

    tex.push_str("\\subsection*{Links}\n");
    tex.push_str("\\begin{tabularx}{\\textwidth}{l X}\n");
    for link in links {
        tex.push_str(&format!(
            "\\emph{{{}}} & \\url{{{}}} \\\\\n",
            link.label, link.url
        ));
    }
    tex.push_str("\\end{tabularx}\n");
    tex.push_str("\\pagebreak\n");
    tex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::Classification;

    fn row() -> Row {
        Row {
            timestamp: "9/14/2020 17:01:02".to_owned(),
            title: String::new(),
            genre: "9x9 classic sudoku".to_owned(),
            author: "big_wolf".to_owned(),
            image: "https://drive.google.com/open?id=abc".to_owned(),
            description: "A gentle start.\nHave fun!".to_owned(),
            rules: "**Rules**\nNormal sudoku rules apply.".to_owned(),
            links: "sudokupad: https://sudokupad.app/abc".to_owned(),
            difficulty: "7".to_owned(),
            category: "sudoku".to_owned(),
            width: String::new(),
        }
    }

    #[test]
    fn prepare_normalizes_every_field() -> anyhow::Result<()> {
        let entry = PreparedEntry::from_row(&row())?;

        assert_eq!(entry.slug, "02-9x9-classic-sudoku-big-wolf");
        assert_eq!(entry.title, "9x9 classic sudoku");
        assert_eq!(entry.author, r"big\_wolf");
        assert_eq!(entry.genre, r"9\emph{x}9 Classic Sudoku");
        assert_eq!(entry.category, Category::Sudoku);
        assert_eq!(entry.description, "A gentle start.\n\nHave fun!");
        assert_eq!(entry.rules, "Normal sudoku rules apply.");
        assert_eq!(entry.links, "SudokuPad: https://sudokupad.app/abc");
        Ok(())
    }

    #[test]
    fn prepare_rejects_unknown_category() {
        let mut row = row();
        row.category = "maze".to_owned();
        let err = PreparedEntry::from_row(&row).expect_err("unknown category must fail");
        assert!(format!("{err:#}").contains("unknown category"));
    }

    #[test]
    fn prepare_rejects_rows_without_title_or_genre() {
        let mut row = row();
        row.genre = String::new();
        assert!(PreparedEntry::from_row(&row).is_err());
    }

    #[test]
    fn render_emits_sections_in_order() -> anyhow::Result<()> {
        let mut row = row();
        row.title = "Sudoku^4".to_owned();
        row.width = "0.6\\textwidth".to_owned();
        let entry = PreparedEntry::from_row(&row)?;
        let links = vec![ClassifiedLink {
            label: "SudokuPad".to_owned(),
            url: "https://sudokupad.app/abc".to_owned(),
            classification: Classification::ExplicitLabel,
        }];

        let tex = render_entry(&entry, &links);

        let expected = "\\section{Sudoku$^4$ | {\\normalfont big\\_wolf}}\n\
\\label{sec:02-sudoku-4-big-wolf}\n\
\\puzzleinfo{9\\emph{x}9 Classic Sudoku}{3.5}\n\
A gentle start.\n\nHave fun!\n\
\\puzzleimage[0.6\\textwidth]{./puzzle_images/02-sudoku-4-big-wolf}\n\
\\subsection*{Rules}\n\
\\begin{markdown}\n\
Normal sudoku rules apply.\n\
\\end{markdown}\n\
\\subsection*{Links}\n\
\\begin{tabularx}{\\textwidth}{l X}\n\
\\emph{SudokuPad} & \\url{https://sudokupad.app/abc} \\\\\n\
\\end{tabularx}\n\
\\pagebreak\n";
        assert_eq!(tex, expected);
        Ok(())
    }

    #[test]
    fn render_without_width_or_links() -> anyhow::Result<()> {
        let entry = PreparedEntry::from_row(&row())?;
        let tex = render_entry(&entry, &[]);

        assert!(tex.contains("\\puzzleimage{./puzzle_images/02-9x9-classic-sudoku-big-wolf}\n"));
        assert!(tex.contains("\\begin{tabularx}{\\textwidth}{l X}\n\\end{tabularx}\n"));
        Ok(())
    }
}
