use std::collections::HashSet;
use std::path::Path;

use anyhow::Context as _;

use crate::chapter::ChapterBuckets;
use crate::cli::BuildArgs;
use crate::config::BuildConfig;
use crate::entry::{PreparedEntry, render_entry};
use crate::formats::Row;
use crate::http::{HttpClient, ImageSource, RedirectResolver};
use crate::image_cache::{CacheOutcome, ImageCache};
use crate::links::{LinkClassifier, LinkError};

const REQUIRED_COLUMNS: [&str; 10] = [
    "Timestamp",
    "Title",
    "Genre/Variant",
    "Author",
    "Image",
    "Description",
    "Rules",
    "Link(s)",
    "Difficulty",
    "Category",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub rendered: usize,
    pub drafts_skipped: usize,
    pub images_fetched: usize,
    pub images_cached: usize,
    pub image_failures: usize,
    pub link_failures: usize,
    pub slug_collisions: usize,
}

pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    let config = BuildConfig::from_args(&args);
    let client = HttpClient::new(&config.http).context("init http client")?;

    let summary = build(&config, &client, &client)?;
    tracing::info!(
        rendered = summary.rendered,
        drafts_skipped = summary.drafts_skipped,
        images_fetched = summary.images_fetched,
        images_cached = summary.images_cached,
        image_failures = summary.image_failures,
        link_failures = summary.link_failures,
        slug_collisions = summary.slug_collisions,
        "build finished"
    );
    Ok(())
}

/// Runs the whole pipeline: one entry file per submitted row, then one
/// chapter file per category.
///
/// Image and link failures are logged and counted; a bad row (unknown
/// category, unparsable difficulty, missing columns) aborts the build.
pub fn build(
    config: &BuildConfig,
    resolver: &dyn RedirectResolver,
    images: &dyn ImageSource,
) -> anyhow::Result<BuildSummary> {
    let entries_dir = config.entries_dir();
    let images_dir = config.images_dir();
    let chapters_dir = config.chapters_dir();
    for dir in [&entries_dir, &images_dir, &chapters_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir: {}", dir.display()))?;
    }

    let mut reader = csv::Reader::from_path(&config.input)
        .with_context(|| format!("open input: {}", config.input.display()))?;
    check_columns(reader.headers().context("read input header")?)?;

    let cache = ImageCache::new(images_dir);
    let classifier = LinkClassifier::new(resolver);
    let mut buckets = ChapterBuckets::new();
    let mut seen_slugs = HashSet::new();
    let mut summary = BuildSummary::default();

    for (idx, record) in reader.deserialize::<Row>().enumerate() {
        let row_no = idx + 1;
        let row = record.with_context(|| format!("parse row {row_no}"))?;
        if row.is_draft() {
            tracing::debug!(row = row_no, "skipping row without timestamp");
            summary.drafts_skipped += 1;
            continue;
        }

        let entry = PreparedEntry::from_row(&row).with_context(|| format!("row {row_no}"))?;
        if !seen_slugs.insert(entry.slug.clone()) {
            tracing::warn!(
                slug = %entry.slug,
                row = row_no,
                "slug collision; earlier entry file is overwritten"
            );
            summary.slug_collisions += 1;
        }

        match cache.ensure(&entry.slug, &row.image, images)? {
            CacheOutcome::Cached(path) => {
                tracing::debug!(slug = %entry.slug, path = %path.display(), "image already cached");
                summary.images_cached += 1;
            }
            CacheOutcome::Fetched(path) => {
                tracing::info!(slug = %entry.slug, path = %path.display(), "image fetched");
                summary.images_fetched += 1;
            }
            CacheOutcome::Failed(err) => {
                tracing::error!(slug = %entry.slug, reason = %err, "image fetch failed");
                summary.image_failures += 1;
            }
        }

        let mut links = Vec::new();
        for result in classifier.classify_field(&entry.links) {
            match result {
                Ok(link) => links.push(link),
                Err(LinkError::Unrecognized { url, destination }) => {
                    tracing::error!(
                        slug = %entry.slug,
                        %url,
                        %destination,
                        "link skipped: no defined type for destination"
                    );
                    summary.link_failures += 1;
                }
                Err(LinkError::Resolve { url, source }) => {
                    tracing::error!(slug = %entry.slug, %url, reason = %source, "link skipped");
                    summary.link_failures += 1;
                }
            }
        }

        let tex = render_entry(&entry, &links);
        write_file(&entries_dir.join(entry.file_name()), &tex)
            .with_context(|| format!("row {row_no}"))?;
        buckets.record(entry.category, entry.summary());
        summary.rendered += 1;
    }

    tracing::debug!(entries = buckets.len(), "assembling chapters");
    for chapter in buckets.finalize() {
        tracing::debug!(
            category = %chapter.category,
            entries = chapter.entries.len(),
            "writing chapter"
        );
        write_file(&chapters_dir.join(chapter.file_name()), &chapter.render())?;
    }

    Ok(summary)
}

fn check_columns(headers: &csv::StringRecord) -> anyhow::Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !headers.iter().any(|header| header == *column))
        .collect();
    if !missing.is_empty() {
        anyhow::bail!("input is missing required columns: {}", missing.join(", "));
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}
