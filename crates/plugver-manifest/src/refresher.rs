//! Hash refresh for an existing manifest
//!
//! Every line is classified with independent, unanchored searches and then
//! re-rendered. Plugin lines get the fresh hash from the [`HashIndex`];
//! named-asset lines keep the hash already on the line; lines of any other
//! shape are not emitted at all.

use crate::errors::ManifestError;
use crate::format::name_line;
use crate::index::HashIndex;
use crate::text::normalize_newlines;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

/// Inputs for one refresh run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSettings {
    /// Directory the index's file names are relative to
    pub plugins_dir: PathBuf,
    /// `<id> <filename>` index
    pub index: PathBuf,
    /// Existing manifest to re-emit
    pub manifest: PathBuf,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        RefreshSettings {
            plugins_dir: PathBuf::from("../src"),
            index: PathBuf::from("plugins_id_to_name.txt"),
            manifest: PathBuf::from("plugins_versions.txt"),
        }
    }
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| unreachable!("invalid manifest pattern {re}: {e}"))
}

static ID_RE: Lazy<Regex> = Lazy::new(|| pattern(r"id\s*=\s*(\w+)"));
static HASH_RE: Lazy<Regex> = Lazy::new(|| pattern(r"hash\s*=\s*(\w+)\s"));
static HASH_REST_RE: Lazy<Regex> = Lazy::new(|| pattern(r"hash\s*=\s*(\w+)\s(.+)"));
static NAME_RE: Lazy<Regex> = Lazy::new(|| pattern(r"name\s*=\s*([\w.]+)"));

/// Shape of one manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLine<'a> {
    NoMatch,
    PluginLine {
        id: &'a str,
        hash: &'a str,
        rest: Option<&'a str>,
    },
    NameLine {
        name: &'a str,
        hash: &'a str,
    },
}

/// Classify a raw manifest line, trailing newline included
///
/// The hash pattern needs a whitespace character after the digest, so a
/// final line without a newline is only recognised when something follows
/// the hash.
pub fn classify(line: &str) -> ManifestLine<'_> {
    let capture = |re: &Regex, group: usize| {
        re.captures(line)
            .and_then(|caps| caps.get(group))
            .map(|m| m.as_str())
    };

    let id = capture(&ID_RE, 1);
    let rest = capture(&HASH_REST_RE, 2);
    let hash = capture(&HASH_REST_RE, 1).or_else(|| capture(&HASH_RE, 1));
    let name = capture(&NAME_RE, 1);

    match (id, hash, rest, name) {
        (Some(id), Some(hash), rest, _) => ManifestLine::PluginLine { id, hash, rest },
        (None, Some(hash), _, Some(name)) => ManifestLine::NameLine { name, hash },
        _ => ManifestLine::NoMatch,
    }
}

/// Render the refreshed form of a classified line, `None` when it is dropped
pub fn refresh_line(
    line: &ManifestLine<'_>,
    index: &HashIndex,
) -> Result<Option<String>, ManifestError> {
    Ok(match line {
        ManifestLine::PluginLine { id, rest, .. } => {
            let fresh = index.hash_for(id)?;
            Some(match rest {
                Some(rest) => format!("id = {}  hash = {} {}", id, fresh, rest),
                None => format!("id = {}  hash = {}", id, fresh),
            })
        }
        ManifestLine::NameLine { name, hash } => Some(name_line(name, hash)),
        ManifestLine::NoMatch => None,
    })
}

/// Counts reported after a refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub plugins: usize,
    pub names: usize,
    pub dropped: usize,
}

/// Re-emit `manifest` with plugin hashes replaced by the index's fresh values
pub fn refresh<W: Write>(
    manifest: &str,
    index: &HashIndex,
    out: &mut W,
) -> Result<RefreshSummary, ManifestError> {
    let mut summary = RefreshSummary::default();
    let manifest = normalize_newlines(manifest);

    for (number, raw) in manifest.split_inclusive('\n').enumerate() {
        let line = classify(raw);
        match line {
            ManifestLine::PluginLine { .. } => summary.plugins += 1,
            ManifestLine::NameLine { .. } => summary.names += 1,
            ManifestLine::NoMatch => {
                summary.dropped += 1;
                debug!("Dropping unrecognised manifest line {}: {:?}", number + 1, raw);
            }
        }
        if let Some(rendered) = refresh_line(&line, index)? {
            writeln!(out, "{}", rendered).map_err(ManifestError::Output)?;
        }
    }

    info!(
        "Refreshed manifest: {} plugin line(s), {} name line(s), {} dropped",
        summary.plugins, summary.names, summary.dropped
    );
    Ok(summary)
}
