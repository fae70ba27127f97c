//! Manifest parsing
//!
//! The manifest is an arbitrary text document. Somewhere inside it, a line
//! containing the literal marker `files:` opens the segment section; every
//! later line whose trimmed content starts with `https://` is a segment
//! URL, in playback order. Everything else — blank lines, metadata, lines
//! before the marker — is ignored.

/// Marker line that opens the segment-URL section of a manifest
const SECTION_MARKER: &str = "files:";

/// URL scheme prefix a segment line must start with to be collected
const URL_PREFIX: &str = "https://";

/// Extract the ordered segment URLs from a manifest body.
///
/// Scans line by line. The first line containing [`SECTION_MARKER`]
/// switches the scan into collecting mode; from then on, every line whose
/// trimmed form starts with `https://` is appended in encounter order. A
/// later occurrence of the marker is just another unrecognized line:
/// collection neither resets nor ends.
///
/// Returns an empty vector when the marker never appears or no qualifying
/// lines follow it. The caller decides whether that is an error.
///
/// # Examples
///
/// ```
/// use segrip::manifest::parse_segment_urls;
///
/// let body = "header\nfiles:\nhttps://x/a.ts\nfoo\nhttps://x/b.ts\n";
/// let urls = parse_segment_urls(body);
/// assert_eq!(urls, vec!["https://x/a.ts", "https://x/b.ts"]);
/// ```
pub fn parse_segment_urls(manifest: &str) -> Vec<String> {
    collect_section_urls(manifest, SECTION_MARKER, URL_PREFIX)
}

/// [`parse_segment_urls`] with a caller-chosen marker and scheme prefix.
///
/// The pipeline feeds the configured values through here; the defaults are
/// the production dialect.
pub fn collect_section_urls(manifest: &str, marker: &str, url_prefix: &str) -> Vec<String> {
    let mut urls = Vec::new();
    let mut in_files_section = false;

    for line in manifest.lines() {
        if !in_files_section {
            if line.contains(marker) {
                in_files_section = true;
            }
            // The marker line itself is never a URL line
            continue;
        }

        let trimmed = line.trim();
        if trimmed.starts_with(url_prefix) {
            urls.push(trimmed.to_string());
        }
    }

    urls
}
