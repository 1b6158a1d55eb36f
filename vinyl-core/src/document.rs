use crate::annotation::Annotation;
use crate::discogs::{MasterRecord, ReleaseSummary, NOT_AVAILABLE};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DOCUMENT_EXTENSION: &str = "md";
pub const DOCUMENT_MIME: &str = "text/markdown";
/// Filename stem used when the title has no alphanumeric characters.
pub const FALLBACK_STEM: &str = "disco";
/// Written for release fields the catalog left out.
pub const UNKNOWN: &str = "Desconocido";

/// Markdown file with front matter, ready to export
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedDocument {
    /// Ordered `(key, rendered value)` pairs.
    pub front_matter: Vec<(&'static str, String)>,
    pub body: String,
    pub filename: String,
}

impl ComposedDocument {
    pub fn mime_type(&self) -> &'static str {
        DOCUMENT_MIME
    }

    /// Full file contents: front matter, a blank line, then the body.
    pub fn content(&self) -> String {
        let mut out = String::from("---\n");
        for (key, value) in &self.front_matter {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out.push_str("---\n\n");
        out.push_str(&self.body);
        out.push('\n');
        out
    }

    /// Rendered value for a front matter key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.front_matter
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Write the document into `dir`, replacing any file with the same name.
    pub async fn write_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.filename);
        let content = self.content();
        tokio::fs::write(&path, &content).await?;
        info!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }
}

/// Merge a release, its optional master and the user's notes into a document.
///
/// Master fields fall back to `N/A` and the tracklist to `[]`, so the front
/// matter always has the same keys in the same order.
pub fn compose(
    release: &ReleaseSummary,
    master: Option<&MasterRecord>,
    annotation: &Annotation,
) -> ComposedDocument {
    let (artist, master_title, original_year, tracklist) = match master {
        Some(m) => (
            m.artist.clone(),
            m.title.clone(),
            m.year.clone(),
            m.tracklist.as_slice(),
        ),
        None => (
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            NOT_AVAILABLE.to_string(),
            &[][..],
        ),
    };

    let front_matter = vec![
        ("complete_title", release.title.clone()),
        ("artist", artist),
        ("title", master_title),
        ("year", or_unknown(release.year.as_deref())),
        ("original_year", original_year),
        ("country", or_unknown(release.country.as_deref())),
        ("format", release.format.join(", ")),
        ("type", release.release_type.clone()),
        ("genre", release.genre.join(", ")),
        ("style", release.style.join(", ")),
        ("tracklist", sequence_literal(tracklist)),
        ("estado", annotation.media_condition.label()),
        ("estado_portada", annotation.sleeve_condition.label()),
        ("image", release.cover_image.clone().unwrap_or_default()),
        (
            "fecha_adquisicion",
            annotation.acquired_on.format("%Y-%m-%d").to_string(),
        ),
        ("tipo_adquisicion", annotation.origin.label().to_string()),
        ("advertencias", annotation.warnings.clone()),
    ];

    let filename = document_filename(&release.title);
    debug!("Composed {} ({} front matter keys)", filename, front_matter.len());
    ComposedDocument {
        front_matter,
        body: annotation.history.clone(),
        filename,
    }
}

/// Lower-case the title and keep only its alphanumeric characters.
pub fn document_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect();
    let stem = if stem.is_empty() {
        FALLBACK_STEM
    } else {
        &stem
    };
    format!("{}.{}", stem, DOCUMENT_EXTENSION)
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}

/// Render `['a', 'b']`, quoting an item with `"` when it holds a lone `'`.
fn sequence_literal(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| quote_item(s)).collect();
    format!("[{}]", quoted.join(", "))
}

fn quote_item(item: &str) -> String {
    if item.contains('\'') && !item.contains('"') {
        return format!("\"{}\"", item.replace('\\', "\\\\"));
    }
    let escaped = item.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}
