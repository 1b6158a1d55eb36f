use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder for master-sourced fields when no master record is available.
pub const NOT_AVAILABLE: &str = "N/A";

/// Title given to search results that come back without one.
pub const UNTITLED: &str = "Sin título";

fn untitled() -> String {
    UNTITLED.to_string()
}

fn untitled_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(untitled))
}

fn default_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// First matching release from a Discogs barcode search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReleaseSummary {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default = "untitled", deserialize_with = "untitled_if_null")]
    pub title: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "default_if_null")]
    pub format: Vec<String>,
    #[serde(rename = "type", default, deserialize_with = "default_if_null")]
    pub release_type: String,
    #[serde(default, deserialize_with = "default_if_null")]
    pub genre: Vec<String>,
    #[serde(default, deserialize_with = "default_if_null")]
    pub style: Vec<String>,
    /// Discogs reports `0` (or omits the field) for releases without a master.
    #[serde(default)]
    pub master_id: Option<u64>,
    #[serde(default)]
    pub uri: Option<String>,
}

impl ReleaseSummary {
    /// Master id to resolve, treating `0` as "no master".
    pub fn master(&self) -> Option<u64> {
        self.master_id.filter(|id| *id != 0)
    }
}

/// Canonical master release, reduced to the fields the document needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MasterRecord {
    pub artist: String,
    pub title: String,
    pub year: String,
    /// Rendered `"<title> (<position>) - <duration>"`, in catalog order.
    pub tracklist: Vec<String>,
}

impl MasterRecord {
    pub(crate) fn from_response(master: MasterResponse) -> Self {
        let artist = master
            .artists
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|a| a.name)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let tracklist = master
            .tracklist
            .unwrap_or_default()
            .iter()
            .map(MasterTrack::render)
            .collect();
        Self {
            artist,
            title: master.title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            year: master
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            tracklist,
        }
    }
}

/// Search endpoint response wrapper
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default, deserialize_with = "default_if_null")]
    pub results: Vec<ReleaseSummary>,
}

/// Master endpoint response, every field optional
#[derive(Debug, Deserialize)]
pub(crate) struct MasterResponse {
    pub title: Option<String>,
    pub year: Option<u32>,
    pub artists: Option<Vec<MasterArtist>>,
    pub tracklist: Option<Vec<MasterTrack>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MasterArtist {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MasterTrack {
    pub position: Option<String>,
    pub title: Option<String>,
    pub duration: Option<String>,
}

impl MasterTrack {
    fn render(&self) -> String {
        format!(
            "{} ({}) - {}",
            self.title.as_deref().unwrap_or_default(),
            self.position.as_deref().unwrap_or_default(),
            self.duration.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_master_id_means_no_master() {
        let release = ReleaseSummary {
            master_id: Some(0),
            ..Default::default()
        };
        assert_eq!(release.master(), None);

        let release = ReleaseSummary {
            master_id: Some(12345),
            ..Default::default()
        };
        assert_eq!(release.master(), Some(12345));
    }

    #[test]
    fn search_result_tolerates_missing_fields() {
        let json = r#"{"results": [{"title": "Only A Title", "master_id": null}]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let release = &response.results[0];
        assert_eq!(release.title, "Only A Title");
        assert!(release.format.is_empty());
        assert!(release.genre.is_empty());
        assert_eq!(release.release_type, "");
        assert_eq!(release.master(), None);
    }

    #[test]
    fn search_result_tolerates_null_fields() {
        let json = r#"{"results": [{
            "title": null, "format": null, "type": null,
            "genre": null, "style": null, "year": null, "master_id": null
        }]}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let release = &response.results[0];
        assert_eq!(release.title, UNTITLED);
        assert!(release.format.is_empty());
        assert!(release.genre.is_empty());
        assert!(release.style.is_empty());
        assert_eq!(release.release_type, "");
        assert_eq!(release.year, None);
    }

    #[test]
    fn missing_title_is_untitled_but_empty_title_is_kept() {
        let release: ReleaseSummary = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(release.title, UNTITLED);

        let release: ReleaseSummary = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert_eq!(release.title, "");
    }

    #[test]
    fn master_without_artists_falls_back_to_not_available() {
        let json = r#"{"title": "Album", "year": 1975, "artists": [], "tracklist": []}"#;
        let master = MasterRecord::from_response(serde_json::from_str(json).unwrap());
        assert_eq!(master.artist, NOT_AVAILABLE);
        assert_eq!(master.title, "Album");
        assert_eq!(master.year, "1975");
        assert!(master.tracklist.is_empty());
    }

    #[test]
    fn track_with_missing_fields_renders_empty_tokens() {
        let json = r#"{
            "artists": [{"name": "First"}, {"name": "Second"}],
            "tracklist": [
                {"position": "A1", "title": "Intro", "duration": "1:02"},
                {"title": "Untimed", "position": "A2"},
                {"duration": "4:00"}
            ]
        }"#;
        let master = MasterRecord::from_response(serde_json::from_str(json).unwrap());
        assert_eq!(master.artist, "First");
        assert_eq!(master.title, NOT_AVAILABLE);
        assert_eq!(master.year, NOT_AVAILABLE);
        assert_eq!(
            master.tracklist,
            vec![
                "Intro (A1) - 1:02".to_string(),
                "Untimed (A2) - ".to_string(),
                " () - 4:00".to_string(),
            ]
        );
    }
}
