//! Data models for the pipeline.
//!
//! The only entity that crosses component boundaries is [`Episode`], the
//! metadata of a single 焦点访谈 broadcast as returned by the CNTV listing
//! API. It is manufactured fresh on every run and never persisted.

use serde::Deserialize;

/// Metadata of one 焦点访谈 episode.
///
/// Field names match the keys of the CNTV listing API's `data.list` items.
/// Every field defaults to the empty string when the upstream key is absent;
/// no validation is applied beyond that.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Episode {
    /// Episode title, e.g. "焦点访谈：……".
    #[serde(default)]
    pub title: String,
    /// Short synopsis of the episode.
    #[serde(default)]
    pub brief: String,
    /// Broadcast time as reported by the listing API.
    #[serde(default)]
    pub time: String,
    /// Link to the episode page.
    #[serde(default)]
    pub url: String,
    /// Episode duration as a display string.
    #[serde(default)]
    pub length: String,
}

impl Episode {
    /// The text the rewriter should work from: the brief when present,
    /// otherwise the title.
    pub fn source_content(&self) -> &str {
        if self.brief.is_empty() {
            &self.title
        } else {
            &self.brief
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_missing_keys_default_to_empty() {
        let episode: Episode = serde_json::from_str(r#"{"title": "节目A"}"#).unwrap();
        assert_eq!(episode.title, "节目A");
        assert_eq!(episode.brief, "");
        assert_eq!(episode.time, "");
        assert_eq!(episode.url, "");
        assert_eq!(episode.length, "");
    }

    #[test]
    fn test_episode_full_deserialization() {
        let json = r#"{
            "title": "焦点访谈：粮食安全",
            "brief": "本期节目关注粮食安全",
            "time": "2024-01-01",
            "url": "https://tv.cctv.com/xyz",
            "length": "00:15:00"
        }"#;
        let episode: Episode = serde_json::from_str(json).unwrap();
        assert_eq!(episode.title, "焦点访谈：粮食安全");
        assert_eq!(episode.brief, "本期节目关注粮食安全");
        assert_eq!(episode.time, "2024-01-01");
        assert_eq!(episode.url, "https://tv.cctv.com/xyz");
        assert_eq!(episode.length, "00:15:00");
    }

    #[test]
    fn test_source_content_prefers_brief() {
        let episode = Episode {
            title: "节目A".to_string(),
            brief: "内容A".to_string(),
            time: String::new(),
            url: String::new(),
            length: String::new(),
        };
        assert_eq!(episode.source_content(), "内容A");
    }

    #[test]
    fn test_source_content_falls_back_to_title() {
        let episode = Episode {
            title: "节目A".to_string(),
            brief: String::new(),
            time: String::new(),
            url: String::new(),
            length: String::new(),
        };
        assert_eq!(episode.source_content(), "节目A");
    }
}
