use serde_json::Value;

pub const UNTITLED: &str = "Sin titulo";
pub const MISSING: &str = "-";

/// One playable search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Display text such as `3:45`, or `-` when unknown.
    pub duration: String,
    /// Opaque id used to build the playable URL. May be empty.
    pub id: String,
    /// Best available thumbnail. May be empty.
    pub thumbnail_url: String,
}

impl Track {
    /// Placeholder shown when nothing is loaded.
    pub fn placeholder() -> Self {
        Self {
            title: UNTITLED.to_string(),
            artist: MISSING.to_string(),
            album: MISSING.to_string(),
            duration: MISSING.to_string(),
            id: String::new(),
            thumbnail_url: String::new(),
        }
    }

    /// Playable URL built from `template` (`{id}` is substituted), or `None`
    /// when the track has no id.
    pub fn url(&self, template: &str) -> Option<String> {
        let id = self.id.trim();
        if id.is_empty() {
            None
        } else {
            Some(template.replace("{id}", id))
        }
    }

    /// Duration in seconds parsed from the display text.
    pub fn duration_secs(&self) -> Option<u64> {
        parse_clock(&self.duration)
    }

    pub fn has_cover(&self) -> bool {
        !self.thumbnail_url.trim().is_empty()
    }

    /// Normalize one raw search item into a `Track`.
    ///
    /// Accepts YouTube-Music-like items (`artists[]`, `album{name}`,
    /// `duration`, `videoId`, `thumbnails[]`) as well as Invidious-like items
    /// (`author`, `lengthSeconds`, `videoThumbnails[]`). Missing fields fall
    /// back to defaults. Returns `None` for items that are not tracks
    /// (channels, playlists).
    pub fn from_search_item(item: &Value, base_url: &str) -> Option<Self> {
        let obj = item.as_object()?;
        if let Some(kind) = obj.get("type").and_then(Value::as_str) {
            if !matches!(kind, "video" | "song") {
                return None;
            }
        }

        let title = non_empty_str(item.get("title")).unwrap_or(UNTITLED).to_string();

        let artist = match item.get("artists").and_then(Value::as_array) {
            Some(list) if !list.is_empty() => list
                .iter()
                .map(|a| non_empty_str(a.get("name")).unwrap_or("?"))
                .collect::<Vec<_>>()
                .join(", "),
            _ => non_empty_str(item.get("author"))
                .or_else(|| non_empty_str(item.get("artist")))
                .unwrap_or(MISSING)
                .to_string(),
        };

        let album = match item.get("album") {
            Some(Value::Object(_)) => non_empty_str(item.get("album").and_then(|a| a.get("name"))),
            other => non_empty_str(other),
        }
        .unwrap_or(MISSING)
        .to_string();

        let duration = non_empty_str(item.get("duration"))
            .map(str::to_string)
            .or_else(|| {
                item.get("lengthSeconds")
                    .and_then(Value::as_u64)
                    .filter(|s| *s > 0)
                    .map(format_clock)
            })
            .unwrap_or_else(|| MISSING.to_string());

        let id = non_empty_str(item.get("videoId"))
            .or_else(|| non_empty_str(item.get("id")))
            .unwrap_or("")
            .to_string();

        let thumbnails = item
            .get("thumbnails")
            .or_else(|| item.get("videoThumbnails"))
            .and_then(Value::as_array);
        let thumbnail_url = thumbnails
            .and_then(|t| best_thumbnail(t))
            .map(|u| absolutize(u, base_url))
            .unwrap_or_default();

        Some(Self {
            title,
            artist,
            album,
            duration,
            id,
            thumbnail_url,
        })
    }
}

fn non_empty_str(v: Option<&Value>) -> Option<&str> {
    v.and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Pick the widest thumbnail; ties (or missing widths) favour the later entry.
fn best_thumbnail(thumbs: &[Value]) -> Option<&str> {
    thumbs
        .iter()
        .filter_map(|t| {
            let url = non_empty_str(t.get("url"))?;
            let width = t.get("width").and_then(Value::as_u64).unwrap_or(0);
            Some((width, url))
        })
        .max_by_key(|(w, _)| *w)
        .map(|(_, url)| url)
}

fn absolutize(url: &str, base_url: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else if url.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), url)
    } else {
        url.to_string()
    }
}

/// Format whole seconds as `m:ss` or `h:mm:ss`.
pub fn format_clock(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Parse `m:ss` / `h:mm:ss` display text into seconds.
pub fn parse_clock(text: &str) -> Option<u64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }
    parts.iter().try_fold(0u64, |acc, p| {
        let n: u64 = p.trim().parse().ok()?;
        Some(acc * 60 + n)
    })
}
