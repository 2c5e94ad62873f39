use std::sync::LazyLock;

use regex::Regex;

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+):(\d{1,2})(?:\.(\d{1,3}))?\]").expect("timestamp pattern")
});

static WIDE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("whitespace pattern"));

/// One timed lyric line.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedLine {
    pub time: f64,
    pub text: String,
}

/// Parsed lyrics for one track.
///
/// `synced` is sorted by time and empty for untimed text. `plain` always
/// holds the display lines; for synced lyrics it mirrors `synced` in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricsDoc {
    pub synced: Vec<SyncedLine>,
    pub plain: Vec<String>,
}

impl LyricsDoc {
    pub fn parse(raw: &str) -> Self {
        let mut synced = Vec::new();
        for line in raw.lines() {
            parse_line(line, &mut synced);
        }

        if synced.is_empty() {
            return Self {
                synced,
                plain: unsynced_lines(raw),
            };
        }

        synced.sort_by(|a, b| a.time.total_cmp(&b.time));
        let plain = synced.iter().map(|l| l.text.clone()).collect();
        Self { synced, plain }
    }

    pub fn is_synced(&self) -> bool {
        !self.synced.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// Active line for `position`, if synced.
    pub fn active_index(&self, position: f64) -> Option<usize> {
        active_index(&self.synced, position)
    }
}

/// Push one entry per timestamp tag on `line`, all sharing the text after the
/// last tag. Malformed tags simply do not match and are left in the text.
fn parse_line(line: &str, out: &mut Vec<SyncedLine>) {
    let mut times = Vec::new();
    let mut text_start = 0;
    for caps in TIMESTAMP.captures_iter(line) {
        if let Some(time) = tag_seconds(&caps) {
            times.push(time);
        }
        if let Some(m) = caps.get(0) {
            text_start = m.end();
        }
    }
    if times.is_empty() {
        return;
    }
    let text = line[text_start..].trim();
    out.extend(times.into_iter().map(|time| SyncedLine {
        time,
        text: text.to_string(),
    }));
}

fn tag_seconds(caps: &regex::Captures<'_>) -> Option<f64> {
    let minutes: u64 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(2)?.as_str().parse().ok()?;
    let millis: u64 = match caps.get(3) {
        // Right-pad to three digits: ".5" is 500 ms, ".05" is 50 ms.
        Some(frac) => format!("{:0<3}", frac.as_str()).parse().ok()?,
        None => 0,
    };
    // Out-of-range minutes are a malformed tag, not a panic.
    let total_ms = minutes
        .checked_mul(60)?
        .checked_add(seconds)?
        .checked_mul(1000)?
        .checked_add(millis)?;
    Some(total_ms as f64 / 1000.0)
}

fn unsynced_lines(raw: &str) -> Vec<String> {
    let text = raw.replace("\\r\\n", "\n").replace("\\n", "\n");
    let text = WIDE_GAP.replace_all(&text, "\n");
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Greatest `i` with `lines[i].time <= position`; `None` before the first line.
pub fn active_index(lines: &[SyncedLine], position: f64) -> Option<usize> {
    lines
        .partition_point(|l| l.time <= position)
        .checked_sub(1)
}
