#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Html,
    Json,
}

struct MediaRange<'a> {
    kind: &'a str,
    subtype: &'a str,
    quality: f32,
}

fn parse_range(raw: &str) -> Option<MediaRange<'_>> {
    let mut parts = raw.split(';');
    let media = parts.next()?.trim();
    let (kind, subtype) = media.split_once('/')?;

    let quality = parts
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .and_then(|(_, q)| q.trim().parse::<f32>().ok())
        .unwrap_or(1.0);

    Some(MediaRange {
        kind: kind.trim(),
        subtype: subtype.trim(),
        quality,
    })
}

impl MediaRange<'_> {
    fn accepts(&self, kind: &str, subtype: &str) -> bool {
        (self.kind == "*" || self.kind.eq_ignore_ascii_case(kind))
            && (self.subtype == "*" || self.subtype.eq_ignore_ascii_case(subtype))
    }
}

/// Picks HTML or JSON for an `Accept` header value, or `None` when neither is
/// acceptable. A missing header behaves like `*/*`.
pub fn negotiate(accept: Option<&str>) -> Option<Representation> {
    let accept = match accept.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => return Some(Representation::Html),
    };

    let mut ranges: Vec<MediaRange> = accept
        .split(',')
        .filter_map(parse_range)
        .filter(|range| range.quality > 0.0)
        .collect();
    // stable: equal weights keep the client's order
    ranges.sort_by(|a, b| b.quality.total_cmp(&a.quality));

    ranges.iter().find_map(|range| {
        if range.accepts("text", "html") {
            Some(Representation::Html)
        } else if range.accepts("application", "json") {
            Some(Representation::Json)
        } else {
            None
        }
    })
}
