//! Transcript payload normalization.
//!
//! Providers return transcripts in several shapes: segments nested under a
//! `transcript` object, a bare top-level array, caption-event JSON from the
//! native extractor, or only flat text. Rather than branch ad hoc, an ordered
//! list of pure parser functions is tried until one yields a result.

use super::models::{Platform, Transcript, TranscriptSegment};
use serde_json::Value;

type PayloadParser = fn(&Value) -> Option<ParsedPayload>;

/// Intermediate parse result before a [`Transcript`] is assembled.
enum ParsedPayload {
    Segments(Vec<TranscriptSegment>),
    Text(String),
}

/// Parsers in priority order. Adding or removing a provider shape is a
/// one-line edit here.
const PARSERS: [PayloadParser; 4] = [
    parse_nested_segments,
    parse_bare_segment_array,
    parse_caption_events,
    parse_flat_text,
];

/// Normalize a provider payload into a canonical [`Transcript`].
///
/// Unrecognized payloads normalize to the empty transcript; normalizing an
/// already-canonical transcript returns an equivalent one.
pub fn normalize(payload: &Value, platform: Platform) -> Transcript {
    let language = payload
        .get("language")
        .or_else(|| payload.get("lang"))
        .and_then(Value::as_str)
        .map(String::from);

    for parser in PARSERS {
        match parser(payload) {
            Some(ParsedPayload::Segments(segments)) => {
                return Transcript::from_segments(segments, language, platform);
            }
            Some(ParsedPayload::Text(text)) => {
                return Transcript::from_text(text, language, platform);
            }
            None => continue,
        }
    }

    Transcript::from_text(String::new(), language, platform)
}

/// Segments nested under `transcript.segments`, or at the top-level
/// `segments` key (the canonical shape).
fn parse_nested_segments(payload: &Value) -> Option<ParsedPayload> {
    let segments = payload
        .get("transcript")
        .and_then(|t| t.get("segments"))
        .or_else(|| payload.get("segments"))?
        .as_array()?;

    Some(ParsedPayload::Segments(collect_segments(segments)))
}

/// A bare top-level array of segment objects.
fn parse_bare_segment_array(payload: &Value) -> Option<ParsedPayload> {
    let segments = payload.as_array()?;
    Some(ParsedPayload::Segments(collect_segments(segments)))
}

/// Caption-event JSON produced by the native extractor's auto-caption
/// tracks: `events[].segs[].utf8` with `tStartMs`/`dDurationMs`.
fn parse_caption_events(payload: &Value) -> Option<ParsedPayload> {
    let events = payload.get("events")?.as_array()?;

    let segments = events
        .iter()
        .filter_map(|event| {
            let start_ms = event.get("tStartMs")?.as_u64()?;
            let end_ms = event
                .get("dDurationMs")
                .and_then(Value::as_u64)
                .map(|d| start_ms + d);
            let text = event
                .get("segs")?
                .as_array()?
                .iter()
                .filter_map(|seg| seg.get("utf8").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
                .trim()
                .to_string();

            if text.is_empty() {
                return None;
            }
            Some(TranscriptSegment::new(start_ms, end_ms, text))
        })
        .collect();

    Some(ParsedPayload::Segments(segments))
}

/// Only flat text under `text`, `transcript`, or `full_text`.
fn parse_flat_text(payload: &Value) -> Option<ParsedPayload> {
    let text = payload
        .get("full_text")
        .or_else(|| payload.get("text"))
        .or_else(|| payload.get("transcript"))?
        .as_str()?;

    Some(ParsedPayload::Text(text.to_string()))
}

/// Extract `(start_ms, end_ms, text)` tuples from segment objects, accepting
/// both snake_case and camelCase key spellings and `text`/`snippet` payloads.
/// Provider order is preserved; segments are assumed chronological and never
/// re-sorted.
fn collect_segments(values: &[Value]) -> Vec<TranscriptSegment> {
    values
        .iter()
        .filter_map(|value| {
            let start_ms = value
                .get("start_ms")
                .or_else(|| value.get("startMs"))
                .and_then(Value::as_u64)?;
            let end_ms = value
                .get("end_ms")
                .or_else(|| value.get("endMs"))
                .and_then(Value::as_u64);
            let text = value
                .get("text")
                .or_else(|| value.get("snippet"))
                .and_then(Value::as_str)?;

            Some(TranscriptSegment::new(start_ms, end_ms, text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_segments_shape() {
        let payload = json!({
            "language": "en",
            "transcript": {
                "segments": [
                    {"start_ms": 0, "end_ms": 2000, "text": "hello"},
                    {"start_ms": 2000, "text": "world"},
                ]
            }
        });

        let transcript = normalize(&payload, Platform::YouTube);
        assert_eq!(transcript.full_text, "hello world");
        assert_eq!(transcript.language.as_deref(), Some("en"));

        let segments = transcript.segments.unwrap();
        assert_eq!(segments[0].end_ms, Some(2000));
        assert_eq!(segments[1].end_ms, None);
    }

    #[test]
    fn test_bare_array_with_camel_case_and_snippet() {
        let payload = json!([
            {"startMs": 500, "endMs": 1500, "snippet": "first"},
            {"startMs": 1500, "snippet": "second"},
        ]);

        let transcript = normalize(&payload, Platform::YouTube);
        assert_eq!(transcript.full_text, "first second");
        assert_eq!(transcript.segments.unwrap()[0].start_ms, 500);
    }

    #[test]
    fn test_caption_events_shape() {
        let payload = json!({
            "events": [
                {"tStartMs": 0, "dDurationMs": 1200, "segs": [{"utf8": "hei "}, {"utf8": "verden"}]},
                {"tStartMs": 1200, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 2000, "segs": [{"utf8": "igjen"}]},
            ]
        });

        let transcript = normalize(&payload, Platform::TikTok);
        let segments = transcript.segments.unwrap();
        // Whitespace-only events are dropped
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "hei verden");
        assert_eq!(segments[0].end_ms, Some(1200));
        assert_eq!(segments[1].start_ms, 2000);
    }

    #[test]
    fn test_flat_text_shape() {
        let payload = json!({"text": "just plain text"});
        let transcript = normalize(&payload, Platform::YouTube);
        assert_eq!(transcript.full_text, "just plain text");
        assert!(transcript.segments.is_none());
    }

    #[test]
    fn test_provider_order_preserved() {
        // Out-of-order input stays out of order; providers are trusted
        let payload = json!({"segments": [
            {"start_ms": 9000, "text": "later"},
            {"start_ms": 1000, "text": "earlier"},
        ]});

        let segments = normalize(&payload, Platform::YouTube).segments.unwrap();
        assert_eq!(segments[0].start_ms, 9000);
        assert_eq!(segments[1].start_ms, 1000);
    }

    #[test]
    fn test_empty_payload_normalizes_to_empty_transcript() {
        let payload = json!({"transcript": {"segments": []}, "text": ""});
        let transcript = normalize(&payload, Platform::YouTube);
        assert_eq!(transcript.full_text, "");
        assert!(transcript.segments.is_none());
    }

    #[test]
    fn test_idempotent_on_canonical_shape() {
        let original = Transcript::from_segments(
            vec![
                TranscriptSegment::new(0, Some(2000), "hello"),
                TranscriptSegment::new(2000, None, "world"),
            ],
            Some("en".to_string()),
            Platform::YouTube,
        );

        let round_tripped = normalize(
            &serde_json::to_value(&original).unwrap(),
            Platform::YouTube,
        );
        assert_eq!(round_tripped, original);
    }
}
