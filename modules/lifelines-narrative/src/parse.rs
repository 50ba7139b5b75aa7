use ai_client::{strip_code_blocks, truncate_to_char_boundary};
use lifelines_common::{GenerationError, Timeline, TimelineError, TimelineEvent};
use tracing::warn;

/// Turn raw model output into a validated timeline.
///
/// Markdown fences are stripped first. The payload must be a JSON array; any
/// element that does not map onto [`TimelineEvent`] rejects the whole response.
pub fn parse_timeline(raw: &str) -> Result<Timeline, GenerationError> {
    let payload = strip_code_blocks(raw);

    let records: Vec<serde_json::Value> = serde_json::from_str(payload).map_err(|e| {
        GenerationError::Parse(format!(
            "{e}; response began with {:?}",
            truncate_to_char_boundary(payload, 120)
        ))
    })?;

    let events = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            serde_json::from_value::<TimelineEvent>(record).map_err(|e| TimelineError::Event {
                index,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let timeline = Timeline::new(events)?;
    if !timeline.is_chronological() {
        warn!(events = timeline.len(), "Generated timeline has years out of order");
    }
    Ok(timeline)
}
