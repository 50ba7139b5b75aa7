use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TimelineError;

// --- Timeline Events ---

/// One point in a relationship arc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TimelineEvent {
    /// Calendar year the event takes place in.
    pub year: i32,
    /// What happens, as a short narrative paragraph.
    #[schemars(length(min = 1))]
    pub event: String,
    /// 0 = inseparable, 100 = strangers or no contact at all.
    #[schemars(range(min = 0, max = 100))]
    pub distance: u8,
    /// 0 = bleakest, 10 = warmest.
    #[schemars(range(min = 0, max = 10))]
    pub emotion_score: u8,
    /// Short label for the current stage of the relationship.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

impl TimelineEvent {
    pub const MAX_DISTANCE: u8 = 100;
    pub const MAX_EMOTION_SCORE: u8 = 10;

    pub fn new(
        year: i32,
        event: impl Into<String>,
        distance: u8,
        emotion_score: u8,
        phase: Option<&str>,
    ) -> Self {
        Self {
            year,
            event: event.into(),
            distance,
            emotion_score,
            phase: phase.map(str::to_string),
        }
    }

    /// Check the field-level contract. Returns the first violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.event.trim().is_empty() {
            return Err("event text is empty".to_string());
        }
        if self.distance > Self::MAX_DISTANCE {
            return Err(format!(
                "distance {} out of range 0..={}",
                self.distance,
                Self::MAX_DISTANCE
            ));
        }
        if self.emotion_score > Self::MAX_EMOTION_SCORE {
            return Err(format!(
                "emotion_score {} out of range 0..={}",
                self.emotion_score,
                Self::MAX_EMOTION_SCORE
            ));
        }
        Ok(())
    }
}

/// JSON schema for the array of events a generator must return.
pub fn timeline_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(Vec<TimelineEvent>);
    serde_json::to_value(schema).unwrap_or_default()
}

// --- Timeline ---

/// A complete, validated arc of 6–12 events, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimelineEvent>", into = "Vec<TimelineEvent>")]
pub struct Timeline(Vec<TimelineEvent>);

impl Timeline {
    pub const MIN_EVENTS: usize = 6;
    pub const MAX_EVENTS: usize = 12;

    pub fn new(events: Vec<TimelineEvent>) -> Result<Self, TimelineError> {
        let len = events.len();
        if !(Self::MIN_EVENTS..=Self::MAX_EVENTS).contains(&len) {
            return Err(TimelineError::Length {
                len,
                min: Self::MIN_EVENTS,
                max: Self::MAX_EVENTS,
            });
        }
        for (index, event) in events.iter().enumerate() {
            event
                .validate()
                .map_err(|reason| TimelineError::Event { index, reason })?;
        }
        Ok(Self(events))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &TimelineEvent {
        &self.0[0]
    }

    pub fn last(&self) -> &TimelineEvent {
        &self.0[self.0.len() - 1]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineEvent> {
        self.0.iter()
    }

    /// Years never go backwards. Consumers expect this but it is not a
    /// rejection criterion.
    pub fn is_chronological(&self) -> bool {
        self.0.windows(2).all(|w| w[0].year <= w[1].year)
    }
}

impl TryFrom<Vec<TimelineEvent>> for Timeline {
    type Error = TimelineError;

    fn try_from(events: Vec<TimelineEvent>) -> Result<Self, Self::Error> {
        Timeline::new(events)
    }
}

impl From<Timeline> for Vec<TimelineEvent> {
    fn from(timeline: Timeline) -> Self {
        timeline.0
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineEvent;
    type IntoIter = std::slice::Iter<'a, TimelineEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// --- Narrative Result ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Destiny,
    Default,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Destiny => write!(f, "destiny"),
            Theme::Default => write!(f, "default"),
        }
    }
}

/// What the predict endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeResult {
    #[serde(rename = "events")]
    pub timeline: Timeline,
    pub is_special: bool,
    pub theme: Theme,
}

impl NarrativeResult {
    /// The hand-authored easter egg.
    pub fn special(timeline: Timeline) -> Self {
        Self {
            timeline,
            is_special: true,
            theme: Theme::Destiny,
        }
    }

    /// Anything produced by the generator or the templates.
    pub fn standard(timeline: Timeline) -> Self {
        Self {
            timeline,
            is_special: false,
            theme: Theme::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(year: i32, distance: u8, emotion_score: u8) -> TimelineEvent {
        TimelineEvent::new(year, "something happened", distance, emotion_score, None)
    }

    fn events(n: usize) -> Vec<TimelineEvent> {
        (0..n).map(|i| event(2000 + i as i32, 50, 5)).collect()
    }

    #[test]
    fn timeline_accepts_six_to_twelve_events() {
        assert!(Timeline::new(events(6)).is_ok());
        assert!(Timeline::new(events(12)).is_ok());
        assert_eq!(
            Timeline::new(events(5)).unwrap_err(),
            TimelineError::Length {
                len: 5,
                min: 6,
                max: 12
            }
        );
        assert!(Timeline::new(events(13)).is_err());
        assert!(Timeline::new(Vec::new()).is_err());
    }

    #[test]
    fn timeline_rejects_out_of_range_fields() {
        let mut evs = events(6);
        evs[2].distance = 101;
        assert_eq!(
            Timeline::new(evs).unwrap_err(),
            TimelineError::Event {
                index: 2,
                reason: "distance 101 out of range 0..=100".into()
            }
        );

        let mut evs = events(6);
        evs[0].emotion_score = 11;
        assert!(matches!(
            Timeline::new(evs),
            Err(TimelineError::Event { index: 0, .. })
        ));

        let mut evs = events(6);
        evs[5].event = "   ".into();
        assert!(Timeline::new(evs).is_err());
    }

    #[test]
    fn boundary_values_are_valid() {
        let mut evs = events(6);
        evs[0].distance = 0;
        evs[0].emotion_score = 0;
        evs[1].distance = 100;
        evs[1].emotion_score = 10;
        assert!(Timeline::new(evs).is_ok());
    }

    #[test]
    fn chronology_is_reported_not_enforced() {
        let mut evs = events(6);
        evs[3].year = 1990;
        let timeline = Timeline::new(evs).unwrap();
        assert!(!timeline.is_chronological());
    }

    #[test]
    fn timeline_deserialization_validates() {
        let json = serde_json::to_string(&events(4)).unwrap();
        assert!(serde_json::from_str::<Timeline>(&json).is_err());

        let json = serde_json::to_string(&events(7)).unwrap();
        let timeline: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(timeline.len(), 7);
    }

    #[test]
    fn narrative_result_wire_format() {
        let mut evs = events(6);
        evs[0].phase = Some("start".into());
        let result = NarrativeResult::special(Timeline::new(evs).unwrap());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["is_special"], true);
        assert_eq!(json["theme"], "destiny");
        assert_eq!(json["events"].as_array().unwrap().len(), 6);
        assert_eq!(json["events"][0]["phase"], "start");
        assert!(json["events"][1].get("phase").is_none());

        let standard = NarrativeResult::standard(result.timeline.clone());
        assert_eq!(serde_json::to_value(&standard).unwrap()["theme"], "default");
    }

    #[test]
    fn schema_describes_ranges() {
        let schema = timeline_schema();
        assert_eq!(schema["type"], "array");

        let props = &schema["definitions"]["TimelineEvent"]["properties"];
        assert_eq!(props["distance"]["maximum"].as_f64(), Some(100.0));
        assert_eq!(props["emotion_score"]["maximum"].as_f64(), Some(10.0));
    }
}
