use crate::bonus::EventModifier;
use crate::state::{EventId, MaterialId, Timestamp, ZoneId};

pub trait EventOracle: Send + Sync {
    fn all_events(&self) -> Vec<SeasonalEvent>;

    /// Events whose window contains `now` and whose filters match.
    fn matching_events(
        &self,
        zone: Option<ZoneId>,
        material: &MaterialId,
        now: Timestamp,
    ) -> Vec<SeasonalEvent> {
        self.all_events()
            .into_iter()
            .filter(|event| event.applies_to(zone, material, now))
            .collect()
    }
}

/// A time-boxed, optionally filtered yield/experience boost.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonalEvent {
    pub id: EventId,
    pub name: String,
    /// Window is `[starts_at, ends_at)`.
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    /// `None` matches every zone, including node-less sessions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub zone: Option<ZoneId>,
    /// Empty matches every material.
    #[cfg_attr(feature = "serde", serde(default))]
    pub materials: Vec<MaterialId>,
    pub yield_multiplier: f64,
    pub experience_multiplier: f64,
}

impl SeasonalEvent {
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.starts_at <= now && now < self.ends_at
    }

    pub fn applies_to(&self, zone: Option<ZoneId>, material: &MaterialId, now: Timestamp) -> bool {
        if !self.is_active(now) {
            return false;
        }
        if let Some(filter) = self.zone
            && zone != Some(filter)
        {
            return false;
        }
        self.materials.is_empty() || self.materials.contains(material)
    }

    pub fn modifier(&self) -> EventModifier {
        EventModifier {
            event: self.id.clone(),
            yield_multiplier: self.yield_multiplier,
            experience_multiplier: self.experience_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harvest_festival() -> SeasonalEvent {
        SeasonalEvent {
            id: EventId::new("harvest_festival"),
            name: "Harvest Festival".into(),
            starts_at: Timestamp::from_secs(100),
            ends_at: Timestamp::from_secs(200),
            zone: Some(ZoneId(1)),
            materials: vec![MaterialId::new("oak_log")],
            yield_multiplier: 1.5,
            experience_multiplier: 2.0,
        }
    }

    #[test]
    fn window_is_half_open() {
        let event = harvest_festival();
        assert!(!event.is_active(Timestamp::from_secs(99)));
        assert!(event.is_active(Timestamp::from_secs(100)));
        assert!(!event.is_active(Timestamp::from_secs(200)));
    }

    #[test]
    fn filters_zone_and_material() {
        let event = harvest_festival();
        let now = Timestamp::from_secs(150);
        let oak = MaterialId::new("oak_log");

        assert!(event.applies_to(Some(ZoneId(1)), &oak, now));
        assert!(!event.applies_to(Some(ZoneId(2)), &oak, now));
        assert!(!event.applies_to(None, &oak, now));
        assert!(!event.applies_to(Some(ZoneId(1)), &MaterialId::new("copper_ore"), now));
    }

    #[test]
    fn unfiltered_event_matches_everything_in_window() {
        let event = SeasonalEvent {
            zone: None,
            materials: Vec::new(),
            ..harvest_festival()
        };
        assert!(event.applies_to(None, &MaterialId::new("anything"), Timestamp::from_secs(150)));
    }
}
