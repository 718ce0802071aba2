use serde::{Deserialize, Serialize};

use crate::interaction::FilterChange;

/// Derived view a selection change can make stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewTopic {
    MaxMin,
    RegionBars,
    StateBars,
    TimeSeries,
    Comparison,
    Indicators,
    BarRace,
}

impl ViewTopic {
    pub const ALL: [Self; 7] = [
        Self::MaxMin,
        Self::RegionBars,
        Self::StateBars,
        Self::TimeSeries,
        Self::Comparison,
        Self::Indicators,
        Self::BarRace,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::MaxMin => 1 << 0,
            Self::RegionBars => 1 << 1,
            Self::StateBars => 1 << 2,
            Self::TimeSeries => 1 << 3,
            Self::Comparison => 1 << 4,
            Self::Indicators => 1 << 5,
            Self::BarRace => 1 << 6,
        }
    }
}

/// Bitmask of stale views awaiting the next recompute pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ViewTopics {
    bits: u8,
}

impl ViewTopics {
    const ALL_BITS: u8 = ViewTopic::MaxMin.bit()
        | ViewTopic::RegionBars.bit()
        | ViewTopic::StateBars.bit()
        | ViewTopic::TimeSeries.bit()
        | ViewTopic::Comparison.bit()
        | ViewTopic::Indicators.bit()
        | ViewTopic::BarRace.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_topic(topic: ViewTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: ViewTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains(self, topic: ViewTopic) -> bool {
        self.bits & topic.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Topics set in this mask, in [`ViewTopic::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = ViewTopic> {
        ViewTopic::ALL
            .into_iter()
            .filter(move |topic| self.contains(*topic))
    }
}

/// Views made stale by `change`.
#[must_use]
pub fn topics_for_change(change: &FilterChange) -> ViewTopics {
    match change {
        FilterChange::Year(_) => ViewTopics::from_topic(ViewTopic::RegionBars)
            .with_topic(ViewTopic::StateBars)
            .with_topic(ViewTopic::Indicators),
        FilterChange::Region(_) => ViewTopics::from_topic(ViewTopic::StateBars),
        FilterChange::ComparisonStates(_) => {
            ViewTopics::from_topic(ViewTopic::TimeSeries).with_topic(ViewTopic::BarRace)
        }
        FilterChange::StateA(_) | FilterChange::StateB(_) | FilterChange::ComparisonPair { .. } => {
            ViewTopics::from_topic(ViewTopic::Comparison).with_topic(ViewTopic::Indicators)
        }
        FilterChange::YearRange(_) => year_range_topics(),
        FilterChange::Batch(changes) => changes
            .iter()
            .fold(ViewTopics::none(), |acc, change| acc.union(topics_for_change(change))),
    }
}

/// Views that depend on the active year range.
#[must_use]
pub const fn year_range_topics() -> ViewTopics {
    ViewTopics::from_topic(ViewTopic::TimeSeries)
        .with_topic(ViewTopic::Comparison)
        .with_topic(ViewTopic::BarRace)
}

#[cfg(test)]
mod tests {
    use super::{ViewTopic, ViewTopics, topics_for_change};
    use crate::core::YearRange;
    use crate::interaction::FilterChange;

    #[test]
    fn topics_union_and_contains_work() {
        let topics = ViewTopics::from_topic(ViewTopic::StateBars).with_topic(ViewTopic::BarRace);
        assert!(topics.contains(ViewTopic::StateBars));
        assert!(topics.contains(ViewTopic::BarRace));
        assert!(!topics.contains(ViewTopic::MaxMin));
    }

    #[test]
    fn region_change_only_touches_state_bars() {
        let topics = topics_for_change(&FilterChange::Region("SUL".to_owned()));
        assert_eq!(topics.iter().collect::<Vec<_>>(), vec![ViewTopic::StateBars]);
    }

    #[test]
    fn batch_unions_member_topics() {
        let topics = topics_for_change(&FilterChange::Batch(vec![
            FilterChange::Region("SUL".to_owned()),
            FilterChange::YearRange(YearRange::new(2004, 2010)),
        ]));
        assert!(topics.contains(ViewTopic::StateBars));
        assert!(topics.contains(ViewTopic::TimeSeries));
        assert!(!topics.contains(ViewTopic::MaxMin));
    }

    #[test]
    fn all_covers_every_topic() {
        assert_eq!(ViewTopics::all().iter().count(), ViewTopic::ALL.len());
    }
}
