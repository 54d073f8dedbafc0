//! Week numbering and the season calendar
//!
//! Weeks are the scheduling unit of the planner: each one is a single match
//! slot, numbered from 1 starting at the configured season start date. This
//! module also provides [`Weekly`], the week-keyed record that availability,
//! matches and results are stored in.

use std::{
    collections::{BTreeMap, btree_map},
    marker::PhantomData,
    num::ParseIntError,
    str::FromStr,
};

use chrono::{Days, NaiveDate};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, SeqAccess, Visitor},
};

use crate::constants;

/// A week number within the season (1-based)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
)]
#[serde(transparent)]
pub struct Week(u32);

impl Week {
    /// The first week of any season
    pub const FIRST: Week = Week(1);

    /// Creates a week from its number
    pub const fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the week number
    pub const fn number(self) -> u32 {
        self.0
    }
}

impl FromStr for Week {
    type Err = ParseIntError;

    /// Parses a week from its decimal number
    ///
    /// # Errors
    ///
    /// Returns a `ParseIntError` if the string is not a non-negative integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

/// A record holding at most one value per week
///
/// Serializes as a JSON object keyed by week number. Deserialization also
/// accepts a sparse array where the index is the week number and `null`
/// marks an absent week, which is how realtime databases hand back objects
/// with small integer keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Weekly<T>(BTreeMap<Week, T>);

impl<T> Default for Weekly<T> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Weekly<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(WeeklyVisitor(PhantomData))
    }
}

struct WeeklyVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for WeeklyVisitor<T> {
    type Value = Weekly<T>;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("an object keyed by week number or a sparse array")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Weekly::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Weekly::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut weeks = BTreeMap::new();
        while let Some((week, value)) = map.next_entry::<Week, Option<T>>()? {
            if let Some(value) = value {
                weeks.insert(week, value);
            }
        }
        Ok(Weekly(weeks))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut weeks = BTreeMap::new();
        let mut index = 0;
        while let Some(value) = seq.next_element::<Option<T>>()? {
            if let Some(value) = value {
                weeks.insert(Week(index), value);
            }
            index += 1;
        }
        Ok(Weekly(weeks))
    }
}

impl<T> Weekly<T> {
    /// Gets the value stored for a week
    pub fn get(&self, week: Week) -> Option<&T> {
        self.0.get(&week)
    }

    /// Gets a mutable reference to the value stored for a week
    pub fn get_mut(&mut self, week: Week) -> Option<&mut T> {
        self.0.get_mut(&week)
    }

    /// Stores a value for a week, returning the value it replaced
    pub fn insert(&mut self, week: Week, value: T) -> Option<T> {
        self.0.insert(week, value)
    }

    /// Removes the value stored for a week
    pub fn remove(&mut self, week: Week) -> Option<T> {
        self.0.remove(&week)
    }

    /// Whether a value is stored for a week
    pub fn contains(&self, week: Week) -> bool {
        self.0.contains_key(&week)
    }

    /// Gets the entry for a week for in-place manipulation
    pub fn entry(&mut self, week: Week) -> btree_map::Entry<'_, Week, T> {
        self.0.entry(week)
    }

    /// Iterates over all stored weeks in ascending order
    pub fn iter(&self) -> btree_map::Iter<'_, Week, T> {
        self.0.iter()
    }

    /// Iterates over all stored values in ascending week order
    pub fn values(&self) -> btree_map::Values<'_, Week, T> {
        self.0.values()
    }

    /// Number of weeks with a stored value
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no week has a stored value
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> FromIterator<(Week, T)> for Weekly<T> {
    fn from_iter<I: IntoIterator<Item = (Week, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Weekly<T> {
    type Item = (&'a Week, &'a T);
    type IntoIter = btree_map::Iter<'a, Week, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The season calendar
///
/// Maps week numbers to the dates they are played on and finds the week
/// the presentation layer should open on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    /// Date of week 1
    start_date: NaiveDate,
    /// Number of weeks in the season
    total_weeks: u32,
}

impl Calendar {
    /// Creates a calendar for a season
    ///
    /// A season always has at least one week.
    pub fn new(start_date: NaiveDate, total_weeks: u32) -> Self {
        Self {
            start_date,
            total_weeks: total_weeks.max(1),
        }
    }

    /// Number of weeks in the season
    pub fn total_weeks(&self) -> u32 {
        self.total_weeks
    }

    /// The last week of the season
    pub fn last_week(&self) -> Week {
        Week(self.total_weeks)
    }

    /// Whether a week falls within the season
    pub fn contains(&self, week: Week) -> bool {
        (1..=self.total_weeks).contains(&week.0)
    }

    /// Iterates over every week of the season in order
    pub fn weeks(&self) -> impl Iterator<Item = Week> {
        (1..=self.total_weeks).map(Week)
    }

    /// Gets the date a week is played on
    ///
    /// # Returns
    ///
    /// `None` if the week is outside the season
    pub fn date_of(&self, week: Week) -> Option<NaiveDate> {
        if !self.contains(week) {
            return None;
        }
        let offset = u64::from(week.0 - 1) * constants::season::DAYS_PER_WEEK;
        self.start_date.checked_add_days(Days::new(offset))
    }

    /// Detects the week to plan for on a given day
    ///
    /// This is the first week whose date is on or after `today`. Before the
    /// season starts that is week 1; once the season is over it is the last
    /// week.
    pub fn current_week(&self, today: NaiveDate) -> Week {
        self.weeks()
            .find(|&week| self.date_of(week).is_some_and(|date| date >= today))
            .unwrap_or_else(|| self.last_week())
    }

    /// The week after `week`, clamped to the season
    pub fn next(&self, week: Week) -> Week {
        Week(week.0.saturating_add(1).clamp(1, self.total_weeks))
    }

    /// The week before `week`, clamped to the season
    pub fn previous(&self, week: Week) -> Week {
        Week(week.0.saturating_sub(1).clamp(1, self.total_weeks))
    }
}
