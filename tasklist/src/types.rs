//! Domain types for the todo list.
//!
//! An [`Entry`] is one row of the list. Entries are created from an
//! [`EntryDraft`] by the [`EntryList`], which owns identifier assignment.
//! Nothing mutates or removes an entry once it has been added.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for an entry
///
/// Identifiers start at 1 and are handed out in increasing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u32);

impl EntryId {
    /// The identifier given to the first entry of an empty list
    pub const FIRST: Self = Self(1);

    /// Creates an `EntryId` from a raw value
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the identifier that follows this one, or `None` once the
    /// identifier space is used up
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when priority or status text is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Text is not one of `High`, `Medium` or `Low`
    #[error("unknown priority: {0:?}")]
    UnknownPriority(String),

    /// Text is not one of `Pending`, `Completed`, `In Progress` or `Cancelled`
    #[error("unknown status: {0:?}")]
    UnknownStatus(String),
}

/// How urgent an entry is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Do first
    #[default]
    High,
    /// Do soon
    Medium,
    /// Do eventually
    Low,
}

impl Priority {
    /// All priorities in display order
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Display text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// The next priority in display order, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::High,
        }
    }

    /// The previous priority in display order, wrapping around
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Medium => Self::High,
            Self::Low => Self::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseError::UnknownPriority(s.to_string()))
    }
}

/// Progress of an entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Not started
    #[default]
    Pending,
    /// Done
    Completed,
    /// Started but not done
    #[serde(rename = "In Progress")]
    InProgress,
    /// Will not be done
    Cancelled,
}

impl Status {
    /// All statuses in display order
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Completed,
        Self::InProgress,
        Self::Cancelled,
    ];

    /// Display text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Cancelled => "Cancelled",
        }
    }

    /// The next status in display order, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::InProgress,
            Self::InProgress => Self::Cancelled,
            Self::Cancelled => Self::Pending,
        }
    }

    /// The previous status in display order, wrapping around
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Pending => Self::Cancelled,
            Self::Completed => Self::Pending,
            Self::InProgress => Self::Completed,
            Self::Cancelled => Self::InProgress,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("InProgress") || s.eq_ignore_ascii_case("in_progress") {
            return Ok(Self::InProgress);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

/// The user-supplied fields of an entry
///
/// `date` and `deadline` are kept as display text: the list shows exactly
/// what was entered or picked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// When the entry was written down
    pub date: String,
    /// What needs doing
    pub item: String,
    /// When it is due, or empty
    pub deadline: String,
    /// How urgent it is
    pub priority: Priority,
    /// How far along it is
    pub status: Status,
}

/// A single row of the todo list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier
    pub id: EntryId,
    /// When the entry was written down
    pub date: String,
    /// What needs doing
    pub item: String,
    /// When it is due, or empty
    pub deadline: String,
    /// How urgent it is
    pub priority: Priority,
    /// How far along it is
    pub status: Status,
}

impl Entry {
    /// Creates an entry from a draft
    #[must_use]
    pub fn from_draft(id: EntryId, draft: EntryDraft) -> Self {
        let EntryDraft {
            date,
            item,
            deadline,
            priority,
            status,
        } = draft;
        Self {
            id,
            date,
            item,
            deadline,
            priority,
            status,
        }
    }
}

/// Ordered collection of entries
///
/// Entries keep insertion order. Identifiers come from a counter that only
/// moves forward, so an identifier is never handed out twice. Once the
/// counter passes `u32::MAX` the list accepts no more entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryList {
    entries: Vec<Entry>,
    next_id: Option<EntryId>,
}

impl EntryList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: Some(EntryId::FIRST),
        }
    }

    /// Creates a list holding existing entries
    ///
    /// The next identifier is one past the largest identifier given.
    #[must_use]
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        let next_id = entries
            .iter()
            .map(|entry| entry.id)
            .max()
            .map_or(Some(EntryId::FIRST), EntryId::next);
        Self { entries, next_id }
    }

    /// Adds a new entry built from `draft` and returns it
    ///
    /// Returns `None`, leaving the list unchanged, when no identifier is left.
    pub fn add(&mut self, draft: EntryDraft) -> Option<&Entry> {
        let Some(id) = self.next_id else {
            tracing::warn!(item = %draft.item, "No identifier left, entry not added");
            return None;
        };
        self.next_id = id.next();
        self.entries.push(Entry::from_draft(id, draft));
        self.entries.last()
    }

    /// Appends an entry that already carries its identifier
    ///
    /// Returns `false`, leaving the list unchanged, when the identifier is
    /// below the next one this list would assign or no identifier is left.
    pub fn insert(&mut self, entry: Entry) -> bool {
        match self.next_id {
            Some(next) if entry.id >= next => {
                self.next_id = entry.id.next();
                self.entries.push(entry);
                true
            },
            _ => false,
        }
    }

    /// The identifier the next added entry will receive, if any is left
    #[must_use]
    pub const fn next_id(&self) -> Option<EntryId> {
        self.next_id
    }

    /// Looks up an entry by identifier
    #[must_use]
    pub fn find_by_id(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Iterates over entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Returns the entry at `index` in insertion order
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recently added entry
    #[must_use]
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }
}

impl Default for EntryList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The two sample rows a new list can be seeded with
#[must_use]
pub fn demo_entries() -> Vec<Entry> {
    (1..=2)
        .map(|id| {
            Entry::from_draft(
                EntryId::new(id),
                EntryDraft {
                    date: "2024-01-01".to_string(),
                    item: "Buy groceries".to_string(),
                    deadline: "2024-01-05".to_string(),
                    priority: Priority::High,
                    status: Status::Pending,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rent_draft() -> EntryDraft {
        EntryDraft {
            date: "2024-02-01".to_string(),
            item: "Pay rent".to_string(),
            deadline: "2024-02-10".to_string(),
            priority: Priority::Medium,
            status: Status::Pending,
        }
    }

    #[test]
    fn add_to_empty_list_assigns_first_id() {
        let mut list = EntryList::new();

        let entry = list.add(rent_draft()).unwrap().clone();

        assert_eq!(list.len(), 1);
        assert_eq!(entry.id, EntryId::new(1));
        assert_eq!(entry.date, "2024-02-01");
        assert_eq!(entry.item, "Pay rent");
        assert_eq!(entry.deadline, "2024-02-10");
        assert_eq!(entry.priority, Priority::Medium);
        assert_eq!(entry.status, Status::Pending);
    }

    #[test]
    fn second_add_gets_next_id() {
        let mut list = EntryList::new();
        list.add(rent_draft());

        let second = list
            .add(EntryDraft {
                item: "Call plumber".to_string(),
                ..rent_draft()
            })
            .unwrap();

        assert_eq!(second.id, EntryId::new(2));
        assert_eq!(list.last().map(|e| e.item.as_str()), Some("Call plumber"));
    }

    #[test]
    fn with_entries_continues_after_largest_id() {
        let list = EntryList::with_entries(vec![
            Entry::from_draft(EntryId::new(7), rent_draft()),
            Entry::from_draft(EntryId::new(3), rent_draft()),
        ]);

        assert_eq!(list.next_id(), Some(EntryId::new(8)));
        // Insertion order is kept, not sorted by id
        let ids: Vec<_> = list.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn with_no_entries_starts_at_one() {
        assert_eq!(EntryList::with_entries(Vec::new()).next_id(), Some(EntryId::FIRST));
        assert_eq!(EntryList::default().next_id(), Some(EntryId::FIRST));
    }

    #[test]
    fn insert_rejects_stale_ids() {
        let mut list = EntryList::new();
        list.add(rent_draft());

        assert!(!list.insert(Entry::from_draft(EntryId::new(1), rent_draft())));
        assert!(list.insert(Entry::from_draft(EntryId::new(5), rent_draft())));
        assert_eq!(list.len(), 2);
        assert_eq!(list.next_id(), Some(EntryId::new(6)));
    }

    #[test]
    fn exhausted_id_space_refuses_new_entries() {
        let last = EntryId::new(u32::MAX);
        let mut list = EntryList::with_entries(vec![Entry::from_draft(last, rent_draft())]);

        assert_eq!(last.next(), None);
        assert_eq!(list.next_id(), None);
        assert!(list.add(rent_draft()).is_none());
        assert!(!list.insert(Entry::from_draft(last, rent_draft())));

        let ids: Vec<_> = list.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![last]);
    }

    #[test]
    fn insert_up_to_the_last_id() {
        let mut list = EntryList::new();

        assert!(list.insert(Entry::from_draft(EntryId::new(u32::MAX), rent_draft())));
        assert_eq!(list.next_id(), None);
        assert!(list.add(rent_draft()).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn find_by_id() {
        let list = EntryList::with_entries(demo_entries());

        assert_eq!(list.find_by_id(EntryId::new(2)).map(|e| e.id.get()), Some(2));
        assert!(list.find_by_id(EntryId::new(3)).is_none());
    }

    #[test]
    fn default_draft() {
        let draft = EntryDraft::default();
        assert!(draft.date.is_empty());
        assert!(draft.item.is_empty());
        assert!(draft.deadline.is_empty());
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.status, Status::Pending);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("medium".parse::<Priority>(), Ok(Priority::Medium));
        assert_eq!(" LOW ".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!(
            "urgent".parse::<Priority>(),
            Err(ParseError::UnknownPriority("urgent".to_string()))
        );
    }

    #[test]
    fn status_accepts_display_and_identifier_forms() {
        assert_eq!("In Progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("inprogress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("in_progress".parse::<Status>(), Ok(Status::InProgress));
        assert_eq!("cancelled".parse::<Status>(), Ok(Status::Cancelled));
        assert!(matches!("done".parse::<Status>(), Err(ParseError::UnknownStatus(_))));
    }

    #[test]
    fn cycling_visits_every_value() {
        let mut priority = Priority::High;
        for expected in [Priority::Medium, Priority::Low, Priority::High] {
            priority = priority.next();
            assert_eq!(priority, expected);
        }
        assert_eq!(Priority::High.previous(), Priority::Low);

        for status in Status::ALL {
            assert_eq!(status.next().previous(), status);
        }
    }

    #[test]
    fn serde_uses_display_text() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");

        let entry = Entry::from_draft(EntryId::new(4), rent_draft());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["priority"], "Medium");
    }

    #[test]
    fn demo_entries_match_sample_rows() {
        let rows = demo_entries();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|e| e.item == "Buy groceries" && e.deadline == "2024-01-05"));
        assert_eq!(rows[1].id, EntryId::new(2));
    }
}
