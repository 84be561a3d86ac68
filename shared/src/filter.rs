//! Client-side list filtering
//!
//! List pages narrow the already-fetched collection by a search term, a
//! status (or type) value and, on the history page, a date range.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Inventory, Material, Organization, Process, Transaction, User};
use crate::types::DateRange;

/// A row a list page can filter
pub trait Filterable {
    /// Fields matched by the search box
    fn search_fields(&self) -> Vec<String>;

    /// Status or type value compared by the status filter
    fn status_key(&self) -> Option<&str> {
        None
    }

    /// Timestamp compared by the date range
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        None
    }
}

/// Status selector; `All` bypasses the filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            StatusFilter::All
        } else {
            StatusFilter::Only(value.to_string())
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(value) => Some(value),
        }
    }
}

/// Filter state of one list page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListFilter {
    pub search: String,
    pub status: StatusFilter,
    pub range: DateRange,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = StatusFilter::parse(status);
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Trimmed search term, `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.status == StatusFilter::All && self.range.is_unbounded()
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        if let Some(term) = self.search_term() {
            let needle = term.to_lowercase();
            let hit = item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let (Some(wanted), Some(actual)) = (self.status.value(), item.status_key()) {
            if !wanted.eq_ignore_ascii_case(actual) {
                return false;
            }
        }

        if !self.range.is_unbounded() {
            match item.timestamp() {
                Some(ts) if self.range.contains(ts.date_naive()) => {}
                Some(_) => return false,
                None => {}
            }
        }

        true
    }

    pub fn apply<'a, T: Filterable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

// ============================================================================
// Designated fields per list page
// ============================================================================

impl Filterable for Organization {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.id.to_string(), self.kind.to_string()]
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.kind.as_str())
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Filterable for Material {
    fn search_fields(&self) -> Vec<String> {
        vec![self.name.clone(), self.id.to_string(), self.unit.to_string()]
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.unit.as_str())
    }
}

impl Filterable for Inventory {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.material.name.clone(),
            self.organization.name.clone(),
            self.id.to_string(),
        ]
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.organization.kind.as_str())
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}

impl Filterable for Transaction {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.sender.name.clone(),
            self.receiver.name.clone(),
        ]
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Filterable for Process {
    fn search_fields(&self) -> Vec<String> {
        vec![self.id.to_string(), self.organization.name.clone()]
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.started_at)
    }
}

impl Filterable for User {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.email.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.organization_label().to_string(),
        ]
    }

    fn status_key(&self) -> Option<&str> {
        Some(self.activity_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{at, organization, transaction, user};
    use crate::models::{OrganizationType, TransactionStatus};
    use chrono::NaiveDate;

    fn workshops() -> Vec<Organization> {
        vec![
            organization(1, "Central Bank", OrganizationType::Bank),
            organization(2, "Golden Hands", OrganizationType::GoldProcessing),
            organization(3, "Silverline", OrganizationType::SilverProcessing),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let rows = workshops();
        let found = ListFilter::new().search("GOLD").apply(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Golden Hands");

        let by_id = ListFilter::new().search("3").apply(&rows);
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, 3);
    }

    #[test]
    fn test_search_excludes_everything_when_nothing_matches() {
        let rows = workshops();
        assert!(ListFilter::new().search("platinum").apply(&rows).is_empty());
    }

    #[test]
    fn test_status_all_returns_unfiltered_set() {
        let rows = workshops();
        assert_eq!(ListFilter::new().status("all").apply(&rows).len(), 3);
        assert_eq!(ListFilter::new().status("ALL").apply(&rows).len(), 3);
        assert_eq!(ListFilter::new().status("bank").apply(&rows).len(), 1);
    }

    #[test]
    fn test_search_and_status_combine() {
        let rows = vec![
            transaction(1, "Central Bank", "Golden Hands", TransactionStatus::Pending, at(2024, 5, 1)),
            transaction(2, "Central Bank", "Silverline", TransactionStatus::Accepted, at(2024, 5, 2)),
            transaction(3, "Golden Hands", "Central Bank", TransactionStatus::Pending, at(2024, 5, 3)),
        ];
        let found = ListFilter::new().search("golden").status("pending").apply(&rows);
        let ids: Vec<_> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let rows = vec![
            transaction(1, "A", "B", TransactionStatus::Pending, at(2024, 5, 1)),
            transaction(2, "A", "B", TransactionStatus::Pending, at(2024, 5, 15)),
            transaction(3, "A", "B", TransactionStatus::Pending, at(2024, 6, 1)),
        ];
        let range = DateRange {
            from: NaiveDate::from_ymd_opt(2024, 5, 1),
            to: NaiveDate::from_ymd_opt(2024, 5, 15),
        };
        let ids: Vec<_> = ListFilter::new()
            .range(range)
            .apply(&rows)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_users_match_on_organization_label() {
        let rows = vec![
            user(1, "aziz", "aziz@example.com", Some("Golden Hands")),
            user(2, "malika", "malika@example.com", None),
        ];
        let found = ListFilter::new().search("golden").apply(&rows);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "aziz");
        assert_eq!(ListFilter::new().status("inactive").apply(&rows).len(), 0);
    }

    #[test]
    fn test_blank_filter_is_empty() {
        assert!(ListFilter::new().search("   ").status("all").is_empty());
        assert!(!ListFilter::new().status("pending").is_empty());
    }
}
