//! Query parameters for list endpoints

use chrono::NaiveDate;
use shared::{Id, ListFilter};

/// Optional list parameters; only non-empty values reach the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub organization: Option<Id>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    pub fn organization(mut self, organization: Id) -> Self {
        self.organization = Some(organization);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Server-side part of a page filter
    pub fn from_filter(filter: &ListFilter) -> Self {
        Self {
            search: filter.search_term().map(str::to_string),
            status: filter.status.value().map(str::to_string),
            start_date: filter.range.from,
            ..Self::default()
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("search", self.search.as_deref()),
            ("ordering", self.ordering.as_deref()),
            ("status", self.status.as_deref()),
        ];

        let mut pairs: Vec<(&'static str, String)> = text
            .into_iter()
            .filter_map(|(name, value)| {
                let value = value?.trim();
                (!value.is_empty()).then(|| (name, value.to_string()))
            })
            .collect();

        if let Some(organization) = self.organization {
            pairs.push(("organization", organization.to_string()));
        }
        if let Some(date) = self.start_date {
            pairs.push(("start_date", date.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}
