//! Query parameters for `GET /orders/list`.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Filters and pagination for listing orders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOrdersParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_reference_id: Option<String>,
}

impl ListOrdersParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Restrict to orders created within `[start, end]`
    pub fn date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    pub fn organization_id(mut self, id: impl Into<String>) -> Self {
        self.organization_id = Some(id.into());
        self
    }

    pub fn related_reference_id(mut self, id: impl Into<String>) -> Self {
        self.related_reference_id = Some(id.into());
        self
    }

    /// Query pairs to send. Page defaults apply; unset filters are left out.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let filters = [
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
            ("organization_id", &self.organization_id),
            ("related_reference_id", &self.related_reference_id),
        ];

        let mut query = vec![
            ("page".to_string(), self.page.unwrap_or(DEFAULT_PAGE).to_string()),
            (
                "per_page".to_string(),
                self.per_page.unwrap_or(DEFAULT_PER_PAGE).to_string(),
            ),
        ];
        query.extend(
            filters
                .into_iter()
                .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone()))),
        );
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(params: &ListOrdersParams) -> Vec<(String, String)> {
        params.to_query()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            pairs(&ListOrdersParams::new()),
            vec![
                ("page".to_string(), "1".to_string()),
                ("per_page".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_filters_only_when_set() {
        let params = ListOrdersParams::new()
            .page(3)
            .per_page(5)
            .organization_id("org-1");
        let query = pairs(&params);

        assert_eq!(query.len(), 3);
        assert!(query.contains(&("page".to_string(), "3".to_string())));
        assert!(query.contains(&("per_page".to_string(), "5".to_string())));
        assert!(query.contains(&("organization_id".to_string(), "org-1".to_string())));
        assert!(!query.iter().any(|(k, _)| k == "start_date"));
    }

    #[test]
    fn test_date_range() {
        let query = pairs(&ListOrdersParams::new().date_range("2024-01-01", "2024-01-31"));
        assert!(query.contains(&("start_date".to_string(), "2024-01-01".to_string())));
        assert!(query.contains(&("end_date".to_string(), "2024-01-31".to_string())));
    }
}
