//! Reusable listing query
//!
//! Represents the first-page request of a Graph collection listing

use super::filters::Filter;
use crate::api::constants;

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub collection: String,
    pub filter: Option<Filter>,
    pub top: Option<u32>,
}

impl ListQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            filter: None,
            top: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// Generate the URL of the first page; later pages come from `@odata.nextLink`
    pub fn to_url(&self, graph_base: &str) -> String {
        let mut url = constants::collection_endpoint(graph_base, &self.collection);
        let mut params = Vec::new();

        if let Some(filter) = &self.filter {
            params.push(format!("$filter={}", urlencoding::encode(&filter.to_odata_string())));
        }

        if let Some(top) = self.top {
            params.push(format!("$top={}", top));
        }

        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }

        url
    }
}
