use crate::domain::{OrderBy, OrderDirection};

#[derive(Debug, Clone)]
pub struct DatasetSearch {
    pub limit: u32,
    pub offset: u32,
    pub query: Option<String>,
    pub organization: Option<String>,
    pub organization_id: Option<u64>,
    pub tags: Vec<String>,
    pub embargo: Option<bool>,
    pub order_by: Option<OrderBy>,
    pub order_direction: Option<OrderDirection>,
}

impl Default for DatasetSearch {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            query: None,
            organization: None,
            organization_id: None,
            tags: Vec::new(),
            embargo: None,
            order_by: None,
            order_direction: None,
        }
    }
}

impl DatasetSearch {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = paging_pairs(self.limit, self.offset);
        push_text(&mut pairs, "query", self.query.as_deref());
        push_text(&mut pairs, "organization", self.organization.as_deref());
        if let Some(id) = self.organization_id {
            pairs.push(("organizationId".to_string(), id.to_string()));
        }
        for tag in &self.tags {
            pairs.push(("tags".to_string(), tag.clone()));
        }
        if let Some(embargo) = self.embargo {
            pairs.push(("embargo".to_string(), embargo.to_string()));
        }
        if let Some(order_by) = self.order_by {
            pairs.push(("orderBy".to_string(), order_by.to_string()));
        }
        if let Some(direction) = self.order_direction {
            pairs.push(("orderDirection".to_string(), direction.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct FileSearch {
    pub limit: u32,
    pub offset: u32,
    pub file_type: Option<String>,
    pub query: Option<String>,
    pub organization: Option<String>,
    pub organization_id: Option<u64>,
    pub dataset_id: Option<u64>,
}

impl Default for FileSearch {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            file_type: None,
            query: None,
            organization: None,
            organization_id: None,
            dataset_id: None,
        }
    }
}

impl FileSearch {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = paging_pairs(self.limit, self.offset);
        push_text(&mut pairs, "fileType", self.file_type.as_deref());
        push_text(&mut pairs, "query", self.query.as_deref());
        push_text(&mut pairs, "organization", self.organization.as_deref());
        if let Some(id) = self.organization_id {
            pairs.push(("organizationId".to_string(), id.to_string()));
        }
        if let Some(id) = self.dataset_id {
            pairs.push(("datasetId".to_string(), id.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone)]
pub struct RecordSearch {
    pub limit: u32,
    pub offset: u32,
    pub model: Option<String>,
    pub organization: Option<String>,
    pub dataset_id: Option<u64>,
}

impl Default for RecordSearch {
    fn default() -> Self {
        Self {
            limit: 10,
            offset: 0,
            model: None,
            organization: None,
            dataset_id: None,
        }
    }
}

impl RecordSearch {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = paging_pairs(self.limit, self.offset);
        push_text(&mut pairs, "model", self.model.as_deref());
        push_text(&mut pairs, "organization", self.organization.as_deref());
        if let Some(id) = self.dataset_id {
            pairs.push(("datasetId".to_string(), id.to_string()));
        }
        pairs
    }
}

// limit/offset are always transmitted; absent filters never are.
fn paging_pairs(limit: u32, offset: u32) -> Vec<(String, String)> {
    vec![
        ("limit".to_string(), limit.to_string()),
        ("offset".to_string(), offset.to_string()),
    ]
}

fn push_text(pairs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_filters_are_omitted() {
        let pairs = DatasetSearch::default().query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("offset".to_string(), "0".to_string()),
            ]
        );
    }

    #[test]
    fn tags_repeat_their_key() {
        let search = DatasetSearch {
            tags: vec!["mri".to_string(), "heart".to_string()],
            ..Default::default()
        };
        let pairs = search.query_pairs();
        let tags: Vec<&str> = pairs
            .iter()
            .filter(|(key, _)| key == "tags")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(tags, vec!["mri", "heart"]);
    }
}
