use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PennsieveError;

// Discover file URIs point into versioned dataset storage, e.g.
// s3://<bucket>/<datasetId>/<version>/<path...>. Splitting on '/' yields
// five leading pieces of storage layout (scheme, empty, bucket, dataset,
// version); everything after them is the path inside the dataset.
const URI_PREFIX_SEGMENTS: usize = 5;

/// Derives the in-dataset relative path from a Discover file `uri`.
///
/// A URI too short to carry anything past the storage prefix is a contract
/// violation and fails with [`PennsieveError::MalformedUri`].
pub fn file_path_from_uri(uri: &str) -> Result<String, PennsieveError> {
    let segments: Vec<&str> = uri.split('/').collect();
    if segments.len() <= URI_PREFIX_SEGMENTS {
        return Err(PennsieveError::MalformedUri(uri.to_string()));
    }
    Ok(segments[URI_PREFIX_SEGMENTS..].join("/"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub dataset_id: u64,
    #[serde(alias = "version")]
    pub dataset_version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl FileDescriptor {
    pub fn from_value(value: &Value) -> Result<Self, PennsieveError> {
        serde_json::from_value(value.clone())
            .map_err(|err| PennsieveError::DiscoverResponse(err.to_string()))
    }

    pub fn dataset(&self) -> (u64, u32) {
        (self.dataset_id, self.dataset_version)
    }

    // Path transmitted to the packaging service: derived from the uri when
    // present, otherwise the relative path field as-is.
    pub fn transfer_path(&self) -> Result<String, PennsieveError> {
        if let Some(uri) = &self.uri {
            return file_path_from_uri(uri);
        }
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Err(PennsieveError::MalformedUri(format!(
                "file {} carries neither uri nor path",
                self.name
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    Name,
    Date,
    Size,
    Relevance,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBy::Name => write!(f, "name"),
            OrderBy::Date => write!(f, "date"),
            OrderBy::Size => write!(f, "size"),
            OrderBy::Relevance => write!(f, "relevance"),
        }
    }
}

impl FromStr for OrderBy {
    type Err = PennsieveError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "name" => Ok(OrderBy::Name),
            "date" => Ok(OrderBy::Date),
            "size" => Ok(OrderBy::Size),
            "relevance" => Ok(OrderBy::Relevance),
            _ => Err(PennsieveError::InvalidOrderBy(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "asc"),
            OrderDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for OrderDirection {
    type Err = PennsieveError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            _ => Err(PennsieveError::InvalidOrderDirection(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn uri_prefix_stripped() {
        let path = file_path_from_uri("s3://bucket/123/4/sub/path/file.csv").unwrap();
        assert_eq!(path, "sub/path/file.csv");
    }

    #[test]
    fn uri_without_remainder_rejected() {
        let err = file_path_from_uri("s3://bucket/123/4").unwrap_err();
        assert_matches!(err, PennsieveError::MalformedUri(_));
    }

    #[test]
    fn parse_order_by() {
        let order: OrderBy = "Date".parse().unwrap();
        assert_eq!(order, OrderBy::Date);
        let err = "published".parse::<OrderBy>().unwrap_err();
        assert_matches!(err, PennsieveError::InvalidOrderBy(_));
    }
}
