//! Typed resource requests parsed from URL query parameters.
//!
//! Parsing is strict about structure (JSON filters must decode, required fields must be
//! present) and lenient about absence: an optional parameter that is missing or empty
//! simply means "no filter".

use super::constants;
use super::error::ResourceError;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Raw query parameters: each key maps to every value it was given
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw `a=1&b=2` query string (percent-decoding included)
    pub fn from_query_string(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Builder-style insert, handy for tests and embedding callers
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// First non-blank value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Like [`QueryParams::get`] but a missing value is a malformed request
    pub fn require(&self, key: &str) -> Result<&str, ResourceError> {
        self.get(key)
            .ok_or_else(|| ResourceError::malformed(format!("{} is required", key)))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Base request: every regional lookup needs a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub region: String,
}

impl ResourceRequest {
    pub fn from_params(params: &QueryParams) -> Result<Self, ResourceError> {
        Ok(Self {
            region: params.require("region")?.to_string(),
        })
    }
}

/// One CloudWatch dimension constraint; `value: None` matches any value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionFilter {
    pub name: String,
    pub value: Option<String>,
}

impl DimensionFilter {
    pub fn presence(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

/// Strategy a dimension-keys request resolves with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionKeysRequestType {
    /// Built-in namespace, no filters: answered from the static catalogue
    Standard,
    /// Built-in namespace with dimension filters: live ListMetrics
    Filter,
    /// Namespace not in the catalogue: live ListMetrics
    CustomMetric,
}

#[derive(Debug, Clone)]
pub struct DimensionKeysRequest {
    pub resource: ResourceRequest,
    pub namespace: String,
    pub metric_name: Option<String>,
    pub dimension_filter: Vec<DimensionFilter>,
}

impl DimensionKeysRequest {
    pub fn from_params(params: &QueryParams) -> Result<Self, ResourceError> {
        let resource = ResourceRequest::from_params(params)?;
        let dimension_filter = parse_dimension_filter(params.get("dimensionFilters"))?;

        Ok(Self {
            resource,
            namespace: params.get("namespace").unwrap_or_default().to_string(),
            metric_name: params.get("metricName").map(str::to_string),
            dimension_filter,
        })
    }

    /// Classify from the current field values; recomputed on every call
    pub fn request_type(&self) -> DimensionKeysRequestType {
        if !constants::is_known_namespace(&self.namespace) {
            return DimensionKeysRequestType::CustomMetric;
        }

        if !self.dimension_filter.is_empty() {
            return DimensionKeysRequestType::Filter;
        }

        DimensionKeysRequestType::Standard
    }
}

#[derive(Debug, Clone)]
pub struct DimensionValuesRequest {
    pub keys: DimensionKeysRequest,
    pub dimension_key: String,
}

impl DimensionValuesRequest {
    pub fn from_params(params: &QueryParams) -> Result<Self, ResourceError> {
        let keys = DimensionKeysRequest::from_params(params)?;
        let dimension_key = params.require("dimensionKey")?.to_string();
        Ok(Self {
            keys,
            dimension_key,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FilterValues {
    One(String),
    Many(Vec<String>),
}

/// Decode a JSON object of `name -> [values]` into an ordered map
///
/// A bare string counts as a one-element list and `null` as an empty list. An absent or
/// blank input is an empty map.
pub fn parse_filter_map(
    raw: Option<&str>,
    what: &str,
) -> Result<BTreeMap<String, Vec<String>>, ResourceError> {
    let Some(raw) = raw else {
        return Ok(BTreeMap::new());
    };

    let decoded: BTreeMap<String, Option<FilterValues>> = serde_json::from_str(raw)
        .map_err(|e| ResourceError::malformed(format!("unable to parse {}: {}", what, e)))?;

    Ok(decoded
        .into_iter()
        .map(|(name, values)| {
            let values = match values {
                None => Vec::new(),
                Some(FilterValues::One(value)) => vec![value],
                Some(FilterValues::Many(values)) => values,
            };
            (name, values)
        })
        .collect())
}

/// Parse the `dimensionFilters` parameter
///
/// An empty value list yields a single presence-only filter for that dimension.
pub fn parse_dimension_filter(raw: Option<&str>) -> Result<Vec<DimensionFilter>, ResourceError> {
    let mut filters = Vec::new();
    for (name, values) in parse_filter_map(raw, "dimension filters")? {
        if values.is_empty() {
            filters.push(DimensionFilter::presence(name));
            continue;
        }
        for value in values {
            filters.push(DimensionFilter::equals(name.clone(), value));
        }
    }
    Ok(filters)
}

/// Split a multi-select template value such as `{i-1, i-2}` into its parts
///
/// Only a braced value is split; anything else is one element.
pub fn parse_multi_select_value(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    let Some(inner) = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return if trimmed.is_empty() {
            Vec::new()
        } else {
            vec![trimmed.to_string()]
        };
    };

    inner
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys_request(namespace: &str, filters: Vec<DimensionFilter>) -> DimensionKeysRequest {
        DimensionKeysRequest {
            resource: ResourceRequest {
                region: "us-east-1".to_string(),
            },
            namespace: namespace.to_string(),
            metric_name: None,
            dimension_filter: filters,
        }
    }

    #[test]
    fn test_request_type_classification() {
        assert_eq!(
            keys_request("custom", vec![]).request_type(),
            DimensionKeysRequestType::CustomMetric
        );
        assert_eq!(
            keys_request("custom", vec![DimensionFilter::presence("InstanceId")]).request_type(),
            DimensionKeysRequestType::CustomMetric
        );
        assert_eq!(
            keys_request("AWS/EC2", vec![DimensionFilter::presence("InstanceId")])
                .request_type(),
            DimensionKeysRequestType::Filter
        );
        assert_eq!(
            keys_request("AWS/EC2", vec![]).request_type(),
            DimensionKeysRequestType::Standard
        );
    }

    #[test]
    fn test_request_type_follows_filter_changes() {
        let mut request = keys_request("AWS/EC2", vec![]);
        assert_eq!(request.request_type(), DimensionKeysRequestType::Standard);

        request
            .dimension_filter
            .push(DimensionFilter::equals("InstanceId", "i-1"));
        assert_eq!(request.request_type(), DimensionKeysRequestType::Filter);

        request.namespace = "MyApp".to_string();
        assert_eq!(request.request_type(), DimensionKeysRequestType::CustomMetric);
    }

    #[test]
    fn test_parse_dimension_filter() {
        let filters = parse_dimension_filter(Some(
            r#"{"InstanceType": ["t3.micro", "m5.large"], "AutoScalingGroupName": [], "InstanceId": "i-1"}"#,
        ))
        .unwrap();

        assert_eq!(
            filters,
            vec![
                DimensionFilter::presence("AutoScalingGroupName"),
                DimensionFilter::equals("InstanceId", "i-1"),
                DimensionFilter::equals("InstanceType", "t3.micro"),
                DimensionFilter::equals("InstanceType", "m5.large"),
            ]
        );
    }

    #[test]
    fn test_parse_dimension_filter_absent_is_empty() {
        assert!(parse_dimension_filter(None).unwrap().is_empty());
        assert!(parse_dimension_filter(Some("{}")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_dimension_filter_rejects_bad_json() {
        let err = parse_dimension_filter(Some("{\"InstanceId\": [")).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("unable to parse dimension filters"));

        let err = parse_dimension_filter(Some("[\"InstanceId\"]")).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_region_is_required() {
        let params = QueryParams::new().with("namespace", "AWS/EC2");
        let err = DimensionKeysRequest::from_params(&params).unwrap_err();
        assert_eq!(err.to_string(), "malformed request: region is required");

        let params = QueryParams::new().with("region", "  ");
        assert!(ResourceRequest::from_params(&params).is_err());
    }

    #[test]
    fn test_dimension_values_require_key() {
        let params = QueryParams::new()
            .with("region", "us-east-1")
            .with("namespace", "AWS/EC2");
        let err = DimensionValuesRequest::from_params(&params).unwrap_err();
        assert_eq!(err.to_string(), "malformed request: dimensionKey is required");
    }

    #[test]
    fn test_query_string_decoding() {
        let params = QueryParams::from_query_string(
            "region=us-east-1&namespace=AWS%2FEC2&dimensionFilters=%7B%22InstanceId%22%3A%5B%5D%7D&region=eu-west-1",
        );
        assert_eq!(params.get("region"), Some("us-east-1"));
        assert_eq!(params.get("namespace"), Some("AWS/EC2"));
        assert_eq!(params.get("dimensionFilters"), Some(r#"{"InstanceId":[]}"#));
        assert_eq!(params.get("metricName"), None);
    }

    #[test]
    fn test_parse_multi_select_value() {
        assert_eq!(
            parse_multi_select_value("{i-1, i-2, i-3}"),
            vec!["i-1", "i-2", "i-3"]
        );
        assert_eq!(parse_multi_select_value(" i-1 "), vec!["i-1"]);
        assert_eq!(parse_multi_select_value("i-1,i-2"), vec!["i-1,i-2"]);
        assert_eq!(parse_multi_select_value("{i-1,i-2"), vec!["{i-1,i-2"]);
        assert!(parse_multi_select_value("{}").is_empty());
        assert!(parse_multi_select_value("").is_empty());
    }
}
