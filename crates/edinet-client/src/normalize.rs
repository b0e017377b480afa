//! Response normalization for the provider's drifting document shapes.
//!
//! Different deployments of the EDINET DB API nest list payloads under
//! different top-level keys and name per-item fields inconsistently. The
//! tables below hold every known variant in preference order; adding a
//! future synonym is a data change, not a code change.

use edinet_core::CompanySummary;
use serde_json::{Map, Value};

/// Envelope keys for company search/listing payloads, preferred first.
const SEARCH_LIST_KEYS: [&str; 2] = ["data", "companies"];

/// Envelope keys for financial time-series payloads, preferred first.
const SERIES_LIST_KEYS: [&str; 2] = ["data", "financials"];

/// Canonical envelope key for normalized time-series documents.
const SERIES_CANONICAL_KEY: &str = "financials";

/// Canonical summary field -> source keys, preferred first. The first key
/// holding a non-empty value wins; a field with no hit normalizes to the
/// empty string.
const SUMMARY_FIELD_SYNONYMS: [(&str, [&str; 2]); 4] = [
    ("edinet_code", ["edinet_code", "code"]),
    ("name", ["name", "company_name"]),
    ("securities_code", ["securities_code", "sec_code"]),
    ("industry", ["industry", "sector"]),
];

/// First present envelope key wins; a present-but-non-list value counts
/// as no payload.
fn list_payload<'a>(doc: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    keys.iter()
        .find_map(|key| doc.get(*key))
        .and_then(Value::as_array)
}

fn synonym_value(item: &Value, keys: &[&str]) -> String {
    for key in keys {
        if let Some(s) = item.get(*key).and_then(Value::as_str) {
            if !s.is_empty() {
                return s.to_string();
            }
        }
    }
    String::new()
}

fn summary_field(item: &Value, canonical: &str) -> String {
    SUMMARY_FIELD_SYNONYMS
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, keys)| synonym_value(item, keys))
        .unwrap_or_default()
}

/// Extract and normalize the company list from a search or listing
/// document.
///
/// An unrecognized envelope or non-list payload yields an empty list;
/// callers cannot distinguish that from a genuine zero-hit result, and
/// a degraded empty result is preferred over surfacing provider format
/// drift as noise.
pub fn company_list(doc: &Value) -> Vec<CompanySummary> {
    let Some(items) = list_payload(doc, &SEARCH_LIST_KEYS) else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| CompanySummary {
            edinet_code: summary_field(item, "edinet_code"),
            name: summary_field(item, "name"),
            securities_code: summary_field(item, "securities_code"),
            industry: summary_field(item, "industry"),
        })
        .collect()
}

/// Rewrite a financials document so the canonical `financials` key holds
/// the period list.
///
/// When the provider used the non-canonical envelope, the list moves to
/// the canonical key and every sibling top-level field is preserved
/// unchanged. A document that already carries the canonical key keeps its
/// other fields in place and the list is not duplicated. An unrecognized
/// or non-list payload becomes an empty period list.
pub fn time_series(doc: Value) -> Value {
    let list = list_payload(&doc, &SERIES_LIST_KEYS)
        .cloned()
        .unwrap_or_default();

    let mut fields = match doc {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if !fields.contains_key(SERIES_CANONICAL_KEY) {
        fields.remove("data");
    }
    fields.insert(SERIES_CANONICAL_KEY.to_string(), Value::Array(list));
    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item() -> Value {
        json!({
            "edinet_code": "E02367",
            "name": "Nintendo Co., Ltd.",
            "securities_code": "7974",
            "industry": "Machinery"
        })
    }

    #[test]
    fn test_company_list_same_result_for_either_envelope() {
        let under_data = json!({ "data": [item()] });
        let under_companies = json!({ "companies": [item()] });

        assert_eq!(company_list(&under_data), company_list(&under_companies));
        assert_eq!(company_list(&under_data).len(), 1);
        assert_eq!(company_list(&under_data)[0].edinet_code, "E02367");
    }

    #[test]
    fn test_company_list_prefers_first_envelope_key() {
        let doc = json!({
            "data": [item()],
            "companies": [{ "edinet_code": "E99999", "name": "Other" }]
        });

        let companies = company_list(&doc);
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].edinet_code, "E02367");
    }

    #[test]
    fn test_company_list_malformed_payload_is_empty() {
        assert!(company_list(&json!({})).is_empty());
        assert!(company_list(&json!({ "data": "not a list" })).is_empty());
        assert!(company_list(&json!({ "results": [item()] })).is_empty());
        assert!(company_list(&json!(null)).is_empty());
    }

    #[test]
    fn test_field_synonyms_fall_back() {
        let doc = json!({
            "data": [{
                "code": "E01825",
                "company_name": "Sample KK",
                "sec_code": "6758",
                "sector": "Electronics"
            }]
        });

        let companies = company_list(&doc);
        assert_eq!(
            companies[0],
            CompanySummary {
                edinet_code: "E01825".to_string(),
                name: "Sample KK".to_string(),
                securities_code: "6758".to_string(),
                industry: "Electronics".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_primary_key_falls_through_to_synonym() {
        let doc = json!({ "data": [{ "edinet_code": "", "code": "E00001" }] });
        assert_eq!(company_list(&doc)[0].edinet_code, "E00001");
    }

    #[test]
    fn test_missing_synonyms_normalize_to_empty_string() {
        let doc = json!({ "data": [{ "unrelated": 1 }] });
        let companies = company_list(&doc);
        assert_eq!(companies[0].edinet_code, "");
        assert_eq!(companies[0].name, "");
        assert_eq!(companies[0].securities_code, "");
        assert_eq!(companies[0].industry, "");
    }

    #[test]
    fn test_time_series_rewrites_noncanonical_envelope() {
        let doc = json!({
            "data": [{ "fiscal_period": "FY2023" }],
            "company_code": "E02367",
            "count": 1
        });

        let normalized = time_series(doc);
        assert!(normalized.get("data").is_none());
        assert_eq!(normalized["financials"][0]["fiscal_period"], "FY2023");
        // siblings survive the rewrite untouched
        assert_eq!(normalized["company_code"], "E02367");
        assert_eq!(normalized["count"], 1);
    }

    #[test]
    fn test_time_series_canonical_envelope_left_in_place() {
        let doc = json!({
            "financials": [{ "fiscal_period": "FY2022" }],
            "company_code": "E01825"
        });

        let normalized = time_series(doc);
        assert_eq!(normalized["financials"][0]["fiscal_period"], "FY2022");
        assert_eq!(normalized["company_code"], "E01825");
    }

    #[test]
    fn test_time_series_malformed_payload_becomes_empty_list() {
        let normalized = time_series(json!({ "data": "garbage" }));
        assert_eq!(normalized["financials"], json!([]));

        let normalized = time_series(json!({ "unrelated": true }));
        assert_eq!(normalized["financials"], json!([]));
        assert_eq!(normalized["unrelated"], true);

        let normalized = time_series(json!("not even an object"));
        assert_eq!(normalized["financials"], json!([]));
    }
}
