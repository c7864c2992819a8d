//! Response models.
//!
//! [`IpInfo`] normalizes the service's JSON into typed fields while keeping
//! the untouched decoded body reachable, so fields this crate predates are
//! never lost. Absent fields are `None`, never placeholder values.

use serde::Serialize;
use serde_json::Value;

/// Normalized IP lookup result.
///
/// Typed accessors cover the documented response fields; anything else the
/// server returned is available through [`IpInfo::extra`] or the full
/// [`IpInfo::raw`] payload.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use ipc_artsnoa::IpInfo;
///
/// let info = IpInfo::from_value(json!({
///     "ip": "8.8.8.8",
///     "country": "US",
///     "asn": "AS15169",
/// }));
///
/// assert_eq!(info.ip, "8.8.8.8");
/// assert_eq!(info.country.as_deref(), Some("US"));
/// assert_eq!(info.city, None);
/// assert_eq!(info.extra("asn"), Some(&json!("AS15169")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpInfo {
    /// The queried IP address. Empty if the server omitted it.
    pub ip: String,

    /// Country code or name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Region or state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// IANA timezone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    /// Internet service provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,

    /// Latitude in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(skip)]
    raw: Value,
}

impl IpInfo {
    /// Builds an `IpInfo` from a decoded response body.
    ///
    /// Fields that are absent or of an unexpected type become `None`; the
    /// full body is retained untouched as the raw payload.
    pub fn from_value(value: Value) -> Self {
        Self {
            ip: str_field(&value, "ip").unwrap_or_default(),
            country: str_field(&value, "country"),
            region: str_field(&value, "region"),
            city: str_field(&value, "city"),
            timezone: str_field(&value, "timezone"),
            isp: str_field(&value, "isp"),
            latitude: num_field(&value, "latitude"),
            longitude: num_field(&value, "longitude"),
            raw: value,
        }
    }

    /// Converts the typed fields back to a JSON object.
    ///
    /// Only present fields appear in the output; absent fields are omitted
    /// rather than emitted as `null`.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Looks up a field by name in the preserved raw payload.
    ///
    /// Use this for response fields without a typed accessor.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// The untouched decoded response body.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Per-IP results of a batch lookup, in the order the IPs were requested.
///
/// Each entry pairs a queried IP with its lookup result; IPs the server
/// omitted (or answered with a non-object) map to `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResults {
    entries: Vec<(String, Option<IpInfo>)>,
}

impl BatchResults {
    /// Builds batch results by walking the queried IP list in order and
    /// looking each one up in the response body.
    pub(crate) fn from_response(ips: &[String], body: &Value) -> Self {
        let entries = ips
            .iter()
            .map(|ip| {
                let info = body
                    .get(ip)
                    .filter(|entry| entry.is_object())
                    .map(|entry| IpInfo::from_value(entry.clone()));
                (ip.clone(), info)
            })
            .collect();
        Self { entries }
    }

    /// Returns the result for a queried IP, if the server answered it.
    pub fn get(&self, ip: &str) -> Option<&IpInfo> {
        self.entries
            .iter()
            .find(|(queried, _)| queried == ip)
            .and_then(|(_, info)| info.as_ref())
    }

    /// Iterates entries in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&IpInfo>)> {
        self.entries
            .iter()
            .map(|(ip, info)| (ip.as_str(), info.as_ref()))
    }

    /// The number of queried IPs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no IPs were queried.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for BatchResults {
    type Item = (String, Option<IpInfo>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(str::to_owned)
}

fn num_field(value: &Value, key: &str) -> Option<f64> {
    value.get(key)?.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_fields_become_none() {
        let info = IpInfo::from_value(json!({"ip": "8.8.8.8"}));

        assert_eq!(info.ip, "8.8.8.8");
        assert_eq!(info.country, None);
        assert_eq!(info.latitude, None);
    }

    #[test]
    fn missing_ip_defaults_to_empty() {
        let info = IpInfo::from_value(json!({"country": "US"}));
        assert_eq!(info.ip, "");
        assert_eq!(info.country.as_deref(), Some("US"));
    }

    #[test]
    fn wrongly_typed_fields_degrade_to_none() {
        let info = IpInfo::from_value(json!({
            "ip": "8.8.8.8",
            "latitude": "not a number",
            "country": 42,
        }));

        assert_eq!(info.latitude, None);
        assert_eq!(info.country, None);
        // The raw payload still has the original values.
        assert_eq!(info.extra("latitude"), Some(&json!("not a number")));
    }

    #[test]
    fn round_trip_emits_only_present_fields() {
        let info = IpInfo::from_value(json!({"ip": "8.8.8.8", "country": "US"}));
        let value = info.to_value();

        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("ip"), Some(&json!("8.8.8.8")));
        assert_eq!(map.get("country"), Some(&json!("US")));
        assert!(!map.contains_key("city"));
    }

    #[test]
    fn raw_payload_keeps_unmapped_fields() {
        let body = json!({
            "ip": "1.1.1.1",
            "asn": "AS13335",
            "currency": {"code": "USD"},
        });
        let info = IpInfo::from_value(body.clone());

        assert_eq!(info.raw(), &body);
        assert_eq!(info.extra("asn"), Some(&json!("AS13335")));
        assert_eq!(info.extra("nonexistent"), None);
    }

    #[test]
    fn batch_preserves_request_order() {
        let ips = vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()];
        // Response keys deliberately reversed relative to the request.
        let body = json!({
            "1.1.1.1": {"ip": "1.1.1.1", "country": "AU"},
            "8.8.8.8": {"ip": "8.8.8.8", "country": "US"},
        });

        let results = BatchResults::from_response(&ips, &body);

        assert_eq!(results.len(), 2);
        let order: Vec<&str> = results.iter().map(|(ip, _)| ip).collect();
        assert_eq!(order, vec!["8.8.8.8", "1.1.1.1"]);
        assert_eq!(results.get("8.8.8.8").unwrap().country.as_deref(), Some("US"));
    }

    #[test]
    fn batch_marks_missing_and_malformed_entries_absent() {
        let ips = vec![
            "8.8.8.8".to_string(),
            "203.0.113.9".to_string(),
            "198.51.100.7".to_string(),
        ];
        let body = json!({
            "8.8.8.8": {"ip": "8.8.8.8"},
            "198.51.100.7": "unresolvable",
        });

        let results = BatchResults::from_response(&ips, &body);

        assert_eq!(results.len(), 3);
        assert!(results.get("8.8.8.8").is_some());
        assert!(results.get("203.0.113.9").is_none());
        assert!(results.get("198.51.100.7").is_none());
    }
}
