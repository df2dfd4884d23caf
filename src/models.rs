use serde::{Deserialize, Deserializer, Serialize};

// ============ Lookup Result ============

/// Decoded payload of a successful lookup.
///
/// Field names follow the upstream JSON. Missing fields and explicit `null`s
/// both decode to the zero value of the field's type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupResult {
    /// Card number format.
    #[serde(deserialize_with = "null_as_default")]
    pub number: CardNumber,
    /// Card network, e.g. "visa" or "mastercard".
    #[serde(deserialize_with = "null_as_default")]
    pub scheme: String,
    /// "debit" or "credit".
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub card_type: String,
    /// Product brand, e.g. "Traditional".
    #[serde(deserialize_with = "null_as_default")]
    pub brand: String,
    /// Whether the card is prepaid.
    #[serde(deserialize_with = "null_as_default")]
    pub prepaid: bool,
    /// Country of issue.
    #[serde(deserialize_with = "null_as_default")]
    pub country: Country,
    /// Issuing bank.
    #[serde(deserialize_with = "null_as_default")]
    pub bank: Bank,
}

/// The `number` object of a lookup result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardNumber {
    /// Digit count of a full card number, 0 when unknown.
    #[serde(deserialize_with = "null_as_default")]
    pub length: u32,
    /// Whether numbers in this range pass the Luhn checksum.
    #[serde(deserialize_with = "null_as_default")]
    pub luhn: bool,
}

/// The `country` object of a lookup result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    /// ISO 3166-1 numeric code, e.g. "208".
    #[serde(deserialize_with = "null_as_default")]
    pub numeric: String,
    /// ISO 3166-1 alpha-2 code, e.g. "DK".
    #[serde(deserialize_with = "null_as_default")]
    pub alpha2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Flag emoji.
    #[serde(deserialize_with = "null_as_default")]
    pub emoji: String,
    /// ISO 4217 currency code, e.g. "DKK".
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub longitude: f64,
}

/// The `bank` object of a lookup result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bank {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_full_payload() {
        let payload = json!({
            "number": { "length": 16, "luhn": true },
            "scheme": "mastercard",
            "type": "debit",
            "brand": "Debit Mastercard",
            "prepaid": false,
            "country": {
                "numeric": "208",
                "alpha2": "DK",
                "name": "Denmark",
                "emoji": "🇩🇰",
                "currency": "DKK",
                "latitude": 56,
                "longitude": 10
            },
            "bank": {
                "name": "Jyske Bank",
                "url": "www.jyskebank.dk",
                "phone": "+4589893300",
                "city": "Hjørring"
            }
        });

        let result: LookupResult = serde_json::from_value(payload).unwrap();
        assert_eq!(result.number, CardNumber { length: 16, luhn: true });
        assert_eq!(result.scheme, "mastercard");
        assert_eq!(result.card_type, "debit");
        assert_eq!(result.brand, "Debit Mastercard");
        assert!(!result.prepaid);
        assert_eq!(result.country.alpha2, "DK");
        assert_eq!(result.country.latitude, 56.0);
        assert_eq!(result.country.longitude, 10.0);
        assert_eq!(result.bank.city, "Hjørring");
    }

    #[test]
    fn test_missing_and_null_fields_decode_to_zero_values() {
        let payload = json!({
            "number": null,
            "scheme": "visa",
            "type": null,
            "country": { "alpha2": "US", "latitude": null },
            "unknown_field": 42
        });

        let result: LookupResult = serde_json::from_value(payload).unwrap();
        assert_eq!(result.number, CardNumber::default());
        assert_eq!(result.scheme, "visa");
        assert_eq!(result.card_type, "");
        assert_eq!(result.brand, "");
        assert!(!result.prepaid);
        assert_eq!(result.country.alpha2, "US");
        assert_eq!(result.country.latitude, 0.0);
        assert_eq!(result.bank, Bank::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        let result: LookupResult = serde_json::from_str("{}").unwrap();
        assert_eq!(result, LookupResult::default());
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let err = serde_json::from_value::<LookupResult>(json!({ "prepaid": "yes" }));
        assert!(err.is_err());
    }

    #[test]
    fn test_serializes_card_type_under_wire_name() {
        let result = LookupResult {
            card_type: "credit".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "credit");
        assert!(value.get("card_type").is_none());
    }
}
