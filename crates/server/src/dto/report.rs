use serde::{Deserialize, Serialize};
use serde_json::Value;
use vigie::reports::NewReport;

/// Body of `POST /api/markers`. Fields are kept loose so that a wrong type
/// is answered with our own error payload.
#[derive(Debug, Default, Deserialize)]
pub struct CreateReportDto {
    pub lat: Option<Value>,
    pub lng: Option<Value>,
    #[serde(rename = "type")]
    pub category: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

impl CreateReportDto {
    pub fn parse(body: &[u8]) -> Result<Self, &'static str> {
        let value: Value = serde_json::from_slice(body).map_err(|_| "Body must be valid JSON")?;
        if !value.is_object() {
            return Err("Body must be a JSON object");
        }
        serde_json::from_value(value).map_err(|_| "Body must be a JSON object")
    }

    pub fn into_new_report(self) -> Result<NewReport, &'static str> {
        let lat = self.lat.as_ref().and_then(Value::as_f64);
        let lng = self.lng.as_ref().and_then(Value::as_f64);
        let (Some(lat), Some(lng)) = (lat, lng) else {
            return Err("Coordinates missing or invalid");
        };

        let report = NewReport::new(lat, lng);
        match self.category {
            None | Some(Value::Null) => Ok(report),
            Some(Value::String(category)) => Ok(report.with_category(category)),
            Some(_) => Err("Type must be a string"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<NewReport, &'static str> {
        CreateReportDto::parse(body.as_bytes())?.into_new_report()
    }

    #[test]
    fn accepts_numbers_and_type() {
        let report = parse(r#"{"lat": 45.7578, "lng": 4.832, "type": "controleur"}"#).unwrap();
        assert_eq!(report.lat, 45.7578);
        assert_eq!(report.lng, 4.832);
        assert_eq!(report.category.as_deref(), Some("controleur"));
    }

    #[test]
    fn integer_coordinates_are_numbers() {
        let report = parse(r#"{"lat": 45, "lng": 4}"#).unwrap();
        assert_eq!((report.lat, report.lng), (45.0, 4.0));
        assert_eq!(report.category, None);
    }

    #[test]
    fn rejects_missing_or_textual_coordinates() {
        assert!(parse(r#"{"lng": 4.832}"#).is_err());
        assert!(parse(r#"{"lat": "45.75", "lng": 4.832}"#).is_err());
        assert!(parse(r#"{"lat": null, "lng": 4.832}"#).is_err());
    }

    #[test]
    fn rejects_non_object_bodies() {
        assert!(parse("[45.75, 4.83]").is_err());
        assert!(parse("not json").is_err());
    }

    #[test]
    fn rejects_non_string_type() {
        assert!(parse(r#"{"lat": 45.75, "lng": 4.83, "type": 3}"#).is_err());
    }
}
