//! Wire types for the Gemini `:predict` imaging endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<Instance>,
    pub parameters: Parameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct Instance {
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub sample_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default)]
    pub bytes_base64_encoded: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_deserializes() {
        let body = r#"{
            "predictions": [{
                "bytesBase64Encoded": "aGVsbG8=",
                "mimeType": "image/png"
            }]
        }"#;

        let response: PredictResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.predictions[0].bytes_base64_encoded.as_deref(),
            Some("aGVsbG8=")
        );
    }

    #[test]
    fn empty_response_deserializes_to_no_predictions() {
        let response: PredictResponse = serde_json::from_str("{}").unwrap();
        assert!(response.predictions.is_empty());
    }
}
