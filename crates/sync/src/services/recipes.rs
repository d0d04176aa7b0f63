//! Recipe generation client (Gemini `generateContent`).
//!
//! The one external call whose failure is terminal for the attempt: there
//! is no automatic retry, the customer's prior recipe state is left
//! untouched, and recovery is the user resubmitting the form.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use portion_perfect_core::{RecipeRequest, RecipeResponse};

use crate::config::SyncConfig;

/// Gemini API base URL.
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Product rules the generator must follow, enforced via system instruction.
const SYSTEM_INSTRUCTION: &str = "\
You are PortionPerfect Customer AI. Generate recipes for home cooks with surgical precision.
Rules:
1. SIMPLE ONLY: Minimum essential ingredients; medium complexity is fine but never elaborate.
2. INDIAN TERMS: Hing, Ghee, Ajwain, Methi, Coriander, Brinjal, Besan, Lady Finger, Curd.
3. SCALING: Scale for the requested people count exactly.
4. UNITS: Recipe uses tbsp/cups. Shopping list uses precise grams/kg.
5. SHOP CATEGORIES: VegetableShop (fresh) vs GroceryShop (packaged).
6. Round any shopping list quantity under 100g up to 100g; shops do not stock 5g or 10g amounts.";

/// Errors that can occur when generating a recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, for the logs.
        message: String,
    },

    /// The response carried no generated text.
    #[error("empty response from generator")]
    Empty,

    /// The generated text was not a valid recipe payload.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Client for the external recipe generator.
#[derive(Clone)]
pub struct RecipeClient {
    client: reqwest::Client,
    model: String,
    api_key: SecretString,
}

impl RecipeClient {
    /// Create a new recipe generation client.
    #[must_use]
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        }
    }

    /// Generate a recipe and its categorized shopping list.
    ///
    /// # Errors
    ///
    /// Returns `RecipeError` on any transport, API, or parse problem. The
    /// caller surfaces a dismissible error and waits for resubmission.
    pub async fn generate(&self, request: &RecipeRequest) -> Result<RecipeResponse, RecipeError> {
        let url = format!(
            "{BASE_URL}/{}:generateContent?key={}",
            self.model,
            self.api_key.expose_secret()
        );

        let body = json!({
            "systemInstruction": {
                "parts": [{"text": SYSTEM_INSTRUCTION}]
            },
            "contents": [{
                "parts": [{"text": build_prompt(request)}]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "temperature": 0.1
            }
        });

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RecipeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or(RecipeError::Empty)?;

        Ok(serde_json::from_str(&text)?)
    }
}

fn build_prompt(request: &RecipeRequest) -> String {
    let mut prompt = format!(
        "Generate a recipe for {} serving {}.",
        request.dish_name, request.people_count
    );
    if !request.restrictions.is_empty() {
        prompt.push_str(" Dietary restrictions: ");
        prompt.push_str(&request.restrictions);
    }
    prompt
}
