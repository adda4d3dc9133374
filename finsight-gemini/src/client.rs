use std::fmt::{self, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use tracing::{Span, instrument};
use url::Url;

use crate::error::{
    ConstructUrlSnafu, DecodeResponseSnafu, Error, InvalidApiKeySnafu, MissingApiKeySnafu,
    PerformRequestSnafu,
};
use crate::types::{GenerateContentRequest, GenerationResponse};

static DEFAULT_BASE_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("unreachable error: failed to parse default base URL")
});

/// Gemini model catalog: the ladder of text models finsight targets, newest
/// first. Anything else goes through [`ModelId::Custom`] verbatim.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    /// The default for analysis work.
    #[default]
    #[serde(rename = "models/gemini-2.5-pro")]
    Gemini25Pro,
    #[serde(rename = "models/gemini-1.5-pro")]
    Gemini15Pro,
    #[serde(rename = "models/gemini-1.0-pro")]
    Gemini10Pro,
    #[serde(rename = "models/gemini-pro")]
    GeminiPro,
    #[serde(untagged)]
    Custom(String),
}

impl ModelId {
    /// The API model path (e.g. "models/gemini-2.5-pro").
    pub fn as_str(&self) -> &str {
        match self {
            ModelId::Gemini25Pro => "models/gemini-2.5-pro",
            ModelId::Gemini15Pro => "models/gemini-1.5-pro",
            ModelId::Gemini10Pro => "models/gemini-1.0-pro",
            ModelId::GeminiPro => "models/gemini-pro",
            ModelId::Custom(model) => model,
        }
    }

    /// Human-readable name used in reports (e.g. "Gemini 2.5 Pro").
    pub fn display_name(&self) -> String {
        match self {
            ModelId::Gemini25Pro => "Gemini 2.5 Pro".to_string(),
            ModelId::Gemini15Pro => "Gemini 1.5 Pro".to_string(),
            ModelId::Gemini10Pro => "Gemini 1.0 Pro".to_string(),
            ModelId::GeminiPro => "Gemini Pro".to_string(),
            ModelId::Custom(model) => {
                model.strip_prefix("models/").unwrap_or(model).to_string()
            }
        }
    }
}

impl From<String> for ModelId {
    fn from(model: String) -> Self {
        // Accept bare ids ("gemini-2.5-pro") as well as full API paths.
        let canonical = if model.contains('/') { model } else { format!("models/{model}") };
        match canonical.as_str() {
            "models/gemini-2.5-pro" => ModelId::Gemini25Pro,
            "models/gemini-1.5-pro" => ModelId::Gemini15Pro,
            "models/gemini-1.0-pro" => ModelId::Gemini10Pro,
            "models/gemini-pro" => ModelId::GeminiPro,
            _ => ModelId::Custom(canonical),
        }
    }
}

impl FromStr for ModelId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ModelId::from(s.to_string()))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed client for the Gemini `generateContent` endpoint.
///
/// Stateless and cheaply cloneable; the underlying `reqwest::Client` pools
/// connections across clones.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: Client,
    base_url: Url,
    model: ModelId,
}

impl GeminiClient {
    /// Client with the default base URL and model.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        GeminiBuilder::new(api_key).build()
    }

    /// Builder for a custom model, base URL or HTTP client.
    pub fn builder(api_key: impl Into<String>) -> GeminiBuilder {
        GeminiBuilder::new(api_key)
    }

    /// The model this client targets.
    pub fn model(&self) -> &ModelId {
        &self.model
    }

    /// Single-turn generation call.
    #[instrument(skip_all, fields(
        model = %self.model,
        usage.prompt_tokens,
        usage.candidates_tokens,
        usage.total_tokens,
    ), err)]
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerationResponse, Error> {
        let url = self.build_url("generateContent")?;
        let response: GenerationResponse = self.post_json(url, request).await?;

        if let Some(usage) = &response.usage_metadata {
            Span::current()
                .record("usage.prompt_tokens", usage.prompt_token_count)
                .record("usage.candidates_tokens", usage.candidates_token_count)
                .record("usage.total_tokens", usage.total_token_count);
        }

        Ok(response)
    }

    /// Convenience wrapper: send `prompt` as a single user turn.
    pub async fn generate_text(&self, prompt: &str) -> Result<GenerationResponse, Error> {
        self.generate_content(&GenerateContentRequest::from_prompt(prompt)).await
    }

    /// Check the response status code and return an error if it is not successful
    #[instrument(skip_all, err)]
    async fn check_response(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if !status.is_success() {
            let description = response.text().await.ok();
            crate::error::BadResponseSnafu { code: status.as_u16(), description }.fail()
        } else {
            Ok(response)
        }
    }

    /// Perform a POST request with a JSON body and deserialize the JSON response.
    async fn post_json<Req, Res>(&self, url: Url, body: &Req) -> Result<Res, Error>
    where
        Req: Serialize,
        Res: for<'de> Deserialize<'de>,
    {
        let response = self
            .http_client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .context(PerformRequestSnafu { url })?;
        let response = Self::check_response(response).await?;
        response.json().await.context(DecodeResponseSnafu)
    }

    /// Build the endpoint URL for the configured model.
    fn build_url(&self, endpoint: &str) -> Result<Url, Error> {
        let suffix = format!("{}:{endpoint}", self.model.as_str());
        self.base_url.join(&suffix).context(ConstructUrlSnafu { suffix: suffix.clone() })
    }
}

/// A builder for [`GeminiClient`].
///
/// ```no_run
/// use finsight_gemini::{GeminiClient, ModelId};
///
/// # fn run() -> Result<(), finsight_gemini::Error> {
/// let client = GeminiClient::builder("YOUR_API_KEY")
///     .with_model(ModelId::Gemini25Pro)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiBuilder {
    model: ModelId,
    client_builder: ClientBuilder,
    base_url: Url,
    api_key: String,
}

impl GeminiBuilder {
    /// Creates a new `GeminiBuilder` with the given API key.
    pub fn new<K: Into<String>>(key: K) -> Self {
        Self {
            model: ModelId::default(),
            client_builder: ClientBuilder::default(),
            base_url: DEFAULT_BASE_URL.clone(),
            api_key: key.into(),
        }
    }

    /// Sets the model for the client.
    #[must_use]
    pub fn with_model<M: Into<ModelId>>(mut self, model: M) -> Self {
        self.model = model.into();
        self
    }

    /// Sets a custom `reqwest::ClientBuilder` (proxies, timeouts).
    #[must_use]
    pub fn with_http_client(mut self, client_builder: ClientBuilder) -> Self {
        self.client_builder = client_builder;
        self
    }

    /// Sets a custom base URL for the API.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Builds the `GeminiClient`.
    pub fn build(self) -> Result<GeminiClient, Error> {
        if self.api_key.is_empty() {
            return MissingApiKeySnafu.fail();
        }

        let headers = HeaderMap::from_iter([(
            HeaderName::from_static("x-goog-api-key"),
            HeaderValue::from_str(self.api_key.as_str()).context(InvalidApiKeySnafu)?,
        )]);

        let http_client = self
            .client_builder
            .default_headers(headers)
            .build()
            .expect("all parameters must be valid");

        Ok(GeminiClient { http_client, base_url: self.base_url, model: self.model })
    }
}
