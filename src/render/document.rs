//! Outer renderer: dispatch on model kind, serialize, normalize.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ApiProblem, HalCollection, HalResource};
use crate::error::HalError;
use crate::render::hal_links::{CollectionRender, LinkRenderer};
use crate::render::serializer::{DocumentSerializer, JsonSerializer};
use crate::utils::slashes::unescape_slashes;

pub const HAL_JSON: &str = "application/hal+json";
pub const PROBLEM_JSON: &str = "application/problem+json";
pub const PLAIN_JSON: &str = "application/json";

/// Body used when even the error document cannot be serialized.
const FALLBACK_ERROR_BODY: &str = r#"{"type":"about:blank","title":"Internal Server Error","status":500,"detail":"Failed to render response"}"#;

/// Everything a [`DocumentRenderer`] can render.
#[derive(Debug, Clone)]
pub enum RenderModel {
    Problem(ApiProblem),
    Resource(HalResource),
    Collection(HalCollection),
    /// Non-HAL data, serialized as-is.
    Raw(Value),
}

impl From<ApiProblem> for RenderModel {
    fn from(problem: ApiProblem) -> Self {
        Self::Problem(problem)
    }
}

impl From<HalResource> for RenderModel {
    fn from(resource: HalResource) -> Self {
        Self::Resource(resource)
    }
}

impl From<HalCollection> for RenderModel {
    fn from(collection: HalCollection) -> Self {
        Self::Collection(collection)
    }
}

impl From<Value> for RenderModel {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

/// Output of one render call.
///
/// Carries the problem that produced the body, if any, so callers can inspect
/// it without the renderer keeping per-request state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    body: String,
    status: u16,
    content_type: &'static str,
    api_problem: Option<ApiProblem>,
}

impl RenderedDocument {
    fn fallback_error() -> Self {
        Self {
            body: FALLBACK_ERROR_BODY.to_string(),
            status: 500,
            content_type: PROBLEM_JSON,
            api_problem: None,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn is_api_problem(&self) -> bool {
        self.api_problem.is_some()
    }

    pub fn api_problem(&self) -> Option<&ApiProblem> {
        self.api_problem.as_ref()
    }
}

/// Renders a [`RenderModel`] into a finished document.
///
/// Immutable after construction and safe to share across requests.
#[derive(Clone)]
pub struct DocumentRenderer {
    links: LinkRenderer,
    serializer: Arc<dyn DocumentSerializer>,
    display_exceptions: bool,
}

impl DocumentRenderer {
    pub fn new(links: LinkRenderer) -> Self {
        Self {
            links,
            serializer: Arc::new(JsonSerializer::default()),
            display_exceptions: false,
        }
    }

    pub fn with_serializer(mut self, serializer: impl DocumentSerializer + 'static) -> Self {
        self.serializer = Arc::new(serializer);
        self
    }

    /// Include problem traces in rendered problem documents.
    pub fn display_exceptions(mut self, display: bool) -> Self {
        self.display_exceptions = display;
        self
    }

    pub fn link_renderer(&self) -> &LinkRenderer {
        &self.links
    }

    /// Renders a model.
    ///
    /// Collections whose page is out of range are rendered as their problem.
    ///
    /// # Errors
    ///
    /// Propagates every [`HalError`] of the link renderer and the serializer.
    pub fn render(&self, model: &RenderModel) -> Result<RenderedDocument, HalError> {
        match model {
            RenderModel::Raw(value) => self.finish(value, 200, PLAIN_JSON, None),
            RenderModel::Problem(problem) => self.render_api_problem(problem),
            RenderModel::Resource(resource) => {
                let doc = self.links.render_resource(resource)?;
                self.finish(&Value::Object(doc), 200, HAL_JSON, None)
            }
            RenderModel::Collection(collection) => {
                match self.links.render_collection(collection)? {
                    CollectionRender::Document(doc) => {
                        self.finish(&Value::Object(doc), 200, HAL_JSON, None)
                    }
                    CollectionRender::Problem(problem) => self.render_api_problem(&problem),
                }
            }
        }
    }

    /// Renders a problem document with the problem's status.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::Serialization`] if the payload cannot be encoded.
    pub fn render_api_problem(&self, problem: &ApiProblem) -> Result<RenderedDocument, HalError> {
        let payload = Value::Object(problem.to_payload(self.display_exceptions));
        self.finish(
            &payload,
            problem.status(),
            PROBLEM_JSON,
            Some(problem.clone()),
        )
    }

    /// Converts an engine error into a 500 problem document.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::Serialization`] if the payload cannot be encoded.
    pub fn render_error(&self, error: &HalError) -> Result<RenderedDocument, HalError> {
        tracing::warn!(error = %error, "Converting rendering error to API problem");
        self.render_api_problem(&ApiProblem::from_error(500, error))
    }

    /// [`DocumentRenderer::render`], with every error turned into a problem document.
    pub fn render_or_problem(&self, model: &RenderModel) -> RenderedDocument {
        self.render(model)
            .or_else(|err| self.render_error(&err))
            .unwrap_or_else(|err| {
                tracing::error!(error = %err, "Failed to render error document");
                RenderedDocument::fallback_error()
            })
    }

    fn finish(
        &self,
        value: &Value,
        status: u16,
        content_type: &'static str,
        api_problem: Option<ApiProblem>,
    ) -> Result<RenderedDocument, HalError> {
        let text = self.serializer.serialize(value)?;
        let body = unescape_slashes(&text).into_owned();

        tracing::debug!(status, content_type, bytes = body.len(), "Rendered document");

        Ok(RenderedDocument {
            body,
            status,
            content_type,
            api_problem,
        })
    }
}
