//! Hypermedia link value object and its builder.
//!
//! A [`Link`] targets either a literal URL or a named route, never both. The
//! choice is made on the [`LinkBuilder`] by whichever of [`LinkBuilder::url`]
//! or [`LinkBuilder::route`] is called first; the other one is then rejected.
//! [`LinkBuilder::build`] refuses to produce a link without a target, so every
//! `Link` in existence is complete.

use crate::error::HalError;
use crate::routing::{RouteOptions, RouteParams};
use crate::utils::uri::validate_uri;

/// Named route reference resolved by a [`crate::routing::UrlBuilder`] at render time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteSpec {
    pub name: String,
    pub params: RouteParams,
    pub options: RouteOptions,
}

impl RouteSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: RouteParams::new(),
            options: RouteOptions::default(),
        }
    }
}

/// What a link points at.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    Url(String),
    Route(RouteSpec),
}

/// A single hypermedia relation of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    relation: String,
    target: LinkTarget,
    templated: Option<bool>,
    title: Option<String>,
    hreflang: Option<String>,
    name: Option<String>,
    media_type: Option<String>,
    deprecation: Option<String>,
    profile: Option<String>,
}

impl Link {
    /// Shorthand for a URL-based link.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`] if the relation is empty or the URL is malformed.
    pub fn from_url(relation: impl Into<String>, url: impl Into<String>) -> Result<Self, HalError> {
        LinkBuilder::new(relation)?.url(url)?.build()
    }

    /// Shorthand for a route-based link with default route options.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`] if the relation or route name is empty.
    pub fn from_route(
        relation: impl Into<String>,
        route: impl Into<String>,
        params: RouteParams,
    ) -> Result<Self, HalError> {
        LinkBuilder::new(relation)?
            .route(route, params, RouteOptions::default())?
            .build()
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn target(&self) -> &LinkTarget {
        &self.target
    }

    pub fn has_url(&self) -> bool {
        matches!(self.target, LinkTarget::Url(_))
    }

    pub fn has_route(&self) -> bool {
        matches!(self.target, LinkTarget::Route(_))
    }

    pub fn url(&self) -> Option<&str> {
        match &self.target {
            LinkTarget::Url(url) => Some(url),
            LinkTarget::Route(_) => None,
        }
    }

    pub fn route(&self) -> Option<&RouteSpec> {
        match &self.target {
            LinkTarget::Route(route) => Some(route),
            LinkTarget::Url(_) => None,
        }
    }

    /// The templated flag exactly as it was set: `None` when never set.
    pub fn templated(&self) -> Option<bool> {
        self.templated
    }

    /// Folds an unset templated flag into `false`.
    pub fn is_templated(&self) -> bool {
        self.templated.unwrap_or(false)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn media_type(&self) -> Option<&str> {
        self.media_type.as_deref()
    }

    /// URL describing the deprecation of this link.
    pub fn deprecation(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }
}

/// Step-by-step construction of a [`Link`].
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    relation: String,
    target: Option<LinkTarget>,
    templated: Option<bool>,
    title: Option<String>,
    hreflang: Option<String>,
    name: Option<String>,
    media_type: Option<String>,
    deprecation: Option<String>,
    profile: Option<String>,
}

impl LinkBuilder {
    /// Starts a link for `relation`.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`] if the relation is empty.
    pub fn new(relation: impl Into<String>) -> Result<Self, HalError> {
        let relation = relation.into();
        if relation.trim().is_empty() {
            return Err(HalError::invalid_argument("Link relation must not be empty"));
        }

        Ok(Self {
            relation,
            target: None,
            templated: None,
            title: None,
            hreflang: None,
            name: None,
            media_type: None,
            deprecation: None,
            profile: None,
        })
    }

    /// Points the link at a literal URL.
    ///
    /// # Errors
    ///
    /// - [`HalError::Domain`] if a route was already set
    /// - [`HalError::InvalidArgument`] if `url` is not a valid absolute or relative URI
    pub fn url(mut self, url: impl Into<String>) -> Result<Self, HalError> {
        if matches!(self.target, Some(LinkTarget::Route(_))) {
            return Err(HalError::domain(format!(
                "Cannot set URL on link \"{}\": a route is already set",
                self.relation
            )));
        }

        let url = url.into();
        validate_uri(&url).map_err(|e| {
            HalError::invalid_argument(format!("Invalid URL for link \"{}\": {e}", self.relation))
        })?;

        self.target = Some(LinkTarget::Url(url));
        Ok(self)
    }

    /// Points the link at a named route.
    ///
    /// # Errors
    ///
    /// - [`HalError::Domain`] if a URL was already set
    /// - [`HalError::InvalidArgument`] if the route name is empty
    pub fn route(
        mut self,
        name: impl Into<String>,
        params: RouteParams,
        options: RouteOptions,
    ) -> Result<Self, HalError> {
        if matches!(self.target, Some(LinkTarget::Url(_))) {
            return Err(HalError::domain(format!(
                "Cannot set route on link \"{}\": a URL is already set",
                self.relation
            )));
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(HalError::invalid_argument("Route name must not be empty"));
        }

        self.target = Some(LinkTarget::Route(RouteSpec {
            name,
            params,
            options,
        }));
        Ok(self)
    }

    pub fn templated(mut self, templated: bool) -> Self {
        self.templated = Some(templated);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn deprecation(mut self, deprecation: impl Into<String>) -> Self {
        self.deprecation = Some(deprecation.into());
        self
    }

    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Whether a URL or a route has been supplied.
    pub fn is_complete(&self) -> bool {
        self.target.is_some()
    }

    /// Finishes the link.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::Domain`] if neither a URL nor a route was supplied.
    pub fn build(self) -> Result<Link, HalError> {
        let target = self.target.ok_or_else(|| {
            HalError::domain(format!(
                "Link \"{}\" is incomplete: set a URL or a route",
                self.relation
            ))
        })?;

        Ok(Link {
            relation: self.relation,
            target,
            templated: self.templated,
            title: self.title,
            hreflang: self.hreflang,
            name: self.name,
            media_type: self.media_type,
            deprecation: self.deprecation,
            profile: self.profile,
        })
    }
}
