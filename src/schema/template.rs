//! Template generation for new catalog entries

use chrono::{DateTime, Utc};
use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::entity::{AltStatus, Complexity};
use crate::core::identity::EntityId;
use crate::core::slug::slugify;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Context for template generation
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub id: EntityId,
    pub author: String,
    pub created: DateTime<Utc>,
    pub name: String,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub icon_slug: Option<String>,
    pub icon_color: Option<String>,
    // OSS fields
    pub repository_url: Option<String>,
    pub license: Option<String>,
    pub status: AltStatus,
    // CAP fields
    pub category: Option<String>,
    pub complexity: Complexity,
}

impl TemplateContext {
    pub fn new(id: EntityId, name: &str, author: String) -> Self {
        Self {
            id,
            author,
            created: Utc::now(),
            name: name.to_string(),
            description: None,
            website_url: None,
            icon_slug: None,
            icon_color: None,
            repository_url: None,
            license: None,
            status: AltStatus::default(),
            category: None,
            complexity: Complexity::default(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_website(mut self, url: Option<String>) -> Self {
        self.website_url = url;
        self
    }

    pub fn with_icon(mut self, slug: Option<String>, color: Option<String>) -> Self {
        self.icon_slug = slug;
        self.icon_color = color;
        self
    }

    pub fn with_repository(mut self, url: Option<String>) -> Self {
        self.repository_url = url;
        self
    }

    pub fn with_license(mut self, license: Option<String>) -> Self {
        self.license = license;
        self
    }

    pub fn with_status(mut self, status: AltStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    fn base_tera_context(&self) -> tera::Context {
        let mut context = tera::Context::new();
        context.insert("id", &self.id.to_string());
        context.insert("author", &self.author);
        context.insert("created", &self.created.to_rfc3339());
        context.insert("name", &self.name);
        context.insert("slug", &slugify(&self.name));
        context.insert("description", &self.description.clone().unwrap_or_default());
        context.insert("website_url", &self.website_url.clone().unwrap_or_default());
        context.insert("icon_slug", &self.icon_slug.clone().unwrap_or_default());
        context.insert("icon_color", &self.icon_color.clone().unwrap_or_default());
        context
    }
}

/// Template generator using Tera
pub struct TemplateGenerator {
    tera: Tera,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

impl TemplateGenerator {
    /// Create a new template generator with embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref();
            if let Some(content) = EmbeddedTemplates::get(filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    tera.add_raw_template(filename, template_str)
                        .map_err(|e| TemplateError::RenderError(e.to_string()))?;
                }
            }
        }

        Ok(Self { tera })
    }

    /// Generate a proprietary application scaffold
    pub fn generate_proprietary(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        let context = ctx.base_tera_context();

        if self
            .tera
            .get_template_names()
            .any(|n| n == "proprietary.yaml.tera")
        {
            self.tera
                .render("proprietary.yaml.tera", &context)
                .map_err(|e| TemplateError::RenderError(e.to_string()))
        } else {
            Ok(self.hardcoded_proprietary_template(ctx))
        }
    }

    /// Generate an open-source alternative scaffold
    pub fn generate_alternative(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        let mut context = ctx.base_tera_context();
        context.insert(
            "repository_url",
            &ctx.repository_url.clone().unwrap_or_default(),
        );
        context.insert("license", &ctx.license.clone().unwrap_or_default());
        context.insert("status", &ctx.status.to_string());

        if self
            .tera
            .get_template_names()
            .any(|n| n == "alternative.yaml.tera")
        {
            self.tera
                .render("alternative.yaml.tera", &context)
                .map_err(|e| TemplateError::RenderError(e.to_string()))
        } else {
            Ok(self.hardcoded_alternative_template(ctx))
        }
    }

    /// Generate a capability scaffold
    pub fn generate_capability(&self, ctx: &TemplateContext) -> Result<String, TemplateError> {
        let mut context = ctx.base_tera_context();
        context.insert("category", &ctx.category.clone().unwrap_or_default());
        context.insert("complexity", &ctx.complexity.to_string());

        if self
            .tera
            .get_template_names()
            .any(|n| n == "capability.yaml.tera")
        {
            self.tera
                .render("capability.yaml.tera", &context)
                .map_err(|e| TemplateError::RenderError(e.to_string()))
        } else {
            Ok(self.hardcoded_capability_template(ctx))
        }
    }

    // Hardcoded fallbacks keep `new` working even if embedded templates
    // fail to load.

    fn hardcoded_proprietary_template(&self, ctx: &TemplateContext) -> String {
        format!(
            r#"id: {id}
name: "{name}"
slug: {slug}
{description}
links:
  capabilities: []
  alternatives: []

created: {created}
author: {author}
"#,
            id = ctx.id,
            name = ctx.name,
            slug = slugify(&ctx.name),
            description = optional_field("description", ctx.description.as_deref()),
            created = ctx.created.to_rfc3339(),
            author = ctx.author,
        )
    }

    fn hardcoded_alternative_template(&self, ctx: &TemplateContext) -> String {
        format!(
            r#"id: {id}
name: "{name}"
slug: {slug}
{description}{repository}
status: {status}
implementations: []

links:
  alternative_to: []

created: {created}
author: {author}
"#,
            id = ctx.id,
            name = ctx.name,
            slug = slugify(&ctx.name),
            description = optional_field("description", ctx.description.as_deref()),
            repository = optional_field("repository_url", ctx.repository_url.as_deref()),
            status = ctx.status,
            created = ctx.created.to_rfc3339(),
            author = ctx.author,
        )
    }

    fn hardcoded_capability_template(&self, ctx: &TemplateContext) -> String {
        format!(
            r#"id: {id}
name: "{name}"
slug: {slug}
{description}complexity: {complexity}

created: {created}
author: {author}
"#,
            id = ctx.id,
            name = ctx.name,
            slug = slugify(&ctx.name),
            description = optional_field("description", ctx.description.as_deref()),
            complexity = ctx.complexity,
            created = ctx.created.to_rfc3339(),
            author = ctx.author,
        )
    }
}

fn optional_field(key: &str, value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!("{}: \"{}\"\n", key, v),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;
    use crate::entities::{Alternative, Capability, ProprietaryApp};

    fn generator() -> TemplateGenerator {
        TemplateGenerator::new().unwrap()
    }

    #[test]
    fn test_proprietary_scaffold_parses() {
        let ctx = TemplateContext::new(
            EntityId::new(EntityPrefix::App),
            "Shopify",
            "test".to_string(),
        )
        .with_description(Some("E-commerce platform".to_string()));

        let yaml = generator().generate_proprietary(&ctx).unwrap();
        let parsed: ProprietaryApp = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.name, "Shopify");
        assert_eq!(parsed.slug, "shopify");
        assert!(parsed.links.capabilities.is_empty());
    }

    #[test]
    fn test_alternative_scaffold_parses() {
        let ctx = TemplateContext::new(
            EntityId::new(EntityPrefix::Oss),
            "Medusa",
            "test".to_string(),
        )
        .with_repository(Some("https://github.com/medusajs/medusa".to_string()));

        let yaml = generator().generate_alternative(&ctx).unwrap();
        let parsed: Alternative = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.slug, "medusa");
        assert_eq!(
            parsed.repository_url.as_deref(),
            Some("https://github.com/medusajs/medusa")
        );
        assert!(parsed.implementations.is_empty());
    }

    #[test]
    fn test_capability_scaffold_parses() {
        let ctx = TemplateContext::new(
            EntityId::new(EntityPrefix::Cap),
            "Real-Time Collaboration",
            "test".to_string(),
        )
        .with_category(Some("collaboration".to_string()))
        .with_complexity(Complexity::Advanced);

        let yaml = generator().generate_capability(&ctx).unwrap();
        let parsed: Capability = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.slug, "real-time-collaboration");
        assert_eq!(parsed.complexity, Complexity::Advanced);
        assert_eq!(parsed.category.as_deref(), Some("collaboration"));
    }

    #[test]
    fn test_hardcoded_fallbacks_parse() {
        let gen = generator();
        let ctx = TemplateContext::new(
            EntityId::new(EntityPrefix::Oss),
            "Ghost",
            "test".to_string(),
        );

        let yaml = gen.hardcoded_alternative_template(&ctx);
        let parsed: Alternative = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed.name, "Ghost");
    }
}
