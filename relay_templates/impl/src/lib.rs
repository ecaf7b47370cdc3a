use std::sync::Arc;

use anyhow::Context;
use relay_templates_contracts::{
    RenderedTemplate, Template, TemplateService, BASE_TEMPLATE, TEMPLATES,
};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();

        let (base_name, base) = BASE_TEMPLATE;
        tera.add_raw_template(base_name, base)
            .context("Failed to load base template")?;

        for &(name, html, text) in TEMPLATES {
            tera.add_raw_template(&html_name(name), html)
                .with_context(|| format!("Failed to load html template {name}"))?;
            tera.add_raw_template(&text_name(name), text)
                .with_context(|| format!("Failed to load text template {name}"))?;
        }

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<RenderedTemplate> {
        let context = tera::Context::from_serialize(template)?;
        Ok(RenderedTemplate {
            html: self.tera.render(&html_name(T::NAME), &context)?,
            text: self.tera.render(&text_name(T::NAME), &context)?,
        })
    }
}

fn html_name(name: &str) -> String {
    format!("{name}.html")
}

fn text_name(name: &str) -> String {
    format!("{name}.txt")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use relay_templates_contracts::{
        AutoReplyTemplate, ContactNoticeTemplate, ProjectRequestAutoReplyTemplate,
    };

    use super::*;

    #[test]
    fn contact_notice() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactNoticeTemplate {
                site: "TKH TECH".into(),
                subject: "New message from Jane Doe via TKH TECH website".into(),
                name: "Jane Doe".into(),
                email: "jane@example.com".into(),
                message: "Hello\nWorld".into(),
            })
            .unwrap();

        // Assert
        assert_eq!(result.text, "From: Jane Doe <jane@example.com>\n\nHello\nWorld");
        assert!(result.html.contains("New message from Jane Doe via TKH TECH website"));
        assert!(result.html.contains("mailto:jane@example.com"));
        assert!(result.html.contains("TKH TECH"));
    }

    #[test]
    fn html_is_escaped() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ContactNoticeTemplate {
                site: "TKH TECH".into(),
                subject: "Hi".into(),
                name: "<b>Jane</b>".into(),
                email: "jane@example.com".into(),
                message: "<script>alert(1)</script>".into(),
            })
            .unwrap();

        // Assert
        assert!(!result.html.contains("<script>"));
        assert!(!result.html.contains("<b>Jane</b>"));
        assert!(result.html.contains("&lt;script&gt;"));
        assert_eq!(
            result.text,
            "From: <b>Jane</b> <jane@example.com>\n\n<script>alert(1)</script>"
        );
    }

    #[test]
    fn auto_reply() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&AutoReplyTemplate {
                site: "TKH TECH".into(),
                name: "Jane".into(),
                subject: "Question".into(),
                message: "Hello".into(),
            })
            .unwrap();

        // Assert
        assert!(result.text.starts_with("Hi Jane,"));
        assert!(result.text.contains("Thank you for contacting TKH TECH"));
        assert!(result.html.contains("Thank you for contacting TKH TECH"));
    }

    #[test]
    fn project_request_auto_reply() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut
            .render(&ProjectRequestAutoReplyTemplate {
                site: "TKH TECH".into(),
                name: "Jane".into(),
                subject: "Project Request: Mobile App".into(),
                message: "Budget: 10k".into(),
            })
            .unwrap();

        // Assert
        assert!(result.text.contains("Thank you for your project request"));
        assert!(result.html.contains("Thank you for your project request"));
        assert!(result.html.contains("Project Request: Mobile App"));
    }
}
