use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render both the html and the plain text variant of the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<RenderedTemplate>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: RenderedTemplate,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub html: String,
    pub text: String,
}

/// An email template consisting of an html and a plain text variant.
///
/// The html variant is registered as `{NAME}.html` which enables autoescaping
/// of every interpolated value.
pub trait Template: Serialize {
    const NAME: &'static str;
    const HTML: &'static str;
    const TEXT: &'static str;
}

pub const BASE_TEMPLATE: (&str, &str) = ("base.html", include_str!("../templates/base.html"));

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const HTML: &'static str = include_str!(concat!("../templates/", $path, ".html"));
                const TEXT: &'static str = include_str!(concat!("../templates/", $path, ".txt"));
            }
        )*

        /// `(name, html, text)` of every known template.
        pub const TEMPLATES: &[(&str, &str, &str)] = &[
            $( ($ident::NAME, $ident::HTML, $ident::TEXT) ),*
        ];
    };
}

templates! {
    ContactNoticeTemplate("contact_notice"),
    AutoReplyTemplate("auto_reply"),
    ProjectRequestAutoReplyTemplate("project_request_auto_reply"),
}

/// Notification for the business inbox about a new submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactNoticeTemplate {
    pub site: String,
    pub subject: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Confirmation sent back to the submitter of a regular contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoReplyTemplate {
    pub site: String,
    pub name: String,
    pub subject: String,
    pub message: String,
}

/// Confirmation sent back to the submitter of a project request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRequestAutoReplyTemplate {
    pub site: String,
    pub name: String,
    pub subject: String,
    pub message: String,
}
