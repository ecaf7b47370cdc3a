use relay_core_contact_impl::ContactServiceImpl;
use relay_core_health_impl::HealthServiceImpl;
use relay_email_impl::EmailServiceImpl;
use relay_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = relay_api_rest::RestServer<Health, Contact>;

// Email
pub type Email = EmailServiceImpl;

// Template
pub type Template = TemplateServiceImpl;

// Core
pub type Contact = ContactServiceImpl<Email, Template>;
pub type Health = HealthServiceImpl<Email>;
