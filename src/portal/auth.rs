//! Moodle login: locate the login form by its submit-button label,
//! submit credentials, and verify the session actually opened.

use crate::config::PortalConfig;
use crate::error::HarvestError;
use crate::portal::client::{resolve_href, Page, PortalClient};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

/// Label on the login form's submit control.
const LOGIN_BUTTON_LABEL: &str = "Log in";

/// A parsed HTML form, ready to submit: absolute action URL plus every
/// named non-submit field with its current value. Hidden inputs (Moodle's
/// `logintoken` among them) ride along untouched.
#[derive(Debug, Clone)]
pub struct ParsedForm {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

impl ParsedForm {
    /// Set a field's value, adding the field if the form lacked it.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.fields.push((name.to_string(), value.to_string())),
        }
    }
}

fn element_label(el: &ElementRef<'_>) -> String {
    if el.value().name() == "input" {
        el.value().attr("value").unwrap_or("").trim().to_string()
    } else {
        el.text().collect::<Vec<_>>().join(" ").trim().to_string()
    }
}

/// Find the form whose submit control carries `label`.
///
/// Matches `input[type=submit]` by value and `button` by text. The form
/// action is resolved against `page_url`; a missing or empty action means
/// the form posts back to the page it was served from.
pub fn find_form_by_button(
    html: &str,
    page_url: &str,
    label: &str,
) -> Result<ParsedForm, HarvestError> {
    let document = Html::parse_document(html);
    let form_sel = Selector::parse("form").unwrap();
    let submit_sel = Selector::parse("input[type=\"submit\"], button").unwrap();
    let input_sel = Selector::parse("input[name]").unwrap();

    for form in document.select(&form_sel) {
        let labelled = form
            .select(&submit_sel)
            .any(|el| element_label(&el) == label);
        if !labelled {
            continue;
        }

        let mut fields = Vec::new();
        for input in form.select(&input_sel) {
            let kind = input.value().attr("type").unwrap_or("text");
            if matches!(kind, "submit" | "button" | "image" | "reset") {
                continue;
            }
            let name = input.value().attr("name").unwrap_or("").to_string();
            let value = input.value().attr("value").unwrap_or("").to_string();
            fields.push((name, value));
        }

        let action = match form.value().attr("action") {
            Some(a) if !a.is_empty() => resolve_href(page_url, a),
            _ => page_url.to_string(),
        };

        return Ok(ParsedForm { action, fields });
    }

    Err(HarvestError::Navigation(format!(
        "no form with a {label:?} submit button on {page_url}"
    )))
}

/// Whether the page still shows a password prompt. Moodle re-renders the
/// login form on bad credentials instead of returning an error status.
fn has_password_form(html: &str) -> bool {
    let document = Html::parse_document(html);
    let sel = Selector::parse("form input[type=\"password\"]").unwrap();
    document.select(&sel).next().is_some()
}

/// Log in to the portal. Returns the post-login page, which carries the
/// navigation links for the rest of the run.
pub async fn login(client: &PortalClient, cfg: &PortalConfig) -> Result<Page, HarvestError> {
    info!("logging in to portal");
    debug!("loading login page {}", cfg.moodle_login_url);
    let login_page = client.get(&cfg.moodle_login_url).await?;
    debug!("login page loaded");

    let mut form = find_form_by_button(&login_page.body, &login_page.url, LOGIN_BUTTON_LABEL)?;
    form.set("username", &cfg.username);
    form.set("password", &cfg.password);

    debug!("submitting login form to {}", form.action);
    let landing = client.post_form(&form.action, &form.fields).await?;
    debug!("login form submitted");

    if has_password_form(&landing.body) {
        return Err(HarvestError::Auth(format!(
            "portal rejected credentials for {}",
            cfg.username
        )));
    }

    info!("logged in as {}", cfg.username);
    Ok(landing)
}
