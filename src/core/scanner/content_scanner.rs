// src/core/scanner/content_scanner.rs

use tracing::{debug, info};
use crate::core::knowledge_base::{CONTENT_EMAIL_EXPOSURE, CONTENT_INSECURE_FORM};
use crate::core::report_builder::ReportBuilder;
use scraper::{Html, Selector};
use regex::Regex;
use once_cell::sync::Lazy;

static RE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());
static FORM_ACTION: Lazy<Selector> = Lazy::new(|| Selector::parse("form[action]").unwrap());

/// Scans the page body for forms posting in plaintext and exposed email addresses.
///
/// html5ever recovers from any markup, so broken HTML simply yields fewer
/// matches.
pub fn analyze_content(body: &str, report: &mut ReportBuilder) {
    info!(bytes = body.len(), "Starting content analysis.");
    let document = Html::parse_document(body);

    if let Some(action) = find_insecure_form(&document) {
        debug!(action = %action, "Form submits over plain HTTP, adding CONTENT_INSECURE_FORM finding.");
        report.add_detail(&CONTENT_INSECURE_FORM);
    }

    if contains_email(body) {
        debug!("Email address found in page body, adding CONTENT_EMAIL_EXPOSURE finding.");
        report.add_detail(&CONTENT_EMAIL_EXPOSURE);
    }

    info!("Content analysis finished.");
}

/// Returns the action of the first form that submits to an `http://` URL.
fn find_insecure_form(document: &Html) -> Option<String> {
    document
        .select(&FORM_ACTION)
        .filter_map(|form| form.value().attr("action"))
        .map(str::trim)
        .find(|action| is_plaintext_url(action))
        .map(str::to_string)
}

fn is_plaintext_url(action: &str) -> bool {
    action
        .get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http://"))
}

/// Only presence matters, not how many addresses there are.
fn contains_email(body: &str) -> bool {
    RE_EMAIL.is_match(body)
}
