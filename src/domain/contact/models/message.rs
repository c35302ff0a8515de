use super::submission::ContactSubmission;

pub const COMPANY_PLACEHOLDER: &str = "-";

/// Fixed addresses of the outbound message, resolved once from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRouting {
    pub sender: String,
    pub recipient: String,
}

/// A contact submission rendered as an email. The envelope uses `from` and
/// `to`; the submitter only ever appears as `reply_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    from: String,
    to: String,
    reply_to: Option<String>,
    subject: String,
    text_body: String,
    html_body: String,
}

impl ComposedMessage {
    pub fn compose(submission: &ContactSubmission, routing: &MailRouting) -> Self {
        Self {
            from: routing.sender.clone(),
            to: routing.recipient.clone(),
            reply_to: Some(submission.email().to_string()),
            subject: submission.subject(),
            text_body: text_body(submission),
            html_body: html_body(submission),
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn reply_to(&self) -> Option<&str> {
        self.reply_to.as_deref()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn text_body(&self) -> &str {
        &self.text_body
    }

    pub fn html_body(&self) -> &str {
        &self.html_body
    }
}

fn text_body(submission: &ContactSubmission) -> String {
    format!(
        "Dienstleistung: {}\nName: {}\nUnternehmen: {}\nE-Mail: {}\n\nNachricht:\n{}",
        submission.service_label(),
        submission.name(),
        submission.company().unwrap_or(COMPANY_PLACEHOLDER),
        submission.email(),
        submission.message().unwrap_or_default(),
    )
}

fn html_body(submission: &ContactSubmission) -> String {
    let message = escape_html(submission.message().unwrap_or_default()).replace('\n', "<br/>");
    format!(
        "<h2>{}</h2>\n\
         <p><strong>Dienstleistung:</strong> {}</p>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Unternehmen:</strong> {}</p>\n\
         <p><strong>E-Mail:</strong> {}</p>\n\
         <h3>Nachricht</h3>\n\
         <p>{}</p>",
        escape_html(&submission.heading()),
        escape_html(submission.service_label()),
        escape_html(submission.name()),
        escape_html(submission.company().unwrap_or(COMPANY_PLACEHOLDER)),
        escape_html(submission.email().as_ref()),
        message,
    )
}

pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            c => escaped.push(c),
        }
    }
    escaped
}
