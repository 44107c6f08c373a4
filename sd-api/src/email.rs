//! Email notification path
//!
//! Messages are rendered here and handed to a [`Mailer`]. The shipped
//! [`LogMailer`] only logs; a real transport plugs in behind the same trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use sd_common::config::EmailConfig;
use sd_common::{DailyPayload, PayloadStore, Tradition};
use thiserror::Error;
use tracing::info;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Rendered plain-text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// What the mailer did with a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No transport configured; message was logged instead
    LoggedOnly,
}

impl Delivery {
    /// Status string reported to API clients
    pub fn as_status(&self) -> &'static str {
        match self {
            Delivery::Sent => "sent",
            Delivery::LoggedOnly => "not_configured",
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to send email: {0}")]
pub struct MailError(pub String);

/// Outgoing mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, MailError>;
}

/// Mailer that records messages in the log instead of sending them
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            from: format!("{} <{}>", config.from_name, config.from_email),
        }
    }

    /// Warning for operators who supplied SMTP credentials
    ///
    /// Returns `None` when there is nothing to ignore.
    pub fn ignored_credentials_notice(config: &EmailConfig) -> Option<String> {
        config.has_smtp_credentials().then(|| {
            format!(
                "SMTP credentials for {} at {}:{} are ignored: no SMTP transport is built in",
                config.smtp_user, config.smtp_host, config.smtp_port
            )
        })
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, MailError> {
        info!(
            "[email] SMTP transport not available - would send '{}' from {} to {}",
            email.subject, self.from, email.to
        );
        Ok(Delivery::LoggedOnly)
    }
}

/// Outcome of a daily delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyDelivery {
    Delivered(Delivery),
    /// No payload stored for the date yet
    NothingToSend,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Store(#[from] sd_common::Error),
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Read the stored payload for `date` and mail it to `to`
///
/// A missing payload is not an error: nothing is sent yet.
pub async fn send_daily_email(
    store: &dyn PayloadStore,
    mailer: &dyn Mailer,
    to: &str,
    date: NaiveDate,
    base_url: &str,
) -> Result<DailyDelivery, DeliveryError> {
    let payload = match store.get_by_date(date).await {
        Ok(payload) => payload,
        Err(sd_common::Error::NotFound(_)) => {
            info!("[email] No payload for {} yet, nothing sent to {}", date, to);
            return Ok(DailyDelivery::NothingToSend);
        }
        Err(e) => return Err(e.into()),
    };

    let email = render_daily_email(&payload, to, base_url);
    let delivery = mailer.send(&email).await?;
    Ok(DailyDelivery::Delivered(delivery))
}

/// Capitalize the first letter of each word
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_daily_email(payload: &DailyPayload, to: &str, base_url: &str) -> OutgoingEmail {
    let date = sd_common::time::format_date_key(payload.date);

    let mut body = format!("Scripture Daily for {}\n\n{}\n\n", date, RULE);
    body.push_str(&format!(
        "TOPIC OF TODAY: {}\n\n{}\n\n",
        payload.topic.to_uppercase(),
        RULE
    ));

    for tradition in Tradition::ALL {
        let passage = payload.passage(tradition);
        body.push_str(&format!(
            "{} ({})\n{}\n\n",
            tradition.display_name().to_uppercase(),
            passage.reference,
            passage.text
        ));
    }

    body.push_str(&format!("{}\n\nCOMMON GROUND\n{}\n\n{}\n\n", RULE, payload.summary, RULE));
    body.push_str(&format!(
        "Thank you for being part of Scripture Daily.\n\nVisit us at: {base}\nView archive: {base}/post/{date}\n",
        base = base_url,
        date = date
    ));

    OutgoingEmail {
        to: to.to_string(),
        subject: format!("Scripture Daily - {}: {}", date, title_case(&payload.topic)),
        body,
    }
}

pub fn render_welcome_email(name: &str, to: &str) -> OutgoingEmail {
    let body = format!(
        "Dear {name},\n\n\
         Thank you for subscribing to Scripture Daily!\n\n\
         You will now receive daily passages from the Qur'an, Torah, Bible, and Human Design,\n\
         along with thematic summaries delivered to your inbox every day.\n\n\
         Your subscription details:\n\
         - Name: {name}\n\
         - Email: {to}\n\n\
         Best regards,\n\
         The Scripture Daily Team\n",
        name = name,
        to = to
    );

    OutgoingEmail {
        to: to.to_string(),
        subject: "Welcome to Scripture Daily!".to_string(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_common::PassageRef;

    fn payload() -> DailyPayload {
        DailyPayload::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "loving kindness",
            PassageRef::new("Q1", "quran text"),
            PassageRef::new("T1", "torah text"),
            PassageRef::new("B1", "bible text"),
            PassageRef::new("H1", "hd text"),
        )
    }

    #[test]
    fn test_daily_subject_title_cases_topic() {
        let email = render_daily_email(&payload(), "a@example.org", "https://scripturedaily.com");
        assert_eq!(email.subject, "Scripture Daily - 2025-01-01: Loving Kindness");
        assert_eq!(email.to, "a@example.org");
    }

    #[test]
    fn test_daily_body_contains_every_passage_and_archive_link() {
        let email = render_daily_email(&payload(), "a@example.org", "https://scripturedaily.com");
        assert!(email.body.contains("TOPIC OF TODAY: LOVING KINDNESS"));
        assert!(email.body.contains("QUR'AN (Q1)\nquran text"));
        assert!(email.body.contains("HUMAN DESIGN (H1)\nhd text"));
        assert!(email.body.contains("https://scripturedaily.com/post/2025-01-01"));
    }

    #[test]
    fn test_welcome_email() {
        let email = render_welcome_email("Ada", "ada@example.org");
        assert_eq!(email.subject, "Welcome to Scripture Daily!");
        assert!(email.body.starts_with("Dear Ada,"));
        assert!(email.body.contains("- Email: ada@example.org"));
    }

    fn email_config(user: &str, password: &str) -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.org".to_string(),
            smtp_port: 2525,
            smtp_user: user.to_string(),
            smtp_password: password.to_string(),
            from_email: "noreply@scripturedaily.com".to_string(),
            from_name: "Scripture Daily".to_string(),
        }
    }

    #[tokio::test]
    async fn test_log_mailer_with_credentials_still_only_logs() {
        let config = email_config("sender@example.org", "secret");
        let mailer = LogMailer::new(&config);

        let delivery = mailer
            .send(&render_welcome_email("Ada", "ada@example.org"))
            .await
            .unwrap();
        assert_eq!(delivery.as_status(), "not_configured");

        let notice = LogMailer::ignored_credentials_notice(&config).unwrap();
        assert!(notice.contains("sender@example.org"));
        assert!(notice.contains("smtp.example.org:2525"));
        assert!(notice.contains("ignored"));
    }

    #[test]
    fn test_no_notice_without_credentials() {
        assert!(LogMailer::ignored_credentials_notice(&email_config("", "")).is_none());
        assert!(LogMailer::ignored_credentials_notice(&email_config("sender@example.org", "")).is_none());
    }

    #[test]
    fn test_delivery_status_strings() {
        assert_eq!(Delivery::Sent.as_status(), "sent");
        assert_eq!(Delivery::LoggedOnly.as_status(), "not_configured");
    }
}
