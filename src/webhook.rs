//! Typeform webhook payload.
//!
//! Mirrors the subset of the `form_response` payload the poster needs:
//! answers are matched by their field ref (`title`, `guest`, `date`,
//! `time`, `type`, `pic`).

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::CartellError;
use crate::poster::Poster;

#[derive(Debug, Deserialize)]
pub struct Webhook {
    pub form_response: FormResponse,
}

#[derive(Debug, Deserialize)]
pub struct FormResponse {
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Answer {
    pub text: String,
    pub date: String,
    pub choice: Choice,
    pub file_url: String,
    pub field: Field,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Choice {
    pub label: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "ref")]
    pub field_ref: String,
}

impl Webhook {
    /// Collapse the answers into a [`Poster`].
    ///
    /// Fails on a missing or malformed date; unknown field refs are
    /// ignored so the form can grow without breaking older deployments.
    pub fn into_poster(self) -> Result<Poster, CartellError> {
        let mut title = String::new();
        let mut guest = String::new();
        let mut date = None;
        let mut time = String::new();
        let mut pic_url = String::new();
        let mut event_type = String::new();

        for answer in self.form_response.answers {
            match answer.field.field_ref.as_str() {
                "title" => title = answer.text,
                "guest" => guest = answer.text,
                "date" => {
                    date = Some(
                        NaiveDate::parse_from_str(&answer.date, "%Y-%m-%d").map_err(|e| {
                            CartellError::Webhook(format!("bad date {:?}: {}", answer.date, e))
                        })?,
                    )
                }
                "time" => time = answer.text,
                "type" => event_type = answer.choice.label,
                "pic" => pic_url = answer.file_url,
                _ => {}
            }
        }

        let date =
            date.ok_or_else(|| CartellError::Webhook("missing date answer".to_string()))?;

        Ok(Poster {
            title,
            guest,
            date,
            time,
            pic_url,
            event_type,
        })
    }
}
