//! HR letters bound to an employee record and the date of issue.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::info;
use utoipa::ToSchema;

use crate::error::{HrError, HrResult};
use crate::model::Employee;
use crate::store::employee;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LetterType {
    OfferLetter,
    ExperienceLetter,
    ResignationLetter,
    TerminationLetter,
    WarningLetter,
}

impl LetterType {
    /// Unknown values are rejected, never mapped to a default template.
    pub fn parse(value: &str) -> Result<Self, HrError> {
        value.trim().parse().map_err(|_| HrError::InvalidLetterType {
            value: value.to_string(),
        })
    }

    pub fn title(self) -> &'static str {
        match self {
            LetterType::OfferLetter => "Offer Letter",
            LetterType::ExperienceLetter => "Experience Letter",
            LetterType::ResignationLetter => "Resignation Acceptance Letter",
            LetterType::TerminationLetter => "Termination Letter",
            LetterType::WarningLetter => "Warning Letter",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LetterRequest {
    #[schema(example = "E100")]
    pub employee_id: String,
    /// Defaults to `offer_letter`.
    #[serde(default)]
    #[schema(example = "experience_letter")]
    pub letter_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Letter {
    pub letter_type: LetterType,
    #[schema(example = "E100")]
    pub employee_id: String,
    #[schema(example = "A. Khan")]
    pub employee_name: String,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "experience_letter_E100_2025-03-31.txt")]
    pub file_name: String,
    #[schema(example = "Experience Letter")]
    pub title: String,
    pub body: String,
}

impl Letter {
    pub fn render(letter_type: LetterType, employee: &Employee, date: NaiveDate) -> Self {
        let date_text = date.format("%B %-d, %Y").to_string();
        let joined = employee.date_joined.format("%B %-d, %Y").to_string();
        let designation = employee.designation.as_deref().unwrap_or("Employee");
        let name = &employee.name;
        let id = &employee.employee_id;
        let guardian = employee
            .father_name
            .as_deref()
            .map(|f| format!(" s/o / d/o {}", f))
            .unwrap_or_default();
        let cnic = employee
            .cnic
            .as_deref()
            .map(|c| format!(", CNIC {}", c))
            .unwrap_or_default();

        let content = match letter_type {
            LetterType::OfferLetter => format!(
                "We are pleased to offer you the position of {designation}, effective {joined}. \
                 Your employee ID is {id}. Please sign and return a copy of this letter to \
                 confirm your acceptance."
            ),
            LetterType::ExperienceLetter => format!(
                "This is to certify that {name}{guardian}{cnic} has been associated with us \
                 as {designation} since {joined}. During this period we found {name} \
                 diligent and professional. We wish them every success."
            ),
            LetterType::ResignationLetter => format!(
                "We acknowledge receipt of the resignation of {name} ({id}), {designation}, \
                 and accept it. Please complete the handover of duties and company property \
                 before your last working day."
            ),
            LetterType::TerminationLetter => format!(
                "This letter serves as formal notice that the employment of {name} ({id}) as \
                 {designation} is terminated. Your final settlement will be processed in \
                 accordance with company policy."
            ),
            LetterType::WarningLetter => format!(
                "This letter is a formal warning to {name} ({id}), {designation}, regarding \
                 conduct that does not meet company standards. Further instances may lead to \
                 disciplinary action."
            ),
        };

        let body = format!(
            "Date: {date_text}\n\n{title}\n\nDear {name},\n\n{content}\n\nSincerely,\nHuman Resources",
            title = letter_type.title(),
        );

        Letter {
            letter_type,
            employee_id: employee.employee_id.clone(),
            employee_name: employee.name.clone(),
            date,
            file_name: format!("{}_{}_{}.txt", letter_type, employee.employee_id, date),
            title: letter_type.title().to_string(),
            body,
        }
    }
}

/// Renders a letter for the employee with the given business identifier.
///
/// The letter type is checked before the employee is looked up.
pub async fn generate_letter(
    pool: &SqlitePool,
    request: &LetterRequest,
    today: NaiveDate,
) -> HrResult<Letter> {
    let letter_type = match request.letter_type.as_deref() {
        None => LetterType::OfferLetter,
        Some(value) => LetterType::parse(value)?,
    };
    let employee = employee::get_by_employee_id(pool, &request.employee_id).await?;

    info!(employee_id = %employee.employee_id, letter_type = %letter_type, "Letter generated");
    Ok(Letter::render(letter_type, &employee, today))
}
