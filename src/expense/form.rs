//! The request body for creating and updating expenses.

use serde::{Deserialize, Deserializer, de};

use crate::{
    Error,
    expense::{Amount, NewExpense},
};

/// The message sent to the client when a required field is missing.
pub const INCOMPLETE_EXPENSE_MESSAGE: &str = "Incomplete expenses data.";

/// The JSON body accepted by the insert and update endpoints.
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a validation error with a consistent message, rather than as a
/// deserialization error. Use [NewExpense::try_from] to validate the form.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[allow(missing_docs)]
pub struct ExpenseForm {
    pub amount: Option<Amount>,
    #[serde(default, deserialize_with = "deserialize_date_part")]
    pub year: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_date_part")]
    pub month: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_date_part")]
    pub day: Option<i64>,
    pub description: Option<String>,
}

/// Accept a year, month or day as either a JSON integer or an integer string.
fn deserialize_date_part<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDatePart {
        Number(i64),
        Text(String),
    }

    match Option::<RawDatePart>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawDatePart::Number(value)) => Ok(Some(value)),
        Some(RawDatePart::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("\"{text}\" is not a valid date component"))),
    }
}

impl TryFrom<ExpenseForm> for NewExpense {
    type Error = Error;

    /// # Errors
    /// Returns an [Error::Validation] if any field is missing.
    fn try_from(form: ExpenseForm) -> Result<Self, Self::Error> {
        match form {
            ExpenseForm {
                amount: Some(amount),
                year: Some(year),
                month: Some(month),
                day: Some(day),
                description: Some(description),
            } => Ok(NewExpense {
                amount,
                year,
                month,
                day,
                description,
            }),
            _ => Err(Error::Validation(INCOMPLETE_EXPENSE_MESSAGE.to_owned())),
        }
    }
}
