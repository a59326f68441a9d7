use serde::Serialize;

/// Who is placing the order. Captured once at the start of a session.
///
/// New customers must give a name and e-mail; existing customers are
/// identified by phone number alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerInfo {
    phone_number: String,
    name: Option<String>,
    email: Option<String>,
    is_existing_customer: bool,
}

impl CustomerInfo {
    pub fn new(
        phone_number: &str,
        name: Option<&str>,
        email: Option<&str>,
        is_existing_customer: bool,
    ) -> Result<Self, CustomerError> {
        let phone_number = phone_number.trim();
        if phone_number.is_empty() {
            return Err(CustomerError::MissingPhoneNumber);
        }

        if is_existing_customer {
            return Ok(Self {
                phone_number: phone_number.to_string(),
                name: None,
                email: None,
                is_existing_customer,
            });
        }

        let name = name.map(str::trim).filter(|n| !n.is_empty())
            .ok_or(CustomerError::MissingName)?;
        let email = email.map(str::trim).filter(|e| e.contains('@'))
            .ok_or(CustomerError::InvalidEmail)?;

        Ok(Self {
            phone_number: phone_number.to_string(),
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            is_existing_customer,
        })
    }

    /// Shorthand for a returning customer
    pub fn existing(phone_number: &str) -> Result<Self, CustomerError> {
        Self::new(phone_number, None, None, true)
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_existing_customer(&self) -> bool {
        self.is_existing_customer
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CustomerError {
    #[error("Please enter your phone number.")]
    MissingPhoneNumber,

    #[error("Please enter your name.")]
    MissingName,

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}
