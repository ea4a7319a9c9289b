//! Client-side password strength scoring and registration policy.
//!
//! Scoring awards 25 points each for length, uppercase, digit, and
//! symbol. Registration is rejected locally -- before any network call --
//! when the password scores below the Moderate band.

use aura_types::error::PasswordPolicyError;

/// Minimum password length accepted at registration.
pub const MIN_LENGTH: usize = 8;

/// Minimum strength score accepted at registration.
const MIN_SCORE: u8 = 50;

/// Qualitative strength band for UI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthBand {
    Weak,
    Moderate,
    Good,
    Strong,
}

impl StrengthBand {
    /// Human-readable feedback shown next to the strength meter.
    pub fn feedback(self) -> &'static str {
        match self {
            StrengthBand::Weak => "Weak password",
            StrengthBand::Moderate => "Moderate password",
            StrengthBand::Good => "Good password",
            StrengthBand::Strong => "Strong password",
        }
    }
}

/// Score a password from 0 to 100 in 25-point increments.
///
/// One increment each for: length of at least 8, an uppercase letter,
/// a digit, and a non-alphanumeric character.
pub fn score(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let mut score = 0;
    if password.chars().count() >= MIN_LENGTH {
        score += 25;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 25;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 25;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 25;
    }
    score
}

/// Band a score for feedback display.
pub fn band(score: u8) -> StrengthBand {
    match score {
        0..=25 => StrengthBand::Weak,
        26..=50 => StrengthBand::Moderate,
        51..=75 => StrengthBand::Good,
        _ => StrengthBand::Strong,
    }
}

/// Validate a registration password against the local policy.
///
/// Checks run in order: minimum length, confirmation match, strength
/// score. The first violation is reported; nothing reaches the network
/// on any violation.
pub fn validate_registration(
    password: &str,
    confirmation: &str,
) -> Result<(), PasswordPolicyError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(PasswordPolicyError::TooShort);
    }
    if password != confirmation {
        return Err(PasswordPolicyError::ConfirmationMismatch);
    }
    if score(password) < MIN_SCORE {
        return Err(PasswordPolicyError::TooWeak);
    }
    Ok(())
}
