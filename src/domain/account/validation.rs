//! Field validators for account registration and login
//!
//! Every validator accepts any string (including the empty string) and never
//! panics. A failure carries every violated rule in evaluation order; rules
//! that cannot be evaluated until an earlier structural rule passes are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Maximum length of a name, in characters
pub const MAX_NAME_LENGTH: usize = 150;

/// Exact length of a national ID
pub const NATIONAL_ID_LENGTH: usize = 11;

/// Exact length of a license number
pub const LICENSE_NUMBER_LENGTH: usize = 8;

/// Minimum length of a password, in characters
pub const MIN_PASSWORD_LENGTH: usize = 12;

/// Maximum length of a password, in characters
pub const MAX_PASSWORD_LENGTH: usize = 255;

/// Symbols accepted as the "special character" of a password
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+={}[]|\\:;\"'<>,.?/~`";

/// Letter runs (ASCII and Latin-1 accented letters) separated by single spaces
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ]+( [A-Za-zÀ-ÖØ-öø-ÿ]+)*$").unwrap()
});

static LICENSE_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{6}$").unwrap());

/// Name rule violations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NameViolation {
    #[error("Name is required.")]
    Empty,

    #[error("Name must contain a maximum of 150 characters.")]
    TooLong,

    #[error("Name must contain only letters and single spaces between words.")]
    InvalidChars,
}

/// National ID rule violations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NationalIdViolation {
    #[error("National ID is required.")]
    Empty,

    #[error("National ID must contain only digits.")]
    NonDigit,

    #[error("National ID must contain exactly 11 digits.")]
    BadLength,

    #[error("Invalid national ID.")]
    RepeatedDigit,

    #[error("Invalid national ID.")]
    ChecksumMismatch,
}

/// License number rule violations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LicenseNumberViolation {
    #[error("License number is required.")]
    Empty,

    #[error("License number must be exactly 8 characters.")]
    BadLength,

    #[error("Invalid license number format. Expected format: SP123456.")]
    BadFormat,
}

/// Password complexity rule violations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PasswordViolation {
    #[error("Password must contain a maximum of 255 characters.")]
    TooLong,

    #[error("Password must contain at least 12 characters.")]
    TooShort,

    #[error("Password must not contain spaces.")]
    HasWhitespace,

    #[error("Password must contain at least one uppercase letter.")]
    NoUpper,

    #[error("Password must contain at least one lowercase letter.")]
    NoLower,

    #[error("Password must contain at least one digit.")]
    NoDigit,

    #[error("Password must contain at least one special character.")]
    NoSpecial,
}

/// Validate a person's name
///
/// Rules (checked on the trimmed value):
/// - Cannot be blank
/// - Maximum 150 characters
/// - Letters only, words separated by exactly one space
pub fn validate_name(name: &str) -> Result<(), Vec<NameViolation>> {
    let name = name.trim();

    if name.is_empty() {
        return Err(vec![NameViolation::Empty]);
    }

    let mut violations = Vec::new();

    if name.chars().count() > MAX_NAME_LENGTH {
        violations.push(NameViolation::TooLong);
    }

    if !NAME_PATTERN.is_match(name) {
        violations.push(NameViolation::InvalidChars);
    }

    into_result(violations)
}

/// Validate an 11-digit national ID with two trailing check digits
///
/// Digit and length problems are reported together; the repeated-digit and
/// checksum rules only run once the value is exactly 11 digits.
pub fn validate_national_id(national_id: &str) -> Result<(), Vec<NationalIdViolation>> {
    let national_id = national_id.trim();

    if national_id.is_empty() {
        return Err(vec![NationalIdViolation::Empty]);
    }

    let mut violations = Vec::new();

    if !national_id.chars().all(|c| c.is_ascii_digit()) {
        violations.push(NationalIdViolation::NonDigit);
    }

    if national_id.chars().count() != NATIONAL_ID_LENGTH {
        violations.push(NationalIdViolation::BadLength);
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    let digits: Vec<u32> = national_id.bytes().map(|b| u32::from(b - b'0')).collect();

    if digits.iter().all(|d| *d == digits[0]) {
        return Err(vec![NationalIdViolation::RepeatedDigit]);
    }

    let first = check_digit(&digits[..9], 10);
    let second = check_digit(&digits[..10], 11);

    if digits[9] != first || digits[10] != second {
        return Err(vec![NationalIdViolation::ChecksumMismatch]);
    }

    Ok(())
}

/// Validate a professional license number (2 letters + 6 digits)
///
/// Input is trimmed and uppercased before checking, so matching is
/// case-insensitive.
pub fn validate_license_number(license_number: &str) -> Result<(), Vec<LicenseNumberViolation>> {
    let license_number = license_number.trim().to_uppercase();

    if license_number.is_empty() {
        return Err(vec![LicenseNumberViolation::Empty]);
    }

    if license_number.chars().count() != LICENSE_NUMBER_LENGTH {
        return Err(vec![LicenseNumberViolation::BadLength]);
    }

    if !LICENSE_NUMBER_PATTERN.is_match(&license_number) {
        return Err(vec![LicenseNumberViolation::BadFormat]);
    }

    Ok(())
}

/// Check a password against every complexity rule
///
/// The value is checked as given; no trimming happens here.
pub fn check_password_complexity(password: &str) -> Result<(), Vec<PasswordViolation>> {
    let length = password.chars().count();
    let mut violations = Vec::new();

    if length > MAX_PASSWORD_LENGTH {
        violations.push(PasswordViolation::TooLong);
    }

    if length < MIN_PASSWORD_LENGTH {
        violations.push(PasswordViolation::TooShort);
    }

    if password.chars().any(char::is_whitespace) {
        violations.push(PasswordViolation::HasWhitespace);
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordViolation::NoUpper);
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PasswordViolation::NoLower);
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PasswordViolation::NoDigit);
    }

    if !password.chars().any(|c| PASSWORD_SPECIAL_CHARACTERS.contains(c)) {
        violations.push(PasswordViolation::NoSpecial);
    }

    into_result(violations)
}

/// Weighted mod-11 check digit over `digits`, weights counting down from `weight_start`
fn check_digit(digits: &[u32], weight_start: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((1..=weight_start).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    let remainder = sum % 11;

    if remainder < 2 { 0 } else { 11 - remainder }
}

fn into_result<V>(violations: Vec<V>) -> Result<(), Vec<V>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Name tests
    #[test]
    fn test_valid_names() {
        assert!(validate_name("João Cabral").is_ok());
        assert!(validate_name("JOÃO CABRAL").is_ok());
        assert!(validate_name("Zoë").is_ok());
        assert!(validate_name("  Maria da Silva  ").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_name(""), Err(vec![NameViolation::Empty]));
        assert_eq!(validate_name("   "), Err(vec![NameViolation::Empty]));
    }

    #[test]
    fn test_name_with_invalid_characters() {
        for name in ["João123", "João@Cabral", "João-Cabral", "O'Neil", "Ana\tLima"] {
            assert_eq!(
                validate_name(name),
                Err(vec![NameViolation::InvalidChars]),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_name_with_doubled_spaces() {
        assert_eq!(
            validate_name("João     Cabral"),
            Err(vec![NameViolation::InvalidChars])
        );
    }

    #[test]
    fn test_name_trailing_space_is_trimmed() {
        assert!(validate_name("João Cabral ").is_ok());
    }

    #[test]
    fn test_name_too_long() {
        let name = "A".repeat(151);
        assert_eq!(validate_name(&name), Err(vec![NameViolation::TooLong]));

        let name = "Á".repeat(150);
        assert!(validate_name(&name).is_ok());
    }

    #[test]
    fn test_name_collects_all_violations() {
        let name = "1".repeat(151);
        assert_eq!(
            validate_name(&name),
            Err(vec![NameViolation::TooLong, NameViolation::InvalidChars])
        );
    }

    // National ID tests
    #[test]
    fn test_valid_national_id() {
        assert!(validate_national_id("52998224725").is_ok());
        assert!(validate_national_id("  52998224725\n").is_ok());
    }

    #[test]
    fn test_empty_national_id() {
        assert_eq!(validate_national_id(""), Err(vec![NationalIdViolation::Empty]));
        assert_eq!(validate_national_id(" \t "), Err(vec![NationalIdViolation::Empty]));
    }

    #[test]
    fn test_national_id_bad_length() {
        assert_eq!(
            validate_national_id("123"),
            Err(vec![NationalIdViolation::BadLength])
        );
    }

    #[test]
    fn test_national_id_with_letters() {
        assert_eq!(
            validate_national_id("abc98224725"),
            Err(vec![NationalIdViolation::NonDigit])
        );
        assert_eq!(
            validate_national_id("529.982.247-25"),
            Err(vec![NationalIdViolation::NonDigit, NationalIdViolation::BadLength])
        );
    }

    #[test]
    fn test_national_id_non_ascii_digits() {
        assert_eq!(
            validate_national_id("٥٢٩٩٨٢٢٤٧٢٥"),
            Err(vec![NationalIdViolation::NonDigit])
        );
    }

    #[test]
    fn test_national_id_repeated_digits() {
        for digit in '0'..='9' {
            let id: String = std::iter::repeat_n(digit, 11).collect();
            assert_eq!(
                validate_national_id(&id),
                Err(vec![NationalIdViolation::RepeatedDigit])
            );
        }
    }

    #[test]
    fn test_national_id_checksum_mismatch() {
        assert_eq!(
            validate_national_id("52998224724"),
            Err(vec![NationalIdViolation::ChecksumMismatch])
        );
        assert_eq!(
            validate_national_id("52998224715"),
            Err(vec![NationalIdViolation::ChecksumMismatch])
        );
    }

    #[test]
    fn test_check_digit() {
        let digits = [5, 2, 9, 9, 8, 2, 2, 4, 7, 2];
        assert_eq!(check_digit(&digits[..9], 10), 2);
        assert_eq!(check_digit(&digits, 11), 5);
        // remainder below 2 maps to zero
        assert_eq!(check_digit(&[1, 0, 0, 0, 0, 0, 0, 0, 1], 10), 0);
    }

    // License number tests
    #[test]
    fn test_valid_license_numbers() {
        assert!(validate_license_number("SP123456").is_ok());
        assert!(validate_license_number("sp123456").is_ok());
        assert!(validate_license_number("sP123456").is_ok());
        assert!(validate_license_number(" rj654321 ").is_ok());
    }

    #[test]
    fn test_empty_license_number() {
        assert_eq!(
            validate_license_number("  "),
            Err(vec![LicenseNumberViolation::Empty])
        );
    }

    #[test]
    fn test_license_number_bad_length() {
        assert_eq!(
            validate_license_number("SP12345"),
            Err(vec![LicenseNumberViolation::BadLength])
        );
        assert_eq!(
            validate_license_number("SP1234567"),
            Err(vec![LicenseNumberViolation::BadLength])
        );
    }

    #[test]
    fn test_license_number_bad_format() {
        assert_eq!(
            validate_license_number("12345678"),
            Err(vec![LicenseNumberViolation::BadFormat])
        );
        assert_eq!(
            validate_license_number("ABCDEFGH"),
            Err(vec![LicenseNumberViolation::BadFormat])
        );
        assert_eq!(
            validate_license_number("S1234567"),
            Err(vec![LicenseNumberViolation::BadFormat])
        );
    }

    // Password tests
    #[test]
    fn test_valid_passwords() {
        assert!(check_password_complexity("Abcdefghijk1!").is_ok());
        assert!(check_password_complexity("Abcdefjhijk1!").is_ok());
        assert!(check_password_complexity("Zz9~Zz9~Zz9~").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        assert_eq!(
            check_password_complexity("A1!a"),
            Err(vec![PasswordViolation::TooShort])
        );
    }

    #[test]
    fn test_password_too_long() {
        let password = format!("Aa1!{}", "x".repeat(252));
        assert_eq!(
            check_password_complexity(&password),
            Err(vec![PasswordViolation::TooLong])
        );
    }

    #[test]
    fn test_password_missing_character_classes() {
        assert_eq!(
            check_password_complexity("abcdefghijk1!"),
            Err(vec![PasswordViolation::NoUpper])
        );
        assert_eq!(
            check_password_complexity("ABCDEFGHIJK1!"),
            Err(vec![PasswordViolation::NoLower])
        );
        assert_eq!(
            check_password_complexity("Abcdefghijk!"),
            Err(vec![PasswordViolation::NoDigit])
        );
        assert_eq!(
            check_password_complexity("Abcdefghijk1"),
            Err(vec![PasswordViolation::NoSpecial])
        );
    }

    #[test]
    fn test_password_with_whitespace() {
        assert_eq!(
            check_password_complexity("Abcde fghijk1!"),
            Err(vec![PasswordViolation::HasWhitespace])
        );
    }

    #[test]
    fn test_password_collects_all_violations() {
        assert_eq!(
            check_password_complexity(""),
            Err(vec![
                PasswordViolation::TooShort,
                PasswordViolation::NoUpper,
                PasswordViolation::NoLower,
                PasswordViolation::NoDigit,
                PasswordViolation::NoSpecial,
            ])
        );
    }

    #[test]
    fn test_every_special_character_is_accepted() {
        for special in PASSWORD_SPECIAL_CHARACTERS.chars() {
            let password = format!("Abcdefghijk1{special}");
            assert!(
                check_password_complexity(&password).is_ok(),
                "{special:?} should count as a special character"
            );
        }
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            NameViolation::TooLong.to_string(),
            "Name must contain a maximum of 150 characters."
        );
        assert_eq!(
            NationalIdViolation::BadLength.to_string(),
            "National ID must contain exactly 11 digits."
        );
        assert_eq!(
            PasswordViolation::TooShort.to_string(),
            "Password must contain at least 12 characters."
        );
    }
}
