//! Input validation shared by registration and admin user management.

use crate::server::error::AppError;

pub const MIN_LOGIN_LENGTH: usize = 3;
pub const MAX_LOGIN_LENGTH: usize = 50;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_NAME_LENGTH: usize = 100;

pub fn validate_login(login: &str) -> Result<(), AppError> {
    let length = login.chars().count();
    if !(MIN_LOGIN_LENGTH..=MAX_LOGIN_LENGTH).contains(&length) {
        return Err(AppError::BadRequest(format!(
            "Login must be between {} and {} characters",
            MIN_LOGIN_LENGTH, MAX_LOGIN_LENGTH
        )));
    }

    if !login
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::BadRequest(
            "Login may only contain letters, digits, '_', '.' and '-'".to_string(),
        ));
    }

    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}

/// Trims a display name and rejects empty or overlong values.
pub fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }

    Ok(name.to_string())
}

/// Validates a school class and normalizes the letter to upper case.
///
/// Both parts are optional, but a letter without a grade is rejected.
///
/// # Returns
/// - `Ok((grade, letter))` - Validated class with the letter upper-cased
/// - `Err(AppError::BadRequest)` - Grade outside 1..=11 or letter not a single alphabetic character
pub fn normalize_class(
    grade: Option<i32>,
    letter: Option<String>,
) -> Result<(Option<i32>, Option<String>), AppError> {
    if let Some(grade) = grade {
        if !(1..=11).contains(&grade) {
            return Err(AppError::BadRequest(
                "Class grade must be between 1 and 11".to_string(),
            ));
        }
    }

    let letter = match letter.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(letter) => {
            let mut chars = letter.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_alphabetic() => Some(c.to_uppercase().collect::<String>()),
                _ => {
                    return Err(AppError::BadRequest(
                        "Class letter must be a single letter".to_string(),
                    ))
                }
            }
        }
    };

    if letter.is_some() && grade.is_none() {
        return Err(AppError::BadRequest(
            "Class letter requires a class grade".to_string(),
        ));
    }

    Ok((grade, letter))
}
