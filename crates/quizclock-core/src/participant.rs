//! Participant identifier validation.

use crate::error::ParticipantError;

/// Check that `input` is a plausible email address.
///
/// The rule is deliberately coarse: somewhere in the input there must be a
/// run of non-whitespace characters shaped like `x@y.z`, each part non-empty.
/// The match is unanchored, so surrounding text does not cause rejection.
pub fn validate_participant(input: &str) -> Result<(), ParticipantError> {
    if input.is_empty() {
        return Err(ParticipantError::Missing);
    }
    if input.split_whitespace().any(token_looks_like_email) {
        Ok(())
    } else {
        Err(ParticipantError::Malformed)
    }
}

fn token_looks_like_email(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    // The earliest '@' with something before it leaves the most room for the domain.
    let Some(at) = chars.iter().enumerate().position(|(i, &c)| c == '@' && i > 0) else {
        return false;
    };
    chars
        .iter()
        .enumerate()
        .any(|(i, &c)| c == '.' && i > at + 1 && i + 1 < chars.len())
}
