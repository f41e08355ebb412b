//! Classification of SQLite constraint failures.

use crate::domain::entities::DuplicateKey;

/// Returns which unique key a failed insert collided on, if any.
///
/// SQLite reports no constraint name, only a message of the form
/// `UNIQUE constraint failed: links.short_code`, so the column is read
/// from the message. Primary key collisions on `id` use the same message
/// but a different extended result code.
pub fn duplicate_key_of(e: &sqlx::Error) -> Option<DuplicateKey> {
    let db_err = e.as_database_error()?;

    classify_constraint_message(db_err.message())
}

fn classify_constraint_message(message: &str) -> Option<DuplicateKey> {
    let columns = message.strip_prefix("UNIQUE constraint failed: ")?;

    if columns.contains("links.short_code") {
        Some(DuplicateKey::ShortCode)
    } else if columns.contains("links.id") {
        Some(DuplicateKey::Id)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_code_violation() {
        assert_eq!(
            classify_constraint_message("UNIQUE constraint failed: links.short_code"),
            Some(DuplicateKey::ShortCode)
        );
    }

    #[test]
    fn test_primary_key_violation() {
        assert_eq!(
            classify_constraint_message("UNIQUE constraint failed: links.id"),
            Some(DuplicateKey::Id)
        );
    }

    #[test]
    fn test_unrelated_constraint() {
        assert_eq!(
            classify_constraint_message("UNIQUE constraint failed: other.name"),
            None
        );
    }

    #[test]
    fn test_other_constraint_kind() {
        assert_eq!(
            classify_constraint_message("CHECK constraint failed: links.short_code"),
            None
        );
    }

    #[test]
    fn test_non_database_error() {
        assert_eq!(duplicate_key_of(&sqlx::Error::RowNotFound), None);
    }
}
