//! Identifier handling for generated SQL
//!
//! Values always travel as bound parameters. Identifiers cannot, so every
//! table and column name is validated and quoted before it reaches a
//! statement.

use crate::error::ModelError;

/// Characters allowed in SQL identifiers (alphanumeric, underscore, dollar)
const ALLOWED_IDENTIFIER_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_$";

/// Escape a SQL identifier by doubling embedded quotes and wrapping it in
/// double quotes
pub fn escape_identifier(identifier: &str) -> String {
    let escaped = identifier.replace('"', "\"\"");
    format!("\"{}\"", escaped)
}

/// Validate that an identifier is safe for use in SQL
pub fn validate_identifier(identifier: &str) -> Result<(), ModelError> {
    let first = identifier
        .chars()
        .next()
        .ok_or_else(|| ModelError::Validation("Identifier cannot be empty".to_string()))?;

    // PostgreSQL limit is 63 characters
    if identifier.len() > 63 {
        return Err(ModelError::Validation(format!(
            "Identifier '{}' is too long (max 63 characters)",
            identifier
        )));
    }

    if let Some(c) = identifier.chars().find(|c| !ALLOWED_IDENTIFIER_CHARS.contains(*c)) {
        return Err(ModelError::Validation(format!(
            "Identifier '{}' contains invalid character '{}'",
            identifier, c
        )));
    }

    if first.is_ascii_digit() {
        return Err(ModelError::Validation(format!(
            "Identifier '{}' cannot start with a number",
            identifier
        )));
    }

    Ok(())
}

/// Validate and quote a possibly qualified name (`table.column`)
pub fn quote_identifier(name: &str) -> Result<String, ModelError> {
    let parts = name
        .split('.')
        .map(|part| {
            validate_identifier(part)?;
            Ok(escape_identifier(part))
        })
        .collect::<Result<Vec<_>, ModelError>>()?;
    if parts.len() > 2 {
        return Err(ModelError::Validation(format!(
            "Identifier '{}' has too many qualifiers",
            name
        )));
    }
    Ok(parts.join("."))
}

/// Quote `column` qualified by `table` unless it already names a table
pub fn qualify(table: &str, column: &str) -> Result<String, ModelError> {
    if column.contains('.') {
        quote_identifier(column)
    } else {
        quote_identifier(&format!("{}.{}", table, column))
    }
}
