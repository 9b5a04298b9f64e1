use crate::domain::model::Replacement;
use crate::utils::error::{LayerError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LayerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LayerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LayerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_delimiter(field_name: &str, delimiter: char) -> Result<()> {
    if matches!(delimiter, '/' | '\\' | '\0') {
        return Err(LayerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: delimiter.escape_default().to_string(),
            reason: "Delimiter cannot be a path separator or a null byte".to_string(),
        });
    }
    Ok(())
}

/// The replacement text ends up inside a filename, so it must not introduce
/// separators or an extra directory delimiter.
pub fn validate_name_fragment(field_name: &str, value: &str, delimiter: char) -> Result<()> {
    if let Some(bad) = value.chars().find(|c| matches!(*c, '/' | '\\' | '\0') || *c == delimiter) {
        return Err(LayerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value cannot contain '{}'", bad.escape_default()),
        });
    }
    Ok(())
}

pub fn validate_extension(field_name: &str, extension: &str) -> Result<()> {
    validate_non_empty_string(field_name, extension)?;
    if extension.starts_with('.') {
        return Err(LayerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: extension.to_string(),
            reason: "Give the extension without the leading dot, e.g. png".to_string(),
        });
    }
    Ok(())
}

pub fn validate_replacements(
    field_name: &str,
    replacements: &[Replacement],
    delimiter: char,
) -> Result<()> {
    for (idx, replacement) in replacements.iter().enumerate() {
        if replacement.from.is_empty() {
            return Err(LayerError::ConfigValidationError {
                field: format!("{}[{}].from", field_name, idx),
                message: "Replacement source text cannot be empty".to_string(),
            });
        }
        validate_name_fragment(&format!("{}[{}].to", field_name, idx), &replacement.to, delimiter)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("layers_dir", "./HAE/layers-messy/").is_ok());
        assert!(validate_path("layers_dir", "").is_err());
        assert!(validate_path("layers_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_delimiter() {
        assert!(validate_delimiter("dir_delimiter", '=').is_ok());
        assert!(validate_delimiter("dir_delimiter", '#').is_ok());
        assert!(validate_delimiter("dir_delimiter", '/').is_err());
        assert!(validate_delimiter("dir_delimiter", '\\').is_err());
    }

    #[test]
    fn test_validate_name_fragment() {
        assert!(validate_name_fragment("color_name", "Purple", '=').is_ok());
        assert!(validate_name_fragment("color_name", "Pur=ple", '=').is_err());
        assert!(validate_name_fragment("color_name", "../x", '=').is_err());
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension("extension", "png").is_ok());
        assert!(validate_extension("extension", ".png").is_err());
        assert!(validate_extension("extension", " ").is_err());
    }

    #[test]
    fn test_validate_replacements() {
        let ok = vec![Replacement {
            from: "_final".to_string(),
            to: String::new(),
        }];
        assert!(validate_replacements("rename.replacements", &ok, '=').is_ok());

        let empty_from = vec![Replacement {
            from: String::new(),
            to: "x".to_string(),
        }];
        assert!(validate_replacements("rename.replacements", &empty_from, '=').is_err());
    }
}
