//! Pure filename transform: tag substitution and destination extraction.
//! Nothing in here touches the filesystem.

use crate::domain::model::{RenamePlan, RenameRules};
use crate::utils::error::{LayerError, Result};
use std::ffi::OsStr;
use std::path::Path;

/// True when the entry's extension (text after the last dot) equals `extension`
/// exactly. Dot-files like `.png` have no extension.
pub fn is_candidate(name: &OsStr, extension: &str) -> bool {
    Path::new(name)
        .extension()
        .map_or(false, |ext| ext == OsStr::new(extension))
}

fn replace(name: &str, from: &str, to: &str, all: bool) -> String {
    if from.is_empty() {
        return name.to_string();
    }
    if all {
        name.replace(from, to)
    } else {
        name.replacen(from, to, 1)
    }
}

/// Applies the color tag and then every extra replacement, in order.
pub fn substitute(name: &str, rules: &RenameRules) -> String {
    let mut result = replace(
        name,
        &rules.color_tag,
        &rules.color_replacement(),
        rules.replace_all,
    );
    for extra in &rules.extra_replacements {
        result = replace(&result, &extra.from, &extra.to, rules.replace_all);
    }
    result
}

/// Splits `name` into `(subdir, final_name)` when it holds exactly one
/// delimiter with text on both sides. Anything else stays in the root unchanged.
pub fn split_destination(name: &str, delimiter: char) -> (Option<String>, String) {
    let parts: Vec<&str> = name.split(delimiter).collect();
    match parts.as_slice() {
        [dir, file] if !dir.is_empty() && !file.is_empty() => {
            (Some((*dir).to_string()), (*file).to_string())
        }
        _ => (None, name.to_string()),
    }
}

fn unsafe_segment(file: &str, segment: &str) -> LayerError {
    LayerError::UnsafeDestination {
        file: file.to_string(),
        segment: segment.to_string(),
    }
}

/// A derived folder must be one plain path component on this platform.
fn check_subdir(file: &str, segment: &str) -> Result<()> {
    if segment == "." || segment == ".." || segment.chars().any(std::path::is_separator) {
        return Err(unsafe_segment(file, segment));
    }
    Ok(())
}

pub fn plan(original_name: &str, rules: &RenameRules) -> Result<RenamePlan> {
    let substituted_name = substitute(original_name, rules);
    let (destination_subdir, final_name) = split_destination(&substituted_name, rules.dir_delimiter);

    if let Some(dir) = &destination_subdir {
        check_subdir(original_name, dir)?;
    }

    let plan = RenamePlan {
        original_name: original_name.to_string(),
        substituted_name,
        destination_subdir,
        final_name,
    };
    if !plan.is_noop() && plan.final_name.chars().any(std::path::is_separator) {
        return Err(unsafe_segment(original_name, &plan.final_name));
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Replacement;

    fn rules() -> RenameRules {
        RenameRules::default()
    }

    #[test]
    fn test_extension_filter_is_exact() {
        assert!(is_candidate(OsStr::new("Body.png"), "png"));
        assert!(is_candidate(OsStr::new("Arms=Long#1.png"), "png"));
        assert!(!is_candidate(OsStr::new("Body.PNG"), "png"));
        assert!(!is_candidate(OsStr::new("Body.jpg"), "png"));
        assert!(!is_candidate(OsStr::new("Body"), "png"));
        assert!(!is_candidate(OsStr::new(".png"), "png"));
        assert!(!is_candidate(OsStr::new("Body.png.bak"), "png"));
    }

    #[test]
    fn test_substitutes_first_occurrence_only() {
        let result = substitute("a@COLOR-b@COLOR.png", &rules());
        assert_eq!(result, "a@Purple-b@COLOR.png");
    }

    #[test]
    fn test_substitutes_all_when_requested() {
        let rules = RenameRules {
            replace_all: true,
            ..rules()
        };
        assert_eq!(substitute("a@COLOR-b@COLOR.png", &rules), "a@Purple-b@Purple.png");
    }

    #[test]
    fn test_extra_replacements_run_after_color_tag() {
        let rules = RenameRules {
            extra_replacements: vec![Replacement {
                from: "@Purple".to_string(),
                to: "@Violet".to_string(),
            }],
            ..rules()
        };
        assert_eq!(substitute("body@COLOR.png", &rules), "body@Violet.png");
    }

    #[test]
    fn test_split_with_single_delimiter() {
        let (dir, name) = split_destination("Arms=Long#1.png", '=');
        assert_eq!(dir.as_deref(), Some("Arms"));
        assert_eq!(name, "Long#1.png");
    }

    #[test]
    fn test_split_without_or_with_many_delimiters() {
        assert_eq!(split_destination("Body.png", '='), (None, "Body.png".to_string()));
        assert_eq!(split_destination("A=B=C.png", '='), (None, "A=B=C.png".to_string()));
    }

    #[test]
    fn test_split_with_empty_fragment_stays_in_root() {
        assert_eq!(split_destination("=x.png", '='), (None, "=x.png".to_string()));
        assert_eq!(split_destination("x.png=", '='), (None, "x.png=".to_string()));
    }

    #[test]
    fn test_plan_end_to_end_example() {
        let plan = plan("body@COLOR=skin.png", &rules()).unwrap();
        assert_eq!(plan.substituted_name, "body@Purple=skin.png");
        assert_eq!(plan.destination_subdir.as_deref(), Some("body@Purple"));
        assert_eq!(plan.final_name, "skin.png");
        assert_eq!(plan.destination_display(), "body@Purple/skin.png");
    }

    #[test]
    fn test_plan_is_noop_on_already_processed_name() {
        let plan = plan("skin.png", &rules()).unwrap();
        assert!(plan.is_noop());
    }

    #[cfg(unix)]
    #[test]
    fn test_plan_keeps_backslash_names_on_unix() {
        let flat = plan("Hat\\Cap.png", &rules()).unwrap();
        assert!(flat.is_noop());

        let nested = plan("Hat\\Top=Cap.png", &rules()).unwrap();
        assert_eq!(nested.destination_subdir.as_deref(), Some("Hat\\Top"));
        assert_eq!(nested.final_name, "Cap.png");
    }

    #[test]
    fn test_plan_rejects_parent_directory_segment() {
        let err = plan("..=escape.png", &rules()).unwrap_err();
        assert!(matches!(err, LayerError::UnsafeDestination { ref segment, .. } if segment == ".."));
    }
}
