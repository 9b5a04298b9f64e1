use crate::domain::model::Replacement;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{LayerError, Result};
use crate::utils::report::OutputFormat;
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_EXTENSION: &str = "png";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub layers: LayersConfig,
    pub rename: RenameConfig,
    #[serde(default)]
    pub moves: MovesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayersConfig {
    pub dir: PathBuf,
    pub extension: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameConfig {
    pub color_tag: String,
    pub color_name: String,
    pub dir_delimiter: char,
    pub replace_all: Option<bool>,
    pub replacements: Option<Vec<Replacement>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovesConfig {
    pub create_missing_dirs: Option<bool>,
    pub overwrite_existing: Option<bool>,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| LayerError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LayerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${LAYERS_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LayerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("layers.dir", &self.layers.dir.to_string_lossy())?;
        if let Some(extension) = &self.layers.extension {
            validation::validate_extension("layers.extension", extension)?;
        }
        validation::validate_non_empty_string("rename.color_tag", &self.rename.color_tag)?;
        validation::validate_delimiter("rename.dir_delimiter", self.rename.dir_delimiter)?;
        validation::validate_name_fragment(
            "rename.color_name",
            &self.rename.color_name,
            self.rename.dir_delimiter,
        )?;
        if let Some(replacements) = &self.rename.replacements {
            validation::validate_replacements(
                "rename.replacements",
                replacements,
                self.rename.dir_delimiter,
            )?;
        }
        Ok(())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.output.verbose.unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn layers_dir(&self) -> &Path {
        &self.layers.dir
    }

    fn color_tag(&self) -> &str {
        &self.rename.color_tag
    }

    fn color_name(&self) -> &str {
        &self.rename.color_name
    }

    fn dir_delimiter(&self) -> char {
        self.rename.dir_delimiter
    }

    fn extension(&self) -> &str {
        self.layers.extension.as_deref().unwrap_or(DEFAULT_EXTENSION)
    }

    fn replace_all(&self) -> bool {
        self.rename.replace_all.unwrap_or(false)
    }

    fn extra_replacements(&self) -> &[Replacement] {
        self.rename.replacements.as_deref().unwrap_or(&[])
    }

    fn create_missing_dirs(&self) -> bool {
        self.moves.create_missing_dirs.unwrap_or(false)
    }

    fn overwrite_existing(&self) -> bool {
        self.moves.overwrite_existing.unwrap_or(false)
    }

    fn dry_run(&self) -> bool {
        self.moves.dry_run.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[layers]
dir = "./HAE/layers-messy/"

[rename]
color_tag = "@COLOR"
color_name = "Purple"
dir_delimiter = "="
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.layers_dir(), Path::new("./HAE/layers-messy/"));
        assert_eq!(config.dir_delimiter(), '=');
        assert_eq!(config.extension(), "png");
        assert!(!config.replace_all());
        assert!(config.extra_replacements().is_empty());
        assert!(!config.create_missing_dirs());
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_toml_config() {
        let toml_content = r##"
[layers]
dir = "./layers"
extension = "webp"

[rename]
color_tag = "#TINT"
color_name = "Gold"
dir_delimiter = "~"
replace_all = true

[[rename.replacements]]
from = "_final"
to = ""

[moves]
create_missing_dirs = true
overwrite_existing = true
dry_run = true

[output]
format = "csv"
verbose = true
"##;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.extension(), "webp");
        assert_eq!(config.dir_delimiter(), '~');
        assert!(config.replace_all());
        assert_eq!(config.extra_replacements().len(), 1);
        assert!(config.create_missing_dirs());
        assert!(config.overwrite_existing());
        assert_eq!(config.output_format(), OutputFormat::Csv);
        assert!(config.dry_run());
        assert!(config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LAYER_REORG_TEST_COLOR", "Teal");

        let toml_content = r#"
[layers]
dir = "./layers"

[rename]
color_tag = "@COLOR"
color_name = "${LAYER_REORG_TEST_COLOR}"
dir_delimiter = "="
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.color_name(), "Teal");

        std::env::remove_var("LAYER_REORG_TEST_COLOR");
    }

    #[test]
    fn test_multi_char_delimiter_fails_to_parse() {
        let toml_content = r#"
[layers]
dir = "./layers"

[rename]
color_tag = "@COLOR"
color_name = "Purple"
dir_delimiter = "=="
"#;

        assert!(TomlConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[layers]
dir = "./layers"

[rename]
color_tag = ""
color_name = "Purple"
dir_delimiter = "="
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[layers]
dir = "./from-file"

[rename]
color_tag = "@COLOR"
color_name = "Purple"
dir_delimiter = "="
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.layers_dir(), Path::new("./from-file"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, LayerError::ConfigError { .. }));
    }
}
