use crate::domain::model::Replacement;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::report::OutputFormat;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "layer-reorg")]
#[command(about = "Rename exported NFT layer images and sort them into trait folders")]
pub struct CliConfig {
    #[arg(long, default_value = "./HAE/layers-messy/")]
    pub layers_dir: PathBuf,

    #[arg(long, default_value = "@COLOR", help = "Literal tag searched for in filenames")]
    pub color_tag: String,

    #[arg(long, default_value = "Purple", help = "Replaces the tag as @<color-name>")]
    pub color_name: String,

    #[arg(long, default_value = "=", help = "Splits a filename into <folder><delimiter><name>")]
    pub dir_delimiter: char,

    #[arg(long, default_value = "png", help = "Case-sensitive extension to process")]
    pub extension: String,

    #[arg(long, help = "Replace every occurrence of the tag, not just the first")]
    pub replace_all: bool,

    #[arg(long, help = "Create missing trait folders instead of failing")]
    pub create_dirs: bool,

    #[arg(long, help = "Overwrite files already present at the destination")]
    pub overwrite: bool,

    #[arg(long, help = "Show what would be moved without touching any file")]
    pub dry_run: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn layers_dir(&self) -> &Path {
        &self.layers_dir
    }

    fn color_tag(&self) -> &str {
        &self.color_tag
    }

    fn color_name(&self) -> &str {
        &self.color_name
    }

    fn dir_delimiter(&self) -> char {
        self.dir_delimiter
    }

    fn extension(&self) -> &str {
        &self.extension
    }

    fn replace_all(&self) -> bool {
        self.replace_all
    }

    fn extra_replacements(&self) -> &[Replacement] {
        // 命令列不支援額外替換規則，請使用 TOML 配置
        &[]
    }

    fn create_missing_dirs(&self) -> bool {
        self.create_dirs
    }

    fn overwrite_existing(&self) -> bool {
        self.overwrite
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("layers_dir", &self.layers_dir.to_string_lossy())?;
        validation::validate_non_empty_string("color_tag", &self.color_tag)?;
        validation::validate_delimiter("dir_delimiter", self.dir_delimiter)?;
        validation::validate_name_fragment("color_name", &self.color_name, self.dir_delimiter)?;
        validation::validate_extension("extension", &self.extension)?;
        Ok(())
    }
}
