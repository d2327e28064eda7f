use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::content::normalize::DEFAULT_PLACEHOLDER_IMAGE;
use crate::listing::{ListingOptions, DEFAULT_FEATURED_COUNT, DEFAULT_PAGE_SIZE};
use crate::util::toml_date::TomlDate;

#[derive(Deserialize, Clone, Debug)]
pub struct Site {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    pub established: TomlDate,
}

#[derive(Deserialize, Debug)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub catalog: PathBuf,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_featured_count() -> usize {
    DEFAULT_FEATURED_COUNT
}

fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

#[derive(Deserialize, Debug)]
pub struct Defaults {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            page_size: default_page_size(),
            featured_count: default_featured_count(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl Defaults {
    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            page_size: self.page_size,
            featured_count: self.featured_count,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Debug)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Remote JSON providers replacing the catalog's blog posts and lodges.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Sources {
    pub blogs_url: Option<String>,
    pub lodges_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
    pub sources: Option<Sources>,
}

const EXE_DIR_VAR: &str = "${exe_dir}";

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    let Some(str_path) = path.to_str() else {
        return Ok(path);
    };
    if !str_path.starts_with(EXE_DIR_VAR) {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    Ok(PathBuf::from(str_path.replace(EXE_DIR_VAR, &exe_dir.to_string_lossy())))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
        catalog: parse_path(cfg.paths.catalog)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
