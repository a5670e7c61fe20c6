//! Command-line arguments and the optional RON configuration file.
//!
//! Flags win over the file; fields missing from both use defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use client_logging::{LogDestination, DEFAULT_LOG_FILE};
use docx_client_engine::{SyntectHighlighter, UploadSettings};
use log::LevelFilter;
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(name = "docx-client")]
#[command(version, about = "Convert DOCX documents through a remote conversion service", long_about = None)]
pub struct Cli {
    /// Conversion endpoint URL.
    #[arg(long)]
    pub endpoint: Option<String>,
    /// RON configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogTarget>,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
    /// Disable colours and syntax highlighting.
    #[arg(long)]
    pub no_color: bool,
    /// Check that the conversion service is reachable, then exit.
    #[arg(long)]
    pub check: bool,
    /// DOCX file to select at startup.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    /// `0` disables the connect timeout.
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: Option<u64>,
    pub highlight_theme: Option<String>,
    pub log: Option<LogTarget>,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub upload: UploadSettings,
    pub highlight_theme: String,
    pub color: bool,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

pub fn load(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let file = match &cli.config {
        Some(path) => read_file_config(path)?,
        None => FileConfig::default(),
    };
    Ok(merge(cli, file))
}

fn read_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    ron::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
}

pub fn merge(cli: &Cli, file: FileConfig) -> ClientConfig {
    let defaults = UploadSettings::default();
    let connect_timeout = match file.connect_timeout_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => defaults.connect_timeout,
    };

    let upload = UploadSettings {
        endpoint: cli
            .endpoint
            .clone()
            .or(file.endpoint)
            .unwrap_or(defaults.endpoint),
        connect_timeout,
        request_timeout: file.request_timeout_secs.map(Duration::from_secs),
        max_response_bytes: file
            .max_response_bytes
            .unwrap_or(defaults.max_response_bytes),
    };

    ClientConfig {
        upload,
        highlight_theme: file
            .highlight_theme
            .unwrap_or_else(|| SyntectHighlighter::DEFAULT_THEME.to_string()),
        color: !cli.no_color,
        log_destination: cli
            .log
            .or(file.log)
            .map(LogDestination::from)
            .unwrap_or_default(),
        log_level: cli.log_level.into(),
        log_file: file
            .log_file
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
    }
}
