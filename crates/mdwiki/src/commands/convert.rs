//! `mdwiki convert` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use mdwiki_config::{CliSettings, Config};
use mdwiki_renderer::{
    ParseOptions, SourceOptions, github_raw_root, missing_content_notice, plugin_repository,
    render_source,
};
use url::Url;

use crate::error::CliError;
use crate::output::Output;

/// Input name meaning standard input.
const STDIN: &str = "-";

/// Name assumed for content read from stdin.
const DEFAULT_FILE_NAME: &str = "README.md";

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert, or `-` for stdin.
    input: PathBuf,

    /// Base URL for relative links and images (overrides config).
    #[arg(long, conflicts_with = "github")]
    resource_root: Option<String>,

    /// Resolve relative links against this plugin's GitHub repository.
    #[arg(long, value_name = "REPO")]
    github: Option<String>,

    /// File name deciding Markdown or plain text (default: input name).
    #[arg(long)]
    file_name: Option<String>,

    /// Write markup to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep soft line breaks inside paragraphs.
    #[arg(long)]
    no_hard_wraps: bool,

    /// Emit a warning block instead of failing when the input is missing.
    #[arg(long)]
    missing_ok: bool,

    /// Path to configuration file (default: auto-discover mdwiki.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, rendering or writing fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            resource_root: self.resource_root.clone(),
            hard_wraps: self.no_hard_wraps.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "loaded configuration");
        }

        let file_name = self.file_name();
        if self.output.is_some() {
            output.info(&format!("Converting {}...", self.input.display()));
        }
        let markup = match self.read_input()? {
            Some(content) => {
                let cwd = std::env::current_dir()?;
                let options = SourceOptions {
                    resource_root: self.resolve_resource_root(&config, &cwd)?,
                    parse: ParseOptions {
                        hard_wraps: config.render.hard_wraps,
                        max_depth: config.render.max_depth,
                    },
                    code_languages: config.render.code_languages.clone(),
                };
                tracing::info!(
                    file_name = %file_name,
                    resource_root = %options.resource_root,
                    "converting"
                );
                render_source(&file_name, &content, &options)?
            }
            None => {
                output.warning(&format!("{} not found", self.input.display()));
                missing_content_notice(&file_name)
            }
        };

        self.write(&markup, output)
    }

    fn file_name(&self) -> String {
        if let Some(name) = &self.file_name {
            return name.clone();
        }
        if self.is_stdin() {
            return DEFAULT_FILE_NAME.to_owned();
        }
        self.input.file_name().map_or_else(
            || DEFAULT_FILE_NAME.to_owned(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    fn is_stdin(&self) -> bool {
        self.input.as_os_str() == STDIN
    }

    /// Read the document; `None` when it is missing and `--missing-ok` is set.
    fn read_input(&self) -> Result<Option<String>, CliError> {
        if self.is_stdin() {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            return Ok(Some(content));
        }

        match std::fs::read_to_string(&self.input) {
            Ok(content) => Ok(Some(content)),
            Err(err) if self.missing_ok && err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Pick the resource root: `--github`, then config (already overridden
    /// by `--resource-root`), then `cwd` as a `file://` URL.
    fn resolve_resource_root(&self, config: &Config, cwd: &Path) -> Result<String, CliError> {
        if let Some(repo) = &self.github {
            return Ok(github_raw_root(
                &config.github.organization,
                &plugin_repository(repo),
                &config.github.branch,
            ));
        }
        if let Some(root) = &config.render.resource_root {
            return Ok(root.clone());
        }
        Url::from_directory_path(cwd)
            .map(String::from)
            .map_err(|()| {
                CliError::Validation(format!(
                    "cannot use {} as resource root, pass --resource-root",
                    cwd.display()
                ))
            })
    }

    fn write(&self, markup: &str, output: &Output) -> Result<(), CliError> {
        let markup = markup.trim_end_matches('\n');
        match &self.output {
            Some(path) => {
                std::fs::write(path, format!("{markup}\n"))?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{markup}")?;
            }
        }
        Ok(())
    }
}
