pub mod cli;
pub mod toml_config;

pub use toml_config::{CmsConfig, SiteConfig};

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "outdoor-reno-site")]
#[command(about = "Serve or export the Outdoor Renovations website")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        #[arg(long, help = "Address to listen on, e.g. 127.0.0.1:8080")]
        bind: Option<String>,
    },
    /// Render every static route to disk
    Export {
        #[arg(long, help = "Output directory")]
        output: Option<String>,

        #[arg(long, help = "Also write site.zip")]
        archive: bool,
    },
    /// Print the static route table
    Routes,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Config file (or environment defaults) with command-line overrides applied.
    pub fn site_config(&self) -> Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::from_file(path)?,
            None => SiteConfig::from_env(),
        };

        match &self.command {
            Command::Serve { bind: Some(bind) } => config.server.bind = bind.clone(),
            Command::Export { output, archive } => {
                if let Some(output) = output {
                    config.export.output_path = output.clone();
                }
                config.export.archive |= *archive;
            }
            _ => {}
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_export_overrides() {
        let cli = CliConfig::parse_from([
            "outdoor-reno-site",
            "export",
            "--output",
            "/tmp/site-out",
            "--archive",
        ]);
        let config = cli.site_config().unwrap();
        assert_eq!(config.export.output_path, "/tmp/site-out");
        assert!(config.export.archive);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = CliConfig::parse_from(["outdoor-reno-site", "serve", "--verbose", "--bind", "127.0.0.1:9000"]);
        assert!(cli.verbose);
        assert_eq!(cli.site_config().unwrap().server.bind, "127.0.0.1:9000");
    }
}
