use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "sentinel-server", version, about = "HTTP endpoint reliability monitor")]
pub struct Cli {
    /// Config file, defaults to $XDG_CONFIG_HOME/sentinel/config.toml
    #[arg(short, long, env = "SENTINEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "SENTINEL_BIND")]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "SENTINEL_PORT")]
    pub port: Option<u16>,

    /// Directory generated reports are written to
    #[arg(long, env = "SENTINEL_REPORTS_DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Override file settings with command line values
    pub fn apply(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind.clone_from(bind);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.reports_dir {
            config.reports.dir.clone_from(dir);
        }
    }
}
