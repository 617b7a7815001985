use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::store::StoreConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server")]
#[command(about = "JSON todo list service")]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "BIND_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory served for paths outside /api
    #[arg(long = "assets", env = "ASSETS_DIR", default_value = "./assets")]
    pub assets_dir: PathBuf,

    /// JSON file holding the todos; in-memory when unset
    #[arg(long, env = "TODO_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            data_file: self.data_file.clone(),
        }
    }
}
