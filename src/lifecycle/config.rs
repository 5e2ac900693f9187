//! Command-line configuration.

use crate::framework::ControllerSettings;
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "fakedata-api")]
#[command(about = "Serves lazily generated fake data over a uniform CRUD API")]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Default `pageSize` for list requests
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: u64,

    /// Collection size generated on first retrieve or write
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub default_length: u64,

    /// Collection size used by regenerate when no `length` is given
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub regenerate_length: u64,

    /// Largest `pageSize` or `length` a request may ask for
    #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_length: u64,

    /// Seed for reproducible generated data
    #[arg(long)]
    pub seed: Option<u64>,

    /// Capacity of the state store request channel
    #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u64).range(1..))]
    pub buffer_size: u64,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
            page_size: 50,
            default_length: 50,
            regenerate_length: 100,
            max_length: 10_000,
            seed: None,
            buffer_size: 64,
            verbose: false,
        }
    }
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn buffer_size(&self) -> usize {
        to_usize(self.buffer_size)
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            default_page_size: to_usize(self.page_size),
            default_length: to_usize(self.default_length),
            regenerate_length: to_usize(self.regenerate_length),
            max_length: to_usize(self.max_length),
            seed: self.seed,
        }
    }
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
