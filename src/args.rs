use crate::logger::LogLevel;
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Which completion provider answers the chat.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    #[default]
    Ollama,
    /// Replies with the input, no model needed.
    Echo,
}

/// Command line arguments for the tinychat binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "tinychat", about = "Single-page chat with a local language model")]
pub struct Args {
    /// Host interface to bind
    #[arg(long, env = "TINYCHAT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "TINYCHAT_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL for Ollama
    #[arg(long = "llm-url", env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    pub llm_url: String,

    /// Model name
    #[arg(long, default_value = "mistral:7b-instruct")]
    pub model: String,

    #[arg(long, value_enum, default_value = "ollama")]
    pub provider: ProviderKind,

    /// TOML file with generation settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logging verbosity when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Address to bind, accepting IPv4 and IPv6 hosts.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("invalid host {}", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["tinychat"]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.model, "mistral:7b-instruct");
        assert_eq!(args.provider, ProviderKind::Ollama);
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(args.config.is_none());
    }

    #[test]
    fn provider_flag_selects_echo() {
        let args = Args::try_parse_from(["tinychat", "--provider", "echo"]).unwrap();
        assert_eq!(args.provider, ProviderKind::Echo);
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(Args::try_parse_from(["tinychat", "--provider", "gpt"]).is_err());
    }

    #[test]
    fn binds_ipv6_host() {
        let args = Args::try_parse_from(["tinychat", "--host", "::", "--port", "9000"]).unwrap();
        assert_eq!(args.socket_addr().unwrap(), "[::]:9000".parse().unwrap());
    }

    #[test]
    fn default_bind_address() {
        let args = Args::try_parse_from(["tinychat"]).unwrap();
        assert_eq!(args.socket_addr().unwrap(), "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn rejects_bad_host() {
        let args = Args::try_parse_from(["tinychat", "--host", "not a host"]).unwrap();
        assert!(args.socket_addr().is_err());
    }
}
