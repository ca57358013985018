use clap::Parser;

/// Runtime settings, read from flags with environment fallbacks.
#[derive(Debug, Clone, Parser)]
#[command(name = "user_ws")]
#[command(about = "In-memory user records REST service")]
#[command(version)]
pub struct Config {
    #[arg(long, env = "USERS_HOST", default_value = "127.0.0.1", help = "Address to bind")]
    pub host: String,

    #[arg(long, env = "USERS_PORT", default_value_t = 8080, help = "Port to listen on")]
    pub port: u16,

    #[arg(
        long,
        env = "USERS_STORE_BUFFER",
        default_value_t = 32,
        help = "Pending requests the store actor queues before callers wait"
    )]
    pub store_buffer: usize,

    #[arg(long, env = "USERS_WORKERS", help = "HTTP worker threads (defaults to CPU count)")]
    pub workers: Option<usize>,
}
