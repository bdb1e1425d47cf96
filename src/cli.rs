use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "awair-exporter",
    version,
    about = "Prometheus exporter for Awair air-quality sensors"
)]
pub struct Args {
    /// Listen address for the metrics endpoint.
    #[arg(long, env = "AWAIR_EXPORTER_ADDRESS", default_value = "localhost:8888")]
    pub address: String,
    /// Per-sensor HTTP timeout in milliseconds.
    #[arg(long, env = "AWAIR_EXPORTER_REQUEST_TIMEOUT_MS", default_value_t = 2000)]
    pub request_timeout_ms: u64,
    /// Sensors to scrape, as name=host:port.
    #[arg(value_name = "NAME=ADDRESS")]
    pub devices: Vec<String>,
}
