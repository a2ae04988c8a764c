use std::net::{IpAddr, SocketAddr};

// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to load the configuration and call the `run_server`
// function from the crate's library.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = configuration::load_config()?;
    let host: IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);
    web_server::run_server(addr, config.analytics.default_time_range).await
}
