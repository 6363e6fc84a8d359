use bacpot_datalink::UdpTransport;
use bacpot_device::DeviceTemplate;
use bacpot_server::{BacnetServer, Responder, ServerConfig};
use bacpot_tools::{device_summary, AddressingArg};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "bacpot", about = "Emulated BACnet/IP device")]
struct Args {
    /// JSON device template.
    #[arg(long, default_value = "templates/default.json")]
    template: PathBuf,
    #[arg(long, default_value = "0.0.0.0:47808")]
    bind: SocketAddr,
    /// Broadcast address used for I-Am and I-Have.
    #[arg(long, default_value = "255.255.255.255")]
    broadcast: IpAddr,
    #[arg(long, value_enum, default_value_t = AddressingArg::Broadcast)]
    i_am_addressing: AddressingArg,
    /// Answer unknown confirmed services with Reject instead of silence.
    #[arg(long)]
    reject_unrecognized_services: bool,
    /// Load and validate the template, print it as JSON, and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let device = DeviceTemplate::from_path(&args.template)?.build()?;
    if args.check {
        println!("{}", serde_json::to_string_pretty(&device_summary(&device))?);
        return Ok(());
    }

    let config = ServerConfig {
        bind: args.bind,
        broadcast: args.broadcast,
        i_am_addressing: args.i_am_addressing.into_addressing(),
        reject_unrecognized_services: args.reject_unrecognized_services,
    };
    let transport = UdpTransport::bind(config.bind).await?;
    log::info!(
        "listening on {} (i-am {}, template {})",
        transport.local_addr()?,
        config.i_am_addressing,
        args.template.display()
    );

    let server = BacnetServer::new(transport, Responder::new(Arc::new(device), config));
    server.run().await?;
    Ok(())
}
