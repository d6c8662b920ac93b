mod cli;
mod error;
mod poller;

use clap::Parser;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use edgepoll_api::{Entity, PortStatusClient, SwitchState, SwitchStatusClient};
use edgepoll_config::Config;

use crate::cli::{Cli, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("error: {err}");
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = build_config(&cli.global)?;

    let device = SwitchStatusClient::new(config.connection()?)?;
    let ports: Vec<PortStatusClient> = config
        .interfaces
        .iter()
        .map(|iface| PortStatusClient::new(&device, iface.as_str()))
        .collect();

    if cli.once {
        poll_once(device, ports).await;
        return Ok(());
    }

    poll_forever(&config, device, ports).await;
    Ok(())
}

/// Poll every entity a single time and print `name: state` lines.
async fn poll_once(mut device: SwitchStatusClient, ports: Vec<PortStatusClient>) {
    device.update().await;
    println!("{}: {}", device.name(), device.state());

    for mut port in ports {
        port.update().await;
        println!("{}: {}", port.name(), port.state());
    }
}

/// Spawn one poll task per entity and run until ctrl-c.
async fn poll_forever(config: &Config, device: SwitchStatusClient, ports: Vec<PortStatusClient>) {
    let period = config.poll_interval();
    info!(
        host = %config.host,
        ports = ports.len(),
        interval = %humantime::format_duration(period),
        "starting poller"
    );

    let cancel = CancellationToken::new();
    let mut handles = Vec::new();
    let mut readers = Vec::new();

    for port in ports {
        let (tx, rx) = watch::channel(String::from("unknown"));
        readers.push((port.name().to_owned(), rx));
        handles.push(tokio::spawn(poller::poll_task(
            port,
            period,
            cancel.child_token(),
            tx,
        )));
    }

    let (tx, device_rx) = watch::channel(SwitchState::Unknown);
    let device_name = device.name().to_owned();
    handles.push(tokio::spawn(poller::poll_task(
        device,
        period,
        cancel.child_token(),
        tx,
    )));

    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to listen for ctrl-c; shutting down");
    }
    info!("shutting down");
    cancel.cancel();
    for handle in handles {
        let _ = handle.await;
    }

    info!(entity = %device_name, state = %*device_rx.borrow(), "final state");
    for (name, rx) in &readers {
        info!(entity = %name, state = %*rx.borrow(), "final state");
    }
}

/// Build a `Config` from the config file with CLI flag overrides, or
/// from flags alone when no file exists.
fn build_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = global
        .config
        .clone()
        .unwrap_or_else(edgepoll_config::config_path);

    let mut config = if path.exists() {
        edgepoll_config::load_from(&path)?
    } else {
        // No file: the three required fields must come from flags.
        match (&global.host, &global.username, &global.password) {
            (Some(host), Some(username), Some(password)) => Config {
                username: username.clone(),
                password: password.clone(),
                host: host.clone(),
                port: 443,
                timeout: 10,
                verify_ssl: true,
                interfaces: Vec::new(),
                interval: 30,
            },
            _ => return Err(CliError::NoConfig { path }),
        }
    };

    if let Some(ref host) = global.host {
        config.host.clone_from(host);
    }
    if let Some(ref username) = global.username {
        config.username.clone_from(username);
    }
    if let Some(ref password) = global.password {
        config.password.clone_from(password);
    }
    if let Some(port) = global.port {
        config.port = port;
    }
    if let Some(timeout) = global.timeout {
        config.timeout = timeout;
    }
    if global.insecure {
        config.verify_ssl = false;
    }
    if !global.interfaces.is_empty() {
        config.interfaces.clone_from(&global.interfaces);
    }
    if let Some(interval) = global.interval {
        config.interval = interval;
    }

    config.validate()?;
    Ok(config)
}
