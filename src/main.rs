//! SiloGuard daemon — main entry point.
//!
//! Hexagonal architecture around a single polled control loop:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  SerialLink / NullLink          LogEventSink             │
//! │  (TelemetryPort + ActuatorPort) (EventSink)              │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ──────────────        │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │          MonitorService (pure logic)           │      │
//! │  │  Scan · Risk · History                         │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  stdin command thread ──mpsc──▶ control loop (fixed tick)│
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Operator commands (`start`, `stop`, `quit`) arrive on stdin and are
//! applied between ticks, never mid-tick.

#![deny(unused_must_use)]

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use siloguard::adapters::log_sink::LogEventSink;
use siloguard::adapters::null::NullLink;
use siloguard::adapters::serial::SerialLink;
use siloguard::app::commands::AppCommand;
use siloguard::app::ports::{ActuatorPort, TelemetryPort};
use siloguard::app::service::MonitorService;
use siloguard::config::SystemConfig;
use siloguard::risk::GateModel;

struct Args {
    config_path: Option<PathBuf>,
    port: Option<String>,
    export_path: Option<PathBuf>,
    list_ports: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        config_path: None,
        port: None,
        export_path: None,
        list_ports: false,
    };
    let argv: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--config" => {
                i += 1;
                args.config_path = argv.get(i).map(PathBuf::from);
            }
            "--port" => {
                i += 1;
                args.port = argv.get(i).cloned();
            }
            "--export" => {
                i += 1;
                args.export_path = argv.get(i).map(PathBuf::from);
            }
            "--list-ports" => args.list_ports = true,
            other => {
                eprintln!("unknown argument: {other}");
                eprintln!(
                    "usage: siloguard [--config FILE] [--port PORT] [--export CSV] [--list-ports]"
                );
                std::process::exit(2);
            }
        }
        i += 1;
    }
    args
}

fn list_ports() {
    match serialport::available_ports() {
        Ok(ports) if ports.is_empty() => println!("no serial ports found"),
        Ok(ports) => {
            for p in ports {
                println!("{}", p.port_name);
            }
        }
        Err(e) => eprintln!("error listing ports: {e}"),
    }
}

fn load_config(path: Option<&Path>) -> SystemConfig {
    match path {
        Some(p) => match SystemConfig::load_from(p) {
            Ok(c) => {
                info!("config loaded from {}", p.display());
                c
            }
            Err(e) => {
                warn!("config load failed ({e:#}), using defaults");
                SystemConfig::default()
            }
        },
        None => SystemConfig::default(),
    }
}

/// Spawn the stdin reader. Each line becomes a command on the channel;
/// `None` on the channel means quit.
fn spawn_command_reader() -> mpsc::Receiver<Option<AppCommand>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let cmd = match line.trim().to_ascii_lowercase().as_str() {
                "" => continue,
                "start" => Some(AppCommand::StartScan),
                "stop" => Some(AppCommand::StopScan),
                "quit" | "exit" => None,
                other => {
                    eprintln!("unknown command: {other} (start | stop | quit)");
                    continue;
                }
            };
            let quit = cmd.is_none();
            if tx.send(cmd).is_err() || quit {
                break;
            }
        }
        // stdin closed: treat as quit.
        let _ = tx.send(None);
    });
    rx
}

/// The fixed-tick control loop. Generic over the link so the daemon runs
/// identically against a real rig or the offline adapter.
fn run_loop(
    mut service: MonitorService<GateModel>,
    mut link: impl TelemetryPort + ActuatorPort,
    commands: &mpsc::Receiver<Option<AppCommand>>,
    tick_interval: Duration,
) -> MonitorService<GateModel> {
    let mut sink = LogEventSink::new();
    service.start(&mut sink);

    loop {
        // Commands are applied atomically between ticks.
        let mut quit = false;
        for cmd in commands.try_iter() {
            match cmd {
                Some(cmd) => service.handle_command(cmd, &mut link, &mut sink),
                None => quit = true,
            }
        }
        if quit {
            // Leave the rig in a known-safe state on the way out.
            service.handle_command(AppCommand::StopScan, &mut link, &mut sink);
            return service;
        }

        service.tick(&mut link, &mut sink);
        std::thread::sleep(tick_interval);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    if args.list_ports {
        list_ports();
        return Ok(());
    }

    info!("SiloGuard v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config_path.as_deref());
    let tick_interval = Duration::from_millis(config.tick_interval_ms);
    let read_timeout = Duration::from_millis(config.read_timeout_ms);

    let port_name = args
        .port
        .or_else(|| config.serial_port.clone())
        .or_else(SerialLink::detect_port);

    let service = MonitorService::new(config.clone(), GateModel::new());
    let commands = spawn_command_reader();

    // A missing rig is not fatal: fall back to the offline link and keep
    // the loop available. The operator can restart once hardware appears.
    let service = match port_name {
        Some(name) => match SerialLink::open(&name, config.baud_rate, read_timeout) {
            Ok(link) => run_loop(service, link, &commands, tick_interval),
            Err(e) => {
                warn!("serial open failed ({e:#}), running offline");
                run_loop(service, NullLink, &commands, tick_interval)
            }
        },
        None => {
            warn!("no serial port found, running offline");
            run_loop(service, NullLink, &commands, tick_interval)
        }
    };

    if let Some(path) = args.export_path {
        std::fs::write(&path, service.history().to_csv())?;
        info!(
            "history exported: {} records -> {}",
            service.history().len(),
            path.display()
        );
    }

    Ok(())
}
