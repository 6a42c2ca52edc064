//! Preview server collaborator.
//!
//! The studio does not render the site itself; it launches the site
//! project's own node dev server and reports on it:
//!
//! 1. Diagnose the node installation (`node -v`, non-fatal)
//! 2. Install dependencies when `node_modules` is missing
//! 3. Spawn the dev server (`npm start`) in the project root
//! 4. Probe the server port until it accepts a TCP connection, with a
//!    bounded timeout
//! 5. Optionally open a browser once the port is live
//!
//! Startup progress goes through a channel to a dedicated printer thread
//! so the status line is owned by exactly one writer.

use crate::{config::StudioConfig, log, logger::StatusLine};
use anyhow::{Context, Result, bail};
use regex::Regex;
use std::{
    net::TcpStream,
    path::Path,
    process::{Child, Command},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Delay between readiness probes.
const PROBE_INTERVAL: Duration = Duration::from_millis(250);

/// Oldest node major version the site toolchain is known to work with.
const MIN_NODE_MAJOR: u32 = 16;

/// Startup progress events for the printer thread.
enum Status {
    Pending(String),
    Ready(String),
    Failed(String, String),
}

/// Run the dev server until it exits.
///
/// Readiness-probe failure is reported but does not kill the server; a
/// slow first build may open the port well after the timeout.
pub fn launch(config: &StudioConfig) -> Result<()> {
    let root = config.get_root();
    let npm = &config.preview.command;

    diagnose_node();

    if !root.join("node_modules").exists() {
        log!("preview"; "node_modules missing, installing dependencies");
        install_dependencies(root, npm)?;
    }

    let mut child = spawn_server(root, npm)?;
    let url = config.preview.url();

    let (tx, rx) = mpsc::channel::<Status>();
    let printer = thread::spawn(move || {
        let mut status = StatusLine::new();
        for event in rx {
            match event {
                Status::Pending(message) => status.pending(&message),
                Status::Ready(message) => status.success(&message),
                Status::Failed(summary, detail) => status.error(&summary, &detail),
            }
        }
    });

    let timeout = Duration::from_secs(config.preview.ready_timeout);
    let ready = wait_ready(&config.preview.interface, config.preview.port, timeout, &tx);

    if ready {
        tx.send(Status::Ready(format!("preview ready at {url}"))).ok();
    } else {
        tx.send(Status::Failed(
            format!("{url} not reachable after {}s", config.preview.ready_timeout),
            "the server keeps running; it may just be slow to start".into(),
        ))
        .ok();
    }
    drop(tx);
    printer.join().ok();

    if ready && config.preview.open {
        open_browser(&url);
    }

    let status = child.wait().context("Failed waiting on the dev server")?;
    if !status.success() {
        bail!("dev server exited with {status}");
    }
    Ok(())
}

/// Report the installed node version; never fatal.
///
/// A missing or ancient node will surface later as an npm failure anyway,
/// so this only exists to make that failure easy to diagnose.
fn diagnose_node() {
    let output = match Command::new("node").arg("-v").output() {
        Ok(output) => output,
        Err(err) => {
            log!("preview"; "could not run `node -v`: {err}");
            return;
        }
    };

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    match parse_node_major(&version) {
        Some(major) if major < MIN_NODE_MAJOR => {
            log!("preview"; "node {version} is older than v{MIN_NODE_MAJOR}; the dev server may not start");
        }
        Some(_) => log!("preview"; "node {version}"),
        None => log!("preview"; "unrecognized node version output: {version}"),
    }
}

/// Extract the major version from `node -v` output (e.g. "v20.11.1").
fn parse_node_major(version: &str) -> Option<u32> {
    let re = Regex::new(r"v(\d+)").ok()?;
    re.captures(version)?.get(1)?.as_str().parse().ok()
}

/// Run `npm install` in the project root.
fn install_dependencies(root: &Path, npm: &[String]) -> Result<()> {
    let status = Command::new(&npm[0])
        .args(&npm[1..])
        .arg("install")
        .current_dir(root)
        .status()
        .with_context(|| format!("Failed to execute `{} install`", npm[0]))?;

    if !status.success() {
        bail!("`{} install` failed with {status}", npm[0]);
    }
    Ok(())
}

/// Spawn `npm start` in the project root, inheriting the terminal.
fn spawn_server(root: &Path, npm: &[String]) -> Result<Child> {
    Command::new(&npm[0])
        .args(&npm[1..])
        .arg("start")
        .current_dir(root)
        .spawn()
        .with_context(|| format!("Failed to spawn `{} start`", npm[0]))
}

/// Probe the server port until it accepts a connection or `timeout` passes.
fn wait_ready(interface: &str, port: u16, timeout: Duration, tx: &mpsc::Sender<Status>) -> bool {
    let addr = format!("{interface}:{port}");
    let deadline = Instant::now() + timeout;

    tx.send(Status::Pending(format!("waiting for http://{addr} ...")))
        .ok();

    loop {
        if TcpStream::connect(addr.as_str()).is_ok() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(PROBE_INTERVAL);
    }
}

/// Open `url` in the platform's default browser; failure is only logged.
fn open_browser(url: &str) {
    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", url]).spawn()
    } else {
        Command::new("xdg-open").arg(url).spawn()
    };

    if let Err(err) = result {
        log!("preview"; "could not open a browser: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_parse_node_major() {
        assert_eq!(parse_node_major("v20.11.1"), Some(20));
        assert_eq!(parse_node_major("v16.0.0"), Some(16));
        assert_eq!(parse_node_major("v8.17.0"), Some(8));
        assert_eq!(parse_node_major("garbage"), None);
        assert_eq!(parse_node_major(""), None);
    }

    #[test]
    fn test_wait_ready_listening_port() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, _rx) = mpsc::channel();

        assert!(wait_ready(
            "127.0.0.1",
            port,
            Duration::from_secs(2),
            &tx
        ));
    }

    #[test]
    fn test_wait_ready_times_out_on_closed_port() {
        // Bind then drop to get a port that is very likely closed.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let (tx, _rx) = mpsc::channel();

        assert!(!wait_ready(
            "127.0.0.1",
            port,
            Duration::from_millis(100),
            &tx
        ));
    }

    #[test]
    fn test_wait_ready_reports_pending() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = mpsc::channel();

        wait_ready("127.0.0.1", port, Duration::from_secs(2), &tx);

        let first = rx.try_recv().unwrap();
        assert!(matches!(first, Status::Pending(_)));
    }
}
