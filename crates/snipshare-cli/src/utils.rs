use snipshare_core::{Result, SnipshareError};
use snipshare_server::server::utils::get_api_server_port;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Install the global tracing subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "snipshare={level},snipshare_cli={level},snipshare_core={level},snipshare_server={level},warp={level}"
        ))
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// The server to talk to: explicit URL, or the locally recorded port.
pub fn resolve_server_url(server: Option<String>) -> Result<String> {
    if let Some(url) = server {
        return Ok(url);
    }
    get_api_server_port()
        .map(|port| format!("http://127.0.0.1:{}", port))
        .map_err(|_| {
            SnipshareError::Other(
                "No server given and no running server found; pass --server or run 'snipshare serve'"
                    .to_string(),
            )
        })
}

/// Read the snippet body from a file, or stdin when no file is given.
pub fn read_code(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut code = String::new();
            io::stdin().read_to_string(&mut code)?;
            Ok(code)
        }
    }
}
