//! Bookkeeping for the port of the running server.

use snipshare_core::{get_port_file_path, Result, SnipshareError};
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;

/// Try to get the API server port from stored configuration
pub fn get_api_server_port() -> Result<u16> {
    read_port(&get_port_file_path())
}

/// Save the API port to the port file
pub fn save_api_port(port: u16) -> Result<()> {
    write_port(&get_port_file_path(), port)
}

/// Remove the port file once the server has stopped
pub fn clear_api_port() {
    let _ = fs::remove_file(get_port_file_path());
}

/// Check if a port is available by trying to bind to it
pub fn port_is_available(port: u16) -> bool {
    TcpListener::bind(("127.0.0.1", port)).is_ok()
}

pub fn read_port(path: &Path) -> Result<u16> {
    if !path.exists() {
        return Err(SnipshareError::Other(
            "API server port information not found".to_string(),
        ));
    }

    let mut file = fs::File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    contents
        .trim()
        .parse::<u16>()
        .map_err(|_| SnipshareError::Other("Invalid port stored in configuration".to_string()))
}

pub fn write_port(path: &Path, port: u16) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let mut file = fs::File::create(path)?;
    write!(file, "{}", port)?;

    Ok(())
}
