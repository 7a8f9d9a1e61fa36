use crate::cli::{Commands, StoreArgs};
use crate::client::ShareClient;
use crate::utils::{read_code, resolve_server_url};
use snipshare_core::{open_record_store, Config, PageLoader, Result};
use snipshare_server::server::utils::{get_api_server_port, port_is_available};
use snipshare_server::start_server;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn handle_command(config_path: Option<&Path>, command: Commands) -> Result<()> {
    match command {
        Commands::Serve(args) => handle_serve_command(config_path, &args),
        Commands::Share { file, server } => handle_share_command(file, server),
        Commands::Fetch { id, server } => handle_fetch_command(&id, server),
        Commands::Page { id, stores } => handle_page_command(config_path, &id, &stores),
        Commands::Port => handle_port_command(),
        Commands::Config(args) => handle_config_command(config_path, &args),
    }
}

/// Config file (or defaults) with command line overrides applied.
pub fn effective_config(config_path: Option<&Path>, args: &StoreArgs) -> Result<Config> {
    let mut config = Config::load_or_default(config_path)?;
    args.apply(&mut config)?;
    config.validate()?;
    Ok(config)
}

fn block_on<F: Future<Output = Result<()>>>(future: F) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

fn handle_serve_command(config_path: Option<&Path>, args: &StoreArgs) -> Result<()> {
    let config = effective_config(config_path, args)?;
    info!(addr = %config.server.socket_addr(), "starting snipshare API server");
    block_on(start_server(config))
}

fn handle_share_command(file: Option<PathBuf>, server: Option<String>) -> Result<()> {
    let code = read_code(file.as_deref())?;
    let server = resolve_server_url(server)?;

    block_on(async move {
        let client = ShareClient::new(&server)?;
        let id = client.create(code).await?;
        println!("{}", id);
        eprintln!("Fetch it with: snipshare fetch {}", id);
        Ok(())
    })
}

fn handle_fetch_command(id: &str, server: Option<String>) -> Result<()> {
    let server = resolve_server_url(server)?;

    block_on(async move {
        let snippet = ShareClient::new(&server)?.fetch(id).await?;
        print!("{}", snippet.code);
        Ok(())
    })
}

fn handle_page_command(config_path: Option<&Path>, id: &str, args: &StoreArgs) -> Result<()> {
    let config = effective_config(config_path, args)?;

    block_on(async move {
        let records = open_record_store(&config.durable.backend)?;
        let page = PageLoader::new(records, config.public_url()).load(id).await?;
        println!("{}", serde_json::to_string_pretty(&page)?);
        Ok(())
    })
}

fn handle_port_command() -> Result<()> {
    match get_api_server_port() {
        Ok(port) => {
            if port_is_available(port) {
                println!(
                    "snipshare API server was last started on port {} but is not running",
                    port
                );
            } else {
                println!("snipshare API server is running on port {}", port);
                println!("API available at: http://localhost:{}/api/share", port);
            }
            Ok(())
        }
        Err(_) => {
            println!("snipshare API server port information not found.");
            println!("Start one with 'snipshare serve'.");
            Ok(())
        }
    }
}

fn handle_config_command(config_path: Option<&Path>, args: &StoreArgs) -> Result<()> {
    let config = effective_config(config_path, args)?;
    println!("{}", serde_json::to_string_pretty(&config.redacted())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn overrides_beat_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "server": { "port": 4000 }, "ephemeral": { "ttl_secs": 120 } }"#)
            .unwrap();

        let args = StoreArgs {
            port: Some(5000),
            ..StoreArgs::default()
        };
        let config = effective_config(Some(&path), &args).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.ephemeral.ttl_secs, 120);
    }

    #[test]
    fn invalid_overrides_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let args = StoreArgs {
            ttl_secs: Some(0),
            ..StoreArgs::default()
        };
        assert!(effective_config(Some(&path), &args).is_err());
    }

    #[test]
    fn page_command_reads_the_records_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, "{}").unwrap();
        let records = dir.path().join("codes.json");
        fs::write(
            &records,
            r#"[{"id":"r1","created_at":"","updated_at":"","title":"T","description":"","code":"C"}]"#,
        )
        .unwrap();

        let args = StoreArgs {
            records_file: Some(records),
            ..StoreArgs::default()
        };
        handle_page_command(Some(&config_path), "r1", &args).unwrap();
        assert!(handle_page_command(Some(&config_path), "r2", &args).is_err());
    }
}
