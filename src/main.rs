use anyhow::Context;
use ticketmaster_mcp::{init_tracing, McpServer, ServerConfig, TicketmasterClient, ToolHandler};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log_level)?;

    let client = TicketmasterClient::new(config.client).context("Failed to build Ticketmaster client")?;
    let server = McpServer::new(ToolHandler::new(client));

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    // In-flight calls are abandoned on interrupt
    tokio::select! {
        result = server.run(stdin, stdout) => result.context("stdio transport failed")?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupt received, shutting down"),
    }

    Ok(())
}
