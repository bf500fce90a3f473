pub mod agent;
pub mod models;
pub mod server;
pub mod config;
pub mod llm;
pub mod cli;

use agent::TravelAgent;
use cli::Args;
use llm::chat::new_client as new_chat_client;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Allowed Origin: {}", args.allowed_origin);
    info!("Gemini Model: {}", args.gemini_model);
    info!("Gemini Base URL: {}", args.gemini_base_url);
    info!("Request Timeout (secs): {}", args.request_timeout_secs);
    info!("-------------------------");

    let llm_config = args.llm_config()?;
    let chat_client = new_chat_client(&llm_config)?;
    let agent = Arc::new(TravelAgent::new(chat_client));

    let server = Server::new(args.server_addr.clone(), agent, args.allowed_origin.clone());
    server.run().await?;

    Ok(())
}
