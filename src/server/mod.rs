pub mod api;

use crate::agent::TravelAgent;
use std::error::Error;
use std::sync::Arc;

pub struct Server {
    addr: String,
    agent: Arc<TravelAgent>,
    allowed_origin: String,
}

impl Server {
    pub fn new(addr: String, agent: Arc<TravelAgent>, allowed_origin: String) -> Self {
        Self {
            addr,
            agent,
            allowed_origin,
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.addr, self.agent.clone(), &self.allowed_origin).await
    }
}
