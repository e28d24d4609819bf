mod app;
mod auth;
mod client;
mod config;
mod error;
mod routes;
mod session;
mod ui;
mod validation;

use crate::{auth::AuthClient, client::Client, error::Result, session::FileSessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    let client = Client::new(&config.base_url)?;
    let store = FileSessionStore::new(&config.session_path);
    let transactions = engine::bundled_transactions()?;

    let mut app = app::App::new(config, AuthClient::new(client, store), transactions);
    app.run().await?;
    Ok(())
}
