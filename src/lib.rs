pub mod adapters;
mod app;
mod assets;
pub mod auth;
mod catalog;
mod collection;
pub mod config;
mod export;
mod format;
pub mod ports;
mod state;
mod status;
mod store;
mod templates;
#[cfg(test)]
mod testing;
mod view;

use std::net::SocketAddr;

/// Builds the HTTP adapters from the configuration and serves the site.
pub async fn serve(addr: SocketAddr, config: config::AppConfig) {
    let store = adapters::HttpRemoteStore::new(&config.store_url);
    let uploader = config.upload.clone().map(adapters::HttpAssetUploader::new);
    let router = app::app(config, store, uploader);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, router).await.expect("server error");
}
