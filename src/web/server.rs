// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::config::Settings;
use crate::disposition::Webhook;
use crate::error::Fallible;
use crate::library::Library;
use crate::web::attach;
use crate::web::faq;
use crate::web::flashcards;
use crate::web::guide;
use crate::web::loss;
use crate::web::quiz;
use crate::web::state::ServerState;

pub async fn start_server(library: Library, settings: Settings) -> Fallible<()> {
    match &library.directory {
        Some(directory) => log::info!("Using content from {}", directory.display()),
        None => log::info!("Using built-in content."),
    }
    log::debug!(
        "Serving {} flashcards, {} quiz questions, and {} dispositions.",
        library.flashcards.len(),
        library.questions.len(),
        library.dispositions.len()
    );
    if settings.webhook_url.is_none() {
        log::warn!("No webhook URL configured. Logged losses will not be sent.");
    }
    let state = ServerState::new(library, Webhook::new(settings.webhook_url.clone()));
    let app = router(state);
    let bind = settings.bind();

    // Start a separate task to open the browser.
    if settings.open_browser {
        let bind = bind.clone();
        let url = format!("http://{bind}/");
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&bind).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            if let Err(e) = open::that(&url) {
                log::warn!("Failed to open {url}: {e}");
            }
        });
    }

    // Start the server.
    log::info!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped.");
    Ok(())
}

fn router(state: ServerState) -> Router {
    let app = Router::new();
    let app = app.route("/", get(root));
    let app = app.route(
        "/flashcards",
        get(flashcards::get_handler).post(flashcards::post_handler),
    );
    let app = app.route("/quiz", get(quiz::get_handler).post(quiz::post_handler));
    let app = app.route("/log", get(loss::get_handler).post(loss::post_handler));
    let app = app.route("/guide", get(guide::get_handler));
    let app = app.route("/attach", get(attach::get_handler));
    let app = app.route("/faq", get(faq::get_handler));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    app.with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down.");
}

async fn root() -> Redirect {
    Redirect::to("/flashcards")
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
