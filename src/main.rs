mod clients;
mod config;
mod form;
mod forms;
mod net;
mod places;
mod render;
mod types;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Form, Json, Router,
};
use clients::init_reqwest_client;
use config::Config;
use form::{Completion, Rejected};
use forms::FormStore;
use net::response::{ResponseError, Result};
use places::PlaceService;
use render::Renderer;
use tower_http::cors::CorsLayer;
use tracing::{info, instrument};
use types::{dto::form::FormValues, place::Place};

#[derive(Clone)]
struct AppState {
    places: PlaceService,
    forms: Arc<FormStore>,
    renderer: Arc<Renderer>,
}

impl AppState {
    fn new(config: &Config) -> color_eyre::Result<Self> {
        Ok(Self {
            places: PlaceService::new(config.places_url.clone()),
            forms: Arc::new(FormStore::new(config.max_forms)),
            renderer: Arc::new(Renderer::new()?),
        })
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    init_reqwest_client(config.places_timeout)?;
    let state = AppState::new(&config)?;

    info!(
        "Running on {}, querying {}",
        config.bind_addr, config.places_url
    );

    axum::Server::bind(&config.bind_addr)
        .serve(app(state).into_make_service())
        .await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(new_form))
        .route("/forms/:id", get(show_form).post(submit_form))
        .route("/forms/:id/places", get(form_places))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn unknown_form(id: u64) -> ResponseError {
    ResponseError::not_found(format!("No form with id {id}"))
}

async fn new_form(State(state): State<AppState>) -> Redirect {
    let id = state.forms.create().await;
    Redirect::to(&format!("/forms/{id}"))
}

async fn show_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Html<String>> {
    let page = state
        .forms
        .with(id, |form| state.renderer.page(id, form))
        .await
        .ok_or_else(|| unknown_form(id))??;
    Ok(Html(page))
}

#[instrument(skip(state, values))]
async fn submit_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(values): Form<FormValues>,
) -> Result<(StatusCode, Html<String>)> {
    let begun = state
        .forms
        .with(id, |form| form.begin(values))
        .await
        .ok_or_else(|| unknown_form(id))?;

    let status = match begun {
        Err(Rejected::Fields(errors)) => {
            info!(?errors, "submission has invalid fields");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Err(Rejected::Range(err)) => {
            info!("submission out of range: {err}");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        Ok(ticket) => {
            // Runs detached so the ticket is settled even if this handler is
            // dropped mid-request. No lock is held while waiting on the remote service.
            let task_state = state.clone();
            let completion = tokio::spawn(async move {
                let outcome = task_state.places.nearby(&ticket.query).await;
                task_state
                    .forms
                    .with(id, |form| form.complete(ticket, outcome))
                    .await
            })
            .await?
            .ok_or_else(|| unknown_form(id))?;
            match completion {
                Completion::Failed => StatusCode::BAD_GATEWAY,
                Completion::Applied | Completion::Superseded => StatusCode::OK,
            }
        }
    };

    let page = state
        .forms
        .with(id, |form| state.renderer.page(id, form))
        .await
        .ok_or_else(|| unknown_form(id))??;
    Ok((status, Html(page)))
}

async fn form_places(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Place>>> {
    let places = state
        .forms
        .with(id, |form| form.places().to_vec())
        .await
        .ok_or_else(|| unknown_form(id))?;
    Ok(Json(places))
}
