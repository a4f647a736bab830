use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recado {
    pub id: u64,
    pub autor: String,
    pub mensagem: String,
    pub data_criacao: String,
}

#[derive(Deserialize)]
pub struct NovoRecado {
    #[serde(default)]
    pub autor: String,
    #[serde(default)]
    pub mensagem: String,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    recados: Vec<Recado>,
}

impl Store {
    /// Append a record the way the live store does: next sequential id,
    /// creation time stamped now.
    pub fn insert(&mut self, autor: String, mensagem: String) -> Recado {
        self.next_id += 1;
        let recado = Recado {
            id: self.next_id,
            autor,
            mensagem,
            data_criacao: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.recados.push(recado.clone());
        recado
    }

    /// Insert a record verbatim, e.g. with a fixed timestamp for tests.
    pub fn seed(&mut self, recado: Recado) {
        self.next_id = self.next_id.max(recado.id);
        self.recados.push(recado);
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Db::default())
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/recados", get(list_recados).post(create_recado))
        .route("/recados/{id}", delete(delete_recado))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_recados(State(db): State<Db>) -> Json<Vec<Recado>> {
    let store = db.read().await;
    Json(store.recados.clone())
}

async fn create_recado(
    State(db): State<Db>,
    Json(input): Json<NovoRecado>,
) -> Result<(StatusCode, Json<Recado>), StatusCode> {
    let autor = input.autor.trim();
    let mensagem = input.mensagem.trim();
    if autor.is_empty() || mensagem.is_empty() {
        tracing::debug!("rejecting recado with blank fields");
        return Err(StatusCode::BAD_REQUEST);
    }
    let recado = db
        .write()
        .await
        .insert(autor.to_string(), mensagem.to_string());
    tracing::info!(id = recado.id, autor = %recado.autor, "recado created");
    Ok((StatusCode::CREATED, Json(recado)))
}

async fn delete_recado(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    // Ids match on their exact text form; "007" or "abc" are simply unknown.
    let index = store
        .recados
        .iter()
        .position(|r| r.id.to_string() == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    store.recados.remove(index);
    tracing::info!(%id, "recado deleted");
    Ok(StatusCode::NO_CONTENT)
}
