// File: crates/btcchart/src/server.rs
// Summary: Webhook endpoint: POST a Nostr event, get back a signed chart reply.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use log::{error, info};
use nostr::{Event, Keys};
use tokio::net::TcpListener;

use crate::db::PriceStore;
use crate::render;
use crate::upload::Uploader;
use crate::event;
use timechart::{RenderOptions, TimeTicker};

const BANNER: &str = "ビットコインチャート\n";

pub struct AppState {
    pub store: PriceStore,
    pub uploader: Uploader,
    pub keys: Keys,
    pub ticker: TimeTicker,
    pub rows: i64,
}

pub async fn run(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("started {}", addr);
    let state = Arc::new(state);
    loop {
        let (stream, _) = listener.accept().await?;
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(err) = serve_connection(stream, state).await {
                error!("connection error: {err}");
            }
        });
    }
}

async fn serve_connection(
    stream: tokio::net::TcpStream,
    state: Arc<AppState>,
) -> Result<(), hyper::Error> {
    let io = TokioIo::new(stream);
    let service = service_fn(move |req: Request<Incoming>| {
        let state = Arc::clone(&state);
        async move { Ok::<_, hyper::Error>(handle_request(req, state).await) }
    });
    http1::Builder::new().serve_connection(io, service).await
}

async fn handle_request(req: Request<Incoming>, state: Arc<AppState>) -> Response<Full<Bytes>> {
    if req.method() != Method::POST {
        return text_response(StatusCode::OK, BANNER);
    }

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => return text_response(StatusCode::BAD_REQUEST, &err.to_string()),
    };
    let trigger: Event = match serde_json::from_slice(&body) {
        Ok(ev) => ev,
        Err(err) => return text_response(StatusCode::BAD_REQUEST, &err.to_string()),
    };

    match respond(&trigger, &state).await {
        Ok(json) => json_response(StatusCode::OK, json),
        Err(err) => {
            error!("webhook failed: {err:#}");
            text_response(StatusCode::INTERNAL_SERVER_ERROR, &format!("{err:#}"))
        }
    }
}

/// Chart, upload, reply: the whole pipeline behind one webhook call.
async fn respond(trigger: &Event, state: &AppState) -> Result<String> {
    let rows = state.store.recent(state.rows).await?;
    let samples = render::samples_from_rows(&rows);
    let chart = render::price_chart(&samples, state.ticker)?;
    let png = chart.render_to_png_bytes(&RenderOptions::default())?;
    let url = state.uploader.upload(png).await?;
    let reply = event::reply(&state.keys, trigger, url)?;
    Ok(serde_json::to_string(&reply)?)
}

fn text_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    let body = Full::new(Bytes::from(body.to_owned()));
    Response::builder()
        .status(status)
        .header("content-type", "text/plain; charset=utf-8")
        .body(body.clone())
        .unwrap_or_else(|_| Response::new(body))
}

fn json_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    let body = Full::new(Bytes::from(body));
    Response::builder()
        .status(status)
        .header("content-type", "application/json; charset=utf-8")
        .body(body.clone())
        .unwrap_or_else(|_| Response::new(body))
}
