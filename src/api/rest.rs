use std::sync::Arc;
use std::convert::Infallible;
use serde::Serialize;
use tracing::error;
use warp::Filter;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{Json, WithStatus};
use crate::detection::AnomalySet;
use crate::monitor::{Monitor, MonitorError};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub anomalies: AnomalySet,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

/// Largest accepted `POST /data` body unless configured otherwise
pub const DEFAULT_BODY_LIMIT: u64 = 16 * 1024;

pub struct RestApi {
    monitor: Arc<Monitor>,
    body_limit: u64,
}

impl RestApi {
    pub fn new(monitor: Arc<Monitor>) -> Self {
        RestApi {
            monitor,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn with_body_limit(mut self, bytes: u64) -> Self {
        self.body_limit = bytes;
        self
    }

    pub fn routes(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        self.health()
            .or(self.post_data())
            .or(self.get_data())
    }

    fn health(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        warp::path::end()
            .and(warp::get())
            .map(|| {
                let response = HealthResponse {
                    status: "running",
                    message: "Flask server is running!",
                };
                warp::reply::json(&response)
            })
    }

    fn post_data(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let monitor = Arc::clone(&self.monitor);

        // Raw bytes so that decode failures get the same error body as everything else
        warp::path!("data")
            .and(warp::post())
            .and(warp::body::content_length_limit(self.body_limit))
            .and(warp::body::bytes())
            .and_then(move |body: Bytes| {
                let monitor = Arc::clone(&monitor);
                async move {
                    let reply = match monitor.ingest_blocking(body).await {
                        Ok(anomalies) => {
                            let response = IngestResponse {
                                status: "success",
                                anomalies,
                            };
                            warp::reply::with_status(warp::reply::json(&response), StatusCode::OK)
                        }
                        Err(err) => error_reply("failed to ingest reading", err),
                    };
                    Ok::<WithStatus<Json>, Infallible>(reply)
                }
            })
    }

    fn get_data(&self) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let monitor = Arc::clone(&self.monitor);

        warp::path!("data")
            .and(warp::get())
            .and_then(move || {
                let monitor = Arc::clone(&monitor);
                async move {
                    let reply = match monitor.snapshot_blocking().await {
                        Ok(snapshot) => {
                            warp::reply::with_status(warp::reply::json(&snapshot), StatusCode::OK)
                        }
                        Err(err) => error_reply("failed to read latest record", err),
                    };
                    Ok::<WithStatus<Json>, Infallible>(reply)
                }
            })
    }
}

fn error_reply(context: &str, err: MonitorError) -> WithStatus<Json> {
    error!(error = %err, "{}", context);
    let response = ErrorResponse {
        status: "error",
        message: err.to_string(),
    };
    warp::reply::with_status(warp::reply::json(&response), StatusCode::INTERNAL_SERVER_ERROR)
}
