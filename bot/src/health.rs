use axum::{routing::get, Router};
use eyre::WrapErr;
use log::info;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 3000;

const GREETING: &str = "Halo Dunia!";

/// Port for the liveness endpoint, `PORT` from the environment or [`DEFAULT_PORT`]
pub fn port_from_env() -> u16 {
    parse_port(dotenv::var("PORT").ok().as_deref())
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

async fn greet() -> &'static str {
    GREETING
}

pub fn router() -> Router {
    Router::new().route("/", get(greet))
}

pub async fn serve(port: u16) -> eyre::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let server = axum::Server::try_bind(&addr)
        .wrap_err_with(|| format!("failed to bind liveness endpoint to {addr}"))?;
    info!("liveness endpoint listening on {addr}");
    server.serve(router().into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn port_fallback() {
        check!(parse_port(None) == DEFAULT_PORT);
        check!(parse_port(Some("8080")) == 8080);
        check!(parse_port(Some(" 8081\n")) == 8081);
        check!(parse_port(Some("not a port")) == DEFAULT_PORT);
        check!(parse_port(Some("70000")) == DEFAULT_PORT);
    }

    #[tokio::test]
    async fn greeting() {
        check!(greet().await == "Halo Dunia!");
    }

    #[tokio::test]
    async fn taken_port_is_an_error() {
        let taken = std::net::TcpListener::bind(("0.0.0.0", 0)).unwrap();
        let port = taken.local_addr().unwrap().port();

        let served = tokio::spawn(serve(port)).await;
        let_assert!(Ok(Err(err)) = served);
        check!(err.to_string().contains(&port.to_string()));
    }
}
