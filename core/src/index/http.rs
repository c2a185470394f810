use std::time::Duration;

use tracing::{trace, warn};

use crate::error::{GatewayError, Result};

use super::{SpatialIndex, SpatialQuery};

const USER_AGENT: &str = concat!("bboxgate/", env!("CARGO_PKG_VERSION"));

/// A [`SpatialIndex`] reached over HTTP. The underlying client pools
/// connections and is cheap to share between requests.
#[derive(Debug, Clone)]
pub struct HttpSpatialIndex {
    client: reqwest::Client,
}

impl HttpSpatialIndex {
    /// Creates a client whose requests fail after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                GatewayError::DownstreamUnavailable(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }
}

impl SpatialIndex for HttpSpatialIndex {
    async fn fetch(&self, query: &SpatialQuery) -> Result<Vec<u8>> {
        let response = self.client.get(&query.url).send().await.map_err(|e| {
            warn!(
                url = %query.url,
                error = %e,
                is_connect = e.is_connect(),
                is_timeout = e.is_timeout(),
                "spatial index unavailable"
            );
            GatewayError::DownstreamUnavailable(e.to_string())
        })?;

        // the index reports errors in the body, so it is returned regardless
        // of the status
        let status = response.status();
        if !status.is_success() {
            warn!(url = %query.url, %status, "spatial index returned error status");
        }

        let body = response.bytes().await.map_err(|e| {
            warn!(url = %query.url, error = %e, "unable to read spatial index response");
            GatewayError::DownstreamUnavailable(e.to_string())
        })?;
        trace!(bytes = body.len(), "received spatial index response");

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use pretty_assertions::assert_eq;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use crate::{
        bbox::BoundingBox,
        config::IndexConfig,
        error::GatewayError,
        index::{SpatialIndex, SpatialQuery},
        translate::translate,
    };

    use super::HttpSpatialIndex;

    fn query(index: &IndexConfig) -> SpatialQuery {
        SpatialQuery::intersects(index, &BoundingBox::new(0.0, 0.0, 1.0, 1.0), None)
    }

    async fn listen() -> (TcpListener, IndexConfig) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let index = IndexConfig {
            port: listener.local_addr().unwrap().port(),
            ..Default::default()
        };
        (listener, index)
    }

    #[tokio::test]
    async fn unreachable_index() {
        // nothing listens on the discard port
        let index = IndexConfig {
            port: 9,
            ..Default::default()
        };
        let client = HttpSpatialIndex::new(Duration::from_secs(2)).unwrap();
        let result = client.fetch(&query(&index)).await;
        assert!(matches!(
            result,
            Err(GatewayError::DownstreamUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn silent_index_times_out() {
        let (listener, index) = listen().await;
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            std::future::pending::<()>().await;
        });

        let client = HttpSpatialIndex::new(Duration::from_millis(300)).unwrap();
        let start = Instant::now();
        let result = client.fetch(&query(&index)).await;

        assert!(matches!(
            result,
            Err(GatewayError::DownstreamUnavailable(_))
        ));
        assert!(start.elapsed() < Duration::from_secs(3));
        server.abort();
    }

    #[tokio::test]
    async fn error_status_body_is_returned() {
        const BODY: &str = r#"{"ok":false,"err":"key not found"}"#;

        let (listener, index) = listen().await;
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // consume the request head before answering
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 400 Bad Request\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{BODY}",
                BODY.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        let client = HttpSpatialIndex::new(Duration::from_secs(2)).unwrap();
        let body = client.fetch(&query(&index)).await.unwrap();
        server.await.unwrap();

        assert_eq!(body, BODY.as_bytes());
        assert_eq!(
            translate(&body),
            Err(GatewayError::IndexRejectedQuery("key not found".to_string()))
        );
    }
}
