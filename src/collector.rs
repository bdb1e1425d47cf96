
use crate::air_data::{AirData, Reading, Sample};
use crate::catalog::{self, MetricDesc};
use crate::devices::{Device, DeviceRegistry};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("non-success response: {0}")]
    Status(StatusCode),
    #[error("could not read body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("could not parse air data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Transport failures drop the sensor for the cycle without touching the
    /// error counter; everything past the response headers is counted.
    pub fn counts_as_error(&self) -> bool {
        !matches!(self, ScrapeError::Transport(_))
    }
}

/// Scrapes every registered sensor once per `collect` call.
#[derive(Clone)]
pub struct AirCollector {
    client: Client,
    registry: Arc<DeviceRegistry>,
}

impl AirCollector {
    pub fn new(registry: DeviceRegistry, request_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(request_timeout).build()?;
        Ok(Self::with_client(client, registry))
    }

    pub fn with_client(client: Client, registry: DeviceRegistry) -> Self {
        Self {
            client,
            registry: Arc::new(registry),
        }
    }

    pub fn describe(&self) -> &'static [MetricDesc] {
        catalog::catalog()
    }

    /// Runs one scrape round. Returns once every sensor has answered, failed or
    /// timed out; samples arrive in no particular order.
    pub async fn collect(&self) -> Vec<Sample> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Sample>();
        let mut tasks = JoinSet::new();

        for device in self.registry.iter() {
            let client = self.client.clone();
            let device = device.clone();
            let tx = tx.clone();
            tasks.spawn(async move {
                let result = scrape_device(&client, &device).await;
                for sample in outcome_samples(&device, result) {
                    // Receiver outlives every task.
                    let _ = tx.send(sample);
                }
            });
        }
        drop(tx);

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                tracing::error!(error=%err, "sensor scrape task failed");
            }
        }

        let mut samples = Vec::new();
        while let Some(sample) = rx.recv().await {
            samples.push(sample);
        }
        samples
    }
}

pub async fn scrape_device(client: &Client, device: &Device) -> Result<Reading, ScrapeError> {
    let response = client
        .get(device.endpoint())
        .send()
        .await
        .map_err(ScrapeError::Transport)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ScrapeError::Status(status));
    }

    let body = response.bytes().await.map_err(ScrapeError::Body)?;
    let data = AirData::decode(&body)?;
    tracing::debug!(
        sensor=%device.name,
        address=%device.address,
        timestamp=%data.timestamp,
        score=data.score,
        "air data scraped"
    );
    Ok(Reading::from(&data))
}

/// Maps one sensor's scrape result to the samples it contributes this cycle.
pub fn outcome_samples(device: &Device, result: Result<Reading, ScrapeError>) -> Vec<Sample> {
    match result {
        Ok(reading) => reading.into_samples(&device.name),
        Err(err) => {
            tracing::warn!(
                sensor=%device.name,
                address=%device.address,
                error=%err,
                "air data scrape failed"
            );
            if err.counts_as_error() {
                vec![Sample::collection_error(&device.name)]
            } else {
                Vec::new()
            }
        }
    }
}
