use crate::air_data::Sample;
use crate::catalog::{Metric, MetricDesc, MetricKind, SENSOR_LABEL};
use anyhow::{Context, Result};
use prometheus::proto::MetricFamily;
use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};
use std::collections::HashMap;

enum FamilyVec {
    Gauge(GaugeVec),
    Counter(CounterVec),
}

/// Renders scrape batches in the Prometheus text format, alongside the
/// exporter's own process metrics.
pub struct Exposition {
    descriptors: &'static [MetricDesc],
    process: Registry,
}

impl Exposition {
    /// `descriptors` is the collector's `describe()` set, fixed for the
    /// lifetime of the process.
    pub fn new(descriptors: &'static [MetricDesc]) -> Result<Self> {
        let process = Registry::new();
        #[cfg(target_os = "linux")]
        process
            .register(Box::new(
                prometheus::process_collector::ProcessCollector::for_self(),
            ))
            .context("failed to register process collector")?;
        Ok(Self {
            descriptors,
            process,
        })
    }

    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    pub fn render(&self, samples: &[Sample]) -> Result<String> {
        let mut families = self.process.gather();
        families.extend(
            sample_families(self.descriptors, samples)
                .context("failed to build metric families")?,
        );

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buffer)
            .context("failed to encode metrics")?;
        String::from_utf8(buffer).context("metrics output is not utf-8")
    }
}

/// Builds one family per descriptor that has samples in this batch. Samples
/// for metrics outside `descriptors` are skipped.
pub fn sample_families(
    descriptors: &[MetricDesc],
    samples: &[Sample],
) -> prometheus::Result<Vec<MetricFamily>> {
    let registry = Registry::new();
    let mut vecs: HashMap<Metric, FamilyVec> = HashMap::with_capacity(descriptors.len());

    for desc in descriptors {
        let opts = Opts::new(desc.name, desc.help);
        let family = match desc.kind {
            MetricKind::Gauge => {
                let vec = GaugeVec::new(opts, &[SENSOR_LABEL])?;
                registry.register(Box::new(vec.clone()))?;
                FamilyVec::Gauge(vec)
            }
            MetricKind::Counter => {
                let vec = CounterVec::new(opts, &[SENSOR_LABEL])?;
                registry.register(Box::new(vec.clone()))?;
                FamilyVec::Counter(vec)
            }
        };
        vecs.insert(desc.metric, family);
    }

    for sample in samples {
        match vecs.get(&sample.metric) {
            Some(FamilyVec::Gauge(vec)) => vec
                .with_label_values(&[sample.sensor.as_str()])
                .set(sample.value),
            Some(FamilyVec::Counter(vec)) => vec
                .with_label_values(&[sample.sensor.as_str()])
                .inc_by(sample.value),
            None => {}
        }
    }

    // Families without samples are skipped by gather.
    Ok(registry.gather())
}
