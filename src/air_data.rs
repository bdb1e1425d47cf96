use crate::catalog::Metric;
use serde::{Deserialize, Deserializer};

/// Payload of `GET /air-data/latest`. Keys the firmware omits, or sends as
/// `null`, decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AirData {
    /// RFC 3339 with millis, e.g. `2024-01-02T15:04:05.000Z`.
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub score: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub dew_point: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub humid: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub abs_humid: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub co2: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub co2_est: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub co2_est_baseline: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub voc: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub voc_baseline: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub voc_h2_raw: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub voc_ethanol_raw: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pm25: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub pm10_est: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AirData {
    /// Decodes the first JSON value of a response body. Bytes after it are
    /// ignored and a top-level `null` yields all zeros.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut deserializer = serde_json::Deserializer::from_slice(body);
        Ok(Option::<Self>::deserialize(&mut deserializer)?.unwrap_or_default())
    }
}

/// Normalized snapshot of one sensor, Fahrenheit values already derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub score: f64,
    pub dew_point_c: f64,
    pub dew_point_f: f64,
    pub temp_c: f64,
    pub temp_f: f64,
    pub humid: f64,
    pub abs_humid: f64,
    pub co2: f64,
    pub co2_est: f64,
    pub co2_est_baseline: f64,
    pub voc: f64,
    pub voc_baseline: f64,
    pub voc_h2_raw: f64,
    pub voc_ethanol_raw: f64,
    pub pm25: f64,
    pub pm10_est: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub metric: Metric,
    pub sensor: String,
    pub value: f64,
}

impl Sample {
    pub fn collection_error(sensor: &str) -> Self {
        Self {
            metric: Metric::CollectionErrors,
            sensor: sensor.to_string(),
            value: 1.0,
        }
    }
}

pub fn celsius_to_fahrenheit(temp_c: f64) -> f64 {
    temp_c * 9.0 / 5.0 + 32.0
}

impl From<&AirData> for Reading {
    fn from(data: &AirData) -> Self {
        Self {
            score: data.score as f64,
            dew_point_c: data.dew_point,
            dew_point_f: celsius_to_fahrenheit(data.dew_point),
            temp_c: data.temp,
            temp_f: celsius_to_fahrenheit(data.temp),
            humid: data.humid,
            abs_humid: data.abs_humid,
            co2: data.co2 as f64,
            co2_est: data.co2_est as f64,
            co2_est_baseline: data.co2_est_baseline as f64,
            voc: data.voc as f64,
            voc_baseline: data.voc_baseline as f64,
            voc_h2_raw: data.voc_h2_raw as f64,
            voc_ethanol_raw: data.voc_ethanol_raw as f64,
            pm25: data.pm25 as f64,
            pm10_est: data.pm10_est as f64,
        }
    }
}

impl Reading {
    pub fn values(&self) -> [(Metric, f64); 16] {
        [
            (Metric::Score, self.score),
            (Metric::DewPoint, self.dew_point_c),
            (Metric::DewPointF, self.dew_point_f),
            (Metric::Temp, self.temp_c),
            (Metric::TempF, self.temp_f),
            (Metric::Humid, self.humid),
            (Metric::AbsHumid, self.abs_humid),
            (Metric::Co2, self.co2),
            (Metric::Co2Est, self.co2_est),
            (Metric::Co2EstBaseline, self.co2_est_baseline),
            (Metric::Voc, self.voc),
            (Metric::VocBaseline, self.voc_baseline),
            (Metric::VocH2Raw, self.voc_h2_raw),
            (Metric::VocEthanolRaw, self.voc_ethanol_raw),
            (Metric::Pm25, self.pm25),
            (Metric::Pm10Est, self.pm10_est),
        ]
    }

    pub fn into_samples(self, sensor: &str) -> Vec<Sample> {
        self.values()
            .into_iter()
            .map(|(metric, value)| Sample {
                metric,
                sensor: sensor.to_string(),
                value,
            })
            .collect()
    }
}
