//! Fixed set of metrics exported for every sensor.

pub const SENSOR_LABEL: &str = "sensor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Gauge,
    Counter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    CollectionErrors,
    Score,
    DewPoint,
    DewPointF,
    Temp,
    TempF,
    Humid,
    AbsHumid,
    Co2,
    Co2Est,
    Co2EstBaseline,
    Voc,
    VocBaseline,
    VocH2Raw,
    VocEthanolRaw,
    Pm25,
    Pm10Est,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDesc {
    pub metric: Metric,
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
}

const fn gauge(metric: Metric, name: &'static str, help: &'static str) -> MetricDesc {
    MetricDesc {
        metric,
        name,
        help,
        kind: MetricKind::Gauge,
    }
}

static CATALOG: [MetricDesc; 17] = [
    MetricDesc {
        metric: Metric::CollectionErrors,
        name: "awair_collection_errors_total",
        help: "Errors observed when collecting device metrics",
        kind: MetricKind::Counter,
    },
    gauge(Metric::Score, "awair_score", "Awair Score (0-100)"),
    gauge(
        Metric::DewPoint,
        "awair_dew_point",
        "The temperature at which water will condense and form into dew (C)",
    ),
    gauge(
        Metric::DewPointF,
        "awair_dew_point_f",
        "The temperature at which water will condense and form into dew (F)",
    ),
    gauge(Metric::Temp, "awair_temp", "Dry bulb temperature (C)"),
    gauge(Metric::TempF, "awair_temp_f", "Dry bulb temperature (F)"),
    gauge(Metric::Humid, "awair_humid", "Relative humidity (%)"),
    gauge(
        Metric::AbsHumid,
        "awair_abs_humid",
        "Absolute humidity (g/m^3)",
    ),
    gauge(Metric::Co2, "awair_co2", "Carbon Dioxide (ppm)"),
    gauge(
        Metric::Co2Est,
        "awair_co2_est",
        "Estimated Carbon Dioxide calculated by TVOC sensor (ppm)",
    ),
    gauge(
        Metric::Co2EstBaseline,
        "awair_co2_est_baseline",
        "A unitless value that represents the baseline from which the TVOC sensor partially derives its estimate",
    ),
    gauge(
        Metric::Voc,
        "awair_voc",
        "Total Volatile organic compounds (ppb)",
    ),
    gauge(
        Metric::VocBaseline,
        "awair_voc_baseline",
        "A unitless value that represents the baseline from which the TVOC sensor partially derives its TVOC output",
    ),
    gauge(
        Metric::VocH2Raw,
        "awair_voc_h2_raw",
        "A unitless value that represents the Hydrogen gas signal from which the TVOC sensor partially derives its TVOC output",
    ),
    gauge(
        Metric::VocEthanolRaw,
        "awair_voc_ethanol_raw",
        "A unitless value that represents the Ethanol gas signal from which the TVOC sensor partially derives its TVOC output",
    ),
    gauge(
        Metric::Pm25,
        "awair_pm25",
        "Particulate matter less than 2.5 microns in diameter (µg/m³)",
    ),
    gauge(
        Metric::Pm10Est,
        "awair_pm10_est",
        "Estimated particulate matter less than 10 microns in diameter (µg/m³ - calculated by the PM2.5 sensor)",
    ),
];

pub fn catalog() -> &'static [MetricDesc] {
    &CATALOG
}

impl Metric {
    pub fn desc(self) -> &'static MetricDesc {
        // CATALOG is declared in enum order.
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.desc().name
    }
}
