//! # Ephemeris acquisition: remote source, fallback table, failover policy
//!
//! [`EphemerisProvider`] populates the body registry consumed by the
//! position resolver. Two sources exist:
//!
//! 1. **Remote** — one concurrent Horizons query per body
//!    ([`crate::jpl_request::elements_query`]), the whole batch bounded by a
//!    fixed timeout.
//! 2. **Fallback** — a hand-authored static table of J2000 osculating
//!    elements for the 9 classical bodies.
//!
//! Policy: the remote batch races the timeout; if the timeout fires, or any
//! single body fails (transport error, malformed payload, missing required
//! field), the *entire* batch collapses to the fallback table so that all
//! bodies stay on one consistent data source. When the timeout wins, the
//! outstanding remote tasks are aborted; no duplicate in-flight request
//! survives into a retry. Acquisition failures are recoverable by design:
//! [`EphemerisProvider::acquire`] never returns an error, it reports the
//! source it ended up using.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use itertools::Itertools;
use log::{debug, warn};
use reqwest::Client;
use tokio::task::JoinSet;

use crate::constants::{JulianDay, Planet, JD2000};
use crate::jpl_request::elements_query::{fetch_elements, HORIZONS_API_URL};
use crate::orbital_elements::OrbitalElements;
use crate::orrery_errors::OrreryError;

/// Bound on the remote acquisition race, per batch.
pub const ACQUISITION_TIMEOUT: Duration = Duration::from_secs(4);

/// Which source produced an element-set batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Remote,
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Remote => "remote",
            DataSource::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One acquisition outcome: a full element-set roster plus its provenance.
///
/// Consumers must treat this as a batch replace, never an incremental
/// merge: a new acquisition fully discards the previous roster.
#[derive(Debug, Clone)]
pub struct AcquisitionResult {
    pub elements: HashMap<Planet, OrbitalElements>,
    pub source: DataSource,
    pub used_fallback: bool,
}

/// Acquires orbital element sets from Horizons with bounded-latency
/// failover to the static table.
#[derive(Debug, Clone)]
pub struct EphemerisProvider {
    client: Client,
    base_url: String,
    timeout: Duration,
    force_fallback: bool,
}

impl Default for EphemerisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemerisProvider {
    pub fn new() -> Self {
        EphemerisProvider {
            client: Client::new(),
            base_url: HORIZONS_API_URL.to_string(),
            timeout: ACQUISITION_TIMEOUT,
            force_fallback: false,
        }
    }

    /// Override the Horizons endpoint (tests, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the acquisition timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Bypass the remote source entirely and serve the static table.
    pub fn with_force_fallback(mut self, force_fallback: bool) -> Self {
        self.force_fallback = force_fallback;
        self
    }

    /// Acquire element sets for the requested targets, as of a calendar date.
    ///
    /// The remote batch is raced against the configured timeout; any
    /// failure or a lost race collapses the whole batch to the fallback
    /// table. This call never fails: the result reports which source won.
    pub async fn acquire(&self, targets: &[Planet], as_of: NaiveDate) -> AcquisitionResult {
        if self.force_fallback {
            debug!("ephemeris acquisition forced to fallback table");
            return fallback_batch(targets);
        }

        let remote = tokio::time::timeout(self.timeout, self.fetch_remote_batch(targets, as_of));
        match remote.await {
            Ok(Ok(elements)) => {
                debug!(
                    "remote elements acquired for {}",
                    targets.iter().join(", ")
                );
                AcquisitionResult {
                    elements,
                    source: DataSource::Remote,
                    used_fallback: false,
                }
            }
            Ok(Err(err)) => {
                warn!("Horizons acquisition failed, using fallback table: {err}");
                fallback_batch(targets)
            }
            Err(_elapsed) => {
                // The JoinSet inside fetch_remote_batch is dropped here,
                // aborting every outstanding per-body request.
                warn!(
                    "Horizons acquisition timed out after {:?}, using fallback table",
                    self.timeout
                );
                fallback_batch(targets)
            }
        }
    }

    /// Fetch all targets concurrently; the first per-body failure fails
    /// the whole batch.
    async fn fetch_remote_batch(
        &self,
        targets: &[Planet],
        as_of: NaiveDate,
    ) -> Result<HashMap<Planet, OrbitalElements>, OrreryError> {
        let mut requests: JoinSet<Result<(Planet, OrbitalElements), OrreryError>> = JoinSet::new();

        for &planet in targets {
            let client = self.client.clone();
            let base_url = self.base_url.clone();
            requests.spawn(async move {
                let elements = fetch_elements(&client, &base_url, planet, as_of).await?;
                debug!("received elements for {planet}: a = {} AU", elements.semi_major_axis);
                Ok((planet, elements))
            });
        }

        let mut elements = HashMap::with_capacity(targets.len());
        while let Some(joined) = requests.join_next().await {
            let (planet, planet_elements) = joined??;
            elements.insert(planet, planet_elements);
        }

        Ok(elements)
    }
}

/// Build a full fallback batch for the requested targets.
pub fn fallback_batch(targets: &[Planet]) -> AcquisitionResult {
    let elements = targets
        .iter()
        .map(|&planet| (planet, fallback_elements(planet)))
        .collect();

    AcquisitionResult {
        elements,
        source: DataSource::Fallback,
        used_fallback: true,
    }
}

/// Hand-authored osculating elements at the J2000 epoch.
///
/// Angles in degrees, semi-major axes in AU, mean motions in degrees per
/// day, periods in days. Values follow the standard mean-element tables
/// used for visualization-grade propagation.
pub fn fallback_elements(planet: Planet) -> OrbitalElements {
    let (a, e, i, om, w, ma, n, period) = match planet {
        Planet::Mercury => (
            0.387098, 0.205630, 7.005, 48.331, 29.124, 174.796, 4.09233445, 87.969,
        ),
        Planet::Venus => (
            0.723332, 0.006772, 3.395, 76.680, 54.884, 50.416, 1.60213034, 224.701,
        ),
        Planet::Earth => (
            1.000000, 0.0167086, 0.00005, -11.26064, 114.20783, 358.617, 0.9856076686, 365.256,
        ),
        Planet::Mars => (
            1.523679, 0.0934, 1.850, 49.558, 286.502, 19.373, 0.5240329502, 686.980,
        ),
        Planet::Jupiter => (
            5.2044, 0.0489, 1.303, 100.464, 273.867, 20.020, 0.08308529, 4332.589,
        ),
        Planet::Saturn => (
            9.5826, 0.0565, 2.485, 113.665, 339.392, 317.020, 0.0334443, 10759.22,
        ),
        Planet::Uranus => (
            19.1913, 0.0457, 0.773, 74.006, 96.998857, 142.2386, 0.0116943, 30687.15,
        ),
        Planet::Neptune => (
            30.07, 0.0113, 1.770, 131.784, 272.846, 256.228, 0.005963, 60189.0,
        ),
        Planet::Pluto => (
            39.482, 0.2488, 17.16, 110.299, 113.834, 14.53, 0.00396, 90560.0,
        ),
    };

    OrbitalElements::from_degrees(fallback_epoch(), a, e, i, om, w, ma, Some(n), Some(period))
}

/// Epoch of every fallback entry: the standard J2000 Julian Day.
pub fn fallback_epoch() -> JulianDay {
    JD2000
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use crate::constants::MAJOR_PLANETS;

    #[test]
    fn test_fallback_covers_all_bodies() {
        for planet in [
            Planet::Mercury,
            Planet::Venus,
            Planet::Earth,
            Planet::Mars,
            Planet::Jupiter,
            Planet::Saturn,
            Planet::Uranus,
            Planet::Neptune,
            Planet::Pluto,
        ] {
            let el = fallback_elements(planet);
            assert!(el.semi_major_axis > 0.0);
            assert!(el.eccentricity >= 0.0 && el.eccentricity < 1.0);
            assert_eq!(el.epoch, JD2000);
        }
    }

    #[test]
    fn test_fallback_batch_matches_table() {
        let batch = fallback_batch(&MAJOR_PLANETS);
        assert_eq!(batch.source, DataSource::Fallback);
        assert!(batch.used_fallback);
        assert_eq!(batch.elements.len(), 8);
        assert_eq!(
            batch.elements[&Planet::Mercury],
            fallback_elements(Planet::Mercury)
        );
        assert!(!batch.elements.contains_key(&Planet::Pluto));
    }

    #[test]
    fn test_source_tags() {
        assert_eq!(DataSource::Remote.as_str(), "remote");
        assert_eq!(DataSource::Fallback.as_str(), "fallback");
    }

    #[tokio::test]
    async fn test_force_fallback_bypasses_remote() {
        // Endpoint is unroutable on purpose: force_fallback must never
        // touch the network.
        let provider = EphemerisProvider::new()
            .with_base_url("http://127.0.0.1:1/api")
            .with_force_fallback(true);

        let as_of = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let batch = provider.acquire(&MAJOR_PLANETS, as_of).await;
        assert_eq!(batch.source, DataSource::Fallback);
        assert!(batch.used_fallback);
        assert_eq!(batch.elements.len(), 8);
    }

    /// Serve a fixed HTTP 200 JSON body for every connection.
    async fn spawn_mock_horizons(body: &'static str) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut request = [0u8; 4096];
                    let _ = socket.read(&mut request).await;
                    let response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                         Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_timeout_falls_back_whole_batch() {
        // A listener that accepts connections but never answers: the race
        // is decided by the timer, and dropping the batch aborts the
        // outstanding per-body tasks.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                held.push(socket);
            }
        });

        let provider = EphemerisProvider::new()
            .with_base_url(format!("http://{addr}/api"))
            .with_timeout(Duration::from_millis(200));

        let as_of = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let batch = provider.acquire(&MAJOR_PLANETS, as_of).await;

        assert_eq!(batch.source, DataSource::Fallback);
        assert!(batch.used_fallback);
        assert_eq!(batch.elements.len(), 8);
        assert_eq!(
            batch.elements[&Planet::Mercury],
            fallback_elements(Planet::Mercury)
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_falls_back_whole_batch() {
        // The remote answers promptly with a well-formed envelope whose
        // payload has no data block: the whole batch collapses to element
        // sets identical to the static table.
        let addr = spawn_mock_horizons(r#"{"result":"No ephemeris available"}"#).await;

        let provider = EphemerisProvider::new()
            .with_base_url(format!("http://{addr}/api"))
            .with_timeout(Duration::from_secs(2));

        let targets = [Planet::Mercury, Planet::Venus];
        let as_of = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let batch = provider.acquire(&targets, as_of).await;

        assert_eq!(batch.source, DataSource::Fallback);
        assert!(batch.used_fallback);
        assert_eq!(
            batch.elements[&Planet::Mercury],
            fallback_elements(Planet::Mercury)
        );
        assert_eq!(
            batch.elements[&Planet::Venus],
            fallback_elements(Planet::Venus)
        );
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_back_whole_batch() {
        // A remote source that always fails collapses the entire batch to
        // the static table, with element sets identical to it.
        let provider = EphemerisProvider::new()
            .with_base_url("http://127.0.0.1:1/api")
            .with_timeout(Duration::from_secs(2));

        let targets = [Planet::Mercury, Planet::Venus];
        let as_of = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let batch = provider.acquire(&targets, as_of).await;

        assert_eq!(batch.source, DataSource::Fallback);
        assert!(batch.used_fallback);
        assert_eq!(
            batch.elements[&Planet::Mercury],
            fallback_elements(Planet::Mercury)
        );
        assert_eq!(
            batch.elements[&Planet::Venus],
            fallback_elements(Planet::Venus)
        );
    }
}
