//! Interface report: discovery, filtering, link state and address gathering.
//!
//! ```ignore
//! use ifreport::netlink::NetlinkSource;
//! use ifreport::report::{AdminFlag, GatherPolicy, InterfaceReporter, ReportConfig};
//!
//! let source = NetlinkSource::new()?;
//!
//! // Administrative state, addresses for every interface, no waiting
//! let config = ReportConfig::new().gather(GatherPolicy::Always);
//! let reporter = InterfaceReporter::new(&source, &AdminFlag, config);
//! let records = reporter.list(None, None).await?;
//! ```

mod cidr;
mod config;
mod query;
mod record;
pub mod retry;

pub use cidr::{AddressSet, parse_cidr};
pub use config::{DEFAULT_INTERVAL, DEFAULT_TIMEOUT, GatherPolicy, ReportConfig};
pub use query::{AdminFlag, InterfaceEntry, InterfaceSource, LinkStatusProvider};
pub use record::{InterfaceRecord, LinkState};

use regex::Regex;
use tracing::{debug, warn};

use crate::netlink::{Error, Result};

/// Interfaces excluded unless the caller says otherwise: virtual ethernet
/// pairs, docker and linux bridges, and SIT tunnels.
pub const DEFAULT_EXCLUDE: &str = "^veth|docker|br-|sit";

/// Builds interface reports from an [`InterfaceSource`], using a
/// [`LinkStatusProvider`] to decide link state.
pub struct InterfaceReporter<'a, S, L> {
    source: &'a S,
    links: &'a L,
    config: ReportConfig,
}

impl<'a, S, L> InterfaceReporter<'a, S, L>
where
    S: InterfaceSource,
    L: LinkStatusProvider,
{
    /// Create a reporter.
    pub fn new(source: &'a S, links: &'a L, config: ReportConfig) -> Self {
        Self {
            source,
            links,
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// List the host's interfaces.
    ///
    /// Loopback interfaces and names matching `exclude` are skipped. With
    /// `wait_for_ipv4 == Some(true)` every link-up interface is polled until
    /// an IPv4 address appears or the configured timeout elapses; otherwise
    /// addresses are gathered once.
    ///
    /// Records come back in OS enumeration order. Any query failure aborts
    /// the whole listing.
    pub async fn list(
        &self,
        exclude: Option<&Regex>,
        wait_for_ipv4: Option<bool>,
    ) -> Result<Vec<InterfaceRecord>> {
        let wait = wait_for_ipv4.unwrap_or(false);
        let interfaces = self.source.interfaces().await?;

        let mut records = Vec::with_capacity(interfaces.len());

        for iface in &interfaces {
            if iface.is_loopback() {
                debug!(name = %iface.name, "skipping loopback");
                continue;
            }

            if exclude.is_some_and(|re| re.is_match(&iface.name)) {
                debug!(name = %iface.name, "skipping excluded interface");
                continue;
            }

            let link_up = self.links.link_up(iface).await?;
            let addresses = self.gather(iface, link_up, wait).await?;

            debug!(
                name = %iface.name,
                link_up,
                count = addresses.len(),
                "interface gathered"
            );

            records.push(InterfaceRecord::new(iface.name.clone(), link_up, addresses));
        }

        Ok(records)
    }

    /// Gather the addresses for one interface according to the policy.
    async fn gather(
        &self,
        iface: &InterfaceEntry,
        link_up: bool,
        wait: bool,
    ) -> Result<Vec<String>> {
        if !link_up && self.config.gather_policy() == GatherPolicy::LinkGated {
            return Ok(Vec::new());
        }

        // Waiting is only meaningful on an up link
        let policy = self.config.retry_policy(wait && link_up);
        let source = self.source;

        let polled = policy
            .run(
                move || async move {
                    let raw = source.addresses(iface).await?;
                    Ok::<_, Error>(AddressSet::from_raw(raw))
                },
                |set: &AddressSet| set.has_ipv4,
            )
            .await?;

        if wait && link_up && !polled.satisfied {
            warn!(
                name = %iface.name,
                attempts = polled.attempts,
                "no IPv4 address before timeout"
            );
        }

        Ok(polled.value.addresses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlink::types::link::iff;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    const UP: u32 = iff::UP | iff::RUNNING;

    /// Fake OS: a fixed interface list and, per interface, a sequence of
    /// address snapshots (the last one repeats).
    #[derive(Default)]
    struct FakeSource {
        interfaces: Vec<InterfaceEntry>,
        addresses: Mutex<HashMap<String, Vec<Vec<String>>>>,
        queries: Mutex<HashMap<String, usize>>,
        /// Fail the enumeration query.
        broken_enumeration: bool,
        /// Fail address queries for this interface.
        broken_addresses: Option<&'static str>,
    }

    impl FakeSource {
        fn with(mut self, index: u32, name: &str, flags: u32, snapshots: &[&[&str]]) -> Self {
            self.interfaces.push(InterfaceEntry::new(index, name, flags));
            let snapshots: Vec<Vec<String>> = snapshots
                .iter()
                .map(|s| s.iter().map(|a| a.to_string()).collect())
                .collect();
            self.addresses
                .lock()
                .unwrap()
                .insert(name.to_string(), snapshots);
            self
        }

        fn queries(&self, name: &str) -> usize {
            self.queries.lock().unwrap().get(name).copied().unwrap_or(0)
        }
    }

    impl InterfaceSource for FakeSource {
        async fn interfaces(&self) -> Result<Vec<InterfaceEntry>> {
            if self.broken_enumeration {
                return Err(Error::from_errno(-libc::EACCES).with_context("dumping links"));
            }
            Ok(self.interfaces.clone())
        }

        async fn addresses(&self, iface: &InterfaceEntry) -> Result<Vec<String>> {
            if self.broken_addresses == Some(iface.name.as_str()) {
                return Err(Error::InvalidMessage("address dump cut short".into()));
            }

            let mut queries = self.queries.lock().unwrap();
            let n = queries.entry(iface.name.clone()).or_default();
            *n += 1;

            let addresses = self.addresses.lock().unwrap();
            let snapshots = addresses.get(&iface.name).map(Vec::as_slice).unwrap_or(&[]);
            Ok(snapshots
                .get(*n - 1)
                .or(snapshots.last())
                .cloned()
                .unwrap_or_default())
        }
    }

    /// Link state read from the RUNNING flag of the entry, failing for `gone`.
    struct FakeLinks {
        gone: Option<&'static str>,
    }

    impl LinkStatusProvider for FakeLinks {
        async fn link_up(&self, iface: &InterfaceEntry) -> Result<bool> {
            if self.gone == Some(iface.name.as_str()) {
                return Err(Error::from_errno(-19).with_context("querying link"));
            }
            Ok(iface.is_running())
        }
    }

    const RUNNING: FakeLinks = FakeLinks { gone: None };

    fn names(records: &[InterfaceRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_default_exclusions() {
        let source = FakeSource::default()
            .with(1, "lo", UP | iff::LOOPBACK, &[&["127.0.0.1/8"]])
            .with(2, "eth0", UP, &[&["10.0.0.5/24"]])
            .with(3, "docker0", UP, &[&["172.17.0.1/16"]])
            .with(4, "veth12ab", UP, &[])
            .with(5, "br-5f2e", UP, &[])
            .with(6, "sit0", 0, &[]);
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());

        let exclude = Regex::new(DEFAULT_EXCLUDE).unwrap();
        let records = reporter.list(Some(&exclude), None).await.unwrap();

        assert_eq!(names(&records), vec!["eth0"]);
    }

    #[tokio::test]
    async fn test_loopback_skipped_without_pattern() {
        let source = FakeSource::default()
            .with(1, "lo", UP | iff::LOOPBACK, &[&["127.0.0.1/8"]])
            .with(2, "eth0", UP, &[&["10.0.0.5/24"]])
            .with(3, "docker0", UP, &[&[]]);
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());

        let records = reporter.list(None, None).await.unwrap();

        assert_eq!(names(&records), vec!["eth0", "docker0"]);
        assert_eq!(source.queries("lo"), 0);
    }

    #[tokio::test]
    async fn test_single_up_interface_json() {
        let source = FakeSource::default().with(2, "eth0", UP, &[&["10.0.0.5/24"]]);
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());

        let records = reporter.list(None, Some(false)).await.unwrap();

        assert_eq!(
            serde_json::to_string(&records).unwrap(),
            r#"[{"name":"eth0","link_up":true,"addresses":["10.0.0.5/24"]}]"#
        );
    }

    #[tokio::test]
    async fn test_link_down_gated() {
        let source = FakeSource::default().with(2, "eth1", iff::UP, &[&["10.0.0.9/24"]]);
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());

        let records = reporter.list(None, Some(true)).await.unwrap();

        assert_eq!(records, vec![InterfaceRecord::new("eth1", false, vec![])]);
        assert_eq!(source.queries("eth1"), 0);
    }

    #[tokio::test]
    async fn test_link_down_always_gathers_once() {
        let source = FakeSource::default().with(2, "eth1", iff::UP, &[&["fe80::2/64"]]);
        let config = ReportConfig::new().gather(GatherPolicy::Always);
        let reporter = InterfaceReporter::new(&source, &RUNNING, config);

        let records = reporter.list(None, Some(true)).await.unwrap();

        assert_eq!(records[0].addresses, vec!["fe80::2/64"]);
        assert!(!records[0].link_up);
        assert_eq!(source.queries("eth1"), 1);
    }

    #[tokio::test]
    async fn test_admin_flag_reports_up_without_carrier() {
        let source = FakeSource::default().with(2, "eth1", iff::UP, &[&["10.0.0.9/24"]]);
        let reporter = InterfaceReporter::new(&source, &AdminFlag, ReportConfig::new());

        let records = reporter.list(None, None).await.unwrap();

        assert!(records[0].link_up);
        assert_eq!(records[0].addresses, vec!["10.0.0.9/24"]);
    }

    #[tokio::test]
    async fn test_malformed_addresses_dropped() {
        let source =
            FakeSource::default().with(2, "eth0", UP, &[&["10.0.0.5/24", "bogus", "10.0.0.6"]]);
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());

        let records = reporter.list(None, None).await.unwrap();

        assert_eq!(records[0].addresses, vec!["10.0.0.5/24"]);
    }

    #[tokio::test]
    async fn test_link_query_failure_aborts() {
        let source = FakeSource::default()
            .with(2, "eth0", UP, &[&["10.0.0.5/24"]])
            .with(3, "wlan0", UP, &[&[]]);
        let links = FakeLinks {
            gone: Some("wlan0"),
        };
        let reporter = InterfaceReporter::new(&source, &links, ReportConfig::new());

        let err = reporter.list(None, None).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.errno(), Some(19));
    }

    #[tokio::test]
    async fn test_enumeration_failure_aborts() {
        let mut source = FakeSource::default().with(2, "eth0", UP, &[&["10.0.0.5/24"]]);
        source.broken_enumeration = true;
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());

        let err = reporter.list(None, None).await.unwrap_err();

        assert_eq!(err.errno(), Some(libc::EACCES));
        assert!(err.to_string().starts_with("dumping links: "));
        assert_eq!(source.queries("eth0"), 0);
    }

    #[tokio::test]
    async fn test_address_failure_drops_earlier_records() {
        let mut source = FakeSource::default()
            .with(2, "eth0", UP, &[&["10.0.0.5/24"]])
            .with(3, "eth1", UP, &[&["10.0.1.5/24"]])
            .with(4, "eth2", UP, &[&["10.0.2.5/24"]]);
        source.broken_addresses = Some("eth1");
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());

        let result = reporter.list(None, Some(true)).await;

        assert!(matches!(result, Err(Error::InvalidMessage(_))));
        assert_eq!(source.queries("eth0"), 1);
        assert_eq!(source.queries("eth2"), 0);
    }

    #[tokio::test]
    async fn test_idempotent_without_wait() {
        let source = FakeSource::default()
            .with(2, "eth0", UP, &[&["10.0.0.5/24", "fe80::1/64"]])
            .with(3, "eth1", iff::UP, &[&[]]);
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());

        let first = reporter.list(None, Some(false)).await.unwrap();
        let second = reporter.list(None, Some(false)).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_ipv4() {
        let source = FakeSource::default().with(
            2,
            "eth0",
            UP,
            &[&["fe80::1/64"], &["fe80::1/64"], &["fe80::1/64", "10.0.0.5/24"]],
        );
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());
        let start = Instant::now();

        let records = reporter.list(None, Some(true)).await.unwrap();

        assert_eq!(records[0].addresses, vec!["fe80::1/64", "10.0.0.5/24"]);
        assert_eq!(source.queries("eth0"), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ipv4_wait_times_out() {
        let source = FakeSource::default().with(2, "eth0", UP, &[&["fe80::1/64"]]);
        let config = ReportConfig::new()
            .timeout(Duration::from_secs(3))
            .interval(Duration::from_millis(500));
        let reporter = InterfaceReporter::new(&source, &RUNNING, config);
        let start = Instant::now();

        let records = reporter.list(None, Some(true)).await.unwrap();

        assert_eq!(records[0].addresses, vec!["fe80::1/64"]);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3));
        assert!(elapsed <= Duration::from_millis(3_500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_gathers_once() {
        let source = FakeSource::default().with(2, "eth0", UP, &[&["fe80::1/64"]]);
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());
        let start = Instant::now();

        reporter.list(None, None).await.unwrap();

        assert_eq!(source.queries("eth0"), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let source = FakeSource::default().with(1, "lo", UP | iff::LOOPBACK, &[]);
        let reporter = InterfaceReporter::new(&source, &RUNNING, ReportConfig::new());

        assert!(reporter.list(None, None).await.unwrap().is_empty());
    }
}
