//! Network repository
//!
//! Maps a source identity (typically the file path a loader read) to its
//! Network and, lazily, to the derived mixed-mode Network. The repository is
//! owned by the caller and shared by reference; the mixed-mode view of each
//! entry is computed at most once, also under concurrent access.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use rayon::prelude::*;
use tracing::debug;

use crate::config::{AnalysisConfig, TdrConfig};
use crate::error::{AnalysisError, Result};
use crate::network::{Network, Parameter, ParameterTrace, PortMode};
use crate::tdr::{tdr_with_mixed, validate_tdr_request, TdrTrace};
use crate::verification::{verify, VerificationReport};

#[derive(Debug)]
struct Entry {
    network: Arc<Network>,
    mixed: OnceLock<Arc<Network>>,
}

/// Source identity -> Network, with a per-entry mixed-mode cache
#[derive(Debug, Default)]
pub struct NetworkRepository {
    entries: HashMap<String, Entry>,
}

impl NetworkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a network under `source`
    ///
    /// Replacing an existing source drops its cached mixed-mode view. The
    /// previous network is returned.
    pub fn insert(&mut self, source: impl Into<String>, network: Network) -> Option<Arc<Network>> {
        let source = source.into();
        debug!(source = %source, nports = network.nports(), nfreq = network.nfreq(), "network stored");
        self.entries
            .insert(
                source,
                Entry {
                    network: Arc::new(network),
                    mixed: OnceLock::new(),
                },
            )
            .map(|e| e.network)
    }

    pub fn remove(&mut self, source: &str) -> Option<Arc<Network>> {
        self.entries.remove(source).map(|e| e.network)
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Source identities, sorted
    pub fn sources(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    fn entry(&self, source: &str) -> Result<&Entry> {
        self.entries
            .get(source)
            .ok_or_else(|| AnalysisError::UnknownSource(source.to_string()))
    }

    /// The stored network for `source`
    pub fn get(&self, source: &str) -> Result<Arc<Network>> {
        Ok(Arc::clone(&self.entry(source)?.network))
    }

    /// Whether the mixed-mode view of `source` has been computed
    pub fn has_mixed_mode(&self, source: &str) -> bool {
        self.entries
            .get(source)
            .is_some_and(|e| e.mixed.get().is_some())
    }

    /// The mixed-mode view of `source`, computed on first use
    ///
    /// # Errors
    /// `UnknownSource`, plus the errors of [`Network::to_mixed_mode`]. A
    /// rejected request leaves the cache empty.
    pub fn mixed_mode(&self, source: &str) -> Result<Arc<Network>> {
        let entry = self.entry(source)?;
        if let Some(mixed) = entry.mixed.get() {
            return Ok(Arc::clone(mixed));
        }

        let network = &entry.network;
        network.ensure_nports(4)?;
        if network.mode() != PortMode::SingleEnded {
            return Err(AnalysisError::InvalidMode {
                expected: PortMode::SingleEnded,
                actual: network.mode(),
            });
        }

        let mixed = entry.mixed.get_or_init(|| {
            debug!(source = %source, "computing mixed-mode view");
            Arc::new(network.mixed_mode_unchecked())
        });
        Ok(Arc::clone(mixed))
    }

    /// Magnitude/phase trace of `name`
    ///
    /// With `mixed` set the name is looked up on the cached mixed-mode view.
    pub fn extract(&self, source: &str, name: &str, mixed: bool) -> Result<ParameterTrace> {
        if mixed {
            self.mixed_mode(source)?.extract(name)
        } else {
            self.get(source)?.extract(name)
        }
    }

    /// TDR profiles of `names`, reusing the cached mixed-mode view for
    /// mixed labels
    pub fn tdr(&self, source: &str, names: &[&str], config: &TdrConfig) -> Result<Vec<TdrTrace>> {
        let network = self.get(source)?;
        let params = names
            .iter()
            .map(|name| name.parse::<Parameter>())
            .collect::<Result<Vec<_>>>()?;

        let needs_mixed = !network.is_mixed_mode()
            && params.iter().any(|p| matches!(p, Parameter::MixedMode(_)));
        if needs_mixed {
            validate_tdr_request(&network, &params)?;
            let mixed = self.mixed_mode(source)?;
            tdr_with_mixed(&network, Some(&*mixed), &params, config)
        } else {
            tdr_with_mixed(&network, None, &params, config)
        }
    }

    /// Passivity, causality and reciprocity of `source`
    pub fn verify(&self, source: &str, config: &AnalysisConfig) -> Result<VerificationReport> {
        let network = self.get(source)?;
        let mut report = verify(&network, config)?;
        if report.name.is_none() {
            report.name = Some(source.to_string());
        }
        Ok(report)
    }

    /// Verify every stored network in parallel, sorted by source
    pub fn verify_all(&self, config: &AnalysisConfig) -> Vec<(String, Result<VerificationReport>)> {
        let mut results: Vec<(String, Result<VerificationReport>)> = self
            .entries
            .par_iter()
            .map(|(source, _)| (source.clone(), self.verify(source, config)))
            .collect();
        results.sort_by(|a, b| a.0.cmp(&b.0));
        results
    }
}
