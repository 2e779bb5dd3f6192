//! Preimage search engine

use std::sync::Arc;

use hashhunt_crypto::{hex, BuiltinRegistry, DigestFunction, DigestRegistry};
use hashhunt_keyspace::{CandidateSource, Odometer, RandomSampler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::error::{ConfigError, SearchError};
use crate::reporter::{stderr_sink, ProgressLine, ProgressReporter, ProgressSink};
use crate::stats::{CancelToken, SearchStats};

// Deadline is checked on this attempt stride
const CLOCK_CHECK_INTERVAL: u64 = 256;

/// A matching candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The candidate, prefix and suffix (lossy if not UTF-8)
    pub candidate: String,
    /// The candidate's raw bytes in hex
    pub candidate_hex: String,
    pub algorithm: String,
    /// Digest of the candidate in hex
    pub digest_hex: String,
    /// Candidates tested, including the match
    pub attempts: u64,
    pub time_secs: f64,
    pub attempts_per_second: f64,
}

/// Counters of a run that ended without a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub attempts: u64,
    pub time_secs: f64,
    pub attempts_per_second: f64,
}

/// How a search run ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// A candidate's digest equals the target
    Found(SearchResult),
    /// Every candidate of every length was tested
    Exhausted(SearchSummary),
    /// The attempt or time limit was hit
    LimitReached(SearchSummary),
    /// The cancel token fired
    Cancelled(SearchSummary),
}

impl Outcome {
    pub fn found(&self) -> Option<&SearchResult> {
        match self {
            Outcome::Found(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_found(self) -> Option<SearchResult> {
        match self {
            Outcome::Found(result) => Some(result),
            _ => None,
        }
    }

    /// Candidates tested during the run
    pub fn attempts(&self) -> u64 {
        match self {
            Outcome::Found(result) => result.attempts,
            Outcome::Exhausted(summary)
            | Outcome::LimitReached(summary)
            | Outcome::Cancelled(summary) => summary.attempts,
        }
    }
}

/// One tested candidate from an attempt stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub candidate: Vec<u8>,
    pub digest: Vec<u8>,
    /// Whether `digest` equals the target
    pub matched: bool,
}

/// Lazy, possibly infinite stream of attempts. Ends only when the keyspace is
/// used up; the caller decides when to stop pulling.
pub struct Attempts<'a, S> {
    source: S,
    digest: &'a dyn DigestFunction,
    expected: &'a [u8],
    done: bool,
}

impl<S: CandidateSource> Iterator for Attempts<'_, S> {
    type Item = Attempt;

    fn next(&mut self) -> Option<Attempt> {
        if self.done {
            return None;
        }

        let candidate = self.source.current().to_vec();
        let digest = self.digest.compute(&candidate);
        let matched = digest_matches(&digest, self.expected);
        if !self.source.advance() {
            self.done = true;
        }

        Some(Attempt {
            candidate,
            digest,
            matched,
        })
    }
}

/// Byte-for-byte digest equality; a length difference is a non-match
pub fn digest_matches(computed: &[u8], expected: &[u8]) -> bool {
    computed.len() == expected.len() && computed == expected
}

/// Preimage search engine
pub struct HashSearch {
    config: SearchConfig,
    registry: Arc<dyn DigestRegistry>,
    cancel: CancelToken,
    sink: ProgressSink,
}

impl HashSearch {
    /// Create a search over the built-in digest registry
    pub fn new(config: SearchConfig) -> Self {
        Self::with_registry(config, Arc::new(BuiltinRegistry))
    }

    /// Create a search resolving digests through `registry`
    pub fn with_registry(config: SearchConfig, registry: Arc<dyn DigestRegistry>) -> Self {
        Self {
            config,
            registry,
            cancel: CancelToken::new(),
            sink: stderr_sink(),
        }
    }

    /// Send progress lines to `sink` instead of stderr
    pub fn with_progress_sink<F>(mut self, sink: F) -> Self
    where
        F: Fn(&ProgressLine) + Send + Sync + 'static,
    {
        self.sink = Arc::new(sink);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Canonical rendering of the configured alphabet
    pub fn allowed_alphabet(&self) -> String {
        self.config.allowed_alphabet()
    }

    /// Token that stops a running search at its next step
    ///
    /// Cancellation is sticky: every later `find_*` call on this search
    /// returns `Cancelled` straight away until the token is `reset()`.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn verify(&self) -> Result<(), ConfigError> {
        self.config.verify(self.registry.as_ref())
    }

    /// Validate, then resolve the digest function
    fn prepare(&self) -> Result<&dyn DigestFunction, SearchError> {
        self.verify()?;
        if self.config.alphabet.len() == 1 {
            warn!(
                "Alphabet has a single symbol, one candidate per length ({:?})",
                self.config.allowed_alphabet()
            );
        }
        self.registry
            .lookup(&self.config.algorithm)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(self.config.algorithm.clone()).into())
    }

    fn odometer(&self) -> Result<Odometer, SearchError> {
        let config = &self.config;
        Ok(Odometer::new(
            config.alphabet.clone(),
            config.min_length,
            config.max_length,
            &config.suffix,
            config.direction(),
        )?)
    }

    fn sampler<R: Rng>(&self, rng: R) -> Result<RandomSampler<R>, SearchError> {
        if self.config.reverse {
            return Err(SearchError::UnsupportedCombination("reverse and random dont mix"));
        }
        self.verify()?;

        let config = &self.config;
        Ok(RandomSampler::new(
            config.alphabet.clone(),
            config.min_length,
            config.max_length,
            &config.suffix,
            rng,
        )?)
    }

    /// Walk the keyspace in lexicographic order (descending with `reverse`)
    /// until a match, exhaustion, a limit, or cancellation
    pub fn find_sequential(&self) -> Result<Outcome, SearchError> {
        let digest = self.prepare()?;
        let source = self.odometer()?;
        info!(
            "Sequential search: {} over {} prefixes of length {}..={}",
            digest.name(),
            self.config
                .keyspace_size()
                .map_or_else(|| "too many".to_string(), |n| n.to_string()),
            self.config.min_length,
            self.config.max_length,
        );
        Ok(self.run(source, digest))
    }

    /// Sample random candidates, seeded from `config.seed` when set
    pub fn find_random(&self) -> Result<Outcome, SearchError> {
        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.find_random_with_rng(rng)
    }

    /// Sample random candidates drawn from `rng`
    pub fn find_random_with_rng<R: Rng>(&self, rng: R) -> Result<Outcome, SearchError> {
        let source = self.sampler(rng)?;
        let digest = self.prepare()?;
        info!("Random search: {}", digest.name());
        Ok(self.run(source, digest))
    }

    /// Stream of sequential attempts for external stepping
    pub fn sequential_attempts(&self) -> Result<Attempts<'_, Odometer>, SearchError> {
        let digest = self.prepare()?;
        Ok(Attempts {
            source: self.odometer()?,
            digest,
            expected: &self.config.expected,
            done: false,
        })
    }

    /// Stream of random attempts for external stepping
    pub fn random_attempts<R: Rng>(
        &self,
        rng: R,
    ) -> Result<Attempts<'_, RandomSampler<R>>, SearchError> {
        let source = self.sampler(rng)?;
        let digest = self.prepare()?;
        Ok(Attempts {
            source,
            digest,
            expected: &self.config.expected,
            done: false,
        })
    }

    fn run<S: CandidateSource>(&self, mut source: S, digest: &dyn DigestFunction) -> Outcome {
        let stats = SearchStats::new();
        let reporter = self.config.progress.then(|| {
            ProgressReporter::spawn(
                stats.clone(),
                digest.name().to_string(),
                self.config.report_interval_duration(),
                self.sink.clone(),
            )
        });

        let expected = self.config.expected.as_slice();
        let max_attempts = self.config.max_attempts;
        let max_time = self.config.max_time_duration();
        let mut prefix_len = source.prefix_len();

        let outcome = loop {
            if self.cancel.is_cancelled() {
                break Outcome::Cancelled(summary(&stats));
            }

            let tested = stats.total_attempts();
            if max_attempts.is_some_and(|max| tested >= max) {
                break Outcome::LimitReached(summary(&stats));
            }
            if tested % CLOCK_CHECK_INTERVAL == 0
                && max_time.is_some_and(|limit| stats.elapsed() >= limit)
            {
                break Outcome::LimitReached(summary(&stats));
            }

            let candidate = source.current();
            let computed = digest.compute(candidate);
            stats.add_attempts(1);

            if stats.snapshot_wanted() {
                stats.publish_snapshot(candidate);
            }

            if digest_matches(&computed, expected) {
                break Outcome::Found(SearchResult {
                    candidate: String::from_utf8_lossy(candidate).into_owned(),
                    candidate_hex: hex::encode(candidate),
                    algorithm: digest.name().to_string(),
                    digest_hex: hex::encode(&computed),
                    attempts: stats.total_attempts(),
                    time_secs: stats.elapsed().as_secs_f64(),
                    attempts_per_second: stats.attempts_per_second(),
                });
            }

            if !source.advance() {
                break Outcome::Exhausted(summary(&stats));
            }

            if source.prefix_len() != prefix_len {
                prefix_len = source.prefix_len();
                debug!("Prefix length now {}", prefix_len);
            }
        };

        if let Some(reporter) = reporter {
            reporter.stop();
        }

        match &outcome {
            Outcome::Found(result) => info!(
                "Match after {} attempts: {}",
                result.attempts, result.candidate
            ),
            other => info!("No match after {} attempts", other.attempts()),
        }

        outcome
    }
}

fn summary(stats: &SearchStats) -> SearchSummary {
    SearchSummary {
        attempts: stats.total_attempts(),
        time_secs: stats.elapsed().as_secs_f64(),
        attempts_per_second: stats.attempts_per_second(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashhunt_crypto::get_algorithm;
    use hashhunt_keyspace::ONION_ALPHABET;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    fn quiet(config: SearchConfig) -> SearchConfig {
        config.progress(false)
    }

    fn target(algorithm: &str, input: &str) -> Vec<u8> {
        BuiltinRegistry.digest(algorithm, input.as_bytes()).unwrap()
    }

    /// Counts every digest computed through it
    struct CountingDigest {
        calls: AtomicUsize,
    }

    impl DigestFunction for CountingDigest {
        fn name(&self) -> &str {
            "sha1"
        }

        fn output_bits(&self) -> usize {
            160
        }

        fn compute(&self, input: &[u8]) -> Vec<u8> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            get_algorithm("sha1").unwrap().compute(input)
        }
    }

    struct CountingRegistry {
        digest: CountingDigest,
    }

    impl CountingRegistry {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                digest: CountingDigest {
                    calls: AtomicUsize::new(0),
                },
            })
        }

        fn calls(&self) -> usize {
            self.digest.calls.load(Ordering::Relaxed)
        }
    }

    impl DigestRegistry for CountingRegistry {
        fn lookup(&self, name: &str) -> Option<&dyn DigestFunction> {
            (name == "sha1").then_some(&self.digest as &dyn DigestFunction)
        }

        fn names(&self) -> Vec<String> {
            vec!["sha1".to_string()]
        }
    }

    #[test]
    fn test_sha1_motom() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("tamo")
                .expected_hex("9af7d87edaba03e23f6dbdaed29101ee1291c8a6")
                .unwrap()
                .length(5),
        );
        let search = HashSearch::new(config);
        assert_eq!(search.allowed_alphabet(), "amot");

        let result = search.find_sequential().unwrap().into_found().unwrap();
        assert_eq!(result.candidate, "motom");
        assert_eq!(result.digest_hex, "9af7d87edaba03e23f6dbdaed29101ee1291c8a6");
    }

    #[test]
    fn test_sha512_atom() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha512")
                .alphabet("mota")
                .expected_hex("2b4df6c7b86d49a71c5ad6c1ffc2e85fde618c69400d2a0ccabb8dd12df4ae2584103b6947379742c0bc11a4e81ad4a3a832c11a734bf8ae5f8a8af9317a4c03")
                .unwrap()
                .length(4),
        );
        let search = HashSearch::new(config);
        assert_eq!(search.allowed_alphabet(), "amot");
        let outcome = search.find_sequential().unwrap();
        assert_eq!(outcome.found().unwrap().candidate, "atom");
    }

    #[test]
    fn test_onion_suffix_and_initial_state() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha512")
                .alphabet(ONION_ALPHABET)
                .suffix(".onion")
                .expected_hex("f07be23625ad049e9c44d9d2a8088d3902f5dbbd3f16a1469c34051d5987c5859fc1eeb0127764ad1ba1de4da51297002baaa1b41f3e259d54b135434d8851cc")
                .unwrap()
                .length(16),
        );
        let result = HashSearch::new(config)
            .find_sequential()
            .unwrap()
            .into_found()
            .unwrap();
        assert_eq!(result.candidate, "222222222222222f.onion");
        // '2'..'7' then 'a'..'f'
        assert_eq!(result.attempts, 12);
    }

    #[test]
    fn test_match_counts_attempts_in_order() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("md5")
                .alphabet("abc")
                .expected_digest(target("md5", "ba"))
                .length(2),
        );
        let result = HashSearch::new(config)
            .find_sequential()
            .unwrap()
            .into_found()
            .unwrap();
        // aa ab ac ba
        assert_eq!(result.attempts, 4);
    }

    #[test]
    fn test_reverse_order() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("md5")
                .alphabet("abc")
                .expected_digest(target("md5", "ba"))
                .length(2)
                .reverse(true),
        );
        let result = HashSearch::new(config)
            .find_sequential()
            .unwrap()
            .into_found()
            .unwrap();
        // cc cb ca bc bb ba
        assert_eq!(result.candidate, "ba");
        assert_eq!(result.attempts, 6);
    }

    #[test]
    fn test_exhausted_without_match() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("xyz")
                .expected_digest(target("sha1", "nope"))
                .length(3),
        );
        let outcome = HashSearch::new(config).find_sequential().unwrap();
        assert!(matches!(outcome, Outcome::Exhausted(_)));
        assert_eq!(outcome.attempts(), 27);
    }

    #[test]
    fn test_variable_length() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha256")
                .alphabet("01")
                .expected_digest(target("sha256", "101"))
                .min_length(1)
                .max_length(4),
        );
        let result = HashSearch::new(config)
            .find_sequential()
            .unwrap()
            .into_found()
            .unwrap();
        assert_eq!(result.candidate, "101");
        // 2 of length 1, 4 of length 2, then 000..101
        assert_eq!(result.attempts, 2 + 4 + 6);

        let config = quiet(
            SearchConfig::new()
                .algorithm("sha256")
                .alphabet("01")
                .expected_digest(target("sha256", "nope"))
                .min_length(1)
                .max_length(3),
        );
        let outcome = HashSearch::new(config).find_sequential().unwrap();
        assert_eq!(outcome.attempts(), 2 + 4 + 8);
    }

    #[test]
    fn test_max_attempts_limit() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("abcdef")
                .expected_digest(target("sha1", "nope"))
                .length(8)
                .max_attempts(100),
        );
        let outcome = HashSearch::new(config).find_sequential().unwrap();
        assert!(matches!(outcome, Outcome::LimitReached(_)));
        assert_eq!(outcome.attempts(), 100);
    }

    #[test]
    fn test_cancelled_before_start() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("abcdef")
                .expected_digest(target("sha1", "nope"))
                .length(8),
        );
        let search = HashSearch::new(config);
        search.cancel_token().cancel();
        let outcome = search.find_sequential().unwrap();
        assert!(matches!(outcome, Outcome::Cancelled(_)));
        assert_eq!(outcome.attempts(), 0);
    }

    #[test]
    fn test_cancel_sticks_until_reset() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("abcdef")
                .expected_digest(target("sha1", "nope"))
                .length(8)
                .max_attempts(10),
        );
        let search = HashSearch::new(config);
        let token = search.cancel_token();
        token.cancel();
        assert!(matches!(search.find_sequential().unwrap(), Outcome::Cancelled(_)));
        assert!(matches!(search.find_sequential().unwrap(), Outcome::Cancelled(_)));

        token.reset();
        let outcome = search.find_sequential().unwrap();
        assert!(matches!(outcome, Outcome::LimitReached(_)));
        assert_eq!(outcome.attempts(), 10);
    }

    #[test]
    fn test_sub_second_time_limit() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet(ONION_ALPHABET)
                .expected_digest(target("sha1", "nope"))
                .length(16)
                .max_time(Duration::from_millis(300)),
        );
        let started = Instant::now();
        let outcome = HashSearch::new(config).find_sequential().unwrap();
        let elapsed = started.elapsed();

        assert!(matches!(outcome, Outcome::LimitReached(_)));
        assert!(outcome.attempts() > 0);
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_secs(10));
    }

    #[test]
    fn test_cancelled_from_another_thread() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet(ONION_ALPHABET)
                .expected_digest(target("sha1", "nope"))
                .length(16),
        );
        let search = HashSearch::new(config);
        let token = search.cancel_token();
        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            token.cancel();
        });
        let outcome = search.find_sequential().unwrap();
        canceller.join().unwrap();
        assert!(matches!(outcome, Outcome::Cancelled(_)));
    }

    #[test]
    fn test_config_errors_surface() {
        let search = HashSearch::new(quiet(SearchConfig::new().algorithm("sha1").length(3)));
        assert_eq!(
            search.find_sequential().unwrap_err(),
            SearchError::Config(ConfigError::AlphabetEmpty)
        );

        let search = HashSearch::new(quiet(
            SearchConfig::new()
                .algorithm("md5")
                .alphabet("ab")
                .length(3)
                .expected_digest(vec![0u8; 20]),
        ));
        assert_eq!(
            search.find_random().unwrap_err().to_string(),
            "digest size mismatch: expected 128 bits, got 160"
        );
    }

    #[test]
    fn test_random_reverse_rejected_without_digesting() {
        let registry = CountingRegistry::new();
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("ab")
                .expected_digest(target("sha1", "ab"))
                .length(2)
                .reverse(true),
        );
        let search = HashSearch::with_registry(config, registry.clone());

        let err = search.find_random().unwrap_err();
        assert_eq!(
            err,
            SearchError::UnsupportedCombination("reverse and random dont mix")
        );
        assert_eq!(err.to_string(), "reverse and random dont mix");
        assert!(search.random_attempts(StdRng::seed_from_u64(1)).is_err());
        assert_eq!(registry.calls(), 0);
    }

    #[test]
    fn test_injected_registry_is_used() {
        let registry = CountingRegistry::new();
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("ab")
                .expected_digest(target("sha1", "ba"))
                .length(2),
        );
        let search = HashSearch::with_registry(config, registry.clone());
        let result = search.find_sequential().unwrap().into_found().unwrap();
        assert_eq!(result.candidate, "ba");
        assert_eq!(registry.calls(), 3);

        let search = HashSearch::with_registry(
            quiet(SearchConfig::new().algorithm("md5").alphabet("a").length(1)),
            registry,
        );
        assert_eq!(
            search.verify().unwrap_err(),
            ConfigError::UnknownAlgorithm("md5".into())
        );
    }

    #[test]
    fn test_random_finds_small_keyspace_match() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("ab")
                .expected_digest(target("sha1", "bab!"))
                .suffix("!")
                .length(3),
        );
        let search = HashSearch::new(config);
        let outcome = search
            .find_random_with_rng(StdRng::seed_from_u64(123))
            .unwrap();
        assert_eq!(outcome.found().unwrap().candidate, "bab!");
    }

    #[test]
    fn test_random_seed_from_config() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("abcd")
                .expected_digest(target("sha1", "dcba"))
                .length(4)
                .seed(99),
        );
        let first = HashSearch::new(config.clone()).find_random().unwrap();
        let second = HashSearch::new(config).find_random().unwrap();
        assert_eq!(
            first.found().unwrap().attempts,
            second.found().unwrap().attempts
        );
    }

    #[test]
    fn test_sequential_stream_is_deterministic() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet("xyz")
                .expected_digest(target("sha1", "nope"))
                .length(4),
        );
        let search = HashSearch::new(config);
        let first: Vec<Vec<u8>> = search
            .sequential_attempts()
            .unwrap()
            .take(40)
            .map(|a| a.candidate)
            .collect();
        let second: Vec<Vec<u8>> = search
            .sequential_attempts()
            .unwrap()
            .take(40)
            .map(|a| a.candidate)
            .collect();
        assert_eq!(first, second);
        assert_eq!(first[0], b"xxxx");
        assert_eq!(first[1], b"xxxy");
        assert_eq!(first[3], b"xxyx");
    }

    #[test]
    fn test_sequential_stream_ends_at_exhaustion() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("md5")
                .alphabet("ab")
                .expected_digest(target("md5", "ab"))
                .length(2),
        );
        let search = HashSearch::new(config);
        let attempts: Vec<Attempt> = search.sequential_attempts().unwrap().collect();
        assert_eq!(attempts.len(), 4);
        let matched: Vec<&Attempt> = attempts.iter().filter(|a| a.matched).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].candidate, b"ab");
        assert_eq!(matched[0].digest, target("md5", "ab"));
    }

    #[test]
    fn test_random_streams_depend_on_seed() {
        let config = quiet(
            SearchConfig::new()
                .algorithm("sha1")
                .alphabet(ONION_ALPHABET)
                .expected_digest(target("sha1", "nope"))
                .length(16),
        );
        let search = HashSearch::new(config);
        let run = |seed: u64| -> Vec<Vec<u8>> {
            search
                .random_attempts(StdRng::seed_from_u64(seed))
                .unwrap()
                .take(20)
                .map(|a| a.candidate)
                .collect()
        };
        assert_eq!(run(5), run(5));
        assert_ne!(run(5), run(6));
    }

    #[test]
    fn test_digest_matches() {
        let expected = [1u8, 2, 3, 4];
        assert!(digest_matches(&[1, 2, 3, 4], &expected));
        assert!(!digest_matches(&[1, 2, 3], &expected));
        assert!(!digest_matches(&[1, 2, 3, 4, 0], &expected));
        assert!(!digest_matches(&[1, 2, 3, 5], &expected));
        assert!(!digest_matches(&[0, 2, 3, 4], &expected));
        assert!(!digest_matches(&[], &expected));
        assert!(digest_matches(&[], &[]));
    }

    #[test]
    fn test_progress_lines_reach_sink() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let captured = lines.clone();
        let config = SearchConfig::new()
            .algorithm("sha256")
            .alphabet(ONION_ALPHABET)
            .expected_digest(target("sha256", "nope"))
            .length(16)
            .report_interval(Duration::from_millis(2));
        let search = HashSearch::new(config).with_progress_sink(move |line| {
            captured.lock().unwrap().push(line.to_string());
        });
        let token = search.cancel_token();
        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            token.cancel();
        });
        let outcome = search.find_sequential().unwrap();
        canceller.join().unwrap();
        assert!(matches!(outcome, Outcome::Cancelled(_)));

        let lines = lines.lock().unwrap();
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|l| l.starts_with("sha256 ~")));
    }

    #[test]
    fn test_outcome_json_is_tagged() {
        let outcome = Outcome::Exhausted(SearchSummary {
            attempts: 3,
            time_secs: 0.0,
            attempts_per_second: 0.0,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "exhausted");
        assert_eq!(json["attempts"], 3);
    }
}
