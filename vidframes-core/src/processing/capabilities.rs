//! Encoder capability probing.
//!
//! The engine is asked once which encoders it has. The answer, or a
//! conservative default when the question itself fails, is kept for the
//! lifetime of the prober.

use crate::external::EncoderQuery;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::BTreeSet;

/// Encoders that produce PNG output.
pub const LOSSLESS_ENCODERS: &[&str] = &["png", "libpng"];

/// Encoder used when no PNG encoder is available.
pub const LOSSY_FALLBACK_ENCODER: &str = "mjpeg";

const IMAGE_ENCODERS: &[&str] = &["png", "libpng", "mjpeg", "bmp"];

/// Which still-image encoders the engine offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncoderCapabilities {
    pub has_lossless_encoder: bool,
    pub has_lossy_fallback_encoder: bool,
    /// Every encoder name the engine listed
    pub encoders: BTreeSet<String>,
}

impl EncoderCapabilities {
    pub fn from_encoders<I, S>(encoders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let encoders: BTreeSet<String> = encoders.into_iter().map(Into::into).collect();
        Self {
            has_lossless_encoder: LOSSLESS_ENCODERS.iter().any(|e| encoders.contains(*e)),
            has_lossy_fallback_encoder: encoders.contains(LOSSY_FALLBACK_ENCODER),
            encoders,
        }
    }

    /// Assumed capabilities when the engine could not be queried.
    pub fn conservative_default() -> Self {
        Self {
            has_lossless_encoder: false,
            has_lossy_fallback_encoder: true,
            encoders: BTreeSet::new(),
        }
    }

    /// The still-image encoders among `encoders`.
    pub fn image_encoders(&self) -> Vec<&str> {
        IMAGE_ENCODERS
            .iter()
            .copied()
            .filter(|e| self.encoders.contains(*e))
            .collect()
    }
}

/// Memoizing front for an [`EncoderQuery`].
pub struct CapabilityProber<Q> {
    query: Q,
    cache: OnceCell<EncoderCapabilities>,
}

impl<Q: EncoderQuery> CapabilityProber<Q> {
    pub fn new(query: Q) -> Self {
        Self {
            query,
            cache: OnceCell::new(),
        }
    }

    /// Returns the engine's capabilities, querying it on first use only.
    ///
    /// Never fails: a failed query is logged and replaced by
    /// [`EncoderCapabilities::conservative_default`], which is cached like a
    /// real answer.
    pub fn probe(&self) -> &EncoderCapabilities {
        self.cache.get_or_init(|| match self.query.list_encoders() {
            Ok(encoders) => {
                let caps = EncoderCapabilities::from_encoders(encoders);
                log::debug!("Available image encoders: {:?}", caps.image_encoders());
                caps
            }
            Err(e) => {
                log::warn!(
                    "Could not query encoders ({}); assuming only the {} encoder is available",
                    e,
                    LOSSY_FALLBACK_ENCODER
                );
                EncoderCapabilities::conservative_default()
            }
        })
    }

    /// Whether the engine has been queried yet.
    pub fn is_probed(&self) -> bool {
        self.cache.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockEncoderQuery;

    #[test]
    fn test_capabilities_from_encoder_list() {
        let caps = EncoderCapabilities::from_encoders(["libx264", "png", "mjpeg", "bmp"]);
        assert!(caps.has_lossless_encoder);
        assert!(caps.has_lossy_fallback_encoder);
        assert_eq!(caps.image_encoders(), vec!["png", "mjpeg", "bmp"]);

        let caps = EncoderCapabilities::from_encoders(["libpng"]);
        assert!(caps.has_lossless_encoder);
        assert!(!caps.has_lossy_fallback_encoder);

        // bmp alone is neither
        let caps = EncoderCapabilities::from_encoders(["bmp"]);
        assert!(!caps.has_lossless_encoder);
        assert!(!caps.has_lossy_fallback_encoder);
    }

    #[test]
    fn test_probe_queries_once() {
        let query = MockEncoderQuery::with_encoders(&["png", "mjpeg"]);
        let prober = CapabilityProber::new(query.clone());
        assert!(!prober.is_probed());

        let first = prober.probe().clone();
        let second = prober.probe().clone();

        assert_eq!(first, second);
        assert_eq!(query.call_count(), 1);
        assert!(prober.is_probed());
    }

    #[test]
    fn test_failed_probe_caches_conservative_default() {
        let query = MockEncoderQuery::failing("ffmpeg: not found");
        let prober = CapabilityProber::new(query.clone());

        assert_eq!(prober.probe(), &EncoderCapabilities::conservative_default());
        assert_eq!(prober.probe(), &EncoderCapabilities::conservative_default());
        assert_eq!(query.call_count(), 1);
    }
}
