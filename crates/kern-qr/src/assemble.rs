//! Incremental multi-part collection.
//!
//! The camera feed hands parts over in whatever order frames happen to
//! scan; the collector keys them by index, rejects anything that does not
//! belong to the transfer in progress, and decodes once every index is
//! present.

use tracing::debug;

use crate::bbqr::{decode_payload, Encoding, FileType, Part};
use crate::error::{QrError, QrResult};

/// Collects BBQr parts until the transfer is complete.
#[derive(Debug, Default)]
pub struct PartCollector {
    expect: Option<(Encoding, FileType, usize)>,
    payloads: Vec<Option<Vec<u8>>>,
    received: usize,
}

impl PartCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one scanned part. The first part fixes the transfer's encoding,
    /// file type, and total; later parts must agree and each index is
    /// accepted once.
    pub fn add(&mut self, part: &Part<'_>) -> QrResult<()> {
        match self.expect {
            None => {
                self.expect = Some((part.encoding, part.file_type, part.total));
                self.payloads = vec![None; part.total];
            }
            Some((encoding, file_type, total)) => {
                if part.encoding != encoding || part.file_type != file_type || part.total != total
                {
                    return Err(QrError::Inconsistent);
                }
            }
        }

        let slot = &mut self.payloads[part.index];
        if slot.is_some() {
            return Err(QrError::DuplicateIndex(part.index));
        }
        *slot = Some(part.payload.to_vec());
        self.received += 1;

        debug!(
            index = part.index,
            received = self.received,
            total = part.total,
            "collected transfer part"
        );
        Ok(())
    }

    /// Parse a raw QR string and add it in one step.
    pub fn add_str(&mut self, data: &str) -> QrResult<()> {
        let part = Part::parse(data.as_bytes())?;
        self.add(&part)
    }

    pub fn total(&self) -> Option<usize> {
        self.expect.map(|(_, _, total)| total)
    }

    pub fn received(&self) -> usize {
        self.received
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.expect, Some((_, _, total)) if self.received == total)
    }

    /// Concatenate payloads in index order and decode the result.
    pub fn assemble(&self) -> QrResult<Vec<u8>> {
        let Some((encoding, _, total)) = self.expect else {
            return Err(QrError::Incomplete {
                received: 0,
                total: 0,
            });
        };
        if !self.is_complete() {
            return Err(QrError::Incomplete {
                received: self.received,
                total,
            });
        }

        let mut joined = Vec::new();
        for payload in self.payloads.iter().flatten() {
            joined.extend_from_slice(payload);
        }
        decode_payload(encoding, &joined)
    }
}
