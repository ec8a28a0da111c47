//! Block-wise output of the generator stream

use anyhow::Context;
use chainseed_generator::Generator;
use std::io::{self, Write};

/// Write generator output to `out` in blocks of `block_size` bytes
///
/// With `limit = Some(n)` exactly `n` bytes are written, the last block being
/// truncated; the bytes are the same a single `next_block(n)` would return.
/// With `limit = None` the loop only ends on an error.
///
/// # Errors
///
/// Fails if the generator is not set up, `block_size` is zero, or writing to
/// `out` fails. A closed pipe surfaces as an `io::Error` of kind `BrokenPipe`
/// in the error chain; see [`is_broken_pipe`].
pub fn write_blocks<W: Write>(
    generator: &mut Generator,
    out: &mut W,
    block_size: usize,
    limit: Option<u64>,
) -> anyhow::Result<u64> {
    anyhow::ensure!(block_size > 0, "block size must be at least 1 byte");

    let mut block = vec![0u8; block_size];
    let mut written: u64 = 0;

    loop {
        let len = match limit {
            Some(limit) if written >= limit => break,
            Some(limit) => block_size.min(usize::try_from(limit - written).unwrap_or(block_size)),
            None => block_size,
        };
        let chunk = &mut block[..len];
        generator
            .fill_block(chunk)
            .context("failed to generate output block")?;
        out.write_all(chunk).context("failed to write output")?;
        written += len as u64;
    }

    out.flush().context("failed to flush output")?;
    tracing::debug!(bytes = written, "output complete");
    Ok(written)
}

/// Whether `err` was caused by the reader closing the output pipe
#[must_use]
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainseed_generator::{GeneratorArgs, GeneratorConfig, KdfConfig};

    fn ready_generator() -> Generator {
        let config = GeneratorConfig::default()
            .with_kdf(KdfConfig::lightweight())
            .with_pattern_bytes(1);
        let mut generator =
            Generator::new(GeneratorArgs::new("PW", "CS", 2), config).expect("valid inputs");
        generator.setup().expect("setup should succeed");
        generator
    }

    /// Accepts `capacity` bytes, then reports a closed pipe
    struct ClosingPipe {
        accepted: Vec<u8>,
        capacity: usize,
    }

    impl Write for ClosingPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.capacity - self.accepted.len();
            if room == 0 {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            let n = room.min(buf.len());
            self.accepted.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_limit_truncates_last_block() {
        let expected = ready_generator().next_block(1500).expect("generator is ready");

        let mut generator = ready_generator();
        let mut out = Vec::new();
        let written =
            write_blocks(&mut generator, &mut out, 1024, Some(1500)).expect("write should succeed");

        assert_eq!(written, 1500);
        assert_eq!(out, expected);
        assert_eq!(generator.bytes_generated(), Some(1500));
    }

    #[test]
    fn test_block_size_does_not_change_bytes() {
        let mut reference = Vec::new();
        write_blocks(&mut ready_generator(), &mut reference, 4096, Some(3000))
            .expect("write should succeed");

        for block_size in [1, 7, 1000, 3000, 10_000] {
            let mut out = Vec::new();
            write_blocks(&mut ready_generator(), &mut out, block_size, Some(3000))
                .expect("write should succeed");
            assert_eq!(out, reference, "block size {block_size}");
        }
    }

    #[test]
    fn test_zero_block_size_rejected() {
        let mut out = Vec::new();
        assert!(write_blocks(&mut ready_generator(), &mut out, 0, Some(10)).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_uninitialized_generator_rejected() {
        let mut generator = Generator::new(
            GeneratorArgs::new("PW", "CS", 1),
            GeneratorConfig::default().with_kdf(KdfConfig::lightweight()),
        )
        .expect("valid inputs");
        let mut out = Vec::new();

        let err = write_blocks(&mut generator, &mut out, 16, Some(16))
            .expect_err("generator is not set up");
        assert!(!is_broken_pipe(&err));
    }

    #[test]
    fn test_closed_pipe_is_detected() {
        let mut pipe = ClosingPipe {
            accepted: Vec::new(),
            capacity: 5000,
        };
        let err = write_blocks(&mut ready_generator(), &mut pipe, 1024, None)
            .expect_err("unbounded output ends when the pipe closes");

        assert!(is_broken_pipe(&err));
        assert_eq!(
            pipe.accepted,
            ready_generator().next_block(5000).expect("generator is ready")
        );
    }
}
