//! Zlib envelope around a raw deflate body
//!
//! Document containers (PDF streams, for one) expect the zlib layout: a two
//! byte header, the deflate body, then the Adler-32 of the uncompressed data
//! in big-endian order. The checksum is computed while the input streams
//! through, so the source is never buffered whole.

use std::io::{self, Read, Write};

use flate2::write::DeflateEncoder;
use flate2::Compression;

/// Zlib header for a 32K window at maximum compression
pub const ZLIB_HEADER: [u8; 2] = [0x78, 0xDA];

/// Largest prime below 2^16
const BASE: u32 = 65_521;

/// Most bytes that can be summed before `s2` may overflow a `u32`
const NMAX: usize = 5_552;

/// Read size used when streaming a source through the encoder
const BLOCK_SIZE: usize = 2_048;

/// Running Adler-32 checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adler32 {
    s1: u32,
    s2: u32,
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Adler32 {
    /// Checksum of the empty input
    pub fn new() -> Self {
        Self { s1: 1, s2: 0 }
    }

    /// Resume from a previously reported checksum
    pub fn from_checksum(checksum: u32) -> Self {
        Self {
            s1: checksum & 0xFFFF,
            s2: checksum >> 16,
        }
    }

    /// Fold more bytes into the checksum
    pub fn update(&mut self, data: &[u8]) {
        let (mut s1, mut s2) = (self.s1, self.s2);

        for block in data.chunks(NMAX) {
            let mut lanes = block.chunks_exact(16);
            for lane in &mut lanes {
                for &byte in lane {
                    s1 += u32::from(byte);
                    s2 += s1;
                }
            }
            for &byte in lanes.remainder() {
                s1 += u32::from(byte);
                s2 += s1;
            }
            s1 %= BASE;
            s2 %= BASE;
        }

        self.s1 = s1;
        self.s2 = s2;
    }

    pub fn checksum(&self) -> u32 {
        (self.s2 << 16) | self.s1
    }
}

/// Continue an Adler-32 checksum over `data`
pub fn adler32(checksum: u32, data: &[u8]) -> u32 {
    let mut state = Adler32::from_checksum(checksum);
    state.update(data);
    state.checksum()
}

/// Stream `src` into `dst` as a zlib envelope, returning the Adler-32 of the
/// uncompressed bytes
pub fn zlib_deflate<R: Read, W: Write>(mut src: R, mut dst: W) -> io::Result<u32> {
    dst.write_all(&ZLIB_HEADER)?;

    let mut adler = Adler32::new();
    let mut encoder = DeflateEncoder::new(&mut dst, Compression::best());
    let mut buf = [0u8; BLOCK_SIZE];
    loop {
        let read = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        adler.update(&buf[..read]);
        encoder.write_all(&buf[..read])?;
    }
    encoder.finish()?;

    let checksum = adler.checksum();
    dst.write_all(&checksum.to_be_bytes())?;
    log::trace!("deflated stream, adler32 {checksum:08x}");
    Ok(checksum)
}

/// Compress a byte slice into a new zlib envelope
pub fn compress(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(data.len() / 2 + 16);
    zlib_deflate(data, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use proptest::prelude::*;

    fn inflate(data: &[u8]) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        ZlibDecoder::new(data).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_adler32_known_values() {
        assert_eq!(adler32(1, b""), 1);
        assert_eq!(adler32(1, b"a"), 0x0062_0062);
        assert_eq!(adler32(1, b"Wikipedia"), 0x11E6_0398);
    }

    #[test]
    fn test_adler32_long_input_reduces() {
        // Enough 0xFF bytes to overflow without the NMAX batching
        let data = vec![0xFFu8; NMAX * 3 + 7];
        let mut naive = (1u64, 0u64);
        for &b in &data {
            naive.0 = (naive.0 + u64::from(b)) % u64::from(BASE);
            naive.1 = (naive.1 + naive.0) % u64::from(BASE);
        }
        let expected = ((naive.1 << 16) | naive.0) as u32;
        assert_eq!(adler32(1, &data), expected);
    }

    #[test]
    fn test_envelope_layout() {
        let data = b"hello hello hello hello";
        let out = compress(data).unwrap();
        assert_eq!(&out[..2], &ZLIB_HEADER);
        let trailer = &out[out.len() - 4..];
        assert_eq!(trailer, &adler32(1, data).to_be_bytes());
        assert_eq!(inflate(&out), data);
    }

    #[test]
    fn test_empty_input() {
        let out = compress(b"").unwrap();
        assert_eq!(&out[out.len() - 4..], &[0, 0, 0, 1]);
        assert!(inflate(&out).is_empty());
    }

    #[test]
    fn test_returns_checksum() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut out: Vec<u8> = Vec::new();
        let checksum = zlib_deflate(&data[..], &mut out).unwrap();
        assert_eq!(checksum, adler32(1, &data));
        assert_eq!(inflate(&out), data);
    }

    proptest! {
        #[test]
        fn adler32_is_chunking_independent(
            data in proptest::collection::vec(any::<u8>(), 0..20_000),
            split in 0usize..20_000,
        ) {
            let split = split.min(data.len());
            let whole = adler32(1, &data);
            let parts = adler32(adler32(1, &data[..split]), &data[split..]);
            prop_assert_eq!(whole, parts);
        }

        #[test]
        fn envelope_inflates_to_input(data in proptest::collection::vec(any::<u8>(), 0..8_192)) {
            let out = compress(&data).unwrap();
            prop_assert_eq!(inflate(&out), data);
        }
    }
}
