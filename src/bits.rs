//! In-place bit twiddling used to turn packed matrix rows into PNG scanlines.
//!
//! Every operation has a scalar implementation and, on x86-64 with AVX2, a vector
//! implementation that handles whole 256-bit lanes and leaves the remainder to the
//! scalar code. Both produce identical output for any buffer.
//!
//! The free functions use the strategy picked once per process by [`Strategy::current`].
//! A [`Strategy`] can also be used directly, e.g. to compare implementations.

use std::fmt;
use std::sync::OnceLock;

/// A way of running the bit transforms.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Strategy(Kind);

#[derive(Copy, Clone, Eq, PartialEq)]
enum Kind {
    Scalar,
    #[cfg(target_arch = "x86_64")]
    Avx2,
}

impl Strategy {
    /// Portable byte-at-a-time implementation
    pub const SCALAR: Strategy = Strategy(Kind::Scalar);

    /// AVX2 implementation, if this CPU supports it
    pub fn avx2() -> Option<Self> {
        #[cfg(target_arch = "x86_64")]
        {
            if is_x86_feature_detected!("avx2") {
                return Some(Strategy(Kind::Avx2));
            }
        }
        None
    }

    /// Fastest strategy the CPU supports
    pub fn detect() -> Self {
        Self::avx2().unwrap_or(Self::SCALAR)
    }

    /// Strategy used by the module-level functions. Detected on first use.
    pub fn current() -> Self {
        static CURRENT: OnceLock<Strategy> = OnceLock::new();
        *CURRENT.get_or_init(|| {
            let strategy = Self::detect();
            log::debug!("bit transforms use the {} strategy", strategy.name());
            strategy
        })
    }

    /// Every strategy usable on this machine, scalar first.
    pub fn available() -> Vec<Self> {
        let mut all = vec![Self::SCALAR];
        all.extend(Self::avx2());
        all
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            Kind::Scalar => "scalar",
            #[cfg(target_arch = "x86_64")]
            Kind::Avx2 => "avx2",
        }
    }

    /// Flips every bit.
    pub fn negate(self, buf: &mut [u8]) {
        let done = match self.0 {
            Kind::Scalar => 0,
            // SAFETY: Kind::Avx2 is only created after the CPU feature check
            #[cfg(target_arch = "x86_64")]
            Kind::Avx2 => unsafe { avx2::negate(buf) },
        };
        scalar::negate(&mut buf[done..]);
    }

    /// Flips every bit of every word.
    pub fn negate_words(self, buf: &mut [u32]) {
        let done = match self.0 {
            Kind::Scalar => 0,
            // SAFETY: see negate
            #[cfg(target_arch = "x86_64")]
            Kind::Avx2 => unsafe { avx2::negate_words(buf) },
        };
        scalar::negate_words(&mut buf[done..]);
    }

    /// Mirrors the bits within each byte: bit 0 becomes bit 7.
    pub fn reverse_bits(self, buf: &mut [u8]) {
        let done = match self.0 {
            Kind::Scalar => 0,
            // SAFETY: see negate
            #[cfg(target_arch = "x86_64")]
            Kind::Avx2 => unsafe { avx2::reverse_bits(buf) },
        };
        scalar::reverse_bits(&mut buf[done..]);
    }

    /// Byte-swaps each word.
    pub fn reverse_endianness(self, buf: &mut [u32]) {
        let done = match self.0 {
            Kind::Scalar => 0,
            // SAFETY: see negate
            #[cfg(target_arch = "x86_64")]
            Kind::Avx2 => unsafe { avx2::reverse_endianness(buf) },
        };
        scalar::reverse_endianness(&mut buf[done..]);
    }

    /// Mirrors all 32 bits of each word: a byte swap followed by reversing each byte.
    pub fn reverse_bits_words(self, buf: &mut [u32]) {
        self.reverse_endianness(buf);
        self.reverse_bits(bytemuck::cast_slice_mut(buf));
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flips every bit of `buf`.
#[inline]
pub fn negate(buf: &mut [u8]) {
    Strategy::current().negate(buf)
}

/// Flips every bit of every word in `buf`.
#[inline]
pub fn negate_words(buf: &mut [u32]) {
    Strategy::current().negate_words(buf)
}

/// Reverses the bit order within each byte of `buf`.
///
/// Matrix rows are packed least significant bit first, PNG scanlines most significant bit first.
#[inline]
pub fn reverse_bits_in_place(buf: &mut [u8]) {
    Strategy::current().reverse_bits(buf)
}

/// Byte-swaps every word of `buf`.
#[inline]
pub fn reverse_endianness(buf: &mut [u32]) {
    Strategy::current().reverse_endianness(buf)
}

/// Reverses all 32 bits of every word of `buf`.
#[inline]
pub fn reverse_bits_words(buf: &mut [u32]) {
    Strategy::current().reverse_bits_words(buf)
}

mod scalar {
    pub fn negate(buf: &mut [u8]) {
        for b in buf {
            *b = !*b;
        }
    }

    pub fn negate_words(buf: &mut [u32]) {
        for w in buf {
            *w = !*w;
        }
    }

    pub fn reverse_bits(buf: &mut [u8]) {
        for b in buf {
            *b = b.reverse_bits();
        }
    }

    pub fn reverse_endianness(buf: &mut [u32]) {
        for w in buf {
            *w = w.swap_bytes();
        }
    }
}

/// Each function processes whole 32-byte lanes only and returns how many elements it
/// handled, so the caller can finish the tail with the scalar code.
#[cfg(target_arch = "x86_64")]
mod avx2 {
    use std::arch::x86_64::*;

    const LANE_BYTES: usize = 32;
    const LANE_WORDS: usize = 8;

    #[target_feature(enable = "avx2")]
    pub unsafe fn negate(buf: &mut [u8]) -> usize {
        let end = buf.len() & !(LANE_BYTES - 1);
        let ones = _mm256_set1_epi8(-1);
        let ptr = buf.as_mut_ptr();
        let mut i = 0;
        while i < end {
            let p = ptr.add(i).cast::<__m256i>();
            _mm256_storeu_si256(p, _mm256_andnot_si256(_mm256_loadu_si256(p), ones));
            i += LANE_BYTES;
        }
        end
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn negate_words(buf: &mut [u32]) -> usize {
        let end = buf.len() & !(LANE_WORDS - 1);
        let ones = _mm256_set1_epi32(-1);
        let ptr = buf.as_mut_ptr();
        let mut i = 0;
        while i < end {
            let p = ptr.add(i).cast::<__m256i>();
            _mm256_storeu_si256(p, _mm256_andnot_si256(_mm256_loadu_si256(p), ones));
            i += LANE_WORDS;
        }
        end
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn reverse_bits(buf: &mut [u8]) -> usize {
        let end = buf.len() & !(LANE_BYTES - 1);
        // 16-bit shifts; the masks keep bits from crossing into the neighbouring byte
        let hi4 = _mm256_set1_epi16(0xF0F0u16 as i16);
        let lo4 = _mm256_set1_epi16(0x0F0F);
        let hi2 = _mm256_set1_epi16(0xCCCCu16 as i16);
        let lo2 = _mm256_set1_epi16(0x3333);
        let hi1 = _mm256_set1_epi16(0xAAAAu16 as i16);
        let lo1 = _mm256_set1_epi16(0x5555);
        let ptr = buf.as_mut_ptr();
        let mut i = 0;
        while i < end {
            let p = ptr.add(i).cast::<__m256i>();
            let mut v = _mm256_loadu_si256(p);
            v = _mm256_or_si256(
                _mm256_srli_epi16(_mm256_and_si256(v, hi4), 4),
                _mm256_slli_epi16(_mm256_and_si256(v, lo4), 4),
            );
            v = _mm256_or_si256(
                _mm256_srli_epi16(_mm256_and_si256(v, hi2), 2),
                _mm256_slli_epi16(_mm256_and_si256(v, lo2), 2),
            );
            v = _mm256_or_si256(
                _mm256_srli_epi16(_mm256_and_si256(v, hi1), 1),
                _mm256_slli_epi16(_mm256_and_si256(v, lo1), 1),
            );
            _mm256_storeu_si256(p, v);
            i += LANE_BYTES;
        }
        end
    }

    #[target_feature(enable = "avx2")]
    pub unsafe fn reverse_endianness(buf: &mut [u32]) -> usize {
        let end = buf.len() & !(LANE_WORDS - 1);
        // the shuffle indexes within each 128-bit half
        let mask = _mm256_setr_epi8(
            3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15, 14, 13, 12,
            3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15, 14, 13, 12,
        );
        let ptr = buf.as_mut_ptr();
        let mut i = 0;
        while i < end {
            let p = ptr.add(i).cast::<__m256i>();
            _mm256_storeu_si256(p, _mm256_shuffle_epi8(_mm256_loadu_si256(p), mask));
            i += LANE_WORDS;
        }
        end
    }
}
