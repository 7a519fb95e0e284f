//! Zero-alloc ANSI colour wrapper plus the categorical palette.

use std::{fmt, str};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid hex colour digit")]
    InvalidHexDigit,
    #[error("hex colour must be exactly 6 digits")]
    InvalidHexLength,
}

// --- AnsiCode ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnsiCode {
    Static(&'static str),
    Inline { buf: [u8; 20], len: u8 },
}

/// Basic colours accepted by name in `--palette`.
pub const NAMED_COLORS: [(&str, &str); 7] = [
    ("red", "\x1b[31m"),
    ("green", "\x1b[32m"),
    ("yellow", "\x1b[33m"),
    ("blue", "\x1b[34m"),
    ("magenta", "\x1b[35m"),
    ("cyan", "\x1b[36m"),
    ("white", "\x1b[37m"),
];

impl AnsiCode {
    /// Faint attribute, used for grid dots.
    pub const fn dim() -> Self {
        Self::Static("\x1b[2m")
    }
    #[inline]
    pub const fn reset() -> Self {
        Self::Static("\x1b[0m")
    }

    /// True-colour escape `ESC[38;2;R;G;Bm`.
    #[must_use]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        let mut buf = [0u8; 20];
        buf[..7].copy_from_slice(b"\x1b[38;2;");
        let mut len = 7;

        for (i, v) in [r, g, b].into_iter().enumerate() {
            len += write_u8(&mut buf[len..], v);
            if i != 2 {
                buf[len] = b';';
                len += 1;
            }
        }
        buf[len] = b'm';
        len += 1;
        Self::Inline {
            buf,
            len: len as u8,
        }
    }

    /// A name from [`NAMED_COLORS`] or `#rrggbb`.
    pub fn from_name(s: &str) -> Result<Self, ColorError> {
        let key = s.trim().to_ascii_lowercase();
        match NAMED_COLORS.iter().find(|(name, _)| *name == key) {
            Some(&(_, esc)) => Ok(Self::Static(esc)),
            None => Self::from_hex(s),
        }
    }

    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let h = hex.trim().trim_start_matches('#');
        if h.len() != 6 || !h.is_ascii() {
            return Err(ColorError::InvalidHexLength);
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorError::InvalidHexDigit);
        Ok(Self::rgb(byte(&h[..2])?, byte(&h[2..4])?, byte(&h[4..])?))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Inline { buf, len } => str::from_utf8(&buf[..*len as usize]).unwrap_or_default(),
        }
    }
}

/// Tableau 10, the usual categorical scheme for `fill`.
pub const TABLEAU10: [(u8, u8, u8); 10] = [
    (0x4e, 0x79, 0xa7),
    (0xf2, 0x8e, 0x2c),
    (0xe1, 0x57, 0x59),
    (0x76, 0xb7, 0xb2),
    (0x59, 0xa1, 0x4f),
    (0xed, 0xc9, 0x49),
    (0xaf, 0x7a, 0xa1),
    (0xff, 0x9d, 0xa7),
    (0x9c, 0x75, 0x5f),
    (0xba, 0xb0, 0xab),
];

#[must_use]
pub fn default_palette() -> Vec<AnsiCode> {
    TABLEAU10
        .iter()
        .map(|&(r, g, b)| AnsiCode::rgb(r, g, b))
        .collect()
}

/// Parse a comma-separated list of names / hex codes.
pub fn parse_palette(spec: &str) -> Result<Vec<AnsiCode>, ColorError> {
    spec.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(AnsiCode::from_name)
        .collect()
}

// --- Helpers ---
fn write_u8(dst: &mut [u8], mut n: u8) -> usize {
    let mut tmp = [0u8; 3];
    let mut i = 3;
    loop {
        i -= 1;
        tmp[i] = b'0' + n % 10;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    let len = 3 - i;
    dst[..len].copy_from_slice(&tmp[i..]);
    len
}

impl fmt::Display for AnsiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrap `text` in colour + reset sequence.
#[inline]
#[must_use]
pub fn colorize(c: &AnsiCode, text: &str) -> String {
    format!("{c}{text}{}", AnsiCode::reset())
}
