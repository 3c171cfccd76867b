use std::fmt;

/// Error returned by [`Font::from_bytes`].
#[derive(Debug, Clone)]
pub struct FontParseError(pub String);

impl fmt::Display for FontParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font parse error: {}", self.0)
    }
}

impl std::error::Error for FontParseError {}

/// A parsed TrueType/OpenType font.
///
/// Immutable after loading; shared freely between text meshes.
pub struct Font {
    inner: fontdue::Font,
}

impl Font {
    /// Parses a font from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontParseError> {
        let inner = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontParseError(e.to_string()))?;
        Ok(Self { inner })
    }

    #[inline]
    pub(crate) fn raw(&self) -> &fontdue::Font {
        &self.inner
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = Font::from_bytes(&[0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert!(!err.0.is_empty());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(Font::from_bytes(&[]).is_err());
    }
}
