//! Indentation configuration for code generation.

use declsnap_ir::IndentStyle;

/// Indentation unit for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, the C# convention.
    pub const CSHARP: Self = Self::Spaces(4);

    /// Append `levels` indentation units to `buffer`.
    pub fn write_to(&self, buffer: &mut String, levels: usize) {
        match self {
            Self::Spaces(width) => {
                buffer.extend(std::iter::repeat_n(' ', levels * usize::from(*width)))
            }
            Self::Tab => buffer.extend(std::iter::repeat_n('\t', levels)),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::CSHARP
    }
}

impl From<IndentStyle> for Indent {
    fn from(style: IndentStyle) -> Self {
        match style {
            IndentStyle::Spaces(width) => Self::Spaces(width),
            IndentStyle::Tab => Self::Tab,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to() {
        let mut buffer = String::new();
        Indent::Spaces(3).write_to(&mut buffer, 2);
        assert_eq!(buffer, "      ");

        buffer.clear();
        Indent::Tab.write_to(&mut buffer, 2);
        assert_eq!(buffer, "\t\t");

        buffer.clear();
        Indent::CSHARP.write_to(&mut buffer, 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_from_style() {
        assert_eq!(Indent::from(IndentStyle::Tab), Indent::Tab);
        assert_eq!(Indent::from(IndentStyle::default()), Indent::CSHARP);
    }
}
