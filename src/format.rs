//! DXX format registry
//!
//! Maps the six DXX file extensions onto their element type, byte width and
//! encoding. The second letter of an extension selects the element type
//! (`S` int16, `F` float32, `D` float64), the third the encoding (`A` text,
//! `B` binary).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{DxxError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Int16,
    Float32,
    Float64,
}

impl ElementType {
    pub fn name(&self) -> &'static str {
        match self {
            ElementType::Int16 => "int16",
            ElementType::Float32 => "float32",
            ElementType::Float64 => "float64",
        }
    }

    pub fn byte_width(&self) -> usize {
        match self {
            ElementType::Int16 => 2,
            ElementType::Float32 => 4,
            ElementType::Float64 => 8,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Text,
    Binary,
}

/// Static record describing one DXX format.
#[derive(Debug, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub format: DxxFormat,
    pub name: &'static str,
    pub element_type: ElementType,
    pub encoding: Encoding,
    pub text_format: &'static str,
}

impl FormatDescriptor {
    pub fn byte_width(&self) -> usize {
        self.element_type.byte_width()
    }

    pub fn is_text(&self) -> bool {
        self.encoding == Encoding::Text
    }

    pub fn is_binary(&self) -> bool {
        self.encoding == Encoding::Binary
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DxxFormat {
    Dsa,
    Dfa,
    Dda,
    Dsb,
    Dfb,
    Ddb,
}

static FORMATS: [FormatDescriptor; 6] = [
    FormatDescriptor { format: DxxFormat::Dsa, name: "DSA", element_type: ElementType::Int16, encoding: Encoding::Text, text_format: "%d" },
    FormatDescriptor { format: DxxFormat::Dfa, name: "DFA", element_type: ElementType::Float32, encoding: Encoding::Text, text_format: "%e" },
    FormatDescriptor { format: DxxFormat::Dda, name: "DDA", element_type: ElementType::Float64, encoding: Encoding::Text, text_format: "%le" },
    FormatDescriptor { format: DxxFormat::Dsb, name: "DSB", element_type: ElementType::Int16, encoding: Encoding::Binary, text_format: "%d" },
    FormatDescriptor { format: DxxFormat::Dfb, name: "DFB", element_type: ElementType::Float32, encoding: Encoding::Binary, text_format: "%e" },
    FormatDescriptor { format: DxxFormat::Ddb, name: "DDB", element_type: ElementType::Float64, encoding: Encoding::Binary, text_format: "%le" },
];

impl DxxFormat {
    pub const ALL: [DxxFormat; 6] = [
        DxxFormat::Dsa,
        DxxFormat::Dfa,
        DxxFormat::Dda,
        DxxFormat::Dsb,
        DxxFormat::Dfb,
        DxxFormat::Ddb,
    ];

    pub fn descriptor(self) -> &'static FormatDescriptor {
        &FORMATS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn element_type(self) -> ElementType {
        self.descriptor().element_type
    }

    pub fn byte_width(self) -> usize {
        self.descriptor().byte_width()
    }

    pub fn is_text(self) -> bool {
        self.descriptor().is_text()
    }

    pub fn is_binary(self) -> bool {
        self.descriptor().is_binary()
    }

    pub fn text_format(self) -> &'static str {
        self.descriptor().text_format
    }

    pub fn from_filename<P: AsRef<Path>>(filename: P) -> Result<Self> {
        resolve(filename).map(|d| d.format)
    }
}

impl fmt::Display for DxxFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DxxFormat {
    type Err = DxxError;

    fn from_str(s: &str) -> Result<Self> {
        FORMATS
            .iter()
            .find(|d| d.name == s)
            .map(|d| d.format)
            .ok_or_else(|| DxxError::unsupported(s))
    }
}

/// Resolve a file name to its format descriptor by its extension.
///
/// The match is exact and case-sensitive; `foo.dsb` and `DSB` (no dot) are
/// both rejected.
pub fn resolve<P: AsRef<Path>>(filename: P) -> Result<&'static FormatDescriptor> {
    let ext = extension_of(filename.as_ref());
    ext.parse::<DxxFormat>().map(DxxFormat::descriptor)
}

/// Names of every supported format in declaration order.
pub fn list_names() -> Vec<&'static str> {
    FORMATS.iter().map(|d| d.name).collect()
}

pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_filename() {
        assert_eq!(DxxFormat::from_filename("mock.DSB").unwrap(), DxxFormat::Dsb);
        assert_eq!(DxxFormat::from_filename("dir.v2/take.DDA").unwrap(), DxxFormat::Dda);
    }

    #[test]
    fn test_list_names() {
        assert_eq!(list_names(), vec!["DSA", "DFA", "DDA", "DSB", "DFB", "DDB"]);
    }

    #[test]
    fn test_table_order_matches_enum() {
        for (i, format) in DxxFormat::ALL.iter().enumerate() {
            assert_eq!(FORMATS[i].format, *format);
        }
    }

    #[test]
    fn test_byte_width() {
        let widths: Vec<usize> = DxxFormat::ALL.iter().map(|f| f.byte_width()).collect();
        assert_eq!(widths, vec![2, 4, 8, 2, 4, 8]);
    }

    #[test]
    fn test_text_format() {
        let specs: Vec<&str> = DxxFormat::ALL.iter().map(|f| f.text_format()).collect();
        assert_eq!(specs, vec!["%d", "%e", "%le", "%d", "%e", "%le"]);
    }

    #[test]
    fn test_element_type() {
        use ElementType::*;
        let types: Vec<ElementType> = DxxFormat::ALL.iter().map(|f| f.element_type()).collect();
        assert_eq!(types, vec![Int16, Float32, Float64, Int16, Float32, Float64]);
    }

    #[test]
    fn test_text_and_binary() {
        for format in DxxFormat::ALL {
            assert_eq!(format.is_text(), format.name().ends_with('A'));
            assert_eq!(format.is_binary(), format.name().ends_with('B'));
        }
    }

    #[test]
    fn test_display() {
        let names: Vec<String> = DxxFormat::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, list_names());
    }

    #[test]
    fn test_resolve_rejects_unknown() {
        for bad in ["", "DSB", "mock", "mock.dsb", "mock.Dsb", "mock.wav", ".DSB", "mock.DSB.bak", "mock.DSBX"] {
            let err = resolve(bad).unwrap_err();
            assert!(err.is_unsupported_format(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_resolve_all_known() {
        for name in list_names() {
            let desc = resolve(format!("a.{name}")).unwrap();
            assert_eq!(desc.name, name);
        }
    }
}
