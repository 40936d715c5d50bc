//! Placeholder markers in template files

/// Delimiter wrapped around a placeholder keyword, e.g. `@@namelist@@`
pub const DELIMITER: &str = "@@";

/// The closed set of substitutions a template may request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Declarations,
    CudaAttributes,
    Allocations,
    Deallocations,
    Initialize,
    Namelist,
    Defaults,
    Commandline,
    Printing,
    Acc,
    /// Accessor routines callable from C++
    CxxGets,
}

impl Keyword {
    pub const ALL: [Keyword; 11] = [
        Keyword::Declarations,
        Keyword::CudaAttributes,
        Keyword::Allocations,
        Keyword::Deallocations,
        Keyword::Initialize,
        Keyword::Namelist,
        Keyword::Defaults,
        Keyword::Commandline,
        Keyword::Printing,
        Keyword::Acc,
        Keyword::CxxGets,
    ];

    /// Look up a keyword by the text found between the delimiters
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "declarations" | "declarationsA" => Some(Keyword::Declarations),
            "cudaattributes" | "cudaattributesA" => Some(Keyword::CudaAttributes),
            "allocations" => Some(Keyword::Allocations),
            "deallocations" => Some(Keyword::Deallocations),
            "initialize" => Some(Keyword::Initialize),
            "namelist" => Some(Keyword::Namelist),
            "defaults" => Some(Keyword::Defaults),
            "commandline" => Some(Keyword::Commandline),
            "printing" => Some(Keyword::Printing),
            "acc" => Some(Keyword::Acc),
            "cxx_gets" => Some(Keyword::CxxGets),
            _ => None,
        }
    }

    /// Canonical spelling
    pub fn name(&self) -> &'static str {
        match self {
            Keyword::Declarations => "declarations",
            Keyword::CudaAttributes => "cudaattributes",
            Keyword::Allocations => "allocations",
            Keyword::Deallocations => "deallocations",
            Keyword::Initialize => "initialize",
            Keyword::Namelist => "namelist",
            Keyword::Defaults => "defaults",
            Keyword::Commandline => "commandline",
            Keyword::Printing => "printing",
            Keyword::Acc => "acc",
            Keyword::CxxGets => "cxx_gets",
        }
    }
}

/// A marker found on a template line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Text strictly between the first and last delimiter
    pub name: &'a str,
    /// Column of the first delimiter, reused as indentation for emitted lines
    pub column: usize,
}

impl Placeholder<'_> {
    pub fn keyword(&self) -> Option<Keyword> {
        Keyword::from_name(self.name)
    }

    pub fn indent(&self) -> String {
        " ".repeat(self.column)
    }
}

/// Find a placeholder on a template line
///
/// A line needs two non-overlapping delimiters to count; a lone `@@` is
/// ordinary text.
pub fn scan_line(line: &str) -> Option<Placeholder<'_>> {
    let first = line.find(DELIMITER)?;
    let last = line.rfind(DELIMITER)?;
    if last < first + DELIMITER.len() {
        return None;
    }
    Some(Placeholder {
        name: &line[first + DELIMITER.len()..last],
        column: first,
    })
}
