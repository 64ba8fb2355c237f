use arch::reg::Reg;
use color_print::ceprintln;
use num_enum::TryFromPrimitiveError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown instruction \"{0}\"")]
    UnknownMnemonic(String),

    #[error("expected register name, found \"{0}\"")]
    ExpectedRegisterName(String),

    #[error("expected comma after register name \"{0}\"")]
    ExpectedComma(String),

    #[error("invalid register R{0}")]
    InvalidRegisterReference(u8),

    #[error("undefined label \"{0}\"")]
    UndefinedLabel(String),

    #[error("re-defined label \"{0}\"")]
    RedefinedLabel(String),

    #[error("label name is empty")]
    InvalidLabel,

    #[error("more operands required")]
    MissingOperand,

    #[error("cannot parse \"{0}\" as a literal")]
    InvalidLiteral(String),

    #[error("literal \"{0}\" does not fit in 16 bits")]
    LiteralOutOfRange(String),

    #[error("program exceeds the 16-bit address space")]
    AddressOverflow,

    #[error("failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("failed to serialize symbol map")]
    Symbols(#[from] serde_yaml::Error),
}

impl From<TryFromPrimitiveError<Reg>> for Error {
    fn from(err: TryFromPrimitiveError<Reg>) -> Self {
        Error::InvalidRegisterReference(err.number)
    }
}

// ----------------------------------------------------------------------------
// Source location

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loc {
    pub file: String,
    /// 1-based
    pub line: usize,
}

impl Loc {
    pub fn new(file: &str, line: usize) -> Self {
        Loc {
            file: file.to_string(),
            line,
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

// ----------------------------------------------------------------------------
// Diagnostic

/// A fatal error tied to the line that caused it.
#[derive(Debug)]
pub struct Diag {
    pub loc: Loc,
    pub error: Error,
    pub raw: Option<String>,
}

impl Diag {
    pub fn new(loc: Loc, error: Error) -> Self {
        Diag {
            loc,
            error,
            raw: None,
        }
    }

    pub fn with_raw(mut self, raw: &str) -> Self {
        self.raw = Some(raw.trim_end().to_string());
        self
    }

    /// Print the diagnostic line followed by a source excerpt
    pub fn print(&self) {
        eprintln!("{}", self);
        ceprintln!("<red,bold>error</>: {}", self.error);
        ceprintln!("     <blue>--></> <underline>{}</>", self.loc);
        if let Some(raw) = &self.raw {
            ceprintln!("      <blue>|</>");
            ceprintln!(" <blue>{:>4} |</> {}", self.loc.line, raw);
            ceprintln!("      <blue>|</>");
        }
    }
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "In file {}, at line {}: {}",
            self.loc.file, self.loc.line, self.error
        )
    }
}

impl std::error::Error for Diag {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
