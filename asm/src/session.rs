use crate::{
    error::{Diag, Error, Loc},
    inst::Cell,
    label::Labels,
    parser::Stmt,
};

/// One past the highest addressable word.
const ADDR_LIMIT: u32 = 0x1_0000;

/// State of a single assembly run: the label table and the program image.
///
/// Cells are appended densely, so the cell at index `i` always has address
/// `origin + i`.
#[derive(Debug, Default)]
pub struct Session {
    pub(crate) origin: u16,
    pub(crate) pc: u32,
    pub(crate) labels: Labels,
    pub(crate) image: Vec<Cell>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_origin(0)
    }

    pub fn with_origin(origin: u16) -> Self {
        Session {
            origin,
            pc: origin.into(),
            labels: Labels::new(),
            image: vec![],
        }
    }

    pub fn origin(&self) -> u16 {
        self.origin
    }

    /// Address the next cell will be placed at.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn image(&self) -> &[Cell] {
        &self.image
    }

    pub fn cell(&self, addr: u16) -> Option<&Cell> {
        let idx = addr.checked_sub(self.origin)?;
        self.image.get(usize::from(idx))
    }
}

impl Session {
    /// Translate every line of `source`, numbering lines from 1.
    pub fn translate(&mut self, file: &str, source: &str) -> Result<(), Diag> {
        let start = self.image.len();
        for (idx, raw) in source.lines().enumerate() {
            self.translate_line(raw, idx + 1, file)?;
        }
        log::info!(
            "{}: {} word(s), {} label(s) in total",
            file,
            self.image.len() - start,
            self.labels.len()
        );
        Ok(())
    }

    /// Translate a single line. Nothing is recorded unless the whole line is valid.
    pub fn translate_line(&mut self, raw: &str, line: usize, file: &str) -> Result<(), Diag> {
        let loc = Loc::new(file, line);
        Stmt::parse(raw)
            .and_then(|stmt| self.commit(stmt, &loc))
            .map_err(|err| Diag::new(loc, err).with_raw(raw))
    }

    fn commit(&mut self, stmt: Stmt, loc: &Loc) -> Result<(), Error> {
        let len = u32::try_from(stmt.body.len()).map_err(|_| Error::AddressOverflow)?;
        if self.pc + len > ADDR_LIMIT {
            return Err(Error::AddressOverflow);
        }

        if let Some(name) = stmt.label {
            let addr = u16::try_from(self.pc).map_err(|_| Error::AddressOverflow)?;
            self.labels.insert(name, addr, loc.clone())?;
        }

        for body in stmt.body {
            self.image.push(Cell {
                addr: self.pc as u16,
                loc: loc.clone(),
                body,
            });
            self.pc += 1;
        }

        if !stmt.ignored.is_empty() {
            log::warn!(
                "{}: ignoring trailing token(s) `{}`",
                loc,
                stmt.ignored.join(" ")
            );
        }
        Ok(())
    }
}
