use crate::{
    error::{Diag, Error},
    inst::{Body, Imm, Inst, Word},
    label::Labels,
    session::Session,
};

impl Session {
    /// Second pass: replace every label reference with the label's address.
    /// Addressing modes are kept as written for the encoder.
    pub fn resolve(&mut self) -> Result<(), Diag> {
        let labels = &self.labels;
        let mut count = 0;
        for cell in self.image.iter_mut() {
            match &mut cell.body {
                Body::Inst(Inst { imm: Some(imm), .. }) => {
                    if let Imm::Deferred(name) = &imm.value {
                        let addr = lookup(labels, name)
                            .map_err(|err| Diag::new(cell.loc.clone(), err))?;
                        imm.value = Imm::Resolved(addr);
                        count += 1;
                    }
                }
                Body::Data(word) => {
                    if let Word::Label(name) = word {
                        let addr = lookup(labels, name)
                            .map_err(|err| Diag::new(cell.loc.clone(), err))?;
                        *word = Word::Value(addr);
                        count += 1;
                    }
                }
                Body::Inst(_) => {}
            }
        }
        log::info!("resolved {} label reference(s)", count);
        Ok(())
    }

    /// True once no cell refers to a label by name.
    pub fn is_resolved(&self) -> bool {
        self.image.iter().all(|cell| match &cell.body {
            Body::Inst(inst) => inst.is_resolved(),
            Body::Data(word) => matches!(word, Word::Value(_)),
        })
    }
}

fn lookup(labels: &Labels, name: &str) -> Result<u16, Error> {
    labels
        .get_val(name)
        .ok_or_else(|| Error::UndefinedLabel(name.to_string()))
}
