use color_print::{cformat, cprintln};

use crate::{
    inst::{Body, Word},
    parser::DATA_DIRECTIVE,
    session::Session,
};

pub fn print_dump(session: &Session) {
    let mut file = "";
    for cell in session.image() {
        // Print file header when the source changes
        if cell.loc.file != file {
            file = cell.loc.file.as_str();
            println!(
                "{}+------[{}]{}",
                "-".repeat(8),
                file,
                "-".repeat(45usize.saturating_sub(file.len()))
            );
        }

        let labels = session
            .labels()
            .iter()
            .filter(|(_, label)| label.addr == cell.addr)
            .map(|(name, _)| cformat!("<g>{}:</> ", name))
            .collect::<String>();

        let body = match &cell.body {
            Body::Inst(inst) => inst.cformat(),
            Body::Data(Word::Value(v)) => {
                cformat!("<red>{:<6}</><yellow>0x{:04X}</>", DATA_DIRECTIVE, v)
            }
            Body::Data(Word::Label(name)) => {
                cformat!("<red>{:<6}</><underline>{}</>", DATA_DIRECTIVE, name)
            }
        };

        cprintln!(
            "[<green>{:04X}</>] | {:>4}: {}{}",
            cell.addr,
            cell.loc.line,
            labels,
            body
        );
    }
    println!("--------+-----------------------------------------------------");

    for (name, label) in session.labels().iter() {
        cprintln!("<g>{:<24}</> 0x{:04X}  ({})", name, label.addr, label.loc);
    }
}
