use color_print::ceprintln;
use r16asm::{util::print_dump, Error, Session, SymbolMap};
use std::num::ParseIntError;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files, assembled in order into one image
    #[clap(default_value = "main.s")]
    input: Vec<String>,

    /// Address of the first word (decimal, 0x, 0o or 0b)
    #[clap(short, long, default_value = "0", value_parser = parse_with_prefix)]
    origin: u16,

    /// Dump the program image and label table
    #[clap(short, long)]
    dump: bool,

    /// Write the label table as YAML
    #[clap(short, long)]
    symbols: Option<String>,
}

fn main() {
    use clap::Parser;

    env_logger::init();
    let args: Args = Args::parse();

    let mut session = Session::with_origin(args.origin);

    log::info!("1. Read files and translate lines");
    for path in &args.input {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => fail(Error::FileOpen(path.clone(), err)),
        };
        if let Err(diag) = session.translate(path, &source) {
            diag.print();
            std::process::exit(1);
        }
    }

    log::info!("2. Resolve labels");
    if let Err(diag) = session.resolve() {
        diag.print();
        std::process::exit(1);
    }

    if args.dump {
        print_dump(&session);
    }

    if let Some(path) = &args.symbols {
        log::info!("3. Write symbol map > {}", path);
        if let Err(err) = SymbolMap::from(&session).write(path) {
            fail(err);
        }
    }
}

fn fail(err: Error) -> ! {
    ceprintln!("<red,bold>error</>: {}", err);
    if let Some(source) = std::error::Error::source(&err) {
        ceprintln!("     <blue>caused by</>: {}", source);
    }
    std::process::exit(1);
}

fn parse_with_prefix(s: &str) -> Result<u16, ParseIntError> {
    if let Some(num) = s.strip_prefix("0x") {
        u16::from_str_radix(num, 16)
    } else if let Some(num) = s.strip_prefix("0o") {
        u16::from_str_radix(num, 8)
    } else if let Some(num) = s.strip_prefix("0b") {
        u16::from_str_radix(num, 2)
    } else {
        s.parse::<u16>()
    }
}

#[test]
fn test() {
    assert_eq!(parse_with_prefix("0x100"), Ok(0x100));
    assert_eq!(parse_with_prefix("0b101"), Ok(5));
    assert_eq!(parse_with_prefix("0o17"), Ok(15));
    assert_eq!(parse_with_prefix("42"), Ok(42));
    assert!(parse_with_prefix("0x10000").is_err());
    assert!(parse_with_prefix("start").is_err());
}
