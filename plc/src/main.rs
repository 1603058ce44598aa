use color_print::cprintln;
use log::info;
use plc::{Inst, Stream};
use std::io::Write;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    /// One instruction per line
    Text,
    /// YAML sequence of instructions
    Yaml,
}

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.pas")]
    input: String,

    /// Listing format
    #[clap(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Colorize the text listing
    #[clap(short, long)]
    color: bool,

    /// Increase log verbosity (-v summary, -vv token trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logs
    #[clap(short, long)]
    quiet: bool,
}

fn print_listing(code: &[Inst], format: Format, color: bool) -> Result<(), plc::Error> {
    match format {
        Format::Text => {
            for inst in code {
                if color {
                    println!("{}", inst.cformat());
                } else {
                    println!("{}", inst);
                }
            }
            Ok(())
        }
        Format::Yaml => {
            let text = plc::yaml(code)?;
            print!("{}", text);
            Ok(())
        }
    }
}

fn main() {
    use clap::Parser;

    let args = Args::parse();

    stderrlog::new()
        .module(module_path!())
        .quiet(args.quiet)
        .verbosity(1 + args.verbose as usize)
        .init()
        .expect("Failed to initialize logger");

    let code = match std::fs::read_to_string(&args.input) {
        Ok(code) => code,
        Err(e) => {
            cprintln!("<red,bold>error</>: Failed to open File: {}: {}", args.input, e);
            std::process::exit(1);
        }
    };
    info!("compiling {}", args.input);

    let result = match (args.format, args.color) {
        // Plain text streams straight to stdout while parsing
        (Format::Text, false) => {
            let stdout = std::io::stdout();
            plc::compile_into(&code, Stream::new(stdout.lock()))
                .and_then(|unit| Ok(unit.code.into_inner().flush()?))
        }
        (format, color) => {
            plc::compile(&code).and_then(|unit| print_listing(&unit.code, format, color))
        }
    };

    if let Err(e) = result {
        e.print_diag(&args.input, &code);
        std::process::exit(1);
    }
}
