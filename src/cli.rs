use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(value_name = "TYPES_XML", help = "path/to/Opc.Ua.Types.bsd")]
    pub types_xml: PathBuf,

    #[arg(
        value_name = "OUTFILE",
        help = "Output file without extension (\".idl\" is appended)"
    )]
    pub outfile: PathBuf,

    #[arg(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,

    #[arg(long, help = "Emit the schema documentation as IDL comments")]
    pub emit_docs: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,
}

impl Cli {
    /// Path of the generated IDL file.
    pub fn output_path(&self) -> PathBuf {
        let mut path = self.outfile.clone().into_os_string();
        path.push(".idl");
        path.into()
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
