use std::path::PathBuf;
use clap::Subcommand;
use crate::enums::language::Language;
use crate::enums::test_type::TestType;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample configuration file
    Init,
    /// Check which collaborators are configured
    Validate {
        /// Run a create/upload/exec/delete round trip against the sandbox service
        #[clap(long)]
        probe_sandbox: bool,
    },
    /// Analyze a single source file
    Scan {
        file: PathBuf,
        #[clap(short, long)]
        language: Option<Language>,
        #[clap(short, long, value_enum, default_value_t = TestType::Static)]
        mode: TestType,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Analyze several source files as one request
    Files {
        #[clap(required = true)]
        files: Vec<PathBuf>,
        #[clap(short, long, value_enum, default_value_t = TestType::Static)]
        mode: TestType,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract code files from a ZIP archive and analyze them
    Archive {
        archive: PathBuf,
        #[clap(short, long, value_enum, default_value_t = TestType::Static)]
        mode: TestType,
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}
