use clap::Parser;
use gems_codegen::{CodeGenerator, CodegenError, GeneratorConfig, DEFAULT_ORM_MODULE};
use gems_core::{ConfigTrait, LoggingConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gems-gen")]
#[command(about = "Generate object metadata and form conversions from annotated types")]
struct Cli {
    /// Directory of the annotated storage types
    #[arg(long)]
    orm_dir: PathBuf,

    /// Directory of the form types
    #[arg(long)]
    forms_dir: PathBuf,

    /// Module path of the storage types as seen from the form tree
    #[arg(long, default_value = DEFAULT_ORM_MODULE)]
    orm_module: String,

    /// Fail instead of writing when generated files are out of date
    #[arg(long)]
    check: bool,
}

fn main() -> Result<(), CodegenError> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env().map_err(gems_core::CoreError::from)?;
    gems_core::init_logging(&logging)?;

    let config = GeneratorConfig::new(cli.orm_dir, cli.forms_dir).with_orm_module(cli.orm_module);
    let written = CodeGenerator::new(config).generate_all(cli.check)?;
    for path in &written {
        println!("wrote {}", path.display());
    }
    Ok(())
}
