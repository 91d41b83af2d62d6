use clap::Parser;
use log::LevelFilter;
use tagkit::application::TagService;
use tagkit::cli::{format_state, format_tag, format_tag_list, Cli, Commands};
use tagkit::error::TagkitError;
use tagkit::infrastructure::RegistryFile;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: Cli) -> Result<i32, TagkitError> {
    let path = match cli.registry {
        Some(path) => path,
        None => RegistryFile::discover()?,
    };
    log::debug!("using registry {}", path.display());
    let service = TagService::load(&path)?;

    match cli.command {
        Commands::Exists { token } => {
            let tag = service.exists(&token)?;
            println!("{}", format_tag(tag));
        }
        Commands::Lvl { tags } => {
            println!("{}", service.lvl(&tags));
        }
        Commands::Codes { tags } => {
            println!("{}", service.codes(&tags));
        }
        Commands::Check { tags, expr, quiet } => {
            let passed = service.check(&tags, &expr)?;
            if quiet {
                return Ok(if passed { 0 } else { 1 });
            }
            println!("{}", passed);
        }
        Commands::Set { tags, expr, data } => {
            let state = service.set(&tags, &expr, data.as_deref())?;
            println!("{}", format_state(&state)?);
        }
        Commands::List => {
            println!("{}", format_tag_list(&service.list()).trim_end());
        }
    }

    Ok(0)
}
