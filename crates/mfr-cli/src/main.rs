use clap::{CommandFactory, Parser, Subcommand};
use mfr::{
    commands::install_requirements,
    config_manager::Config,
    errors::InstallError,
    installer::PipInstaller,
    logger,
    plugins::RequirementSelection,
    GlobalOpts,
};
use std::ffi::OsString;

#[derive(Parser)]
#[command(name = "mfr")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Modular file renderer plugin installer",
    long_about = "mfr is a CLI tool for installing the requirements of modular file renderer plugins."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install plugin requirements
    Install {
        /// Install only export requirements
        #[arg(short, long)]
        export: bool,
        /// Install only render requirements
        #[arg(short, long, conflicts_with = "export")]
        render: bool,
        /// Plugins to install requirements for, or "all"
        plugin: Vec<String>,
    },
    #[command(external_subcommand)]
    External(Vec<OsString>),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    match cli.command {
        Some(Commands::Install {
            export,
            render,
            plugin,
        }) => {
            if plugin.is_empty() {
                println!("Must provide at least one plugin name to install");
                std::process::exit(1);
            }
            let selection = RequirementSelection::from_flags(render, export);
            if let Err(e) = run_install(&plugin, selection) {
                logger::error(&e.to_string());
                std::process::exit(1);
            }
        }
        Some(Commands::External(args)) => {
            let command = args
                .first()
                .map(|arg| arg.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("Invalid subcommand: \"{}\"", command);
            std::process::exit(1);
        }
        None => {
            let _ = Cli::command().print_help();
            std::process::exit(1);
        }
    }
}

fn run_install(plugins: &[String], selection: RequirementSelection) -> Result<(), InstallError> {
    let mut config = Config::load()?;
    config.apply_env_overrides();

    let pip_path = config.ensure_pip_path()?;
    logger::debug(&format!("Using pip: {}", pip_path));

    let installer = PipInstaller::new(pip_path, config.wheelhouse_path());
    install_requirements(&config.get_ext_path(), plugins, selection, &installer)
}
