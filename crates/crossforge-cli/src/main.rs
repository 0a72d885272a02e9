use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crossforge_cli::commands::{self, EnvSettings};
use crossforge_cli::logging;

#[derive(Parser)]
#[command(name = "crossforge", version, about = "Cross-compilation environment resolver")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List supported targets grouped by family.
    Targets {
        #[arg(long)]
        json: bool,
    },
    /// Print the build environment for a target as shell exports.
    Env {
        /// Project directory holding an optional crossforge.yaml.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Target name (overrides crossforge.yaml).
        #[arg(long, env = "CROSSFORGE_TARGET")]
        target: Option<String>,
        #[command(flatten)]
        flags: ResolveFlags,
        #[arg(long)]
        json: bool,
    },
    /// Classify the project in a directory.
    Detect {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Show the commands a build would run.
    Plan {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long, env = "CROSSFORGE_TARGET")]
        target: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Detect, plan and run the build with the resolved environment.
    Build {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long, env = "CROSSFORGE_TARGET")]
        target: Option<String>,
        #[command(flatten)]
        flags: ResolveFlags,
        /// Print the steps instead of running them.
        #[arg(long)]
        dry_run: bool,
    },
    /// Fail when any of the files is dynamically linked.
    CheckStatic {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Report file sizes.
    Size {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args)]
struct ResolveFlags {
    /// Extra KEY=VALUE override (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
    /// Do not wrap compilers with ccache.
    #[arg(long)]
    no_ccache: bool,
    /// Wrap compilers with sccache (wins over ccache).
    #[arg(long)]
    sccache: bool,
    /// Link with mold.
    #[arg(long)]
    mold: bool,
    /// Skip static-link flags.
    #[arg(long)]
    no_static: bool,
}

impl ResolveFlags {
    fn into_settings(self) -> EnvSettings {
        EnvSettings {
            ccache: self.no_ccache.then_some(false),
            sccache: self.sccache.then_some(true),
            mold: self.mold.then_some(true),
            static_link: self.no_static.then_some(false),
            overrides: self.overrides,
            ambient_pkg_config_path: std::env::var("PKG_CONFIG_PATH")
                .ok()
                .filter(|value| !value.is_empty()),
        }
    }
}

fn main() {
    if let Err(message) = run_cli() {
        let _ = exit_with_error(&message);
    }
}

fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match cli.command {
        Command::Targets { json } => {
            let outcome = commands::targets::run(commands::targets::TargetsArgs { json })?;
            print!("{}", outcome.rendered);
            Ok(())
        }
        Command::Env {
            dir,
            target,
            flags,
            json,
        } => {
            let outcome = commands::env::run(commands::env::EnvArgs {
                project_dir: dir,
                target,
                settings: flags.into_settings(),
                json,
            })?;
            println!("{}", outcome.rendered.trim_end());
            Ok(())
        }
        Command::Detect { dir } => {
            let outcome = commands::detect::run(commands::detect::DetectArgs { project_dir: dir })?;
            println!("{}", outcome.classification);
            Ok(())
        }
        Command::Plan { dir, target, json } => {
            let outcome = commands::plan::run(commands::plan::PlanArgs {
                project_dir: dir,
                target,
                json,
            })?;
            println!("{}", outcome.rendered.trim_end());
            Ok(())
        }
        Command::Build {
            dir,
            target,
            flags,
            dry_run,
        } => {
            let outcome = commands::build::run(commands::build::BuildArgs {
                project_dir: dir,
                target,
                settings: flags.into_settings(),
                dry_run,
            })?;
            if dry_run {
                if let Some(environment) = &outcome.environment {
                    print!("{}", environment.to_shell_exports());
                }
                for report in &outcome.reports {
                    println!("{}", report.rendered);
                }
            } else {
                println!("project={}", outcome.plan.classification);
                if let Some(environment) = &outcome.environment {
                    println!("target={}", environment.target());
                    println!("fingerprint={}", environment.fingerprint());
                }
                println!("steps={}", outcome.reports.len());
            }
            Ok(())
        }
        Command::CheckStatic { files } => {
            let outcome =
                commands::check_static::run(commands::check_static::CheckStaticArgs { files })?;
            for report in &outcome.reports {
                println!("{}: {}", report.path.display(), report.description);
                for library in &report.needed {
                    println!("  needs {}", library);
                }
            }
            if !outcome.all_static() {
                return exit_with_error("dynamically linked files found");
            }
            Ok(())
        }
        Command::Size { files } => {
            let report = commands::size::run(commands::size::SizeArgs { files })?;
            print!("{}", report.render());
            Ok(())
        }
    }
}

fn exit_with_error(message: &str) -> Result<(), String> {
    eprintln!("{}", message);
    std::process::exit(1);
}
