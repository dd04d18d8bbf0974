use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use studbook_core::{BreedingFilters, Customization, DistanceFocus, GenerationType, Strategy, Surface};
use studbook_data::{CareerGrade, CareerStats, HorseProfile};
use studbook_lib::{App, PoolSide};

#[derive(Parser, Debug)]
#[command(author, version, about = "Horse breeding and attribute engine", long_about = None)]
struct Cli {
    /// Engine config file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Stable save file
    #[arg(short, long, default_value = "stable.json", global = true)]
    stable: PathBuf,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Default)]
struct CustomizationArgs {
    /// Track preparation (turf, dirt)
    #[arg(long)]
    track: Option<Surface>,

    /// Distance preparation (sprint, mile, medium, long)
    #[arg(long)]
    distance: Option<DistanceFocus>,

    /// Running style preparation (front, pace, late)
    #[arg(long)]
    strategy: Option<Strategy>,
}

impl CustomizationArgs {
    fn to_customization(&self) -> Customization {
        Customization {
            track: self.track,
            distance: self.distance,
            strategy: self.strategy,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate stats for a horse with no parents
    Generate {
        breed: String,

        /// foundation, bred or customized
        #[arg(long, default_value = "foundation")]
        kind: GenerationType,

        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        custom: CustomizationArgs,
    },
    /// Retire a horse (JSON profile) into the stable
    Retire {
        horse: PathBuf,

        #[arg(long)]
        grade: CareerGrade,

        #[arg(long, default_value_t = 0)]
        wins: u32,

        #[arg(long)]
        races: u32,

        #[arg(long = "achievement")]
        achievements: Vec<String>,

        #[arg(long)]
        turn: Option<u32>,
    },
    /// List breeding stock
    Pool {
        #[arg(value_enum)]
        side: PoolSide,

        #[arg(long)]
        breed: Option<String>,

        #[arg(long)]
        specialization: Option<String>,

        #[arg(long)]
        min_grade: Option<CareerGrade>,

        #[arg(long)]
        max_inbreeding: Option<f64>,
    },
    /// Rank mates for a retired horse
    Recommend {
        name: String,

        #[arg(long, default_value_t = 5)]
        max: usize,
    },
    /// Breed two retired horses and generate the foal
    Breed {
        sire: String,
        dam: String,
        foal: String,

        /// Foal breed; defaults to the sire's
        #[arg(long)]
        breed: Option<String>,

        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        custom: CustomizationArgs,
    },
    /// Record the final grade of a bred foal
    RecordResult { offspring: String, grade: CareerGrade },
    /// Print a stable summary
    Inspect,
    /// Issue or read pedigree certificates
    #[command(subcommand)]
    Certificate(CertificateCommand),
    /// Write the stable to a validated binary backup
    Backup { path: PathBuf },
    /// Replace the stable with a backup
    Restore { path: PathBuf },
}

#[derive(Subcommand, Debug)]
enum CertificateCommand {
    /// Print the certificate of a retired horse's pedigree
    Issue { name: String },
    /// Decode a certificate back into a pedigree
    Read { token: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", studbook_io::to_json_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    studbook_core::init_logging(&cli.log_level);

    let mut app = App::load(&cli.config, &cli.stable)?;

    match cli.command {
        Command::Generate {
            breed,
            kind,
            seed,
            custom,
        } => {
            let report = app.generate(&breed, kind, &custom.to_customization(), seed)?;
            print_json(&report)
        }
        Command::Retire {
            horse,
            grade,
            wins,
            races,
            achievements,
            turn,
        } => {
            let profile: HorseProfile = studbook_io::read_json_file(&horse)?;
            let career = CareerStats {
                grade,
                races_won: wins,
                total_races: races,
                achievements,
                retirement_turn: turn,
            };
            let record = app.retire(&profile, &career)?;
            print_json(&record)
        }
        Command::Pool {
            side,
            breed,
            specialization,
            min_grade,
            max_inbreeding,
        } => {
            let filters = BreedingFilters {
                breed,
                specialization,
                min_grade,
                max_inbreeding,
            };
            print_json(&app.pool(side, &filters))
        }
        Command::Recommend { name, max } => print_json(&app.recommend(&name, max)?),
        Command::Breed {
            sire,
            dam,
            foal,
            breed,
            seed,
            custom,
        } => {
            let report = app.breed_foal(
                &sire,
                &dam,
                &foal,
                breed.as_deref(),
                &custom.to_customization(),
                seed,
            )?;
            print_json(&report)
        }
        Command::RecordResult { offspring, grade } => {
            app.record_result(&offspring, grade)?;
            println!("Recorded {offspring} as grade {grade}");
            Ok(())
        }
        Command::Inspect => print_json(&app.inspect()),
        Command::Certificate(CertificateCommand::Issue { name }) => {
            println!("{}", app.certificate(&name)?);
            Ok(())
        }
        Command::Certificate(CertificateCommand::Read { token }) => {
            print_json(&app.read_certificate(&token)?)
        }
        Command::Backup { path } => {
            app.backup(&path)?;
            println!("Backed up stable to {}", path.display());
            Ok(())
        }
        Command::Restore { path } => print_json(&app.restore(&path)?),
    }
}
