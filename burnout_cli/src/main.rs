use burnout_core::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "burnout")]
#[command(about = "Heart-rate based calorie burn estimator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enter your details (replaces any saved profile)
    Setup {
        #[arg(long)]
        name: String,

        #[arg(long)]
        age: String,

        #[arg(long, value_enum)]
        gender: GenderArg,

        /// Weight in kilograms
        #[arg(long)]
        weight: String,

        /// Resting heart rate in beats per minute
        #[arg(long)]
        resting_bpm: f64,
    },

    /// Show the saved profile
    Show,

    /// Estimate calorie burn from a heart-rate reading
    Estimate {
        /// Heart rate in bpm (prompts if omitted)
        #[arg(long)]
        bpm: Option<f64>,

        /// Also report the total for a session of this many minutes
        #[arg(long)]
        minutes: Option<u32>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    burnout_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);
    let mut store = UserProfileStore::open(data_dir, config.profile.legacy_records);

    match cli.command {
        Some(Commands::Setup {
            name,
            age,
            gender,
            weight,
            resting_bpm,
        }) => {
            let form = SetupForm {
                name,
                age,
                weight,
                gender: Some(gender.into()),
                resting_heart_rate: Some(resting_bpm),
            };
            cmd_setup(&mut store, form)
        }
        Some(Commands::Show) => cmd_show(&store),
        Some(Commands::Estimate { bpm, minutes }) => cmd_estimate(&store, bpm, minutes),
        None => cmd_launch(&store),
    }
}

fn cmd_setup(store: &mut UserProfileStore<FileStore>, form: SetupForm) -> Result<()> {
    let profile = form.submit()?;
    store.try_save(&profile)?;

    println!("✓ Profile saved for {}", profile.name);
    Ok(())
}

fn cmd_show(store: &UserProfileStore<FileStore>) -> Result<()> {
    match store.load() {
        Some(profile) => display_profile(&profile),
        None => println!("No profile saved. Run `burnout setup` first."),
    }
    Ok(())
}

fn cmd_estimate(
    store: &UserProfileStore<FileStore>,
    bpm: Option<f64>,
    minutes: Option<u32>,
) -> Result<()> {
    let profile = match route(store.load()) {
        Screen::Home(profile) => profile,
        Screen::Setup => {
            println!("No complete profile saved. Run `burnout setup` first.");
            return Ok(());
        }
    };

    match bpm {
        Some(bpm) => run_estimate(&profile, &mut FixedSensor(Some(bpm)), minutes),
        None => run_estimate(&profile, &mut stdin_sensor(), minutes),
    }
}

/// No subcommand: open on whichever screen the stored profile allows
fn cmd_launch(store: &UserProfileStore<FileStore>) -> Result<()> {
    let stored = store.load();
    let prefill = stored.as_ref().map(SetupForm::from_profile);

    match route(stored) {
        Screen::Setup => {
            if let Some(form) = prefill {
                println!("Your profile is incomplete. Saved details:");
                println!("  Name:   {}", form.name);
                println!("  Age:    {}", form.age);
                println!("  Weight: {}", form.weight);
            }
            println!("Welcome! Set up your profile with:");
            println!(
                "  burnout setup --name <NAME> --age <AGE> --gender <male|female> --weight <KG> --resting-bpm <BPM>"
            );
            Ok(())
        }
        Screen::Home(profile) => {
            display_profile(&profile);
            run_estimate(&profile, &mut stdin_sensor(), None)
        }
    }
}

fn stdin_sensor() -> PromptSensor<io::StdinLock<'static>, io::Stdout> {
    PromptSensor::new(io::stdin().lock(), io::stdout())
}

fn run_estimate<S: HeartRateSensor>(
    profile: &UserProfile,
    sensor: &mut S,
    minutes: Option<u32>,
) -> Result<()> {
    match measure_and_estimate(profile, sensor)? {
        Some(estimate) => {
            println!();
            println!("  Heart rate: {} bpm", estimate.heart_rate);
            println!("  Calories:   {} kcal/min", estimate);
            if let Some(minutes) = minutes {
                let total = estimate.total_over(chrono::Duration::minutes(i64::from(minutes)));
                println!("  Over {} min: {:.2} kcal", minutes, total);
            }
        }
        None => println!("\nMeasurement cancelled."),
    }
    Ok(())
}

fn display_profile(profile: &UserProfile) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PROFILE");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Name:       {}", profile.name);
    println!("  Age:        {}", profile.age);
    println!("  Gender:     {}", profile.gender);
    println!("  Weight:     {} kg", profile.weight);
    println!("  Resting HR: {} bpm", profile.resting_heart_rate);
    if !profile.is_valid {
        println!("  (incomplete - run `burnout setup`)");
    }
    println!();
}
