use anyhow::{Context, Result, bail};
use chrono::NaiveTime;
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use tutorlink::App;
use tutorlink::tutorlink_config::{ApiConfig, LoggingConfig, StorageConfig};
use tutorlink::tutorlink_models::availability::{parse_time, weekday_name};
use tutorlink::tutorlink_models::{
    AvailabilitySlotUpdate, Grade, NewAvailabilitySlot, Role, StudentProfilePayload, TargetExam,
};
use tutorlink::tutorlink_session::Route;
use tutorlink_observability::init_basic_console_logging;

#[derive(Parser)]
#[command(name = "tutorlink")]
#[command(about = "Tutorlink - tutoring marketplace client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        #[arg(short = 'r', long, value_enum, default_value = "student")]
        role: RoleArg,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show which screen stack is active
    Route,
    /// Student profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Weekly availability slots (students only)
    Availability {
        #[command(subcommand)]
        command: AvailabilityCommand,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    Show,
    /// Create or update the profile
    Set {
        #[arg(long)]
        full_name: String,

        #[arg(long, value_enum)]
        grade: GradeArg,

        #[arg(long, value_enum)]
        target_exam: ExamArg,

        #[arg(long)]
        target_score: Option<f64>,

        #[arg(long)]
        target_rank: Option<i64>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        district: Option<String>,

        #[arg(long)]
        neighborhood: Option<String>,

        /// Comma-separated, e.g. `online,in_person`
        #[arg(long, value_delimiter = ',')]
        preferred_modes: Vec<String>,

        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum AvailabilityCommand {
    List,
    Add {
        /// 0 = Monday .. 6 = Sunday
        #[arg(short = 'd', long)]
        day: u8,

        /// HH:MM
        #[arg(short = 's', long, value_parser = parse_time_arg)]
        start: NaiveTime,

        /// HH:MM
        #[arg(short = 'e', long, value_parser = parse_time_arg)]
        end: NaiveTime,
    },
    Update {
        id: String,

        #[arg(short = 'd', long)]
        day: Option<u8>,

        #[arg(short = 's', long, value_parser = parse_time_arg)]
        start: Option<NaiveTime>,

        #[arg(short = 'e', long, value_parser = parse_time_arg)]
        end: Option<NaiveTime>,
    },
    Remove {
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Student,
    Tutor,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Student => Role::Student,
            RoleArg::Tutor => Role::Tutor,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GradeArg {
    #[value(name = "11")]
    Eleventh,
    #[value(name = "12")]
    Twelfth,
    Graduate,
}

impl From<GradeArg> for Grade {
    fn from(arg: GradeArg) -> Self {
        match arg {
            GradeArg::Eleventh => Grade::Eleventh,
            GradeArg::Twelfth => Grade::Twelfth,
            GradeArg::Graduate => Grade::Graduate,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExamArg {
    Tyt,
    Ayt,
    Both,
}

impl From<ExamArg> for TargetExam {
    fn from(arg: ExamArg) -> Self {
        match arg {
            ExamArg::Tyt => TargetExam::Tyt,
            ExamArg::Ayt => TargetExam::Ayt,
            ExamArg::Both => TargetExam::Both,
        }
    }
}

fn parse_time_arg(value: &str) -> Result<NaiveTime, String> {
    parse_time(value).map_err(|_| format!("'{value}' is not a time in HH:MM form"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let _logging = init_basic_console_logging(&LoggingConfig::from_env());

    let cli = Cli::parse();

    // Rehydration completes before any command looks at the session.
    let app = App::bootstrap(&ApiConfig::from_env(), &StorageConfig::from_env())
        .await
        .context("Failed to initialize client")?;

    match cli.command {
        Commands::Login { email, password } => handle_login(&app, email, password).await,
        Commands::Register {
            email,
            password,
            role,
        } => handle_register(&app, email, password, role.into()).await,
        Commands::Logout => {
            app.logout().await;
            println!("Signed out.");
            Ok(())
        }
        Commands::Whoami => {
            match app.session().user() {
                Some(user) => println!("{} ({}, id {})", user.email, user.role, user.id),
                None => println!("Not signed in."),
            }
            Ok(())
        }
        Commands::Route => {
            print_route(app.route());
            Ok(())
        }
        Commands::Profile { command } => handle_profile(&app, command).await,
        Commands::Availability { command } => handle_availability(&app, command).await,
    }
}

fn prompt_email(email: Option<String>) -> Result<String> {
    match email {
        Some(e) => Ok(e),
        None => Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .context("Failed to read email"),
    }
}

fn prompt_password(password: Option<String>, confirm: bool) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => {
            let prompt = Password::new().with_prompt("Password");
            let prompt = if confirm {
                prompt.with_confirmation("Confirm password", "Passwords do not match")
            } else {
                prompt
            };
            prompt.interact().context("Failed to read password")
        }
    }
}

fn print_route(route: Route) {
    println!("{} ({})", route, route.screens().join(", "));
}

async fn handle_login(app: &App, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = prompt_email(email)?;
    let password = prompt_password(password, false)?;

    let route = app
        .login(&email, &password)
        .await
        .context("Login failed")?;

    println!("Signed in as {email}.");
    print_route(route);
    Ok(())
}

async fn handle_register(
    app: &App,
    email: Option<String>,
    password: Option<String>,
    role: Role,
) -> Result<()> {
    let email = prompt_email(email)?;
    let password = prompt_password(password, true)?;

    let route = app
        .register(&email, &password, role)
        .await
        .context("Registration failed")?;

    println!("Account created for {email} ({role}).");
    print_route(route);
    Ok(())
}

fn ensure_student(app: &App) -> Result<()> {
    match app.route() {
        Route::StudentSession => Ok(()),
        Route::Unauthenticated => bail!("Not signed in. Run `tutorlink login` first."),
        Route::TutorSession => bail!("This command is only available to students."),
    }
}

async fn handle_profile(app: &App, command: ProfileCommand) -> Result<()> {
    ensure_student(app)?;

    match command {
        ProfileCommand::Show => match app
            .student_profile()
            .await
            .context("Failed to load profile")?
        {
            Some(profile) => {
                println!("Name:     {}", profile.full_name.as_deref().unwrap_or("-"));
                println!("Grade:    {:?}", profile.grade);
                println!("Exam:     {:?}", profile.target_exam);
                println!("District: {}", profile.district.as_deref().unwrap_or("-"));
                if !profile.preferred_modes.is_empty() {
                    println!("Modes:    {}", profile.preferred_modes.join(", "));
                }
            }
            None => println!("No profile yet. Create one with `tutorlink profile set`."),
        },
        ProfileCommand::Set {
            full_name,
            grade,
            target_exam,
            target_score,
            target_rank,
            city,
            district,
            neighborhood,
            preferred_modes,
            notes,
        } => {
            let payload = StudentProfilePayload {
                full_name,
                grade: grade.into(),
                target_exam: target_exam.into(),
                target_score,
                target_rank,
                city,
                district,
                neighborhood,
                preferred_modes,
                notes,
            };
            let profile = app
                .save_student_profile(&payload)
                .await
                .context("Failed to save profile")?;
            println!("Profile {} saved.", profile.id);
        }
    }
    Ok(())
}

async fn handle_availability(app: &App, command: AvailabilityCommand) -> Result<()> {
    ensure_student(app)?;

    match command {
        AvailabilityCommand::List => {
            let slots = app
                .availability()
                .await
                .context("Failed to load availability")?;
            if slots.is_empty() {
                println!("No availability slots.");
            }
            for slot in slots {
                let fmt = |t: Option<NaiveTime>| {
                    t.map(|t| t.format("%H:%M").to_string())
                        .unwrap_or_else(|| "--:--".to_string())
                };
                println!(
                    "{}  {:<9} {}-{}",
                    slot.id,
                    weekday_name(slot.day_of_week).unwrap_or("?"),
                    fmt(slot.start_time),
                    fmt(slot.end_time)
                );
            }
        }
        AvailabilityCommand::Add { day, start, end } => {
            let slot = app
                .add_availability(&NewAvailabilitySlot {
                    day_of_week: day,
                    start_time: start,
                    end_time: end,
                })
                .await
                .context("Failed to add slot")?;
            println!("Added slot {}.", slot.id);
        }
        AvailabilityCommand::Update {
            id,
            day,
            start,
            end,
        } => {
            let update = AvailabilitySlotUpdate {
                day_of_week: day,
                start_time: start,
                end_time: end,
            };
            if update.is_empty() {
                bail!("Nothing to update. Pass --day, --start or --end.");
            }
            app.update_availability(&id, &update)
                .await
                .context("Failed to update slot")?;
            println!("Updated slot {id}.");
        }
        AvailabilityCommand::Remove { id } => {
            app.remove_availability(&id)
                .await
                .context("Failed to remove slot")?;
            println!("Removed slot {id}.");
        }
    }
    Ok(())
}
