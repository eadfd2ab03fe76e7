use clap::Parser;
use lifekit::action_log;
use lifekit::cli::{
    BankCommands, Cli, Commands, ConfigCommands, IdeasCommands, MealsCommands, ReadsCommands,
    SkillsCommands, WorkoutsCommands,
};
use lifekit::commands::{self, Output};
use lifekit::config::{ConfigOverrides, OutputFormat, ResolvedConfig, resolve_config};
use lifekit::models::ReadingFilter;
use std::process;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the tracing filter (e.g. `debug`, `lifekit=trace`).
const LOG_ENV: &str = "LK_LOG";

fn main() {
    init_logging();

    let cli = Cli::parse();

    let mut overrides = ConfigOverrides::new();
    if let Some(dir) = &cli.data_dir {
        overrides = overrides.with_data_dir(dir);
    }
    if cli.human_readable {
        overrides = overrides.with_output_format(OutputFormat::Human);
    }

    let config = match resolve_config(&overrides) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e, cli.human_readable),
    };
    let human = *config.output_format() == OutputFormat::Human;

    // Serialize command for logging
    let (cmd_name, args_json) = serialize_command(&cli.command);

    let start = Instant::now();
    let result = run_command(cli.command, &config, human);
    let duration = start.elapsed().as_millis() as u64;

    if config.action_log() {
        let (success, error) = match &result {
            Ok(_) => (true, None),
            Err(e) => (false, Some(e.to_string())),
        };
        action_log::log_action(
            config.data_dir(),
            &cmd_name,
            args_json,
            success,
            error,
            duration,
        );
    }

    if let Err(e) = result {
        exit_with_error(&e, human);
    }
}

/// Send diagnostics to stderr, filtered by `LK_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_with_error(e: &lifekit::Error, human: bool) -> ! {
    if human {
        eprintln!("Error: {}", e);
    } else {
        eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
    }
    process::exit(1);
}

fn run_command(
    command: Commands,
    config: &ResolvedConfig,
    human: bool,
) -> Result<(), lifekit::Error> {
    let data_dir = config.data_dir();

    match command {
        Commands::Reads { command } => match command {
            ReadsCommands::Add { kind, fields } => {
                let result = commands::reads_add(data_dir, kind, fields.into())?;
                output(&result, human);
            }
            ReadsCommands::Update { id, fields } => {
                let result =
                    commands::reads_update(data_dir, id, fields.into(), config.strict_updates())?;
                output(&result, human);
            }
            ReadsCommands::Delete { id } => {
                let result = commands::reads_delete(data_dir, id)?;
                output(&result, human);
            }
            ReadsCommands::List { kind, status, tag } => {
                let filter = ReadingFilter { kind, status, tag };
                let result = commands::reads_list(data_dir, &filter)?;
                output(&result, human);
            }
        },

        Commands::Ideas { command } => match command {
            IdeasCommands::AddTopic { topic } => {
                let result = commands::ideas_add_topic(data_dir, &topic)?;
                output(&result, human);
            }
            IdeasCommands::ListTopics => {
                let result = commands::ideas_list_topics(data_dir)?;
                output(&result, human);
            }
            IdeasCommands::Generate { topic, count, save } => {
                let result = commands::ideas_generate(
                    data_dir,
                    &topic,
                    count.unwrap_or(config.idea_count()),
                    config.idea_max_attempts(),
                    save,
                )?;
                output(&result, human);
            }
            IdeasCommands::Save { text } => {
                let result = commands::ideas_save(data_dir, &text)?;
                output(&result, human);
            }
            IdeasCommands::List { status } => {
                let result = commands::ideas_list(data_dir, status.as_deref())?;
                output(&result, human);
            }
            IdeasCommands::Update { id, status } => {
                let result = commands::ideas_update(data_dir, id, &status)?;
                output(&result, human);
            }
            IdeasCommands::Delete { id } => {
                let result = commands::ideas_delete(data_dir, id)?;
                output(&result, human);
            }
        },

        Commands::Meals { command } => match command {
            MealsCommands::AddRecipe { name, ingredients } => {
                let result = commands::meals_add_recipe(data_dir, &name, &ingredients)?;
                output(&result, human);
            }
            MealsCommands::ListRecipes => {
                let result = commands::meals_list_recipes(data_dir)?;
                output(&result, human);
            }
            MealsCommands::GeneratePlan { days } => {
                let days = days.unwrap_or(config.default_plan_days());
                let result = commands::meals_generate_plan(data_dir, days)?;
                output(&result, human);
            }
            MealsCommands::ShowPlan => {
                let result = commands::meals_show_plan(data_dir)?;
                output(&result, human);
            }
            MealsCommands::ShoppingList => {
                let result = commands::meals_shopping_list(data_dir)?;
                output(&result, human);
            }
        },

        Commands::Skills { command } => match command {
            SkillsCommands::Add { name } => {
                let result = commands::skills_add(data_dir, &name)?;
                output(&result, human);
            }
            SkillsCommands::Log { name, time, note } => {
                let result = commands::skills_log(data_dir, &name, time, &note)?;
                output(&result, human);
            }
            SkillsCommands::Show { name } => {
                let result = commands::skills_show(data_dir, &name)?;
                output(&result, human);
            }
            SkillsCommands::List => {
                let result = commands::skills_list(data_dir)?;
                output(&result, human);
            }
        },

        Commands::Workouts { command } => match command {
            WorkoutsCommands::Define { name, exercises } => {
                let result = commands::workouts_define(data_dir, &name, &exercises)?;
                output(&result, human);
            }
            WorkoutsCommands::Log { name, date } => {
                let result = commands::workouts_log(data_dir, &name, date)?;
                output(&result, human);
            }
            WorkoutsCommands::History => {
                let result = commands::workouts_history(data_dir)?;
                output(&result, human);
            }
            WorkoutsCommands::Status => {
                let result = commands::workouts_status(data_dir)?;
                output(&result, human);
            }
            WorkoutsCommands::List => {
                let result = commands::workouts_list(data_dir)?;
                output(&result, human);
            }
        },

        Commands::Bank { command } => match command {
            BankCommands::Accounts => {
                let result = commands::bank_accounts()?;
                output(&result, human);
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let result = commands::config_show(config);
                output(&result, human);
            }
        },
    }

    Ok(())
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

/// Command name and arguments for the action log.
fn serialize_command(command: &Commands) -> (String, serde_json::Value) {
    match command {
        Commands::Reads { command } => match command {
            ReadsCommands::Add { kind, fields } => (
                "reads add".to_string(),
                serde_json::json!({
                    "type": kind.as_str(),
                    "title": fields.title,
                    "content": fields.content,
                    "author": fields.author,
                    "source": fields.source,
                    "link": fields.link,
                    "current_progress": fields.current_progress,
                    "total_progress": fields.total_progress,
                    "status": fields.status,
                    "tags": fields.tags,
                    "target_completion_date": fields.target_completion_date,
                }),
            ),
            ReadsCommands::Update { id, fields } => (
                "reads update".to_string(),
                serde_json::json!({
                    "id": id,
                    "title": fields.title,
                    "content": fields.content,
                    "author": fields.author,
                    "source": fields.source,
                    "link": fields.link,
                    "current_progress": fields.current_progress,
                    "total_progress": fields.total_progress,
                    "status": fields.status,
                    "tags": fields.tags,
                    "target_completion_date": fields.target_completion_date,
                }),
            ),
            ReadsCommands::Delete { id } => {
                ("reads delete".to_string(), serde_json::json!({ "id": id }))
            }
            ReadsCommands::List { kind, status, tag } => (
                "reads list".to_string(),
                serde_json::json!({
                    "type": kind.map(|k| k.as_str()),
                    "status": status,
                    "tag": tag,
                }),
            ),
        },

        Commands::Ideas { command } => match command {
            IdeasCommands::AddTopic { topic } => (
                "ideas add-topic".to_string(),
                serde_json::json!({ "topic": topic }),
            ),
            IdeasCommands::ListTopics => ("ideas list-topics".to_string(), serde_json::json!({})),
            IdeasCommands::Generate { topic, count, save } => (
                "ideas generate".to_string(),
                serde_json::json!({ "topic": topic, "count": count, "save": save }),
            ),
            IdeasCommands::Save { text } => {
                ("ideas save".to_string(), serde_json::json!({ "text": text }))
            }
            IdeasCommands::List { status } => {
                ("ideas list".to_string(), serde_json::json!({ "status": status }))
            }
            IdeasCommands::Update { id, status } => (
                "ideas update".to_string(),
                serde_json::json!({ "id": id, "status": status }),
            ),
            IdeasCommands::Delete { id } => {
                ("ideas delete".to_string(), serde_json::json!({ "id": id }))
            }
        },

        Commands::Meals { command } => match command {
            MealsCommands::AddRecipe { name, ingredients } => (
                "meals add-recipe".to_string(),
                serde_json::json!({ "name": name, "ingredients": ingredients }),
            ),
            MealsCommands::ListRecipes => ("meals list-recipes".to_string(), serde_json::json!({})),
            MealsCommands::GeneratePlan { days } => (
                "meals generate-plan".to_string(),
                serde_json::json!({ "days": days }),
            ),
            MealsCommands::ShowPlan => ("meals show-plan".to_string(), serde_json::json!({})),
            MealsCommands::ShoppingList => {
                ("meals shopping-list".to_string(), serde_json::json!({}))
            }
        },

        Commands::Skills { command } => match command {
            SkillsCommands::Add { name } => {
                ("skills add".to_string(), serde_json::json!({ "name": name }))
            }
            SkillsCommands::Log { name, time, note } => (
                "skills log".to_string(),
                serde_json::json!({ "name": name, "time": time, "note": note }),
            ),
            SkillsCommands::Show { name } => {
                ("skills show".to_string(), serde_json::json!({ "name": name }))
            }
            SkillsCommands::List => ("skills list".to_string(), serde_json::json!({})),
        },

        Commands::Workouts { command } => match command {
            WorkoutsCommands::Define { name, exercises } => (
                "workouts define".to_string(),
                serde_json::json!({ "name": name, "exercises": exercises }),
            ),
            WorkoutsCommands::Log { name, date } => (
                "workouts log".to_string(),
                serde_json::json!({ "name": name, "date": date }),
            ),
            WorkoutsCommands::History => ("workouts history".to_string(), serde_json::json!({})),
            WorkoutsCommands::Status => ("workouts status".to_string(), serde_json::json!({})),
            WorkoutsCommands::List => ("workouts list".to_string(), serde_json::json!({})),
        },

        Commands::Bank { command } => match command {
            BankCommands::Accounts => ("bank accounts".to_string(), serde_json::json!({})),
        },

        Commands::Config { command } => match command {
            ConfigCommands::Show => ("config show".to_string(), serde_json::json!({})),
        },
    }
}
