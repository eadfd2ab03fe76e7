//! CLI argument definitions for Lifekit.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{ReadingArgs, ReadingKind};

/// Lifekit - personal productivity trackers backed by local JSON files.
///
/// Each command group owns one document in the data directory.
#[derive(Parser, Debug)]
#[command(name = "lk")]
#[command(
    author,
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LK_GIT_COMMIT"), ", built ", env!("LK_BUILD_TIMESTAMP"), ")"),
    about = "Personal productivity trackers: reading, ideas, meals, skills, workouts",
    long_about = None
)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Directory holding the tracker documents.
    /// Can also be set via LK_DATA_DIR or `data-dir` in config.kdl.
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level command groups
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reading tracker (books, certifications, articles, quotes)
    Reads {
        #[command(subcommand)]
        command: ReadsCommands,
    },

    /// Content idea topics, generation and saved ideas
    Ideas {
        #[command(subcommand)]
        command: IdeasCommands,
    },

    /// Recipes, meal plans and shopping lists
    Meals {
        #[command(subcommand)]
        command: MealsCommands,
    },

    /// Skill practice time tracker
    Skills {
        #[command(subcommand)]
        command: SkillsCommands,
    },

    /// Workout routines and workout log
    Workouts {
        #[command(subcommand)]
        command: WorkoutsCommands,
    },

    /// Bank account balances via Plaid
    Bank {
        #[command(subcommand)]
        command: BankCommands,
    },

    /// Configuration inspection
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Optional reading item fields shared by `reads add` and `reads update`
#[derive(Args, Debug, Clone, Default)]
pub struct ReadingFlags {
    /// Title (books, certifications, articles)
    #[arg(long)]
    pub title: Option<String>,

    /// Quote text
    #[arg(long)]
    pub content: Option<String>,

    /// Author (books, quotes)
    #[arg(long)]
    pub author: Option<String>,

    /// Source or publisher (certifications, articles)
    #[arg(long)]
    pub source: Option<String>,

    /// Link to the item
    #[arg(long)]
    pub link: Option<String>,

    /// Chapters, modules or articles completed
    #[arg(long)]
    pub current_progress: Option<u32>,

    /// Total chapters, modules or articles
    #[arg(long)]
    pub total_progress: Option<u32>,

    /// Free-form status (e.g. "in progress", "done")
    #[arg(long)]
    pub status: Option<String>,

    /// Tags, replacing the defaults
    #[arg(long, num_args = 1..)]
    pub tags: Option<Vec<String>>,

    /// Target completion date, YYYY-MM-DD (certifications)
    #[arg(long)]
    pub target_completion_date: Option<NaiveDate>,
}

impl From<ReadingFlags> for ReadingArgs {
    fn from(flags: ReadingFlags) -> Self {
        Self {
            title: flags.title,
            content: flags.content,
            author: flags.author,
            source: flags.source,
            link: flags.link,
            current_progress: flags.current_progress,
            total_progress: flags.total_progress,
            status: flags.status,
            tags: flags.tags,
            target_completion_date: flags.target_completion_date,
        }
    }
}

/// Reading subcommands
#[derive(Subcommand, Debug)]
pub enum ReadsCommands {
    /// Add a reading item
    Add {
        /// Item type (book, certification, article, quote)
        kind: ReadingKind,

        #[command(flatten)]
        fields: ReadingFlags,
    },

    /// Update fields of a reading item
    Update {
        /// Item ID
        id: u64,

        #[command(flatten)]
        fields: ReadingFlags,
    },

    /// Delete a reading item
    Delete {
        /// Item ID
        id: u64,
    },

    /// List reading items
    List {
        /// Filter by type
        #[arg(long = "type")]
        kind: Option<ReadingKind>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,

        /// Filter by tag
        #[arg(long)]
        tag: Option<String>,
    },
}

/// Idea subcommands
#[derive(Subcommand, Debug)]
pub enum IdeasCommands {
    /// Register a content topic
    AddTopic {
        /// Topic name
        topic: String,
    },

    /// List registered topics
    ListTopics,

    /// Generate distinct ideas for a topic
    Generate {
        /// Topic with a keyword set (DJing, Music Production, Quality Automation, Fatherhood, Cooking)
        topic: String,

        /// Number of ideas (default from config, else 5)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Save the generated ideas
        #[arg(long)]
        save: bool,
    },

    /// Save an idea
    Save {
        /// Idea text
        text: String,
    },

    /// List saved ideas
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },

    /// Change the status of a saved idea
    Update {
        /// Idea ID
        id: u64,

        /// New status (e.g. "drafted", "published")
        #[arg(long)]
        status: String,
    },

    /// Delete a saved idea
    Delete {
        /// Idea ID
        id: u64,
    },
}

/// Meal subcommands
#[derive(Subcommand, Debug)]
pub enum MealsCommands {
    /// Add a recipe
    AddRecipe {
        /// Recipe name
        name: String,

        /// Comma-separated ingredients (e.g. "rice, beans, salsa")
        #[arg(long)]
        ingredients: String,
    },

    /// List recipes
    ListRecipes,

    /// Generate a new meal plan, replacing the current one
    GeneratePlan {
        /// Number of days (default from config, else 7)
        #[arg(long)]
        days: Option<u32>,
    },

    /// Show the current meal plan
    ShowPlan,

    /// Shopping list for the current meal plan
    ShoppingList,
}

/// Skill subcommands
#[derive(Subcommand, Debug)]
pub enum SkillsCommands {
    /// Start tracking a skill
    Add {
        /// Skill name
        name: String,
    },

    /// Log practice time
    Log {
        /// Skill name
        name: String,

        /// Hours spent
        #[arg(long)]
        time: f64,

        /// Note about the session
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Show a skill with its logs
    Show {
        /// Skill name
        name: String,
    },

    /// List skills with total time
    List,
}

/// Workout subcommands
#[derive(Subcommand, Debug)]
pub enum WorkoutsCommands {
    /// Define a workout routine
    Define {
        /// Routine name
        name: String,

        /// Comma-separated exercises (e.g. "Squats, Lunges")
        #[arg(long)]
        exercises: String,
    },

    /// Log a completed workout
    Log {
        /// Routine name
        name: String,

        /// Date of the workout, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the workout log, newest first
    History,

    /// Count workouts in the last 7 and 30 days
    Status,

    /// List workout routines
    List,
}

/// Bank subcommands
#[derive(Subcommand, Debug)]
pub enum BankCommands {
    /// Fetch account balances (reads PLAID_* from the environment or .env)
    Accounts,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration values and where each came from
    Show,
}
